// build.rs
use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let assets_dir = manifest_dir.join("assets");
    fs::create_dir_all(&assets_dir).ok();

    // Seed a default viewer config so a fresh checkout runs without one.
    // An existing file is left alone: it may have been edited by hand.
    let config_path = assets_dir.join("viewer.json");
    if !config_path.exists() {
        let default_config = serde_json::json!({
            "model_path": "models/a.glb",
            "load_timeout_ms": 10000
        });
        let json_content = serde_json::to_string_pretty(&default_config).unwrap();
        fs::write(&config_path, json_content).expect("Failed to write default viewer.json");
    }
}

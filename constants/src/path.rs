/// Default model asset, relative to the Bevy asset root.
pub const DEFAULT_MODEL_PATH: &str = "models/a.glb";

/// Viewer configuration file, relative to the Bevy asset root.
pub const VIEWER_CONFIG_PATH: &str = "viewer.json";

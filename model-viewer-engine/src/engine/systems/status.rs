use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use constants::viewer_settings::ERROR_BANNER_DURATION_MS;

use crate::engine::loading::lifecycle::{LoadLifecycle, LoadPhase, StatusLine, StatusSeverity};
use crate::rpc::web_rpc::ViewerRpc;

#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct LoadingText;

#[derive(Component)]
pub struct BannerText;

#[derive(Component)]
pub struct FpsText;

/// Forward lifecycle changes to the hosting page: status line, loading
/// text, and the transient error banner. Each is sent once per change, the
/// banner with its display duration so the frontend collapses it itself.
pub fn push_status_updates(
    lifecycle: Res<LoadLifecycle>,
    mut rpc: ResMut<ViewerRpc>,
    mut last_status: Local<Option<StatusLine>>,
    mut last_loading: Local<String>,
    mut last_banner_expiry: Local<Option<f64>>,
) {
    let status = lifecycle.status();
    if last_status.as_ref() != Some(status) {
        rpc.send_notification(
            "model_status",
            serde_json::json!({
                "text": status.text,
                "severity": status.severity.as_str(),
            }),
        );
        *last_status = Some(status.clone());
    }

    let loading_text = lifecycle.loading_text();
    if *last_loading != loading_text {
        rpc.send_notification(
            "loading_text",
            serde_json::json!({ "text": loading_text }),
        );
        *last_loading = String::from(loading_text);
    }

    if let Some(banner) = lifecycle.banner() {
        if *last_banner_expiry != Some(banner.expires_ms) {
            rpc.send_notification(
                "transient_error",
                serde_json::json!({
                    "text": banner.text,
                    "duration_ms": ERROR_BANNER_DURATION_MS,
                }),
            );
            *last_banner_expiry = Some(banner.expires_ms);
        }
    }
}

/// Native builds render the same surfaces as the web frontend: a status
/// line, the loading text, an auto-hiding error banner, and an FPS readout.
pub fn spawn_status_overlay(commands: &mut Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("Status: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                StatusText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(34.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                LoadingText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: 15.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.5, 0.4)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(40.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                Visibility::Hidden,
                BannerText,
            ));
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                FpsText,
            ));
        });
}

pub fn update_status_overlay(
    time: Res<Time>,
    lifecycle: Res<LoadLifecycle>,
    mut status_query: Query<(&mut Text, &mut TextColor), (With<StatusText>, Without<LoadingText>)>,
    mut loading_query: Query<&mut Text, (With<LoadingText>, Without<StatusText>)>,
    mut banner_query: Query<
        (&mut Text, &mut Visibility),
        (With<BannerText>, Without<StatusText>, Without<LoadingText>),
    >,
) {
    let status = lifecycle.status();
    for (mut text, mut colour) in &mut status_query {
        text.0 = format!("Status: {}", status.text);
        colour.0 = match status.severity {
            StatusSeverity::Info => Color::WHITE,
            StatusSeverity::Success => Color::srgb(0.4, 1.0, 0.5),
            StatusSeverity::Warning => Color::srgb(1.0, 0.8, 0.3),
        };
    }

    let loading = matches!(lifecycle.phase(), LoadPhase::Loading { .. });
    for mut text in &mut loading_query {
        text.0 = if loading {
            String::from(lifecycle.loading_text())
        } else {
            String::new()
        };
    }

    // Banner expiry is purely time-driven, whatever the phase does next.
    let now_ms = time.elapsed().as_secs_f64() * 1000.0;
    for (mut text, mut visibility) in &mut banner_query {
        if lifecycle.banner_visible(now_ms) {
            if let Some(banner) = lifecycle.banner() {
                text.0 = banner.text.clone();
            }
            *visibility = Visibility::Visible;
        } else {
            *visibility = Visibility::Hidden;
        }
    }
}

pub fn fps_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
            if let Some(value) = fps.smoothed() {
                text.0 = format!("FPS: {value:.1}");
            }
        }
    }
}

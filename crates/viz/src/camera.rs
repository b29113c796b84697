//! Camera system: idle orbit, pointer activity, and viewport tracking.

use bevy::core_pipeline::bloom::{BloomPrefilterSettings, BloomSettings};
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use constellation_core::{CameraPose, Constellation};

use crate::frame::{now_ms, FrameSet};
use crate::settings::{RenderConfig, VizSettings};
use crate::to_vec3;

/// Bloom intensity at strength 1.0.
const BLOOM_INTENSITY_SCALE: f32 = 0.3;

/// Plugin for camera placement and the inputs that drive it.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_camera, sync_viewport_with_window))
            .add_systems(
                Update,
                (track_pointer_activity, handle_resize).in_set(FrameSet::Input),
            )
            .add_systems(Update, apply_camera_to_transform.in_set(FrameSet::Sync));
    }
}

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Transform placing the camera at the pose and aiming it at the pose target.
pub fn camera_transform(pose: &CameraPose) -> Transform {
    Transform::from_translation(to_vec3(pose.position)).looking_at(to_vec3(pose.target), Vec3::Y)
}

/// Bloom settings for the render configuration.
pub fn bloom_settings(render: &RenderConfig) -> BloomSettings {
    BloomSettings {
        intensity: render.bloom_strength * BLOOM_INTENSITY_SCALE,
        prefilter_settings: BloomPrefilterSettings {
            threshold: render.bloom_threshold,
            threshold_softness: render.bloom_radius,
        },
        ..BloomSettings::NATURAL
    }
}

/// System to set up the camera on startup.
fn setup_camera(mut commands: Commands, world: Res<Constellation>, settings: Res<VizSettings>) {
    let pose = world.camera();
    commands.spawn((
        Camera3dBundle {
            camera: Camera {
                hdr: true,
                ..default()
            },
            tonemapping: Tonemapping::TonyMcMapface,
            projection: Projection::Perspective(PerspectiveProjection {
                fov: pose.fov_y,
                near: pose.near,
                far: pose.far,
                ..default()
            }),
            transform: camera_transform(&pose),
            ..default()
        },
        bloom_settings(&settings.render),
        MainCamera,
    ));
}

/// System to size the placement viewport from the real window.
fn sync_viewport_with_window(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut world: ResMut<Constellation>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    world.resize(window.width(), window.height());
}

/// System to record pointer movement on the activity clock.
fn track_pointer_activity(
    mut cursor: EventReader<CursorMoved>,
    time: Res<Time>,
    mut world: ResMut<Constellation>,
) {
    if cursor.read().last().is_some() {
        world.pointer_moved(now_ms(&time));
    }
}

/// System to recompute placement limits when the window changes size.
fn handle_resize(mut resized: EventReader<WindowResized>, mut world: ResMut<Constellation>) {
    if let Some(event) = resized.read().last() {
        world.resize(event.width, event.height);
    }
}

/// System to apply the engine's camera pose to the camera transform.
fn apply_camera_to_transform(
    world: Res<Constellation>,
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
) {
    let pose = world.camera();
    for mut transform in camera_query.iter_mut() {
        *transform = camera_transform(&pose);
    }
}

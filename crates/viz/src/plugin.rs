//! Main visualization plugin that ties all systems together.

use bevy::prelude::*;

use constellation_core::Constellation;

use crate::camera::CameraPlugin;
use crate::frame::FramePlugin;
use crate::links::LinkPlugin;
use crate::scene::ScenePlugin;
use crate::settings::VizSettings;
use crate::units::UnitPlugin;

/// Main plugin for the constellation viewer.
///
/// This plugin sets up the window, creates the engine from [`VizSettings`],
/// and adds all sub-plugins.
pub struct ConstellationPlugin;

impl Plugin for ConstellationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VizSettings>();
        let settings = app.world().resource::<VizSettings>().clone();
        let width = settings.render.window_width;
        let height = settings.render.window_height;

        app.insert_resource(Constellation::new(
            settings.engine.clone(),
            width,
            height,
            settings.seed,
            0,
        ))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Constellation".into(),
                resolution: (width, height).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins((
            FramePlugin,
            ScenePlugin,
            CameraPlugin,
            UnitPlugin,
            LinkPlugin,
        ));
    }
}

//! Scene setup: lights, clear color, shared meshes and materials.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::settings::VizSettings;
use crate::to_color;

/// Ambient brightness at intensity 1.0.
const AMBIENT_BRIGHTNESS: f32 = 400.0;
/// Point light lumens at intensity 1.0.
const POINT_LIGHT_LUMENS: f32 = 2_000_000.0;

/// Plugin for lights and shared render assets.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MaterialCache>()
            .add_systems(Startup, setup_scene);
    }
}

/// Meshes shared by every unit.
#[derive(Resource)]
pub struct SceneAssets {
    pub unit_mesh: Handle<Mesh>,
}

/// One material per color, shared across units and across links.
#[derive(Resource, Default)]
pub struct MaterialCache {
    units: HashMap<constellation_core::Color, Handle<StandardMaterial>>,
    links: HashMap<constellation_core::Color, Handle<StandardMaterial>>,
}

impl MaterialCache {
    /// Lit material for units.
    pub fn unit_material(
        &mut self,
        color: constellation_core::Color,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        self.units
            .entry(color)
            .or_insert_with(|| {
                materials.add(StandardMaterial {
                    base_color: to_color(color),
                    ..default()
                })
            })
            .clone()
    }

    /// Unlit material for links.
    pub fn link_material(
        &mut self,
        color: constellation_core::Color,
        materials: &mut Assets<StandardMaterial>,
    ) -> Handle<StandardMaterial> {
        self.links
            .entry(color)
            .or_insert_with(|| {
                materials.add(StandardMaterial {
                    base_color: to_color(color),
                    unlit: true,
                    ..default()
                })
            })
            .clone()
    }
}

/// System to spawn lights and build shared meshes.
fn setup_scene(
    mut commands: Commands,
    settings: Res<VizSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let render = &settings.render;

    commands.insert_resource(ClearColor(to_color(render.background)));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: render.ambient_intensity * AMBIENT_BRIGHTNESS,
    });
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: render.point_light_intensity * POINT_LIGHT_LUMENS,
            range: 200.0,
            ..default()
        },
        transform: Transform::from_translation(Vec3::from_array(render.point_light_position)),
        ..default()
    });

    // Low-poly icosphere stands in for the faceted unit shape
    let radius = settings.engine.placement.unit_radius;
    let unit_mesh = Sphere::new(radius)
        .mesh()
        .ico(0)
        .unwrap_or_else(|_| Sphere::new(radius).mesh().uv(12, 8));
    commands.insert_resource(SceneAssets {
        unit_mesh: meshes.add(unit_mesh),
    });

    tracing::info!("Spawned lights and shared meshes");
}

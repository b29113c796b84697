//! Link rendering: click selection, tube meshes, and growth transforms.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use bevy::window::PrimaryWindow;
use std::collections::HashMap;

use constellation_core::{Constellation, Link, LinkId, Ray, TubeGeometry};

use crate::camera::MainCamera;
use crate::frame::FrameSet;
use crate::scene::MaterialCache;
use crate::{from_vec2, from_vec3, to_vec3};

/// Plugin for link selection and rendering.
pub struct LinkPlugin;

impl Plugin for LinkPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LinkEntities>()
            .add_systems(Update, select_on_click.in_set(FrameSet::Input))
            .add_systems(
                Update,
                (spawn_new_links, apply_link_transforms)
                    .chain()
                    .in_set(FrameSet::Sync),
            );
    }
}

/// Component for the visual representation of a link.
#[derive(Component)]
pub struct LinkMarker {
    pub id: LinkId,
    /// Growth ticks last written to the transform.
    pub applied_ticks: u32,
}

/// Resource mapping link ids to their entities.
#[derive(Resource, Default)]
pub struct LinkEntities {
    /// Map of link id to entity.
    pub map: HashMap<LinkId, Entity>,
}

impl LinkEntities {
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Build a render mesh from engine tube geometry.
pub fn tube_mesh(geometry: &TubeGeometry) -> Mesh {
    let positions: Vec<[f32; 3]> = geometry.positions.iter().map(|p| p.to_array()).collect();
    let normals: Vec<[f32; 3]> = geometry.normals.iter().map(|n| n.to_array()).collect();
    let uvs: Vec<[f32; 2]> = geometry.uvs.iter().map(|uv| uv.to_array()).collect();

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(geometry.indices.clone()))
}

/// Transform for a link's current growth.
pub fn link_transform(link: &Link) -> Transform {
    let growth = link.transform();
    Transform {
        translation: to_vec3(growth.translation),
        scale: Vec3::splat(growth.scale),
        ..default()
    }
}

/// System to select the unit under the cursor on left click.
fn select_on_click(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut world: ResMut<Constellation>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let ray = camera_query
        .get_single()
        .ok()
        .and_then(|(camera, transform)| camera.viewport_to_world(transform, cursor))
        .map(|ray| Ray::new(from_vec3(ray.origin), from_vec3(*ray.direction)))
        .unwrap_or_else(|| world.screen_ray(from_vec2(cursor)));

    match world.select_at(&ray) {
        Some((unit, links)) => {
            tracing::info!(unit = unit.0, links = links.len(), "Selected unit");
        }
        None => tracing::debug!("Click hit nothing"),
    }
}

/// System to spawn a tube for every link created since the last frame.
fn spawn_new_links(
    mut commands: Commands,
    world: Res<Constellation>,
    mut entities: ResMut<LinkEntities>,
    mut cache: ResMut<MaterialCache>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(new_links) = world.links().get(entities.len()..) else {
        return;
    };

    for link in new_links {
        let material = cache.link_material(link.color, &mut materials);
        let entity = commands
            .spawn((
                PbrBundle {
                    mesh: meshes.add(tube_mesh(&link.geometry)),
                    material,
                    transform: link_transform(link),
                    ..default()
                },
                LinkMarker {
                    id: link.id,
                    applied_ticks: link.ticks(),
                },
            ))
            .id();
        entities.map.insert(link.id, entity);
    }
}

/// System to write growth into link transforms. Settled links stop changing.
fn apply_link_transforms(
    world: Res<Constellation>,
    mut links: Query<(&mut LinkMarker, &mut Transform)>,
) {
    for (mut marker, mut transform) in links.iter_mut() {
        let Some(link) = world.link(marker.id) else {
            continue;
        };
        if link.ticks() != marker.applied_ticks {
            *transform = link_transform(link);
            marker.applied_ticks = link.ticks();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constellation_core::{EngineConfig, UnitId};
    use constellation_data::UnitRecord;

    fn world_with_link() -> (Constellation, LinkId) {
        let mut world = Constellation::new(EngineConfig::default(), 800.0, 600.0, 3, 0);
        world.load(vec![UnitRecord::new().with("gender", "f")]);
        let ids = world.select(UnitId(0));
        (world, ids[0])
    }

    #[test]
    fn test_tube_mesh_counts() {
        let (world, id) = world_with_link();
        let link = world.link(id).unwrap();
        let mesh = tube_mesh(&link.geometry);

        assert_eq!(mesh.count_vertices(), 65 * 9);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(64 * 8 * 6));
    }

    #[test]
    fn test_link_transform_starts_collapsed_at_origin_unit() {
        let (world, id) = world_with_link();
        let link = world.link(id).unwrap();
        let transform = link_transform(link);

        assert_eq!(transform.scale, Vec3::ZERO);
        assert_eq!(transform.translation, to_vec3(link.origin_position));
    }

    #[test]
    fn test_transforms_follow_growth_until_settled() {
        let (world, id) = world_with_link();
        let mut app = App::new();
        app.insert_resource(world).add_systems(Update, apply_link_transforms);
        let entity = app
            .world_mut()
            .spawn((
                LinkMarker {
                    id,
                    applied_ticks: 0,
                },
                Transform::default(),
            ))
            .id();

        for frame in 1..=60u64 {
            app.world_mut().resource_mut::<Constellation>().tick(frame * 16);
            app.update();
        }

        let transform = app.world().get::<Transform>(entity).unwrap();
        assert_eq!(transform.scale, Vec3::ONE);
        assert_eq!(transform.translation, Vec3::ZERO);
        assert_eq!(app.world().get::<LinkMarker>(entity).unwrap().applied_ticks, 50);
    }
}

//! Unit rendering: background data load and one mesh per placed unit.

use bevy::prelude::*;
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Mutex;

use constellation_core::{Constellation, UnitId};
use constellation_data::{FileSource, RecordSource, SourceError, UnitRecord};

use crate::frame::FrameSet;
use crate::scene::{MaterialCache, SceneAssets};
use crate::settings::VizSettings;
use crate::to_vec3;

/// Plugin for loading unit records and spawning unit meshes.
pub struct UnitPlugin;

impl Plugin for UnitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DataLoader>()
            .init_resource::<UnitEntities>()
            .add_systems(Startup, start_data_load)
            .add_systems(Update, poll_data_loader.in_set(FrameSet::Input))
            .add_systems(Update, spawn_new_units.in_set(FrameSet::Sync));
    }
}

/// Component for the visual representation of a unit.
#[derive(Component)]
pub struct UnitMarker {
    pub id: UnitId,
}

/// Resource mapping unit ids to their entities.
#[derive(Resource, Default)]
pub struct UnitEntities {
    /// Map of unit id to entity.
    pub map: HashMap<UnitId, Entity>,
}

impl UnitEntities {
    /// Get the entity for a unit.
    pub fn get(&self, id: UnitId) -> Option<Entity> {
        self.map.get(&id).copied()
    }

    /// Record the entity for a unit.
    pub fn insert(&mut self, id: UnitId, entity: Entity) {
        self.map.insert(id, entity);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Progress of the one-shot record fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Fetch running on a background thread.
    Loading,
    /// Records arrived and were placed.
    Loaded { placed: usize, failed: usize },
    /// The fetch failed; the scene stays empty.
    Failed(String),
}

type FetchResult = Result<Vec<UnitRecord>, SourceError>;

/// Resource holding the receiving end of the background fetch.
#[derive(Resource, Default)]
pub struct DataLoader {
    /// Receiver for the fetch result (wrapped for thread safety).
    rx: Option<Mutex<Receiver<FetchResult>>>,
    pub status: LoadStatus,
}

impl DataLoader {
    /// Fetch from `source` on a background thread.
    pub fn start<S: RecordSource + 'static>(&mut self, source: S) {
        let (tx, rx) = channel();
        tracing::info!("Fetching unit records from {}", source.describe());
        std::thread::spawn(move || {
            let _ = tx.send(source.fetch());
        });
        self.rx = Some(Mutex::new(rx));
        self.status = LoadStatus::Loading;
    }

    /// Non-blocking check for the fetch result.
    pub fn poll(&mut self) -> Option<FetchResult> {
        let received = {
            let rx = self.rx.as_ref()?.lock().ok()?;
            rx.try_recv()
        };
        match received {
            Ok(result) => {
                self.rx = None;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.rx = None;
                self.status = LoadStatus::Failed("loader thread exited without a result".into());
                None
            }
        }
    }
}

/// System to kick off the record fetch.
fn start_data_load(settings: Res<VizSettings>, mut loader: ResMut<DataLoader>) {
    loader.start(FileSource::new(settings.data.clone()));
}

/// System to place records once the fetch completes.
pub fn poll_data_loader(mut loader: ResMut<DataLoader>, mut world: ResMut<Constellation>) {
    let Some(result) = loader.poll() else {
        return;
    };
    match result {
        Ok(records) => {
            let report = world.load(records);
            loader.status = LoadStatus::Loaded {
                placed: report.placed.len(),
                failed: report.failed,
            };
        }
        Err(e) => {
            tracing::warn!("Failed to fetch unit records: {}", e);
            loader.status = LoadStatus::Failed(e.to_string());
        }
    }
}

/// System to spawn a mesh for every unit placed since the last frame.
fn spawn_new_units(
    mut commands: Commands,
    world: Res<Constellation>,
    assets: Res<SceneAssets>,
    mut entities: ResMut<UnitEntities>,
    mut cache: ResMut<MaterialCache>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(new_units) = world.units().get(entities.len()..) else {
        return;
    };

    for unit in new_units {
        let material = cache.unit_material(unit.color, &mut materials);
        let entity = commands
            .spawn((
                PbrBundle {
                    mesh: assets.unit_mesh.clone(),
                    material,
                    transform: Transform::from_translation(to_vec3(unit.position)),
                    ..default()
                },
                UnitMarker { id: unit.id },
            ))
            .id();
        entities.insert(unit.id, entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constellation_core::EngineConfig;
    use constellation_data::StaticSource;

    fn wait_for_load(app: &mut App) {
        for _ in 0..200 {
            app.update();
            if !matches!(app.world().resource::<DataLoader>().status, LoadStatus::Loading) {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
    }

    fn app() -> App {
        let mut app = App::new();
        app.insert_resource(Constellation::new(EngineConfig::default(), 800.0, 600.0, 1, 0))
            .init_resource::<DataLoader>()
            .add_systems(Update, poll_data_loader);
        app
    }

    #[test]
    fn test_loader_places_records() {
        let mut app = app();
        app.world_mut()
            .resource_mut::<DataLoader>()
            .start(StaticSource::new(constellation_data::fixtures::gender_scenario()));

        wait_for_load(&mut app);

        assert_eq!(
            app.world().resource::<DataLoader>().status,
            LoadStatus::Loaded { placed: 3, failed: 0 }
        );
        assert_eq!(app.world().resource::<Constellation>().units().len(), 3);
    }

    #[test]
    fn test_failed_fetch_leaves_empty_scene() {
        let mut app = app();
        app.world_mut()
            .resource_mut::<DataLoader>()
            .start(FileSource::new("definitely/not/here.json"));

        wait_for_load(&mut app);

        assert!(matches!(
            app.world().resource::<DataLoader>().status,
            LoadStatus::Failed(_)
        ));
        assert!(app.world().resource::<Constellation>().units().is_empty());
    }

    #[test]
    fn test_unit_entities_map() {
        let mut entities = UnitEntities::default();
        assert!(entities.is_empty());

        entities.insert(UnitId(0), Entity::PLACEHOLDER);
        assert_eq!(entities.get(UnitId(0)), Some(Entity::PLACEHOLDER));
        assert_eq!(entities.len(), 1);
    }
}

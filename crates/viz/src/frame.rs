//! Frame ordering, the per-frame engine tick, and the stop gate.

use bevy::prelude::*;

use constellation_core::{Constellation, StopFlag};

/// Plugin that ticks the engine once per rendered frame.
pub struct FramePlugin;

impl Plugin for FramePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameGate>()
            .configure_sets(
                Update,
                (FrameSet::Input, FrameSet::Tick, FrameSet::Sync)
                    .chain()
                    .run_if(is_running),
            )
            .add_systems(Update, tick_world.in_set(FrameSet::Tick))
            .add_systems(Update, handle_exit_key);
    }
}

/// Ordering of the per-frame work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Pointer, click, resize and data arrival.
    Input,
    /// Engine tick: camera drift and link growth.
    Tick,
    /// Mirror engine state into the scene graph.
    Sync,
}

/// Holds the stop flag checked before every tick.
#[derive(Resource, Default, Clone)]
pub struct FrameGate {
    pub stop: StopFlag,
}

/// Run condition: false once a stop was requested.
pub fn is_running(gate: Res<FrameGate>) -> bool {
    !gate.stop.is_stopped()
}

/// Elapsed app time in milliseconds.
pub fn now_ms(time: &Time) -> u64 {
    time.elapsed().as_millis() as u64
}

/// System to advance the engine by one frame.
fn tick_world(time: Res<Time>, mut world: ResMut<Constellation>) {
    let report = world.tick(now_ms(&time));
    if report.links_advanced > 0 {
        tracing::trace!(frame = report.frame, links = report.links_advanced, "Links grew");
    }
}

/// System to stop ticking and close the app on Escape.
fn handle_exit_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    gate: Res<FrameGate>,
    mut exit: EventWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        gate.stop.request_stop();
        exit.send(AppExit::Success);
    }
}

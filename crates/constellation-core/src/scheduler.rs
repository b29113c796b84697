//! Frame scheduling for runs without a windowing runtime.
//!
//! A vsync-driven host calls [`Constellation::tick`] itself. Headless runs
//! use [`run_frames`] with a simulated [`FrameClock`]. Both check a
//! [`StopFlag`] before every tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::world::{Constellation, FrameReport};

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every holder to stop before its next tick.
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Simulated millisecond clock advancing a fixed interval per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    now_ms: u64,
    interval_ms: u64,
}

impl FrameClock {
    pub fn new(start_ms: u64, interval_ms: u64) -> Self {
        Self {
            now_ms: start_ms,
            interval_ms,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Move to the next frame and return its timestamp.
    pub fn advance(&mut self) -> u64 {
        self.now_ms += self.interval_ms;
        self.now_ms
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0, 16)
    }
}

/// Tick `world` up to `frames` times, calling `on_frame` after each tick.
///
/// Returns the number of frames actually run.
pub fn run_frames<F>(
    world: &mut Constellation,
    frames: u64,
    clock: &mut FrameClock,
    stop: &StopFlag,
    mut on_frame: F,
) -> u64
where
    F: FnMut(&mut Constellation, &FrameReport),
{
    let mut ran = 0;
    while ran < frames {
        if stop.is_stopped() {
            tracing::info!(frame = world.frame(), "Stop requested");
            break;
        }
        let now = clock.advance();
        let report = world.tick(now);
        on_frame(world, &report);
        ran += 1;
    }
    ran
}

//! Hand-off between the game thread and the vertical blank handler.
//!
//! The game thread draws into the back buffer and calls [`FrameSync::request_swap`]. The vblank
//! handler, either a platform callback or the timer thread spawned by [`spawn_vblank_thread`],
//! calls [`FrameSync::vblank`] which performs the pending swap and posts one tick. Everything
//! the tick drives (clock, animation, key timer) is then run by the game thread itself.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct FrameSync {
    swap_requested: AtomicBool,
    pending_ticks: AtomicU32,
    quit: AtomicBool,
}

impl FrameSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_swap(&self) {
        self.swap_requested.store(true, Ordering::Release);
    }

    pub fn swap_pending(&self) -> bool {
        self.swap_requested.load(Ordering::Acquire)
    }

    /// Run one vertical blank. Returns true if a requested swap was performed.
    pub fn vblank(&self) -> bool {
        let swapped = self.swap_requested.swap(false, Ordering::AcqRel);
        self.pending_ticks.fetch_add(1, Ordering::AcqRel);
        swapped
    }

    pub fn has_ticks(&self) -> bool {
        self.pending_ticks.load(Ordering::Acquire) > 0
    }

    /// Consume all ticks posted since the last call.
    pub fn take_ticks(&self) -> u32 {
        self.pending_ticks.swap(0, Ordering::AcqRel)
    }

    pub fn request_quit(&self) {
        self.quit.store(true, Ordering::Release);
    }

    pub fn is_quit(&self) -> bool {
        self.quit.load(Ordering::Acquire)
    }
}

/// Drive `sync` from a background thread at `fps` vblanks per second until quit is requested.
pub fn spawn_vblank_thread(sync: Arc<FrameSync>, fps: u8) -> thread::JoinHandle<()> {
    let period = Duration::from_micros(1_000_000 / u64::from(fps.max(1)));
    thread::spawn(move || {
        debug!("vblank thread running at {} Hz", fps);
        while !sync.is_quit() {
            thread::sleep(period);
            sync.vblank();
        }
        debug!("vblank thread stopped");
    })
}

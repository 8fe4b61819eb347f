//! Blocking pacer on the embassy time driver

use embassy_time::{block_for, Duration};

use hygro_core::traits::Pacer;

/// Busy-waits on the time driver; nothing else runs on this core
pub struct BlockingPacer;

impl Pacer for BlockingPacer {
    fn pause_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }
}

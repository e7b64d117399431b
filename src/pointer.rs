/*
 * Pointer Module
 *
 * The pointer is the only state written from outside the frame loop. Input
 * callbacks record the latest position and every particle update reads it.
 * Only the current position matters, so this is a single slot where the
 * newest write wins instead of a queue of events.
 *
 * Both coordinates are packed into one AtomicU64 (two f32 bit patterns) so
 * a reader on another thread can never see x from one write and y from
 * another.
 */

use std::sync::atomic::{AtomicU64, Ordering};

use glam::DVec2;

// Bit pattern meaning "no pointer seen yet": both halves are a quiet NaN,
// which `record` never stores.
const EMPTY: u64 = u64::MAX;

#[derive(Debug)]
pub struct PointerTracker {
    slot: AtomicU64,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerTracker {
    pub fn new() -> Self {
        Self {
            slot: AtomicU64::new(EMPTY),
        }
    }

    /// Store the latest pointer position in surface coordinates. Each
    /// coordinate is kept as an `f32`, so `latest` returns it rounded to
    /// single precision.
    pub fn record(&self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            log::warn!("Ignoring non-finite pointer position ({x}, {y})");
            return;
        }
        self.slot.store(pack(x as f32, y as f32), Ordering::Release);
    }

    /// Latest recorded position; reading does not consume it
    pub fn latest(&self) -> Option<DVec2> {
        let bits = self.slot.load(Ordering::Acquire);
        if bits == EMPTY {
            return None;
        }
        let (x, y) = unpack(bits);
        Some(DVec2::new(x as f64, y as f64))
    }
}

fn pack(x: f32, y: f32) -> u64 {
    ((x.to_bits() as u64) << 32) | y.to_bits() as u64
}

fn unpack(bits: u64) -> (f32, f32) {
    (f32::from_bits((bits >> 32) as u32), f32::from_bits(bits as u32))
}

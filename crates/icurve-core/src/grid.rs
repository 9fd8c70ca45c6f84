//! The fixed sampling grid `[0, 1)` at step 0.001.
//!
//! Grid points are computed as `start + k * step` rather than by repeated
//! addition, so `time_at(999)` is 0.999 and not an accumulated 0.99899...

use crate::constants::{GRID_LEN, GRID_START, GRID_STEP};

/// Time of grid point `k`.
pub fn time_at(k: usize) -> f64 {
    GRID_START + k as f64 * GRID_STEP
}

/// All grid times in increasing order.
pub fn times() -> impl ExactSizeIterator<Item = f64> + Clone {
    (0..GRID_LEN).map(time_at)
}

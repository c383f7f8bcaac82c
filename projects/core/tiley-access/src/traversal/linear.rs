//! Linear orders: every tiled address is composed from scratch with the swizzle helpers.

use super::{visit, TilePlan, TransferKernel};
use crate::address::{CHUNK_BYTES, ELEMENT_BYTES};

/// Rows outer, units inner.
///
/// # Safety
///
/// See [`super::traverse`].
pub(crate) unsafe fn traverse_rows<K: TransferKernel>(plan: &TilePlan, kernel: &mut K) {
    let chunks = plan.uses_chunks();
    let step = if chunks { CHUNK_BYTES } else { ELEMENT_BYTES };

    for y in 0..plan.height_in_blocks {
        let mut x = 0;
        while x < plan.width_in_bytes {
            visit(kernel, chunks, plan.tiled_offset(x, y), plan.linear_offset(x, y));
            x += step;
        }
    }
}

/// Units outer, rows inner. Same pairs as [`traverse_rows`], transposed order.
///
/// # Safety
///
/// See [`super::traverse`].
pub(crate) unsafe fn traverse_columns<K: TransferKernel>(plan: &TilePlan, kernel: &mut K) {
    let chunks = plan.uses_chunks();
    let step = if chunks { CHUNK_BYTES } else { ELEMENT_BYTES };

    let mut x = 0;
    while x < plan.width_in_bytes {
        for y in 0..plan.height_in_blocks {
            visit(kernel, chunks, plan.tiled_offset(x, y), plan.linear_offset(x, y));
        }
        x += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{address::swizzle_x, format::TileFormat, test_prelude::*};

    fn plan(width_in_bytes: u32, height_in_blocks: u32) -> TilePlan {
        TilePlan {
            x_offset: 0,
            y_offset: 0,
            pitch: 64,
            incr_y: swizzle_x(64),
            width_in_bytes,
            height_in_blocks,
            linear_pitch: 100,
            format: TileFormat::TileY,
        }
    }

    #[test]
    fn columns_visit_down_first() {
        let mut recorder = RecordingKernel::default();
        unsafe { traverse_columns(&plan(32, 2), &mut recorder) };

        let linear: Vec<usize> = recorder
            .visits
            .iter()
            .step_by(4)
            .map(|visit| visit.linear)
            .collect();
        assert_eq!(linear, [0, 100, 16, 116]);
    }

    #[test]
    fn rows_apply_cacheline_swizzle() {
        let mut recorder = RecordingKernel::default();
        // Column 1 (x = 16) of row 4 lives at 0x200 + 0x40, which CSX moves to 0x200.
        unsafe { traverse_rows(&plan(32, 8), &mut recorder) };

        let visit = recorder
            .visits
            .iter()
            .find(|visit| visit.linear == 4 * 100 + 16)
            .copied();
        assert_eq!(visit.map(|visit| visit.tiled), Some(0x200));
    }

    #[test]
    fn narrow_rows_fall_back_to_elements() {
        let mut recorder = RecordingKernel::default();
        unsafe { traverse_rows(&plan(8, 2), &mut recorder) };

        assert_eq!(recorder.chunks, 0);
        assert_eq!(recorder.visits.len(), 4);
    }
}

//! Linear order with incremental tiled addressing.
//!
//! Rather than recomputing `swizzle_x`/`swizzle_y` for every unit, two accumulators are kept
//! in swizzled form and stepped with [`advance_interleaved`]:
//!
//! - `offs_y` only holds the row *within* the tile (bits `4..9`),
//! - `offs_x0` holds the complete X offset plus the tile row the current rows belong to.
//!
//! When `offs_y` wraps to zero the rows moved into the next tile row, so `offs_x0` gains
//! another `incr_y`.
//!
//! See <https://fgiesen.wordpress.com/2011/01/17/texture-tiling-and-swizzling/> for the
//! carry propagation trick.

use super::{TilePlan, TransferKernel};
use crate::address::{
    advance_interleaved, swizzle_x, swizzle_y, CHUNK_BYTES, ELEMENT_BYTES, TILE_HEIGHT_IN_BLOCKS,
};

/// Rows handled per step of the aligned path. Four 16 byte rows fill one 64 byte cacheline
/// of a tile column.
const ROWS_PER_STEP: u32 = 4;

/// # Safety
///
/// See [`super::traverse`].
pub(crate) unsafe fn traverse_intrinsics<K: TransferKernel>(plan: &TilePlan, kernel: &mut K) {
    if plan.intrinsics_fast_path_eligible() {
        tracing::trace!(?plan, "linear intrinsics: 4x16 byte path");
        traverse_aligned(plan, kernel);
    } else {
        tracing::debug!(?plan, "linear intrinsics: alignment not met, using 4 byte fallback");
        traverse_scalar(plan, kernel);
    }
}

/// Processes 4 rows x 16 bytes per step.
///
/// # Safety
///
/// See [`super::traverse`]. `plan` must satisfy [`TilePlan::intrinsics_fast_path_eligible`].
#[inline]
unsafe fn traverse_aligned<K: TransferKernel>(plan: &TilePlan, kernel: &mut K) {
    debug_assert!(plan.intrinsics_fast_path_eligible());

    // Masks for moving 16 bytes in X and 4 rows in Y.
    let x_mask = swizzle_x(CHUNK_BYTES.wrapping_neg());
    let y_mask = swizzle_y(ROWS_PER_STEP.wrapping_neg());

    let mut offs_x0 =
        swizzle_x(plan.x_offset) + plan.incr_y * (plan.y_offset / TILE_HEIGHT_IN_BLOCKS);
    let mut offs_y = swizzle_y(plan.y_offset);
    let linear_pitch = plan.linear_pitch;

    let mut y = 0;
    while y < plan.height_in_blocks {
        let mut offs_x = offs_x0;
        let row_linear = y as usize * linear_pitch;

        let mut x = 0;
        while x < plan.width_in_bytes {
            // The 4 rows are contiguous 16 byte units in the tile column.
            let tiled = plan.format.cacheline_swizzle(offs_y + offs_x) as usize;
            let linear = row_linear + x as usize;
            kernel.chunk(tiled, linear);
            kernel.chunk(tiled + 16, linear + linear_pitch);
            kernel.chunk(tiled + 32, linear + linear_pitch * 2);
            kernel.chunk(tiled + 48, linear + linear_pitch * 3);

            offs_x = advance_interleaved(offs_x, x_mask);
            x += CHUNK_BYTES;
        }

        offs_y = advance_interleaved(offs_y, y_mask);
        if offs_y == 0 {
            offs_x0 += plan.incr_y;
        }
        y += ROWS_PER_STEP;
    }
}

/// Same walk as [`traverse_aligned`], one row and 4 bytes at a time.
///
/// # Safety
///
/// See [`super::traverse`].
#[inline]
unsafe fn traverse_scalar<K: TransferKernel>(plan: &TilePlan, kernel: &mut K) {
    let x_mask = swizzle_x(ELEMENT_BYTES.wrapping_neg());
    let y_mask = swizzle_y(!0);

    let mut offs_x0 =
        swizzle_x(plan.x_offset) + plan.incr_y * (plan.y_offset / TILE_HEIGHT_IN_BLOCKS);
    let mut offs_y = swizzle_y(plan.y_offset);

    for y in 0..plan.height_in_blocks {
        let mut offs_x = offs_x0;
        let row_linear = y as usize * plan.linear_pitch;

        let mut x = 0;
        while x < plan.width_in_bytes {
            let tiled = plan.format.cacheline_swizzle(offs_y + offs_x) as usize;
            kernel.element(tiled, row_linear + x as usize);

            offs_x = advance_interleaved(offs_x, x_mask);
            x += ELEMENT_BYTES;
        }

        offs_y = advance_interleaved(offs_y, y_mask);
        if offs_y == 0 {
            offs_x0 += plan.incr_y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{format::TileFormat, test_prelude::*};

    fn plan(width_in_bytes: u32, height_in_blocks: u32, x_offset: u32, y_offset: u32) -> TilePlan {
        TilePlan {
            x_offset,
            y_offset,
            pitch: 128,
            incr_y: swizzle_x(128),
            width_in_bytes,
            height_in_blocks,
            linear_pitch: width_in_bytes as usize,
            format: TileFormat::TileY,
        }
    }

    #[rstest]
    #[case(plan(128, 64, 0, 0))]
    #[case(plan(64, 8, 64, 28))]
    #[case(plan(16, 4, 16, 60))]
    fn aligned_path_matches_direct_addressing(#[case] plan: TilePlan) {
        let mut recorder = RecordingKernel::default();
        unsafe { traverse_aligned(&plan, &mut recorder) };

        assert_eq!(recorder.chunks as u32, plan.width_in_bytes / 16 * plan.height_in_blocks);
        for visit in &recorder.visits {
            let x = (visit.linear % plan.linear_pitch) as u32;
            let y = (visit.linear / plan.linear_pitch) as u32;
            assert_eq!(visit.tiled, plan.tiled_offset(x, y) as usize, "x={x} y={y}");
        }
    }

    #[rstest]
    #[case(plan(128, 64, 0, 0))]
    #[case(plan(8, 2, 4, 31))]
    #[case(plan(4, 1, 124, 95))]
    #[case(plan(12, 3, 20, 6))]
    fn scalar_path_matches_direct_addressing(#[case] plan: TilePlan) {
        let mut recorder = RecordingKernel::default();
        unsafe { traverse_scalar(&plan, &mut recorder) };

        assert_eq!(recorder.chunks, 0);
        assert_eq!(
            recorder.visits.len() as u32,
            plan.width_in_bytes / 4 * plan.height_in_blocks
        );
        for visit in &recorder.visits {
            let x = (visit.linear % plan.linear_pitch) as u32;
            let y = (visit.linear / plan.linear_pitch) as u32;
            assert_eq!(visit.tiled, plan.tiled_offset(x, y) as usize, "x={x} y={y}");
        }
    }

    #[test]
    fn misaligned_plan_selects_scalar_path() {
        let mut recorder = RecordingKernel::default();
        unsafe { traverse_intrinsics(&plan(64, 4, 0, 2), &mut recorder) };
        assert_eq!(recorder.chunks, 0);
        assert_eq!(recorder.visits.len(), 64);
    }
}

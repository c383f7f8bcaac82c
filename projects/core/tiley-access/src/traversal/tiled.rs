//! Tiled order: walk tiled memory sequentially, derive linear positions from it.
//!
//! This gives perfectly sequential writes, which is what write-combined memory likes best.
//! Addresses belonging to the tile rows/columns the mip touches but lying outside the mip
//! (other mips, padding) are skipped.

use super::{visit, TilePlan, TransferKernel};
use crate::address::{
    swizzle_x, unswizzle_x, CHUNK_BYTES, ELEMENT_BYTES, TILE_HEIGHT_IN_BLOCKS,
};

/// # Safety
///
/// See [`super::traverse`].
pub(crate) unsafe fn traverse_tiled<K: TransferKernel>(plan: &TilePlan, kernel: &mut K) {
    let chunks = plan.uses_chunks();
    let step = if chunks { CHUNK_BYTES } else { ELEMENT_BYTES };

    let x_begin = plan.x_offset;
    let x_end = plan.x_offset + plan.width_in_bytes;
    let y_begin = plan.y_offset;
    let y_end = plan.y_offset + plan.height_in_blocks;

    // Whole 16 byte columns, so every row of each column is covered.
    let column_begin = swizzle_x(x_begin & !(CHUNK_BYTES - 1));
    let column_end = swizzle_x((x_end + CHUNK_BYTES - 1) & !(CHUNK_BYTES - 1));

    let first_tile_row = y_begin / TILE_HEIGHT_IN_BLOCKS;
    let last_tile_row = (y_end - 1) / TILE_HEIGHT_IN_BLOCKS;

    for tile_row in first_tile_row..=last_tile_row {
        let row_base = tile_row * plan.incr_y;
        let row_x = tile_row * plan.pitch;
        let row_y = tile_row * TILE_HEIGHT_IN_BLOCKS;

        let mut physical = row_base + column_begin;
        let end = row_base + column_end;
        while physical < end {
            // The cacheline swizzle never touches the X bits, only Y needs undoing.
            let x = unswizzle_x(physical) - row_x;
            let y = row_y + plan.format.unswizzle_y(physical);

            if x >= x_begin && x < x_end && y >= y_begin && y < y_end {
                let linear = plan.linear_offset(x - x_begin, y - y_begin);
                visit(kernel, chunks, physical, linear);
            }

            physical += step;
        }
    }
}

//! The four orders in which a mip can be walked.
//!
//! A traversal only computes addresses. For every unit of memory it visits it hands a
//! `(tiled, linear)` pair of byte offsets to a [`TransferKernel`], which does the actual
//! loads and stores. All traversals visit exactly the same pairs; only the order differs.
//!
//! Units are either 16 byte chunks (one SIMD register, one 16 byte column row of a tile)
//! or 4 byte elements for mips too narrow or too misaligned for chunks.

mod intrinsics;
mod linear;
mod tiled;

use crate::{
    address::{tiled_address, CHUNK_BYTES},
    format::TileFormat,
    geometry::MipExtent,
    mapping::TileMapping,
    mode::TraversalMode,
};

/// Receives every unit visited by a traversal.
///
/// `tiled` is the byte offset from the start of the tiled mapping, after the cacheline
/// swizzle. `linear` is the byte offset into the row-major surface.
pub trait TransferKernel {
    /// Handles 16 bytes. `tiled` is always 16 byte aligned.
    ///
    /// # Safety
    ///
    /// Both offsets must be in bounds of the memory the kernel was created for.
    unsafe fn chunk(&mut self, tiled: usize, linear: usize);

    /// Handles 4 bytes. `tiled` is always 4 byte aligned.
    ///
    /// # Safety
    ///
    /// Both offsets must be in bounds of the memory the kernel was created for.
    unsafe fn element(&mut self, tiled: usize, linear: usize);
}

/// Everything a traversal needs to know about one mip of one mapping.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TilePlan {
    /// Offset of the mip within a tile row, in bytes.
    pub x_offset: u32,
    /// Offset of the mip, in block rows.
    pub y_offset: u32,
    /// Width of a tile row, in bytes.
    pub pitch: u32,
    /// `swizzle_x(pitch)`: the size of a full row of tiles.
    pub incr_y: u32,
    /// Width of a mip row, in bytes.
    pub width_in_bytes: u32,
    /// Height of the mip, in block rows.
    pub height_in_blocks: u32,
    /// Distance between rows of the linear surface, in bytes.
    pub linear_pitch: usize,
    /// Layout of the tiled memory.
    pub format: TileFormat,
}

impl TilePlan {
    /// Creates the plan for transferring `extent` through `mapping`.
    pub fn new(mapping: &TileMapping, extent: &MipExtent, linear_pitch: usize) -> Self {
        Self {
            x_offset: mapping.x_offset,
            y_offset: mapping.y_offset,
            pitch: mapping.pitch,
            incr_y: mapping.tile_row_stride(),
            width_in_bytes: extent.width_in_bytes,
            height_in_blocks: extent.height_in_blocks,
            linear_pitch,
            format: mapping.tile_format,
        }
    }

    /// Whether rows can be moved in whole 16 byte chunks.
    #[inline(always)]
    pub const fn uses_chunks(&self) -> bool {
        self.x_offset % CHUNK_BYTES == 0 && self.width_in_bytes % CHUNK_BYTES == 0
    }

    /// Whether [`TraversalMode::LinearIntrinsics`] can use its 4 row x 16 byte path.
    ///
    /// When this is false the 4 byte fallback is used, which only happens for the
    /// smallest mips or oddly placed ones.
    #[inline(always)]
    pub const fn intrinsics_fast_path_eligible(&self) -> bool {
        self.x_offset % CHUNK_BYTES == 0
            && self.y_offset % 4 == 0
            && self.width_in_bytes % CHUNK_BYTES == 0
            && self.height_in_blocks % 4 == 0
    }

    /// Physical tiled offset of the byte at (`x` bytes, `y` rows) within the mip.
    #[inline(always)]
    pub const fn tiled_offset(&self, x: u32, y: u32) -> u32 {
        self.format.cacheline_swizzle(tiled_address(
            self.x_offset + x,
            self.y_offset + y,
            self.incr_y,
        ))
    }

    /// Linear offset of the byte at (`x` bytes, `y` rows) within the mip.
    #[inline(always)]
    pub const fn linear_offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.linear_pitch + x as usize
    }
}

/// Walks every unit of the mip described by `plan` in the order selected by `mode`.
///
/// # Safety
///
/// The kernel must be able to handle every offset pair the plan produces; see
/// [`TransferKernel`].
#[inline]
pub unsafe fn traverse<K: TransferKernel>(mode: TraversalMode, plan: &TilePlan, kernel: &mut K) {
    match mode {
        TraversalMode::Tiled => tiled::traverse_tiled(plan, kernel),
        TraversalMode::LinearRows => linear::traverse_rows(plan, kernel),
        TraversalMode::LinearColumns => linear::traverse_columns(plan, kernel),
        TraversalMode::LinearIntrinsics => intrinsics::traverse_intrinsics(plan, kernel),
    }
}

#[inline(always)]
unsafe fn visit<K: TransferKernel>(kernel: &mut K, chunks: bool, tiled: u32, linear: usize) {
    if chunks {
        kernel.chunk(tiled as usize, linear);
    } else {
        kernel.element(tiled as usize, linear);
    }
}

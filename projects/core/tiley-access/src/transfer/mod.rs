//! Raw fill, copy and read of a single mip of tiled memory.
//!
//! These functions trust their inputs; the contract is only checked with debug assertions.
//! For validated slice based versions see [`crate::TiledSurfaceMut`].
//!
//! Writes into tiled memory always use non-temporal stores, and [`fill`] and [`copy`] end
//! with a store fence so the data is globally visible before the caller unmaps.

mod kernels;

use crate::{
    address::{CHUNK_BYTES, ELEMENT_BYTES},
    geometry::{MipExtent, TextureGeometry},
    mapping::{LinearSurface, LinearSurfaceMut, TileMapping},
    mode::TraversalMode,
    stream::fence,
    traversal::{traverse, TilePlan},
};
use kernels::{CopyKernel, FillKernel, ReadKernel};

/// Writes `value` over every 4 bytes of mip `mip` in tiled memory.
///
/// # Safety
///
/// - `mapping.base_address` must be valid for writes over the whole footprint of the mip
///   (see [`crate::TiledSurfaceMut::required_tiled_len`])
/// - `mapping.base_address` must be 16 byte aligned, `mapping.pitch` a multiple of 16
/// - `mapping.tile_format` must be [`TileY`] or [`TileYNoSwizzle`]
/// - `geometry` dimensions must be powers of two, `mip` rows a multiple of 4 bytes
///
/// [`TileY`]: crate::TileFormat::TileY
/// [`TileYNoSwizzle`]: crate::TileFormat::TileYNoSwizzle
pub unsafe fn fill(
    mode: TraversalMode,
    mapping: &TileMapping,
    geometry: &TextureGeometry,
    mip: u32,
    value: u32,
) {
    let extent = geometry.mip_extent(mip);
    debug_assert_contract(mapping, &extent);
    tracing::trace!(?mode, ?extent, value, "fill");

    let plan = TilePlan::new(mapping, &extent, extent.width_in_bytes as usize);
    let mut kernel = FillKernel::new(mapping.base_address, value);
    traverse(mode, &plan, &mut kernel);
    fence();
}

/// Copies mip `mip` from row-major `source` into tiled memory.
///
/// # Safety
///
/// Everything required by [`fill`], and:
///
/// - `source.ptr` must be valid for reads of
///   `(height - 1) * source.row_pitch + width_in_bytes` bytes
/// - `source` must not overlap the tiled memory
pub unsafe fn copy(
    mode: TraversalMode,
    mapping: &TileMapping,
    geometry: &TextureGeometry,
    mip: u32,
    source: &LinearSurface,
) {
    let extent = geometry.mip_extent(mip);
    debug_assert_contract(mapping, &extent);
    debug_assert!(source.row_pitch >= extent.width_in_bytes as usize);
    tracing::trace!(?mode, ?extent, row_pitch = source.row_pitch, "copy");

    let plan = TilePlan::new(mapping, &extent, source.row_pitch);
    let mut kernel = CopyKernel {
        tiled: mapping.base_address,
        linear: source.ptr,
    };
    traverse(mode, &plan, &mut kernel);
    fence();
}

/// Reads mip `mip` from tiled memory into row-major `destination`.
///
/// Only [`TraversalMode::Tiled`], [`TraversalMode::LinearRows`] and
/// [`TraversalMode::LinearColumns`] are available; see [`TraversalMode::supports_read`].
///
/// # Safety
///
/// - `mapping.base_address` must be valid for reads over the whole footprint of the mip
/// - the alignment, format and geometry requirements of [`fill`]
/// - `destination.ptr` must be valid for writes of
///   `(height - 1) * destination.row_pitch + width_in_bytes` bytes
/// - `destination` must not overlap the tiled memory
///
/// # Panics
///
/// If `mode` is [`TraversalMode::LinearIntrinsics`].
pub unsafe fn read(
    mode: TraversalMode,
    mapping: &TileMapping,
    geometry: &TextureGeometry,
    mip: u32,
    destination: &LinearSurfaceMut,
) {
    assert!(
        mode.supports_read(),
        "reading tiled memory is not supported with {mode:?} traversal"
    );

    let extent = geometry.mip_extent(mip);
    debug_assert_contract(mapping, &extent);
    debug_assert!(destination.row_pitch >= extent.width_in_bytes as usize);
    tracing::trace!(?mode, ?extent, row_pitch = destination.row_pitch, "read");

    let plan = TilePlan::new(mapping, &extent, destination.row_pitch);
    let mut kernel = ReadKernel {
        tiled: mapping.base_address,
        linear: destination.ptr,
    };
    traverse(mode, &plan, &mut kernel);
}

#[inline(always)]
fn debug_assert_contract(mapping: &TileMapping, extent: &MipExtent) {
    debug_assert!(
        mapping.tile_format.is_supported(),
        "unsupported tile format {:?}",
        mapping.tile_format
    );
    debug_assert!((mapping.base_address as usize).is_multiple_of(CHUNK_BYTES as usize));
    debug_assert!(mapping.pitch.is_multiple_of(CHUNK_BYTES));
    debug_assert!(mapping.x_offset.is_multiple_of(ELEMENT_BYTES));
    debug_assert!(extent.width_in_bytes.is_multiple_of(ELEMENT_BYTES));
    debug_assert!(mapping.x_offset as u64 + extent.width_in_bytes as u64 <= mapping.pitch as u64);
}

//! Descriptors for the two sides of a transfer.

use crate::format::TileFormat;

/// A mapped view of tiled GPU memory, as handed out by the driver.
///
/// The field layout matches the driver's map data. The driver's format tag is a plain
/// `u32`; convert it with [`TileFormat::try_from`] rather than reinterpreting it.
///
/// The pointer is owned by the caller: it must stay valid, and be exclusively accessible
/// by the CPU, for the whole duration of a transfer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TileMapping {
    /// Start of the mapped tiled memory.
    pub base_address: *mut u8,
    /// Offset of the mip within a tile row, in bytes.
    pub x_offset: u32,
    /// Offset of the mip, in block rows.
    pub y_offset: u32,
    /// Layout of the memory.
    pub tile_format: TileFormat,
    /// Width of a tile row of the surface, in bytes.
    pub pitch: u32,
    /// Size of the mapping, in bytes.
    pub size: u32,
}

impl TileMapping {
    /// Size of a full row of tiles, in the interleaved address space.
    #[inline(always)]
    pub const fn tile_row_stride(&self) -> u32 {
        crate::address::swizzle_x(self.pitch)
    }
}

/// Row-major memory read by [`crate::transfer::copy`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LinearSurface {
    /// Start of the first row.
    pub ptr: *const u8,
    /// Distance between rows, in bytes.
    pub row_pitch: usize,
}

/// Row-major memory written by [`crate::transfer::read`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LinearSurfaceMut {
    /// Start of the first row.
    pub ptr: *mut u8,
    /// Distance between rows, in bytes.
    pub row_pitch: usize,
}

//! Errors reported by the safe transfer wrappers.
//!
//! The raw engine in [`crate::transfer`] never returns errors; it trusts its caller and only
//! asserts its contract in debug builds. These errors are produced by
//! [`crate::TiledSurfaceMut`] while validating that contract up front.

use crate::{format::TileFormat, mode::TraversalMode};
use thiserror::Error;

/// Validation errors for tiled transfers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The mapping uses a tile layout the engine cannot address.
    #[error("Unsupported tile format: {0:?} (only TileY and TileYNoSwizzle are supported)")]
    UnsupportedTileFormat(TileFormat),

    /// A driver supplied tile format tag is not a known value.
    #[error("Invalid tile format value: {0}")]
    InvalidTileFormat(u32),

    /// A traversal mode constant is not a known value.
    #[error("Invalid traversal mode value: {0}")]
    InvalidTraversalMode(u32),

    /// Texture dimensions must be powers of two.
    #[error("Texture dimensions must be powers of two: {width}x{height} blocks")]
    NonPowerOfTwo {
        /// Width of the texture in blocks.
        width: u32,
        /// Height of the texture in blocks.
        height: u32,
    },

    /// The texture has no blocks or no mips.
    #[error("Texture geometry is empty")]
    EmptyGeometry,

    /// Block sizes must be a whole number of 4 byte elements.
    #[error("Unsupported block size: {0} bytes (must be a non-zero multiple of 4)")]
    UnsupportedBlockSize(u32),

    /// A row of mip 0 does not fit in 32 bits of address space.
    #[error("Texture row too wide: {width} blocks of {bytes_per_block} bytes")]
    RowTooWide {
        /// Width of mip 0, in blocks.
        width: u32,
        /// Size of a single block, in bytes.
        bytes_per_block: u32,
    },

    /// The requested mip does not exist.
    #[error("Mip {mip} out of range (texture has {mip_count} mips)")]
    MipOutOfRange {
        /// The requested mip.
        mip: u32,
        /// Number of mips in the texture.
        mip_count: u32,
    },

    /// Tiled memory must start on a 16 byte boundary.
    #[error("Tiled base address {0:#x} is not 16 byte aligned")]
    MisalignedBase(usize),

    /// The tile row pitch must be a whole number of 16 byte columns.
    #[error("Tile pitch {0} is not a multiple of 16")]
    MisalignedPitch(u32),

    /// The X offset must be a whole number of 4 byte elements.
    #[error("X offset {0} is not a multiple of 4")]
    MisalignedOffset(u32),

    /// The mip rows do not fit inside the tile pitch.
    #[error("Mip row ends at byte {row_end}, past the tile pitch of {pitch}")]
    RowExceedsPitch {
        /// End of the mip row within the tile row, in bytes.
        row_end: u64,
        /// The tile row pitch.
        pitch: u32,
    },

    /// The linear row pitch is smaller than a row of the mip.
    #[error("Linear row pitch too small: needed {needed}, got {actual}")]
    RowPitchTooSmall {
        /// The number of bytes in one mip row.
        needed: usize,
        /// The row pitch provided.
        actual: usize,
    },

    /// The tiled memory is too small for the mip.
    #[error("Tiled buffer too small: needed {needed}, got {actual}")]
    TiledBufferTooSmall {
        /// The required buffer size.
        needed: usize,
        /// The actual buffer size provided.
        actual: usize,
    },

    /// The tile rows touched by the mip span more than the 32 bit tiled address space.
    #[error("Tiled footprint of {needed} bytes exceeds the 4 GiB tiled address space")]
    TiledSurfaceTooLarge {
        /// Bytes of tiled memory the mip would touch.
        needed: u64,
    },

    /// The linear buffer is too small for the mip.
    #[error("Linear buffer too small: needed {needed}, got {actual}")]
    LinearBufferTooSmall {
        /// The required buffer size.
        needed: usize,
        /// The actual buffer size provided.
        actual: usize,
    },

    /// Reading back is not provided for this traversal mode.
    #[error("Reading tiled memory is not supported with {0:?} traversal")]
    ReadModeUnsupported(TraversalMode),
}

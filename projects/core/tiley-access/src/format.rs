use crate::{
    address::{swizzle_address, unswizzle_y, unswizzle_y_no_csx},
    error::TransferError,
};

/// Tile layout of a mapped resource, as reported by the driver.
///
/// Only [`TileFormat::TileY`] and [`TileFormat::TileYNoSwizzle`] can be transferred;
/// the remaining tags exist so driver values round trip.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, derive_enum_all_values::AllValues)]
pub enum TileFormat {
    /// X-major tiling.
    TileX = 0,
    /// Y-major tiling with the cacheline swizzle.
    TileY = 1,
    /// Reserved by the driver.
    Reserved = 2,
    /// Untiled memory.
    Linear = 3,
    /// X-major tiling without the cacheline swizzle.
    TileXNoSwizzle = 4,
    /// Y-major tiling without the cacheline swizzle.
    TileYNoSwizzle = 5,
}

impl TileFormat {
    /// Whether the engine knows how to address this layout.
    #[inline]
    pub const fn is_supported(self) -> bool {
        matches!(self, TileFormat::TileY | TileFormat::TileYNoSwizzle)
    }

    /// Whether the cacheline swizzle (bit 6 ^= bit 9) is applied on the addressing path.
    #[inline]
    pub const fn has_cacheline_swizzle(self) -> bool {
        matches!(self, TileFormat::TileY)
    }

    /// Maps a composed tiled address to its physical location.
    ///
    /// Identity for formats without the cacheline swizzle.
    #[inline(always)]
    pub const fn cacheline_swizzle(self, tiled_addr: u32) -> u32 {
        if self.has_cacheline_swizzle() {
            swizzle_address(tiled_addr)
        } else {
            tiled_addr
        }
    }

    /// Extracts the in-tile row from a physical address of this format.
    #[inline(always)]
    pub const fn unswizzle_y(self, physical_addr: u32) -> u32 {
        if self.has_cacheline_swizzle() {
            unswizzle_y(physical_addr)
        } else {
            unswizzle_y_no_csx(physical_addr)
        }
    }
}

impl TryFrom<u32> for TileFormat {
    type Error = TransferError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TileFormat::TileX),
            1 => Ok(TileFormat::TileY),
            2 => Ok(TileFormat::Reserved),
            3 => Ok(TileFormat::Linear),
            4 => Ok(TileFormat::TileXNoSwizzle),
            5 => Ok(TileFormat::TileYNoSwizzle),
            _ => Err(TransferError::InvalidTileFormat(value)),
        }
    }
}

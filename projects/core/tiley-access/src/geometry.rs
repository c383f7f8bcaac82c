//! Texture and mip dimensions, measured in compressed blocks.

use crate::error::TransferError;

/// Dimensions of a block compressed texture.
///
/// Width and height are in blocks (e.g. a 256x256 texel DXT1 texture is 64x64 blocks of
/// 8 bytes) and must both be powers of two.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureGeometry {
    /// Height of mip 0, in blocks.
    pub height_in_blocks: u32,
    /// Width of mip 0, in blocks.
    pub width_in_blocks: u32,
    /// Number of mips in the chain.
    pub mip_count: u32,
    /// Size of a single block, in bytes.
    pub bytes_per_block: u32,
}

/// Dimensions of a single mip level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MipExtent {
    /// Width of the mip, in blocks.
    pub width_in_blocks: u32,
    /// Height of the mip, in blocks.
    pub height_in_blocks: u32,
    /// Width of a mip row, in bytes.
    pub width_in_bytes: u32,
}

impl MipExtent {
    /// Number of bytes in the mip when tightly packed.
    #[inline]
    pub const fn len_bytes(&self) -> usize {
        self.width_in_bytes as usize * self.height_in_blocks as usize
    }
}

impl TextureGeometry {
    /// Creates a single mip texture.
    pub const fn new(width_in_blocks: u32, height_in_blocks: u32, bytes_per_block: u32) -> Self {
        Self {
            height_in_blocks,
            width_in_blocks,
            mip_count: 1,
            bytes_per_block,
        }
    }

    /// Sets the number of mips.
    pub const fn with_mip_count(mut self, mip_count: u32) -> Self {
        self.mip_count = mip_count;
        self
    }

    /// Computes the extent of the given mip.
    ///
    /// This is incorrect for non power of two textures (12 texels are 3 DXT blocks, 6 texels
    /// are 2); such textures are not supported.
    #[inline]
    pub fn mip_extent(&self, mip: u32) -> MipExtent {
        debug_assert!(
            self.width_in_blocks.is_power_of_two() && self.height_in_blocks.is_power_of_two(),
            "texture dimensions must be powers of two: {}x{}",
            self.width_in_blocks,
            self.height_in_blocks
        );

        let width_in_blocks = shift_mip(self.width_in_blocks, mip);
        let height_in_blocks = shift_mip(self.height_in_blocks, mip);
        MipExtent {
            width_in_blocks,
            height_in_blocks,
            width_in_bytes: width_in_blocks * self.bytes_per_block,
        }
    }

    /// Number of bytes needed to hold the whole mip chain in linear layout.
    pub fn allocate_bytes(&self) -> usize {
        (0..self.mip_count)
            .map(|mip| self.mip_extent(mip).len_bytes())
            .sum()
    }

    /// Checks the geometry against everything the engine relies on.
    pub fn validate(&self) -> Result<(), TransferError> {
        if self.width_in_blocks == 0 || self.height_in_blocks == 0 || self.mip_count == 0 {
            return Err(TransferError::EmptyGeometry);
        }

        if !self.width_in_blocks.is_power_of_two() || !self.height_in_blocks.is_power_of_two() {
            return Err(TransferError::NonPowerOfTwo {
                width: self.width_in_blocks,
                height: self.height_in_blocks,
            });
        }

        if self.bytes_per_block == 0 || self.bytes_per_block % 4 != 0 {
            return Err(TransferError::UnsupportedBlockSize(self.bytes_per_block));
        }

        if self
            .width_in_blocks
            .checked_mul(self.bytes_per_block)
            .is_none()
        {
            return Err(TransferError::RowTooWide {
                width: self.width_in_blocks,
                bytes_per_block: self.bytes_per_block,
            });
        }

        Ok(())
    }
}

/// Computes [`TextureGeometry::mip_extent`] for `geometry`.
#[inline]
pub fn compute_mip_extent(geometry: &TextureGeometry, mip: u32) -> MipExtent {
    geometry.mip_extent(mip)
}

#[inline(always)]
fn shift_mip(dimension: u32, mip: u32) -> u32 {
    dimension.checked_shr(mip).unwrap_or(0).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 64, 32, 256)]
    #[case(1, 32, 16, 128)]
    #[case(5, 2, 1, 8)]
    #[case(6, 1, 1, 4)]
    #[case(12, 1, 1, 4)]
    #[case(40, 1, 1, 4)]
    fn mip_extent_halves_and_clamps(
        #[case] mip: u32,
        #[case] width: u32,
        #[case] height: u32,
        #[case] width_in_bytes: u32,
    ) {
        let geometry = TextureGeometry::new(64, 32, 4);
        assert_eq!(
            compute_mip_extent(&geometry, mip),
            MipExtent {
                width_in_blocks: width,
                height_in_blocks: height,
                width_in_bytes,
            }
        );
    }

    #[test]
    fn allocate_bytes_sums_mip_chain() {
        // 4x4 blocks of 8 bytes: 128 + 32 + 8
        let geometry = TextureGeometry::new(4, 4, 8).with_mip_count(3);
        assert_eq!(geometry.allocate_bytes(), 168);
    }

    #[rstest]
    #[case(TextureGeometry::new(64, 64, 8), Ok(()))]
    #[case(TextureGeometry::new(0, 64, 8), Err(TransferError::EmptyGeometry))]
    #[case(TextureGeometry::new(64, 64, 8).with_mip_count(0), Err(TransferError::EmptyGeometry))]
    #[case(TextureGeometry::new(48, 64, 8), Err(TransferError::NonPowerOfTwo { width: 48, height: 64 }))]
    #[case(TextureGeometry::new(64, 64, 2), Err(TransferError::UnsupportedBlockSize(2)))]
    #[case(TextureGeometry::new(1 << 30, 1, 4), Err(TransferError::RowTooWide { width: 1 << 30, bytes_per_block: 4 }))]
    #[case(TextureGeometry::new(1 << 29, 1, 8), Err(TransferError::RowTooWide { width: 1 << 29, bytes_per_block: 8 }))]
    #[case(TextureGeometry::new(1 << 28, 1, 8), Ok(()))]
    fn validate_geometry(
        #[case] geometry: TextureGeometry,
        #[case] expected: Result<(), TransferError>,
    ) {
        assert_eq!(geometry.validate(), expected);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "powers of two")]
    fn non_power_of_two_is_a_contract_violation() {
        TextureGeometry::new(12, 16, 8).mip_extent(0);
    }
}

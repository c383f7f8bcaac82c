//! Slice based transfers that validate the whole contract before touching memory.

use crate::{
    address::{CHUNK_BYTES, ELEMENT_BYTES, TILE_HEIGHT_IN_BLOCKS},
    error::TransferError,
    format::TileFormat,
    geometry::{MipExtent, TextureGeometry},
    mapping::{LinearSurface, LinearSurfaceMut, TileMapping},
    mode::TraversalMode,
    transfer,
};

/// Tiled memory borrowed as a mutable slice.
///
/// The slice stands in for the driver mapping: its start is the mapping's base address.
#[derive(Debug)]
pub struct TiledSurfaceMut<'a> {
    memory: &'a mut [u8],
    x_offset: u32,
    y_offset: u32,
    pitch: u32,
    tile_format: TileFormat,
}

impl<'a> TiledSurfaceMut<'a> {
    /// Wraps `memory` laid out as `tile_format` with tile rows `pitch` bytes wide.
    ///
    /// # Errors
    ///
    /// - [`TransferError::UnsupportedTileFormat`] unless the format is TileY or TileYNoSwizzle
    /// - [`TransferError::MisalignedBase`] if `memory` does not start on a 16 byte boundary
    /// - [`TransferError::MisalignedPitch`] if `pitch` is not a multiple of 16
    pub fn new(
        memory: &'a mut [u8],
        tile_format: TileFormat,
        pitch: u32,
    ) -> Result<Self, TransferError> {
        if !tile_format.is_supported() {
            return Err(TransferError::UnsupportedTileFormat(tile_format));
        }

        let base = memory.as_ptr() as usize;
        if !base.is_multiple_of(CHUNK_BYTES as usize) {
            return Err(TransferError::MisalignedBase(base));
        }

        if pitch == 0 || !pitch.is_multiple_of(CHUNK_BYTES) {
            return Err(TransferError::MisalignedPitch(pitch));
        }

        Ok(Self {
            memory,
            x_offset: 0,
            y_offset: 0,
            pitch,
            tile_format,
        })
    }

    /// Places the mip at `x_offset` bytes and `y_offset` block rows into the surface.
    ///
    /// # Errors
    ///
    /// [`TransferError::MisalignedOffset`] if `x_offset` is not a multiple of 4.
    pub fn with_offsets(mut self, x_offset: u32, y_offset: u32) -> Result<Self, TransferError> {
        if !x_offset.is_multiple_of(ELEMENT_BYTES) {
            return Err(TransferError::MisalignedOffset(x_offset));
        }

        self.x_offset = x_offset;
        self.y_offset = y_offset;
        Ok(self)
    }

    /// The tiled memory.
    pub fn as_slice(&self) -> &[u8] {
        self.memory
    }

    /// Layout of the tiled memory.
    pub fn tile_format(&self) -> TileFormat {
        self.tile_format
    }

    /// Number of bytes of tiled memory touched by a mip of `extent` at this surface's
    /// offsets: every tile row the mip overlaps, in full.
    pub fn required_tiled_len(&self, extent: &MipExtent) -> usize {
        required_tiled_len(extent, self.pitch, self.y_offset)
    }

    /// Safe version of [`transfer::fill`].
    ///
    /// # Errors
    ///
    /// See [`TiledSurfaceMut::validate`].
    pub fn fill(
        &mut self,
        mode: TraversalMode,
        geometry: &TextureGeometry,
        mip: u32,
        value: u32,
    ) -> Result<(), TransferError> {
        self.validate(geometry, mip)?;

        // SAFETY: validate checked the mapping covers the whole footprint of the mip.
        unsafe { transfer::fill(mode, &self.mapping(), geometry, mip, value) };
        Ok(())
    }

    /// Safe version of [`transfer::copy`].
    ///
    /// # Errors
    ///
    /// See [`TiledSurfaceMut::validate`], and [`TransferError::RowPitchTooSmall`] or
    /// [`TransferError::LinearBufferTooSmall`] if `source` cannot hold the mip.
    pub fn copy_from(
        &mut self,
        mode: TraversalMode,
        geometry: &TextureGeometry,
        mip: u32,
        source: &[u8],
        row_pitch: usize,
    ) -> Result<(), TransferError> {
        let extent = self.validate(geometry, mip)?;
        validate_linear(&extent, source.len(), row_pitch)?;

        let source = LinearSurface {
            ptr: source.as_ptr(),
            row_pitch,
        };

        // SAFETY: both sides validated above, and the borrows guarantee no overlap.
        unsafe { transfer::copy(mode, &self.mapping(), geometry, mip, &source) };
        Ok(())
    }

    /// Safe version of [`transfer::read`].
    ///
    /// # Errors
    ///
    /// [`TransferError::ReadModeUnsupported`] for [`TraversalMode::LinearIntrinsics`], and
    /// everything [`TiledSurfaceMut::copy_from`] reports.
    pub fn read_into(
        &mut self,
        mode: TraversalMode,
        geometry: &TextureGeometry,
        mip: u32,
        destination: &mut [u8],
        row_pitch: usize,
    ) -> Result<(), TransferError> {
        if !mode.supports_read() {
            return Err(TransferError::ReadModeUnsupported(mode));
        }

        let extent = self.validate(geometry, mip)?;
        validate_linear(&extent, destination.len(), row_pitch)?;

        let destination = LinearSurfaceMut {
            ptr: destination.as_mut_ptr(),
            row_pitch,
        };

        // SAFETY: both sides validated above, and the borrows guarantee no overlap.
        unsafe { transfer::read(mode, &self.mapping(), geometry, mip, &destination) };
        Ok(())
    }

    /// Checks `geometry` and mip `mip` can be transferred through this surface, returning
    /// the extent of the mip.
    ///
    /// # Errors
    ///
    /// - Any error from [`TextureGeometry::validate`]
    /// - [`TransferError::MipOutOfRange`] if `mip >= geometry.mip_count`
    /// - [`TransferError::RowExceedsPitch`] if the mip rows run past the tile pitch
    /// - [`TransferError::TiledSurfaceTooLarge`] if the touched tile rows do not fit in
    ///   32 bit tiled addresses
    /// - [`TransferError::TiledBufferTooSmall`] if the memory is shorter than
    ///   [`TiledSurfaceMut::required_tiled_len`]
    pub fn validate(&self, geometry: &TextureGeometry, mip: u32) -> Result<MipExtent, TransferError> {
        geometry.validate()?;
        if mip >= geometry.mip_count {
            return Err(TransferError::MipOutOfRange {
                mip,
                mip_count: geometry.mip_count,
            });
        }

        let extent = geometry.mip_extent(mip);
        let row_end = self.x_offset as u64 + extent.width_in_bytes as u64;
        if row_end > self.pitch as u64 {
            return Err(TransferError::RowExceedsPitch {
                row_end,
                pitch: self.pitch,
            });
        }

        let footprint = tiled_footprint(&extent, self.pitch, self.y_offset);
        if footprint > TILED_ADDRESS_SPACE {
            return Err(TransferError::TiledSurfaceTooLarge { needed: footprint });
        }

        let needed = usize::try_from(footprint)
            .map_err(|_| TransferError::TiledSurfaceTooLarge { needed: footprint })?;
        if self.memory.len() < needed {
            return Err(TransferError::TiledBufferTooSmall {
                needed,
                actual: self.memory.len(),
            });
        }

        Ok(extent)
    }

    fn mapping(&mut self) -> TileMapping {
        TileMapping {
            base_address: self.memory.as_mut_ptr(),
            x_offset: self.x_offset,
            y_offset: self.y_offset,
            tile_format: self.tile_format,
            pitch: self.pitch,
            size: u32::try_from(self.memory.len()).unwrap_or(u32::MAX),
        }
    }
}

/// Number of bytes of tiled memory, with tile rows `pitch` bytes wide, touched by a mip of
/// `extent` starting at block row `y_offset`.
pub fn required_tiled_len(extent: &MipExtent, pitch: u32, y_offset: u32) -> usize {
    usize::try_from(tiled_footprint(extent, pitch, y_offset)).unwrap_or(usize::MAX)
}

/// Tiled addresses are 32 bit.
const TILED_ADDRESS_SPACE: u64 = 1 << 32;

fn tiled_footprint(extent: &MipExtent, pitch: u32, y_offset: u32) -> u64 {
    let last_row = y_offset as u64 + extent.height_in_blocks as u64 - 1;
    let tile_rows = last_row / TILE_HEIGHT_IN_BLOCKS as u64 + 1;
    tile_rows * pitch as u64 * TILE_HEIGHT_IN_BLOCKS as u64
}

/// Number of bytes of row-major memory holding a mip of `extent` with rows `row_pitch`
/// bytes apart. The last row does not need padding.
pub fn required_linear_len(extent: &MipExtent, row_pitch: usize) -> usize {
    (extent.height_in_blocks as usize - 1) * row_pitch + extent.width_in_bytes as usize
}

fn validate_linear(extent: &MipExtent, len: usize, row_pitch: usize) -> Result<(), TransferError> {
    let row_bytes = extent.width_in_bytes as usize;
    if row_pitch < row_bytes {
        return Err(TransferError::RowPitchTooSmall {
            needed: row_bytes,
            actual: row_pitch,
        });
    }

    let needed = required_linear_len(extent, row_pitch);
    if len < needed {
        return Err(TransferError::LinearBufferTooSmall {
            needed,
            actual: len,
        });
    }

    Ok(())
}

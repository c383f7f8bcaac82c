pub(crate) mod bench;
pub(crate) mod verify;

use crate::{error::CliError, util::allocate_zeroed_align_64};
use safe_allocator_api::RawAlloc;
use tiley_access::{
    required_linear_len, required_tiled_len, MipExtent, TextureGeometry, TileFormat,
    TiledSurfaceMut, TraversalMode,
};

/// Texture and placement shared by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SurfaceLayout {
    pub geometry: TextureGeometry,
    pub mip: u32,
    pub pitch: u32,
    pub x_offset: u32,
    pub y_offset: u32,
    pub format: TileFormat,
}

impl SurfaceLayout {
    /// `pitch` of `None` uses the width of mip 0, rounded up to whole 16 byte columns.
    pub fn new(
        width: u32,
        height: u32,
        bytes_per_block: u32,
        mip: u32,
        pitch: Option<u32>,
        format: TileFormat,
    ) -> Self {
        let geometry = TextureGeometry::new(width, height, bytes_per_block)
            .with_mip_count(mip.saturating_add(1));
        let pitch = pitch.unwrap_or_else(|| {
            width
                .checked_mul(bytes_per_block)
                .and_then(|row| row.checked_next_multiple_of(16))
                .unwrap_or(u32::MAX)
        });
        Self {
            geometry,
            mip,
            pitch,
            x_offset: 0,
            y_offset: 0,
            format,
        }
    }

    pub fn with_offsets(mut self, x_offset: u32, y_offset: u32) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    pub fn extent(&self) -> MipExtent {
        self.geometry.mip_extent(self.mip)
    }

    /// Tightly packed rows.
    pub fn row_pitch(&self) -> usize {
        self.extent().width_in_bytes as usize
    }

    pub fn linear_len(&self) -> usize {
        required_linear_len(&self.extent(), self.row_pitch())
    }

    /// Allocates tiled memory for the mip, and checks it can be transferred.
    pub fn allocate_tiled(&self) -> Result<RawAlloc, CliError> {
        self.geometry.validate()?;
        let memory = allocate_zeroed_align_64(required_tiled_len(
            &self.extent(),
            self.pitch,
            self.y_offset,
        ))?;
        Ok(memory)
    }

    pub fn surface<'a>(&self, memory: &'a mut [u8]) -> Result<TiledSurfaceMut<'a>, CliError> {
        let surface = TiledSurfaceMut::new(memory, self.format, self.pitch)?
            .with_offsets(self.x_offset, self.y_offset)?;
        surface.validate(&self.geometry, self.mip)?;
        Ok(surface)
    }
}

pub(crate) fn parse_mode(value: &str) -> Result<TraversalMode, String> {
    TraversalMode::all_values()
        .iter()
        .copied()
        .find(|mode| mode.name().eq_ignore_ascii_case(value))
        .ok_or_else(|| {
            format!(
                "Invalid mode: {value}. Valid modes are: tiled, linear-rows, linear-columns, linear-intrinsics"
            )
        })
}

pub(crate) fn parse_format(value: &str) -> Result<TileFormat, String> {
    match value.to_lowercase().as_str() {
        "tiley" | "tile-y" => Ok(TileFormat::TileY),
        "tiley-no-swizzle" | "tile-y-no-swizzle" => Ok(TileFormat::TileYNoSwizzle),
        _ => Err(format!(
            "Invalid tile format: {value}. Valid formats are: tiley, tiley-no-swizzle"
        )),
    }
}

/// `mode`, or every mode when `None`.
pub(crate) fn selected_modes(mode: Option<TraversalMode>) -> Vec<TraversalMode> {
    match mode {
        Some(mode) => vec![mode],
        None => TraversalMode::all_values().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tiley_access::TransferError;

    #[rstest]
    #[case("tiled", TraversalMode::Tiled)]
    #[case("linear-rows", TraversalMode::LinearRows)]
    #[case("Linear-Columns", TraversalMode::LinearColumns)]
    #[case("linear-intrinsics", TraversalMode::LinearIntrinsics)]
    fn parses_modes(#[case] value: &str, #[case] expected: TraversalMode) {
        assert_eq!(parse_mode(value), Ok(expected));
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(parse_mode("diagonal").is_err());
        assert!(parse_format("tilex").is_err());
        assert_eq!(parse_format("TileY"), Ok(TileFormat::TileY));
    }

    #[test]
    fn default_pitch_is_row_width() {
        let layout = SurfaceLayout::new(64, 32, 8, 2, None, TileFormat::TileY);
        assert_eq!(layout.pitch, 512);
        assert_eq!(layout.geometry.mip_count, 3);
        assert_eq!(layout.row_pitch(), 128);
        assert_eq!(layout.linear_len(), 128 * 8);

        let narrow = SurfaceLayout::new(1, 1, 4, 0, None, TileFormat::TileY);
        assert_eq!(narrow.pitch, 16);
    }

    #[test]
    fn oversized_row_is_reported() {
        let layout = SurfaceLayout::new(1 << 30, 1, 4, 0, None, TileFormat::TileY);
        assert!(matches!(
            layout.allocate_tiled(),
            Err(CliError::Transfer(TransferError::RowTooWide { .. }))
        ));
    }

    #[test]
    fn allocated_surface_fits_mip() {
        let layout =
            SurfaceLayout::new(16, 16, 4, 0, Some(128), TileFormat::TileY).with_offsets(64, 24);
        let mut memory = layout.allocate_tiled().unwrap();
        assert_eq!(memory.len(), 128 * 64);
        assert!(layout.surface(memory.as_mut_slice()).is_ok());
    }
}

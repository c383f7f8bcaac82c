use super::{parse_format, SurfaceLayout};
use crate::{
    error::CliError,
    util::{allocate_zeroed_align_64, fill_test_pattern},
};
use argh::FromArgs;
use tiley_access::{TileFormat, TraversalMode};

#[derive(FromArgs, Debug)]
/// Check every traversal mode agrees on the tiled layout
#[argh(subcommand, name = "verify")]
pub struct VerifyCmd {
    /// width of mip 0, in blocks (default: 256)
    #[argh(option, default = "256")]
    pub width: u32,

    /// height of mip 0, in blocks (default: 256)
    #[argh(option, default = "256")]
    pub height: u32,

    /// bytes per block (default: 8, DXT1)
    #[argh(option, default = "8")]
    pub bytes_per_block: u32,

    /// number of mips to check, starting at mip 0 (default: all down to 1x1)
    #[argh(option)]
    pub mips: Option<u32>,

    /// tile row pitch in bytes (default: mip 0 row width)
    #[argh(option)]
    pub pitch: Option<u32>,

    /// offset of the mip within a tile row, in bytes (default: 0)
    #[argh(option, default = "0")]
    pub x_offset: u32,

    /// offset of the mip, in block rows (default: 0)
    #[argh(option, default = "0")]
    pub y_offset: u32,

    /// tile format: tiley, tiley-no-swizzle (default: both)
    #[argh(option, from_str_fn(parse_format))]
    pub format: Option<TileFormat>,
}

pub(crate) fn handle_verify_command(cmd: VerifyCmd) -> Result<(), CliError> {
    let mips = cmd
        .mips
        .unwrap_or_else(|| full_mip_count(cmd.width, cmd.height));
    let formats = match cmd.format {
        Some(format) => vec![format],
        None => vec![TileFormat::TileY, TileFormat::TileYNoSwizzle],
    };

    for format in formats {
        for mip in 0..mips {
            let layout = SurfaceLayout::new(
                cmd.width,
                cmd.height,
                cmd.bytes_per_block,
                mip,
                cmd.pitch,
                format,
            )
            .with_offsets(cmd.x_offset, cmd.y_offset);
            layout.geometry.validate()?;

            verify_copy_read(&layout)?;
            verify_fill(&layout)?;

            let extent = layout.extent();
            println!(
                "✓ {format:?} mip {mip} ({}x{} blocks)",
                extent.width_in_blocks, extent.height_in_blocks
            );
        }
    }

    println!("All traversal modes agree.");
    Ok(())
}

/// Copies a pattern with every mode and reads it back with every read-capable mode.
pub(crate) fn verify_copy_read(layout: &SurfaceLayout) -> Result<(), CliError> {
    let row_pitch = layout.row_pitch();
    let mut source = allocate_zeroed_align_64(layout.linear_len())?;
    fill_test_pattern(source.as_mut_slice());
    let mut output = allocate_zeroed_align_64(layout.linear_len())?;

    for copy in TraversalMode::all_values().iter().copied() {
        let mut tiled = layout.allocate_tiled()?;
        let mut surface = layout.surface(tiled.as_mut_slice())?;
        surface.copy_from(copy, &layout.geometry, layout.mip, source.as_slice(), row_pitch)?;

        for read in TraversalMode::all_values()
            .iter()
            .copied()
            .filter(|mode| mode.supports_read())
        {
            output.as_mut_slice().fill(0);
            surface.read_into(
                read,
                &layout.geometry,
                layout.mip,
                output.as_mut_slice(),
                row_pitch,
            )?;

            if let Some(offset) = first_difference(source.as_slice(), output.as_slice()) {
                return Err(CliError::CopyMismatch {
                    format: surface.tile_format(),
                    copy,
                    read,
                    offset,
                });
            }
            tracing::debug!(?copy, ?read, mip = layout.mip, "copy/read matched");
        }
    }

    Ok(())
}

/// Fills with every mode and compares the tiled bytes against a LinearRows fill.
pub(crate) fn verify_fill(layout: &SurfaceLayout) -> Result<(), CliError> {
    const VALUE: u32 = 0xAABB_CCDD;
    let reference_mode = TraversalMode::LinearRows;

    let mut reference = layout.allocate_tiled()?;
    layout
        .surface(reference.as_mut_slice())?
        .fill(reference_mode, &layout.geometry, layout.mip, VALUE)?;

    for mode in TraversalMode::all_values().iter().copied() {
        let mut tiled = layout.allocate_tiled()?;
        layout
            .surface(tiled.as_mut_slice())?
            .fill(mode, &layout.geometry, layout.mip, VALUE)?;

        if let Some(offset) = first_difference(reference.as_slice(), tiled.as_slice()) {
            return Err(CliError::FillMismatch {
                format: layout.format,
                mode,
                reference: reference_mode,
                offset,
            });
        }
    }

    Ok(())
}

fn first_difference(expected: &[u8], actual: &[u8]) -> Option<usize> {
    expected
        .iter()
        .zip(actual)
        .position(|(expected, actual)| expected != actual)
}

/// Mips down to and including 1x1.
fn full_mip_count(width: u32, height: u32) -> u32 {
    u32::BITS - width.max(height).max(1).leading_zeros()
}

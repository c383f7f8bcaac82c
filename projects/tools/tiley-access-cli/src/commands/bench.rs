use super::{parse_format, parse_mode, selected_modes, SurfaceLayout};
use crate::{
    error::CliError,
    util::{allocate_zeroed_align_64, fill_test_pattern, RunningAverage, Throughput, STORE_SIZE},
};
use argh::FromArgs;
use bytesize::ByteSize;
use core::time::Duration;
use std::{str::FromStr, time::Instant};
use tiley_access::{implementation_name, required_tiled_len, TileFormat, TraversalMode};

#[derive(FromArgs, Debug)]
/// Time fill, copy and read of one mip with each traversal mode
#[argh(subcommand, name = "bench")]
pub struct BenchCmd {
    /// width of mip 0, in blocks (default: 1024)
    #[argh(option, default = "1024")]
    pub width: u32,

    /// height of mip 0, in blocks (default: 1024)
    #[argh(option, default = "1024")]
    pub height: u32,

    /// bytes per block (default: 8, DXT1)
    #[argh(option, default = "8")]
    pub bytes_per_block: u32,

    /// mip level to transfer (default: 0)
    #[argh(option, default = "0")]
    pub mip: u32,

    /// tile row pitch in bytes (default: mip 0 row width)
    #[argh(option)]
    pub pitch: Option<u32>,

    /// offset of the mip within a tile row, in bytes (default: 0)
    #[argh(option, default = "0")]
    pub x_offset: u32,

    /// offset of the mip, in block rows (default: 0)
    #[argh(option, default = "0")]
    pub y_offset: u32,

    /// tile format: tiley, tiley-no-swizzle (default: tiley)
    #[argh(option, default = "TileFormat::TileY", from_str_fn(parse_format))]
    pub format: TileFormat,

    /// traversal mode: tiled, linear-rows, linear-columns, linear-intrinsics (default: all)
    #[argh(option, from_str_fn(parse_mode))]
    pub mode: Option<TraversalMode>,

    /// test to run: solid, copy, read (default: all)
    #[argh(option)]
    pub test: Option<BenchTest>,

    /// timed iterations per test (default: 256)
    #[argh(option, default = "256")]
    pub iterations: u32,

    /// untimed iterations before timing (default: 16)
    #[argh(option, default = "16")]
    pub warmup: u32,
}

/// What a benchmark iteration does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchTest {
    /// Fill with the iteration counter.
    Solid,
    /// Copy linear data into tiled memory.
    Copy,
    /// Read tiled memory back into linear memory.
    Read,
}

impl BenchTest {
    const ALL: [BenchTest; 3] = [BenchTest::Solid, BenchTest::Copy, BenchTest::Read];

    fn name(self) -> &'static str {
        match self {
            BenchTest::Solid => "solid",
            BenchTest::Copy => "copy",
            BenchTest::Read => "read",
        }
    }
}

impl FromStr for BenchTest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "solid" | "fill" => Ok(BenchTest::Solid),
            "copy" => Ok(BenchTest::Copy),
            "read" => Ok(BenchTest::Read),
            _ => Err(format!(
                "Invalid test: {s}. Valid tests are: solid, copy, read"
            )),
        }
    }
}

/// Timing of one test with one mode.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BenchResult {
    pub test: BenchTest,
    pub mode: TraversalMode,
    /// Average of the last [`STORE_SIZE`] iterations, in seconds.
    pub average_secs: f64,
    pub throughput: Throughput,
}

pub(crate) fn handle_bench_command(cmd: BenchCmd) -> Result<(), CliError> {
    let layout = SurfaceLayout::new(
        cmd.width,
        cmd.height,
        cmd.bytes_per_block,
        cmd.mip,
        cmd.pitch,
        cmd.format,
    )
    .with_offsets(cmd.x_offset, cmd.y_offset);
    layout.geometry.validate()?;
    let extent = layout.extent();

    println!(
        "Benchmarking mip {} ({}x{} blocks, {}) of a {}x{} {:?} texture",
        cmd.mip,
        extent.width_in_blocks,
        extent.height_in_blocks,
        ByteSize(extent.len_bytes() as u64),
        cmd.width,
        cmd.height,
        cmd.format
    );
    println!(
        "Linear mip chain: {}, tiled surface: {}",
        ByteSize(layout.geometry.allocate_bytes() as u64),
        ByteSize(required_tiled_len(&extent, layout.pitch, layout.y_offset) as u64)
    );
    println!(
        "Iterations: {}, warmup: {}, streaming stores: {}",
        cmd.iterations,
        cmd.warmup,
        implementation_name()
    );

    let tests = match cmd.test {
        Some(test) => vec![test],
        None => BenchTest::ALL.to_vec(),
    };

    for test in tests {
        for mode in selected_modes(cmd.mode) {
            if test == BenchTest::Read && !mode.supports_read() {
                tracing::info!("skipping read with {}: not supported", mode.name());
                continue;
            }

            let result = run_bench(&layout, test, mode, cmd.warmup, cmd.iterations)?;
            print_result(&result);
        }
    }

    Ok(())
}

pub(crate) fn run_bench(
    layout: &SurfaceLayout,
    test: BenchTest,
    mode: TraversalMode,
    warmup: u32,
    iterations: u32,
) -> Result<BenchResult, CliError> {
    let mut tiled = layout.allocate_tiled()?;
    let mut linear = allocate_zeroed_align_64(layout.linear_len())?;
    fill_test_pattern(linear.as_mut_slice());

    let mut surface = layout.surface(tiled.as_mut_slice())?;
    let geometry = layout.geometry;
    let row_pitch = layout.row_pitch();
    tracing::debug!(?layout, ?test, ?mode, "running benchmark");

    let mut average = RunningAverage::default();
    for frame in 0..warmup + iterations {
        let start = Instant::now();
        match test {
            BenchTest::Solid => surface.fill(mode, &geometry, layout.mip, frame)?,
            BenchTest::Copy => {
                surface.copy_from(mode, &geometry, layout.mip, linear.as_slice(), row_pitch)?
            }
            BenchTest::Read => {
                surface.read_into(mode, &geometry, layout.mip, linear.as_mut_slice(), row_pitch)?
            }
        }
        let elapsed = start.elapsed();

        if frame >= warmup {
            average.push(elapsed.as_secs_f64());
        }
    }

    let average_secs = average.average();
    let bytes = layout.extent().len_bytes() as u64;
    let throughput = Throughput::from_transfer(bytes, Duration::from_secs_f64(average_secs));

    Ok(BenchResult {
        test,
        mode,
        average_secs,
        throughput,
    })
}

fn print_result(result: &BenchResult) {
    println!(
        "   {:<6} {:<18} avg {:.3} ms (last {STORE_SIZE}) {}",
        result.test.name(),
        result.mode.name(),
        result.average_secs * 1000.0,
        result.throughput
    );
}

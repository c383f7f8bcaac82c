use core::alloc::Layout;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use safe_allocator_api::RawAlloc;
use tiley_access::{TextureGeometry, TileFormat, TiledSurfaceMut, TraversalMode};

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};

pub(crate) fn allocate_align_64(num_bytes: usize) -> RawAlloc {
    let layout = Layout::from_size_align(num_bytes, 64).unwrap();
    RawAlloc::new(layout).unwrap()
}

// 2048x2048 DXT1 texture: 512x512 blocks of 8 bytes.
const WIDTH_IN_BLOCKS: u32 = 512;
const HEIGHT_IN_BLOCKS: u32 = 512;
const BYTES_PER_BLOCK: u32 = 8;
const PITCH: u32 = WIDTH_IN_BLOCKS * BYTES_PER_BLOCK;

fn criterion_benchmark(c: &mut Criterion) {
    let geometry = TextureGeometry::new(WIDTH_IN_BLOCKS, HEIGHT_IN_BLOCKS, BYTES_PER_BLOCK);
    let size = geometry.mip_extent(0).len_bytes();
    let row_pitch = PITCH as usize;

    let mut tiled = allocate_align_64(size);
    let mut linear = allocate_align_64(size);
    for (index, byte) in linear.as_mut_slice().iter_mut().enumerate() {
        *byte = (index % 251) as u8;
    }

    let mut surface = TiledSurfaceMut::new(tiled.as_mut_slice(), TileFormat::TileY, PITCH).unwrap();

    let mut group = c.benchmark_group("TileY Fill");
    group.throughput(Throughput::Bytes(size as u64));
    for mode in TraversalMode::all_values().iter().copied() {
        let mut value = 0u32;
        group.bench_function(mode.name(), |b| {
            b.iter(|| {
                value = value.wrapping_add(1);
                surface.fill(mode, &geometry, 0, value).unwrap();
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("TileY Copy");
    group.throughput(Throughput::Bytes(size as u64));
    for mode in TraversalMode::all_values().iter().copied() {
        group.bench_function(mode.name(), |b| {
            b.iter(|| {
                surface
                    .copy_from(mode, &geometry, 0, linear.as_slice(), row_pitch)
                    .unwrap();
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("TileY Read");
    group.throughput(Throughput::Bytes(size as u64));
    for mode in TraversalMode::all_values()
        .iter()
        .copied()
        .filter(|mode| mode.supports_read())
    {
        group.bench_function(mode.name(), |b| {
            b.iter(|| {
                surface
                    .read_into(mode, &geometry, 0, linear.as_mut_slice(), row_pitch)
                    .unwrap();
            })
        });
    }
    group.finish();
}

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}

#[cfg(not(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
)))]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);

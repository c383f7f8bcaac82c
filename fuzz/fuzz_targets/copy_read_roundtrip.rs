#![no_main]

// Copies random data into tiled memory with one traversal mode and reads it back with another,
// for arbitrary (valid) geometry and placement.

use core::alloc::Layout;
use libfuzzer_sys::{arbitrary, fuzz_target};
use safe_allocator_api::RawAlloc;
use tiley_access::{
    required_linear_len, required_tiled_len, TextureGeometry, TileFormat, TiledSurfaceMut,
    TraversalMode,
};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Transfer {
    pub width_log2: u8,
    pub height_log2: u8,
    pub block_words: u8,
    pub mip: u8,
    pub x_offset_words: u8,
    pub y_offset: u8,
    pub extra_columns: u8,
    pub row_padding_words: u8,
    pub no_swizzle: bool,
    pub copy_mode: u8,
    pub read_mode: u8,
    pub seed: u32,
}

fuzz_target!(|transfer: Transfer| {
    let bytes_per_block = 4 * (1 + u32::from(transfer.block_words % 4));
    let geometry = TextureGeometry::new(
        1 << (transfer.width_log2 % 8),
        1 << (transfer.height_log2 % 8),
        bytes_per_block,
    )
    .with_mip_count(8);
    let mip = u32::from(transfer.mip % 8);
    let extent = geometry.mip_extent(mip);

    let x_offset = 4 * u32::from(transfer.x_offset_words % 32);
    let y_offset = u32::from(transfer.y_offset % 64);
    let pitch = (x_offset + extent.width_in_bytes).next_multiple_of(16)
        + 16 * u32::from(transfer.extra_columns % 4);
    let format = if transfer.no_swizzle {
        TileFormat::TileYNoSwizzle
    } else {
        TileFormat::TileY
    };

    let all_modes = TraversalMode::all_values();
    let copy_mode = all_modes[transfer.copy_mode as usize % all_modes.len()];
    let read_mode = all_modes[transfer.read_mode as usize % all_modes.len()];
    let read_mode = if read_mode.supports_read() {
        read_mode
    } else {
        TraversalMode::Tiled
    };

    let row_pitch =
        extent.width_in_bytes as usize + 4 * usize::from(transfer.row_padding_words % 4);
    let linear_len = required_linear_len(&extent, row_pitch);
    let mut state = transfer.seed | 1;
    let source: Vec<u8> = (0..linear_len)
        .map(|_| {
            // xorshift32
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect();

    let tiled_len = required_tiled_len(&extent, pitch, y_offset);
    let mut tiled = RawAlloc::new(Layout::from_size_align(tiled_len, 64).unwrap()).unwrap();
    unsafe { core::ptr::write_bytes(tiled.as_mut_ptr(), 0, tiled_len) };

    let mut surface = TiledSurfaceMut::new(tiled.as_mut_slice(), format, pitch)
        .and_then(|surface| surface.with_offsets(x_offset, y_offset))
        .unwrap();
    let mut output = vec![0u8; linear_len];

    surface
        .copy_from(copy_mode, &geometry, mip, &source, row_pitch)
        .unwrap();
    surface
        .read_into(read_mode, &geometry, mip, &mut output, row_pitch)
        .unwrap();

    for row in 0..extent.height_in_blocks as usize {
        let start = row * row_pitch;
        let end = start + extent.width_in_bytes as usize;
        assert_eq!(
            &output[start..end],
            &source[start..end],
            "row {row}: copied with {copy_mode:?}, read with {read_mode:?}"
        );
    }
});

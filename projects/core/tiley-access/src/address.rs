//! Address arithmetic for the TileY layout.
//!
//! A TileY tile is column major: it is 32 block rows tall and 128 bits (16 bytes) wide per
//! column. Within a tiled address:
//!
//! - bits `0..4` hold the byte position inside a 16 byte column row,
//! - bits `4..9` hold the row inside the tile (32 rows),
//! - bits `9..` hold the column index and, above that, the tile row.
//!
//! Alternate 16 byte column pairs additionally get the 'cacheline swizzle' (CSX), where
//! address bit 6 is XORed with bit 9. See [`swizzle_address`].
//!
//! All functions here are bit exact and operate on [`u32`], matching the 32-bit offsets
//! handed out by the driver.

/// Height of a TileY tile, in block rows.
pub const TILE_HEIGHT_IN_BLOCKS: u32 = 32;

/// Size of the unit moved by the vector paths (one SSE register).
pub const CHUNK_BYTES: u32 = 16;

/// Size of the unit moved by the scalar paths.
pub const ELEMENT_BYTES: u32 = 4;

/// Moves the high bits of a linear X byte offset above the 5 bits reserved for Y.
///
/// The low 4 bits stay in place, everything above is shifted left by 5.
#[inline(always)]
pub const fn swizzle_x(x: u32) -> u32 {
    let x_low = x & 0xF;
    let x_high = x & 0xFFFF_FFF0;
    x_low | (x_high << 5)
}

/// Places a block row index into its 5-bit field (bits `4..9`) inside the tile.
#[inline(always)]
pub const fn swizzle_y(y: u32) -> u32 {
    (y & 0x1F) << 4
}

/// Inverse of [`swizzle_x`].
///
/// The result still contains the tile row in its high bits (`tile_row * pitch`);
/// callers must remove it using the row pitch of the mapping.
#[inline(always)]
pub const fn unswizzle_x(addr: u32) -> u32 {
    let x_low = addr & 0xF;
    let x_high = (0xFFFF_FFF0 << 5) & addr;
    x_low | (x_high >> 5)
}

/// Extracts the in-tile row from a physical TileY address.
///
/// Undoes the cacheline swizzle first, then extracts bits `4..9`.
#[inline(always)]
pub const fn unswizzle_y(addr: u32) -> u32 {
    unswizzle_y_no_csx(swizzle_address(addr))
}

/// Extracts the in-tile row from an address that carries no cacheline swizzle.
#[inline(always)]
pub const fn unswizzle_y_no_csx(addr: u32) -> u32 {
    ((0x1F << 4) & addr) >> 4
}

/// Applies the TileY cacheline swizzle (`swizzled[6] = tiled[6] ^ tiled[9]`).
///
/// This is an involution; applying it twice yields the original address.
#[inline(always)]
pub const fn swizzle_address(tiled_addr: u32) -> u32 {
    tiled_addr ^ ((tiled_addr & (1 << 9)) >> 3)
}

/// Advances a counter living in a bit-interleaved number space.
///
/// `mask` is the swizzled form of the negated stride (e.g. `swizzle_x(-16i32 as u32)` to
/// step 16 bytes in X). Its set bits are the bits the counter may occupy; subtracting the
/// mask and masking again adds one stride while letting the carry skip over every bit that
/// belongs to the other coordinate. In other words this counts upward through the
/// interleaved numbering directly instead of recomputing the swizzle from scratch.
///
/// `offs` must not have any bits set outside of `mask`.
#[inline(always)]
pub const fn advance_interleaved(offs: u32, mask: u32) -> u32 {
    offs.wrapping_sub(mask) & mask
}

/// Composes the tiled address of a (byte column, block row) position, before CSX.
///
/// `incr_y` is `swizzle_x(pitch)`, the size of a full row of tiles.
#[inline(always)]
pub const fn tiled_address(x_bytes: u32, y_blocks: u32, incr_y: u32) -> u32 {
    swizzle_y(y_blocks) + incr_y * (y_blocks / TILE_HEIGHT_IN_BLOCKS) + swizzle_x(x_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0x0, 0x0)]
    #[case(0xF, 0xF)]
    #[case(0x10, 0x200)]
    #[case(0x1C, 0x20C)]
    #[case(0x100, 0x2000)]
    fn swizzle_x_matches_known_values(#[case] x: u32, #[case] expected: u32) {
        assert_eq!(swizzle_x(x), expected);
    }

    #[rstest]
    #[case(0, 0x000)]
    #[case(1, 0x010)]
    #[case(31, 0x1F0)]
    #[case(32, 0x000)] // wraps into the next tile row, handled by incr_y
    #[case(37, 0x050)]
    fn swizzle_y_matches_known_values(#[case] y: u32, #[case] expected: u32) {
        assert_eq!(swizzle_y(y), expected);
    }

    #[test]
    fn swizzle_x_and_y_never_overlap() {
        for x in (0..4096).step_by(4) {
            for y in 0..32 {
                assert_eq!(swizzle_x(x) & swizzle_y(y), 0, "x={x} y={y}");
            }
        }
    }

    #[test]
    fn swizzle_address_is_involution() {
        for addr in (0..(1 << 16)).chain([u32::MAX - 1024, u32::MAX]) {
            assert_eq!(swizzle_address(swizzle_address(addr)), addr, "addr={addr:#x}");
        }
    }

    #[test]
    fn swizzle_address_only_touches_bit_6() {
        assert_eq!(swizzle_address(0x200), 0x240);
        assert_eq!(swizzle_address(0x240), 0x200);
        assert_eq!(swizzle_address(0x1FF), 0x1FF);
        assert_eq!(swizzle_address(0x040), 0x040);
    }

    #[rstest]
    #[case(64)]
    #[case(256)]
    #[case(1024)]
    fn unswizzle_x_roundtrips_after_masking(#[case] row_bytes: u32) {
        for x in 0..row_bytes {
            assert_eq!(unswizzle_x(swizzle_x(x)) & (row_bytes - 1), x);
        }
    }

    #[test]
    fn unswizzle_x_keeps_tile_row_bits() {
        let pitch = 256;
        let incr_y = swizzle_x(pitch);
        let addr = incr_y * 3 + swizzle_x(48) + swizzle_y(7);
        assert_eq!(unswizzle_x(addr), 3 * pitch + 48);
        assert_eq!(unswizzle_x(addr) % pitch, 48);
    }

    #[test]
    fn unswizzle_y_roundtrips_through_csx() {
        for x in (0..1024).step_by(16) {
            for y in 0..TILE_HEIGHT_IN_BLOCKS {
                let physical = swizzle_address(swizzle_x(x) + swizzle_y(y));
                assert_eq!(unswizzle_y(physical), y, "x={x} y={y}");
                assert_eq!(unswizzle_y_no_csx(swizzle_x(x) + swizzle_y(y)), y);
            }
        }
    }

    #[test]
    fn advance_interleaved_counts_in_x() {
        let mask = swizzle_x(-16i32 as u32);
        let mut offs = swizzle_x(0);
        for x in (16..4096).step_by(16) {
            offs = advance_interleaved(offs, mask);
            assert_eq!(offs, swizzle_x(x));
        }
    }

    #[test]
    fn advance_interleaved_counts_elements_in_x() {
        let mask = swizzle_x(-4i32 as u32);
        let mut offs = swizzle_x(8);
        for x in (12..2048).step_by(4) {
            offs = advance_interleaved(offs, mask);
            assert_eq!(offs, swizzle_x(x));
        }
    }

    #[test]
    fn advance_interleaved_wraps_in_y() {
        let mask = swizzle_y(-4i32 as u32);
        let mut offs = swizzle_y(0);
        for y in (4..64).step_by(4) {
            offs = advance_interleaved(offs, mask);
            assert_eq!(offs, swizzle_y(y));
        }
        // 64 rows is exactly two tiles, so the counter is back at the top of a tile
        assert_eq!(advance_interleaved(offs, mask), 0);
    }

    #[test]
    fn tiled_address_advances_tile_rows() {
        let incr_y = swizzle_x(128);
        assert_eq!(tiled_address(0, 32, incr_y), incr_y);
        assert_eq!(tiled_address(16, 33, incr_y), incr_y + 0x200 + 0x10);
    }
}

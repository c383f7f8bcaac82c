#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;
use core::ptr::{read_unaligned, write_unaligned};

pub(crate) const IMPLEMENTATION: &str = "sse2";

/// 16 bytes of texture data held in a register.
pub(crate) type Chunk = __m128i;

/// # Safety
///
/// - src must be valid for reads of 16 bytes
#[inline(always)]
pub(crate) unsafe fn load_chunk(src: *const u8) -> Chunk {
    _mm_loadu_si128(src as *const __m128i)
}

/// Loads a chunk from tiled memory, which is always 16 byte aligned.
///
/// # Safety
///
/// - src must be valid for reads of 16 bytes
/// - src must be 16 byte aligned
#[inline(always)]
pub(crate) unsafe fn load_tiled_chunk(src: *const u8) -> Chunk {
    debug_assert!((src as usize).is_multiple_of(16));
    _mm_load_si128(src as *const __m128i)
}

/// # Safety
///
/// Always safe to call on SSE2 capable CPUs; kept `unsafe` for parity with the portable version.
#[inline(always)]
pub(crate) unsafe fn splat_chunk(value: u32) -> Chunk {
    _mm_set1_epi32(value as i32)
}

/// Writes a chunk with a non-temporal store (`movntdq`).
///
/// # Safety
///
/// - dst must be valid for writes of 16 bytes
/// - dst must be 16 byte aligned
#[inline(always)]
pub(crate) unsafe fn stream_chunk(dst: *mut u8, chunk: Chunk) {
    debug_assert!((dst as usize).is_multiple_of(16));
    _mm_stream_si128(dst as *mut __m128i, chunk);
}

/// Writes 4 bytes with a non-temporal store (`movnti`).
///
/// # Safety
///
/// - dst must be valid for writes of 4 bytes
/// - dst must be 4 byte aligned
#[inline(always)]
pub(crate) unsafe fn stream_element(dst: *mut u8, value: u32) {
    debug_assert!((dst as usize).is_multiple_of(4));
    _mm_stream_si32(dst as *mut i32, value as i32);
}

/// # Safety
///
/// - dst must be valid for writes of 16 bytes
#[inline(always)]
pub(crate) unsafe fn store_chunk(dst: *mut u8, chunk: Chunk) {
    _mm_storeu_si128(dst as *mut __m128i, chunk);
}

/// # Safety
///
/// - src must be valid for reads of 4 bytes
#[inline(always)]
pub(crate) unsafe fn load_element(src: *const u8) -> u32 {
    read_unaligned(src as *const u32)
}

/// # Safety
///
/// - dst must be valid for writes of 4 bytes
#[inline(always)]
pub(crate) unsafe fn store_element(dst: *mut u8, value: u32) {
    write_unaligned(dst as *mut u32, value);
}

/// Orders all prior non-temporal stores before any later store (`sfence`).
#[inline(always)]
pub(crate) fn fence() {
    // SAFETY: sse2 is enabled for this build, which implies sse.
    unsafe { _mm_sfence() }
}

use core::{
    ptr::{read, read_unaligned, write_unaligned, write_volatile},
    sync::atomic::{fence as atomic_fence, Ordering},
};

pub(crate) const IMPLEMENTATION: &str = "portable";

/// 16 bytes of texture data.
pub(crate) type Chunk = [u32; 4];

/// # Safety
///
/// - src must be valid for reads of 16 bytes
#[inline(always)]
pub(crate) unsafe fn load_chunk(src: *const u8) -> Chunk {
    read_unaligned(src as *const Chunk)
}

/// # Safety
///
/// - src must be valid for reads of 16 bytes
/// - src must be 16 byte aligned
#[inline(always)]
pub(crate) unsafe fn load_tiled_chunk(src: *const u8) -> Chunk {
    debug_assert!((src as usize).is_multiple_of(16));
    read(src as *const Chunk)
}

/// # Safety
///
/// Always safe; kept `unsafe` for parity with the SSE2 version.
#[inline(always)]
pub(crate) unsafe fn splat_chunk(value: u32) -> Chunk {
    [value; 4]
}

/// Writes a chunk without letting the compiler merge or elide the store.
///
/// There is no portable non-temporal store; [`fence`] must run before the memory is
/// handed back to the GPU.
///
/// # Safety
///
/// - dst must be valid for writes of 16 bytes
/// - dst must be 16 byte aligned
#[inline(always)]
pub(crate) unsafe fn stream_chunk(dst: *mut u8, chunk: Chunk) {
    debug_assert!((dst as usize).is_multiple_of(16));
    write_volatile(dst as *mut Chunk, chunk);
}

/// # Safety
///
/// - dst must be valid for writes of 4 bytes
/// - dst must be 4 byte aligned
#[inline(always)]
pub(crate) unsafe fn stream_element(dst: *mut u8, value: u32) {
    debug_assert!((dst as usize).is_multiple_of(4));
    write_volatile(dst as *mut u32, value);
}

/// # Safety
///
/// - dst must be valid for writes of 16 bytes
#[inline(always)]
pub(crate) unsafe fn store_chunk(dst: *mut u8, chunk: Chunk) {
    write_unaligned(dst as *mut Chunk, chunk);
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

/// Makes all prior stores visible before any later memory access.
#[inline(always)]
pub(crate) fn fence() {
    atomic_fence(Ordering::SeqCst);
}

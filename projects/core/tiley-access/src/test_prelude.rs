//! Common test imports and utilities
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;
pub use safe_allocator_api::RawAlloc;

pub use crate::traversal::TransferKernel;
pub use alloc::{vec, vec::Vec};
pub use core::alloc::Layout;

/// Allocates `num_bytes` of zeroed memory aligned to a cacheline.
pub(crate) fn allocate_align_64(num_bytes: usize) -> RawAlloc {
    let layout = Layout::from_size_align(num_bytes, 64).unwrap();
    let mut memory = RawAlloc::new(layout).unwrap();
    unsafe { core::ptr::write_bytes(memory.as_mut_ptr(), 0, num_bytes) };
    memory
}

/// Bytes where no two 4 byte words are equal.
pub(crate) fn generate_linear_pattern(num_bytes: usize) -> Vec<u8> {
    (0..num_bytes)
        .map(|x| {
            let word = ((x / 4) as u32).wrapping_mul(0x9E37_79B1);
            word.to_le_bytes()[x % 4]
        })
        .collect()
}

/// Asserts every native endian 4 byte word of `bytes` is `value`.
pub(crate) fn assert_all_words(bytes: &[u8], value: u32) {
    for (index, word) in bytes.chunks_exact(4).enumerate() {
        let word = u32::from_ne_bytes([word[0], word[1], word[2], word[3]]);
        assert_eq!(word, value, "word {index} (byte {}) not filled", index * 4);
    }
}

/// One 4 byte element handed to a [`RecordingKernel`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Visit {
    pub tiled: usize,
    pub linear: usize,
}

/// Records offsets instead of moving memory.
///
/// Chunks are split into their 4 elements, so chunked and element walks of the same mip
/// produce comparable visit lists.
#[derive(Debug, Default)]
pub(crate) struct RecordingKernel {
    pub visits: Vec<Visit>,
    pub chunks: usize,
}

impl TransferKernel for RecordingKernel {
    unsafe fn chunk(&mut self, tiled: usize, linear: usize) {
        assert_eq!(tiled % 16, 0, "unaligned chunk at {tiled:#x}");
        self.chunks += 1;
        for offset in (0..16).step_by(4) {
            self.visits.push(Visit {
                tiled: tiled + offset,
                linear: linear + offset,
            });
        }
    }

    unsafe fn element(&mut self, tiled: usize, linear: usize) {
        assert_eq!(tiled % 4, 0, "unaligned element at {tiled:#x}");
        self.visits.push(Visit { tiled, linear });
    }
}

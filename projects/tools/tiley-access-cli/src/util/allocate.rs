use crate::error::CliError;
use core::alloc::Layout;
use safe_allocator_api::RawAlloc;

/// Allocates `num_bytes` of zeroed memory aligned to 64 bytes.
pub fn allocate_zeroed_align_64(num_bytes: usize) -> Result<RawAlloc, CliError> {
    let layout = Layout::from_size_align(num_bytes, 64)?;
    let mut memory = RawAlloc::new(layout)?;
    // RawAlloc hands out uninitialized memory.
    unsafe { core::ptr::write_bytes(memory.as_mut_ptr(), 0, num_bytes) };
    Ok(memory)
}

/// Deterministic bytes where no two 4 byte words are equal.
pub fn fill_test_pattern(bytes: &mut [u8]) {
    for (index, word) in bytes.chunks_mut(4).enumerate() {
        let value = (index as u32).wrapping_mul(0x9E37_79B1).to_le_bytes();
        word.copy_from_slice(&value[..word.len()]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_is_zeroed_and_aligned() {
        let memory = allocate_zeroed_align_64(4096).unwrap();
        assert_eq!(memory.as_ptr() as usize % 64, 0);
        assert!(memory.as_slice().iter().all(|&byte| byte == 0));
    }

    #[test]
    fn pattern_words_are_distinct() {
        let mut bytes = vec![0u8; 4096];
        fill_test_pattern(&mut bytes);

        let mut words: Vec<&[u8]> = bytes.chunks(4).collect();
        words.sort();
        words.dedup();
        assert_eq!(words.len(), 1024);
    }
}

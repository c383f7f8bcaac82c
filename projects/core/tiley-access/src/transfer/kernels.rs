use crate::{
    stream::{
        load_chunk, load_element, load_tiled_chunk, splat_chunk, store_chunk, store_element,
        stream_chunk, stream_element, Chunk,
    },
    traversal::TransferKernel,
};

/// Streams a constant into tiled memory.
pub(crate) struct FillKernel {
    tiled: *mut u8,
    chunk: Chunk,
    value: u32,
}

impl FillKernel {
    /// # Safety
    ///
    /// - tiled must be valid for writes over the whole mip footprint
    #[inline(always)]
    pub(crate) unsafe fn new(tiled: *mut u8, value: u32) -> Self {
        Self {
            tiled,
            chunk: splat_chunk(value),
            value,
        }
    }
}

impl TransferKernel for FillKernel {
    #[inline(always)]
    unsafe fn chunk(&mut self, tiled: usize, _linear: usize) {
        stream_chunk(self.tiled.add(tiled), self.chunk);
    }

    #[inline(always)]
    unsafe fn element(&mut self, tiled: usize, _linear: usize) {
        stream_element(self.tiled.add(tiled), self.value);
    }
}

/// Streams linear memory into tiled memory.
pub(crate) struct CopyKernel {
    pub(crate) tiled: *mut u8,
    pub(crate) linear: *const u8,
}

impl TransferKernel for CopyKernel {
    #[inline(always)]
    unsafe fn chunk(&mut self, tiled: usize, linear: usize) {
        stream_chunk(self.tiled.add(tiled), load_chunk(self.linear.add(linear)));
    }

    #[inline(always)]
    unsafe fn element(&mut self, tiled: usize, linear: usize) {
        stream_element(self.tiled.add(tiled), load_element(self.linear.add(linear)));
    }
}

/// Reads tiled memory back into linear memory.
///
/// The linear side is ordinary cached memory, so it gets ordinary stores.
pub(crate) struct ReadKernel {
    pub(crate) tiled: *const u8,
    pub(crate) linear: *mut u8,
}

impl TransferKernel for ReadKernel {
    #[inline(always)]
    unsafe fn chunk(&mut self, tiled: usize, linear: usize) {
        store_chunk(self.linear.add(linear), load_tiled_chunk(self.tiled.add(tiled)));
    }

    #[inline(always)]
    unsafe fn element(&mut self, tiled: usize, linear: usize) {
        store_element(self.linear.add(linear), load_element(self.tiled.add(tiled)));
    }
}

use core::alloc::LayoutError;
use safe_allocator_api::AllocError;
use thiserror::Error;
use tiley_access::{TileFormat, TransferError, TraversalMode};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Transfer(#[from] TransferError),
    #[error("Invalid buffer layout: {0}")]
    Layout(#[from] LayoutError),
    #[error(transparent)]
    Allocate(#[from] AllocError),
    /// Data read back differs from what was written.
    #[error(
        "{format:?}: data copied with {copy:?} and read with {read:?} differs at byte {offset}"
    )]
    CopyMismatch {
        format: TileFormat,
        copy: TraversalMode,
        read: TraversalMode,
        offset: usize,
    },
    /// Two fill modes left different bytes in tiled memory.
    #[error("{format:?}: {mode:?} fill differs from {reference:?} at tiled byte {offset}")]
    FillMismatch {
        format: TileFormat,
        mode: TraversalMode,
        reference: TraversalMode,
        offset: usize,
    },
}

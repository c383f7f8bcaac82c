use crate::error::TransferError;

/// The order in which tiled addresses are visited during a transfer.
///
/// Every mode produces the same mapping between linear and tiled memory; they only differ
/// in how that memory is walked, which matters a lot for write-combined memory.
#[repr(u32)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, derive_enum_all_values::AllValues)]
pub enum TraversalMode {
    /// Walks tiled memory sequentially and computes the linear address from the tiled one.
    Tiled = 0,
    /// Walks linear memory row by row, computing each tiled address from scratch.
    LinearRows = 1,
    /// Walks linear memory column by column, computing each tiled address from scratch.
    LinearColumns = 2,
    /// Walks linear memory in 4 row strips, stepping the tiled address incrementally.
    LinearIntrinsics = 3,
}

impl TraversalMode {
    /// Whether [`crate::transfer::read`] can use this mode.
    ///
    /// Reads from write-combined memory are slow no matter the order, so no incremental
    /// read path exists for [`TraversalMode::LinearIntrinsics`].
    #[inline]
    pub const fn supports_read(self) -> bool {
        !matches!(self, TraversalMode::LinearIntrinsics)
    }

    /// Short human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            TraversalMode::Tiled => "tiled",
            TraversalMode::LinearRows => "linear-rows",
            TraversalMode::LinearColumns => "linear-columns",
            TraversalMode::LinearIntrinsics => "linear-intrinsics",
        }
    }
}

impl TryFrom<u32> for TraversalMode {
    type Error = TransferError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TraversalMode::Tiled),
            1 => Ok(TraversalMode::LinearRows),
            2 => Ok(TraversalMode::LinearColumns),
            3 => Ok(TraversalMode::LinearIntrinsics),
            _ => Err(TransferError::InvalidTraversalMode(value)),
        }
    }
}

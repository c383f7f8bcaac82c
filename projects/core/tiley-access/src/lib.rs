#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
extern crate alloc;

pub mod address;
pub mod error;
/// Tile layouts reported by the driver.
pub mod format;
pub mod geometry;
pub mod mapping;
/// The ways a mip can be walked.
pub mod mode;
pub mod safe;
pub mod stream;
pub mod transfer;
pub mod traversal;

#[cfg(test)]
pub mod test_prelude;

pub use error::TransferError;
pub use format::TileFormat;
pub use geometry::{compute_mip_extent, MipExtent, TextureGeometry};
pub use mapping::{LinearSurface, LinearSurfaceMut, TileMapping};
pub use mode::TraversalMode;
pub use safe::{required_linear_len, required_tiled_len, TiledSurfaceMut};
pub use stream::implementation_name;

mod allocate;
mod average;
mod throughput;

pub use allocate::*;
pub use average::*;
pub use throughput::*;

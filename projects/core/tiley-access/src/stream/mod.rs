//! Non-temporal ('streaming') stores into write-combined memory, plus the plain loads and
//! stores used on the linear side.
//!
//! Tiled memory is write-combined, so every write into it must bypass the cache. With SSE2
//! this is `movntdq`/`movnti`; on other targets the portable implementation uses volatile
//! stores, with [`fence`] making them visible before the memory is handed back.
//!
//! The implementation is picked at compile time.

#[cfg(all(
    any(target_arch = "x86_64", target_arch = "x86"),
    target_feature = "sse2",
    not(feature = "portable")
))]
mod sse2;
#[cfg(all(
    any(target_arch = "x86_64", target_arch = "x86"),
    target_feature = "sse2",
    not(feature = "portable")
))]
pub(crate) use sse2::*;

#[cfg(not(all(
    any(target_arch = "x86_64", target_arch = "x86"),
    target_feature = "sse2",
    not(feature = "portable")
)))]
mod portable;
#[cfg(not(all(
    any(target_arch = "x86_64", target_arch = "x86"),
    target_feature = "sse2",
    not(feature = "portable")
)))]
pub(crate) use portable::*;

/// Name of the streaming store implementation compiled in.
pub const fn implementation_name() -> &'static str {
    IMPLEMENTATION
}

//! SIMD register abstraction.
//!
//! Exposes a single concrete `VectorRegister` type plus the `VECTOR_WIDTH` /
//! `LOGICAL_WIDTH` / `MIDDLE` / `NINF` / `CUTOFF` constants, selected at
//! compile time by `cfg_if` among three backends: AVX2, SSE4.2, and a
//! portable scalar-array fallback.
//!
//! All lane-index operations are total for in-range indices; out-of-range
//! lane writes are checked with `debug_assert!` only.

#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx2"))]
mod avx2;
#[cfg(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    target_feature = "sse4.2",
    not(target_feature = "avx2")
))]
mod sse;
#[cfg(not(all(
    any(target_arch = "x86", target_arch = "x86_64"),
    any(target_feature = "avx2", target_feature = "sse4.2")
)))]
mod fallback;

cfg_if::cfg_if! {
    if #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), target_feature = "avx2"))] {
        pub use avx2::{VectorRegister, VECTOR_WIDTH, LOGICAL_WIDTH, MIDDLE, NINF, CUTOFF};
    } else if #[cfg(all(
        any(target_arch = "x86", target_arch = "x86_64"),
        target_feature = "sse4.2",
        not(target_feature = "avx2")
    ))] {
        pub use sse::{VectorRegister, VECTOR_WIDTH, LOGICAL_WIDTH, MIDDLE, NINF, CUTOFF};
    } else {
        pub use fallback::{VectorRegister, VECTOR_WIDTH, LOGICAL_WIDTH, MIDDLE, NINF, CUTOFF};
    }
}

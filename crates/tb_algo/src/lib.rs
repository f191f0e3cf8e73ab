// crates/tb_algo/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

// ----------------------------- Distribution (public surface) -------------------------

pub mod distribution;

// Convenience re-exports (session imports these from crate root)
pub use distribution::{distribute_prize_pool, distribution_residual};

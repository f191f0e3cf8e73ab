//! tb_core — Core types, domains, quantization helpers, and deterministic RNG.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! engine (`tb_io`, `tb_algo`, `tb_session`, `tb_report`, `tb_cli`).
//!
//! - Registry tokens: `CategoryId`; ledger ids: `WinnerId`
//! - Prize domain: `PriorityLevel`, `PrizeCategory`, `PrizeRegistry`, `Winner`
//! - Integer-first quantization (hundredths fixed point, no floats)
//! - Seedable RNG (ChaCha20) for **number draws only**
//!
//! Serialization derives are gated behind the `serde` feature.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod entities;
pub mod errors;
pub mod rng;
pub mod rounding;
pub mod tokens;

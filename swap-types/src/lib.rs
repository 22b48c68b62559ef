// SPDX-License-Identifier: GPL-3.0-only

//! Shared domain models for swap device management
//!
//! These types are produced by `swap-sys` and serialized by the `swapctl`
//! binary. They carry no I/O of their own:
//!
//! - `SwapFormat` → classification of an on-disk swap signature
//! - `ActivationRequest` → a device plus an optional priority
//! - `OperationResult` → success flag and failure message of a mutating call
//! - `LiveSwapEntry` → one row of the kernel's active-swap listing

pub mod format;
pub mod registry;
pub mod request;

pub use format::{SIGNATURE_LEN, SIGNATURES, SwapFormat};
pub use registry::{LiveSwapEntry, parse_registry};
pub use request::{ActivationRequest, OperationResult};

// SPDX-License-Identifier: GPL-3.0-only

//! Low-level system operations for swap devices
//!
//! This crate reads swap signatures straight from block devices, checks the
//! kernel's live-swap listing, and drives the util-linux tools:
//! - Signature probing and format classification
//! - Device-mapper alias resolution
//! - Activation status queries
//! - `mkswap`/`swapon`/`swapoff` invocation, gated on the probed format
//!
//! Activation and creation require elevated privileges.

pub mod config;
pub mod controller;
pub mod dm;
pub mod error;
pub mod exec;
pub mod probe;
pub mod resolve;
pub mod status;

pub use config::{CommandNames, SwapConfig};
pub use controller::{SwapController, mkswap_args, swapoff_args, swapon_args};
pub use dm::{DeviceMapper, DmSetup};
pub use error::{ActivationRefusal, Result, SysError};
pub use exec::{CommandExecutor, SystemExecutor};
pub use probe::{FormatProbe, signature_offset, system_page_size};
pub use resolve::DeviceResolver;
pub use status::{SwapStatus, registry_lists};

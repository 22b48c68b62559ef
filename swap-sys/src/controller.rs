// SPDX-License-Identifier: GPL-3.0-only

//! Swap area creation, activation and deactivation.
//!
//! Activation is gated on the probed signature: only version 2 swap areas
//! are handed to `swapon`. Legacy areas would be rejected by the kernel and
//! suspended images would be destroyed by activation.
//!
//! The probe and the activation are not atomic. Callers that may race on the
//! same device have to serialize their calls.

use std::ffi::OsString;
use std::path::Path;

use swap_types::{ActivationRequest, OperationResult};
use tracing::{info, warn};

use crate::config::{CommandNames, SwapConfig};
use crate::error::{ActivationRefusal, Result, SysError};
use crate::exec::{CommandExecutor, render};
use crate::probe::FormatProbe;

/// `mkswap -f [-L label] device`
pub fn mkswap_args(program: &str, device: &Path, label: Option<&str>) -> Vec<OsString> {
    // -f: mkswap otherwise refuses devices that still carry old content
    let mut argv = vec![OsString::from(program), OsString::from("-f")];
    if let Some(label) = label {
        argv.push("-L".into());
        argv.push(label.into());
    }
    argv.push(device.as_os_str().to_owned());
    argv
}

/// `swapon [-p priority] device`
pub fn swapon_args(program: &str, device: &Path, priority: Option<u32>) -> Vec<OsString> {
    let mut argv = vec![OsString::from(program)];
    if let Some(priority) = priority {
        argv.push("-p".into());
        argv.push(priority.to_string().into());
    }
    argv.push(device.as_os_str().to_owned());
    argv
}

/// `swapoff device`
pub fn swapoff_args(program: &str, device: &Path) -> Vec<OsString> {
    vec![OsString::from(program), device.as_os_str().to_owned()]
}

pub struct SwapController<E> {
    executor: E,
    probe: FormatProbe,
    commands: CommandNames,
}

impl<E: CommandExecutor> SwapController<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            probe: FormatProbe::system(),
            commands: CommandNames::default(),
        }
    }

    pub fn from_config(config: &SwapConfig, executor: E) -> Self {
        Self {
            executor,
            probe: FormatProbe::from_config(config),
            commands: config.commands.clone(),
        }
    }

    pub fn with_probe(mut self, probe: FormatProbe) -> Self {
        self.probe = probe;
        self
    }

    pub fn probe(&self) -> &FormatProbe {
        &self.probe
    }

    fn run(&self, argv: Vec<OsString>) -> Result<()> {
        info!("Running {}", render(&argv));
        self.executor.execute(&argv)
    }

    /// Write a fresh swap signature to `device`.
    pub fn create(&self, device: &Path, label: Option<&str>) -> OperationResult {
        self.run(mkswap_args(&self.commands.mkswap, device, label))
            .into()
    }

    /// Activate the device of `request` if it holds an activatable swap area.
    pub fn activate(&self, request: &ActivationRequest) -> OperationResult {
        self.try_activate(request).into()
    }

    fn try_activate(&self, request: &ActivationRequest) -> Result<()> {
        let device = request.device();
        let format = self.probe.probe(device)?;
        if let Some(refusal) = ActivationRefusal::for_format(format) {
            warn!("Refusing to activate {:?}: {} signature", device, format);
            return Err(SysError::UnsafeFormat(refusal));
        }

        self.run(swapon_args(
            &self.commands.swapon,
            device,
            request.effective_priority(),
        ))
    }

    /// Deactivate `device`. No signature check is needed to stop using a
    /// swap area.
    pub fn deactivate(&self, device: &Path) -> OperationResult {
        self.run(swapoff_args(&self.commands.swapoff, device)).into()
    }
}

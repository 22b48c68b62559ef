// SPDX-License-Identifier: GPL-3.0-only

//! Swap signature probing
//!
//! The signature of a swap area lives in the last ten bytes of its first
//! page. Pages smaller than 2 KiB are treated as 2 KiB, matching the layout
//! written by `mkswap`.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use swap_types::{SIGNATURE_LEN, SwapFormat};
use tracing::debug;

use crate::config::SwapConfig;
use crate::error::{Result, SysError};

const MIN_SIGNATURE_PAGE: usize = 2048;

/// Page size reported by the running kernel.
pub fn system_page_size() -> usize {
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    usize::try_from(size)
        .ok()
        .filter(|size| *size > 0)
        .unwrap_or(4096)
}

/// Byte offset of the signature for a given page size.
pub fn signature_offset(page_size: usize) -> u64 {
    (page_size.max(MIN_SIGNATURE_PAGE) - SIGNATURE_LEN) as u64
}

/// Read-only classifier for swap signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatProbe {
    page_size: usize,
}

impl Default for FormatProbe {
    fn default() -> Self {
        Self::system()
    }
}

impl FormatProbe {
    pub fn system() -> Self {
        Self::with_page_size(system_page_size())
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self { page_size }
    }

    /// Configured page size override, or the system page size.
    pub fn from_config(config: &SwapConfig) -> Self {
        config
            .page_size
            .map(Self::with_page_size)
            .unwrap_or_else(Self::system)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        signature_offset(self.page_size)
    }

    /// Read the raw signature bytes of `device`.
    pub fn read_signature(&self, device: &Path) -> Result<[u8; SIGNATURE_LEN]> {
        let offset = self.offset();
        debug!("Reading swap signature of {:?} at offset {}", device, offset);

        let mut file = File::open(device).map_err(|error| SysError::from_open(device, error))?;
        let probe_error = |source| SysError::Probe {
            device: device.to_path_buf(),
            source,
        };

        file.seek(SeekFrom::Start(offset)).map_err(probe_error)?;

        let mut signature = [0u8; SIGNATURE_LEN];
        file.read_exact(&mut signature).map_err(probe_error)?;
        Ok(signature)
    }

    /// Classify the swap format of `device`.
    pub fn probe(&self, device: &Path) -> Result<SwapFormat> {
        let format = SwapFormat::classify(&self.read_signature(device)?);
        debug!("{:?} carries {} signature", device, format);
        Ok(format)
    }
}

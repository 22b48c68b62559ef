// SPDX-License-Identifier: GPL-3.0-only

//! Swap signature classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of signature bytes read from the end of the first swap page.
pub const SIGNATURE_LEN: usize = 10;

/// Recognized signature prefixes, in match order. The prefixes are disjoint,
/// so at most one entry can match a given signature.
pub const SIGNATURES: &[(&[u8], SwapFormat)] = &[
    (b"SWAP-SPACE", SwapFormat::LegacySwapSpace),
    (b"S1SUSPEND", SwapFormat::SuspendedImageV1),
    (b"S2SUSPEND", SwapFormat::SuspendedImageV2),
    (b"SWAPSPACE2", SwapFormat::ActivatableSwapSpaceV2),
];

/// On-disk state of a swap area as identified by its signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SwapFormat {
    /// Not a swap area, or a signature this library does not know.
    #[default]
    Unknown,
    /// Pre-2.2 kernel swap layout; the kernel no longer accepts it.
    LegacySwapSpace,
    /// Hibernation image written by the first-generation suspend code.
    SuspendedImageV1,
    /// Hibernation image written by the second-generation suspend code.
    SuspendedImageV2,
    /// Regular version 2 swap area, safe to hand to `swapon`.
    ActivatableSwapSpaceV2,
}

impl SwapFormat {
    /// Classify raw signature bytes. Every input maps to exactly one variant.
    pub fn classify(signature: &[u8]) -> Self {
        SIGNATURES
            .iter()
            .find(|(prefix, _)| signature.starts_with(prefix))
            .map(|(_, format)| *format)
            .unwrap_or_default()
    }

    pub fn is_activatable(&self) -> bool {
        matches!(self, Self::ActivatableSwapSpaceV2)
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self, Self::SuspendedImageV1 | Self::SuspendedImageV2)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::LegacySwapSpace => "swap-space-v1",
            Self::SuspendedImageV1 => "suspend-v1",
            Self::SuspendedImageV2 => "suspend-v2",
            Self::ActivatableSwapSpaceV2 => "swap-space-v2",
        }
    }
}

impl fmt::Display for SwapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_known_signatures() {
        assert_eq!(
            SwapFormat::classify(b"SWAP-SPACE"),
            SwapFormat::LegacySwapSpace
        );
        assert_eq!(
            SwapFormat::classify(b"S1SUSPEND\0"),
            SwapFormat::SuspendedImageV1
        );
        assert_eq!(
            SwapFormat::classify(b"S2SUSPENDx"),
            SwapFormat::SuspendedImageV2
        );
        assert_eq!(
            SwapFormat::classify(b"SWAPSPACE2"),
            SwapFormat::ActivatableSwapSpaceV2
        );
    }

    #[test]
    fn anything_else_is_unknown() {
        for signature in [
            &b"\0\0\0\0\0\0\0\0\0\0"[..],
            b"SWAPSPACE1",
            b"swapspace2",
            b"S3SUSPEND ",
            b"SWAP-SPAC",
            b"",
        ] {
            assert_eq!(SwapFormat::classify(signature), SwapFormat::Unknown);
        }
    }

    #[test]
    fn prefixes_are_disjoint() {
        for (index, (prefix, _)) in SIGNATURES.iter().enumerate() {
            for (other_index, (other, _)) in SIGNATURES.iter().enumerate() {
                if index != other_index {
                    assert!(!prefix.starts_with(other), "{prefix:?} overlaps {other:?}");
                }
            }
            assert!(prefix.len() <= SIGNATURE_LEN);
        }
    }

    #[test]
    fn only_v2_is_activatable() {
        assert!(SwapFormat::ActivatableSwapSpaceV2.is_activatable());
        assert!(!SwapFormat::LegacySwapSpace.is_activatable());
        assert!(SwapFormat::SuspendedImageV1.is_suspended());
        assert!(SwapFormat::SuspendedImageV2.is_suspended());
        assert!(!SwapFormat::Unknown.is_suspended());
    }
}

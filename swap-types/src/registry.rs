// SPDX-License-Identifier: GPL-3.0-only

//! Rows of the kernel's active-swap listing (`/proc/swaps`).
//!
//! ```text
//! Filename        Type        Size     Used  Priority
//! /dev/dm-2       partition   1048576  0     -1
//! ```

use serde::{Deserialize, Serialize};

/// One active swap area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveSwapEntry {
    pub device: String,
    /// `partition` or `file`.
    pub kind: String,
    pub size_kib: u64,
    pub used_kib: u64,
    pub priority: i32,
}

/// Undo the kernel's octal escaping of whitespace and backslashes in paths
/// (e.g. `\040` -> ` `).
fn unescape_octal(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    let bytes = value.as_bytes();
    let mut index = 0;

    while index < bytes.len() {
        if bytes[index] == b'\\'
            && index + 3 < bytes.len()
            && bytes[index + 1..index + 4].iter().all(|byte| (b'0'..=b'7').contains(byte))
            && let Ok(num) = u8::from_str_radix(&value[index + 1..index + 4], 8)
        {
            output.push(num as char);
            index += 4;
            continue;
        }

        let ch = value[index..].chars().next().unwrap_or_default();
        output.push(ch);
        index += ch.len_utf8();
    }

    output
}

/// Parse every entry after the header line. Malformed rows are skipped.
pub fn parse_registry(contents: &str) -> Vec<LiveSwapEntry> {
    contents
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = unescape_octal(fields.next()?);
            let kind = fields.next()?.to_string();
            Some(LiveSwapEntry {
                device,
                kind,
                size_kib: fields.next()?.parse().ok()?,
                used_kib: fields.next()?.parse().ok()?,
                priority: fields.next()?.parse().ok()?,
            })
        })
        .collect()
}

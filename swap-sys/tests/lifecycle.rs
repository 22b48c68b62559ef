// SPDX-License-Identifier: GPL-3.0-only

use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use swap_sys::{
    CommandExecutor, FormatProbe, Result, SwapConfig, SwapController, SwapStatus, signature_offset,
};
use swap_types::{ActivationRequest, SwapFormat};
use tempfile::TempDir;

#[derive(Default)]
struct RecordingExecutor {
    calls: Mutex<Vec<Vec<OsString>>>,
}

impl RecordingExecutor {
    fn calls(&self) -> Vec<Vec<OsString>> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&self, argv: &[OsString]) -> Result<()> {
        self.calls.lock().unwrap().push(argv.to_vec());
        Ok(())
    }
}

struct Sandbox {
    root: TempDir,
    config: SwapConfig,
}

impl Sandbox {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let config = SwapConfig {
            swaps_registry: root.path().join("swaps"),
            dev_dir: root.path().to_path_buf(),
            mapper_dir: root.path().join("mapper"),
            sys_block_dir: root.path().join("sys/block"),
            page_size: Some(4096),
            ..SwapConfig::default()
        };
        fs::create_dir_all(&config.mapper_dir).unwrap();
        Self { root, config }
    }

    fn device(&self, name: &str, signature: &[u8]) -> PathBuf {
        let mut image = vec![0u8; 16 * 1024];
        let offset = signature_offset(4096) as usize;
        image[offset..offset + signature.len()].copy_from_slice(signature);

        let path = self.root.path().join(name);
        fs::write(&path, image).unwrap();
        path
    }

    fn alias(&self, name: &str, node: &str) -> PathBuf {
        let link = self.config.mapper_dir.join(name);
        symlink(format!("../{node}"), &link).unwrap();
        link
    }

    fn registry(&self, rows: &[&Path]) {
        let mut contents = String::from("Filename\t\t\t\tType\t\tSize\t\tUsed\t\tPriority\n");
        for row in rows {
            contents.push_str(&format!("{}  partition\t1048576\t0\t-1\n", row.display()));
        }
        fs::write(&self.config.swaps_registry, contents).unwrap();
    }
}

#[test]
fn v2_swap_behind_mapper_alias_activates_and_reports_active() {
    let sandbox = Sandbox::new();
    let node = sandbox.device("dm-2", b"SWAPSPACE2");
    let alias = sandbox.alias("vg-swap", "dm-2");

    assert_eq!(
        FormatProbe::from_config(&sandbox.config).probe(&alias).unwrap(),
        SwapFormat::ActivatableSwapSpaceV2
    );

    let executor = RecordingExecutor::default();
    let controller = SwapController::from_config(&sandbox.config, &executor);
    let result = controller.activate(&ActivationRequest::new(&alias).with_priority(5));
    assert!(result.success, "{:?}", result.message);
    assert_eq!(
        executor.calls(),
        vec![vec![
            OsString::from("swapon"),
            OsString::from("-p"),
            OsString::from("5"),
            alias.clone().into_os_string(),
        ]]
    );

    let status = SwapStatus::from_config(&sandbox.config);
    sandbox.registry(&[]);
    assert!(!status.is_active(&alias).unwrap());

    sandbox.registry(&[node.as_path()]);
    assert!(status.is_active(&alias).unwrap());
    assert!(status.is_active(&node).unwrap());
}

#[test]
fn legacy_swap_is_never_handed_to_swapon() {
    let sandbox = Sandbox::new();
    let device = sandbox.device("sdb1", b"SWAP-SPACE");

    let executor = RecordingExecutor::default();
    let controller = SwapController::from_config(&sandbox.config, &executor);
    let result = controller.activate(&ActivationRequest::new(&device));

    assert!(!result.success);
    assert_eq!(
        result.message.as_deref(),
        Some("Old swap format, cannot activate.")
    );
    assert!(executor.calls().is_empty());
}

#[test]
fn hibernation_image_blocks_activation_until_recreated() {
    let sandbox = Sandbox::new();
    let device = sandbox.device("sdb2", b"S2SUSPEND\0");

    let executor = RecordingExecutor::default();
    let controller = SwapController::from_config(&sandbox.config, &executor);
    assert!(!controller.activate(&ActivationRequest::new(&device)).success);
    assert!(executor.calls().is_empty());

    assert!(controller.create(&device, Some("swap")).success);
    assert!(controller.deactivate(&device).success);
    let path = device.clone().into_os_string();
    assert_eq!(
        executor.calls(),
        vec![
            vec![
                OsString::from("mkswap"),
                OsString::from("-f"),
                OsString::from("-L"),
                OsString::from("swap"),
                path.clone(),
            ],
            vec![OsString::from("swapoff"), path],
        ]
    );
}

#[test]
fn broken_alias_fails_status_query() {
    let sandbox = Sandbox::new();
    sandbox.registry(&[]);
    let status = SwapStatus::from_config(&sandbox.config);

    assert!(
        status
            .is_active(&sandbox.config.mapper_dir.join("missing"))
            .is_err()
    );
}

//! Contract repository fixtures.
//!
//! Each fixture owns a temporary directory laid out like a contract
//! repository (`contracts/<kind>/<name>/contract.json`).

use std::path::Path;

use serde_json::{json, Value};
use tempfile::TempDir;

use crate::core::contract::{ContractKind, ContractRepo, CONTRACT_FILE};
use crate::util::config::{ArchHeader, Config};

/// Builder for an on-disk contract repository.
pub struct ContractRepoFixture {
    dir: TempDir,
}

impl ContractRepoFixture {
    /// Create an empty repository (no `contracts/` directory yet).
    pub fn new() -> Self {
        ContractRepoFixture {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn repo(&self) -> ContractRepo {
        ContractRepo::new(self.dir.path())
    }

    /// Write `text` as the contract for `name`.
    pub fn raw(self, kind: ContractKind, name: &str, text: &str) -> Self {
        let dir = self.repo().contract_dir(kind, name);
        std::fs::create_dir_all(&dir).expect("failed to create contract dir");
        std::fs::write(dir.join(CONTRACT_FILE), text).expect("failed to write contract");
        self
    }

    /// Create a contract directory with no contract file in it.
    pub fn empty_dir(self, kind: ContractKind, name: &str) -> Self {
        std::fs::create_dir_all(self.repo().contract_dir(kind, name))
            .expect("failed to create contract dir");
        self
    }

    fn json(self, kind: ContractKind, name: &str, contract: Value) -> Self {
        let text = serde_json::to_string_pretty(&contract).expect("failed to serialize contract");
        self.raw(kind, name, &text)
    }

    pub fn device(self, slug: &str, name: &str, arch: &str) -> Self {
        self.json(
            ContractKind::DeviceType,
            slug,
            json!({ "slug": slug, "name": name, "data": { "arch": arch } }),
        )
    }

    /// An OS supporting `arches`, with one variant group listing `versions`.
    pub fn os(self, name: &str, arches: &[&str], versions: &[&str]) -> Self {
        let variants: Vec<Value> = versions.iter().map(|v| json!({ "version": v })).collect();
        self.json(
            ContractKind::Os,
            name,
            json!({
                "slug": name,
                "data": { "architectures": arches },
                "variants": [{ "variants": variants }]
            }),
        )
    }

    /// A language stack whose contract mentions `supports`.
    pub fn stack(self, name: &str, supports: &[&str]) -> Self {
        self.json(
            ContractKind::Stack,
            name,
            json!({ "slug": name, "data": { "supports": supports } }),
        )
    }

    /// A small repository covering the cases the page has to handle.
    ///
    /// - `python` does not run on armv7hf
    /// - `nodejs` does not run on alpine
    /// - `resinos` has no tags of its own
    /// - `generic` is excluded by [`Self::sample_config`]
    /// - `qemux86` has an architecture without a page section
    pub fn sample() -> Self {
        Self::new()
            .os("alpine", &["aarch64", "armv7hf", "amd64"], &["3.19", "edge"])
            .os("debian", &["aarch64", "armv7hf", "amd64"], &["bookworm", "bullseye"])
            .os("resinos", &["aarch64"], &["2.0"])
            .stack("python", &["aarch64", "amd64", "debian", "alpine"])
            .stack("nodejs", &["aarch64", "armv7hf", "amd64", "debian"])
            .device("raspberrypi3", "Raspberry Pi 3", "armv7hf")
            .device("beaglebone-black", "BeagleBone Black", "armv7hf")
            .device("generic-aarch64", "Generic AARCH64", "aarch64")
            .device("intel-nuc", "Intel NUC", "amd64")
            .device("generic", "Generic", "amd64")
            .device("qemux86", "QEMU X86 32bit", "i386")
    }

    /// Configuration matching [`Self::sample`], without a repository path.
    pub fn sample_config() -> Config {
        Config {
            headers: vec![
                ArchHeader::new("aarch64", "ARM v8"),
                ArchHeader::new("armv7hf", "ARM v7"),
                ArchHeader::new("amd64", "x86-64"),
            ],
            exclude: vec!["generic".to_string()],
            ..Config::default()
        }
    }

    /// [`Self::sample_config`] pointed at this repository.
    pub fn config(&self) -> Config {
        let mut config = Self::sample_config();
        config.repository.path = self.dir.path().to_path_buf();
        config
    }
}

impl Default for ContractRepoFixture {
    fn default() -> Self {
        Self::new()
    }
}

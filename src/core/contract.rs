//! Contract repository access.
//!
//! Contracts live under `<repo>/contracts/<kind>/<name>/contract.json`:
//! - `hw.device-type` - one contract per device
//! - `sw.os` - one contract per operating system
//! - `sw.stack` - one contract per language stack

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::util::fs::list_dirs;

/// File name of a contract inside its directory.
pub const CONTRACT_FILE: &str = "contract.json";

/// The three contract families the generator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    DeviceType,
    Os,
    Stack,
}

impl ContractKind {
    /// Directory name of this kind under `contracts/`.
    pub fn dir_name(self) -> &'static str {
        match self {
            ContractKind::DeviceType => "hw.device-type",
            ContractKind::Os => "sw.os",
            ContractKind::Stack => "sw.stack",
        }
    }
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractKind::DeviceType => write!(f, "device"),
            ContractKind::Os => write!(f, "operating system"),
            ContractKind::Stack => write!(f, "stack"),
        }
    }
}

/// Error while loading a single contract.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("{kind} contract `{name}` not found at {}", path.display())]
    Missing {
        kind: ContractKind,
        name: String,
        path: PathBuf,
    },

    #[error("failed to read {kind} contract `{name}` at {}", path.display())]
    Io {
        kind: ContractKind,
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {kind} contract `{name}` at {}", path.display())]
    Malformed {
        kind: ContractKind,
        name: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} contract `{name}` has no usable `{field}`")]
    MissingField {
        kind: ContractKind,
        name: String,
        field: String,
    },
}

impl ContractError {
    /// Path of the offending contract, when the error is tied to a file.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ContractError::Missing { path, .. }
            | ContractError::Io { path, .. }
            | ContractError::Malformed { path, .. } => Some(path),
            ContractError::MissingField { .. } => None,
        }
    }
}

/// The fields of a device contract the page needs.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceContract {
    pub slug: String,
    pub name: String,
    pub data: DeviceData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeviceData {
    pub arch: String,
}

/// A checked-out contract repository.
#[derive(Debug, Clone)]
pub struct ContractRepo {
    root: PathBuf,
}

impl ContractRepo {
    /// Open a contract repository rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ContractRepo { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every contract of `kind`.
    pub fn kind_dir(&self, kind: ContractKind) -> PathBuf {
        self.root.join("contracts").join(kind.dir_name())
    }

    pub fn contract_dir(&self, kind: ContractKind, name: &str) -> PathBuf {
        self.kind_dir(kind).join(name)
    }

    pub fn contract_path(&self, kind: ContractKind, name: &str) -> PathBuf {
        self.contract_dir(kind, name).join(CONTRACT_FILE)
    }

    /// Whether a contract directory exists for `name`.
    pub fn has_contract_dir(&self, kind: ContractKind, name: &str) -> bool {
        self.contract_dir(kind, name).is_dir()
    }

    /// Names of all contracts of `kind`, sorted.
    pub fn list(&self, kind: ContractKind) -> Result<Vec<String>> {
        list_dirs(&self.kind_dir(kind))
    }

    /// Read a contract as raw text.
    pub fn read_raw(&self, kind: ContractKind, name: &str) -> Result<String, ContractError> {
        let path = self.contract_path(kind, name);
        if !path.is_file() {
            return Err(ContractError::Missing {
                kind,
                name: name.to_string(),
                path,
            });
        }

        std::fs::read_to_string(&path).map_err(|source| ContractError::Io {
            kind,
            name: name.to_string(),
            path,
            source,
        })
    }

    /// Read and deserialize a contract.
    pub fn read_json<T: DeserializeOwned>(
        &self,
        kind: ContractKind,
        name: &str,
    ) -> Result<T, ContractError> {
        let raw = self.read_raw(kind, name)?;
        serde_json::from_str(&raw).map_err(|source| ContractError::Malformed {
            kind,
            name: name.to_string(),
            path: self.contract_path(kind, name),
            source,
        })
    }

    /// Read a device contract.
    pub fn read_device(&self, name: &str) -> Result<DeviceContract, ContractError> {
        self.read_json(ContractKind::DeviceType, name)
    }
}

//! Git source - the contract repository checkout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use git2::{build::RepoBuilder, Repository, ResetType};
use url::Url;

use crate::util::config::RepositoryConfig;
use crate::util::fs::ensure_dir;

/// A git checkout of the contract repository.
pub struct ContractSource {
    /// Remote repository URL
    remote: Url,

    /// Branch to track
    branch: String,

    /// Local checkout path
    checkout_path: PathBuf,
}

impl ContractSource {
    pub fn new(remote: Url, branch: impl Into<String>, checkout_path: impl Into<PathBuf>) -> Self {
        ContractSource {
            remote,
            branch: branch.into(),
            checkout_path: checkout_path.into(),
        }
    }

    /// Source for the repository described by the configuration.
    pub fn from_config(config: &RepositoryConfig) -> Result<Self> {
        let remote = Url::parse(&config.url)
            .with_context(|| format!("invalid contract repository URL: {}", config.url))?;
        Ok(Self::new(remote, &config.branch, &config.path))
    }

    pub fn checkout_path(&self) -> &Path {
        &self.checkout_path
    }

    /// Clone or update the checkout. Returns the checked out commit.
    pub fn fetch(&self) -> Result<String> {
        if self.checkout_path.join(".git").exists() {
            self.update()
        } else {
            self.clone_fresh()
        }
    }

    fn clone_fresh(&self) -> Result<String> {
        tracing::info!("Cloning {} ({})", self.remote, self.branch);

        if let Some(parent) = self.checkout_path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir(parent)?;
            }
        }

        let repo = RepoBuilder::new()
            .branch(&self.branch)
            .clone(self.remote.as_str(), &self.checkout_path)
            .with_context(|| format!("failed to clone {}", self.remote))?;

        let head = repo.head()?.peel_to_commit()?;
        Ok(head.id().to_string())
    }

    fn update(&self) -> Result<String> {
        tracing::info!("Updating {} ({})", self.remote, self.branch);

        let repo = Repository::open(&self.checkout_path).with_context(|| {
            format!(
                "failed to open git repository: {}",
                self.checkout_path.display()
            )
        })?;

        let mut remote = repo.find_remote("origin")?;
        remote
            .fetch(&[self.branch.as_str()], None, None)
            .with_context(|| format!("failed to fetch {} from {}", self.branch, self.remote))?;

        // Hard reset to what was just fetched
        let commit = repo.find_reference("FETCH_HEAD")?.peel_to_commit()?;
        repo.reset(commit.as_object(), ResetType::Hard, None)?;

        Ok(commit.id().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use tempfile::TempDir;

    const CONTRACT: &str = "contracts/sw.os/debian/contract.json";

    /// Commit `contents` as the debian contract in `repo`.
    fn commit(repo: &Repository, contents: &str) -> String {
        let workdir = repo.workdir().unwrap();
        std::fs::create_dir_all(workdir.join("contracts/sw.os/debian")).unwrap();
        std::fs::write(workdir.join(CONTRACT), contents).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(CONTRACT)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

        let sig = Signature::now("imageref", "imageref@example.com").unwrap();
        let parent = repo.head().ok().map(|h| h.peel_to_commit().unwrap());
        let parents: Vec<_> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, "update contracts", &tree, &parents)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_from_config_rejects_bad_url() {
        let config = RepositoryConfig {
            url: "not a url".to_string(),
            ..RepositoryConfig::default()
        };
        assert!(ContractSource::from_config(&config).is_err());
    }

    #[test]
    fn test_clone_then_update() {
        let upstream_dir = TempDir::new().unwrap();
        let upstream = Repository::init(upstream_dir.path()).unwrap();
        let first = commit(&upstream, r#"{"slug": "debian"}"#);
        let branch = upstream.head().unwrap().shorthand().unwrap().to_string();

        let work = TempDir::new().unwrap();
        let checkout = work.path().join("contracts-repo");
        let source = ContractSource::new(
            Url::from_directory_path(upstream_dir.path()).unwrap(),
            branch,
            &checkout,
        );

        assert_eq!(source.fetch().unwrap(), first);
        assert_eq!(
            std::fs::read_to_string(checkout.join(CONTRACT)).unwrap(),
            r#"{"slug": "debian"}"#
        );

        let second = commit(&upstream, r#"{"slug": "debian", "variants": []}"#);
        assert_eq!(source.fetch().unwrap(), second);
        assert_eq!(
            std::fs::read_to_string(checkout.join(CONTRACT)).unwrap(),
            r#"{"slug": "debian", "variants": []}"#
        );
    }
}

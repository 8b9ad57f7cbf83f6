//! Best-effort mirror of question packs from a remote source.
//!
//! The remote publishes `manifest.json` listing every file with its SHA-256.
//! Local files with a different hash, or missing locally, are downloaded;
//! local files absent from the manifest are removed. Paths matching the
//! ignore list are never touched. Network failures degrade to offline mode.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::time::Duration as StdDuration;

use glob::Pattern;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::SyncError;

/// Name of the remote manifest, relative to the base URL.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Tooling and output paths that sync never downloads over or removes.
pub const DEFAULT_IGNORE: &[&str] = &[".git/**", "*.log", "results.txt", ".DS_Store"];

const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(10);

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct SyncConfig {
    base_url: String,
    ignore: Vec<String>,
    timeout: StdDuration,
}

impl SyncConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ignore: DEFAULT_IGNORE.iter().map(|p| (*p).to_owned()).collect(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = ignore;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

//
// ─── MANIFEST & PLAN ───────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteFile {
    pub path: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteManifest {
    pub files: Vec<RemoteFile>,
}

/// Compiled ignore patterns, matched against `/`-separated relative paths.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    patterns: Vec<Pattern>,
}

impl IgnoreList {
    /// # Errors
    ///
    /// Returns `SyncError::IgnorePattern` for an invalid glob.
    pub fn compile(patterns: &[String]) -> Result<Self, SyncError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| SyncError::IgnorePattern {
                    pattern: p.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// A path is ignored when it, or any of its parent directories, matches.
    #[must_use]
    pub fn is_ignored(&self, path: &str) -> bool {
        let mut prefix = String::new();
        for segment in path.split('/') {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(segment);
            if self.patterns.iter().any(|p| p.matches(&prefix)) {
                return true;
            }
        }
        false
    }
}

/// Work needed to make the local tree match the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub download: Vec<RemoteFile>,
    pub remove: Vec<String>,
    pub unchanged: usize,
}

/// Diff local hashes against the manifest.
#[must_use]
pub fn plan_sync(
    local: &BTreeMap<String, String>,
    remote: &RemoteManifest,
    ignore: &IgnoreList,
) -> SyncPlan {
    let mut plan = SyncPlan::default();
    let mut listed = BTreeMap::new();

    for file in &remote.files {
        if ignore.is_ignored(&file.path) {
            continue;
        }
        listed.insert(file.path.as_str(), ());
        match local.get(&file.path) {
            Some(hash) if hash.eq_ignore_ascii_case(&file.sha256) => plan.unchanged += 1,
            _ => plan.download.push(file.clone()),
        }
    }

    plan.remove = local
        .keys()
        .filter(|path| !listed.contains_key(path.as_str()) && !ignore.is_ignored(path))
        .cloned()
        .collect();
    plan
}

/// Reject manifest paths that could escape the sync root.
///
/// # Errors
///
/// Returns `SyncError::UnsafePath` for absolute paths, `..`, or empty segments.
pub fn validate_remote_path(path: &str) -> Result<PathBuf, SyncError> {
    let unsafe_path = || SyncError::UnsafePath(path.to_owned());
    if path.is_empty() || path.starts_with('/') || path.contains('\\') {
        return Err(unsafe_path());
    }
    if path.split('/').any(|s| s.is_empty() || s == "." || s == "..") {
        return Err(unsafe_path());
    }
    let relative = PathBuf::from(path);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return Err(unsafe_path());
    }
    Ok(relative)
}

/// Hash every non-ignored file under `root`, keyed by `/`-separated relative path.
///
/// A missing root yields an empty map.
///
/// # Errors
///
/// Returns `SyncError::Io` if a file cannot be read.
pub fn scan_local(root: &Path, ignore: &IgnoreList) -> Result<BTreeMap<String, String>, SyncError> {
    let mut hashes = BTreeMap::new();
    if !root.exists() {
        return Ok(hashes);
    }
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(|e| SyncError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let key = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if ignore.is_ignored(&key) {
            continue;
        }
        let bytes = std::fs::read(entry.path())?;
        hashes.insert(key, sha256_hex(&bytes));
    }
    Ok(hashes)
}

#[must_use]
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

//
// ─── REPORT ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// No remote configured, or offline mode requested.
    Disabled,
    Online,
    /// The remote could not be reached; local data is used as is.
    Offline { reason: String },
    /// Sync could not run for a local reason.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub status: SyncStatus,
    pub downloaded: Vec<String>,
    pub removed: Vec<String>,
    pub unchanged: usize,
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    fn with_status(status: SyncStatus) -> Self {
        Self {
            status,
            downloaded: Vec::new(),
            removed: Vec::new(),
            unchanged: 0,
            failures: Vec::new(),
        }
    }
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct RemoteSyncService {
    root: PathBuf,
    config: Option<SyncConfig>,
}

impl RemoteSyncService {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, config: Option<SyncConfig>) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Mirror the remote into the local root. Never fails; see the report status.
    pub async fn sync(&self) -> SyncReport {
        let Some(config) = self.config.as_ref() else {
            return SyncReport::with_status(SyncStatus::Disabled);
        };

        match self.try_sync(config).await {
            Ok(report) => {
                info!(
                    downloaded = report.downloaded.len(),
                    removed = report.removed.len(),
                    unchanged = report.unchanged,
                    failures = report.failures.len(),
                    "remote sync finished"
                );
                report
            }
            Err(err @ (SyncError::Http(_) | SyncError::HttpStatus(_))) => {
                warn!(error = %err, "remote unavailable, continuing offline");
                SyncReport::with_status(SyncStatus::Offline {
                    reason: err.to_string(),
                })
            }
            Err(err) => {
                warn!(error = %err, "remote sync skipped");
                SyncReport::with_status(SyncStatus::Failed {
                    reason: err.to_string(),
                })
            }
        }
    }

    async fn try_sync(&self, config: &SyncConfig) -> Result<SyncReport, SyncError> {
        let ignore = IgnoreList::compile(config.ignore())?;
        let client = Client::builder().timeout(config.timeout).build()?;

        let manifest: RemoteManifest = {
            let response = client.get(config.url_for(MANIFEST_FILE)).send().await?;
            if !response.status().is_success() {
                return Err(SyncError::HttpStatus(response.status()));
            }
            response.json().await?
        };

        let local = scan_local(&self.root, &ignore)?;
        let plan = plan_sync(&local, &manifest, &ignore);
        debug!(
            download = plan.download.len(),
            remove = plan.remove.len(),
            "sync plan ready"
        );

        let mut report = SyncReport::with_status(SyncStatus::Online);
        report.unchanged = plan.unchanged;

        for file in plan.download {
            match self.download(&client, config, &file).await {
                Ok(()) => report.downloaded.push(file.path),
                Err(err) => {
                    warn!(path = %file.path, error = %err, "download failed");
                    report.failures.push(SyncFailure {
                        path: file.path,
                        reason: err.to_string(),
                    });
                }
            }
        }

        for path in plan.remove {
            match tokio::fs::remove_file(self.root.join(&path)).await {
                Ok(()) => report.removed.push(path),
                Err(err) => {
                    warn!(%path, error = %err, "could not remove stale file");
                    report.failures.push(SyncFailure {
                        path,
                        reason: err.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    async fn download(
        &self,
        client: &Client,
        config: &SyncConfig,
        file: &RemoteFile,
    ) -> Result<(), SyncError> {
        let relative = validate_remote_path(&file.path)?;
        let response = client.get(config.url_for(&file.path)).send().await?;
        if !response.status().is_success() {
            return Err(SyncError::HttpStatus(response.status()));
        }
        let bytes = response.bytes().await?;
        if !sha256_hex(&bytes).eq_ignore_ascii_case(&file.sha256) {
            return Err(SyncError::HashMismatch {
                path: file.path.clone(),
            });
        }

        let target = self.root.join(relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;
        debug!(path = %file.path, "file updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ignore(patterns: &[&str]) -> IgnoreList {
        let owned: Vec<String> = patterns.iter().map(|p| (*p).to_owned()).collect();
        IgnoreList::compile(&owned).unwrap()
    }

    fn remote(files: &[(&str, &str)]) -> RemoteManifest {
        RemoteManifest {
            files: files
                .iter()
                .map(|(path, sha)| RemoteFile {
                    path: (*path).to_owned(),
                    sha256: (*sha).to_owned(),
                })
                .collect(),
        }
    }

    #[test]
    fn plan_downloads_changed_and_new_and_removes_stale() {
        let local: BTreeMap<String, String> = [
            ("siem/questions.json", "aaa"),
            ("net/questions.json", "old"),
            ("legacy/questions.json", "zzz"),
            ("results.txt", "log"),
        ]
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
        let manifest = remote(&[
            ("siem/questions.json", "AAA"),
            ("net/questions.json", "new"),
            ("cloud/questions.json", "ccc"),
        ]);

        let plan = plan_sync(&local, &manifest, &ignore(DEFAULT_IGNORE));

        let downloads: Vec<&str> = plan.download.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(downloads, vec!["net/questions.json", "cloud/questions.json"]);
        assert_eq!(plan.remove, vec!["legacy/questions.json".to_owned()]);
        assert_eq!(plan.unchanged, 1);
    }

    #[test]
    fn ignored_remote_entries_are_skipped() {
        let manifest = remote(&[(".git/config", "x"), ("debug.log", "y")]);
        let plan = plan_sync(&BTreeMap::new(), &manifest, &ignore(DEFAULT_IGNORE));
        assert!(plan.download.is_empty());
    }

    #[test]
    fn ignore_matches_parent_directories() {
        let list = ignore(&["target", "drafts/**"]);
        assert!(list.is_ignored("target/debug/quiz"));
        assert!(list.is_ignored("drafts/a/b.json"));
        assert!(!list.is_ignored("siem/questions.json"));
    }

    #[test]
    fn invalid_ignore_pattern_is_reported() {
        let err = IgnoreList::compile(&["[".to_owned()]).unwrap_err();
        assert!(matches!(err, SyncError::IgnorePattern { .. }));
    }

    #[test]
    fn remote_paths_cannot_escape_root() {
        assert!(validate_remote_path("siem/questions.json").is_ok());
        for bad in ["", "/etc/passwd", "../x", "a/../b", "a//b", "a\\b", "./a"] {
            assert!(validate_remote_path(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn scan_hashes_files_with_forward_slash_keys() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("siem")).unwrap();
        std::fs::write(tmp.path().join("siem").join("questions.json"), b"[]").unwrap();
        std::fs::write(tmp.path().join("session.log"), b"noise").unwrap();

        let hashes = scan_local(tmp.path(), &ignore(DEFAULT_IGNORE)).unwrap();

        assert_eq!(hashes.len(), 1);
        assert_eq!(hashes["siem/questions.json"], sha256_hex(b"[]"));
    }

    #[test]
    fn scan_of_missing_root_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let hashes = scan_local(&tmp.path().join("absent"), &IgnoreList::default()).unwrap();
        assert!(hashes.is_empty());
    }

    #[tokio::test]
    async fn disabled_sync_reports_disabled() {
        let service = RemoteSyncService::new("courses", None);
        let report = service.sync().await;
        assert_eq!(report.status, SyncStatus::Disabled);
    }

    #[tokio::test]
    async fn unreachable_remote_degrades_to_offline() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("keep.json"), b"[]").unwrap();
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = SyncConfig::new(format!("http://{addr}"))
            .with_timeout(StdDuration::from_secs(2));
        let service = RemoteSyncService::new(tmp.path(), Some(config));
        let report = service.sync().await;

        assert!(matches!(report.status, SyncStatus::Offline { .. }));
        assert!(tmp.path().join("keep.json").exists());
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use sentinel_core::Error;

use crate::fs::{ArchiveFs, DirEntry};

/// Transient category folder → durable bank path (forward-slash separated).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryMapping {
    pub category: String,
    pub bank_path: String,
}

/// How sources are removed after copying.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RelocationPolicy {
    /// Delete each source only after its destination is confirmed.
    #[default]
    Verified,
    /// Copy everything, then wipe the transient root (minus VCS entries).
    BatchPurge,
}

impl FromStr for RelocationPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verified" => Ok(RelocationPolicy::Verified),
            "batch" | "batch_purge" | "batch-purge" => Ok(RelocationPolicy::BatchPurge),
            other => Err(Error::Config(format!(
                "unknown relocation policy '{other}' (expected verified or batch)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ArchiveConfig {
    pub transient_root: String,
    pub bank_root: String,
    pub mappings: Vec<CategoryMapping>,
    pub policy: RelocationPolicy,
    /// Entries of the transient root whose name starts with this survive a purge.
    pub vcs_marker: String,
    pub extension: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            transient_root: "data".to_string(),
            bank_root: "central_bank".to_string(),
            mappings: vec![CategoryMapping {
                category: "tech".to_string(),
                bank_path: "github/tech".to_string(),
            }],
            policy: RelocationPolicy::Verified,
            vcs_marker: ".git".to_string(),
            extension: "json".to_string(),
        }
    }
}

// ── Report ──

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Copied, confirmed, source deleted.
    Moved,
    /// Copied but not confirmed; source left in place.
    Retained,
    /// Copied; source awaits the bulk purge.
    Copied,
    /// An I/O step failed; see the report's errors.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub name: String,
    pub status: FileStatus,
}

/// Terminal state of one category/date partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionState {
    /// No artifacts; nothing created on the durable side.
    Skipped,
    /// Verified policy, every source deleted.
    SourceDeleted,
    /// Verified policy, at least one source still present.
    PartiallyRetained,
    /// Batch policy, copies done; the root purge follows.
    PendingBulkDelete,
    /// Listing the partition or creating its destination failed.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionOutcome {
    pub category: String,
    pub date: String,
    pub destination: PathBuf,
    pub state: PartitionState,
    pub files: Vec<FileOutcome>,
}

#[derive(Debug, Default)]
pub struct ArchiveReport {
    pub partitions: Vec<PartitionOutcome>,
    /// Per-item failures; none of them abort the run.
    pub errors: Vec<Error>,
    /// Entries removed from the transient root by the batch purge.
    pub purged: Option<usize>,
}

impl ArchiveReport {
    pub fn count(&self, status: FileStatus) -> usize {
        self.partitions
            .iter()
            .flat_map(|p| &p.files)
            .filter(|f| f.status == status)
            .count()
    }
}

// ── Mover ──

/// Relocates dated artifacts from the transient tree into the bank.
///
/// Assumes exclusive ownership of both trees for the duration of `run`;
/// concurrent movers over the same roots are not coordinated.
pub struct ArchiveMover<F> {
    fs: F,
    transient_root: PathBuf,
    bank_root: PathBuf,
    mappings: Vec<CategoryMapping>,
    policy: RelocationPolicy,
    vcs_marker: String,
    extension: String,
    date: Option<String>,
}

impl<F: ArchiveFs> ArchiveMover<F> {
    /// Roots in `config` are resolved relative to `base`.
    pub fn new(fs: F, base: &Path, config: &ArchiveConfig) -> Self {
        Self {
            fs,
            transient_root: join_rel(base, &config.transient_root),
            bank_root: join_rel(base, &config.bank_root),
            mappings: config.mappings.clone(),
            policy: config.policy,
            vcs_marker: config.vcs_marker.clone(),
            extension: config.extension.trim_start_matches('.').to_string(),
            date: None,
        }
    }

    pub fn with_policy(mut self, policy: RelocationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Restrict relocation to one `YYYY-MM-DD` partition. Under the batch
    /// policy only the relocated partition folders are purged.
    pub fn with_date(mut self, date: Option<String>) -> Self {
        self.date = date;
        self
    }

    /// Neither root may contain the other.
    pub fn check_roots(&self) -> sentinel_core::Result<()> {
        if self.bank_root.starts_with(&self.transient_root)
            || self.transient_root.starts_with(&self.bank_root)
        {
            return Err(Error::Config(format!(
                "transient root {} and bank root {} overlap",
                self.transient_root.display(),
                self.bank_root.display()
            )));
        }
        Ok(())
    }

    pub fn run(&self) -> ArchiveReport {
        let mut report = ArchiveReport::default();
        if let Err(e) = self.check_roots() {
            tracing::warn!(error = %e, "archive run refused");
            report.errors.push(e);
            return report;
        }

        for mapping in &self.mappings {
            let category_dir = self.transient_root.join(&mapping.category);
            if !self.fs.exists(&category_dir) {
                tracing::debug!(category = %mapping.category, "no transient category directory");
                continue;
            }
            let entries = match self.fs.list_dir(&category_dir) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!(category = %mapping.category, error = %e, "category listing failed");
                    report.errors.push(e);
                    continue;
                }
            };
            for entry in entries.into_iter().filter(|e| e.is_dir) {
                if self.date.as_ref().is_some_and(|d| *d != entry.name) {
                    continue;
                }
                let outcome = self.relocate_partition(mapping, &entry, &mut report.errors);
                report.partitions.push(outcome);
            }
        }

        if self.policy == RelocationPolicy::BatchPurge {
            let purged = match self.date {
                Some(_) => self.purge_partitions(&report.partitions, &mut report.errors),
                None => self.purge(&mut report.errors),
            };
            report.purged = Some(purged);
        }

        tracing::info!(
            policy = ?self.policy,
            partitions = report.partitions.len(),
            moved = report.count(FileStatus::Moved),
            copied = report.count(FileStatus::Copied),
            retained = report.count(FileStatus::Retained),
            failed = report.count(FileStatus::Failed),
            errors = report.errors.len(),
            "archive run finished"
        );
        report
    }

    fn relocate_partition(
        &self,
        mapping: &CategoryMapping,
        partition: &DirEntry,
        errors: &mut Vec<Error>,
    ) -> PartitionOutcome {
        let destination = join_rel(&self.bank_root, &mapping.bank_path).join(&partition.name);
        let mut outcome = PartitionOutcome {
            category: mapping.category.clone(),
            date: partition.name.clone(),
            destination: destination.clone(),
            state: PartitionState::Skipped,
            files: Vec::new(),
        };

        let artifacts: Vec<DirEntry> = match self.fs.list_dir(&partition.path) {
            Ok(entries) => entries
                .into_iter()
                .filter(|e| !e.is_dir && self.is_artifact(&e.name))
                .collect(),
            Err(e) => {
                tracing::warn!(category = %mapping.category, date = %partition.name, error = %e, "partition listing failed");
                errors.push(e);
                outcome.state = PartitionState::Failed;
                return outcome;
            }
        };
        if artifacts.is_empty() {
            tracing::debug!(category = %mapping.category, date = %partition.name, "no artifacts; skipped");
            return outcome;
        }

        if let Err(e) = self.fs.create_dir_all(&destination) {
            tracing::warn!(destination = %destination.display(), error = %e, "cannot create bank directory");
            errors.push(e);
            outcome.state = PartitionState::Failed;
            return outcome;
        }

        for artifact in &artifacts {
            let target = destination.join(&artifact.name);
            let status = match self.policy {
                RelocationPolicy::Verified => self.verified_move(&artifact.path, &target, errors),
                RelocationPolicy::BatchPurge => self.copy_only(&artifact.path, &target, errors),
            };
            outcome.files.push(FileOutcome {
                name: artifact.name.clone(),
                status,
            });
        }

        outcome.state = match self.policy {
            RelocationPolicy::Verified
                if outcome.files.iter().all(|f| f.status == FileStatus::Moved) =>
            {
                PartitionState::SourceDeleted
            }
            RelocationPolicy::Verified => PartitionState::PartiallyRetained,
            RelocationPolicy::BatchPurge => PartitionState::PendingBulkDelete,
        };
        outcome
    }

    fn verified_move(&self, src: &Path, dst: &Path, errors: &mut Vec<Error>) -> FileStatus {
        if let Err(e) = self.fs.copy(src, dst) {
            tracing::warn!(src = %src.display(), error = %e, "copy failed; source kept");
            errors.push(e);
            return FileStatus::Failed;
        }
        if !self.confirmed(src, dst) {
            tracing::warn!(src = %src.display(), dst = %dst.display(), "destination not confirmed; source kept");
            return FileStatus::Retained;
        }
        match self.fs.remove_file(src) {
            Ok(()) => {
                tracing::info!(src = %src.display(), dst = %dst.display(), "moved");
                FileStatus::Moved
            }
            Err(e) => {
                tracing::warn!(src = %src.display(), error = %e, "source delete failed");
                errors.push(e);
                FileStatus::Failed
            }
        }
    }

    /// Destination exists and holds the same bytes as the source.
    fn confirmed(&self, src: &Path, dst: &Path) -> bool {
        if !self.fs.exists(dst) {
            return false;
        }
        match (self.fs.read(src), self.fs.read(dst)) {
            (Ok(a), Ok(b)) => blake3::hash(&a) == blake3::hash(&b),
            _ => false,
        }
    }

    fn copy_only(&self, src: &Path, dst: &Path, errors: &mut Vec<Error>) -> FileStatus {
        match self.fs.copy(src, dst) {
            Ok(_) => {
                tracing::info!(src = %src.display(), dst = %dst.display(), "copied");
                FileStatus::Copied
            }
            Err(e) => {
                tracing::warn!(src = %src.display(), error = %e, "copy failed");
                errors.push(e);
                FileStatus::Failed
            }
        }
    }

    /// Remove every transient-root entry except VCS metadata. Returns the
    /// number of entries removed.
    fn purge(&self, errors: &mut Vec<Error>) -> usize {
        if !self.fs.exists(&self.transient_root) {
            return 0;
        }
        let entries = match self.fs.list_dir(&self.transient_root) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(root = %self.transient_root.display(), error = %e, "purge listing failed");
                errors.push(e);
                return 0;
            }
        };

        let mut removed = 0;
        for entry in entries {
            if !self.vcs_marker.is_empty() && entry.name.starts_with(&self.vcs_marker) {
                continue;
            }
            let result = if entry.is_dir {
                self.fs.remove_dir_all(&entry.path)
            } else {
                self.fs.remove_file(&entry.path)
            };
            match result {
                Ok(()) => removed += 1,
                Err(e) => {
                    tracing::warn!(path = %entry.path.display(), error = %e, "purge failed");
                    errors.push(e);
                }
            }
        }
        tracing::info!(root = %self.transient_root.display(), removed, "transient root purged");
        removed
    }

    /// Remove the transient folders of partitions copied in this run.
    fn purge_partitions(&self, partitions: &[PartitionOutcome], errors: &mut Vec<Error>) -> usize {
        let mut removed = 0;
        for p in partitions
            .iter()
            .filter(|p| p.state == PartitionState::PendingBulkDelete)
        {
            let dir = self.transient_root.join(&p.category).join(&p.date);
            match self.fs.remove_dir_all(&dir) {
                Ok(()) => removed += 1,
                Err(e) => {
                    tracing::warn!(path = %dir.display(), error = %e, "purge failed");
                    errors.push(e);
                }
            }
        }
        tracing::info!(removed, "relocated partitions purged");
        removed
    }

    fn is_artifact(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension.as_str()))
    }
}

fn join_rel(base: &Path, rel: &str) -> PathBuf {
    rel.split('/')
        .filter(|seg| !seg.is_empty())
        .fold(base.to_path_buf(), |acc, seg| acc.join(seg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::StdFs;
    use std::fs;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn mover<F: ArchiveFs>(fs: F, base: &Path, policy: RelocationPolicy) -> ArchiveMover<F> {
        ArchiveMover::new(fs, base, &ArchiveConfig::default()).with_policy(policy)
    }

    fn sorted_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    /// Reports a successful copy without writing anything.
    struct SilentCopyFs;

    impl ArchiveFs for SilentCopyFs {
        fn exists(&self, path: &Path) -> bool {
            StdFs.exists(path)
        }
        fn list_dir(&self, path: &Path) -> sentinel_core::Result<Vec<DirEntry>> {
            StdFs.list_dir(path)
        }
        fn create_dir_all(&self, path: &Path) -> sentinel_core::Result<()> {
            StdFs.create_dir_all(path)
        }
        fn copy(&self, from: &Path, _to: &Path) -> sentinel_core::Result<u64> {
            Ok(StdFs.read(from)?.len() as u64)
        }
        fn read(&self, path: &Path) -> sentinel_core::Result<Vec<u8>> {
            StdFs.read(path)
        }
        fn remove_file(&self, path: &Path) -> sentinel_core::Result<()> {
            StdFs.remove_file(path)
        }
        fn remove_dir_all(&self, path: &Path) -> sentinel_core::Result<()> {
            StdFs.remove_dir_all(path)
        }
    }

    /// Fails copies of one file name and listings of one directory name.
    struct FlakyFs {
        fail_copy: &'static str,
        fail_list: &'static str,
    }

    fn io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")
    }

    impl ArchiveFs for FlakyFs {
        fn exists(&self, path: &Path) -> bool {
            StdFs.exists(path)
        }
        fn list_dir(&self, path: &Path) -> sentinel_core::Result<Vec<DirEntry>> {
            if path.file_name().is_some_and(|n| n == self.fail_list) {
                return Err(Error::fs("read_dir", path, io_err()));
            }
            StdFs.list_dir(path)
        }
        fn create_dir_all(&self, path: &Path) -> sentinel_core::Result<()> {
            StdFs.create_dir_all(path)
        }
        fn copy(&self, from: &Path, to: &Path) -> sentinel_core::Result<u64> {
            if from.file_name().is_some_and(|n| n == self.fail_copy) {
                return Err(Error::fs("copy", from, io_err()));
            }
            StdFs.copy(from, to)
        }
        fn read(&self, path: &Path) -> sentinel_core::Result<Vec<u8>> {
            StdFs.read(path)
        }
        fn remove_file(&self, path: &Path) -> sentinel_core::Result<()> {
            StdFs.remove_file(path)
        }
        fn remove_dir_all(&self, path: &Path) -> sentinel_core::Result<()> {
            StdFs.remove_dir_all(path)
        }
    }

    #[test]
    fn batch_purge_relocates_and_empties_transient_root() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        write(&base.join("data/tech/2025-06-01/a.json"), r#"{"a":1}"#);
        write(&base.join("data/tech/2025-06-01/b.json"), r#"{"b":2}"#);
        write(&base.join("data/.gitkeep"), "");

        let report = mover(StdFs, base, RelocationPolicy::BatchPurge).run();

        let bank = base.join("central_bank/github/tech/2025-06-01");
        assert_eq!(sorted_names(&bank), ["a.json", "b.json"]);
        assert_eq!(fs::read_to_string(bank.join("a.json")).unwrap(), r#"{"a":1}"#);
        assert_eq!(fs::read_to_string(bank.join("b.json")).unwrap(), r#"{"b":2}"#);
        assert_eq!(sorted_names(&base.join("data")), [".gitkeep"]);
        assert_eq!(report.purged, Some(1));
        assert_eq!(report.partitions[0].state, PartitionState::PendingBulkDelete);
        assert_eq!(report.count(FileStatus::Copied), 2);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn newer_transient_artifact_overwrites_bank() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        write(&base.join("central_bank/github/tech/2025-06-01/a.json"), "old");
        write(&base.join("data/tech/2025-06-01/a.json"), "newer");

        for policy in [RelocationPolicy::Verified, RelocationPolicy::BatchPurge] {
            write(&base.join("data/tech/2025-06-01/a.json"), "newer");
            mover(StdFs, base, policy).run();
            assert_eq!(
                fs::read_to_string(base.join("central_bank/github/tech/2025-06-01/a.json")).unwrap(),
                "newer"
            );
        }
    }

    #[test]
    fn verified_move_deletes_only_confirmed_sources() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        write(&base.join("data/tech/2025-06-01/a.json"), "A");
        write(&base.join("data/tech/2025-06-02/b.json"), "B");
        write(&base.join("data/tech/2025-06-02/notes.txt"), "ignored");

        let report = mover(StdFs, base, RelocationPolicy::Verified).run();

        assert!(!base.join("data/tech/2025-06-01/a.json").exists());
        assert!(!base.join("data/tech/2025-06-02/b.json").exists());
        assert!(base.join("data/tech/2025-06-02/notes.txt").exists());
        assert!(!base.join("central_bank/github/tech/2025-06-02/notes.txt").exists());
        assert_eq!(
            fs::read_to_string(base.join("central_bank/github/tech/2025-06-02/b.json")).unwrap(),
            "B"
        );
        assert_eq!(report.count(FileStatus::Moved), 2);
        assert!(report
            .partitions
            .iter()
            .all(|p| p.state == PartitionState::SourceDeleted));
        assert_eq!(report.purged, None);
        // date folders stay behind under the verified policy
        assert!(base.join("data/tech/2025-06-01").is_dir());
    }

    #[test]
    fn unconfirmed_copy_keeps_source() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        write(&base.join("data/tech/2025-06-01/a.json"), "A");

        let report = mover(SilentCopyFs, base, RelocationPolicy::Verified).run();

        assert_eq!(fs::read_to_string(base.join("data/tech/2025-06-01/a.json")).unwrap(), "A");
        assert!(!base.join("central_bank/github/tech/2025-06-01/a.json").exists());
        assert_eq!(report.count(FileStatus::Retained), 1);
        assert_eq!(report.partitions[0].state, PartitionState::PartiallyRetained);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn stale_destination_never_paired_with_deleted_source() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        write(&base.join("central_bank/github/tech/2025-06-01/a.json"), "stale");
        write(&base.join("data/tech/2025-06-01/a.json"), "fresh");

        mover(SilentCopyFs, base, RelocationPolicy::Verified).run();

        // copy silently did nothing, so the stale bank copy must not let the source go
        assert!(base.join("data/tech/2025-06-01/a.json").exists());
        assert_eq!(
            fs::read_to_string(base.join("central_bank/github/tech/2025-06-01/a.json")).unwrap(),
            "stale"
        );
    }

    #[test]
    fn copy_failure_is_per_item() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        write(&base.join("data/tech/2025-06-01/a.json"), "A");
        write(&base.join("data/tech/2025-06-01/b.json"), "B");

        let flaky = FlakyFs {
            fail_copy: "a.json",
            fail_list: "",
        };
        let report = mover(flaky, base, RelocationPolicy::Verified).run();

        assert!(base.join("data/tech/2025-06-01/a.json").exists());
        assert!(!base.join("data/tech/2025-06-01/b.json").exists());
        assert!(base.join("central_bank/github/tech/2025-06-01/b.json").exists());
        assert_eq!(report.count(FileStatus::Failed), 1);
        assert_eq!(report.count(FileStatus::Moved), 1);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn category_listing_failure_skips_only_that_category() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        write(&base.join("data/tech/2025-06-01/a.json"), "A");
        write(&base.join("data/jobs/2025-06-01/j.json"), "J");

        let config = ArchiveConfig {
            mappings: vec![
                CategoryMapping {
                    category: "tech".to_string(),
                    bank_path: "github/tech".to_string(),
                },
                CategoryMapping {
                    category: "jobs".to_string(),
                    bank_path: "github".to_string(),
                },
            ],
            ..ArchiveConfig::default()
        };
        let flaky = FlakyFs {
            fail_copy: "",
            fail_list: "tech",
        };
        let report = ArchiveMover::new(flaky, base, &config).run();

        assert_eq!(report.errors.len(), 1);
        assert!(base.join("data/tech/2025-06-01/a.json").exists());
        assert_eq!(
            fs::read_to_string(base.join("central_bank/github/2025-06-01/j.json")).unwrap(),
            "J"
        );
    }

    #[test]
    fn empty_partition_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        fs::create_dir_all(base.join("data/tech/2025-06-01")).unwrap();
        write(&base.join("data/tech/stray.json"), "not in a date folder");

        let report = mover(StdFs, base, RelocationPolicy::Verified).run();

        assert_eq!(report.partitions.len(), 1);
        assert_eq!(report.partitions[0].state, PartitionState::Skipped);
        assert!(!base.join("central_bank").exists());
        assert!(base.join("data/tech/stray.json").exists());
    }

    #[test]
    fn missing_transient_root_is_a_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let report = mover(StdFs, tmp.path(), RelocationPolicy::BatchPurge).run();
        assert!(report.partitions.is_empty());
        assert!(report.errors.is_empty());
        assert_eq!(report.purged, Some(0));
    }

    #[test]
    fn rerun_without_deletion_is_content_stable() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        write(&base.join("data/tech/2025-06-01/a.json"), r#"{"v":1}"#);

        mover(StdFs, base, RelocationPolicy::BatchPurge).run();
        let first = fs::read(base.join("central_bank/github/tech/2025-06-01/a.json")).unwrap();
        // same transient content shows up again
        write(&base.join("data/tech/2025-06-01/a.json"), r#"{"v":1}"#);
        mover(StdFs, base, RelocationPolicy::BatchPurge).run();
        let second = fs::read(base.join("central_bank/github/tech/2025-06-01/a.json")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn date_filter_limits_partitions() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        write(&base.join("data/tech/2025-06-01/a.json"), "A");
        write(&base.join("data/tech/2025-06-02/b.json"), "B");

        let report = mover(StdFs, base, RelocationPolicy::Verified)
            .with_date(Some("2025-06-02".to_string()))
            .run();

        assert_eq!(report.partitions.len(), 1);
        assert_eq!(report.partitions[0].date, "2025-06-02");
        assert!(base.join("data/tech/2025-06-01/a.json").exists());
        assert!(!base.join("central_bank/github/tech/2025-06-01").exists());
    }

    #[test]
    fn date_filtered_batch_purge_keeps_other_partitions() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        write(&base.join("data/tech/2025-06-01/a.json"), "A");
        write(&base.join("data/tech/2025-06-02/b.json"), "B");

        let report = mover(StdFs, base, RelocationPolicy::BatchPurge)
            .with_date(Some("2025-06-02".to_string()))
            .run();

        assert_eq!(fs::read_to_string(base.join("data/tech/2025-06-01/a.json")).unwrap(), "A");
        assert!(!base.join("data/tech/2025-06-02").exists());
        assert_eq!(
            fs::read_to_string(base.join("central_bank/github/tech/2025-06-02/b.json")).unwrap(),
            "B"
        );
        assert_eq!(report.purged, Some(1));
        assert!(report.errors.is_empty());
    }

    #[test]
    fn batch_purge_runs_despite_failed_copy() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        write(&base.join("data/tech/2025-06-01/a.json"), "A");
        write(&base.join("data/tech/2025-06-01/b.json"), "B");

        let flaky = FlakyFs {
            fail_copy: "a.json",
            fail_list: "",
        };
        let report = mover(flaky, base, RelocationPolicy::BatchPurge).run();

        assert_eq!(report.errors.len(), 1);
        assert!(matches!(report.errors[0], Error::FileSystem { op: "copy", .. }));
        let files = &report.partitions[0].files;
        let a = files.iter().find(|f| f.name == "a.json").unwrap();
        assert_eq!(a.status, FileStatus::Failed);
        assert_eq!(report.count(FileStatus::Copied), 1);
        assert!(base.join("central_bank/github/tech/2025-06-01/b.json").exists());
        assert!(!base.join("data/tech").exists());
        assert_eq!(report.purged, Some(1));
    }

    #[test]
    fn bank_inside_transient_root_is_refused() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path();
        write(&base.join("data/bank/github/tech/2025-05-01/old.json"), "old");
        write(&base.join("data/tech/2025-06-01/a.json"), "A");

        let config = ArchiveConfig {
            bank_root: "data/bank".to_string(),
            policy: RelocationPolicy::BatchPurge,
            ..ArchiveConfig::default()
        };
        let mover = ArchiveMover::new(StdFs, base, &config);
        assert!(matches!(mover.check_roots(), Err(Error::Config(_))));

        let report = mover.run();
        assert_eq!(report.errors.len(), 1);
        assert!(report.partitions.is_empty());
        assert_eq!(report.purged, None);
        assert!(base.join("data/bank/github/tech/2025-05-01/old.json").exists());
        assert!(base.join("data/tech/2025-06-01/a.json").exists());
    }

    #[test]
    fn transient_root_at_base_is_refused() {
        let tmp = tempfile::tempdir().unwrap();
        for transient_root in ["", "."] {
            let config = ArchiveConfig {
                transient_root: transient_root.to_string(),
                ..ArchiveConfig::default()
            };
            let mover = ArchiveMover::new(StdFs, tmp.path(), &config);
            assert!(mover.check_roots().is_err(), "root {transient_root:?}");
        }
        let mover = ArchiveMover::new(StdFs, tmp.path(), &ArchiveConfig::default());
        assert!(mover.check_roots().is_ok());
    }

    #[test]
    fn policy_parses_from_cli_strings() {
        assert_eq!("verified".parse::<RelocationPolicy>().unwrap(), RelocationPolicy::Verified);
        assert_eq!("batch".parse::<RelocationPolicy>().unwrap(), RelocationPolicy::BatchPurge);
        assert!("yolo".parse::<RelocationPolicy>().is_err());
    }

    #[test]
    fn config_json_round_trip_uses_snake_case_policy() {
        let cfg: ArchiveConfig = serde_json::from_str(r#"{"policy": "batch_purge"}"#).unwrap();
        assert_eq!(cfg.policy, RelocationPolicy::BatchPurge);
        assert_eq!(cfg.bank_root, "central_bank");
        assert_eq!(cfg.mappings[0].bank_path, "github/tech");
    }
}

//! Bulk find/replace renaming of files and directories.
//!
//! Preview and execute share one traversal. They differ only in what happens
//! to each plan and in which listing drives recursion: execute re-reads a
//! directory after acting on it so descent follows post-rename names, preview
//! descends through the listing it already has.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Caller-supplied parameters for one rename invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameRequest {
    /// File or directory to start from
    pub root_path: PathBuf,
    /// Literal, case-sensitive substring to look for in entry names
    pub match_string: String,
    /// Text substituted for every occurrence (empty deletes the match)
    pub replacement: String,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Report planned renames without touching the filesystem
    pub preview_only: bool,
}

impl RenameRequest {
    /// Build a non-recursive, executing request
    ///
    /// # Returns
    /// * `Err(RenameError::Configuration)` if the root path or match string is empty
    pub fn new(
        root_path: impl Into<PathBuf>,
        match_string: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<Self, RenameError> {
        let request = Self {
            root_path: root_path.into(),
            match_string: match_string.into(),
            replacement: replacement.into(),
            recursive: false,
            preview_only: false,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_preview(mut self, preview_only: bool) -> Self {
        self.preview_only = preview_only;
        self
    }

    /// Check the required fields without touching the filesystem
    pub fn validate(&self) -> Result<(), RenameError> {
        if self.root_path.as_os_str().is_empty() {
            return Err(RenameError::Configuration(
                "a target path is required".to_string(),
            ));
        }
        if self.match_string.is_empty() {
            return Err(RenameError::Configuration(
                "a non-empty string to replace is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// A single rename decision for one directory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamePlan {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub is_directory: bool,
}

/// Whether a report came from a dry run or a real run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenameMode {
    Preview,
    Execute,
}

/// What happened to a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ActionStatus {
    /// Preview only, nothing was changed
    Planned,
    Renamed,
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameAction {
    #[serde(flatten)]
    pub plan: RenamePlan,
    #[serde(flatten)]
    pub status: ActionStatus,
}

/// A subdirectory whose listing failed during recursion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDirectory {
    pub path: PathBuf,
    pub error: String,
}

/// Everything one traversal decided, in the order it decided it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenameReport {
    pub mode: RenameMode,
    pub actions: Vec<RenameAction>,
    pub skipped_directories: Vec<SkippedDirectory>,
}

impl RenameReport {
    fn new(mode: RenameMode) -> Self {
        Self {
            mode,
            actions: Vec::new(),
            skipped_directories: Vec::new(),
        }
    }

    /// The rename plans in traversal order
    pub fn plans(&self) -> impl Iterator<Item = &RenamePlan> {
        self.actions.iter().map(|a| &a.plan)
    }

    pub fn renamed_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| a.status == ActionStatus::Renamed)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a.status, ActionStatus::Failed { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Error types for rename operations
#[derive(Debug, Error)]
pub enum RenameError {
    /// Required argument missing or empty
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),
    /// Directory or root metadata could not be read
    #[error("cannot read {}: {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A single entry could not be renamed; recorded, never returned by the engine
    #[error("failed to rename {} -> {}: {source}", from.display(), to.display())]
    RenameOperation {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Replace every occurrence of `match_string` in `name`
///
/// Returns None when `name` does not contain `match_string`, which is the
/// only case in which an entry is left out of the candidate set.
///
/// # Example
/// ```
/// use filetools::replace_name;
/// assert_eq!(replace_name("report_draft_v1.txt", "_draft", ""), Some("report_v1.txt".to_string()));
/// assert_eq!(replace_name("notes.txt", "old", "new"), None);
/// ```
pub fn replace_name(name: &str, match_string: &str, replacement: &str) -> Option<String> {
    if match_string.is_empty() || !name.contains(match_string) {
        return None;
    }
    Some(name.replace(match_string, replacement))
}

/// One directory entry as seen by a single listing
#[derive(Debug)]
struct Entry {
    path: PathBuf,
    is_dir: bool,
}

/// Traverses a request's root and renames (or previews renaming) matching entries
#[derive(Debug, Clone)]
pub struct RenameEngine {
    request: RenameRequest,
}

impl RenameEngine {
    pub fn new(request: RenameRequest) -> Self {
        Self { request }
    }

    pub fn request(&self) -> &RenameRequest {
        &self.request
    }

    /// Preview or execute depending on `request.preview_only`
    pub fn run(&self) -> Result<RenameReport, RenameError> {
        if self.request.preview_only {
            self.preview()
        } else {
            self.execute()
        }
    }

    /// Compute every rename `execute` would perform, without performing any
    pub fn preview(&self) -> Result<RenameReport, RenameError> {
        self.walk(RenameMode::Preview)
    }

    /// Rename every matching entry
    ///
    /// Per-entry failures are recorded in the report and do not abort the
    /// traversal. Renames already done before a fatal error are kept.
    pub fn execute(&self) -> Result<RenameReport, RenameError> {
        self.walk(RenameMode::Execute)
    }

    fn walk(&self, mode: RenameMode) -> Result<RenameReport, RenameError> {
        self.request.validate()?;
        let root = self.request.root_path.as_path();

        let metadata = fs::metadata(root).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                RenameError::PathNotFound(root.to_path_buf())
            } else {
                RenameError::Listing {
                    path: root.to_path_buf(),
                    source,
                }
            }
        })?;

        let mut report = RenameReport::new(mode);
        if metadata.is_dir() {
            self.visit_dir(root, mode, &mut report)?;
        } else {
            self.visit_single(root, mode, &mut report);
        }

        debug!(
            ?mode,
            actions = report.actions.len(),
            skipped = report.skipped_directories.len(),
            "rename traversal finished"
        );
        Ok(report)
    }

    fn visit_single(&self, path: &Path, mode: RenameMode, report: &mut RenameReport) {
        let Some(name) = path.file_name() else {
            debug!(path = %path.display(), "root has no file name, nothing to rename");
            return;
        };
        let parent = path.parent().unwrap_or_else(|| Path::new(""));

        match self.plan_for(parent, name, false) {
            Some(plan) => self.apply(plan, mode, report),
            None => info!(
                path = %path.display(),
                match_string = %self.request.match_string,
                "file name does not contain the match string"
            ),
        }
    }

    fn visit_dir(
        &self,
        dir: &Path,
        mode: RenameMode,
        report: &mut RenameReport,
    ) -> Result<(), RenameError> {
        let entries = list_entries(dir)?;

        // Candidate set for this level, fixed before anything is renamed
        let plans: Vec<RenamePlan> = entries
            .iter()
            .filter_map(|entry| {
                let name = entry.path.file_name()?;
                self.plan_for(dir, name, entry.is_dir)
            })
            .collect();

        for plan in plans {
            self.apply(plan, mode, report);
        }

        if !self.request.recursive {
            return Ok(());
        }

        let listing = match mode {
            RenameMode::Preview => entries,
            RenameMode::Execute => list_entries(dir)?,
        };

        for sub in listing.into_iter().filter(|e| e.is_dir) {
            if let Err(e) = self.visit_dir(&sub.path, mode, report) {
                warn!(path = %sub.path.display(), error = %e, "skipping subdirectory");
                report.skipped_directories.push(SkippedDirectory {
                    path: sub.path,
                    error: e.to_string(),
                });
            }
        }

        Ok(())
    }

    fn plan_for(&self, dir: &Path, name: &OsStr, is_directory: bool) -> Option<RenamePlan> {
        let Some(name_str) = name.to_str() else {
            debug!(dir = %dir.display(), name = ?name, "skipping non UTF-8 name");
            return None;
        };

        let new_name = replace_name(
            name_str,
            &self.request.match_string,
            &self.request.replacement,
        )?;

        Some(RenamePlan {
            original_path: dir.join(name),
            target_path: dir.join(new_name),
            is_directory,
        })
    }

    fn apply(&self, plan: RenamePlan, mode: RenameMode, report: &mut RenameReport) {
        let status = match mode {
            RenameMode::Preview => {
                debug!(
                    from = %plan.original_path.display(),
                    to = %plan.target_path.display(),
                    "planned rename"
                );
                ActionStatus::Planned
            }
            RenameMode::Execute => match rename_entry(&plan) {
                Ok(()) => {
                    info!(
                        from = %plan.original_path.display(),
                        to = %plan.target_path.display(),
                        "renamed"
                    );
                    ActionStatus::Renamed
                }
                Err(e) => {
                    warn!(error = %e, "rename failed, continuing");
                    ActionStatus::Failed {
                        error: e.to_string(),
                    }
                }
            },
        };

        report.actions.push(RenameAction { plan, status });
    }
}

/// Rename one entry, deferring collisions to the filesystem
fn rename_entry(plan: &RenamePlan) -> Result<(), RenameError> {
    let operation_error = |source| RenameError::RenameOperation {
        from: plan.original_path.clone(),
        to: plan.target_path.clone(),
        source,
    };

    // An emptied name joins to the directory itself
    if Some(plan.target_path.as_path()) == plan.original_path.parent() {
        return Err(operation_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "replacement leaves an empty name",
        )));
    }
    if plan.target_path.parent() != plan.original_path.parent() {
        return Err(operation_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "replacement changes the entry's directory",
        )));
    }

    fs::rename(&plan.original_path, &plan.target_path).map_err(operation_error)
}

/// List a directory's immediate entries, sorted by name
///
/// Entry types come from the directory entry itself, so a symlink to a
/// directory is not treated as a directory.
fn list_entries(dir: &Path) -> Result<Vec<Entry>, RenameError> {
    let listing_error = |source| RenameError::Listing {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(listing_error)? {
        let entry = entry.map_err(listing_error)?;
        let file_type = entry.file_type().map_err(listing_error)?;
        entries.push(Entry {
            path: entry.path(),
            is_dir: file_type.is_dir(),
        });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(dir = %dir.display(), count = entries.len(), "listed directory");
    Ok(entries)
}

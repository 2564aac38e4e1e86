//! Concurrent directory traversal.
//!
//! The walker descends every root with one task per directory entry: a
//! subdirectory spawns a recursive traversal task, a file spawns a
//! processing task (date extraction and age filtering). Task count is
//! unbounded; the only throttled resource is the number of simultaneously
//! open directory listings, gated by a [`TokenPool`]. A directory's task
//! completes only after all of its children have completed, and the walk
//! completes only after all roots have.
//!
//! Failure to list one directory abandons that subtree alone: the error is
//! logged to stderr and every other subtree continues unaffected.

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::Serialize;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

pub mod group;
pub mod pool;

use crate::extract::extract_date;
use crate::filter::AgeFilter;
use group::TaskGroup;
use pool::TokenPool;

/// A file whose name carried a valid date that passed the age filter.
#[derive(Debug, Clone, Serialize)]
pub struct DatedFile {
    /// Path to the file, as assembled during traversal
    pub path: PathBuf,

    /// The date extracted from the path, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// Counters shared by all traversal tasks of one walker.
#[derive(Debug, Default)]
struct WalkStats {
    dirs_listed: AtomicU64,
    files_seen: AtomicU64,
    files_matched: AtomicU64,
    subtree_errors: AtomicU64,
}

impl WalkStats {
    fn record_dir(&self) {
        self.dirs_listed.fetch_add(1, Ordering::Relaxed);
    }

    fn record_file(&self) {
        self.files_seen.fetch_add(1, Ordering::Relaxed);
    }

    fn record_match(&self) {
        self.files_matched.fetch_add(1, Ordering::Relaxed);
    }

    fn record_error(&self) {
        self.subtree_errors.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> WalkReport {
        WalkReport {
            dirs_listed: self.dirs_listed.load(Ordering::Relaxed),
            files_seen: self.files_seen.load(Ordering::Relaxed),
            files_matched: self.files_matched.load(Ordering::Relaxed),
            subtree_errors: self.subtree_errors.load(Ordering::Relaxed),
        }
    }
}

/// Totals for one completed walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkReport {
    /// Directories successfully listed
    pub dirs_listed: u64,

    /// Files encountered, whether or not they carried a date
    pub files_seen: u64,

    /// Files that carried a valid date and passed the filter
    pub files_matched: u64,

    /// Subtrees abandoned because their directory could not be listed
    pub subtree_errors: u64,
}

/// One directory entry, classified without following symlinks.
struct Entry {
    path: PathBuf,
    is_dir: bool,
}

/// The traversal engine.
///
/// All fields are shared read-only (or mutated only through their own
/// synchronization) so a `Walker` clone is cheap and every spawned task
/// carries one.
#[derive(Debug, Clone)]
pub struct Walker {
    filter: Arc<AgeFilter>,
    pool: Arc<TokenPool>,
    stats: Arc<WalkStats>,
}

impl Walker {
    /// Creates a walker with the given filter and listing-concurrency limit.
    ///
    /// `concurrency` caps simultaneously open directory listings, not the
    /// number of in-flight tasks. It must be at least 1; range validation
    /// against the host CPU count is the configuration surface's job
    /// (see [`crate::error::validate_concurrency`]).
    pub fn new(filter: AgeFilter, concurrency: usize) -> Self {
        Self {
            filter: Arc::new(filter),
            pool: Arc::new(TokenPool::new(concurrency)),
            stats: Arc::new(WalkStats::default()),
        }
    }

    /// Walks every root to completion and returns the run totals.
    ///
    /// Each root gets its own independent traversal. Matches are sent over
    /// `tx` as they are found, in no guaranteed order; the caller is expected
    /// to drain the receiving end concurrently. Dropping the receiver simply
    /// discards further matches, it does not stop the walk.
    pub async fn run(&self, roots: Vec<PathBuf>, tx: mpsc::Sender<DatedFile>) -> WalkReport {
        let mut group = TaskGroup::new();
        for root in roots {
            let walker = self.clone();
            let tx = tx.clone();
            group.spawn(async move { walker.walk_dir(root, tx).await });
        }
        drop(tx);
        group.join_all().await;

        let report = self.stats.snapshot();
        info!(
            "walk complete: {} directories, {} files, {} matched, {} unreadable",
            report.dirs_listed, report.files_seen, report.files_matched, report.subtree_errors
        );
        report
    }

    /// Traverses one directory: list under a token, then fan out.
    ///
    /// Boxed because the future recurses through `spawn` on itself.
    fn walk_dir(
        &self,
        dir: PathBuf,
        tx: mpsc::Sender<DatedFile>,
    ) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        let walker = self.clone();
        Box::pin(async move {
            // The token is held for the listing only, never across descent
            // into children or file processing.
            let listed = {
                let _token = walker.pool.acquire().await;
                list_entries(&dir).await
            };

            let entries = match listed {
                Ok(entries) => {
                    walker.stats.record_dir();
                    entries
                }
                Err(err) => {
                    walker.stats.record_error();
                    warn!("failed to read directory {}: {}", dir.display(), err);
                    return;
                }
            };

            let mut children = TaskGroup::new();
            for entry in entries {
                let walker = walker.clone();
                let tx = tx.clone();
                if entry.is_dir {
                    children.spawn(async move { walker.walk_dir(entry.path, tx).await });
                } else {
                    children.spawn(async move { walker.process_file(entry.path, tx).await });
                }
            }
            children.join_all().await;
        })
    }

    /// Runs one file through extraction and filtering, emitting on a match.
    ///
    /// A file without a date, or with a date outside the window, is dropped
    /// silently; neither case is an error.
    async fn process_file(&self, path: PathBuf, tx: mpsc::Sender<DatedFile>) {
        self.stats.record_file();

        let Some(date) = extract_date(&path.to_string_lossy()) else {
            return;
        };
        if !self.filter.matches(date) {
            return;
        }

        self.stats.record_match();
        if tx.send(DatedFile { path, date }).await.is_err() {
            debug!("match receiver dropped, discarding result");
        }
    }
}

/// Lists a directory's immediate entries, classifying each by its own file
/// type (symlinks are not followed, so a symlinked directory counts as a
/// file). Any failure mid-listing fails the whole listing.
async fn list_entries(dir: &Path) -> io::Result<Vec<Entry>> {
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = read_dir.next_entry().await? {
        let file_type = entry.file_type().await?;
        entries.push(Entry {
            path: entry.path(),
            is_dir: file_type.is_dir(),
        });
    }
    Ok(entries)
}

//! Bounded recursive search for map directories and archives.
//!
//! The walk is depth-limited and deliberately forgiving: unreadable
//! subtrees are skipped, never reported, so a scan always produces a
//! candidate list.

use crate::map::descriptor::DESCRIPTOR_FILENAME;
use crossbeam_channel::{unbounded, Receiver};
use std::path::{Path, PathBuf};
use std::thread;
use walkdir::WalkDir;

/// Maximum directory depth visited below each scan root
pub const MAX_DEPTH: usize = 6;

/// Something the scanner recognized as importable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanCandidate {
    /// A directory holding a map descriptor file
    Map(PathBuf),
    /// A zip archive that may contain a map
    Archive(PathBuf),
}

/// Filesystem search producing map and archive candidates
pub struct MapScanner;

impl MapScanner {
    /// Walks `roots` on a background thread; the candidate list is
    /// delivered once over the returned channel, on whatever context the
    /// caller consumes it from.
    pub fn scan(roots: Vec<PathBuf>) -> Receiver<Vec<ScanCandidate>> {
        let (tx, rx) = unbounded();
        thread::spawn(move || {
            let _ = tx.send(Self::scan_blocking(&roots));
        });
        rx
    }

    /// Synchronous scan of `roots`, depth-bounded by [`MAX_DEPTH`].
    ///
    /// A directory containing a descriptor file becomes a map candidate
    /// and is not searched further, so archives nested inside a map are
    /// never reported. Zip files anywhere within the depth bound become
    /// archive candidates.
    pub fn scan_blocking(roots: &[PathBuf]) -> Vec<ScanCandidate> {
        let mut candidates = Vec::new();
        for root in roots {
            let mut walker = WalkDir::new(root).max_depth(MAX_DEPTH).into_iter();
            while let Some(entry) = walker.next() {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        log::debug!("skipping unreadable entry during scan: {}", e);
                        continue;
                    }
                };
                if entry.file_type().is_dir() {
                    if entry.path().join(DESCRIPTOR_FILENAME).is_file() {
                        candidates.push(ScanCandidate::Map(entry.into_path()));
                        walker.skip_current_dir();
                    }
                } else if is_archive(entry.path()) {
                    candidates.push(ScanCandidate::Archive(entry.into_path()));
                }
            }
        }
        log::info!("scan produced {} candidate(s)", candidates.len());
        candidates
    }
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .map(|extension| extension.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

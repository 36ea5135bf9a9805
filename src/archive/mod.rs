//! Archive codec: streaming zip and unzip on dedicated background threads.
//!
//! Progress is entry-count based for extraction and file-count based for
//! compression; byte counts are never consulted. The two directions have
//! different failure policies: extraction keeps going past a broken entry
//! and reports an aggregate error, compression aborts on the first one.

pub mod unzip;
pub mod zip;

use crossbeam_channel::{unbounded, Receiver};
use std::path::PathBuf;
use std::thread;

/// Events emitted while extracting an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnzipEvent {
    /// Extraction progress in percent, counting completed entries
    Progress(u8),
    /// Every entry extracted successfully
    Finished(PathBuf),
    /// At least one entry failed; the output directory may hold a partial
    /// extraction and should be inspected or discarded as a whole
    Error,
}

/// Events emitted while building an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZipEvent {
    /// The file manifest is complete; compression is about to start
    ManifestAcquired(usize),
    /// Compression progress in percent, counting completed files
    Progress(u8),
    /// Archive written completely
    Finished(PathBuf),
    /// Aborted on an I/O failure; the output file is incomplete
    Error,
}

/// Extracts `archive` into `output_dir` on a background thread.
///
/// The returned channel carries progress events followed by exactly one
/// terminal event, then closes.
pub fn unzip(archive: PathBuf, output_dir: PathBuf) -> Receiver<UnzipEvent> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        unzip::unzip_with_sender(&archive, &output_dir, &tx);
    });
    rx
}

/// Compresses `source_dir` into `output_file` on a background thread.
///
/// The returned channel carries the manifest announcement, progress events
/// and exactly one terminal event, then closes.
pub fn zip(source_dir: PathBuf, output_file: PathBuf) -> Receiver<ZipEvent> {
    let (tx, rx) = unbounded();
    thread::spawn(move || {
        zip::zip_with_sender(&source_dir, &output_file, &tx);
    });
    rx
}

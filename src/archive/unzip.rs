//! Streaming extraction with per-entry failure tolerance.

use super::UnzipEvent;
use crossbeam_channel::Sender;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use zip::ZipArchive;

/// Extracts every entry of `archive` into `output_dir`, sending progress
/// and the terminal event over `tx`.
///
/// A failing entry is logged and skipped while extraction continues, so
/// the output directory can hold a partial tree; the terminal event is
/// [`UnzipEvent::Finished`] only when every entry succeeded. Returns
/// whether that was the case.
pub fn unzip_with_sender(archive: &Path, output_dir: &Path, tx: &Sender<UnzipEvent>) -> bool {
    match extract_entries(archive, output_dir, tx) {
        Ok(true) => {
            log::info!("extracted {} into {}", archive.display(), output_dir.display());
            let _ = tx.send(UnzipEvent::Finished(output_dir.to_path_buf()));
            true
        }
        Ok(false) => {
            let _ = tx.send(UnzipEvent::Error);
            false
        }
        Err(e) => {
            log::error!("cannot extract {}: {}", archive.display(), e);
            let _ = tx.send(UnzipEvent::Error);
            false
        }
    }
}

fn extract_entries(
    archive_path: &Path,
    output_dir: &Path,
    tx: &Sender<UnzipEvent>,
) -> crate::Result<bool> {
    fs::create_dir_all(output_dir)?;
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    let total = archive.len();
    let mut done = 0usize;
    let mut last_percent = 0u8;
    let mut all_ok = true;

    for index in 0..total {
        match extract_entry(&mut archive, index, output_dir) {
            Ok(()) => {
                done += 1;
                let percent = (done * 100 / total) as u8;
                if percent > last_percent {
                    last_percent = percent;
                    let _ = tx.send(UnzipEvent::Progress(percent));
                }
            }
            Err(e) => {
                log::warn!(
                    "entry {} of {} failed: {}",
                    index,
                    archive_path.display(),
                    e
                );
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

/// Extracts a single entry, creating parent directories as needed
fn extract_entry(
    archive: &mut ZipArchive<File>,
    index: usize,
    output_dir: &Path,
) -> crate::Result<()> {
    let mut entry = archive.by_index(index)?;
    let relative = match entry.enclosed_name() {
        Some(relative) => relative,
        None => {
            return Err(format!("entry name {:?} escapes the output directory", entry.name()).into())
        }
    };
    let target = output_dir.join(relative);

    if entry.is_dir() {
        fs::create_dir_all(&target)?;
    } else {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut output = File::create(&target)?;
        io::copy(&mut entry, &mut output)?;
    }
    Ok(())
}

//! Manifest-first compression with fail-fast error policy.

use super::ZipEvent;
use crossbeam_channel::Sender;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Compresses every regular file under `source_dir` into `output_file`,
/// sending progress and the terminal event over `tx`.
///
/// The complete file manifest is built before any write and announced via
/// [`ZipEvent::ManifestAcquired`]. The first I/O failure aborts the whole
/// archive. Returns whether the archive was written completely.
pub fn zip_with_sender(source_dir: &Path, output_file: &Path, tx: &Sender<ZipEvent>) -> bool {
    match write_archive(source_dir, output_file, tx) {
        Ok(()) => {
            log::info!("compressed {} into {}", source_dir.display(), output_file.display());
            let _ = tx.send(ZipEvent::Finished(output_file.to_path_buf()));
            true
        }
        Err(e) => {
            log::error!("cannot compress {}: {}", source_dir.display(), e);
            let _ = tx.send(ZipEvent::Error);
            false
        }
    }
}

fn write_archive(
    source_dir: &Path,
    output_file: &Path,
    tx: &Sender<ZipEvent>,
) -> crate::Result<()> {
    let manifest = build_manifest(source_dir)?;
    let total = manifest.len();
    let _ = tx.send(ZipEvent::ManifestAcquired(total));

    let mut writer = ZipWriter::new(BufWriter::new(File::create(output_file)?));
    let options = SimpleFileOptions::default();
    let mut last_percent = 0u8;

    for (index, path) in manifest.iter().enumerate() {
        let relative = path.strip_prefix(source_dir)?;
        writer.start_file(entry_name(relative), options)?;
        let mut input = BufReader::new(File::open(path)?);
        io::copy(&mut input, &mut writer)?;

        let percent = ((index + 1) * 100 / total) as u8;
        if percent > last_percent {
            last_percent = percent;
            let _ = tx.send(ZipEvent::Progress(percent));
        }
    }
    writer.finish()?;
    Ok(())
}

/// All regular files under `dir`, in traversal order
fn build_manifest(dir: &Path) -> crate::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Zip entry name for a path relative to the archive root
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

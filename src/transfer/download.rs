//! Blocking HTTP download loop with cooperative cancellation.

use super::{DownloadEvent, Progress};
use crate::MapError;
use crossbeam_channel::Sender;
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared blocking HTTP client with a custom User-Agent so that public
/// servers don't reject the request. Building the client once avoids the
/// cost of TLS and connection pool setup for every download.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("trailmap/0.1 (+https://github.com/example/trailmap)")
        .build()
        .expect("failed to build reqwest blocking client")
});

/// Bytes copied per iteration; cancellation is checked at this granularity
const CHUNK_SIZE: usize = 8 * 1024;

/// Streams `url` into `output_file`, checking `cancel` before every chunk.
///
/// Progress events carry integer percents when the server reported a
/// content length. Without one, completion cannot be estimated and a
/// single [`Progress::Indeterminate`] is emitted instead. Returns whether
/// the download ran to completion.
pub fn fetch(url: &str, output_file: &Path, cancel: &AtomicBool, tx: &Sender<DownloadEvent>) -> bool {
    match copy_stream(url, output_file, cancel, tx) {
        Ok(completed) => completed,
        Err(e) => {
            log::warn!("download of {} failed: {}", url, e);
            false
        }
    }
}

fn copy_stream(
    url: &str,
    output_file: &Path,
    cancel: &AtomicBool,
    tx: &Sender<DownloadEvent>,
) -> crate::Result<bool> {
    let mut response = HTTP_CLIENT.get(url).send()?;
    if !response.status().is_success() {
        return Err(MapError::Transfer(format!("HTTP {} from {}", response.status(), url)).into());
    }

    let content_length = response.content_length();
    if content_length.is_none() {
        let _ = tx.send(DownloadEvent::Progress(Progress::Indeterminate));
    }

    let mut writer = BufWriter::new(File::create(output_file)?);
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut bytes_done: u64 = 0;
    let mut last_percent = 0u8;

    loop {
        if cancel.load(Ordering::Relaxed) {
            log::info!("download of {} cancelled", url);
            writer.flush()?;
            return Ok(false);
        }

        let read = response.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        writer.write_all(&buffer[..read])?;
        bytes_done += read as u64;

        if let Some(total) = content_length {
            if total > 0 {
                let percent = (bytes_done * 100 / total).min(100) as u8;
                if percent > last_percent {
                    last_percent = percent;
                    let _ = tx.send(DownloadEvent::Progress(Progress::Percent(percent)));
                }
            }
        }
    }

    writer.flush()?;
    log::info!("downloaded {} ({} bytes)", url, bytes_done);
    Ok(true)
}

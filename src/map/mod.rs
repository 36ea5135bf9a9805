//! Map descriptor model and the entities a map carries (markers, routes,
//! tracks).

pub mod descriptor;
pub mod entities;

use crate::map::descriptor::{MapDescriptor, DESCRIPTOR_FILENAME};
use crate::scan::{MapScanner, ScanCandidate};
use crate::MapError;
use std::path::Path;

/// Builds a descriptor from a freshly extracted archive directory.
///
/// Archives may carry the map at their root or wrapped in a directory, so
/// the whole tree is searched for the first descriptor file.
pub fn import(dir: &Path) -> Result<MapDescriptor, MapError> {
    for candidate in MapScanner::scan_blocking(&[dir.to_path_buf()]) {
        if let ScanCandidate::Map(map_dir) = candidate {
            return MapDescriptor::load(&map_dir);
        }
    }
    Err(MapError::InvalidDescriptor(format!(
        "no {} found under {}",
        DESCRIPTOR_FILENAME,
        dir.display()
    )))
}

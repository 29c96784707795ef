use crate::config::Config;
use crate::error::Error;
use crate::layout::{BUNDLE_CONFIG_ENTRY, LIB_KEEP_ENTRY, MANIFEST_ENTRY, RESOURCES_ENTRY};
use crate::result::Result;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

const LOCAL_HEADER_SIGNATURE: [u8; 4] = *b"PK\x03\x04";

/// Result of inspecting a bundle archive
#[derive(Debug)]
pub struct Report {
    pub path: PathBuf,
    pub size: u64,
    pub entries: Vec<String>,
    /// Required entries not present in the archive
    pub missing: Vec<String>,
    pub has_manifest: bool,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    /// Fail with [`Error::InvalidArchive`] when required entries are missing
    pub fn ensure_valid(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::InvalidArchive(format!(
                "{} is missing {}",
                self.path.display(),
                self.missing.join(", ")
            )))
        }
    }
}

/// Entries every bundle produced with `config` must contain
pub fn required_entries(config: &Config) -> Vec<String> {
    vec![
        BUNDLE_CONFIG_ENTRY.to_string(),
        config.metadata_entry(),
        RESOURCES_ENTRY.to_string(),
        LIB_KEEP_ENTRY.to_string(),
    ]
}

/// Open `path` as a ZIP container and check it against the bundle layout
pub fn inspect(path: &Path, config: &Config) -> Result<Report> {
    if !path.is_file() {
        return Err(Error::InvalidArchive(format!("{} not found", path.display())));
    }

    let size = fs::metadata(path)?.len();

    let mut signature = [0u8; 4];
    let mut file = File::open(path)?;
    if file.read_exact(&mut signature).is_err() || signature != LOCAL_HEADER_SIGNATURE {
        return Err(Error::InvalidArchive(format!(
            "{} does not start with a ZIP local file header",
            path.display()
        )));
    }

    let archive = ZipArchive::new(File::open(path)?)?;
    let entries: Vec<String> = archive.file_names().map(str::to_string).collect();

    let missing = required_entries(config)
        .into_iter()
        .filter(|name| !entries.iter().any(|e| e == name))
        .collect();

    let has_manifest = entries.iter().any(|e| e == MANIFEST_ENTRY);

    Ok(Report {
        path: path.to_path_buf(),
        size,
        entries,
        missing,
        has_manifest,
    })
}

//! Archive layout: which entries end up in the bundle, in which order.
//!
//! ```text
//! BundleConfig.pb
//! BUNDLE-METADATA/<tool-id>
//! base/manifest/AndroidManifest.xml   <- app/src/main/AndroidManifest.xml
//! base/assets/**                      <- app/src/main/assets/**
//! base/res/**                         <- app/src/main/res/**
//! base/resources.pb
//! base/lib/.keep
//! ```

use crate::config::Config;
use crate::context::Context;
use crate::error::{Error, WriteError};
use crate::result::Result;
use crate::utils;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Module sources inside the input root
pub const MAIN_DIR: &str = "app/src/main";
pub const MANIFEST_FILE: &str = "AndroidManifest.xml";
pub const ASSETS_DIR: &str = "assets";
pub const RES_DIR: &str = "res";

pub const BUNDLE_CONFIG_ENTRY: &str = "BundleConfig.pb";
pub const MANIFEST_ENTRY: &str = "base/manifest/AndroidManifest.xml";
pub const ASSETS_PREFIX: &str = "base/assets";
pub const RES_PREFIX: &str = "base/res";
pub const RESOURCES_ENTRY: &str = "base/resources.pb";
pub const LIB_KEEP_ENTRY: &str = "base/lib/.keep";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Copied from disk, deflated
    File(PathBuf),
    /// Literal content
    Bytes(Vec<u8>),
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub source: Source,
}

/// Ordered set of archive entries with unique names
#[derive(Debug, Default)]
pub struct ArchiveSpec {
    entries: Vec<Entry>,
    names: HashSet<String>,
}

impl ArchiveSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the bundle layout for `config` from its input root
    pub fn collect(ctx: &Context, config: &Config) -> Result<Self> {
        let main_dir = config.input_root.join(MAIN_DIR);
        let mut spec = Self::new();

        spec.push_bytes(BUNDLE_CONFIG_ENTRY, config.bundle_config.as_bytes())?;
        spec.push_bytes(config.metadata_entry(), config.tool_id.as_bytes())?;

        let manifest = main_dir.join(MANIFEST_FILE);
        if manifest.is_file() {
            spec.push_file(MANIFEST_ENTRY, manifest)?;
        } else {
            ctx.remark(format!("Skipping manifest, {} not found", manifest.display()))?;
        }

        for (dir, prefix) in [(ASSETS_DIR, ASSETS_PREFIX), (RES_DIR, RES_PREFIX)] {
            let root = main_dir.join(dir);
            if !root.is_dir() {
                ctx.remark(format!("Skipping {}, {} not found", prefix, root.display()))?;
                continue;
            }

            let files = walk_files(&root).map_err(|e| Error::archive_write(&config.output, e))?;
            ctx.remark(format!("Found {} file(s) under {}", files.len(), root.display()))?;

            for path in files {
                let name = utils::entry_name(prefix, &root, &path).ok_or_else(|| {
                    Error::archive_write(&config.output, WriteError::EntryName(path.clone()))
                })?;
                spec.push_file(name, path)?;
            }
        }

        spec.push_bytes(RESOURCES_ENTRY, Vec::new())?;
        spec.push_bytes(LIB_KEEP_ENTRY, Vec::new())?;

        Ok(spec)
    }

    /// Append an entry, rejecting a name already present
    pub fn push(&mut self, name: impl Into<String>, source: Source) -> Result<()> {
        let name = name.into();
        if !self.names.insert(name.clone()) {
            return Err(Error::DuplicateEntry(name));
        }
        self.entries.push(Entry { name, source });
        Ok(())
    }

    pub fn push_bytes(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Result<()> {
        self.push(name, Source::Bytes(content.into()))
    }

    pub fn push_file(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Result<()> {
        self.push(name, Source::File(path.into()))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries copied from disk
    pub fn file_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.source, Source::File(_)))
            .count()
    }
}

/// Every file below `root`, sorted by path
fn walk_files(root: &Path) -> std::result::Result<Vec<PathBuf>, WriteError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.path().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Context, Config) {
        let dir = TempDir::new().unwrap();
        let ctx = Context::new(dir.path().to_path_buf(), false);
        let config = Config::defaults(&ctx);
        (dir, ctx, config)
    }

    fn names(spec: &ArchiveSpec) -> Vec<&str> {
        spec.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_empty_input_has_only_synthetic_entries() {
        let (_dir, ctx, config) = setup();
        fs::create_dir_all(&config.input_root).unwrap();

        let spec = ArchiveSpec::collect(&ctx, &config).unwrap();
        assert_eq!(
            names(&spec),
            vec![
                "BundleConfig.pb",
                "BUNDLE-METADATA/com.android.tools.build.bundletool",
                "base/resources.pb",
                "base/lib/.keep",
            ]
        );
        assert_eq!(spec.file_count(), 0);
    }

    #[test]
    fn test_full_tree_order() {
        let (_dir, ctx, config) = setup();
        let main = config.input_root.join(MAIN_DIR);
        fs::create_dir_all(main.join("assets/sub")).unwrap();
        fs::create_dir_all(main.join("res/values")).unwrap();
        fs::write(main.join(MANIFEST_FILE), "<manifest/>").unwrap();
        fs::write(main.join("assets/b.txt"), "b").unwrap();
        fs::write(main.join("assets/a.txt"), "a").unwrap();
        fs::write(main.join("assets/sub/c.txt"), "c").unwrap();
        fs::write(main.join("res/values/strings.xml"), "<resources/>").unwrap();

        let spec = ArchiveSpec::collect(&ctx, &config).unwrap();
        assert_eq!(
            names(&spec),
            vec![
                "BundleConfig.pb",
                "BUNDLE-METADATA/com.android.tools.build.bundletool",
                "base/manifest/AndroidManifest.xml",
                "base/assets/a.txt",
                "base/assets/b.txt",
                "base/assets/sub/c.txt",
                "base/res/values/strings.xml",
                "base/resources.pb",
                "base/lib/.keep",
            ]
        );
        assert_eq!(spec.file_count(), 5);
    }

    #[test]
    fn test_manifest_directory_is_ignored() {
        let (_dir, ctx, config) = setup();
        fs::create_dir_all(config.input_root.join(MAIN_DIR).join(MANIFEST_FILE)).unwrap();

        let spec = ArchiveSpec::collect(&ctx, &config).unwrap();
        assert!(!names(&spec).contains(&MANIFEST_ENTRY));
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let mut spec = ArchiveSpec::new();
        spec.push_bytes("base/lib/.keep", Vec::new()).unwrap();
        let err = spec.push_bytes("base/lib/.keep", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::DuplicateEntry(name) if name == "base/lib/.keep"));
        assert_eq!(spec.len(), 1);
    }
}

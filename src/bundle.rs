use crate::config::Config;
use crate::context::Context;
use crate::error::{Error, WriteError};
use crate::layout::{ArchiveSpec, Source};
use crate::result::Result;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Assemble the bundle described by `config` and return the archive size in bytes.
///
/// Fails with [`Error::MissingInput`] before touching the filesystem when the
/// input root is not a directory. Missing manifest, assets or res sources are
/// skipped.
pub fn build(ctx: &Context, config: &Config) -> Result<u64> {
    if !config.input_root.is_dir() {
        return Err(Error::MissingInput(config.input_root.clone()));
    }

    ctx.remark(format!("Assembling bundle from {}", config.input_root.display()))?;

    let spec = ArchiveSpec::collect(ctx, config)?;
    ctx.remark(format!("Collected {} entries, {} from disk", spec.len(), spec.file_count()))?;

    write(ctx, &spec, &config.output)
}

/// Write `spec` to `output`.
///
/// Entries go to a temporary file next to `output`, which replaces `output`
/// only once the archive is finished. On failure the temporary file is removed
/// and an existing `output` is left as it was.
pub fn write(ctx: &Context, spec: &ArchiveSpec, output: &Path) -> Result<u64> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| Error::archive_write(output, e))?;

    let mut temp = tempfile::Builder::new()
        .prefix(".aabpack-")
        .suffix(".partial")
        .tempfile_in(dir)
        .map_err(|e| Error::archive_write(output, e))?;

    write_entries(ctx, spec, temp.as_file_mut()).map_err(|e| Error::archive_write(output, e))?;

    // Temporary files are created owner-only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(temp.path(), fs::Permissions::from_mode(0o644))
            .map_err(|e| Error::archive_write(output, e))?;
    }

    temp.persist(output)
        .map_err(|e| Error::archive_write(output, e.error))?;

    let size = fs::metadata(output)
        .map_err(|e| Error::archive_write(output, e))?
        .len();

    ctx.remark(format!("Wrote {} entries to {}", spec.len(), output.display()))?;

    Ok(size)
}

fn write_entries(ctx: &Context, spec: &ArchiveSpec, file: &mut File) -> std::result::Result<(), WriteError> {
    let mut zip = ZipWriter::new(BufWriter::new(file));

    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for entry in spec.entries() {
        match &entry.source {
            Source::Bytes(content) => {
                ctx.remark(format!("+ {} ({} bytes)", entry.name, content.len()))?;
                zip.start_file(entry.name.as_str(), options)?;
                zip.write_all(content)?;
            }
            Source::File(path) => {
                ctx.remark(format!("+ {} <- {}", entry.name, path.display()))?;
                let mut source = File::open(path)?;
                let len = source.metadata()?.len();
                zip.start_file(entry.name.as_str(), options.large_file(needs_zip64(len)))?;
                io::copy(&mut source, &mut zip)?;
            }
        }
    }

    let mut writer = zip.finish()?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    Ok(())
}

/// Entries at or above 4 GiB need ZIP64 extra fields
fn needs_zip64(len: u64) -> bool {
    len >= u32::MAX as u64
}

mod args;
mod bundle;
mod config;
mod context;
mod error;
mod layout;
mod result;
mod tpl;
mod utils;
mod verify;

use args::Args;
use config::Config;
use context::Context;
use std::path::Path;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> result::Result<()> {
    // Parse command-line arguments
    let Args {
        verbose,
        path,
        output,
        config: config_path,
        check,
        verify: verify_path,
    } = Args::parse();

    let ctx = Context::new(std::env::current_dir()?, verbose);

    cliclack::intro("aabpack")?;

    let config = step(
        &ctx,
        "Loading configuration...",
        "Failed to load configuration",
        || Config::load(&ctx, config_path.as_deref()),
        |c| format!("Configuration loaded for {}", c.app.name),
    )?;

    if let Some(archive) = verify_path {
        verify_archive(&ctx.resolve(archive), &config)?;
        cliclack::outro("Archive is a valid bundle")?;
        return Ok(());
    }

    let config = config
        .with_input(&ctx, path.as_deref())
        .with_output(&ctx, output.as_deref());

    let size = step(
        &ctx,
        "Creating AAB archive...",
        "Failed to create AAB archive",
        || bundle::build(&ctx, &config),
        |_| "AAB archive created".to_string(),
    )?;

    cliclack::log::success(format!("File: {}", config.output.display()))?;
    cliclack::log::info(format!("Size: {}", utils::format_size(size)))?;

    if check {
        verify_archive(&config.output, &config)?;
    }

    cliclack::note(
        "Application",
        format!(
            "Name: {}\nPackage: {}\nVersion: {}",
            config.app.name, config.app.package, config.app.version
        ),
    )?;

    let file_name = config
        .output
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    cliclack::note(
        "Publishing",
        format!(
            "1. Open https://play.google.com/console\n\
             2. Create or select the application\n\
             3. Upload {}\n\
             4. Complete the store listing and publish",
            file_name
        ),
    )?;

    cliclack::outro("Bundle created successfully!")?;
    Ok(())
}

/// Run `task` behind a spinner. In verbose mode the task writes its own
/// remarks, so the spinner is replaced by plain log lines.
fn step<T>(
    ctx: &Context,
    start: &str,
    failed: &str,
    task: impl FnOnce() -> result::Result<T>,
    done: impl FnOnce(&T) -> String,
) -> result::Result<T> {
    if ctx.verbose {
        cliclack::log::step(start)?;
        return match task() {
            Ok(value) => {
                cliclack::log::success(done(&value))?;
                Ok(value)
            }
            Err(e) => {
                cliclack::log::error(failed)?;
                Err(e)
            }
        };
    }

    let spinner = cliclack::spinner();
    spinner.start(start);
    match task() {
        Ok(value) => {
            spinner.stop(done(&value));
            Ok(value)
        }
        Err(e) => {
            spinner.error(failed);
            Err(e)
        }
    }
}

fn verify_archive(path: &Path, config: &Config) -> result::Result<()> {
    let report = verify::inspect(path, config)?;

    cliclack::log::info(format!(
        "{}: {} entries, {}",
        report.path.display(),
        report.entries.len(),
        utils::format_size(report.size)
    ))?;

    if !report.has_manifest {
        cliclack::log::warning("base/manifest/AndroidManifest.xml is missing")?;
    }

    for name in &report.missing {
        cliclack::log::error(format!("Missing required entry {}", name))?;
    }

    report.ensure_valid()?;
    cliclack::log::success("Archive structure is valid")?;
    Ok(())
}

use std::fmt::Display;
use std::io;
use std::path::PathBuf;

/// Context passed throughout the application containing global configuration
#[derive(Clone)]
pub struct Context {
    /// Enable verbose output (show every archive entry as it is written)
    pub verbose: bool,

    /// Base directory relative paths are resolved against (the working directory)
    pub base_dir: PathBuf,
}

impl Context {
    pub fn new(base_dir: PathBuf, verbose: bool) -> Self {
        Self { verbose, base_dir }
    }

    /// Emit a detail line through the terminal UI when verbose output is enabled
    pub fn remark(&self, message: impl Display) -> io::Result<()> {
        if self.verbose {
            cliclack::log::remark(message)?;
        }
        Ok(())
    }

    /// Resolve a possibly relative path against the base directory
    pub fn resolve(&self, path: impl Into<PathBuf>) -> PathBuf {
        let path = path.into();
        if path.is_absolute() {
            path
        } else {
            self.base_dir.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        let ctx = Context::new(PathBuf::from("/work"), false);
        assert_eq!(ctx.resolve("android-build"), PathBuf::from("/work/android-build"));
    }

    #[test]
    fn test_remark_is_silent_when_quiet() {
        let ctx = Context::new(PathBuf::from("/work"), false);
        assert!(ctx.remark("hidden").is_ok());
    }

    #[test]
    fn test_resolve_absolute() {
        let ctx = Context::new(PathBuf::from("/work"), false);
        assert_eq!(ctx.resolve("/tmp/out.aab"), PathBuf::from("/tmp/out.aab"));
    }
}

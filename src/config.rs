use crate::context::Context;
use crate::error::Error;
use crate::result::Result;
use crate::tpl::Tpl;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration file picked up from the working directory when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "aabpack.toml";

pub const DEFAULT_INPUT_ROOT: &str = "android-build";
pub const DEFAULT_OUTPUT: &str = "$LOWERNAME-release.aab";
pub const DEFAULT_TOOL_ID: &str = "com.android.tools.build.bundletool";

pub const DEFAULT_APP_NAME: &str = "AmigoMontador";
pub const DEFAULT_APP_PACKAGE: &str = "com.amigomontador.app";
pub const DEFAULT_APP_VERSION: &str = "1.0.0";

/// Text stored as `BundleConfig.pb`. bundletool expects a compiled protobuf
/// descriptor here; this is the text-format rendition.
pub const DEFAULT_BUNDLE_CONFIG: &str = r#"optimizations {
  splits_config {
    split_dimension {
      value: LANGUAGE
      negate: false
    }
  }
}
compression {
  uncompressed_glob: "assets/**"
}"#;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub input: Option<String>,

    #[serde(default)]
    pub output: Option<String>,

    #[serde(rename = "tool-id", default)]
    pub tool_id: Option<String>,

    #[serde(rename = "bundle-config", default)]
    pub bundle_config: Option<String>,

    #[serde(default)]
    pub app: Option<AppSection>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct AppSection {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub package: Option<String>,

    #[serde(default)]
    pub version: Option<String>,
}

/// Application identity, shown in the summary and available to templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub name: String,
    pub package: String,
    pub version: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
            package: DEFAULT_APP_PACKAGE.to_string(),
            version: DEFAULT_APP_VERSION.to_string(),
        }
    }
}

/// Resolved bundle configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Build output directory containing `app/src/main`
    pub input_root: PathBuf,
    /// Archive file to produce
    pub output: PathBuf,
    /// Packaging tool identifier written under `BUNDLE-METADATA/`
    pub tool_id: String,
    /// Payload of the `BundleConfig.pb` entry
    pub bundle_config: String,
    pub app: AppInfo,
}

impl Config {
    /// Built-in defaults, relative paths resolved against the context base directory
    pub fn defaults(ctx: &Context) -> Self {
        let app = AppInfo::default();
        let output = Tpl::for_app(&app).parse(DEFAULT_OUTPUT);

        Self {
            input_root: ctx.resolve(DEFAULT_INPUT_ROOT),
            output: ctx.resolve(output),
            tool_id: DEFAULT_TOOL_ID.to_string(),
            bundle_config: DEFAULT_BUNDLE_CONFIG.to_string(),
            app,
        }
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `aabpack.toml` in the base
    /// directory is used when present, otherwise the defaults apply.
    pub fn load(ctx: &Context, explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                let path = ctx.resolve(path);
                if !path.is_file() {
                    return Err(Error::ConfigNotFound(path));
                }
                path
            }
            None => {
                let path = ctx.base_dir.join(CONFIG_FILE_NAME);
                if !path.is_file() {
                    ctx.remark(format!("No {} found, using defaults", CONFIG_FILE_NAME))?;
                    return Ok(Self::defaults(ctx));
                }
                path
            }
        };

        ctx.remark(format!("Reading configuration from {}", path.display()))?;

        let content = fs::read_to_string(&path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| ctx.base_dir.clone());

        Self::from_toml(&Context::new(base_dir, ctx.verbose), &content)
    }

    /// Parse TOML content, filling gaps with the defaults
    pub fn from_toml(ctx: &Context, content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let section = file.app.unwrap_or_default();
        let defaults = AppInfo::default();

        let app = AppInfo {
            name: section.name.unwrap_or(defaults.name),
            package: section.package.unwrap_or(defaults.package),
            version: section.version.unwrap_or(defaults.version),
        };

        let tpl = Tpl::for_app(&app);

        let input_root = ctx.resolve(tpl.parse(file.input.as_deref().unwrap_or(DEFAULT_INPUT_ROOT)));
        let output = ctx.resolve(tpl.parse(file.output.as_deref().unwrap_or(DEFAULT_OUTPUT)));

        let config = Self {
            input_root,
            output,
            tool_id: file.tool_id.unwrap_or_else(|| DEFAULT_TOOL_ID.to_string()),
            bundle_config: file
                .bundle_config
                .unwrap_or_else(|| DEFAULT_BUNDLE_CONFIG.to_string()),
            app,
        };

        config.validate()?;
        Ok(config)
    }

    /// Replace the input root (command-line override)
    pub fn with_input(mut self, ctx: &Context, input: Option<&Path>) -> Self {
        if let Some(input) = input {
            self.input_root = ctx.resolve(input);
        }
        self
    }

    /// Replace the output file (command-line override, templates allowed)
    pub fn with_output(mut self, ctx: &Context, output: Option<&Path>) -> Self {
        if let Some(output) = output {
            let output = Tpl::for_app(&self.app).parse(&output.to_string_lossy());
            self.output = ctx.resolve(output);
        }
        self
    }

    /// Name of the synthetic metadata entry
    pub fn metadata_entry(&self) -> String {
        format!("BUNDLE-METADATA/{}", self.tool_id)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tool_id.trim().is_empty() {
            return Err(Error::InvalidConfig("tool-id must not be empty".to_string()));
        }
        if self.tool_id.contains(['/', '\\']) {
            return Err(Error::InvalidConfig(format!(
                "tool-id `{}` must not contain path separators",
                self.tool_id
            )));
        }
        if self.output.file_name().is_none() {
            return Err(Error::InvalidConfig(format!(
                "output `{}` does not name a file",
                self.output.display()
            )));
        }
        Ok(())
    }
}

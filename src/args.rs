use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

/// Command-line arguments for the aabpack tool
#[derive(Debug)]
pub struct Args {
    /// Enable verbose output
    pub verbose: bool,

    /// Build output directory containing app/src/main
    pub path: Option<PathBuf>,

    /// Archive file to produce
    pub output: Option<PathBuf>,

    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// Verify the archive after building it
    pub check: bool,

    /// Verify an existing archive instead of building
    pub verify: Option<PathBuf>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        Self::from_matches(command().get_matches())
    }

    fn from_matches(matches: clap::ArgMatches) -> Self {
        Self {
            verbose: matches.get_flag("verbose"),
            path: matches.get_one::<String>("path").map(PathBuf::from),
            output: matches.get_one::<String>("output").map(PathBuf::from),
            config: matches.get_one::<String>("config").map(PathBuf::from),
            check: matches.get_flag("check"),
            verify: matches.get_one::<String>("verify").map(PathBuf::from),
        }
    }
}

fn command() -> Command {
    Command::new("aabpack")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Assemble an Android App Bundle (.aab) from a prepared build directory")
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .value_name("DIR")
                .help("Build output directory containing app/src/main (default: android-build)")
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Archive to create, $NAME/$LOWERNAME/$PACKAGE/$VERSION are expanded")
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file (default: aabpack.toml when present)")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose output")
        )
        .arg(
            Arg::new("check")
                .long("check")
                .action(ArgAction::SetTrue)
                .help("Verify the archive structure after building")
        )
        .arg(
            Arg::new("verify")
                .long("verify")
                .value_name("FILE")
                .conflicts_with_all(["path", "output", "check"])
                .help("Verify an existing archive without building")
        )
}

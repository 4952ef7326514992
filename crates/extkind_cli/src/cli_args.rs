use std::path::PathBuf;

use clap::{ArgAction, Parser};
use extkind_core::{default_log_level, parse_log_level};
use log::LevelFilter;

fn parse_level_arg(value: &str) -> Result<LevelFilter, String> {
    parse_log_level(value).map_err(|err| err.to_string())
}

#[derive(Debug, Parser)]
#[command(
    name = "extkind_cli",
    about = "Resolve execution locality and workspace trust for one extension manifest",
    version
)]
pub struct Cli {
    #[arg(
        value_name = "MANIFEST",
        help = "Extension manifest (package.json) to resolve"
    )]
    pub manifest: PathBuf,

    #[arg(
        long,
        value_name = "FILE",
        help = "Product metadata JSON providing extensionKind and extensionWorkspaceTrust defaults"
    )]
    pub product: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Settings JSON; only the remote.extensionKind key is read"
    )]
    pub settings: Option<PathBuf>,

    #[arg(
        long = "extension-points",
        value_name = "FILE",
        help = "JSON array of {name, defaultExtensionKind} contribution-point descriptors used for deduction"
    )]
    pub extension_points: Option<PathBuf>,

    #[arg(
        long = "trust-disabled",
        action = ArgAction::SetTrue,
        help = "Resolve as if workspace trust checking were disabled globally"
    )]
    pub trust_disabled: bool,

    #[arg(
        long = "log-level",
        env = "EXTKIND_LOG_LEVEL",
        value_parser = parse_level_arg,
        default_value_t = default_log_level(),
        help = "Log level for file logs: off, error, warn, info, debug or trace"
    )]
    pub log_level: LevelFilter,

    #[arg(
        long = "log-dir",
        env = "EXTKIND_LOG_DIR",
        value_name = "DIR",
        help = "Directory for rolling log files; logging stays off when omitted"
    )]
    pub log_dir: Option<PathBuf>,
}

//! Command-line report of extension execution policy.
//!
//! # Responsibility
//! - Resolve locality and trust for one manifest file from the command line.
//! - Keep output deterministic JSON for quick local checks.

mod cli_args;

use clap::Parser;
use cli_args::Cli;
use extkind_core::{
    init_logging, ExtensionManifest, ExtensionPointDescriptor, ExtensionPolicyService,
    FixedWorkspaceTrust, ProductMetadata, StaticConfiguration, StaticExtensionPointRegistry,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("extkind: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, String> {
    if let Some(dir) = cli.log_dir.as_deref() {
        let dir = absolute_dir(dir)?;
        init_logging(cli.log_level, &dir).map_err(|err| err.to_string())?;
    }

    let manifest: ExtensionManifest = load_json(&cli.manifest)?;
    let product: ProductMetadata = load_optional_json(cli.product.as_deref())?;
    let settings: StaticConfiguration = load_optional_json(cli.settings.as_deref())?;
    let descriptors: Vec<ExtensionPointDescriptor> =
        load_optional_json(cli.extension_points.as_deref())?;
    let registry = StaticExtensionPointRegistry::from_descriptors(descriptors)
        .map_err(|err| format!("invalid extension points: {err}"))?;

    let service =
        ExtensionPolicyService::new(Arc::new(settings), Arc::new(product), Arc::new(registry));
    let trust = FixedWorkspaceTrust {
        enabled: !cli.trust_disabled,
    };
    let policy = service.resolve(&manifest, &trust);
    log::info!(
        "event=cli_resolve module=cli status=ok extension={} source={} trust_enabled={}",
        policy.identity,
        policy.kind_source,
        trust.enabled
    );

    let report = serde_json::json!({
        "core_version": extkind_core::core_version(),
        "policy": policy,
    });
    serde_json::to_string_pretty(&report).map_err(|err| format!("failed to render report: {err}"))
}

fn absolute_dir(dir: &Path) -> Result<PathBuf, String> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|err| format!("failed to resolve current directory: {err}"))?;
    Ok(cwd.join(dir))
}

fn load_optional_json<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T, String> {
    match path {
        Some(path) => load_json(path),
        None => Ok(T::default()),
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
    serde_json::from_str(&raw).map_err(|err| format!("failed to parse `{}`: {err}", path.display()))
}

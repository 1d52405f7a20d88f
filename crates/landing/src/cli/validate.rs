//! Validate command - load a config and compile every enabled upload

use anyhow::Context;
use landing::LandingConfig;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
pub struct ValidateArgs {
    pub config: PathBuf,
}

pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let config = LandingConfig::load(&args.config)
        .with_context(|| format!("Failed to load config: {}", args.config.display()))?;
    config.validate()?;

    let enabled = config.enabled_uploads().count();
    info!(config = %args.config.display(), enabled, "Config is valid");
    println!(
        "{}: {} uploads ({} enabled) OK",
        args.config.display(),
        config.uploads.len(),
        enabled
    );
    Ok(())
}

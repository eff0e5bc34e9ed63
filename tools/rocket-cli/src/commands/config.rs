//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, RocketConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let api = &ctx.config.api;
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &api.base_url);
    if let Some(secs) = api.timeout_secs {
        ctx.output.kv("timeout_secs", &secs.to_string());
    }
    if let Some(ref file) = api.catalog_file {
        ctx.output.kv("catalog_file", file);
    }

    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.config.storage.path);
    ctx.output.kv("cart_key", &ctx.config.storage.cart_key);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = check(&ctx.config, ctx);

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

/// Collect errors and warnings for `config`.
fn check(config: &RocketConfig, ctx: &Context) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    match &config.api.catalog_file {
        Some(file) => {
            if !ctx.resolve_path(file).is_file() {
                errors.push(format!("api.catalog_file '{}' does not exist", file));
            }
        }
        None => {
            let url = &config.api.base_url;
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                errors.push(format!("api.base_url '{}' must be http(s)", url));
            }
        }
    }

    if config.api.timeout_secs == Some(0) {
        errors.push("api.timeout_secs must be greater than 0".to_string());
    }

    if config.storage.cart_key.is_empty() {
        errors.push("storage.cart_key is required".to_string());
    }

    if config.storage.path.is_empty() {
        errors.push("storage.path is required".to_string());
    } else if ctx.storage_path().is_dir() {
        errors.push(format!("storage.path '{}' is a directory", config.storage.path));
    }

    if config.api.catalog_file.is_none() && config.api.timeout_secs.is_none() {
        warnings.push("api.timeout_secs is unset; a stalled lookup blocks the command".to_string());
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Output;

    fn context(dir: &std::path::Path, config: RocketConfig) -> Context {
        Context {
            config,
            config_path: Some(dir.join("rocket.toml")),
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_check_valid_offline_config() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("db.json"), "{}").unwrap();

        let mut config = RocketConfig::default();
        config.api.catalog_file = Some("db.json".to_string());
        let ctx = context(dir.path(), config.clone());

        let (errors, warnings) = check(&config, &ctx);
        assert!(errors.is_empty(), "{:?}", errors);
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn test_check_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("store")).unwrap();

        let mut config = RocketConfig::default();
        config.api.base_url = "localhost:3333".to_string();
        config.api.timeout_secs = Some(0);
        config.storage.cart_key = String::new();
        config.storage.path = "store".to_string();
        let ctx = context(dir.path(), config.clone());

        let (errors, _) = check(&config, &ctx);
        assert_eq!(errors.len(), 4, "{:?}", errors);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path(), RocketConfig::default());

        init_config(false, &ctx).unwrap();
        assert!(init_config(false, &ctx).is_err());
        init_config(true, &ctx).unwrap();

        let written = RocketConfig::load(dir.path().join("rocket.toml")).unwrap();
        assert_eq!(written, RocketConfig::default());
    }
}

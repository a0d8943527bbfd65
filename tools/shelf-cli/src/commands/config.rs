//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("url", &ctx.config.api.url);
    if ctx.api_url() != ctx.config.api.url {
        ctx.output.kv("url (override)", ctx.api_url());
    }

    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output.kv("data_dir", &ctx.data_dir().display().to_string());
    ctx.output.kv("session", &ctx.config.cart.session);

    ctx.output.info("");
    ctx.output.info("[checkout]");
    ctx.output
        .kv("user_id", &ctx.config.checkout.user_id.to_string());
    ctx.output.kv(
        "payment_method",
        ctx.config.checkout.payment_method.display_name(),
    );

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
    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}

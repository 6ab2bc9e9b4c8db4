/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use std::path::PathBuf;
use vk_backup::config::{BackupConfig, DEFAULT_CONFIG_PATH};
use vk_backup::disk::DiskClient;
use vk_backup::export::Exporter;
use vk_backup::vk::VkClient;

#[derive(Parser, Debug)]
#[command(name = "vk-backup", about = "Back up VK photos to Yandex Disk")]
struct Cli {
    /// JSON file holding VK_ACCESS_TOKEN and the other settings
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// VK user whose photos are backed up (prompted if not set)
    #[arg(short = 'u', long)]
    user_id: Option<String>,

    /// Album to back up: profile, wall, saved or a numeric album id
    #[arg(short = 'a', long)]
    album: Option<String>,

    /// Number of recent photos to back up
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Where the manifest is written
    #[arg(short = 'm', long)]
    manifest: Option<PathBuf>,

    /// Download instead of uploading to Yandex Disk, into the given directory or SAVE_DIR
    #[arg(short = 'l', long, num_args = 0..=1, value_name = "DIR")]
    local: Option<Option<PathBuf>>,

    /// Yandex Disk OAuth token (prompted if not set).
    /// Prefer the YANDEX_DISK_TOKEN environment variable, flags show up in process listings.
    #[arg(long, env = "YANDEX_DISK_TOKEN", hide_env_values = true)]
    disk_token: Option<String>,
}

// Fills in what the command line gives over the config file
fn merge_cli(mut config: BackupConfig, cli: &Cli) -> BackupConfig {
    if let Some(v) = &cli.user_id {
        config.vk_user_id = Some(v.clone());
    }
    if let Some(v) = &cli.album {
        config.album = v.clone();
    }
    if let Some(v) = cli.limit {
        config.limit = v;
    }
    if let Some(v) = &cli.manifest {
        config.manifest_path = v.clone();
    }
    if let Some(Some(v)) = &cli.local {
        config.save_dir = v.clone();
    }
    if let Some(v) = &cli.disk_token {
        config.disk_token = Some(v.clone());
    }
    config
}

fn prompt_user_id() -> Result<String> {
    Ok(Input::<String>::new()
        .with_prompt("Enter vk user id")
        .interact_text()?)
}

fn prompt_disk_token() -> Result<String> {
    Ok(Password::new()
        .with_prompt("Enter yandex disk token")
        .interact()?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = BackupConfig::from_file_or_default(&cli.config)
        .with_context(|| format!("Reading config {}", cli.config.display()))?
        .apply_env();
    let mut config = merge_cli(config, &cli);

    if config.vk_user_id.is_none() {
        config.vk_user_id = Some(prompt_user_id()?);
    }
    config.validate()?;
    log::debug!("Using {:?}", config);

    let user_id = config.vk_user_id.as_deref().unwrap_or_default();
    let vk = VkClient::new(&config.vk_access_token, user_id).with_api_version(&config.api_version);
    let exporter = Exporter::new(vk)
        .with_album(config.album_id()?)
        .with_manifest_path(&config.manifest_path);

    let summary = match &cli.local {
        Some(_) => exporter.export_local(&config.save_dir, config.limit).await?,
        None => {
            let token = match config.disk_token.take() {
                Some(token) => token,
                None => prompt_disk_token()?,
            };
            let disk = DiskClient::new(&token);
            exporter.export_to_remote(&disk, config.limit).await?
        }
    };

    println!(
        "Stored {} photos, {} failed. Manifest: {}",
        summary.stored(),
        summary.failed.len(),
        summary.manifest_path.display()
    );
    Ok(())
}

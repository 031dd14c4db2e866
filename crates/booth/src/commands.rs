// SPDX-FileCopyrightText: 2026 Booth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations over [`PhotoPersistence`].

use std::path::Path;
use std::process::ExitCode;

use booth_config::BoothConfig;
use booth_core::{BoothError, PhotoDraft, PhotoImages, StoredPhoto};
use booth_imaging::encode_data_url;
use booth_persistence::PhotoPersistence;
use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::Commands;

/// Arguments of `booth save`.
#[derive(Args, Debug)]
pub struct SaveArgs {
    /// Original capture: an image file, or the URL of an already uploaded image.
    #[arg(long)]
    pub original: String,
    /// Processed image: an image file, or the URL of an already uploaded image.
    #[arg(long)]
    pub processed: String,
    #[arg(long)]
    pub background_id: String,
    #[arg(long)]
    pub background_name: String,
    #[arg(long, default_value = "")]
    pub prompt: String,
    #[arg(long)]
    pub user_slug: Option<String>,
    #[arg(long)]
    pub event_slug: Option<String>,
}

/// Output of `booth save`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Saved {
    photo: StoredPhoto,
    share_url: String,
}

#[derive(Serialize)]
struct Deleted<'a> {
    id: &'a str,
    deleted: bool,
}

/// Run one subcommand. Misses (unknown share code, nothing deleted) exit
/// with failure without being errors.
pub(crate) async fn run(command: Commands, config: &BoothConfig) -> Result<ExitCode, BoothError> {
    match command {
        Commands::Clear { yes: false } => {
            eprintln!("booth: refusing to clear local photos without --yes");
            return Ok(ExitCode::FAILURE);
        }
        Commands::Config => {
            print!("{}", render_config(config)?);
            return Ok(ExitCode::SUCCESS);
        }
        _ => {}
    }

    let persistence = PhotoPersistence::from_config(config).await?;

    match command {
        Commands::Save(args) => {
            let draft = build_draft(&args).await?;
            let photo = persistence.save(draft).await?;
            let share_url = persistence.share_url(photo.share_code());
            print_json(&Saved { photo, share_url })?;
        }
        Commands::Get { share_code } => match persistence.get_by_share_code(&share_code).await {
            Some(photo) => print_json(&photo)?,
            None => {
                eprintln!("booth: no photo with share code {share_code}");
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::List => print_json(&persistence.list_recent().await)?,
        Commands::Delete { id } => {
            let deleted = persistence.delete(&id).await?;
            print_json(&Deleted { id: &id, deleted })?;
            if !deleted {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Stats => print_json(&persistence.stats().await)?,
        Commands::Clear { .. } => persistence.clear().await?,
        Commands::ShareUrl { share_code } => println!("{}", persistence.share_url(&share_code)),
        Commands::Config => {}
    }

    Ok(ExitCode::SUCCESS)
}

/// The effective configuration as TOML, with the auth token masked.
fn render_config(config: &BoothConfig) -> Result<String, BoothError> {
    let mut shown = config.clone();
    if shown.api.auth_token.is_some() {
        shown.api.auth_token = Some("<redacted>".into());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| BoothError::Internal(format!("failed to render configuration: {e}")))
}

fn is_url(arg: &str) -> bool {
    arg.starts_with("https://") || arg.starts_with("http://")
}

async fn build_draft(args: &SaveArgs) -> Result<PhotoDraft, BoothError> {
    let images = match (is_url(&args.original), is_url(&args.processed)) {
        (true, true) => PhotoImages::remote(args.original.clone(), args.processed.clone()),
        (false, false) => PhotoImages::inline(
            read_image(Path::new(&args.original)).await?,
            read_image(Path::new(&args.processed)).await?,
        ),
        _ => {
            return Err(BoothError::Config(
                "--original and --processed must both be files or both be URLs".into(),
            ));
        }
    };

    Ok(PhotoDraft::new(images)
        .with_background(args.background_id.clone(), args.background_name.clone())
        .with_prompt(args.prompt.clone())
        .with_booth(args.user_slug.clone(), args.event_slug.clone()))
}

async fn read_image(path: &Path) -> Result<String, BoothError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| BoothError::Internal(format!("cannot read {}: {e}", path.display())))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read image file");
    encode_data_url(&bytes)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), BoothError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| BoothError::Internal(format!("failed to render output: {e}")))?;
    println!("{text}");
    Ok(())
}

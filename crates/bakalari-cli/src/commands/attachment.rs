//! Attachment download command implementation.

use anyhow::{Context, Result};

use bakalari::Client;

use crate::cli::AttachmentArgs;
use crate::output;

pub async fn run(client: &Client, args: AttachmentArgs) -> Result<()> {
    let bytes = client
        .attachment(&args.id)
        .await
        .context("Failed to download attachment")?;

    tokio::fs::write(&args.output, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    output::success(&format!(
        "Saved {} bytes to {}",
        bytes.len(),
        args.output.display()
    ));
    Ok(())
}

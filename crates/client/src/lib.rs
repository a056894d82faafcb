use std::path::PathBuf;

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};

/// Uploads `file` to the server and prints the response.
pub async fn run(server: String, file: PathBuf) -> Result<()> {
    let bytes = tokio::fs::read(&file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;

    let filename = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    let form = Form::new().part("image", Part::bytes(bytes).file_name(filename));

    let response = reqwest::Client::new()
        .post(format!("{}/", server.trim_end_matches('/')))
        .multipart(form)
        .send()
        .await
        .context("upload request failed")?;

    let status = response.status();
    let body = response
        .text()
        .await
        .context("failed to read the upload response")?;
    println!("{status}: {body}");

    Ok(())
}

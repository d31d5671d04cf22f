//! Image input: local files or http(s) URLs.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use tracing::{debug, info};

use foodlabel_core::models::config::FetchConfig;
use foodlabel_core::LabelError;

pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Read image bytes from a path or download them from a URL.
pub async fn read_input(input: &str, fetch: &FetchConfig) -> Result<Vec<u8>, LabelError> {
    if is_url(input) {
        return fetch_image(input, fetch).await;
    }

    let path = Path::new(input);
    if !path.exists() {
        return Err(LabelError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input file not found: {}", path.display()),
        )));
    }

    Ok(std::fs::read(path)?)
}

/// Download an image, refusing bodies larger than `fetch.max_bytes`.
pub async fn fetch_image(url: &str, fetch: &FetchConfig) -> Result<Vec<u8>, LabelError> {
    let fetch_err = |e: reqwest::Error| LabelError::Fetch(e.to_string());

    info!("Downloading image from {}", url);

    let client = reqwest::Client::builder()
        .user_agent(fetch.user_agent.as_str())
        .timeout(Duration::from_secs(fetch.timeout_secs))
        .build()
        .map_err(fetch_err)?;

    let response = client.get(url).send().await.map_err(fetch_err)?;

    if !response.status().is_success() {
        return Err(LabelError::Fetch(format!("HTTP {}", response.status())));
    }

    if response.content_length().is_some_and(|len| len > fetch.max_bytes) {
        return Err(too_large(fetch.max_bytes));
    }

    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(fetch_err)?;
        if (body.len() + chunk.len()) as u64 > fetch.max_bytes {
            return Err(too_large(fetch.max_bytes));
        }
        body.extend_from_slice(&chunk);
    }

    debug!("Downloaded {} bytes", body.len());

    Ok(body)
}

fn too_large(limit: u64) -> LabelError {
    LabelError::Fetch(format!("image too large (limit {} bytes)", limit))
}

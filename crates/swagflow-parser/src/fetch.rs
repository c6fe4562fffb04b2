//! Fetch documents over HTTP(S)

use crate::document::Document;
use crate::ParserError;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tracing::debug;

/// `true` when `input` should be downloaded rather than read from disk
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

pub struct DocumentFetcher {
    client: reqwest::Client,
}

impl DocumentFetcher {
    pub fn new() -> Result<Self, ParserError> {
        Ok(Self {
            client: reqwest::Client::builder().user_agent("swagflow").build()?,
        })
    }

    /// Download `url` and decode the body; JSON is tried first, then YAML
    pub async fn fetch(&self, url: &str) -> Result<Document, ParserError> {
        let spinner = if atty::is(atty::Stream::Stdout) {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner())
                    .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
            );
            pb.enable_steady_tick(Duration::from_millis(100));
            pb.set_message(format!("Downloading {}", url));
            Some(pb)
        } else {
            None
        };

        let result = self.download(url).await;

        if let Some(pb) = spinner {
            match &result {
                Ok(_) => pb.finish_with_message(format!("✓ Downloaded {}", url)),
                Err(_) => pb.finish_with_message(format!("✗ Failed to download {}", url)),
            }
        }

        Document::from_str_sniffed(&result?)
    }

    async fn download(&self, url: &str) -> Result<String, ParserError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(url, status = status.as_u16(), "Fetched document");
        if !status.is_success() {
            return Err(ParserError::Network(format!(
                "GET {} returned {}",
                url, status
            )));
        }
        Ok(response.text().await?)
    }
}

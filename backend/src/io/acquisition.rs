//! # Text Acquisition
//!
//! The only asynchronous boundary of the engine: fetching a raw text blob from
//! a file or standard input (the stand-in for the system clipboard). The blob
//! is handed to the service once it is available.
//!
//! When several acquisitions overlap, only the one started last is applied.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use shared::ImportOutcome;
use tokio::io::AsyncReadExt;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::CsvHandlerService;

/// A service shared between a UI and in-flight acquisitions
pub type SharedHandler = Arc<Mutex<CsvHandlerService>>;

/// Where raw text comes from
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Human readable origin, used in logs
    fn describe(&self) -> String;

    async fn read_text(&self) -> Result<String>;
}

/// Reads an uploaded or dropped file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TextSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn read_text(&self) -> Result<String> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let text = String::from_utf8(bytes)
            .with_context(|| format!("{} is not valid UTF-8", self.path.display()))?;
        Ok(strip_bom(text))
    }
}

/// Reads everything piped on standard input
pub struct StdinSource;

#[async_trait]
impl TextSource for StdinSource {
    fn describe(&self) -> String {
        "standard input".to_string()
    }

    async fn read_text(&self) -> Result<String> {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read standard input")?;
        Ok(strip_bom(text))
    }
}

/// Spreadsheet exports often start with a UTF-8 byte order mark
fn strip_bom(text: String) -> String {
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// Read from `source` and import the text, unless a newer acquisition started meanwhile
///
/// The lock is not held while reading.
pub async fn acquire(handler: &SharedHandler, source: &dyn TextSource) -> Result<ImportOutcome> {
    let ticket = handler.lock().await.begin_acquisition();
    info!("Acquiring text from {}", source.describe());

    let text = source.read_text().await?;
    debug!("Read {} bytes from {}", text.len(), source.describe());

    let outcome = handler.lock().await.on_raw_text_for(ticket, &text)?;
    Ok(outcome)
}

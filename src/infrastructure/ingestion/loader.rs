//! Loading reference documents from disk and the web

use std::path::{Path, PathBuf};

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info};

use crate::domain::ingestion::{
    DocumentParser, ParsedDocument, ParserInput, ParserType, RawDocument,
};
use crate::domain::DomainError;

use super::factory::ParserFactory;

/// Reads every supported document in a folder
#[derive(Debug, Clone, Default)]
pub struct DocumentLoader;

impl DocumentLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load and parse all supported files directly inside `folder`
    ///
    /// Files are visited in file-name order. Unsupported extensions are
    /// skipped; a folder without any supported file is an error.
    pub async fn load_folder(&self, folder: &Path) -> Result<Vec<RawDocument>, DomainError> {
        let files = self.supported_files(folder).await?;

        if files.is_empty() {
            return Err(DomainError::not_found(format!(
                "No supported documents found in {}",
                folder.display()
            )));
        }

        let mut documents = Vec::with_capacity(files.len());

        for path in files {
            let parsed = self.load_file(&path).await?;
            info!(
                title = parsed.metadata.title.as_deref().unwrap_or_default(),
                chars = parsed.document.text().len(),
                "Loaded {}",
                path.display()
            );
            documents.push(parsed.document);
        }

        Ok(documents)
    }

    /// Load and parse a single file, choosing the parser by extension
    pub async fn load_file(&self, path: &Path) -> Result<ParsedDocument, DomainError> {
        let source_id = path.display().to_string();
        let parser = ParserFactory::for_filename(&source_id).ok_or_else(|| {
            DomainError::document(&source_id, "Unsupported document format")
        })?;

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DomainError::document(&source_id, format!("Failed to read: {}", e)))?;

        parser.parse(ParserInput::from_bytes(bytes, source_id)).await
    }

    async fn supported_files(&self, folder: &Path) -> Result<Vec<PathBuf>, DomainError> {
        let mut entries = tokio::fs::read_dir(folder).await.map_err(|e| {
            DomainError::not_found(format!("Cannot read folder {}: {}", folder.display(), e))
        })?;

        let mut files = Vec::new();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DomainError::internal(format!("Failed to list {}: {}", folder.display(), e)))?
        {
            let path = entry.path();
            let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();

            if is_file && ParserFactory::for_filename(name).is_some() {
                files.push(path);
            } else {
                debug!("Skipping {}", path.display());
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Downloads a web page or PDF and extracts its text
#[derive(Debug, Clone, Default)]
pub struct UrlFetcher {
    client: reqwest::Client,
}

impl UrlFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch `url`, parsing it as PDF when served as `application/pdf`
    /// and as HTML otherwise
    pub async fn fetch(&self, url: &str) -> Result<ParsedDocument, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::provider("http", format!("Request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(DomainError::provider(
                "http",
                format!("HTTP {} fetching {}", response.status(), url),
            ));
        }

        let is_pdf = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/pdf"));

        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::provider("http", format!("Failed to read body: {}", e)))?;

        let parser = ParserFactory::create(if is_pdf { ParserType::Pdf } else { ParserType::Html });
        debug!(parser = ?parser, "Parsing {}", url);

        parser.parse(ParserInput::from_bytes(body.to_vec(), url)).await
    }
}

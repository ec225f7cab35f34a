//! Analyze command - checks a privacy policy against the GDPR knowledge base

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use crate::domain::ingestion::ParsedDocument;
use crate::domain::ComplianceReport;
use crate::infrastructure::ingestion::{DocumentLoader, UrlFetcher};
use crate::infrastructure::llm::{HttpClient, OpenAiProvider};
use crate::infrastructure::services::ComplianceAnalyzer;

use super::build::load_or_build;

/// Arguments for the analyze command
#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Folder of GDPR reference documents, embedded when no saved index exists
    pub folder: Option<PathBuf>,

    /// Saved index to load (overrides knowledge_base.index_path)
    #[arg(long)]
    pub index: Option<PathBuf>,

    /// Re-embed the folder even when a saved index exists
    #[arg(long, requires = "folder")]
    pub rebuild: bool,

    #[command(flatten)]
    pub input: PolicyInput,

    /// Number of reference chunks to retrieve (overrides config)
    #[arg(long)]
    pub top_k: Option<usize>,
}

/// The privacy policy to analyze
#[derive(Args, Clone)]
#[group(required = true, multiple = false)]
pub struct PolicyInput {
    /// Local policy file (txt, md, html or pdf)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Web page to fetch the policy from
    #[arg(long)]
    pub url: Option<String>,
}

/// Run the analyze command
pub async fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let settings = config.analysis_settings(args.top_k)?;

    let policy = load_policy(&DocumentLoader::new(), &args.input).await?;

    let embedder = super::embedding_provider(&config)?;
    let index_path = args
        .index
        .unwrap_or_else(|| config.knowledge_base.index_path.clone());
    let index = load_or_build(
        embedder.clone(),
        &config.embedding.model,
        config.chunking_config(None, None)?,
        &index_path,
        args.folder.as_deref(),
        args.rebuild,
    )
    .await?;

    let llm = Arc::new(OpenAiProvider::with_base_url(
        HttpClient::new(),
        config.llm.resolve_api_key()?,
        &config.llm.base_url,
    ));

    let report = ComplianceAnalyzer::new(embedder, Arc::new(index), llm)
        .with_embedding_model(&config.embedding.model)
        .with_settings(settings)
        .analyze(policy.document.text())
        .await?;

    let stdout = std::io::stdout();
    write_report(&mut stdout.lock(), &policy_label(&policy), &report)
}

async fn load_policy(loader: &DocumentLoader, input: &PolicyInput) -> anyhow::Result<ParsedDocument> {
    match (&input.file, &input.url) {
        (Some(path), _) => Ok(loader.load_file(path).await?),
        (None, Some(url)) => Ok(UrlFetcher::new().fetch(url).await?),
        (None, None) => anyhow::bail!("Either --file or --url is required"),
    }
}

/// Title of the analyzed document with its origin, or just the origin
pub fn policy_label(policy: &ParsedDocument) -> String {
    let source = policy.document.source_id();

    match policy.metadata.title.as_deref() {
        Some(title) => format!("{} ({})", title, source),
        None => source.to_string(),
    }
}

pub fn write_report(out: &mut impl Write, policy: &str, report: &ComplianceReport) -> anyhow::Result<()> {
    writeln!(out, "Compliance Analysis")?;
    writeln!(out, "===================")?;
    writeln!(out, "Document: {}", policy)?;
    writeln!(out, "Model: {}\n", report.model)?;
    writeln!(out, "{}\n", report.analysis.trim())?;

    writeln!(out, "Retrieved GDPR Context")?;
    writeln!(out, "======================")?;

    for (rank, source) in report.sources.iter().enumerate() {
        writeln!(
            out,
            "[{}] {} ({}, score {:.3})",
            rank + 1,
            source.section_header(),
            source.chunk.metadata.source,
            source.score
        )?;
        writeln!(out, "{}\n", source.content())?;
    }

    out.flush()?;
    Ok(())
}

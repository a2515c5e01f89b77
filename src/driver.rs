use tracing::Instrument;

use crate::config::schema::{Source, SourceKind};
use crate::error::ResultSyncError;
use crate::publish::{PublishOutcome, Publisher};
use crate::scrapers::registry::ScraperRegistry;

/// Per-run tally, logged once all sources are processed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub published: usize,
    pub unchanged: usize,
    /// Extracted but intentionally not published (dry run)
    pub extracted: usize,
    /// Unknown scraper kind
    pub skipped: usize,
    pub failed: usize,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.published + self.unchanged + self.extracted + self.skipped + self.failed
    }
}

/// Runs every source once, in order, isolating failures per source
pub struct Driver {
    registry: ScraperRegistry,
    publisher: Option<Publisher>,
    dry_run: bool,
}

impl Driver {
    /// `publisher` is `None` when no credential is available
    pub fn new(registry: ScraperRegistry, publisher: Option<Publisher>) -> Self {
        Self {
            registry,
            publisher,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self, sources: &[Source]) -> RunReport {
        let mut report = RunReport::default();

        for source in sources {
            let span = tracing::info_span!("source", name = %source.name);

            match self.run_source(source).instrument(span).await {
                Ok(SourceOutcome::Published(outcome)) => {
                    if outcome == PublishOutcome::Unchanged {
                        report.unchanged += 1;
                    } else {
                        report.published += 1;
                    }
                }
                Ok(SourceOutcome::Extracted) => report.extracted += 1,
                Ok(SourceOutcome::Skipped) => report.skipped += 1,
                Err(e) => {
                    tracing::error!(source = %source.name, kind = e.kind(), error = %e, "source failed");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            published = report.published,
            unchanged = report.unchanged,
            extracted = report.extracted,
            skipped = report.skipped,
            failed = report.failed,
            "run finished"
        );
        report
    }

    async fn run_source(&self, source: &Source) -> Result<SourceOutcome, ResultSyncError> {
        let kind = source.kind.name();
        let scraper = match (&source.kind, self.registry.get(kind)) {
            (SourceKind::Unknown(_), _) | (_, None) => {
                tracing::warn!(kind, "unknown scraper type, skipping source");
                return Ok(SourceOutcome::Skipped);
            }
            (_, Some(scraper)) => scraper,
        };

        tracing::info!(kind, url = %source.url, "scraping");
        let record = scraper.scrape(source).await?;
        let line = record.to_line();
        tracing::info!(line = %line, "extracted latest result");

        if self.dry_run {
            return Ok(SourceOutcome::Extracted);
        }

        let publisher = self.publisher.as_ref().ok_or_else(|| {
            ResultSyncError::CredentialMissing("publishing skipped, no GitHub token".to_string())
        })?;

        let outcome = publisher
            .publish(&source.name, &source.target_file, &line)
            .await?;
        tracing::info!(path = %source.target_file, outcome = ?outcome, "published");

        Ok(SourceOutcome::Published(outcome))
    }
}

enum SourceOutcome {
    Published(PublishOutcome),
    Extracted,
    Skipped,
}

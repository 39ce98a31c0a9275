// src/pipeline/scrape.rs
//! Two-phase scrape pipeline.
//!
//! Phase one pages through the directory listing; phase two fans the
//! listed organizations out to a pool of enrichment workers. A single
//! collector task owns all persistence and checkpoint state, so nothing
//! else ever touches the progress file mid-run.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Organization, Progress};
use crate::services::directory::page_count;
use crate::services::{DetailEnricher, DirectoryClient, Fetcher, merge_organization};
use crate::storage::{LocalStorage, ProgressStore};
use crate::utils::http::create_client;

/// What the enrichment phase produced for one organization.
#[derive(Debug)]
pub enum EnrichOutcome {
    /// Detail page fetched and merged over the listing record.
    Enriched(Organization),
    /// Detail fetch failed; the listing record is kept as-is.
    Degraded(Organization),
}

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone)]
pub struct RunReport {
    pub listed: usize,
    pub queued: usize,
    pub enriched: usize,
    pub degraded: usize,
    pub persisted: usize,
    pub aggregated: usize,
}

struct CollectorReport {
    enriched: usize,
    degraded: usize,
    persisted: usize,
}

/// Run the full pipeline: list, enrich, persist, checkpoint, aggregate.
///
/// Listing failures abort the run; per-organization enrichment failures
/// only degrade that organization.
pub async fn run_scraper(config: &Config, resume: bool) -> Result<RunReport> {
    let client = create_client(&config.crawler)?;
    let fetcher = Fetcher::new(client, &config.crawler);
    let directory = DirectoryClient::new(fetcher.clone(), &config.api);
    let enricher = Arc::new(DetailEnricher::new(fetcher, &config.api));
    let storage = LocalStorage::new(&config.paths.output_dir);
    let mut store = ProgressStore::open(&config.paths.progress_file, resume).await;

    if store.progress().total_orgs == 0 {
        let total = directory.fetch_total_count().await?;
        store.progress_mut().total_orgs = total;
        log::info!("Directory reports {total} organizations");
    }
    let total = store.progress().total_orgs;

    // The listing is always refetched; only detail work is skipped on resume.
    let listed = directory.fetch_all(total).await?;
    let listed_count = listed.len();
    store
        .progress_mut()
        .record_pages(0..page_count(total, config.api.page_size));

    let pending = pending_organizations(listed, store.progress());
    let queued = pending.len();
    log::info!(
        "{} organizations to enrich ({} already completed)",
        queued,
        listed_count - queued
    );

    let (tx, rx) = mpsc::channel(queued.max(1));
    let collector = tokio::spawn(collect_results(
        rx,
        store,
        storage.clone(),
        config.crawler.checkpoint_interval,
    ));

    let queue = Arc::new(pending);
    let cursor = Arc::new(AtomicUsize::new(0));
    let mut handles = Vec::with_capacity(config.crawler.workers);
    for worker_id in 0..config.crawler.workers {
        handles.push(tokio::spawn(enrich_worker(
            worker_id,
            Arc::clone(&queue),
            Arc::clone(&cursor),
            Arc::clone(&enricher),
            config.api.site_url.clone(),
            config.crawler.request_delay(),
            tx.clone(),
        )));
    }
    drop(tx);

    for handle in join_all(handles).await {
        if let Err(e) = handle {
            log::error!("Worker task failed: {e}");
        }
    }

    let collected = collector
        .await
        .map_err(|e| AppError::task(format!("collector task failed: {e}")))?;

    let aggregated = match storage.write_aggregate(&config.paths.aggregate_file).await {
        Ok(count) => count,
        Err(e) => {
            log::warn!("Could not write aggregate file: {e}");
            0
        }
    };

    let report = RunReport {
        listed: listed_count,
        queued,
        enriched: collected.enriched,
        degraded: collected.degraded,
        persisted: collected.persisted,
        aggregated,
    };
    log::info!(
        "Run complete: {} enriched, {} degraded, {} persisted, {} aggregated",
        report.enriched,
        report.degraded,
        report.persisted,
        report.aggregated
    );
    Ok(report)
}

/// Organizations from the listing that are not yet checkpointed.
fn pending_organizations(listed: Vec<Organization>, progress: &Progress) -> Vec<Organization> {
    listed
        .into_iter()
        .filter(|org| !progress.is_completed(&org.key()))
        .collect()
}

/// Pull items off the shared queue until it runs dry or the collector hangs up.
async fn enrich_worker(
    worker_id: usize,
    queue: Arc<Vec<Organization>>,
    cursor: Arc<AtomicUsize>,
    enricher: Arc<DetailEnricher>,
    site_url: String,
    delay: Duration,
    tx: mpsc::Sender<EnrichOutcome>,
) {
    log::debug!("Worker {worker_id} started");
    loop {
        let index = cursor.fetch_add(1, Ordering::Relaxed);
        let Some(org) = queue.get(index) else {
            break;
        };

        log::debug!(
            "Worker {} enriching {} ({})",
            worker_id,
            org.name.as_deref().unwrap_or("?"),
            org.key()
        );

        let outcome = match enricher.fetch_detail(org).await {
            Ok(detail) => EnrichOutcome::Enriched(merge_organization(org, detail, &site_url)),
            Err(e) => {
                log::warn!("Falling back to list data for {}: {}", org.key(), e);
                EnrichOutcome::Degraded(org.clone())
            }
        };

        if tx.send(outcome).await.is_err() {
            break;
        }
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    log::debug!("Worker {worker_id} finished");
}

/// Drain worker results, persisting each and checkpointing periodically.
async fn collect_results(
    mut rx: mpsc::Receiver<EnrichOutcome>,
    mut store: ProgressStore,
    storage: LocalStorage,
    checkpoint_interval: usize,
) -> CollectorReport {
    let checkpoint_interval = checkpoint_interval.max(1);
    let mut report = CollectorReport {
        enriched: 0,
        degraded: 0,
        persisted: 0,
    };

    while let Some(outcome) = rx.recv().await {
        let org = match &outcome {
            EnrichOutcome::Enriched(org) => {
                report.enriched += 1;
                org
            }
            EnrichOutcome::Degraded(org) => {
                report.degraded += 1;
                org
            }
        };

        match storage.write_organization(org).await {
            Ok(()) => report.persisted += 1,
            Err(e) => log::error!("Could not save {}: {}", org.key(), e),
        }

        if store.progress_mut().mark_completed(org.key())
            && store.progress().scraped_orgs % checkpoint_interval == 0
        {
            if let Err(e) = store.save().await {
                log::warn!("Could not checkpoint progress: {e}");
            }
        }

        let done = report.enriched + report.degraded;
        if done % 25 == 0 {
            log::info!(
                "Progress: {}/{} organizations",
                store.progress().scraped_orgs,
                store.progress().total_orgs
            );
        }
    }

    if let Err(e) = store.save().await {
        log::warn!("Could not write final progress: {e}");
    }
    log::info!(
        "Collector finished: {} enriched, {} degraded",
        report.enriched,
        report.degraded
    );

    report
}

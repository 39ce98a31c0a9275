//! Pipeline entry point for scraper runs.

pub mod scrape;

pub use scrape::{EnrichOutcome, RunReport, run_scraper};

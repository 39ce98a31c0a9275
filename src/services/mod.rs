//! Service layer for the scraper application.
//!
//! This module contains the business logic for:
//! - Retrying HTTP fetches (`Fetcher`)
//! - List-API pagination (`DirectoryClient`)
//! - Detail-page enrichment (`DetailEnricher`)
//! - Record reconciliation (`merge_organization`)

pub mod detail;
pub mod directory;
pub mod fetch;
pub mod merge;

pub use detail::DetailEnricher;
pub use directory::DirectoryClient;
pub use fetch::Fetcher;
pub use merge::merge_organization;

// src/models/mod.rs

//! Domain models for the scraper application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod api;
mod organization;
mod progress;

// Re-export all public types
pub use api::{DetailPage, DiscoveryResponse, PreFetchedData};
pub use organization::{
    Category, ContactInfo, CoverPhoto, OrgId, Organization, OrganizationType, PrimaryContact,
    PrimaryContactId, SocialMedia,
};
pub use progress::Progress;

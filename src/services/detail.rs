// src/services/detail.rs

//! Detail-page enrichment.
//!
//! Detail pages embed their state as a one-line
//! `window.initialAppState = {...};` assignment. The captured object is
//! parsed twice: a typed decode for the organization schema, then a generic
//! tree walk for the loosely-shaped siblings the typed path cannot express.
//! The tree lookups fail closed: a missing or mistyped value stays absent.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::models::{CoverPhoto, DetailPage, Organization, PrimaryContactId};
use crate::services::fetch::{ACCEPT_HTML, Fetcher};

static APP_STATE_RE: OnceLock<Regex> = OnceLock::new();

fn app_state_regex() -> &'static Regex {
    APP_STATE_RE.get_or_init(|| {
        Regex::new(r"window\.initialAppState\s*=\s*(\{.*?\});").expect("app state pattern")
    })
}

/// Fetches and parses per-organization detail pages.
pub struct DetailEnricher {
    fetcher: Fetcher,
    site_url: String,
}

impl DetailEnricher {
    pub fn new(fetcher: Fetcher, config: &ApiConfig) -> Self {
        Self {
            fetcher,
            site_url: config.site_url.clone(),
        }
    }

    fn detail_url(&self, website_key: &str) -> String {
        format!("{}/organization/{website_key}", self.site_url)
    }

    /// Fetch the detail-page view of an organization.
    ///
    /// Requires a usable `websiteKey`; without one there is no page to fetch
    /// and the error is immediate, with no retry spent.
    pub async fn fetch_detail(&self, org: &Organization) -> Result<Organization> {
        let key = org
            .website_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::enrich(org.key(), "no websiteKey available"))?;

        let url = self.detail_url(key);
        self.fetcher.get_with(&url, ACCEPT_HTML, parse_detail_page).await
    }
}

/// Extract and decode the embedded state object of a detail page.
pub fn parse_detail_page(html: &str) -> Result<Organization> {
    let captures = app_state_regex()
        .captures(html)
        .ok_or_else(|| AppError::parse("detail page", "initialAppState assignment not found"))?;
    let blob = &captures[1];

    let page: DetailPage =
        serde_json::from_str(blob).map_err(|e| AppError::parse("initialAppState", e))?;
    let mut org = page
        .pre_fetched_data
        .organization
        .ok_or_else(|| AppError::parse("initialAppState", "missing preFetchedData.organization"))?;

    let tree: Value =
        serde_json::from_str(blob).map_err(|e| AppError::parse("initialAppState", e))?;

    if let Some(base) = tree
        .pointer("/preFetchedData/imageServerBaseUrl")
        .and_then(Value::as_str)
    {
        org.image_server_base_url = Some(base.to_string());
    }
    if let Some(photo) = tree
        .pointer("/preFetchedData/organization/coverPhoto")
        .and_then(Value::as_object)
    {
        org.cover_photo = Some(extract_cover_photo(photo));
    }
    if let Some(contact) = tree
        .pointer("/preFetchedData/organization/primaryContactId")
        .and_then(Value::as_object)
    {
        org.primary_contact_id = Some(extract_primary_contact_id(contact));
    }

    Ok(org)
}

/// Integer coercion for tree values; accepts whole-number floats.
fn as_int(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}

fn string_field(data: &Map<String, Value>, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(|s| s.to_string())
}

fn extract_cover_photo(data: &Map<String, Value>) -> CoverPhoto {
    CoverPhoto {
        id: data.get("id").and_then(as_int),
        image_id: string_field(data, "imageId"),
        image_path: string_field(data, "imagePath"),
        url: string_field(data, "url"),
        thumbnail_url: string_field(data, "thumbnailUrl"),
        caption: string_field(data, "caption"),
        date_created: string_field(data, "dateCreated"),
        institution_id: data.get("institutionId").and_then(as_int),
    }
}

fn extract_primary_contact_id(data: &Map<String, Value>) -> PrimaryContactId {
    PrimaryContactId {
        community_member_id: data.get("communityMemberId").and_then(as_int),
        account_id: string_field(data, "accountId"),
        campus_email: string_field(data, "campusEmail"),
    }
}

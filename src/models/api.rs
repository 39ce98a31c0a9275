//! Wire shapes of the discovery API and the detail-page state blob.

use serde::Deserialize;

use crate::models::Organization;

/// One page of the discovery search endpoint.
///
/// The envelope is OData-flavored; only `@odata.count` and `value` matter
/// to the pipeline, but the other keys are kept readable for diagnostics.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryResponse {
    #[serde(rename = "@odata.context", default)]
    pub context: Option<String>,

    /// Authoritative total across all pages, not the length of `value`
    #[serde(rename = "@odata.count", default)]
    pub count: usize,

    #[serde(rename = "@search.coverage", default)]
    pub coverage: Option<f64>,

    #[serde(default)]
    pub value: Vec<Organization>,
}

/// Typed view of the `window.initialAppState` assignment on a detail page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailPage {
    pub pre_fetched_data: PreFetchedData,
}

/// The server-side prefetch bundle embedded in the page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreFetchedData {
    pub organization: Option<Organization>,
}

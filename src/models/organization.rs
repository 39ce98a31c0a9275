//! Organization records as served by the CalLink directory.
//!
//! Field names mirror the upstream JSON exactly, including its
//! `profilePictureURL` casing and the misspelled `reRegistrationAvailabilty`
//! key. Every field except the identifier is optional: absence in the source
//! payload stays absence in our output instead of decaying to empty strings
//! or zeroes.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Organization identifier as it arrives on the wire.
///
/// The upstream API emits ids as JSON numbers, strings, or null depending on
/// the field and the record's age. `as_key` is the single normalization
/// point; filenames, queue membership, and checkpoint entries all use it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrgId {
    Int(i64),
    Str(String),
    #[default]
    Null,
}

impl OrgId {
    /// Normalized string form of the identifier.
    pub fn as_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrgId::Int(n) => write!(f, "{n}"),
            OrgId::Str(s) => write!(f, "{s}"),
            OrgId::Null => write!(f, "null"),
        }
    }
}

/// A single organization, combining list-API fields with detail-page fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Organization {
    // Core fields present in the list API
    pub id: OrgId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_organization_id: Option<OrgId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<OrgId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Slug of the public detail page under /organization/
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_key: Option<String>,
    /// Image file name relative to the image server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    /// Derived at merge time from the image server base and file name
    #[serde(rename = "profilePictureURL", skip_serializing_if = "Option::is_none")]
    pub profile_picture_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,

    // Fields only the detail page carries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_sort_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_join: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_change_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discussion_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_configuration_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_google_calendar: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_facebook_wall: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_twitter_feed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_shown_in_public_directory: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_branch: Option<bool>,
    /// Legacy identifiers keep the same polymorphic shape as `id`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_key: Option<OrgId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_legacy_key: Option<OrgId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legacy_primary_contact_key: Option<OrgId>,

    // Nested objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_contact: Option<PrimaryContact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_contact_id: Option<PrimaryContactId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<Vec<ContactInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_type: Option<OrganizationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submissions: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_photo: Option<CoverPhoto>,

    // Metadata attached during enrichment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_server_base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Organization {
    /// Normalized identifier used for filenames and checkpoint entries.
    pub fn key(&self) -> String {
        self.id.as_key()
    }
}

/// Social media links of an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_in_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flickr_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_calendar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_plus_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinterest_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tumblr_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vimeo_url: Option<String>,
}

/// Primary contact person of an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrimaryContact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy: Option<String>,
}

/// Loosely-shaped primary contact descriptor from the detail page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrimaryContactId {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_member_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campus_email: Option<String>,
}

/// Postal and phone contact entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fax_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

/// Feature switches of the organization's type.
///
/// The upstream key here is `shownInPublicDirectory`, unlike the
/// `isShownInPublicDirectory` key on the organization itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrganizationType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_members_to_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_officers_to_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_members_to_logged_in_users_by_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_officers_to_logged_in_users_by_default: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_approve_requests: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_hours_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finance_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finance_requests_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_requests_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_requests_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budgeting_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budgeting_requests_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elections_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forms_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcomes_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shown_in_public_directory: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_system_type: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_closed: Option<bool>,
    /// Upstream misspells this key; do not correct it
    #[serde(
        rename = "reRegistrationAvailabilty",
        skip_serializing_if = "Option::is_none"
    )]
    pub re_registration_availability: Option<String>,
}

/// Category label pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Cover image descriptor from the detail page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverPhoto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn org_id_decodes_int_string_and_null() {
        let ids: Vec<OrgId> = serde_json::from_str(r#"[1234, "ucb-chess", null]"#).unwrap();
        assert_eq!(
            ids,
            vec![
                OrgId::Int(1234),
                OrgId::Str("ucb-chess".to_string()),
                OrgId::Null
            ]
        );
    }

    #[test]
    fn org_id_key_is_normalized_once() {
        assert_eq!(OrgId::Int(42).as_key(), "42");
        assert_eq!(OrgId::Str("abc".into()).as_key(), "abc");
        assert_eq!(OrgId::Null.as_key(), "null");
    }

    #[test]
    fn missing_id_defaults_to_null() {
        let org: Organization = serde_json::from_str(r#"{"name":"No Id Club"}"#).unwrap();
        assert_eq!(org.id, OrgId::Null);
        assert_eq!(org.key(), "null");
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let org: Organization =
            serde_json::from_str(r#"{"id": 7, "name": "Chess Club"}"#).unwrap();
        let json = serde_json::to_string(&org).unwrap();
        assert!(json.contains(r#""id":7"#));
        assert!(json.contains(r#""name":"Chess Club""#));
        assert!(!json.contains("email"));
        assert!(!json.contains("profilePictureURL"));
        assert!(!json.contains("socialMedia"));
    }

    #[test]
    fn empty_string_survives_distinct_from_absent() {
        let org: Organization =
            serde_json::from_str(r#"{"id": 7, "summary": "", "websiteKey": "k"}"#).unwrap();
        assert_eq!(org.summary.as_deref(), Some(""));
        assert_eq!(org.description, None);
        let json = serde_json::to_string(&org).unwrap();
        assert!(json.contains(r#""summary":"""#));
        assert!(!json.contains("description"));
    }

    #[test]
    fn wire_names_follow_upstream_exactly() {
        let org = Organization {
            id: OrgId::Int(1),
            profile_picture_url: Some("https://img.example/a.png".into()),
            is_shown_in_public_directory: Some(true),
            organization_type: Some(OrganizationType {
                shown_in_public_directory: Some(false),
                re_registration_availability: Some("closed".into()),
                ..OrganizationType::default()
            }),
            ..Organization::default()
        };
        let json = serde_json::to_string(&org).unwrap();
        assert!(json.contains(r#""profilePictureURL""#));
        assert!(json.contains(r#""isShownInPublicDirectory":true"#));
        assert!(json.contains(r#""shownInPublicDirectory":false"#));
        assert!(json.contains(r#""reRegistrationAvailabilty":"closed""#));
    }

    #[test]
    fn list_api_record_decodes() {
        let json = r#"{
            "id": "92323",
            "institutionId": 1337,
            "name": "Anime Destiny",
            "websiteKey": "AnimeDestiny",
            "profilePicture": "pic.jpg",
            "categoryIds": ["11", "19"],
            "categoryNames": ["Performing Arts", "Cultural"],
            "status": "Active",
            "visibility": "Public"
        }"#;
        let org: Organization = serde_json::from_str(json).unwrap();
        assert_eq!(org.key(), "92323");
        assert_eq!(org.institution_id, Some(1337));
        assert_eq!(org.category_ids.as_deref(), Some(&["11".to_string(), "19".to_string()][..]));
        assert_eq!(org.email, None);
    }
}

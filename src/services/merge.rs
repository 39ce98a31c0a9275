// src/services/merge.rs

//! Reconciliation of list-API records with detail-page records.
//!
//! Pure functions only; every precedence decision lives here so the worker
//! loop stays mechanical.

use crate::models::Organization;

/// Image host used when a record names a picture but no image server.
pub const FALLBACK_IMAGE_BASE: &str = "https://se-images.campuslabs.com/clink/images";

/// Merge a list-view record with its detail-view counterpart.
///
/// The detail view is the base. The list view contributes its category
/// collections only when the detail view's are absent or empty; a non-empty
/// detail collection is never shrunk. `profilePictureURL` is derived from
/// the picture file name and the image-server base, and `baseUrl` is pinned
/// to the canonical site root.
pub fn merge_organization(
    list: &Organization,
    detail: Organization,
    site_url: &str,
) -> Organization {
    let mut merged = detail;

    if is_missing(&merged.category_ids) && !is_missing(&list.category_ids) {
        merged.category_ids = list.category_ids.clone();
    }
    if is_missing(&merged.category_names) && !is_missing(&list.category_names) {
        merged.category_names = list.category_names.clone();
    }

    let picture = merged.profile_picture.as_deref().filter(|p| !p.is_empty());
    let base = merged
        .image_server_base_url
        .as_deref()
        .filter(|b| !b.is_empty());
    merged.profile_picture_url = match (picture, base) {
        (Some(picture), Some(base)) => Some(format!("{base}/{picture}")),
        (Some(picture), None) => Some(format!("{FALLBACK_IMAGE_BASE}/{picture}")),
        (None, _) => None,
    };

    merged.base_url = Some(site_url.to_string());
    merged
}

/// Absent or empty; both count as "nothing to preserve".
fn is_missing(collection: &Option<Vec<String>>) -> bool {
    collection.as_ref().is_none_or(|v| v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrgId;

    const SITE: &str = "https://callink.berkeley.edu";

    fn list_org() -> Organization {
        Organization {
            id: OrgId::Int(1),
            category_ids: Some(vec!["11".into(), "19".into()]),
            category_names: Some(vec!["Cultural".into()]),
            ..Organization::default()
        }
    }

    #[test]
    fn detail_wins_when_it_has_categories() {
        let detail = Organization {
            category_ids: Some(vec!["7".into()]),
            category_names: Some(vec!["Sports".into()]),
            ..Organization::default()
        };
        let merged = merge_organization(&list_org(), detail, SITE);
        assert_eq!(merged.category_ids, Some(vec!["7".to_string()]));
        assert_eq!(merged.category_names, Some(vec!["Sports".to_string()]));
    }

    #[test]
    fn list_fills_absent_detail_categories() {
        let merged = merge_organization(&list_org(), Organization::default(), SITE);
        assert_eq!(
            merged.category_ids,
            Some(vec!["11".to_string(), "19".to_string()])
        );
        assert_eq!(merged.category_names, Some(vec!["Cultural".to_string()]));
    }

    #[test]
    fn list_fills_empty_detail_categories() {
        let detail = Organization {
            category_ids: Some(Vec::new()),
            ..Organization::default()
        };
        let merged = merge_organization(&list_org(), detail, SITE);
        assert_eq!(
            merged.category_ids,
            Some(vec!["11".to_string(), "19".to_string()])
        );
    }

    #[test]
    fn empty_list_categories_are_not_copied() {
        let list = Organization {
            category_ids: Some(Vec::new()),
            ..Organization::default()
        };
        let merged = merge_organization(&list, Organization::default(), SITE);
        assert_eq!(merged.category_ids, None);
    }

    #[test]
    fn picture_url_prefers_known_image_server() {
        let detail = Organization {
            profile_picture: Some("f.png".into()),
            image_server_base_url: Some("https://img.example".into()),
            ..Organization::default()
        };
        let merged = merge_organization(&list_org(), detail, SITE);
        assert_eq!(
            merged.profile_picture_url.as_deref(),
            Some("https://img.example/f.png")
        );
    }

    #[test]
    fn picture_url_falls_back_without_image_server() {
        let detail = Organization {
            profile_picture: Some("f.png".into()),
            ..Organization::default()
        };
        let merged = merge_organization(&list_org(), detail, SITE);
        assert_eq!(
            merged.profile_picture_url.as_deref(),
            Some("https://se-images.campuslabs.com/clink/images/f.png")
        );
    }

    #[test]
    fn no_picture_means_no_url() {
        let detail = Organization {
            image_server_base_url: Some("https://img.example".into()),
            ..Organization::default()
        };
        let merged = merge_organization(&list_org(), detail, SITE);
        assert_eq!(merged.profile_picture_url, None);
    }

    #[test]
    fn base_url_is_pinned_to_site_root() {
        let merged = merge_organization(&list_org(), Organization::default(), SITE);
        assert_eq!(merged.base_url.as_deref(), Some(SITE));
    }
}

//! Link-exchange application store: submissions and operator review.

use chrono::Utc;
use serde::Deserialize;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;

use super::{
    ApplicationStatus, FriendLink, JsonFile, LinkApplication, LinkDocument, StoreError,
};

/// Longest accepted site name, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Submission failure reasons.
#[derive(Error, Debug)]
pub enum ApplyError {
    #[error("missing required fields")]
    MissingField,
    #[error("site name too long (max 20 characters)")]
    NameTooLong,
    #[error("application already exists")]
    Duplicate,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Review failure reasons.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("application not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Operator verdict on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Approve,
    Reject,
}

/// Incoming submission body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub site_url: String,
    #[serde(default)]
    pub language: String,
}

/// Whole-document store for `links.json`.
///
/// The mutex spans each read-modify-write so two submissions cannot
/// interleave and lose an application.
pub struct LinkStore {
    file: Mutex<JsonFile>,
}

impl LinkStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            file: Mutex::new(JsonFile::new(data_dir.as_ref().join("links.json"))),
        }
    }

    /// Load the document; a missing file is an empty document.
    pub fn load(&self) -> Result<LinkDocument, StoreError> {
        let file = self.file.lock().unwrap();
        Ok(file.read()?.unwrap_or_default())
    }

    /// Validate and record a new pending application.
    pub fn submit(&self, req: ApplyRequest) -> Result<LinkApplication, ApplyError> {
        if req.site_name.is_empty() || req.site_url.is_empty() {
            return Err(ApplyError::MissingField);
        }
        if req.site_name.chars().count() > MAX_NAME_LEN {
            return Err(ApplyError::NameTooLong);
        }

        let file = self.file.lock().unwrap();
        let mut doc: LinkDocument = file.read()?.unwrap_or_default();

        let duplicate = doc
            .applications
            .iter()
            .any(|app| app.site_url == req.site_url || app.site_name == req.site_name);
        if duplicate {
            return Err(ApplyError::Duplicate);
        }

        let now = Utc::now();
        let application = LinkApplication {
            id: now.timestamp_millis().to_string(),
            site_name: req.site_name,
            site_url: req.site_url,
            language: req.language,
            timestamp: now,
            status: ApplicationStatus::Pending,
            rejected_at: None,
        };
        doc.applications.push(application.clone());
        file.write(&doc)?;

        tracing::info!("LinkStore: application {} submitted", application.id);
        Ok(application)
    }

    /// Apply an operator verdict to a pending application.
    ///
    /// Approval moves the entry onto the approved list; rejection marks it
    /// in place so the submitter can see the verdict.
    pub fn review(&self, id: &str, action: ReviewAction) -> Result<(), ReviewError> {
        let file = self.file.lock().unwrap();
        let mut doc: LinkDocument = file
            .read()
            .map_err(ReviewError::Store)?
            .unwrap_or_default();

        let index = doc
            .applications
            .iter()
            .position(|app| app.id == id)
            .ok_or(ReviewError::NotFound)?;

        match action {
            ReviewAction::Approve => {
                let app = doc.applications.remove(index);
                doc.approved.push(FriendLink {
                    id: app.id,
                    title: app.site_name,
                    url: app.site_url,
                    language: if app.language.is_empty() {
                        None
                    } else {
                        Some(app.language)
                    },
                });
            }
            ReviewAction::Reject => {
                let app = &mut doc.applications[index];
                app.status = ApplicationStatus::Rejected;
                app.rejected_at = Some(Utc::now());
            }
        }

        file.write(&doc).map_err(ReviewError::Store)?;
        tracing::info!("LinkStore: application {} reviewed", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, url: &str) -> ApplyRequest {
        ApplyRequest {
            site_name: name.to_string(),
            site_url: url.to_string(),
            language: "en".to_string(),
        }
    }

    #[test]
    fn test_submit_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = LinkStore::new(dir.path());

        let app = store.submit(request("partner", "https://partner.example")).unwrap();
        assert_eq!(app.status, ApplicationStatus::Pending);

        let doc = store.load().unwrap();
        assert_eq!(doc.applications.len(), 1);
        assert_eq!(doc.applications[0].site_name, "partner");
        assert!(doc.approved.is_empty());
    }

    #[test]
    fn test_submit_validates_fields() {
        let dir = tempfile::tempdir().unwrap();
        let store = LinkStore::new(dir.path());

        assert!(matches!(
            store.submit(request("", "https://a.example")),
            Err(ApplyError::MissingField)
        ));
        assert!(matches!(
            store.submit(request("name", "")),
            Err(ApplyError::MissingField)
        ));
        assert!(matches!(
            store.submit(request("a-name-far-over-twenty-characters", "https://a.example")),
            Err(ApplyError::NameTooLong)
        ));

        // Nothing was written.
        assert!(store.load().unwrap().applications.is_empty());
    }

    #[test]
    fn test_submit_rejects_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let store = LinkStore::new(dir.path());

        store.submit(request("partner", "https://partner.example")).unwrap();

        assert!(matches!(
            store.submit(request("partner", "https://other.example")),
            Err(ApplyError::Duplicate)
        ));
        assert!(matches!(
            store.submit(request("other", "https://partner.example")),
            Err(ApplyError::Duplicate)
        ));
    }

    #[test]
    fn test_approve_moves_to_approved_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = LinkStore::new(dir.path());

        let app = store.submit(request("partner", "https://partner.example")).unwrap();
        store.review(&app.id, ReviewAction::Approve).unwrap();

        let doc = store.load().unwrap();
        assert!(doc.applications.is_empty());
        assert_eq!(doc.approved.len(), 1);
        assert_eq!(doc.approved[0].title, "partner");
        assert_eq!(doc.approved[0].url, "https://partner.example");
        assert_eq!(doc.approved[0].language.as_deref(), Some("en"));
    }

    #[test]
    fn test_reject_marks_application_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let store = LinkStore::new(dir.path());

        let app = store.submit(request("partner", "https://partner.example")).unwrap();
        store.review(&app.id, ReviewAction::Reject).unwrap();

        let doc = store.load().unwrap();
        assert_eq!(doc.applications.len(), 1);
        assert_eq!(doc.applications[0].status, ApplicationStatus::Rejected);
        assert!(doc.applications[0].rejected_at.is_some());
        assert!(doc.approved.is_empty());
    }

    #[test]
    fn test_review_unknown_id_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LinkStore::new(dir.path());

        assert!(matches!(
            store.review("12345", ReviewAction::Approve),
            Err(ReviewError::NotFound)
        ));
    }
}

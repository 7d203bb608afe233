//! Site content store: ads, friend links, SEO text, route catalogs.

use std::path::Path;
use std::sync::Mutex;

use super::{JsonFile, SiteDocument, StoreError};

/// Whole-document store for `site.json`.
///
/// Saves are blind overwrites: two concurrent admin saves are last-write-wins.
pub struct SiteStore {
    file: Mutex<JsonFile>,
}

impl SiteStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            file: Mutex::new(JsonFile::new(data_dir.as_ref().join("site.json"))),
        }
    }

    /// Load the document, falling back to the built-in defaults when the
    /// file is absent or unreadable.
    pub fn load(&self) -> SiteDocument {
        let file = self.file.lock().unwrap();
        match file.read() {
            Ok(Some(doc)) => doc,
            Ok(None) => SiteDocument::default(),
            Err(err) => {
                tracing::warn!(
                    "SiteStore: {} unreadable, serving defaults: {}",
                    file.path().display(),
                    err
                );
                SiteDocument::default()
            }
        }
    }

    /// Replace the whole document.
    pub fn save(&self, doc: &SiteDocument) -> Result<(), StoreError> {
        let file = self.file.lock().unwrap();
        file.write(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FriendLink;

    #[test]
    fn test_load_missing_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SiteStore::new(dir.path());

        let doc = store.load();
        assert!(doc.friend_links.is_empty());
        assert!(!doc.route_config.domestic.is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SiteStore::new(dir.path());

        let mut doc = SiteDocument::default();
        doc.friend_links.push(FriendLink {
            id: "1".to_string(),
            title: "partner".to_string(),
            url: "https://partner.example".to_string(),
            language: None,
        });
        store.save(&doc).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.friend_links.len(), 1);
        assert_eq!(loaded.friend_links[0].title, "partner");
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("site.json"), "{broken").unwrap();

        let store = SiteStore::new(dir.path());
        let doc = store.load();
        assert!(doc.top_ads.is_empty());
        assert!(!doc.seo_config.en.title.is_empty());
    }
}

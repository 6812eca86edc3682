//! Caller-resolvable references to catalog resources.
//!
//! Detail projections never expose a related entity's raw id on its own;
//! they hand out a URL the caller can follow instead.

use crate::types::EntityId;

/// Builds absolute resource URLs from the public API base URL.
#[derive(Debug, Clone)]
pub struct ResourceLinks {
    base_url: String,
}

impl ResourceLinks {
    /// `base_url` is the public prefix of the API, e.g.
    /// `https://catalog.example.com/api/v1`. A trailing slash is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn character(&self, id: EntityId) -> String {
        format!("{}/characters/{id}", self.base_url)
    }

    pub fn film(&self, id: EntityId) -> String {
        format!("{}/movies/{id}", self.base_url)
    }

    pub fn genre(&self, id: EntityId) -> String {
        format!("{}/genres/{id}", self.base_url)
    }
}

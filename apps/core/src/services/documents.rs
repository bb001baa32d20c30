//! Download-link construction for the published CV document.
//!
//! The document itself is served by the frontend; this side only hands
//! out the stable link pointing at its download page.

use url::Url;

use crate::error::AppError;
use crate::services::traits::DocumentLinks;

const DOWNLOAD_PATH: &str = "download-cv";

/// Link builder rooted at a validated frontend base URL.
pub struct StaticDocumentLinks {
    base: Url,
}

impl StaticDocumentLinks {
    /// Parses the base URL once up front so link construction stays
    /// infallible afterwards.
    pub fn new(frontend_url: &str) -> Result<Self, AppError> {
        let base = Url::parse(frontend_url)?;
        Ok(Self { base })
    }
}

impl DocumentLinks for StaticDocumentLinks {
    fn build_download_url(&self, _profile_id: i64) -> String {
        let root = self.base.as_str().trim_end_matches('/');
        format!("{}/{}", root, DOWNLOAD_PATH)
    }
}

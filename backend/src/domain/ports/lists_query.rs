//! Driving port for the visible-lists read model.

use async_trait::async_trait;

use crate::domain::{CategoryId, Error, ListView, Uid};

/// Domain use-case port answering "which lists can this viewer see".
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListsQuery: Send + Sync {
    /// Lists visible to `viewer`, newest first, optionally narrowed to one
    /// category. Profile and category enrichment is best-effort.
    async fn lists_visible_to(
        &self,
        viewer: Option<Uid>,
        category: Option<CategoryId>,
    ) -> Result<Vec<ListView>, Error>;
}

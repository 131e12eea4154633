use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::Listing;
use crate::tour::notify::{messages, Notifier};

/// Payload handed to the platform share sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareContent {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareContent {
    pub fn for_listing(listing: &Listing, url: impl Into<String>) -> Self {
        Self {
            title: listing.title.clone(),
            text: format!("{} - {}, {}", listing.title, listing.district, listing.city),
            url: url.into(),
        }
    }
}

/// Platform share sheet and clipboard
#[async_trait]
pub trait ShareTarget: Send + Sync {
    fn supports_share_sheet(&self) -> bool;

    async fn share_sheet(&self, content: &ShareContent) -> Result<()>;

    async fn copy_to_clipboard(&self, url: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    Failed,
}

/// Share the page through the share sheet, falling back to the clipboard.
/// Only the clipboard fallback is announced to the visitor.
pub async fn share_listing(
    listing: &Listing,
    page_url: &str,
    target: &dyn ShareTarget,
    notifier: &dyn Notifier,
) -> ShareOutcome {
    let content = ShareContent::for_listing(listing, page_url);

    if target.supports_share_sheet() {
        match target.share_sheet(&content).await {
            Ok(()) => {
                debug!("Shared {} via share sheet", content.url);
                return ShareOutcome::Shared;
            }
            Err(e) => debug!("Share sheet failed, copying link instead: {}", e),
        }
    }

    match target.copy_to_clipboard(&content.url).await {
        Ok(()) => {
            notifier.success(messages::LINK_COPIED);
            ShareOutcome::Copied
        }
        Err(e) => {
            warn!("Could not copy share link: {}", e);
            ShareOutcome::Failed
        }
    }
}

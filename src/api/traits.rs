use crate::api::types::VisitorRegistration;
use crate::error::Result;
use crate::models::{Listing, Visitor, VisitRecord};
use async_trait::async_trait;

/// Remote listing backend consumed by the tour page
/// The page only reads listings and writes visitors and visit summaries
#[async_trait]
pub trait ListingApi: Send + Sync {
    /// Fetch one listing by id
    async fn fetch_listing(&self, listing_id: &str) -> Result<Listing>;

    /// Register the visitor who completed the gate form
    async fn register_visitor(&self, registration: &VisitorRegistration) -> Result<Visitor>;

    /// Submit the summary of a finished viewing session
    async fn submit_visit(&self, record: &VisitRecord) -> Result<()>;
}

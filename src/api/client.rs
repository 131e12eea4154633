use crate::api::traits::ListingApi;
use crate::api::types::VisitorRegistration;
use crate::config::Config;
use crate::error::{Result, TourError};
use crate::models::{Listing, Visitor, VisitRecord};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, info, warn};

/// reqwest implementation of the listing backend
pub struct HttpListingApi {
    client: Client,
    base_url: String,
}

impl HttpListingApi {
    /// Create a client for the API rooted at `config.api_url()`
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("tour-view/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check(endpoint: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        warn!("{} returned status: {}", endpoint, status);
        Err(TourError::Status {
            endpoint: endpoint.to_string(),
            status,
        })
    }
}

#[async_trait]
impl ListingApi for HttpListingApi {
    async fn fetch_listing(&self, listing_id: &str) -> Result<Listing> {
        let url = self.url(&format!("/properties/{}", listing_id));
        debug!("Fetching URL: {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(TourError::NotFound(listing_id.to_string()));
        }

        let listing: Listing = Self::check("GET /properties", response)?.json().await?;
        info!(
            "Loaded listing {} with {} rooms and {} points of interest",
            listing.id,
            listing.rooms.len(),
            listing.pois.len()
        );
        Ok(listing)
    }

    async fn register_visitor(&self, registration: &VisitorRegistration) -> Result<Visitor> {
        let url = self.url("/visitors/register");
        debug!("Registering visitor for listing {}", registration.property_id);

        let response = self.client.post(&url).json(registration).send().await?;
        let visitor: Visitor = Self::check("POST /visitors/register", response)?
            .json()
            .await?;
        Ok(visitor)
    }

    async fn submit_visit(&self, record: &VisitRecord) -> Result<()> {
        let url = self.url("/visits");
        debug!(
            "Submitting visit: {}s, {} rooms",
            record.duration,
            record.rooms_visited.len()
        );

        let response = self.client.post(&url).json(record).send().await?;
        Self::check("POST /visits", response)?;
        Ok(())
    }
}

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::api::traits::ListingApi;
use crate::api::types::VisitorRegistration;
use crate::error::{Result, TourError};
use crate::models::{Listing, VisitRecord, Visitor};

/// In-memory backend for unit tests
#[derive(Default)]
pub struct FakeApi {
    pub listing: Option<Listing>,
    pub fail_registration: bool,
    pub fail_visits: bool,
    pub registration_delay: Option<Duration>,
    pub registrations: Mutex<Vec<VisitorRegistration>>,
    pub visits: Mutex<Vec<VisitRecord>>,
}

impl FakeApi {
    pub fn with_listing(listing: Listing) -> Self {
        Self {
            listing: Some(listing),
            ..Self::default()
        }
    }

    pub fn registration_count(&self) -> usize {
        self.registrations.lock().unwrap().len()
    }

    pub fn visits(&self) -> Vec<VisitRecord> {
        self.visits.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListingApi for FakeApi {
    async fn fetch_listing(&self, listing_id: &str) -> Result<Listing> {
        self.listing
            .clone()
            .filter(|listing| listing.id == listing_id)
            .ok_or_else(|| TourError::NotFound(listing_id.to_string()))
    }

    async fn register_visitor(&self, registration: &VisitorRegistration) -> Result<Visitor> {
        self.registrations.lock().unwrap().push(registration.clone());
        if let Some(delay) = self.registration_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_registration {
            return Err(TourError::Validation("backend rejected visitor".to_string()));
        }
        Ok(Visitor {
            id: format!("visitor-{}", self.registration_count()),
            first_name: registration.first_name.clone(),
            last_name: registration.last_name.clone(),
            phone: registration.phone.clone(),
            created_at: Some(Utc::now()),
        })
    }

    async fn submit_visit(&self, record: &VisitRecord) -> Result<()> {
        self.visits.lock().unwrap().push(record.clone());
        if self.fail_visits {
            return Err(TourError::Validation("backend rejected visit".to_string()));
        }
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::api::ListingApi;
use crate::models::{VisitRecord, Visitor};

/// Distinct room ids in first-visit order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedRooms {
    ids: Vec<String>,
}

impl VisitedRooms {
    /// Returns false if the room was already visited
    pub fn insert(&mut self, room_id: &str) -> bool {
        if self.ids.iter().any(|id| id == room_id) {
            return false;
        }
        self.ids.push(room_id.to_string());
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Accumulates the visit of one session and yields its record once
#[derive(Debug)]
pub struct VisitTracker {
    listing_id: String,
    visitor_id: Option<String>,
    started_at: Option<DateTime<Utc>>,
    visited: VisitedRooms,
    flushed: bool,
}

impl VisitTracker {
    pub fn new(listing_id: impl Into<String>) -> Self {
        Self {
            listing_id: listing_id.into(),
            visitor_id: None,
            started_at: None,
            visited: VisitedRooms::default(),
            flushed: false,
        }
    }

    /// Start timing for `visitor`. Only the first call has an effect.
    pub fn start(&mut self, visitor: &Visitor, now: DateTime<Utc>) {
        if self.started_at.is_some() {
            return;
        }
        self.visitor_id = Some(visitor.id.clone());
        self.started_at = Some(now);
        debug!("Visit of {} started at {}", self.listing_id, now);
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn record_room(&mut self, room_id: &str) {
        if self.visited.insert(room_id) {
            debug!("Visited room {}", room_id);
        }
    }

    pub fn visited(&self) -> &VisitedRooms {
        &self.visited
    }

    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    /// Close the session and build its record.
    /// Yields at most once; `None` if no visitor ever unlocked the view.
    pub fn take_record(&mut self, now: DateTime<Utc>) -> Option<VisitRecord> {
        if self.flushed {
            return None;
        }
        self.flushed = true;

        let visitor_id = self.visitor_id.clone()?;
        let started_at = self.started_at?;

        Some(VisitRecord {
            property_id: self.listing_id.clone(),
            visitor_id,
            duration: duration_secs(started_at, now),
            rooms_visited: self.visited.as_slice().to_vec(),
        })
    }
}

/// Elapsed seconds, rounded half up
fn duration_secs(start: DateTime<Utc>, end: DateTime<Utc>) -> u64 {
    let millis = (end - start).num_milliseconds().max(0) as u64;
    (millis + 500) / 1000
}

/// Send a visit record. Failures are logged and never retried.
pub async fn submit_visit(api: &dyn ListingApi, record: &VisitRecord) {
    match api.submit_visit(record).await {
        Ok(()) => info!(
            "Tracked visit of {}: {}s, {} rooms",
            record.property_id,
            record.duration,
            record.rooms_visited.len()
        ),
        Err(e) => warn!("Visit tracking failed: {}", e),
    }
}

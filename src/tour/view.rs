//! Page lifecycle and view state of the tour.
//!
//! [`TourPage`] walks `Loading -> NotFound | Gated -> Unlocked`. Once the
//! visitor is through the gate the page holds a [`TourSession`], which owns
//! every piece of per-visit state and submits the visit record when it ends.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api::ListingApi;
use crate::error::{Result, TourError};
use crate::models::{Listing, Room, VisitRecord, Visitor};
use crate::tour::gate::VisitorGate;
use crate::tour::lighting::{compute_filter, LightingHour, SunFilter};
use crate::tour::navigation::{Navigator, PhotoStep};
use crate::tour::notify::{messages, Notifier};
use crate::tour::tracker::{submit_visit, VisitTracker, VisitedRooms};

/// Which screen is on display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Summary,
    FloorPlan,
    Tour { fullscreen: bool },
}

/// Controls visible on the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub floor_plan_button: bool,
    pub room_strip: bool,
    pub photo_arrows: bool,
    pub lighting_slider: bool,
}

/// What the tour viewport shows for the current room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomMedia<'a> {
    Panorama { url: &'a str },
    Photo { url: &'a str, index: usize, total: usize },
    Empty,
}

/// State of one unlocked viewing session
pub struct TourSession {
    api: Arc<dyn ListingApi>,
    listing: Listing,
    visitor: Visitor,
    mode: ViewMode,
    navigator: Navigator,
    hour: LightingHour,
    tracker: VisitTracker,
}

impl TourSession {
    pub fn new(api: Arc<dyn ListingApi>, listing: Listing, visitor: Visitor) -> Self {
        Self::starting_at(api, listing, visitor, Utc::now())
    }

    /// Open a session whose visit clock started at `now`
    pub fn starting_at(
        api: Arc<dyn ListingApi>,
        listing: Listing,
        visitor: Visitor,
        now: DateTime<Utc>,
    ) -> Self {
        let mut tracker = VisitTracker::new(listing.id.clone());
        tracker.start(&visitor, now);

        Self {
            api,
            navigator: Navigator::new(&listing),
            listing,
            visitor,
            mode: ViewMode::Summary,
            hour: LightingHour::default(),
            tracker,
        }
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn visitor(&self) -> &Visitor {
        &self.visitor
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.tracker.started_at()
    }

    pub fn visited_rooms(&self) -> &VisitedRooms {
        self.tracker.visited()
    }

    pub fn open_summary(&mut self) {
        self.set_mode(ViewMode::Summary);
    }

    pub fn open_floor_plan(&mut self) {
        self.set_mode(ViewMode::FloorPlan);
    }

    /// Enter the tour on the current room
    pub fn open_tour(&mut self) {
        if !matches!(self.mode, ViewMode::Tour { .. }) {
            self.set_mode(ViewMode::Tour { fullscreen: false });
        }
        if let Some(room_id) = self.navigator.current_room_id() {
            self.tracker.record_room(room_id);
        }
    }

    /// Floor plan card click: select the room and enter the tour
    pub fn open_room(&mut self, index: usize) {
        if let Some(room_id) = self.navigator.jump_to_room(index) {
            self.tracker.record_room(&room_id);
        }
        self.open_tour();
    }

    /// Toggle fullscreen; has no effect outside the tour
    pub fn toggle_fullscreen(&mut self) {
        if let ViewMode::Tour { fullscreen } = self.mode {
            self.set_mode(ViewMode::Tour {
                fullscreen: !fullscreen,
            });
        }
    }

    pub fn is_fullscreen(&self) -> bool {
        matches!(self.mode, ViewMode::Tour { fullscreen: true })
    }

    pub fn select_room(&mut self, index: usize) {
        self.navigator.request_room(index, Instant::now());
    }

    pub fn next_photo(&mut self) {
        self.navigator.request_step(PhotoStep::Next, Instant::now());
    }

    pub fn prev_photo(&mut self) {
        self.navigator.request_step(PhotoStep::Prev, Instant::now());
    }

    pub fn select_photo(&mut self, index: usize) {
        self.navigator.request_photo(index, Instant::now());
    }

    pub fn is_transitioning(&self) -> bool {
        self.navigator.is_transitioning()
    }

    /// Apply the navigation commits due at `now`
    pub fn advance(&mut self, now: Instant) {
        for room_id in self.navigator.advance(now) {
            self.tracker.record_room(&room_id);
        }
    }

    /// Wait until every pending navigation request has been committed
    pub async fn settle(&mut self) {
        while let Some(due) = self.navigator.next_due() {
            tokio::time::sleep_until(due).await;
            self.advance(Instant::now());
        }
    }

    pub fn current_room_index(&self) -> Option<usize> {
        self.navigator.current_room()
    }

    pub fn current_photo_index(&self) -> Option<usize> {
        self.navigator.current_photo()
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.listing.rooms.get(self.navigator.current_room()?)
    }

    pub fn room_media(&self) -> RoomMedia<'_> {
        let Some(room) = self.current_room() else {
            return RoomMedia::Empty;
        };

        if self.listing.is_panoramic() {
            if let Some(url) = room.panorama_photo.as_deref() {
                return RoomMedia::Panorama { url };
            }
        }

        match self.navigator.current_photo() {
            Some(index) => RoomMedia::Photo {
                url: &room.photos[index],
                index,
                total: room.photos.len(),
            },
            None => RoomMedia::Empty,
        }
    }

    pub fn set_hour(&mut self, hour: u8) {
        self.hour = LightingHour::new(hour);
    }

    pub fn hour(&self) -> LightingHour {
        self.hour
    }

    pub fn filter(&self) -> SunFilter {
        compute_filter(self.hour)
    }

    pub fn controls(&self) -> Controls {
        let has_rooms = !self.listing.rooms.is_empty();
        let in_tour = matches!(self.mode, ViewMode::Tour { .. });
        let chrome = in_tour && !self.is_fullscreen();
        let multi_photo = matches!(self.room_media(), RoomMedia::Photo { total, .. } if total > 1);

        Controls {
            floor_plan_button: has_rooms && self.mode != ViewMode::FloorPlan,
            room_strip: chrome && self.listing.rooms.len() > 1,
            photo_arrows: in_tour && multi_photo,
            lighting_slider: chrome,
        }
    }

    /// End the session and submit its visit record
    pub async fn end(self) -> Option<VisitRecord> {
        self.end_at(Utc::now()).await
    }

    pub async fn end_at(mut self, now: DateTime<Utc>) -> Option<VisitRecord> {
        let record = self.tracker.take_record(now)?;
        submit_visit(self.api.as_ref(), &record).await;
        Some(record)
    }

    fn set_mode(&mut self, mode: ViewMode) {
        debug!("View {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
    }
}

impl Drop for TourSession {
    fn drop(&mut self) {
        let Some(record) = self.tracker.take_record(Utc::now()) else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let api = Arc::clone(&self.api);
                handle.spawn(async move {
                    submit_visit(api.as_ref(), &record).await;
                });
            }
            Err(_) => warn!(
                "Session of {} dropped outside a runtime, visit not tracked",
                record.property_id
            ),
        }
    }
}

/// Lifecycle phase of the page
pub enum PageState {
    Loading,
    NotFound,
    Gated { listing: Listing, gate: VisitorGate },
    Unlocked(TourSession),
}

/// Tour page for a single listing
pub struct TourPage {
    api: Arc<dyn ListingApi>,
    notifier: Arc<dyn Notifier>,
    state: PageState,
}

impl TourPage {
    pub fn new(api: Arc<dyn ListingApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: PageState::Loading,
        }
    }

    /// Fetch the listing. Any failure leaves the page in `NotFound`.
    pub async fn load(&mut self, listing_id: &str) {
        info!("Loading listing {}", listing_id);
        self.state = match self.api.fetch_listing(listing_id).await {
            Ok(listing) => PageState::Gated {
                gate: VisitorGate::new(listing.id.clone()),
                listing,
            },
            Err(e) => {
                warn!("Listing {} unavailable: {}", listing_id, e);
                self.notifier.error(messages::NOT_FOUND);
                PageState::NotFound
            }
        };
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn listing(&self) -> Option<&Listing> {
        match &self.state {
            PageState::Gated { listing, .. } => Some(listing),
            PageState::Unlocked(session) => Some(session.listing()),
            PageState::Loading | PageState::NotFound => None,
        }
    }

    pub fn gate_mut(&mut self) -> Option<&mut VisitorGate> {
        match &mut self.state {
            PageState::Gated { gate, .. } => Some(gate),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&TourSession> {
        match &self.state {
            PageState::Unlocked(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut TourSession> {
        match &mut self.state {
            PageState::Unlocked(session) => Some(session),
            _ => None,
        }
    }

    /// Submit the gate form; on success the page is unlocked
    /// The page reads as `Loading` while the registration is pending.
    pub async fn submit_visitor(&mut self) -> Result<()> {
        let (listing, gate) = match std::mem::replace(&mut self.state, PageState::Loading) {
            PageState::Gated { listing, gate } => (listing, gate),
            other => {
                self.state = other;
                return Err(TourError::Validation("page is not gated".to_string()));
            }
        };

        match gate.submit(self.api.as_ref(), self.notifier.as_ref()).await {
            Ok(visitor) => {
                self.state =
                    PageState::Unlocked(TourSession::new(Arc::clone(&self.api), listing, visitor));
                Ok(())
            }
            Err(e) => {
                self.state = PageState::Gated { listing, gate };
                Err(e)
            }
        }
    }

    pub fn into_session(self) -> Option<TourSession> {
        match self.state {
            PageState::Unlocked(session) => Some(session),
            _ => None,
        }
    }

    /// Tear the page down, submitting the visit if one was unlocked
    pub async fn teardown(self) -> Option<VisitRecord> {
        self.into_session()?.end().await
    }
}

//! Room and photo navigation inside the tour view.
//!
//! Every request goes through a two-phase transition: it is recorded
//! immediately (the view fades out) and committed once
//! [`TRANSITION_DELAY`] has elapsed. Pending commits are never cancelled;
//! each one overwrites the index when it fires, so the last request wins.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::models::Listing;

/// Fade duration between two photos or rooms
pub const TRANSITION_DELAY: Duration = Duration::from_millis(300);

/// Direction of a relative photo step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoStep {
    Next,
    Prev,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Request {
    Room(usize),
    Photo(usize),
    Step(PhotoStep),
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: Instant,
    request: Request,
}

#[derive(Debug, Clone)]
struct RoomSlot {
    id: String,
    photos: usize,
}

/// Current room and photo of the tour, with scheduled commits
#[derive(Debug, Clone)]
pub struct Navigator {
    rooms: Vec<RoomSlot>,
    room: usize,
    photo: usize,
    pending: Vec<Pending>,
}

impl Navigator {
    pub fn new(listing: &Listing) -> Self {
        let rooms = listing
            .rooms
            .iter()
            .map(|room| RoomSlot {
                id: room.id.clone(),
                photos: room.photos.len(),
            })
            .collect();

        Self {
            rooms,
            room: 0,
            photo: 0,
            pending: Vec::new(),
        }
    }

    /// Index of the committed room, `None` for a listing without rooms
    pub fn current_room(&self) -> Option<usize> {
        (!self.rooms.is_empty()).then_some(self.room)
    }

    /// Index of the committed photo, `None` when the room has no photos
    pub fn current_photo(&self) -> Option<usize> {
        let slot = self.rooms.get(self.room)?;
        (slot.photos > 0).then_some(self.photo)
    }

    pub fn current_room_id(&self) -> Option<&str> {
        self.rooms.get(self.room).map(|slot| slot.id.as_str())
    }

    /// True while a requested change has not been committed yet
    pub fn is_transitioning(&self) -> bool {
        !self.pending.is_empty()
    }

    /// When the next pending commit fires
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|pending| pending.due).min()
    }

    pub fn request_room(&mut self, index: usize, now: Instant) {
        if index >= self.rooms.len() {
            warn!("Ignoring request for room {} of {}", index, self.rooms.len());
            return;
        }
        self.schedule(Request::Room(index), now);
    }

    pub fn request_step(&mut self, step: PhotoStep, now: Instant) {
        if self.photo_count() == 0 {
            return;
        }
        self.schedule(Request::Step(step), now);
    }

    pub fn request_photo(&mut self, index: usize, now: Instant) {
        if index >= self.photo_count() {
            return;
        }
        self.schedule(Request::Photo(index), now);
    }

    /// Select a room without a fade, as the floor plan does.
    /// Returns the id of the entered room.
    pub fn jump_to_room(&mut self, index: usize) -> Option<String> {
        if index >= self.rooms.len() {
            warn!("Ignoring jump to room {} of {}", index, self.rooms.len());
            return None;
        }
        Some(self.enter_room(index))
    }

    /// Apply every commit that is due at `now`, in request order.
    /// Returns the ids of the rooms entered by those commits.
    pub fn advance(&mut self, now: Instant) -> Vec<String> {
        let (due, waiting): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|pending| pending.due <= now);
        self.pending = waiting;

        let mut entered = Vec::new();
        for pending in due {
            match pending.request {
                Request::Room(index) => entered.push(self.enter_room(index)),
                Request::Photo(index) => {
                    if index < self.photo_count() {
                        self.photo = index;
                    }
                }
                Request::Step(step) => {
                    let n = self.photo_count();
                    if n > 0 {
                        self.photo = match step {
                            PhotoStep::Next => (self.photo + 1) % n,
                            PhotoStep::Prev => (self.photo + n - 1) % n,
                        };
                    }
                }
            }
            debug!(
                "Committed {:?}: room {} photo {}",
                pending.request, self.room, self.photo
            );
        }
        entered
    }

    fn schedule(&mut self, request: Request, now: Instant) {
        self.pending.push(Pending {
            due: now + TRANSITION_DELAY,
            request,
        });
    }

    fn enter_room(&mut self, index: usize) -> String {
        self.room = index;
        self.photo = 0;
        self.rooms[index].id.clone()
    }

    fn photo_count(&self) -> usize {
        self.rooms.get(self.room).map_or(0, |slot| slot.photos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing() -> Listing {
        serde_json::from_value(json!({
            "id": "p1",
            "rooms": [
                { "id": "salon", "photos": ["s1.jpg", "s2.jpg", "s3.jpg"] },
                { "id": "balkon", "panorama_photo": "b360.jpg" },
                { "id": "mutfak", "photos": ["m1.jpg", "m2.jpg"] },
            ],
        }))
        .unwrap()
    }

    fn step(nav: &mut Navigator, step: PhotoStep, now: &mut Instant) {
        nav.request_step(step, *now);
        *now += TRANSITION_DELAY;
        nav.advance(*now);
    }

    #[test]
    fn starts_on_first_room_and_photo() {
        let nav = Navigator::new(&listing());
        assert_eq!(nav.current_room(), Some(0));
        assert_eq!(nav.current_photo(), Some(0));
        assert_eq!(nav.current_room_id(), Some("salon"));
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn empty_listing_has_no_indices() {
        let listing: Listing = serde_json::from_value(json!({ "id": "p0" })).unwrap();
        let mut nav = Navigator::new(&listing);
        assert_eq!(nav.current_room(), None);
        assert_eq!(nav.current_photo(), None);

        nav.request_room(0, Instant::now());
        nav.request_step(PhotoStep::Next, Instant::now());
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn request_commits_only_after_delay() {
        let mut nav = Navigator::new(&listing());
        let t0 = Instant::now();

        nav.request_step(PhotoStep::Next, t0);
        assert!(nav.is_transitioning());
        assert_eq!(nav.next_due(), Some(t0 + TRANSITION_DELAY));

        nav.advance(t0 + Duration::from_millis(299));
        assert_eq!(nav.current_photo(), Some(0));

        nav.advance(t0 + TRANSITION_DELAY);
        assert_eq!(nav.current_photo(), Some(1));
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn photo_navigation_is_cyclic() {
        let mut nav = Navigator::new(&listing());
        let mut now = Instant::now();

        for _ in 0..3 {
            step(&mut nav, PhotoStep::Next, &mut now);
        }
        assert_eq!(nav.current_photo(), Some(0));

        step(&mut nav, PhotoStep::Prev, &mut now);
        assert_eq!(nav.current_photo(), Some(2));
    }

    #[test]
    fn overlapping_room_requests_last_write_wins() {
        let mut nav = Navigator::new(&listing());
        let t0 = Instant::now();

        nav.request_room(2, t0);
        nav.request_room(1, t0 + Duration::from_millis(100));

        let entered = nav.advance(t0 + Duration::from_millis(400));
        assert_eq!(entered, vec!["mutfak".to_string(), "balkon".to_string()]);
        assert_eq!(nav.current_room(), Some(1));
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn overlapping_steps_both_apply() {
        let mut nav = Navigator::new(&listing());
        let t0 = Instant::now();

        nav.request_step(PhotoStep::Next, t0);
        nav.request_step(PhotoStep::Next, t0 + Duration::from_millis(50));

        nav.advance(t0 + TRANSITION_DELAY);
        assert_eq!(nav.current_photo(), Some(1));
        assert!(nav.is_transitioning());

        nav.advance(t0 + Duration::from_millis(350));
        assert_eq!(nav.current_photo(), Some(2));
    }

    #[test]
    fn changing_room_resets_photo() {
        let mut nav = Navigator::new(&listing());
        let mut now = Instant::now();
        step(&mut nav, PhotoStep::Next, &mut now);

        nav.request_room(2, now);
        now += TRANSITION_DELAY;
        assert_eq!(nav.advance(now), vec!["mutfak".to_string()]);
        assert_eq!(nav.current_photo(), Some(0));
    }

    #[test]
    fn room_without_photos_ignores_photo_requests() {
        let mut nav = Navigator::new(&listing());
        assert_eq!(nav.jump_to_room(1).as_deref(), Some("balkon"));
        assert_eq!(nav.current_photo(), None);

        nav.request_step(PhotoStep::Next, Instant::now());
        nav.request_photo(0, Instant::now());
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn direct_photo_selection() {
        let mut nav = Navigator::new(&listing());
        let t0 = Instant::now();

        nav.request_photo(2, t0);
        nav.request_photo(7, t0);
        nav.advance(t0 + TRANSITION_DELAY);
        assert_eq!(nav.current_photo(), Some(2));
    }

    #[test]
    fn out_of_range_room_is_ignored() {
        let mut nav = Navigator::new(&listing());
        nav.request_room(9, Instant::now());
        assert!(!nav.is_transitioning());
        assert_eq!(nav.jump_to_room(3), None);
        assert_eq!(nav.current_room(), Some(0));
    }
}

//! End-to-end walk through a listing: load, gate, tour, teardown.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;
use serde_json::json;

use tour_view::api::{ListingApi, VisitorRegistration};
use tour_view::models::{Listing, VisitRecord, Visitor};
use tour_view::tour::{Notifier, PageState, RoomMedia, TourPage, VisitorForm, ViewMode};
use tour_view::{Result, TourError};

#[derive(Default)]
struct Backend {
    registrations: Vec<VisitorRegistration>,
    visits: Vec<VisitRecord>,
}

/// Backend double holding one listing
struct FakeBackend {
    listing: Listing,
    state: Arc<Mutex<Backend>>,
}

#[async_trait]
impl ListingApi for FakeBackend {
    async fn fetch_listing(&self, listing_id: &str) -> Result<Listing> {
        if listing_id == self.listing.id {
            Ok(self.listing.clone())
        } else {
            Err(TourError::NotFound(listing_id.to_string()))
        }
    }

    async fn register_visitor(&self, registration: &VisitorRegistration) -> Result<Visitor> {
        self.state.lock().unwrap().registrations.push(registration.clone());
        Ok(Visitor {
            id: "visitor-42".to_string(),
            first_name: registration.first_name.clone(),
            last_name: registration.last_name.clone(),
            phone: registration.phone.clone(),
            created_at: None,
        })
    }

    async fn submit_visit(&self, record: &VisitRecord) -> Result<()> {
        self.state.lock().unwrap().visits.push(record.clone());
        Ok(())
    }
}

struct QuietNotifier;

impl Notifier for QuietNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

fn two_room_listing() -> Listing {
    serde_json::from_value(json!({
        "id": "ilan-7",
        "title": "Moda'da bahçeli 2+1",
        "district": "Kadıköy",
        "city": "İstanbul",
        "price": 8_750_000,
        "view_type": "360",
        "entry_room_id": "room-a",
        "rooms": [
            {
                "id": "room-a",
                "name": "Salon",
                "room_type": "living_room",
                "photos": ["a1.jpg", "a2.jpg", "a3.jpg"],
            },
            {
                "id": "room-b",
                "room_type": "balcony",
                "panorama_photo": "b-360.jpg",
            },
        ],
        "pois": [
            { "name": "Moda İlkokulu", "type": "school", "distance": "300 m" },
        ],
    }))
    .unwrap()
}

fn page() -> (TourPage, Arc<Mutex<Backend>>) {
    let state = Arc::new(Mutex::new(Backend::default()));
    let api = Arc::new(FakeBackend {
        listing: two_room_listing(),
        state: state.clone(),
    });
    (TourPage::new(api, Arc::new(QuietNotifier)), state)
}

#[tokio::test(start_paused = true)]
async fn full_visit_is_tracked_once() {
    let (mut page, backend) = page();

    page.load("ilan-7").await;
    assert!(matches!(page.state(), PageState::Gated { .. }));

    page.gate_mut().unwrap().form = VisitorForm::new("Ayşe", "Yılmaz", "0532 123 45 67");
    page.submit_visitor().await.unwrap();
    assert_eq!(backend.lock().unwrap().registrations.len(), 1);

    let session = page.session_mut().unwrap();
    assert_eq!(session.mode(), ViewMode::Summary);
    let started = session.started_at().unwrap();

    session.open_tour();
    assert_eq!(session.current_room_index(), Some(0));
    assert_eq!(session.current_photo_index(), Some(0));

    session.next_photo();
    session.settle().await;
    session.next_photo();
    session.settle().await;
    assert_eq!(
        session.room_media(),
        RoomMedia::Photo { url: "a3.jpg", index: 2, total: 3 }
    );

    session.select_room(1);
    session.settle().await;
    assert_eq!(session.current_room_index(), Some(1));
    assert_eq!(session.room_media(), RoomMedia::Panorama { url: "b-360.jpg" });

    // Going back and forth never duplicates a room.
    session.select_room(0);
    session.select_room(1);
    session.settle().await;
    assert_eq!(session.current_photo_index(), None);
    assert_eq!(session.visited_rooms().as_slice(), ["room-a", "room-b"]);

    let session = page.into_session().expect("page should be unlocked");
    let record = session
        .end_at(started + Duration::milliseconds(95_400))
        .await
        .unwrap();

    assert_eq!(record.property_id, "ilan-7");
    assert_eq!(record.visitor_id, "visitor-42");
    assert_eq!(record.duration, 95);
    assert_eq!(record.rooms_visited, vec!["room-a", "room-b"]);
    assert_eq!(backend.lock().unwrap().visits, vec![record]);
}

#[tokio::test]
async fn teardown_before_unlock_sends_nothing() {
    let (mut page, backend) = page();
    page.load("ilan-7").await;

    page.gate_mut().unwrap().form = VisitorForm::new("Ayşe", "", "0532");
    assert!(page.submit_visitor().await.is_err());

    assert!(page.teardown().await.is_none());
    let backend = backend.lock().unwrap();
    assert!(backend.registrations.is_empty());
    assert!(backend.visits.is_empty());
}

#[tokio::test]
async fn unknown_listing_is_not_found() {
    let (mut page, _backend) = page();
    page.load("ilan-404").await;
    assert!(matches!(page.state(), PageState::NotFound));
    assert!(page.gate_mut().is_none());
}

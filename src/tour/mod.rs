pub mod format;
pub mod gate;
pub mod lighting;
pub mod navigation;
pub mod notify;
pub mod share;
pub mod tracker;
pub mod view;

pub use gate::{VisitorForm, VisitorGate};
pub use lighting::{compute_filter, LightingHour, SunFilter};
pub use navigation::{Navigator, PhotoStep, TRANSITION_DELAY};
pub use notify::{LogNotifier, Notifier};
pub use share::{share_listing, ShareContent, ShareOutcome, ShareTarget};
pub use tracker::{VisitTracker, VisitedRooms};
pub use view::{Controls, PageState, RoomMedia, TourPage, TourSession, ViewMode};

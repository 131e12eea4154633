pub mod client;
#[cfg(test)]
pub(crate) mod fake;
pub mod traits;
pub mod types;

pub use client::HttpListingApi;
pub use traits::ListingApi;
pub use types::VisitorRegistration;

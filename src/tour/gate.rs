use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::api::{ListingApi, VisitorRegistration};
use crate::error::{Result, TourError};
use crate::models::Visitor;
use crate::tour::notify::{messages, Notifier};

/// Contact details typed into the gate form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl VisitorForm {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            phone: phone.into(),
        }
    }

    /// All three fields are required; whitespace alone does not count
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("phone", &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(TourError::Validation(format!(
                "missing {}",
                missing.join(", ")
            )))
        }
    }

    fn registration(&self, listing_id: &str) -> VisitorRegistration {
        VisitorRegistration {
            property_id: listing_id.to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }
}

/// One-time form that must be completed before the listing is shown
#[derive(Debug)]
pub struct VisitorGate {
    listing_id: String,
    pub form: VisitorForm,
    submitting: AtomicBool,
}

/// Clears the in-flight flag however the submission ends
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl VisitorGate {
    pub fn new(listing_id: impl Into<String>) -> Self {
        Self {
            listing_id: listing_id.into(),
            form: VisitorForm::default(),
            submitting: AtomicBool::new(false),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Validate the form and register the visitor.
    ///
    /// Invalid input never reaches the network. A second call while one is
    /// pending fails with [`TourError::SubmissionInFlight`]. On failure the
    /// form keeps its contents so the visitor can resubmit.
    pub async fn submit(&self, api: &dyn ListingApi, notifier: &dyn Notifier) -> Result<Visitor> {
        if let Err(e) = self.form.validate() {
            notifier.error(messages::FILL_ALL_FIELDS);
            return Err(e);
        }

        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(TourError::SubmissionInFlight);
        }
        let _in_flight = InFlight(&self.submitting);

        let registration = self.form.registration(&self.listing_id);
        match api.register_visitor(&registration).await {
            Ok(visitor) => {
                info!("Visitor {} registered for {}", visitor.id, self.listing_id);
                notifier.success(messages::WELCOME);
                Ok(visitor)
            }
            Err(e) => {
                warn!("Visitor registration failed: {}", e);
                notifier.error(messages::GENERIC_ERROR);
                Err(e)
            }
        }
    }
}

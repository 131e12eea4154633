use serde::{Deserialize, Serialize};

/// Body of `POST /visitors/register`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisitorRegistration {
    pub property_id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

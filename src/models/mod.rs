use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Backends send `null` for blank fields; treat it like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Kind of tour the listing was published with
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum TourType {
    #[serde(rename = "360")]
    Panoramic,
    #[default]
    #[serde(rename = "standard")]
    #[serde(other)]
    Standard,
}

/// Property layout subtype
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PropertySubtype {
    Duplex,
    Triplex,
    #[default]
    #[serde(other)]
    Single,
}

/// Room type tag. Unknown tags decode to `Other`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    LivingRoom,
    Bedroom,
    Kitchen,
    Bathroom,
    Balcony,
    Hallway,
    Entrance,
    Storage,
    #[default]
    #[serde(other)]
    Other,
}

/// Point of interest category. Unknown tags decode to `Other`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PoiCategory {
    School,
    Market,
    Transport,
    Hospital,
    Park,
    #[default]
    #[serde(other)]
    Other,
}

/// A nearby place shown on the summary screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PointOfInterest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub category: PoiCategory,
    #[serde(default)]
    pub distance: Option<String>,
}

/// One room of the listing with its photos
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub room_type: RoomType,
    #[serde(default)]
    pub square_meters: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub photos: Vec<String>,
    #[serde(default)]
    pub panorama_photo: Option<String>,
}

impl Room {
    /// Room name, or the room type label when the name is blank
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            crate::tour::format::room_type_label(self.room_type)
        } else {
            name
        }
    }

    pub fn has_photos(&self) -> bool {
        !self.photos.is_empty()
    }
}

/// Core listing data model, fetched once per page load
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub district: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub square_meters: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub room_count: String,
    #[serde(default)]
    pub floor: Option<i32>,
    #[serde(default)]
    pub total_floors: Option<i32>,
    #[serde(default)]
    pub building_age: Option<i32>,
    #[serde(default)]
    pub facing_direction: Option<String>,
    #[serde(default)]
    pub heating_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub property_type: PropertySubtype,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rooms: Vec<Room>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pois: Vec<PointOfInterest>,
    #[serde(default)]
    pub entry_room_id: Option<String>,
    #[serde(rename = "view_type", default, deserialize_with = "null_as_default")]
    pub tour_type: TourType,
}

impl Listing {
    pub fn is_panoramic(&self) -> bool {
        self.tour_type == TourType::Panoramic
    }

    /// The entry room, if the reference points at a room of this listing
    pub fn entry_room(&self) -> Option<&Room> {
        let entry = self.entry_room_id.as_deref()?;
        self.rooms.iter().find(|room| room.id == entry)
    }

    pub fn is_entry(&self, room: &Room) -> bool {
        self.entry_room().is_some_and(|entry| entry.id == room.id)
    }

    /// Cover image, falling back to the first photo of the first room
    pub fn cover_image_url(&self) -> Option<&str> {
        self.cover_image
            .as_deref()
            .filter(|url| !url.is_empty())
            .or_else(|| self.rooms.first()?.photos.first().map(String::as_str))
    }
}

/// Visitor identity returned by the registration endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Visitor {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Summary of one viewing session, submitted once on teardown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VisitRecord {
    pub property_id: String,
    pub visitor_id: String,
    /// Seconds between unlock and teardown
    pub duration: u64,
    pub rooms_visited: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_tags_fall_back_to_other() {
        let room: Room = serde_json::from_value(json!({
            "id": "r1",
            "room_type": "sauna",
        }))
        .unwrap();
        assert_eq!(room.room_type, RoomType::Other);
        assert_eq!(room.display_name(), "Diğer");

        let poi: PointOfInterest =
            serde_json::from_value(json!({ "name": "Cafe", "type": "cafe" })).unwrap();
        assert_eq!(poi.category, PoiCategory::Other);
    }

    #[test]
    fn sparse_listing_decodes_with_defaults() {
        let listing: Listing = serde_json::from_value(json!({
            "id": "p1",
            "title": "Deniz manzaralı 3+1",
            "view_type": "360",
            "property_type": "duplex",
            "description": null,
        }))
        .unwrap();
        assert!(listing.is_panoramic());
        assert_eq!(listing.property_type, PropertySubtype::Duplex);
        assert!(listing.rooms.is_empty());
        assert!(listing.cover_image_url().is_none());

        let standard: Listing =
            serde_json::from_value(json!({ "id": "p2", "view_type": "normal" })).unwrap();
        assert_eq!(standard.tour_type, TourType::Standard);
    }

    #[test]
    fn unknown_subtype_and_null_tour_type_use_defaults() {
        let listing: Listing = serde_json::from_value(json!({
            "id": "p3",
            "property_type": "villa",
            "view_type": null,
        }))
        .unwrap();
        assert_eq!(listing.property_type, PropertySubtype::Single);
        assert_eq!(listing.tour_type, TourType::Standard);

        let encoded = serde_json::to_value(&listing).unwrap();
        assert_eq!(encoded["property_type"], "single");
        assert_eq!(encoded["view_type"], "standard");
    }

    #[test]
    fn dangling_entry_room_is_absent() {
        let listing: Listing = serde_json::from_value(json!({
            "id": "p1",
            "entry_room_id": "missing",
            "rooms": [{ "id": "r1", "name": "Salon", "photos": ["a.jpg"] }],
        }))
        .unwrap();
        assert!(listing.entry_room().is_none());
        assert!(!listing.is_entry(&listing.rooms[0]));
        assert_eq!(listing.cover_image_url(), Some("a.jpg"));
    }
}

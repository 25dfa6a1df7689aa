//! Itinerary snapshot as served by `/itineraries/{id}`.

use serde::{Deserialize, Serialize};

use super::de::{null_as_default, string_or_number};

/// A persisted image attached to an itinerary or one of its days.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Image {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub image_url: String,
}

/// Reference issued by an upload endpoint for one file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadedImage {
    pub image_url: String,
    pub image_public_id: String,
}

/// Image reference inside a write payload: either kept as-is or freshly
/// uploaded.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ImageRef {
    Existing(Image),
    Uploaded(UploadedImage),
}

/// One day of an itinerary's plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub day_number: i64,
    pub title: String,
    pub details: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
}

/// A complete itinerary with its day plans and cost lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Itinerary {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    pub duration: i64,
    pub price: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub arrival_city: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub departure_city: String,
    /// Raw accommodation class; parsed leniently by the form layer
    #[serde(default, deserialize_with = "null_as_default")]
    pub accommodation: String,
    /// Raw location; parsed leniently by the form layer
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    /// Comma-delimited tag list
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub days: Vec<DayPlan>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cost_inclusive: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cost_exclusive: Vec<String>,
}

impl Itinerary {
    /// Tags split out of the delimited wire string, trimmed, empties dropped.
    pub fn tag_list(&self) -> Vec<String> {
        split_tags(&self.tags)
    }

    /// Price after the percentage discount, rounded down.
    pub fn discounted_price(&self) -> i64 {
        if self.discount <= 0.0 {
            return self.price;
        }
        let factor = (100.0 - self.discount.min(100.0)) / 100.0;
        (self.price as f64 * factor).floor() as i64
    }
}

/// Split a comma-delimited tag string.
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_backend_shape() {
        let itinerary: Itinerary = serde_json::from_value(json!({
            "id": "it-1",
            "title": "Mara Migration",
            "overview": "Five days in the Mara",
            "duration": 5,
            "price": 2500,
            "discount": 10,
            "arrival_city": "Nairobi",
            "departure_city": "Nairobi",
            "accommodation": "Luxury",
            "location": "Kenya",
            "tags": "wildlife, migration ,",
            "images": [{"id": 7, "image_url": "https://cdn.example/mara.jpg"}],
            "days": [{
                "id": "d-1",
                "day_number": 1,
                "title": "Arrival",
                "details": "Transfer to camp",
                "images": null
            }],
            "cost_inclusive": ["Park fees"],
            "cost_exclusive": null
        }))
        .unwrap();

        assert_eq!(itinerary.images[0].id, "7");
        assert_eq!(itinerary.tag_list(), vec!["wildlife", "migration"]);
        assert!(itinerary.days[0].images.is_empty());
        assert!(itinerary.cost_exclusive.is_empty());
        assert_eq!(itinerary.discounted_price(), 2250);
    }

    #[test]
    fn test_image_ref_serializes_untagged() {
        let uploaded = ImageRef::Uploaded(UploadedImage {
            image_url: "https://cdn.example/a.jpg".to_string(),
            image_public_id: "a".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&uploaded).unwrap(),
            json!({"image_url": "https://cdn.example/a.jpg", "image_public_id": "a"})
        );
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed set of trip categories offered in the catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripCategory {
    Cultural,
    Adventure,
    Beach,
    Safari,
    Historical,
    Nature,
    CityTour,
}

/// The guide assigned to a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideInfo {
    pub name: String,
    pub bio: String,
    pub avatar: String,
}

/// A bookable travel package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub title: String,
    pub destination: String,
    /// Length in days.
    pub duration: u32,
    /// Per-person price in whole currency units.
    pub price: f64,
    pub description: String,
    /// Ordered day-by-day descriptions.
    pub itinerary: Vec<String>,
    /// What the price covers (meals, transport, fees, ...).
    pub included: Vec<String>,
    pub images: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub available_slots: u32,
    pub category: TripCategory,
    pub guide: GuideInfo,
}

/// Trip data as submitted through the admin form, before an id exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDraft {
    pub title: String,
    pub destination: String,
    pub duration: u32,
    pub price: f64,
    pub description: String,
    pub itinerary: Vec<String>,
    pub included: Vec<String>,
    pub images: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub available_slots: u32,
    pub category: TripCategory,
    pub guide: GuideInfo,
}

impl TripDraft {
    /// Reject drafts that violate catalog constraints before the store
    /// is touched.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.title.trim().is_empty() {
            return Err(CatalogError::InvalidDraft("title must not be empty".into()));
        }
        if self.duration == 0 {
            return Err(CatalogError::InvalidDraft("duration must be positive".into()));
        }
        if self.price <= 0.0 {
            return Err(CatalogError::InvalidDraft("price must be positive".into()));
        }
        if self.itinerary.is_empty() {
            return Err(CatalogError::InvalidDraft("itinerary must not be empty".into()));
        }
        if self.included.is_empty() {
            return Err(CatalogError::InvalidDraft(
                "inclusions must not be empty".into(),
            ));
        }
        if self.images.is_empty() {
            return Err(CatalogError::InvalidDraft("images must not be empty".into()));
        }
        if self.end_date <= self.start_date {
            return Err(CatalogError::InvalidDraft(
                "end date must be after start date".into(),
            ));
        }
        if self.available_slots == 0 {
            return Err(CatalogError::InvalidDraft(
                "available slots must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn into_trip(self, id: Uuid) -> Trip {
        Trip {
            id,
            title: self.title,
            destination: self.destination,
            duration: self.duration,
            price: self.price,
            description: self.description,
            itinerary: self.itinerary,
            included: self.included,
            images: self.images,
            start_date: self.start_date,
            end_date: self.end_date,
            available_slots: self.available_slots,
            category: self.category,
            guide: self.guide,
        }
    }
}

/// Partial update from the admin edit form. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripPatch {
    pub title: Option<String>,
    pub destination: Option<String>,
    pub duration: Option<u32>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub itinerary: Option<Vec<String>>,
    pub included: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub available_slots: Option<u32>,
    pub category: Option<TripCategory>,
    pub guide: Option<GuideInfo>,
}

impl TripPatch {
    pub fn apply(self, trip: &mut Trip) {
        if let Some(title) = self.title {
            trip.title = title;
        }
        if let Some(destination) = self.destination {
            trip.destination = destination;
        }
        if let Some(duration) = self.duration {
            trip.duration = duration;
        }
        if let Some(price) = self.price {
            trip.price = price;
        }
        if let Some(description) = self.description {
            trip.description = description;
        }
        if let Some(itinerary) = self.itinerary {
            trip.itinerary = itinerary;
        }
        if let Some(included) = self.included {
            trip.included = included;
        }
        if let Some(images) = self.images {
            trip.images = images;
        }
        if let Some(start_date) = self.start_date {
            trip.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            trip.end_date = end_date;
        }
        if let Some(available_slots) = self.available_slots {
            trip.available_slots = available_slots;
        }
        if let Some(category) = self.category {
            trip.category = category;
        }
        if let Some(guide) = self.guide {
            trip.guide = guide;
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Trip not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid trip data: {0}")]
    InvalidDraft(String),
}

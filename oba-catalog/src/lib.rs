pub mod seed;
pub mod store;
pub mod trip;

pub use store::{CatalogStore, TripFilter, TripSort};
pub use trip::{CatalogError, GuideInfo, Trip, TripCategory, TripDraft, TripPatch};

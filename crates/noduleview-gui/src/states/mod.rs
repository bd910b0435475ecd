pub mod rating;
mod textures;
mod ui;

pub use rating::{FeedbackRecord, RatedClassification, RatingState, RATING_SCALE};
pub use textures::TextureCache;
pub use ui::{ShownImage, UIState};

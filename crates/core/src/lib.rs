pub mod aggregate;
pub mod caller;
pub mod listing;
pub mod payload;
pub mod product;
pub mod types;

pub use aggregate::{RatingSummary, rating_summary};
pub use caller::Caller;
pub use listing::{NewListing, SellListing};
pub use payload::{
    CreateListing, CreateProduct, ImagesInput, InvalidImages, UpdateProduct, flag_is_true,
};
pub use product::{ImageRef, MAX_RATING, MIN_RATING, NewProduct, Product, Review};
pub use types::{AssetId, ListingId, ProductId, ReviewId, UserId};

//! Lifecycle services for the Bazaar product catalog.
//!
//! The services orchestrate two backends that are deliberately not
//! transactional with each other: the product/listing store and the
//! external image asset store. Where a failure partway through leaves
//! the two visibly inconsistent, the policy (rollback, abort, or
//! best-effort continue) is documented on the operation and covered by
//! tests.

pub mod error;
mod images;
pub mod listings;
pub mod products;
pub mod reviews;

pub use error::CatalogError;
pub use images::ASSET_NAMESPACE;
pub use listings::ListingService;
pub use products::ProductService;
pub use reviews::ReviewService;

/// How many times a compare-and-swap write is retried against a fresh
/// read before giving up with [`CatalogError::Conflict`].
pub(crate) const MAX_CAS_RETRIES: u32 = 4;

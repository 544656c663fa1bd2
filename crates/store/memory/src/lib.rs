pub mod store;

pub use store::{MemoryListingStore, MemoryProductStore};

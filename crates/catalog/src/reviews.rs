use std::sync::Arc;

use tracing::{debug, info, instrument};

use bazaar_core::{
    Caller, MAX_RATING, MIN_RATING, Product, ProductId, Review, ReviewId, rating_summary,
};
use bazaar_store::store::{CasOutcome, ProductStore, Versioned};

use crate::MAX_CAS_RETRIES;
use crate::error::CatalogError;

/// Maintains a product's review list and its derived aggregates.
///
/// Every mutation recomputes `ratings` and `num_of_reviews` from the full
/// review list and persists both together with the review change through
/// one compare-and-swap update, so concurrent writers on the same product
/// can never commit aggregates derived from a stale read.
pub struct ReviewService {
    store: Arc<dyn ProductStore>,
}

impl ReviewService {
    /// Create a review service over the given store.
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Insert or update the caller's review of a product.
    ///
    /// A user has at most one review per product: an existing review by
    /// the caller gets its rating and comment overwritten in place (id
    /// and name snapshot unchanged), otherwise a new review is appended
    /// with a fresh id.
    #[instrument(skip(self, comment), fields(caller = %caller.id))]
    pub async fn upsert(
        &self,
        product_id: &ProductId,
        caller: &Caller,
        rating: u8,
        comment: String,
    ) -> Result<Product, CatalogError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(CatalogError::Validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
            )));
        }

        self.mutate(product_id, |record| {
            match record.reviews.iter_mut().find(|r| r.user == caller.id) {
                Some(existing) => {
                    existing.rating = rating;
                    existing.comment = comment.clone();
                }
                None => record.reviews.push(Review {
                    id: ReviewId::generate(),
                    user: caller.id.clone(),
                    name: caller.name.clone(),
                    rating,
                    comment: comment.clone(),
                }),
            }
            true
        })
        .await
        .inspect(|product| {
            info!(product = %product_id, ratings = product.ratings, "review upserted");
        })
    }

    /// The product's review list, unchanged and in stored order.
    pub async fn list(&self, product_id: &ProductId) -> Result<Vec<Review>, CatalogError> {
        Ok(self
            .store
            .find(product_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(product_id.clone()))?
            .record
            .reviews)
    }

    /// Remove a review by id and re-derive the aggregates.
    ///
    /// Deleting an id with no matching review is a successful no-op
    /// (idempotent delete); aggregates are untouched and nothing is
    /// persisted.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        product_id: &ProductId,
        review_id: &ReviewId,
    ) -> Result<Product, CatalogError> {
        self.mutate(product_id, |record| {
            let before = record.reviews.len();
            record.reviews.retain(|r| &r.id != review_id);
            record.reviews.len() != before
        })
        .await
        .inspect(|product| {
            info!(product = %product_id, remaining = product.num_of_reviews, "review deleted");
        })
    }

    /// Apply a review-list mutation and persist it atomically with the
    /// recomputed aggregates.
    ///
    /// `mutate` returns whether it changed anything; an unchanged list
    /// short-circuits without a write. Lost swaps re-read and re-apply,
    /// up to [`MAX_CAS_RETRIES`] attempts.
    async fn mutate(
        &self,
        product_id: &ProductId,
        mut mutate: impl FnMut(&mut Product) -> bool,
    ) -> Result<Product, CatalogError> {
        let mut current = self.load(product_id).await?;

        for attempt in 0..MAX_CAS_RETRIES {
            let mut record = current.record.clone();
            if !mutate(&mut record) {
                return Ok(record);
            }

            let summary = rating_summary(&record.reviews);
            record.ratings = summary.ratings;
            record.num_of_reviews = summary.num_of_reviews;

            match self
                .store
                .update(product_id, record.clone(), current.version)
                .await?
            {
                CasOutcome::Ok { .. } => return Ok(record),
                CasOutcome::Conflict { current_version } => {
                    debug!(product = %product_id, attempt, current_version, "review write lost the swap, retrying");
                    current = self.load(product_id).await?;
                }
            }
        }

        Err(CatalogError::Conflict {
            id: product_id.clone(),
            retries: MAX_CAS_RETRIES,
        })
    }

    async fn load(&self, product_id: &ProductId) -> Result<Versioned<Product>, CatalogError> {
        self.store
            .find(product_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(product_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bazaar_core::{NewProduct, UserId};
    use bazaar_store_memory::MemoryProductStore;

    use super::*;

    const EPSILON: f64 = 1e-9;

    async fn seeded() -> (Arc<MemoryProductStore>, ReviewService, ProductId) {
        let store = Arc::new(MemoryProductStore::new());
        let inserted = store
            .insert(NewProduct {
                name: "Lamp".into(),
                description: "A desk lamp".into(),
                price: 25.0,
                category: "home".into(),
                stock: 1,
                images: vec![],
                owner: UserId::new("owner"),
                is_verified: false,
                is_bulk: false,
            })
            .await
            .unwrap();
        let service = ReviewService::new(store.clone());
        (store, service, inserted.record.id)
    }

    fn ada() -> Caller {
        Caller::new("u-ada", "Ada")
    }

    fn brian() -> Caller {
        Caller::new("u-brian", "Brian")
    }

    #[tokio::test]
    async fn first_review_appends_and_derives_aggregates() {
        let (_, service, id) = seeded().await;

        let product = service.upsert(&id, &ada(), 4, "solid".into()).await.unwrap();
        assert_eq!(product.num_of_reviews, 1);
        assert!((product.ratings - 4.0).abs() < EPSILON);
        assert_eq!(product.reviews[0].name, "Ada");
        assert_eq!(product.reviews[0].user, UserId::new("u-ada"));
    }

    #[tokio::test]
    async fn second_submission_by_same_user_updates_in_place() {
        let (_, service, id) = seeded().await;

        let first = service.upsert(&id, &ada(), 4, "solid".into()).await.unwrap();
        let first_review_id = first.reviews[0].id.clone();

        let second = service
            .upsert(&id, &ada(), 2, "changed my mind".into())
            .await
            .unwrap();
        assert_eq!(second.num_of_reviews, 1, "no second review appended");
        assert_eq!(second.reviews.len(), 1);
        assert_eq!(second.reviews[0].id, first_review_id, "id unchanged");
        assert_eq!(second.reviews[0].rating, 2);
        assert_eq!(second.reviews[0].comment, "changed my mind");
        assert!((second.ratings - 2.0).abs() < EPSILON);
    }

    #[tokio::test]
    async fn aggregates_track_review_additions_and_deletions() {
        let (_, service, id) = seeded().await;

        // [{rating: 4}, {rating: 2}] -> ratings 3, count 2.
        let product = service.upsert(&id, &ada(), 4, "good".into()).await.unwrap();
        let four_star_id = product.reviews[0].id.clone();
        let product = service.upsert(&id, &brian(), 2, "meh".into()).await.unwrap();
        assert!((product.ratings - 3.0).abs() < EPSILON);
        assert_eq!(product.num_of_reviews, 2);

        // Delete the rating-4 review -> ratings 2, count 1.
        let product = service.delete(&id, &four_star_id).await.unwrap();
        assert!((product.ratings - 2.0).abs() < EPSILON);
        assert_eq!(product.num_of_reviews, 1);

        // Delete the last review -> ratings 0, count 0.
        let last_id = product.reviews[0].id.clone();
        let product = service.delete(&id, &last_id).await.unwrap();
        assert_eq!(product.ratings, 0.0);
        assert_eq!(product.num_of_reviews, 0);
    }

    #[tokio::test]
    async fn deleting_a_nonexistent_review_is_a_no_op() {
        let (store, service, id) = seeded().await;
        service.upsert(&id, &ada(), 5, "great".into()).await.unwrap();
        let version_before = store.find(&id).await.unwrap().unwrap().version;

        let product = service
            .delete(&id, &ReviewId::new("no-such-review"))
            .await
            .unwrap();
        assert_eq!(product.num_of_reviews, 1);
        assert!((product.ratings - 5.0).abs() < EPSILON);

        let version_after = store.find(&id).await.unwrap().unwrap().version;
        assert_eq!(version_before, version_after, "no write issued");
    }

    #[tokio::test]
    async fn out_of_range_rating_is_rejected_before_any_load() {
        let (_, service, id) = seeded().await;
        for rating in [0u8, 6] {
            let err = service
                .upsert(&id, &ada(), rating, "bad".into())
                .await
                .unwrap_err();
            assert!(matches!(err, CatalogError::Validation(_)));
        }
        // And against a missing product the range check still wins.
        let err = service
            .upsert(&ProductId::new("ghost"), &ada(), 9, "bad".into())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let (_, service, _) = seeded().await;
        let ghost = ProductId::new("ghost");

        let err = service.upsert(&ghost, &ada(), 3, "ok".into()).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        let err = service.list(&ghost).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        let err = service
            .delete(&ghost, &ReviewId::new("r-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_returns_reviews_without_touching_aggregates() {
        let (store, service, id) = seeded().await;
        service.upsert(&id, &ada(), 4, "good".into()).await.unwrap();
        let version_before = store.find(&id).await.unwrap().unwrap().version;

        let reviews = service.list(&id).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].rating, 4);

        let version_after = store.find(&id).await.unwrap().unwrap().version;
        assert_eq!(version_before, version_after);
    }

    /// Store wrapper that interleaves a competing review write between a
    /// caller's read and its first swap attempt.
    struct ContendedStore {
        inner: Arc<MemoryProductStore>,
        interfered: std::sync::atomic::AtomicBool,
    }

    #[async_trait::async_trait]
    impl ProductStore for ContendedStore {
        async fn insert(
            &self,
            new: NewProduct,
        ) -> Result<Versioned<Product>, bazaar_store::StoreError> {
            self.inner.insert(new).await
        }

        async fn find(
            &self,
            id: &ProductId,
        ) -> Result<Option<Versioned<Product>>, bazaar_store::StoreError> {
            self.inner.find(id).await
        }

        async fn update(
            &self,
            id: &ProductId,
            product: Product,
            expected_version: u64,
        ) -> Result<CasOutcome, bazaar_store::StoreError> {
            if !self.interfered.swap(true, std::sync::atomic::Ordering::SeqCst) {
                // A concurrent reviewer lands first, invalidating the version
                // the caller read.
                let fresh = self.inner.find(id).await?.expect("product exists");
                let mut record = fresh.record;
                record.reviews.push(Review {
                    id: ReviewId::generate(),
                    user: UserId::new("u-rival"),
                    name: "Rival".into(),
                    rating: 2,
                    comment: "raced you".into(),
                });
                let summary = rating_summary(&record.reviews);
                record.ratings = summary.ratings;
                record.num_of_reviews = summary.num_of_reviews;
                self.inner.update(id, record, fresh.version).await?;
            }
            self.inner.update(id, product, expected_version).await
        }

        async fn remove(&self, id: &ProductId) -> Result<bool, bazaar_store::StoreError> {
            self.inner.remove(id).await
        }

        async fn list(&self) -> Result<Vec<Product>, bazaar_store::StoreError> {
            self.inner.list().await
        }
    }

    #[tokio::test]
    async fn lost_swap_retries_without_dropping_the_concurrent_review() {
        let (inner, _, id) = seeded().await;
        let contended = Arc::new(ContendedStore {
            inner,
            interfered: std::sync::atomic::AtomicBool::new(false),
        });
        let service = ReviewService::new(contended);

        // The first swap attempt loses to the interleaved rival write; the
        // retry must re-derive aggregates over both reviews.
        let product = service.upsert(&id, &ada(), 4, "good".into()).await.unwrap();
        assert_eq!(product.num_of_reviews, 2);
        assert!((product.ratings - 3.0).abs() < EPSILON);
        assert!(product.reviews.iter().any(|r| r.name == "Rival"));
        assert!(product.reviews.iter().any(|r| r.user == UserId::new("u-ada")));
    }
}

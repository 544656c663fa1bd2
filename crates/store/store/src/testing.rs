//! Conformance tests shared by all product store backends.

use bazaar_core::{NewProduct, ProductId, UserId};

use crate::error::StoreError;
use crate::store::{CasOutcome, ProductStore, Versioned};

fn sample_product(name: &str) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        description: "conformance fixture".to_owned(),
        price: 10.0,
        category: "fixtures".to_owned(),
        stock: 1,
        images: Vec::new(),
        owner: UserId::new("conformance-user"),
        is_verified: false,
        is_bulk: false,
    }
}

/// Run the full product store conformance test suite.
///
/// Call this from your backend's test module with a fresh store instance.
///
/// # Errors
///
/// Returns an error if any conformance test fails.
pub async fn run_product_store_conformance_tests(
    store: &dyn ProductStore,
) -> Result<(), StoreError> {
    test_find_missing(store).await?;
    test_insert_and_find(store).await?;
    test_cas_update(store).await?;
    test_cas_conflict(store).await?;
    test_remove(store).await?;
    test_list(store).await?;
    Ok(())
}

async fn test_find_missing(store: &dyn ProductStore) -> Result<(), StoreError> {
    let found = store.find(&ProductId::new("no-such-product")).await?;
    assert!(found.is_none(), "find on missing id should return None");
    Ok(())
}

async fn test_insert_and_find(store: &dyn ProductStore) -> Result<(), StoreError> {
    let inserted = store.insert(sample_product("insert-find")).await?;
    assert_eq!(inserted.version, 1, "fresh insert should be version 1");

    let found = store
        .find(&inserted.record.id)
        .await?
        .expect("inserted product should be findable");
    assert_eq!(found.record, inserted.record);
    assert_eq!(found.version, 1);
    Ok(())
}

async fn test_cas_update(store: &dyn ProductStore) -> Result<(), StoreError> {
    let Versioned { mut record, version } = store.insert(sample_product("cas-ok")).await?;
    record.stock = 7;

    let outcome = store.update(&record.id, record.clone(), version).await?;
    let CasOutcome::Ok { new_version } = outcome else {
        panic!("matching version should swap, got {outcome:?}");
    };
    assert!(new_version > version, "version should advance on update");

    let found = store.find(&record.id).await?.expect("record should remain");
    assert_eq!(found.record.stock, 7);
    assert_eq!(found.version, new_version);
    Ok(())
}

async fn test_cas_conflict(store: &dyn ProductStore) -> Result<(), StoreError> {
    let Versioned { mut record, version } = store.insert(sample_product("cas-conflict")).await?;
    record.stock = 2;
    store.update(&record.id, record.clone(), version).await?;

    // A second writer still holding the old version must be rejected.
    record.stock = 3;
    let outcome = store.update(&record.id, record.clone(), version).await?;
    let CasOutcome::Conflict { current_version } = outcome else {
        panic!("stale version should conflict, got {outcome:?}");
    };
    assert!(current_version > version);

    let found = store.find(&record.id).await?.expect("record should remain");
    assert_eq!(found.record.stock, 2, "stale write must not be applied");
    Ok(())
}

async fn test_remove(store: &dyn ProductStore) -> Result<(), StoreError> {
    let inserted = store.insert(sample_product("remove")).await?;

    let existed = store.remove(&inserted.record.id).await?;
    assert!(existed, "remove should report the record existed");
    assert!(store.find(&inserted.record.id).await?.is_none());

    let existed = store.remove(&inserted.record.id).await?;
    assert!(!existed, "second remove should report absence");
    Ok(())
}

async fn test_list(store: &dyn ProductStore) -> Result<(), StoreError> {
    let a = store.insert(sample_product("list-a")).await?;
    let b = store.insert(sample_product("list-b")).await?;

    let all = store.list().await?;
    for inserted in [&a, &b] {
        assert!(
            all.iter().any(|p| p.id == inserted.record.id),
            "listed products should include inserted ids"
        );
    }
    Ok(())
}

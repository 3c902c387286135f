//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported
//! and accessible via absolute paths.

/// Test that types module is accessible via absolute path.
#[test]
fn test_types_module_exports() {
    use pricer_core::types::time::Date;

    let start = Date::from_ymd(2020, 1, 1).unwrap();
    let end = Date::from_ymd(2020, 6, 1).unwrap();

    assert_eq!(start.year(), 2020);
    assert_eq!(start.month(), 1);
    assert_eq!(start.day(), 1);
    assert_eq!(end - start, 152);
    assert_eq!(Date::from_serial(start.serial()).unwrap(), start);
}

/// Test that commonly used types are re-exported at module level.
#[test]
fn test_types_reexports() {
    use pricer_core::types::{Date, DateError, PricingError};

    let err: DateError = Date::parse("2020-13-01").unwrap_err();
    let pricing: PricingError = err.into();
    assert!(matches!(pricing, PricingError::InvalidInput(_)));
}

/// Test that market data module is accessible via absolute path.
#[test]
fn test_market_data_module_exports() {
    use pricer_core::market_data::error::FixingStoreError;
    use pricer_core::market_data::fixings::{FixingStore, InMemoryFixingStore};
    use pricer_core::types::Date;

    let mut store = InMemoryFixingStore::new();
    store.insert("A", Date::from_ymd(2020, 3, 1).unwrap(), 75.0);

    let series = store
        .lookup(
            "A",
            Date::from_ymd(2020, 1, 1).unwrap(),
            Date::from_ymd(2020, 6, 1).unwrap(),
        )
        .unwrap();
    assert_eq!(series.len(), 1);

    let err = FixingStoreError::Unavailable("offline".to_string());
    assert!(err.to_string().contains("offline"));
}

/// Test that a custom store can be plugged in behind the trait object.
#[test]
fn test_custom_fixing_store() {
    use pricer_core::market_data::{FixingStore, FixingStoreError, HistoricalFixing};
    use pricer_core::types::Date;

    struct OfflineStore;

    impl FixingStore for OfflineStore {
        fn lookup(
            &self,
            _variable: &str,
            _from: Date,
            _to: Date,
        ) -> Result<Vec<HistoricalFixing>, FixingStoreError> {
            Err(FixingStoreError::Unavailable("offline".to_string()))
        }
    }

    let store: Box<dyn FixingStore> = Box::new(OfflineStore);
    let date = Date::from_ymd(2020, 1, 1).unwrap();
    assert!(store.lookup("A", date, date).is_err());
}

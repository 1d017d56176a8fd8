//! End-to-end behaviour of the disclosure store and resolver through the
//! public API: save-options flow, config registration, expiry and concurrent
//! access.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use verikit_core::{
    resolver, DisclosureConfig, DisclosureSource, DisclosureStore, ManualClock,
    StoreConfig, StoreError, VerificationConfig, DEFAULT_OPTIONS_TTL,
};

const MINUTE: Duration = Duration::from_secs(60);

fn store_with_manual_clock() -> (DisclosureStore, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let store = DisclosureStore::new().with_clock(clock.clone());
    (store, clock)
}

#[test]
fn test_saved_options_flow() {
    let (store, clock) = store_with_manual_clock();

    // What the save-options handler stores: the caller's options re-serialized.
    let options = serde_json::json!({
        "minimumAge": 18,
        "ofac": true,
        "excludedCountries": ["PRK"],
        "nationality": true,
        "gender": false,
    });
    store
        .set_with_expiration("user-1", options.to_string(), DEFAULT_OPTIONS_TTL)
        .expect("save options");
    store.close().expect("close");

    let resolved = store.resolve_with_source("user-1").expect("resolve");
    assert_eq!(resolved.source, DisclosureSource::Options);
    assert_eq!(
        resolved.config,
        DisclosureConfig {
            minimum_age: Some(18),
            ofac: Some(true),
            excluded_countries: Some(vec!["PRK".to_string()]),
            nationality: Some(true),
            gender: Some(false),
            ..DisclosureConfig::default()
        }
    );

    clock.advance(31 * MINUTE);
    let err = store.resolve("user-1").expect_err("options expired");
    assert!(err.is_not_found());
    assert_eq!(store.options_len().expect("len"), 0);
}

#[test]
fn test_get_returns_raw_payload_until_expiry() {
    let (store, clock) = store_with_manual_clock();
    store
        .set_with_expiration("user-1", "{\"minimumAge\":18}", 30 * MINUTE)
        .expect("set");
    assert_eq!(store.get("user-1").expect("get"), "{\"minimumAge\":18}");

    clock.advance(31 * MINUTE);
    assert_eq!(
        store.get("user-1").expect_err("expired"),
        StoreError::NotFound {
            key: "user-1".to_string()
        }
    );
}

#[test]
fn test_config_fallback_after_options_expire() {
    let (store, clock) = store_with_manual_clock();
    let config = VerificationConfig {
        minimum_age: 21,
        ofac: true,
        excluded_countries: vec!["IRN".to_string()],
    };
    assert!(!store.upsert_config("cfg-a", config.clone()).expect("upsert"));

    let derived = resolver::resolve(&store, "cfg-a").expect("resolve config");
    assert_eq!(derived.source, DisclosureSource::Config);
    assert_eq!(derived.config, DisclosureConfig::from(config));

    store
        .set_with_expiration("cfg-a", r#"{"minimumAge":25}"#, 10 * MINUTE)
        .expect("set");
    assert_eq!(store.resolve("cfg-a").expect("options").minimum_age, Some(25));

    clock.advance(10 * MINUTE);
    let resolved = store.resolve_with_source("cfg-a").expect("fallback");
    assert_eq!(resolved.source, DisclosureSource::Config);
    assert_eq!(resolved.config.minimum_age, Some(21));
    assert_eq!(resolved.config.excluded_countries, Some(vec!["IRN".to_string()]));
}

#[test]
fn test_replaced_config_is_gone() {
    let store = DisclosureStore::new();
    let first = VerificationConfig {
        minimum_age: 18,
        ..VerificationConfig::default()
    };
    let second = VerificationConfig {
        minimum_age: 30,
        ofac: true,
        excluded_countries: vec![],
    };
    assert!(!store.upsert_config("cfg", first).expect("create"));
    assert!(store.upsert_config("cfg", second.clone()).expect("replace"));
    assert_eq!(store.get_config("cfg").expect("get"), Some(second));
}

#[test]
fn test_json_configs_feed_the_store() {
    let store = DisclosureStore::with_config(
        StoreConfig::from_json(r#"{"options_ttl_secs": 120}"#).expect("config"),
    );
    let config: VerificationConfig =
        serde_json::from_str(r#"{"minimumAge":16,"excludedCountries":["CUB"]}"#)
            .expect("config json");
    store.upsert_config("cfg", config).expect("upsert");

    let view = store.resolve("cfg").expect("resolve");
    assert_eq!(view.minimum_age, Some(16));
    assert_eq!(view.ofac, Some(false));
    assert_eq!(store.config().options_ttl, 2 * MINUTE);
}

#[test]
fn test_concurrent_writers_and_readers() {
    const WORKERS: usize = 16;
    const KEYS_PER_WORKER: usize = 64;

    let store = Arc::new(DisclosureStore::new());

    thread::scope(|s| {
        for worker in 0..WORKERS {
            let store = Arc::clone(&store);
            s.spawn(move || {
                for i in 0..KEYS_PER_WORKER {
                    let key = format!("user-{worker}-{i}");
                    store
                        .set_with_expiration(&key, format!("payload-{worker}-{i}"), MINUTE)
                        .expect("set");
                    store
                        .upsert_config(
                            &key,
                            VerificationConfig {
                                minimum_age: i32::try_from(i).expect("small index"),
                                ..VerificationConfig::default()
                            },
                        )
                        .expect("upsert");
                }
            });
        }
    });

    assert_eq!(store.options_len().expect("len"), WORKERS * KEYS_PER_WORKER);
    assert_eq!(store.configs_len().expect("len"), WORKERS * KEYS_PER_WORKER);

    thread::scope(|s| {
        for worker in 0..WORKERS {
            let store = Arc::clone(&store);
            s.spawn(move || {
                for i in 0..KEYS_PER_WORKER {
                    let key = format!("user-{worker}-{i}");
                    assert_eq!(
                        store.get(&key).expect("get"),
                        format!("payload-{worker}-{i}")
                    );
                    let config = store.get_config(&key).expect("get config");
                    assert_eq!(
                        config.map(|c| c.minimum_age),
                        Some(i32::try_from(i).expect("small index"))
                    );
                }
            });
        }
    });
}

#[test]
fn test_concurrent_sweeps_keep_live_entries() {
    let (store, clock) = store_with_manual_clock();
    let store = Arc::new(store);

    for i in 0..200 {
        let ttl = if i % 2 == 0 { MINUTE } else { 10 * MINUTE };
        store
            .set_with_expiration(&format!("k{i}"), format!("v{i}"), ttl)
            .expect("set");
    }
    clock.advance(2 * MINUTE);

    thread::scope(|s| {
        for t in 0..8 {
            let store = Arc::clone(&store);
            s.spawn(move || {
                for i in (1..200).step_by(2) {
                    if (i / 2) % 8 == t {
                        assert_eq!(store.get(&format!("k{i}")).expect("live"), format!("v{i}"));
                    }
                    assert!(store.get(&format!("k{}", i - 1)).is_err());
                }
            });
        }
    });

    assert_eq!(store.options_len().expect("len"), 100);
}

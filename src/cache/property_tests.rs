//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check key derivation and sweep retention over generated inputs.

use proptest::prelude::*;
use std::time::{Duration, SystemTime};

use crate::cache::{CacheKey, CacheStore, DEFAULT_EXTENSION};

const DAY_SECS: u64 = 24 * 60 * 60;
const RETENTION: Duration = Duration::from_secs(7 * DAY_SECS);

// == Strategies ==
/// Generates a host name
fn host_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,12}\\.(com|org|net)".prop_map(|s| s)
}

/// Generates path segments that contain no dot
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_-]{1,16}".prop_map(|s| s)
}

/// Generates image extensions without the dot
fn extension_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("png".to_string()),
        Just("gif".to_string()),
        Just("webp".to_string()),
        Just("jpeg".to_string()),
        "[a-z]{1,5}".prop_map(|s| s),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // The file name is a pure function of the URL string.
    #[test]
    fn prop_key_is_deterministic(
        host in host_strategy(),
        segments in prop::collection::vec(segment_strategy(), 0..4),
        query in prop::option::of("[a-z0-9=&]{1,20}"),
    ) {
        let mut url = format!("https://{}/{}", host, segments.join("/"));
        if let Some(q) = query {
            url.push('?');
            url.push_str(&q);
        }

        let first = CacheKey::from_url(&url).unwrap();
        let second = CacheKey::from_url(&url).unwrap();
        prop_assert_eq!(first.file_name(), second.file_name());
    }

    // A path extension carries through to the file name.
    #[test]
    fn prop_extension_preserved(
        host in host_strategy(),
        segments in prop::collection::vec(segment_strategy(), 1..4),
        ext in extension_strategy(),
    ) {
        let url = format!("https://{}/{}.{}", host, segments.join("/"), ext);
        let key = CacheKey::from_url(&url).unwrap();
        let expected = format!(".{}", ext);
        prop_assert!(key.file_name().ends_with(&expected));
    }

    // Paths without an extension fall back to `.jpg`.
    #[test]
    fn prop_missing_extension_defaults(
        host in host_strategy(),
        segments in prop::collection::vec(segment_strategy(), 0..4),
    ) {
        let url = format!("https://{}/{}", host, segments.join("/"));
        let key = CacheKey::from_url(&url).unwrap();
        prop_assert_eq!(key.extension, DEFAULT_EXTENSION);
    }

    // Distinct URLs never share a digest.
    #[test]
    fn prop_distinct_urls_distinct_digests(
        host in host_strategy(),
        a in segment_strategy(),
        b in segment_strategy(),
    ) {
        prop_assume!(a != b);
        let key_a = CacheKey::from_url(&format!("https://{}/{}.png", host, a)).unwrap();
        let key_b = CacheKey::from_url(&format!("https://{}/{}.png", host, b)).unwrap();
        prop_assert_ne!(key_a.digest, key_b.digest);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // An entry survives a sweep exactly when its age is within retention.
    #[test]
    fn prop_sweep_respects_retention(ages_hours in prop::collection::vec(0u64..(14 * 24), 1..8)) {
        let root = tempfile::tempdir().unwrap();
        let store = CacheStore::new(root.path());
        let now = SystemTime::now();

        let mut expectations = Vec::new();
        for (i, hours) in ages_hours.iter().enumerate() {
            let key = CacheKey::from_url(&format!("https://example.com/{}.png", i)).unwrap();
            let path = store.path_for(&key);
            std::fs::write(&path, b"img").unwrap();
            let age = Duration::from_secs(hours * 3600);
            let file = std::fs::File::options().write(true).open(&path).unwrap();
            file.set_modified(now - age).unwrap();
            // Stay clear of the boundary so test runtime cannot flip the outcome
            let keep = age < RETENTION - Duration::from_secs(3600) || age > RETENTION;
            prop_assume!(keep);
            expectations.push((path, age > RETENTION));
        }

        let removed = tokio_test::block_on(store.sweep_expired(RETENTION));

        let expected_removed = expectations.iter().filter(|(_, expired)| *expired).count();
        prop_assert_eq!(removed, expected_removed);
        for (path, expired) in expectations {
            prop_assert_eq!(path.exists(), !expired);
        }
    }
}

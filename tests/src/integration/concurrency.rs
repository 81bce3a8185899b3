//! # Concurrent Probing
//!
//! Serialized filters are immutable values: any number of threads may probe
//! the same bytes, and independent builds may run side by side.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bloom_core::{BloomConfig, Metrics};
    use bloom_functions::{build_filter, probe, BloomFunctions, InMemoryHost, Value};
    use rayon::prelude::*;

    fn keys(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{}-{}", prefix, i)).collect()
    }

    #[test]
    fn test_parallel_probes_match_sequential() {
        let members = keys("member", 2_000);
        let bytes = build_filter(&members, &BloomConfig::default()).unwrap();

        let candidates: Vec<String> = members
            .iter()
            .cloned()
            .chain(keys("other", 2_000))
            .collect();

        let sequential: Vec<bool> = candidates
            .iter()
            .map(|key| probe(key.as_bytes(), &bytes).unwrap())
            .collect();
        let parallel: Vec<bool> = candidates
            .par_iter()
            .map(|key| probe(key.as_bytes(), &bytes).unwrap())
            .collect();

        assert_eq!(sequential, parallel);
        assert!(parallel[..members.len()].iter().all(|found| *found));
    }

    #[test]
    fn test_parallel_builds_are_deterministic() {
        let members = keys("row", 500);
        let config = BloomConfig::default();
        let expected = build_filter(&members, &config).unwrap();

        let builds: Vec<Vec<u8>> = (0..8)
            .into_par_iter()
            .map(|_| build_filter(&members, &config).unwrap())
            .collect();

        assert!(builds.iter().all(|bytes| *bytes == expected));
    }

    #[test]
    fn test_shared_host_across_threads() {
        let metrics = Arc::new(Metrics::new());
        let mut host = InMemoryHost::new();
        BloomFunctions::default()
            .with_metrics(metrics.clone())
            .register(&mut host)
            .unwrap();

        let rows: Vec<Vec<Value>> = keys("name", 100)
            .into_iter()
            .map(|key| vec![Value::from(key)])
            .collect();
        let filter = host.aggregate("bloomfilter", 1, &rows).unwrap();

        let found = keys("name", 100)
            .par_iter()
            .filter(|key| {
                host.call_scalar("bloom_contains", &[Value::from(key.as_str()), filter.clone()])
                    .unwrap()
                    == Value::Integer(1)
            })
            .count();

        assert_eq!(found, 100);
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.filters_built, 1);
        assert_eq!(snapshot.probes_performed, 100);
        assert_eq!(snapshot.probes_positive, 100);
    }
}

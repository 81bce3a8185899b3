//! # End-to-End Scenario
//!
//! Mirrors a host session: load the functions, fill a `register` table,
//! `SELECT bloomfilter(data) FROM register`, then probe known and unknown
//! keys with `bloom_contains`.

#[cfg(test)]
mod tests {
    use bloom_core::{BloomConfig, BloomFilter, FilterError, FormatError, HEADER_LEN};
    use bloom_functions::{build_filter, probe, FunctionError, Value};

    use crate::{bloom_host, text_rows, REGISTER_ROWS};

    fn contains(host: &bloom_functions::InMemoryHost, key: &str, filter: &Value) -> Value {
        match host.call_scalar("bloom_contains", &[Value::from(key), filter.clone()]) {
            Ok(value) => value,
            Err(err) => panic!("bloom_contains({}) failed: {}", key, err),
        }
    }

    // =============================================================================
    // AGGREGATE THEN PROBE
    // =============================================================================

    #[test]
    fn test_register_table_scenario() {
        let host = bloom_host();
        let filter = host
            .aggregate("bloomfilter", 1, text_rows(REGISTER_ROWS))
            .expect("aggregate should succeed");

        for key in REGISTER_ROWS {
            assert_eq!(
                contains(&host, key, &filter),
                Value::Integer(1),
                "known key {} must be found",
                key
            );
        }

        let false_positives = REGISTER_ROWS
            .iter()
            .map(|key| format!("{}-test", key))
            .filter(|key| contains(&host, key, &filter) == Value::Integer(1))
            .count();
        assert!(
            false_positives <= 1,
            "{} of 11 unseen keys reported present",
            false_positives
        );
    }

    #[test]
    fn test_exactly_sized_build_scenario() {
        // Sized for exactly 11 keys at 1%
        let bytes = build_filter(REGISTER_ROWS, &BloomConfig::default()).unwrap();

        for key in REGISTER_ROWS {
            assert!(probe(key.as_bytes(), &bytes).unwrap());
        }

        let false_positives = REGISTER_ROWS
            .iter()
            .filter(|key| probe(format!("{}-test", key).as_bytes(), &bytes).unwrap())
            .count();
        assert!(false_positives <= 2, "{} false positives", false_positives);
    }

    #[test]
    fn test_aggregate_and_build_agree_on_membership() {
        let host = bloom_host();
        let aggregated = host
            .aggregate("bloomfilter", 1, text_rows(REGISTER_ROWS))
            .unwrap();
        let Value::Blob(aggregated) = aggregated else {
            panic!("bloomfilter must return a blob");
        };

        let built = build_filter(
            REGISTER_ROWS.iter().filter(|_| true),
            &BloomConfig::default(),
        )
        .unwrap();

        // Both use the default policy when the row count is not known up front
        assert_eq!(aggregated, built);
    }

    // =============================================================================
    // HOST SEMANTICS
    // =============================================================================

    #[test]
    fn test_serialized_header_is_self_describing() {
        let host = bloom_host();
        let Value::Blob(bytes) = host
            .aggregate("bloomfilter", 1, text_rows(["foo"]))
            .unwrap()
        else {
            panic!("bloomfilter must return a blob");
        };

        // "BLM", version 1, m = 9586, k = 7
        assert_eq!(
            hex::encode(&bytes[..HEADER_LEN]),
            "424c4d01722500000000000007000000"
        );
        assert_eq!(bytes.len(), HEADER_LEN + 1199);
    }

    #[test]
    fn test_empty_table_builds_empty_filter() {
        let host = bloom_host();
        let filter = host
            .aggregate("bloomfilter", 1, Vec::<Vec<Value>>::new())
            .unwrap();

        for key in REGISTER_ROWS {
            assert_eq!(contains(&host, key, &filter), Value::Integer(0));
        }
    }

    #[test]
    fn test_null_rows_are_ignored() {
        let host = bloom_host();
        let mut rows = text_rows(["foo", "bar"]);
        rows.insert(1, vec![Value::Null]);

        let with_nulls = host.aggregate("bloomfilter", 1, &rows).unwrap();
        let without = host
            .aggregate("bloomfilter", 1, text_rows(["foo", "bar"]))
            .unwrap();

        assert_eq!(with_nulls, without);
        assert_eq!(
            host.call_scalar("bloom_contains", &[Value::Null, with_nulls])
                .unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_sized_aggregate() {
        let host = bloom_host();
        let rows: Vec<Vec<Value>> = REGISTER_ROWS
            .iter()
            .map(|key| vec![Value::from(*key), Value::Integer(1024)])
            .collect();

        let Value::Blob(bytes) = host.aggregate("bloomfilter", 2, &rows).unwrap() else {
            panic!("bloomfilter must return a blob");
        };
        let filter = BloomFilter::deserialize(&bytes).unwrap();

        // size is a byte count: 1024 bytes of bits
        assert_eq!(bytes.len(), HEADER_LEN + 1024);
        assert_eq!(filter.size_bits(), 8192);
        assert_eq!(filter.hash_count(), 6);
        for key in REGISTER_ROWS {
            assert!(filter.contains(key.as_bytes()));
        }
    }

    #[test]
    fn test_numeric_keys_match_their_text() {
        let host = bloom_host();
        let rows = vec![vec![Value::Integer(42)], vec![Value::Integer(-7)]];
        let filter = host.aggregate("bloomfilter", 1, &rows).unwrap();

        assert_eq!(contains(&host, "42", &filter), Value::Integer(1));
        assert_eq!(contains(&host, "-7", &filter), Value::Integer(1));
    }

    #[test]
    fn test_malformed_filter_is_query_error() {
        let host = bloom_host();

        let result = host.call_scalar(
            "bloom_contains",
            &[Value::from("foo"), Value::Blob(b"BLM\x02".repeat(4))],
        );
        assert_eq!(
            result,
            Err(FunctionError::Filter(FilterError::Format(
                FormatError::UnsupportedVersion(2)
            )))
        );

        let result = host.call_scalar("bloom_contains", &[Value::from("foo"), Value::Integer(7)]);
        assert!(matches!(result, Err(FunctionError::InvalidArgument { .. })));
    }

    #[test]
    fn test_murmurhash_through_host() {
        let host = bloom_host();

        let unseeded = host.call_scalar("murmurhash", &[Value::from("foo")]).unwrap();
        let seeded = host
            .call_scalar("murmurhash", &[Value::from("foo"), Value::Integer(1337)])
            .unwrap();

        assert_eq!(unseeded, Value::Integer(2_414_502_773));
        assert_eq!(seeded, Value::Integer(939_703_048));
        assert_eq!(
            host.call_scalar("murmurhash", &[Value::Null]).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_ragged_rows_are_argument_count_errors() {
        let host = bloom_host();
        let rows = vec![vec![Value::from("foo")], vec![Value::from("bar"), Value::Integer(2)]];

        assert!(matches!(
            host.aggregate("bloomfilter", 1, rows),
            Err(FunctionError::WrongArgumentCount { actual: 2, .. })
        ));
    }

    #[test]
    fn test_unregistered_arity_is_unknown() {
        let host = bloom_host();

        assert!(matches!(
            host.call_scalar("bloom_contains", &[Value::from("foo")]),
            Err(FunctionError::UnknownFunction { arity: 1, .. })
        ));
    }
}

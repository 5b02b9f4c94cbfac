#[cfg(test)]
mod tests {
    use jab_core::constants::MAX_SAFE_INTEGER;
    use jab_core::crypto::{hash, hash_str};
    use jab_core::types::JabError;
    use proptest::prelude::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(hash_str(""), 4_248_009_926_078_979);
        assert_eq!(hash_str("JAB"), 3_231_859_094_995_899);
        assert_eq!(hash_str("abc"), 5_971_844_016_864_526);
    }

    #[test]
    fn test_parts_are_concatenated() {
        let joined = hash(&[b"abc".as_slice()]).unwrap();
        let split = hash(&[b"a".as_slice(), b"bc".as_slice()]).unwrap();
        assert_eq!(joined, split);
        assert_eq!(joined, hash_str("abc"));
    }

    #[test]
    fn test_no_parts_is_hash_error() {
        let err = hash(&[]).unwrap_err();
        assert!(matches!(err, JabError::Hash(_)));
    }

    #[test]
    fn test_different_inputs_differ() {
        assert_ne!(hash_str("Some Name"), hash_str("Some Namf"));
    }

    proptest! {
        #[test]
        fn prop_hash_fits_json_safe_range(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let id = hash(&[data.as_slice()]).unwrap();
            prop_assert!(id < MAX_SAFE_INTEGER);
            prop_assert_eq!(id, hash(&[data.as_slice()]).unwrap());
        }
    }
}

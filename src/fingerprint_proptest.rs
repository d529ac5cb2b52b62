//! Property-based tests for fingerprint extraction and directory matching.
//!
//! These tests use proptest to generate random names and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::fingerprint::{extract, MARKER};
    use crate::matcher::match_branch;
    use proptest::prelude::*;

    // ============================================================================
    // extract property tests
    // ============================================================================

    proptest! {
        /// Property: a name without the marker has no fingerprint
        #[test]
        fn extract_without_marker_is_empty(input in "[a-z0-9-]*") {
            prop_assume!(!input.contains(MARKER));
            prop_assert_eq!(extract(&input, MARKER), "");
        }

        /// Property: a name ending in the marker has no fingerprint
        #[test]
        fn extract_marker_suffix_is_empty(prefix in "[a-z0-9-]*") {
            let input = format!("{}{}", prefix, MARKER);
            prop_assert_eq!(extract(&input, MARKER), "");
        }

        /// Property: prefix + marker + hash always yields hash when hash
        /// contains no marker
        #[test]
        fn extract_returns_suffix(prefix in ".*", hash in "[0-9a-f]{1,12}") {
            let input = format!("{}{}{}", prefix, MARKER, hash);
            prop_assert_eq!(extract(&input, MARKER), hash.as_str());
        }

        /// Property: re-extracting a marker-free fragment with the marker
        /// prepended returns the fragment unchanged
        #[test]
        fn extract_is_idempotent(input in ".*") {
            let first = extract(&input, MARKER);
            prop_assume!(!first.is_empty());
            let again = format!("{}{}", MARKER, first);
            prop_assert_eq!(extract(&again, MARKER), first);
        }

        /// Property: the fingerprint never contains the marker
        #[test]
        fn extract_result_is_marker_free(input in ".*") {
            prop_assert!(!extract(&input, MARKER).contains(MARKER));
        }
    }

    // ============================================================================
    // match_branch property tests
    // ============================================================================

    proptest! {
        /// Property: with exactly one candidate, listing order does not matter
        #[test]
        fn single_candidate_matches_in_any_order(
            others in prop::collection::hash_set("[0-9a-f]{8}", 0..8),
            target in "[0-9a-f]{8}",
            position in any::<prop::sample::Index>(),
        ) {
            prop_assume!(!others.contains(&target));

            let mut dirs: Vec<String> = others
                .iter()
                .enumerate()
                .map(|(i, hash)| format!("b{}-{}{}", i, MARKER, hash))
                .collect();
            let expected = format!("target-{}{}", MARKER, target);
            let at = position.index(dirs.len() + 1);
            dirs.insert(at, expected.clone());

            let branch = format!("feature-{}{}", MARKER, target);
            let result = match_branch(&branch, &dirs, MARKER);

            prop_assert!(result.is_match());
            prop_assert_eq!(result.matched_dir, Some(expected));
            prop_assert_eq!(result.host_fingerprint, target);
        }

        /// Property: a branch without a fingerprint never matches
        #[test]
        fn unfingerprinted_branch_never_matches(
            dirs in prop::collection::vec("[a-z0-9-]{0,20}", 0..8),
            branch in "[a-z0-9-]{0,20}",
        ) {
            prop_assume!(!branch.contains(MARKER));
            prop_assert!(!match_branch(&branch, &dirs, MARKER).is_match());
        }
    }
}

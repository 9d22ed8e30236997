//! Property-based tests for the pure grouping primitives.

use std::collections::BTreeMap;

use dupescan::duplicates::{member_count, retain_duplicates};
use proptest::prelude::*;

fn arb_groups() -> impl Strategy<Value = BTreeMap<u64, Vec<String>>> {
    prop::collection::btree_map(
        0u64..10_000,
        prop::collection::vec("[a-z]{1,8}", 0..5),
        0..20,
    )
}

proptest! {
    #[test]
    fn filter_keeps_exactly_the_multi_member_groups(groups in arb_groups()) {
        let expected: usize = groups.values().filter(|v| v.len() > 1).count();
        let filtered = retain_duplicates(groups);
        prop_assert_eq!(filtered.len(), expected);
        prop_assert!(filtered.values().all(|v| v.len() > 1));
    }

    #[test]
    fn filter_never_invents_or_reorders_members(groups in arb_groups()) {
        let original = groups.clone();
        let filtered = retain_duplicates(groups);
        for (key, members) in &filtered {
            prop_assert_eq!(members, &original[key]);
        }
    }

    #[test]
    fn filter_is_idempotent(groups in arb_groups()) {
        let once = retain_duplicates(groups);
        let twice = retain_duplicates(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn member_count_sums_all_groups(groups in arb_groups()) {
        let expected: usize = groups.values().map(Vec::len).sum();
        prop_assert_eq!(member_count(&groups), expected);
    }
}

//! Property tests for positional attribute-list edits.
//!
//! The lists are identified by position: edits must never disturb the
//! relative order or content of untouched entries.

use proptest::prelude::*;

use cleanroom_tui::app::ingest::{list_add, list_remove, list_update};

proptest! {
    #[test]
    fn remove_preserves_survivor_order(
        entries in prop::collection::vec("[a-z_:]{1,12}", 1..8),
        index in 0usize..8,
    ) {
        let mut list = entries.clone();
        list_remove(&mut list, index);

        if index < entries.len() {
            let mut expected = entries.clone();
            expected.remove(index);
            prop_assert_eq!(list, expected);
        } else {
            prop_assert_eq!(list, entries);
        }
    }

    #[test]
    fn add_appends_exactly_one_empty_entry(
        entries in prop::collection::vec("[a-z_:]{1,12}", 0..8),
    ) {
        let mut list = entries.clone();
        list_add(&mut list);

        prop_assert_eq!(list.len(), entries.len() + 1);
        prop_assert_eq!(&list[..entries.len()], &entries[..]);
        prop_assert_eq!(list.last().map(String::as_str), Some(""));
    }

    #[test]
    fn update_touches_only_the_indexed_entry(
        entries in prop::collection::vec("[a-z_:]{1,12}", 1..8),
        index in 0usize..8,
        value in "[a-z_:]{0,12}",
    ) {
        let mut list = entries.clone();
        list_update(&mut list, index, value.clone());

        prop_assert_eq!(list.len(), entries.len());
        for (i, entry) in list.iter().enumerate() {
            if i == index {
                prop_assert_eq!(entry, &value);
            } else {
                prop_assert_eq!(entry, &entries[i]);
            }
        }
    }
}

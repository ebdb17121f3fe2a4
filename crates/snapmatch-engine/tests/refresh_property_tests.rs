#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use snapmatch_engine::{match_to, SettingsBuilder};
use std::collections::BTreeMap;
use std::fs;
use tempfile::TempDir;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn refreshed_snapshot_matches_on_next_run(
        record in prop::collection::btree_map("[a-z]{1,8}", prop::collection::vec(any::<i32>(), 0..4), 0..6),
        prior in prop::option::of("[ -~]{0,40}")
    ) {
        let dir = TempDir::new().unwrap();
        let builder = SettingsBuilder::new()
            .snapshot_name("Property")
            .snapshot_directory(dir.path());
        let refresh = builder.clone().force_refresh(true).build().unwrap();
        let plain = builder.build().unwrap();

        if let Some(prior) = prior {
            fs::write(refresh.snapshot_file_path(), prior).unwrap();
        }

        prop_assert!(match_to(&record, &refresh).unwrap());
        prop_assert!(match_to(&record, &plain).unwrap());
        prop_assert!(!plain.mismatch_file_path().exists());

        let mut changed: BTreeMap<String, Vec<i32>> = record.clone();
        changed.insert("zzzzzzzzz".to_string(), vec![1]);
        prop_assert!(!match_to(&changed, &plain).unwrap());
        prop_assert!(plain.mismatch_file_path().exists());
    }
}

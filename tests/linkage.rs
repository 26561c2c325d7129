use linkage_tools::linkage::{Scorer, Strategy as LinkStrategy, Threshold};
use linkage_tools::{
    KeyNormalization, LinkColumns, LinkError, LinkOptions, Table, TableRole, Value, exact_join,
    fuzzy_match, link,
};
use proptest::prelude::*;

fn columns() -> LinkColumns {
    LinkColumns::new("ASIN", "New EAN")
}

fn portal(keys: &[&str]) -> Table {
    Table::from_rows(
        ["ASIN", "Units"],
        keys.iter()
            .enumerate()
            .map(|(idx, key)| vec![Value::from(*key), Value::Number(idx as f64)])
            .collect(),
    )
}

fn catalogue(entries: &[(&str, &str)]) -> Table {
    Table::from_rows(
        ["ASIN", "New EAN"],
        entries
            .iter()
            .map(|(key, target)| vec![Value::from(*key), Value::from(*target)])
            .collect(),
    )
}

fn targets(mapped: &Table) -> Vec<Value> {
    mapped.column_values("New EAN").cloned().collect()
}

fn keys(table: &Table) -> Vec<Value> {
    table.column_values("ASIN").cloned().collect()
}

#[test]
fn exact_join_copies_target_or_null() {
    let portal = portal(&["A1", "ZZZ"]);
    let catalogue = catalogue(&[("A1", "X")]);

    let mapped = exact_join(&portal, &catalogue, &columns()).expect("exact join");

    assert_eq!(mapped.columns, vec!["ASIN", "Units", "New EAN"]);
    assert_eq!(targets(&mapped), vec![Value::from("X"), Value::Null]);
}

#[test]
fn exact_join_last_duplicate_wins() {
    let portal = portal(&["A1"]);
    let catalogue = catalogue(&[("A1", "X"), ("A1", "Y")]);

    let mapped = exact_join(&portal, &catalogue, &columns()).expect("exact join");

    assert_eq!(targets(&mapped), vec![Value::from("Y")]);
}

#[test]
fn exact_join_keeps_repeated_portal_keys() {
    let portal = portal(&["A1", "A1", "B2", "A1"]);
    let catalogue = catalogue(&[("A1", "X"), ("B2", "Y")]);

    let mapped = exact_join(&portal, &catalogue, &columns()).expect("exact join");

    assert_eq!(mapped.len(), 4);
    assert_eq!(keys(&mapped), keys(&portal));
    assert_eq!(
        targets(&mapped),
        vec![
            Value::from("X"),
            Value::from("X"),
            Value::from("Y"),
            Value::from("X")
        ]
    );
}

#[test]
fn fuzzy_threshold_boundary_is_inclusive() {
    let score = Scorer::Indel.score_str("ASIN1", "ASIN2");
    assert_eq!(score, 80.0);

    let portal = portal(&["ASIN1"]);
    let catalogue = catalogue(&[("ASIN2", "X")]);

    let at = fuzzy_match(&portal, &catalogue, &columns(), 80).expect("fuzzy match");
    assert_eq!(targets(&at), vec![Value::from("X")]);

    let above = fuzzy_match(&portal, &catalogue, &columns(), 81).expect("fuzzy match");
    assert_eq!(targets(&above), vec![Value::Null]);
}

#[test]
fn fuzzy_picks_highest_score_in_any_order() {
    // "B07ABCDEFG" vs "B07ABCDEFX" scores 90, vs "B07ABCDXYZ" scores 70.
    let portal = portal(&["B07ABCDEFG"]);
    let near = ("B07ABCDEFX", "near");
    let far = ("B07ABCDXYZ", "far");
    assert_eq!(Scorer::Indel.score_str("B07ABCDEFG", near.0), 90.0);
    assert_eq!(Scorer::Indel.score_str("B07ABCDEFG", far.0), 70.0);

    for entries in [[near, far], [far, near]] {
        let catalogue = catalogue(&entries);
        let mapped = fuzzy_match(&portal, &catalogue, &columns(), 60).expect("fuzzy match");
        assert_eq!(targets(&mapped), vec![Value::from("near")]);
    }
}

#[test]
fn fuzzy_exact_key_beats_near_misses() {
    let portal = portal(&["B0001"]);
    let catalogue = catalogue(&[("B0002", "near"), ("B0001", "exact"), ("B0001", "later")]);

    let mapped = fuzzy_match(&portal, &catalogue, &columns(), 90).expect("fuzzy match");

    assert_eq!(targets(&mapped), vec![Value::from("exact")]);
}

#[test]
fn fuzzy_does_not_fold_case() {
    let portal = portal(&["asin-01"]);
    let catalogue = catalogue(&[("ASIN-01", "X")]);

    let literal = fuzzy_match(&portal, &catalogue, &columns(), 90).expect("fuzzy match");
    assert_eq!(targets(&literal), vec![Value::Null]);

    let options = LinkOptions {
        columns: columns(),
        strategy: LinkStrategy::Fuzzy {
            threshold: Threshold::new(90).expect("threshold"),
            scorer: Scorer::Indel,
        },
        normalization: KeyNormalization {
            trim: false,
            case_insensitive: true,
        },
    };
    let folded = link(&portal, &catalogue, &options).expect("fuzzy match");
    assert_eq!(targets(&folded), vec![Value::from("X")]);
}

#[test]
fn fuzzy_rejects_out_of_range_threshold() {
    let portal = portal(&["A1"]);
    let catalogue = catalogue(&[("A1", "X")]);

    let error = fuzzy_match(&portal, &catalogue, &columns(), 101).unwrap_err();

    assert!(matches!(error, LinkError::InvalidThreshold(101)));
}

#[test]
fn portal_validation_runs_before_catalogue() {
    let portal = Table::new(["Title"]);
    let catalogue = Table::new(["Brand"]);

    for strategy in [
        LinkStrategy::Exact,
        LinkStrategy::Fuzzy {
            threshold: Threshold::default(),
            scorer: Scorer::default(),
        },
    ] {
        let options = LinkOptions {
            columns: columns(),
            strategy,
            normalization: KeyNormalization::default(),
        };
        let error = link(&portal, &catalogue, &options).unwrap_err();
        match error {
            LinkError::MissingColumn { table, column } => {
                assert_eq!(table, TableRole::Portal);
                assert_eq!(column, "ASIN");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn catalogue_key_checked_before_target() {
    let portal = portal(&["A1"]);
    let catalogue = Table::new(["Brand"]);

    let error = exact_join(&portal, &catalogue, &columns()).unwrap_err();

    assert!(matches!(
        error,
        LinkError::MissingColumn { table: TableRole::Catalogue, ref column } if column == "ASIN"
    ));
}

#[test]
fn custom_column_names_are_honoured() {
    let portal = Table::from_rows(["Item"], vec![vec![Value::from("I-1")]]);
    let catalogue = Table::from_rows(
        ["Item", "EAM"],
        vec![vec![Value::from("I-1"), Value::from("111")]],
    );
    let columns = LinkColumns::new("Item", "EAM");

    let mapped = exact_join(&portal, &catalogue, &columns).expect("exact join");

    assert_eq!(mapped.columns, vec!["Item", "EAM"]);
    assert_eq!(
        mapped.column_values("EAM").cloned().collect::<Vec<_>>(),
        vec![Value::from("111")]
    );
}

#[test]
fn inputs_are_left_untouched() {
    let portal = portal(&["ASIN1", "B2"]);
    let catalogue = catalogue(&[("ASIN2", "X")]);
    let portal_before = portal.clone();
    let catalogue_before = catalogue.clone();

    fuzzy_match(&portal, &catalogue, &columns(), 50).expect("fuzzy match");
    exact_join(&portal, &catalogue, &columns()).expect("exact join");

    assert_eq!(portal, portal_before);
    assert_eq!(catalogue, catalogue_before);
}

#[test]
fn exact_join_is_idempotent() {
    let portal = portal(&["A1", "B2", "C3"]);
    let catalogue = catalogue(&[("A1", "X"), ("C3", "Z"), ("A1", "Y")]);

    let first = exact_join(&portal, &catalogue, &columns()).expect("exact join");
    let second = exact_join(&portal, &catalogue, &columns()).expect("exact join");

    assert_eq!(first, second);
}

fn key_strategy() -> impl Strategy<Value = String> {
    "[A-C][0-9]{0,2}"
}

proptest! {
    #[test]
    fn mapping_preserves_portal_rows_and_order(
        portal_keys in proptest::collection::vec(key_strategy(), 0..20),
        catalogue_keys in proptest::collection::vec(key_strategy(), 0..20),
        threshold in 0i64..=100,
    ) {
        let portal_refs: Vec<&str> = portal_keys.iter().map(String::as_str).collect();
        let entries: Vec<(&str, &str)> = catalogue_keys
            .iter()
            .map(|key| (key.as_str(), "T"))
            .collect();
        let portal = portal(&portal_refs);
        let catalogue = catalogue(&entries);

        let exact = exact_join(&portal, &catalogue, &columns()).expect("exact join");
        prop_assert_eq!(exact.len(), portal.len());
        prop_assert_eq!(keys(&exact), keys(&portal));

        let fuzzy = fuzzy_match(&portal, &catalogue, &columns(), threshold).expect("fuzzy match");
        prop_assert_eq!(fuzzy.len(), portal.len());
        prop_assert_eq!(keys(&fuzzy), keys(&portal));
    }

    #[test]
    fn exact_hits_are_fuzzy_hits(
        portal_keys in proptest::collection::vec(key_strategy(), 1..10),
        catalogue_keys in proptest::collection::vec(key_strategy(), 1..10),
    ) {
        let portal_refs: Vec<&str> = portal_keys.iter().map(String::as_str).collect();
        let entries: Vec<(&str, &str)> = catalogue_keys
            .iter()
            .map(|key| (key.as_str(), "T"))
            .collect();
        let portal = portal(&portal_refs);
        let catalogue = catalogue(&entries);

        let exact = exact_join(&portal, &catalogue, &columns()).expect("exact join");
        let fuzzy = fuzzy_match(&portal, &catalogue, &columns(), 100).expect("fuzzy match");
        prop_assert_eq!(targets(&exact), targets(&fuzzy));
    }
}

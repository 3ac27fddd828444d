//! Property tests for the analysis-file parser.
//!
//! Generated files must always come back with non-negative indices, with
//! no `rxn` left in parameter names, and with block sizes that match where
//! the separator was written.

use proptest::prelude::*;

use crate::sensitivity::parse_analysis;

fn parameter_name() -> impl Strategy<Value = String> {
    "[a-zA-Z_]{0,3}(rxn|RXN|Rxn|rXn)?[a-z]{0,2}[0-9]{1,3}"
}

fn first_rows(max: usize) -> impl Strategy<Value = Vec<(String, f64, f64)>> {
    prop::collection::vec((parameter_name(), -1.0..1.0_f64, -1.0..1.0_f64), 1..=max)
}

fn pair_rows(max: usize) -> impl Strategy<Value = Vec<(String, String, f64)>> {
    prop::collection::vec((parameter_name(), parameter_name(), -1.0..1.0_f64), 0..=max)
}

fn render(first: &[(String, f64, f64)], second: Option<&[(String, String, f64)]>) -> String {
    let mut text = String::from("Parameter S1 S1_conf ST ST_conf\n");
    for (p, s1, st) in first {
        text.push_str(&format!("{p} {s1} 0.01 {st} 0.01\n"));
    }
    if let Some(pairs) = second {
        text.push_str("\nParameter_1 Parameter_2 S2 S2_conf\n");
        for (a, b, s2) in pairs {
            text.push_str(&format!("{a} {b} {s2} 0.01\n"));
        }
    }
    text
}

proptest! {
    /// No first- or second-order index survives parsing below zero.
    #[test]
    fn indices_are_never_negative(
        first in first_rows(30),
        second in pair_rows(30),
        with_second in any::<bool>(),
    ) {
        let text = render(&first, with_second.then_some(second.as_slice()));
        let (first_table, second_table) = parse_analysis(&text).unwrap();

        for row in first_table.rows() {
            prop_assert!(row.s1 >= 0.0, "negative S1 {} for {}", row.s1, row.parameter);
        }
        if let Some(table) = second_table {
            for row in table.rows() {
                prop_assert!(row.s2 >= 0.0, "negative S2 {}", row.s2);
            }
        }
    }

    /// Clamping only touches negative values.
    #[test]
    fn positive_indices_are_unchanged(first in first_rows(30)) {
        let text = render(&first, None);
        let (table, _) = parse_analysis(&text).unwrap();

        for ((_, s1, st), row) in first.iter().zip(table.rows()) {
            prop_assert_eq!(row.s1, s1.max(0.0));
            // ST is not clamped
            prop_assert_eq!(row.st, Some(*st));
        }
    }

    /// `rxn` never appears in a first-order parameter name, in any case.
    #[test]
    fn rxn_prefix_is_normalized(first in first_rows(30)) {
        let text = render(&first, None);
        let (table, _) = parse_analysis(&text).unwrap();

        for row in table.rows() {
            prop_assert!(
                !row.parameter.to_ascii_lowercase().contains("rxn"),
                "unnormalized name {}",
                row.parameter
            );
        }
    }

    /// A separator at zero-based line K yields K-1 first-order rows and the
    /// rest as second-order rows; no separator yields no second table.
    #[test]
    fn block_sizes_follow_separator(
        first in first_rows(40),
        second in pair_rows(40),
        with_second in any::<bool>(),
    ) {
        let text = render(&first, with_second.then_some(second.as_slice()));
        let (first_table, second_table) = parse_analysis(&text).unwrap();

        let k = first.len() + 1;
        prop_assert_eq!(first_table.len(), k - 1);
        if with_second {
            prop_assert_eq!(second_table.map(|t| t.len()), Some(second.len()));
        } else {
            prop_assert!(second_table.is_none());
        }
    }
}

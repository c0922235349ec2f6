//! Property tests for the relational operators.

use proptest::prelude::*;
use tabula_sql::executor::{compare_value, filter, join_all, project};
use tabula_sql::{Column, Operand, Operator, Predicate, Projection, Table};

/// A table with `prefix`-qualified column names.
fn table(prefix: &'static str) -> impl Strategy<Value = Table> {
    (1usize..4, 0usize..6).prop_flat_map(move |(cols, rows)| {
        prop::collection::vec(prop::collection::vec("[a-c0-9]{0,2}", rows), cols).prop_map(
            move |columns| {
                Table::new(
                    columns
                        .into_iter()
                        .enumerate()
                        .map(|(i, values)| Column::new(format!("{prefix}.c{i}"), values))
                        .collect(),
                )
                .unwrap()
            },
        )
    })
}

proptest! {
    #[test]
    fn repeat_multiplies_rows(t in table("t"), n in 0usize..5) {
        let rows = t.row_count().unwrap();
        let block = t.repeat_each_row_block(n);
        let whole = t.repeat_whole_sequence(n);

        prop_assert_eq!(block.row_count().unwrap(), n * rows);
        prop_assert_eq!(whole.row_count().unwrap(), n * rows);
        prop_assert!(block.column_names().eq(t.column_names()));
        prop_assert!(whole.column_names().eq(t.column_names()));
    }

    #[test]
    fn join_rows_decompose(a in table("a"), b in table("b"), c in table("c")) {
        let (ra, rb, rc) = (a.row_count().unwrap(), b.row_count().unwrap(), c.row_count().unwrap());
        let joined = join_all(&[&a, &b, &c]).unwrap();
        prop_assert_eq!(joined.row_count().unwrap(), ra * rb * rc);

        for (k, row) in joined.rows().enumerate() {
            let (i, j, l) = (k / (rb * rc), (k / rc) % rb, k % rc);
            let mut expected = a.row(i).unwrap();
            expected.extend(b.row(j).unwrap());
            expected.extend(c.row(l).unwrap());
            prop_assert_eq!(row, expected);
        }
    }

    #[test]
    fn filter_is_idempotent(t in table("t"), value in "[a-c0-9]{0,2}", gt in any::<bool>()) {
        let op = if gt { Operator::Gt } else { Operator::Eq };
        let pred = Predicate::new("t.c0", op, Operand::literal(value));
        let once = filter(&t, Some(&pred)).unwrap();
        let twice = filter(&once, Some(&pred)).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn wildcard_projection_is_identity(t in table("t")) {
        prop_assert_eq!(project(&t, &Projection::All).unwrap(), t);
    }

    #[test]
    fn matches_are_ascending_and_string_ordered(
        cells in prop::collection::vec("[0-9]{1,3}", 0..10),
        value in "[0-9]{1,3}",
    ) {
        let rows = compare_value(&cells, &value, Operator::Gt);
        prop_assert!(rows.windows(2).all(|w| w[0] < w[1]));
        let expected: Vec<usize> = (0..cells.len()).filter(|&i| cells[i].as_str() > value.as_str()).collect();
        prop_assert_eq!(rows, expected);
    }
}

//! WHERE predicates and their evaluation.
//!
//! All cells are strings and all comparisons are string comparisons: `"2" > "10"`
//! holds and `"10" > "9"` does not. Numeric-looking values are never coerced.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};
use crate::table::{Column, Table};

/// Comparison operator of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// `=`: string equality.
    Eq,
    /// `>`: lexicographic string ordering.
    Gt,
}

impl Operator {
    /// All operators, in the order the parser looks for them.
    pub const ALL: [Operator; 2] = [Operator::Eq, Operator::Gt];

    /// Returns the character that spells this operator in a query.
    pub const fn symbol(self) -> char {
        match self {
            Operator::Eq => '=',
            Operator::Gt => '>',
        }
    }

    /// Applies the operator to a pair of cells.
    #[inline]
    pub fn holds(self, left: &str, right: &str) -> bool {
        match self {
            Operator::Eq => left == right,
            Operator::Gt => left > right,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Right-hand side of a predicate as written in the query.
///
/// Whether an unquoted operand is a column or a literal depends on the table
/// the predicate is evaluated against, so the decision is deferred to
/// [`Operand::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operand {
    text: String,
    quoted: bool,
}

/// An operand resolved against a table.
#[derive(Debug, Clone, Copy)]
pub enum Comparand<'a> {
    /// Compare against another column, row by row.
    Column(&'a Column),
    /// Compare every row against one value.
    Literal(&'a str),
}

impl Operand {
    /// Parses operand text, stripping one leading and one trailing quote
    /// character (`'` or `"`) if present.
    pub fn parse(raw: &str) -> Self {
        let (text, leading) = match raw.strip_prefix(['\'', '"']) {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        let (text, trailing) = match text.strip_suffix(['\'', '"']) {
            Some(rest) => (rest, true),
            None => (text, false),
        };
        Self {
            text: text.to_string(),
            quoted: leading || trailing,
        }
    }

    /// An unquoted operand, a column if the table has one of that name.
    pub fn bare(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
        }
    }

    /// A quoted operand, always a literal.
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: true,
        }
    }

    /// Returns the operand text without quotes.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the operand was quoted.
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// Classifies the operand against `table`.
    pub fn resolve<'a>(&'a self, table: &'a Table) -> Comparand<'a> {
        if self.quoted {
            return Comparand::Literal(&self.text);
        }
        match table.column(&self.text) {
            Some(column) => Comparand::Column(column),
            None => Comparand::Literal(&self.text),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted {
            write!(f, "'{}'", self.text)
        } else {
            write!(f, "{}", self.text)
        }
    }
}

/// A single binary comparison: `<column> <op> <column or literal>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    /// Column on the left of the operator.
    pub left: String,
    /// Comparison operator.
    pub op: Operator,
    /// Column or literal on the right of the operator.
    pub right: Operand,
}

impl Predicate {
    /// Creates a predicate.
    pub fn new(left: impl Into<String>, op: Operator, right: Operand) -> Self {
        Self {
            left: left.into(),
            op,
            right,
        }
    }

    /// Returns the ascending indices of the rows of `table` that satisfy the
    /// predicate.
    pub fn matching_rows(&self, table: &Table) -> QueryResult<Vec<usize>> {
        let left = table
            .column(&self.left)
            .ok_or_else(|| QueryError::UnknownColumn(self.left.clone()))?;

        let rows = match self.right.resolve(table) {
            Comparand::Column(right) => compare_columns(left.values(), right.values(), self.op),
            Comparand::Literal(value) => compare_value(left.values(), value, self.op),
        };
        Ok(rows)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.left, self.op, self.right)
    }
}

/// Indices where `left[i] <op> right[i]` holds.
///
/// Both columns come from the same table, so they have the same length.
pub fn compare_columns<S: AsRef<str>>(left: &[S], right: &[S], op: Operator) -> Vec<usize> {
    left.iter()
        .zip(right)
        .enumerate()
        .filter(|(_, (l, r))| op.holds(l.as_ref(), r.as_ref()))
        .map(|(i, _)| i)
        .collect()
}

/// Indices where `column[i] <op> value` holds.
pub fn compare_value<S: AsRef<str>>(column: &[S], value: &str, op: Operator) -> Vec<usize> {
    column
        .iter()
        .enumerate()
        .filter(|(_, cell)| op.holds(cell.as_ref(), value))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_index() {
        assert_eq!(compare_columns(&["1", "1", "1"], &["1", "1", "0"], Operator::Eq), [0, 1]);
        assert!(compare_columns(&["0", "1", "1"], &["1", "0", "0"], Operator::Eq).is_empty());
    }

    #[test]
    fn test_greater_index() {
        assert_eq!(compare_columns(&["12", "23", "34"], &["34", "23", "12"], Operator::Gt), [2]);
        assert_eq!(compare_columns(&["12", "23", "34"], &["345", "234", "123"], Operator::Gt), [2]);
    }

    #[test]
    fn test_same_value() {
        assert_eq!(compare_value(&["hello", "world"], "hello", Operator::Eq), [0]);
        assert!(compare_value(&["1", "2", "3", "4"], "5", Operator::Eq).is_empty());
        assert_eq!(compare_value(&["1", "1", "1"], "1", Operator::Eq), [0, 1, 2]);
    }

    #[test]
    fn test_greater_value_is_lexicographic() {
        assert_eq!(compare_value(&["1", "2", "3"], "1", Operator::Gt), [1, 2]);
        assert!(compare_value(&["1", "1", "1"], "1", Operator::Gt).is_empty());
        assert_eq!(compare_value(&["1", "2", "3"], "10", Operator::Gt), [1, 2]);
        assert!(!Operator::Gt.holds("10", "9"));
        assert!(Operator::Gt.holds("2", "10"));
    }

    #[test]
    fn test_operand_parse() {
        let op = Operand::parse("'Toy Story 3'");
        assert_eq!(op.text(), "Toy Story 3");
        assert!(op.is_quoted());

        let op = Operand::parse("o.year");
        assert_eq!(op.text(), "o.year");
        assert!(!op.is_quoted());

        // Only one quote is stripped from each end.
        assert_eq!(Operand::parse("''x''").text(), "'x'");
        assert_eq!(Operand::parse("\"abc\"").text(), "abc");
    }

    fn cross() -> Table {
        Table::from_columns([
            ("m.y", vec!["1997", "1997", "2003", "2003"]),
            ("o.y", vec!["2003", "1997", "2003", "1997"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_column_to_column() {
        let pred = Predicate::new("m.y", Operator::Eq, Operand::bare("o.y"));
        assert_eq!(pred.matching_rows(&cross()).unwrap(), [1, 2]);
    }

    #[test]
    fn test_column_to_literal() {
        let pred = Predicate::new("m.y", Operator::Gt, Operand::literal("2002"));
        assert_eq!(pred.matching_rows(&cross()).unwrap(), [2, 3]);

        // Bare text that names no column is a literal.
        let pred = Predicate::new("m.y", Operator::Eq, Operand::bare("1997"));
        assert_eq!(pred.matching_rows(&cross()).unwrap(), [0, 1]);
    }

    #[test]
    fn test_quoted_column_name_is_literal() {
        let pred = Predicate::new("m.y", Operator::Eq, Operand::literal("o.y"));
        assert!(pred.matching_rows(&cross()).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_left_column() {
        let pred = Predicate::new("x.y", Operator::Eq, Operand::literal("1"));
        assert_eq!(
            pred.matching_rows(&cross()),
            Err(QueryError::UnknownColumn("x.y".to_string()))
        );
    }

    #[test]
    fn test_display() {
        let pred = Predicate::new("m.a", Operator::Eq, Operand::literal("Toy Story 3"));
        assert_eq!(pred.to_string(), "m.a='Toy Story 3'");
    }
}

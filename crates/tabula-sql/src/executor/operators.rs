//! Relational operators: Cartesian join, filter and projection.

use tracing::trace;

use super::Predicate;
use crate::error::{QueryError, QueryResult};
use crate::parser::Projection;
use crate::table::{Column, Table};

/// Cartesian product of two tables.
///
/// The result has the columns of `left` followed by the columns of `right`.
/// Row `k` pairs row `k / rows(right)` of `left` with row `k % rows(right)`
/// of `right`. Fails if either table has no columns or if the tables share a
/// column name.
pub fn join(left: &Table, right: &Table) -> QueryResult<Table> {
    let left_rows = left.row_count()?;
    let right_rows = right.row_count()?;
    trace!("Joining {} x {} rows", left_rows, right_rows);

    left.repeat_each_row_block(right_rows)
        .concat_columns(&right.repeat_whole_sequence(left_rows))
}

/// Joins a list of tables left to right. A single table is returned as is.
///
/// Plans from [`Parser`](crate::parser::Parser) always name at least one
/// table. An empty list is still rejected with `MalformedQuery` for plans
/// built by hand.
///
/// The row count of the result is the product of the input row counts; no
/// attempt is made to bound it.
pub fn join_all(tables: &[&Table]) -> QueryResult<Table> {
    let (first, rest) = tables
        .split_first()
        .ok_or_else(|| QueryError::malformed("no tables to join"))?;

    rest.iter()
        .try_fold((*first).clone(), |acc, next| join(&acc, next))
}

/// Keeps the rows satisfying `predicate`, in their original order.
///
/// With no predicate the table is returned unchanged.
pub fn filter(table: &Table, predicate: Option<&Predicate>) -> QueryResult<Table> {
    let Some(predicate) = predicate else {
        return Ok(table.clone());
    };

    let rows = predicate.matching_rows(table)?;
    trace!("Predicate {} matched {} rows", predicate, rows.len());
    Ok(table.take(&rows))
}

/// Selects the requested columns, in the requested order.
///
/// A column listed twice appears once, at its first position.
pub fn project(table: &Table, projection: &Projection) -> QueryResult<Table> {
    let names = match projection {
        Projection::All => return Ok(table.clone()),
        Projection::Columns(names) => names,
    };

    let mut columns = Vec::with_capacity(names.len());
    for name in names {
        let column = table
            .column(name)
            .ok_or_else(|| QueryError::UnknownColumn(name.clone()))?;
        if !columns.iter().any(|c: &Column| c.name() == name) {
            columns.push(column.clone());
        }
    }
    Table::new(columns)
}

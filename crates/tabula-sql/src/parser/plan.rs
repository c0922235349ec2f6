//! Parsed query plans.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::executor::Predicate;

/// The SELECT list of a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Projection {
    /// `*`: every column, in table order.
    All,
    /// Named columns, in the order given.
    Columns(Vec<String>),
}

impl Projection {
    /// Returns true for the `*` projection.
    pub fn is_all(&self) -> bool {
        matches!(self, Projection::All)
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::All => write!(f, "*"),
            Projection::Columns(names) => write!(f, "{}", names.join(",")),
        }
    }
}

/// A parsed query: what to select, from which tables, under which predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPlan {
    /// Columns to return.
    pub projection: Projection,
    /// Tables to join, in order.
    pub tables: Vec<String>,
    /// Optional WHERE predicate.
    pub predicate: Option<Predicate>,
}

impl QueryPlan {
    /// Creates a plan without a predicate.
    pub fn new(projection: Projection, tables: Vec<String>) -> Self {
        Self {
            projection,
            tables,
            predicate: None,
        }
    }

    /// Sets the WHERE predicate.
    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }
}

impl fmt::Display for QueryPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "select {} from {}", self.projection, self.tables.join(","))?;
        if let Some(ref predicate) = self.predicate {
            write!(f, " where {}", predicate)?;
        }
        Ok(())
    }
}

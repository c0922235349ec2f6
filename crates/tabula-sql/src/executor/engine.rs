//! The query engine: parses query text and evaluates plans against a database.

use tracing::debug;

use super::{filter, join_all, project};
use crate::error::{QueryError, QueryResult};
use crate::parser::{Parser, QueryPlan};
use crate::table::{Database, Table};

/// Evaluates queries against a database it owns.
///
/// The database is read-only for the lifetime of the engine; each query works
/// on freshly allocated tables and shares nothing with other queries.
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    database: Database,
}

impl QueryEngine {
    /// Creates an engine over `database`.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Returns the database queries run against.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Parses and evaluates one query.
    pub fn execute(&self, sql: &str) -> QueryResult<Table> {
        execute(sql, &self.database)
    }

    /// Evaluates an already parsed plan.
    pub fn evaluate(&self, plan: &QueryPlan) -> QueryResult<Table> {
        evaluate(plan, &self.database)
    }
}

/// Parses `sql` and evaluates it against `database`.
pub fn execute(sql: &str, database: &Database) -> QueryResult<Table> {
    let plan = Parser::parse(sql)?;
    evaluate(&plan, database)
}

/// Evaluates a plan: join the FROM tables, filter by the predicate, then
/// project the SELECT list.
///
/// Every table name is resolved before any work is done, so an unknown table
/// fails the query without producing anything.
pub fn evaluate(plan: &QueryPlan, database: &Database) -> QueryResult<Table> {
    debug!("Evaluating plan: {}", plan);

    let tables = plan
        .tables
        .iter()
        .map(|name| {
            database
                .get(name)
                .ok_or_else(|| QueryError::UnknownTable(name.clone()))
        })
        .collect::<QueryResult<Vec<_>>>()?;

    let joined = join_all(&tables)?;
    debug!("Joined {} tables into {} rows", tables.len(), joined.row_count().unwrap_or(0));

    let filtered = filter(&joined, plan.predicate.as_ref())?;
    project(&filtered, &plan.projection)
}

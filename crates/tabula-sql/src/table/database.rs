//! The database: an ordered collection of named tables.

use super::Table;

/// Named tables, kept in insertion order.
///
/// A database is built once by the storage loader and then only read while
/// queries run.
#[derive(Debug, Clone, Default)]
pub struct Database {
    tables: Vec<(String, Table)>,
}

impl Database {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table, replacing any table already stored under `name`.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        let name = name.into();
        match self.tables.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = table,
            None => self.tables.push((name, table)),
        }
    }

    /// Looks up a table by name.
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, table)| table)
    }

    /// Returns true if a table called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns the table names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tables.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates over `(name, table)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> + '_ {
        self.tables.iter().map(|(n, t)| (n.as_str(), t))
    }

    /// Returns the number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if the database holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, Table)> for Database {
    fn from_iter<I: IntoIterator<Item = (N, Table)>>(iter: I) -> Self {
        let mut db = Database::new();
        for (name, table) in iter {
            db.insert(name, table);
        }
        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut db = Database::new();
        db.insert("movies", Table::empty());
        db.insert("oscars", Table::empty());

        assert!(db.contains("movies"));
        assert!(db.get("reviews").is_none());
        assert_eq!(db.names().collect::<Vec<_>>(), ["movies", "oscars"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut db = Database::new();
        db.insert("a", Table::empty());
        db.insert("b", Table::empty());
        db.insert("a", Table::from_columns([("x", vec!["1"])]).unwrap());

        assert_eq!(db.len(), 2);
        assert_eq!(db.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(db.get("a").unwrap().num_columns(), 1);
    }
}

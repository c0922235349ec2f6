//! Query parser.
//!
//! Turns one line of query text into a [`QueryPlan`]. The language is
//!
//! ```text
//! select <cols> from <tables> [where <column><op><operand>]
//! ```
//!
//! - `<cols>` is `*` or a comma separated list of column names without spaces
//! - `<tables>` is a comma separated list of table names without spaces
//! - `<op>` is `=` or `>`; spaces around it are optional
//! - `<operand>` is a column name or a literal; a literal may be quoted and may
//!   contain spaces
//!
//! Keywords are case-insensitive.
//!
//! # Usage
//!
//! ```
//! use tabula_sql::parser::Parser;
//!
//! let plan = Parser::parse("select m.a,o.a from m,o where m.a=o.a").unwrap();
//! assert_eq!(plan.tables, ["m", "o"]);
//! assert!(!plan.projection.is_all());
//! ```

mod plan;

pub use plan::*;

use tracing::trace;

use crate::error::{QueryError, QueryResult};
use crate::executor::{Operand, Operator, Predicate};

const SELECT: &str = "select";
const FROM: &str = "from";
const WHERE: &str = "where";

/// Parser for the query language.
pub struct Parser;

impl Parser {
    /// Parses a single query.
    pub fn parse(query: &str) -> QueryResult<QueryPlan> {
        let tokens: Vec<&str> = query.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(QueryError::malformed("empty query"));
        }

        expect_keyword(&tokens, 0, SELECT)?;
        let columns = clause_operand(&tokens, 1, SELECT)?;
        expect_keyword(&tokens, 2, FROM)?;
        let tables = clause_operand(&tokens, 3, FROM)?;

        let mut plan = QueryPlan::new(parse_projection(columns)?, parse_list(tables, FROM)?);

        match tokens.get(4) {
            None => {}
            Some(token) if is_keyword(token, WHERE) => {
                plan = plan.with_predicate(Self::parse_predicate(&tokens[5..].join(" "))?);
            }
            Some(token) => {
                return Err(QueryError::malformed(format!(
                    "unexpected '{}' after table list",
                    token
                )));
            }
        }

        trace!("Parsed query into plan: {:?}", plan);
        Ok(plan)
    }

    /// Parses the text of a WHERE clause.
    ///
    /// The text is split at the first `=`; if there is none, at the first `>`.
    pub fn parse_predicate(text: &str) -> QueryResult<Predicate> {
        let (left, op, right) = Operator::ALL
            .iter()
            .find_map(|&op| {
                text.split_once(op.symbol())
                    .map(|(left, right)| (left.trim(), op, right.trim()))
            })
            .ok_or_else(|| {
                QueryError::malformed(format!("predicate '{}' has no '=' or '>' operator", text))
            })?;

        if left.is_empty() {
            return Err(QueryError::malformed(format!(
                "predicate '{}' has no column before '{}'",
                text, op
            )));
        }
        if right.is_empty() {
            return Err(QueryError::malformed(format!(
                "predicate '{}' has no operand after '{}'",
                text, op
            )));
        }

        Ok(Predicate::new(left, op, Operand::parse(right)))
    }
}

fn is_keyword(token: &str, keyword: &str) -> bool {
    token.eq_ignore_ascii_case(keyword)
}

fn expect_keyword(tokens: &[&str], index: usize, keyword: &str) -> QueryResult<()> {
    match tokens.get(index) {
        Some(token) if is_keyword(token, keyword) => Ok(()),
        Some(token) => Err(QueryError::malformed(format!(
            "expected '{}', found '{}'",
            keyword, token
        ))),
        None => Err(QueryError::malformed(format!("missing '{}' clause", keyword))),
    }
}

/// The token following a clause keyword, which must not itself be a keyword.
fn clause_operand<'a>(tokens: &[&'a str], index: usize, clause: &str) -> QueryResult<&'a str> {
    tokens
        .get(index)
        .copied()
        .filter(|token| ![SELECT, FROM, WHERE].iter().any(|kw| is_keyword(token, kw)))
        .ok_or_else(|| QueryError::malformed(format!("empty list after '{}'", clause)))
}

fn parse_list(text: &str, clause: &str) -> QueryResult<Vec<String>> {
    text.split(',')
        .map(|item| {
            if item.is_empty() {
                Err(QueryError::malformed(format!(
                    "empty entry in '{}' list '{}'",
                    clause, text
                )))
            } else {
                Ok(item.to_string())
            }
        })
        .collect()
}

fn parse_projection(text: &str) -> QueryResult<Projection> {
    let columns = parse_list(text, SELECT)?;
    if columns.iter().any(|c| c == "*") {
        Ok(Projection::All)
    } else {
        Ok(Projection::Columns(columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Projection {
        Projection::Columns(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_parse_simple_select() {
        let plan = Parser::parse("select m.a,o.a from m,o where m.a=o.a").unwrap();
        assert_eq!(plan.projection, columns(&["m.a", "o.a"]));
        assert_eq!(plan.tables, ["m", "o"]);
        assert_eq!(
            plan.predicate,
            Some(Predicate::new("m.a", Operator::Eq, Operand::bare("o.a")))
        );
    }

    #[test]
    fn test_parse_wildcard_without_where() {
        let plan = Parser::parse("select * from m,o").unwrap();
        assert_eq!(plan.projection, Projection::All);
        assert_eq!(plan.tables, ["m", "o"]);
        assert!(plan.predicate.is_none());
    }

    #[test]
    fn test_parse_literal_with_spaces() {
        let plan = Parser::parse("select m.a,o.a from m,o where m.a='s p a c e s'").unwrap();
        assert_eq!(
            plan.predicate,
            Some(Predicate::new("m.a", Operator::Eq, Operand::literal("s p a c e s")))
        );

        // Runs of whitespace collapse to one space.
        let plan = Parser::parse("select * from m where m.a='Toy   Story 3'").unwrap();
        assert_eq!(plan.predicate.unwrap().right.text(), "Toy Story 3");
    }

    #[test]
    fn test_parse_greater_than() {
        let plan = Parser::parse("select * from m where m.a>o.a").unwrap();
        assert_eq!(
            plan.predicate,
            Some(Predicate::new("m.a", Operator::Gt, Operand::bare("o.a")))
        );
    }

    #[test]
    fn test_equals_checked_before_greater() {
        let pred = Parser::parse_predicate("m.a='x>y'").unwrap();
        assert_eq!(pred.op, Operator::Eq);
        assert_eq!(pred.right.text(), "x>y");

        // `>` appearing before `=` still splits at `=`.
        let pred = Parser::parse_predicate("m.a>b=c").unwrap();
        assert_eq!(pred.op, Operator::Eq);
        assert_eq!(pred.left, "m.a>b");
    }

    #[test]
    fn test_spaces_around_operator() {
        let plan = Parser::parse("select * from m where m.a = 'x'").unwrap();
        assert_eq!(
            plan.predicate,
            Some(Predicate::new("m.a", Operator::Eq, Operand::literal("x")))
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        let plan = Parser::parse("SELECT * FROM m WHERE m.a=1").unwrap();
        assert_eq!(plan.tables, ["m"]);
        assert!(plan.predicate.is_some());
    }

    #[test]
    fn test_malformed_queries() {
        for query in [
            "",
            "   ",
            "* from m",
            "select * m",
            "select from m",
            "select *",
            "select * from",
            "select * from where a=b",
            "select * from m where",
            "select * from m where a<b",
            "select * from m where =b",
            "select * from m where a=",
            "select a,,b from m",
            "select a from m,",
            "select a, b from m",
            "select * from m o",
        ] {
            assert!(
                matches!(Parser::parse(query), Err(QueryError::MalformedQuery(_))),
                "expected malformed: {:?}",
                query
            );
        }
    }

    #[test]
    fn test_plan_display() {
        let plan = Parser::parse("select m.a from m,o where m.a='Toy Story'").unwrap();
        assert_eq!(plan.to_string(), "select m.a from m,o where m.a='Toy Story'");
    }
}

//! Dynamic WHERE / ORDER BY / LIMIT assembly for list queries
//!
//! Conditions are SQL fragments with `?` placeholders; values are kept in
//! order and bound when the query is built, never spliced into the SQL.

use rust_decimal::Decimal;
use shared::money::{CentsCeiling, cents_ceiling};
use sqlx::Sqlite;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::sqlite::SqliteArguments;

#[derive(Debug, Clone)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
}

/// WHERE clause under construction
#[derive(Debug, Clone, Default)]
pub struct SqlFilter {
    conditions: Vec<String>,
    bindings: Vec<FilterValue>,
}

impl SqlFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `column = ?` on an integer
    pub fn eq_i64(&mut self, column: &str, value: i64) -> &mut Self {
        self.conditions.push(format!("{column} = ?"));
        self.bindings.push(FilterValue::Integer(value));
        self
    }

    /// `column = ?` on text
    pub fn eq_text(&mut self, column: &str, value: impl Into<String>) -> &mut Self {
        self.conditions.push(format!("{column} = ?"));
        self.bindings.push(FilterValue::Text(value.into()));
        self
    }

    /// `column <= ?`
    pub fn le_i64(&mut self, column: &str, value: i64) -> &mut Self {
        self.conditions.push(format!("{column} <= ?"));
        self.bindings.push(FilterValue::Integer(value));
        self
    }

    /// Amount stored as cents in `column` is at most `max`
    pub fn amount_at_most(&mut self, column: &str, max: Decimal) -> &mut Self {
        match cents_ceiling(max) {
            CentsCeiling::Nothing => self.never(),
            CentsCeiling::AtMost(cents) => self.le_i64(column, cents),
            CentsCeiling::Unbounded => self,
        }
    }

    /// Substring match over several columns, OR-ed (ASCII case-insensitive)
    pub fn search(&mut self, columns: &[&str], term: &str) -> &mut Self {
        let parts: Vec<String> = columns
            .iter()
            .map(|c| format!("{c} LIKE ? ESCAPE '\\'"))
            .collect();
        self.conditions.push(format!("({})", parts.join(" OR ")));

        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("%{escaped}%");
        for _ in columns {
            self.bindings.push(FilterValue::Text(pattern.clone()));
        }
        self
    }

    /// A condition that matches nothing
    pub fn never(&mut self) -> &mut Self {
        self.conditions.push("0 = 1".to_string());
        self
    }

    /// ` WHERE ...` (empty if no conditions)
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    /// Bind values onto a `query_as`
    pub fn bind_as<'q, O>(
        &'q self,
        mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        for binding in &self.bindings {
            query = match binding {
                FilterValue::Text(s) => query.bind(s.as_str()),
                FilterValue::Integer(i) => query.bind(*i),
            };
        }
        query
    }

    /// Bind values onto a `query_scalar`
    pub fn bind_scalar<'q, O>(
        &'q self,
        mut query: QueryScalar<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryScalar<'q, Sqlite, O, SqliteArguments<'q>> {
        for binding in &self.bindings {
            query = match binding {
                FilterValue::Text(s) => query.bind(s.as_str()),
                FilterValue::Integer(i) => query.bind(*i),
            };
        }
        query
    }
}

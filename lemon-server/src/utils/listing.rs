//! List endpoint parameters: pages and `ordering`
//!
//! Ordering is parsed against a whitelist so the resulting ORDER BY clause
//! only ever contains known column names.

use rust_decimal::Decimal;

use crate::utils::{AppError, AppResult};

/// One page of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page.saturating_sub(1) as i64) * self.per_page as i64
    }

    /// Parse `page` / `perpage` query values
    ///
    /// Missing values fall back to page 1 and `default_size`; the page size
    /// is capped at `max_size`. Zero, negative or non-numeric values are
    /// rejected.
    pub fn parse(
        page: Option<&str>,
        per_page: Option<&str>,
        default_size: u32,
        max_size: u32,
    ) -> AppResult<Self> {
        let page = match page.map(str::trim).filter(|s| !s.is_empty()) {
            None => 1,
            Some(raw) => parse_positive(raw, "page")?,
        };
        let per_page = match per_page.map(str::trim).filter(|s| !s.is_empty()) {
            None => default_size,
            Some(raw) => parse_positive(raw, "perpage")?,
        };
        Ok(Self::new(page, per_page.min(max_size.max(1))))
    }
}

fn parse_positive(raw: &str, field: &str) -> AppResult<u32> {
    match raw.parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(AppError::field(field, format!("must be a positive integer, got `{raw}`"))),
    }
}

/// An orderable field: public name and its SQL column
pub type OrderField = (&'static str, &'static str);

/// Parse `ordering` (`name,-price`) into an ORDER BY clause body
///
/// Unknown fields are rejected. `tie_breaker` is appended so that pages are
/// stable when the requested keys compare equal.
pub fn parse_ordering(
    raw: Option<&str>,
    allowed: &[OrderField],
    default: &str,
    tie_breaker: &str,
) -> AppResult<String> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(default);

    let mut parts = Vec::new();
    for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let (name, descending) = match token.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (token, false),
        };
        let column = allowed
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, column)| *column)
            .ok_or_else(|| {
                let names: Vec<&str> = allowed.iter().map(|(f, _)| *f).collect();
                AppError::field(
                    "ordering",
                    format!("unknown field `{name}`, expected one of: {}", names.join(", ")),
                )
            })?;
        parts.push(format!("{column} {}", if descending { "DESC" } else { "ASC" }));
    }
    parts.push(format!("{tie_breaker} ASC"));
    Ok(parts.join(", "))
}

/// Parse an optional boolean query flag (`true/false/1/0`, case-insensitive)
pub fn parse_flag(raw: Option<&str>, field: &str) -> AppResult<Option<bool>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(v) => match v.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            _ => Err(AppError::field(field, format!("must be a boolean, got `{v}`"))),
        },
    }
}

/// Optional decimal parameter such as `to_price`
pub fn parse_amount(raw: Option<&str>, field: &str) -> AppResult<Option<Decimal>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|_| AppError::field(field, format!("A valid number is required, got `{v}`"))),
    }
}

//! List queries and cursor pagination
//!
//! Lists are ordered newest first (`id DESC`; snowflake ids grow with
//! time). A page starts at the cursor row inclusive; the repository
//! over-fetches one row, and when it shows up its id becomes the next
//! cursor.

use serde::{Deserialize, Serialize};

/// Default page size
pub const DEFAULT_LIMIT: u32 = 10;
/// Maximum page size
pub const MAX_LIMIT: u32 = 100;

/// List query parameters (`?limit=&cursor=&skip=&search=&status=`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListQuery<S> {
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub cursor: Option<i64>,
    #[serde(default)]
    pub skip: Option<u32>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<S>,
}

impl<S> Default for ListQuery<S> {
    fn default() -> Self {
        Self {
            limit: None,
            cursor: None,
            skip: None,
            search: None,
            status: None,
        }
    }
}

impl<S> ListQuery<S> {
    /// Page size clamped to `1..=MAX_LIMIT`
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Rows the repository should fetch (`limit + 1`)
    pub fn fetch_limit(&self) -> i64 {
        i64::from(self.limit()) + 1
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.skip.unwrap_or(0))
    }

    /// Trimmed search term, `None` when empty
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// `ILIKE` pattern for the search term
    pub fn search_pattern(&self) -> Option<String> {
        self.search_term().map(|s| format!("%{}%", escape_like(s)))
    }
}

impl<S: Copy + Default> ListQuery<S> {
    /// Status filter, falling back to the filter's default
    pub fn status(&self) -> S {
        self.status.unwrap_or_default()
    }
}

/// Escape `%`, `_` and `\` for a `LIKE` pattern
pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorPage<T> {
    pub data: Vec<T>,
    pub next_cursor: Option<i64>,
}

impl<T> CursorPage<T> {
    /// Build a page from `limit + 1` over-fetched rows.
    ///
    /// When more than `limit` rows came back, the extra row is dropped and
    /// its id becomes `next_cursor`.
    pub fn from_overfetch(mut rows: Vec<T>, limit: u32, id_of: impl Fn(&T) -> i64) -> Self {
        let limit = limit as usize;
        let next_cursor = if rows.len() > limit {
            rows.truncate(limit + 1);
            rows.pop().map(|extra| id_of(&extra))
        } else {
            None
        };
        Self {
            data: rows,
            next_cursor,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> CursorPage<U> {
        CursorPage {
            data: self.data.into_iter().map(f).collect(),
            next_cursor: self.next_cursor,
        }
    }
}

/// Menu item (and package) status filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityFilter {
    #[default]
    All,
    Available,
    Unavailable,
    Deleted,
}

/// User status filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountFilter {
    #[default]
    All,
    Active,
    Inactive,
    Deleted,
}

/// Payment type status filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveFilter {
    #[default]
    All,
    Active,
    Inactive,
}

/// Order and booking status filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusFilter {
    #[default]
    All,
    Unpaid,
    Processing,
    Paid,
    Finished,
}

/// `(available, deleted)` predicates expressed as nullable booleans for SQL.
///
/// `None` means "do not filter on this column".
pub struct FlagFilter {
    pub flag: Option<bool>,
    pub deleted: Option<bool>,
}

impl AvailabilityFilter {
    pub fn flags(self) -> FlagFilter {
        match self {
            Self::All => FlagFilter { flag: None, deleted: None },
            Self::Available => FlagFilter { flag: Some(true), deleted: Some(false) },
            Self::Unavailable => FlagFilter { flag: Some(false), deleted: Some(false) },
            Self::Deleted => FlagFilter { flag: None, deleted: Some(true) },
        }
    }
}

impl AccountFilter {
    pub fn flags(self) -> FlagFilter {
        match self {
            Self::All => FlagFilter { flag: None, deleted: None },
            Self::Active => FlagFilter { flag: Some(true), deleted: Some(false) },
            Self::Inactive => FlagFilter { flag: Some(false), deleted: Some(false) },
            Self::Deleted => FlagFilter { flag: None, deleted: Some(true) },
        }
    }
}

impl ActiveFilter {
    pub fn flag(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(true),
            Self::Inactive => Some(false),
        }
    }
}

impl OrderStatusFilter {
    /// `(paid, finished)` predicates
    pub fn flags(self) -> (Option<bool>, Option<bool>) {
        match self {
            Self::All => (None, None),
            Self::Unpaid => (Some(false), None),
            Self::Processing => (Some(true), Some(false)),
            Self::Paid => (Some(true), None),
            Self::Finished => (None, Some(true)),
        }
    }
}

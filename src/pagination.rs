//! Query-string integer parameters with silent fallback.

use std::collections::HashMap;
use std::str::FromStr;

pub const DEFAULT_LIMIT: u32 = 5;
pub const DEFAULT_OFFSET: u32 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Pagination {
    /// Negative or unparsable values fall back to the defaults.
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        Pagination {
            limit: parse_int_param(query, "limit", DEFAULT_LIMIT),
            offset: parse_int_param(query, "offset", DEFAULT_OFFSET),
        }
    }
}

/// Value of `key` parsed as `T`, or `default` when absent or unparsable.
pub fn parse_int_param<T: FromStr>(query: &HashMap<String, String>, key: &str, default: T) -> T {
    query
        .get(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Database models
///
/// - `user`: Accounts and credentials
/// - `project`: Projects owned by a user
/// - `task`: Tasks belonging to a project
/// - `dashboard`: Per-owner aggregate counts
///
/// Every project/task query that serves a request takes the owner id and
/// filters on it; the `*_for_owner` naming makes that visible at call sites.

use std::fmt;

pub mod dashboard;
pub mod project;
pub mod task;
pub mod user;

/// Returned when an integer wire code does not name an enum variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCode {
    /// Enum being decoded
    pub kind: &'static str,

    /// Offending value
    pub code: u8,
}

impl fmt::Display for InvalidCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} code {}, expected 0, 1 or 2", self.kind, self.code)
    }
}

impl std::error::Error for InvalidCode {}

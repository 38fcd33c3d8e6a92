use std::fmt;

use chrono::{DateTime, Utc};

/// Identifier prefix AWS Organizations assigns to organization roots.
pub const ROOT_ID_PREFIX: &str = "r-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSummary {
    pub id: String,
    pub arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSummary {
    pub name: String,
    pub arn: String,
}

/// Account fields as returned by the directory service, before the join
/// timestamp is normalized to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: String,
    pub joined_timestamp: DateTime<Utc>,
}

/// Errors surfaced by a directory-service capability.
///
/// Tree construction treats every variant as fatal; there are no retries and
/// no partial trees.
#[derive(Debug)]
pub enum DirectoryError {
    NotFound(String),
    AccessDenied(String),
    Service(String),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::NotFound(message) => write!(f, "not found: {message}"),
            DirectoryError::AccessDenied(message) => write!(f, "access denied: {message}"),
            DirectoryError::Service(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for DirectoryError {}

/// Synchronous client capability over an organization's structure.
///
/// Listing operations must return complete, fully paginated results; the
/// tree builder issues exactly one call per operation per unit.
pub trait OrgDirectory {
    /// Id and ARN of the organization root.
    fn root(&self) -> Result<RootSummary, DirectoryError>;

    /// Name and ARN of an organizational unit.
    fn describe_unit(&self, unit_id: &str) -> Result<UnitSummary, DirectoryError>;

    /// Accounts directly attached to a parent (root or unit).
    fn accounts_for_parent(&self, parent_id: &str) -> Result<Vec<AccountRecord>, DirectoryError>;

    /// Ids of the organizational units directly under a parent.
    fn child_unit_ids(&self, parent_id: &str) -> Result<Vec<String>, DirectoryError>;
}

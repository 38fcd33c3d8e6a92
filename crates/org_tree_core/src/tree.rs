use serde::Serialize;

use crate::directory::{AccountRecord, DirectoryError, OrgDirectory, ROOT_ID_PREFIX};

/// Display name given to organization roots, which carry no name of their own.
pub const ROOT_NAME: &str = "Root";

/// A member account, attached to exactly one organizational unit.
///
/// Serialized field names match what the Organizations API itself uses, with
/// the owning unit recorded under `OrganizationUnitId` / `OrganizationUnitName`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: String,
    /// Join timestamp normalized to an ISO-8601 string.
    pub joined_timestamp: String,
    #[serde(rename = "OrganizationUnitId")]
    pub unit_id: String,
    #[serde(rename = "OrganizationUnitName")]
    pub unit_name: String,
}

impl Account {
    fn from_record(record: AccountRecord, unit_id: &str, unit_name: &str) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            status: record.status,
            joined_timestamp: record.joined_timestamp.to_rfc3339(),
            unit_id: unit_id.to_string(),
            unit_name: unit_name.to_string(),
        }
    }
}

/// A node of the organization tree: one root or organizational unit, its
/// directly attached accounts, and its child units.
///
/// The tree is fully populated by [`OrgUnit::fetch`] and read-only afterwards.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OrgUnit {
    pub id: String,
    pub name: String,
    pub arn: String,
    /// Slash-delimited path from the construction root; empty at the root.
    pub path: String,
    pub accounts: Vec<Account>,
    pub units: Vec<OrgUnit>,
}

impl OrgUnit {
    /// Builds the full subtree rooted at `start_unit_id`, or at the
    /// organization root when no id is given.
    ///
    /// The fetch is depth-first and blocking. The first directory error
    /// aborts the whole construction; no partial tree is returned.
    pub fn fetch(
        directory: &dyn OrgDirectory,
        start_unit_id: Option<&str>,
    ) -> Result<Self, DirectoryError> {
        let unit_id = match start_unit_id {
            Some(id) => id.to_string(),
            None => directory.root()?.id,
        };
        Self::fetch_subtree(directory, &unit_id, None)
    }

    fn fetch_subtree(
        directory: &dyn OrgDirectory,
        unit_id: &str,
        parent_path: Option<&str>,
    ) -> Result<Self, DirectoryError> {
        let (name, arn) = if unit_id.starts_with(ROOT_ID_PREFIX) {
            let root = directory.root()?;
            (ROOT_NAME.to_string(), root.arn)
        } else {
            let unit = directory.describe_unit(unit_id)?;
            (unit.name, unit.arn)
        };

        let path = match parent_path {
            None => String::new(),
            Some("") => name.clone(),
            Some(parent) => format!("{parent}/{name}"),
        };

        let accounts = directory
            .accounts_for_parent(unit_id)?
            .into_iter()
            .map(|record| Account::from_record(record, unit_id, &name))
            .collect();

        let mut units = Vec::new();
        for child_id in directory.child_unit_ids(unit_id)? {
            units.push(Self::fetch_subtree(directory, &child_id, Some(&path))?);
        }

        Ok(Self {
            id: unit_id.to_string(),
            name,
            arn,
            path,
            accounts,
            units,
        })
    }

    /// Looks up a descendant unit by slash-delimited path.
    ///
    /// Leading and trailing separators are ignored, and the empty path
    /// resolves to the receiver. At each level a child whose name equals the
    /// entire remaining path wins outright; otherwise a child whose name
    /// equals the first segment is descended into with the remainder.
    /// Returns `None` when no child matches at some level. A unit name
    /// containing a literal `/` is only reachable through the
    /// whole-remainder rule.
    pub fn resolve(&self, path: &str) -> Option<&OrgUnit> {
        let remaining = path.trim_matches('/');
        if remaining.is_empty() {
            return Some(self);
        }

        let (head, rest) = match remaining.split_once('/') {
            Some((head, rest)) => (head, Some(rest)),
            None => (remaining, None),
        };

        for child in &self.units {
            if child.name == remaining {
                return Some(child);
            }
            if child.name == head {
                return match rest {
                    Some(rest) => child.resolve(rest),
                    None => Some(child),
                };
            }
        }
        None
    }

    /// Enumerates every account in the subtree, pre-order: this unit's own
    /// accounts first, then each child subtree in fetch order.
    pub fn list_accounts(&self) -> Vec<&Account> {
        let mut collected = Vec::new();
        self.collect_accounts(&mut collected);
        collected
    }

    fn collect_accounts<'a>(&'a self, collected: &mut Vec<&'a Account>) {
        collected.extend(self.accounts.iter());
        for child in &self.units {
            child.collect_accounts(collected);
        }
    }

    /// Number of units in the subtree, the receiver included.
    pub fn unit_count(&self) -> usize {
        1 + self.units.iter().map(OrgUnit::unit_count).sum::<usize>()
    }
}

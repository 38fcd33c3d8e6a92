use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use org_tree_core::directory::{
    AccountRecord, DirectoryError, OrgDirectory, RootSummary, UnitSummary,
};

pub const ROOT_ID: &str = "r-abcd";

/// In-memory directory capability with optional per-unit access denial.
#[derive(Default)]
pub struct StubDirectory {
    units: BTreeMap<String, UnitSummary>,
    children: BTreeMap<String, Vec<String>>,
    accounts: BTreeMap<String, Vec<AccountRecord>>,
    denied_units: Vec<String>,
}

impl StubDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_unit(&mut self, parent_id: &str, unit_id: &str, name: &str) {
        self.units.insert(
            unit_id.to_string(),
            UnitSummary {
                name: name.to_string(),
                arn: format!("arn:aws:organizations:::ou/o-test/{unit_id}"),
            },
        );
        self.children
            .entry(parent_id.to_string())
            .or_default()
            .push(unit_id.to_string());
    }

    pub fn add_account(&mut self, parent_id: &str, id: &str, name: &str) {
        self.accounts
            .entry(parent_id.to_string())
            .or_default()
            .push(AccountRecord {
                id: id.to_string(),
                name: name.to_string(),
                email: format!("{name}@example.com"),
                status: "ACTIVE".to_string(),
                joined_timestamp: Utc.with_ymd_and_hms(2019, 7, 4, 12, 30, 0).unwrap(),
            });
    }

    pub fn deny_unit(&mut self, unit_id: &str) {
        self.denied_units.push(unit_id.to_string());
    }
}

impl OrgDirectory for StubDirectory {
    fn root(&self) -> Result<RootSummary, DirectoryError> {
        Ok(RootSummary {
            id: ROOT_ID.to_string(),
            arn: format!("arn:aws:organizations:::root/o-test/{ROOT_ID}"),
        })
    }

    fn describe_unit(&self, unit_id: &str) -> Result<UnitSummary, DirectoryError> {
        if self.denied_units.iter().any(|denied| denied == unit_id) {
            return Err(DirectoryError::AccessDenied(format!(
                "not authorized to describe {unit_id}"
            )));
        }
        self.units
            .get(unit_id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(format!("no such unit {unit_id}")))
    }

    fn accounts_for_parent(&self, parent_id: &str) -> Result<Vec<AccountRecord>, DirectoryError> {
        Ok(self.accounts.get(parent_id).cloned().unwrap_or_default())
    }

    fn child_unit_ids(&self, parent_id: &str) -> Result<Vec<String>, DirectoryError> {
        Ok(self.children.get(parent_id).cloned().unwrap_or_default())
    }
}

/// Root → OU "A" → OU "B", with accounts a1 under the root, a2 under "A",
/// and a3 under "B".
pub fn fixture_directory() -> StubDirectory {
    let mut directory = StubDirectory::new();
    directory.add_unit(ROOT_ID, "ou-a", "A");
    directory.add_unit("ou-a", "ou-b", "B");
    directory.add_account(ROOT_ID, "111111111111", "a1");
    directory.add_account("ou-a", "222222222222", "a2");
    directory.add_account("ou-b", "333333333333", "a3");
    directory
}

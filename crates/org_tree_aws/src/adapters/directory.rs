use aws_sdk_organizations::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_organizations::primitives::DateTime as SmithyDateTime;
use aws_sdk_organizations::types::ChildType;
use chrono::{DateTime, Utc};
use org_tree_core::directory::{
    AccountRecord, DirectoryError, OrgDirectory, RootSummary, UnitSummary,
};

/// `OrgDirectory` backed by the AWS Organizations API.
///
/// The SDK is async; each call is bridged onto the current Tokio runtime, so
/// the adapter requires a multi-thread runtime and must not be used from a
/// current-thread one.
#[derive(Clone)]
pub struct AwsOrgDirectory {
    client: aws_sdk_organizations::Client,
}

impl AwsOrgDirectory {
    pub fn new(client: aws_sdk_organizations::Client) -> Self {
        Self { client }
    }
}

impl OrgDirectory for AwsOrgDirectory {
    fn root(&self) -> Result<RootSummary, DirectoryError> {
        let client = self.client.clone();
        let output = block_on(async move { client.list_roots().send().await })
            .map_err(|error| map_sdk_error("list_roots", error))?;

        let root = output
            .roots()
            .first()
            .ok_or_else(|| DirectoryError::Service("organization has no root".to_string()))?;
        Ok(RootSummary {
            id: required(root.id(), "root Id")?,
            arn: required(root.arn(), "root Arn")?,
        })
    }

    fn describe_unit(&self, unit_id: &str) -> Result<UnitSummary, DirectoryError> {
        let client = self.client.clone();
        let id = unit_id.to_string();
        let output = block_on(async move {
            client
                .describe_organizational_unit()
                .organizational_unit_id(id)
                .send()
                .await
        })
        .map_err(|error| map_sdk_error("describe_organizational_unit", error))?;

        let unit = output
            .organizational_unit()
            .ok_or_else(|| missing("OrganizationalUnit"))?;
        Ok(UnitSummary {
            name: required(unit.name(), "organizational unit Name")?,
            arn: required(unit.arn(), "organizational unit Arn")?,
        })
    }

    fn accounts_for_parent(&self, parent_id: &str) -> Result<Vec<AccountRecord>, DirectoryError> {
        let client = self.client.clone();
        let parent = parent_id.to_string();
        block_on(async move {
            let mut pages = client
                .list_accounts_for_parent()
                .parent_id(parent)
                .into_paginator()
                .send();

            let mut records = Vec::new();
            while let Some(page) = pages.next().await {
                let page =
                    page.map_err(|error| map_sdk_error("list_accounts_for_parent", error))?;
                for account in page.accounts() {
                    records.push(account_record(account)?);
                }
            }
            Ok(records)
        })
    }

    fn child_unit_ids(&self, parent_id: &str) -> Result<Vec<String>, DirectoryError> {
        let client = self.client.clone();
        let parent = parent_id.to_string();
        block_on(async move {
            let mut pages = client
                .list_children()
                .parent_id(parent)
                .child_type(ChildType::OrganizationalUnit)
                .into_paginator()
                .send();

            let mut ids = Vec::new();
            while let Some(page) = pages.next().await {
                let page = page.map_err(|error| map_sdk_error("list_children", error))?;
                for child in page.children() {
                    ids.push(required(child.id(), "child Id")?);
                }
            }
            Ok(ids)
        })
    }
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

fn map_sdk_error<E, R>(context: &str, error: SdkError<E, R>) -> DirectoryError
where
    E: ProvideErrorMetadata,
{
    let service_error = error.as_service_error();
    let code = service_error.and_then(ProvideErrorMetadata::code);
    let detail = service_error
        .and_then(ProvideErrorMetadata::message)
        .map_or_else(
            || format!("{context} failed"),
            |message| format!("{context}: {message}"),
        );

    match code {
        Some("AccessDeniedException") => DirectoryError::AccessDenied(detail),
        Some(
            "ParentNotFoundException"
            | "OrganizationalUnitNotFoundException"
            | "RootNotFoundException"
            | "TargetNotFoundException",
        ) => DirectoryError::NotFound(detail),
        Some(other) => DirectoryError::Service(format!("{detail} ({other})")),
        None => DirectoryError::Service(detail),
    }
}

fn account_record(
    account: &aws_sdk_organizations::types::Account,
) -> Result<AccountRecord, DirectoryError> {
    let id = required(account.id(), "account Id")?;
    let name = required(account.name(), "account Name")?;
    let email = required(account.email(), "account Email")?;
    let status = account
        .status()
        .map(|status| status.as_str().to_string())
        .ok_or_else(|| missing("account Status"))?;
    let joined = account
        .joined_timestamp()
        .ok_or_else(|| missing("account JoinedTimestamp"))?;
    let joined_timestamp = chrono_from_smithy(joined).ok_or_else(|| {
        DirectoryError::Service(format!("unrepresentable JoinedTimestamp for account {id}"))
    })?;

    Ok(AccountRecord {
        id,
        name,
        email,
        status,
        joined_timestamp,
    })
}

fn chrono_from_smithy(value: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(value.secs(), value.subsec_nanos())
}

fn required(value: Option<&str>, field: &str) -> Result<String, DirectoryError> {
    value.map(str::to_owned).ok_or_else(|| missing(field))
}

fn missing(field: &str) -> DirectoryError {
    DirectoryError::Service(format!("directory record missing {field}"))
}

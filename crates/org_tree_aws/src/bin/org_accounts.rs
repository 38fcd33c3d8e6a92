use clap::Parser;
use org_tree_aws::adapters::directory::AwsOrgDirectory;
use org_tree_core::tree::OrgUnit;

#[derive(Parser)]
#[command(
    name = "org_accounts",
    about = "Enumerate the AWS accounts beneath an organizational unit path"
)]
struct Cli {
    /// Slash-delimited organizational unit path, e.g. "workloads/prod"
    #[arg(long)]
    ou_path: String,
    /// Organizational unit id to fetch from instead of the organization root
    #[arg(long)]
    start_ou: Option<String>,
    /// Print single-line JSON instead of pretty-printed output
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let directory = AwsOrgDirectory::new(aws_sdk_organizations::Client::new(&config));

    let tree = OrgUnit::fetch(&directory, cli.start_ou.as_deref())?;

    let Some(unit) = tree.resolve(&cli.ou_path) else {
        return Err(format!("no organizational unit found at path '{}'", cli.ou_path).into());
    };

    let accounts = unit.list_accounts();
    let rendered = if cli.compact {
        serde_json::to_string(&accounts)?
    } else {
        serde_json::to_string_pretty(&accounts)?
    };
    println!("{rendered}");

    let label = if unit.path.is_empty() {
        unit.name.as_str()
    } else {
        unit.path.as_str()
    };
    eprintln!(
        "{} account(s) across {} unit(s) under '{label}'",
        accounts.len(),
        unit.unit_count()
    );

    Ok(())
}

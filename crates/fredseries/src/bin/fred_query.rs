//! fred-query: print the items stored under one date.

use clap::Parser;
use fredseries::config::Config;
use fredseries::output::format_json;
use fredseries::query::handle_query;
use fredseries::storage::dynamodb::create_client;
use fredseries::storage::DynamoDbRepository;
use fredseries::telemetry::init_tracing;
use fredseries_core::query::QueryKey;

#[derive(Debug, Parser)]
#[command(name = "fred-query", version, about = "Query imported observations by date")]
struct Cli {
    /// Partition key to look up (YYYY-MM-DD)
    date: String,

    /// Table to query
    #[arg(long, env = "FRED_TABLE_NAME")]
    table_name: Option<String>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(name) = &cli.table_name {
        config = config.with_table_name(name);
    }

    let client = create_client(&config.aws).await;
    let repo = DynamoDbRepository::new(client, config.table.clone());

    let response = handle_query(&repo, QueryKey::parse(Some(cli.date.as_str()))).await?;
    println!("{}", format_json(&response, cli.pretty)?);

    if response.is_error() {
        std::process::exit(1);
    }
    Ok(())
}

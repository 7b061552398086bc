//! fred-import: load the configured CSV series into DynamoDB.

use clap::Parser;
use fredseries::config::Config;
use fredseries::importer::run_import;
use fredseries::storage::dynamodb::create_client;
use fredseries::storage::DynamoDbRepository;
use fredseries::telemetry::init_tracing;

#[derive(Debug, Parser)]
#[command(name = "fred-import", version, about = "Import a FRED CSV series into DynamoDB")]
struct Cli {
    /// URL serving the CSV series
    #[arg(long, env = "FRED_SOURCE_URL")]
    source_url: Option<String>,

    /// Destination table
    #[arg(long, env = "FRED_TABLE_NAME")]
    table_name: Option<String>,

    /// Series column, stored as the sort key
    #[arg(long, env = "FRED_SERIES_ID")]
    series: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(url) = &cli.source_url {
        config = config.with_source_url(url);
    }
    if let Some(name) = &cli.table_name {
        config = config.with_table_name(name);
    }
    if let Some(series) = &cli.series {
        config = config.with_series(series);
    }

    tracing::info!(
        source = %config.source_url,
        table = %config.table.table_name,
        target = %config.aws.target_display(),
        "Starting import"
    );

    let client = create_client(&config.aws).await;
    let repo = DynamoDbRepository::new(client, config.table.clone());
    let http = reqwest::Client::new();

    run_import(&repo, &config, &http).await?;

    println!("Done");
    Ok(())
}

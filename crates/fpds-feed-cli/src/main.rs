//! fpds-feed — entry point.

use std::time::Duration;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use fpds_feed::{ContractQuery, Contracts, DateRange, FilterSet, FilterValue, RecordCount, SortOrder};
use fpds_feed_cli::args::{parse_date_range, parse_filter};
use fpds_feed_cli::config::resolve_feed_config;
use fpds_feed_cli::output::{field_table, summary_line};

#[derive(Parser)]
#[command(
    name = "fpds-feed",
    about = "Query the FPDS-NG public ATOM feed for federal contract records",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch contract records (default).
    Get(GetArgs),

    /// List the recognized filter keys and their feed field names.
    Fields,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   fpds-feed completions bash > ~/.local/share/bash-completion/completions/fpds-feed
    ///   fpds-feed completions zsh > ~/.zfunc/_fpds-feed
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[derive(clap::Args, Default)]
struct GetArgs {
    /// Number of raw entries to examine, or "all".
    #[arg(short = 'n', long, default_value = "100")]
    num_records: RecordCount,

    /// Sort hint forwarded to the feed (asc, desc).
    #[arg(long)]
    order: Option<SortOrder>,

    /// Filter as key=value. Can be repeated.
    #[arg(short, long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, FilterValue)>,

    /// Last-modified window START,END (YYYY-MM-DD). Records outside it are dropped.
    #[arg(long, value_parser = parse_date_range)]
    last_modified: Option<DateRange>,

    /// Seconds to pause before each page request.
    #[arg(long)]
    sleep: Option<u64>,

    /// Feed endpoint. Also reads FPDS_FEED_URL.
    #[arg(long)]
    feed_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Skip TLS certificate verification. Also reads FPDS_INSECURE_TLS.
    #[arg(long)]
    insecure: bool,

    /// Print records as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Get(GetArgs::default())) {
        Commands::Get(args) => run_get(args).await?,

        Commands::Fields => {
            println!("{}", field_table());
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "fpds-feed", &mut std::io::stdout());
        }
    }

    Ok(())
}

async fn run_get(args: GetArgs) -> anyhow::Result<()> {
    let config = resolve_feed_config(args.feed_url.as_deref(), args.timeout, args.insecure);
    tracing::debug!(?config, "Resolved feed configuration");
    let contracts = Contracts::with_config(config)?;

    let mut filters: FilterSet = args.filters.into_iter().collect();
    if let Some(range) = args.last_modified {
        filters.insert("last_modified_date", range);
    }

    let mut query = ContractQuery::new()
        .with_num_records(args.num_records)
        .with_filters(filters);
    if let Some(order) = args.order {
        query = query.with_order(order);
    }
    if let Some(secs) = args.sleep {
        query = query.with_sleep(Duration::from_secs(secs));
    }

    let records = contracts.get(query).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in &records {
            println!("{}", summary_line(record));
        }
        eprintln!("{} record(s)", records.len());
    }

    Ok(())
}

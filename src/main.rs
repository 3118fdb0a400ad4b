use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use graphwatch::{
    graph_url, load_settings, rate_path, select_entity, timeframe_table, FilePreference, GraphKind,
    Overrides,
};
use graphwatch_graphite::{parse_rate, GraphOptions, GraphSettings, NoPreference, PreferenceStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "graphwatch")]
#[command(about = "Graphite graph URLs and rate lookups for queue metrics")]
struct Args {
    /// Path to a config file (TOML, JSON or YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Graphite base URL (e.g., "http://graphite:8080")
    #[arg(long, global = true)]
    graphite_url: Option<String>,

    /// Hand out backend-relative URLs, to be proxied by the admin service
    #[arg(long, global = true)]
    proxy: bool,

    /// Series were written by statsd (stats_counts. / stats.gauges. prefixes)
    #[arg(long, global = true)]
    statsd_prefix: bool,

    /// First segment of every series path
    #[arg(long, global = true)]
    namespace: Option<String>,

    /// File remembering the last timeframe chosen with -t
    #[arg(long, global = true)]
    preference: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the timeframe catalog
    Timeframes {
        /// Timeframe to select (e.g., "24h", "off")
        #[arg(short, long)]
        timeframe: Option<String>,

        /// Print the intervals as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print an inline sparkline URL
    Sparkline(GraphArgs),

    /// Print a full-size graph URL
    Graph(GraphArgs),

    /// Print the backend-relative rate query path
    RateQuery(EntityArgs),

    /// Turn a rate query response (file or stdin) into a rate payload
    ParseRate {
        /// Response body file; stdin when omitted
        file: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct EntityArgs {
    /// Topic name
    #[arg(long)]
    topic: String,

    /// Channel name
    #[arg(long)]
    channel: Option<String>,

    /// Host address (host:port); repeat for a cross-host view
    #[arg(long)]
    host: Vec<String>,
}

#[derive(clap::Args, Debug)]
struct GraphArgs {
    #[command(flatten)]
    entity: EntityArgs,

    /// Metric key (e.g., "depth", "message_count", "in_flight_count")
    #[arg(short, long, default_value = "depth")]
    metric: String,

    /// Timeframe (e.g., "1h", "24h", "off"); remembered with --preference
    #[arg(short, long)]
    timeframe: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    graphwatch_types::validate_catalog().context("timeframe catalog is invalid")?;

    let overrides = Overrides {
        graphite_url: args.graphite_url.clone(),
        proxy_graphite: args.proxy.then_some(true),
        use_statsd_prefix: args.statsd_prefix.then_some(true),
        namespace: args.namespace.clone(),
    };
    let settings = load_settings(args.config.as_deref(), &overrides)?;

    match &args.command {
        Command::Timeframes { timeframe, json } => {
            let options = resolve_options(&settings, &args, timeframe.as_deref())?;
            if *json {
                println!("{}", serde_json::to_string_pretty(options.all_intervals())?);
            } else {
                print!("{}", timeframe_table(&options));
            }
        }
        Command::Sparkline(graph) => print_graph(&settings, &args, graph, GraphKind::Sparkline)?,
        Command::Graph(graph) => print_graph(&settings, &args, graph, GraphKind::Large)?,
        Command::RateQuery(entity) => {
            let options = resolve_options(&settings, &args, None)?;
            let entity = select_entity(&entity.topic, entity.channel.as_deref(), &entity.host)?;
            println!("{}", rate_path(&options, entity.as_ref()));
        }
        Command::ParseRate { file } => {
            let body = read_body(file.as_deref())?;
            println!("{}", parse_rate(&body)?);
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Resolve graph options, remembering an explicit timeframe in --preference.
fn resolve_options(
    settings: &GraphSettings,
    args: &Args,
    requested: Option<&str>,
) -> Result<GraphOptions> {
    let mut store: Box<dyn PreferenceStore> = match &args.preference {
        Some(path) => Box::new(FilePreference::new(path)),
        None => Box::new(NoPreference),
    };
    Ok(GraphOptions::resolve(settings, requested, store.as_mut())?)
}

fn print_graph(
    settings: &GraphSettings,
    args: &Args,
    graph: &GraphArgs,
    kind: GraphKind,
) -> Result<()> {
    let options = resolve_options(settings, args, graph.timeframe.as_deref())?;
    let entity = select_entity(
        &graph.entity.topic,
        graph.entity.channel.as_deref(),
        &graph.entity.host,
    )?;
    println!("{}", graph_url(&options, entity.as_ref(), kind, &graph.metric)?);
    Ok(())
}

/// Read a response body from `path`, or stdin when absent.
fn read_body(path: Option<&std::path::Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut body = Vec::new();
            io::stdin().read_to_end(&mut body)?;
            Ok(body)
        }
    }
}

//! Match Report CLI
//!
//! Event JSON → stats / timeline / heatmap / shot map / pass map JSON

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use of_analytics::{PlayerId, SubjectContext, TeamId};
#[cfg(feature = "cli")]
use of_report::{ConfigOverrides, ReportKind, ReportRequest, SchemaTarget};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "of_report")]
#[command(about = "Build match analytics render payloads from event JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Per-period statistics (1H / 2H / total)
    Stats(ReportArgs),
    /// Clustered timeline markers
    Timeline(ReportArgs),
    /// Heatmap points and density cells
    Heatmap(ReportArgs),
    /// Shot map markers
    Shots(ReportArgs),
    /// Pass map vectors
    Passes(ReportArgs),
    /// Print a JSON schema
    Schema {
        #[arg(value_enum)]
        target: SchemaTarget,

        /// Output file path (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct ReportArgs {
    /// Input JSON file (array of event records)
    #[arg(long)]
    events: PathBuf,

    /// Analytics config YAML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Event taxonomy YAML (embedded taxonomy when omitted)
    #[arg(long)]
    taxonomy: Option<PathBuf>,

    /// Output file path (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long)]
    match_id: u64,

    #[arg(long)]
    home_team: u64,

    #[arg(long)]
    away_team: u64,

    /// Restrict to one player (single-subject timeline)
    #[arg(long)]
    player: Option<u64>,

    /// Minutes played, enables events-per-minute rates
    #[arg(long)]
    minutes: Option<u32>,

    /// Mirror the X axis
    #[arg(long, default_value = "false")]
    flip: bool,

    #[arg(long)]
    width: Option<f64>,

    #[arg(long)]
    height: Option<f64>,

    #[arg(long)]
    bin_size: Option<f64>,

    /// Cluster threshold in seconds
    #[arg(long)]
    threshold: Option<f64>,
}

#[cfg(feature = "cli")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn run_report(kind: ReportKind, args: ReportArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        width: args.width,
        height: args.height,
        bin_size: args.bin_size,
        threshold: args.threshold,
    };
    let config = overrides.apply(of_report::load_config(args.config.as_deref())?)?;
    let taxonomy = args.taxonomy.as_deref().map(of_report::load_taxonomy).transpose()?;
    let analytics = of_report::analytics_for(config, taxonomy.as_ref())?;

    let events = of_report::load_events(&args.events)?;

    let mut context = SubjectContext::new(args.match_id, TeamId(args.home_team), TeamId(args.away_team));
    if let Some(player) = args.player {
        context = context.for_player(PlayerId(player));
    }
    let request = ReportRequest {
        kind,
        context,
        minutes_played: args.minutes,
        flip: args.flip.then_some(true),
    };

    let report = of_report::build_report(&analytics, &events, &request)?;
    of_report::write_output(args.out.as_deref(), &report)
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats(args) => run_report(ReportKind::Stats, args),
        Commands::Timeline(args) => run_report(ReportKind::Timeline, args),
        Commands::Heatmap(args) => run_report(ReportKind::Heatmap, args),
        Commands::Shots(args) => run_report(ReportKind::Shots, args),
        Commands::Passes(args) => run_report(ReportKind::Passes, args),
        Commands::Schema { target, out } => {
            let schema = of_report::schema_json(target)?;
            of_report::write_output(out.as_deref(), &schema)
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("of_report CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}

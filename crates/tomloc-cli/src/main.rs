use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::Layer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "tomloc", version, about = "Resx translation manager (Rust)")]
struct Cli {
    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every merged translation record
    List {
        #[arg(short, long)]
        root: Option<PathBuf>,
        #[arg(long, value_parser = ["text", "csv", "json"], default_value = "text")]
        format: String,
        #[arg(long)]
        out_csv: Option<PathBuf>,
        #[arg(long)]
        out_json: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search translations by per-field filters (at least one is required)
    Search {
        #[arg(short, long)]
        root: Option<PathBuf>,
        #[arg(long)]
        key: Option<String>,
        #[arg(long)]
        fr: Option<String>,
        #[arg(long)]
        en: Option<String>,
        #[arg(long)]
        pt: Option<String>,
        #[arg(long)]
        group: Option<String>,
        #[arg(long, value_parser = ["contains", "begins-with", "ends-with", "equals"])]
        match_mode: Option<String>,
        #[arg(long, default_value_t = false)]
        case_sensitive: bool,
        #[arg(long, value_parser = ["text", "json"], default_value = "text")]
        format: String,
    },

    /// List discovered resource groups
    Groups {
        #[arg(short, long)]
        root: Option<PathBuf>,
        #[arg(long, value_parser = ["text", "json"], default_value = "text")]
        format: String,
    },

    /// Create a new translation key (append-only; existing keys are rejected)
    Create {
        #[arg(short, long)]
        root: Option<PathBuf>,
        #[arg(long)]
        key: String,
        #[arg(long)]
        group: String,
        #[arg(long)]
        fr: String,
        #[arg(long)]
        en: Option<String>,
        #[arg(long)]
        pt: Option<String>,
        /// Fill empty secondary locales with tagged placeholder texts
        #[arg(long, default_value_t = false)]
        auto_fill: bool,
    },

    /// Overwrite or add locale texts for an existing key
    Update {
        #[arg(short, long)]
        root: Option<PathBuf>,
        #[arg(long)]
        key: String,
        #[arg(long)]
        group: String,
        #[arg(long)]
        fr: Option<String>,
        #[arg(long)]
        en: Option<String>,
        #[arg(long)]
        pt: Option<String>,
    },

    /// Remove a key from every locale file of a group
    Delete {
        #[arg(short, long)]
        root: Option<PathBuf>,
        #[arg(long)]
        key: String,
        #[arg(long)]
        group: String,
    },

    /// Dump JSON Schemas for the machine-readable output types
    Schema {
        #[arg(long, default_value = "")]
        out_dir: PathBuf,
    },
}

fn init_tracing() {
    let file_appender = rolling::daily("logs", "tomloc.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    let cmd_name = format!("{:?}", cli.cmd);
    info!("▶ Starting command: {}", cmd_name);

    let result = match cli.cmd {
        Commands::List {
            root,
            format,
            out_csv,
            out_json,
            limit,
        } => commands::list::run_list(root, format, out_csv, out_json, limit, use_color),
        Commands::Search {
            root,
            key,
            fr,
            en,
            pt,
            group,
            match_mode,
            case_sensitive,
            format,
        } => commands::search::run_search(
            root,
            key,
            fr,
            en,
            pt,
            group,
            match_mode,
            case_sensitive,
            format,
            use_color,
        ),
        Commands::Groups { root, format } => commands::groups::run_groups(root, format),
        Commands::Create {
            root,
            key,
            group,
            fr,
            en,
            pt,
            auto_fill,
        } => commands::create::run_create(root, key, group, fr, en, pt, auto_fill, use_color),
        Commands::Update {
            root,
            key,
            group,
            fr,
            en,
            pt,
        } => commands::update::run_update(root, key, group, fr, en, pt, use_color),
        Commands::Delete { root, key, group } => {
            commands::delete::run_delete(root, key, group, use_color)
        }
        Commands::Schema { out_dir } => commands::schema::run_schema(out_dir),
    };

    match &result {
        Ok(_) => info!("✔ Finished command: {}", cmd_name),
        Err(e) => error!("✖ Command {} failed: {:?}", cmd_name, e),
    }

    result
}

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use pinforge::api::PinForgeState;
use pinforge::config::LogSettings;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pin sequence generator for lock-picking practice", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    log: LogSettings,

    /// JSON file with log settings; explicit flags still win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Generate(cmd::generate::GenerateArgs),
    Export(cmd::export::ExportArgs),
    Clear,
    Profiles,
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let settings = match &cli.config {
        Some(path) => {
            info!("⚙️  Loading settings from: {}", path);
            let mut file_settings = LogSettings::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            file_settings.merge_from_cli(&cli.log, &matches);
            file_settings
        }
        None => cli.log.clone(),
    };

    info!(
        "📂 Log: {} ({})",
        settings.log_path.display(),
        settings.layout
    );

    let seed = match &cli.command {
        Commands::Generate(args) => args.seed,
        _ => None,
    };
    let state = PinForgeState::from_settings(&settings, seed);

    let outcome = match cli.command {
        Commands::Generate(args) => cmd::generate::run(&args, &state),
        Commands::Export(args) => cmd::export::run(&args, &state),
        Commands::Clear => cmd::clear::run(&state),
        Commands::Profiles => {
            reports::print_profiles();
            Ok(())
        }
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}

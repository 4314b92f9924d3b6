use anyhow::Result;
use clap::{Parser, Subcommand};

use salesboard::{cli, config, web};

#[derive(Debug, Parser)]
#[command(name = "salesboard")]
#[command(about = "Agent performance lookup and prediction distributions")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up one agent's forecast, performance level and recommendations
    Lookup {
        /// Agent identifier, sent to the service as-is
        agent_id: String,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Show the performance level and sales forecast distributions
    Distribution {
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Interactive lookup loop reading agent IDs from stdin
    Shell,
    /// Serve the web dashboard
    Web {
        /// Listen address (default: from config, 127.0.0.1:3000)
        #[arg(long)]
        addr: Option<String>,
        /// Do not open a browser window
        #[arg(long)]
        no_open: bool,
    },
    /// Show recent lookups from the event log
    History {
        /// Number of lookups to show
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Output format: table (default), json
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Check config files, service reachability and the event log
    Health,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default config to ~/.salesboard/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set one dotted key, e.g. `service.base_url http://host:8000`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Lookup { agent_id, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_lookup(&agent_id, fmt)
        }
        Commands::Distribution { format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_distribution(fmt)
        }
        Commands::Shell => cli::run_shell(),
        Commands::Web { addr, no_open } => {
            let cfg = config::load();
            let addr = addr.unwrap_or_else(|| cfg.web.addr.clone());
            web::serve(&cfg, &addr, cfg.web.open_browser && !no_open)
        }
        Commands::History { limit, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_history(limit, fmt)
        }
        Commands::Health => cli::run_health(),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}

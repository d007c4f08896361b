use std::time::Duration;

use clap::{Parser, Subcommand};

use pagebuilder_tools::cli::auth_cmd::{self, LoginOptions, DEFAULT_LOGIN_TIMEOUT_MS};
use pagebuilder_tools::cli::output::{print_error, OutputMode};
use pagebuilder_tools::cli::{module_cmd, search_cmd};
use pagebuilder_tools::{load_config, PagebuilderError, Toolkit};

#[derive(Parser)]
#[command(name = "pagebuilder", version, about = "Photo search and OAuth login for page builder modules")]
struct Cli {
    /// Config file to load before all others
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an Unsplash OAuth login
    Login {
        /// Print the authorization URL instead of opening a browser
        #[arg(long)]
        no_browser: bool,

        /// Wait for the redirect on the localhost redirect URI
        #[arg(long)]
        listen: bool,

        /// How long --listen waits, in milliseconds
        #[arg(long, env = "PAGEBUILDER_OAUTH_TIMEOUT_MS", default_value_t = DEFAULT_LOGIN_TIMEOUT_MS)]
        timeout_ms: u64,
    },

    /// Finish a login with the redirect URL from the browser
    Callback {
        /// Full redirect URL, or just its query string
        url: String,

        /// JSON output
        #[arg(long)]
        json: bool,
    },

    /// Forget the stored access token
    Logout,

    /// Show the operating mode and login state
    Status {
        /// JSON output
        #[arg(long)]
        json: bool,
    },

    /// Search Unsplash photos
    Search {
        /// Search terms
        #[arg(required = true)]
        query: Vec<String>,

        /// JSON output
        #[arg(long)]
        json: bool,

        /// Use mock results regardless of config
        #[arg(long)]
        dummy: bool,
    },

    /// Read queries from stdin and search once typing pauses
    Browse {
        /// Quiet period before a query is searched, in milliseconds
        #[arg(long, default_value_t = search_cmd::DEFAULT_BROWSE_DELAY_MS)]
        delay_ms: u64,
    },

    /// Print default settings for a module
    Module {
        #[command(subcommand)]
        kind: ModuleKind,
    },
}

#[derive(Subcommand)]
enum ModuleKind {
    /// Headline and text next to an image
    #[command(name = "text-image")]
    TextImage {
        /// Image to show instead of the default
        #[arg(long)]
        image_url: Option<String>,
    },
}

impl Commands {
    fn json_output(&self) -> bool {
        match self {
            Commands::Callback { json, .. }
            | Commands::Status { json }
            | Commands::Search { json, .. } => *json,
            _ => false,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("PAGEBUILDER_LOG_LEVEL")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.command.json_output();

    let result = run(cli).await;
    if let Err(e) = result {
        print_error(&e, json);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), PagebuilderError> {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Login {
            no_browser,
            listen,
            timeout_ms,
        } => {
            let toolkit = Toolkit::from_config(config)?;
            let opts = LoginOptions {
                open_browser: !no_browser,
                listen,
                timeout: Duration::from_millis(timeout_ms),
            };
            auth_cmd::run_login(&toolkit, opts).await
        }
        Commands::Callback { url, json } => {
            let toolkit = Toolkit::from_config(config)?;
            auth_cmd::run_callback(&toolkit, &url, OutputMode::from_flag(json)).await
        }
        Commands::Logout => {
            let toolkit = Toolkit::from_config(config)?;
            auth_cmd::run_logout(&toolkit)
        }
        Commands::Status { json } => {
            let toolkit = Toolkit::from_config(config)?;
            auth_cmd::run_status(&toolkit, OutputMode::from_flag(json))
        }
        Commands::Search { query, json, dummy } => {
            let mut settings = load_config(config)?.resolve();
            if dummy {
                settings.dummy_mode = true;
            }
            let toolkit = Toolkit::from_settings(settings);
            search_cmd::run_search(&toolkit, &query.join(" "), OutputMode::from_flag(json)).await
        }
        Commands::Browse { delay_ms } => {
            let toolkit = Toolkit::from_config(config)?;
            search_cmd::run_browse(&toolkit, Duration::from_millis(delay_ms)).await
        }
        Commands::Module { kind } => match kind {
            ModuleKind::TextImage { image_url } => module_cmd::run_text_image(image_url.as_deref()),
        },
    }
}

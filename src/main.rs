//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::contact::ContactSubmission;
use folio_rs::Folio;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author = "Yukang Chen")]
#[command(version)]
#[command(about = "A personal portfolio site: projects, blog and contact form", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start the site server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to server.port in _config.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip in _config.yml)
        #[arg(short, long)]
        ip: Option<String>,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Delete the public folder
    Clean,

    /// List site information
    List {
        /// Type of content to list (projects, posts, routes)
        #[arg(default_value = "projects")]
        r#type: String,
    },

    /// Send a message through the contact form of a running server
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,

        /// Endpoint URL (defaults to the local server from _config.yml)
        #[arg(long)]
        url: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            folio_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::Generate { watch } => {
            let folio = Folio::new(&base_dir)?;
            tracing::info!("Generating static files...");

            folio.generate()?;
            println!("Generated successfully!");

            if watch {
                folio_rs::commands::generate::watch(&folio).await?;
            }
        }

        Commands::Server { port, ip, open } => {
            let folio = Folio::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| folio.config.server.ip.clone());
            let port = port.unwrap_or(folio.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio_rs::server::start(&folio, &ip, port, open).await?;
        }

        Commands::Clean => {
            let folio = Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let folio = Folio::new(&base_dir)?;
            folio_rs::commands::list::run(&folio, &r#type)?;
        }

        Commands::Contact {
            name,
            email,
            message,
            url,
        } => {
            let folio = Folio::new(&base_dir)?;
            let submission = ContactSubmission {
                name,
                email,
                message,
            };
            folio_rs::commands::contact::run(&folio, submission, url).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

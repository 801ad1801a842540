use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use riskbar::api::ApiDoc;
use riskbar::assets::AssetLoader;
use riskbar::models::AppConfig;
use riskbar::server;
use riskbar::services::{DetectRequest, ExtractionService};

#[derive(Parser)]
#[command(name = "riskbar")]
#[command(about = "Reads colored risk bars from rendered report pages")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Read the risk bars of rendered report pages and print the JSON report
    Detect {
        /// PNG files, one per page, in page order
        #[arg(required = true)]
        pages: Vec<PathBuf>,

        /// Template name (default: the configured default template)
        #[arg(short, long)]
        template: Option<String>,

        /// Resolution of the PNGs; overrides their pHYs chunk
        #[arg(short, long)]
        dpi: Option<f32>,

        /// Template page shown in the first PNG, 0-based
        #[arg(long, default_value_t = 0)]
        first_page: usize,

        /// Pretty-print the JSON report
        #[arg(short, long)]
        pretty: bool,
    },
    /// List configured report templates
    Templates,
    /// Extract the embedded config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Detect {
            pages,
            template,
            dpi,
            first_page,
            pretty,
        }) => run_detect_command(&pages, template, dpi, first_page, pretty),
        Some(Commands::Templates) => run_templates_command(),
        Some(Commands::Init { force }) => run_init_command(force),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "riskbar=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

/// Config loader with the optional external path from CONFIG_FILE
fn config_loader() -> AssetLoader {
    AssetLoader::new(std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
}

/// Read report pages from PNG files (no server needed)
fn run_detect_command(
    paths: &[PathBuf],
    template: Option<String>,
    dpi: Option<f32>,
    first_page: usize,
    pretty: bool,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = Arc::new(AppConfig::load_from_assets(&config_loader()));
    let service = ExtractionService::new(config);

    let pages = paths
        .iter()
        .map(|path| {
            std::fs::read(path).map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let request = DetectRequest {
        template,
        first_page,
        dpi,
    };
    let detection = service.detect(&request, &pages)?;

    let json = if pretty {
        serde_json::to_string_pretty(&detection.report)?
    } else {
        serde_json::to_string(&detection.report)?
    };
    println!("{json}");

    if !detection.failures.is_empty() {
        for error in &detection.report.errors {
            eprintln!("error: {error}");
        }
        std::process::exit(2);
    }

    Ok(())
}

/// List configured templates
fn run_templates_command() -> anyhow::Result<()> {
    init_cli_tracing();

    let config = AppConfig::load_from_assets(&config_loader());
    if config.templates.is_empty() {
        anyhow::bail!("No valid templates configured");
    }

    for name in config.template_names() {
        let Some((name, spec)) = config.template(Some(name)) else {
            continue;
        };
        let marker = if name == config.default_template {
            " (default)"
        } else {
            ""
        };
        println!("{name} v{}{marker}", spec.version);
        if !spec.description.is_empty() {
            println!("  {}", spec.description);
        }
        println!(
            "  scale: {}, nominal dpi: {}, mismatch: {:?}",
            spec.classifier.scale_name(),
            spec.nominal_dpi,
            spec.mismatch
        );
        for (i, page) in spec.pages.iter().enumerate() {
            println!("  page {i}: {} labels", page.labels.len());
            for label in &page.labels {
                println!("    {label}");
            }
        }
    }

    Ok(())
}

/// Extract the embedded config to the filesystem
fn run_init_command(force: bool) -> anyhow::Result<()> {
    let report = config_loader().init(force)?;

    for f in &report.written {
        println!("  + {f}");
    }
    for f in &report.skipped {
        println!("  - {f} exists (use --force to overwrite)");
    }
    if report.written.is_empty() && report.skipped.is_empty() {
        println!("No files to extract.");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Riskbar v{VERSION}");
    println!("Reads colored risk bars from rendered report pages\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let loader = config_loader();
    let config_source = match loader.config_file() {
        Some(path) if loader.uses_external_config() => path.display().to_string(),
        Some(_) => "embedded (file not found)".to_string(),
        None => "embedded".to_string(),
    };
    println!("\nConfig: {config_source}");
    for name in AssetLoader::list_embedded() {
        println!("  embedded: {name}");
    }

    println!("\nCommands:");
    println!("  riskbar serve       Start the HTTP server");
    println!("  riskbar detect      Read risk bars from PNG pages");
    println!("  riskbar templates   List report templates");
    println!("  riskbar init        Extract the embedded config.yaml");
    println!("\nRun 'riskbar --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "riskbar=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let loader = config_loader();

    tracing::info!(
        config = ?loader
            .config_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        "Config source configured"
    );

    match loader.seed_if_configured() {
        Ok(true) => tracing::info!("Seeded missing config file with embedded default"),
        Ok(false) => {}
        Err(e) => tracing::warn!(%e, "Failed to seed config"),
    }

    let config = Arc::new(AppConfig::load_from_assets(&loader));
    let state = server::create_app_state(config)?;

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Riskbar server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

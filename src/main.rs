use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use dotgrid::api;
use dotgrid::assets::{AssetLoader, ConfigSource};
use dotgrid::models::{AppConfig, GridReport};
use dotgrid::rendering::{edge_mask_png, legend_text, render_svg, SvgRasterizer, SvgVariant};
use dotgrid::server;
use dotgrid::services::{ConfigPalettes, ImageDecoder, PaletteProvider, ProcessingService};

#[derive(Parser)]
#[command(name = "dotgrid")]
#[command(about = "Dotgrid - turn images into numbered color dot grids and edge sketches")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Process an image file and write all artifacts to a directory
    Process {
        /// Input image (PNG, JPEG, GIF, WebP, ...)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Configured palette name
        #[arg(short, long)]
        palette: Option<String>,

        /// Inline palette as comma-separated hex colors (e.g. "#000000,#FFFFFF,#FF0000")
        #[arg(long)]
        colors: Option<String>,

        /// Edge threshold 0-255 (default from config)
        #[arg(short, long)]
        threshold: Option<u8>,
    },
    /// List configured palettes
    Palettes,
    /// Extract the embedded config.yaml for customization
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dotgrid API",
        description = "Turn images into numbered color dot grids and edge sketches",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_list_palettes,
        api::handle_create_run,
        api::handle_get_run,
        api::handle_update_threshold,
        api::handle_edges_png,
        api::handle_grid_svg,
        api::handle_grid_png,
        api::handle_legend,
    ),
    components(schemas(
        api::PaletteInfo,
        api::PaletteColor,
        api::CreateRunRequest,
        api::ThresholdRequest,
        api::RunResponse,
        dotgrid::models::GridReport,
        dotgrid::models::ColorCountEntry,
        dotgrid::models::CellEntry,
    )),
    tags(
        (name = "Palettes", description = "Configured palettes"),
        (name = "Runs", description = "Image upload and recompute"),
        (name = "Artifacts", description = "SVG, PNG and text exports of a run")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Process {
            input,
            output,
            palette,
            colors,
            threshold,
        }) => run_process_command(&input, &output, palette, colors, threshold).await,
        Some(Commands::Palettes) => run_palettes_command().await,
        Some(Commands::Init { force, list }) => run_init_command(force, list),
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dotgrid=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn load_config() -> Arc<AppConfig> {
    let loader = AssetLoader::from_env();
    if let Err(e) = loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config");
    }
    Arc::new(AppConfig::load_from_assets(&loader))
}

/// Run both pipelines on an image file (no server needed)
async fn run_process_command(
    input: &Path,
    output: &Path,
    palette: Option<String>,
    colors: Option<String>,
    threshold: Option<u8>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = load_config();
    let palettes = ConfigPalettes::new(config.clone());
    let colors: Option<Vec<String>> = colors.map(|s| {
        s.split(',')
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect()
    });
    let (palette_name, palette) = palettes
        .resolve(palette.as_deref(), colors.as_deref())
        .await?;

    let bytes = std::fs::read(input)?;
    let image = ImageDecoder::from_config(&config).decode(&bytes)?;
    let threshold = threshold.unwrap_or(config.edges.default_threshold);

    let processing = ProcessingService::default();
    let run = processing.run(image, palette, threshold).await?;
    let spec = processing.spec();

    std::fs::create_dir_all(output)?;

    let colored = render_svg(&run.grid, spec, SvgVariant::Colored);
    let numbered = render_svg(&run.grid, spec, SvgVariant::Numbered);
    let grid_png = SvgRasterizer::new().render_png(colored.as_bytes(), 1.0)?;
    let report = GridReport::new(&palette_name, threshold, &run.grid, &run.edges);

    let files: [(&str, Vec<u8>); 6] = [
        ("grid.svg", colored.into_bytes()),
        ("numbered.svg", numbered.into_bytes()),
        ("grid.png", grid_png),
        ("edges.png", edge_mask_png(&run.edges)?),
        ("legend.txt", legend_text(&run.grid).into_bytes()),
        ("samples.json", serde_json::to_vec_pretty(&report)?),
    ];

    for (name, data) in &files {
        let path = output.join(name);
        std::fs::write(&path, data)?;
        println!("  + {} ({} bytes)", path.display(), data.len());
    }

    println!(
        "Processed {} with palette '{palette_name}': {} dots, {} colors, {} skipped, {} edge pixels",
        input.display(),
        report.cell_count,
        report.counts.len(),
        report.skipped,
        report.edge_pixels
    );

    Ok(())
}

/// Print configured palettes
async fn run_palettes_command() -> anyhow::Result<()> {
    init_cli_tracing();

    let config = load_config();
    let palettes = ConfigPalettes::new(config.clone());
    let default = palettes.default_name().await?;

    for name in palettes.list().await? {
        let marker = if default.as_deref() == Some(name.as_str()) {
            " (default)"
        } else {
            ""
        };
        println!("{name}{marker}:");
        match palettes.get(&name).await {
            Ok(Some(palette)) => {
                for entry in palette.entries() {
                    println!("  {}  {}", entry.color.to_hex(), entry.name);
                }
            }
            Ok(None) => {}
            Err(e) => println!("  invalid: {e}"),
        }
    }

    Ok(())
}

/// Extract the embedded config to the filesystem
fn run_init_command(force: bool, list: bool) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        for f in AssetLoader::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    let report = AssetLoader::from_env().init(force)?;

    for f in &report.written {
        println!("Extracted {f}");
    }
    for f in &report.skipped {
        println!("Skipped existing {f} (use --force to overwrite)");
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Dotgrid v{VERSION}");
    println!("Color dot grids and edge sketches from images\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let loader = AssetLoader::from_env();
    let source = match loader.config_source() {
        ConfigSource::Embedded => "embedded".to_string(),
        ConfigSource::File(path) => path.display().to_string(),
        ConfigSource::MissingFile(_) => "embedded (file not found)".to_string(),
    };
    println!("\nConfig: {source}");

    let config = AppConfig::load_from_assets(&loader);
    println!(
        "  {} palettes, default: {}",
        config.palettes.len(),
        config.default_palette_name().unwrap_or("(none)")
    );

    println!("\nCommands:");
    println!("  dotgrid serve      Start the HTTP server");
    println!("  dotgrid process    Process an image file");
    println!("  dotgrid palettes   List configured palettes");
    println!("  dotgrid init       Extract embedded config");
    println!("\nRun 'dotgrid --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dotgrid=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(config = ?asset_loader.config_source(), "Config source");

    if let Err(e) = asset_loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config");
    }

    let state = server::create_app_state(asset_loader)?;

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Dotgrid server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use beadsmith::api;
use beadsmith::models::{AppConfig, CellStyle, PaletteMode, RenderPalette};
use beadsmith::rendering::SvgRenderer;
use beadsmith::server;
use beadsmith::services::{
    Bom, HttpImageGenerator, ImageGenerator, PatternPipeline, PatternRequest, PatternStats,
};

#[derive(Parser)]
#[command(name = "beadsmith")]
#[command(about = "Beadsmith - turns images into fuse bead patterns")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Turn an image into a pattern PNG
    Render {
        /// Input PNG or JPEG
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Grid width in beads (1-200)
        #[arg(short, long)]
        width: Option<u32>,

        /// Cell size in pixels (10-100)
        #[arg(long)]
        cell_size: Option<u32>,

        #[arg(long, value_enum)]
        style: Option<CellStyle>,

        /// Plain nearest-color matching, no error diffusion
        #[arg(long)]
        no_dither: bool,

        /// Hide bead codes in cells
        #[arg(long)]
        no_labels: bool,

        /// Draw row and column labels
        #[arg(long)]
        axes: bool,

        /// Draw board seams every 29 beads
        #[arg(long)]
        board_lines: bool,

        #[arg(long, value_enum)]
        palette: Option<PaletteMode>,

        /// Color budget for the dynamic palette (2-128)
        #[arg(short = 'k', long)]
        colors: Option<usize>,

        #[arg(long, value_enum)]
        render_palette: Option<RenderPalette>,

        /// Comma-separated catalog family prefixes (e.g. "A,H")
        #[arg(long)]
        families: Option<String>,

        /// Highlight a single bead code
        #[arg(long)]
        focus: Option<String>,

        /// Leave background beads out of labels and counts
        #[arg(long)]
        exclude_background: bool,

        /// Also write the bill of materials as CSV
        #[arg(long)]
        bom: Option<PathBuf>,
    },
    /// List the bead catalog
    Catalog {
        /// Comma-separated family prefixes
        #[arg(long)]
        families: Option<String>,
    },
    /// Generate an image from a text prompt
    Generate {
        prompt: String,

        /// Output image file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Beadsmith API",
        description = "Turns images into fuse bead patterns with bead counts and cost",
        version = "0.3.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_pattern,
        api::handle_report,
        api::handle_bom_csv,
        api::handle_catalog,
        api::handle_generate,
        api::handle_latest,
    ),
    components(schemas(
        api::PatternReport,
        api::CatalogResponse,
        api::CatalogBead,
        api::GenerateRequest,
        api::GenerateResponse,
        beadsmith::services::Bom,
        beadsmith::services::BomRow,
        beadsmith::services::PatternStats,
    )),
    tags(
        (name = "Pattern", description = "Pattern rendering and bill of materials"),
        (name = "Catalog", description = "Bead colors"),
        (name = "Generate", description = "Image generation for the session")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Render {
            input,
            output,
            width,
            cell_size,
            style,
            no_dither,
            no_labels,
            axes,
            board_lines,
            palette,
            colors,
            render_palette,
            families,
            focus,
            exclude_background,
            bom,
        }) => {
            init_cli_logging();
            let config = AppConfig::load();
            let mut request = request_from_config(&config);
            let options = &mut request.options;
            if let Some(width) = width {
                options.width_beads = width;
            }
            if let Some(cell_size) = cell_size {
                options.cell_size = cell_size;
            }
            if let Some(style) = style {
                options.style = style;
            }
            if let Some(mode) = palette {
                options.palette_mode = mode;
            }
            if let Some(k) = colors {
                options.color_budget = k;
            }
            if let Some(render_palette) = render_palette {
                options.render_palette = render_palette;
            }
            if let Some(families) = families {
                options.families = split_list(&families);
            }
            options.focus = focus.or(options.focus.take());
            options.dither &= !no_dither;
            options.labels &= !no_labels;
            options.axes |= axes;
            options.board_lines |= board_lines;
            options.exclude_background |= exclude_background;

            // Blocking work; keep it off the runtime's worker threads
            tokio::task::spawn_blocking(move || {
                run_render_command(&config, &input, &output, bom.as_deref(), &request)
            })
            .await?
        }
        Some(Commands::Catalog { families }) => {
            init_cli_logging();
            run_catalog_command(families.as_deref())
        }
        Some(Commands::Generate { prompt, output }) => {
            init_cli_logging();
            tokio::task::spawn_blocking(move || run_generate_command(&prompt, &output)).await?
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_cli_logging() {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beadsmith=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

fn request_from_config(config: &AppConfig) -> PatternRequest {
    PatternRequest {
        options: config.pattern.clone(),
        enhance: config.enhance.clone(),
        costing: config.costing.clone(),
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

fn pipeline_from_config(config: &AppConfig) -> anyhow::Result<PatternPipeline> {
    let catalog = config.catalog.load_catalog()?;
    let renderer = match &config.fonts_dir {
        Some(dir) => SvgRenderer::with_font_dir(dir),
        None => SvgRenderer::new(),
    };
    Ok(PatternPipeline::new(catalog, renderer))
}

/// Render an image file to a pattern PNG (no server needed)
fn run_render_command(
    config: &AppConfig,
    input: &Path,
    output: &Path,
    bom_path: Option<&Path>,
    request: &PatternRequest,
) -> anyhow::Result<()> {
    let pipeline = pipeline_from_config(config)?;

    let bytes = std::fs::read(input)?;
    let pattern = pipeline
        .build(&bytes, request)
        .map_err(|e| anyhow::anyhow!("Pattern error: {e}"))?;
    let png_bytes = pipeline
        .render_png(&pattern)
        .map_err(|e| anyhow::anyhow!("Render error: {e}"))?;

    std::fs::write(output, &png_bytes)?;
    println!("Rendered {} ({} bytes)", output.display(), png_bytes.len());

    if let Some(path) = bom_path {
        std::fs::write(path, pattern.bom.to_csv())?;
        println!("Wrote {}", path.display());
    }

    print_summary(&pattern.bom, &pattern.stats);
    Ok(())
}

fn print_summary(bom: &Bom, stats: &PatternStats) {
    println!(
        "\nGrid {}x{} beads, {:.1}x{:.1} cm, {} board(s) ({}x{})",
        stats.width_beads,
        stats.height_beads,
        stats.width_cm,
        stats.height_cm,
        stats.board_count,
        stats.boards_across,
        stats.boards_down
    );
    println!("\n  {:<6} {:<8} {:>7} {:>5} {:>9}", "Code", "Hex", "Count", "Bags", "Cost");
    for row in &bom.rows {
        println!(
            "  {:<6} {:<8} {:>7} {:>5} {:>9.2}",
            row.code, row.hex, row.count, row.bags, row.cost
        );
    }
    println!(
        "  {:<6} {:<8} {:>7} {:>5} {:>9.2}",
        "TOTAL", "", bom.total_count, bom.total_bags, bom.total_cost
    );
    if bom.excluded > 0 {
        println!("  ({} background beads not counted)", bom.excluded);
    }
    println!("\n  Weight: {:.1} g", stats.weight_g);
}

fn run_catalog_command(families: Option<&str>) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let catalog = config.catalog.load_catalog()?;
    let families = families.map(split_list).unwrap_or_default();
    let catalog = catalog.filter_families(&families)?;

    for bead in &catalog {
        println!("{:<6} {}", bead.code(), bead.rgb());
    }
    println!("\n{} colors in {} families", catalog.len(), catalog.families().len());
    Ok(())
}

fn run_generate_command(prompt: &str, output: &Path) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let generator = HttpImageGenerator::from_config(&config.generator).ok_or_else(|| {
        anyhow::anyhow!("No generator endpoint configured (set generator.endpoint in config)")
    })?;

    let bytes = generator.generate(prompt)?;
    std::fs::write(output, &bytes)?;
    println!("Generated {} ({} bytes)", output.display(), bytes.len());
    Ok(())
}

/// Show current configuration status
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Beadsmith v{VERSION}");
    println!("Turns images into fuse bead patterns\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("config.yaml (default)")
    );

    let config = AppConfig::load();
    println!("\nPattern Defaults:");
    println!("  width       = {} beads", config.pattern.width_beads);
    println!("  cell size   = {} px", config.pattern.cell_size);
    println!("  dither      = {}", config.pattern.dither);
    println!("  palette     = {:?}", config.pattern.palette_mode);

    println!("\nCatalog:");
    match config.catalog.load_catalog() {
        Ok(catalog) => println!(
            "  {} ({} colors)",
            config
                .catalog
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string()),
            catalog.len()
        ),
        Err(e) => println!("  error: {e}"),
    }

    println!("\nImage Generator:");
    println!(
        "  {}",
        config
            .generator
            .endpoint
            .as_deref()
            .unwrap_or("(not configured)")
    );

    println!("\nCommands:");
    println!("  beadsmith serve            Start the HTTP server");
    println!("  beadsmith render IN -o OUT Render a pattern PNG");
    println!("  beadsmith catalog          List bead colors");
    println!("  beadsmith generate PROMPT  Generate an input image");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beadsmith=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let config = AppConfig::load();
    let state = server::create_app_state(config)?;

    let app = server::build_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Beadsmith server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

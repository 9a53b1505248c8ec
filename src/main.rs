use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use color_filters::{presets, FilterSettings};
use coloraid::api;
use coloraid::models::{AppConfig, DEFAULT_BIND_ADDR};
use coloraid::server;
use coloraid::services::{codec, HttpFetcher, ImageProcessor, Operation};
use coloraid::video::{open_source, ChannelSink, ProcessedFrame, SettingsHandle, VideoWorker};
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Parser)]
#[command(name = "coloraid")]
#[command(about = "Colour adjustment filters for colour-vision deficiencies")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Filter a single image to a PNG file
    Filter {
        /// Image path, file:// URL, http(s) URL or data URI
        #[arg(short, long)]
        input: String,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Only equalize lightness (ignores the filter settings)
        #[arg(long)]
        equalize: bool,

        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Filter every frame of a GIF or an image directory
    Video {
        /// Animated GIF, directory of images, or a single image
        #[arg(short, long)]
        input: PathBuf,

        /// Directory for frame_00001.png, frame_00002.png, ...
        #[arg(short, long)]
        output_dir: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// List filter presets
    Presets,
}

#[derive(Args, Debug, Default)]
struct SettingsArgs {
    /// Preset to start from (e.g. "protanopia")
    #[arg(short, long)]
    preset: Option<String>,

    /// Contrast multiplier (above 0, typically 1.0 to 2.0)
    #[arg(short, long)]
    contrast: Option<f32>,

    /// Hue rotation in degrees (0 to 360)
    #[arg(long)]
    hue: Option<u16>,

    /// Invert colours
    #[arg(long)]
    invert: bool,

    /// Warm sepia tint ("blue light" filter)
    #[arg(long, alias = "blue-light")]
    sepia: bool,

    /// Grayscale with extra contrast for reading
    #[arg(long)]
    reading_mode: bool,
}

impl SettingsArgs {
    fn resolve(&self) -> anyhow::Result<FilterSettings> {
        let overrides = api::SettingsOverrides {
            contrast: self.contrast,
            hue: self.hue,
            invert: self.invert.then_some(true),
            sepia: self.sepia.then_some(true),
            reading_mode: self.reading_mode.then_some(true),
        };
        Ok(api::filter::resolve_settings(
            self.preset.as_deref(),
            &overrides,
        )?)
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Coloraid API",
        description = "Colour adjustment filters for colour-vision deficiencies",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_process_image,
        api::handle_filter,
        api::handle_presets,
    ),
    components(schemas(
        api::ProcessImageRequest,
        api::ProcessedImageResponse,
        api::ErrorResponse,
        api::FilterRequest,
        api::SettingsOverrides,
        api::SettingsBody,
        api::PresetResponse,
    )),
    tags(
        (name = "Images", description = "Image enhancement and filtering"),
        (name = "Presets", description = "Built-in filter presets")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Filter {
            input,
            output,
            equalize,
            settings,
        }) => run_filter_command(&input, &output, equalize, &settings).await,
        Some(Commands::Video {
            input,
            output_dir,
            settings,
        }) => run_video_command(&input, &output_dir, &settings).await,
        Some(Commands::Presets) => {
            run_presets_command();
            Ok(())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for one-shot CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coloraid=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Config for CLI use: local files are always readable
fn cli_config() -> AppConfig {
    let mut config = AppConfig::load();
    config.fetch.allow_local_paths = true;
    config
}

/// Filter one image to a PNG file (no server needed)
async fn run_filter_command(
    input: &str,
    output: &Path,
    equalize: bool,
    settings: &SettingsArgs,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let operation = if equalize {
        Operation::Equalize
    } else {
        Operation::Filter(settings.resolve()?)
    };

    let config = cli_config();
    let processor = ImageProcessor::new(Arc::new(HttpFetcher::new(&config.fetch)?));
    let png = processor.process(input, operation).await?;

    tokio::fs::write(output, &png).await?;
    println!("Wrote {} ({} bytes)", output.display(), png.len());

    Ok(())
}

/// Run the video worker and write every processed frame from this thread
async fn run_video_command(
    input: &Path,
    output_dir: &Path,
    settings: &SettingsArgs,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let handle = SettingsHandle::new(settings.resolve()?)?;
    tokio::fs::create_dir_all(output_dir).await?;

    let (sink, mut frames) = ChannelSink::channel();
    let source_path = input.to_path_buf();
    let worker = VideoWorker::spawn(move || open_source(&source_path), handle.subscribe(), sink)?;

    let mut written = 0u64;
    let written_all = write_frames(&mut frames, &worker, output_dir, &mut written).await;

    // The source is released by the worker thread, so it must finish
    // before main returns, whether or not writing failed.
    worker.stop();
    drop(frames);
    let joined = tokio::task::spawn_blocking(move || worker.join()).await;
    written_all?;
    let report = joined??;
    println!(
        "Wrote {written} frames to {} ({:?})",
        output_dir.display(),
        report.exit
    );

    Ok(())
}

/// Drain the sink into numbered PNG files until the worker ends
async fn write_frames(
    frames: &mut UnboundedReceiver<ProcessedFrame>,
    worker: &VideoWorker,
    output_dir: &Path,
    written: &mut u64,
) -> anyhow::Result<()> {
    let mut stopping = false;
    loop {
        tokio::select! {
            frame = frames.recv() => match frame {
                Some(frame) => {
                    let png = codec::encode_png(&frame.grid)?;
                    let path = output_dir.join(format!("frame_{:05}.png", frame.index + 1));
                    tokio::fs::write(&path, png).await?;
                    *written += 1;
                }
                None => return Ok(()),
            },
            _ = tokio::signal::ctrl_c(), if !stopping => {
                eprintln!("Stopping after the current frame...");
                worker.stop();
                stopping = true;
            }
        }
    }
}

fn run_presets_command() {
    println!("Presets:\n");
    for preset in presets::all() {
        let s = preset.settings;
        println!("  {:<13} {}", preset.key, preset.label);
        println!("                {}", preset.description);
        println!(
            "                contrast {:.1}, hue {}, reading mode {}\n",
            s.contrast,
            s.hue,
            if s.reading_mode { "on" } else { "off" }
        );
    }
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Coloraid v{VERSION}");
    println!("Colour adjustment filters for colour-vision deficiencies\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr
            .as_deref()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{DEFAULT_BIND_ADDR} (default)"))
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("\nConfig: {config_source}");

    println!("\nCommands:");
    println!("  coloraid serve     Start the HTTP server");
    println!("  coloraid filter    Filter one image to a PNG file");
    println!("  coloraid video     Filter every frame of a GIF or image directory");
    println!("  coloraid presets   List filter presets");
    println!("\nRun 'coloraid --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coloraid=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let config = AppConfig::load();

    let state = server::create_app_state(config)?;

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Coloraid server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

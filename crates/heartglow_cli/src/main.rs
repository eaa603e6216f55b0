//! Heartglow CLI
//!
//! Render greeting canvases to PNG, run the page headless, and scaffold
//! `heartglow.toml`.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use heartglow_animation::{
    AnimationLoop, ControlFlow, FrameScheduler, FrameSubject, HeartTrailSimulator, ParticleConfig,
    ParticleField, REFERENCE_FRAME_RATE,
};
use heartglow_app::{parse_color, GreetingConfig, CONFIG_FILE_NAME};
use heartglow_core::Size;
use heartglow_widgets::GiftBox;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod raster;
mod script;

use raster::PixmapSurface;
use script::{last_frame_commands, Script, ScriptRunner};

#[derive(Parser)]
#[command(name = "heartglow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Heartglow greeting page toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one canvas after a number of frames and save it as PNG
    Render {
        /// Canvas to render
        #[arg(value_enum)]
        canvas: Canvas,

        /// Frames to simulate before saving
        #[arg(short, long, default_value = "120")]
        frames: u32,

        /// Canvas width (the heart trail uses its configured size)
        #[arg(long, default_value = "800")]
        width: u32,

        /// Canvas height
        #[arg(long, default_value = "600")]
        height: u32,

        /// Output file
        #[arg(short, long, default_value = "heartglow.png")]
        output: PathBuf,

        /// Config file (defaults to ./heartglow.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Random seed, overriding the config
        #[arg(long)]
        seed: Option<u64>,

        /// Background color as #rrggbb; transparent when omitted
        #[arg(short, long)]
        background: Option<String>,
    },

    /// Run the whole page headless through a scripted session
    Simulate {
        /// JSON script; a built-in tour when omitted
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Config file (defaults to ./heartglow.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Random seed, overriding the config
        #[arg(long)]
        seed: Option<u64>,

        /// Viewport width for the built-in tour
        #[arg(long, default_value = "800")]
        width: f32,

        /// Viewport height for the built-in tour
        #[arg(long, default_value = "1200")]
        height: f32,
    },

    /// Write a heartglow.toml with every default spelled out
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show the components and their defaults
    Info,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Canvas {
    /// Twinkling background sparkles
    Sparkles,
    /// Floating hearts drawn toward the pointer
    Hearts,
    /// Rising hearts of the closing section
    Final,
    /// Heart-shaped glowing trails
    Trail,
    /// An opened gift box burst
    Gift,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Render {
            canvas,
            frames,
            width,
            height,
            output,
            config,
            seed,
            background,
        } => cmd_render(
            canvas,
            frames,
            Size::new(width as f32, height as f32),
            &output,
            config.as_deref(),
            seed,
            background.as_deref(),
        ),

        Commands::Simulate {
            script,
            config,
            seed,
            width,
            height,
        } => cmd_simulate(script.as_deref(), config.as_deref(), seed, width, height),

        Commands::Init { path, force } => cmd_init(&path, force),

        Commands::Info => cmd_info(),
    }
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<GreetingConfig> {
    let mut config = match path {
        Some(path) => GreetingConfig::load_from_path(path)?,
        None => GreetingConfig::load_from_dir(&std::env::current_dir()?)?,
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

fn frame_duration() -> Duration {
    Duration::from_secs_f32(1.0 / REFERENCE_FRAME_RATE)
}

fn particle_field(config: ParticleConfig, size: Size, seed: Option<u64>) -> ParticleField {
    match seed {
        Some(seed) => ParticleField::new(config, size, seed),
        None => ParticleField::from_entropy(config, size),
    }
}

fn cmd_render(
    canvas: Canvas,
    frames: u32,
    size: Size,
    output: &Path,
    config: Option<&Path>,
    seed: Option<u64>,
    background: Option<&str>,
) -> Result<()> {
    if size.is_empty() {
        anyhow::bail!("Canvas size must be positive, got {}x{}", size.width, size.height);
    }
    let config = load_config(config, seed)?;
    let background = background.map(parse_color).transpose()?;
    let seed = config.seed;

    info!(?canvas, frames, "Rendering to {}", output.display());

    let surface = match canvas {
        Canvas::Sparkles => {
            let field = particle_field(config.sparkles_config()?, size, seed);
            run_frames(field, size, frames)
        }
        Canvas::Hearts => {
            let mut field = particle_field(config.floating_hearts_config()?, size, seed);
            field.set_attractor(Some(size.center()));
            run_frames(field, size, frames)
        }
        Canvas::Final => {
            let field = particle_field(config.final_hearts_config()?, size, seed);
            run_frames(field, size, frames)
        }
        Canvas::Trail => {
            let trail = config.heart_trail.clone();
            let size = trail.size;
            let sim = match seed {
                Some(seed) => HeartTrailSimulator::new(trail, seed),
                None => HeartTrailSimulator::from_entropy(trail),
            };
            run_frames(sim, size, frames)
        }
        Canvas::Gift => {
            let mut gift = GiftBox::new(
                config.gift.clone(),
                size.center(),
                seed.unwrap_or_else(rand::random),
            );
            gift.open();
            run_frames(gift, size, frames)
        }
    };

    surface.save_png(output, background)?;
    info!("Saved {}", output.display());

    Ok(())
}

/// Drive one subject on a pixmap at the reference frame rate
fn run_frames<S: FrameSubject>(subject: S, size: Size, frames: u32) -> PixmapSurface {
    let mut anim = AnimationLoop::new(subject, PixmapSurface::new(size));
    let mut scheduler = FrameScheduler::new();
    let dt = frame_duration();

    for _ in 0..frames {
        let tick = scheduler.advance(dt);
        if anim.frame(&tick.frame) == ControlFlow::Exit {
            debug!(frame = tick.frame.index, "subject finished early");
            break;
        }
    }

    let (_, surface) = anim.into_parts();
    surface
}

fn cmd_simulate(
    script: Option<&Path>,
    config: Option<&Path>,
    seed: Option<u64>,
    width: f32,
    height: f32,
) -> Result<()> {
    let config = load_config(config, seed)?;
    let script = match script {
        Some(path) => Script::load(path)?,
        None => Script::demo(width, height),
    };

    let viewport = Size::new(script.width, script.height);
    if viewport.is_empty() {
        anyhow::bail!("Viewport must be positive, got {}x{}", viewport.width, viewport.height);
    }

    info!(steps = script.actions.len(), ?viewport, "Simulating greeting page");

    let mut runner = ScriptRunner::new(config, viewport)?;
    let snapshots = runner.run(&script.actions);
    let report = serde_json::json!({
        "snapshots": snapshots,
        "final": runner.page().snapshot(),
        "last_frame_commands": last_frame_commands(runner.page()),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    let file = path.join(CONFIG_FILE_NAME);

    info!("Writing {}", file.display());

    if file.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            file.display()
        );
    }

    GreetingConfig::default().save(&file)?;

    info!("Config written!");
    info!("Run `heartglow simulate` to try it");

    Ok(())
}

fn cmd_info() -> Result<()> {
    let config = GreetingConfig::default();

    println!("Heartglow");
    println!("=========");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Canvases:");
    println!("  - sparkles        {} twinkling dots", config.sparkles.count.unwrap_or(0));
    println!(
        "  - heart trail     {} trails on a {}x{} canvas",
        config.heart_trail.trails, config.heart_trail.size.width, config.heart_trail.size.height
    );
    println!(
        "  - floating hearts {} hearts drawn toward the pointer",
        config.floating_hearts.count.unwrap_or(0)
    );
    println!("  - final hearts    {} rising hearts", config.final_hearts.count.unwrap_or(0));
    println!();
    println!("Interactive:");
    println!("  - carousel        {} cards, swipe or auto-advance", config.carousel.cards);
    println!("  - cube            drag to rotate");
    println!(
        "  - gift box        {} glyph burst on open",
        config.gift.burst.count
    );
    println!("  - counters        {:?}", config.counter.targets);
    println!();
    println!("Config file: {}", CONFIG_FILE_NAME);

    Ok(())
}

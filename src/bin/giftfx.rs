use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "giftfx", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the scene configuration as JSON (defaults unless --config is given).
    Config(ConfigArgs),
    /// Simulate a particle spray and write the last frame as a PNG.
    Spray(SprayArgs),
    /// Render the bite erosion of an image at a point in time as a PNG.
    Bite(BiteArgs),
    /// Print the dust-cloud sprite states at a point in time as JSON.
    Cloud(CloudArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Scene config JSON to validate and print.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ViewportArgs {
    /// Viewport width in CSS px.
    #[arg(long, default_value_t = 390.0)]
    width: f64,

    /// Viewport height in CSS px.
    #[arg(long, default_value_t = 844.0)]
    height: f64,

    /// Device pixels per CSS px.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,
}

impl ViewportArgs {
    fn viewport(&self) -> anyhow::Result<giftfx::Viewport> {
        Ok(giftfx::Viewport::new(self.width, self.height, self.dpr)?)
    }
}

#[derive(Parser, Debug)]
struct SprayArgs {
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the config seed).
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    viewport: ViewportArgs,

    /// Particles to spawn (profile default when omitted).
    #[arg(long)]
    count: Option<usize>,

    /// Frames to simulate after spawning.
    #[arg(long, default_value_t = 30)]
    steps: u32,

    /// Launch angle in degrees, 0 pointing up.
    #[arg(long, default_value_t = 0.0)]
    angle_deg: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct BiteArgs {
    #[arg(long)]
    config: Option<PathBuf>,

    /// Source image (PNG, JPEG).
    #[arg(long)]
    image: PathBuf,

    /// Container width in CSS px.
    #[arg(long, default_value_t = 160.0)]
    width: f64,

    /// Container height in CSS px.
    #[arg(long, default_value_t = 120.0)]
    height: f64,

    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Visual rotation of the container in degrees.
    #[arg(long, default_value_t = 0.0)]
    rotation_deg: f64,

    /// Seconds since the interaction started.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CloudArgs {
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    viewport: ViewportArgs,

    /// Seconds since the cloud started.
    #[arg(long)]
    time: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Config(args) => cmd_config(args),
        Command::Spray(args) => cmd_spray(args),
        Command::Bite(args) => cmd_bite(args),
        Command::Cloud(args) => cmd_cloud(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<giftfx::SceneConfig> {
    match path {
        Some(p) => giftfx::SceneConfig::load(p)
            .with_context(|| format!("load scene config '{}'", p.display())),
        None => Ok(giftfx::SceneConfig::default()),
    }
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    println!("{}", cfg.to_json_pretty()?);
    Ok(())
}

fn cmd_spray(args: SprayArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let viewport = args.viewport.viewport()?;
    let profile = cfg.particle_profile().clone();

    let mut store = giftfx::SpriteStore::new(cfg.assets.root.clone());
    let sprites = if profile.use_sprites {
        store.preload_all(cfg.assets.spray_sprites.iter().map(String::as_str))?
    } else {
        Vec::new()
    };

    let count = args.count.unwrap_or(profile.default_count);
    let mut sim = match args.seed.or(cfg.seed) {
        Some(seed) => giftfx::ParticleSimulator::with_seed(profile, sprites, seed),
        None => giftfx::ParticleSimulator::new(profile, sprites),
    };
    let mut surface = giftfx::CpuSurface::new(viewport.css_size(), viewport.device_pixel_ratio)?;

    let origin = giftfx::Point::new(viewport.width * 0.5, viewport.height * 0.75);
    let dir = giftfx::direction_from_rotation(args.angle_deg);
    sim.spawn(&mut surface, viewport, origin, dir.y.atan2(dir.x), count)?;
    for _ in 0..args.steps {
        if !sim.tick(&mut surface, &store)? {
            break;
        }
    }

    write_png(&surface, &args.out)?;
    eprintln!(
        "wrote {} ({} particles alive after {} steps)",
        args.out.display(),
        sim.len(),
        sim.steps()
    );
    Ok(())
}

fn cmd_bite(args: BiteArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    let image = giftfx::decode_image(&bytes)?;

    let mut factory = giftfx::CpuSurfaceFactory;
    let mut session = giftfx::MaskSession::start(
        &mut factory,
        Some(&image),
        giftfx::Size::new(args.width, args.height),
        args.dpr,
        args.rotation_deg,
        cfg.bites,
    );
    if session.is_finished() {
        anyhow::bail!("mask session aborted on start (see logs)");
    }
    if args.time >= session.duration() {
        anyhow::bail!(
            "time {} is past the end of the sequence ({:.3} s); the overlay is gone by then",
            args.time,
            session.duration()
        );
    }
    session.advance(args.time.max(0.0));

    let surface = session
        .surface()
        .context("mask surface was dropped before the requested time")?;
    write_png(surface, &args.out)?;
    eprintln!(
        "wrote {} ({} bites at t={})",
        args.out.display(),
        session.bites().len(),
        args.time
    );
    Ok(())
}

fn cmd_cloud(args: CloudArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let viewport = args.viewport.viewport()?;

    let mut store = giftfx::SpriteStore::new(cfg.assets.root.clone());
    let sources: Vec<_> = cfg
        .cloud
        .sources
        .iter()
        .map(|s| store.insert_unavailable(s))
        .collect();

    let mut clouds = match args.seed.or(cfg.seed) {
        Some(seed) => giftfx::CloudChoreographer::with_seed(cfg.cloud.clone(), seed),
        None => giftfx::CloudChoreographer::new(cfg.cloud.clone()),
    };
    let cloud = clouds.build(None, viewport, &sources)?;
    let states = cloud.sample_at(args.time);
    println!("{}", serde_json::to_string_pretty(&states)?);
    Ok(())
}

fn write_png<S: giftfx::RasterSurface>(surface: &S, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let (width, height) = surface.pixel_size();
    let data = giftfx::unpremultiply_rgba8(surface.pixels());
    image::save_buffer_with_format(
        out,
        &data,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}

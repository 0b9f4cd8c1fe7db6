use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "meshwarp", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a mesh and print its stats as JSON.
    Mesh(MeshArgs),
    /// Warp an image through a posed rig.
    Warp(RenderArgs),
    /// Render the overlap depth of a posed rig as grayscale.
    Depth(RenderArgs),
    /// Render the silhouette of a posed rig as a black/white mask.
    Mask(RenderArgs),
}

#[derive(Parser, Debug)]
struct MeshArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Warp config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the source with the mesh drawn over it.
    #[arg(long)]
    wireframe: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Warp config JSON with the posed rig.
    #[arg(long)]
    config: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

const WIREFRAME_COLOR: meshwarp::Rgba8 = meshwarp::Rgba8::new(255, 48, 48, 255);

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Mesh(args) => cmd_mesh(args),
        Command::Warp(args) => cmd_warp(args),
        Command::Depth(args) => cmd_depth(args),
        Command::Mask(args) => cmd_mask(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn load_config(path: &Path) -> anyhow::Result<meshwarp::WarpConfig> {
    let cfg = meshwarp::WarpConfig::from_path(path)
        .with_context(|| format!("load config '{}'", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate config '{}'", path.display()))?;
    Ok(cfg)
}

fn load_source(path: &Path) -> anyhow::Result<meshwarp::Raster> {
    meshwarp::load_image(path).with_context(|| format!("load image '{}'", path.display()))
}

fn cmd_mesh(args: MeshArgs) -> anyhow::Result<()> {
    let cfg = match &args.config {
        Some(p) => load_config(p)?,
        None => meshwarp::WarpConfig::default(),
    };
    let source = load_source(&args.in_path)?;
    let mesh = meshwarp::generate_mesh(&source, &cfg.mesh);

    let json = serde_json::to_string_pretty(&mesh.stats()).context("serialize mesh stats")?;
    println!("{json}");

    if let Some(out) = &args.wireframe {
        let mut overlay = source.clone();
        meshwarp::draw_wireframe(
            &mut overlay,
            mesh.vertices(),
            mesh.triangles(),
            WIREFRAME_COLOR,
        );
        meshwarp::save_png(&overlay, out)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

struct Job {
    cfg: meshwarp::WarpConfig,
    source: meshwarp::Raster,
    rig: Vec<meshwarp::Pin>,
    poses: meshwarp::PinPoses,
}

impl Job {
    fn load(args: &RenderArgs) -> anyhow::Result<Self> {
        let cfg = load_config(&args.config)?;
        let source = load_source(&args.in_path)?;
        let rig = cfg.rig();
        let poses = cfg.poses();
        Ok(Self {
            cfg,
            source,
            rig,
            poses,
        })
    }
}

const OWNER: meshwarp::OwnerId = meshwarp::OwnerId(0);

fn cmd_warp(args: RenderArgs) -> anyhow::Result<()> {
    let job = Job::load(&args)?;
    let cache = meshwarp::MeshCache::new();
    let frame = meshwarp::evaluate_frame(
        &cache,
        OWNER,
        &job.source,
        &job.rig,
        &job.poses,
        0.0,
        &job.cfg.settings(),
    );
    meshwarp::save_png(&frame.raster, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_depth(args: RenderArgs) -> anyhow::Result<()> {
    let job = Job::load(&args)?;
    let cache = meshwarp::MeshCache::new();
    let depth = meshwarp::render_depth_frame(
        &cache,
        OWNER,
        &job.source,
        &job.rig,
        &job.poses,
        0.0,
        &job.cfg.settings(),
    );
    meshwarp::save_luma_png(depth.width, depth.height, &depth.to_luma8(), &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_mask(args: RenderArgs) -> anyhow::Result<()> {
    let job = Job::load(&args)?;
    let cache = meshwarp::MeshCache::new();
    let mask = meshwarp::render_silhouette_frame(
        &cache,
        OWNER,
        &job.source,
        &job.rig,
        &job.poses,
        0.0,
        &job.cfg.settings(),
    );
    meshwarp::save_luma_png(mask.width, mask.height, &mask.data, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

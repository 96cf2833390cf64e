use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "swatchfit", version)]
struct Cli {
    #[command(flatten)]
    dirs: DirArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every view of a garment with a fabric swatch.
    Generate(RequestArgs),
    /// Show which swatch and template/mask pairs a request resolves to.
    Resolve(RequestArgs),
    /// Render a JSON list of `{ "fabric_ref", "garment_type" }` requests in parallel.
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct DirArgs {
    /// JSON config file. `SWATCHFIT_*` env vars and the flags below override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fabric swatch directory.
    #[arg(long, global = true)]
    swatch_dir: Option<PathBuf>,

    /// Silhouette template directory.
    #[arg(long, global = true)]
    template_dir: Option<PathBuf>,

    /// Mask directory.
    #[arg(long, global = true)]
    mask_dir: Option<PathBuf>,

    /// Output directory for rendered mockups.
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Mask luminance placement threshold (0-254).
    #[arg(long, global = true)]
    threshold: Option<u8>,

    /// Layer the swatch over the silhouette template instead of writing the bare overlay.
    #[arg(long, global = true, value_enum)]
    background: Option<BackgroundChoice>,
}

#[derive(Args, Debug)]
struct RequestArgs {
    /// Fabric reference code (e.g. FAB-101).
    #[arg(long)]
    fabric: String,

    /// Garment type (e.g. "men polo").
    #[arg(long)]
    garment: String,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// JSON array of requests.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackgroundChoice {
    None,
    Silhouette,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("SWATCHFIT_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.dirs)?;
    match cli.cmd {
        Command::Generate(args) => cmd_generate(config, args),
        Command::Resolve(args) => cmd_resolve(config, args),
        Command::Batch(args) => cmd_batch(config, args),
    }
}

fn load_config(args: &DirArgs) -> anyhow::Result<swatchfit::MockupConfig> {
    let mut config = match &args.config {
        Some(path) => swatchfit::MockupConfig::from_path(path)?,
        None => swatchfit::MockupConfig::default(),
    };
    config
        .apply_env_overrides()
        .context("apply environment overrides")?;

    if let Some(d) = &args.swatch_dir {
        config.swatch_dir = d.clone();
    }
    if let Some(d) = &args.template_dir {
        config.template_dir = d.clone();
    }
    if let Some(d) = &args.mask_dir {
        config.mask_dir = d.clone();
    }
    if let Some(d) = &args.output_dir {
        config.output_dir = d.clone();
    }
    if let Some(t) = args.threshold {
        config.threshold = t;
    }
    if let Some(b) = args.background {
        config.background = match b {
            BackgroundChoice::None => swatchfit::Background::None,
            BackgroundChoice::Silhouette => swatchfit::Background::Silhouette,
        };
    }

    config.validate()?;
    Ok(config)
}

fn cmd_generate(config: swatchfit::MockupConfig, args: RequestArgs) -> anyhow::Result<()> {
    let generator = swatchfit::MockupGenerator::new(config)?;
    let paths = generator
        .generate_mockups(&args.fabric, &args.garment)
        .with_context(|| format!("generate mockups for '{}'", args.fabric))?;

    if paths.is_empty() {
        anyhow::bail!(
            "no mockups generated for fabric '{}' and garment '{}'",
            args.fabric,
            args.garment
        );
    }
    for p in &paths {
        println!("{}", p.display());
    }
    eprintln!("wrote {} mockup(s)", paths.len());
    Ok(())
}

fn cmd_resolve(config: swatchfit::MockupConfig, args: RequestArgs) -> anyhow::Result<()> {
    let generator = swatchfit::MockupGenerator::new(config)?;
    let plan = generator.plan(&args.fabric, &args.garment)?;

    println!("swatch: {}", plan.swatch.path.display());
    for pair in &plan.pairs {
        println!("{}:", pair.view);
        println!("  key:      {}", pair.key);
        println!("  template: {}", pair.template.display());
        println!("  mask:     {}", pair.mask.display());
        println!(
            "  output:   {}",
            generator
                .config()
                .output_dir
                .join(plan.name_for(pair.view).file_name())
                .display()
        );
    }
    Ok(())
}

fn cmd_batch(config: swatchfit::MockupConfig, args: BatchArgs) -> anyhow::Result<()> {
    let requests = swatchfit::read_requests(&args.in_path)?;
    let generator = swatchfit::MockupGenerator::new(config)?;

    let mut produced = 0usize;
    for entry in generator.generate_batch(&requests) {
        let req = &entry.request;
        match entry.result {
            Ok(paths) if paths.is_empty() => {
                eprintln!("{} / {}: nothing generated", req.fabric_ref, req.garment_type);
            }
            Ok(paths) => {
                produced += paths.len();
                for p in paths {
                    println!("{}", p.display());
                }
            }
            Err(e) => eprintln!("{} / {}: {e}", req.fabric_ref, req.garment_type),
        }
    }

    if produced == 0 && !requests.is_empty() {
        anyhow::bail!("batch produced no mockups");
    }
    eprintln!("wrote {produced} mockup(s) for {} request(s)", requests.len());
    Ok(())
}

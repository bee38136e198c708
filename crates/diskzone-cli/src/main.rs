//! diskzone CLI — measure inhibition zones and interpret them against breakpoints.

use clap::{Args, Parser, Subcommand};
use diskzone::{
    store, Analyzer, BreakpointTable, ClassificationReport, DiskSet, FixedNames, NameSource,
    PixelGrid, PlateAnalysis, PromptedNames, ZoneConfig,
};
use std::io::{StdinLock, Stdout};
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "diskzone")]
#[command(
    about = "Measure zones of inhibition on disk-diffusion plates and classify them against antibiotic breakpoints"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate disks in a plate image and write zone diameters to the store.
    Locate(CliLocateArgs),

    /// Read the store and classify each zone interactively.
    Classify(CliClassifyArgs),

    /// Locate and classify in one run without going through the store.
    Analyze(CliAnalyzeArgs),

    /// Print the active breakpoint table.
    Breakpoints(CliTableArgs),
}

#[derive(Debug, Clone, Args)]
struct CliLocateArgs {
    /// Path to the plate image.
    image: PathBuf,

    /// Measurement store to write.
    #[arg(long, default_value = store::DEFAULT_STORE_FILE)]
    out: PathBuf,

    /// Write the located disks as JSON.
    #[arg(long)]
    json: Option<PathBuf>,

    #[command(flatten)]
    config: CliConfigArgs,
}

#[derive(Debug, Clone, Args)]
struct CliClassifyArgs {
    /// Measurement store to read.
    #[arg(long, default_value = store::DEFAULT_STORE_FILE)]
    zones: PathBuf,

    /// Write the classification report as JSON.
    #[arg(long)]
    json: Option<PathBuf>,

    #[command(flatten)]
    table: CliTableArgs,
}

#[derive(Debug, Clone, Args)]
struct CliAnalyzeArgs {
    /// Path to the plate image.
    image: PathBuf,

    /// Antibiotic for each zone in detection order (repeat the flag).
    /// Prompts interactively when omitted.
    #[arg(long = "antibiotic", value_name = "NAME")]
    antibiotics: Vec<String>,

    /// Also write the measurement store.
    #[arg(long)]
    save_zones: Option<PathBuf>,

    /// Write disks and classification as JSON.
    #[arg(long)]
    json: Option<PathBuf>,

    #[command(flatten)]
    config: CliConfigArgs,

    /// Breakpoint table JSON (defaults to the built-in table).
    #[arg(long)]
    breakpoints: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
struct CliTableArgs {
    /// Breakpoint table JSON (defaults to the built-in table).
    #[arg(long)]
    breakpoints: Option<PathBuf>,

    /// Config JSON (interpret limits are read from it).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Args, Default)]
struct CliConfigArgs {
    /// Config JSON with locate/interpret settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of disks to report.
    #[arg(long)]
    max_disks: Option<usize>,

    /// Reference dish diameter in pixels.
    #[arg(long)]
    dish_px: Option<f32>,

    /// Reference dish diameter in millimeters.
    #[arg(long)]
    dish_mm: Option<f32>,
}

impl CliConfigArgs {
    fn to_config(&self) -> CliResult<ZoneConfig> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(max_disks) = self.max_disks {
            config.locate.max_disks = max_disks;
        }
        if let Some(px) = self.dish_px {
            config.locate.calibration.reference_pixel_diameter = px;
        }
        if let Some(mm) = self.dish_mm {
            config.locate.calibration.reference_mm_diameter = mm;
        }
        config.validate()?;
        Ok(config)
    }
}

fn load_config(path: Option<&Path>) -> CliResult<ZoneConfig> {
    match path {
        Some(path) => {
            tracing::info!("Loading config: {}", path.display());
            Ok(ZoneConfig::from_json_file(path)?)
        }
        None => Ok(ZoneConfig::default()),
    }
}

fn load_table(path: Option<&Path>, config: &ZoneConfig) -> CliResult<BreakpointTable> {
    let capacity = config.interpret.table_capacity;
    let table = match path {
        Some(path) => {
            tracing::info!("Loading breakpoints: {}", path.display());
            BreakpointTable::from_json_file(path, capacity)?
        }
        None => BreakpointTable::builtin(capacity)?,
    };
    tracing::info!("{} antibiotics in breakpoint table", table.len());
    Ok(table)
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Locate(args) => run_locate(&args),
        Commands::Classify(args) => run_classify(&args),
        Commands::Analyze(args) => run_analyze(&args),
        Commands::Breakpoints(args) => run_breakpoints(&args),
    }
}

// ── locate ─────────────────────────────────────────────────────────────

fn print_disks(disks: &DiskSet) {
    for (i, disk) in disks.iter().enumerate() {
        println!(
            "Found disk {} at ({}, {}): {:.1} px → {:.1} mm",
            i + 1,
            disk.x(),
            disk.y(),
            disk.diameter_px(),
            disk.diameter_mm()
        );
    }
}

fn load_grid(path: &Path) -> CliResult<PixelGrid> {
    tracing::info!("Loading image: {}", path.display());
    let grid = PixelGrid::open(path)?;
    let (w, h) = grid.dimensions();
    tracing::info!("Image size: {}x{}", w, h);
    Ok(grid)
}

fn run_locate(args: &CliLocateArgs) -> CliResult<()> {
    let config = args.config.to_config()?;
    let grid = load_grid(&args.image)?;
    let analyzer = Analyzer::new(config)?;

    let disks = analyzer.locate(&grid);
    tracing::info!(
        "Located {} disks (cap {})",
        disks.len(),
        disks.capacity()
    );
    print_disks(&disks);

    store::write_measurements(&args.out, &disks.measurements())?;
    println!("Saved {} diameters to {}", disks.len(), args.out.display());

    if let Some(json_path) = &args.json {
        let json = serde_json::to_string_pretty(&disks)?;
        std::fs::write(json_path, &json)?;
        tracing::info!("Disks written to {}", json_path.display());
    }

    Ok(())
}

// ── classify ───────────────────────────────────────────────────────────

fn finish_report(report: &ClassificationReport, json: Option<&Path>) -> CliResult<()> {
    println!();
    print!("{}", report);

    if let Some(json_path) = json {
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(json_path, &json)?;
        tracing::info!("Report written to {}", json_path.display());
    }
    Ok(())
}

fn prompted_names() -> PromptedNames<StdinLock<'static>, Stdout> {
    PromptedNames::new(std::io::stdin().lock(), std::io::stdout())
}

fn run_classify(args: &CliClassifyArgs) -> CliResult<()> {
    let config = load_config(args.table.config.as_deref())?;
    let table = load_table(args.table.breakpoints.as_deref(), &config)?;
    let analyzer = Analyzer::with_table(config, table)?;

    let measurements = store::read_measurements(&args.zones)?;
    tracing::info!(
        "Read {} diameters from {}",
        measurements.len(),
        args.zones.display()
    );

    let mut names = prompted_names();
    let report = analyzer.classify(&measurements, &mut names)?;

    finish_report(&report, args.json.as_deref())
}

// ── analyze ────────────────────────────────────────────────────────────

fn run_analyze(args: &CliAnalyzeArgs) -> CliResult<()> {
    let config = args.config.to_config()?;
    let table = load_table(args.breakpoints.as_deref(), &config)?;
    let grid = load_grid(&args.image)?;
    let analyzer = Analyzer::with_table(config, table)?;

    let disks = analyzer.locate(&grid);
    print_disks(&disks);
    let measurements = disks.measurements();

    if let Some(path) = &args.save_zones {
        store::write_measurements(path, &measurements)?;
        println!("Saved {} diameters to {}", disks.len(), path.display());
    }

    let mut fixed;
    let mut prompted;
    let names: &mut dyn NameSource = if args.antibiotics.is_empty() {
        prompted = prompted_names();
        &mut prompted
    } else {
        if args.antibiotics.len() != measurements.len() {
            tracing::warn!(
                "{} antibiotic names given for {} zones",
                args.antibiotics.len(),
                measurements.len()
            );
        }
        fixed = FixedNames::new(args.antibiotics.iter().cloned());
        &mut fixed
    };

    let report = analyzer.classify(&measurements, names)?;
    println!();
    print!("{}", report);

    if let Some(json_path) = &args.json {
        let (w, h) = grid.dimensions();
        let analysis = PlateAnalysis {
            image_size: [w, h],
            disks,
            report,
        };
        let json = serde_json::to_string_pretty(&analysis)?;
        std::fs::write(json_path, &json)?;
        tracing::info!("Analysis written to {}", json_path.display());
    }

    Ok(())
}

// ── breakpoints ────────────────────────────────────────────────────────

fn run_breakpoints(args: &CliTableArgs) -> CliResult<()> {
    let config = load_config(args.config.as_deref())?;
    let table = load_table(args.breakpoints.as_deref(), &config)?;

    println!("diskzone breakpoint table");
    println!(
        "  entries:  {} (capacity {})",
        table.len(),
        table.capacity()
    );
    println!(
        "  {:<30}  {:>14}  {:>12}",
        "antibiotic", "susceptible >=", "resistant <="
    );
    for bp in table.iter() {
        println!(
            "  {:<30}  {:>11.1} mm  {:>9.1} mm",
            bp.name, bp.susceptible_mm, bp.resistant_mm
        );
    }

    Ok(())
}

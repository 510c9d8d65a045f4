//! hep-sim core CLI.
//!
//! The main entry point for hep-core, handling:
//! - Monte Carlo event generation to the text event format
//! - Paired significance tests between two event files
//! - Track reconstruction summaries
//! - Catalog inspection

use clap::{Args, Parser, Subcommand};
use hep_common::error::{format_error_human, StructuredError};
use hep_common::{Error, OutputFormat, RunId};
use hep_core::config::{load_config, ConfigError, ConfigOptions, ConfigSource, ResolvedConfig};
use hep_core::event_format::{read_events, write_events, write_events_file};
use hep_core::exit_codes::ExitCode;
use hep_core::goodness_of_fit::process_shape_test;
use hep_core::log_event;
use hep_core::logging::{event_names, init_logging, LogConfig, LogContext, LogFormat, LogLevel, Stage};
use hep_core::observable::Observable;
use hep_core::process::ProcessModel;
use hep_core::{ComparisonSample, Event, EventGenerator, LeptonPairProcess, PairedTest, ParticleRegistry, TrackBuilder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::field::display;

/// Histogram bins for the angular shape check in generate summaries.
const SHAPE_TEST_BINS: usize = 20;

/// hep-sim - toy Monte Carlo event generation and validation
#[derive(Parser)]
#[command(name = "hep-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Override config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Particle catalog file (overrides the config directory)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Process descriptor file (overrides the config directory)
    #[arg(long, global = true)]
    process: Option<PathBuf>,

    /// Generator settings file (overrides the config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate events and write them in the text event format
    Generate(GenerateArgs),

    /// Compare two event files with a paired significance test
    Compare(CompareArgs),

    /// Generate events and print reconstructed track summaries
    Tracks(TracksArgs),

    /// List the loaded particle catalog
    Catalog,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Generate(_) => "generate",
            Commands::Compare(_) => "compare",
            Commands::Tracks(_) => "tracks",
            Commands::Catalog => "catalog",
        }
    }
}

// ============================================================================
// Command argument structs
// ============================================================================

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of events (default: generator settings)
    #[arg(long, short = 'n')]
    events: Option<u32>,

    /// RNG seed (default: generator settings, else random)
    #[arg(long)]
    seed: Option<u64>,

    /// Override the center-of-mass energy in GeV
    #[arg(long)]
    sqrt_s: Option<f64>,

    /// Write events to FILE and print a run summary instead
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Our event file
    ours: PathBuf,

    /// Reference event file
    reference: PathBuf,

    /// PDG code of the particle supplying the observable
    #[arg(long, allow_hyphen_values = true)]
    pdg: Option<i32>,

    /// Test strategy (student-t, normal)
    #[arg(long)]
    strategy: Option<PairedTest>,

    /// Observable to compare (cos_theta, pt, eta, phi, energy)
    #[arg(long, default_value = "cos_theta")]
    observable: Observable,
}

#[derive(Args, Debug)]
struct TracksArgs {
    /// Number of events (default: generator settings)
    #[arg(long, short = 'n')]
    events: Option<u32>,

    /// RNG seed (default: generator settings, else random)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let cli_level = if cli.global.quiet || cli.global.verbose > 0 {
        Some(LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet))
    } else {
        None
    };
    init_logging(
        &LogConfig::from_env(cli_level, cli.global.log_format).with_color(!cli.global.no_color),
    );

    let ctx = LogContext::default();
    log_event!(
        ctx,
        INFO,
        event_names::RUN_STARTED,
        Stage::Init,
        format!("hep-core {}", cli.command.name()),
        command = cli.command.name(),
        version = env!("CARGO_PKG_VERSION")
    );

    let exit_code = match &cli.command {
        Commands::Generate(args) => run_generate(&cli.global, &ctx, args),
        Commands::Compare(args) => run_compare(&cli.global, &ctx, args),
        Commands::Tracks(args) => run_tracks(&cli.global, &ctx, args),
        Commands::Catalog => run_catalog(&cli.global, &ctx),
    };

    log_event!(
        ctx,
        INFO,
        event_names::RUN_FINISHED,
        Stage::Report,
        format!("hep-core {} finished", cli.command.name()),
        exit_code = exit_code.code_name()
    );
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_generate(global: &GlobalOpts, ctx: &LogContext, args: &GenerateArgs) -> ExitCode {
    let config = match load(global, ctx) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let seed = args.seed.or(config.settings.seed).unwrap_or_else(rand::random);
    let ctx = ctx.clone().with_seed(Some(seed));
    let n = args.events.unwrap_or(config.settings.events);

    let result = (|| -> hep_common::Result<serde_json::Value> {
        let registry = config.registry()?;
        let descriptor = match args.sqrt_s {
            Some(sqrt_s) => config.process.clone().with_sqrt_s(sqrt_s)?,
            None => config.process.clone(),
        };
        let process = LeptonPairProcess::from_descriptor(&descriptor, &registry)?;
        let (events, stats) = generate(&config, &process, &registry, &ctx, seed, n)?;

        match &args.output {
            None => {
                write_events(std::io::stdout().lock(), &events)?;
                Ok(serde_json::Value::Null)
            }
            Some(path) => {
                write_events_file(path, &events)?;
                let cos_theta: Vec<f64> = events
                    .iter()
                    .map(|e| e.outgoing()[0].momentum().cos_theta())
                    .collect();
                let shape = if cos_theta.is_empty() {
                    None
                } else {
                    Some(process_shape_test(&process, &cos_theta, SHAPE_TEST_BINS)?)
                };
                Ok(serde_json::json!({
                    "run_id": ctx.run_id,
                    "generated_at": chrono::Utc::now().to_rfc3339(),
                    "status": "ok",
                    "process": process.name(),
                    "sqrt_s": process.sqrt_s(),
                    "cross_section_nb": process.total_cross_section(),
                    "seed": seed,
                    "events": events.len(),
                    "output": path,
                    "sampling": {
                        "attempts": stats.attempts,
                        "accepted": stats.accepted,
                        "acceptance_rate": stats.acceptance_rate(),
                    },
                    "shape_test": shape,
                }))
            }
        }
    })();

    match result {
        Ok(serde_json::Value::Null) => ExitCode::Clean,
        Ok(summary) => {
            match global.format {
                OutputFormat::Json => println!("{}", to_pretty(&summary)),
                OutputFormat::Human => {
                    println!("Process:      {}", summary["process"].as_str().unwrap_or_default());
                    println!("Events:       {} (seed {})", summary["events"], seed);
                    println!("Output:       {}", summary["output"].as_str().unwrap_or_default());
                    println!("Cross section: {} nb", summary["cross_section_nb"]);
                    println!(
                        "Acceptance:   {}",
                        summary["sampling"]["acceptance_rate"]
                    );
                    if let Some(p) = summary["shape_test"]["p_value"].as_f64() {
                        println!("Shape check:  p = {:.4}", p);
                    }
                }
            }
            ExitCode::Clean
        }
        Err(err) => output_error(global, &err),
    }
}

fn run_compare(global: &GlobalOpts, ctx: &LogContext, args: &CompareArgs) -> ExitCode {
    let strategy = args.strategy.unwrap_or_else(PairedTest::preferred);
    log_event!(
        ctx,
        INFO,
        event_names::COMPARE_STARTED,
        Stage::Compare,
        format!(
            "Comparing {} against {}",
            args.ours.display(),
            args.reference.display()
        ),
        strategy = display(strategy),
        observable = display(args.observable)
    );

    let result = (|| -> hep_common::Result<_> {
        let ours = read_events(&args.ours)?;
        let reference = read_events(&args.reference)?;
        let sample = ComparisonSample::from_events(
            ours.iter().map(|e| e.particles.as_slice()),
            reference.iter().map(|e| e.particles.as_slice()),
            args.observable,
            args.pdg,
        )?;
        strategy.run(&sample)
    })();

    let result = match result {
        Ok(r) => r,
        Err(err) => return output_error(global, &err),
    };

    log_event!(
        ctx,
        INFO,
        event_names::COMPARE_RESULT,
        Stage::Report,
        format!("{} ({:.2} sigma)", result.level, result.sigma),
        p_value = result.p_value,
        significant = result.significant
    );

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "run_id": ctx.run_id,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "status": "ok",
                "ours": args.ours,
                "reference": args.reference,
                "observable": args.observable,
                "target_pdg": args.pdg,
                "result": result,
            });
            println!("{}", to_pretty(&response));
        }
        OutputFormat::Human => println!("{}", result),
    }

    if result.significant {
        ExitCode::Significant
    } else {
        ExitCode::Clean
    }
}

fn run_tracks(global: &GlobalOpts, ctx: &LogContext, args: &TracksArgs) -> ExitCode {
    let config = match load(global, ctx) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let seed = args.seed.or(config.settings.seed).unwrap_or_else(rand::random);
    let ctx = ctx.clone().with_seed(Some(seed));
    let n = args.events.unwrap_or(config.settings.events);

    let events = match (|| -> hep_common::Result<Vec<Event>> {
        let registry = config.registry()?;
        let process = config.process_model(&registry)?;
        generate(&config, &process, &registry, &ctx, seed, n).map(|(events, _)| events)
    })() {
        Ok(events) => events,
        Err(err) => return output_error(global, &err),
    };

    let tracks = TrackBuilder::build_for_events(&events);
    log_event!(
        ctx,
        INFO,
        event_names::TRACKS_BUILT,
        Stage::Reconstruct,
        format!("Built {} tracks from {} events", tracks.len(), events.len()),
        tracks = tracks.len() as u64
    );

    match global.format {
        OutputFormat::Json => {
            let summaries: Vec<_> = tracks.iter().map(|t| t.summary()).collect();
            let response = serde_json::json!({
                "run_id": ctx.run_id,
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "status": "ok",
                "seed": seed,
                "events": events.len(),
                "tracks": summaries,
            });
            println!("{}", to_pretty(&response));
        }
        OutputFormat::Human => {
            println!("{:<7} {:>4} {:>10} {:>10}  PDG", "EVENT", "LEN", "AVG_PT", "LENGTH");
            for track in &tracks {
                let codes: Vec<String> = track.particles().iter().map(|p| p.pdg().to_string()).collect();
                println!(
                    "{:<7} {:>4} {:>10.3} {:>10.3}  {}",
                    track.event_id().to_string(),
                    track.len(),
                    track.average_pt(),
                    track.length(),
                    codes.join(",")
                );
            }
        }
    }

    ExitCode::Clean
}

fn run_catalog(global: &GlobalOpts, ctx: &LogContext) -> ExitCode {
    let config = match load(global, ctx) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let registry = match config.registry() {
        Ok(r) => r,
        Err(err) => return output_error(global, &err),
    };

    match global.format {
        OutputFormat::Json => {
            let particles: Vec<_> = registry
                .iter()
                .map(|kind| {
                    serde_json::json!({
                        "name": kind.name(),
                        "pdg": kind.pdg(),
                        "category": kind.category(),
                        "mass": kind.mass(),
                        "charge": kind.charge(),
                        "stable": kind.is_stable(),
                        "decay_modes": kind.decay_modes().len(),
                    })
                })
                .collect();
            let response = serde_json::json!({
                "status": "ok",
                "config": config.snapshot(),
                "particles": particles,
            });
            println!("{}", to_pretty(&response));
        }
        OutputFormat::Human => {
            for kind in registry.iter() {
                println!("{}", kind);
            }
        }
    }

    ExitCode::Clean
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolve configuration from the global flags, reporting failures.
fn load(global: &GlobalOpts, ctx: &LogContext) -> Result<ResolvedConfig, ExitCode> {
    let options = ConfigOptions {
        config_dir: global.config.clone(),
        catalog_path: global.catalog.clone(),
        process_path: global.process.clone(),
        generator_path: global.settings.clone(),
    };

    match load_config(&options) {
        Ok(config) => {
            let defaults: Vec<&str> = [
                ("catalog", config.paths.catalog_source),
                ("process", config.paths.process_source),
                ("settings", config.paths.generator_source),
            ]
            .iter()
            .filter(|(_, source)| *source == ConfigSource::BuiltinDefault)
            .map(|(name, _)| *name)
            .collect();
            if !defaults.is_empty() {
                log_event!(
                    ctx,
                    INFO,
                    event_names::CONFIG_DEFAULT_USED,
                    Stage::Init,
                    format!("Using built-in {}", defaults.join(", ")),
                    files = display(defaults.join(","))
                );
            }
            log_event!(
                ctx,
                DEBUG,
                event_names::CONFIG_LOADED,
                Stage::Init,
                "Configuration resolved",
                catalog = display(config.paths.catalog_source),
                process = display(config.paths.process_source),
                settings = display(config.paths.generator_source)
            );
            Ok(config)
        }
        Err(err) => {
            log_event!(
                ctx,
                ERROR,
                event_names::CONFIG_ERROR,
                Stage::Init,
                err.to_string()
            );
            Err(output_config_error(global, &err))
        }
    }
}

/// Run the generator with the resolved settings.
fn generate<P: ProcessModel + ?Sized>(
    config: &ResolvedConfig,
    process: &P,
    registry: &ParticleRegistry,
    ctx: &LogContext,
    seed: u64,
    n: u32,
) -> hep_common::Result<(Vec<Event>, hep_core::SamplingStats)> {
    let mut generator = EventGenerator::new(process, registry, StdRng::seed_from_u64(seed))?
        .with_max_attempts(config.settings.max_attempts)
        .with_log_context(ctx.clone());
    generator.run(n)?;
    let stats = generator.stats();
    Ok((generator.into_events(), stats))
}

fn use_color(global: &GlobalOpts) -> bool {
    !global.no_color && std::io::stderr().is_terminal()
}

fn to_pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Output a library error and return the matching exit code.
fn output_error(global: &GlobalOpts, error: &Error) -> ExitCode {
    let exit_code = ExitCode::from(error);

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "run_id": RunId::new().to_string(),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "status": "error",
                "exit_code": exit_code.code_name(),
                "error": StructuredError::from(error),
            });
            eprintln!("{}", to_pretty(&response));
        }
        OutputFormat::Human => {
            eprintln!("{}", format_error_human(error, use_color(global)));
        }
    }

    exit_code
}

/// Output a configuration error and return the matching exit code.
fn output_config_error(global: &GlobalOpts, error: &ConfigError) -> ExitCode {
    let exit_code = ExitCode::from(error);

    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "run_id": RunId::new().to_string(),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "status": "error",
                "exit_code": exit_code.code_name(),
                "error": {
                    "code": error.code(),
                    "message": error.to_string(),
                }
            });
            eprintln!("{}", to_pretty(&response));
        }
        OutputFormat::Human => {
            eprintln!("config error: {}", error);
        }
    }

    exit_code
}

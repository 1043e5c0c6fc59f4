use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use ttl2shex::config::PodConfig;
use ttl2shex::pod::HttpPod;
use ttl2shex::registry::full_registry;
use ttl2shex::{compare_schemas, match_shape_registries, parse_schema, turtle_to_shape, SkipFlag};

/// Exit code of `compare` when the schemas differ.
const EXIT_MISMATCH: i32 = 2;

/// Derive ShEx shapes from Turtle and match them against Solid registries.
#[derive(Parser)]
#[command(name = "ttl2shex", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Pod configuration file (JSON).
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet output.
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Derive a ShEx schema from a sample Turtle resource.
    Synth {
        input: PathBuf,

        /// Output file path [default: stdout].
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print a ShEx schema as JSON.
    Parse { input: PathBuf },
    /// Compare two ShEx schemas; exits with 2 when they differ.
    Compare { remote: PathBuf, local: PathBuf },
    /// List registrations whose shapes match a local shape.
    Match {
        local_shape: PathBuf,

        /// The local shape is a Turtle sample to derive the shape from.
        #[arg(long)]
        turtle: bool,

        /// Registry to scan [default: the profile registry of the storage].
        #[arg(long, value_name = "URI")]
        registry: Option<String>,
    },
    /// Print the registry tree as JSON.
    Tree {
        #[arg(long, value_name = "URI")]
        registry: Option<String>,
    },
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<PodConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading configuration");
            Ok(PodConfig::load(path)?)
        }
        None => Ok(PodConfig::default()),
    }
}

fn write_output(output: Option<&Path>, text: &str) -> io::Result<()> {
    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    writer.write_all(text.as_bytes())?;
    writer.flush()
}

fn runtime() -> io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}

/// Sets the skip flag on Ctrl-C so a running scan stops at the next stage.
fn skip_on_interrupt(skip: &SkipFlag) {
    let skip = skip.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            skip.store(true, Ordering::SeqCst);
        }
    });
}

/// Returns the process exit code.
fn run(cli: Cli) -> Result<i32, Box<dyn std::error::Error>> {
    match cli.command {
        Command::Synth { input, output } => {
            let turtle = fs::read_to_string(&input)?;
            let shape = turtle_to_shape(&turtle)?;
            write_output(output.as_deref(), &shape)?;
            if !cli.quiet {
                info!(input = %input.display(), "shape derived");
            }
            Ok(0)
        }
        Command::Parse { input } => {
            let schema = parse_schema(&fs::read_to_string(&input)?)?;
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(0)
        }
        Command::Compare { remote, local } => {
            let remote = parse_schema(&fs::read_to_string(&remote)?)?;
            let local = parse_schema(&fs::read_to_string(&local)?)?;
            let outcome = compare_schemas(&remote, &local);
            println!("{}", serde_json::to_string(&outcome)?);
            Ok(if outcome.is_match() { 0 } else { EXIT_MISMATCH })
        }
        Command::Match {
            local_shape,
            turtle,
            registry,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let root = config.registry_uri(registry.as_deref())?;
            let text = fs::read_to_string(&local_shape)?;
            let local = if turtle { turtle_to_shape(&text)? } else { text };
            let pod = HttpPod::from_config(&config)?;

            let matches = runtime()?.block_on(async {
                let skip: SkipFlag = Arc::new(AtomicBool::new(false));
                skip_on_interrupt(&skip);
                match_shape_registries(&pod, &root, &local, &skip).await
            });
            println!("{}", serde_json::to_string_pretty(&matches)?);
            Ok(0)
        }
        Command::Tree { registry } => {
            let config = load_config(cli.config.as_deref())?;
            let root = config.registry_uri(registry.as_deref())?;
            let pod = HttpPod::from_config(&config)?;

            let tree = runtime()?.block_on(full_registry(&pod, &root))?;
            println!("{}", serde_json::to_string_pretty(&tree)?);
            Ok(0)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match run(cli) {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

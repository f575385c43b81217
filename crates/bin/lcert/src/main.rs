//! lcert CLI
//!
//! Certifies zero-free regions of L-functions around an expansion point.
//!
//! ## Usage
//!
//! ```bash
//! # zeta at x = -1 on the real axis, first 100000 prime-power terms
//! lcert riemann --zeros zeros/zeta.txt --column 1 --primes lambda/riemann.txt --tau 5000
//!
//! # zeta high up, with the tail bound, looking for missing zeros
//! lcert riemann --x -2 --y 10000000000000000000000501675.8 \
//!     --shifted-zeros zeros/1e28.zeros --offset 1e28 --lines 10000000 \
//!     --primes lambda/riemann.txt --terms 10000000 --tau 501575.4 \
//!     --tail --completeness --oracle process
//!
//! # Ramanujan tau with a precomputed prime sum
//! lcert ramanujan --zeros zeros/ramanujan.txt \
//!     --prime-sum 0.058326197419819564458801483366 --prime-sum-error 1e-20 --tau 20000
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use lcert::loader::{read_prime_table, read_shifted_zeros, read_zeros};
use lcert::{
    Encoding, ExpansionPoint, Interval, LFunctionKind, MpfrOracle, NumericOracle, Outcome,
    ProcessOracle, VerificationMode, Verifier, VerifierConfig, VerifyRequest, VonMangoldtSource,
    ZeroStore,
};

#[derive(Parser)]
#[command(name = "lcert")]
#[command(about = "Certified zero-free regions for L-functions via the explicit formula")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Riemann zeta function
    Riemann {
        #[command(flatten)]
        run: RunArgs,
    },

    /// L-function of a real Dirichlet character
    Dirichlet {
        /// Fundamental discriminant of the character
        #[arg(long, allow_hyphen_values = true)]
        conductor: i64,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Ramanujan tau L-function
    Ramanujan {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Elliptic curve of conductor 37
    Elliptic {
        #[command(flatten)]
        run: RunArgs,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OracleKind {
    /// in-process MPFR digamma (real axis only)
    Mpfr,
    /// external riemann_digamma / general_digamma programs
    Process,
}

#[derive(Args)]
#[command(group(ArgGroup::new("zero_source").required(true).args(["zeros", "shifted_zeros"])))]
#[command(group(ArgGroup::new("prime_source").required(true).args(["primes", "prime_sum"])))]
struct RunArgs {
    /// Real part of the expansion point (must be negative)
    #[arg(long, default_value = "-1", allow_hyphen_values = true)]
    x: String,

    /// Imaginary part of the expansion point
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    y: String,

    /// Half-width of the zero window around y
    #[arg(long)]
    tau: String,

    /// Zero file, one ordinate per line
    #[arg(long)]
    zeros: Option<PathBuf>,

    /// Column holding the ordinate (0-based)
    #[arg(long, default_value_t = 0, requires = "zeros")]
    column: usize,

    /// Zero file in the shifted two-token format
    #[arg(long, requires = "offset")]
    shifted_zeros: Option<PathBuf>,

    /// Offset added to every shifted ordinate
    #[arg(long, requires = "shifted_zeros")]
    offset: Option<String>,

    /// Maximum number of lines to read from the shifted file
    #[arg(long, default_value_t = usize::MAX, requires = "shifted_zeros")]
    lines: usize,

    /// Prime-power coefficient file
    #[arg(long)]
    primes: Option<PathBuf>,

    /// Number of prime-sum terms
    #[arg(long, default_value_t = 100_000)]
    terms: usize,

    /// Precomputed prime sum
    #[arg(long, allow_hyphen_values = true, requires = "prime_sum_error")]
    prime_sum: Option<String>,

    /// Absolute error of the precomputed prime sum
    #[arg(long, requires = "prime_sum")]
    prime_sum_error: Option<String>,

    /// Include the bounds on zeros outside the window (zeta only)
    #[arg(long)]
    tail: bool,

    /// Search for missing zeros instead of zeros off the critical line
    #[arg(long)]
    completeness: bool,

    /// Digamma evaluator
    #[arg(long, value_enum, default_value_t = OracleKind::Mpfr)]
    oracle: OracleKind,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Working precision in decimal digits (overrides the config file)
    #[arg(long)]
    precision: Option<u32>,

    /// Stop the search at this radius (overrides the config file)
    #[arg(long)]
    max_radius: Option<u64>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(format!("lcert={}", level))
        .with_writer(std::io::stderr)
        .init();

    let (kind, run_args) = match cli.command {
        Commands::Riemann { run } => (LFunctionKind::Riemann, run),
        Commands::Dirichlet { conductor, run } => (LFunctionKind::RealDirichlet { conductor }, run),
        Commands::Ramanujan { run } => (LFunctionKind::Ramanujan, run),
        Commands::Elliptic { run } => (LFunctionKind::Elliptic, run),
    };

    match run(kind, run_args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &RunArgs) -> Result<VerifierConfig> {
    let mut config = match &args.config {
        Some(path) => VerifierConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => VerifierConfig::default(),
    };
    if let Some(digits) = args.precision {
        config.precision_digits = digits;
    }
    if args.max_radius.is_some() {
        config.max_radius = args.max_radius;
    }
    config.validate()?;
    Ok(config)
}

fn load_zeros(args: &RunArgs, config: &VerifierConfig) -> Result<ZeroStore> {
    let prec = config.precision();
    let zeros = match (&args.zeros, &args.shifted_zeros, &args.offset) {
        (Some(path), _, _) => read_zeros(path, args.column, &config.zero_tolerance()?, prec)
            .with_context(|| format!("failed to read zeros from {}", path.display()))?,
        (None, Some(path), Some(offset)) => {
            let offset = Interval::parse(prec, offset).context("invalid --offset")?;
            read_shifted_zeros(
                path,
                &offset,
                args.lines,
                &config.shifted_zero_tolerance()?,
                prec,
            )
            .with_context(|| format!("failed to read zeros from {}", path.display()))?
        }
        _ => anyhow::bail!("either --zeros or --shifted-zeros with --offset is required"),
    };
    Ok(ZeroStore::new(zeros)?)
}

fn load_primes(args: &RunArgs, kind: LFunctionKind) -> Result<VonMangoldtSource> {
    match (&args.primes, &args.prime_sum, &args.prime_sum_error) {
        (Some(path), _, _) => {
            let table = read_prime_table(path, Encoding::for_kind(kind))
                .with_context(|| format!("failed to read primes from {}", path.display()))?;
            Ok(VonMangoldtSource::Table(table))
        }
        (None, Some(value), Some(error)) => Ok(VonMangoldtSource::Precomputed {
            value: value.clone(),
            error: error.clone(),
        }),
        _ => anyhow::bail!("either --primes or --prime-sum with --prime-sum-error is required"),
    }
}

fn run(kind: LFunctionKind, args: RunArgs) -> Result<()> {
    let config = load_config(&args)?;
    let prec = config.precision();

    let request = VerifyRequest {
        point: ExpansionPoint::parse(prec, &args.x, &args.y)?,
        tau: Interval::parse(prec, &args.tau).context("invalid --tau")?,
        terms: args.terms,
        kind,
        mode: if args.completeness {
            VerificationMode::Completeness
        } else {
            VerificationMode::RiemannHypothesis
        },
        include_tail: args.tail,
    };

    let store = load_zeros(&args, &config)?;
    let source = load_primes(&args, kind)?;
    info!(zeros = store.len(), "inputs loaded");

    let oracle: Box<dyn NumericOracle> = match args.oracle {
        OracleKind::Mpfr => Box::new(MpfrOracle),
        OracleKind::Process => Box::new(ProcessOracle::new(&config.oracle)),
    };

    let verifier = Verifier::new(&store, &source, oracle.as_ref(), &config);
    let outcome = verifier.verify(&request)?;
    print_outcome(&request, &outcome);
    Ok(())
}

fn print_outcome(request: &VerifyRequest, outcome: &Outcome) {
    let report = outcome.report();
    let point = &request.point;
    println!(
        "{} at ({}, {}), {}",
        report.kind,
        point.x_literal(),
        point.y_literal(),
        report.mode
    );
    println!("  bound:      {}", report.bound.total.display_digits(10));
    println!("  window:     {} zeros", report.window.len());
    println!("  window sum: {}", report.window_sum.display_digits(10));
    if let Some(tail) = &report.tail {
        println!(
            "  tail:       r = {}, R = {}",
            tail.lower.display_digits(10),
            tail.upper.display_digits(10)
        );
    }
    match outcome {
        Outcome::Certified { radius, .. } => {
            println!("certified radius: {}", radius);
        }
        Outcome::Incomplete { .. } => {
            println!("zero list is incomplete: known zeros and tail fall short of the bound");
        }
    }
}

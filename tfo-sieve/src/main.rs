#![forbid(unsafe_code)]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tfo_sieve_lib::attribution::{Attributor, HttpOracle, PrefixCache};
use tfo_sieve_lib::config::{load_from_path, validate, Config, OracleKind, ReportFormat};
use tfo_sieve_lib::telemetry::init_tracing;
use tfo_sieve_lib::{load_runs, tfo_sieve, AddressFamily, Outcome, Report, Result, SieveError};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Classify paired TCP Fast Open probe runs")]
struct Cli {
    /// Line-delimited JSON probe results; later files only add new destinations
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE", env = "TFO_SIEVE_CONFIG")]
    config: Option<PathBuf>,

    /// Field separating the baseline (0) from the TFO-enabled (1) run
    #[arg(long, value_name = "FIELD")]
    config_column: Option<String>,

    /// Attribution oracle to query on prefix cache misses
    #[arg(long, value_enum)]
    oracle: Option<OracleArg>,

    /// Base URL of the selected oracle
    #[arg(long, value_name = "URL", env = "TFO_SIEVE_ORACLE_URL")]
    oracle_url: Option<String>,

    /// Report format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Address families to sieve; `each` runs all, IPv4 and IPv6 in turn
    #[arg(long, value_enum, default_value_t = FamilyArg::Each)]
    family: FamilyArg,

    /// Dump the rows of an outcome subset (e.g. oddcookie) after the report
    #[arg(long, value_name = "OUTCOME")]
    show: Vec<Outcome>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OracleArg {
    Canid,
    Ripestat,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum FamilyArg {
    All,
    V4,
    V6,
    Each,
}

impl FamilyArg {
    fn views(self) -> Vec<(&'static str, Option<AddressFamily>)> {
        let all = ("All addresses", None);
        let v4 = ("IPv4 only", Some(AddressFamily::V4));
        let v6 = ("IPv6 only", Some(AddressFamily::V6));
        match self {
            FamilyArg::All => vec![all],
            FamilyArg::V4 => vec![v4],
            FamilyArg::V6 => vec![v6],
            FamilyArg::Each => vec![all, v4, v6],
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let cfg = match build_config(&cli) {
        Ok(cfg) => cfg,
        Err(err) => {
            if init_tracing(&Default::default()).is_ok() {
                error!(%err, "failed to load configuration");
            } else {
                eprintln!("failed to load configuration: {err}");
            }
            std::process::exit(1);
        }
    };

    if let Err(err) = init_tracing(&cfg.logging) {
        eprintln!("failed to initialize logging: {err}");
        std::process::exit(1);
    }

    if let Err(err) = run(&cli, &cfg).await {
        error!(%err, "sieve failed");
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut cfg = match &cli.config {
        Some(path) => load_from_path(path)?,
        None => Config::default(),
    };

    if let Some(column) = &cli.config_column {
        cfg.input.config_column = column.clone();
    }
    if let Some(oracle) = cli.oracle {
        cfg.oracle.kind = match oracle {
            OracleArg::Canid => OracleKind::Canid,
            OracleArg::Ripestat => OracleKind::Ripestat,
        };
    }
    if let Some(url) = &cli.oracle_url {
        match cfg.oracle.kind {
            OracleKind::Canid => cfg.oracle.canid_url = url.clone(),
            OracleKind::Ripestat => cfg.oracle.ripestat_url = url.clone(),
        }
    }
    if let Some(format) = cli.format {
        cfg.report.format = match format {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
        };
    }

    validate(&cfg).map_err(SieveError::Config)?;
    Ok(cfg)
}

async fn run(cli: &Cli, cfg: &Config) -> Result<()> {
    let runs = load_runs(cli.inputs.as_slice(), &cfg.input.config_column)?;
    info!(
        inputs = cli.inputs.len(),
        joined = runs.joined.len(),
        misses = runs.misses.len(),
        oracle = cfg.oracle.base_url(),
        "runs ready"
    );

    let attributor = Attributor::new(HttpOracle::with_retries(&cfg.oracle)?, cfg.oracle.on_error);
    let mut cache = PrefixCache::new();
    let mut out = std::io::stdout();

    for (label, family) in cli.family.views() {
        let selected;
        let view = match family {
            Some(family) => {
                selected = runs.select_family(family);
                &selected
            }
            None => &runs,
        };

        let sieve = tfo_sieve(view, &attributor, &mut cache, cfg.report.google_asn).await?;

        match cfg.report.format {
            ReportFormat::Text => {
                writeln!(out, "{label}:")?;
                write!(out, "{}", Report::new(&sieve.counts))?;
            }
            ReportFormat::Json => {
                let line = serde_json::json!({ "view": label, "counts": sieve.counts });
                serde_json::to_writer(&mut out, &line).map_err(std::io::Error::from)?;
                writeln!(out)?;
            }
        }

        for outcome in &cli.show {
            if cfg.report.format == ReportFormat::Text {
                writeln!(out, "# {label}: {outcome}")?;
            }
            sieve.write_rows(*outcome, &mut out)?;
        }
    }

    info!(cached_prefixes = cache.len(), "done");
    Ok(())
}

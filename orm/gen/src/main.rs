//! ORM Class Generator
//!
//! Generates annotated Java persistence classes from a JSON metamodel.

use std::path::PathBuf;

use clap::Parser;
use orm_gen::errors::GeneratorError;
use orm_gen::input::load_metamodel;
use orm_gen::options::{GenerationOptions, HashPolicy};
use orm_gen::output::FsWriter;
use orm_gen::persistence_unit::write_persistence_unit;
use orm_gen::pipeline::run;
use tracing::{info, warn};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// ORM class generator - transforms a metamodel into annotated Java classes
#[derive(Parser, Debug)]
#[command(name = "orm-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Metamodel JSON file
    #[arg(short, long)]
    model: PathBuf,

    /// Output root for generated sources
    #[arg(short, long, default_value = "src/main/java")]
    output: PathBuf,

    /// Directory that receives META-INF/persistence.xml (defaults to the output root)
    #[arg(long)]
    resources: Option<PathBuf>,

    /// Print generated code without writing files
    #[arg(long)]
    dry_run: bool,

    /// Generation options JSON file; flags below override it
    #[arg(long)]
    options: Option<PathBuf>,

    /// Write optional annotation arguments even when they equal their defaults
    #[arg(long)]
    generate_default_values: bool,

    /// Generate property/vetoable change support
    #[arg(long)]
    java_se_support: bool,

    /// How hashCode primes are chosen (per_class, shared_per_run, fixed)
    #[arg(long)]
    hash_policy: Option<HashPolicy>,

    /// Seed for reproducible hashCode primes
    #[arg(long)]
    hash_seed: Option<u64>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn generation_options(&self) -> Result<GenerationOptions, GeneratorError> {
        let mut options = match &self.options {
            Some(path) => GenerationOptions::from_file(path)?,
            None => GenerationOptions::default(),
        };
        options.generate_default_values |= self.generate_default_values;
        options.java_se_support |= self.java_se_support;
        if let Some(policy) = self.hash_policy {
            options.hash_policy = policy;
        }
        if self.hash_seed.is_some() {
            options.hash_seed = self.hash_seed;
        }
        Ok(options)
    }
}

fn init_tracing(verbose: u8) {
    let base_filter = match std::env::var("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => match verbose {
            0 => "warn".to_string(),
            // -v: stages and classes
            1 => "warn,orm_gen=info".to_string(),
            // -vv: memoization and ordering
            2 => "info,orm_gen=debug".to_string(),
            _ => "debug,orm_gen=trace".to_string(),
        },
    };

    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(verbose >= 4)
                .with_line_number(verbose >= 4)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = cli.generation_options()?;
    let model = load_metamodel(&cli.model)?;
    info!(
        model = %cli.model.display(),
        output = %cli.output.display(),
        dry_run = cli.dry_run,
        "Generating classes"
    );

    let mut writer = FsWriter::new(&cli.output, cli.dry_run)?;
    let report = run(&model, &options, &mut writer)?;

    if let Some(unit) = &model.persistence_unit {
        let root = cli.resources.as_ref().unwrap_or(&cli.output);
        write_persistence_unit(root, unit, &report.registry, cli.dry_run)?;
    }

    if !cli.dry_run && cli.verbose > 0 {
        eprintln!(
            "Generated {} classes into {}",
            report.written.len(),
            cli.output.display()
        );
    }

    for failure in &report.failures {
        warn!(class = %failure.class, stage = %failure.stage, "Not generated");
    }
    match report.failures.into_iter().next() {
        Some(failure) => Err(failure.error),
        None => Ok(()),
    }
}

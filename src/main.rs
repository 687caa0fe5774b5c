use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use habitable_priority::config::Config;
use habitable_priority::output::{self, ResultsLayout};
use habitable_priority::scoring::{self, MODEL};
use habitable_priority::{diagnostics, log_info, pipeline, reference, validation};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_OUTPUT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score the catalog, write results and cross-check (default if no subcommand)
    Rank,
    /// Recompute the ranking and compare it with the stored scored table
    Validate,
    /// Remove cached reference-download metadata
    ClearCache,
}

#[derive(Parser, Debug)]
#[command(name = "habitable-priority")]
#[command(about = "Rank confirmed exoplanets for habitability follow-up", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/habitable-priority/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Planetary-systems catalog CSV (overrides config)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory for scored tables and reports (overrides config)
    #[arg(long, global = true)]
    results_dir: Option<PathBuf>,

    /// Skip the reference download and use the local copy only
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    diagnostics::set_verbose(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Rank);
    let start_time = Instant::now();

    let mut config = match habitable_priority::config::load_config(cli.config.map(PathBuf::from)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if cli.catalog.is_some() {
        config.catalog = cli.catalog;
    }
    if cli.results_dir.is_some() {
        config.results_dir = cli.results_dir;
    }

    if let Err(errors) = config.validate() {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // The shipped model constants must be consistent before anything is scored
    if let Err(errors) = scoring::validate_model(&MODEL) {
        eprintln!("Scoring model errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let code = match command {
        Commands::Rank => run_rank(&config, cli.offline).await,
        Commands::Validate => run_validate(&config),
        Commands::ClearCache => match reference::clear_cache() {
            Ok(()) => {
                println!("Reference cache cleared.");
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to clear cache: {:#}", e);
                EXIT_OUTPUT
            }
        },
    };

    log_info!("Finished in {:?}", start_time.elapsed());
    std::process::exit(code);
}

async fn run_rank(config: &Config, offline: bool) -> i32 {
    // Hold warnings until the table has been printed
    diagnostics::activate();

    let ranked = match pipeline::rank_catalog_file(&config.catalog_path(), &MODEL) {
        Ok(r) => r,
        Err(e) => {
            flush_warnings();
            eprintln!("Error: {:#}", e);
            return EXIT_INPUT;
        }
    };

    let layout = ResultsLayout::new(config.results_dir());
    let top_n = config.top_n();
    let written = output::write_score_table(&layout.scores_path(), &ranked.scored)
        .and_then(|_| output::write_top_markdown(&layout.top_path(), &ranked.scored, top_n));
    if let Err(e) = written {
        flush_warnings();
        eprintln!("Failed to write results: {:#}", e);
        return EXIT_OUTPUT;
    }
    log_info!("Wrote {}", layout.scores_path().display());
    log_info!("Wrote {}", layout.top_path().display());

    // Validated at startup, so this only fails if the config changed since
    let source = match config.reference() {
        Ok(r) => reference::load_reference(&r, offline).await,
        Err(e) => reference::ReferenceSource::Unavailable {
            reason: format!("{:#}", e),
        },
    };
    log_info!("Reference catalog: {}", source.describe());

    let comparison = reference::cross_check_source(&ranked.scored, &source, config.crosscheck_top_k);
    let match_line = match &comparison {
        Some(rows) => {
            if let Err(e) = output::write_comparison(&layout.comparison_path(), rows) {
                flush_warnings();
                eprintln!("Failed to write comparison: {:#}", e);
                return EXIT_OUTPUT;
            }
            format!(
                "{} of {} cross-checked planets appear in the reference catalog ({})",
                reference::count_matches(rows),
                rows.len(),
                source.describe()
            )
        }
        None => {
            if let Err(e) = output::remove_comparison(&layout.comparison_path()) {
                flush_warnings();
                eprintln!("{:#}", e);
                return EXIT_OUTPUT;
            }
            format!("Cross-check skipped: reference {}", source.describe())
        }
    };

    let use_colors = output::should_use_colors();
    println!("{}", output::format_ranked_table(&ranked.scored, top_n, use_colors));
    println!();
    println!(
        "{}",
        output::format_summary(ranked.scored.len(), ranked.high_priority_count())
    );
    println!("{}", match_line);

    flush_warnings();
    EXIT_SUCCESS
}

fn run_validate(config: &Config) -> i32 {
    let layout = ResultsLayout::new(config.results_dir());
    let report =
        validation::validate_priority_table(&config.catalog_path(), &layout.scores_path(), &MODEL);

    if let Err(e) = output::write_validation_reports(
        &layout.report_json_path(),
        &layout.report_md_path(),
        &report,
    ) {
        eprintln!("Failed to write validation report: {:#}", e);
        return EXIT_OUTPUT;
    }
    log_info!("Wrote {}", layout.report_json_path().display());

    println!(
        "{}",
        output::format_validation_report(&report, output::should_use_colors())
    );
    EXIT_SUCCESS
}

fn flush_warnings() {
    for msg in diagnostics::drain() {
        eprintln!("{}", msg);
    }
}

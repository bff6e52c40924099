use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use num_bigint::BigUint;
use rare_finder::{
    is_perfect_square, resume_search, reverse_number, search_lengths, SearchCheckpoint,
    SearchConfig, SearchEvent,
};
use std::fs::File;
use std::io::Write;
use std::time::Instant;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[command(name = "rare-finder")]
#[command(about = "Enumerate rare numbers: n where n + reverse(n) and n - reverse(n) are both perfect squares", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Stream rare numbers over a range of digit lengths")]
    Search {
        #[arg(long, value_name = "DIGITS", default_value = "2", help = "First digit length to search")]
        start: u32,

        #[arg(long, value_name = "DIGITS", help = "Last digit length to search (inclusive); omit to search without bound")]
        end: Option<u32>,

        #[arg(short, long, help = "Print a marker before each digit length")]
        verbose: bool,

        #[arg(short, long, help = "Output file for results (JSON); bounded runs only")]
        output: Option<String>,

        #[arg(long, help = "Disable parallel skeleton processing")]
        no_parallel: bool,

        #[arg(short = 'c', long, help = "Save checkpoint every N completed lengths (0 disables)")]
        checkpoint_interval: Option<u32>,

        #[arg(short = 'f', long, help = "Checkpoint file path")]
        checkpoint_file: Option<String>,

        #[arg(long, help = "Ignore an existing checkpoint and start fresh")]
        force_restart: bool,
    },

    #[command(about = "Test a single number for the rare property")]
    Test {
        #[arg(help = "The number to test")]
        number: String,
    },

    #[command(about = "Run timed sweeps over a few known digit lengths")]
    Benchmark,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            start,
            end,
            verbose,
            output,
            no_parallel,
            checkpoint_interval,
            checkpoint_file,
            force_restart,
        } => {
            search_command(
                start,
                end,
                verbose,
                output,
                !no_parallel,
                checkpoint_interval,
                checkpoint_file,
                force_restart,
            );
        }
        Commands::Test { number } => {
            test_command(&number);
        }
        Commands::Benchmark => {
            run_benchmark();
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn search_command(
    start: u32,
    end: Option<u32>,
    verbose: bool,
    output_file: Option<String>,
    parallel: bool,
    checkpoint_interval: Option<u32>,
    checkpoint_file: Option<String>,
    force_restart: bool,
) {
    // Checkpointing engages when either checkpoint flag is present.
    let checkpointing = checkpoint_interval.is_some() || checkpoint_file.is_some();
    let checkpoint_interval = match checkpoint_interval {
        Some(0) => None,
        Some(n) => Some(n),
        None if checkpointing => Some(1),
        None => None,
    };
    let checkpoint_file = if checkpointing {
        Some(checkpoint_file.unwrap_or_else(|| {
            match end {
                Some(e) => format!("rare_checkpoint_{}_{}.json", start, e),
                None => format!("rare_checkpoint_{}_unbounded.json", start),
            }
        }))
    } else {
        None
    };

    let checkpoint_file = if parallel && checkpointing {
        eprintln!("Warning: Checkpoints are not supported with parallel processing. Disabling checkpoints.");
        None
    } else {
        checkpoint_file
    };

    if let Some(ref file) = checkpoint_file {
        if !parallel && std::path::Path::new(file).exists() {
            if force_restart {
                eprintln!("Deleting existing checkpoint (--force-restart)...");
                if let Err(e) = std::fs::remove_file(file) {
                    eprintln!("Warning: Could not delete checkpoint file: {}", e);
                }
            } else if let Ok(checkpoint) = SearchCheckpoint::load(file) {
                eprintln!(
                    "Resuming from checkpoint: {} lengths completed, next length {} (saved {})",
                    checkpoint.lengths_completed, checkpoint.next_length, checkpoint.timestamp
                );
                for n in &checkpoint.found {
                    println!("{}", n);
                }
                let results = resume_search(checkpoint, false, |event| {
                    report_event(event, verbose);
                });
                finish_search(results, output_file, checkpoint_file.as_deref());
                return;
            }
        }
    }

    let config = SearchConfig {
        start,
        end,
        parallel,
        checkpoint_interval: if parallel { None } else { checkpoint_interval },
        checkpoint_file: if parallel { None } else { checkpoint_file.clone() },
    };

    let results = search_lengths(config, |event| {
        report_event(event, verbose);
    });
    finish_search(results, output_file, checkpoint_file.as_deref());
}

fn report_event(event: SearchEvent, verbose: bool) {
    match event {
        SearchEvent::LengthStarted(length) => {
            if verbose {
                println!("{} digits...", length);
            }
        }
        SearchEvent::Found(n) => {
            println!("{}", n);
        }
        SearchEvent::CheckpointSaved(length) => {
            eprintln!("Checkpoint saved after {}-digit sweep", length);
        }
    }
}

fn finish_search(
    results: Result<Vec<BigUint>, rare_finder::RareError>,
    output_file: Option<String>,
    checkpoint_file: Option<&str>,
) {
    let found = match results {
        Ok(found) => found,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(filename) = output_file {
        save_results_to_file(&found, &filename);
    }

    // The run finished; its checkpoint is stale.
    if let Some(file) = checkpoint_file {
        if std::path::Path::new(file).exists() {
            if let Err(e) = std::fs::remove_file(file) {
                eprintln!("Warning: Could not delete checkpoint file: {}", e);
            }
        }
    }
}

fn save_results_to_file(found: &[BigUint], filename: &str) {
    let numbers: Vec<String> = found.iter().map(|n| n.to_string()).collect();
    match serde_json::to_string_pretty(&numbers) {
        Ok(json) => match File::create(filename) {
            Ok(mut file) => {
                if let Err(e) = file.write_all(json.as_bytes()) {
                    eprintln!("Error writing to file: {}", e);
                } else {
                    eprintln!("Results saved to: {}", filename);
                }
            }
            Err(e) => eprintln!("Error creating file: {}", e),
        },
        Err(e) => eprintln!("Error serializing results: {}", e),
    }
}

fn test_command(number_str: &str) {
    let number: BigUint = match number_str.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("Error: Invalid number '{}'", number_str);
            std::process::exit(1);
        }
    };

    let reversed = reverse_number(&number);
    println!("Testing number: {}", number);
    println!("Reverse:        {}", reversed);
    println!();

    if reversed >= number {
        if reversed == number {
            println!("Result: NOT RARE (palindrome; reverse(n) must be smaller than n)");
        } else {
            println!("Result: NOT RARE (reverse exceeds n; the canonical orientation is n > reverse(n))");
        }
        return;
    }

    let sum = &number + &reversed;
    let diff = &number - &reversed;
    let sum_square = is_perfect_square(&sum);
    let diff_square = is_perfect_square(&diff);

    println!(
        "n + reverse(n) = {} ({})",
        sum,
        if sum_square { "perfect square" } else { "not a square" }
    );
    println!(
        "n - reverse(n) = {} ({})",
        diff,
        if diff_square { "perfect square" } else { "not a square" }
    );
    println!();

    if sum_square && diff_square {
        println!("Result: RARE NUMBER");
    } else {
        println!("Result: NOT RARE");
    }
}

fn run_benchmark() {
    println!("Running benchmarks...\n");

    for digits in [6u32, 7, 8] {
        let start_time = Instant::now();
        let found = search_lengths(
            SearchConfig {
                start: digits,
                end: Some(digits),
                parallel: false,
                checkpoint_interval: None,
                checkpoint_file: None,
            },
            |_| {},
        )
        .unwrap_or_default();
        let elapsed = start_time.elapsed();

        println!("Sequential sweep, {} digits:", digits);
        println!("  Rare numbers found: {}", found.len());
        println!("  Time: {:.3}s\n", elapsed.as_secs_f64());
    }

    println!("Parallel sweep, 9 digits:");
    let start_time = Instant::now();
    let found = search_lengths(
        SearchConfig {
            start: 9,
            end: Some(9),
            parallel: true,
            checkpoint_interval: None,
            checkpoint_file: None,
        },
        |_| {},
    )
    .unwrap_or_default();
    let elapsed = start_time.elapsed();
    println!("  Rare numbers found: {}", found.len());
    println!("  Time: {:.3}s", elapsed.as_secs_f64());
}

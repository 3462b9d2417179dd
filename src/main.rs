//! # chatstat CLI
//!
//! Command-line interface for the chatstat library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatstat::ChatstatError;
use chatstat::analysis::{analyze_file, write_outputs};
use chatstat::cli::{Args, LogLevel};
use chatstat::core::stats::{format_duration, format_float};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.log_level);

    match run(&args) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    }
}

/// RUST_LOG wins over `--log-level` when set.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Returns `Ok(false)` when the analysis succeeded but an output failed.
fn run(args: &Args) -> Result<bool, ChatstatError> {
    let total_start = Instant::now();
    let config = args.to_config()?;

    // Print header
    println!("📊 chatstat v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", config.input_path.display());
    println!("💾 Output:  {}", config.output_dir.display());
    println!("⏱️  Cutoff:  {}h", format_float(config.response_timelimit_hours));
    if !config.enable_plots {
        println!("🖼️  Plots:   disabled");
    }
    println!();

    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let analysis = analyze_file(&config.input_path, &config)?;
    println!(
        "   Found {} messages from {} senders over {} days ({:.2}s)",
        analysis.records.len(),
        analysis.summary.senders.len(),
        analysis.summary.distinct_days,
        parse_start.elapsed().as_secs_f64()
    );

    println!("💾 Writing outputs...");
    let write_start = Instant::now();
    let report = write_outputs(&analysis, &config);
    for path in &report.written {
        println!("   ✓ {}", path.display());
    }
    for failure in &report.failures {
        eprintln!("   ✗ {}", failure);
    }
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    // Summary
    println!();
    println!("📈 Summary:");
    for sender in &analysis.summary.senders {
        println!("   {}:", sender.sender);
        println!("      Messages:          {}", sender.message_count);
        println!(
            "      Avg response time: {}",
            sender
                .average_response_time
                .map(format_duration)
                .unwrap_or_else(|| "-".to_string())
        );
        println!("      Avg length:        {} chars", sender.average_message_length);
        println!(
            "      Messages per day:  {}",
            format_float(sender.average_messages_per_day)
        );
    }
    for ratio in &analysis.summary.ratios {
        println!("   {}: {}", ratio.label, format_float(ratio.ratio));
    }

    println!();
    if report.is_success() {
        println!(
            "✅ Done in {:.2}s",
            total_start.elapsed().as_secs_f64()
        );
    } else {
        println!(
            "⚠️  Finished with {} failed output(s)",
            report.failures.len()
        );
    }

    Ok(report.is_success())
}

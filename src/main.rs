use clap::Parser;
use grim_checker::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // anyhow's alternate format prints the full error chain, table errors
    // included
    let result: anyhow::Result<()> = commands::run(args).map_err(Into::into);
    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {error:#}");
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("GRIM Checker - Consistency Tests for Reported Means");
    println!("===================================================");
    println!();
    println!("Check whether reported sample means are mathematically achievable");
    println!("given their sample sizes and disclosed decimal precision.");
    println!();
    println!("USAGE:");
    println!("    grim-checker <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    scalar      Check a single reported mean against a sample size");
    println!("    map         Check every row of a CSV file of reported means");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Check one reported mean (quote it to keep trailing zeros):");
    println!("    grim-checker scalar \"5.19\" 40");
    println!();
    println!("    # Check a CSV with means in column 'x' and sizes in column 'n':");
    println!("    grim-checker map --input means.csv --x-col x --n-col n");
    println!();
    println!("    # Percentages, machine-readable output:");
    println!("    grim-checker map --input means.csv --x-col 2 --n-col 1 \\");
    println!("                     --percent --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    grim-checker <COMMAND> --help");
}

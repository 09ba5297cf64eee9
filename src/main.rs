// ptrbox: box-simulation interpreter for C pointer teaching

use std::fs;
use std::path::Path;

use colored::Colorize;

use ptrbox::interpreter::classify::{classify_source, LineClass};
use ptrbox::interpreter::runner::run_source;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        let program_name = args.first().map(|s| s.as_str()).unwrap_or("ptrbox");
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <file.c>", program_name);
        eprintln!();
        eprintln!("Runs a pointer-teaching program and prints the final");
        eprintln!("memory boxes, with a per-line gutter showing how each");
        eprintln!("line classifies (ok / incomplete / invalid / UB).");
        std::process::exit(1);
    }

    let input_file = &args[1];

    if !Path::new(input_file).exists() {
        eprintln!("Error: File '{}' not found", input_file);
        std::process::exit(1);
    }

    let source = fs::read_to_string(input_file)?;

    // Gutter view: the same classification the live editor would show
    let reports = classify_source(&source);
    for (report, line) in reports.iter().zip(source.lines()) {
        let marker = match report.class {
            LineClass::Ok => "  ok".green(),
            LineClass::Incomplete => "  ..".yellow(),
            LineClass::Invalid => " err".red(),
            LineClass::Ub => "  UB".magenta(),
        };
        println!("{} | {}", marker, line);
        if let Some(message) = &report.message {
            println!("     | {}", message.red());
        }
    }
    println!();

    // Final state, when the whole program runs
    match run_source(&source) {
        Ok(store) => {
            println!(
                "{:<10} {:<8} {:<12} {}",
                "address".bold(),
                "type".bold(),
                "value".bold(),
                "names".bold()
            );
            for b in store.boxes() {
                println!(
                    "0x{:<8x} {:<8} {:<12} {}",
                    b.address,
                    b.box_type.to_string(),
                    b.slot.to_string(),
                    b.names.join(", ")
                );
            }
        }
        Err(e) => {
            eprintln!(
                "{} at line {}: {}",
                format!("{} fault", e.fault.kind()).red().bold(),
                e.index + 1,
                e.fault
            );
            std::process::exit(1);
        }
    }

    Ok(())
}

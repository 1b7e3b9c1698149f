use gedcom_reader::{open, DecodeErrors};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-ged-file> [--errors strict|ignore|replace]", args[0]);
        std::process::exit(1);
    }

    let ged_path = &args[1];
    let mut mode = DecodeErrors::default();
    // Parse --errors argument
    if let Some(errors_idx) = args.iter().position(|arg| arg == "--errors") {
        match args.get(errors_idx + 1).map(|s| s.parse::<DecodeErrors>()) {
            Some(Ok(parsed)) => mode = parsed,
            Some(Err(e)) => {
                eprintln!("ERROR: {}", e);
                std::process::exit(1);
            }
            None => {
                eprintln!("ERROR: --errors flag requires an argument.");
                std::process::exit(1);
            }
        }
    }

    let mut lines = match open(ged_path, mode) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("\nERROR: Failed to open GEDCOM file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    let mut count = 0u64;
    for result in lines.by_ref() {
        match result {
            Ok(line) => {
                count += 1;
                println!("{}{}", "  ".repeat(line.level as usize), line);
            }
            Err(e) => {
                eprintln!("\nERROR: Failed to read GEDCOM file after {} lines", count);
                eprintln!("  {}", e);
                std::process::exit(1);
            }
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Codec: {}", lines.codec());
    println!("Lines: {}", count);
}

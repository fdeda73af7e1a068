//! # Tradeskill
//!
//! Estimates the cost of leveling a crafting profession.
//!
//! ## Usage
//!
//! ```bash
//! tradeskill engineering 300 375 res/Prices.toml -s Gnomish -e "Turbo-Charged Flying Machine"
//! ```

use tradeskill::{parse, run, Command, USAGE};

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         TRADESKILL                                               ║");
    println!("║         PROFESSION LEVELING ESTIMATOR                            ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse(&args) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return;
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let stdout = std::io::stdout();
    if let Err(e) = run(&args, &mut stdout.lock()) {
        eprintln!("   ✗ FATAL: {e}");
        std::process::exit(1);
    }
}

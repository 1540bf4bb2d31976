//! Shared CLI helpers — response printing, version banner.

use colored::Colorize;

/// Print an agent response to stdout.
pub fn print_response(response: &str) {
    println!();
    println!("{}", "⚗ Reagent".cyan().bold());
    if response.is_empty() {
        println!("{}", "(no response)".dimmed());
    } else {
        println!("{response}");
    }
    println!();
}

/// Print the banner shown at chat start.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "⚗ Reagent".cyan().bold(), version.dimmed());
    println!(
        "{}",
        "Type a message, \"reset\" to clear history, or \"exit\" to quit.".dimmed()
    );
    println!();
}

/// Print a "thinking" placeholder while the agent works.
pub fn print_thinking() {
    eprint!("{}", "⠿ thinking...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}

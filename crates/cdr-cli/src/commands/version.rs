//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - near-Clifford training circuits for Clifford data regression",
        style("cdr").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  cdr-ir     Circuit representation");
    println!("  cdr-train  Training-circuit generation");
    println!("  cdr-cli    Command-line interface");
    println!();
    println!("License:   {}", style("Apache-2.0").dim());
}

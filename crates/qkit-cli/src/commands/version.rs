//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - random circuits, reference matrices and display helpers",
        style("qkit").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qkit-ir     Circuit model and native gate table");
    println!("  qkit-tools  Random circuits, matrices, decomposition, display");
    println!("  qkit-cli    Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}

//! Gates command implementation.

use console::style;

use qkit_ir::{NativeKind, ParamDomain};

/// Execute the gates command.
pub fn execute() {
    println!(
        "{} {} native gates:\n",
        style("→").cyan().bold(),
        NativeKind::ALL.len()
    );

    println!(
        "  {}  {}  {}  {}",
        style(format!("{:<6}", "NAME")).bold(),
        style(format!("{:<6}", "QUBITS")).bold(),
        style(format!("{:<8}", "CONTROLS")).bold(),
        style("PARAMETERS").bold()
    );
    println!("  {}", "-".repeat(48));

    for kind in NativeKind::ALL {
        let spec = kind.spec();
        let params: Vec<String> = spec.params.iter().map(describe).collect();
        println!(
            "  {}  {:<6}  {:<8}  {}",
            style(format!("{:<6}", spec.name)).green(),
            spec.num_qubits,
            spec.num_controls,
            if params.is_empty() {
                style("-".to_string()).dim()
            } else {
                style(params.join(", "))
            }
        );
    }
}

fn describe(domain: &ParamDomain) -> String {
    match domain {
        ParamDomain::Angle => "angle in [0, 2π)".to_string(),
        ParamDomain::Level { min, max } => format!("level in [{min}, {max})"),
    }
}

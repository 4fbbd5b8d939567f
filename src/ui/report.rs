//! Final run report
//!
//! Every package is listed with its identity line followed by its messages,
//! then warnings, then errors, each in the order they were recorded.

use console::Style;

use crate::config::Config;
use crate::domain::{Package, Severity};

const TICK: &str = "\u{2714}";
const CAUTION: &str = "\u{26a0}";
const CROSS: &str = "\u{2716}";

/// Aggregate status of a whole run
pub type RunStatus = Severity;

/// Worst status over all packages
pub fn aggregate_status(packages: &[Package]) -> RunStatus {
    packages
        .iter()
        .map(Package::severity)
        .max()
        .unwrap_or(Severity::Success)
}

/// Process exit code for an aggregate status
pub fn exit_code(status: RunStatus, fail_on_warnings: bool) -> i32 {
    match status {
        Severity::Error => 1,
        Severity::Warning if fail_on_warnings => 1,
        Severity::Warning | Severity::Success => 0,
    }
}

/// Render the report block of one package
pub fn render_package(package: &Package, config: &Config) -> String {
    let mut header = package.name.clone();
    if let Some(version) = &package.version {
        header.push('@');
        header.push_str(version);
    }
    if let Some(branch) = &package.branch {
        header.push('#');
        header.push_str(&branch_style(config, branch).apply_to(branch).to_string());
    }
    header.push_str(
        &Style::new()
            .dim()
            .apply_to(format!(" ({})", package.rel_folder))
            .to_string(),
    );

    let mut lines = vec![header];
    if package.ignore {
        lines.push(format!(
            "  {}",
            Style::new()
                .dim()
                .apply_to("skipped (package.json has npmtool == false)")
        ));
    }

    let tick = Style::new().green().apply_to(TICK);
    let caution = Style::new().yellow().apply_to(CAUTION);
    let cross = Style::new().red().bold().apply_to(CROSS);

    for message in &package.messages {
        lines.push(format!("  {tick} {}", Style::new().dim().apply_to(message)));
    }
    for warning in &package.warnings {
        lines.push(format!("  {caution} {}", Style::new().yellow().apply_to(warning)));
    }
    for error in &package.errors {
        lines.push(format!("  {cross} {}", Style::new().red().bold().apply_to(error)));
    }

    lines.join("\n")
}

fn branch_style(config: &Config, branch: &str) -> Style {
    match config.branch_color(branch) {
        Some(color) => Style::from_dotted_str(&format!("{color}.bold")),
        None => Style::new().dim(),
    }
}

/// Closing line for an aggregate status
pub fn completion_line(status: RunStatus) -> String {
    match status {
        Severity::Success => Style::new()
            .green()
            .apply_to("Completed successfully.")
            .to_string(),
        Severity::Warning => Style::new()
            .yellow()
            .apply_to("Completed with warnings.")
            .to_string(),
        Severity::Error => Style::new()
            .red()
            .bold()
            .apply_to("Completed with errors.")
            .to_string(),
    }
}

/// Print the report for every package and the closing status line
pub fn print_report(packages: &[Package], config: &Config) -> RunStatus {
    for package in packages {
        println!();
        println!("{}", render_package(package, config));
    }

    let status = aggregate_status(packages);
    println!();
    println!("{}", completion_line(status));
    println!();
    status
}

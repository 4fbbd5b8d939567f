//! Usage text listing the available command sets

use console::Style;

use crate::config::Config;

/// Print usage and every configured command set with its description
pub fn print_usage(config: &Config) {
    println!("Usage: npmtool [command_set] [command_set]...");
    println!();
    print_command_sets(config);
}

/// Print the available command sets
pub fn print_command_sets(config: &Config) {
    println!("Available command sets are:");
    for (name, set) in &config.commands {
        match &set.description {
            Some(description) => println!(
                "  {}  {}",
                Style::new().cyan().bold().apply_to(name),
                description
            ),
            None => println!("  {}", Style::new().cyan().bold().apply_to(name)),
        }
    }
    println!();
}

/// Print the names of the built-in scripts
pub fn print_builtin_scripts<'a>(names: impl IntoIterator<Item = &'a str>) {
    let names: Vec<&str> = names.into_iter().collect();
    println!("Built-in scripts: {}", names.join(", "));
    println!();
}

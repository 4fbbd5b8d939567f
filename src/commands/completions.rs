//! Shell completions command

use clap::CommandFactory;

use crate::error::{NpmtoolError, Result};

/// Generate shell completions for `shell` on stdout
pub fn run(shell: &str) -> Result<()> {
    let shell = match shell.to_lowercase().as_str() {
        "bash" => clap_complete::Shell::Bash,
        "elvish" => clap_complete::Shell::Elvish,
        "fish" => clap_complete::Shell::Fish,
        "powershell" | "pwsh" => clap_complete::Shell::PowerShell,
        "zsh" => clap_complete::Shell::Zsh,
        _ => {
            return Err(NpmtoolError::UnknownShell {
                shell: shell.to_string(),
            });
        }
    };

    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "npmtool", &mut std::io::stdout().lock());

    Ok(())
}

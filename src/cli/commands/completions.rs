//! Shell completion generation
//!
//! Generates shell completion scripts for bash, zsh, fish, and PowerShell.
//!
//! # Usage
//!
//! ```bash
//! # Bash - add to ~/.bashrc
//! source <(stackcmp completions bash)
//!
//! # Zsh - add to ~/.zshrc
//! source <(stackcmp completions zsh)
//!
//! # Fish - add to ~/.config/fish/completions/stackcmp.fish
//! stackcmp completions fish > ~/.config/fish/completions/stackcmp.fish
//!
//! # PowerShell - add to $PROFILE
//! stackcmp completions powershell >> $PROFILE
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use miette::Result;
use std::io;

use crate::cli::Cli;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

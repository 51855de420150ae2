//! `bizdesk completions` command - Shell completion scripts
//!
//! ```bash
//! source <(bizdesk completions bash)
//! bizdesk completions fish > ~/.config/fish/completions/bizdesk.fish
//! ```

use clap::CommandFactory;
use clap_complete::Shell;
use miette::{IntoDiagnostic, Result};
use std::io::{self, Write};

use crate::cli::Cli;

const BIN_NAME: &str = "bizdesk";

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_completions(args.shell, &mut out);
    out.flush().into_diagnostic()
}

/// Render the completion script for `shell` covering every subcommand
pub fn write_completions<W: Write>(shell: Shell, out: &mut W) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, out);
}

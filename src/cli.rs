// SPDX-FileCopyrightText: 2026 gitmsg contributors
// SPDX-License-Identifier: MIT

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "gitmsg")]
#[command(version)]
#[command(about = "Streaming AI commit message generator", long_about = None)]
pub struct Cli {
    /// Generation backend (openai, claude, gemini, custom)
    #[arg(short, long, env = "GITMSG_PROVIDER")]
    pub provider: Option<String>,

    /// Model name
    #[arg(short, long, env = "GITMSG_MODEL")]
    pub model: Option<String>,

    /// Auto-confirm and commit without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Print message only, don't commit
    #[arg(long)]
    pub dry_run: bool,

    /// Copy the generated message to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Generate a single subject line only
    #[arg(long)]
    pub header_only: bool,

    /// Use the working-tree diff instead of the staged one
    #[arg(long)]
    pub unstaged: bool,

    /// Show the prompt sent to the model
    #[arg(long)]
    pub show_prompt: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Check provider and repository health
    Doctor,
    /// Generate shell completions
    Completions { shell: clap_complete::Shell },
    /// Store a provider API key in the system keychain
    #[cfg(feature = "secure-storage")]
    SetKey { provider: String },
    /// Check whether a provider API key is stored in the keychain
    #[cfg(feature = "secure-storage")]
    GetKey { provider: String },
}

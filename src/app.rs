// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use std::io::IsTerminal;

use console::style;
use dialoguer::{Confirm, Select};
use tokio::signal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::domain::{DiffSource, PromptContext};
use crate::error::{Error, Result, truncate_body};
use crate::services::{
    commitlint, git::GitService, llm, normalize::normalize, prompt, sink::TokenSink,
};

enum FailureChoice {
    Retry,
    Abort,
}

pub struct App {
    cli: Cli,
    config: Config,
    cancel_token: CancellationToken,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            provider = %config.provider,
            style = %config.style,
            max_diff_chars = config.max_diff_chars,
            "config loaded"
        );
        let cancel_token = CancellationToken::new();
        Ok(Self {
            cli,
            config,
            cancel_token,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Ctrl+C cancels cooperatively through the root token
        let cancel = self.cancel_token.clone();
        tokio::spawn(async move {
            signal::ctrl_c().await.ok();
            cancel.cancel();
        });

        if let Some(ref cmd) = self.cli.command {
            return self.handle_command(cmd).await;
        }

        self.generate_message().await
    }

    async fn generate_message(&self) -> Result<()> {
        if self.cancel_token.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let source = if self.cli.unstaged {
            DiffSource::Unstaged
        } else {
            DiffSource::Staged
        };

        self.print_status("Reading changes...");
        let git = GitService::discover()?;
        let context = git.collect_context(source)?;

        self.print_info(&format!(
            "{} changed files on branch '{}'",
            context.files.len(),
            context.branch
        ));

        let rules = commitlint::load_rules(git.work_dir());

        let built = prompt::build_prompt(
            &context,
            rules.as_ref(),
            &prompt::PromptOptions {
                template: self.config.custom_prompt.as_deref(),
                language: &self.config.language,
                max_diff_chars: self.config.max_diff_chars,
                style: self.config.style,
            },
        );

        if built.diff_trimmed {
            debug!(max_diff_chars = self.config.max_diff_chars, "diff trimmed to budget");
        }

        if self.cli.show_prompt {
            eprintln!("{}", style("--- PROMPT ---").dim());
            eprintln!("{}", built.text);
            eprintln!("{}", style("--- END PROMPT ---").dim());
        }

        // Prompts embed the diff; they reach logs only on explicit opt-in.
        if self.config.debug_log_prompt {
            debug!(prompt = %built.text, "prompt body");
        }

        if self.cancel_token.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let raw = self
            .generate_with_retry(&built.text, &context, git.work_dir())
            .await?;
        let message = normalize(&raw, self.config.style);
        if message.is_empty() {
            return Err(Error::EmptyResponse);
        }

        self.deliver(&git, &message)
    }

    /// The request loop: Requesting → Streaming → Completed/Cancelled/Failed,
    /// with Failed looping back to Requesting on user-chosen retry. Each
    /// retry rebuilds the provider from freshly loaded settings.
    async fn generate_with_retry(
        &self,
        prompt: &str,
        context: &PromptContext,
        repo: &std::path::Path,
    ) -> Result<String> {
        let mut config = self.config.clone();
        let header_only = self.config.style.header_only();

        loop {
            if self.cancel_token.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let provider = llm::create_provider(&config)?;
            debug!(
                repo = %repo.display(),
                branch = %context.branch,
                files = context.files.len(),
                source = %context.source,
                provider = provider.name(),
                host = %provider.host(),
                "generation attempt"
            );

            self.print_status(&format!(
                "Contacting {} ({})...",
                provider.name(),
                provider.host()
            ));

            let err: Error = match provider.verify().await {
                Ok(()) => {
                    // Early-stop cancels this child without touching the
                    // Ctrl+C root token.
                    let request_cancel = self.cancel_token.child_token();
                    let (tx, rx) = mpsc::channel::<String>(64);

                    let sink = TokenSink::new(header_only, true);
                    let sink_task = tokio::spawn(sink.drain(rx, request_cancel.clone()));

                    let outcome = provider.generate(prompt, tx, request_cancel).await;
                    let streamed = sink_task.await.unwrap_or_default();
                    eprintln!(); // newline after streamed tokens

                    match outcome {
                        Ok(raw) if !raw.trim().is_empty() => return Ok(raw),
                        Ok(_) => Error::EmptyResponse,
                        // The abort we triggered ourselves: the header is
                        // already fully known, so this is a success path.
                        Err(Error::Cancelled) if streamed.early_stopped => {
                            if streamed.text.trim().is_empty() {
                                Error::EmptyResponse
                            } else {
                                return Ok(streamed.text);
                            }
                        }
                        Err(Error::Cancelled) => return Err(Error::Cancelled),
                        Err(e) => e,
                    }
                }
                Err(e) => e,
            };

            // Verbose detail stays in the log; the user sees the short
            // paraphrase from failure_choice/miette.
            error!(
                host = %provider.host(),
                error = %truncate_body(&format!("{err:?}")),
                "generation attempt failed"
            );

            if !err.is_retryable() {
                return Err(err);
            }

            match self.failure_choice(&err)? {
                FailureChoice::Retry => {
                    // Pick up any settings changed in between
                    config = Config::load(&self.cli)?;
                }
                FailureChoice::Abort => return Err(err),
            }
        }
    }

    fn failure_choice(&self, err: &Error) -> Result<FailureChoice> {
        let is_interactive = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
        if !is_interactive || self.cli.yes {
            return Ok(FailureChoice::Abort);
        }

        self.print_warning(&format!("Generation failed: {err}"));

        loop {
            if self.cancel_token.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let selection = Select::new()
                .with_prompt("What now?")
                .items(&["Retry", "Reconfigure", "Abort"])
                .default(0)
                .interact()?;

            match selection {
                0 => return Ok(FailureChoice::Retry),
                1 => {
                    // No state change; the user edits settings out-of-band
                    // and we re-ask.
                    match Config::config_path() {
                        Some(path) => {
                            self.print_info(&format!("Edit settings at {}", path.display()));
                        }
                        None => self.print_info("Set GITMSG_* environment variables"),
                    }
                }
                _ => return Ok(FailureChoice::Abort),
            }
        }
    }

    fn deliver(&self, git: &GitService, message: &str) -> Result<()> {
        if self.cli.copy {
            match arboard::Clipboard::new().and_then(|mut c| c.set_text(message.to_string())) {
                Ok(()) => self.print_info("Copied to clipboard"),
                Err(e) => {
                    warn!(error = %e, "clipboard unavailable");
                    self.print_warning("Could not copy to clipboard");
                }
            }
        }

        if self.cli.dry_run {
            println!("{message}");
            return Ok(());
        }

        let is_interactive = std::io::stdout().is_terminal() && std::io::stdin().is_terminal();

        if !self.cli.yes {
            if !is_interactive {
                eprintln!("{}", style("warning:").yellow().bold());
                eprintln!("  Not a terminal. Use --yes to auto-confirm in scripts/hooks.");
                println!("{message}");
                return Ok(());
            }

            eprintln!("\n{}", style("Generated commit message:").bold());
            eprintln!("{}", style(message).green());
            eprintln!();

            let confirm = Confirm::new()
                .with_prompt("Create commit with this message?")
                .default(true)
                .interact()?;

            if !confirm {
                return Err(Error::Cancelled);
            }
        }

        git.commit(message)?;
        eprintln!("{} Committed!", style("✓").green().bold());

        Ok(())
    }

    async fn handle_command(&self, cmd: &Commands) -> Result<()> {
        match cmd {
            Commands::Init => {
                let path = Config::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Commands::Config => {
                println!("Provider: {}", self.config.provider);
                println!(
                    "Model: {}",
                    self.config.model.as_deref().unwrap_or("(provider default)")
                );
                println!(
                    "Base URL: {}",
                    self.config.base_url.as_deref().unwrap_or("(provider default)")
                );
                println!(
                    "API key: {}",
                    if self.config.api_key.is_some() {
                        "configured"
                    } else {
                        "not set"
                    }
                );
                println!("Max diff chars: {}", self.config.max_diff_chars);
                println!("Temperature: {}", self.config.temperature);
                println!("Max tokens: {}", self.config.max_tokens);
                println!("Timeout: {}s", self.config.timeout_secs);
                println!("Language: {}", self.config.language);
                println!("Style: {}", self.config.style);
                Ok(())
            }
            Commands::Doctor => self.run_doctor().await,
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "gitmsg", &mut std::io::stdout());
                Ok(())
            }
            #[cfg(feature = "secure-storage")]
            Commands::SetKey { provider } => self.set_api_key(provider),
            #[cfg(feature = "secure-storage")]
            Commands::GetKey { provider } => self.get_api_key(provider),
        }
    }

    async fn run_doctor(&self) -> Result<()> {
        eprintln!("{} Running diagnostics...\n", style("→").cyan());

        eprintln!("{}", style("Configuration").bold().underlined());
        eprintln!("  Provider:    {}", self.config.provider);
        eprintln!(
            "  Model:       {}",
            self.config.model.as_deref().unwrap_or("(provider default)")
        );
        eprintln!("  Style:       {}", self.config.style);
        eprintln!("  Timeout:     {}s", self.config.timeout_secs);
        if let Some(ref path) = Config::config_path() {
            let status = if path.exists() { "found" } else { "not found" };
            eprintln!("  Config file: {} ({})", path.display(), status);
        }
        eprintln!();

        eprintln!("{}", style("Provider Check").bold().underlined());
        match llm::create_provider(&self.config) {
            Ok(provider) => {
                eprint!("  {} ({}): ", provider.name(), provider.host());
                match provider.verify().await {
                    Ok(()) => eprintln!("{}", style("OK").green().bold()),
                    Err(e) => eprintln!("{}: {}", style("ERROR").red().bold(), e),
                }
            }
            Err(e) => {
                eprintln!("  {}: {}", style("NOT CONFIGURED").red().bold(), e);
            }
        }
        eprintln!();

        eprintln!("{}", style("Git Repository").bold().underlined());
        match GitService::discover() {
            Ok(_) => eprintln!("  Repository: {}", style("found").green()),
            Err(_) => eprintln!("  Repository: {}", style("NOT FOUND").red().bold()),
        }

        eprintln!();
        eprintln!("{} Diagnostics complete.", style("✓").green().bold());

        Ok(())
    }

    // ─── Keyring Commands ───

    #[cfg(feature = "secure-storage")]
    fn keyring_provider(provider: &str) -> Result<String> {
        let kind = llm::ProviderKind::parse(provider).ok_or_else(|| {
            Error::Config(format!(
                "Unknown provider '{provider}'. Expected openai, claude, gemini, or custom"
            ))
        })?;
        if kind == llm::ProviderKind::Custom {
            return Err(Error::Config(
                "Keyring storage is for cloud providers (openai, claude, gemini)".into(),
            ));
        }
        Ok(kind.to_string())
    }

    #[cfg(feature = "secure-storage")]
    fn set_api_key(&self, provider: &str) -> Result<()> {
        let provider_name = Self::keyring_provider(provider)?;

        eprintln!(
            "Enter API key for {} (input will be hidden):",
            style(&provider_name).bold()
        );

        let key = dialoguer::Password::new()
            .with_prompt("API key")
            .interact()
            .map_err(|e| Error::Dialog(e.to_string()))?;

        if key.trim().is_empty() {
            return Err(Error::Config("API key cannot be empty".into()));
        }

        let entry = keyring::Entry::new("gitmsg", &provider_name)
            .map_err(|e| Error::Keyring(e.to_string()))?;
        entry
            .set_password(&key)
            .map_err(|e| Error::Keyring(e.to_string()))?;

        eprintln!(
            "{} API key stored for {}",
            style("✓").green().bold(),
            provider_name
        );
        Ok(())
    }

    #[cfg(feature = "secure-storage")]
    fn get_api_key(&self, provider: &str) -> Result<()> {
        let provider_name = Self::keyring_provider(provider)?;

        let entry = keyring::Entry::new("gitmsg", &provider_name)
            .map_err(|e| Error::Keyring(e.to_string()))?;

        match entry.get_password() {
            Ok(_) => {
                eprintln!(
                    "{} API key for {} is stored in keychain",
                    style("✓").green().bold(),
                    provider_name
                );
            }
            Err(keyring::Error::NoEntry) => {
                eprintln!(
                    "{} No API key found for {} in keychain",
                    style("✗").red().bold(),
                    provider_name
                );
                eprintln!(
                    "  Store one with: {}",
                    style(format!("gitmsg set-key {provider_name}")).yellow()
                );
            }
            Err(e) => {
                return Err(Error::Keyring(e.to_string()));
            }
        }

        Ok(())
    }

    // ─── Output Helpers ───

    fn print_status(&self, msg: &str) {
        eprintln!("{} {}", style("→").cyan(), msg);
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }

    fn print_warning(&self, msg: &str) {
        eprintln!("{} {}", style("warning:").yellow().bold(), msg);
    }
}

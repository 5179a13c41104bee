// SPDX-FileCopyrightText: 2026 gitmsg contributors
//
// SPDX-License-Identifier: MIT

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::domain::OutputStyle;
use crate::error::{Error, Result};
use crate::services::llm::ProviderKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderKind,

    /// Model name. Providers with a sensible default (openai, claude) fill
    /// it in; gemini and custom require one.
    #[serde(default)]
    pub model: Option<String>,

    /// Endpoint override. Each provider owns its default.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Never serialized back out; sourced from config/env/keychain.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Character budget for the diff section of the prompt
    #[serde(default = "default_max_diff_chars")]
    pub max_diff_chars: usize,

    /// LLM temperature (0.0-2.0, default 0.7)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate (default 500)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds (default 300)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output language tag for the generated message (default "en")
    #[serde(default = "default_language")]
    pub language: String,

    /// Message shape: header-only or header-and-body
    #[serde(default)]
    pub style: OutputStyle,

    /// Custom prompt template; blank falls back to the built-in one
    #[serde(default)]
    pub custom_prompt: Option<String>,

    /// Log the full prompt at debug level. Off by default so prompts
    /// (which embed the diff) stay out of logs.
    #[serde(default)]
    pub debug_log_prompt: bool,
}

fn default_max_diff_chars() -> usize {
    4_000
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    500
}
fn default_timeout_secs() -> u64 {
    300
}
fn default_language() -> String {
    "en".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            model: None,
            base_url: None,
            api_key: None,
            max_diff_chars: default_max_diff_chars(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            language: default_language(),
            style: OutputStyle::default(),
            custom_prompt: None,
            debug_log_prompt: false,
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.gitmsg.toml in the current directory)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".gitmsg.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        // User-level config
        if let Some(path) = Self::config_path()
            && path.exists()
        {
            figment = figment.merge(Toml::file(&path));
        }

        // Environment variables (GITMSG_MODEL, GITMSG_PROVIDER, etc.)
        figment = figment.merge(Env::prefixed("GITMSG_"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        // CLI overrides first, so key fallback sees the effective provider
        config.apply_cli(cli)?;

        // Provider-specific API key fallback
        if config.api_key.is_none() {
            let env_key = match config.provider {
                ProviderKind::OpenAi => std::env::var("OPENAI_API_KEY").ok(),
                ProviderKind::Claude => std::env::var("ANTHROPIC_API_KEY").ok(),
                ProviderKind::Gemini => std::env::var("GEMINI_API_KEY").ok(),
                ProviderKind::Custom => None,
            };
            config.api_key = env_key.map(SecretString::from);
        }

        // Keychain fallback (custom providers are usually local and keyless)
        #[cfg(feature = "secure-storage")]
        if config.api_key.is_none() && config.provider != ProviderKind::Custom {
            let provider_name = config.provider.to_string();
            if let Ok(entry) = keyring::Entry::new("gitmsg", &provider_name)
                && let Ok(key) = entry.get_password()
            {
                config.api_key = Some(SecretString::from(key));
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gitmsg").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(ref p) = cli.provider {
            self.provider = ProviderKind::parse(p).ok_or_else(|| {
                Error::Config(format!(
                    "Unknown provider '{p}'. Expected openai, claude, gemini, or custom"
                ))
            })?;
        }
        if let Some(ref m) = cli.model {
            self.model = Some(m.clone());
        }
        if cli.header_only {
            self.style = OutputStyle::HeaderOnly;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(200..=200_000).contains(&self.max_diff_chars) {
            return Err(Error::Config(format!(
                "max_diff_chars must be 200–200000, got {}",
                self.max_diff_chars
            )));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "temperature must be 0.0–2.0, got {}",
                self.temperature
            )));
        }

        if !(1..=128_000).contains(&self.max_tokens) {
            return Err(Error::Config(format!(
                "max_tokens must be 1–128000, got {}",
                self.max_tokens
            )));
        }

        if !(1..=3600).contains(&self.timeout_secs) {
            return Err(Error::Config(format!(
                "timeout_secs must be 1–3600, got {}",
                self.timeout_secs
            )));
        }

        if self.language.trim().is_empty() {
            return Err(Error::Config("language cannot be empty".into()));
        }

        if let Some(ref url) = self.base_url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            return Err(Error::Config(format!(
                "base_url must start with http:// or https://, got '{url}'"
            )));
        }

        Ok(())
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# gitmsg configuration

# Generation backend: openai, claude, gemini, custom
provider = "openai"

# Model name. openai/claude have defaults; gemini/custom require one.
# model = "gpt-4o"

# Endpoint override (custom requires one, e.g. http://localhost:11434/v1)
# base_url = "https://api.openai.com/v1"

# API key. Prefer the OS keychain (`gitmsg set-key <provider>`) or the
# provider's environment variable over storing it here.
# api_key = ""

# Character budget for the diff section of the prompt
max_diff_chars = 4000

# Sampling temperature (0.0-2.0)
temperature = 0.7

# Maximum tokens to generate
max_tokens = 500

# Output language for the message: en, zh-CN, zh-TW, ja, ko
language = "en"

# Message shape: "header-only" or "header-and-body"
style = "header-and-body"

# Log the full prompt at debug level (prompts embed your diff)
debug_log_prompt = false
"#;

        fs::write(&path, content)?;

        // Set secure permissions (0600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&path, perms)?;
        }

        Ok(path)
    }
}

//! Command handlers for the sitebrief CLI.
//!
//! Every command reads the brief from `--form`, and the AI-assisted ones can
//! write their result back into it with `--apply`.

pub mod analyze;
pub mod assemble;
pub mod content;
pub mod form_file;
pub mod generate;
pub mod inspire;
pub mod keywords;
pub mod logo;
pub mod palette;

// Re-export command types for convenience
pub use analyze::AnalyzeCommand;
pub use assemble::AssembleCommand;
pub use content::ContentCommand;
pub use generate::GenerateCommand;
pub use inspire::InspireCommand;
pub use keywords::KeywordsCommand;
pub use logo::LogoCommand;
pub use palette::PaletteCommand;

use clap::Args;
use serde::Serialize;
use sitebrief_core::config::{AppConfig, ProviderConfig};
use sitebrief_core::AppResult;
use sitebrief_llm::{create_client, LlmClient};
use sitebrief_prompt::FormState;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Location of the brief a command works on.
#[derive(Args, Debug, Clone)]
pub struct FormArgs {
    /// Brief file (YAML, or JSON when the extension is .json)
    #[arg(short, long, default_value = "sitebrief.yaml")]
    pub form: PathBuf,
}

impl FormArgs {
    /// Brief path, relative paths resolved against the workspace.
    pub fn path(&self, config: &AppConfig) -> PathBuf {
        if self.form.is_absolute() {
            self.form.clone()
        } else {
            config.workspace.join(&self.form)
        }
    }

    pub fn load(&self, config: &AppConfig) -> AppResult<FormState> {
        form_file::load_form(&self.path(config))
    }

    pub fn save(&self, config: &AppConfig, form: &FormState) -> AppResult<()> {
        form_file::save_form(&self.path(config), form)
    }
}

/// Create the LLM client for the configured provider.
pub fn llm_client(config: &AppConfig) -> AppResult<Arc<dyn LlmClient>> {
    config.validate()?;

    let provider_config = config.get_provider_config(&config.provider);
    let endpoint = provider_config.and_then(ProviderConfig::endpoint);
    let timeout = provider_config
        .and_then(ProviderConfig::timeout)
        .map(Duration::from_secs);
    let api_key = config.resolve_api_key(&config.provider);

    create_client(&config.provider, endpoint, api_key.as_deref(), timeout)
}

/// Print a result as pretty JSON or YAML.
pub fn print_structured<T: Serialize>(value: &T, json: bool) -> AppResult<()> {
    let text = if json {
        serde_json::to_string_pretty(value)?
    } else {
        serde_yaml::to_string(value)?
    };
    println!("{}", text.trim_end());
    Ok(())
}

/// Write `contents` to `path`.
pub fn write_output(path: &Path, contents: &[u8]) -> AppResult<()> {
    std::fs::write(path, contents)?;
    tracing::info!("Wrote {} bytes to {:?}", contents.len(), path);
    Ok(())
}

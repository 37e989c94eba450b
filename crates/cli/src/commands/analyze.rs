//! Analyze command handler.

use super::{llm_client, print_structured, FormArgs};
use clap::Args;
use sitebrief_assist::analyze_url;
use sitebrief_core::{config::AppConfig, AppError, AppResult};
use sitebrief_prompt::form::apply_analysis;

/// Analyze an existing website and extract a brief
#[derive(Args, Debug)]
pub struct AnalyzeCommand {
    /// Website URL
    pub url: String,

    #[command(flatten)]
    pub form: FormArgs,

    /// Merge the analysis into the brief file
    #[arg(long)]
    pub apply: bool,

    /// Print JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

impl AnalyzeCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        if self.url.trim().is_empty() {
            return Err(AppError::Config("Please provide a URL to analyze".to_string()));
        }

        let client = llm_client(config)?;
        let http = reqwest::Client::new();
        let analysis = analyze_url(client.as_ref(), &http, &config.model, self.url.trim()).await?;

        print_structured(&analysis, self.json)?;

        if self.apply {
            let mut form = self.form.load(config)?;
            apply_analysis(&mut form, analysis);
            self.form.save(config, &form)?;
        }
        Ok(())
    }
}

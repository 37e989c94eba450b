//! Keywords command handler.

use super::{llm_client, FormArgs};
use clap::Args;
use sitebrief_assist::generate_seo_keywords;
use sitebrief_core::{config::AppConfig, AppResult};
use sitebrief_prompt::form::apply_keywords;

/// Generate SEO keywords for the brief
#[derive(Args, Debug)]
pub struct KeywordsCommand {
    #[command(flatten)]
    pub form: FormArgs,

    /// Store the keywords in the brief file
    #[arg(long)]
    pub apply: bool,

    /// Print a JSON array
    #[arg(long)]
    pub json: bool,
}

impl KeywordsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let mut form = self.form.load(config)?;
        let client = llm_client(config)?;

        let keywords = generate_seo_keywords(
            client.as_ref(),
            &config.model,
            &form.niche,
            &form.target_audience,
        )
        .await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&keywords)?);
        } else {
            for keyword in &keywords {
                println!("{}", keyword);
            }
        }

        if self.apply {
            apply_keywords(&mut form, keywords);
            self.form.save(config, &form)?;
        }
        Ok(())
    }
}

//! Inspire command handler.

use super::{llm_client, FormArgs};
use clap::Args;
use sitebrief_assist::generate_inspiration;
use sitebrief_core::{config::AppConfig, AppResult};
use sitebrief_prompt::form::apply_inspiration;
use sitebrief_prompt::templates::inspiration_context;
use sitebrief_prompt::InspirableField;

/// Suggest values for a text field of the brief
#[derive(Args, Debug)]
pub struct InspireCommand {
    /// Field name: projectName, niche, targetAudience or mainGoal
    pub field: String,

    #[command(flatten)]
    pub form: FormArgs,

    /// Put the first suggestion into the brief file
    #[arg(long)]
    pub apply: bool,

    /// Print a JSON array
    #[arg(long)]
    pub json: bool,
}

impl InspireCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let field = InspirableField::parse(&self.field)?;
        let mut form = self.form.load(config)?;
        let client = llm_client(config)?;

        let suggestions = generate_inspiration(
            client.as_ref(),
            &config.model,
            field,
            &inspiration_context(&form),
        )
        .await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&suggestions)?);
        } else {
            for (i, suggestion) in suggestions.iter().enumerate() {
                println!("{}. {}", i + 1, suggestion);
            }
        }

        if self.apply {
            match suggestions.first() {
                Some(first) => {
                    apply_inspiration(&mut form, field, first);
                    self.form.save(config, &form)?;
                }
                None => tracing::warn!("No suggestions returned for {}", field),
            }
        }
        Ok(())
    }
}

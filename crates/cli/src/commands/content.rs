//! Content command handler.

use super::{llm_client, FormArgs};
use clap::Args;
use sitebrief_assist::generate_page_content;
use sitebrief_core::{config::AppConfig, AppResult};
use sitebrief_prompt::form::set_page_content;

/// Draft copy for one page of the brief
#[derive(Args, Debug)]
pub struct ContentCommand {
    /// Page name, e.g. "Sobre Nós"
    pub page: String,

    #[command(flatten)]
    pub form: FormArgs,

    /// Store the draft as the page's content in the brief file
    #[arg(long)]
    pub apply: bool,
}

impl ContentCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let mut form = self.form.load(config)?;
        if !form.selected_pages.contains(&self.page) {
            tracing::warn!(
                "Page '{}' is not selected in the brief; its content will not appear in the prompt",
                self.page
            );
        }

        let client = llm_client(config)?;
        let text = generate_page_content(client.as_ref(), &config.model, &self.page, &form).await?;
        println!("{}", text);

        if self.apply {
            set_page_content(&mut form, &self.page, &text);
            self.form.save(config, &form)?;
        }
        Ok(())
    }
}

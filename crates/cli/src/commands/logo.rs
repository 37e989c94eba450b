//! Logo command handler.

use super::{llm_client, write_output, FormArgs};
use clap::Args;
use sitebrief_assist::{encode_logo, generate_logo};
use sitebrief_core::{config::AppConfig, AppResult};
use sitebrief_prompt::form::apply_logo;
use std::path::PathBuf;

/// Generate a logo suggestion for the brief
#[derive(Args, Debug)]
pub struct LogoCommand {
    #[command(flatten)]
    pub form: FormArgs,

    /// Image file to write
    #[arg(long, default_value = "logo.png")]
    pub out: PathBuf,

    /// Attach the logo to the brief file
    #[arg(long)]
    pub apply: bool,
}

impl LogoCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let mut form = self.form.load(config)?;
        let client = llm_client(config)?;

        let image = generate_logo(client.as_ref(), &config.image_model, &form).await?;
        write_output(&self.out, &image.data)?;
        println!("{}", self.out.display());

        if self.apply {
            apply_logo(&mut form, encode_logo(&image));
            self.form.save(config, &form)?;
        }
        Ok(())
    }
}

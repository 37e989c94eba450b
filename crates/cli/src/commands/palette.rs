//! Palette command handler.

use super::{llm_client, print_structured, FormArgs};
use clap::Args;
use sitebrief_assist::generate_color_palette;
use sitebrief_core::{config::AppConfig, AppResult};
use sitebrief_prompt::form::apply_palette;

/// Generate a color palette from the brief's niche and style
#[derive(Args, Debug)]
pub struct PaletteCommand {
    #[command(flatten)]
    pub form: FormArgs,

    /// Store the palette in the brief file
    #[arg(long)]
    pub apply: bool,

    /// Print JSON instead of YAML
    #[arg(long)]
    pub json: bool,
}

impl PaletteCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let mut form = self.form.load(config)?;
        let client = llm_client(config)?;

        let palette =
            generate_color_palette(client.as_ref(), &config.model, &form.niche, &form.style)
                .await?;
        print_structured(&palette, self.json)?;

        if self.apply {
            apply_palette(&mut form, palette)?;
            self.form.save(config, &form)?;
        }
        Ok(())
    }
}

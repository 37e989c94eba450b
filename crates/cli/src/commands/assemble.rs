//! Assemble command handler.

use super::{write_output, FormArgs};
use clap::Args;
use sitebrief_core::{config::AppConfig, AppResult};
use sitebrief_prompt::assemble;
use std::path::PathBuf;

/// Print the prompt document for a brief
#[derive(Args, Debug)]
pub struct AssembleCommand {
    #[command(flatten)]
    pub form: FormArgs,

    /// Also write the document to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl AssembleCommand {
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let form = self.form.load(config)?;
        let document = assemble(&form);

        println!("{}", document);

        if let Some(ref path) = self.output {
            write_output(path, document.as_bytes())?;
        }
        Ok(())
    }
}

//! Generate command handler.
//!
//! Streams the polished website prompt to stdout as it arrives.

use super::{llm_client, write_output, FormArgs};
use clap::Args;
use sitebrief_assist::website_prompt_fragments;
use sitebrief_core::{config::AppConfig, AppError, AppResult};
use sitebrief_llm::LlmClient;
use sitebrief_prompt::stream::drive;
use sitebrief_prompt::{FormState, Snapshot, StreamOutcome};
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;

/// Stream the AI-polished website prompt
#[derive(Args, Debug)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub form: FormArgs,

    /// Print one JSON object when done instead of streaming text
    #[arg(long)]
    pub json: bool,

    /// Also write the final text to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let form = self.form.load(config)?;
        let client = llm_client(config)?;

        let mut printed = 0;
        let json = self.json;
        let print_delta = |snapshot: &Snapshot| {
            if json {
                return;
            }
            // Snapshots only ever grow, so print what is new
            if let Some(delta) = snapshot.text.get(printed..) {
                print!("{}", delta);
                std::io::stdout().flush().ok();
            }
            printed = snapshot.text.len();
        };

        let cancel = tokio::signal::ctrl_c();
        let Some(outcome) =
            render_until(client.as_ref(), &config.model, &form, cancel, print_delta).await
        else {
            println!();
            tracing::warn!("Generation cancelled");
            return Ok(());
        };

        if self.json {
            let (status, error) = match &outcome {
                StreamOutcome::Completed(_) => ("completed", None),
                StreamOutcome::Failed { message, .. } => ("failed", Some(message.as_str())),
            };
            let output = serde_json::json!({
                "prompt": outcome.text(),
                "status": status,
                "error": error,
                "model": config.model,
                "provider": config.provider,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!();
        }

        if let Some(ref path) = self.output {
            write_output(path, outcome.text().as_bytes())?;
        }

        match outcome {
            StreamOutcome::Completed(text) => {
                tracing::debug!("Generated {} bytes", text.len());
                Ok(())
            }
            StreamOutcome::Failed { message, .. } => Err(AppError::Other(message)),
        }
    }
}

/// Open the prompt stream and render it until it ends or `cancel` resolves.
///
/// Returns `None` when cancelled, also while the stream is still opening.
async fn render_until<C, F>(
    client: &dyn LlmClient,
    model: &str,
    form: &FormState,
    cancel: C,
    on_snapshot: F,
) -> Option<StreamOutcome>
where
    C: Future,
    F: FnMut(&Snapshot),
{
    let render = async {
        let fragments = website_prompt_fragments(client, model, form).await;
        drive(fragments, on_snapshot).await
    };

    tokio::select! {
        outcome = render => Some(outcome),
        _ = cancel => None,
    }
}

//! AI assistance for filling in a website brief.
//!
//! Every service sends one request through an [`LlmClient`] and returns a
//! single result or a single descriptive error. Nothing is retried.
//!
//! [`LlmClient`]: sitebrief_llm::LlmClient

pub mod analyze;
pub mod generate;
pub mod inspiration;
pub mod keywords;
pub mod logo;
pub mod page_content;
pub mod palette;

pub use analyze::{analyze_url, analyze_website_content, html_to_text};
pub use generate::{stream_website_prompt, website_prompt_fragments};
pub use inspiration::generate_inspiration;
pub use keywords::generate_seo_keywords;
pub use logo::{encode_logo, generate_logo};
pub use page_content::generate_page_content;
pub use palette::generate_color_palette;

use sitebrief_core::AppError;

/// Prefix upstream and malformed-response messages with what was being done.
pub(crate) fn context(what: &str) -> impl FnOnce(AppError) -> AppError + '_ {
    move |err| match err {
        AppError::Llm(msg) => AppError::Llm(format!("{}: {}", what, msg)),
        AppError::MalformedResponse(msg) => {
            AppError::MalformedResponse(format!("{}: {}", what, msg))
        }
        other => other,
    }
}

//! `campana-ai` — the generative-AI gateway.
//!
//! **Responsibility:** format prompts with session context, call the hosted
//! text-generation endpoint with a bounded output length, and hand back text
//! or a best-effort JSON parse.
//!
//! This crate is intentionally a leaf boundary:
//! - It must not read or mutate campaign records.
//! - Failures never become hard errors for callers that have a fallback; a
//!   broken model answer degrades to static copy.
//! - No retries, no rate limiting, no circuit breaking.
//!
//! The endpoint key is *service-side* configuration; it never travels to a
//! browser.

pub mod gateway;
pub mod parse;
pub mod prompt;

pub use gateway::{AiConfig, AiError, AiGateway};
pub use prompt::{PromptContext, SentimentVerdict};

//! Live USD/BRL quote probe: LLM call plus numeric extraction.

pub mod client;
pub mod extract;

pub use client::{GeminiQuoteClient, QuoteProbe, QUOTE_PROMPT};
pub use extract::extract_rate;

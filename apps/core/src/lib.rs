//! switchboard-core: feature-preset LLM chat service.
//!
//! Routes user text to a chat-completions API under one of a catalogue of
//! feature presets and annotates every input with two deterministic
//! classifiers:
//!   - programming language (regex tables)
//!   - topic domain (keyword tables)
//!
//! Special features extract content locally first (web pages, uploaded files,
//! ZIP archives, static security scan) and summarise it through the generic
//! path. Every upstream failure degrades to canned text.

pub mod brain;
pub mod catalog;
pub mod config;
pub mod database;
pub mod dispatch;
pub mod error;
pub mod fetch;
pub mod fs_manager;
pub mod llm;
pub mod models;
pub mod prompts;
pub mod security;
pub mod server;
pub mod text_extract;

#[cfg(test)]
mod tests;

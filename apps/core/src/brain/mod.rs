//! # Brain Module
//!
//! Deterministic, non-LLM annotation of user input.
//!
//! ## Components
//! - `patterns`: rule tables for the language and domain axes
//! - `classifier`: max-count scorer over those tables

pub mod classifier;
pub mod patterns;

pub use classifier::{title_case, ClassificationResult, Classifier};
pub use patterns::{Axis, PatternRegistry, PatternRule, RuleKind};

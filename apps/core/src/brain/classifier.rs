//! Classifier Engine.
//!
//! Scores free text against the [`PatternRegistry`] and returns the
//! best-scoring category for an axis. Pure max-count arbitration: no
//! normalisation by text length or table size.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use super::patterns::{Axis, PatternRegistry};

/// Result of classifying a text on one axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub axis: Axis,
    /// Winning category, or the axis sentinel when nothing matched
    pub category: String,
    /// Raw match count of the winner
    pub score: usize,
    pub emoji: String,
}

impl ClassificationResult {
    pub fn is_sentinel(&self) -> bool {
        self.score == 0
    }

    /// Decorated label, e.g. `🐍 python` or `📊 Data Science`.
    pub fn label(&self) -> String {
        if self.is_sentinel() {
            return self.axis.sentinel_label().to_string();
        }

        match self.axis {
            Axis::Language => format!("{} {}", self.emoji, self.category),
            Axis::Domain => format!("{} {}", self.emoji, title_case(&self.category)),
        }
    }
}

/// Pattern-based classifier over both axes.
#[derive(Debug, Clone)]
pub struct Classifier {
    registry: Arc<PatternRegistry>,
}

impl Classifier {
    pub fn new(registry: Arc<PatternRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Per-category scores in registry order.
    pub fn scores(&self, axis: Axis, text: &str) -> Vec<(&str, usize)> {
        let lowered = text.to_lowercase();

        self.registry
            .categories(axis)
            .iter()
            .map(|category| {
                let score = category
                    .rules
                    .iter()
                    .map(|rule| rule.count_matches(text, &lowered))
                    .sum();
                (category.name.as_str(), score)
            })
            .collect()
    }

    /// Classify `text` on one axis.
    ///
    /// Ties go to the category declared first.
    pub fn classify(&self, axis: Axis, text: &str) -> ClassificationResult {
        let scores = self.scores(axis, text);

        let mut best: Option<(&str, usize)> = None;
        for (name, score) in scores.iter().copied() {
            if score == 0 {
                continue;
            }
            // Strictly greater keeps the earliest category on ties
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((name, score));
            }
        }

        match best {
            Some((name, score)) => {
                debug!(axis = %axis, category = name, score, "Classified text");
                ClassificationResult {
                    axis,
                    category: name.to_string(),
                    score,
                    emoji: self.registry.emoji_for(axis, name).to_string(),
                }
            }
            None => ClassificationResult {
                axis,
                category: axis.sentinel().to_string(),
                score: 0,
                emoji: axis.sentinel_label().split(' ').next().unwrap_or_default().to_string(),
            },
        }
    }

    /// Decorated language label, e.g. `🦀 rust` or `❓ unknown`.
    pub fn classify_language(&self, text: &str) -> String {
        self.classify(Axis::Language, text).label()
    }

    /// Decorated domain label, e.g. `☁️ Cloud Computing` or `🌐 general`.
    pub fn classify_domain(&self, text: &str) -> String {
        self.classify(Axis::Domain, text).label()
    }
}

/// `data_science` -> `Data Science`.
pub fn title_case(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

//! Static security scan.
//!
//! Flags four classes of risky constructs with simple regex rules. One hit per
//! rule is enough to record it; the scan does not count occurrences.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

const SECURITY_GROUPS: &[(&str, &[&str])] = &[
    ("sql_injection", &[r"SELECT.*\+", r"INSERT.*\+", r"DELETE.*\+", r"UPDATE.*\+"]),
    ("xss", &[r"innerHTML", r"document\.write", r"eval\("]),
    ("command_injection", &[r"os\.system", r"subprocess\.call", r"exec\("]),
    ("hardcoded_secrets", &[r"password\s*=", r"api_key\s*=", r"secret\s*="]),
];

/// A flagged vulnerability class and the rules that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub class: String,
    pub patterns: Vec<String>,
}

struct SecurityRule {
    source: &'static str,
    regex: Regex,
}

pub struct SecurityScanner {
    groups: Vec<(&'static str, Vec<SecurityRule>)>,
}

impl SecurityScanner {
    pub fn new() -> Result<Self, AppError> {
        let groups = SECURITY_GROUPS
            .iter()
            .map(|(class, patterns)| {
                let rules = patterns
                    .iter()
                    .map(|source| {
                        Ok(SecurityRule {
                            source,
                            regex: RegexBuilder::new(source).case_insensitive(true).build()?,
                        })
                    })
                    .collect::<Result<Vec<_>, AppError>>()?;
                Ok((*class, rules))
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self { groups })
    }

    /// Flagged classes in group order. Empty when the input is clean.
    pub fn scan(&self, code: &str) -> Vec<Finding> {
        self.groups
            .iter()
            .filter_map(|(class, rules)| {
                let patterns: Vec<String> = rules
                    .iter()
                    .filter(|rule| rule.regex.is_match(code))
                    .map(|rule| rule.source.to_string())
                    .collect();

                (!patterns.is_empty()).then(|| Finding {
                    class: class.to_string(),
                    patterns,
                })
            })
            .collect()
    }
}

impl std::fmt::Debug for SecurityScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityScanner")
            .field("groups", &self.groups.len())
            .finish()
    }
}

/// Human-readable report for a scan.
pub fn render_report(findings: &[Finding]) -> String {
    let mut report = String::from("🔒 SECURITY ANALYSIS REPORT:\n\n");

    if findings.is_empty() {
        report.push_str("✅ No major security vulnerabilities detected!\n");
        return report;
    }

    for finding in findings {
        report.push_str(&format!("⚠️ {} DETECTED:\n", finding.class.to_uppercase()));
        for pattern in &finding.patterns {
            report.push_str(&format!(" - Pattern: {}\n", pattern));
        }
    }
    report
}

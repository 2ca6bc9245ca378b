//! Pattern Registry.
//!
//! Static rule tables for the two classification axes: programming language
//! (regular expressions) and topic domain (substring keywords). Table order is
//! significant: the classifier breaks ties in favour of the category declared
//! first, so entries must never be re-sorted.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::AppError;

/// A category row: name, emoji, rule sources.
pub type CategorySource<'a> = (&'a str, &'a str, &'a [&'a str]);

/// Language axis, regex rules. Duplicated rules are intentional and count twice.
const LANGUAGE_TABLE: &[CategorySource<'static>] = &[
    ("python", "🐍", &[r"def\s+\w+\s*\(", r"import\s+\w+", r"from\s+\w+\s+import", r"class\s+\w+\s*:", r"print\s*\("]),
    ("javascript", "📜", &[r"function\s*\w*\s*\(", r"const\s+\w+\s*=", r"let\s+\w+\s*=", r"console\.log", r"\s*=>\s*"]),
    ("java", "☕", &[r"public\s+class\s+\w+", r"System\.out\.print", r"import\s+java\."]),
    ("cpp", "⚡", &[r"#include\s*<", r"using\s+namespace\s+std;", r"std::", r"cout\s*<<"]),
    ("html", "🌐", &[r"<!DOCTYPE\s+html", r"<html", r"<head", r"<body", r"<div\s"]),
    ("css", "🎨", &[r"\.\w+\s*\{", r"#\w+\s*\{", r"@media\s*\(", r#"font-family:\s*['"]?[\w\s]+['"]?;"#]),
    ("php", "🐘", &[r"<\?php", r"\$\w+\s*=", r"echo\s+", r"function\s+\w+\s*\("]),
    ("ruby", "💎", &[r"def\s+\w+", r"class\s+\w+", r"@\w+\s*=", r"puts\s+"]),
    ("go", "🔵", &[r"func\s+\w+\s*\(", r"package\s+main", r"fmt\.Print", r"var\s+\w+\s*"]),
    ("rust", "🦀", &[r"fn\s+\w+\s*\(", r"let\s+\w+\s*=", r"println!\s*\(", r"impl\s+\w+"]),
    ("swift", "🐦", &[r"func\s+\w+\s*\(", r"var\s+\w+\s*=", r"let\s+\w+\s*=", r"print\s*\("]),
    ("kotlin", "🔶", &[r"fun\s+\w+\s*\(", r"val\s+\w+\s*=", r"var\s+\w+\s*=", r"println\s*\("]),
    ("typescript", "📘", &[r"interface\s+\w+", r"type\s+\w+\s*=", r"const\s+\w+:\s*\w+", r"function\s+\w+"]),
    ("sql", "🗄️", &[r"SELECT\s+.+FROM", r"INSERT\s+INTO", r"UPDATE\s+\w+", r"CREATE\s+TABLE"]),
    ("bash", "🐚", &[r"#!/bin/bash", r"echo\s+.+", r"if\s+\[\s+", r"for\s+.+in"]),
    ("roman_urdu", "🇵🇰", ROMAN_URDU_RULES),
    ("urdu", "🇵🇰", &["کیا", "ہے", "میں", "تم", "یہ", "وہ", "اچھا", "ٹھیک"]),
];

const ROMAN_URDU_RULES: &[&str] = &[
    r"kia\s+", r"hai\s+", r"main\s+", r"tum\s+", r"yeh\s+", r"woh\s+", r"acha\s+", r"theek\s+",
    r"kahan\s+", r"kyun\s+", r"kaise\s+", r"kab\s+", r"kitna\s+", r"koi\s+", r"sab\s+", r"ek\s+",
    r"dusra\s+", r"teesra\s+", r"bahut\s+", r"thoda\s+", r"zyada\s+", r"kam\s+", r"ab\s+", r"pehle\s+",
    r"baad\s+", r"kal\s+", r"aaj\s+", r"kal\s+", r"subah\s+", r"shaam\s+", r"raat\s+", r"ghar\s+",
    r"bahar\s+", r"school\s+", r"college\s+", r"office\s+", r"kaam\s+", r"paise\s+", r"khana\s+", r"paani\s+",
    r"dost\s+", r"dushman\s+", r"pyar\s+", r"nafrat\s+", r"khushi\s+", r"gam\s+", r"jeet\s+", r"haar\s+",
    r"achha\s+", r"bura\s+", r"sach\s+", r"jhoot\s+", r"barish\s+", r"dhoop\s+", r"hawa\s+", r"thand\s+",
    r"garmi\s+", r"mosam\s+", r"din\s+", r"mahina\s+", r"saal\s+", r"jam\s+", r"january\s+", r"february\s+",
    r"march\s+", r"april\s+", r"may\s+", r"june\s+", r"july\s+", r"august\s+", r"september\s+", r"october\s+",
    r"november\s+", r"december\s+", r"pakistan\s+", r"india\s+", r"america\s+", r"england\s+", r"china\s+",
    r"karachi\s+", r"lahore\s+", r"islamabad\s+", r"peshawar\s+", r"quetta\s+", r"multan\s+", r"faisalabad\s+",
    r"sialkot\s+", r"gujranwala\s+", r"rawalpindi\s+", r"bilal\s+", r"ahmed\s+", r"ali\s+", r"fatima\s+",
    r"zainab\s+", r"hassan\s+", r"hussain\s+", r"bilquis\s+", r"saleem\s+", r"salma\s+", r"nasir\s+",
    r"naseem\s+", r"shahid\s+", r"shazia\s+", r"tariq\s+", r"tasneem\s+", r"usman\s+", r"uzma\s+",
    r"waqas\s+", r"waseem\s+", r"yasir\s+", r"yousuf\s+", r"zahid\s+", r"zara\s+", r"zubair\s+",
    r"zunaira\s+", r"abbas\s+", r"abbasi\s+", r"ahmad\s+", r"akbar\s+", r"aleem\s+", r"aliya\s+",
    r"amjad\s+", r"anwar\s+", r"arif\s+", r"asif\s+", r"aslam\s+", r"ayub\s+", r"azhar\s+", r"aziz\s+",
    r"badar\s+", r"badr\s+", r"bashir\s+", r"bilal\s+", r"dawood\s+", r"farooq\s+", r"fazal\s+",
    r"gulzar\s+", r"habib\s+", r"hafiz\s+", r"haris\s+", r"hasan\s+", r"hashim\s+", r"ibrahim\s+",
    r"imran\s+", r"irfan\s+", r"javed\s+", r"jawad\s+", r"khalid\s+", r"khan\s+", r"khurram\s+",
    r"majid\s+", r"malik\s+", r"manzoor\s+", r"mian\s+", r"mubashir\s+", r"mujahid\s+", r"munir\s+",
    r"murad\s+", r"mushtaq\s+", r"nadir\s+", r"nasir\s+", r"nawaz\s+", r"noman\s+", r"omar\s+",
    r"qadir\s+", r"qasim\s+", r"rafiq\s+", r"raja\s+", r"rasheed\s+", r"rizwan\s+", r"sadiq\s+",
    r"saeed\s+", r"sajid\s+", r"salah\s+", r"salim\s+", r"sami\s+", r"shafiq\s+", r"shakeel\s+",
    r"shoaib\s+", r"siddiq\s+", r"sohail\s+", r"tabassum\s+", r"tariq\s+", r"tasawar\s+", r"tauseef\s+",
    r"umair\s+", r"usama\s+", r"wahid\s+", r"yasmin\s+", r"zafar\s+", r"zahoor\s+", r"zaki\s+",
    r"zubeda\s+", r"zunair\s+", r"acha\s+laga\s+", r"kia\s+kar\s+rahe\s+ho\s+", r"main\s+theek\s+hoon\s+",
    r"tum\s+kya\s+kar\s+rahe\s+ho\s+", r"yeh\s+kia\s+hai\s+", r"woh\s+kahan\s+gaya\s+", r"bilkul\s+theek\s+",
    r"shukriya\s+", r"afsoos\s+", r"mazaa\s+aaya\s+", r"bohat\s+mazaa\s+aaya\s+", r"main\s+ja\s+raha\s+hoon\s+",
    r"tum\s+aa\s+jana\s+", r"hum\s+milen\s+ge\s+", r"allah\s+hafiz\s+", r"khuda\s+hafiz\s+", r"assalam\s+alaikum\s+",
    r"waalaikum\s+assalam\s+", r"inshallah\s+", r"mashallah\s+", r"subhanallah\s+", r"alhamdulillah\s+",
    r"jazakallah\s+", r"ameen\s+", r"bismillah\s+", r"astaghfirullah\s+", r"subhanallah\s+", r"la\s+ilaha\s+",
    r"illallah\s+", r"mohammed\s+ur\s+rasoolullah\s+", r"ramadan\s+mubarak\s+", r"eid\s+mubarak\s+",
    r"shab\s+e\s+barat\s+mubarak\s+", r"milad\s+un\s+nabi\s+mubarak\s+", r"ya\s+rasool\s+allah\s+",
    r"ya\s+ali\s+madad\s+", r"golden\s+temple\s+", r"haram\s+sharif\s+", r"kaba\s+shareef\s+",
    r"masjid\s+e\s+nabvi\s+", r"ajmer\s+shareef\s+", r"nankana\s+sahib\s+", r"hasan\s+abdal\s+",
    r"taxila\s+", r"mohenjo\s+daro\s+", r"harappa\s+", r"lahore\s+fort\s+", r"badshahi\s+masjid\s+",
    r"wazir\s+khan\s+masjid\s+", r"shalimar\s+gardens\s+", r"minar\s+e\s+pakistan\s+",
    r"quaid\s+e\s+azam\s+tomb\s+", r"allama\s+iqbal\s+tomb\s+", r"faisal\s+masjid\s+",
    r"margalla\s+hills\s+", r"takht\s+e\s+suleman\s+", r"khewra\s+salt\s+mine\s+",
    r"makli\s+graves\s+", r"ranikot\s+fort\s+", r"chaukhandi\s+tombs\s+", r"port\s+grand\s+",
];

/// Domain axis, substring keywords (matched on lower-cased text).
const DOMAIN_TABLE: &[CategorySource<'static>] = &[
    // Technology
    ("ai_ml_research", "🤖", &["neural", "network", "machine learning", "deep learning", "ai", "artificial intelligence", "tensorflow", "pytorch", "nlp", "computer vision"]),
    ("quantum_computing", "⚛️", &["quantum", "qubit", "superposition", "entanglement", "quantum computer", "quantum algorithm"]),
    ("blockchain_web3", "⛓️", &["blockchain", "crypto", "web3", "nft", "defi", "bitcoin", "ethereum", "smart contract", "dapp"]),
    ("cybersecurity", "🔒", &["security", "hack", "encryption", "firewall", "malware", "virus", "cyber attack", "penetration testing"]),
    ("web_development", "🌐", &["website", "web", "html", "css", "javascript", "react", "vue", "angular", "frontend", "backend"]),
    ("data_science", "📊", &["data", "analysis", "pandas", "numpy", "visualization", "dataset", "big data", "analytics"]),
    ("cloud_computing", "☁️", &["aws", "azure", "google cloud", "cloud", "serverless", "kubernetes", "docker"]),
    ("devops", "🔄", &["ci/cd", "jenkins", "gitlab", "ansible", "terraform", "infrastructure"]),
    // Business
    ("startup_business", "🚀", &["startup", "business", "venture", "funding", "investor", "pitch", "entrepreneur"]),
    ("marketing_sales", "📢", &["marketing", "sales", "customer", "conversion", "seo", "social media", "advertising"]),
    ("finance_economics", "💰", &["finance", "economic", "stock", "investment", "trading", "banking", "crypto"]),
    ("healthcare_medical", "🏥", &["medical", "health", "patient", "hospital", "doctor", "treatment", "medicine"]),
    ("education_learning", "🎓", &["education", "learning", "student", "teacher", "course", "online learning", "tutorial"]),
    // Creative
    ("content_creation", "✍️", &["content", "blog", "article", "writing", "copywriting", "social media"]),
    ("design_creative", "🎨", &["design", "creative", "ui/ux", "graphic", "logo", "branding", "illustration"]),
    ("music_audio", "🎵", &["music", "audio", "song", "sound", "recording", "production"]),
    ("video_production", "🎥", &["video", "film", "editing", "animation", "youtube", "content creation"]),
    // Science
    ("scientific_research", "🔬", &["research", "scientific", "experiment", "lab", "theory", "hypothesis"]),
    ("engineering_tech", "⚙️", &["engineering", "technical", "mechanical", "electrical", "civil", "software"]),
    ("mathematics", "🧮", &["math", "calculus", "algebra", "equation", "formula", "statistics"]),
    ("physics", "🌌", &["physics", "quantum", "relativity", "energy", "force", "motion"]),
    // Lifestyle
    ("cooking_food", "👨‍🍳", &["cooking", "recipe", "food", "cuisine", "ingredient", "cook"]),
    ("travel_tourism", "✈️", &["travel", "tour", "vacation", "destination", "hotel", "flight"]),
    ("fitness_health", "💪", &["fitness", "exercise", "workout", "health", "nutrition", "diet"]),
    ("gaming_entertainment", "🎮", &["game", "gaming", "player", "entertainment", "streaming", "esports"]),
];

/// Classification axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Programming (or natural) language of the input
    Language,
    /// Topic domain of the input
    Domain,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Language => write!(f, "language"),
            Axis::Domain => write!(f, "domain"),
        }
    }
}

impl Axis {
    /// Category returned when nothing matched.
    pub fn sentinel(&self) -> &'static str {
        match self {
            Axis::Language => "unknown",
            Axis::Domain => "general",
        }
    }

    /// Fully decorated label for the sentinel.
    pub fn sentinel_label(&self) -> &'static str {
        match self {
            Axis::Language => "❓ unknown",
            Axis::Domain => "🌐 general",
        }
    }

    /// Glyph used when a category has no emoji of its own.
    pub fn fallback_glyph(&self) -> &'static str {
        match self {
            Axis::Language => "🔍",
            Axis::Domain => "🎯",
        }
    }

    /// Kind of rule every category on this axis uses.
    pub fn rule_kind(&self) -> RuleKind {
        match self {
            Axis::Language => RuleKind::Regex,
            Axis::Domain => RuleKind::Keyword,
        }
    }
}

/// How a rule matches text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Regex,
    Keyword,
}

#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    /// Stored lower-cased.
    Keyword(String),
}

/// One match rule belonging to a category.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pub category: String,
    pub pattern: String,
    pub kind: RuleKind,
    matcher: Matcher,
}

impl PatternRule {
    /// Compile a rule. Regex rules are case-insensitive.
    pub fn new(category: &str, pattern: &str, kind: RuleKind) -> Result<Self, AppError> {
        let matcher = match kind {
            RuleKind::Regex => Matcher::Regex(
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()?,
            ),
            RuleKind::Keyword => Matcher::Keyword(pattern.to_lowercase()),
        };

        Ok(Self {
            category: category.to_string(),
            pattern: pattern.to_string(),
            kind,
            matcher,
        })
    }

    /// Number of non-overlapping matches.
    ///
    /// `lowered` must be `text.to_lowercase()`; keyword rules match against it
    /// so the caller lower-cases once per classification rather than per rule.
    pub fn count_matches(&self, text: &str, lowered: &str) -> usize {
        match &self.matcher {
            Matcher::Regex(re) => re.find_iter(text).count(),
            Matcher::Keyword(keyword) if keyword.is_empty() => 0,
            Matcher::Keyword(keyword) => lowered.matches(keyword.as_str()).count(),
        }
    }
}

/// All rules for one category, with its display emoji.
#[derive(Debug, Clone)]
pub struct CategoryRules {
    pub name: String,
    pub emoji: Option<String>,
    pub rules: Vec<PatternRule>,
}

/// Immutable rule tables for both axes, built once at startup.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    language: Vec<CategoryRules>,
    domain: Vec<CategoryRules>,
}

impl PatternRegistry {
    /// Registry with the built-in tables.
    pub fn builtin() -> Result<Self, AppError> {
        Self::from_tables(LANGUAGE_TABLE, DOMAIN_TABLE)
    }

    /// Build a registry from raw tables, preserving their order.
    ///
    /// Fails if a category name repeats within an axis or a regex is invalid.
    pub fn from_tables(
        language: &[CategorySource<'_>],
        domain: &[CategorySource<'_>],
    ) -> Result<Self, AppError> {
        Ok(Self {
            language: compile_axis(Axis::Language, language)?,
            domain: compile_axis(Axis::Domain, domain)?,
        })
    }

    /// Categories of an axis in declaration order.
    pub fn categories(&self, axis: Axis) -> &[CategoryRules] {
        match axis {
            Axis::Language => &self.language,
            Axis::Domain => &self.domain,
        }
    }

    /// Emoji for a category, or the axis fallback glyph.
    pub fn emoji_for(&self, axis: Axis, category: &str) -> &str {
        self.categories(axis)
            .iter()
            .find(|c| c.name == category)
            .and_then(|c| c.emoji.as_deref())
            .unwrap_or_else(|| axis.fallback_glyph())
    }

    /// Total number of rules on an axis.
    pub fn rule_count(&self, axis: Axis) -> usize {
        self.categories(axis).iter().map(|c| c.rules.len()).sum()
    }
}

fn compile_axis(axis: Axis, table: &[CategorySource<'_>]) -> Result<Vec<CategoryRules>, AppError> {
    let mut seen = HashSet::new();
    let mut categories = Vec::with_capacity(table.len());

    for (name, emoji, patterns) in table {
        if !seen.insert(*name) {
            return Err(AppError::Validation(format!(
                "Duplicate {} category: {}",
                axis, name
            )));
        }

        let rules = patterns
            .iter()
            .map(|p| PatternRule::new(name, p, axis.rule_kind()))
            .collect::<Result<Vec<_>, _>>()?;

        categories.push(CategoryRules {
            name: name.to_string(),
            emoji: (!emoji.is_empty()).then(|| emoji.to_string()),
            rules,
        });
    }

    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_compile() {
        let registry = PatternRegistry::builtin().expect("builtin tables compile");

        assert_eq!(registry.categories(Axis::Language).len(), 17);
        assert_eq!(registry.categories(Axis::Domain).len(), 25);
        assert!(registry.rule_count(Axis::Language) > 200);
    }

    #[test]
    fn test_registry_order_is_declaration_order() {
        let registry = PatternRegistry::builtin().unwrap();

        let language: Vec<&str> = registry
            .categories(Axis::Language)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(
            language,
            vec![
                "python", "javascript", "java", "cpp", "html", "css", "php", "ruby", "go",
                "rust", "swift", "kotlin", "typescript", "sql", "bash", "roman_urdu", "urdu",
            ]
        );

        let domain = registry.categories(Axis::Domain);
        assert_eq!(domain[0].name, "ai_ml_research");
        assert_eq!(domain[domain.len() - 1].name, "gaming_entertainment");
    }

    #[test]
    fn test_duplicate_category_rejected() {
        let table: &[CategorySource] = &[("alpha", "", &["a"]), ("alpha", "", &["b"])];
        let result = PatternRegistry::from_tables(table, &[]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        let table: &[CategorySource] = &[("broken", "", &["(unclosed"])];
        assert!(PatternRegistry::from_tables(table, &[]).is_err());
    }

    #[test]
    fn test_regex_rule_counts_occurrences_case_insensitive() {
        let rule = PatternRule::new("sql", r"INSERT\s+INTO", RuleKind::Regex).unwrap();
        let text = "insert into a; INSERT INTO b;";
        assert_eq!(rule.count_matches(text, &text.to_lowercase()), 2);
    }

    #[test]
    fn test_keyword_rule_counts_occurrences() {
        let rule = PatternRule::new("data_science", "Data", RuleKind::Keyword).unwrap();
        let text = "DATA in, data out, metadata";
        assert_eq!(rule.count_matches(text, &text.to_lowercase()), 3);
    }

    #[test]
    fn test_emoji_fallback() {
        let table: &[CategorySource] = &[("plain", "", &["x"])];
        let registry = PatternRegistry::from_tables(table, table).unwrap();
        assert_eq!(registry.emoji_for(Axis::Language, "plain"), "🔍");
        assert_eq!(registry.emoji_for(Axis::Domain, "plain"), "🎯");

        let builtin = PatternRegistry::builtin().unwrap();
        assert_eq!(builtin.emoji_for(Axis::Language, "rust"), "🦀");
    }
}

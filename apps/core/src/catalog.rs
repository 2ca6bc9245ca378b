//! Feature and model catalogues.
//!
//! Both are built once at startup and shared read-only. Lookups never fail:
//! unknown ids resolve to a synthetic descriptor so dispatch can degrade
//! gracefully.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use crate::brain::title_case;
use crate::error::AppError;

/// Model used when a request does not name one.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Emoji for features missing from the catalogue.
pub const FALLBACK_FEATURE_EMOJI: &str = "🎯";

/// `(id, emoji, display name, category)`
type FeatureRow = (&'static str, &'static str, &'static str, &'static str);

const BASE_FEATURES: &[FeatureRow] = &[
    // Core
    ("chat", "💬", "AI Chat Assistant", "core"),
    ("quantum_chat", "🚀", "Quantum Chat", "core"),
    ("autonomous_mode", "🤖", "Autonomous AI", "core"),
    ("multi_model_chat", "🔄", "Multi-Model Chat", "core"),
    ("quantum_mode", "⚡", "Quantum Mode", "core"),
    // Code
    ("code_analyzer", "🧠", "Code Analyzer", "code"),
    ("code_genius", "💻", "Code Genius", "code"),
    ("web_dev_master", "🌐", "Web Development", "code"),
    ("bug_detector", "🐛", "Bug Detector", "code"),
    ("code_review", "👨‍💻", "Code Review", "code"),
    ("code_translator", "🔄", "Code Translator", "code"),
    ("performance_optimizer", "⚡", "Performance Optimizer", "code"),
    ("unit_test_generator", "✅", "Unit Test Generator", "code"),
    ("api_generator", "🔌", "API Generator", "code"),
    ("api_documentation", "📖", "API Documentation", "code"),
    ("database_design", "🗄️", "Database Design", "code"),
    ("system_architecture", "🏗️", "System Architecture", "code"),
    ("mobile_app_dev", "📱", "Mobile App Dev", "code"),
    ("iot_expert", "🔌", "IoT Expert", "code"),
    ("ar_vr_creator", "🕶️", "AR/VR Creator", "code"),
    // Data
    ("data_analyzer", "📊", "Data Analyzer", "data"),
    ("data_science_pro", "🔬", "Data Science", "data"),
    ("market_analysis", "📈", "Market Analysis", "data"),
    ("financial_analysis", "💹", "Financial Analysis", "data"),
    ("economic_analysis", "💰", "Economic Analysis", "data"),
    ("competitor_analysis", "🔍", "Competitor Analysis", "data"),
    ("sentiment_analysis", "😊", "Sentiment Analysis", "data"),
    ("predictive_modeling", "🔮", "Predictive Modeling", "data"),
    ("big_data_engineer", "💾", "Big Data Engineer", "data"),
    ("bi_dashboard", "📊", "BI Dashboard", "data"),
    // Security
    ("security_scanner", "🔐", "Security Scanner", "security"),
    ("cyber_security", "🛡️", "Cyber Security", "security"),
    ("security_audit", "🔒", "Security Audit", "security"),
    ("penetration_tester", "🕵️", "Penetration Tester", "security"),
    ("forensic_analyst", "🔍", "Forensic Analyst", "security"),
    ("compliance_checker", "📋", "Compliance Checker", "security"),
    ("threat_hunter", "🎯", "Threat Hunter", "security"),
    ("incident_responder", "🚨", "Incident Responder", "security"),
    // Cloud
    ("cloud_architect", "☁️", "Cloud Architect", "cloud"),
    ("cloud_deployment", "☁️", "Cloud Deployment", "cloud"),
    ("devops_pipeline", "🔄", "DevOps Pipeline", "cloud"),
    ("container_orchestrator", "🐳", "Container Orchestrator", "cloud"),
    ("serverless_expert", "⚡", "Serverless Expert", "cloud"),
    ("hybrid_cloud", "🔄", "Hybrid Cloud", "cloud"),
    ("cost_optimizer", "💰", "Cloud Cost Optimizer", "cloud"),
    ("migration_specialist", "➡️", "Cloud Migration", "cloud"),
    // Business
    ("startup_advisor", "🚀", "Startup Advisor", "business"),
    ("business_strategy", "📈", "Business Strategy", "business"),
    ("business_plan", "💼", "Business Plan Creator", "business"),
    ("marketing_genius", "📢", "Marketing Genius", "business"),
    ("sales_optimizer", "💰", "Sales Optimizer", "business"),
    ("content_strategy", "📝", "Content Strategy", "business"),
    ("seo_optimizer", "🔍", "SEO Optimizer", "business"),
    ("social_media_manager", "📱", "Social Media Manager", "business"),
    ("hr_recruiter", "👥", "HR Recruiter", "business"),
    ("legal_contract", "⚖️", "Legal Contracts", "business"),
    ("risk_manager", "⚠️", "Risk Manager", "business"),
    ("sustainability_consult", "🌍", "Sustainability Consult", "business"),
    // Creative
    ("content_creator", "✍️", "Content Creator", "creative"),
    ("idea_generator", "💡", "Idea Generator", "creative"),
    ("video_producer", "🎥", "Video Producer", "creative"),
    ("music_composer", "🎵", "Music Composer", "creative"),
    ("ui_ux_designer", "🎨", "UI/UX Designer", "creative"),
    ("logo_designer", "⚡", "Logo Designer", "creative"),
    ("brand_identity", "🎨", "Brand Identity", "creative"),
    ("color_palette", "🎨", "Color Palette Generator", "creative"),
    ("font_pairing", "🔤", "Font Pairing", "creative"),
    ("ui_components", "🧩", "UI Components", "creative"),
    ("animation_master", "🎞️", "Animation Master", "creative"),
    ("storyteller", "📖", "Storyteller", "creative"),
    // Science
    ("scientific_research", "🧪", "Scientific Research", "science"),
    ("ai_research", "🤖", "AI Research", "science"),
    ("quantum_computing", "⚛️", "Quantum Computing", "science"),
    ("medical_expert", "🏥", "Medical Expert", "science"),
    ("dr_ai_diagnosis", "🩺", "Medical Analysis", "science"),
    ("engineering_pro", "⚙️", "Engineering Pro", "science"),
    ("math_genius", "🧮", "Math Genius", "science"),
    ("physics_expert", "🌌", "Physics Expert", "science"),
    ("historian_research", "📚", "Historical Research", "science"),
    ("biology_expert", "🧬", "Biology Expert", "science"),
    ("chemistry_wizard", "⚗️", "Chemistry Wizard", "science"),
    ("astronomy_guru", "🪐", "Astronomy Guru", "science"),
    // Utilities
    ("multilingual_expert", "🌐", "Multilingual Expert", "utilities"),
    ("text_translator", "🔤", "Text Translator", "utilities"),
    ("summary_maker", "📝", "Text Summarizer", "utilities"),
    ("document_analyzer", "📑", "Document Analyzer", "utilities"),
    ("presentation_maker", "📽️", "Presentation Maker", "utilities"),
    ("email_writer", "✉️", "Email Writer", "utilities"),
    ("resume_builder", "📄", "Resume Builder", "utilities"),
    ("interview_prep", "🎯", "Interview Preparation", "utilities"),
    ("learning_plan", "🎓", "Learning Plan Creator", "utilities"),
    ("project_planner", "📅", "Project Planner", "utilities"),
    ("education_tutor", "🎓", "Education Tutor", "utilities"),
    ("file_reader", "📁", "File Reader", "utilities"),
    ("web_scraper", "🌐", "Web Scraper", "utilities"),
    ("zip_extractor", "🗃️", "ZIP Extractor", "utilities"),
    ("plugin_loader", "🧩", "Plugin Loader", "utilities"),
    // Professional and lifestyle
    ("legal_advisor", "⚖️", "Legal Advisor", "professional"),
    ("travel_guide", "✈️", "Travel Guide", "lifestyle"),
    ("cooking_chef", "👨‍🍳", "Cooking Chef", "lifestyle"),
    ("game_developer", "🎮", "Game Developer", "creative"),
    ("fitness_coach", "💪", "Fitness Coach", "lifestyle"),
    ("nutritionist", "🥗", "Nutritionist", "lifestyle"),
    ("psychology_counsel", "🧠", "Psychology Counsel", "professional"),
    ("career_coach", "🎯", "Career Coach", "professional"),
    ("financial_planner", "💰", "Financial Planner", "professional"),
    ("real_estate_advisor", "🏠", "Real Estate Advisor", "professional"),
    // Testing
    ("api_testing", "🧪", "API Testing", "testing"),
    ("integration_testing", "🔗", "Integration Testing", "testing"),
    ("performance_testing", "⚡", "Performance Testing", "testing"),
    ("load_testing", "📊", "Load Testing", "testing"),
    ("ui_testing", "👁️", "UI Testing", "testing"),
    ("security_testing", "🔒", "Security Testing", "testing"),
    ("automation_script", "🤖", "Automation Script", "testing"),
    ("qa_strategy", "📋", "QA Strategy", "testing"),
    // Search
    ("quantum_search", "🪐", "Quantum Search", "search"),
    ("blockchain_expert", "⛓️", "Blockchain Expert", "tech"),
    ("system_status", "📈", "System Status", "system"),
    ("trend_forecaster", "📈", "Trend Forecaster", "search"),
    ("knowledge_graph", "🕸️", "Knowledge Graph", "search"),
];

/// Themed groups expanded into generated features, display name = title-cased id.
const GENERATED_GROUPS: &[(&str, &str, [&str; 5])] = &[
    ("ecommerce", "🛒", ["ecommerce_strategy", "product_recommender", "inventory_manager", "customer_segment", "pricing_optimizer"]),
    ("environment", "🌍", ["climate_model", "sustainability_plan", "carbon_footprint", "eco_innovation", "biodiversity_assess"]),
    ("sports", "⚽", ["sports_analyst", "training_plan", "team_builder", "injury_prevent", "performance_tracker"]),
    ("entertainment", "🎭", ["script_writer", "movie_reviewer", "podcast_host", "event_planner", "celebrity_advisor"]),
    ("agriculture", "🌾", ["crop_yield_predict", "soil_analyzer", "farm_automation", "pest_detector", "supply_chain"]),
    ("automotive", "🚗", ["car_design", "engine_optimizer", "autonomous_drive", "ev_battery", "traffic_ai"]),
    ("fashion", "👗", ["trend_predict", "design_generator", "fabric_analyzer", "sustainable_fashion", "virtual_fitting"]),
    ("health", "🏥", ["wellness_plan", "diet_recommender", "mental_health", "genomics", "telemedicine"]),
];

/// A named preset controlling prompt template and handling path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDescriptor {
    pub id: String,
    pub display_name: String,
    pub emoji: String,
    pub category: Option<String>,
}

impl FeatureDescriptor {
    /// Synthetic descriptor for ids missing from the catalogue.
    pub fn unregistered(id: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: id.to_string(),
            emoji: FALLBACK_FEATURE_EMOJI.to_string(),
            category: None,
        }
    }

    /// `"<emoji> <display name>"`
    pub fn label(&self) -> String {
        format!("{} {}", self.emoji, self.display_name)
    }
}

/// Registry of all features, in declaration order.
#[derive(Debug, Clone)]
pub struct FeatureCatalog {
    features: Vec<FeatureDescriptor>,
    index: HashMap<String, usize>,
}

impl FeatureCatalog {
    /// Hand-listed base features followed by the generated groups.
    pub fn builtin() -> Result<Self, AppError> {
        let base = BASE_FEATURES.iter().map(|(id, emoji, name, category)| FeatureDescriptor {
            id: id.to_string(),
            display_name: name.to_string(),
            emoji: emoji.to_string(),
            category: Some(category.to_string()),
        });

        let generated = GENERATED_GROUPS.iter().flat_map(|(category, emoji, ids)| {
            ids.iter().map(move |id| FeatureDescriptor {
                id: id.to_string(),
                display_name: title_case(id),
                emoji: emoji.to_string(),
                category: Some(category.to_string()),
            })
        });

        let catalog = Self::from_descriptors(base.chain(generated).collect())?;
        info!(
            "Feature catalog ready: {} base, {} generated",
            BASE_FEATURES.len(),
            catalog.len() - BASE_FEATURES.len()
        );
        Ok(catalog)
    }

    /// Build from explicit descriptors. Fails on duplicate ids.
    pub fn from_descriptors(features: Vec<FeatureDescriptor>) -> Result<Self, AppError> {
        let mut index = HashMap::with_capacity(features.len());
        for (position, feature) in features.iter().enumerate() {
            if index.insert(feature.id.clone(), position).is_some() {
                return Err(AppError::Validation(format!(
                    "Duplicate feature id: {}",
                    feature.id
                )));
            }
        }
        Ok(Self { features, index })
    }

    pub fn get(&self, id: &str) -> Option<&FeatureDescriptor> {
        self.index.get(id).map(|&position| &self.features[position])
    }

    /// Registered descriptor or the synthetic default.
    pub fn resolve(&self, id: &str) -> FeatureDescriptor {
        self.get(id)
            .cloned()
            .unwrap_or_else(|| FeatureDescriptor::unregistered(id))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureDescriptor> {
        self.features.iter()
    }
}

/// A completion model offered to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub display_name: String,
    pub context_length: u32,
    pub tier: String,
}

impl ModelDescriptor {
    /// `"🚀 <display name>"`
    pub fn label(&self) -> String {
        format!("🚀 {}", self.display_name)
    }
}

const MODELS: &[(&str, &str, u32, &str)] = &[
    ("llama-3.3-70b-versatile", "🦙 Llama 3.3 70B Versatile", 131072, "ultimate"),
    ("llama-3.1-8b-instant", "⚡ Llama 3.1 8B Instant", 131072, "instant"),
    ("qwen/qwen3-32b", "🎯 Qwen 3 32B", 131072, "reasoning"),
    ("openai/gpt-oss-20b", "💎 GPT OSS 20B", 131072, "efficient"),
];

#[derive(Debug, Clone)]
pub struct ModelCatalog {
    models: Vec<ModelDescriptor>,
}

impl ModelCatalog {
    pub fn builtin() -> Self {
        Self {
            models: MODELS
                .iter()
                .map(|(id, name, context_length, tier)| ModelDescriptor {
                    id: id.to_string(),
                    display_name: name.to_string(),
                    context_length: *context_length,
                    tier: tier.to_string(),
                })
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ModelDescriptor> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Registered descriptor, or one named after the id itself.
    pub fn resolve(&self, id: &str) -> ModelDescriptor {
        self.get(id).cloned().unwrap_or_else(|| ModelDescriptor {
            id: id.to_string(),
            display_name: id.to_string(),
            context_length: 0,
            tier: "unknown".to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter()
    }
}

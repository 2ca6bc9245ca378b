//! Prompt templates and canned responses.

use crate::catalog::{FeatureDescriptor, ModelDescriptor};

/// System message sent ahead of every user prompt.
pub const SYSTEM_PREAMBLE: &str = "You are Switchboard, a multi-purpose AI assistant. \
Each request arrives through a feature preset that sets the task; follow it closely, \
be accurate, and structure longer answers with short headings or lists.";

/// Build the user prompt for a feature.
///
/// Features with a dedicated template use it; everything else gets the generic
/// template naming the feature and model.
pub fn build_prompt(
    feature_id: &str,
    input: &str,
    feature: &FeatureDescriptor,
    model: &ModelDescriptor,
) -> String {
    match feature_id {
        "chat" => format!(
            "User Query: {input}\n\nGive the most accurate and complete answer you can."
        ),
        "autonomous_mode" => format!(
            "AUTONOMOUS MODE\n\nTask: {input}\n\nWork through this task on your own: break it into steps, \
             solve each one and show your reasoning."
        ),
        "code_analyzer" => format!(
            "Analyze this code:\n\n{input}\n\nCover code quality, bugs, security issues, \
             performance and best practices."
        ),
        "data_analyzer" => format!(
            "Data/Request: {input}\n\nReport trends, patterns, actionable insights and predictions."
        ),
        "idea_generator" => format!(
            "Topic/Request: {input}\n\nGenerate ideas with an implementation plan, business potential \
             and a monetization angle for each."
        ),
        "security_scanner" => format!(
            "Code/Content to scan: {input}\n\nIdentify vulnerabilities, assess their risk and \
             recommend protections."
        ),
        "quantum_search" => format!(
            "QUANTUM SEARCH\n\nQuery: {input}\n\nAnalyze the query across every relevant domain and \
             include forward-looking insights."
        ),
        "multi_model_chat" => format!(
            "MULTI-MODEL CHAT\n\nUser Input: {input}\n\nAnswer as if combining the strengths of several \
             assistants, noting where perspectives differ."
        ),
        "quantum_mode" => format!(
            "QUANTUM MODE\n\nInput: {input}\n\nExplore several solution paths in parallel and compare them."
        ),
        "business_strategy" => format!(
            "BUSINESS STRATEGY MODE: {input}\n\nProduce a business plan with a SWOT analysis, KPIs \
             and growth tactics."
        ),
        "medical_expert" => format!(
            "MEDICAL EXPERT MODE: {input}\n\nGive an expert analysis, a breakdown of symptoms and \
             recommendations. Remind the reader to consult a doctor."
        ),
        _ => format!(
            "Feature: {}\nModel: {}\nUser Input: {input}\n\nProvide a thorough, expert-level response.",
            feature.label(),
            model.display_name,
        ),
    }
}

/// Canned text used when the completion service is unavailable or unconfigured.
pub fn fallback_response(feature_id: &str, input: &str) -> String {
    match feature_id {
        "chat" => "💬 Demo mode: the completion service is not reachable, so this is a placeholder reply. \
                   Configure an API key to get real answers."
            .to_string(),
        "quantum_chat" => "⚛️ Demo mode: Quantum Chat would explore your question from several angles \
                           once a completion service is configured."
            .to_string(),
        "code_analyzer" => "🧠 Demo mode: Code Analyzer would review quality, bugs, security and \
                            performance here. No live analysis is available right now."
            .to_string(),
        "business_strategy" => "📈 Demo mode: Business Strategy would outline a plan with SWOT, KPIs \
                                and growth tactics. Connect a completion service for a real plan."
            .to_string(),
        "medical_expert" => "🏥 Demo mode: Medical Expert is offline. This is not medical advice; \
                             please consult a qualified doctor."
            .to_string(),
        "data_analyzer" => "📊 Demo mode: Data Analyzer would surface trends and insights from your \
                            data once a completion service is configured."
            .to_string(),
        "idea_generator" => "💡 Demo mode: Idea Generator would brainstorm options with implementation \
                             plans here. Configure an API key to generate ideas."
            .to_string(),
        "security_scanner" => "🔐 Demo mode: the detailed security review is unavailable. The static \
                               pattern scan still runs locally."
            .to_string(),
        "autonomous_mode" => "🤖 Demo mode: Autonomous AI would plan and execute your task step by step \
                              once a completion service is configured."
            .to_string(),
        _ => format!(
            "🎯 Demo mode: received your request \"{input}\". Configure an API key for a full response."
        ),
    }
}

/// Text used when the service answered but the payload had no usable choice.
pub fn invalid_response_fallback(feature_id: &str, input: &str) -> String {
    let excerpt: String = input.chars().take(50).collect();
    format!("🚀 Demo fallback for {feature_id}: no usable completion was returned. Input: {excerpt}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FeatureCatalog, ModelCatalog, DEFAULT_MODEL};

    fn descriptors(feature_id: &str) -> (FeatureDescriptor, ModelDescriptor) {
        let features = FeatureCatalog::builtin().unwrap();
        let models = ModelCatalog::builtin();
        (features.resolve(feature_id), models.resolve(DEFAULT_MODEL))
    }

    #[test]
    fn test_dedicated_template_embeds_input() {
        let (feature, model) = descriptors("code_analyzer");
        let prompt = build_prompt("code_analyzer", "let x = 1;", &feature, &model);
        assert!(prompt.starts_with("Analyze this code:\n\nlet x = 1;"));
    }

    #[test]
    fn test_generic_template_names_feature_and_model() {
        let (feature, model) = descriptors("storyteller");
        let prompt = build_prompt("storyteller", "a dragon", &feature, &model);
        assert!(prompt.contains("Feature: 📖 Storyteller"));
        assert!(prompt.contains("Model: 🦙 Llama 3.3 70B Versatile"));
        assert!(prompt.contains("User Input: a dragon"));
    }

    #[test]
    fn test_default_fallback_embeds_input() {
        assert!(fallback_response("storyteller", "a dragon").contains("a dragon"));
        assert!(fallback_response("chat", "hi").starts_with("💬"));
    }

    #[test]
    fn test_invalid_response_fallback_truncates_on_char_boundary() {
        let input = "é".repeat(80);
        let text = invalid_response_fallback("chat", &input);
        assert!(text.contains("Demo fallback for chat"));
        assert!(text.contains(&"é".repeat(50)));
        assert!(!text.contains(&"é".repeat(51)));
    }
}

use crate::constants::ANALYSIS_INSTRUCTIONS;
use crate::error::{RenderError, Result};
use crate::gemini::{
    GeminiClient, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::options::Category;
use crate::upload::ImagePayload;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub category: Category,
    pub mockup_style: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    category: String,
    mockup_style: String,
}

/// Output schema handed to the model: exactly two required string fields.
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "category": {
                "type": "STRING",
                "enum": Category::labels(),
            },
            "mockupStyle": {
                "type": "STRING",
            }
        },
        "required": ["category", "mockupStyle"],
        "propertyOrdering": ["category", "mockupStyle"]
    })
}

pub fn analysis_request(image: &ImagePayload) -> GenerateContentRequest {
    let instructions = format!(
        "{} The category must be one of: {}.",
        ANALYSIS_INSTRUCTIONS,
        Category::labels().join(", ")
    );
    GenerateContentRequest::with_image(
        image,
        instructions,
        GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(response_schema()),
            ..Default::default()
        },
    )
}

/// Parses the model's JSON answer. The category must match a label exactly;
/// anything else falls back to the default category instead of failing.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult> {
    let raw: RawAnalysis = serde_json::from_str(text.trim())
        .map_err(|e| RenderError::AnalysisFailure(format!("invalid analysis JSON: {}", e)))?;

    let category = Category::from_label(&raw.category).unwrap_or_else(|| {
        log::warn!(
            "Analysis suggested unknown category {:?}, using {}",
            raw.category,
            Category::default()
        );
        Category::default()
    });

    Ok(AnalysisResult {
        category,
        mockup_style: raw.mockup_style,
    })
}

fn interpret_analysis_response(response: GenerateContentResponse) -> Result<AnalysisResult> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(RenderError::EmptyResponse)?;
    let text = candidate.text();
    if text.is_empty() {
        return Err(RenderError::AnalysisFailure("analysis returned no text".into()));
    }
    parse_analysis(&text)
}

impl GeminiClient {
    /// Best-effort product classification. Every failure comes back as
    /// `AnalysisFailure`; callers decide to ignore it.
    pub async fn analyze_product(&self, image: &ImagePayload) -> Result<AnalysisResult> {
        log::info!(
            "Analyzing product image with model {} ({} bytes)",
            self.analysis_model,
            image.size()
        );
        let body = analysis_request(image);

        self.generate_content(&self.analysis_model, &body)
            .await
            .and_then(interpret_analysis_response)
            .map_err(|e| match e {
                RenderError::AnalysisFailure(_) => e,
                other => RenderError::AnalysisFailure(other.to_string()),
            })
    }
}

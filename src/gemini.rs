use crate::config::Config;
use crate::constants::API_KEY_HEADER;
use crate::error::{RenderError, Result};
use crate::upload::ImagePayload;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Client,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerateContentRequest {
    /// The product photo always goes first, followed by the instruction text.
    pub fn with_image(image: &ImagePayload, text: String, config: GenerationConfig) -> Self {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.mime_type().to_string(),
                            data: image.to_base64(),
                        },
                    },
                    Part::Text { text },
                ],
            }],
            generation_config: config,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

// Response parts are decoded leniently: the provider adds fields we ignore.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inline_data: Option<InlineData>,
}

impl Candidate {
    fn parts(&self) -> &[ResponsePart] {
        self.content
            .as_ref()
            .map(|c| c.parts.as_slice())
            .unwrap_or(&[])
    }

    pub fn inline_data(&self) -> Option<&InlineData> {
        self.parts().iter().find_map(|p| p.inline_data.as_ref())
    }

    /// All text parts joined together, trimmed.
    pub fn text(&self) -> String {
        self.parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<String>()
            .trim()
            .to_string()
    }
}

pub fn build_headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let key = HeaderValue::from_str(api_key).map_err(|_| {
        RenderError::Configuration("API key contains characters not allowed in a header".into())
    })?;
    headers.insert(HeaderName::from_static(API_KEY_HEADER), key);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

/// Thin authenticated wrapper around the `generateContent` endpoint.
///
/// Construction fails with a configuration error when no key is set, so a
/// client that exists is always able to send.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    headers: HeaderMap,
    api_base: String,
    pub(crate) render_model: String,
    pub(crate) analysis_model: String,
}

impl GeminiClient {
    pub fn new(http: Client, config: &Config) -> Result<Self> {
        let headers = build_headers(config.require_api_key()?)?;
        Ok(Self {
            http,
            headers,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            render_model: config.render_model.clone(),
            analysis_model: config.analysis_model.clone(),
        })
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base, model)
    }

    pub async fn generate_content(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.endpoint(model);
        log::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Request to {} failed with status {}: {}", model, status, body);
            return Err(RenderError::Network {
                status: Some(status.as_u16()),
                message: format!("request failed with status {}", status),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| RenderError::MalformedResponse(e.to_string()))
    }
}

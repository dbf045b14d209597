use crate::error::{RenderError, Result};
use crate::gemini::{
    GeminiClient, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::options::RenderOptions;
use crate::prompt::build_prompt;
use crate::upload::ImagePayload;
use std::path::Path;

/// Finish reasons that mean the provider refused to produce the image.
pub const BLOCKING_FINISH_REASONS: [&str; 10] = [
    "SAFETY",
    "RECITATION",
    "OTHER",
    "IMAGE_SAFETY",
    "IMAGE_RECITATION",
    "IMAGE_OTHER",
    "PROHIBITED_CONTENT",
    "IMAGE_PROHIBITED_CONTENT",
    "BLOCKLIST",
    "SPII",
];

pub fn is_blocking_reason(reason: &str) -> bool {
    BLOCKING_FINISH_REASONS.contains(&reason)
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub data: Vec<u8>,
    encoded: String,
}

impl GeneratedImage {
    /// Decodes the provider's base64 payload. Line breaks and non-zero
    /// trailing bits are tolerated. The provider's text, minus whitespace,
    /// is what `to_data_uri` returns.
    pub fn from_base64(mime_type: impl Into<String>, encoded: &str) -> Result<Self> {
        let encoded: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let config = base64::STANDARD.decode_allow_trailing_bits(true);
        let data = base64::decode_config(&encoded, config).map_err(|e| {
            RenderError::MalformedResponse(format!("image data is not valid base64: {}", e))
        })?;
        Ok(Self {
            mime_type: mime_type.into(),
            data,
            encoded,
        })
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.encoded)
    }

    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, &self.data)?;
        Ok(())
    }
}

pub fn render_request(options: &RenderOptions, image: &ImagePayload) -> GenerateContentRequest {
    GenerateContentRequest::with_image(
        image,
        build_prompt(options),
        GenerationConfig {
            response_modalities: Some(vec!["IMAGE".to_string()]),
            ..Default::default()
        },
    )
}

/// Turns a successful HTTP response into an image, or the reason there is none.
pub fn interpret_render_response(response: GenerateContentResponse) -> Result<GeneratedImage> {
    let candidate = match response.candidates.into_iter().next() {
        Some(candidate) => candidate,
        None => {
            let blocked = response
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason);
            return Err(match blocked {
                Some(reason) => RenderError::GenerationBlocked(reason),
                None => RenderError::EmptyResponse,
            });
        }
    };

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if is_blocking_reason(reason) {
            return Err(RenderError::GenerationBlocked(reason.to_string()));
        }
    }

    if let Some(inline) = candidate.inline_data() {
        return GeneratedImage::from_base64(inline.mime_type.clone(), &inline.data);
    }

    let text = candidate.text();
    if !text.is_empty() {
        return Err(RenderError::UnexpectedTextResponse(text));
    }

    Err(RenderError::NoImageData)
}

impl GeminiClient {
    pub async fn generate_render(
        &self,
        options: &RenderOptions,
        image: &ImagePayload,
    ) -> Result<GeneratedImage> {
        options.validate()?;
        let body = render_request(options, image);

        log::info!(
            "Generating render with model {} ({}, {} bytes)",
            self.render_model,
            image.mime_type(),
            image.size()
        );

        let response = self.generate_content(&self.render_model, &body).await?;
        let image = interpret_render_response(response)?;
        log::info!("Received {} image ({} bytes)", image.mime_type, image.data.len());
        Ok(image)
    }
}

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The API credential is missing. Nothing can be sent.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Bad input caught before any request is made.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("network error: {message}")]
    Network { status: Option<u16>, message: String },

    /// The provider stopped generation for policy reasons.
    #[error("image generation was blocked (reason: {0})")]
    GenerationBlocked(String),

    #[error("API returned text instead of an image: \"{0}\"")]
    UnexpectedTextResponse(String),

    #[error("API response was empty: no candidates found")]
    EmptyResponse,

    #[error("no image data found in the API response")]
    NoImageData,

    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    #[error("product analysis failed: {0}")]
    AnalysisFailure(String),

    #[error("a render is already in progress")]
    Busy,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RenderError {
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Text suitable for showing to the person who pressed "generate".
    pub fn user_message(&self) -> String {
        if self.is_network() {
            return "A network error occurred. Please check your connection and try again."
                .to_string();
        }
        match self {
            Self::GenerationBlocked(reason) => format!(
                "Image generation failed. The prompt may have been blocked for safety or other reasons (Reason: {}).",
                reason
            ),
            Self::EmptyResponse => {
                "API response was empty or invalid. No candidates found.".to_string()
            }
            Self::NoImageData => "No image data found in the API response. The model may have failed to generate an image.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for RenderError {
    fn from(err: reqwest::Error) -> Self {
        RenderError::Network {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;

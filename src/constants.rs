pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_RENDER_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-2.5-flash";
pub const API_KEY_ENV: &str = "API_KEY";
pub const API_KEY_FALLBACK_ENV: &str = "GEMINI_API_KEY";
pub const API_KEY_HEADER: &str = "x-goog-api-key";
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/webp"];

pub const DEFAULT_MOCKUP_STYLE: &str = "On a minimalist marble surface";
pub const DEFAULT_ANGLE: u16 = 45;
pub const MAX_ANGLE: u16 = 360;

pub const ANALYSIS_INSTRUCTIONS: &str = "Analyze this product image. Identify which product category it belongs to and suggest a short, professional background scene description that would showcase it well in an e-commerce photo.";

pub const CMD_PROMPT: &str = "p";
pub const CMD_ANALYZE: &str = "a";
pub const CMD_RENDER: &str = "r";

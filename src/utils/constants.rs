// Upstream caps images at 32 MiB; leave headroom for multipart framing.
pub const SERVER_REQUEST_BODY_LIMIT: usize = 35 * 1024 * 1024;

pub const VECTORIZER_API_URL: &str = "https://api.vectorizer.ai/api/v1";

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

pub const CREDITS_CHARGED_HEADER: &str = "x-credits-charged";
pub const CREDITS_CALCULATED_HEADER: &str = "x-credits-calculated";

use crate::core::upstream::UpstreamClient;
use crate::server::session::SessionGate;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct AppState {
    // None when the credential pair is unconfigured; proxied routes then
    // answer 500 without touching the network.
    pub upstream: Option<UpstreamClient>,
    pub gate: SessionGate,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingMode {
    Production,
    Preview,
    Test,
    TestPreview,
}

impl ProcessingMode {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "production" => Some(Self::Production),
            "preview" => Some(Self::Preview),
            "test" => Some(Self::Test),
            "test_preview" => Some(Self::TestPreview),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Preview => "preview",
            Self::Test => "test",
            Self::TestPreview => "test_preview",
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Svg,
    Eps,
    Pdf,
    Dxf,
    Png,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "svg" => Some(Self::Svg),
            "eps" => Some(Self::Eps),
            "pdf" => Some(Self::Pdf),
            "dxf" => Some(Self::Dxf),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Eps => "eps",
            Self::Pdf => "pdf",
            Self::Dxf => "dxf",
            Self::Png => "png",
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Wire contract with the browser client; field names match what the
// original web bundle expects, hence the camelCase.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VectorizeResult {
    pub content: String,
    pub content_type: String,
    pub is_base64: bool,
    pub credits_charged: f64,
    pub credits_calculated: f64,
}

#[cfg(test)]
mod cfg_tests {
    use crate::server::types::{OutputFormat, ProcessingMode, VectorizeResult};

    #[test]
    pub fn test_mode_and_format_round_trip() {
        for raw in ["production", "preview", "test", "test_preview"] {
            assert_eq!(ProcessingMode::parse(raw).unwrap().as_str(), raw);
        }
        for raw in ["svg", "eps", "pdf", "dxf", "png"] {
            assert_eq!(OutputFormat::parse(raw).unwrap().as_str(), raw);
        }
        assert!(ProcessingMode::parse("PRODUCTION").is_none());
        assert!(OutputFormat::parse("jpeg").is_none());
    }

    #[test]
    pub fn test_result_serializes_camel_case() {
        let result = VectorizeResult {
            content: "<svg/>".to_string(),
            content_type: "image/svg+xml".to_string(),
            is_base64: false,
            credits_charged: 0.0,
            credits_calculated: 0.15,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["contentType"], "image/svg+xml");
        assert_eq!(value["isBase64"], false);
        assert_eq!(value["creditsCalculated"], 0.15);
    }
}

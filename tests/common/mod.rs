#![allow(dead_code)]

use prompt_capture::config::{LoggingSettings, ServerSettings, SimilaritySettings};
use prompt_capture::routes::{create_router, AppState};
use prompt_capture::Settings;
use std::sync::Arc;

/// Structured 10-K extraction template, filled for Apple
pub const TEN_K_APPLE: &str = r#"## 10-K Filing Extraction

**Company:** Apple Inc.
**Fiscal Year:** 2023

Extract the following fields from the annual report and return them in JSON format:
- Total revenue
- Net income
- Risk factors
- Segment breakdown

Use this template:
{"company": "Apple Inc.", "fiscal_year": 2023, "revenue": null, "net_income": null}

Analyze each section carefully and identify any [material weaknesses] disclosed by management."#;

/// Same template, filled for Microsoft
pub const TEN_K_MICROSOFT: &str = r#"## 10-K Filing Extraction

**Company:** Microsoft Corporation
**Fiscal Year:** 2022

Extract the following fields from the annual report and return them in JSON format:
- Total revenue
- Net income
- Risk factors
- Segment breakdown

Use this template:
{"company": "Microsoft Corporation", "fiscal_year": 2022, "revenue": null, "net_income": null}

Analyze each section carefully and identify any [material weaknesses] disclosed by management."#;

/// Unstructured company-extraction-from-news prompt
pub const NEWS_COMPANIES: &str = "Read the news article below and tell me which companies are mentioned in it.
Reply with one company name per line and nothing else.

Article: Shares of several chipmakers rallied on Tuesday after a government report showed stronger than expected factory orders, lifting Nvidia, Intel and AMD.";

/// Settings for tests, independent of config files and environment
pub fn test_settings(similarity: SimilaritySettings) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            request_timeout: 30000,
        },
        logging: LoggingSettings {
            level: "info".to_string(),
            format: "pretty".to_string(),
        },
        similarity,
    }
}

/// Router with default similarity settings
pub fn test_app() -> axum::Router {
    test_app_with(SimilaritySettings::default())
}

/// Router with custom similarity settings
pub fn test_app_with(similarity: SimilaritySettings) -> axum::Router {
    create_router(AppState::new(Arc::new(test_settings(similarity))))
}

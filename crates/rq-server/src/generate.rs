//! Seam to the LLM-backed generation service.
//!
//! Prompt construction, retries, and timeouts all live behind this
//! trait; the server only hands it a session's cached text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The document kinds the generation service can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationKind {
    SystemRequirements,
    FunctionalDiagram,
    ExternalInterfaces,
    PerformanceRequirements,
    SecurityRequirements,
}

impl GenerationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SystemRequirements => "system-requirements",
            Self::FunctionalDiagram => "functional-diagram",
            Self::ExternalInterfaces => "external-interfaces",
            Self::PerformanceRequirements => "performance-requirements",
            Self::SecurityRequirements => "security-requirements",
        }
    }
}

/// Black-box text-to-text transformer.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, kind: GenerationKind, source_text: &str) -> anyhow::Result<String>;
}

//! Narrator Trait
//!
//! Common interface for whatever produces design narratives (hosted model,
//! local model, canned text in tests).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::CircuitGuardError;

#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("Narrator '{0}' is not available")]
    Unavailable(String),
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
    #[error("Design engine error: {0}")]
    Engine(#[from] CircuitGuardError),
}

/// Information about the model behind a narrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub provider: String,
    pub model_name: String,
    pub is_local: bool,
    /// Context window size in tokens
    pub context_window: usize,
}

#[async_trait]
pub trait DesignNarrator: Send + Sync {
    fn name(&self) -> &str;

    /// Checked once before a regeneration run starts.
    async fn is_available(&self) -> bool;

    /// Produce a free-text design description for the prompt.
    async fn describe_design(&self, prompt: &str) -> Result<String, AIError>;

    fn model_info(&self) -> ModelInfo;
}

//! Bounded regenerate-on-failure loop.

use serde::{Deserialize, Serialize};

use crate::ai::prompts::{build_correction_prompt, build_design_prompt};
use crate::ai::provider::{AIError, DesignNarrator};
use crate::core::{CircuitGuardCore, EngineOptions, ResponseReview};
use crate::design::{compute_design, CircuitParameters};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Asks a narrator for a design description, validates it, and feeds fix
/// instructions back until a response passes or the attempts run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegenerationLoop {
    max_attempts: u32,
}

impl Default for RegenerationLoop {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerationOutcome {
    /// Last response received.
    pub response: String,
    pub review: ResponseReview,
    pub attempts: u32,
    /// False when every attempt failed validation.
    pub accepted: bool,
}

impl RegenerationLoop {
    /// At least one attempt is always made.
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub async fn run(
        &self,
        narrator: &dyn DesignNarrator,
        params: &CircuitParameters,
        options: &EngineOptions,
    ) -> Result<RegenerationOutcome, AIError> {
        let design = compute_design(params, options)?;

        if !narrator.is_available().await {
            tracing::warn!("Narrator {} is not available", narrator.name());
            return Err(AIError::Unavailable(narrator.name().to_string()));
        }
        let model = narrator.model_info();
        tracing::debug!(
            "Using {} model {} (local: {})",
            model.provider,
            model.model_name,
            model.is_local
        );

        let mut prompt = build_design_prompt(params);
        let mut attempt = 0;

        loop {
            attempt += 1;
            tracing::info!(
                "Requesting design narrative from {} (attempt {}/{})",
                narrator.name(),
                attempt,
                self.max_attempts
            );

            let response = narrator.describe_design(&prompt).await?;
            if response.trim().is_empty() {
                return Err(AIError::InvalidResponse(format!(
                    "{} returned an empty narrative",
                    narrator.name()
                )));
            }
            let review = CircuitGuardCore::review_against(&response, design.clone(), options);

            if review.is_valid() || attempt >= self.max_attempts {
                let accepted = review.is_valid();
                if accepted {
                    tracing::info!("Narrative accepted after {} attempt(s)", attempt);
                } else {
                    tracing::warn!(
                        "Narrative still invalid after {} attempt(s); giving up",
                        attempt
                    );
                }
                return Ok(RegenerationOutcome {
                    response,
                    review,
                    attempts: attempt,
                    accepted,
                });
            }

            prompt = build_correction_prompt(params, &response, &review.fix_instructions);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::ModelInfo;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedNarrator {
        responses: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<String>>,
        available: bool,
    }

    impl ScriptedNarrator {
        fn new(responses: &[&str]) -> Self {
            Self {
                responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
                prompts: Mutex::new(Vec::new()),
                available: true,
            }
        }

        fn offline() -> Self {
            Self {
                available: false,
                ..Self::new(&[RIGHT])
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DesignNarrator for ScriptedNarrator {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn is_available(&self) -> bool {
            self.available
        }

        async fn describe_design(&self, prompt: &str) -> Result<String, AIError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(AIError::ApiError {
                    status: 503,
                    message: "script exhausted".to_string(),
                })
        }

        fn model_info(&self) -> ModelInfo {
            ModelInfo {
                provider: "test".to_string(),
                model_name: "scripted".to_string(),
                is_local: true,
                context_window: 0,
            }
        }
    }

    const WRONG: &str = "Design current is 32A, protected by a 25A MCB.";
    const RIGHT: &str = "Design current is 13.04A, protected by a 16A MCB.";

    fn params() -> CircuitParameters {
        CircuitParameters::single_phase(3000.0, 230.0, "immersion")
    }

    #[tokio::test]
    async fn test_first_valid_response_stops_loop() {
        let narrator = ScriptedNarrator::new(&[RIGHT, WRONG]);
        let outcome = RegenerationLoop::default()
            .run(&narrator, &params(), &EngineOptions::default())
            .await
            .expect("Should run loop");
        assert!(outcome.accepted);
        assert_eq!(outcome.attempts, 1);
        assert_eq!(narrator.calls(), 1);
    }

    #[tokio::test]
    async fn test_fix_instructions_fed_back() {
        let narrator = ScriptedNarrator::new(&[WRONG, RIGHT]);
        let outcome = RegenerationLoop::default()
            .run(&narrator, &params(), &EngineOptions::default())
            .await
            .unwrap();
        assert!(outcome.accepted);
        assert_eq!(outcome.attempts, 2);
        let prompts = narrator.prompts.lock().unwrap();
        assert!(prompts[1].contains(WRONG));
        assert!(prompts[1].contains("Recalculate the design current"));
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let narrator = ScriptedNarrator::new(&[WRONG, WRONG, WRONG, RIGHT]);
        let outcome = RegenerationLoop::default()
            .run(&narrator, &params(), &EngineOptions::default())
            .await
            .unwrap();
        assert!(!outcome.accepted);
        assert_eq!(outcome.attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(narrator.calls(), 3);
        assert!(!outcome.review.fix_instructions.is_empty());
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let narrator = ScriptedNarrator::new(&[WRONG]);
        let outcome = RegenerationLoop::with_max_attempts(0)
            .run(&narrator, &params(), &EngineOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome.attempts, 1);
    }

    #[tokio::test]
    async fn test_engine_error_stops_before_narrator() {
        let narrator = ScriptedNarrator::new(&[RIGHT]);
        let bad = CircuitParameters::single_phase(3000.0, 0.0, "immersion");
        let err = RegenerationLoop::default()
            .run(&narrator, &bad, &EngineOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AIError::Engine(_)));
        assert_eq!(narrator.calls(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_narrator_is_never_prompted() {
        let narrator = ScriptedNarrator::offline();
        let err = RegenerationLoop::default()
            .run(&narrator, &params(), &EngineOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AIError::Unavailable(ref name) if name == "scripted"));
        assert_eq!(narrator.calls(), 0);
    }

    #[tokio::test]
    async fn test_narrator_error_ends_loop() {
        let narrator = ScriptedNarrator::new(&[WRONG]);
        let err = RegenerationLoop::default()
            .run(&narrator, &params(), &EngineOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AIError::ApiError { status: 503, .. }));
        assert_eq!(narrator.calls(), 2);
    }

    #[tokio::test]
    async fn test_empty_narrative_is_invalid() {
        let narrator = ScriptedNarrator::new(&["  \n"]);
        let err = RegenerationLoop::default()
            .run(&narrator, &params(), &EngineOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AIError::InvalidResponse(_)));
    }
}

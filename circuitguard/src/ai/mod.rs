//! Generative narrative orchestration.
//!
//! The engine core never talks to a text generator. This module is the
//! caller-side glue: a provider trait, the prompts sent to it and the
//! bounded regenerate-until-valid loop.

pub mod prompts;
pub mod provider;
pub mod retry;

pub use prompts::{build_correction_prompt, build_design_prompt};
pub use provider::{AIError, DesignNarrator, ModelInfo};
pub use retry::{RegenerationLoop, RegenerationOutcome, DEFAULT_MAX_ATTEMPTS};

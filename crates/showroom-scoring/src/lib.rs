// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Visit scoring for the Showroom analysis service.
//!
//! Two scorers produce the same [`AnalysisResult`](showroom_core::AnalysisResult)
//! shape:
//!
//! - [`ModelScorer`] renders the visit with [`build_prompt`], calls a
//!   [`CompletionProvider`](showroom_core::CompletionProvider), and parses the
//!   structured answer. Any failure surfaces as `ShowroomError::Upstream`.
//! - [`FallbackScorer`] is a deterministic keyword heuristic that never fails.

pub mod fallback;
pub mod model;
pub mod prompt;

pub use fallback::{FALLBACK_CONFIDENCE, FallbackScorer};
pub use model::{ModelScorer, ModelSettings, parse_model_output};
pub use prompt::{SYSTEM_PROMPT, build_prompt};

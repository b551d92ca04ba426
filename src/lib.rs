//! ESG question-bank core: content codec, hierarchy organizer, answer merge
//! engine, and bulk theme/category assignment, plus the thin HTTP surface
//! that exposes them.

pub mod config;
pub mod error;
pub mod questionnaire;
pub mod telemetry;

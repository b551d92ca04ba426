//! Question content and answer aggregation engine.
//!
//! Everything in this module tree is a pure, synchronous transform over
//! already-fetched data (the dispatcher in [`dispatch`] is the one async
//! exception, and even it only coordinates a caller-supplied gateway). The
//! engine never performs I/O and never blocks a reader on malformed
//! historical data.

pub mod assignment;
pub mod content;
pub mod dispatch;
pub mod domain;
pub mod hierarchy;
pub mod merge;
pub mod router;

#[cfg(test)]
mod tests;

pub use assignment::{assign_category, assign_theme, UpdateInstruction};
pub use content::{
    decode, encode, ContentPayload, DecodeError, DecodedContent, DropDownRole, EncodeError,
};
pub use dispatch::{
    dispatch_updates, AssignmentStatus, DispatchReport, FailedUpdate, GatewayError, UpdateGateway,
};
pub use domain::{
    AnswerRecord, Category, CategoryId, CompanyId, Question, QuestionId, QuestionType, Theme,
    UserId,
};
pub use hierarchy::{organize, CategoryBucket, IntegrityWarning, OrganizedBank, OrganizedQuestion};
pub use merge::{
    category_progress, category_status, merge, CategoryProgress, CompletionStatus, MergeResult,
};
pub use router::bank_router;

//! # Research Verifier
//!
//! A deterministic research verification pipeline that turns a single
//! free-text request into a fully populated session record and a
//! rendered plain-text export.
//!
//! ## Features
//!
//! - **Topic Extraction**: Split a request into deduplicated research topics
//! - **Article Synthesis**: Four fixed source types per topic with citations
//! - **Credibility Verification**: Six weighted checks with a poison flag
//! - **Scientific Validation**: Six-dimension assessment with a hard poison gate
//! - **Idea Generation**: Brainstorming over verified articles only
//! - **Consensus Protocol**: Six-role propose/critique/vote round (P.M.O.P.S.)
//! - **Truth Compilation**: Double-gated truth records with traceable id chains
//! - **Text Export**: Deterministic divider-delimited document rendering
//!
//! ## Architecture
//!
//! ```text
//! request → topics → articles → verification → validation
//!                                    ↓
//!            truths ← pmops ← brainstorm (verified articles only)
//!                ↓
//!             export
//! ```
//!
//! Every stage is a pure, synchronous function; the pipeline never
//! performs I/O except when explicitly saving an export to disk.
//!
//! ## Example
//!
//! ```
//! use research_verifier::{generate_export_document, render_export_to_text, run_full_pipeline};
//!
//! let session = run_full_pipeline("Explain quantum entanglement and its use in cryptography");
//! let doc = generate_export_document(&session);
//! let text = render_export_to_text(&doc);
//! assert!(text.contains("EXECUTIVE SUMMARY"));
//! ```

#![warn(missing_docs)]

/// Agent role definitions, skills, prompts, and proposal approaches.
pub mod agents;
/// Configuration loading and boundary validation.
pub mod config;
/// Error types and result aliases for the application.
pub mod error;
/// Export document projection and plain-text rendering.
pub mod export;
/// Pipeline orchestrator sequencing the seven stages.
pub mod pipeline;
/// Poison indicator scanning and risk scoring.
pub mod shield;
/// The seven pipeline stages.
pub mod stages;
/// Core data model shared across all stages.
pub mod types;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use export::{
    generate_export_document, generate_export_document_at, render_export_to_text, save_export,
    ExportDocument, ExportSection,
};
pub use pipeline::run_full_pipeline;
pub use types::Session;

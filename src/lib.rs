//! # BPMN Analyzer
//!
//! `bpmn-analyzer` reads a Business Process Model and Notation (BPMN) 2.0 document and reports
//! a census of its modeling elements together with heuristic improvement suggestions.
//!
//! - Namespace aware. Only elements in the BPMN model namespace are counted, whatever prefix the file uses.
//! - Tasks, gateways, events, flows, lanes, sub processes, data objects and data stores.
//! - A weighted complexity score.
//! - An ordered list of suggestions. Never empty.
//! - No execution semantics, no schema validation, no diagram layout.
//!
//! ## Example
//!
//! ### Cargo.toml
//! ```toml
//! [dependencies]
//! bpmn-analyzer = "0.1"
//! log = "0.4"
//! pretty_env_logger = "0.5"
//! ```
//! ### main.rs
//!
//! ```
//! use bpmn_analyzer::{Document, Options, analyze_with};
//!
//! extern crate pretty_env_logger;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     pretty_env_logger::init();
//!
//!     // Read and validate the BPMN document
//!     let document: Document = std::fs::read_to_string("demos/complex.bpmn")?.parse()?;
//!
//!     // Count elements and evaluate the suggestion rules
//!     let analysis = analyze_with(&document, &Options::new().legacy_rules(true));
//!
//!     println!("Tasks: {}", analysis.stats.total_tasks);
//!     println!("Complexity: {}", analysis.stats.complexity_score);
//!     for suggestion in &analysis.suggestions {
//!         println!("- {suggestion}");
//!     }
//!     Ok(())
//! }
//! ```

mod analysis;
mod api;
mod bpmn;
mod document;
mod error;
mod report;

pub use analysis::{
    analyze, analyze_all, analyze_str, analyze_with, complexity_score, extract_statistics,
    suggestion::{Suggestion, generate_suggestions},
};
pub use api::{Analysis, Breakdown, Options, Statistics};
pub use bpmn::{
    BPMN_DI_NS, BPMN_MODEL_NS, EventBucket, EventDefinition, FlowKind, GatewayKind, NAMESPACES,
    Namespace, TaskKind,
};
pub use document::{Document, parse_and_validate};
pub use error::{Error, Result};
pub use report::{
    EXIT_CLIENT_ERROR, EXIT_INTERNAL_ERROR, EXIT_SUCCESS, Input, Report, report,
};

/// Service name reported by the command line tool.
pub const SERVICE_NAME: &str = "BPMN Analyzer Service";

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

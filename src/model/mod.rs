//! Typed input and output records.
//!
//! Responses are decoded once at the boundary ([`Response::from_json`]); the
//! evaluators only ever see these structures.

mod citation;
pub mod error;
mod response;
mod result;
mod weights;


pub use citation::{Citation, DocumentType, Jurisdiction};
pub use error::ModelError;
pub use response::{Answer, ConfidenceLevel, EnforcementGapClaim, Response, RiskFlag};
pub use result::{Diagnostics, EvaluationResult, MetricScores};
pub use weights::{Metric, WeightMap};

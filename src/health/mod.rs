// Health evaluation for text and structured reports
pub mod text;
pub mod structured;

pub use text::{evaluate, FinalStatus, HealthReport, TextVerdict};
pub use structured::{classify_health_state, evaluate_structured, StructuredVerdict};

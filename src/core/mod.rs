// Public modules
pub mod backup;
pub mod error;
pub mod mappings;
pub mod patterns;
pub mod report;
pub mod rewrite;
pub mod run;
pub mod walker;

// Re-export common types for convenience
pub use error::{Error, Result};
pub use patterns::ChangeRecord;
pub use report::RunReport;
pub use run::{RunOptions, RunOutcome, RunStats};

pub mod assembler;
pub mod normalize;
pub mod orchestrator;
pub mod prompt;
pub mod recover;
pub mod steps;

pub use assembler::*;
pub use normalize::*;
pub use orchestrator::*;
pub use recover::*;
pub use steps::*;

use thiserror::Error;

/// The only hard failure a pipeline run can produce. Generation and
/// parse failures degrade to empty step results instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Transcript is missing or empty. Provide it before running the pipeline.")]
    MissingTranscript,
}

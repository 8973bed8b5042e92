use chrono::Local;

use super::steps;
use super::PipelineError;
use crate::llm::TextGenerator;
use crate::models::MeetingRecord;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Ingest,
    Title,
    Agenda,
    Decisions,
    Participants,
    Tasks,
    ExecutiveSummary,
    Minutes,
}

impl PipelineStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingest => "ingest",
            Self::Title => "title",
            Self::Agenda => "agenda",
            Self::Decisions => "decisions",
            Self::Participants => "participants",
            Self::Tasks => "tasks",
            Self::ExecutiveSummary => "executive_summary",
            Self::Minutes => "minutes",
        }
    }
}

/// The fixed step chain. Linear, no branching, no retry edges; a step
/// failure (other than ingestion's abort) shows up as an empty partial
/// update, never as a transition change.
pub const PIPELINE_STEPS: &[PipelineStep] = &[
    PipelineStep::Ingest,
    PipelineStep::Title,
    PipelineStep::Agenda,
    PipelineStep::Decisions,
    PipelineStep::Participants,
    PipelineStep::Tasks,
    PipelineStep::ExecutiveSummary,
    PipelineStep::Minutes,
];

/// Runs the extraction steps in order over one shared record:
/// ingest → title → agenda → decisions → participants → tasks →
/// executive summary → minutes.
pub struct MeetingPipeline {
    generator: Box<dyn TextGenerator + Send + Sync>,
}

impl MeetingPipeline {
    pub fn new(generator: Box<dyn TextGenerator + Send + Sync>) -> Self {
        Self { generator }
    }

    /// Run the full pipeline over one transcript. Blocks until done;
    /// each step completes before the next starts. Only a missing
    /// transcript aborts the run.
    pub fn run(&self, transcript: &str, source: &str) -> Result<MeetingRecord, PipelineError> {
        let mut record = MeetingRecord::new(transcript, source);
        let generator = self.generator.as_ref();

        for step in PIPELINE_STEPS {
            tracing::debug!(step = step.as_str(), "Running pipeline step");
            let update = match step {
                PipelineStep::Ingest => steps::ingest(&record)?,
                PipelineStep::Title => steps::extract_title(generator, &record),
                PipelineStep::Agenda => steps::extract_agenda(generator, &record),
                PipelineStep::Decisions => steps::extract_decisions(generator, &record),
                PipelineStep::Participants => steps::extract_participants(generator, &record),
                PipelineStep::Tasks => steps::extract_tasks(generator, &record),
                PipelineStep::ExecutiveSummary => {
                    steps::extract_executive_summary(generator, &record)
                }
                PipelineStep::Minutes => {
                    steps::draft_minutes(&record, Local::now().date_naive())
                }
            };
            record.apply(update);
        }

        tracing::info!(source = %record.source, "Pipeline run complete");
        Ok(record)
    }
}

use serde::{Deserialize, Serialize};

/// Task priority. Serializes as "High"/"Med"/"Low".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Med,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Med => "Med",
            Self::Low => "Low",
        }
    }

    /// Fold a free-form priority string onto the canonical scale.
    ///
    /// Total and idempotent: trims, ignores case, accepts the synonym
    /// "medium", and maps anything unrecognized to `Med`.
    pub fn normalize(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "high" => Self::High,
            "low" => Self::Low,
            "medium" | "med" => Self::Med,
            _ => Self::Med,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Med
    }
}

/// A single action item extracted from a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub owner: String,
    pub description: String,
    /// ISO date (YYYY-MM-DD) when one was mentioned, otherwise empty.
    pub due: String,
    pub priority: Priority,
    pub completed: bool,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            owner: "TBD".to_string(),
            description: String::new(),
            due: String::new(),
            priority: Priority::Med,
            completed: false,
        }
    }
}

/// The evolving state of one pipeline run.
///
/// `transcript` and `source` are set at ingestion and never change.
/// Every other field starts empty and is populated monotonically as the
/// extraction steps run: a step may fill a field in, later steps may read
/// it, and nothing ever clears one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub transcript: String,
    pub source: String,
    pub title: Option<String>,
    pub agenda: Vec<String>,
    pub decisions: Vec<String>,
    pub participants: Vec<String>,
    pub tasks: Vec<Task>,
    pub executive_summary: Option<String>,
    pub minutes_markdown: Option<String>,
}

impl MeetingRecord {
    pub fn new(transcript: &str, source: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
            source: source.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_normalization_folds_case_and_synonyms() {
        assert_eq!(Priority::normalize("high"), Priority::High);
        assert_eq!(Priority::normalize("HIGH"), Priority::High);
        assert_eq!(Priority::normalize("  High  "), Priority::High);
        assert_eq!(Priority::normalize("low"), Priority::Low);
        assert_eq!(Priority::normalize("Medium"), Priority::Med);
        assert_eq!(Priority::normalize("medium"), Priority::Med);
        assert_eq!(Priority::normalize("MED"), Priority::Med);
    }

    #[test]
    fn priority_normalization_is_total() {
        assert_eq!(Priority::normalize(""), Priority::Med);
        assert_eq!(Priority::normalize("urgent"), Priority::Med);
        assert_eq!(Priority::normalize("P1"), Priority::Med);
        assert_eq!(Priority::normalize("!!!"), Priority::Med);
    }

    #[test]
    fn priority_normalization_is_idempotent() {
        for p in [Priority::High, Priority::Med, Priority::Low] {
            assert_eq!(Priority::normalize(p.as_str()), p);
        }
    }

    #[test]
    fn priority_serializes_as_canonical_string() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"High\"");
        assert_eq!(serde_json::to_string(&Priority::Med).unwrap(), "\"Med\"");
    }

    #[test]
    fn task_defaults() {
        let task = Task::default();
        assert_eq!(task.owner, "TBD");
        assert_eq!(task.description, "");
        assert_eq!(task.due, "");
        assert_eq!(task.priority, Priority::Med);
        assert!(!task.completed);
    }

    #[test]
    fn new_record_holds_only_transcript_and_source() {
        let record = MeetingRecord::new("Alice: hi", "transcripts/a.txt");
        assert_eq!(record.transcript, "Alice: hi");
        assert_eq!(record.source, "transcripts/a.txt");
        assert!(record.title.is_none());
        assert!(record.agenda.is_empty());
        assert!(record.decisions.is_empty());
        assert!(record.participants.is_empty());
        assert!(record.tasks.is_empty());
        assert!(record.executive_summary.is_none());
        assert!(record.minutes_markdown.is_none());
    }
}

use serde::{Deserialize, Serialize};

use super::meeting::Priority;

/// An action item in the assembled projection. `id` is the item's index
/// within its meeting, as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub id: String,
    pub text: String,
    pub owner: String,
    pub due: String,
    pub priority: Priority,
    pub completed: bool,
}

/// The assembled, presentation-ready projection of one meeting.
///
/// This is what the API serves and what gets persisted under
/// `meeting_data/<id>.json`. It is derived one-way from a
/// `MeetingRecord` and never fed back into the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingData {
    pub id: String,
    pub title: String,
    /// Display date, e.g. "March 14, 2025".
    pub date: String,
    pub summary: String,
    pub executive_summary: String,
    pub action_items: Vec<ActionItem>,
    pub key_points: Vec<String>,
    pub participants: Vec<String>,
    pub duration: String,
    pub source: String,
}

/// An action item joined with the meeting it belongs to, as returned by
/// the cross-meeting task queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingTask {
    pub id: String,
    pub text: String,
    pub owner: String,
    pub due: String,
    pub priority: Priority,
    pub completed: bool,
    pub meeting_id: String,
}

/// One stored transcript, as listed by the transcripts endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntry {
    pub id: String,
    pub name: String,
    /// Display date of the last modification, e.g. "March 14, 2025".
    pub date: String,
    pub size: Option<u64>,
    pub source: String,
    pub processed: bool,
    pub meeting_data_id: Option<String>,
}

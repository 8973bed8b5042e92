//! Canonical blob key scheme.
//!
//! Every artifact lives under exactly one prefix and is written with
//! exactly one key shape, so reads never need fallback searches:
//! transcripts at `transcripts/<uuid>_<filename>`, minutes at
//! `minutes/<id>.md`, action items at `actions/<id>.json`, and the
//! assembled projection at `meeting_data/<id>.json`.

use uuid::Uuid;

pub const TRANSCRIPTS_PREFIX: &str = "transcripts/";
pub const MINUTES_PREFIX: &str = "minutes/";
pub const ACTIONS_PREFIX: &str = "actions/";
pub const MEETING_DATA_PREFIX: &str = "meeting_data/";

const MAX_FILENAME_CHARS: usize = 100;

/// Key for a newly uploaded transcript. The UUID prefix keeps repeated
/// uploads of the same filename from colliding.
pub fn transcript_key(filename: &str) -> String {
    format!(
        "{TRANSCRIPTS_PREFIX}{}_{}",
        Uuid::new_v4(),
        sanitize_filename(filename)
    )
}

pub fn minutes_key(meeting_id: &str) -> String {
    format!("{MINUTES_PREFIX}{meeting_id}.md")
}

pub fn actions_key(meeting_id: &str) -> String {
    format!("{ACTIONS_PREFIX}{meeting_id}.json")
}

pub fn meeting_data_key(meeting_id: &str) -> String {
    format!("{MEETING_DATA_PREFIX}{meeting_id}.json")
}

/// Last path segment of a key, shown as the transcript's display name.
pub fn base_name(key: &str) -> &str {
    match key.rfind('/') {
        Some(idx) => &key[idx + 1..],
        None => key,
    }
}

/// Strip path separators and special characters from an uploaded filename
/// before it becomes part of a blob key.
pub fn sanitize_filename(name: &str) -> String {
    // Remove path separators and null bytes, replace other special chars
    let sanitized: String = name
        .chars()
        .filter(|&c| c != '/' && c != '\\' && c != '\0')
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Remove consecutive dots (path traversal prevention)
    let sanitized = sanitized.replace("..", "");

    let sanitized: String = sanitized.chars().take(MAX_FILENAME_CHARS).collect();

    if sanitized.is_empty() {
        "transcript".into()
    } else {
        sanitized
    }
}

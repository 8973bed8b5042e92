use chrono::NaiveDateTime;

use super::normalize::derive_summary;
use crate::models::{ActionItem, MeetingData, MeetingRecord};

/// Package a finished record into the caller-facing projection.
///
/// `id` is the caller's identifier when supplied, otherwise one is
/// derived from `now` as `meeting_<%Y%m%d%H%M%S>`. The derivation is
/// one-way; the projection is never fed back into the pipeline.
pub fn assemble(record: &MeetingRecord, id: Option<String>, now: NaiveDateTime) -> MeetingData {
    let id = id.unwrap_or_else(|| format!("meeting_{}", now.format("%Y%m%d%H%M%S")));

    let minutes = record.minutes_markdown.as_deref().unwrap_or("");
    let explicit = record.executive_summary.as_deref().unwrap_or("");
    let summary = derive_summary(explicit, minutes);

    let action_items = record
        .tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| ActionItem {
            id: idx.to_string(),
            text: task.description.clone(),
            owner: task.owner.clone(),
            due: task.due.clone(),
            priority: task.priority.clone(),
            completed: false,
        })
        .collect();

    let key_points = record
        .agenda
        .iter()
        .cloned()
        .chain(record.decisions.iter().map(|d| format!("Decision: {d}")))
        .collect();

    MeetingData {
        id,
        title: record
            .title
            .clone()
            .unwrap_or_else(|| "Meeting Summary".to_string()),
        date: now.format("%B %d, %Y").to_string(),
        summary,
        executive_summary: explicit.to_string(),
        action_items,
        key_points,
        participants: record.participants.clone(),
        duration: "Unknown".to_string(),
        source: record.source.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, Task};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap()
    }

    fn finished_record() -> MeetingRecord {
        let mut record = MeetingRecord::new("transcript text", "transcripts/abc_notes.txt");
        record.title = Some("Q3 Review".into());
        record.agenda = vec!["Roadmap".into(), "Budget".into()];
        record.decisions = vec!["Ship Friday".into()];
        record.participants = vec!["Alice".into(), "Bob".into()];
        record.tasks = vec![
            Task {
                owner: "Alice".into(),
                description: "QA".into(),
                due: "2025-04-01".into(),
                priority: Priority::High,
                completed: false,
            },
            Task {
                owner: "Bob".into(),
                description: "Budget sheet".into(),
                due: String::new(),
                priority: Priority::Med,
                completed: false,
            },
        ];
        record.executive_summary = Some("Strong quarter, shipping Friday.".into());
        record.minutes_markdown = Some("# Q3 Review\nDate: 2025-03-14\n## Agenda\n- Roadmap".into());
        record
    }

    #[test]
    fn generated_id_derives_from_timestamp() {
        let data = assemble(&finished_record(), None, now());
        assert_eq!(data.id, "meeting_20250314093005");
    }

    #[test]
    fn supplied_id_wins() {
        let data = assemble(&finished_record(), Some("meeting_custom".into()), now());
        assert_eq!(data.id, "meeting_custom");
    }

    #[test]
    fn display_date_is_human_readable() {
        let data = assemble(&finished_record(), None, now());
        assert_eq!(data.date, "March 14, 2025");
    }

    #[test]
    fn explicit_executive_summary_becomes_the_summary() {
        let data = assemble(&finished_record(), None, now());
        assert_eq!(data.summary, "Strong quarter, shipping Friday.");
        assert_eq!(data.executive_summary, "Strong quarter, shipping Friday.");
    }

    #[test]
    fn short_minutes_serve_as_summary_when_no_explicit_one() {
        let mut record = finished_record();
        record.executive_summary = None;
        let data = assemble(&record, None, now());
        assert_eq!(data.summary, record.minutes_markdown.unwrap());
        assert_eq!(data.executive_summary, "");
    }

    #[test]
    fn key_points_flatten_agenda_then_decisions() {
        let data = assemble(&finished_record(), None, now());
        assert_eq!(
            data.key_points,
            vec!["Roadmap", "Budget", "Decision: Ship Friday"]
        );
    }

    #[test]
    fn action_items_are_reindexed_from_zero() {
        let data = assemble(&finished_record(), None, now());
        assert_eq!(data.action_items.len(), 2);
        assert_eq!(data.action_items[0].id, "0");
        assert_eq!(data.action_items[0].text, "QA");
        assert_eq!(data.action_items[0].owner, "Alice");
        assert_eq!(data.action_items[0].priority, Priority::High);
        assert_eq!(data.action_items[1].id, "1");
        assert!(!data.action_items[1].completed);
    }

    #[test]
    fn empty_record_assembles_with_defaults() {
        let record = MeetingRecord::new("t", "transcripts/empty.txt");
        let data = assemble(&record, None, now());
        assert_eq!(data.title, "Meeting Summary");
        assert_eq!(data.summary, "");
        assert!(data.action_items.is_empty());
        assert!(data.key_points.is_empty());
        assert_eq!(data.duration, "Unknown");
        assert_eq!(data.source, "transcripts/empty.txt");
    }
}

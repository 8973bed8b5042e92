use chrono::NaiveDate;
use serde_json::Value;

use super::normalize::{fallback_title, truncate_with_ellipsis, usable_title};
use super::prompt;
use super::recover::{recover_json_object, string_field, string_list_field};
use super::PipelineError;
use crate::llm::TextGenerator;
use crate::models::{MeetingRecord, Priority, Task};

/// Agenda bullets kept after parsing.
const MAX_AGENDA_ITEMS: usize = 8;

/// The partial update one step returns. Only the fields a step actually
/// produced are set; `MeetingRecord::apply` leaves the rest untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepUpdate {
    pub title: Option<String>,
    pub agenda: Option<Vec<String>>,
    pub decisions: Option<Vec<String>>,
    pub participants: Option<Vec<String>>,
    pub tasks: Option<Vec<Task>>,
    pub executive_summary: Option<String>,
    pub minutes_markdown: Option<String>,
}

impl MeetingRecord {
    /// Merge a step's partial update. Carried fields replace the previous
    /// value wholesale; absent fields keep whatever was there.
    pub fn apply(&mut self, update: StepUpdate) {
        if let Some(title) = update.title {
            self.title = Some(title);
        }
        if let Some(agenda) = update.agenda {
            self.agenda = agenda;
        }
        if let Some(decisions) = update.decisions {
            self.decisions = decisions;
        }
        if let Some(participants) = update.participants {
            self.participants = participants;
        }
        if let Some(tasks) = update.tasks {
            self.tasks = tasks;
        }
        if let Some(summary) = update.executive_summary {
            self.executive_summary = Some(summary);
        }
        if let Some(minutes) = update.minutes_markdown {
            self.minutes_markdown = Some(minutes);
        }
    }
}

/// Validate the transcript. The only step allowed to abort the run.
pub fn ingest(record: &MeetingRecord) -> Result<StepUpdate, PipelineError> {
    if record.transcript.trim().is_empty() {
        return Err(PipelineError::MissingTranscript);
    }
    Ok(StepUpdate::default())
}

/// One generation round: call the backend, recover a JSON object from
/// its reply. Backend errors degrade to an empty map so the run keeps
/// going with the step's empty default.
fn generate_object(
    generator: &dyn TextGenerator,
    step: &str,
    system: &str,
    user: &str,
    temperature: f32,
) -> serde_json::Map<String, Value> {
    match generator.generate(system, user, temperature) {
        Ok(reply) => recover_json_object(&reply),
        Err(e) => {
            tracing::warn!(step, error = %e, "Generation failed, continuing with empty result");
            serde_json::Map::new()
        }
    }
}

/// Title extraction with its fallback chain: primary generation, one
/// relaxed retry on a shorter excerpt, then derivation from agenda or
/// decisions, then the fixed generic title. Whatever the path, titles
/// longer than 60 characters are cut to 57 plus an ellipsis.
pub fn extract_title(generator: &dyn TextGenerator, record: &MeetingRecord) -> StepUpdate {
    let map = generate_object(
        generator,
        "title",
        prompt::TITLE_SYSTEM_PROMPT,
        &prompt::title_prompt(&record.transcript),
        prompt::TITLE_TEMPERATURE,
    );
    let mut title = string_field(&map, "title");

    if !usable_title(&title) {
        let map = generate_object(
            generator,
            "title_retry",
            prompt::TITLE_SYSTEM_PROMPT,
            &prompt::title_retry_prompt(&record.transcript),
            prompt::TITLE_RETRY_TEMPERATURE,
        );
        title = string_field(&map, "title");
    }

    if !usable_title(&title) {
        title = fallback_title(&record.agenda, &record.decisions);
    }

    let title = truncate_with_ellipsis(&title, 60);
    tracing::info!(title = %title, "Title extracted");
    StepUpdate {
        title: Some(title),
        ..Default::default()
    }
}

pub fn extract_agenda(generator: &dyn TextGenerator, record: &MeetingRecord) -> StepUpdate {
    let map = generate_object(
        generator,
        "agenda",
        prompt::SYSTEM_PROMPT,
        &prompt::agenda_prompt(&record.transcript),
        prompt::DEFAULT_TEMPERATURE,
    );
    let mut agenda = string_list_field(&map, "agenda");
    agenda.truncate(MAX_AGENDA_ITEMS);
    tracing::info!(count = agenda.len(), "Agenda extracted");
    StepUpdate {
        agenda: Some(agenda),
        ..Default::default()
    }
}

pub fn extract_decisions(generator: &dyn TextGenerator, record: &MeetingRecord) -> StepUpdate {
    let map = generate_object(
        generator,
        "decisions",
        prompt::SYSTEM_PROMPT,
        &prompt::decisions_prompt(&record.transcript),
        prompt::DEFAULT_TEMPERATURE,
    );
    let decisions = string_list_field(&map, "decisions");
    tracing::info!(count = decisions.len(), "Decisions extracted");
    StepUpdate {
        decisions: Some(decisions),
        ..Default::default()
    }
}

pub fn extract_participants(generator: &dyn TextGenerator, record: &MeetingRecord) -> StepUpdate {
    let map = generate_object(
        generator,
        "participants",
        prompt::SYSTEM_PROMPT,
        &prompt::participants_prompt(&record.transcript),
        prompt::DEFAULT_TEMPERATURE,
    );
    let participants = string_list_field(&map, "participants");
    tracing::info!(count = participants.len(), "Participants extracted");
    StepUpdate {
        participants: Some(participants),
        ..Default::default()
    }
}

pub fn extract_tasks(generator: &dyn TextGenerator, record: &MeetingRecord) -> StepUpdate {
    let map = generate_object(
        generator,
        "tasks",
        prompt::SYSTEM_PROMPT,
        &prompt::tasks_prompt(&record.transcript),
        prompt::DEFAULT_TEMPERATURE,
    );
    let tasks: Vec<Task> = map
        .get("tasks")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(task_from_value).collect())
        .unwrap_or_default();
    tracing::info!(count = tasks.len(), "Tasks extracted");
    StepUpdate {
        tasks: Some(tasks),
        ..Default::default()
    }
}

/// Normalize one parsed task item. Items that are not JSON objects are
/// skipped; missing fields fall back to their defaults.
fn task_from_value(value: &Value) -> Option<Task> {
    let item = value.as_object()?;

    let owner = item.get("owner").and_then(Value::as_str).unwrap_or("").trim();
    let description = item.get("task").and_then(Value::as_str).unwrap_or("").trim();
    let due = item.get("due").and_then(Value::as_str).unwrap_or("").trim();
    let priority = item.get("priority").and_then(Value::as_str).unwrap_or("");

    Some(Task {
        owner: if owner.is_empty() { "TBD".to_string() } else { owner.to_string() },
        description: description.to_string(),
        due: due.to_string(),
        priority: Priority::normalize(priority),
        completed: false,
    })
}

pub fn extract_executive_summary(
    generator: &dyn TextGenerator,
    record: &MeetingRecord,
) -> StepUpdate {
    let map = generate_object(
        generator,
        "executive_summary",
        prompt::SYSTEM_PROMPT,
        &prompt::executive_summary_prompt(&record.transcript),
        prompt::SUMMARY_TEMPERATURE,
    );
    let summary = string_field(&map, "executive_summary");
    tracing::info!(chars = summary.len(), "Executive summary extracted");
    StepUpdate {
        executive_summary: Some(summary),
        ..Default::default()
    }
}

/// Render the minutes markdown from the already-populated fields. Pure
/// formatting, no generation call.
pub fn draft_minutes(record: &MeetingRecord, today: NaiveDate) -> StepUpdate {
    let title = record
        .title
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("Meeting Minutes — {today}"));

    let mut lines: Vec<String> = vec![
        format!("# {title}"),
        format!("Date: {today}"),
        "## Agenda".to_string(),
    ];
    if record.agenda.is_empty() {
        lines.push("- (none)".to_string());
    } else {
        lines.extend(record.agenda.iter().map(|a| format!("- {a}")));
    }

    lines.push("\n## Decisions".to_string());
    if record.decisions.is_empty() {
        lines.push("- (none)".to_string());
    } else {
        lines.extend(record.decisions.iter().map(|d| format!("- {d}")));
    }

    lines.push("\n## Action Items".to_string());
    if record.tasks.is_empty() {
        lines.push("- (none)".to_string());
    } else {
        for task in &record.tasks {
            let due = if task.due.is_empty() { "TBD" } else { task.due.as_str() };
            lines.push(format!(
                "- **{}**: {} (Due: {}, Priority: {})",
                task.owner,
                task.description,
                due,
                task.priority.as_str()
            ));
        }
    }

    tracing::info!("Minutes drafted");
    StepUpdate {
        minutes_markdown: Some(lines.join("\n")),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MockGenerator;

    fn record_with(transcript: &str) -> MeetingRecord {
        MeetingRecord::new(transcript, "transcripts/test.txt")
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn ingest_rejects_empty_transcript() {
        assert!(matches!(
            ingest(&record_with("")),
            Err(PipelineError::MissingTranscript)
        ));
        assert!(matches!(
            ingest(&record_with("   \n\t")),
            Err(PipelineError::MissingTranscript)
        ));
    }

    #[test]
    fn ingest_passes_non_empty_transcript_through() {
        let record = record_with("Alice: let's begin.");
        let update = ingest(&record).unwrap();
        assert_eq!(update, StepUpdate::default());
        assert_eq!(record.transcript, "Alice: let's begin.");
    }

    #[test]
    fn apply_merges_only_carried_fields() {
        let mut record = record_with("t");
        record.apply(StepUpdate {
            agenda: Some(vec!["Roadmap".into()]),
            ..Default::default()
        });
        record.apply(StepUpdate {
            title: Some("Sync".into()),
            ..Default::default()
        });
        assert_eq!(record.agenda, vec!["Roadmap"]);
        assert_eq!(record.title.as_deref(), Some("Sync"));
    }

    #[test]
    fn apply_replaces_lists_wholesale() {
        let mut record = record_with("t");
        record.apply(StepUpdate {
            decisions: Some(vec!["Old".into()]),
            ..Default::default()
        });
        record.apply(StepUpdate {
            decisions: Some(vec!["New A".into(), "New B".into()]),
            ..Default::default()
        });
        assert_eq!(record.decisions, vec!["New A", "New B"]);
    }

    #[test]
    fn title_uses_primary_generation() {
        let gen = MockGenerator::new("{}")
            .with_reply("Create a clear, concise title", r#"{"title": "Q3 Budget Review"}"#);
        let update = extract_title(&gen, &record_with("budget talk"));
        assert_eq!(update.title.as_deref(), Some("Q3 Budget Review"));
    }

    #[test]
    fn title_retry_kicks_in_when_primary_unusable() {
        let gen = MockGenerator::new("{}")
            .with_reply("Create a clear, concise title", r#"{"title": ""}"#)
            .with_reply("previous title generation failed", r#"{"title": "Hiring Pipeline"}"#);
        let update = extract_title(&gen, &record_with("hiring talk"));
        assert_eq!(update.title.as_deref(), Some("Hiring Pipeline"));
    }

    #[test]
    fn title_falls_back_to_first_agenda_bullet() {
        let mut record = record_with("t");
        record.agenda = vec!["Pricing review of Q3".into()];
        let gen = MockGenerator::new(r#"{"title": ""}"#);
        let update = extract_title(&gen, &record);
        assert_eq!(update.title.as_deref(), Some("Pricing review of Q3"));
    }

    #[test]
    fn title_fallback_truncates_50_char_agenda_bullet() {
        let mut record = record_with("t");
        let bullet = "y".repeat(50);
        record.agenda = vec![bullet.clone()];
        let gen = MockGenerator::new(r#"{"title": ""}"#);
        let update = extract_title(&gen, &record);
        assert_eq!(update.title.unwrap(), format!("{}...", "y".repeat(37)));
    }

    #[test]
    fn title_fallback_uses_decision_then_generic() {
        let mut record = record_with("t");
        record.decisions = vec!["Ship Friday".into()];
        let gen = MockGenerator::new("no json here");
        let update = extract_title(&gen, &record);
        assert_eq!(update.title.as_deref(), Some("Decision: Ship Friday"));

        let bare = record_with("t");
        let update = extract_title(&gen, &bare);
        assert_eq!(update.title.as_deref(), Some("Product Strategy Meeting"));
    }

    #[test]
    fn title_longer_than_60_chars_is_capped() {
        let long_title = "z".repeat(70);
        let gen = MockGenerator::new(&format!(r#"{{"title": "{long_title}"}}"#));
        let update = extract_title(&gen, &record_with("t"));
        assert_eq!(update.title.unwrap(), format!("{}...", "z".repeat(57)));
    }

    #[test]
    fn title_survives_generation_failure_via_fallbacks() {
        let mut record = record_with("t");
        record.agenda = vec!["Launch checklist".into()];
        let gen = MockGenerator::new("{}").with_failure("");
        let update = extract_title(&gen, &record);
        assert_eq!(update.title.as_deref(), Some("Launch checklist"));
    }

    #[test]
    fn agenda_keeps_at_most_eight_bullets() {
        let bullets: Vec<String> = (0..10).map(|i| format!("\"item {i}\"")).collect();
        let reply = format!(r#"{{"agenda": [{}]}}"#, bullets.join(", "));
        let gen = MockGenerator::new(&reply);
        let update = extract_agenda(&gen, &record_with("t"));
        let agenda = update.agenda.unwrap();
        assert_eq!(agenda.len(), 8);
        assert_eq!(agenda[0], "item 0");
        assert_eq!(agenda[7], "item 7");
    }

    #[test]
    fn agenda_degrades_to_empty_on_failure() {
        let gen = MockGenerator::new("{}").with_failure("agenda bullets");
        let update = extract_agenda(&gen, &record_with("t"));
        assert_eq!(update.agenda, Some(vec![]));
    }

    #[test]
    fn decisions_and_participants_extract_lists() {
        let gen = MockGenerator::new("{}")
            .with_reply("explicit decisions", r#"{"decisions": ["Ship Friday"]}"#)
            .with_reply("identify all participants", r#"{"participants": ["Alice", "Bob"]}"#);
        let record = record_with("t");
        assert_eq!(
            extract_decisions(&gen, &record).decisions,
            Some(vec!["Ship Friday".to_string()])
        );
        assert_eq!(
            extract_participants(&gen, &record).participants,
            Some(vec!["Alice".to_string(), "Bob".to_string()])
        );
    }

    #[test]
    fn tasks_normalize_priority_and_owner() {
        let reply = r#"{"tasks": [
            {"owner": "Alice", "task": "QA pass", "due": "2025-04-01", "priority": "HIGH"},
            {"owner": "", "task": "  Write notes  ", "priority": "urgent"},
            {"task": "Check budget", "priority": "medium"},
            "not an object",
            {"owner": "Bob"}
        ]}"#;
        let gen = MockGenerator::new(reply);
        let update = extract_tasks(&gen, &record_with("t"));
        let tasks = update.tasks.unwrap();

        assert_eq!(tasks.len(), 4);
        assert_eq!(tasks[0].owner, "Alice");
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[1].owner, "TBD");
        assert_eq!(tasks[1].description, "Write notes");
        assert_eq!(tasks[1].priority, Priority::Med);
        assert_eq!(tasks[2].owner, "TBD");
        assert_eq!(tasks[2].priority, Priority::Med);
        assert_eq!(tasks[3].owner, "Bob");
        assert_eq!(tasks[3].description, "");
        assert!(!tasks[3].completed);
    }

    #[test]
    fn executive_summary_reads_its_field() {
        let gen = MockGenerator::new(r#"{"executive_summary": "The team aligned on scope."}"#);
        let update = extract_executive_summary(&gen, &record_with("t"));
        assert_eq!(
            update.executive_summary.as_deref(),
            Some("The team aligned on scope.")
        );
    }

    #[test]
    fn minutes_render_expected_sections() {
        let mut record = record_with("t");
        record.title = Some("Sync".into());
        record.agenda = vec!["A".into(), "B".into()];
        let update = draft_minutes(&record, today());
        let md = update.minutes_markdown.unwrap();

        assert!(md.starts_with("# Sync\nDate: 2025-03-14\n## Agenda\n- A\n- B"));
        assert!(md.contains("## Decisions\n- (none)"));
        assert!(md.contains("## Action Items\n- (none)"));
    }

    #[test]
    fn minutes_render_tasks_with_due_fallback() {
        let mut record = record_with("t");
        record.title = Some("Sync".into());
        record.tasks = vec![
            Task {
                owner: "Alice".into(),
                description: "QA".into(),
                due: String::new(),
                priority: Priority::High,
                completed: false,
            },
            Task {
                owner: "Bob".into(),
                description: "Budget".into(),
                due: "2025-04-01".into(),
                priority: Priority::Med,
                completed: false,
            },
        ];
        let md = draft_minutes(&record, today()).minutes_markdown.unwrap();
        assert!(md.contains("- **Alice**: QA (Due: TBD, Priority: High)"));
        assert!(md.contains("- **Bob**: Budget (Due: 2025-04-01, Priority: Med)"));
    }

    #[test]
    fn minutes_default_title_carries_date() {
        let record = record_with("t");
        let md = draft_minutes(&record, today()).minutes_markdown.unwrap();
        assert!(md.starts_with("# Meeting Minutes — 2025-03-14"));
    }
}

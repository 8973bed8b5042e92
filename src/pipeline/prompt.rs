//! Prompt templates for the generation-backed steps. The instruction
//! text and sampling parameters follow the shapes the extraction was
//! tuned on; change them together with the step parsers.

use super::normalize::char_prefix;

/// Shared system instruction for the extraction steps.
pub const SYSTEM_PROMPT: &str = "You convert meeting transcripts into structured outputs.";

/// System instruction for title generation.
pub const TITLE_SYSTEM_PROMPT: &str = "You are an expert at creating concise, descriptive \
     meeting titles that capture the essence of a discussion.";

/// Transcript excerpt lengths, in characters.
pub const TITLE_EXCERPT_CHARS: usize = 5000;
pub const TITLE_RETRY_EXCERPT_CHARS: usize = 3000;
pub const SUMMARY_EXCERPT_CHARS: usize = 5000;

/// Sampling temperatures. Title generation runs hotter to favor
/// creative phrasing; everything else stays near-deterministic.
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const TITLE_TEMPERATURE: f32 = 0.7;
pub const TITLE_RETRY_TEMPERATURE: f32 = 0.5;
pub const SUMMARY_TEMPERATURE: f32 = 0.5;

pub fn title_prompt(transcript: &str) -> String {
    format!(
        r#"Create a clear, concise title for this meeting transcript.

Guidelines for the title:
1. Make it 3-6 words maximum
2. Focus on the main topic or purpose of the meeting
3. Be specific but concise (e.g. "Q3 Marketing Strategy Review" not "Meeting About Marketing")
4. Avoid redundancy and unnecessary words
5. Ensure it's professional and descriptive
6. DO NOT use "Meeting" or "Discussion" in the title unless absolutely necessary

Return ONLY the JSON: {{"title": "Your Concise Title Here"}}

Transcript:
{}
"#,
        char_prefix(transcript, TITLE_EXCERPT_CHARS)
    )
}

pub fn title_retry_prompt(transcript: &str) -> String {
    format!(
        r#"The previous title generation failed. Please create a short, descriptive title
for this meeting based on its key topics or purpose (maximum 5 words).
Return JSON: {{"title": "..."}}

Transcript:
{}
"#,
        char_prefix(transcript, TITLE_RETRY_EXCERPT_CHARS)
    )
}

pub fn agenda_prompt(transcript: &str) -> String {
    format!(
        r#"From this transcript, list concise agenda bullets (max 8).
Return JSON: {{"agenda": ["..."]}}.
Transcript:
{transcript}
"#
    )
}

pub fn decisions_prompt(transcript: &str) -> String {
    format!(
        r#"From the transcript, list explicit decisions.
Return JSON: {{"decisions":["..."]}}.
Transcript:
{transcript}
"#
    )
}

pub fn participants_prompt(transcript: &str) -> String {
    format!(
        r#"From the transcript, identify all participants in the meeting.
Return JSON: {{"participants":["..."]}}.
Transcript:
{transcript}
"#
    )
}

pub fn tasks_prompt(transcript: &str) -> String {
    format!(
        r#"Extract action items with owner, task, due (YYYY-MM-DD if mentioned; else empty),
and priority (High/Med/Low).
Return JSON: {{"tasks":[{{"owner":"","task":"","due":"","priority":""}}]}}
Transcript:
{transcript}
"#
    )
}

pub fn executive_summary_prompt(transcript: &str) -> String {
    format!(
        r#"Write a concise executive summary (3-6 sentences) for this meeting. Focus on the main topics, key decisions, and overall outcome. Avoid listing agenda items or action items. Use clear, professional language for an executive audience.

Return ONLY the JSON: {{"executive_summary": "..."}}

Transcript:
{}
"#,
        char_prefix(transcript, SUMMARY_EXCERPT_CHARS)
    )
}

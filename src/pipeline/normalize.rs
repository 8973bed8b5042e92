//! Plain-value normalization: excerpt and truncation helpers, the title
//! fallback policy, and the bounded-summary derivation.

/// Fixed title used when nothing else can be derived.
pub const GENERIC_TITLE: &str = "Product Strategy Meeting";

/// Word limit for the derived summary.
const SUMMARY_WORD_LIMIT: usize = 800;

/// First `max_chars` characters of `text`. Counts characters, not bytes.
pub fn char_prefix(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Truncate to `max_chars - 3` characters plus "..." when `text` is
/// longer than `max_chars` characters; otherwise return it unchanged.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut out: String = text.chars().take(max_chars - 3).collect();
        out.push_str("...");
        out
    } else {
        text.to_string()
    }
}

/// A title is usable once it has at least 3 characters after trimming.
pub fn usable_title(title: &str) -> bool {
    title.trim().chars().count() >= 3
}

/// Derive a title from already-extracted fields: the first agenda
/// bullet, else the first decision prefixed "Decision: ", else the
/// generic fallback. Derived titles longer than 40 characters keep
/// their first 37 plus an ellipsis.
pub fn fallback_title(agenda: &[String], decisions: &[String]) -> String {
    if let Some(first) = agenda.first() {
        truncate_with_ellipsis(first, 40)
    } else if let Some(first) = decisions.first() {
        truncate_with_ellipsis(&format!("Decision: {first}"), 40)
    } else {
        GENERIC_TITLE.to_string()
    }
}

/// Bounded summary for the assembled projection.
///
/// An explicit executive summary wins. Otherwise minutes of 800 words
/// or fewer are used verbatim. Longer minutes are cut at the section
/// markers: the preamble, plus the following section when its text
/// covers the agenda. Minutes without markers keep the first 800 words.
pub fn derive_summary(explicit: &str, minutes: &str) -> String {
    if !explicit.trim().is_empty() {
        return explicit.to_string();
    }
    if minutes.is_empty() {
        return String::new();
    }

    let word_count = minutes.split_whitespace().count();
    if word_count <= SUMMARY_WORD_LIMIT {
        return minutes.to_string();
    }

    let sections: Vec<&str> = minutes.split("##").collect();
    if sections.len() > 1 {
        let mut summary = sections[0].trim().to_string();
        if sections[1].to_lowercase().contains("agenda") {
            summary.push_str("\n## ");
            summary.push_str(sections[1].trim());
        }
        summary
    } else {
        minutes
            .split_whitespace()
            .take(SUMMARY_WORD_LIMIT)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

//! Plain-text transcript export

use chrono::{DateTime, Local};

use crate::llm::{Role, Turn};

/// Render the conversation as a plain-text transcript: one labelled,
/// newline-terminated line per turn, with a blank line between turns.
pub fn transcript(turns: &[Turn]) -> String {
    let lines: Vec<String> = turns
        .iter()
        .map(|turn| format!("{}: {}\n", label(turn.role), turn.content))
        .collect();
    lines.join("\n")
}

/// Export filename for the given moment, e.g.
/// `chat_export_2024-06-01_13-45-09.txt`
pub fn export_filename(at: DateTime<Local>) -> String {
    format!("chat_export_{}.txt", at.format("%Y-%m-%d_%H-%M-%S"))
}

fn label(role: Role) -> &'static str {
    match role {
        Role::User => "You",
        Role::Assistant => "Bot",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_transcript_two_turns() {
        let turns = vec![Turn::user("Hi"), Turn::assistant("Hi! ")];
        assert_eq!(transcript(&turns), "You: Hi\n\nBot: Hi! \n");
    }

    #[test]
    fn test_transcript_preserves_content_verbatim() {
        // No trimming, no escaping; the content goes out exactly as stored
        let turns = vec![Turn::user("  spaced  "), Turn::assistant("multi\nline")];
        assert_eq!(transcript(&turns), "You:   spaced  \n\nBot: multi\nline\n");
    }

    #[test]
    fn test_transcript_empty_history() {
        assert_eq!(transcript(&[]), "");
    }

    #[test]
    fn test_transcript_single_turn() {
        let turns = vec![Turn::user("Hi")];
        assert_eq!(transcript(&turns), "You: Hi\n");
    }

    #[test]
    fn test_export_filename_format() {
        let at = Local.with_ymd_and_hms(2024, 6, 1, 13, 45, 9).unwrap();
        assert_eq!(export_filename(at), "chat_export_2024-06-01_13-45-09.txt");
    }

    #[test]
    fn test_export_filename_now_matches_pattern() {
        let filename = export_filename(Local::now());
        assert!(filename.starts_with("chat_export_"));
        assert!(filename.ends_with(".txt"));
        // chat_export_ + YYYY-MM-DD_HH-MM-SS + .txt
        assert_eq!(filename.len(), "chat_export_".len() + 19 + ".txt".len());
    }
}

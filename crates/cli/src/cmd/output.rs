//! Shared output formatting for list and search.

use notevault_core::vault::NoteInfo;

/// Print notes as a table.
pub fn print_notes_table(notes: &[NoteInfo]) {
    if notes.is_empty() {
        println!("(no notes found)");
        return;
    }

    let path_width =
        notes.iter().map(|n| n.path.chars().count()).max().unwrap_or(4).clamp(4, 60);

    println!("{:<path_width$}  TAGS", "PATH", path_width = path_width);
    println!("{:-<path_width$}  {:-<4}", "", "", path_width = path_width);

    for note in notes {
        let path = truncate(&note.path, path_width);
        let tags = if note.tags.is_empty() {
            "-".to_string()
        } else {
            note.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" ")
        };

        println!("{:<path_width$}  {}", path, tags, path_width = path_width);
    }

    println!();
    println!("-- {} notes --", notes.len());
}

/// Print notes as JSON.
pub fn print_notes_json(notes: &[NoteInfo]) {
    println!("{}", serde_json::to_string_pretty(notes).unwrap_or_default());
}

/// Print notes as paths only (quiet mode).
pub fn print_notes_quiet(notes: &[NoteInfo]) {
    for note in notes {
        println!("{}", note.path);
    }
}

/// Truncate string with ellipsis if needed.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short.md", 20), "short.md");
        assert_eq!(truncate("a/very/long/path.md", 10), "a/very/...");
        assert_eq!(truncate("abcdef", 2), "ab");
        assert_eq!(truncate("ñoño/notas.md", 7), "ñoño...");
    }
}

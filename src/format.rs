//! Display helpers shared by the CLI and the dashboard

use chrono::NaiveDate;

/// "beginner" -> "Beginner"
pub fn format_difficulty(difficulty: &str) -> String {
    capitalize(difficulty)
}

/// "lower_back" -> "Lower Back"
pub fn format_muscle_name(muscle: &str) -> String {
    muscle.split('_').map(capitalize).collect::<Vec<_>>().join(" ")
}

/// Cut to `max_chars` characters and append "..." when longer
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut)
}

/// Seconds to a compact duration: "45s", "2m 05s", "1h 03m"
pub fn format_duration(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Stopwatch-style "HH:MM:SS"
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// "Today", "Yesterday", "3 days ago", or "Jun 1, 2024" for anything older than a week
pub fn format_relative_date(date: NaiveDate, today: NaiveDate) -> String {
    match (today - date).num_days() {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        n if (2..7).contains(&n) => format!("{} days ago", n),
        _ => date.format("%b %-d, %Y").to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

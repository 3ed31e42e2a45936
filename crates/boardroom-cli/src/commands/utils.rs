use anyhow::{Context, Result};
use boardroom_application::Notice;
use boardroom_core::statement::Statement;
use chrono::{DateTime, TimeDelta, Utc};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

pub fn print_error(err: &anyhow::Error) {
    eprintln!("{}", format!("Error: {:#}", err).red());
}

pub fn print_success(message: &str) {
    println!("{}", message.green());
}

pub fn print_notice(notice: Option<Notice>) {
    match notice {
        Some(Notice::Success(message)) => print_success(&message),
        Some(Notice::Error(message)) => eprintln!("{}", message.red()),
        None => {}
    }
}

/// Reads one line. Ctrl-C and Ctrl-D abort the command.
pub fn prompt(message: &str) -> Result<String> {
    let mut editor = DefaultEditor::new().context("Failed to open terminal prompt")?;
    match editor.readline(message) {
        Ok(line) => Ok(line.trim().to_string()),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            anyhow::bail!("Cancelled")
        }
        Err(err) => Err(err).context("Failed to read input"),
    }
}

/// Asks a yes/no question; anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(&format!("{} [y/N] ", question))?;
    Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

pub fn format_remaining(remaining: TimeDelta) -> String {
    let secs = remaining.num_seconds().max(0);
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else {
        format!("{}m {:02}s", minutes, seconds)
    }
}

fn status_label(statement: &Statement, now: DateTime<Utc>) -> String {
    match statement.remaining(now) {
        Some(remaining) if statement.is_open_for_voting(now) => {
            format!("open, {} left", format_remaining(remaining))
                .green()
                .to_string()
        }
        _ if statement.is_active => "expired".yellow().to_string(),
        _ => "closed".bright_black().to_string(),
    }
}

pub fn print_statement(statement: &Statement, now: DateTime<Utc>) {
    println!(
        "{} {}",
        format!("Statement {}:", statement.id).bold(),
        statement.text
    );
    println!("  Status: {}", status_label(statement, now));
}

/// One line per statement in the judge's list.
pub fn print_statement_row(statement: &Statement, now: DateTime<Utc>) {
    let judge_vote = statement
        .judge_vote
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{:>6}  {}  [judge: {}, {} min, created {}]  {}",
        statement.id.to_string().bold(),
        statement.text,
        judge_vote,
        statement.duration_minutes,
        statement.created_at.format("%Y-%m-%d %H:%M UTC"),
        status_label(statement, now)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(TimeDelta::seconds(65)), "1m 05s");
        assert_eq!(format_remaining(TimeDelta::seconds(3_725)), "1h 02m 05s");
        assert_eq!(format_remaining(TimeDelta::seconds(-3)), "0m 00s");
    }
}

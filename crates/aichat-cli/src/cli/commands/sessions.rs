//! Session management commands.

use anyhow::Result;
use chrono::Local;

use aichat_core::session::{self, SessionInfo};

pub fn list() -> Result<()> {
    let sessions = session::list_sessions()?;

    if sessions.is_empty() {
        println!("No saved sessions.");
        return Ok(());
    }

    for info in sessions {
        println!("{}", format_session_line(&info));
    }

    Ok(())
}

pub fn show(id: &str) -> Result<()> {
    let session = session::load_session(id)?;

    println!("{} ({})", session.name, session.id);
    println!(
        "Created {}",
        session.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );

    if session.messages.is_empty() {
        println!("\n(no messages)");
        return Ok(());
    }

    println!();
    for message in &session.messages {
        let timestamp = message
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S");
        println!("[{}] {}:", timestamp, message.role.label());
        println!("{}\n", message.content);
    }

    Ok(())
}

pub fn new(name: &str) -> Result<()> {
    let session = session::create_session(name)?;
    println!("Created session '{}' ({})", session.name, session.id);
    Ok(())
}

pub fn rename(id: &str, name: &str) -> Result<()> {
    session::rename_session(id, name)?;
    println!("Renamed session {id} to '{name}'");
    Ok(())
}

pub fn delete(id: &str) -> Result<()> {
    session::delete_session(id)?;
    println!("Deleted session {id}");
    Ok(())
}

fn format_session_line(info: &SessionInfo) -> String {
    let when = info
        .modified
        .and_then(session::format_timestamp)
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "{}  {}  ({} messages, {})",
        info.id, info.name, info.message_count, when
    )
}

//! Export and import commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use aichat_core::export;
use aichat_core::session::{self, ChatSession};

/// Output format for `aichat export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Markdown,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "markdown",
        })
    }
}

/// Exports a session to a file, defaulting to the most recent session and a
/// sanitized derived file name.
pub fn export(format: ExportFormat, session_id: Option<&str>, out: Option<&str>) -> Result<()> {
    let id = match session_id {
        Some(id) => id.to_string(),
        None => session::latest_session_id()?
            .context("no saved sessions to export; start a chat first")?,
    };

    let session = session::load_session(&id)?;

    let contents = match format {
        ExportFormat::Json => export::export_json(&session.messages, Some(&session.name))?,
        ExportFormat::Markdown => export::export_markdown(&session.messages, Some(&session.name)),
    };

    let path = match out {
        Some(path) => path.to_string(),
        None => export::export_file_name(&session.name, format.extension()),
    };

    fs::write(&path, contents).with_context(|| format!("Failed to write export to {path}"))?;

    println!("Exported session '{}' to {}", session.name, path);
    Ok(())
}

/// Imports an exported JSON document, either into a new session or by
/// replacing an existing session's messages.
///
/// Validation is all-or-nothing; a bad element aborts the import with its
/// index named and no session is touched.
pub fn import(file: &str, session_id: Option<&str>) -> Result<()> {
    let bytes =
        fs::read(file).with_context(|| format!("Failed to read import file {file}"))?;

    let document = export::import_json(&bytes)?;

    if let Some(id) = session_id {
        let count = document.messages.len();
        session::replace_messages(id, document.messages)?;
        println!("Imported {count} messages into session {id}");
        return Ok(());
    }

    let name = document
        .session_name
        .clone()
        .unwrap_or_else(|| default_import_name(file));

    let mut session = ChatSession::new(name);
    session.messages = document.messages;
    session::save_session(&session)?;

    println!(
        "Imported {} messages into session '{}' ({})",
        session.messages.len(),
        session.name,
        session.id
    );
    Ok(())
}

fn default_import_name(file: &str) -> String {
    Path::new(file)
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "Imported Session".to_string())
}

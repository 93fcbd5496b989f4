//! Interactive chat command.
//!
//! A REPL over stdin/stdout. Plain lines go to the active provider; slash
//! commands drive search, clearing, and provider switching without leaving
//! the chat. The loading flag brackets the provider call; there is no
//! cancellation path, so a stuck request keeps the prompt busy.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::Local;

use aichat_core::config::Config;
use aichat_core::message::Role;
use aichat_core::providers::Provider;
use aichat_core::search::MessageSearch;
use aichat_core::session::{self, ChatSession};
use aichat_core::store::ChatStore;

const QUIT_COMMAND: &str = ":q";
const PROMPT_PREFIX: &str = "you> ";
const ASSISTANT_PREFIX: &str = "assistant> ";

/// Session persistence options for the chat command.
#[derive(Debug, Clone, Default)]
pub struct ChatSessionOptions {
    /// Append to an existing session by ID.
    pub session_id: Option<String>,
    /// Do not save the session.
    pub no_save: bool,
}

impl ChatSessionOptions {
    /// Resolves the options into an optional session.
    ///
    /// Returns None if no_save is set, the existing session when an id is
    /// given, and a fresh date-named session otherwise.
    fn resolve(&self) -> Result<Option<ChatSession>> {
        if self.no_save {
            return Ok(None);
        }

        if let Some(ref id) = self.session_id {
            let loaded =
                session::load_session(id).with_context(|| format!("load session '{id}'"))?;
            return Ok(Some(loaded));
        }

        let name = format!("Chat Session {}", Local::now().format("%Y-%m-%d"));
        Ok(Some(session::create_session(&name)?))
    }
}

/// Runs the chat loop with stdin/stdout.
pub async fn run(config: &Config, opts: &ChatSessionOptions) -> Result<()> {
    let session = opts.resolve().context("resolve session")?;

    let mut store = ChatStore::load();
    if let Some(ref s) = session {
        store.replace_messages(s.messages.clone());
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    writeln!(stdout, "AIChat (type :q to quit, /help for commands)")?;
    writeln!(stdout, "Provider: {}", store.provider().label())?;
    if let Some(ref s) = session {
        writeln!(stdout, "Session: {} ({})", s.name, s.id)?;
        if !s.messages.is_empty() {
            writeln!(stdout, "Loaded {} previous messages", s.messages.len())?;
        }
    }
    write!(stdout, "{PROMPT_PREFIX}")?;
    stdout.flush()?;

    run_chat(stdin.lock(), &mut stdout, &mut store, session, config).await
}

/// Runs the chat loop over explicit reader/writer (testable without a tty).
pub async fn run_chat<R, W>(
    input: R,
    output: &mut W,
    store: &mut ChatStore,
    mut session: Option<ChatSession>,
    config: &Config,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let http = reqwest::Client::new();
    let mut search = MessageSearch::new();

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();

        if trimmed == QUIT_COMMAND {
            writeln!(output, "Goodbye!")?;
            break;
        }

        if trimmed.is_empty() {
            write!(output, "{PROMPT_PREFIX}")?;
            output.flush()?;
            continue;
        }

        if let Some(command) = trimmed.strip_prefix('/') {
            handle_command(command, output, store, &mut search)?;
            write!(output, "{PROMPT_PREFIX}")?;
            output.flush()?;
            continue;
        }

        send_message(trimmed, output, store, &http, config).await?;

        // Flush the turn into the active session, user message included.
        if let Some(ref mut s) = session {
            s.messages = store.messages().to_vec();
            if let Err(e) = session::save_session(s) {
                writeln!(output, "Warning: Failed to save session: {e}")?;
            }
        }

        write!(output, "{PROMPT_PREFIX}")?;
        output.flush()?;
    }

    Ok(())
}

/// Sends one user message and prints the reply or the error.
///
/// Provider errors are surfaced inline and never abort the loop.
async fn send_message<W: Write>(
    text: &str,
    output: &mut W,
    store: &mut ChatStore,
    http: &reqwest::Client,
    config: &Config,
) -> Result<()> {
    store.add_message(text, Role::User);

    let provider = store.provider();
    let Some(api_key) = store.api_key(provider).map(str::to_string) else {
        writeln!(
            output,
            "No API key configured for {}. Run: aichat keys set {} <key>",
            provider.label(),
            provider.id()
        )?;
        return Ok(());
    };

    store.set_loading(true);
    let result = provider.send_message(http, text, &api_key, config).await;
    store.set_loading(false);

    match result {
        Ok(reply) => {
            writeln!(output, "{ASSISTANT_PREFIX}{reply}")?;
            store.add_message(reply, Role::Assistant);
        }
        Err(e) => {
            tracing::warn!(provider = provider.id(), error = %e, "provider call failed");
            writeln!(output, "Error: {e}")?;
        }
    }

    Ok(())
}

/// Handles in-chat slash commands.
fn handle_command<W: Write>(
    command: &str,
    output: &mut W,
    store: &mut ChatStore,
    search: &mut MessageSearch,
) -> Result<()> {
    let (name, rest) = command
        .split_once(' ')
        .map_or((command, ""), |(n, r)| (n, r.trim()));

    match name {
        "help" => {
            writeln!(output, "Commands:")?;
            writeln!(output, "  /search <term>   search messages")?;
            writeln!(output, "  /next, /prev     cycle through matches")?;
            writeln!(output, "  /provider [id]   show or switch provider")?;
            writeln!(output, "  /clear           clear all messages")?;
            writeln!(output, "  :q               quit")?;
        }
        "search" => {
            search.search(store.messages(), rest);
            if search.is_empty() {
                writeln!(output, "No results found")?;
            } else {
                print_current_match(output, store, search)?;
            }
        }
        "next" => {
            if search.next().is_some() {
                print_current_match(output, store, search)?;
            } else {
                writeln!(output, "No results found")?;
            }
        }
        "prev" | "previous" => {
            if search.previous().is_some() {
                print_current_match(output, store, search)?;
            } else {
                writeln!(output, "No results found")?;
            }
        }
        "provider" => {
            if rest.is_empty() {
                writeln!(output, "Provider: {}", store.provider().label())?;
            } else if let Some(provider) = Provider::from_id(rest) {
                store.set_provider(provider);
                writeln!(output, "Switched to {}", provider.label())?;
            } else {
                writeln!(
                    output,
                    "Unknown provider '{rest}' (expected openai, claude, or gemini)"
                )?;
            }
        }
        "clear" => {
            let count = store.messages().len();
            store.clear_messages();
            writeln!(output, "Cleared {count} messages")?;
        }
        _ => {
            writeln!(output, "Unknown command: /{name}")?;
        }
    }

    Ok(())
}

/// Prints the selected search match as "[i/n] role: content".
fn print_current_match<W: Write>(
    output: &mut W,
    store: &ChatStore,
    search: &MessageSearch,
) -> Result<()> {
    if let Some(hit) = search.matches().get(search.cursor())
        && let Some(message) = store.messages().get(hit.index)
    {
        writeln!(
            output,
            "[{}/{}] {}: {}",
            search.cursor() + 1,
            search.len(),
            message.role.as_str(),
            message.content
        )?;
    }
    Ok(())
}

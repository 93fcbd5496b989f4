//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;

use aichat_core::config::Config;
use aichat_core::logging;

mod commands;

#[derive(Parser)]
#[command(name = "aichat")]
#[command(version = "0.1")]
#[command(about = "Terminal AI chat client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    session_args: SessionArgs,
}

/// Common session arguments for commands that persist chat history.
#[derive(clap::Args, Debug, Clone, Default)]
struct SessionArgs {
    /// Append to an existing session by ID
    #[arg(long, value_name = "ID")]
    session: Option<String>,

    /// Do not save the session
    #[arg(long = "no-save")]
    no_save: bool,
}

impl From<&SessionArgs> for commands::chat::ChatSessionOptions {
    fn from(args: &SessionArgs) -> Self {
        commands::chat::ChatSessionOptions {
            session_id: args.session.clone(),
            no_save: args.no_save,
        }
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Starts an interactive chat (default)
    Chat {
        #[command(flatten)]
        session_args: SessionArgs,
    },

    /// Manage saved sessions
    Sessions {
        #[command(subcommand)]
        command: SessionCommands,
    },

    /// Export a session to JSON or Markdown
    Export {
        /// Output format
        #[arg(long, value_enum, default_value_t = commands::transfer::ExportFormat::Json)]
        format: commands::transfer::ExportFormat,

        /// Session to export (defaults to the most recent)
        #[arg(long, value_name = "ID")]
        session: Option<String>,

        /// Output file (defaults to a derived name in the current directory)
        #[arg(long, value_name = "PATH")]
        out: Option<String>,
    },

    /// Import a previously exported JSON session
    Import {
        /// Path to the exported .json file
        #[arg(value_name = "FILE")]
        file: String,

        /// Replace an existing session's messages instead of creating one
        #[arg(long, value_name = "ID")]
        session: Option<String>,
    },

    /// Manage provider API keys
    Keys {
        #[command(subcommand)]
        command: KeyCommands,
    },

    /// Show or switch the active provider
    Provider {
        #[command(subcommand)]
        command: ProviderCommands,
    },

    /// Show or set the theme preference
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum SessionCommands {
    /// Lists saved sessions
    List,
    /// Shows a session transcript
    Show {
        /// The ID of the session to show
        #[arg(value_name = "SESSION_ID")]
        id: String,
    },
    /// Creates a new named session
    New {
        /// Display name for the session
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Renames a session
    Rename {
        /// The ID of the session to rename
        #[arg(value_name = "SESSION_ID")]
        id: String,
        /// New name for the session
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Deletes a session
    Delete {
        /// The ID of the session to delete
        #[arg(value_name = "SESSION_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum KeyCommands {
    /// Stores an API key for a provider
    Set {
        /// Provider id (openai, claude, gemini)
        #[arg(value_name = "PROVIDER")]
        provider: String,
        /// The API key
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Lists configured keys (masked)
    List,
}

#[derive(clap::Subcommand)]
enum ProviderCommands {
    /// Shows the active provider
    Get,
    /// Switches the active provider
    Set {
        /// Provider id (openai, claude, gemini)
        #[arg(value_name = "PROVIDER")]
        provider: String,
    },
}

#[derive(clap::Subcommand)]
enum ThemeCommands {
    /// Shows the saved theme preference
    Get,
    /// Sets the theme preference
    Set {
        /// Theme (light, dark, system)
        #[arg(value_name = "THEME")]
        theme: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    let Cli {
        command,
        session_args,
    } = cli;

    // default to chat mode
    let Some(command) = command else {
        let session_opts = (&session_args).into();
        return commands::chat::run(&config, &session_opts).await;
    };

    match command {
        Commands::Chat { session_args } => {
            let session_opts = (&session_args).into();
            commands::chat::run(&config, &session_opts).await
        }

        Commands::Sessions { command } => match command {
            SessionCommands::List => commands::sessions::list(),
            SessionCommands::Show { id } => commands::sessions::show(&id),
            SessionCommands::New { name } => commands::sessions::new(&name),
            SessionCommands::Rename { id, name } => commands::sessions::rename(&id, &name),
            SessionCommands::Delete { id } => commands::sessions::delete(&id),
        },

        Commands::Export {
            format,
            session,
            out,
        } => commands::transfer::export(format, session.as_deref(), out.as_deref()),
        Commands::Import { file, session } => {
            commands::transfer::import(&file, session.as_deref())
        }

        Commands::Keys { command } => match command {
            KeyCommands::Set { provider, key } => commands::keys::set(&provider, &key),
            KeyCommands::List => commands::keys::list(),
        },

        Commands::Provider { command } => match command {
            ProviderCommands::Get => commands::provider::get(),
            ProviderCommands::Set { provider } => commands::provider::set(&provider),
        },

        Commands::Theme { command } => match command {
            ThemeCommands::Get => commands::theme::get(),
            ThemeCommands::Set { theme } => commands::theme::set(&theme),
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

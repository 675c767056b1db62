//! Subcommand handlers

mod account;
mod ask;
mod contracts;
mod upload;

use std::io::BufRead;
use std::io::Write;
use std::sync::Arc;

use anyhow::Context as _;
use contracts_lib::ContractsClient;
use contracts_lib::auth::SessionStore;

use crate::cli::Command;
use crate::config::Settings;
use crate::session_file::SessionFile;

/// Everything a command needs.
pub struct Context {
    pub client: ContractsClient,
    pub session: Arc<SessionStore>,
    pub session_file: SessionFile,
    pub settings: Settings,
}

impl Context {
    /// Restores the saved session and builds a client that reads from it.
    pub async fn new(settings: Settings, session_file: SessionFile) -> anyhow::Result<Self> {
        let session = Arc::new(SessionStore::new());
        if let Some(saved) = session_file.load()? {
            session.restore(saved).await;
        }
        let client = ContractsClient::from_config(&settings.client, session.clone())
            .context("building API client")?;
        log::debug!("using API at {}", client.base_url());

        Ok(Self {
            client,
            session,
            session_file,
            settings,
        })
    }

    /// Writes the session back, or removes the file once it is gone (after a
    /// logout or a 401).
    pub async fn persist_session(&self) -> anyhow::Result<()> {
        match self.session.snapshot().await {
            Some(session) => self.session_file.save(&session),
            None => self.session_file.remove(),
        }
    }

    /// Fails early with a login hint when no session is held.
    pub async fn require_login(&self) -> anyhow::Result<()> {
        if self.session.is_authenticated().await {
            Ok(())
        } else {
            anyhow::bail!("Not logged in. Run `contracts login <username>` first.")
        }
    }
}

pub async fn dispatch(ctx: &Context, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { username, password } => account::login(ctx, username, password).await,
        Command::Signup {
            username,
            email,
            password,
        } => account::signup(ctx, username, email, password).await,
        Command::Logout => account::logout(ctx).await,
        Command::Whoami => account::whoami(ctx).await,
        Command::List(args) => contracts::list(ctx, args).await,
        Command::Show { doc_id } => contracts::show(ctx, &doc_id).await,
        Command::Delete { doc_id, yes } => contracts::delete(ctx, &doc_id, yes).await,
        Command::Stats { input } => contracts::stats(ctx, input.as_deref()).await,
        Command::Upload {
            file,
            name,
            parties,
        } => upload::upload(ctx, &file, name, parties).await,
        Command::Status { doc_id } => upload::status(ctx, &doc_id).await,
        Command::Ask { question, limit } => ask::ask(ctx, &question, limit).await,
        Command::Suggestions => ask::suggestions(ctx).await,
    }
}

/// Reads one line from standard input after printing `prompt`.
pub(crate) fn prompt_line(prompt: &str) -> anyhow::Result<String> {
    eprint!("{prompt}");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub(crate) fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let answer = prompt_line(&format!("{prompt} [y/N] "))?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

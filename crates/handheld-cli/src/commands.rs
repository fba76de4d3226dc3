//! CLI command implementations

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use handheld_core::{
    Calculator, Clock, Config, ControlEffect, CountdownTicker, CredentialVerifier, FileStore, Key,
    KeyValueStore, LoginController, LoginStatus, RecoveryOutcome, SubmitOutcome, PREFS_NAMESPACE,
};
use serde_json::json;
use tokio::sync::mpsc;

/// Handheld CLI - calculator and lockout-protected login
#[derive(Parser)]
#[command(name = "handheld")]
#[command(about = "Drive the handheld calculator and login flow from scripts")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the login store (overrides the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay calculator keys and print the display
    ///
    /// Keys: digits, 00, ., + - * / pow, =, sin cos tan sqrt log ln x2,
    /// mc mr m+ m-, c, back, %
    Calc {
        /// Key tokens, in order
        #[arg(required = true, allow_hyphen_values = true)]
        keys: Vec<String>,
    },

    /// Login flow against the persisted lockout state
    #[command(subcommand)]
    Login(LoginCommands),
}

#[derive(Subcommand)]
pub enum LoginCommands {
    /// Submit one username/password attempt
    Attempt {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Show attempts left or the lock countdown
    Status,

    /// Forgot password: reset attempts and lift any lock
    Recover {
        /// Username or email
        identifier: String,
    },

    /// Count down until the lock lifts
    Wait,
}

/// Run the CLI. Returns whether the command succeeded.
pub async fn run<W: Write>(cli: Cli, config: &Config, out: &mut W) -> Result<bool> {
    match cli.command {
        Commands::Calc { keys } => calc(&keys, cli.json, out),
        Commands::Login(cmd) => {
            let mut login = open_login(config, cli.data_dir)?;
            match cmd {
                LoginCommands::Attempt { username, password } => {
                    attempt(&mut login, &username, &password, cli.json, out)
                }
                LoginCommands::Status => status(&mut login, cli.json, out),
                LoginCommands::Recover { identifier } => {
                    recover(&mut login, &identifier, cli.json, out)
                }
                LoginCommands::Wait => wait(&mut login, cli.json, out).await,
            }
        }
    }
}

/// Open the file-backed login controller
fn open_login(config: &Config, data_dir: Option<PathBuf>) -> Result<LoginController<FileStore>> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => config.resolve_data_dir()?,
    };
    let store = FileStore::open(&dir, PREFS_NAMESPACE)
        .with_context(|| format!("opening login store in {:?}", dir))?;
    tracing::debug!("Using login store {:?}", store.path());
    Ok(LoginController::new(store, config.lockout_policy()))
}

/// Replay key tokens through a fresh calculator
pub fn calc<W: Write>(keys: &[String], as_json: bool, out: &mut W) -> Result<bool> {
    let mut calculator = Calculator::new();
    for token in keys {
        let key: Key = token.parse()?;
        calculator.press(key);
    }

    if as_json {
        let value = json!({
            "display": calculator.display(),
            "memory": calculator.memory(),
            "error": calculator.last_error().map(|e| e.to_string()),
        });
        writeln!(out, "{}", value)?;
    } else {
        writeln!(out, "{}", calculator.display())?;
    }

    Ok(!calculator.is_error())
}

/// One login attempt
pub fn attempt<S, C, V, W>(
    login: &mut LoginController<S, C, V>,
    username: &str,
    password: &str,
    as_json: bool,
    out: &mut W,
) -> Result<bool>
where
    S: KeyValueStore,
    C: Clock,
    V: CredentialVerifier,
    W: Write,
{
    let reply = login.submit(username, password)?;
    let status = login.status();

    if as_json {
        let value = json!({
            "result": reply.outcome,
            "message": reply.outcome.message(),
            "status": status,
        });
        writeln!(out, "{}", value)?;
    } else {
        writeln!(out, "{}", reply.outcome.message())?;
        match &reply.outcome {
            SubmitOutcome::Success { session } => {
                writeln!(out, "{}", session.greeting())?;
            }
            _ => writeln!(out, "{}", status)?,
        }
    }

    Ok(reply.outcome.is_success())
}

/// Attempts line or countdown, lifting an expired lock first
pub fn status<S, C, V, W>(login: &mut LoginController<S, C, V>, as_json: bool, out: &mut W) -> Result<bool>
where
    S: KeyValueStore,
    C: Clock,
    V: CredentialVerifier,
    W: Write,
{
    let reply = login.tick()?;
    print_status(&reply.outcome, as_json, out)?;
    Ok(true)
}

/// Forgot-password reset
pub fn recover<S, C, V, W>(
    login: &mut LoginController<S, C, V>,
    identifier: &str,
    as_json: bool,
    out: &mut W,
) -> Result<bool>
where
    S: KeyValueStore,
    C: Clock,
    V: CredentialVerifier,
    W: Write,
{
    let reply = login.recover(identifier)?;

    if as_json {
        let value = json!({
            "result": reply.outcome,
            "message": reply.outcome.message(),
            "status": login.status(),
        });
        writeln!(out, "{}", value)?;
    } else {
        writeln!(out, "{}", reply.outcome.message())?;
    }

    Ok(reply.outcome == RecoveryOutcome::Sent)
}

/// Run the countdown ticker until the lock lifts, printing each second
pub async fn wait<S, C, V, W>(login: &mut LoginController<S, C, V>, as_json: bool, out: &mut W) -> Result<bool>
where
    S: KeyValueStore,
    C: Clock,
    V: CredentialVerifier,
    W: Write,
{
    let reply = login.tick()?;
    if !reply.outcome.is_locked() {
        print_status(&reply.outcome, as_json, out)?;
        return Ok(true);
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut ticker = CountdownTicker::default();
    ticker.start(tx, || ());

    while rx.recv().await.is_some() {
        let reply = login.tick()?;
        print_status(&reply.outcome, as_json, out)?;
        out.flush()?;
        if reply.effect == Some(ControlEffect::EnableLogin) || !reply.outcome.is_locked() {
            break;
        }
    }

    ticker.stop();
    Ok(true)
}

fn print_status<W: Write>(
    status: &LoginStatus,
    as_json: bool,
    out: &mut W,
) -> Result<()> {
    if as_json {
        writeln!(out, "{}", serde_json::to_string(status)?)?;
    } else {
        writeln!(out, "{}", status)?;
    }
    Ok(())
}

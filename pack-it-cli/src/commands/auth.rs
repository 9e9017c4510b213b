//! Authentication commands for the Pack It CLI.
//!
//! Email/password sign-in, sign-up, password reset, sign-out and status.

use std::io::{self, Write};

use chrono::Utc;
use clap::{Args, Subcommand};

use pack_it_core::auth::SessionRestore;
use pack_it_core::sync::sync_label;
use pack_it_core::AuthUser;

use crate::app::App;

/// Authentication commands
#[derive(Args)]
pub struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand)]
enum AuthSubcommand {
    /// Sign in with email and password
    Login {
        #[arg(long, short)]
        email: Option<String>,
    },
    /// Create an account
    Signup {
        #[arg(long, short)]
        email: Option<String>,
    },
    /// Email a password reset link
    Reset {
        #[arg(long, short)]
        email: Option<String>,
    },
    /// Sign out and reset local lists
    Logout,
    /// Show authentication status
    Status,
}

impl AuthCommand {
    pub fn run(&self, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        let rt = tokio::runtime::Runtime::new()?;

        match &self.command {
            AuthSubcommand::Login { email } => rt.block_on(login(app, email.as_deref())),
            AuthSubcommand::Signup { email } => rt.block_on(signup(app, email.as_deref())),
            AuthSubcommand::Reset { email } => rt.block_on(reset(app, email.as_deref())),
            AuthSubcommand::Logout => rt.block_on(logout(app)),
            AuthSubcommand::Status => status(app),
        }
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn read_credentials(email: Option<&str>) -> io::Result<(String, String)> {
    let email = match email {
        Some(email) => email.to_string(),
        None => prompt("Email: ")?,
    };
    let password = prompt("Password: ")?;
    Ok((email, password))
}

fn display_name(user: &AuthUser) -> &str {
    user.email.as_deref().unwrap_or(&user.uid)
}

/// Restores remote lists or uploads local ones for a fresh session.
async fn connect(app: &mut App, user: AuthUser) {
    if app.session.sync().is_none() {
        return;
    }
    match app.session.handle_auth_state(&mut app.store, Some(user)).await {
        Ok(SessionRestore::Restored) => println!("Restored your lists from the cloud."),
        Ok(SessionRestore::Uploaded) => println!("Uploaded your local lists to the cloud."),
        Ok(_) => {}
        Err(e) => eprintln!("Warning: could not sync lists: {}", e),
    }
}

async fn login(app: &mut App, email: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let (email, password) = read_credentials(email)?;
    let user = app.session.sign_in(&mut app.store, &email, &password).await?;
    app.remember(&user)?;
    println!("Signed in as {}", display_name(&user));

    connect(app, user).await;
    Ok(())
}

async fn signup(app: &mut App, email: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let (email, password) = read_credentials(email)?;
    let user = app.session.sign_up(&email, &password).await?;
    app.remember(&user)?;
    println!("Created account {}", display_name(&user));

    connect(app, user).await;
    Ok(())
}

async fn reset(app: &App, email: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let email = match email {
        Some(email) => email.to_string(),
        None => prompt("Email: ")?,
    };
    app.session.reset_password(&email).await?;
    println!("Password reset email sent to {}", email.trim());
    Ok(())
}

async fn logout(app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    if app.session.is_guest() {
        println!("Not signed in.");
        return Ok(());
    }

    app.session.sign_out(&mut app.store).await?;
    app.forget()?;
    println!("Signed out. Local lists were reset.");
    Ok(())
}

fn status(app: &App) -> Result<(), Box<dyn std::error::Error>> {
    for line in status_lines(app, Utc::now().timestamp_millis()) {
        println!("{}", line);
    }
    Ok(())
}

/// Session first, then any configuration hint.
fn status_lines(app: &App, now: i64) -> Vec<String> {
    let mut lines = Vec::new();
    match app.current_user() {
        Some(user) if !app.session.is_guest() => {
            lines.push(format!("Signed in as {} ({})", display_name(&user), user.uid));
            lines.push(sync_label(app.store.last_synced_at(), now));
        }
        _ => lines.push("Not signed in. Run 'packit auth login' to sign in.".to_string()),
    }

    if app.config.auth.api_key.is_none() {
        lines.push(String::new());
        lines.push("Identity provider not configured.".to_string());
        lines.push("Set auth.api_key in config or PACKIT_AUTH_API_KEY.".to_string());
    }
    lines
}

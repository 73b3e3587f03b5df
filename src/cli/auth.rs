//! Authentication CLI commands
//!
//! Sign-up and sign-in prompt for the password with echo disabled. A
//! successful sign-in merges any guest data into the account before the
//! session becomes active.

use clap::Subcommand;
use tracing::warn;

use crate::error::{SpendwiseError, SpendwiseResult};
use crate::events::{EntityKind, EventEntry, EventKind};
use crate::remote::{AuthClient, RemoteClient, Session};
use crate::services::ReconcileService;
use crate::storage::Storage;
use crate::store::{LocalStore, RemoteStore, Store};

use super::AppContext;

/// Authentication subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account
    Signup {
        /// Email address
        email: String,
    },

    /// Sign in to an existing account
    Login {
        /// Email address
        email: String,
    },

    /// Sign out and return to guest mode
    Logout,

    /// Request a password-reset email
    ResetPassword {
        /// Email address
        email: String,
    },

    /// Show the current session
    Status,
}

/// Handle an auth command
pub fn handle_auth_command(ctx: &AppContext, cmd: AuthCommands) -> SpendwiseResult<()> {
    match cmd {
        AuthCommands::Signup { email } => {
            let client = auth_client(ctx)?;
            let password = rpassword::prompt_password("Password: ")
                .map_err(|e| SpendwiseError::Auth(format!("Could not read password: {}", e)))?;
            let confirm = rpassword::prompt_password("Confirm password: ")
                .map_err(|e| SpendwiseError::Auth(format!("Could not read password: {}", e)))?;
            if password != confirm {
                return Err(SpendwiseError::Auth("Passwords do not match".into()));
            }

            let session = client.sign_up(&email, &password)?;
            session.save(&ctx.paths)?;
            ctx.events.log(&EventEntry::new(
                EventKind::SignedUp,
                EntityKind::Session,
                session.user_id.clone(),
            ))?;

            merge_guest_data(ctx, &session)?;
            println!("Account created. Signed in as {}.", session.email);
        }

        AuthCommands::Login { email } => {
            let client = auth_client(ctx)?;
            let password = rpassword::prompt_password("Password: ")
                .map_err(|e| SpendwiseError::Auth(format!("Could not read password: {}", e)))?;

            let session = client.sign_in(&email, &password)?;
            session.save(&ctx.paths)?;
            ctx.events.log(&EventEntry::new(
                EventKind::SignedIn,
                EntityKind::Session,
                session.user_id.clone(),
            ))?;

            merge_guest_data(ctx, &session)?;
            println!("Signed in as {}.", session.email);
        }

        AuthCommands::Logout => {
            match Session::load(&ctx.paths)? {
                None => println!("Not signed in."),
                Some(session) => {
                    // Best effort server-side; the local session goes either way
                    if let Ok(client) = auth_client(ctx) {
                        if let Err(e) = client.sign_out(&session.access_token) {
                            warn!(error = %e, "server-side sign-out failed");
                        }
                    }
                    Session::remove(&ctx.paths)?;
                    ctx.events.log(&EventEntry::new(
                        EventKind::SignedOut,
                        EntityKind::Session,
                        session.user_id,
                    ))?;
                    println!("Signed out. Back to guest mode.");
                }
            }
        }

        AuthCommands::ResetPassword { email } => {
            let client = auth_client(ctx)?;
            client.request_password_reset(&email)?;
            println!("Password-reset email sent to {} (if the account exists).", email);
        }

        AuthCommands::Status => match Session::load(&ctx.paths)? {
            None => println!("Guest mode. Data is stored locally only."),
            Some(session) if session.is_expired() => {
                println!(
                    "Session for {} has expired. Run 'spendwise auth login' to sign in again.",
                    session.email
                );
            }
            Some(session) => println!("Signed in as {} ({}).", session.email, session.user_id),
        },
    }

    Ok(())
}

/// Move guest data into the account the session belongs to
fn merge_guest_data(ctx: &AppContext, session: &Session) -> SpendwiseResult<()> {
    let storage = Storage::new(ctx.paths.clone())?;
    storage.load_all()?;
    if !storage.has_guest_data() {
        return Ok(());
    }

    let local = LocalStore::new(storage);
    // Empty files (e.g. after an earlier reconciliation) have nothing to move
    // and must not overwrite the guest archive
    let guest_profile = local.profile()?;
    if local.list_expenses()?.is_empty()
        && local.list_goals()?.is_empty()
        && local.achievements()?.is_empty()
        && guest_profile.budget_threshold.is_none()
    {
        return Ok(());
    }

    let (api_url, api_key) = backend_config(ctx)?;
    let remote = RemoteStore::new(RemoteClient::new(api_url, api_key, session.clone()));

    let report = ReconcileService::new(&local, &remote).reconcile()?;
    if !report.is_empty() {
        println!(
            "Merged guest data into your account: {} expenses, {} goals, {} achievements{}.",
            report.expenses_uploaded,
            report.goals_uploaded,
            report.achievements_merged,
            if report.profile_pushed {
                ", budget threshold"
            } else {
                ""
            }
        );
        println!("A copy of the guest files was kept in the local archive.");
    }

    Ok(())
}

fn auth_client(ctx: &AppContext) -> SpendwiseResult<AuthClient> {
    let (api_url, api_key) = backend_config(ctx)?;
    Ok(AuthClient::new(api_url, api_key))
}

fn backend_config(ctx: &AppContext) -> SpendwiseResult<(String, String)> {
    let api_url = ctx.settings.api_url().ok_or_else(|| {
        SpendwiseError::Config(
            "No backend configured. Set SPENDWISE_API_URL or run 'spendwise config set-api'."
                .into(),
        )
    })?;
    let api_key = ctx.settings.api_key().ok_or_else(|| {
        SpendwiseError::Config(
            "No API key configured. Set SPENDWISE_API_KEY or run 'spendwise config set-api'."
                .into(),
        )
    })?;
    Ok((api_url, api_key))
}

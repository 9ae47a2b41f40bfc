//! Authentication CLI command handlers

use std::io::{self, Write};

use octocrab::Octocrab;
use secrecy::ExposeSecret;

use crate::cli::commands::AuthCommand;
use crate::core::credentials::CredentialStore;
use crate::error::{Result, RevueError};

/// Handle authentication commands
pub async fn handle_auth(command: AuthCommand) -> Result<()> {
    match command {
        AuthCommand::Login => handle_login().await,
        AuthCommand::Logout => handle_logout(),
        AuthCommand::Status => handle_status().await,
    }
}

/// Handle login using a personal access token
async fn handle_login() -> Result<()> {
    if CredentialStore::has_github_token()? {
        println!("✓ Already authenticated with GitHub.");
        println!();
        println!("  To re-authenticate, first run: cr auth logout");
        return Ok(());
    }

    println!("Personal Access Token Authentication");
    println!();
    println!("To create a token:");
    println!("  1. Go to: https://github.com/settings/tokens/new");
    println!("  2. Give it a name (e.g., 'revue')");
    println!("  3. Select the 'repo' scope");
    println!("  4. Click 'Generate token' and copy it");
    println!();

    print!("Paste your token here: ");
    io::stdout().flush()?;

    let mut token = String::new();
    io::stdin().read_line(&mut token)?;
    let token = token.trim().to_string();

    if token.is_empty() {
        return Err(RevueError::InvalidInput("No token provided".to_string()));
    }

    println!("\nValidating token...");
    let login = validate_token(&token).await?;

    CredentialStore::store_github_token(&token)?;

    println!("✓ Successfully authenticated as @{}", login);
    Ok(())
}

/// Handle logout - remove stored credentials
fn handle_logout() -> Result<()> {
    if !CredentialStore::has_github_token()? {
        println!("Not logged in.");
        return Ok(());
    }

    CredentialStore::delete_github_token()?;
    println!("✓ Logged out. Stored token removed.");
    Ok(())
}

/// Handle status - show current authentication state
async fn handle_status() -> Result<()> {
    match CredentialStore::get_github_token()? {
        Some(token) => {
            println!("Token: {}", CredentialStore::mask_token(&token));
            match validate_token(token.expose_secret()).await {
                Ok(login) => println!("✓ Logged in to GitHub as @{}", login),
                Err(_) => {
                    println!("✗ The stored token is no longer valid.");
                    println!();
                    println!("  → Run 'cr auth logout' and then 'cr auth login'.");
                }
            }
        }
        None => {
            println!("Not logged in to GitHub.");
            println!();
            println!("  → Run 'cr auth login' to authenticate.");
        }
    }
    Ok(())
}

/// Check the token against the API; returns the authenticated login
async fn validate_token(token: &str) -> Result<String> {
    let octocrab = Octocrab::builder()
        .personal_token(token.to_string())
        .build()?;

    match octocrab.current().user().await {
        Ok(user) => Ok(user.login),
        Err(_) => Err(RevueError::AuthenticationFailed(
            "GitHub rejected the token".to_string(),
        )),
    }
}

//! Login, logout and whoami handlers.

use anyhow::Result;
use ladle_core::auth::{CredentialStore, CurrentUser};
use ladle_core::config::Config;

use super::bootstrap_session;

pub async fn login(config: &Config, token: &str) -> Result<()> {
    let (_, mut session) = bootstrap_session(config).await?;
    // An explicit login replaces whatever the restore found.
    let user = session.login(token).await?;
    println!("Logged in as {}.", user.username);
    print_profile(user);
    Ok(())
}

pub fn logout() -> Result<()> {
    // No session bootstrap: logout must work offline and when the stored
    // token is already invalid.
    let store = CredentialStore::new();
    let removed = store.clear()?;
    if removed {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub async fn whoami(config: &Config) -> Result<()> {
    let (_, session) = bootstrap_session(config).await?;
    match session.user() {
        Some(user) => print_profile(user),
        None => println!("Not logged in."),
    }
    Ok(())
}

fn print_profile(user: &CurrentUser) {
    println!("  username: {}", user.username);
    if !user.firstname.is_empty() || !user.surname.is_empty() {
        println!("  name:     {} {}", user.firstname, user.surname);
    }
    if !user.email.is_empty() {
        println!("  email:    {}", user.email);
    }
    if !user.roles.is_empty() {
        println!("  roles:    {}", user.roles.join(", "));
    }
}

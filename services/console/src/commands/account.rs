//! Sign-in commands

use anyhow::{Result, bail};
use auth::{
    Role,
    gate::login_redirect,
    oauth::{OAuthProvider, authorization_url, callback_token, complete_login},
};
use common::navigation::Route;

use crate::app::App;

/// Show the landing route of a signed-in session, or where to sign in
pub async fn login(app: &App) -> Result<()> {
    app.session.restore(&app.users).await;
    let state = app.session.resolved().await;

    if let Some(route) = login_redirect(&state) {
        println!(
            "Already signed in as {}. Landing page: {}",
            state.email().unwrap_or_default(),
            route
        );
        return Ok(());
    }

    let url = authorization_url(&app.gateway, OAuthProvider::Google)?;
    println!("Open this address in a browser to sign in with Google:");
    println!();
    println!("  {}", url);
    println!();
    println!("Then run `erp-console callback <address you were sent back to>`.");
    Ok(())
}

/// Finish the sign-in started by `login`
pub async fn callback(app: &App, input: &str) -> Result<()> {
    let token = callback_token(input);
    let route = complete_login(&app.session, &app.users, token.as_deref()).await;

    match route {
        Route::Login => bail!("Sign-in failed. Run `erp-console login` to try again."),
        Route::InvalidAccess => {
            println!("Signed in, but this account has no access to the finance console.");
        }
        route => {
            let state = app.session.snapshot();
            println!(
                "Signed in as {}. Landing page: {}",
                state.email().unwrap_or_default(),
                route
            );
        }
    }
    Ok(())
}

pub async fn whoami(app: &App) -> Result<()> {
    app.session.restore(&app.users).await;
    let state = app.session.resolved().await;

    let Some(user) = state.user.as_ref().filter(|_| state.authenticated) else {
        println!("Not signed in.");
        return Ok(());
    };

    let role = match Role::of(user) {
        Role::Finance => "finance",
        Role::Staff => "staff (no finance access)",
    };

    println!("{} ({})", user.name, user.initials());
    println!("Email:   {}", user.email);
    println!("Role:    {}", role);
    if let Some(picture) = user.picture_url() {
        println!("Picture: {}", picture);
    }
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.session.logout();
    println!("Signed out.");
    Ok(())
}

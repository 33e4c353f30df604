//! Application state shared by the commands

use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use anyhow::{Result, bail};
use auth::{AccessDecision, Session, UserRepository, gate::authorize};
use billing::{BillRepository, StudentBillRepository, SubmitResult};
use common::{
    config::ClientConfig,
    gateway::Gateway,
    navigation::{NavigationBus, Navigator, Route},
    storage::FileTokenStore,
};
use tracing::{info, warn};

/// Everything a command needs, wired once at start-up
pub struct App {
    pub config: ClientConfig,
    pub bus: Arc<NavigationBus>,
    pub gateway: Arc<Gateway>,
    pub session: Session,
    pub users: UserRepository,
    pub bills: BillRepository,
    pub student_bills: StudentBillRepository,
}

impl App {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let tokens = Arc::new(FileTokenStore::new(config.token_path.clone()));
        let bus = Arc::new(NavigationBus::default());
        let gateway = Arc::new(Gateway::new(&config, tokens.clone(), bus.clone())?);

        Ok(Self {
            session: Session::new(tokens, bus.clone()),
            users: UserRepository::new(gateway.clone()),
            bills: BillRepository::new(gateway.clone()),
            student_bills: StudentBillRepository::new(gateway.clone()),
            config,
            bus,
            gateway,
        })
    }

    /// Resolve the session and check it may open the route
    pub async fn enter(&self, route: Route) -> Result<()> {
        self.session.restore(&self.users).await;
        let state = self.session.resolved().await;

        match authorize(&state, &route) {
            AccessDecision::Allow => {
                self.bus.navigate(route);
                Ok(())
            }
            AccessDecision::RedirectToLogin => {
                self.bus.navigate(Route::Login);
                bail!("Not signed in. Run `erp-console login` first.")
            }
            AccessDecision::ShowRestricted => {
                self.bus.navigate(Route::InvalidAccess);
                bail!(
                    "Access denied: {} is not a finance account.",
                    state.email().unwrap_or("this account")
                )
            }
            // `resolved` only returns once loading is over
            AccessDecision::Wait => bail!("Session check did not complete"),
        }
    }

    /// Turn a controller outcome into the command's result
    ///
    /// A rejected session already sent the application to the login page;
    /// the local session follows and the user is told to sign in again.
    pub fn finish<T>(&self, result: SubmitResult<T>) -> Result<T> {
        match result {
            Ok(value) => Ok(value),
            Err(e) if e.is_unauthorized() => {
                warn!("Session expired during command");
                self.session.reset();
                bail!("Your session has expired. Run `erp-console login` to sign in again.")
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Ask for the second activation of a destructive action
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let confirmed = is_yes(&answer);

    if !confirmed {
        info!("Cancelled by user");
    }
    Ok(confirmed)
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
    }

    #[test]
    fn test_confirm_skips_prompt_with_yes() {
        assert!(confirm("Delete?", true).expect("no prompt"));
    }
}

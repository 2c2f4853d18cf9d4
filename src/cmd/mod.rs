//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module          | Commands handled                                      |
//! |-----------------|-------------------------------------------------------|
//! | `session`       | `Login`, `Logout`, `Whoami`, `Dashboard`, passwords    |
//! | `users`         | `Users`                                               |
//! | `profiles`      | `Profiles`                                            |
//! | `repos`         | `Repos`                                               |
//! | `access`        | `Access`                                              |
//! | `modules`       | `Modules`                                             |
//! | `system_info`   | `SystemInfo`                                          |
//! | `shell`         | `Shell`                                               |
//! | `config`        | `Config`                                              |

pub mod access;
pub mod config;
pub mod modules;
pub mod profiles;
pub mod repos;
pub mod session;
pub mod shell;
pub mod system_info;
pub mod users;

pub use access::cmd_access;
pub use config::cmd_config;
pub use modules::cmd_modules;
pub use profiles::cmd_profiles;
pub use repos::cmd_repos;
pub use session::{cmd_dashboard, cmd_forgot_password, cmd_login, cmd_logout, cmd_reset_password, cmd_whoami};
pub use shell::cmd_shell;
pub use system_info::cmd_system_info;
pub use users::cmd_users;

use anyhow::{Context, Result, bail};
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};

use archivo::auth::{AuthApi, LoginRequest};
use archivo::client::ApiClient;
use archivo::config::ArchivoConfig;
use archivo::errors::ApiError;
use archivo::router::{GuardDecision, Route, guard};
use archivo::session::SessionStore;
use archivo::ui;

/// Everything one process shares: the client (and its cookie jar), the
/// auth calls, and the session store.
pub struct App {
    pub config: ArchivoConfig,
    pub client: ApiClient,
    pub auth: AuthApi,
    pub session: SessionStore,
    /// Skip confirmation prompts (`--yes`)
    pub assume_yes: bool,
}

impl App {
    pub fn new(config: ArchivoConfig, assume_yes: bool) -> Result<Self> {
        let client = ApiClient::from_config(&config)
            .with_context(|| format!("Failed to set up client for {}", config.api_base))?;
        Ok(Self {
            auth: AuthApi::new(client.clone()),
            client,
            config,
            session: SessionStore::new(),
            assume_yes,
        })
    }

    /// Resolve the session, showing a spinner while `GET /auth/me/` runs.
    pub async fn start(&mut self) {
        let spinner = ui::loading_spinner("Checking session...");
        self.session.initialize(&self.auth).await;
        spinner.finish_and_clear();
    }

    /// Prompts are only shown when a person is at the terminal.
    pub fn interactive(&self) -> bool {
        console::user_attended_stderr()
    }

    fn can_sign_in(&self) -> bool {
        self.config.password.is_some() || self.interactive()
    }

    /// Log in with the given or configured credentials, prompting for
    /// whatever is missing.
    pub async fn sign_in(&mut self, email: Option<String>, password: Option<String>) -> Result<()> {
        let email = match email.or_else(|| self.config.email.clone()) {
            Some(email) => email,
            None if self.interactive() => Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Email")
                .interact_text()?,
            None => bail!("No email given. Pass --email or set ARCHIVO_EMAIL"),
        };
        let password = match password.or_else(|| self.config.password.clone()) {
            Some(password) => password,
            None if self.interactive() => Password::with_theme(&ColorfulTheme::default())
                .with_prompt("Password")
                .interact()?,
            None => bail!("No password given. Set ARCHIVO_PASSWORD"),
        };

        let request = LoginRequest {
            email,
            password,
            remember_me: self.config.remember_me,
        };
        match self.auth.login(&request).await {
            Ok(user) => {
                self.session.login(user);
                Ok(())
            }
            Err(ApiError::InvalidCredentials(message)) => {
                self.session.record_auth_error(message.clone());
                bail!(message)
            }
            Err(e) => Err(e).context("Login failed"),
        }
    }

    /// Run the guard for `route`, signing in once if it sends us to login.
    pub async fn enter(&mut self, route: Route) -> Result<Route> {
        if self.session.is_loading() {
            self.start().await;
        }
        let mut signed_in = false;
        loop {
            match guard(&self.session, route.clone()) {
                GuardDecision::Render(route) => return Ok(route),
                GuardDecision::Redirect(Route::Login) if !signed_in && self.can_sign_in() => {
                    self.sign_in(None, None).await?;
                    signed_in = true;
                }
                GuardDecision::Redirect(Route::Login) => {
                    bail!("Not logged in. Run 'archivo login' or set ARCHIVO_TOKEN")
                }
                GuardDecision::Redirect(Route::Home) if route.is_admin() => {
                    bail!("{} requires administration access", route)
                }
                GuardDecision::Redirect(other) => bail!("{} is not available, go to {}", route, other),
                GuardDecision::Loading => bail!("Session is still loading"),
            }
        }
    }

    /// Ask before a destructive action. `--yes` answers for the user; a
    /// non-interactive run without it declines.
    pub fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if !self.interactive() {
            return false;
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Parse `on`/`off` style values for boolean arguments.
pub fn parse_switch(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" | "grant" => Ok(true),
        "off" | "false" | "no" | "0" | "revoke" => Ok(false),
        other => Err(format!("expected on/off, got '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_values() {
        assert_eq!(parse_switch("ON"), Ok(true));
        assert_eq!(parse_switch("revoke"), Ok(false));
        assert!(parse_switch("maybe").is_err());
    }
}

//! Session commands: login, logout, whoami, dashboard and the password
//! recovery forms.

use anyhow::{Context, Result, bail};
use console::style;
use dialoguer::{Password, theme::ColorfulTheme};

use archivo::errors::ApiError;
use archivo::router::Route;
use archivo::ui::{self, icons};
use archivo::views::DashboardSummary;

use super::App;

pub async fn cmd_login(app: &mut App, email: Option<String>) -> Result<()> {
    app.start().await;
    if let Some(user) = app.session.user() {
        println!("Already logged in as {}", style(&user.email).bold());
        return Ok(());
    }
    app.sign_in(email, None).await?;
    if let Some(user) = app.session.user() {
        ui::success(format!("Logged in as {}", user.email));
    }
    Ok(())
}

pub async fn cmd_logout(app: &mut App) -> Result<()> {
    app.start().await;
    if !app.session.is_authenticated() {
        println!("Not logged in.");
        return Ok(());
    }
    app.session.logout(&app.auth).await;
    ui::success("Logged out");
    Ok(())
}

pub async fn cmd_whoami(app: &mut App) -> Result<()> {
    app.start().await;
    match app.session.user() {
        Some(user) => {
            println!("{}{} <{}>", icons::USER, style(user.display_name()).bold(), user.email);
            println!("  profile: {} ({})", app.session.perfil_nombre(), app.session.perfil_color());
            println!("  type:    {}", user.tipo);
        }
        None => println!("Anonymous"),
    }
    Ok(())
}

pub async fn cmd_dashboard(app: &mut App) -> Result<()> {
    app.enter(Route::Dashboard).await?;
    render_dashboard(app);
    Ok(())
}

pub fn render_dashboard(app: &App) {
    let Some(user) = app.session.user() else {
        return;
    };
    let summary = DashboardSummary::from_user(user, app.session.perfil_nombre());
    println!();
    println!("{}", style(format!("Welcome, {}", summary.display_name)).bold());
    println!();
    println!("  Email:         {}", summary.email);
    println!("  Type:          {}", summary.tipo);
    println!("  Profile:       {}", summary.perfil);
    println!("  Repositories:  {}", style(summary.repositorios).cyan());
    println!();
}

pub async fn cmd_forgot_password(app: &App, email: &str) -> Result<()> {
    let message = app
        .auth
        .forgot_password(email)
        .await
        .context("Failed to request a password reset")?;
    ui::success(message);
    Ok(())
}

/// The reset form. Prompts for the password twice when it is not given.
pub async fn cmd_reset_password(
    app: &App,
    uid: &str,
    token: &str,
    password: Option<String>,
) -> Result<()> {
    let (password, confirmation) = match password {
        Some(p) => (p.clone(), p),
        None if app.interactive() => {
            let theme = ColorfulTheme::default();
            let password = Password::with_theme(&theme)
                .with_prompt("New password")
                .interact()?;
            let confirmation = Password::with_theme(&theme)
                .with_prompt("Confirm password")
                .interact()?;
            (password, confirmation)
        }
        None => bail!("No password given. Pass --password"),
    };

    match app.auth.reset_password(uid, token, &password, &confirmation).await {
        Ok(message) => {
            ui::success(message);
            println!("You can now log in with the new password.");
            Ok(())
        }
        Err(ApiError::Validation(e)) => bail!(e),
        Err(e) => Err(e).context("Password reset failed"),
    }
}

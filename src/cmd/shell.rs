//! Interactive shell — `archivo shell`.
//!
//! Keeps one session (and one cookie jar) for the life of the process and
//! moves between views through the same guard the one-shot commands use.

use anyhow::{Result, bail};
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use archivo::models::capabilities::CAPABILITIES;
use archivo::resources::{
    AccessChange, ModulosManager, PerfilesManager, PermisosManager, RepositoriosManager,
    SystemInfoManager, UsersManager,
};
use archivo::router::{AdminSection, GuardDecision, Route, resolve};
use archivo::ui::{self, icons};

use super::App;

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Login,
    ForgotPassword,
    Open(Route),
    GoTo,
    Logout,
    Quit,
}

impl Action {
    fn label(&self) -> String {
        match self {
            Action::Login => "Log in".to_string(),
            Action::ForgotPassword => "Forgot password".to_string(),
            Action::Open(Route::Dashboard) => "Dashboard".to_string(),
            Action::Open(Route::Repos) => "Repositories".to_string(),
            Action::Open(Route::Admin(Some(section))) => format!("Admin: {}", section.label()),
            Action::Open(route) => route.to_string(),
            Action::GoTo => "Go to path...".to_string(),
            Action::Logout => "Log out".to_string(),
            Action::Quit => "Quit".to_string(),
        }
    }
}

fn menu(app: &App) -> Vec<Action> {
    if !app.session.is_authenticated() {
        return vec![Action::Login, Action::ForgotPassword, Action::GoTo, Action::Quit];
    }
    let mut actions = vec![Action::Open(Route::Dashboard), Action::Open(Route::Repos)];
    if app
        .session
        .has_permission(archivo::models::capabilities::ADMIN_ACCESS)
    {
        actions.extend(
            AdminSection::ALL
                .into_iter()
                .map(|s| Action::Open(Route::Admin(Some(s)))),
        );
    }
    actions.extend([Action::GoTo, Action::Logout, Action::Quit]);
    actions
}

pub async fn cmd_shell(app: &mut App) -> Result<()> {
    if !app.interactive() {
        bail!("The shell needs an interactive terminal");
    }
    app.start().await;
    let theme = ColorfulTheme::default();

    loop {
        println!();
        match app.session.user() {
            Some(user) => println!(
                "{}{} {}",
                icons::USER,
                style(user.display_name()).bold(),
                style(format!("[{}]", app.session.perfil_nombre())).dim()
            ),
            None => println!("{}{}", icons::LOCK, style("Not logged in").dim()),
        }

        let actions = menu(app);
        let labels: Vec<String> = actions.iter().map(Action::label).collect();
        let Some(choice) = Select::with_theme(&theme)
            .with_prompt("Archivo+")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            break;
        };

        let outcome = match actions[choice].clone() {
            Action::Quit => break,
            Action::Login => login(app).await,
            Action::ForgotPassword => forgot_password(app).await,
            Action::Logout => {
                app.session.logout(&app.auth).await;
                ui::success("Logged out");
                Ok(())
            }
            Action::GoTo => {
                let path: String = Input::with_theme(&theme)
                    .with_prompt("Path")
                    .default("/".to_string())
                    .interact_text()?;
                navigate(app, Route::parse(&path)).await
            }
            Action::Open(route) => navigate(app, route).await,
        };
        if let Err(e) = outcome {
            ui::error(format!("{:#}", e));
        }
    }
    Ok(())
}

async fn login(app: &mut App) -> Result<()> {
    app.sign_in(None, None).await?;
    super::session::render_dashboard(app);
    Ok(())
}

async fn forgot_password(app: &App) -> Result<()> {
    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?;
    super::session::cmd_forgot_password(app, &email).await
}

/// Run the guard for `route` and render whatever it settles on.
async fn navigate(app: &mut App, route: Route) -> Result<()> {
    let decision = resolve(&app.session, route.clone());
    let target = match decision {
        GuardDecision::Render(target) => target,
        GuardDecision::Loading => {
            app.start().await;
            return Ok(());
        }
        GuardDecision::Redirect(target) => target,
    };
    if target != route {
        println!("{}", style(format!("{} → {}", route, target)).dim());
    }

    match target {
        Route::Login => login(app).await,
        Route::Home | Route::Dashboard => {
            super::session::render_dashboard(app);
            Ok(())
        }
        Route::Repos => super::repos::list(&RepositoriosManager::new(app.client.clone())).await,
        Route::Admin(None) => {
            for section in AdminSection::ALL {
                println!("  {}{}  /admin/{}", icons::GEAR, section.label(), section.slug());
            }
            Ok(())
        }
        Route::Admin(Some(section)) => admin_section(app, section).await,
        Route::ResetPassword { uid, token } => {
            super::session::cmd_reset_password(app, &uid, &token, None).await
        }
        Route::Shared { link_id } => {
            ui::warning(format!("Shared link {} can only be opened in a browser", link_id));
            Ok(())
        }
        Route::NotFound => Ok(()),
    }
}

async fn admin_section(app: &mut App, section: AdminSection) -> Result<()> {
    let theme = ColorfulTheme::default();
    let client = app.client.clone();
    match section {
        AdminSection::Users => {
            let users = UsersManager::new(client.clone());
            super::users::list(&users).await?;
            let choice = Select::with_theme(&theme)
                .items(&["Back", "Toggle active", "Toggle repository access"])
                .default(0)
                .interact()?;
            if choice == 0 {
                return Ok(());
            }
            let id = prompt_id("User id")?;
            let user = users.get(id).await?;
            if choice == 1 {
                let updated = users.toggle_active(&user).await?;
                ui::success(format!("{} active: {}", updated.email, ui::flag(updated.is_active)));
            } else {
                let repo = RepositoriosManager::new(client.clone())
                    .get(prompt_id("Repository id")?)
                    .await?;
                match PermisosManager::new(client).toggle_access(user.id, &repo).await? {
                    AccessChange::Granted(_) => ui::success(format!("Granted {}", repo.nombre)),
                    AccessChange::Revoked(_) => ui::success(format!("Revoked {}", repo.nombre)),
                }
            }
        }
        AdminSection::Profiles => {
            let perfiles = PerfilesManager::new(client);
            super::profiles::list(&perfiles).await?;
            let choice = Select::with_theme(&theme)
                .items(&["Back", "Show", "Toggle capability"])
                .default(0)
                .interact()?;
            if choice == 0 {
                return Ok(());
            }
            let id = prompt_id("Profile id")?;
            if choice == 1 {
                super::profiles::show(app, &perfiles, id).await?;
            } else {
                let perfil = perfiles.get(id).await?;
                let labels: Vec<String> = CAPABILITIES
                    .iter()
                    .map(|s| {
                        let on = perfil.capabilities.get(s.key).unwrap_or(false);
                        format!("[{}] {}", if on { "x" } else { " " }, s.label)
                    })
                    .collect();
                let pick = Select::with_theme(&theme)
                    .with_prompt("Capability")
                    .items(&labels)
                    .interact()?;
                let spec = &CAPABILITIES[pick];
                let value = !perfil.capabilities.get(spec.key).unwrap_or(false);
                perfiles.set_capability(id, spec.key, value).await?;
                ui::success(format!("{}: {} {}", perfil.nombre, spec.label, ui::flag(value)));
            }
        }
        AdminSection::Repos => {
            let repos = RepositoriosManager::new(client);
            super::repos::list(&repos).await?;
            if Select::with_theme(&theme)
                .items(&["Back", "Toggle active"])
                .default(0)
                .interact()?
                == 1
            {
                let repo = repos.get(prompt_id("Repository id")?).await?;
                let updated = repos.toggle_active(&repo).await?;
                ui::success(format!("{} active: {}", updated.nombre, ui::flag(updated.activo)));
            }
        }
        AdminSection::Modules => {
            let modulos = ModulosManager::new(client);
            super::modules::list(&modulos).await?;
            if Select::with_theme(&theme)
                .items(&["Back", "Toggle active"])
                .default(0)
                .interact()?
                == 1
            {
                let modulo = modulos.get(prompt_id("Module id")?).await?;
                let updated = modulos.toggle_active(&modulo).await?;
                ui::success(format!("{} active: {}", updated.nombre, ui::flag(updated.activo)));
            }
        }
        AdminSection::SystemInfo => {
            super::system_info::list(&SystemInfoManager::new(client)).await?;
        }
    }
    Ok(())
}

fn prompt_id(prompt: &str) -> Result<i64> {
    Ok(Input::<i64>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_labels() {
        assert_eq!(Action::Open(Route::Dashboard).label(), "Dashboard");
        assert_eq!(
            Action::Open(Route::Admin(Some(AdminSection::SystemInfo))).label(),
            "Admin: System info"
        );
        assert_eq!(Action::Open(Route::Home).label(), "/");
    }
}

//! Per-repository permissions — `archivo access`.

use anyhow::{Context, Result, bail};

use archivo::resources::{AccessChange, PermisosManager, RepositoriosManager};
use archivo::router::{AdminSection, Route};
use archivo::ui;
use archivo::views::permisos_table;

use super::super::AccessCommands;
use super::App;

pub async fn cmd_access(app: &mut App, command: AccessCommands) -> Result<()> {
    app.enter(Route::Admin(Some(AdminSection::Users))).await?;
    let permisos = PermisosManager::new(app.client.clone());

    match command {
        AccessCommands::List { user, repo } => {
            let records = match (user, repo) {
                (Some(user), _) => permisos.list_for_user(user).await,
                (None, Some(repo)) => permisos.list_for_repo(repo).await,
                (None, None) => bail!("Pass --user or --repo"),
            }
            .context("Failed to load permissions")?;
            if records.is_empty() {
                println!("No repository permissions.");
            } else {
                println!("{}", permisos_table(&records));
            }
        }
        AccessCommands::ToggleRepo { user, repo } => {
            let repo = RepositoriosManager::new(app.client.clone())
                .get(repo)
                .await
                .context("Failed to load repository")?;
            match permisos.toggle_access(user, &repo).await? {
                AccessChange::Granted(p) => ui::success(format!(
                    "Granted view access to {} (permission {})",
                    repo.nombre, p.id
                )),
                AccessChange::Revoked(_) => {
                    ui::success(format!("Revoked access to {}", repo.nombre))
                }
            }
        }
        AccessCommands::Toggle { permission, field } => {
            let permiso = permisos.get(permission).await.context("Failed to load permission")?;
            let updated = permisos.toggle_field(&permiso, field).await?;
            ui::success(format!(
                "{} on {}: {}",
                field.label(),
                updated.repositorio_nombre,
                ui::flag(updated.field(field))
            ));
        }
        AccessCommands::ToggleModule { permission, module } => {
            let permiso = permisos.get(permission).await.context("Failed to load permission")?;
            let updated = permisos.toggle_module(&permiso, module).await?;
            let state = if updated.modulos_permitidos.contains(&module) {
                "allowed"
            } else {
                "removed"
            };
            ui::success(format!("Module {} {}", module, state));
        }
    }
    Ok(())
}

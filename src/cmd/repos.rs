//! Repository management — `archivo repos`.
//!
//! `repos list` is open to any signed-in user; every other subcommand is
//! part of the administration area.

use anyhow::{Context, Result};

use archivo::models::RepositorioDraft;
use archivo::resources::RepositoriosManager;
use archivo::router::{AdminSection, Route};
use archivo::ui;
use archivo::views::repos_table;

use super::super::ReposCommands;
use super::App;

pub async fn cmd_repos(app: &mut App, command: ReposCommands) -> Result<()> {
    let route = match command {
        ReposCommands::List => Route::Repos,
        _ => Route::Admin(Some(AdminSection::Repos)),
    };
    app.enter(route).await?;
    let repos = RepositoriosManager::new(app.client.clone());

    match command {
        ReposCommands::List => list(&repos).await?,
        ReposCommands::Create {
            nombre,
            clave,
            modulo,
            user,
            inactive,
        } => {
            let draft = RepositorioDraft {
                nombre,
                clave,
                activo: !inactive,
                modulos_ids: (!modulo.is_empty()).then_some(modulo),
                users_asignados: (!user.is_empty()).then_some(user),
            };
            let repo = repos
                .create(&draft)
                .await
                .context("Failed to create repository")?;
            ui::success(format!("Created repository {} ({})", repo.nombre, repo.folio));
        }
        ReposCommands::Edit {
            id,
            nombre,
            clave,
            modulo,
            user,
        } => {
            let current = repos.get(id).await.context("Failed to load repository")?;
            let mut draft = RepositorioDraft::from_repo(&current);
            if let Some(nombre) = nombre {
                draft.nombre = nombre;
            }
            if let Some(clave) = clave {
                draft.clave = clave;
            }
            if !modulo.is_empty() {
                draft.modulos_ids = Some(modulo);
            }
            if !user.is_empty() {
                draft.users_asignados = Some(user);
            }
            let repo = repos
                .update(id, &draft)
                .await
                .context("Failed to update repository")?;
            ui::success(format!("Updated repository {}", repo.nombre));
        }
        ReposCommands::Delete { id } => {
            let repo = repos.get(id).await.context("Failed to load repository")?;
            if !app.confirm(&format!("Delete repository {} ({})?", repo.nombre, repo.folio)) {
                println!("Cancelled.");
                return Ok(());
            }
            repos.delete(id).await.context("Failed to delete repository")?;
            ui::success(format!("Deleted repository {}", repo.nombre));
        }
        ReposCommands::ToggleActive { id } => {
            let repo = repos.get(id).await.context("Failed to load repository")?;
            let updated = repos.toggle_active(&repo).await?;
            ui::success(format!(
                "{} is now {}",
                updated.nombre,
                if updated.activo { "active" } else { "inactive" }
            ));
        }
    }
    Ok(())
}

pub async fn list(repos: &RepositoriosManager) -> Result<()> {
    let all = repos.list().await.context("Failed to load repositories")?;
    if all.is_empty() {
        println!("No repositories found.");
    } else {
        println!("{}", repos_table(&all));
    }
    Ok(())
}

//! Profile management — `archivo profiles`.

use anyhow::{Context, Result, bail};
use console::style;

use archivo::models::PerfilDraft;
use archivo::models::capabilities::spec_for;
use archivo::resources::perfiles::{holders, profile_of};
use archivo::resources::{PerfilesManager, UsersManager};
use archivo::router::{AdminSection, Route};
use archivo::ui::{self, icons};
use archivo::views::{capabilities_table, perfiles_table};

use super::super::ProfilesCommands;
use super::App;

pub async fn cmd_profiles(app: &mut App, command: ProfilesCommands) -> Result<()> {
    app.enter(Route::Admin(Some(AdminSection::Profiles))).await?;
    let perfiles = PerfilesManager::new(app.client.clone());

    match command {
        ProfilesCommands::List => list(&perfiles).await?,
        ProfilesCommands::Show { id } => show(app, &perfiles, id).await?,
        ProfilesCommands::Create {
            clave,
            nombre,
            descripcion,
            color,
            grant,
        } => {
            let mut draft = PerfilDraft {
                clave,
                nombre,
                descripcion: descripcion.unwrap_or_default(),
                color,
                activo: true,
                ..Default::default()
            };
            for key in &grant {
                if !draft.capabilities.set(key, true) {
                    bail!("Unknown capability '{}'", key);
                }
            }
            let perfil = perfiles
                .create(&draft)
                .await
                .context("Failed to create profile")?;
            ui::success(format!("Created profile {} (id {})", perfil.nombre, perfil.id));
        }
        ProfilesCommands::Set {
            perfil,
            user,
            capability,
            value,
        } => {
            let (updated, perfil_id, value) = match (perfil, user, value) {
                (Some(id), _, Some(value)) => {
                    (perfiles.set_capability(id, &capability, value).await?, id, value)
                }
                (Some(id), _, None) => {
                    let current = perfiles.get(id).await.context("Failed to load profile")?;
                    let value = !current.capabilities.get(&capability).unwrap_or(false);
                    (perfiles.set_capability(id, &capability, value).await?, id, value)
                }
                (None, Some(user_id), value) => {
                    let user = UsersManager::new(app.client.clone())
                        .get(user_id)
                        .await
                        .context("Failed to load user")?;
                    let id = profile_of(&user)?;
                    let updated = match value {
                        Some(value) => perfiles.set_capability(id, &capability, value).await?,
                        None => perfiles.toggle_for_user(&user, &capability).await?,
                    };
                    let value = updated.capabilities.get(&capability).unwrap_or(false);
                    (updated, id, value)
                }
                (None, None, _) => bail!("Pass --perfil or --user"),
            };
            let label = spec_for(&capability).map_or(capability.as_str(), |s| s.label);
            ui::success(format!(
                "{}: {} {}",
                updated.nombre,
                label,
                if value { "granted" } else { "revoked" }
            ));
            report_reach(app, perfil_id).await;
        }
    }
    Ok(())
}

pub async fn list(perfiles: &PerfilesManager) -> Result<()> {
    let all = perfiles.list().await.context("Failed to load profiles")?;
    if all.is_empty() {
        println!("No profiles found.");
    } else {
        println!("{}", perfiles_table(&all));
    }
    Ok(())
}

pub async fn show(app: &App, perfiles: &PerfilesManager, id: i64) -> Result<()> {
    let perfil = perfiles.get(id).await.context("Failed to load profile")?;
    println!();
    println!(
        "{}{} {}",
        icons::TAG,
        style(&perfil.nombre).bold(),
        style(format!("[{}]", perfil.clave)).dim()
    );
    if !perfil.descripcion.is_empty() {
        println!("{}", perfil.descripcion);
    }
    println!("Color: {}   Status: {}", perfil.color(), ui::active_badge(perfil.activo));
    println!();
    println!("{}", capabilities_table(&perfil));
    report_reach(app, id).await;
    Ok(())
}

/// Edits to a profile reach every holder; say how many.
async fn report_reach(app: &App, perfil_id: i64) {
    match UsersManager::new(app.client.clone()).list().await {
        Ok(users) => println!(
            "{}",
            style(format!(
                "Changes to this profile apply to {} user(s)",
                holders(&users, perfil_id)
            ))
            .dim()
        ),
        Err(e) => tracing::debug!(error = %e, "could not count profile holders"),
    }
}

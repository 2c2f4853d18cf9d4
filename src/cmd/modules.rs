//! Content modules — `archivo modules`.

use anyhow::{Context, Result};

use archivo::resources::ModulosManager;
use archivo::router::{AdminSection, Route};
use archivo::ui;
use archivo::views::modulos_table;

use super::super::ModulesCommands;
use super::App;

pub async fn cmd_modules(app: &mut App, command: ModulesCommands) -> Result<()> {
    app.enter(Route::Admin(Some(AdminSection::Modules))).await?;
    let modulos = ModulosManager::new(app.client.clone());

    match command {
        ModulesCommands::List => list(&modulos).await?,
        ModulesCommands::ToggleActive { id } => {
            let modulo = modulos.get(id).await.context("Failed to load module")?;
            let updated = modulos.toggle_active(&modulo).await?;
            ui::success(format!(
                "{} is now {}",
                updated.nombre,
                if updated.activo { "active" } else { "inactive" }
            ));
        }
    }
    Ok(())
}

pub async fn list(modulos: &ModulosManager) -> Result<()> {
    let all = modulos.list().await.context("Failed to load modules")?;
    if all.is_empty() {
        println!("No modules found.");
    } else {
        println!("{}", modulos_table(&all));
    }
    Ok(())
}

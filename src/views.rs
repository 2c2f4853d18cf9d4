//! What each screen shows, built from fetched records.
//!
//! These functions only shape data into tables and summaries. Fetching and
//! printing happen in the binary's commands.

use console::style;

use crate::models::capabilities::{CAPABILITIES, CapabilityGroup};
use crate::models::{Modulo, Perfil, Release, Repositorio, RepositorioPermiso, User};
use crate::ui::{Table, active_badge, flag};

/// The dashboard card for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub email: String,
    pub display_name: String,
    pub tipo: String,
    pub perfil: String,
    pub repositorios: usize,
}

impl DashboardSummary {
    pub fn from_user(user: &User, perfil_nombre: &str) -> Self {
        Self {
            email: user.email.clone(),
            display_name: user.display_name().to_string(),
            tipo: user.tipo.to_string(),
            perfil: perfil_nombre.to_string(),
            repositorios: user.permisos_repositorios.len(),
        }
    }
}

pub fn users_table(users: &[User]) -> Table {
    let mut table = Table::new(["ID", "Email", "Name", "Profile", "Type", "Status"]);
    for user in users {
        let perfil = user
            .perfil_info
            .as_ref()
            .map(|p| p.nombre.clone())
            .unwrap_or_else(|| "-".to_string());
        table.row([
            user.id.to_string(),
            user.email.clone(),
            user.nombre_completo.clone(),
            perfil,
            user.tipo.to_string(),
            active_badge(user.is_active),
        ]);
    }
    table
}

pub fn perfiles_table(perfiles: &[Perfil]) -> Table {
    let mut table = Table::new(["ID", "Key", "Name", "Color", "Granted", "Status"]);
    for perfil in perfiles {
        table.row([
            perfil.id.to_string(),
            perfil.clave.clone(),
            perfil.nombre.clone(),
            perfil.color().to_string(),
            format!("{}/{}", perfil.capabilities.granted().len(), CAPABILITIES.len()),
            active_badge(perfil.activo),
        ]);
    }
    table
}

/// Capability checklist of one profile, grouped like the editor.
pub fn capabilities_table(perfil: &Perfil) -> Table {
    let mut table = Table::new(["Group", "Capability", "Key", "Granted"]);
    for group in [CapabilityGroup::Administration, CapabilityGroup::FilesAndContent] {
        for spec in CAPABILITIES.iter().filter(|s| s.group == group) {
            table.row([
                group.to_string(),
                spec.label.to_string(),
                spec.key.to_string(),
                flag(perfil.capabilities.get(spec.key).unwrap_or(false)),
            ]);
        }
    }
    table
}

pub fn repos_table(repos: &[Repositorio]) -> Table {
    let mut table = Table::new(["ID", "Folio", "Key", "Name", "Modules", "Status"]);
    for repo in repos {
        let modules = match repo.module_names() {
            names if names.is_empty() => repo.modulos.len().to_string(),
            names => names.join(", "),
        };
        table.row([
            repo.id.to_string(),
            repo.folio.clone(),
            repo.clave.clone(),
            repo.nombre.clone(),
            modules,
            active_badge(repo.activo),
        ]);
    }
    table
}

pub fn permisos_table(permisos: &[RepositorioPermiso]) -> Table {
    let mut table = Table::new(["ID", "User", "Repository", "View", "Edit", "Delete", "Modules"]);
    for permiso in permisos {
        let repo = if permiso.repositorio_nombre.is_empty() {
            permiso.repositorio.to_string()
        } else {
            format!("{} ({})", permiso.repositorio_nombre, permiso.repositorio_folio)
        };
        table.row([
            permiso.id.to_string(),
            permiso.usuario.to_string(),
            repo,
            flag(permiso.puede_ver),
            flag(permiso.puede_editar),
            flag(permiso.puede_borrar),
            permiso
                .modulos_permitidos
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(","),
        ]);
    }
    table
}

pub fn modulos_table(modulos: &[Modulo]) -> Table {
    let mut table = Table::new(["ID", "Name", "Type", "Formats", "Status"]);
    for modulo in modulos {
        table.row([
            modulo.id.to_string(),
            modulo.nombre.clone(),
            modulo.tipo.clone(),
            modulo.formatos_permitidos.join(", "),
            active_badge(modulo.activo),
        ]);
    }
    table
}

pub fn releases_table(releases: &[Release]) -> Table {
    let mut table = Table::new(["ID", "Version", "Date", "Notes", "Current"]);
    for release in releases {
        let current = if release.is_current {
            style("current").cyan().to_string()
        } else {
            String::new()
        };
        table.row([
            release.id.to_string(),
            release.version.clone(),
            release.release_date.clone(),
            release.bullets().len().to_string(),
            current,
        ]);
    }
    table
}

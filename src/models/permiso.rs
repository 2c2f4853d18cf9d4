use serde::{Deserialize, Serialize};

/// One of the three scoped booleans of a repository permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermisoField {
    Ver,
    Editar,
    Borrar,
}

impl PermisoField {
    pub const ALL: [PermisoField; 3] = [PermisoField::Ver, PermisoField::Editar, PermisoField::Borrar];

    /// Wire name of the field.
    pub fn key(self) -> &'static str {
        match self {
            PermisoField::Ver => "puede_ver",
            PermisoField::Editar => "puede_editar",
            PermisoField::Borrar => "puede_borrar",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PermisoField::Ver => "View",
            PermisoField::Editar => "Edit",
            PermisoField::Borrar => "Delete",
        }
    }
}

impl std::str::FromStr for PermisoField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim_start_matches("puede_") {
            "ver" | "view" => Ok(PermisoField::Ver),
            "editar" | "edit" => Ok(PermisoField::Editar),
            "borrar" | "delete" => Ok(PermisoField::Borrar),
            _ => anyhow::bail!(
                "Invalid permission field '{}'. Valid values: ver, editar, borrar",
                s
            ),
        }
    }
}

/// A (user, repository) permission record from `/repositorio-permisos/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorioPermiso {
    pub id: i64,
    pub usuario: i64,
    pub repositorio: i64,
    #[serde(default)]
    pub repositorio_nombre: String,
    #[serde(default)]
    pub repositorio_folio: String,
    #[serde(default)]
    pub puede_ver: bool,
    #[serde(default)]
    pub puede_editar: bool,
    #[serde(default)]
    pub puede_borrar: bool,
    #[serde(default)]
    pub modulos_permitidos: Vec<i64>,
}

impl RepositorioPermiso {
    pub fn field(&self, field: PermisoField) -> bool {
        match field {
            PermisoField::Ver => self.puede_ver,
            PermisoField::Editar => self.puede_editar,
            PermisoField::Borrar => self.puede_borrar,
        }
    }

    /// Allowed modules after adding or removing `modulo_id`.
    pub fn with_module_toggled(&self, modulo_id: i64) -> Vec<i64> {
        if self.modulos_permitidos.contains(&modulo_id) {
            self.modulos_permitidos
                .iter()
                .copied()
                .filter(|id| *id != modulo_id)
                .collect()
        } else {
            let mut next = self.modulos_permitidos.clone();
            next.push(modulo_id);
            next
        }
    }
}

/// Permission summary embedded in a user record (`permisos_repositorios`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermisoResumen {
    pub id: i64,
    pub repositorio_id: i64,
    #[serde(default)]
    pub repositorio_nombre: String,
    #[serde(default)]
    pub repositorio_folio: String,
    #[serde(default)]
    pub puede_ver: bool,
    #[serde(default)]
    pub puede_editar: bool,
    #[serde(default)]
    pub puede_borrar: bool,
}

/// Body for granting a user access to a repository.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositorioPermisoDraft {
    pub usuario: i64,
    pub repositorio: i64,
    pub puede_ver: bool,
    pub puede_editar: bool,
    pub puede_borrar: bool,
    pub modulos_permitidos: Vec<i64>,
}

impl RepositorioPermisoDraft {
    /// New grants are view-only and inherit the repository's modules.
    pub fn view_only(usuario: i64, repositorio: i64, modulos: Vec<i64>) -> Self {
        Self {
            usuario,
            repositorio,
            puede_ver: true,
            puede_editar: false,
            puede_borrar: false,
            modulos_permitidos: modulos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permiso() -> RepositorioPermiso {
        RepositorioPermiso {
            id: 1,
            usuario: 5,
            repositorio: 3,
            repositorio_nombre: "Canal 5".into(),
            repositorio_folio: "REP-0003".into(),
            puede_ver: true,
            puede_editar: false,
            puede_borrar: false,
            modulos_permitidos: vec![1, 2],
        }
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("ver".parse::<PermisoField>().unwrap(), PermisoField::Ver);
        assert_eq!("puede_editar".parse::<PermisoField>().unwrap(), PermisoField::Editar);
        assert_eq!("DELETE".parse::<PermisoField>().unwrap(), PermisoField::Borrar);
        assert!("ejecutar".parse::<PermisoField>().is_err());
    }

    #[test]
    fn module_toggle_adds_and_removes() {
        let p = permiso();
        assert_eq!(p.with_module_toggled(2), vec![1]);
        assert_eq!(p.with_module_toggled(4), vec![1, 2, 4]);
    }

    #[test]
    fn view_only_grant_defaults() {
        let draft = RepositorioPermisoDraft::view_only(5, 3, vec![1]);
        assert!(draft.puede_ver);
        assert!(!draft.puede_editar);
        assert!(!draft.puede_borrar);
    }

    #[test]
    fn field_reads_each_boolean() {
        let p = permiso();
        let values: Vec<bool> = PermisoField::ALL.iter().map(|f| p.field(*f)).collect();
        assert_eq!(values, vec![true, false, false]);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_true;

/// A content-type grouping attached to repositories (audio, images, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modulo {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub formatos_permitidos: Vec<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repositorio {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub folio: String,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub clave: String,
    #[serde(default = "default_true")]
    pub activo: bool,
    #[serde(default)]
    pub fecha_creacion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modulos: Vec<i64>,
    #[serde(default)]
    pub modulos_detalle: Option<Vec<Modulo>>,
}

impl Repositorio {
    /// Names of the attached modules, when the server expanded them.
    pub fn module_names(&self) -> Vec<&str> {
        self.modulos_detalle
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|m| m.nombre.as_str())
            .collect()
    }
}

/// Body for creating or editing a repository. The folio is assigned by the
/// server and never sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositorioDraft {
    pub nombre: String,
    pub clave: String,
    pub activo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modulos_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_asignados: Option<Vec<i64>>,
}

impl Default for RepositorioDraft {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            clave: String::new(),
            activo: true,
            modulos_ids: None,
            users_asignados: None,
        }
    }
}

impl RepositorioDraft {
    pub fn from_repo(repo: &Repositorio) -> Self {
        Self {
            nombre: repo.nombre.clone(),
            clave: repo.clave.clone(),
            activo: repo.activo,
            modulos_ids: None,
            users_asignados: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_with_expanded_modules() {
        let repo: Repositorio = serde_json::from_str(
            r#"{"id": 3, "nombre": "Canal 5", "folio": "REP-0003", "clave": "CANC",
                "activo": true, "fecha_creacion": "2025-01-10T08:00:00Z",
                "modulos": [1, 2],
                "modulos_detalle": [
                    {"id": 1, "nombre": "Audio", "tipo": "audio"},
                    {"id": 2, "nombre": "Images", "tipo": "images", "formatos_permitidos": [".png"]}
                ]}"#,
        )
        .unwrap();
        assert_eq!(repo.module_names(), vec!["Audio", "Images"]);
        assert!(repo.modulos_detalle.unwrap()[1].activo);
    }

    #[test]
    fn module_names_empty_without_detail() {
        let repo: Repositorio =
            serde_json::from_str(r#"{"id": 1, "nombre": "Solo"}"#).unwrap();
        assert!(repo.module_names().is_empty());
        assert!(repo.activo);
    }

    #[test]
    fn draft_never_sends_folio() {
        let draft = RepositorioDraft {
            nombre: "Canal 5".into(),
            clave: "CANC".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("folio").is_none());
        assert!(value.get("modulos_ids").is_none());
    }
}

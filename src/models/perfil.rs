use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::capabilities::Capabilities;
use super::default_true;

/// Fallback badge color for users without a profile.
pub const DEFAULT_PERFIL_COLOR: &str = "#3b82f6";
/// Fallback profile name for users without a profile.
pub const DEFAULT_PERFIL_NOMBRE: &str = "Usuario";

/// Profile embedded in a user record (`perfil_info`).
///
/// `permisos` is the capability map consulted by session permission checks.
/// The flat flags are kept alongside it because the permission editor seeds
/// its toggles from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfilInfo {
    pub id: i64,
    #[serde(default)]
    pub clave: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub permisos: Option<BTreeMap<String, bool>>,
    #[serde(flatten)]
    pub flags: Capabilities,
}

/// A profile as served by `/perfiles/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perfil {
    pub id: i64,
    pub clave: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default = "default_true")]
    pub activo: bool,
    #[serde(flatten)]
    pub capabilities: Capabilities,
}

impl Perfil {
    pub fn color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_PERFIL_COLOR)
    }
}

/// Body for creating a profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PerfilDraft {
    pub clave: String,
    pub nombre: String,
    pub descripcion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub activo: bool,
    #[serde(flatten)]
    pub capabilities: Capabilities,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfil_decodes_flat_flags() {
        let perfil: Perfil = serde_json::from_str(
            r##"{"id": 2, "clave": "operador", "nombre": "Operador", "color": "#5fbf00",
                "puede_subir_archivo": true, "puede_descargar": true}"##,
        )
        .unwrap();
        assert!(perfil.activo);
        assert!(perfil.capabilities.puede_subir_archivo);
        assert!(!perfil.capabilities.puede_borrar_archivo);
        assert_eq!(perfil.color(), "#5fbf00");
    }

    #[test]
    fn perfil_info_keeps_permission_map_separate() {
        let info: PerfilInfo = serde_json::from_str(
            r#"{"id": 1, "clave": "admin", "nombre": "Admin",
                "permisos": {"puede_gestionar_usuarios": true},
                "puede_acceder_administracion": true}"#,
        )
        .unwrap();
        assert_eq!(
            info.permisos.as_ref().and_then(|p| p.get("puede_gestionar_usuarios")),
            Some(&true)
        );
        assert!(info.flags.puede_acceder_administracion);
    }

    #[test]
    fn draft_serializes_capabilities_inline() {
        let mut draft = PerfilDraft {
            clave: "cliente".into(),
            nombre: "Cliente".into(),
            activo: true,
            ..Default::default()
        };
        draft.capabilities.puede_descargar = true;
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["puede_descargar"], true);
        assert_eq!(value["clave"], "cliente");
        assert!(value.get("color").is_none());
    }
}

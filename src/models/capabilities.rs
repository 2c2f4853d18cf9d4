//! Profile capability flags.
//!
//! A profile (`Perfil`) carries fifteen boolean flags. They are modelled as a
//! plain struct so the API shape stays exact, plus a static table that gives
//! each flag its wire key, a label, and the group it is shown under.

use serde::{Deserialize, Serialize};

/// Section a capability is listed under in the permission editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityGroup {
    Administration,
    FilesAndContent,
}

impl std::fmt::Display for CapabilityGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CapabilityGroup::Administration => write!(f, "Administration"),
            CapabilityGroup::FilesAndContent => write!(f, "Files & Content"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CapabilitySpec {
    pub key: &'static str,
    pub label: &'static str,
    pub group: CapabilityGroup,
}

const fn cap(key: &'static str, label: &'static str, group: CapabilityGroup) -> CapabilitySpec {
    CapabilitySpec { key, label, group }
}

/// Every capability, in display order.
pub static CAPABILITIES: &[CapabilitySpec] = &[
    cap("puede_acceder_administracion", "Access Administration", CapabilityGroup::Administration),
    cap("puede_gestionar_repositorios", "Manage Repositories", CapabilityGroup::Administration),
    cap("puede_gestionar_usuarios", "Manage Users", CapabilityGroup::Administration),
    cap("puede_gestionar_configuracion", "Manage Configuration", CapabilityGroup::Administration),
    cap("puede_crear_directorio", "Create Directory", CapabilityGroup::FilesAndContent),
    cap("puede_actualizar_directorio", "Update Directory", CapabilityGroup::FilesAndContent),
    cap("puede_borrar_directorio", "Delete Directory", CapabilityGroup::FilesAndContent),
    cap("puede_subir_archivo", "Upload Files", CapabilityGroup::FilesAndContent),
    cap("puede_actualizar_archivo", "Update Files", CapabilityGroup::FilesAndContent),
    cap("puede_borrar_archivo", "Delete Files", CapabilityGroup::FilesAndContent),
    cap("puede_descargar", "Download Files", CapabilityGroup::FilesAndContent),
    cap("puede_mover_archivos", "Move Files", CapabilityGroup::FilesAndContent),
    cap("puede_compartir", "Share with Privileges", CapabilityGroup::FilesAndContent),
    cap("puede_comentar", "Comment", CapabilityGroup::FilesAndContent),
    cap("puede_guardar_coleccion", "Save Collections", CapabilityGroup::FilesAndContent),
];

/// Key of the flag that gates the administration area.
pub const ADMIN_ACCESS: &str = "puede_acceder_administracion";

/// The fifteen capability flags of a profile. Absent flags read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    #[serde(default)]
    pub puede_acceder_administracion: bool,
    #[serde(default)]
    pub puede_gestionar_repositorios: bool,
    #[serde(default)]
    pub puede_gestionar_usuarios: bool,
    #[serde(default)]
    pub puede_gestionar_configuracion: bool,
    #[serde(default)]
    pub puede_crear_directorio: bool,
    #[serde(default)]
    pub puede_actualizar_directorio: bool,
    #[serde(default)]
    pub puede_borrar_directorio: bool,
    #[serde(default)]
    pub puede_subir_archivo: bool,
    #[serde(default)]
    pub puede_actualizar_archivo: bool,
    #[serde(default)]
    pub puede_borrar_archivo: bool,
    #[serde(default)]
    pub puede_descargar: bool,
    #[serde(default)]
    pub puede_mover_archivos: bool,
    #[serde(default)]
    pub puede_compartir: bool,
    #[serde(default)]
    pub puede_comentar: bool,
    #[serde(default)]
    pub puede_guardar_coleccion: bool,
}

impl Capabilities {
    fn slot(&mut self, key: &str) -> Option<&mut bool> {
        let slot = match key {
            "puede_acceder_administracion" => &mut self.puede_acceder_administracion,
            "puede_gestionar_repositorios" => &mut self.puede_gestionar_repositorios,
            "puede_gestionar_usuarios" => &mut self.puede_gestionar_usuarios,
            "puede_gestionar_configuracion" => &mut self.puede_gestionar_configuracion,
            "puede_crear_directorio" => &mut self.puede_crear_directorio,
            "puede_actualizar_directorio" => &mut self.puede_actualizar_directorio,
            "puede_borrar_directorio" => &mut self.puede_borrar_directorio,
            "puede_subir_archivo" => &mut self.puede_subir_archivo,
            "puede_actualizar_archivo" => &mut self.puede_actualizar_archivo,
            "puede_borrar_archivo" => &mut self.puede_borrar_archivo,
            "puede_descargar" => &mut self.puede_descargar,
            "puede_mover_archivos" => &mut self.puede_mover_archivos,
            "puede_compartir" => &mut self.puede_compartir,
            "puede_comentar" => &mut self.puede_comentar,
            "puede_guardar_coleccion" => &mut self.puede_guardar_coleccion,
            _ => return None,
        };
        Some(slot)
    }

    /// Value of the flag named `key`, or `None` for an unknown key.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.clone().slot(key).map(|v| *v)
    }

    /// Set the flag named `key`. Returns `false` if the key is unknown.
    pub fn set(&mut self, key: &str, value: bool) -> bool {
        match self.slot(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Flip the flag named `key`, returning its new value.
    pub fn toggle(&mut self, key: &str) -> Option<bool> {
        let slot = self.slot(key)?;
        *slot = !*slot;
        Some(*slot)
    }

    /// Keys of every flag that is set, in display order.
    pub fn granted(&self) -> Vec<&'static str> {
        CAPABILITIES
            .iter()
            .filter(|spec| self.get(spec.key).unwrap_or(false))
            .map(|spec| spec.key)
            .collect()
    }
}

/// Look up the display spec for a capability key.
pub fn spec_for(key: &str) -> Option<&'static CapabilitySpec> {
    CAPABILITIES.iter().find(|spec| spec.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_every_field() {
        let mut caps = Capabilities::default();
        for spec in CAPABILITIES {
            assert!(caps.set(spec.key, true), "unknown key {}", spec.key);
        }
        assert_eq!(caps.granted().len(), CAPABILITIES.len());
        assert_eq!(CAPABILITIES.len(), 15);
    }

    #[test]
    fn missing_flags_deserialize_false() {
        let caps: Capabilities =
            serde_json::from_str(r#"{"puede_descargar": true}"#).unwrap();
        assert!(caps.puede_descargar);
        assert!(!caps.puede_acceder_administracion);
    }

    #[test]
    fn toggle_flips_only_named_flag() {
        let mut caps = Capabilities::default();
        assert_eq!(caps.toggle("puede_comentar"), Some(true));
        assert_eq!(caps.granted(), vec!["puede_comentar"]);
        assert_eq!(caps.toggle("puede_comentar"), Some(false));
        assert!(caps.granted().is_empty());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut caps = Capabilities::default();
        assert_eq!(caps.get("puede_volar"), None);
        assert!(!caps.set("puede_volar", true));
        assert_eq!(caps.toggle("puede_volar"), None);
    }

    #[test]
    fn spec_lookup_returns_group() {
        let spec = spec_for(ADMIN_ACCESS).unwrap();
        assert_eq!(spec.group, CapabilityGroup::Administration);
        assert_eq!(spec_for("puede_subir_archivo").unwrap().label, "Upload Files");
    }
}

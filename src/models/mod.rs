//! Client-side mirrors of the Archivo+ API records.
//!
//! These are transient copies: every type here is deserialized from a
//! response and dropped after rendering. Writes go through the draft types
//! next to each record.

pub mod capabilities;
pub mod pagination;
pub mod perfil;
pub mod permiso;
pub mod release;
pub mod repositorio;
pub mod user;

pub use capabilities::{CAPABILITIES, Capabilities, CapabilityGroup, CapabilitySpec};
pub use pagination::{ListResponse, Page};
pub use perfil::{Perfil, PerfilDraft, PerfilInfo};
pub use permiso::{PermisoField, PermisoResumen, RepositorioPermiso, RepositorioPermisoDraft};
pub use release::{Release, ReleaseDraft};
pub use repositorio::{Modulo, Repositorio, RepositorioDraft};
pub use user::{User, UserDraft, UserType};

fn default_true() -> bool {
    true
}

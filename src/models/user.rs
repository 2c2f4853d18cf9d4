use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::default_true;
use super::perfil::PerfilInfo;
use super::permiso::PermisoResumen;

/// Role tag derived by the server from the user's profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Administrador,
    Operador,
    #[default]
    Cliente,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Administrador => write!(f, "administrador"),
            UserType::Operador => write!(f, "operador"),
            UserType::Cliente => write!(f, "cliente"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub perfil: Option<i64>,
    #[serde(default)]
    pub perfil_info: Option<PerfilInfo>,
    #[serde(default)]
    pub nombre_completo: String,
    #[serde(default)]
    pub compania: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub date_joined: Option<DateTime<Utc>>,
    #[serde(default)]
    pub permisos_repositorios: Vec<PermisoResumen>,
    #[serde(default)]
    pub tipo: UserType,
}

impl User {
    /// Name to show: full name when set, email otherwise.
    pub fn display_name(&self) -> &str {
        if self.nombre_completo.trim().is_empty() {
            &self.email
        } else {
            &self.nombre_completo
        }
    }

    /// The built-in administrator account, which cannot be deleted or
    /// deactivated from the client.
    pub fn is_protected_admin(&self) -> bool {
        let local_part = self.email.split('@').next().unwrap_or_default();
        self.username.as_deref() == Some("admin") || local_part == "admin"
    }
}

/// Body for creating or editing a user.
///
/// A blank password is left out of the payload, so editing a user without
/// typing a new password keeps the old one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDraft {
    pub email: String,
    pub nombre_completo: String,
    pub compania: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perfil: Option<i64>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "password_is_blank")]
    pub password: Option<String>,
}

fn password_is_blank(password: &Option<String>) -> bool {
    password.as_deref().is_none_or(|p| p.is_empty())
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            email: String::new(),
            nombre_completo: String::new(),
            compania: String::new(),
            telefono: None,
            perfil: None,
            is_active: true,
            password: None,
        }
    }
}

impl UserDraft {
    /// Seed an edit form from an existing user. The password starts blank.
    pub fn from_user(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            nombre_completo: user.nombre_completo.clone(),
            compania: user.compania.clone().unwrap_or_default(),
            telefono: user.telefono.clone(),
            perfil: user.perfil,
            is_active: user.is_active,
            password: None,
        }
    }
}

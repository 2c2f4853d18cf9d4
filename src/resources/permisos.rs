use super::Collection;
use crate::client::ApiClient;
use crate::errors::ApiResult;
use crate::models::{PermisoField, Repositorio, RepositorioPermiso, RepositorioPermisoDraft};

/// Result of flipping a user's access to a repository.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessChange {
    Granted(RepositorioPermiso),
    /// Id of the deleted record.
    Revoked(i64),
}

/// Per-repository ACL records. At most one per (user, repository).
#[derive(Debug, Clone)]
pub struct PermisosManager {
    permisos: Collection<RepositorioPermiso>,
}

impl PermisosManager {
    pub fn new(client: ApiClient) -> Self {
        Self {
            permisos: Collection::new(client, "repositorio-permisos/"),
        }
    }

    pub async fn get(&self, id: i64) -> ApiResult<RepositorioPermiso> {
        self.permisos.get(id).await
    }

    pub async fn list_for_user(&self, usuario: i64) -> ApiResult<Vec<RepositorioPermiso>> {
        self.permisos
            .list_where(&[("usuario", usuario.to_string())])
            .await
    }

    pub async fn list_for_repo(&self, repositorio: i64) -> ApiResult<Vec<RepositorioPermiso>> {
        self.permisos
            .list_where(&[("repositorio", repositorio.to_string())])
            .await
    }

    /// The record for one (user, repository) pair, if any. The server keeps
    /// at most one per pair, so the doubly filtered list fits one page.
    pub async fn find(&self, usuario: i64, repositorio: i64) -> ApiResult<Option<RepositorioPermiso>> {
        let matches = self
            .permisos
            .list_where(&[
                ("usuario", usuario.to_string()),
                ("repositorio", repositorio.to_string()),
            ])
            .await?;
        Ok(matches
            .into_iter()
            .find(|p| p.usuario == usuario && p.repositorio == repositorio))
    }

    /// Revoke access when a record exists, otherwise grant view-only access
    /// with all of the repository's modules.
    pub async fn toggle_access(&self, usuario: i64, repo: &Repositorio) -> ApiResult<AccessChange> {
        match self.find(usuario, repo.id).await? {
            Some(permiso) => {
                self.permisos.delete(permiso.id).await?;
                tracing::info!(usuario, repo_id = repo.id, "repository access revoked");
                Ok(AccessChange::Revoked(permiso.id))
            }
            None => {
                let draft = RepositorioPermisoDraft::view_only(usuario, repo.id, repo.modulos.clone());
                let created = self.permisos.create(&draft).await?;
                tracing::info!(usuario, repo_id = repo.id, "repository access granted");
                Ok(AccessChange::Granted(created))
            }
        }
    }

    /// PATCH only `field`, flipped.
    pub async fn toggle_field(
        &self,
        permiso: &RepositorioPermiso,
        field: PermisoField,
    ) -> ApiResult<RepositorioPermiso> {
        let body = field_patch(permiso, field);
        self.permisos.update(permiso.id, &body).await
    }

    /// Add or remove one module from the allowed list.
    pub async fn toggle_module(
        &self,
        permiso: &RepositorioPermiso,
        modulo_id: i64,
    ) -> ApiResult<RepositorioPermiso> {
        let body = serde_json::json!({
            "modulos_permitidos": permiso.with_module_toggled(modulo_id),
        });
        self.permisos.update(permiso.id, &body).await
    }
}

/// Body that flips exactly one boolean of `permiso`.
pub fn field_patch(permiso: &RepositorioPermiso, field: PermisoField) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    body.insert(
        field.key().to_string(),
        serde_json::Value::Bool(!permiso.field(field)),
    );
    serde_json::Value::Object(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permiso() -> RepositorioPermiso {
        serde_json::from_value(serde_json::json!({
            "id": 11,
            "usuario": 5,
            "repositorio": 3,
            "puede_ver": true,
            "puede_editar": false,
            "puede_borrar": false,
            "modulos_permitidos": [1]
        }))
        .unwrap()
    }

    #[test]
    fn field_patch_holds_one_key() {
        let body = field_patch(&permiso(), PermisoField::Editar);
        let map = body.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["puede_editar"], serde_json::Value::Bool(true));

        let body = field_patch(&permiso(), PermisoField::Ver);
        assert_eq!(body, serde_json::json!({"puede_ver": false}));
    }
}

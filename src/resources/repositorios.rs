use super::Collection;
use crate::client::ApiClient;
use crate::errors::ApiResult;
use crate::models::{Repositorio, RepositorioDraft};
use crate::validation::{normalize_repo_key, require};

#[derive(Debug, Clone)]
pub struct RepositoriosManager {
    repos: Collection<Repositorio>,
}

impl RepositoriosManager {
    pub fn new(client: ApiClient) -> Self {
        Self {
            repos: Collection::new(client, "repositorios/"),
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<Repositorio>> {
        self.repos.list().await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Repositorio> {
        self.repos.get(id).await
    }

    pub async fn create(&self, draft: &RepositorioDraft) -> ApiResult<Repositorio> {
        let draft = prepare(draft)?;
        let repo = self.repos.create(&draft).await?;
        tracing::info!(repo_id = repo.id, folio = %repo.folio, "repository created");
        Ok(repo)
    }

    pub async fn update(&self, id: i64, draft: &RepositorioDraft) -> ApiResult<Repositorio> {
        let draft = prepare(draft)?;
        self.repos.update(id, &draft).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.repos.delete(id).await?;
        tracing::info!(repo_id = id, "repository deleted");
        Ok(())
    }

    pub async fn toggle_active(&self, repo: &Repositorio) -> ApiResult<Repositorio> {
        let body = serde_json::json!({ "activo": !repo.activo });
        self.repos.update(repo.id, &body).await
    }
}

/// Trim the name and normalize the key before sending.
pub fn prepare(draft: &RepositorioDraft) -> ApiResult<RepositorioDraft> {
    require("nombre", &draft.nombre)?;
    let clave = normalize_repo_key(&draft.clave)?;
    Ok(RepositorioDraft {
        nombre: draft.nombre.trim().to_string(),
        clave,
        ..draft.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ApiError, ValidationError};

    #[test]
    fn prepare_normalizes_fields() {
        let draft = RepositorioDraft {
            nombre: "  Canal 5 ".into(),
            clave: "canc".into(),
            modulos_ids: Some(vec![1, 2]),
            ..Default::default()
        };
        let ready = prepare(&draft).unwrap();
        assert_eq!(ready.nombre, "Canal 5");
        assert_eq!(ready.clave, "CANC");
        assert_eq!(ready.modulos_ids, Some(vec![1, 2]));
    }

    #[test]
    fn prepare_requires_name_and_key() {
        let err = prepare(&RepositorioDraft {
            clave: "CANC".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::Required("nombre"))
        ));

        let err = prepare(&RepositorioDraft {
            nombre: "Canal 5".into(),
            clave: "CANAL".into(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::KeyLength { .. })
        ));
    }

    #[test]
    fn prepared_draft_omits_unset_lists() {
        let ready = prepare(&RepositorioDraft {
            nombre: "Radio".into(),
            clave: "radi".into(),
            ..Default::default()
        })
        .unwrap();
        let body = serde_json::to_value(&ready).unwrap();
        assert!(body.get("modulos_ids").is_none());
        assert!(body.get("users_asignados").is_none());
        assert_eq!(body["clave"], "RADI");
    }
}

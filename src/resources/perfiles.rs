use super::Collection;
use crate::client::ApiClient;
use crate::errors::{ApiResult, ValidationError};
use crate::models::capabilities::spec_for;
use crate::models::{Perfil, PerfilDraft, User};
use crate::validation::require;

#[derive(Debug, Clone)]
pub struct PerfilesManager {
    perfiles: Collection<Perfil>,
}

impl PerfilesManager {
    pub fn new(client: ApiClient) -> Self {
        Self {
            perfiles: Collection::new(client, "perfiles/"),
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<Perfil>> {
        self.perfiles.list().await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Perfil> {
        self.perfiles.get(id).await
    }

    pub async fn create(&self, draft: &PerfilDraft) -> ApiResult<Perfil> {
        require("clave", &draft.clave)?;
        require("nombre", &draft.nombre)?;
        self.perfiles.create(draft).await
    }

    /// PATCH a single capability flag. The change applies to every user
    /// holding the profile.
    pub async fn set_capability(&self, perfil_id: i64, key: &str, value: bool) -> ApiResult<Perfil> {
        let spec = spec_for(key).ok_or_else(|| ValidationError::UnknownCapability(key.to_string()))?;
        let mut body = serde_json::Map::new();
        body.insert(spec.key.to_string(), serde_json::Value::Bool(value));
        let perfil = self.perfiles.update(perfil_id, &body).await?;
        tracing::info!(perfil_id, capability = spec.key, value, "profile capability updated");
        Ok(perfil)
    }

    /// Flip one flag on the profile assigned to `user`.
    pub async fn toggle_for_user(&self, user: &User, key: &str) -> ApiResult<Perfil> {
        let perfil_id = profile_of(user)?;
        let current = self.get(perfil_id).await?;
        let value = current
            .capabilities
            .get(key)
            .ok_or_else(|| ValidationError::UnknownCapability(key.to_string()))?;
        self.set_capability(perfil_id, key, !value).await
    }
}

/// The profile id whose flags an edit on `user` would change.
pub fn profile_of(user: &User) -> Result<i64, ValidationError> {
    user.perfil
        .or_else(|| user.perfil_info.as_ref().map(|p| p.id))
        .ok_or(ValidationError::MissingProfile)
}

/// How many users an edit of `perfil_id` reaches.
pub fn holders(users: &[User], perfil_id: i64) -> usize {
    users
        .iter()
        .filter(|u| profile_of(u).ok() == Some(perfil_id))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;

    fn user(json: serde_json::Value) -> User {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn profile_comes_from_id_or_embedded_info() {
        assert_eq!(profile_of(&user(serde_json::json!({"id": 1, "email": "a@b", "perfil": 4}))), Ok(4));
        assert_eq!(
            profile_of(&user(serde_json::json!({"id": 1, "email": "a@b", "perfil_info": {"id": 7}}))),
            Ok(7)
        );
        assert_eq!(
            profile_of(&user(serde_json::json!({"id": 1, "email": "a@b"}))),
            Err(ValidationError::MissingProfile)
        );
    }

    #[test]
    fn counts_profile_holders() {
        let users = vec![
            user(serde_json::json!({"id": 1, "email": "a@b", "perfil": 2})),
            user(serde_json::json!({"id": 2, "email": "c@d", "perfil": 2})),
            user(serde_json::json!({"id": 3, "email": "e@f", "perfil": 3})),
            user(serde_json::json!({"id": 4, "email": "g@h"})),
        ];
        assert_eq!(holders(&users, 2), 2);
        assert_eq!(holders(&users, 9), 0);
    }

    #[tokio::test]
    async fn user_without_profile_cannot_be_edited() {
        let manager = PerfilesManager::new(ApiClient::new("http://127.0.0.1:9/api").unwrap());
        let err = manager
            .toggle_for_user(&user(serde_json::json!({"id": 1, "email": "a@b"})), "puede_comentar")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User must have a profile assigned");
    }

    #[tokio::test]
    async fn unknown_capability_is_rejected_locally() {
        let manager = PerfilesManager::new(ApiClient::new("http://127.0.0.1:9/api").unwrap());
        let err = manager.set_capability(1, "puede_volar", true).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::UnknownCapability(_))
        ));
    }
}

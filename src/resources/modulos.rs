use super::Collection;
use crate::client::ApiClient;
use crate::errors::ApiResult;
use crate::models::Modulo;

#[derive(Debug, Clone)]
pub struct ModulosManager {
    modulos: Collection<Modulo>,
}

impl ModulosManager {
    pub fn new(client: ApiClient) -> Self {
        Self {
            modulos: Collection::new(client, "modulos/"),
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<Modulo>> {
        self.modulos.list().await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Modulo> {
        self.modulos.get(id).await
    }

    pub async fn toggle_active(&self, modulo: &Modulo) -> ApiResult<Modulo> {
        let body = serde_json::json!({ "activo": !modulo.activo });
        let updated = self.modulos.update(modulo.id, &body).await?;
        tracing::info!(modulo_id = modulo.id, activo = updated.activo, "module toggled");
        Ok(updated)
    }
}

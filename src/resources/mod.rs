//! Resource managers behind the admin views.
//!
//! | Module          | Endpoint                  |
//! |-----------------|---------------------------|
//! | `users`         | `/users/`                 |
//! | `perfiles`      | `/perfiles/`              |
//! | `repositorios`  | `/repositorios/`          |
//! | `permisos`      | `/repositorio-permisos/`  |
//! | `modulos`       | `/modulos/`               |
//! | `system_info`   | `/system-info/`           |
//!
//! Each manager wraps a [`Collection`] and adds the rules its form enforces
//! before anything is sent.

pub mod modulos;
pub mod perfiles;
pub mod permisos;
pub mod repositorios;
pub mod system_info;
pub mod users;

pub use modulos::ModulosManager;
pub use perfiles::PerfilesManager;
pub use permisos::{AccessChange, PermisosManager};
pub use repositorios::RepositoriosManager;
pub use system_info::{ReleaseEditor, SystemInfoManager};
pub use users::UsersManager;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

use crate::client::ApiClient;
use crate::errors::ApiResult;

/// CRUD over one REST collection such as `users/`.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    client: ApiClient,
    path: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Collection<T> {
    /// `path` is relative to the API base and ends with `/`.
    pub fn new(client: ApiClient, path: &'static str) -> Self {
        Self {
            client,
            path,
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}{}/", self.path, id)
    }

    pub async fn list(&self) -> ApiResult<Vec<T>> {
        self.list_where(&[]).await
    }

    pub async fn list_where(&self, query: &[(&str, String)]) -> ApiResult<Vec<T>> {
        self.client.list(self.path, query).await
    }

    pub async fn get(&self, id: i64) -> ApiResult<T> {
        self.client.get(&self.item_path(id)).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> ApiResult<T> {
        self.client.post(self.path, body).await
    }

    /// PATCH: only the fields present in `body` change.
    pub async fn update<B: Serialize + ?Sized>(&self, id: i64, body: &B) -> ApiResult<T> {
        self.client.patch(&self.item_path(id), body).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.client.delete(&self.item_path(id)).await
    }
}

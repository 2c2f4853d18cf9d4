use super::Collection;
use crate::client::ApiClient;
use crate::errors::ApiResult;
use crate::models::{Release, ReleaseDraft};
use crate::validation::require;

#[derive(Debug, Clone)]
pub struct SystemInfoManager {
    releases: Collection<Release>,
}

impl SystemInfoManager {
    pub fn new(client: ApiClient) -> Self {
        Self {
            releases: Collection::new(client, "system-info/"),
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<Release>> {
        self.releases.list().await
    }

    pub async fn get(&self, id: i64) -> ApiResult<Release> {
        self.releases.get(id).await
    }

    pub async fn create(&self, draft: &ReleaseDraft) -> ApiResult<Release> {
        let draft = prepare(draft)?;
        let release = self.releases.create(&draft).await?;
        tracing::info!(release_id = release.id, version = %release.version, "release created");
        Ok(release)
    }

    pub async fn update(&self, id: i64, draft: &ReleaseDraft) -> ApiResult<Release> {
        let draft = prepare(draft)?;
        self.releases.update(id, &draft).await
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.releases.delete(id).await
    }

    /// Start editing `release`. Nothing is sent until `ReleaseEditor::save`.
    pub fn edit(&self, release: Release) -> ReleaseEditor {
        ReleaseEditor {
            draft: ReleaseDraft::from_release(&release),
            original: release,
        }
    }
}

/// All three text fields are required; every field is trimmed.
pub fn prepare(draft: &ReleaseDraft) -> ApiResult<ReleaseDraft> {
    require("version", &draft.version)?;
    require("release_date", &draft.release_date)?;
    require("updates", &draft.updates)?;
    Ok(ReleaseDraft {
        version: draft.version.trim().to_string(),
        release_date: draft.release_date.trim().to_string(),
        updates: draft.updates.trim().to_string(),
        is_current: draft.is_current,
    })
}

/// A local copy of a release being edited.
#[derive(Debug, Clone)]
pub struct ReleaseEditor {
    original: Release,
    draft: ReleaseDraft,
}

impl ReleaseEditor {
    pub fn draft(&self) -> &ReleaseDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ReleaseDraft {
        &mut self.draft
    }

    pub fn is_dirty(&self) -> bool {
        self.draft != ReleaseDraft::from_release(&self.original)
    }

    /// Commit the draft.
    pub async fn save(self, manager: &SystemInfoManager) -> ApiResult<Release> {
        manager.update(self.original.id, &self.draft).await
    }

    /// Throw the draft away and hand back the untouched record.
    pub fn cancel(self) -> Release {
        tracing::debug!(release_id = self.original.id, "release edit discarded");
        self.original
    }
}

use crate::domain::operation::Operation;
use crate::domain::ports::{Backend, Resolver};
use crate::utils::error::{CpStarsError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

/// Resolves Renson identifiers by looking the star up on the backend and
/// taking its CP-Stars id.
pub struct CatalogResolver<B> {
    backend: Arc<B>,
}

impl<B> CatalogResolver<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }
}

impl<B> Clone for CatalogResolver<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

/// Rejects an empty Renson identifier before any backend call.
pub(crate) fn ensure_catalog_id(catalog_id: &str) -> Result<()> {
    // 空字串會落到 /stars/renson/ 這個不同的路由
    if catalog_id.trim().is_empty() {
        return Err(CpStarsError::validation("Renson identifier must not be empty"));
    }
    Ok(())
}

#[derive(Deserialize)]
struct StarKey {
    id: i64,
}

#[async_trait]
impl<B: Backend> Resolver for CatalogResolver<B> {
    async fn resolve_by_catalog_id(&self, catalog_id: &str) -> Result<i64> {
        ensure_catalog_id(catalog_id)?;

        let operation = Operation::StarByRenson {
            renson: catalog_id.to_string(),
        };
        let value = self.backend.invoke(&operation).await?;

        if value.is_null() {
            return Err(CpStarsError::not_found(format!(
                "no star with Renson identifier {}",
                catalog_id
            )));
        }

        let key: StarKey = serde_json::from_value(value).map_err(|source| CpStarsError::Decode {
            operation: operation.name().to_string(),
            source,
        })?;

        tracing::debug!("🔎 Renson {} resolved to CP-Stars id {}", catalog_id, key.id);
        Ok(key.id)
    }
}

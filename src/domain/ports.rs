use crate::domain::operation::Operation;
use crate::domain::reference::StarReference;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Transport seam: executes one operation against the backend and returns the
/// decoded JSON payload (a record or a sequence of records).
#[async_trait]
pub trait Backend: Send + Sync {
    async fn invoke(&self, operation: &Operation) -> Result<serde_json::Value>;
}

/// Translates a Renson catalog identifier into a CP-Stars primary key.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve_by_catalog_id(&self, catalog_id: &str) -> Result<i64>;

    async fn resolve(&self, reference: StarReference) -> Result<StarReference> {
        match reference {
            StarReference::Unresolved { catalog_id } => {
                let primary_key = self.resolve_by_catalog_id(&catalog_id).await?;
                Ok(StarReference::Resolved {
                    primary_key,
                    catalog_id: Some(catalog_id),
                })
            }
            resolved => Ok(resolved),
        }
    }
}

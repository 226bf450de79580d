use anyhow::Result;
use async_trait::async_trait;
use cpstars::{ClientConfig, CpStars, CpStarsError, HttpBackend, Resolver, StarReference};
use httpmock::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// Resolver backed by a fixed table instead of the remote lookup.
struct TableResolver {
    keys: HashMap<&'static str, i64>,
}

#[async_trait]
impl Resolver for TableResolver {
    async fn resolve_by_catalog_id(&self, catalog_id: &str) -> cpstars::Result<i64> {
        self.keys
            .get(catalog_id)
            .copied()
            .ok_or_else(|| CpStarsError::not_found(format!("renson {}", catalog_id)))
    }
}

#[tokio::test]
async fn test_stub_resolver_with_http_backend() -> Result<()> {
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(GET).path_contains("/stars/renson/");
        then.status(500);
    });
    let spectrum = server.mock(|when, then| {
        when.method(GET).path("/stars/1491/spectrum");
        then.status(200).json_body(json!([
            {"id": 1, "wavelength": 3900.5, "flux": 0.81},
            {"id": 2, "wavelength": 3900.6, "flux": 0.83},
            {"id": 3, "wavelength": 3900.7, "flux": 0.80}
        ]));
    });

    let backend = Arc::new(HttpBackend::new(&ClientConfig::with_host(server.base_url()))?);
    let resolver = TableResolver {
        keys: HashMap::from([("160", 1491)]),
    };
    let cpstars = CpStars::from_parts(backend, resolver);

    let measurements = cpstars.spectrum_for_star_by_renson("160").await?;
    assert_eq!(measurements.len(), 3);
    assert_eq!(measurements[1].wavelength, Some(3900.6));

    let err = cpstars.spectrum_for_star_by_renson("161").await.unwrap_err();
    assert!(matches!(err, CpStarsError::NotFound { .. }));

    lookup.assert_hits(0);
    spectrum.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_resolved_reference_skips_lookup() -> Result<()> {
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(GET).path("/stars/renson/61600");
        then.status(200).json_body(json!({"id": 3, "renson": "61600"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/stars/3/identifiers");
        then.status(200).json_body(json!([{"id": 1, "name": "HD 221760"}]));
    });

    let cpstars = CpStars::new(ClientConfig::with_host(server.base_url()))?;

    let reference = cpstars.resolver().resolve(StarReference::from("61600")).await?;
    assert_eq!(reference.primary_key(), Some(3));

    // a resolved reference carries its key; repeated queries do not look it up again
    cpstars.identifiers(reference.clone()).await?;
    cpstars.identifiers(reference).await?;

    lookup.assert_hits(1);
    Ok(())
}

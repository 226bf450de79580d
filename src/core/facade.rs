//! Query facade: one method per data category.
//!
//! Methods taking a CP-Stars id call the backend once. Methods taking a
//! Renson identifier resolve it to a CP-Stars id first (see [`Resolver`]) and
//! then issue the same call. Results are returned as the backend sent them and
//! errors are propagated as-is.

use crate::adapters::http::HttpBackend;
use crate::config::ClientConfig;
use crate::core::resolver::{ensure_catalog_id, CatalogResolver};
use crate::domain::model::{
    DataSource, ExternalDetails, Identifier, LightCurveMeasurement, Magnitude,
    MagnitudeAttribute, Motion, RadialVelocity, SpectrumMeasurement, Star, StarBasicInfo,
    StarDatasourceAttribute,
};
use crate::domain::operation::Operation;
use crate::domain::ports::{Backend, Resolver};
use crate::domain::reference::StarReference;
use crate::utils::error::{CpStarsError, Result};
use crate::utils::validation::{validate_records, ValidatedRecord};
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub struct CpStars<B = HttpBackend, R = CatalogResolver<B>> {
    backend: Arc<B>,
    resolver: R,
    client_side_validation: bool,
}

impl CpStars {
    /// Client for the backend described by `config`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let backend = HttpBackend::new(&config)?;
        tracing::debug!("CP-Stars client for {}", backend.base_url());
        Ok(CpStars::with_backend(backend).with_client_side_validation(config.client_side_validation))
    }

    /// Client for the default CP-Stars backend address.
    pub fn with_default_host() -> Result<Self> {
        Self::new(ClientConfig::default())
    }
}

impl<B: Backend> CpStars<B, CatalogResolver<B>> {
    pub fn with_backend(backend: B) -> Self {
        let backend = Arc::new(backend);
        let resolver = CatalogResolver::new(Arc::clone(&backend));
        Self::from_parts(backend, resolver)
    }
}

impl<B: Backend, R: Resolver> CpStars<B, R> {
    pub fn from_parts(backend: Arc<B>, resolver: R) -> Self {
        Self {
            backend,
            resolver,
            client_side_validation: true,
        }
    }

    pub fn with_client_side_validation(mut self, enabled: bool) -> Self {
        self.client_side_validation = enabled;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// CP-Stars id for `star`, resolving a Renson identifier when needed.
    pub async fn primary_key(&self, star: StarReference) -> Result<i64> {
        match star {
            StarReference::Resolved { primary_key, .. } => Ok(primary_key),
            StarReference::Unresolved { catalog_id } => {
                self.resolver.resolve_by_catalog_id(&catalog_id).await
            }
        }
    }

    async fn fetch_value(&self, operation: &Operation) -> Result<serde_json::Value> {
        let value = self.backend.invoke(operation).await?;
        if value.is_null() {
            return Err(CpStarsError::not_found(operation.to_string()));
        }
        Ok(value)
    }

    fn decode<T: DeserializeOwned>(operation: &Operation, value: serde_json::Value) -> Result<T> {
        serde_json::from_value(value).map_err(|source| CpStarsError::Decode {
            operation: operation.name().to_string(),
            source,
        })
    }

    async fn fetch_one<T>(&self, operation: Operation) -> Result<T>
    where
        T: DeserializeOwned + ValidatedRecord,
    {
        let value = self.fetch_value(&operation).await?;
        let record: T = Self::decode(&operation, value)?;
        if self.client_side_validation {
            record.validate_fields()?;
        }
        Ok(record)
    }

    async fn fetch_many<T>(&self, operation: Operation) -> Result<Vec<T>>
    where
        T: DeserializeOwned + ValidatedRecord,
    {
        let value = self.fetch_value(&operation).await?;
        let records: Vec<T> = Self::decode(&operation, value)?;
        if self.client_side_validation {
            validate_records(&records)?;
        }
        tracing::debug!("{} returned {} records", operation.name(), records.len());
        Ok(records)
    }

    async fn fetch_many_for_star<T>(
        &self,
        star: StarReference,
        operation: fn(i64) -> Operation,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned + ValidatedRecord,
    {
        let id = self.primary_key(star).await?;
        self.fetch_many(operation(id)).await
    }

    // --- listing -----------------------------------------------------------

    /// All stars in the database with basic information (Renson id,
    /// coordinates, binary component, category affiliation flag).
    pub async fn basic_info_for_stars(&self) -> Result<Vec<StarBasicInfo>> {
        self.fetch_many(Operation::BasicInfoStarsList).await
    }

    // --- star record -------------------------------------------------------

    pub async fn star_record(&self, star: impl Into<StarReference>) -> Result<Star> {
        match star.into() {
            StarReference::Resolved { primary_key, .. } => {
                self.fetch_one(Operation::Star { id: primary_key }).await
            }
            StarReference::Unresolved { catalog_id } => self.star_by_renson(&catalog_id).await,
        }
    }

    pub async fn star(&self, cp_stars_id: i64) -> Result<Star> {
        self.fetch_one(Operation::Star { id: cp_stars_id }).await
    }

    /// Star looked up directly by Renson identifier; one backend call.
    pub async fn star_by_renson(&self, renson_id: &str) -> Result<Star> {
        ensure_catalog_id(renson_id)?;
        self.fetch_one(Operation::StarByRenson {
            renson: renson_id.to_string(),
        })
        .await
    }

    // --- identifiers -------------------------------------------------------

    pub async fn identifiers(&self, star: impl Into<StarReference>) -> Result<Vec<Identifier>> {
        self.fetch_many_for_star(star.into(), |id| Operation::StarIdentifiers { id })
            .await
    }

    pub async fn identifiers_for_star(&self, cp_stars_id: i64) -> Result<Vec<Identifier>> {
        self.identifiers(cp_stars_id).await
    }

    pub async fn identifiers_for_star_by_renson(&self, renson_id: &str) -> Result<Vec<Identifier>> {
        self.identifiers(renson_id).await
    }

    // --- datasource attributes ---------------------------------------------

    /// Attributes of a star (e.g. spectral type), each with the data source it
    /// was taken from.
    pub async fn datasource_attributes(
        &self,
        star: impl Into<StarReference>,
    ) -> Result<Vec<StarDatasourceAttribute>> {
        self.fetch_many_for_star(star.into(), |id| Operation::StarDatasourceAttributes { id })
            .await
    }

    pub async fn star_attributes(&self, cp_stars_id: i64) -> Result<Vec<StarDatasourceAttribute>> {
        self.datasource_attributes(cp_stars_id).await
    }

    pub async fn star_attributes_by_renson(
        &self,
        renson_id: &str,
    ) -> Result<Vec<StarDatasourceAttribute>> {
        self.datasource_attributes(renson_id).await
    }

    // --- magnitude attributes ----------------------------------------------

    pub async fn magnitude_attributes(
        &self,
        star: impl Into<StarReference>,
    ) -> Result<Vec<MagnitudeAttribute>> {
        self.fetch_many_for_star(star.into(), |id| Operation::StarMagnitudesAttributes { id })
            .await
    }

    pub async fn magnitude_attributes_for_star(
        &self,
        cp_stars_id: i64,
    ) -> Result<Vec<MagnitudeAttribute>> {
        self.magnitude_attributes(cp_stars_id).await
    }

    pub async fn magnitude_attributes_for_star_by_renson(
        &self,
        renson_id: &str,
    ) -> Result<Vec<MagnitudeAttribute>> {
        self.magnitude_attributes(renson_id).await
    }

    // --- magnitudes --------------------------------------------------------

    pub async fn magnitudes(&self, star: impl Into<StarReference>) -> Result<Vec<Magnitude>> {
        self.fetch_many_for_star(star.into(), |id| Operation::StarMagnitudes { id })
            .await
    }

    pub async fn magnitudes_for_star(&self, cp_stars_id: i64) -> Result<Vec<Magnitude>> {
        self.magnitudes(cp_stars_id).await
    }

    pub async fn magnitudes_for_star_by_renson(&self, renson_id: &str) -> Result<Vec<Magnitude>> {
        self.magnitudes(renson_id).await
    }

    // --- motions -----------------------------------------------------------

    /// Parallaxes and proper motions (with errors) reported for the star.
    pub async fn motions(&self, star: impl Into<StarReference>) -> Result<Vec<Motion>> {
        self.fetch_many_for_star(star.into(), |id| Operation::StarMotions { id })
            .await
    }

    pub async fn motions_for_star(&self, cp_stars_id: i64) -> Result<Vec<Motion>> {
        self.motions(cp_stars_id).await
    }

    pub async fn motions_for_star_by_renson(&self, renson_id: &str) -> Result<Vec<Motion>> {
        self.motions(renson_id).await
    }

    // --- radial velocities -------------------------------------------------

    pub async fn radial_velocities(
        &self,
        star: impl Into<StarReference>,
    ) -> Result<Vec<RadialVelocity>> {
        self.fetch_many_for_star(star.into(), |id| Operation::StarRadialVelocities { id })
            .await
    }

    pub async fn radial_velocities_for_star(&self, cp_stars_id: i64) -> Result<Vec<RadialVelocity>> {
        self.radial_velocities(cp_stars_id).await
    }

    pub async fn radial_velocities_for_star_by_renson(
        &self,
        renson_id: &str,
    ) -> Result<Vec<RadialVelocity>> {
        self.radial_velocities(renson_id).await
    }

    // --- light curve -------------------------------------------------------

    pub async fn light_curve(
        &self,
        star: impl Into<StarReference>,
    ) -> Result<Vec<LightCurveMeasurement>> {
        self.fetch_many_for_star(star.into(), |id| Operation::StarLightCurveMeasurements { id })
            .await
    }

    pub async fn light_curve_for_star(&self, cp_stars_id: i64) -> Result<Vec<LightCurveMeasurement>> {
        self.light_curve(cp_stars_id).await
    }

    pub async fn light_curve_for_star_by_renson(
        &self,
        renson_id: &str,
    ) -> Result<Vec<LightCurveMeasurement>> {
        self.light_curve(renson_id).await
    }

    // --- spectrum ----------------------------------------------------------

    pub async fn spectrum(&self, star: impl Into<StarReference>) -> Result<Vec<SpectrumMeasurement>> {
        self.fetch_many_for_star(star.into(), |id| Operation::StarSpectraMeasurements { id })
            .await
    }

    pub async fn spectrum_for_star(&self, cp_stars_id: i64) -> Result<Vec<SpectrumMeasurement>> {
        self.spectrum(cp_stars_id).await
    }

    pub async fn spectrum_for_star_by_renson(
        &self,
        renson_id: &str,
    ) -> Result<Vec<SpectrumMeasurement>> {
        self.spectrum(renson_id).await
    }

    // --- external services -------------------------------------------------

    /// Subset of SIMBAD information. The name must include the catalogue
    /// prefix, e.g. `"Renson 61590"`; matching happens on the far side.
    pub async fn simbad_external_details(&self, star_name: &str) -> Result<ExternalDetails> {
        self.fetch_one(Operation::SimbadExternalDetails {
            star_name: star_name.to_string(),
        })
        .await
    }

    /// Vizier tables that mention the star. May be slow, the external
    /// service is queried on every call.
    pub async fn vizier_metadata(&self, star_name: &str) -> Result<ExternalDetails> {
        self.fetch_one(Operation::VizierMetadata {
            star_name: star_name.to_string(),
        })
        .await
    }

    // --- data sources ------------------------------------------------------

    pub async fn datasources(&self) -> Result<Vec<DataSource>> {
        self.fetch_many(Operation::Datasources).await
    }

    pub async fn datasource(&self, datasource_id: i64) -> Result<DataSource> {
        self.fetch_one(Operation::Datasource { id: datasource_id })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubBackend {
        responses: HashMap<Operation, serde_json::Value>,
        calls: Mutex<Vec<Operation>>,
    }

    impl StubBackend {
        fn with(mut self, operation: Operation, response: serde_json::Value) -> Self {
            self.responses.insert(operation, response);
            self
        }

        fn calls(&self) -> Vec<Operation> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Backend for StubBackend {
        async fn invoke(&self, operation: &Operation) -> Result<serde_json::Value> {
            self.calls.lock().unwrap().push(operation.clone());
            self.responses
                .get(operation)
                .cloned()
                .ok_or_else(|| CpStarsError::not_found(operation.to_string()))
        }
    }

    #[derive(Default)]
    struct StubResolver {
        keys: HashMap<String, i64>,
        lookups: Mutex<Vec<String>>,
    }

    impl StubResolver {
        fn with(mut self, renson: &str, id: i64) -> Self {
            self.keys.insert(renson.to_string(), id);
            self
        }

        fn lookups(&self) -> Vec<String> {
            self.lookups.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Resolver for StubResolver {
        async fn resolve_by_catalog_id(&self, catalog_id: &str) -> Result<i64> {
            self.lookups.lock().unwrap().push(catalog_id.to_string());
            self.keys
                .get(catalog_id)
                .copied()
                .ok_or_else(|| CpStarsError::not_found(format!("renson {}", catalog_id)))
        }
    }

    fn client(backend: StubBackend, resolver: StubResolver) -> CpStars<StubBackend, StubResolver> {
        CpStars::from_parts(Arc::new(backend), resolver)
    }

    fn magnitudes_json() -> serde_json::Value {
        json!([
            {"id": 11, "band": "V", "value": 6.12, "error": 0.01},
            {"id": 10, "band": "B", "value": 6.40, "error": 0.02},
            {"id": 12, "band": "J", "value": 5.70}
        ])
    }

    #[tokio::test]
    async fn test_primary_key_skips_resolver() {
        let backend = StubBackend::default().with(Operation::StarMagnitudes { id: 2 }, magnitudes_json());
        let cpstars = client(backend, StubResolver::default());

        let magnitudes = cpstars.magnitudes_for_star(2).await.unwrap();

        assert_eq!(magnitudes.len(), 3);
        assert!(cpstars.resolver().lookups().is_empty());
        assert_eq!(cpstars.backend().calls(), vec![Operation::StarMagnitudes { id: 2 }]);
    }

    #[tokio::test]
    async fn test_renson_resolves_then_fetches() {
        let backend = StubBackend::default().with(Operation::StarMagnitudes { id: 2 }, magnitudes_json());
        let resolver = StubResolver::default().with("710", 2);
        let cpstars = client(backend, resolver);

        let by_renson = cpstars.magnitudes_for_star_by_renson("710").await.unwrap();
        let by_id = cpstars.magnitudes_for_star(2).await.unwrap();

        assert_eq!(by_renson, by_id);
        assert_eq!(cpstars.resolver().lookups(), vec!["710".to_string()]);
    }

    #[tokio::test]
    async fn test_order_is_preserved() {
        let backend = StubBackend::default().with(Operation::StarMagnitudes { id: 2 }, magnitudes_json());
        let cpstars = client(backend, StubResolver::default());

        let ids: Vec<Option<i64>> = cpstars
            .magnitudes_for_star(2)
            .await
            .unwrap()
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec![Some(11), Some(10), Some(12)]);
    }

    #[tokio::test]
    async fn test_resolver_error_propagates_without_fetch() {
        let cpstars = client(StubBackend::default(), StubResolver::default());

        let err = cpstars.identifiers_for_star_by_renson("00000").await.unwrap_err();

        assert!(matches!(err, CpStarsError::NotFound { .. }));
        assert!(cpstars.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let resolver = StubResolver::default().with("61600", 3);
        let cpstars = client(StubBackend::default(), resolver);

        let err = cpstars.motions_for_star_by_renson("61600").await.unwrap_err();

        assert!(matches!(err, CpStarsError::NotFound { .. }));
        assert_eq!(cpstars.backend().calls(), vec![Operation::StarMotions { id: 3 }]);
    }

    #[tokio::test]
    async fn test_light_curve_and_spectrum_use_one_operation_each() {
        let backend = StubBackend::default()
            .with(
                Operation::StarLightCurveMeasurements { id: 3 },
                json!([{"id": 1, "time": 2458000.5, "magnitude": 7.1}]),
            )
            .with(
                Operation::StarSpectraMeasurements { id: 1491 },
                json!([{"id": 1, "wavelength": 4000.0, "flux": 0.93}]),
            );
        let resolver = StubResolver::default().with("61600", 3).with("160", 1491);
        let cpstars = client(backend, resolver);

        cpstars.light_curve_for_star(3).await.unwrap();
        cpstars.light_curve_for_star_by_renson("61600").await.unwrap();
        cpstars.spectrum_for_star(1491).await.unwrap();
        cpstars.spectrum_for_star_by_renson("160").await.unwrap();

        assert_eq!(
            cpstars.backend().calls(),
            vec![
                Operation::StarLightCurveMeasurements { id: 3 },
                Operation::StarLightCurveMeasurements { id: 3 },
                Operation::StarSpectraMeasurements { id: 1491 },
                Operation::StarSpectraMeasurements { id: 1491 },
            ]
        );
    }

    #[tokio::test]
    async fn test_star_by_renson_is_a_single_call() {
        let star = json!({"id": 3, "renson": "61600"});
        let backend = StubBackend::default().with(
            Operation::StarByRenson {
                renson: "61600".to_string(),
            },
            star,
        );
        let cpstars = client(backend, StubResolver::default());

        let record = cpstars.star_record("61600").await.unwrap();

        assert_eq!(record.id, Some(3));
        assert!(cpstars.resolver().lookups().is_empty());
        assert_eq!(cpstars.backend().calls().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_sequence_is_not_an_error() {
        let backend = StubBackend::default().with(Operation::StarRadialVelocities { id: 5 }, json!([]));
        let cpstars = client(backend, StubResolver::default());

        assert!(cpstars.radial_velocities_for_star(5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_null_payload_is_not_found() {
        let backend = StubBackend::default().with(Operation::Star { id: 9 }, serde_json::Value::Null);
        let cpstars = client(backend, StubResolver::default());

        let err = cpstars.star(9).await.unwrap_err();
        assert!(matches!(err, CpStarsError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_client_side_validation_toggle() {
        let incomplete = json!([{"id": 1, "name": "Gaia DR2"}]);
        let backend = StubBackend::default().with(Operation::Datasources, incomplete);
        let cpstars = client(backend, StubResolver::default());

        let err = cpstars.datasources().await.unwrap_err();
        assert!(matches!(err, CpStarsError::InvalidRecord { .. }));

        let cpstars = cpstars.with_client_side_validation(false);
        let datasources = cpstars.datasources().await.unwrap();
        assert_eq!(datasources[0].name.as_deref(), Some("Gaia DR2"));
    }

    #[tokio::test]
    async fn test_null_measurement_value_is_returned_unchanged() {
        let payload = json!([
            {"id": 1, "band": "V", "value": 6.1},
            {"id": 2, "band": "U", "value": null}
        ]);
        let backend = StubBackend::default().with(Operation::StarMagnitudes { id: 2 }, payload);
        let cpstars = client(backend, StubResolver::default());

        let magnitudes = cpstars.magnitudes_for_star(2).await.unwrap();

        assert_eq!(magnitudes.len(), 2);
        assert_eq!(magnitudes[1].band.as_deref(), Some("U"));
        assert_eq!(magnitudes[1].value, None);
    }

    #[tokio::test]
    async fn test_listing_keeps_non_string_flags() {
        let payload = json!([
            {"id": 1, "renson": "10", "consideredCategoryAffiliationProbabilityFlag": 1},
            {"id": 2, "renson": "20", "consideredCategoryAffiliationProbabilityFlag": "?"}
        ]);
        let backend = StubBackend::default().with(Operation::BasicInfoStarsList, payload);
        let cpstars = client(backend, StubResolver::default());

        let stars = cpstars.basic_info_for_stars().await.unwrap();

        assert_eq!(stars.len(), 2);
        assert_eq!(stars[0].considered_category_affiliation_probability_flag, Some(json!(1)));
        assert_eq!(stars[1].considered_category_affiliation_probability_flag, Some(json!("?")));
    }

    #[tokio::test]
    async fn test_star_by_empty_renson_is_rejected_locally() {
        let cpstars = client(StubBackend::default(), StubResolver::default());

        let err = cpstars.star_by_renson("  ").await.unwrap_err();

        assert!(matches!(err, CpStarsError::Validation { .. }));
        assert!(cpstars.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let backend = StubBackend::default().with(Operation::StarIdentifiers { id: 1 }, json!({"id": 1}));
        let cpstars = client(backend, StubResolver::default());

        let err = cpstars.identifiers_for_star(1).await.unwrap_err();
        assert!(matches!(err, CpStarsError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_default_resolver_shares_backend() {
        let backend = StubBackend::default()
            .with(
                Operation::StarByRenson {
                    renson: "61670".to_string(),
                },
                json!({"id": 40, "renson": "61670"}),
            )
            .with(
                Operation::StarIdentifiers { id: 40 },
                json!([{"id": 1, "name": "HD 1"}, {"id": 2, "name": "HR 2"}]),
            );
        let cpstars = CpStars::with_backend(backend);

        let identifiers = cpstars.identifiers_for_star_by_renson("61670").await.unwrap();

        assert_eq!(identifiers.len(), 2);
        assert_eq!(
            cpstars.backend().calls(),
            vec![
                Operation::StarByRenson {
                    renson: "61670".to_string()
                },
                Operation::StarIdentifiers { id: 40 },
            ]
        );
    }
}

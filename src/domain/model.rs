//! Records returned by the CP-Stars backend.
//!
//! Fields are decoded leniently (everything but the shape is optional) and
//! anything the backend sends that is not modelled here is kept in `extra`,
//! so nothing the server returned is lost when a record is re-serialized.
//! Flags and free-form columns whose wire type the backend does not pin down
//! stay as raw JSON values.
//!
//! Required fields and length bounds are enforced separately through
//! [`ValidatedRecord`]. Only data sources and attribute definitions carry a
//! full constraint table; every other record only needs its `id`.

use crate::utils::validation::{FieldConstraint, ValidatedRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type Extra = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarBasicInfo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub renson: Option<String>,
    #[serde(default)]
    pub considered_category_affiliation_probability_flag: Option<Value>,
    #[serde(default)]
    pub binary_system_component: Option<Value>,
    #[serde(default)]
    pub icrs_right_ascension: Option<f64>,
    #[serde(default)]
    pub icrs_declination: Option<f64>,
    #[serde(default)]
    pub galactic_longitude: Option<f64>,
    #[serde(default)]
    pub galactic_latitude: Option<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for StarBasicInfo {
    const FIELDS: &'static [FieldConstraint] = &[FieldConstraint::required("id")];
}

/// Full star record; basic info plus coordinate errors and alpha/delta.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Star {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub renson: Option<String>,
    #[serde(default)]
    pub considered_category_affiliation_probability_flag: Option<Value>,
    #[serde(default)]
    pub binary_system_component: Option<Value>,
    #[serde(default)]
    pub icrs_right_ascension: Option<f64>,
    #[serde(default)]
    pub icrs_right_ascension_error: Option<f64>,
    #[serde(default)]
    pub icrs_declination: Option<f64>,
    #[serde(default)]
    pub icrs_declination_error: Option<f64>,
    #[serde(default)]
    pub galactic_longitude: Option<f64>,
    #[serde(default)]
    pub galactic_latitude: Option<f64>,
    #[serde(default)]
    pub alpha: Option<Value>,
    #[serde(default)]
    pub delta: Option<Value>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for Star {
    const FIELDS: &'static [FieldConstraint] = &[FieldConstraint::required("id")];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceBasicInfo {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for DataSourceBasicInfo {
    const FIELDS: &'static [FieldConstraint] = &[
        FieldConstraint::required("id"),
        FieldConstraint::required("name").max_length(30),
    ];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub bibcode: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for DataSource {
    const FIELDS: &'static [FieldConstraint] = &[
        FieldConstraint::required("id"),
        FieldConstraint::required("name").max_length(30),
        FieldConstraint::required("fullName").max_length(100),
        FieldConstraint::required("year"),
        FieldConstraint::required("bibcode").max_length(19),
        FieldConstraint::required("description").max_length(16384),
    ];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for AttributeDefinition {
    const FIELDS: &'static [FieldConstraint] = &[
        FieldConstraint::required("id"),
        FieldConstraint::required("name").max_length(40),
        FieldConstraint::required("type").max_length(10),
        FieldConstraint::required("description").max_length(100),
    ];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub datasource: Option<DataSourceBasicInfo>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for Identifier {
    const FIELDS: &'static [FieldConstraint] = &[FieldConstraint::required("id")];
}

/// Attribute value of a star as reported by one data source (e.g. spectral type).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarDatasourceAttribute {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub attribute: Option<AttributeDefinition>,
    #[serde(default)]
    pub datasource: Option<DataSourceBasicInfo>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for StarDatasourceAttribute {
    const FIELDS: &'static [FieldConstraint] = &[FieldConstraint::required("id")];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Magnitude {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub error: Option<f64>,
    #[serde(default)]
    pub quality: Option<Value>,
    #[serde(default)]
    pub datasource: Option<DataSourceBasicInfo>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for Magnitude {
    const FIELDS: &'static [FieldConstraint] = &[FieldConstraint::required("id")];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagnitudeAttribute {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default)]
    pub attribute: Option<AttributeDefinition>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub datasource: Option<DataSourceBasicInfo>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for MagnitudeAttribute {
    const FIELDS: &'static [FieldConstraint] = &[FieldConstraint::required("id")];
}

/// Proper motion and parallax values reported by one data source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motion {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub parallax: Option<f64>,
    #[serde(default)]
    pub parallax_error: Option<f64>,
    #[serde(default)]
    pub proper_motion_right_ascension: Option<f64>,
    #[serde(default)]
    pub proper_motion_right_ascension_error: Option<f64>,
    #[serde(default)]
    pub proper_motion_declination: Option<f64>,
    #[serde(default)]
    pub proper_motion_declination_error: Option<f64>,
    #[serde(default)]
    pub datasource: Option<DataSourceBasicInfo>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for Motion {
    const FIELDS: &'static [FieldConstraint] = &[FieldConstraint::required("id")];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialVelocity {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub radial_velocity: Option<f64>,
    #[serde(default)]
    pub radial_velocity_error: Option<f64>,
    #[serde(default)]
    pub datasource: Option<DataSourceBasicInfo>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for RadialVelocity {
    const FIELDS: &'static [FieldConstraint] = &[FieldConstraint::required("id")];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightCurveMeasurement {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub time: Option<f64>,
    #[serde(default)]
    pub magnitude: Option<f64>,
    #[serde(default)]
    pub error: Option<f64>,
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default)]
    pub datasource: Option<DataSourceBasicInfo>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for LightCurveMeasurement {
    const FIELDS: &'static [FieldConstraint] = &[FieldConstraint::required("id")];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumMeasurement {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub wavelength: Option<f64>,
    #[serde(default)]
    pub flux: Option<f64>,
    #[serde(default)]
    pub datasource: Option<DataSourceBasicInfo>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for SpectrumMeasurement {
    const FIELDS: &'static [FieldConstraint] = &[FieldConstraint::required("id")];
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VizierTable {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Subset of SIMBAD data, or the Vizier table listing, for a free-text star name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDetails {
    #[serde(default)]
    pub effective_temperature: Option<f64>,
    #[serde(default)]
    pub effective_temperature_unit: Option<String>,
    #[serde(default)]
    pub redshift: Option<f64>,
    #[serde(default)]
    pub vizier_tables: Option<Vec<VizierTable>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl ValidatedRecord for ExternalDetails {
    const FIELDS: &'static [FieldConstraint] = &[];
}

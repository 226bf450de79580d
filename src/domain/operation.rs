use std::fmt;

/// Every call the client makes against the CP-Stars backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    BasicInfoStarsList,
    Star { id: i64 },
    StarByRenson { renson: String },
    StarIdentifiers { id: i64 },
    StarDatasourceAttributes { id: i64 },
    StarMagnitudesAttributes { id: i64 },
    StarMagnitudes { id: i64 },
    StarMotions { id: i64 },
    StarRadialVelocities { id: i64 },
    StarLightCurveMeasurements { id: i64 },
    StarSpectraMeasurements { id: i64 },
    SimbadExternalDetails { star_name: String },
    VizierMetadata { star_name: String },
    Datasources,
    Datasource { id: i64 },
}

impl Operation {
    /// Stable operation name, used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BasicInfoStarsList => "get_basic_info_stars_list",
            Self::Star { .. } => "get_star",
            Self::StarByRenson { .. } => "get_star_by_renson_id",
            Self::StarIdentifiers { .. } => "get_star_identifiers",
            Self::StarDatasourceAttributes { .. } => "get_star_datasource_attributes",
            Self::StarMagnitudesAttributes { .. } => "get_star_magnitudes_attributes",
            Self::StarMagnitudes { .. } => "get_star_magnitudes",
            Self::StarMotions { .. } => "get_star_motions",
            Self::StarRadialVelocities { .. } => "get_star_radial_velocities",
            Self::StarLightCurveMeasurements { .. } => "get_star_light_curve_measurements",
            Self::StarSpectraMeasurements { .. } => "get_star_spectra_measurements",
            Self::SimbadExternalDetails { .. } => "get_simbad_external_details",
            Self::VizierMetadata { .. } => "get_vizier_metadata",
            Self::Datasources => "get_datasources",
            Self::Datasource { .. } => "get_datasource",
        }
    }

    /// Path segments below the host address. Segments are raw; the transport
    /// percent-encodes them.
    pub fn path_segments(&self) -> Vec<String> {
        let star = |id: &i64, rest: &[&str]| {
            let mut segments = vec!["stars".to_string(), id.to_string()];
            segments.extend(rest.iter().map(|s| s.to_string()));
            segments
        };

        match self {
            Self::BasicInfoStarsList => vec!["stars".to_string()],
            Self::Star { id } => star(id, &[]),
            Self::StarByRenson { renson } => {
                vec!["stars".to_string(), "renson".to_string(), renson.clone()]
            }
            Self::StarIdentifiers { id } => star(id, &["identifiers"]),
            Self::StarDatasourceAttributes { id } => star(id, &["attributes"]),
            Self::StarMagnitudesAttributes { id } => star(id, &["magnitudes", "attributes"]),
            Self::StarMagnitudes { id } => star(id, &["magnitudes"]),
            Self::StarMotions { id } => star(id, &["motions"]),
            Self::StarRadialVelocities { id } => star(id, &["radial-velocities"]),
            Self::StarLightCurveMeasurements { id } => star(id, &["light-curve"]),
            Self::StarSpectraMeasurements { id } => star(id, &["spectrum"]),
            Self::SimbadExternalDetails { .. } => {
                vec!["external-services".to_string(), "simbad".to_string()]
            }
            Self::VizierMetadata { .. } => {
                vec!["external-services".to_string(), "vizier".to_string()]
            }
            Self::Datasources => vec!["datasources".to_string()],
            Self::Datasource { id } => vec!["datasources".to_string(), id.to_string()],
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::SimbadExternalDetails { star_name } | Self::VizierMetadata { star_name } => {
                vec![("starName", star_name.clone())]
            }
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /{}", self.name(), self.path_segments().join("/"))?;
        let query = self.query();
        if !query.is_empty() {
            let pairs: Vec<String> = query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            write!(f, "?{}", pairs.join("&"))?;
        }
        Ok(())
    }
}

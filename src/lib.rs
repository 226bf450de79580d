//! Client for the Chemically Peculiar Stars (CP-Stars) database.
//!
//! Stars are stored based on the catalogue of Ap, HgMn and Am stars
//! (Renson & Manfroid, 2009A&A...498..961R). Data can be queried by CP-Stars
//! database id or by Renson catalogue identifier.
//!
//! ```no_run
//! # async fn example() -> cpstars::Result<()> {
//! let cpstars = cpstars::CpStars::with_default_host()?;
//! let magnitudes = cpstars.magnitudes_for_star_by_renson("710").await?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::ClientConfig;

pub use adapters::http::HttpBackend;
pub use crate::core::{facade::CpStars, resolver::CatalogResolver};
pub use domain::{
    operation::Operation,
    ports::{Backend, Resolver},
    reference::StarReference,
};
pub use utils::error::{CpStarsError, Result};

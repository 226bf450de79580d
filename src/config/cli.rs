use crate::adapters::output::OutputFormat;
use crate::config::toml_config::TomlConfig;
use crate::config::ClientConfig;
use crate::domain::reference::StarReference;
use crate::utils::error::{CpStarsError, Result};
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "cpstars")]
#[command(about = "Query the Chemically Peculiar Stars (CP-Stars) database")]
pub struct CliConfig {
    /// CP-Stars backend address (overrides config file and CPSTARS_HOST)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Skip client-side validation of returned records
    #[arg(long, global = true)]
    pub no_validation: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List all stars with basic information
    BasicInfo,
    /// Star record
    Star(StarArgs),
    /// Identifiers stored for a star
    Identifiers(StarArgs),
    /// Attributes of a star with their data sources
    Attributes(StarArgs),
    /// Magnitude attributes of a star
    MagnitudeAttributes(StarArgs),
    /// Magnitudes of a star
    Magnitudes(StarArgs),
    /// Parallaxes and proper motions of a star
    Motions(StarArgs),
    /// Radial velocities of a star
    RadialVelocities(StarArgs),
    /// Light curve measurements of a star
    LightCurve(StarArgs),
    /// Spectrum measurements of a star
    Spectrum(StarArgs),
    /// SIMBAD details for a star name, e.g. "Renson 61590"
    Simbad { star_name: String },
    /// Vizier tables for a star name
    Vizier { star_name: String },
    /// Data sources known to the database
    Datasources {
        #[arg(long)]
        id: Option<i64>,
    },
}

#[derive(Debug, Clone, Args)]
#[group(required = true, multiple = false)]
pub struct StarArgs {
    /// CP-Stars database id
    #[arg(long)]
    pub id: Option<i64>,

    /// Renson catalog identifier
    #[arg(long)]
    pub renson: Option<String>,
}

impl StarArgs {
    pub fn reference(&self) -> Result<StarReference> {
        match (self.id, &self.renson) {
            (Some(id), _) => Ok(StarReference::by_primary_key(id)),
            (None, Some(renson)) => Ok(StarReference::by_catalog_id(renson.clone())),
            (None, None) => Err(CpStarsError::MissingConfig {
                field: "--id or --renson".to_string(),
            }),
        }
    }
}

impl CliConfig {
    /// 依序套用：預設值 -> 設定檔 -> 環境變數 -> 命令列參數
    pub fn client_config(&self) -> Result<(ClientConfig, OutputFormat)> {
        let mut config = ClientConfig::default();
        let mut format = OutputFormat::default();

        if let Some(path) = &self.config {
            let file_config = TomlConfig::from_file(path)?;
            file_config.validate()?;
            config = file_config.apply_to(config);
            if let Some(file_format) = file_config.output_format() {
                format = file_format.parse()?;
            }
        }

        config = config.apply_env()?;

        if let Some(host) = &self.host {
            config.host_address = host.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_seconds = Some(timeout);
        }
        if self.no_validation {
            config.client_side_validation = false;
        }
        if let Some(cli_format) = self.format {
            format = cli_format;
        }

        config.validate()?;
        Ok((config, format))
    }
}

use clap::Parser;
use cpstars::adapters::output::{write_result, OutputFormat};
use cpstars::config::cli::{CliConfig, Command};
use cpstars::utils::error::{CpStarsError, ErrorSeverity};
use cpstars::utils::logger;
use cpstars::CpStars;
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let (config, format) = match cli.client_config() {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    tracing::info!("🔭 Querying CP-Stars backend at {}", config.host_address);
    let cpstars = CpStars::new(config)?;

    if let Err(e) = run(&cpstars, cli.command, format).await {
        tracing::error!(
            "❌ Query failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,      // 查無資料
            ErrorSeverity::Medium => 2,   // 網路或遠端錯誤，可重試
            ErrorSeverity::High => 1,     // 輸入或資料錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(cpstars: &CpStars, command: Command, format: OutputFormat) -> Result<(), CpStarsError> {
    match command {
        Command::BasicInfo => emit(&cpstars.basic_info_for_stars().await?, format),
        Command::Star(args) => emit(&cpstars.star_record(args.reference()?).await?, format),
        Command::Identifiers(args) => emit(&cpstars.identifiers(args.reference()?).await?, format),
        Command::Attributes(args) => {
            emit(&cpstars.datasource_attributes(args.reference()?).await?, format)
        }
        Command::MagnitudeAttributes(args) => {
            emit(&cpstars.magnitude_attributes(args.reference()?).await?, format)
        }
        Command::Magnitudes(args) => emit(&cpstars.magnitudes(args.reference()?).await?, format),
        Command::Motions(args) => emit(&cpstars.motions(args.reference()?).await?, format),
        Command::RadialVelocities(args) => {
            emit(&cpstars.radial_velocities(args.reference()?).await?, format)
        }
        Command::LightCurve(args) => emit(&cpstars.light_curve(args.reference()?).await?, format),
        Command::Spectrum(args) => emit(&cpstars.spectrum(args.reference()?).await?, format),
        Command::Simbad { star_name } => {
            emit(&cpstars.simbad_external_details(&star_name).await?, format)
        }
        Command::Vizier { star_name } => emit(&cpstars.vizier_metadata(&star_name).await?, format),
        Command::Datasources { id: Some(id) } => emit(&cpstars.datasource(id).await?, format),
        Command::Datasources { id: None } => emit(&cpstars.datasources().await?, format),
    }
}

fn emit<T: Serialize>(result: &T, format: OutputFormat) -> Result<(), CpStarsError> {
    let stdout = std::io::stdout();
    write_result(result, format, stdout.lock())
}

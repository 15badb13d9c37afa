use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic_core::config::{data_dir_from_env_value, output_dir_from_env_value};
use clinic_core::{
    Appointment, ClinicService, ClinicStore, Clinician, CoreConfig, EntityKind, Facility,
    LoadReport, Patient, Prescription, Record, Referral, Staff,
};

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic record store: load, inspect and export clinic data")]
struct Cli {
    /// Directory holding the delimited entity files
    #[arg(long, env = "CLINIC_DATA_DIR")]
    data_dir: Option<String>,
    /// Directory generated documents are written to
    #[arg(long, env = "CLINIC_OUTPUT_DIR")]
    output_dir: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the data directory and print record counts and warnings
    Summary,
    /// List all records of one kind
    List {
        /// Entity kind (patients, clinicians, facilities, appointments, prescriptions, referrals, staff)
        kind: EntityKind,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report references to records that do not exist
    Check,
    /// Generate the referral document for a referral ID
    Referral {
        /// Referral ID
        id: String,
    },
    /// Write all records to another directory
    Export {
        /// Destination directory
        dir: PathBuf,
    },
}

/// Entry point for the clinic runner.
///
/// # Environment Variables
/// - `CLINIC_DATA_DIR`: directory holding the entity files (default: "data")
/// - `CLINIC_OUTPUT_DIR`: directory for generated documents (default: ".")
/// - `RUST_LOG`: log filter (default directive: "clinic=info")
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'clinic --help' for commands");
        return Ok(());
    };

    let cfg = CoreConfig::new(
        data_dir_from_env_value(cli.data_dir),
        output_dir_from_env_value(cli.output_dir),
    )?;
    tracing::info!("++ Loading clinic data from {}", cfg.data_dir().display());
    let mut service = ClinicService::new(Arc::new(cfg));

    let report = service.load().with_context(|| {
        format!(
            "could not load data from {}",
            service.config().data_dir().display()
        )
    })?;

    match command {
        Commands::Summary => print_summary(service.store(), &report),
        Commands::List { kind, json } => list(service.store(), kind, json)?,
        Commands::Check => {
            let dangling = service.dangling_references();
            if dangling.is_empty() {
                println!("No dangling references.");
            } else {
                for reference in &dangling {
                    println!("{reference}");
                }
                println!("{} dangling reference(s).", dangling.len());
            }
        }
        Commands::Referral { id } => match service.generate_referral(&id)? {
            Some(path) => println!("Wrote referral document: {}", path.display()),
            None => anyhow::bail!("no referral with ID {id}"),
        },
        Commands::Export { dir } => {
            clinic_core::save_data(service.store(), &dir)?;
            println!("Exported records to {}", dir.display());
        }
    }

    Ok(())
}

fn print_summary(store: &ClinicStore, report: &LoadReport) {
    for kind in EntityKind::ALL {
        let source = match report.file(kind) {
            Some(file) if file.skipped > 0 => format!("loaded, {} rows skipped", file.skipped),
            Some(_) => "loaded".to_string(),
            None => "no file".to_string(),
        };
        println!("{:<14} {:>6}  ({})", kind.file_name(), store.count(kind), source);
    }

    if !report.is_clean() {
        println!();
        println!("Warnings:");
        for warning in report.warnings() {
            println!("  {warning}");
        }
    }
}

fn list(store: &ClinicStore, kind: EntityKind, json: bool) -> anyhow::Result<()> {
    match kind {
        EntityKind::Patient => print_records(&store.get_all::<Patient>(), json),
        EntityKind::Clinician => print_records(&store.get_all::<Clinician>(), json),
        EntityKind::Facility => print_records(&store.get_all::<Facility>(), json),
        EntityKind::Appointment => print_records(&store.get_all::<Appointment>(), json),
        EntityKind::Prescription => print_records(&store.get_all::<Prescription>(), json),
        EntityKind::Referral => print_records(&store.get_all::<Referral>(), json),
        EntityKind::Staff => print_records(&store.get_all::<Staff>(), json),
    }
}

fn print_records<T: Record>(records: &[T], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No {} records found.", T::KIND);
        return Ok(());
    }

    for record in records {
        let fields: Vec<String> = T::KIND
            .columns()
            .iter()
            .zip(record.values())
            .map(|(column, value)| format!("{column}: {value}"))
            .collect();
        println!("{}", fields.join(", "));
    }
    Ok(())
}

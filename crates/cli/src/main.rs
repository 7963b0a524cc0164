use clap::{Parser, Subcommand};
use mediscribe_core::schedule::{build_reminder, estimate_duration_days, resolve_slots};
use mediscribe_core::{
    CoreConfig, FileStore, Medicine, MedicineType, PrescriptionStore, StoreError,
};
use mediscribe_types::{DurationDays, NonEmptyText};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "mediscribe")]
#[command(about = "MediScribe prescription reminder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List all stored prescriptions
    List,
    /// Show one prescription
    Show {
        /// Prescription UUID
        id: String,
    },
    /// Delete one prescription
    Delete {
        /// Prescription UUID
        id: String,
    },
    /// Print a Google Calendar link for a medicine reminder
    CalendarLink {
        /// Medicine name
        name: String,
        /// Dosage pattern, e.g. "1-0-1" or "BD"
        pattern: String,
        /// Administration instructions
        #[arg(long, default_value = "After food")]
        instructions: String,
        /// Treatment duration in days
        #[arg(long, default_value_t = 1)]
        duration_days: u32,
        /// Medicine type (tablet, syrup, ointment, injection)
        #[arg(long, default_value = "tablet")]
        medicine_type: String,
        /// What the medicine is for
        #[arg(long, default_value = "")]
        purpose: String,
    },
    /// Estimate treatment duration from dispensed quantity
    EstimateDuration {
        /// Total units dispensed
        quantity: u32,
        /// Dosage pattern, e.g. "1-0-1" or "TDS"
        pattern: String,
    },
}

fn open_store() -> Result<FileStore, StoreError> {
    let data_dir = std::env::var("MEDISCRIBE_DATA_DIR").unwrap_or_else(|_| ".".into());
    let cfg = CoreConfig::new(PathBuf::from(data_dir))?;
    Ok(FileStore::new(Arc::new(cfg)))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List) => {
            let store = open_store()?;
            let prescriptions = store.list();
            if prescriptions.is_empty() {
                println!("No prescriptions found.");
            } else {
                for prescription in prescriptions {
                    println!(
                        "ID: {}, Doctor: {}, Medicines: {}, Created: {}",
                        prescription.id.simple(),
                        prescription.doctor_name.as_deref().unwrap_or("unknown"),
                        prescription.medicines.len(),
                        prescription.created_at
                    );
                }
            }
        }
        Some(Commands::Show { id }) => {
            let store = open_store()?;
            let id = Uuid::parse_str(&id)?;
            match store.get(id) {
                Ok(prescription) => {
                    println!("ID: {}", prescription.id.simple());
                    println!("Created: {}", prescription.created_at);
                    println!("Image: {}", prescription.image_url);
                    for medicine in &prescription.medicines {
                        let slots = resolve_slots(&medicine.dosage_pattern);
                        let slot_names = slots
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", ");
                        println!(
                            "  {} [{}] {} ({}) for {} days — {}",
                            medicine.medicine_name,
                            medicine.medicine_type,
                            medicine.dosage_pattern,
                            slot_names,
                            medicine.duration_days,
                            medicine.instructions
                        );
                    }
                }
                Err(e) => eprintln!("Error reading prescription: {}", e),
            }
        }
        Some(Commands::Delete { id }) => {
            let store = open_store()?;
            let id = Uuid::parse_str(&id)?;
            match store.delete(id) {
                Ok(()) => println!("Deleted prescription: {}", id.simple()),
                Err(e) => eprintln!("Error deleting prescription: {}", e),
            }
        }
        Some(Commands::CalendarLink {
            name,
            pattern,
            instructions,
            duration_days,
            medicine_type,
            purpose,
        }) => {
            let medicine_name = match NonEmptyText::new(&name) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("Invalid medicine name: {}", e);
                    return Ok(());
                }
            };
            let medicine_type: MedicineType =
                medicine_type.parse().expect("parsing is infallible");

            let medicine = Medicine {
                medicine_name,
                medicine_type,
                dosage_pattern: pattern,
                instructions,
                total_quantity: None,
                duration_days: DurationDays::new(duration_days),
                description: String::new(),
                purpose,
            };

            let event = build_reminder(&medicine);
            println!("{}", event.google_calendar_url());
        }
        Some(Commands::EstimateDuration { quantity, pattern }) => {
            match estimate_duration_days(quantity, &pattern) {
                Some(days) => println!("Estimated duration: {} days", days),
                None => println!("Could not estimate a duration from pattern '{}'", pattern),
            }
        }
        None => {
            println!("Use 'mediscribe --help' for commands");
        }
    }

    Ok(())
}

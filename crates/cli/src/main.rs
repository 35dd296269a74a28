mod form;
mod render;

use casebook_core::config::{builtins_enabled_from_env_value, resolve_catalog_path};
use casebook_core::constants::{CATALOG_ENV_VAR, NO_BUILTINS_ENV_VAR};
use casebook_core::{CasebookService, CoreConfig};
use clap::{Args, Parser, Subcommand};
use form::RecordForm;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "casebook")]
#[command(about = "Patient record casebook built from cloned templates")]
struct Cli {
    /// YAML template catalog registered after the built-in templates
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    /// Do not register the built-in templates
    #[arg(long, global = true)]
    no_builtins: bool,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available templates
    Templates {
        /// Print the templates as a catalog file
        #[arg(long)]
        yaml: bool,
    },
    /// Build one record from the given fields
    New(NewArgs),
    /// Build every record listed in a YAML batch file
    Batch {
        /// Path to the batch file
        file: PathBuf,
    },
}

#[derive(Args)]
struct NewArgs {
    /// Template key
    #[arg(long, short)]
    template: String,
    /// Patient name
    #[arg(long, default_value = "")]
    name: String,
    /// Identity document number
    #[arg(long = "id", default_value = "")]
    identity_id: String,
    /// Age in years (non-numeric values are recorded as 0)
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    age: String,
    /// Diagnosis
    #[arg(long, default_value = "")]
    diagnosis: String,
    /// Responsible physician
    #[arg(long, default_value = "")]
    physician: String,
    /// Additional notes
    #[arg(long, default_value = "")]
    notes: String,
    /// Medication (repeatable)
    #[arg(long = "medication")]
    medications: Vec<String>,
    /// Allergy (repeatable)
    #[arg(long = "allergy")]
    allergies: Vec<String>,
    /// Extra exam on top of the template's baseline (repeatable)
    #[arg(long = "exam")]
    extra_exams: Vec<String>,
}

impl From<NewArgs> for RecordForm {
    fn from(args: NewArgs) -> Self {
        Self {
            template: args.template,
            name: args.name,
            identity_id: args.identity_id,
            age: args.age,
            diagnosis: args.diagnosis,
            physician: args.physician,
            notes: args.notes,
            medications: args.medications,
            allergies: args.allergies,
            extra_exams: args.extra_exams,
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("casebook=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let catalog = cli
        .catalog
        .or_else(|| std::env::var_os(CATALOG_ENV_VAR).map(PathBuf::from));
    let include_builtins =
        !cli.no_builtins && builtins_enabled_from_env_value(std::env::var(NO_BUILTINS_ENV_VAR).ok());
    let cfg = CoreConfig::new(include_builtins, resolve_catalog_path(catalog)?);

    let service = CasebookService::from_config(&cfg)?;
    tracing::info!("{} template(s) available", service.template_keys().len());

    match cli.command {
        Some(Commands::Templates { yaml }) => {
            let templates = service.templates();
            if yaml {
                print!("{}", service.catalog().render()?);
            } else if cli.json {
                let listing: Vec<_> = templates
                    .iter()
                    .map(|(key, template)| serde_json::json!({ "key": key, "template": template }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                print!("{}", render::templates(&templates));
            }
        }
        Some(Commands::New(args)) => {
            let form = RecordForm::from(args);
            match form.submit(&service) {
                Ok(index) => {
                    let Some(record) = service.record(index) else {
                        anyhow::bail!("record {index} missing after submit");
                    };
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&record)?);
                    } else {
                        println!(
                            "Record for {} saved (template: {}).",
                            record.patient_name(),
                            form.template.trim()
                        );
                        print!("{}", render::detail(&record));
                        println!();
                        print!("{}", render::table(&service.rows()));
                    }
                }
                Err(e) => {
                    eprintln!("Record not saved: {e}");
                    std::process::exit(2);
                }
            }
        }
        Some(Commands::Batch { file }) => {
            let forms = form::load_batch(&file)?;
            let mut rejected = 0usize;
            for (position, entry) in forms.iter().enumerate() {
                if let Err(e) = entry.submit(&service) {
                    rejected += 1;
                    eprintln!("entry {}: {e}", position + 1);
                }
            }
            tracing::info!(
                "batch {}: {} saved, {} rejected",
                file.display(),
                forms.len() - rejected,
                rejected
            );

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&service.records())?);
            } else {
                print!("{}", render::table(&service.rows()));
                println!();
                print!("{}", render::stats(&service.stats()));
            }
        }
        None => {
            println!("Use 'casebook --help' for commands");
        }
    }

    Ok(())
}

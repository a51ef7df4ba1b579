use crate::demo::{run_demo, DemoArgs};
use crate::infra::{load_application, load_applications, parse_date, write_artifact};
use biodata_intake::config::AppConfig;
use biodata_intake::error::AppError;
use biodata_intake::telemetry;
use biodata_intake::workflows::biodata::export::{
    export_pdf, export_recap, export_workbook, PrintPdfRenderer, XlsxRenderer,
};
use biodata_intake::workflows::biodata::{
    derive_role, missing_required_fields, Application, ExportError, Identity, SessionContext,
};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "biodata",
    about = "Applicant biodata intake: drafts, role checks, exports and an end-to-end demo",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a blank application draft as JSON
    Draft(DraftArgs),
    /// Check a stored application JSON for missing required fields
    Validate(InputArgs),
    /// Show which role and view an email signs in to
    Role(RoleArgs),
    /// Render export documents from application JSON files
    Export {
        #[command(subcommand)]
        command: ExportCommand,
    },
    /// Run the applicant and admin flows against in-memory backends
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ExportCommand {
    /// Biodata PDF for one applicant
    Pdf(ApplicantExportArgs),
    /// Multi-sheet workbook for one applicant
    Workbook(ApplicantExportArgs),
    /// One-sheet recap of every applicant in a JSON array
    Recap(RecapArgs),
}

#[derive(Args, Debug)]
struct DraftArgs {
    /// Declaration date for the draft (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Application JSON file
    #[arg(long)]
    input: PathBuf,
}

#[derive(Args, Debug)]
struct RoleArgs {
    /// Email of the signed-in account; omit for a signed-out session
    #[arg(long)]
    email: Option<String>,
}

#[derive(Args, Debug)]
struct ApplicantExportArgs {
    /// Application JSON file
    #[arg(long)]
    input: PathBuf,
    /// Directory for the rendered file. Defaults to BIODATA_EXPORT_DIR.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RecapArgs {
    /// JSON file holding an array of applications
    #[arg(long)]
    input: PathBuf,
    /// Directory for the rendered file. Defaults to BIODATA_EXPORT_DIR.
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Date used in the file name (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;

    match cli.command {
        Command::Draft(args) => print_draft(args),
        Command::Validate(args) => validate(args),
        Command::Role(args) => {
            print_role(args);
            Ok(())
        }
        Command::Export { command } => export(command, &config),
        Command::Demo(args) => run_demo(args, &config).await,
    }
}

fn print_draft(args: DraftArgs) -> Result<(), AppError> {
    let draft = match args.today {
        Some(today) => Application::initial(today),
        None => Application::new_draft(),
    };
    println!("{}", serde_json::to_string_pretty(&draft)?);
    Ok(())
}

fn validate(args: InputArgs) -> Result<(), AppError> {
    let application = load_application(&args.input)?;
    let missing = missing_required_fields(&application);
    if missing.is_empty() {
        println!("{}: ready to submit", args.input.display());
    } else {
        println!("{}: missing required fields", args.input.display());
        for field in missing {
            println!("- {field}");
        }
    }
    Ok(())
}

fn print_role(args: RoleArgs) {
    let identity = args
        .email
        .as_deref()
        .map(|email| Identity::new("cli", Some(email)));
    let role = derive_role(identity.as_ref());
    let context = SessionContext::from_identity(identity);

    match role {
        Some(role) => println!("role: {}", role.label()),
        None => println!("role: none (signed out)"),
    }
    println!("view: {:?}", context.view());
}

fn export(command: ExportCommand, config: &AppConfig) -> Result<(), AppError> {
    let artifact = match &command {
        ExportCommand::Pdf(args) => export_pdf(&load_application(&args.input)?, &PrintPdfRenderer)?,
        ExportCommand::Workbook(args) => {
            export_workbook(&load_application(&args.input)?, &XlsxRenderer)?
        }
        ExportCommand::Recap(args) => {
            let applications = load_applications(&args.input)?;
            let today = args.today.unwrap_or_else(|| Local::now().date_naive());
            match export_recap(&applications, &XlsxRenderer, today) {
                Ok(artifact) => artifact,
                Err(ExportError::NothingToExport) => {
                    println!("{}", ExportError::NothingToExport);
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            }
        }
    };

    let out_dir = match command {
        ExportCommand::Pdf(args) | ExportCommand::Workbook(args) => args.out_dir,
        ExportCommand::Recap(args) => args.out_dir,
    }
    .unwrap_or_else(|| config.intake.export_dir.clone());

    let path = write_artifact(&out_dir, &artifact)?;
    println!("wrote {} ({} bytes)", path.display(), artifact.bytes.len());
    Ok(())
}

//! Contact form commands
//!
//! Commands: submit, submissions

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use saveserve_core::{
    validate, ContactForm, Field, FieldErrors, JsonFileStore, SaveServeConfig, SubmissionLog,
};
use saveserve_relay::{ContactSubmitter, FormSubmitClient, RelayPayload, SubmitOutcome};

#[derive(Parser, Debug)]
pub struct SubmitArgs {
    /// Your name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// "Student Volunteer", "Mess/Kitchen Vendor", "NGO / Shelter Representative",
    /// "University Administrator" or "Developer / Contributor"
    #[arg(long, default_value = "Student Volunteer")]
    pub role: String,

    /// Optional message (at least 10 characters when given)
    #[arg(long, default_value = "")]
    pub message: String,

    /// Validate and print the relay payload without sending or logging
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run_submit(args: SubmitArgs, config: &SaveServeConfig) -> Result<()> {
    let store = JsonFileStore::new(config.storage.submissions_path()?);
    let relay = FormSubmitClient::from_config(&config.relay);
    let mut submitter = ContactSubmitter::new(SubmissionLog::new(store), relay);

    let state = submitter.state_mut();
    state.set_field(Field::Name, &args.name)?;
    state.set_field(Field::Email, &args.email)?;
    state.set_field(Field::Role, &args.role)?;
    state.set_field(Field::Message, &args.message)?;

    if args.dry_run {
        let form: &ContactForm = submitter.state().form();
        let errors = validate(form);
        if !errors.is_empty() {
            return Err(validation_error(&errors));
        }
        let payload = RelayPayload::from_form(form);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    eprintln!("Processing...");
    match submitter.submit().await? {
        SubmitOutcome::Invalid(errors) => Err(validation_error(&errors)),
        SubmitOutcome::Failed { alert } => Err(anyhow!(alert)),
        SubmitOutcome::Submitted { record } => {
            println!("Welcome to the table.");
            println!(
                "We've received your details and emailed a confirmation to the team. \
                 A community manager will reach out to you within 24 hours."
            );
            if let Some(record) = record {
                println!("Reference: {}", record.id);
            }
            Ok(())
        }
    }
}

pub fn run_list(config: &SaveServeConfig) -> Result<()> {
    let path = config.storage.submissions_path()?;
    let log = SubmissionLog::new(JsonFileStore::new(&path));
    let entries = log
        .entries()
        .with_context(|| format!("Failed to read submission log {}", path.display()))?;
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

fn validation_error(errors: &FieldErrors) -> anyhow::Error {
    let lines: Vec<String> = errors
        .messages()
        .into_iter()
        .map(|(field, message)| format!("  {}: {}", field, message))
        .collect();
    anyhow!("Please fix the highlighted fields:\n{}", lines.join("\n"))
}

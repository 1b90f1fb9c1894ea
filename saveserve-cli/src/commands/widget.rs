//! Mock action card command
//!
//! Command: widget

use anyhow::Result;
use clap::{Parser, ValueEnum};
use saveserve_core::{Outcome, Workflow, WorkflowSpec, WorkflowStatus};

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum WidgetKind {
    /// Vendor dashboard "Confirm Order"
    ConfirmOrder,
    /// Vendor "Dispatch to NGO" (simulated 1.5s confirmation)
    NgoDispatch,
    /// NGO rescue alert with accept/decline
    RescueAlert,
}

#[derive(Parser, Debug)]
pub struct WidgetArgs {
    /// Which card to run
    #[arg(value_enum)]
    pub widget: WidgetKind,

    /// Take the alternate action (decline) on two-choice cards
    #[arg(long)]
    pub decline: bool,
}

pub async fn run_widget(args: WidgetArgs) -> Result<()> {
    let spec = match args.widget {
        WidgetKind::ConfirmOrder => WorkflowSpec::confirm_order(),
        WidgetKind::NgoDispatch => WorkflowSpec::ngo_dispatch(),
        WidgetKind::RescueAlert => WorkflowSpec::rescue_alert(),
    };
    let outcome = if args.decline {
        Outcome::Alternate
    } else {
        Outcome::Success
    };

    let mut workflow = Workflow::new(spec);
    workflow.trigger(outcome)?;
    if let WorkflowStatus::Pending(_) = workflow.status() {
        eprintln!("Sending...");
        workflow.resolved().await?;
    }

    if let Some(banner) = workflow.banner() {
        println!("{}", banner.title);
        println!("{}", banner.detail);
    }
    Ok(())
}

//! Pickup rescheduling command
//!
//! Command: pickup

use anyhow::Result;
use clap::Parser;
use saveserve_core::{PickupKind, PickupSlot};

#[derive(Parser, Debug)]
pub struct PickupArgs {
    /// Original pickup time, e.g. "02:30 PM"
    #[arg(long)]
    pub time: String,

    /// Minutes to move the slot by (-30 to 60, steps of 15)
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub adjust: i32,

    /// Slot title
    #[arg(long, default_value = "Lunch Surplus")]
    pub title: String,

    /// Pickup location
    #[arg(long, default_value = "North Campus Mess")]
    pub location: String,

    /// Mark the slot as a recurring pickup
    #[arg(long)]
    pub recurring: bool,
}

pub fn run_pickup(args: PickupArgs) -> Result<()> {
    let kind = if args.recurring {
        PickupKind::Recurring
    } else {
        PickupKind::Adhoc
    };
    let mut slot = PickupSlot::new(args.title, args.location, &args.time, kind)?;
    slot.edit();
    slot.set_adjustment(args.adjust)?;
    let label = slot.label();
    slot.commit();

    println!("{}: {} ({})", slot.title, slot.current_time(), label);
    if let Some(badge) = slot.badge() {
        println!("{} at {}", badge, slot.location);
    }
    Ok(())
}

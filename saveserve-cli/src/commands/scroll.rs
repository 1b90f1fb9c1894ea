//! Scroll progress command
//!
//! Command: scroll

use anyhow::Result;
use clap::Parser;
use saveserve_core::{ScrollTracker, Viewport};

#[derive(Parser, Debug)]
pub struct ScrollArgs {
    /// Current scroll offset in pixels
    #[arg(long, allow_negative_numbers = true)]
    pub top: f64,

    /// Total document height in pixels
    #[arg(long)]
    pub document: f64,

    /// Viewport height in pixels
    #[arg(long)]
    pub viewport: f64,

    /// Track width used to place the marker
    #[arg(long, default_value = "1000")]
    pub track: f64,
}

pub fn run_scroll(args: ScrollArgs) -> Result<()> {
    let tracker = ScrollTracker::mount(Viewport::new(args.top, args.document, args.viewport));
    let report = serde_json::json!({
        "fraction": tracker.fraction(),
        "marker_offset": tracker.marker_offset(args.track),
        "header_condensed": tracker.header_condensed(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

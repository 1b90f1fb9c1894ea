//! Demand chart command
//!
//! Command: chart

use anyhow::{anyhow, Result};
use clap::Parser;
use saveserve_core::chart::{smooth_path, DEFAULT_WEEK};
use saveserve_core::DemandForecast;

#[derive(Parser, Debug)]
pub struct ChartArgs {
    /// Comma-separated percentages (default: the built-in demo week)
    #[arg(long, value_delimiter = ',', conflicts_with = "date")]
    pub values: Vec<f64>,

    /// Simulate picking a calendar day and render the refreshed forecast
    #[arg(long)]
    pub date: Option<u32>,

    /// Chart width in pixels
    #[arg(long, default_value = "600")]
    pub width: f64,

    /// Chart height in pixels
    #[arg(long, default_value = "200")]
    pub height: f64,
}

pub async fn run_chart(args: ChartArgs) -> Result<()> {
    if let Some(bad) = args.values.iter().find(|v| !(0.0..=100.0).contains(*v)) {
        return Err(anyhow!("Values must be percentages in 0..=100 (got {})", bad));
    }

    if let Some(day) = args.date {
        if !(1..=31).contains(&day) {
            return Err(anyhow!("Day must be between 1 and 31 (got {})", day));
        }
        let mut forecast = DemandForecast::new();
        forecast.select_date(day)?;
        eprintln!("Regenerating forecast for day {}...", day);
        let snapshot = forecast.settled().await?;
        println!("{}", serde_json::to_string(&snapshot.series)?);
        println!("{}", forecast.path(args.width, args.height));
        return Ok(());
    }

    let values = if args.values.is_empty() {
        DEFAULT_WEEK.to_vec()
    } else {
        args.values
    };
    println!("{}", smooth_path(&values, args.width, args.height));
    Ok(())
}

//! Impact story command
//!
//! Command: story

use anyhow::{anyhow, Result};
use clap::Parser;
use saveserve_core::SaveServeConfig;
use saveserve_relay::narrative::ERROR_FALLBACK;
use saveserve_relay::{GeminiClient, ImpactNarrator};
use tracing::warn;

#[derive(Parser, Debug)]
pub struct StoryArgs {
    /// Food item that would otherwise be wasted (e.g. "Leftover Sandwiches")
    pub food_item: String,
}

pub async fn run_story(args: StoryArgs, config: &SaveServeConfig) -> Result<()> {
    if args.food_item.trim().is_empty() {
        return Err(anyhow!("Food item cannot be empty"));
    }

    let story = match GeminiClient::from_env(&config.narrative) {
        Ok(client) => {
            ImpactNarrator::new(client, config.narrative.model.clone())
                .story(&args.food_item)
                .await
        }
        Err(err) => {
            warn!(error = %err, "narrative client unavailable, using fallback");
            ERROR_FALLBACK.to_string()
        }
    };

    println!("{}", story);
    Ok(())
}

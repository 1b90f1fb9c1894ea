//! Outbound HTTP glue for the SaveServe site: the contact form email relay,
//! the impact narrative generator, and the submission flow that ties the
//! form, the local log and the relay together.

pub mod contact;
pub mod error;
pub mod formsubmit;
pub mod narrative;

pub use contact::{ContactSubmitter, SubmitOutcome};
pub use error::{RelayError, Result};
pub use formsubmit::{FormRelay, FormSubmitClient, RelayPayload};
pub use narrative::{impact_prompt, GeminiClient, ImpactNarrator, NarrativeModel, NarrativeRequest};

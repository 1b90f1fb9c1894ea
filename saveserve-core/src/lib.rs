pub mod chart;
pub mod config;
pub mod error;
pub mod form;
pub mod pickup;
pub mod scroll;
pub mod submissions;

#[cfg(feature = "rt")]
pub mod delay;
#[cfg(feature = "rt")]
pub mod forecast;
#[cfg(feature = "rt")]
pub mod workflow;

pub use chart::{chart_points, random_week, scenario_widths, smooth_path, ChartPoint};
pub use config::SaveServeConfig;
pub use error::{CoreError, Result};
pub use form::{
    validate, ContactForm, ContactFormState, Field, FieldError, FieldErrors, Role, SubmitPhase,
};
pub use pickup::{format_clock, parse_clock, PickupKind, PickupSlot};
pub use scroll::{scroll_fraction, ScrollTracker, Viewport};
pub use submissions::{
    JsonFileStore, MemoryStore, SubmissionLog, SubmissionRecord, SubmissionStore,
};

#[cfg(feature = "rt")]
pub use delay::ScheduledTask;
#[cfg(feature = "rt")]
pub use forecast::{DemandForecast, ForecastSnapshot};
#[cfg(feature = "rt")]
pub use workflow::{Banner, Outcome, Workflow, WorkflowSpec, WorkflowStatus};

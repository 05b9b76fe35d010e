pub mod aggregate;
pub mod chart;
pub mod cli;
pub mod commits;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod fetch;
pub mod files;
pub mod load;
pub mod logging;
pub mod model;
pub mod selection;
pub mod stats;
pub mod summary;
pub mod tui;
pub mod util;
pub mod window;

pub use coordinator::{Coordinator, Event, InteractionState, Session, ViewModel};
pub use error::{LocError, Result};
pub use model::{CommitSummary, LineRecord};
pub use selection::{Projection, Region};

pub mod analyzer;
pub mod api;
pub mod args;
pub mod cdx;
pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod locator;
pub mod model;
pub mod report;
pub mod shift;
pub mod timestamp;
pub mod utils;

pub use analyzer::analyze;
pub use args::Args;
pub use cdx::{Archive, HttpArchive};
pub use config::Config;
pub use error::WaybackError;
pub use extract::{extract_signals, PageSignals};
pub use locator::locate;
pub use model::{
    EvolutionRequest, MessagingEvolution, ShiftResult, Snapshot, WaybackResponse, YearGroup,
    YearMessaging,
};
pub use shift::compute_biggest_shift;

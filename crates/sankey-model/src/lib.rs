//! `sankey-model` defines the core data structures for flow (Sankey) charts.
//!
//! The crate is intentionally self-contained so it can be reused by:
//! - the aggregation engine (flow accounting, selection highlighting)
//! - dashboard/host adapters via `serde` (JSON-safe schema)
//! - CSV-backed tooling and tests

mod color;
mod config;
mod graph;
pub mod import;
mod table;
mod value;

pub use color::{ChartColor, Rgba, ACCENT_COLOR, ALPHA_OPAQUE};
pub use config::{ChartConfig, ColorMode, ConfigError, PatternRule, SETTINGS_KEY};
pub use graph::{FlowGraph, FlowLink, FlowNode};
pub use table::{SummaryTable, TableError};
pub use value::{FieldValue, RawValue};

#![forbid(unsafe_code)]

//! Aggregation and interaction engine for flow (Sankey) charts.
//!
//! Summary rows come in as a [`sankey_model::SummaryTable`]; [`aggregate`]
//! folds them into a deduplicated, index-linked [`sankey_model::FlowGraph`]
//! under a [`sankey_model::ChartConfig`]. [`build_chart`] wraps that into a
//! [`ChartOutcome`] so hosts can draw an explicit empty state, and
//! [`ChartSession`] keeps one outcome plus its click-driven
//! [`Highlighter`] selection state across overlapping render attempts.

mod aggregate;
mod highlight;
mod session;

pub use crate::aggregate::{aggregate, AggregateError, AggregateResult, LINK_ALPHA_1000};
pub use crate::highlight::{
    ColorAssignment, ElementKind, ElementRef, Highlighter, DIM_ALPHA_1000,
};
pub use crate::session::{build_chart, ChartOutcome, ChartSession, RenderTicket, RenderUpdate};

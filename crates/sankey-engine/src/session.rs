//! Per-chart render lifecycle: one active outcome plus staleness protection.
//!
//! Drawing the outcome is the rendering adapter's job; if a draw fails there,
//! the session still holds the last completed outcome, so the adapter can
//! log the failure and leave the previous chart standing.

use sankey_model::{ChartConfig, FlowGraph, SummaryTable};
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, AggregateResult};
use crate::highlight::{ColorAssignment, ElementRef, Highlighter};

/// Outcome of a completed render pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ChartOutcome {
    /// Aggregation produced flows; draw this graph.
    Chart(FlowGraph),
    /// No valid flows; draw the explicit empty state, not a blank chart.
    Empty,
}

/// Builds the outcome for one render pass: aggregate, then decide between a
/// drawable graph and the explicit empty state.
pub fn build_chart(table: &SummaryTable, config: &ChartConfig) -> AggregateResult<ChartOutcome> {
    let graph = aggregate(table, config)?;
    if graph.is_empty() {
        Ok(ChartOutcome::Empty)
    } else {
        Ok(ChartOutcome::Chart(graph))
    }
}

/// Monotonic token identifying one render attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderTicket {
    generation: u64,
}

/// Whether completing a render changed the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderUpdate {
    /// The outcome was replaced; read it via [`ChartSession::outcome`].
    Rendered,
    /// A newer render attempt superseded this ticket; nothing changed.
    Stale,
}

/// Owns the latest rendered outcome and its selection state.
///
/// Hosts fire data and configuration events in bursts, and each event begins
/// a render that completes later. Only the most recently begun attempt may
/// complete, so a slow early render cannot clobber a newer chart.
#[derive(Default)]
pub struct ChartSession {
    generation: u64,
    outcome: Option<ChartOutcome>,
    highlighter: Option<Highlighter>,
}

impl ChartSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new render attempt, invalidating tickets issued earlier.
    pub fn begin_render(&mut self) -> RenderTicket {
        self.generation = self.generation.wrapping_add(1);
        RenderTicket {
            generation: self.generation,
        }
    }

    /// Completes a render attempt against its ticket.
    ///
    /// Stale tickets are discarded without touching the current outcome, and
    /// an aggregation error leaves it untouched as well, so the chart on
    /// screen never regresses to a partial state.
    pub fn complete_render(
        &mut self,
        ticket: RenderTicket,
        table: &SummaryTable,
        config: &ChartConfig,
    ) -> AggregateResult<RenderUpdate> {
        if ticket.generation != self.generation {
            log::debug!(
                "discarding stale render attempt {} (current is {})",
                ticket.generation,
                self.generation
            );
            return Ok(RenderUpdate::Stale);
        }

        let outcome = build_chart(table, config)?;
        self.highlighter = match &outcome {
            ChartOutcome::Chart(graph) => Some(Highlighter::new(graph)),
            ChartOutcome::Empty => None,
        };
        self.outcome = Some(outcome);
        Ok(RenderUpdate::Rendered)
    }

    pub fn outcome(&self) -> Option<&ChartOutcome> {
        self.outcome.as_ref()
    }

    /// Routes a click to the active chart; `None` when nothing drawable is
    /// on screen.
    pub fn click(&mut self, point: Option<ElementRef>) -> Option<ColorAssignment> {
        self.highlighter.as_mut().map(|h| h.click(point))
    }

    pub fn selection(&self) -> Option<ElementRef> {
        self.highlighter.as_ref().and_then(|h| h.selection())
    }
}

use serde::{Deserialize, Serialize};

use crate::color::ChartColor;

/// A node of the aggregated flow graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    /// Display label the node was keyed on (a formatted field value).
    pub label: String,
    /// Sum of incoming link values.
    pub in_total: f64,
    /// Sum of outgoing link values.
    pub out_total: f64,
    /// Resolved node color.
    pub color: ChartColor,
}

impl FlowNode {
    /// The magnitude the node is drawn at: the larger of its in/out totals.
    pub fn display_total(&self) -> f64 {
        self.in_total.max(self.out_total)
    }

    /// Label with the display total appended, e.g. `"Marketing (15)"`.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.label, self.display_total())
    }
}

/// A directed edge between two node indices.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowLink {
    /// Index of the source node in [`FlowGraph::nodes`].
    pub source: usize,
    /// Index of the target node in [`FlowGraph::nodes`].
    pub target: usize,
    /// Accumulated flow amount.
    pub value: f64,
    /// Render color (the target node's color at link alpha).
    pub color: ChartColor,
}

/// The render-ready output of aggregation: nodes plus index-linked edges.
///
/// This is the interchange payload handed to the rendering side, so the field
/// layout is serde-stable camelCase like the rest of the IPC surface.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
}

impl FlowGraph {
    /// True when aggregation produced no flows. Nodes only exist as flow
    /// endpoints, so no links implies no nodes either.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

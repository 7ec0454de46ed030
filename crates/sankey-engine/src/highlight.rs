//! Click-driven selection highlighting over a rendered flow graph.
//!
//! The highlighter captures the rendered colors once, then answers every
//! click with a full per-element color assignment derived from that
//! snapshot. Reading displayed state back would compound dimming across
//! clicks; the snapshot keeps selection changes idempotent and reversible.

use sankey_model::{ChartColor, FlowGraph};
use serde::{Deserialize, Serialize};

/// Alpha (in thousandths) for de-emphasized elements while a selection is
/// active.
pub const DIM_ALPHA_1000: u16 = 200;

/// What kind of chart element a click landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Link,
}

/// A click target: element kind plus its index in the rendered arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRef {
    pub kind: ElementKind,
    pub index: usize,
}

impl ElementRef {
    pub const fn node(index: usize) -> Self {
        Self {
            kind: ElementKind::Node,
            index,
        }
    }

    pub const fn link(index: usize) -> Self {
        Self {
            kind: ElementKind::Link,
            index,
        }
    }
}

/// Complete per-element color state to push to the renderer after a click.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorAssignment {
    pub node_colors: Vec<ChartColor>,
    pub link_colors: Vec<ChartColor>,
}

/// Single-selection highlight state machine over one rendered chart.
///
/// Build a fresh highlighter per render; a re-render invalidates element
/// indices along with the color snapshot.
pub struct Highlighter {
    node_colors: Vec<ChartColor>,
    link_colors: Vec<ChartColor>,
    /// `(source, target)` node indices per link.
    endpoints: Vec<(usize, usize)>,
    selection: Option<ElementRef>,
}

impl Highlighter {
    pub fn new(graph: &FlowGraph) -> Self {
        Self {
            node_colors: graph.nodes.iter().map(|n| n.color.clone()).collect(),
            link_colors: graph.links.iter().map(|l| l.color.clone()).collect(),
            endpoints: graph.links.iter().map(|l| (l.source, l.target)).collect(),
            selection: None,
        }
    }

    pub fn selection(&self) -> Option<ElementRef> {
        self.selection
    }

    /// Routes one click. `None` stands for a background click (no
    /// identifiable element) and always clears the selection; so does a
    /// click on the already-selected element. An index outside the rendered
    /// arrays (a late event racing a re-render) is treated as background.
    pub fn click(&mut self, point: Option<ElementRef>) -> ColorAssignment {
        let Some(clicked) = point else {
            return self.reset();
        };
        if !self.contains(clicked) || self.selection == Some(clicked) {
            return self.reset();
        }
        self.selection = Some(clicked);
        self.emphasize(clicked)
    }

    fn contains(&self, element: ElementRef) -> bool {
        match element.kind {
            ElementKind::Node => element.index < self.node_colors.len(),
            ElementKind::Link => element.index < self.link_colors.len(),
        }
    }

    fn reset(&mut self) -> ColorAssignment {
        self.selection = None;
        ColorAssignment {
            node_colors: self.node_colors.clone(),
            link_colors: self.link_colors.clone(),
        }
    }

    /// Dims everything, then restores the clicked element and its
    /// neighborhood from the snapshot. A node keeps its incident links and
    /// their far endpoints; a link keeps only itself and its two endpoints.
    fn emphasize(&self, clicked: ElementRef) -> ColorAssignment {
        let mut node_colors: Vec<ChartColor> = self
            .node_colors
            .iter()
            .map(|c| c.with_alpha_1000(DIM_ALPHA_1000))
            .collect();
        let mut link_colors: Vec<ChartColor> = self
            .link_colors
            .iter()
            .map(|c| c.with_alpha_1000(DIM_ALPHA_1000))
            .collect();

        match clicked.kind {
            ElementKind::Node => {
                let node = clicked.index;
                node_colors[node] = self.node_colors[node].clone();
                for (link, &(source, target)) in self.endpoints.iter().enumerate() {
                    if source == node || target == node {
                        link_colors[link] = self.link_colors[link].clone();
                        node_colors[source] = self.node_colors[source].clone();
                        node_colors[target] = self.node_colors[target].clone();
                    }
                }
            }
            ElementKind::Link => {
                let link = clicked.index;
                let (source, target) = self.endpoints[link];
                link_colors[link] = self.link_colors[link].clone();
                node_colors[source] = self.node_colors[source].clone();
                node_colors[target] = self.node_colors[target].clone();
            }
        }

        ColorAssignment {
            node_colors,
            link_colors,
        }
    }
}

//! Flow aggregation: summary rows in, a render-ready flow graph out.
//!
//! The pipeline folds rows into deduplicated `(source, target)` flows first,
//! then derives nodes, links, totals and colors from the flow list. Node
//! order is observable (it decides chart indices), so labels are interned in
//! first-appearance order over the flows, not over the raw rows.

use std::collections::HashMap;

use sankey_model::{ChartConfig, ConfigError, FlowGraph, FlowLink, FlowNode, SummaryTable};
use thiserror::Error;

/// Alpha (in thousandths) a link inherits from its target node's color.
pub const LINK_ALPHA_1000: u16 = 700;

pub type AggregateResult<T> = Result<T, AggregateError>;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("column {column:?} does not exist in the summary data")]
    UnknownColumn { column: String },
}

/// One accumulated flow between two labels, summed across contributing rows.
#[derive(Clone, Debug, PartialEq)]
pub struct Flow {
    pub source: String,
    pub target: String,
    pub amount: f64,
}

/// Deduplicating flow accumulator, insertion-ordered.
#[derive(Default)]
struct FlowTable {
    flows: Vec<Flow>,
    index: HashMap<(String, String), usize>,
}

impl FlowTable {
    fn accumulate(&mut self, source: &str, target: &str, amount: f64) {
        let key = (source.to_string(), target.to_string());
        if let Some(&idx) = self.index.get(&key) {
            self.flows[idx].amount += amount;
            return;
        }
        let idx = self.flows.len();
        self.flows.push(Flow {
            source: key.0.clone(),
            target: key.1.clone(),
            amount,
        });
        self.index.insert(key, idx);
    }
}

/// Insertion-ordered label interner; the assigned index is the node index.
#[derive(Default)]
struct NodeTable {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl NodeTable {
    fn intern(&mut self, label: &str) -> usize {
        if let Some(&idx) = self.index.get(label) {
            return idx;
        }
        let idx = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), idx);
        idx
    }
}

/// Aggregates one summary table into a flow graph under the given
/// configuration.
///
/// Rows whose amount is missing, non-numeric, non-finite or exactly zero are
/// skipped without failing the run. Repeated runs over the same inputs yield
/// the same graph, including node order.
pub fn aggregate(table: &SummaryTable, config: &ChartConfig) -> AggregateResult<FlowGraph> {
    config.validate()?;
    let source_idx = resolve_column(table, &config.source_col)?;
    let target_idx = resolve_column(table, &config.target_col)?;
    let amount_idx = resolve_column(table, &config.amount_col)?;

    let mut flows = FlowTable::default();
    for row in table.rows() {
        // Labels come from the formatted text; the amount reads the raw value.
        let Some(amount) = row[amount_idx].as_number() else {
            continue;
        };
        if amount == 0.0 {
            continue;
        }
        flows.accumulate(&row[source_idx].formatted, &row[target_idx].formatted, amount);
    }

    let mut nodes = NodeTable::default();
    let mut links = Vec::with_capacity(flows.flows.len());
    for flow in &flows.flows {
        let source = nodes.intern(&flow.source);
        let target = nodes.intern(&flow.target);
        links.push((source, target, flow.amount));
    }

    let mut in_totals = vec![0.0f64; nodes.labels.len()];
    let mut out_totals = vec![0.0f64; nodes.labels.len()];
    for &(source, target, amount) in &links {
        out_totals[source] += amount;
        in_totals[target] += amount;
    }

    let nodes: Vec<FlowNode> = nodes
        .labels
        .into_iter()
        .zip(in_totals.into_iter().zip(out_totals))
        .map(|(label, (in_total, out_total))| {
            let color = config.node_color(&label);
            FlowNode {
                label,
                in_total,
                out_total,
                color,
            }
        })
        .collect();

    let links = links
        .into_iter()
        .map(|(source, target, value)| FlowLink {
            source,
            target,
            value,
            color: nodes[target].color.with_alpha_1000(LINK_ALPHA_1000),
        })
        .collect();

    Ok(FlowGraph { nodes, links })
}

fn resolve_column(table: &SummaryTable, name: &str) -> AggregateResult<usize> {
    table.column_idx(name).ok_or_else(|| {
        log::warn!("summary data has no column {name:?}; aborting aggregation");
        AggregateError::UnknownColumn {
            column: name.to_string(),
        }
    })
}

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use sankey_engine::{ChartOutcome, ChartSession, ElementRef};
use sankey_model::import::{import_csv_summary, CsvOptions};
use sankey_model::{ChartColor, ChartConfig, FlowLink, FlowNode};
use serde::Serialize;

#[derive(Debug)]
struct Args {
    data: PathBuf,
    config: PathBuf,
    clicks: Vec<ElementRef>,
    delimiter: u8,
    no_header: bool,
}

impl Args {
    fn parse() -> Result<Self, io::Error> {
        let mut data: Option<PathBuf> = None;
        let mut config: Option<PathBuf> = None;
        let mut clicks = Vec::new();
        let mut delimiter = b',';
        let mut no_header = false;

        let mut it = env::args().skip(1);
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "-h" | "--help" => {
                    print_usage();
                    std::process::exit(0);
                }
                "--config" => {
                    let value = it
                        .next()
                        .ok_or_else(|| invalid("--config expects <path>"))?;
                    config = Some(PathBuf::from(value));
                }
                "--click" => {
                    let value = it
                        .next()
                        .ok_or_else(|| invalid("--click expects <node|link>:<index>"))?;
                    clicks.push(parse_click(&value)?);
                }
                "--delimiter" => {
                    let value = it
                        .next()
                        .ok_or_else(|| invalid("--delimiter expects a single character"))?;
                    let mut bytes = value.bytes();
                    delimiter = match (bytes.next(), bytes.next()) {
                        (Some(b), None) => b,
                        _ => return Err(invalid("--delimiter expects a single character")),
                    };
                }
                "--no-header" => no_header = true,
                _ if arg.starts_with('-') => {
                    return Err(invalid(&format!("unknown option {arg}")));
                }
                _ => {
                    if data.is_some() {
                        return Err(invalid("only one <data.csv> argument is accepted"));
                    }
                    data = Some(PathBuf::from(arg));
                }
            }
        }

        let data = data.ok_or_else(|| invalid("missing <data.csv> argument"))?;
        let config = config.ok_or_else(|| invalid("missing --config <path>"))?;
        Ok(Self {
            data,
            config,
            clicks,
            delimiter,
            no_header,
        })
    }
}

fn invalid(message: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message.to_string())
}

fn parse_click(value: &str) -> Result<ElementRef, io::Error> {
    let (kind, index) = value
        .split_once(':')
        .ok_or_else(|| invalid("--click expects <node|link>:<index>"))?;
    let index: usize = index
        .trim()
        .parse()
        .map_err(|_| invalid("--click index must be an unsigned integer"))?;
    match kind.trim() {
        "node" => Ok(ElementRef::node(index)),
        "link" => Ok(ElementRef::link(index)),
        _ => Err(invalid("--click expects <node|link>:<index>")),
    }
}

fn print_usage() {
    println!(
        "\
sankey-diag: aggregate a CSV summary table into a flow-chart JSON payload

Usage:
  sankey-diag <data.csv> --config <config.json> [options]

Options:
  --config <path>       Chart configuration JSON (the payload the dashboard stores)
  --click <kind>:<i>    Simulate a click on node:<i> or link:<i> and print the
                        resulting color assignment (repeatable, applied in order)
  --delimiter <c>       CSV delimiter (default ',')
  --no-header           Treat the first record as data; columns become Column1..N
"
    );
}

/// JSON shape printed for a completed render: the chart outcome with each
/// node enriched by the display strings the renderer draws.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum RenderReport<'a> {
    Chart(RenderModel<'a>),
    Empty,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderModel<'a> {
    nodes: Vec<RenderNode<'a>>,
    links: &'a [FlowLink],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderNode<'a> {
    label: &'a str,
    display_label: String,
    in_total: f64,
    out_total: f64,
    display_total: f64,
    color: &'a ChartColor,
}

fn render_report(outcome: &ChartOutcome) -> RenderReport<'_> {
    match outcome {
        ChartOutcome::Chart(graph) => RenderReport::Chart(RenderModel {
            nodes: graph.nodes.iter().map(render_node).collect(),
            links: &graph.links,
        }),
        ChartOutcome::Empty => RenderReport::Empty,
    }
}

fn render_node(node: &FlowNode) -> RenderNode<'_> {
    RenderNode {
        label: &node.label,
        display_label: node.display_label(),
        in_total: node.in_total,
        out_total: node.out_total,
        display_total: node.display_total(),
        color: &node.color,
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("sankey-diag: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), io::Error> {
    let args = Args::parse()?;

    let config_json = fs::read_to_string(&args.config)?;
    let config = ChartConfig::from_settings_json(&config_json)
        .map_err(|e| invalid(&format!("{}: {e}", args.config.display())))?;

    let file = fs::File::open(&args.data)?;
    let options = CsvOptions {
        delimiter: args.delimiter,
        has_header: !args.no_header,
    };
    let table = import_csv_summary(io::BufReader::new(file), &options)
        .map_err(|e| invalid(&format!("{}: {e}", args.data.display())))?;

    let mut session = ChartSession::new();
    let ticket = session.begin_render();
    session
        .complete_render(ticket, &table, &config)
        .map_err(|e| invalid(&e.to_string()))?;

    let outcome = session.outcome().expect("completed render has an outcome");
    println!(
        "{}",
        serde_json::to_string_pretty(&render_report(outcome)).expect("serialize render model")
    );

    for click in args.clicks {
        match session.click(Some(click)) {
            Some(assignment) => println!(
                "{}",
                serde_json::to_string_pretty(&assignment).expect("serialize color assignment")
            ),
            None => eprintln!("sankey-diag: chart is empty; nothing to click"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use sankey_engine::LINK_ALPHA_1000;
    use sankey_model::FlowGraph;

    fn sample_outcome() -> ChartOutcome {
        let sales = ChartColor::rgb(0x44, 0x55, 0x66);
        ChartOutcome::Chart(FlowGraph {
            nodes: vec![
                FlowNode {
                    label: "Marketing".to_string(),
                    in_total: 3.0,
                    out_total: 15.0,
                    color: ChartColor::rgb(0x11, 0x22, 0x33),
                },
                FlowNode {
                    label: "Sales".to_string(),
                    in_total: 15.0,
                    out_total: 0.0,
                    color: sales.clone(),
                },
            ],
            links: vec![FlowLink {
                source: 0,
                target: 1,
                value: 15.0,
                color: sales.with_alpha_1000(LINK_ALPHA_1000),
            }],
        })
    }

    #[test]
    fn report_nodes_carry_display_labels() {
        let outcome = sample_outcome();
        let json = serde_json::to_value(render_report(&outcome)).unwrap();

        assert_eq!(json["type"], "chart");
        assert_eq!(json["nodes"][0]["label"], "Marketing");
        assert_eq!(json["nodes"][0]["displayLabel"], "Marketing (15)");
        assert_eq!(json["nodes"][0]["displayTotal"], 15.0);
        assert_eq!(json["nodes"][1]["displayLabel"], "Sales (15)");
        assert_eq!(json["links"][0]["target"], 1);
        assert_eq!(json["links"][0]["value"], 15.0);
    }

    #[test]
    fn empty_report_keeps_the_tagged_envelope() {
        let json = serde_json::to_value(render_report(&ChartOutcome::Empty)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "empty" }));
    }
}

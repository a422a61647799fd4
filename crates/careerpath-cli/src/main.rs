use anyhow::{Context, Result};
use careerpath_core::{Category, Edge, LayoutConfig, StreamInfo, Vertex, VertexId};
use careerpath_events::{Event, EventBus, EventListener};
use careerpath_graph::{
    CareerGraphEngine, CategoryFilter, SearchOutcome, StreamBandLayouter, accent_for,
};
use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Lay out a career-path graph and print the annotated result", long_about = None)]
struct Args {
    /// Graph JSON: {"vertices":[{"id","label"}], "edges":[{"source","target"}]}
    #[arg(short, long)]
    graph: PathBuf,

    /// Layout config JSON; missing keys keep their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Allowed stream categories, e.g. 1,2,3 (defaults to all built-in streams)
    #[arg(short, long, value_delimiter = ',')]
    streams: Option<Vec<u32>>,

    /// Collapse a vertex (repeatable)
    #[arg(long)]
    collapse: Vec<String>,

    /// Highlight the first visible vertex whose label contains this text
    #[arg(long)]
    search: Option<String>,

    /// Use the compact stream-band layout instead of the tree layout
    #[arg(long)]
    band: bool,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Deserialize)]
struct GraphFile {
    vertices: Vec<Vertex>,
    #[serde(default)]
    edges: Vec<Edge>,
}

/// Logs every engine event on stderr.
struct EventLog;

impl EventListener for EventLog {
    fn handle_event(&mut self, event: &Event) {
        match event {
            Event::RequestViewportFit(fit) => tracing::info!(
                "Viewport fit #{} ({:?}): {:?} padding {} over {}ms",
                fit.sequence,
                fit.reason,
                fit.bounds,
                fit.padding_ratio,
                fit.duration_ms
            ),
            Event::LayoutCompleted {
                vertex_count,
                edge_count,
            } => tracing::info!(
                "Layout completed: {} vertices, {} edges",
                vertex_count,
                edge_count
            ),
            Event::LayoutFailed { error } => tracing::error!("Layout failed: {}", error),
            Event::CollapseToggled { id, collapsed } => {
                tracing::info!("Vertex {} collapsed={}", id, collapsed)
            }
            Event::HighlightChanged { id } => match id {
                Some(id) => tracing::info!("Highlighting {}", id),
                None => tracing::info!("Highlight cleared"),
            },
            Event::SearchNoMatch { query } => tracing::warn!("No career found for {:?}", query),
        }
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config: LayoutConfig = match &args.config {
        Some(path) => read_json(path)?,
        None => LayoutConfig::default(),
    };
    let graph: GraphFile = read_json(&args.graph)?;

    let bus = EventBus::new();
    let mut engine = if args.band {
        CareerGraphEngine::with_layouter(config, bus.clone(), Box::new(StreamBandLayouter))
    } else {
        CareerGraphEngine::new(config, bus.clone())
    };
    let mut log = EventLog;

    if let Some(streams) = &args.streams {
        engine.set_category_filter(CategoryFilter::new(streams.iter().copied().map(Category)));
    }

    for category in engine.category_filter().allowed() {
        let name = StreamInfo::lookup(category).map_or("custom stream", |s| s.label_en);
        tracing::debug!(
            "Stream {} ({}): accent {}",
            category,
            name,
            accent_for(Some(category)).to_hex()
        );
    }

    let loaded = engine.set_graph(&graph.vertices, &graph.edges);
    bus.dispatch_to(&mut log);
    loaded.with_context(|| format!("Cannot lay out {}", args.graph.display()))?;

    for id in &args.collapse {
        let id = VertexId::from(id.as_str());
        if !engine.index().contains(&id) {
            tracing::warn!("--collapse {}: no such vertex", id);
            continue;
        }
        engine.toggle_collapse(&id);
    }

    if let Some(query) = &args.search {
        if let SearchOutcome::Found { id, .. } = engine.search(query) {
            tracing::debug!("Search {:?} matched {}", query, id);
        }
    }
    bus.dispatch_to(&mut log);

    if let Some(bounds) = engine.visible_bounds() {
        tracing::debug!(
            "Export bounds: {}x{} at {:?}",
            bounds.width(),
            bounds.height(),
            bounds.min
        );
    }

    let snapshot = engine.snapshot();
    let output = if args.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{}", output);

    Ok(())
}

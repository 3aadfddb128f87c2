//! `vgbuf-explore`: sweeps a synthetic single-sink wire from a starting
//! length to a user-supplied maximum, reporting per-length wall-clock time
//! and achieved root RAT. Used to eyeball how the engine's running time and
//! the slack it recovers scale with wire length; not part of the core.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use smallvec::smallvec;
use thiserror::Error;

use vgbuf_core::{Edge, EdgeId, Node, NodeId, NodeKind, Point, TraceTree};
use vgbuf_engine::RunOptions;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Io(#[from] vgbuf_io::IoError),
    #[error(transparent)]
    Engine(#[from] vgbuf_engine::EngineError),
    #[error(transparent)]
    TreeShape(#[from] vgbuf_core::TreeShapeError),
    #[cfg(feature = "render")]
    #[error("plot rendering failed: {0}")]
    Plot(String),
}

/// Sweeps wire length and reports wall-clock time and achieved Q at the root.
#[derive(Debug, Parser)]
#[command(name = "vgbuf-explore", version, about)]
struct Args {
    /// Technology file (buffer model + unit wire R/C).
    technology: PathBuf,

    /// Shortest wire length to try.
    start: u32,

    /// Longest wire length to try (inclusive).
    max: u32,

    /// Step between successive lengths.
    #[arg(long, default_value_t = 1)]
    step: u32,

    /// Sink input capacitance used for every synthetic net.
    #[arg(long, default_value_t = 1.0)]
    sink_capacitance: f64,

    /// Sink required arrival time used for every synthetic net.
    #[arg(long, default_value_t = 1000.0)]
    sink_rat: f64,

    /// Also plot wall-clock time and achieved root RAT against length to a
    /// PNG at this path.
    #[cfg(feature = "render")]
    #[arg(long)]
    plot: Option<PathBuf>,
}

/// A single root-buffer-to-sink wire of the given length, straight along +y.
fn synthetic_tree(length: u32, c_sink: f64, q_sink: f64) -> Result<TraceTree, CliError> {
    let root = Node {
        id: NodeId(0),
        x: 0,
        y: 0,
        kind: NodeKind::Buffer,
        name: "root".into(),
        children: smallvec![NodeId(1)],
    };
    let sink = Node {
        id: NodeId(1),
        x: 0,
        y: length as i32,
        kind: NodeKind::Terminal { c_sink, q_sink },
        name: "sink".into(),
        children: Default::default(),
    };
    let edge = Edge {
        id: EdgeId(0),
        parent: NodeId(0),
        child: NodeId(1),
        segments: vec![Point::new(0, 0), Point::new(0, length as i32)],
    };
    Ok(TraceTree::new(vec![root, sink], vec![edge])?)
}

/// A single swept sample: wire length, wall-clock time in microseconds, and
/// the root candidate's achieved required arrival time.
struct Sample {
    length: u32,
    elapsed_us: u128,
    q: f64,
}

#[cfg(feature = "render")]
fn plot_sweep(samples: &[Sample], path: &std::path::Path) -> Result<(), CliError> {
    use plotters::prelude::*;

    let root = BitMapBackend::new(path, (900, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| CliError::Plot(e.to_string()))?;
    let (time_area, q_area) = root.split_vertically(350);

    let min_len = samples.first().map(|s| s.length).unwrap_or(0);
    let max_len = samples.last().map(|s| s.length).unwrap_or(1).max(min_len + 1);
    let max_us = samples.iter().map(|s| s.elapsed_us).max().unwrap_or(1).max(1);
    let (min_q, max_q) = samples.iter().fold((f64::MAX, f64::MIN), |(lo, hi), s| {
        (lo.min(s.q), hi.max(s.q))
    });

    let mut time_chart = ChartBuilder::on(&time_area)
        .margin(15)
        .caption("wall-clock time vs wire length", ("sans-serif", 16))
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(min_len..max_len, 0u128..(max_us + 1))
        .map_err(|e| CliError::Plot(e.to_string()))?;
    time_chart
        .configure_mesh()
        .x_desc("wire length")
        .y_desc("microseconds")
        .draw()
        .map_err(|e| CliError::Plot(e.to_string()))?;
    time_chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.length, s.elapsed_us)),
            &RED,
        ))
        .map_err(|e| CliError::Plot(e.to_string()))?;

    let mut q_chart = ChartBuilder::on(&q_area)
        .margin(15)
        .caption("achieved root Q vs wire length", ("sans-serif", 16))
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(min_len..max_len, (min_q - 1.0)..(max_q + 1.0))
        .map_err(|e| CliError::Plot(e.to_string()))?;
    q_chart
        .configure_mesh()
        .x_desc("wire length")
        .y_desc("root Q")
        .draw()
        .map_err(|e| CliError::Plot(e.to_string()))?;
    q_chart
        .draw_series(LineSeries::new(samples.iter().map(|s| (s.length, s.q)), &BLUE))
        .map_err(|e| CliError::Plot(e.to_string()))?;

    root.present().map_err(|e| CliError::Plot(e.to_string()))?;
    Ok(())
}

fn run(args: &Args) -> Result<(), CliError> {
    let tech_doc = vgbuf_io::read_technology_document(&args.technology)?;
    let tech = vgbuf_io::to_technology(&tech_doc)?;
    let options = RunOptions::default();

    println!("{:>10} {:>12} {:>14}", "length", "elapsed_us", "root_Q");
    let mut samples = Vec::new();
    let mut length = args.start;
    while length <= args.max {
        let tree = synthetic_tree(length, args.sink_capacitance, args.sink_rat)?;

        let start = Instant::now();
        let best = vgbuf_engine::run(&tree, &tech, &options)?;
        let elapsed = start.elapsed();

        println!(
            "{:>10} {:>12} {:>14.4}",
            length,
            elapsed.as_micros(),
            best.q
        );
        samples.push(Sample {
            length,
            elapsed_us: elapsed.as_micros(),
            q: best.q,
        });

        if args.step == 0 {
            break;
        }
        length += args.step;
    }

    #[cfg(feature = "render")]
    if let Some(plot_path) = &args.plot {
        plot_sweep(&samples, plot_path)?;
        log::info!("wrote {}", plot_path.display());
    }

    Ok(())
}

fn main() {
    simple_log::quick!("info");

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

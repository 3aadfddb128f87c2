//! Optional PNG backend: draws a buffered trace tree at its actual
//! rectilinear coordinates, rather than a force-directed layout that throws
//! the geometry away.

use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;
use vgbuf_core::NodeKind;
use vgbuf_engine::OutputTree;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("tree has no nodes to render")]
    EmptyTree,
    #[error("drawing backend error: {0}")]
    Drawing(String),
}

fn node_color(kind: &NodeKind) -> RGBColor {
    match kind {
        NodeKind::Terminal { .. } => RED,
        NodeKind::Buffer => BLUE,
        NodeKind::Steiner => GREEN,
    }
}

/// Renders `output` to a PNG at `path`, plotting every node at its true
/// (x, y) and every edge along its routed polyline.
pub fn render_tree_png(output: &OutputTree, path: &Path) -> Result<(), RenderError> {
    if output.nodes.is_empty() {
        return Err(RenderError::EmptyTree);
    }

    let (mut min_x, mut max_x, mut min_y, mut max_y) = (i32::MAX, i32::MIN, i32::MAX, i32::MIN);
    for n in &output.nodes {
        min_x = min_x.min(n.x);
        max_x = max_x.max(n.x);
        min_y = min_y.min(n.y);
        max_y = max_y.max(n.y);
    }
    let margin = ((max_x - min_x).max(max_y - min_y).max(1)) / 10 + 1;

    let root = BitMapBackend::new(path, (1000, 1000)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| RenderError::Drawing(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("buffered trace tree", ("sans-serif", 20))
        .build_cartesian_2d(
            (min_x - margin)..(max_x + margin),
            (min_y - margin)..(max_y + margin),
        )
        .map_err(|e| RenderError::Drawing(e.to_string()))?;

    chart
        .configure_mesh()
        .draw()
        .map_err(|e| RenderError::Drawing(e.to_string()))?;

    for edge in &output.edges {
        let points: Vec<(i32, i32)> = edge.segments.iter().map(|p| (p.x, p.y)).collect();
        chart
            .draw_series(LineSeries::new(points, &BLACK))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;
    }

    for node in &output.nodes {
        let color = node_color(&node.kind);
        chart
            .draw_series(std::iter::once(Circle::new(
                (node.x, node.y),
                4,
                color.filled(),
            )))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;
        chart
            .draw_series(std::iter::once(Text::new(
                format!("{}:{}", node.id.0, node.name),
                (node.x, node.y),
                ("sans-serif", 10).into_font(),
            )))
            .map_err(|e| RenderError::Drawing(e.to_string()))?;
    }

    root.present()
        .map_err(|e| RenderError::Drawing(e.to_string()))?;
    Ok(())
}

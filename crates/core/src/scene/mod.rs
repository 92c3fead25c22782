use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    build_bars_with_gap, build_double_sided_path, build_full_bars, build_open_path,
    build_stacked_bars, circular_project, polyline_to_nodes, smooth_ribbon_nodes, stack_to_nodes,
    tunnel_rings, AmplitudeVector, AppConfig, EqualizerError, PathNode, PointSequence,
    ProjectionParams, Result, TunnelPhase, Viewport,
};

/// Every equalizer style the crate can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visualization {
    Bars,
    FullBars,
    CircularBars,
    StackedBars,
    CircularStackedBars,
    TubularStackedBars,
    OneSidedPath,
    DoubleSidedPath,
    DoubleSidedCircularPath,
}

impl Visualization {
    pub const ALL: [Visualization; 9] = [
        Visualization::Bars,
        Visualization::FullBars,
        Visualization::CircularBars,
        Visualization::StackedBars,
        Visualization::CircularStackedBars,
        Visualization::TubularStackedBars,
        Visualization::OneSidedPath,
        Visualization::DoubleSidedPath,
        Visualization::DoubleSidedCircularPath,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Visualization::Bars => "bars",
            Visualization::FullBars => "full-bars",
            Visualization::CircularBars => "circular-bars",
            Visualization::StackedBars => "stacked-bars",
            Visualization::CircularStackedBars => "circular-stacked-bars",
            Visualization::TubularStackedBars => "tubular-stacked-bars",
            Visualization::OneSidedPath => "one-sided-path",
            Visualization::DoubleSidedPath => "double-sided-path",
            Visualization::DoubleSidedCircularPath => "double-sided-circular-path",
        }
    }

    /// Whether the style goes through the circular projector and therefore
    /// needs a drawable viewport.
    pub fn is_circular(&self) -> bool {
        matches!(
            self,
            Visualization::CircularBars
                | Visualization::CircularStackedBars
                | Visualization::TubularStackedBars
                | Visualization::DoubleSidedCircularPath
        )
    }
}

impl fmt::Display for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Visualization {
    type Err = EqualizerError;

    fn from_str(value: &str) -> Result<Self> {
        Visualization::ALL
            .into_iter()
            .find(|kind| kind.name() == value)
            .ok_or_else(|| EqualizerError::msg(format!("unknown visualization `{value}`")))
    }
}

/// One filled path of a rendered scene, drawn in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathLayer {
    pub name: String,
    pub opacity: f32,
    pub nodes: Vec<PathNode>,
}

impl PathLayer {
    fn opaque(name: impl Into<String>, nodes: Vec<PathNode>) -> Self {
        Self {
            name: name.into(),
            opacity: 1.0,
            nodes,
        }
    }
}

/// Builds the path layers of `kind` for one frame.
///
/// The amplitude vector length is the bar or segment count. `phase` only
/// matters to the tunnel. Empty amplitudes produce layers without nodes.
pub fn render_layers(
    kind: Visualization,
    amplitudes: &AmplitudeVector,
    viewport: Viewport,
    config: &AppConfig,
    phase: &TunnelPhase,
) -> Result<Vec<PathLayer>> {
    let layout = &config.layout;
    let stacked = || {
        build_stacked_bars(
            amplitudes,
            viewport,
            amplitudes.len(),
            layout.max_stack_count,
            layout.horizontal_padding,
            layout.vertical_padding,
        )
    };
    let project = |points: &PointSequence, params: &ProjectionParams| {
        circular_project(points, viewport, params)
    };

    let layers = match kind {
        Visualization::Bars => {
            let bars = build_bars_with_gap(amplitudes, viewport, layout.bar_gap);
            vec![PathLayer::opaque("bars", stack_to_nodes(&bars))]
        }
        Visualization::FullBars => {
            let bars = build_full_bars(amplitudes, viewport, layout.full_bar_count);
            vec![PathLayer::opaque("bars", stack_to_nodes(&bars))]
        }
        Visualization::CircularBars => {
            let bars = build_bars_with_gap(amplitudes, viewport, layout.bar_gap);
            let params = ProjectionParams::from(&config.projection);
            let ring = project(&bars, &params)?;
            vec![PathLayer::opaque("bars", stack_to_nodes(&ring))]
        }
        Visualization::StackedBars => {
            vec![PathLayer::opaque("stacks", stack_to_nodes(&stacked()))]
        }
        Visualization::CircularStackedBars => {
            let ring = project(&stacked(), &ProjectionParams::ring(0.1, 1.0))?;
            vec![PathLayer::opaque("stacks", stack_to_nodes(&ring))]
        }
        Visualization::TubularStackedBars => {
            let blocks = stacked();
            let mut layers = Vec::new();
            for (index, ring) in tunnel_rings(phase).iter().enumerate() {
                let halo = project(&blocks, &ring.background_params(phase))?;
                layers.push(PathLayer::opaque(
                    format!("ring-{index}-halo"),
                    stack_to_nodes(&halo),
                ));

                let front = project(&blocks, &ring.params(phase))?;
                layers.push(PathLayer {
                    name: format!("ring-{index}"),
                    opacity: ring.opacity,
                    nodes: stack_to_nodes(&front),
                });
            }
            layers
        }
        Visualization::OneSidedPath => {
            let area = build_open_path(amplitudes, viewport);
            vec![PathLayer::opaque("area", polyline_to_nodes(&area))]
        }
        Visualization::DoubleSidedPath => {
            let ribbon = build_double_sided_path(amplitudes, viewport, false);
            vec![PathLayer::opaque("ribbon", polyline_to_nodes(&ribbon))]
        }
        Visualization::DoubleSidedCircularPath => {
            let ribbon = build_double_sided_path(amplitudes, viewport, true);
            let params = ProjectionParams {
                inner_radius_ratio: 0.5,
                outer_radius_ratio: 0.8,
                ..ProjectionParams::default()
            };
            let ring = project(&ribbon, &params)?;
            vec![PathLayer::opaque("ribbon", smooth_ribbon_nodes(&ring))]
        }
    };

    tracing::debug!(
        kind = %kind,
        layers = layers.len(),
        nodes = layers.iter().map(|layer| layer.nodes.len()).sum::<usize>(),
        "built scene"
    );
    Ok(layers)
}

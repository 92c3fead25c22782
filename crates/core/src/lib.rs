//! Core library for the Equalizer application.
//!
//! The crate turns raw waveform captures into drawable equalizer geometry.
//! Data flows leaves first: a [`RawCapture`] is reduced by the [`sampler`] to
//! an [`AmplitudeVector`], the [`geometry`] builders lay it out as planar
//! points, and the [`projection`] kernel optionally wraps those points onto a
//! disk. Everything on that path is pure and cheap enough to run every frame.
//! The remaining modules sit around it: [`path`] turns points into drawing
//! commands, [`scene`] composes the supported styles, [`tunnel`] and
//! [`animation`] provide the time-driven parameters, and [`capture`] is the
//! hand-off point for the platform capture driver.

pub mod animation;
pub mod capture;
pub mod config;
pub mod error;
pub mod geometry;
pub mod path;
pub mod projection;
pub mod sampler;
pub mod scene;
pub mod tunnel;

pub use animation::{lerp_points, PointTween};
pub use capture::{CaptureHub, CaptureMonitor, FrameHandle, VisualizerFrame};
pub use config::{AppConfig, CaptureConfig, LayoutConfig, ProjectionConfig, SamplerConfig};
pub use error::{EqualizerError, Result};
pub use geometry::{
    build_bars, build_bars_with_gap, build_double_sided_path, build_full_bars, build_open_path,
    build_stacked_bars, Point, PointSequence, Viewport, DEFAULT_BAR_GAP,
};
pub use path::{polyline_to_nodes, smooth_ribbon_nodes, stack_to_nodes, to_svg_path_data, PathNode};
pub use projection::{circular_project, lerp, ProjectionParams};
pub use sampler::{peak_amplitude, sample, AmplitudeVector, RawCapture};
pub use scene::{render_layers, PathLayer, Visualization};
pub use tunnel::{tunnel_rings, TunnelPhase, TunnelRing};

//! Two-dimensional Greeks surfaces.
//!
//! A surface is the evaluator applied to every cell of a [`SurfaceGrid`]:
//! two [`Axis`] values vary, the remaining market parameters stay fixed.
//! The two standard configurations are spot × volatility and spot × expiry.
//!
//! ## Orientation
//!
//! Arrays are shaped `(axis2.len(), axis1.len())`: rows follow axis 2 and
//! columns follow axis 1.

mod axis;
mod evaluation;
mod grid;
mod metric;

pub use axis::{Axis, AxisParameter, DAYS_PER_YEAR};
pub use evaluation::{EvaluationMode, GreeksSurface, DEFAULT_PARALLEL_THRESHOLD};
pub use grid::SurfaceGrid;
pub use metric::Metric;

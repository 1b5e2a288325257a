//! chartopts
//!
//! A chart options compiler: turns normalized chart data, the column roles chosen by the
//! user (data options) and a style record (design options) into a renderer-ready chart
//! configuration. Pairs with the `chartopts` CLI.
//!
//! ### Features
//! - Category axes with dual-level plot bands and continuous datetime gap filling
//! - Stacking-aware value axis extents reconciled with explicit bounds
//! - Series and category limits with non-fatal alerts
//! - Tiered color resolution (point, explicit map, color rules, palette)
//! - Cartesian, pie, funnel, treemap/sunburst, scatter/bubble, boxplot and range charts
//! - Preformatted, locale-aware tooltip text
//!
//! ### Example
//! ```
//! use chartopts::models::{Series, SeriesChartData, XValue};
//! use chartopts::{ChartData, ChartType, DataOptions, DefaultTranslator, DesignOptions};
//!
//! let data = ChartData::Categorical(SeriesChartData::new(
//!     vec![XValue::new(&["North"]), XValue::new(&["South"])],
//!     vec![Series::new("sales", &[60.0, 40.0])],
//! ));
//! let compiled = chartopts::compile(
//!     ChartType::Pie,
//!     &data,
//!     &DataOptions::default(),
//!     &DesignOptions::for_chart_type(ChartType::Pie),
//!     &DefaultTranslator,
//! )?;
//! println!("{}", serde_json::to_string_pretty(&compiled)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod axis;
pub mod chart;
pub mod color;
pub mod error;
pub mod format;
pub mod limits;
pub mod models;
pub mod options;
pub mod series;
pub mod style;
pub mod translate;

pub use chart::{ChartRequest, CompiledChart, compile, compile_request, compile_with_locale};
pub use error::CompileError;
pub use limits::Alert;
pub use models::{ChartData, ChartFamily, ChartType};
pub use options::{DataOptions, DesignOptions};
pub use translate::{DefaultTranslator, Translator};

//! Category axis layout and value axis extents.
//!
//! - [`layout`] turns x-values into ticks, an index map and plot bands
//! - [`continuous`] builds datetime ticks and fills calendar gaps
//! - [`extent`] computes stacking-aware min/max per axis side

pub mod continuous;
pub mod extent;
pub mod layout;

use serde::{Deserialize, Serialize};

pub use extent::{AxisExtent, ExtentRules, Stacking, auto_extent, finalize_extent, raw_extent};
pub use layout::build_layout;

/// One position on the category axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// A real category, indexing into the raw data arrays.
    Data(usize),
    /// Blank tick separating two plot bands.
    Separator,
    /// Synthesized tick on a continuous axis where the data had no row.
    Gap,
}

impl Tick {
    pub fn data_index(&self) -> Option<usize> {
        match self {
            Tick::Data(i) => Some(*i),
            Tick::Separator | Tick::Gap => None,
        }
    }
}

/// Labeled span of ticks sharing one secondary-axis value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotBand {
    pub text: String,
    pub from: f64,
    pub to: f64,
}

/// Category axis structure shared by the series builders of one chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisLayout {
    pub categories: Vec<String>,
    pub ticks: Vec<Tick>,
    pub plot_bands: Vec<PlotBand>,
    /// Timestamps (ms) per tick for a continuous datetime axis.
    pub tick_values: Option<Vec<f64>>,
}

impl AxisLayout {
    /// Raw data index per tick, `-1` for separators and synthesized ticks.
    pub fn index_map(&self) -> Vec<i64> {
        self.ticks
            .iter()
            .map(|t| t.data_index().map(|i| i as i64).unwrap_or(-1))
            .collect()
    }

    pub fn is_continuous(&self) -> bool {
        self.tick_values.is_some()
    }

    /// Tick position of raw data row `index`.
    pub fn position_of(&self, index: usize) -> Option<usize> {
        self.ticks.iter().position(|t| *t == Tick::Data(index))
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

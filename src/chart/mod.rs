//! Chart options assembly.
//!
//! [`compile`] checks that the chart type consumes the data family it was given,
//! hands the data to the family's series builder and merges the result with legend,
//! tooltip and plot options into one [`ChartOptions`] record.
//!
//! ```
//! use chartopts::{ChartData, ChartType, DataOptions, DefaultTranslator, DesignOptions};
//! use chartopts::models::{Series, SeriesChartData, XValue};
//!
//! let data = ChartData::Cartesian(SeriesChartData::new(
//!     vec![XValue::new(&["2023"]), XValue::new(&["2024"])],
//!     vec![Series::new("revenue", &[10.0, 12.5])],
//! ));
//! let compiled = chartopts::compile(
//!     ChartType::Column,
//!     &data,
//!     &DataOptions::default(),
//!     &DesignOptions::for_chart_type(ChartType::Column),
//!     &DefaultTranslator,
//! )?;
//! assert_eq!(compiled.options.chart.chart_type, "column");
//! assert!(compiled.alerts.is_empty());
//! # Ok::<(), chartopts::CompileError>(())
//! ```

pub mod axes;
pub mod legend;
pub mod plot_options;
pub mod tooltip;
pub mod types;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{CompileError, Result};
use crate::limits::Alert;
use crate::models::{ChartData, ChartType};
use crate::options::{DataOptions, DesignOptions};
use crate::series::cartesian::{build_cartesian, default_series_type};
use crate::series::{
    BuildContext, FamilyOutput, boxplot::build_boxplot, funnel::build_funnel,
    hierarchy::build_hierarchy, pie::build_pie, range::build_range, scatter::build_scatter,
    scatter::scatter_chart_type,
};
use crate::translate::Translator;

use legend::build_legend;
use plot_options::build_plot_options;
use types::{ChartOptions, ChartSection, TooltipOutput};

/// Locale used when the caller does not pick one.
pub const DEFAULT_LOCALE: &str = "en";

/// Renderer configuration plus the advisory alerts raised while building it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledChart {
    pub options: ChartOptions,
    pub alerts: Vec<Alert>,
}

/// Serialized compiler input, as read by the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRequest {
    pub chart_type: ChartType,
    pub data: ChartData,
    #[serde(default)]
    pub data_options: DataOptions,
    /// Factory defaults for `chart_type` when absent.
    #[serde(default)]
    pub design_options: Option<DesignOptions>,
    #[serde(default)]
    pub locale: Option<String>,
}

pub fn compile(
    chart_type: ChartType,
    data: &ChartData,
    data_options: &DataOptions,
    design: &DesignOptions,
    translator: &dyn Translator,
) -> Result<CompiledChart> {
    compile_with_locale(chart_type, data, data_options, design, translator, DEFAULT_LOCALE)
}

/// Like [`compile`], formatting tooltip numbers for `locale`.
pub fn compile_with_locale(
    chart_type: ChartType,
    data: &ChartData,
    data_options: &DataOptions,
    design: &DesignOptions,
    translator: &dyn Translator,
    locale: &str,
) -> Result<CompiledChart> {
    let family = data.family();
    if chart_type.family() != family {
        return Err(CompileError::UnexpectedChartType { chart_type, family });
    }
    debug!("compiling {chart_type} chart from {family} data");

    let ctx = BuildContext {
        chart_type,
        data_options,
        design,
        translator,
        locale,
    };
    let output = match data {
        ChartData::Cartesian(d) => build_cartesian(d, &ctx),
        ChartData::Categorical(d) => match chart_type {
            ChartType::Funnel => build_funnel(d, &ctx),
            ChartType::Treemap | ChartType::Sunburst => build_hierarchy(d, &ctx),
            _ => build_pie(d, &ctx),
        },
        ChartData::Scatter(d) => build_scatter(d, &ctx),
        ChartData::Boxplot(d) => build_boxplot(d, &ctx),
        ChartData::Range(d) => build_range(d, &ctx),
    };
    Ok(assemble(&ctx, output))
}

/// Compile a deserialized request with its own locale and design defaults.
pub fn compile_request(request: &ChartRequest, translator: &dyn Translator) -> Result<CompiledChart> {
    let design = request
        .design_options
        .clone()
        .unwrap_or_else(|| DesignOptions::for_chart_type(request.chart_type));
    compile_with_locale(
        request.chart_type,
        &request.data,
        &request.data_options,
        &design,
        translator,
        request.locale.as_deref().unwrap_or(DEFAULT_LOCALE),
    )
}

fn chart_section(ctx: &BuildContext) -> ChartSection {
    let chart_type = match ctx.chart_type {
        ChartType::Polar => default_series_type(ctx.chart_type, ctx.design),
        ChartType::Scatter => scatter_chart_type(ctx),
        other => other.as_str(),
    };
    ChartSection {
        chart_type: chart_type.to_string(),
        polar: ctx.chart_type == ChartType::Polar,
    }
}

fn assemble(ctx: &BuildContext, output: FamilyOutput) -> CompiledChart {
    let mut plot_options = build_plot_options(ctx.chart_type, ctx.design);
    plot_options.funnel = output.funnel.map(|g| g.plot_options());

    let options = ChartOptions {
        chart: chart_section(ctx),
        x_axis: output.x_axis,
        y_axis: output.y_axis,
        series: output.series,
        legend: build_legend(&ctx.design.legend),
        tooltip: TooltipOutput::default(),
        plot_options,
        drilldown: output.drilldown,
    };
    if !output.alerts.is_empty() {
        debug!("{} alert(s) raised", output.alerts.len());
    }
    CompiledChart {
        options,
        alerts: output.alerts,
    }
}

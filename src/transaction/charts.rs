//! Chart generation and rendering for the transaction summary view.
//!
//! Two ECharts visualizations are produced from a fetched summary:
//! - **Status Distribution**: pie chart of transactions per status
//! - **Monthly Trend**: bar/line chart of monthly totals and counts
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization
//! code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Tooltip, Trigger,
    },
    series::{Line, Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::html::HeadElement;

use super::aggregate::{StatusSlice, TrendPoint};

/// A summary chart with its HTML container ID and ECharts configuration.
pub(super) struct SummaryChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for the summary charts.
pub(super) fn charts_view(charts: &[SummaryChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for the summary charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[SummaryChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Builds the array of summary charts from render-ready data.
pub(super) fn build_summary_charts(
    slices: &[StatusSlice],
    trend_points: &[TrendPoint],
) -> [SummaryChart; 2] {
    [
        SummaryChart {
            id: "status-distribution-chart",
            options: status_distribution_chart(slices).to_string(),
        },
        SummaryChart {
            id: "monthly-trend-chart",
            options: monthly_trend_chart(trend_points).to_string(),
        },
    ]
}

fn status_distribution_chart(slices: &[StatusSlice]) -> Chart {
    let data: Vec<(f64, String)> = slices
        .iter()
        .map(|slice| (f64::from(slice.count), slice.status.label().to_owned()))
        .collect();

    Chart::new()
        .title(Title::new().text("Status Distribution"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().left("center").top("bottom"))
        .series(
            Pie::new()
                .name("Transactions")
                .radius("55%")
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(data),
        )
}

fn monthly_trend_chart(trend_points: &[TrendPoint]) -> Chart {
    let labels: Vec<String> = trend_points.iter().map(|point| point.month.clone()).collect();
    let amounts: Vec<f64> = trend_points.iter().map(|point| point.total_amount).collect();
    let counts: Vec<f64> = trend_points
        .iter()
        .map(|point| point.transaction_count)
        .collect();

    Chart::new()
        .title(Title::new().text("Monthly Trend"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(bar::Bar::new().name("Total Value").data(amounts))
        .series(Line::new().name("Transactions").data(counts))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod chart_tests {
    use crate::{
        format::TransactionStatus,
        transaction::aggregate::{StatusSlice, TrendPoint},
    };

    use super::{build_summary_charts, charts_view};

    fn test_slices() -> Vec<StatusSlice> {
        vec![
            StatusSlice {
                status: TransactionStatus::Completed,
                raw_label: "completed".to_owned(),
                count: 3,
                percentage: 75.0,
            },
            StatusSlice {
                status: TransactionStatus::Pending,
                raw_label: "pending".to_owned(),
                count: 1,
                percentage: 25.0,
            },
        ]
    }

    fn test_trend() -> Vec<TrendPoint> {
        vec![TrendPoint {
            month: "2024-03".to_owned(),
            transaction_count: 4.0,
            total_amount: 5200.0,
        }]
    }

    #[test]
    fn status_chart_options_are_valid_json() {
        let charts = build_summary_charts(&test_slices(), &test_trend());

        let options = serde_json::from_str::<serde_json::Value>(&charts[0].options)
            .expect("status chart options should serialize to valid JSON");

        assert!(options["series"][0]["data"].is_array());
    }

    #[test]
    fn trend_chart_options_embed_the_series_and_currency_formatter() {
        // The trend chart carries JavaScript formatter functions, so its
        // options are an ECharts object literal rather than strict JSON.
        let charts = build_summary_charts(&test_slices(), &test_trend());
        let options = &charts[1].options;

        assert!(options.contains("Total Value"));
        assert!(options.contains("Transactions"));
        assert!(options.contains("2024-03"));
        assert!(options.contains("currencyFormatter"));
    }

    #[test]
    fn charts_view_renders_a_container_per_chart() {
        let charts = build_summary_charts(&test_slices(), &test_trend());

        let rendered = charts_view(&charts).into_string();

        assert!(rendered.contains("id=\"status-distribution-chart\""));
        assert!(rendered.contains("id=\"monthly-trend-chart\""));
    }
}

//! Page Rendering
//!
//! [`render`] turns a [`NavigationState`] and the pipeline output into a
//! [`Page`] of ordered panels. It reads nothing else, so the same inputs
//! always produce the same page.

use analytics::{
    box_by_station, correlation_matrix, histogram, kernel_density, mean_by_calendar_month,
    mean_share_by_station, monthly_mean, pair_summary, scatter_by_station, station_counts,
    yearly_mean, BoxStats, CalendarMonthMean, CorrelationMatrix, DensityEstimate, Histogram,
    MonthlyMean, PairSummary, ScatterSeries, StationCount, StationShare, YearlyMean,
    DEFAULT_HISTOGRAM_BINS, DEFAULT_KDE_POINTS,
};
use pipeline::PipelineOutput;
use preprocessing::FillValue;
use serde::Serialize;
use std::fmt::Write;
use tide_data::{Column, Level};

use crate::navigation::{ModelPage, NavigationState, Section};

/// Columns shown in the pair grid
const PAIR_COLUMNS: [Column; 4] = [Column::Highest, Column::Lowest, Column::Mhw, Column::Msl];

/// Chart payload, tagged by chart type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ChartData {
    MonthlySeries(Vec<MonthlyMean>),
    YearlySeries(Vec<YearlyMean>),
    Seasonal(Vec<CalendarMonthMean>),
    Histogram(Histogram),
    BoxPlot(Vec<BoxStats>),
    Scatter(Vec<ScatterSeries>),
    PairGrid(PairSummary),
    Heatmap(CorrelationMatrix),
    Bar(Vec<StationCount>),
    Density(DensityEstimate),
    Pie(Vec<StationShare>),
}

/// One block of a page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Panel {
    Text {
        title: String,
        body: String,
        /// Rendered folded until opened
        collapsible: bool,
    },
    Chart {
        title: String,
        x_label: String,
        y_label: String,
        data: ChartData,
    },
}

impl Panel {
    pub fn title(&self) -> &str {
        match self {
            Panel::Text { title, .. } | Panel::Chart { title, .. } => title,
        }
    }
}

/// A rendered page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: String,
    pub section: Section,
    /// Set only on the models section
    pub model_page: Option<ModelPage>,
    pub panels: Vec<Panel>,
}

fn text(title: &str, body: impl Into<String>) -> Panel {
    Panel::Text {
        title: title.to_string(),
        body: body.into(),
        collapsible: false,
    }
}

fn collapsible(title: &str, body: impl Into<String>) -> Panel {
    Panel::Text {
        title: title.to_string(),
        body: body.into(),
        collapsible: true,
    }
}

fn chart(title: &str, x_label: &str, y_label: &str, data: ChartData) -> Panel {
    Panel::Chart {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        data,
    }
}

/// Render the page for a navigation state
pub fn render(nav: &NavigationState, output: &PipelineOutput) -> Page {
    let (title, model_page, panels) = match nav.section {
        Section::Introduction => (nav.section.title(), None, introduction()),
        Section::DataCollection => (nav.section.title(), None, data_collection(output)),
        Section::Visualizations => (nav.section.title(), None, visualizations(output)),
        Section::Models => (
            nav.model_page.title(),
            Some(nav.model_page),
            models(nav.model_page, output),
        ),
        Section::Conclusion => (nav.section.title(), None, conclusion(output)),
    };

    Page {
        title: title.to_string(),
        section: nav.section,
        model_page,
        panels,
    }
}

fn introduction() -> Vec<Panel> {
    vec![
        collapsible(
            "What drives sea level rise?",
            "Warming oceans expand, and meltwater from glaciers and ice sheets adds volume. \
             Together they account for most of the rise measured at coastal gauges.",
        ),
        collapsible(
            "What are the effects of sea level rise?",
            "Shorelines erode, salt water reaches freshwater aquifers and coastal wetlands are \
             submerged. Communities face flooding, relocation and rising adaptation costs.",
        ),
        collapsible(
            "Why analyse tide gauge records?",
            "Hourly water levels and tidal datums show both extreme events such as storm surges \
             and slow trends in mean sea level. Both inform infrastructure planning.",
        ),
        collapsible(
            "Questions explored",
            "1. How has mean sea level moved over the recorded years?\n\
             2. Which months carry the highest water levels?\n\
             3. How do extremes compare between stations?\n\
             4. How closely do the tidal datums move together?",
        ),
    ]
}

fn data_collection(output: &PipelineOutput) -> Vec<Panel> {
    let load = &output.load_report;

    let mut description = String::new();
    for level in Level::ALL {
        let _ = writeln!(description, "{}: {} (ft)", level.name(), describe_level(level));
    }
    description.push_str("Inf: optional quality flag");

    let mut loading = format!(
        "{} rows read, {} kept. {} rows had an unparseable date and time",
        load.rows_read, load.rows_kept, load.invalid_timestamps
    );
    if load.rows_dropped > 0 {
        loading.push_str(" and were dropped.");
    } else {
        loading.push('.');
    }

    let mut missing = String::from(
        "Numeric columns are filled with their column mean, categorical columns with their \
         most frequent value.\n",
    );
    for column in &output.imputation_report.columns {
        let fill = match &column.fill {
            FillValue::Mean(v) => format!("mean {:.3}", v),
            FillValue::Mode(v) => format!("mode {}", v),
        };
        let _ = writeln!(missing, "{}: {} cells, {}", column.column, column.imputed_cells, fill);
    }

    let mut scaling = format!(
        "Z-scores use the mean and standard deviation of the {} training rows only.\n",
        output.scaler.fitted_rows()
    );
    for &column in output.scaler.columns() {
        if let Some(params) = output.scaler.params(column) {
            let _ = writeln!(
                scaling,
                "{}: mean {:.3}, std {:.3}",
                column, params.mean, params.std_dev
            );
        }
    }
    for column in output.scaler.dropped() {
        let _ = writeln!(scaling, "{}: constant over training rows, not scaled", column);
    }

    let partitions = &output.partitions;
    let split = format!(
        "{} training, {} validation and {} test rows. Rows never appear in more than one \
         partition.",
        partitions.train().len(),
        partitions.validation().len(),
        partitions.test().len()
    );

    vec![
        text(
            "Overview",
            "Station records are loaded, cleaned, enriched with calendar features, split and \
             standardized before any chart is drawn.",
        ),
        collapsible("Dataset Description", description),
        collapsible("Loading", loading),
        collapsible("Handling Missing Values", missing),
        collapsible(
            "Feature Engineering",
            "Month, Day and Year come from the combined timestamp. The hour is encoded as \
             Sin_Hour = sin(2π·h/24) and Cos_Hour = cos(2π·h/24) so that 23:00 sits next to \
             00:00.",
        ),
        collapsible("Feature Scaling", scaling),
        collapsible("Splitting the Data", split),
    ]
}

fn describe_level(level: Level) -> &'static str {
    match level {
        Level::Highest => "highest level of the period",
        Level::Lowest => "lowest level of the period",
        Level::Mhhw => "mean of the higher daily high tides",
        Level::Mhw => "mean of all high tides",
        Level::Msl => "mean sea level",
        Level::Mtl => "midpoint of MHW and MLW",
        Level::Mlw => "mean of all low tides",
        Level::Mllw => "mean of the lower daily low tides",
    }
}

fn visualizations(output: &PipelineOutput) -> Vec<Panel> {
    let table = &output.table;

    let mut panels = vec![
        chart(
            "Average Highest Water Level by Month",
            "Year-Month",
            "Highest (ft)",
            ChartData::MonthlySeries(monthly_mean(table, Column::Highest)),
        ),
        chart(
            "Average Mean Tide Level by Month",
            "Year-Month",
            "MTL (ft)",
            ChartData::MonthlySeries(monthly_mean(table, Column::Mtl)),
        ),
        chart(
            "Distribution of Lowest Water Levels",
            "Lowest (ft)",
            "Count",
            ChartData::Histogram(histogram(&table.column(Column::Lowest), DEFAULT_HISTOGRAM_BINS)),
        ),
        chart(
            "Highest Levels by Station",
            "Station",
            "Highest (ft)",
            ChartData::BoxPlot(box_by_station(table, Column::Highest)),
        ),
        chart(
            "MSL against MHW",
            "MSL (ft)",
            "MHW (ft)",
            ChartData::Scatter(scatter_by_station(table, Column::Msl, Column::Mhw)),
        ),
        chart(
            "Selected Feature Relationships",
            "",
            "",
            ChartData::PairGrid(pair_summary(table, &PAIR_COLUMNS)),
        ),
        chart(
            "Correlation Heatmap",
            "",
            "",
            ChartData::Heatmap(correlation_matrix(table, &Column::ALL)),
        ),
        chart(
            "Observations per Station",
            "Station",
            "Count",
            ChartData::Bar(station_counts(table)),
        ),
    ];

    panels.push(match kernel_density(&table.column(Column::Mllw), DEFAULT_KDE_POINTS) {
        Some(kde) => chart("Density of MLLW", "MLLW (ft)", "Density", ChartData::Density(kde)),
        None => text("Density of MLLW", "Not enough distinct MLLW values to estimate a density."),
    });

    panels.push(chart(
        "Share of Average Mean Tide Level by Station",
        "",
        "",
        ChartData::Pie(mean_share_by_station(table, Column::Mtl)),
    ));

    panels
}

fn models(page: ModelPage, output: &PipelineOutput) -> Vec<Panel> {
    let table = &output.table;
    match page {
        ModelPage::Overview => {
            let mut body = String::from("Three questions are modelled, each on its own page:\n");
            for sub in &ModelPage::ALL[1..] {
                let _ = writeln!(body, "- {} ({})", sub.title(), sub.slug());
            }
            vec![text("Objectives", body)]
        }
        ModelPage::HighestTidalLevel => vec![
            text(
                "Objective",
                "Predict the highest water level of a period from the tidal datums and calendar \
                 features.",
            ),
            chart(
                "Average Highest Water Level by Month",
                "Year-Month",
                "Highest (ft)",
                ChartData::MonthlySeries(monthly_mean(table, Column::Highest)),
            ),
            chart(
                "Distribution of Highest Water Levels",
                "Highest (ft)",
                "Count",
                ChartData::Histogram(histogram(
                    &table.column(Column::Highest),
                    DEFAULT_HISTOGRAM_BINS,
                )),
            ),
        ],
        ModelPage::MeanSeaLevel => vec![
            text(
                "Objective",
                "Track and forecast mean sea level, the reference for long-term rise.",
            ),
            chart(
                "Yearly Mean Sea Level",
                "Year",
                "MSL (ft)",
                ChartData::YearlySeries(yearly_mean(table, Column::Msl)),
            ),
            chart(
                "Monthly Mean Sea Level",
                "Year-Month",
                "MSL (ft)",
                ChartData::MonthlySeries(monthly_mean(table, Column::Msl)),
            ),
        ],
        ModelPage::SeasonalTemporal => vec![
            text(
                "Objective",
                "Find the months and hours in which high water concentrates.",
            ),
            chart(
                "Average Highest Water Level by Calendar Month",
                "Month",
                "Highest (ft)",
                ChartData::Seasonal(mean_by_calendar_month(table, Column::Highest)),
            ),
        ],
    }
}

fn conclusion(output: &PipelineOutput) -> Vec<Panel> {
    let table = &output.table;
    let stations = table.stations();

    let mut findings = format!(
        "{} observations from {} station(s) were analysed",
        table.len(),
        stations.len()
    );
    let first = table.iter().map(|r| r.timestamp).min();
    let last = table.iter().map(|r| r.timestamp).max();
    if let (Some(first), Some(last)) = (first, last) {
        let _ = write!(
            findings,
            ", covering {} to {}",
            first.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        );
    }
    findings.push('.');

    let yearly = yearly_mean(table, Column::Msl);
    if let (Some(start), Some(end)) = (yearly.first(), yearly.last()) {
        if start.year != end.year {
            let _ = write!(
                findings,
                " Mean sea level moved {:+.3} ft between {} and {}.",
                end.mean - start.mean,
                start.year,
                end.year
            );
        }
    }

    let seasonal = mean_by_calendar_month(table, Column::Highest);
    if let Some(peak) = seasonal.iter().max_by(|a, b| a.mean.total_cmp(&b.mean)) {
        let _ = write!(
            findings,
            " Highest water levels peak in month {} on average.",
            peak.month
        );
    }

    vec![
        text("What did we find?", findings),
        collapsible(
            "Why do these insights matter?",
            "Trends in mean levels and seasonal peaks show where and when coastal flooding \
             risk grows.",
        ),
        collapsible(
            "How can this be used?",
            "Planners can time maintenance and defences around high-water months and compare \
             exposure between stations.",
        ),
        collapsible(
            "What comes next?",
            "Longer records and more stations would sharpen the trend estimates.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_output;

    fn titles(page: &Page) -> Vec<&str> {
        page.panels.iter().map(Panel::title).collect()
    }

    #[test]
    fn test_every_section_renders() {
        let output = sample_output();
        for section in Section::ALL {
            let page = render(&NavigationState::new(section), &output);
            assert_eq!(page.section, section);
            assert!(!page.panels.is_empty(), "{} is empty", section.title());
        }
        for sub in ModelPage::ALL {
            let page = render(&NavigationState::model(sub), &output);
            assert_eq!(page.model_page, Some(sub));
            assert_eq!(page.title, sub.title());
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let output = sample_output();
        let nav = NavigationState::new(Section::Visualizations);
        assert_eq!(render(&nav, &output), render(&nav, &output));
    }

    #[test]
    fn test_visualizations_follow_dashboard_order() {
        let page = render(&NavigationState::new(Section::Visualizations), &sample_output());
        assert_eq!(page.panels.len(), 10);
        assert_eq!(titles(&page)[0], "Average Highest Water Level by Month");
        assert_eq!(titles(&page)[9], "Share of Average Mean Tide Level by Station");
        match &page.panels[6] {
            Panel::Chart {
                data: ChartData::Heatmap(matrix),
                ..
            } => assert_eq!(matrix.columns.len(), 13),
            other => panic!("unexpected panel {:?}", other),
        }
        assert!(matches!(
            &page.panels[8],
            Panel::Chart {
                data: ChartData::Density(_),
                ..
            }
        ));
    }

    #[test]
    fn test_cleaning_page_reports_pipeline_numbers() {
        let output = sample_output();
        let page = render(&NavigationState::new(Section::DataCollection), &output);
        let split = page
            .panels
            .iter()
            .find(|p| p.title() == "Splitting the Data")
            .unwrap();
        match split {
            Panel::Text { body, collapsible, .. } => {
                assert!(*collapsible);
                assert!(body.starts_with(&format!(
                    "{} training",
                    output.partitions.train().len()
                )));
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn test_panels_serialize_with_tags() {
        let page = render(&NavigationState::model(ModelPage::MeanSeaLevel), &sample_output());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["section"], "models");
        assert_eq!(json["model_page"], "mean_sea_level");
        assert_eq!(json["panels"][0]["kind"], "text");
        assert_eq!(json["panels"][1]["kind"], "chart");
        assert_eq!(json["panels"][1]["data"]["type"], "yearly_series");
    }
}

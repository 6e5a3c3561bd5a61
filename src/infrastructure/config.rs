use serde::Deserialize;

/// Published link of the original survey responses sheet
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vSKwCflZovzD_0UAlLsDplKqWz2-WKs3agK-HaDQFmT6jx9RkkUAXNbUJvsD622uqUWTpXUTQ8XgILV/pub?output=csv";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub sheet: SheetSettings,
    pub questions: QuestionSettings,
    pub chart: ChartSettings,
    pub page: PageSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SheetSettings {
    pub url: String,
    pub timeout_secs: u64,
}

/// Half-open column range `[first_column, last_column)` holding the questions
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct QuestionSettings {
    pub first_column: usize,
    pub last_column: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    pub orientation: Orientation,
    pub label_wrap: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PageSettings {
    pub title: String,
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    build_config("config/dashboard")
}

/// Defaults, then the optional config file, then `PARETO__SECTION__KEY` env vars
fn build_config(file: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .set_default("server.addr", "0.0.0.0:8080")?
        .set_default("sheet.url", DEFAULT_SHEET_URL)?
        .set_default("sheet.timeout_secs", 30)?
        .set_default("questions.first_column", 1)?
        .set_default("questions.last_column", 8)?
        .set_default("chart.orientation", "vertical")?
        .set_default("chart.label_wrap", 18)?
        .set_default("page.title", "Pareto Charts")?
        .add_source(config::File::with_name(file).required(false))
        .add_source(config::Environment::with_prefix("PARETO").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

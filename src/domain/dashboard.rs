// Dashboard domain model
use super::pareto::ParetoSeries;
use super::tally::Tally;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub row_count: usize,
    pub loaded_at: DateTime<Utc>,
    pub panels: Vec<QuestionPanel>,
}

impl Dashboard {
    pub fn new(title: String, row_count: usize, panels: Vec<QuestionPanel>) -> Self {
        Self {
            title,
            row_count,
            loaded_at: Utc::now(),
            panels,
        }
    }

    /// Look up a panel by its 1-based question number
    pub fn panel(&self, number: usize) -> Option<&QuestionPanel> {
        self.panels.iter().find(|p| p.number == number)
    }
}

/// One survey question. `series` is `None` when nobody answered it.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionPanel {
    pub number: usize,
    pub column: String,
    pub title: String,
    pub tally: Tally,
    pub series: Option<ParetoSeries>,
}

impl QuestionPanel {
    pub fn new(number: usize, column: String, tally: Tally) -> Self {
        let title = format!("{}) {}", number, column);
        let series = ParetoSeries::from_tally(&tally);
        Self {
            number,
            column,
            title,
            tally,
            series,
        }
    }

    pub fn has_data(&self) -> bool {
        self.series.is_some()
    }
}

// Dashboard service - Use case for building the Pareto dashboard
use crate::application::sheet_source::{SheetError, SheetSource};
use crate::domain::dashboard::{Dashboard, QuestionPanel};
use crate::domain::tally::tally_multi_select;
use crate::infrastructure::config::QuestionSettings;
use std::sync::Arc;

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn SheetSource>,
    questions: QuestionSettings,
    title: String,
}

impl DashboardService {
    pub fn new(source: Arc<dyn SheetSource>, questions: QuestionSettings, title: String) -> Self {
        Self {
            source,
            questions,
            title,
        }
    }

    /// Load the sheet and build one panel per question column
    pub async fn build_dashboard(&self) -> Result<Dashboard, SheetError> {
        let table = self.source.load_table().await?;

        let headers = table.headers();
        let end = self.questions.last_column.min(headers.len());
        let start = self.questions.first_column.min(end);

        // Columns are addressed by position; header text may repeat
        let panels: Vec<QuestionPanel> = (start..end)
            .enumerate()
            .map(|(i, idx)| {
                let column = &headers[idx];
                let tally = tally_multi_select(&table, idx);
                tracing::debug!(
                    "Question {:?}: {} options, {} selections",
                    column,
                    tally.len(),
                    tally.total()
                );
                QuestionPanel::new(i + 1, column.clone(), tally)
            })
            .collect();

        tracing::info!(
            "Built dashboard with {} questions from {} responses",
            panels.len(),
            table.row_count()
        );

        Ok(Dashboard::new(self.title.clone(), table.row_count(), panels))
    }
}

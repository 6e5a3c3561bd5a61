// Google Sheets CSV repository implementation
use crate::application::sheet_source::{SheetError, SheetSource};
use crate::domain::survey::ResponseTable;
use crate::infrastructure::sheet_url::csv_export_url;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct GoogleSheetsRepository {
    client: reqwest::Client,
    sheet_url: String,
}

impl GoogleSheetsRepository {
    pub fn new(sheet_url: String, timeout: Duration) -> Result<Self, SheetError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, sheet_url })
    }

    async fn fetch_csv(&self, csv_url: &str) -> Result<String, SheetError> {
        let response = self.client.get(csv_url).send().await?;

        if !response.status().is_success() {
            return Err(SheetError::HttpStatus {
                status: response.status(),
                url: csv_url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl SheetSource for GoogleSheetsRepository {
    async fn load_table(&self) -> Result<ResponseTable, SheetError> {
        // Validate before touching the network
        let csv_url = csv_export_url(&self.sheet_url)?;

        tracing::debug!("Fetching spreadsheet CSV from {}", csv_url);
        let body = self.fetch_csv(&csv_url).await?;
        let table = parse_csv(&body)?;

        tracing::info!(
            "Loaded {} rows and {} columns from spreadsheet",
            table.row_count(),
            table.headers().len()
        );
        Ok(table)
    }
}

/// Parse CSV text with a header row. Short rows are allowed; missing cells
/// read as empty.
pub fn parse_csv(body: &str) -> Result<ResponseTable, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(ResponseTable::from_records(headers, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tally::tally_multi_select;

    #[test]
    fn test_parse_quoted_multi_select() {
        let body = "Carimbo,Serviços usados,Nota\n\
                    2024-01-01,\"Consulta, Exame\",5\n\
                    2024-01-02,,4\n\
                    2024-01-03,\"Exame\"\n";
        let table = parse_csv(body).unwrap();

        assert_eq!(table.headers(), ["Carimbo", "Serviços usados", "Nota"]);
        assert_eq!(table.row_count(), 3);

        let tally = tally_multi_select(&table, 1);
        assert_eq!(tally.get("Exame"), Some(2));
        assert_eq!(tally.get("Consulta"), Some(1));
        assert_eq!(tally_multi_select(&table, 2).total(), 2);
    }

    #[test]
    fn test_headers_are_kept_verbatim() {
        let body = "Carimbo, Nota ,Nota\n2024-01-01,5,\"Bom, Rápido\"\n";
        let table = parse_csv(body).unwrap();

        assert_eq!(table.headers(), ["Carimbo", " Nota ", "Nota"]);
        assert_eq!(table.column_index("Nota"), Some(2));
        assert_eq!(tally_multi_select(&table, 1).get("5"), Some(1));

        let tally = tally_multi_select(&table, 2);
        assert_eq!(tally.get("Bom"), Some(1));
        assert_eq!(tally.get("Rápido"), Some(1));
        assert_eq!(tally.get("5"), None);
    }

    #[test]
    fn test_parse_header_only() {
        let table = parse_csv("A,B\n").unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.headers().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_fetch() {
        let repo = GoogleSheetsRepository::new(
            "https://example.com/not-a-sheet".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        let err = repo.load_table().await.unwrap_err();
        assert!(matches!(err, SheetError::InvalidUrl(_)));
        assert!(err.to_string().starts_with("invalid URL"));
    }
}

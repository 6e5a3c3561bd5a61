// Google Sheets share link -> CSV export link
use crate::application::sheet_source::SheetError;

const PUBLISHED_MARKER: &str = "docs.google.com/spreadsheets/d/e/";
const SHARED_MARKER: &str = "docs.google.com/spreadsheets/d/";

/// Derive the CSV export URL for a published (`/d/e/<id>`) or shared
/// (`/d/<id>`) spreadsheet link.
pub fn csv_export_url(url: &str) -> Result<String, SheetError> {
    if url.contains(PUBLISHED_MARKER) {
        let published_id = segment_after(url, "/d/e/")
            .ok_or_else(|| SheetError::InvalidUrl(url.to_string()))?;
        Ok(format!(
            "https://docs.google.com/spreadsheets/d/e/{}/pub?output=csv",
            published_id
        ))
    } else if url.contains(SHARED_MARKER) {
        let sheet_id = segment_after(url, "/d/")
            .ok_or_else(|| SheetError::InvalidUrl(url.to_string()))?;
        Ok(format!(
            "https://docs.google.com/spreadsheets/d/{}/export?format=csv",
            sheet_id
        ))
    } else {
        Err(SheetError::InvalidUrl(url.to_string()))
    }
}

/// Path segment following the first `marker`, or `None` if it is empty
fn segment_after<'a>(url: &'a str, marker: &str) -> Option<&'a str> {
    let start = url.find(marker)? + marker.len();
    let rest = &url[start..];
    let segment = rest.split(['/', '?', '#']).next()?;
    (!segment.is_empty()).then_some(segment)
}

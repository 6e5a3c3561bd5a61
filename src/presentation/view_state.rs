// Per-session view toggles carried in the query string
use std::collections::BTreeSet;

/// Which charts the visitor has expanded (zoomed). Travels with each request
/// as `?expanded=1,3` instead of living in server state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    expanded: BTreeSet<usize>,
}

impl ViewState {
    /// Parse a comma-separated list of 1-based chart numbers; junk entries are ignored
    pub fn from_query(expanded: Option<&str>) -> Self {
        let expanded = expanded
            .unwrap_or_default()
            .split(',')
            .filter_map(|part| part.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .collect();
        Self { expanded }
    }

    pub fn is_expanded(&self, number: usize) -> bool {
        self.expanded.contains(&number)
    }

    /// The state after clicking the expand/collapse control of one chart
    pub fn toggled(&self, number: usize) -> Self {
        let mut expanded = self.expanded.clone();
        if !expanded.remove(&number) {
            expanded.insert(number);
        }
        Self { expanded }
    }

    /// Query string reproducing this state, starting with `?` (empty when nothing is expanded)
    pub fn to_query(&self) -> String {
        if self.expanded.is_empty() {
            return String::new();
        }
        let list: Vec<String> = self.expanded.iter().map(usize::to_string).collect();
        format!("?expanded={}", list.join(","))
    }
}

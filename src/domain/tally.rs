// Multi-select answer tally
use super::survey::ResponseTable;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TallyEntry {
    pub label: String,
    pub count: u64,
}

/// Option counts for one question, ordered by descending count.
/// Equal counts keep the order in which the labels were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    entries: Vec<TallyEntry>,
}

impl Tally {
    /// Count every comma-separated, trimmed fragment of each answer
    pub fn from_answers<'a, I>(answers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries: Vec<TallyEntry> = Vec::new();
        let mut positions: HashMap<&'a str, usize> = HashMap::new();

        for answer in answers {
            for option in answer.split(',').map(str::trim) {
                match positions.get(option) {
                    Some(&pos) => entries[pos].count += 1,
                    None => {
                        positions.insert(option, entries.len());
                        entries.push(TallyEntry {
                            label: option.to_string(),
                            count: 1,
                        });
                    }
                }
            }
        }

        // sort_by is stable, so ties stay in first-seen order
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries }
    }

    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.count)
    }
}

/// Tally the multi-select answers of the column at `column`
pub fn tally_multi_select(table: &ResponseTable, column: usize) -> Tally {
    Tally::from_answers(table.answers_at(column))
}

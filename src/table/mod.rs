// src/table/mod.rs
pub mod codec;
pub mod pagination;

pub use codec::{decode, encode};
pub use pagination::{PageWindow, Pager};

/// A decoded result table. Rows keep source order and always have exactly one
/// field per header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ParsedTable {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<RecordView<'_>> {
        self.rows.get(index).map(|fields| RecordView {
            headers: &self.headers,
            fields,
        })
    }

    /// Counts the distinct values of one column, in first-seen order. `None`
    /// when the table has no such column.
    pub fn value_counts(&self, header: &str) -> Option<Vec<(String, usize)>> {
        if !self.headers.iter().any(|h| h == header) {
            return None;
        }
        let mut counts: Vec<(String, usize)> = Vec::new();
        for index in 0..self.rows.len() {
            let Some(value) = self.record(index).and_then(|r| r.get(header)) else {
                continue;
            };
            match counts.iter().position(|(v, _)| v == value) {
                Some(i) => counts[i].1 += 1,
                None => counts.push((value.to_string(), 1)),
            }
        }
        Some(counts)
    }
}

/// Header-keyed view over one row.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    headers: &'a [String],
    fields: &'a [String],
}

impl<'a> RecordView<'a> {
    pub fn get(&self, header: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h == header)
            .and_then(|i| self.fields.get(i))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_counts_first_seen_order() {
        let table = decode("review,sentiment\na,Negative\nb,Positive\nc,Negative\nd,\n").unwrap();
        assert_eq!(
            table.value_counts("sentiment"),
            Some(vec![
                ("Negative".to_string(), 2),
                ("Positive".to_string(), 1),
                ("".to_string(), 1),
            ])
        );
        assert_eq!(table.value_counts("missing"), None);
    }

    #[test]
    fn test_record_view_lookup() {
        let table = decode("review,sentiment\ngood,Positive\n").unwrap();
        let record = table.record(0).unwrap();
        assert_eq!(record.get("review"), Some("good"));
        assert_eq!(record.get("other"), None);
        assert!(table.record(1).is_none());
    }
}

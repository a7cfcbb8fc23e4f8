// src/state/results_state.rs
use std::num::NonZeroUsize;

use log::{info, warn};

use crate::file::ExportArtifact;
use crate::state::transfer::{self, TransferEnvelope, TransferMiss};
use crate::table::{decode, PageWindow, Pager, ParsedTable};

/// Column the service writes its predicted label into.
pub const LABEL_COLUMN: &str = "sentiment";

#[derive(Debug)]
pub enum ResultsContent {
    Missing(TransferMiss),
    Unreadable { raw_table: String, reason: String },
    Loaded { raw_table: String, table: ParsedTable },
}

/// State of the results view for one mount. Built from the envelope the
/// navigation carried; never re-reads it.
#[derive(Debug)]
pub struct ResultsState {
    content: ResultsContent,
    pager: Pager,
    export_file_name: String,
}

impl ResultsState {
    pub fn mount(
        envelope: Option<TransferEnvelope>,
        page_size: NonZeroUsize,
        export_file_name: &str,
    ) -> Self {
        let mut envelope = envelope;
        let content = match transfer::receive(envelope.as_mut()) {
            Ok(raw_table) => match decode(&raw_table) {
                Ok(table) => {
                    info!(
                        "Results view mounted with {} rows x {} columns",
                        table.len(),
                        table.headers().len()
                    );
                    ResultsContent::Loaded { raw_table, table }
                }
                Err(e) => {
                    warn!("Results payload could not be decoded: {}", e);
                    ResultsContent::Unreadable {
                        raw_table,
                        reason: e.to_string(),
                    }
                }
            },
            Err(miss) => {
                info!("Results view mounted without data: {}", miss);
                ResultsContent::Missing(miss)
            }
        };

        let mut pager = Pager::new(page_size);
        if let ResultsContent::Loaded { table, .. } = &content {
            pager.set_record_count(table.len());
        }

        Self {
            content,
            pager,
            export_file_name: export_file_name.to_string(),
        }
    }

    pub fn content(&self) -> &ResultsContent {
        &self.content
    }

    pub fn table(&self) -> Option<&ParsedTable> {
        match &self.content {
            ResultsContent::Loaded { table, .. } => Some(table),
            _ => None,
        }
    }

    pub fn raw_table(&self) -> Option<&str> {
        match &self.content {
            ResultsContent::Loaded { raw_table, .. } | ResultsContent::Unreadable { raw_table, .. } => {
                Some(raw_table.as_str())
            }
            ResultsContent::Missing(_) => None,
        }
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn current_page(&self) -> Option<PageWindow<'_, Vec<String>>> {
        self.table().map(|t| self.pager.window(t.rows()))
    }

    pub fn next_page(&mut self) -> bool {
        self.pager.next()
    }

    pub fn previous_page(&mut self) -> bool {
        self.pager.previous()
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.pager.set_page_size(page_size);
    }

    /// Per-label row counts over the whole table, when it has a label column.
    pub fn label_summary(&self) -> Option<Vec<(String, usize)>> {
        self.table()?.value_counts(LABEL_COLUMN)
    }

    pub fn can_export(&self) -> bool {
        ExportArtifact::is_available(self.raw_table())
    }

    /// The full held table as a download, regardless of the visible page.
    pub fn export_artifact(&self) -> Option<ExportArtifact> {
        ExportArtifact::from_text(self.raw_table(), &self.export_file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::encode;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn raw_with_rows(n: usize) -> String {
        let mut raw = "review,sentiment\n".to_string();
        for i in 0..n {
            raw.push_str(&format!("\"review {}, ok\",Positive\n", i));
        }
        raw
    }

    #[test]
    fn test_mount_without_envelope() {
        let state = ResultsState::mount(None, size(10), "analysis_result.csv");
        assert!(matches!(state.content(), ResultsContent::Missing(TransferMiss::NotSent)));
        assert!(state.table().is_none());
        assert!(state.current_page().is_none());
        assert!(!state.can_export());
        assert!(state.export_artifact().is_none());
    }

    #[test]
    fn test_mount_with_consumed_envelope() {
        let mut envelope = TransferEnvelope::send(raw_with_rows(1));
        envelope.receive().unwrap();

        let state = ResultsState::mount(Some(envelope), size(10), "analysis_result.csv");
        assert!(matches!(
            state.content(),
            ResultsContent::Missing(TransferMiss::AlreadyConsumed)
        ));
    }

    #[test]
    fn test_mount_pages_through_table() {
        let raw = raw_with_rows(25);
        let mut state = ResultsState::mount(Some(TransferEnvelope::send(raw)), size(10), "out.csv");

        assert_eq!(state.table().unwrap().len(), 25);
        assert_eq!(state.current_page().unwrap().visible.len(), 10);
        assert!(state.next_page());
        assert!(state.next_page());
        assert_eq!(state.current_page().unwrap().visible.len(), 5);
        assert_eq!(state.current_page().unwrap().visible[0][0], "review 20, ok");
        assert!(!state.next_page());
        assert_eq!(state.pager().page_index(), 3);
    }

    #[test]
    fn test_export_is_full_table_not_page() {
        let raw = raw_with_rows(25);
        let mut state = ResultsState::mount(Some(TransferEnvelope::send(raw.clone())), size(10), "out.csv");
        state.next_page();

        let artifact = state.export_artifact().unwrap();
        assert_eq!(artifact.bytes(), raw.as_bytes());
        assert_eq!(artifact.file_name(), "out.csv");

        let exported = std::str::from_utf8(artifact.bytes()).unwrap();
        assert_eq!(&decode(exported).unwrap(), state.table().unwrap());
    }

    #[test]
    fn test_export_matches_displayed_table_after_reencode() {
        let state = ResultsState::mount(
            Some(TransferEnvelope::send("a,b\n1\n2,3,4\n".to_string())),
            size(10),
            "out.csv",
        );
        let table = state.table().unwrap();
        assert_eq!(decode(&encode(table).unwrap()).unwrap(), *table);
        assert!(state.can_export());
    }

    #[test]
    fn test_header_only_payload_is_empty_table() {
        let state = ResultsState::mount(
            Some(TransferEnvelope::send("review,sentiment\n".to_string())),
            size(10),
            "out.csv",
        );
        let table = state.table().unwrap();
        assert!(table.is_empty());
        assert_eq!(state.pager().total_pages(), 0);
        assert_eq!(state.current_page().unwrap().visible.len(), 0);
        assert!(state.can_export());
    }

    #[test]
    fn test_label_summary_counts_whole_table() {
        let raw = "review,sentiment\na,Positive\nb,Negative\nc,Positive\n".to_string();
        let state = ResultsState::mount(Some(TransferEnvelope::send(raw)), size(1), "out.csv");
        assert_eq!(
            state.label_summary(),
            Some(vec![("Positive".to_string(), 2), ("Negative".to_string(), 1)])
        );

        let state = ResultsState::mount(
            Some(TransferEnvelope::send("review\na\n".to_string())),
            size(1),
            "out.csv",
        );
        assert_eq!(state.label_summary(), None);
    }

    #[test]
    fn test_page_size_change_recovers_page() {
        let mut state = ResultsState::mount(Some(TransferEnvelope::send(raw_with_rows(25))), size(5), "out.csv");
        while state.next_page() {}
        assert_eq!(state.pager().page_index(), 5);

        state.set_page_size(size(10));
        assert_eq!(state.pager().page_index(), 3);
        assert_eq!(state.current_page().unwrap().visible.len(), 5);
    }
}

// src/state/transfer.rs
use log::debug;
use thiserror::Error;

/// Why the results view has nothing to show. Both cases are expected states,
/// not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransferMiss {
    #[error("No results were sent to this view")]
    NotSent,
    #[error("These results were already opened")]
    AlreadyConsumed,
}

/// One-shot carrier of a raw result table from the upload view to the results
/// view. Created when navigation starts, read once when the results view
/// mounts. Deliberately not `Clone`.
#[derive(Debug)]
pub struct TransferEnvelope {
    payload: Option<String>,
}

impl TransferEnvelope {
    pub fn send(raw_table: String) -> Self {
        debug!("Sealed transfer envelope ({} bytes)", raw_table.len());
        Self {
            payload: Some(raw_table),
        }
    }

    pub fn receive(&mut self) -> Result<String, TransferMiss> {
        self.payload.take().ok_or(TransferMiss::AlreadyConsumed)
    }
}

/// Receives from the envelope a navigation carried, if it carried one.
pub fn receive(envelope: Option<&mut TransferEnvelope>) -> Result<String, TransferMiss> {
    envelope.ok_or(TransferMiss::NotSent)?.receive()
}

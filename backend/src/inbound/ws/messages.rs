//! Frames pushed to change feed subscribers.

use serde::Serialize;

use crate::domain::ChangeEvent;

/// Server to client frame, tagged by `type`.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FeedFrame<'a> {
    /// A committed write.
    Change(&'a ChangeEvent),
    /// Events were dropped for this client; refetch current state.
    #[serde(rename_all = "camelCase")]
    Resync { missed: u64 },
}

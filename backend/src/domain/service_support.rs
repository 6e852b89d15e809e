//! Helpers shared by the front office services.

use std::collections::HashMap;

use crate::domain::ports::{GuestRepository, map_repository_error};
use crate::domain::{Error, Guest, GuestId, Reservation};

/// First guest on the stay that still exists.
pub(crate) async fn primary_guest<G>(guests: &G, ids: &[GuestId]) -> Result<Option<Guest>, Error>
where
    G: GuestRepository + ?Sized,
{
    for id in ids {
        if let Some(guest) = guests
            .find(id)
            .await
            .map_err(|err| map_repository_error("guest", err))?
        {
            return Ok(Some(guest));
        }
    }
    Ok(None)
}

/// Name lookup for resolving many stays against one guest snapshot.
pub(crate) struct GuestDirectory {
    names: HashMap<GuestId, String>,
}

impl GuestDirectory {
    pub(crate) fn new(guests: Vec<Guest>) -> Self {
        Self {
            names: guests.into_iter().map(|g| (g.id, g.name)).collect(),
        }
    }

    /// Name of the first resolvable guest on `stay`.
    pub(crate) fn primary_name(&self, stay: &Reservation) -> Option<String> {
        stay.guest_ids
            .iter()
            .find_map(|id| self.names.get(id))
            .cloned()
    }
}

use parking_lot::RwLock;

use crate::domain::Rsvp;

/// Every accepted response, in submission order. Lives for as long as the
/// server does; nothing is persisted.
///
/// actix runs one `App` per worker thread, so the list is shared through
/// `web::Data` (an `Arc`) and guarded by a lock rather than held per worker.
#[derive(Debug, Default)]
pub struct GuestList {
    responses: RwLock<Vec<Rsvp>>,
}

impl GuestList {
    pub fn new() -> Self { Self::default() }

    pub fn push(
        &self,
        rsvp: Rsvp,
    ) {
        self.responses.write().push(rsvp);
    }

    /// Copy of the current list; the lock is released before rendering
    pub fn snapshot(&self) -> Vec<Rsvp> { self.responses.read().clone() }

    pub fn len(&self) -> usize { self.responses.read().len() }

    pub fn is_empty(&self) -> bool { self.responses.read().is_empty() }
}

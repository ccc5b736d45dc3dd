//! Request tokens for discarding superseded responses.

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Token source for one kind of request.
///
/// Only the most recently issued token is current; issuing a new one or
/// calling [`InFlight::invalidate`] makes every earlier token stale.
#[derive(Debug, Default)]
pub struct InFlight {
    latest: u64,
}

impl InFlight {
    /// Issue a token for a new request.
    pub const fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    /// Whether `token` belongs to the latest request.
    #[must_use]
    pub const fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }

    /// Make every outstanding token stale.
    pub const fn invalidate(&mut self) {
        self.latest += 1;
    }
}

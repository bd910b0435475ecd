use std::fmt;

use tracing::debug;

/// Operation class of a remote request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Preview,
    Classify,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preview => write!(f, "Preview"),
            Self::Classify => write!(f, "Classification"),
        }
    }
}

/// Ticket identifying one issued request. Ids grow monotonically across both kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestToken {
    id: u64,
    kind: RequestKind,
}

impl RequestToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}

/// Single in-flight request discipline.
///
/// Issuing a token supersedes whatever was pending, of either kind. A
/// completion is applied only while its token is still the pending one.
#[derive(Debug, Default)]
pub struct RequestTracker {
    last_id: u64,
    pending: Option<RequestToken>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self, kind: RequestKind) -> RequestToken {
        self.last_id += 1;
        let token = RequestToken {
            id: self.last_id,
            kind,
        };
        if let Some(old) = self.pending.replace(token) {
            debug!(old = old.id, new = token.id, "Superseded pending {} request", old.kind);
        }
        token
    }

    /// True while `token` is the latest issued and nothing superseded it.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.pending == Some(token)
    }

    /// Retire `token` if it is current. Returns whether the result may be applied.
    pub fn complete(&mut self, token: RequestToken) -> bool {
        if self.is_current(token) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Invalidate any pending request (new selection, teardown).
    pub fn supersede_all(&mut self) {
        if let Some(old) = self.pending.take() {
            debug!(id = old.id, "Discarding pending {} request", old.kind);
        }
    }

    pub fn in_flight(&self) -> Option<RequestKind> {
        self.pending.map(|t| t.kind)
    }
}

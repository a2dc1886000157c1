/// Tappable scene assets, each owning one kind of interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Water squirter: shot sequence with splashes.
    Pichkari,
    /// Sweet: bite-mask erosion.
    Gujiya,
    /// Coloured powder: dust cloud.
    Gulal,
}

/// Proof of admission. Not `Clone`, so a ticket is released at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct SessionTicket {
    id: u64,
    kind: AssetKind,
}

impl SessionTicket {
    pub fn kind(&self) -> AssetKind {
        self.kind
    }
}

/// Admits at most one interaction at a time.
#[derive(Debug, Default)]
pub struct InteractionGate {
    active: Option<(u64, AssetKind)>,
    next_id: u64,
}

impl InteractionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit `kind` if nothing else is running.
    pub fn try_begin(&mut self, kind: AssetKind) -> Option<SessionTicket> {
        if let Some((_, busy)) = self.active {
            tracing::debug!(?kind, ?busy, "interaction rejected, gate busy");
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.active = Some((id, kind));
        Some(SessionTicket { id, kind })
    }

    /// Release the interaction `ticket` was issued for. Returns `false` for a
    /// ticket that no longer holds the gate.
    pub fn release(&mut self, ticket: SessionTicket) -> bool {
        match self.active {
            Some((id, _)) if id == ticket.id => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_kind(&self) -> Option<AssetKind> {
        self.active.map(|(_, kind)| kind)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/gate.rs"]
mod tests;

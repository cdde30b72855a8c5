//! Request ledger
//!
//! Every store operation takes a ticket when it starts. Tickets carry a
//! sequence number that only grows; the ledger remembers the latest one per
//! family and how many requests of each family are still in flight.

/// Groups of operations whose results overwrite the same state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationFamily {
    /// list, search, page changes, refreshes
    List,
    /// single order lookups
    Detail,
    Statistics,
    /// create, update, delete
    Mutate,
    Export,
}

impl OperationFamily {
    const COUNT: usize = 5;

    fn index(self) -> usize {
        match self {
            OperationFamily::List => 0,
            OperationFamily::Detail => 1,
            OperationFamily::Statistics => 2,
            OperationFamily::Mutate => 3,
            OperationFamily::Export => 4,
        }
    }

    /// Families whose results write session state; only the latest
    /// request of a guarded family may apply its result.
    pub fn is_guarded(self) -> bool {
        matches!(
            self,
            OperationFamily::List | OperationFamily::Detail | OperationFamily::Statistics
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub family: OperationFamily,
    pub seq: u64,
}

#[derive(Debug, Default)]
pub struct RequestLedger {
    last_seq: u64,
    latest: [u64; OperationFamily::COUNT],
    in_flight: [u32; OperationFamily::COUNT],
}

impl RequestLedger {
    pub fn issue(&mut self, family: OperationFamily) -> Ticket {
        self.last_seq += 1;
        let i = family.index();
        self.latest[i] = self.last_seq;
        self.in_flight[i] += 1;
        Ticket {
            family,
            seq: self.last_seq,
        }
    }

    /// Mark `ticket` settled. Returns whether its result may be applied.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        let i = ticket.family.index();
        self.in_flight[i] = self.in_flight[i].saturating_sub(1);
        !ticket.family.is_guarded() || self.latest[i] == ticket.seq
    }

    pub fn in_flight(&self, family: OperationFamily) -> u32 {
        self.in_flight[family.index()]
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.iter().all(|n| *n == 0)
    }
}

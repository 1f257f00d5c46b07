//! Console state: the two loaded collections, filters, aggregate counts, the
//! inspected record, and the event reducer that drives reloads.
//!
//! Everything here is pure and rendering-free so the approval semantics can
//! be tested without a terminal or a server. The TUI in `console.rs` is a
//! thin adapter over this state.

use std::time::{Duration, Instant};

use broker_api::{RecordStatus, ReviewAction, Transaction, TransactionKind, User};

/// How long a transient notice stays on screen.
pub const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Which collection panel has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Users,
    Transactions,
}

/// Aggregate counts over a full, unfiltered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusCounts {
    /// Tally statuses from an iterator of records.
    pub fn tally<I: IntoIterator<Item = RecordStatus>>(statuses: I) -> Self {
        let mut counts = Self::default();
        for s in statuses {
            match s {
                RecordStatus::Pending => counts.pending += 1,
                RecordStatus::Approved => counts.approved += 1,
                RecordStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }
}

/// Keep users whose status matches the filter; `None` passes everything.
pub fn filter_users(users: &[User], status: Option<RecordStatus>) -> Vec<&User> {
    users
        .iter()
        .filter(|u| status.is_none_or(|s| u.status == s))
        .collect()
}

/// Keep transactions matching the status and kind filters; `None` means no
/// constraint on that axis.
pub fn filter_transactions(
    txs: &[Transaction],
    status: Option<RecordStatus>,
    kind: Option<TransactionKind>,
) -> Vec<&Transaction> {
    txs.iter()
        .filter(|t| status.is_none_or(|s| t.status == s))
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .collect()
}

/// The record currently opened in the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inspected {
    User(i64),
    Transaction(i64),
}

/// Outcome of a load or mutation task, delivered to the console loop.
#[derive(Debug)]
pub enum ConsoleEvent {
    UsersLoaded(Result<Vec<User>, String>),
    TransactionsLoaded(Result<Vec<Transaction>, String>),
    ActionFinished {
        panel: Panel,
        result: Result<String, String>,
    },
}

/// A follow-up the loop must perform after applying an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ReloadUsers,
    ReloadTransactions,
}

/// A mutation ready to be dispatched to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingOp {
    ReviewUser { id: i64, action: ReviewAction },
    DeleteUser { id: i64 },
    ReviewTransaction { id: i64, action: ReviewAction },
}

/// A transient operator notice, auto-dismissed after [`NOTICE_TTL`].
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
    expires_at: Instant,
}

impl Notice {
    fn new(text: String, is_error: bool, now: Instant) -> Self {
        Self {
            text,
            is_error,
            expires_at: now + NOTICE_TTL,
        }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug)]
pub struct ConsoleState {
    /// Full user collection as last fetched; replaced wholesale on reload,
    /// never merged.
    pub users: Vec<User>,
    /// Full transaction collection, same discipline.
    pub transactions: Vec<Transaction>,
    /// Set when the last user load failed; the panel shows an error
    /// indicator while the previous collection is kept as last-known-good.
    pub users_error: Option<String>,
    pub transactions_error: Option<String>,

    pub panel: Panel,
    pub user_status_filter: Option<RecordStatus>,
    pub tx_status_filter: Option<RecordStatus>,
    pub tx_kind_filter: Option<TransactionKind>,
    pub user_cursor: usize,
    pub tx_cursor: usize,

    pub inspected: Option<Inspected>,
    /// User id awaiting delete confirmation.
    pub confirm_delete: Option<i64>,
    /// True while a review/delete request is outstanding. Mutating input is
    /// ignored until the completion event arrives, so a double keypress can
    /// never issue two concurrent requests for the same record.
    pub in_flight: bool,

    pub notice: Option<Notice>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleState {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            transactions: Vec::new(),
            users_error: None,
            transactions_error: None,
            panel: Panel::Users,
            user_status_filter: None,
            tx_status_filter: None,
            tx_kind_filter: None,
            user_cursor: 0,
            tx_cursor: 0,
            inspected: None,
            confirm_delete: None,
            in_flight: false,
            notice: None,
        }
    }

    // --- filters, counts, cursors ---

    pub fn filtered_users(&self) -> Vec<&User> {
        filter_users(&self.users, self.user_status_filter)
    }

    pub fn filtered_transactions(&self) -> Vec<&Transaction> {
        filter_transactions(&self.transactions, self.tx_status_filter, self.tx_kind_filter)
    }

    /// Counts over the full user collection, independent of the active
    /// filter. The header always reflects ground truth, not the visible view.
    pub fn user_counts(&self) -> StatusCounts {
        StatusCounts::tally(self.users.iter().map(|u| u.status))
    }

    pub fn transaction_counts(&self) -> StatusCounts {
        StatusCounts::tally(self.transactions.iter().map(|t| t.status))
    }

    pub fn switch_panel(&mut self) {
        self.panel = match self.panel {
            Panel::Users => Panel::Transactions,
            Panel::Transactions => Panel::Users,
        };
    }

    /// Cycle the focused panel's status filter:
    /// all -> pending -> approved -> rejected -> all.
    pub fn cycle_status_filter(&mut self) {
        let slot = match self.panel {
            Panel::Users => &mut self.user_status_filter,
            Panel::Transactions => &mut self.tx_status_filter,
        };
        *slot = match *slot {
            None => Some(RecordStatus::Pending),
            Some(RecordStatus::Pending) => Some(RecordStatus::Approved),
            Some(RecordStatus::Approved) => Some(RecordStatus::Rejected),
            Some(RecordStatus::Rejected) => None,
        };
        self.clamp_cursors();
    }

    /// Cycle the transaction kind filter: all -> deposit -> withdrawal -> all.
    /// No-op while the users panel has focus.
    pub fn cycle_kind_filter(&mut self) {
        if self.panel != Panel::Transactions {
            return;
        }
        self.tx_kind_filter = match self.tx_kind_filter {
            None => Some(TransactionKind::Deposit),
            Some(TransactionKind::Deposit) => Some(TransactionKind::Withdrawal),
            Some(TransactionKind::Withdrawal) => None,
        };
        self.clamp_cursors();
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let (cursor, len) = match self.panel {
            Panel::Users => {
                let len = self.filtered_users().len();
                (&mut self.user_cursor, len)
            }
            Panel::Transactions => {
                let len = self.filtered_transactions().len();
                (&mut self.tx_cursor, len)
            }
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        let next = cursor.saturating_add_signed(delta);
        *cursor = next.min(len - 1);
    }

    fn clamp_cursors(&mut self) {
        let users_len = self.filtered_users().len();
        let txs_len = self.filtered_transactions().len();
        self.user_cursor = self.user_cursor.min(users_len.saturating_sub(1));
        self.tx_cursor = self.tx_cursor.min(txs_len.saturating_sub(1));
    }

    // --- detail inspection ---

    /// Open the detail view for the record under the cursor. No network
    /// round-trip: the record comes from the already-loaded collection.
    pub fn open_details(&mut self) {
        self.inspected = match self.panel {
            Panel::Users => self
                .filtered_users()
                .get(self.user_cursor)
                .map(|u| Inspected::User(u.id)),
            Panel::Transactions => self
                .filtered_transactions()
                .get(self.tx_cursor)
                .map(|t| Inspected::Transaction(t.id)),
        };
    }

    /// Close the detail view. Clearing the inspected id is the guard the
    /// action handlers check before firing.
    pub fn close_details(&mut self) {
        self.inspected = None;
        self.confirm_delete = None;
    }

    pub fn inspected_user(&self) -> Option<&User> {
        match self.inspected {
            Some(Inspected::User(id)) => self.users.iter().find(|u| u.id == id),
            _ => None,
        }
    }

    pub fn inspected_transaction(&self) -> Option<&Transaction> {
        match self.inspected {
            Some(Inspected::Transaction(id)) => self.transactions.iter().find(|t| t.id == id),
            _ => None,
        }
    }

    /// Review actions are offered only while a record is pending; decisions
    /// are terminal and there is no reversal path.
    pub fn actions_visible(status: RecordStatus) -> bool {
        status == RecordStatus::Pending
    }

    // --- mutations ---

    /// The record a mutating keypress targets: the inspected record when the
    /// detail view is open, otherwise the row under the cursor.
    fn review_target(&self) -> Option<(Panel, i64, RecordStatus)> {
        if let Some(u) = self.inspected_user() {
            return Some((Panel::Users, u.id, u.status));
        }
        if let Some(t) = self.inspected_transaction() {
            return Some((Panel::Transactions, t.id, t.status));
        }
        match self.panel {
            Panel::Users => self
                .filtered_users()
                .get(self.user_cursor)
                .map(|u| (Panel::Users, u.id, u.status)),
            Panel::Transactions => self
                .filtered_transactions()
                .get(self.tx_cursor)
                .map(|t| (Panel::Transactions, t.id, t.status)),
        }
    }

    /// Start an approve/reject. Returns `None` when a request is already in
    /// flight, a delete confirmation is showing, nothing is targeted, or the
    /// target is not pending.
    pub fn begin_review(&mut self, action: ReviewAction) -> Option<PendingOp> {
        if self.in_flight || self.confirm_delete.is_some() {
            return None;
        }
        let (panel, id, status) = self.review_target()?;
        if !Self::actions_visible(status) {
            return None;
        }
        self.in_flight = true;
        Some(match panel {
            Panel::Users => PendingOp::ReviewUser { id, action },
            Panel::Transactions => PendingOp::ReviewTransaction { id, action },
        })
    }

    /// Arm the delete confirmation for the targeted user. Deletion only
    /// exists for users; returns the armed id.
    pub fn begin_delete(&mut self) -> Option<i64> {
        if self.in_flight {
            return None;
        }
        let id = match self.review_target()? {
            (Panel::Users, id, _) => id,
            _ => return None,
        };
        self.confirm_delete = Some(id);
        Some(id)
    }

    /// Fire the armed delete. The explicit confirmation step is required for
    /// the destructive action.
    pub fn confirm_pending_delete(&mut self) -> Option<PendingOp> {
        if self.in_flight {
            return None;
        }
        let id = self.confirm_delete.take()?;
        self.in_flight = true;
        Some(PendingOp::DeleteUser { id })
    }

    pub fn cancel_pending_delete(&mut self) {
        self.confirm_delete = None;
    }

    // --- reducer ---

    /// Apply a completed task's outcome. Returns the follow-up effect, if
    /// any; a successful mutation yields exactly one reload of the owning
    /// collection, a failed one yields nothing and leaves state untouched.
    pub fn apply(&mut self, event: ConsoleEvent, now: Instant) -> Option<Effect> {
        match event {
            ConsoleEvent::UsersLoaded(Ok(users)) => {
                self.users = users;
                self.users_error = None;
                self.after_collections_changed();
                None
            }
            ConsoleEvent::UsersLoaded(Err(e)) => {
                self.users_error = Some(e);
                None
            }
            ConsoleEvent::TransactionsLoaded(Ok(txs)) => {
                self.transactions = txs;
                self.transactions_error = None;
                self.after_collections_changed();
                None
            }
            ConsoleEvent::TransactionsLoaded(Err(e)) => {
                self.transactions_error = Some(e);
                None
            }
            ConsoleEvent::ActionFinished { panel, result } => {
                self.in_flight = false;
                match result {
                    Ok(msg) => {
                        self.notice = Some(Notice::new(msg, false, now));
                        self.close_details();
                        Some(match panel {
                            Panel::Users => Effect::ReloadUsers,
                            Panel::Transactions => Effect::ReloadTransactions,
                        })
                    }
                    Err(e) => {
                        self.notice = Some(Notice::new(e, true, now));
                        None
                    }
                }
            }
        }
    }

    /// Drop stale references after a wholesale collection replace.
    fn after_collections_changed(&mut self) {
        self.clamp_cursors();
        let gone = match self.inspected {
            Some(Inspected::User(id)) => !self.users.iter().any(|u| u.id == id),
            Some(Inspected::Transaction(id)) => !self.transactions.iter().any(|t| t.id == id),
            None => false,
        };
        if gone {
            self.inspected = None;
        }
        if let Some(id) = self.confirm_delete {
            if !self.users.iter().any(|u| u.id == id) {
                self.confirm_delete = None;
            }
        }
    }
}

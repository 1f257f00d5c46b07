//! Approvals console TUI using ratatui + crossterm.
//!
//! Two panels (users, transactions) over the loaded collections, a detail
//! view for the full KYC profile, and keyboard-driven approve/reject/delete.
//! All approval semantics live in [`crate::state`]; this module only renders
//! and translates keys into state calls.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use broker_api::{Broker, BrokerError, RecordStatus, ReviewAction, Transaction, User};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::client::create_session;
use crate::error::DeskError;
use crate::state::{ConsoleEvent, ConsoleState, Effect, Panel, PendingOp, StatusCounts};

/// Target render interval (10 FPS).
const RENDER_INTERVAL: Duration = Duration::from_millis(100);

/// Rows consumed by a panel's chrome (borders, counts line, separator).
const PANEL_CHROME_ROWS: usize = 4;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Run the approvals console.
///
/// Logs in, verifies the administrator capability, loads both collections,
/// then enters the render/input loop.
///
/// # Errors
///
/// Returns [`DeskError`] on login failure, a non-admin session, or terminal
/// setup failures.
pub async fn run_console(
    api_url: &str,
    email: &str,
    password: &str,
    cancel: CancellationToken,
) -> Result<(), DeskError> {
    let session = create_session(api_url, email, password).await?;
    session.require_admin()?;
    let api = session.api.clone();

    info!(operator = %session.email, "starting approvals console");

    let (tx, mut rx) = mpsc::unbounded_channel::<ConsoleEvent>();
    let mut state = ConsoleState::new();

    // Initial load of both collections, in parallel.
    spawn_user_load(api.clone(), tx.clone());
    spawn_transaction_load(api.clone(), tx.clone());

    // Set up terminal.
    enable_raw_mode().map_err(|_| DeskError::Terminal("failed to enable raw mode".into()))?;
    io::stdout()
        .execute(EnterAlternateScreen)
        .map_err(|_| DeskError::Terminal("failed to enter alternate screen".into()))?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
        .map_err(|_| DeskError::Terminal("failed to create terminal".into()))?;

    let mut render_interval = tokio::time::interval(RENDER_INTERVAL);

    // Main event loop.
    let mut quit = false;
    let result: Result<(), DeskError> = loop {
        if quit {
            break Ok(());
        }

        tokio::select! {
            // A load or mutation task finished.
            Some(event) = rx.recv() => {
                match state.apply(event, Instant::now()) {
                    Some(Effect::ReloadUsers) => spawn_user_load(api.clone(), tx.clone()),
                    Some(Effect::ReloadTransactions) => {
                        spawn_transaction_load(api.clone(), tx.clone());
                    }
                    None => {}
                }
            }

            // Render tick — also polls keyboard input.
            _ = render_interval.tick() => {
                while event::poll(Duration::ZERO).unwrap_or(false) {
                    if let Ok(Event::Key(key)) = event::read() {
                        if key.kind == KeyEventKind::Press
                            && handle_key(key.code, &mut state, &api, &tx)
                        {
                            quit = true;
                        }
                    }
                }

                if !quit {
                    let now = Instant::now();
                    let _ = terminal.draw(|frame| {
                        render_ui(frame, &state, &session.email, now);
                    });
                }
            }

            _ = cancel.cancelled() => {
                break Ok(());
            }
        }
    };

    restore_terminal(&mut terminal);

    result
}

// ---------------------------------------------------------------------------
// Background tasks
// ---------------------------------------------------------------------------

/// Spawn a fetch of the full user collection.
fn spawn_user_load(api: Arc<Broker>, tx: UnboundedSender<ConsoleEvent>) {
    tokio::spawn(async move {
        let result = api.list_users().await.map_err(describe);
        let _ = tx.send(ConsoleEvent::UsersLoaded(result));
    });
}

/// Spawn a fetch of the full transaction collection.
fn spawn_transaction_load(api: Arc<Broker>, tx: UnboundedSender<ConsoleEvent>) {
    tokio::spawn(async move {
        let result = api.list_transactions().await.map_err(describe);
        let _ = tx.send(ConsoleEvent::TransactionsLoaded(result));
    });
}

/// Spawn the API call for a mutation and report its outcome.
fn dispatch(op: PendingOp, api: Arc<Broker>, tx: UnboundedSender<ConsoleEvent>) {
    tokio::spawn(async move {
        let (panel, result) = match op {
            PendingOp::ReviewUser { id, action } => {
                let result = match api.review_user(id, action).await {
                    Ok(ack) if ack.success => {
                        Ok(ack
                            .message
                            .unwrap_or_else(|| format!("user {id} {}", past_tense(action))))
                    }
                    Ok(ack) => Err(ack.message.unwrap_or_else(|| "request refused".into())),
                    Err(e) => Err(describe(e)),
                };
                (Panel::Users, result)
            }
            PendingOp::DeleteUser { id } => {
                let result = match api.delete_user(id).await {
                    Ok(()) => Ok(format!("user {id} deleted")),
                    Err(e) => Err(describe(e)),
                };
                (Panel::Users, result)
            }
            PendingOp::ReviewTransaction { id, action } => {
                let result = match api.review_transaction(id, action).await {
                    Ok(ack) if ack.success => Ok(ack
                        .message
                        .unwrap_or_else(|| format!("transaction {id} {}", past_tense(action)))),
                    Ok(ack) => Err(ack.message.unwrap_or_else(|| "request refused".into())),
                    Err(e) => Err(describe(e)),
                };
                (Panel::Transactions, result)
            }
        };
        let _ = tx.send(ConsoleEvent::ActionFinished { panel, result });
    });
}

/// Operator-facing description of an API failure.
fn describe(e: BrokerError) -> String {
    match e {
        BrokerError::Api { message, .. } => message,
        other => format!("connection error: {other}"),
    }
}

fn past_tense(action: ReviewAction) -> &'static str {
    match action {
        ReviewAction::Approve => "approved",
        ReviewAction::Reject => "rejected",
    }
}

// ---------------------------------------------------------------------------
// Input handling
// ---------------------------------------------------------------------------

/// Translate a keypress into state calls. Returns true to quit.
fn handle_key(
    code: KeyCode,
    state: &mut ConsoleState,
    api: &Arc<Broker>,
    tx: &UnboundedSender<ConsoleEvent>,
) -> bool {
    // While the delete confirmation is showing, only y/n (and quit) work.
    if state.confirm_delete.is_some() {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let Some(op) = state.confirm_pending_delete() {
                    dispatch(op, api.clone(), tx.clone());
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => state.cancel_pending_delete(),
            KeyCode::Char('q') => return true,
            _ => {}
        }
        return false;
    }

    match code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => state.switch_panel(),
        KeyCode::Up | KeyCode::Char('k') => state.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => state.move_cursor(1),
        KeyCode::Char('s') => state.cycle_status_filter(),
        KeyCode::Char('t') => state.cycle_kind_filter(),
        KeyCode::Enter => state.open_details(),
        KeyCode::Esc => state.close_details(),
        KeyCode::Char('a') => {
            if let Some(op) = state.begin_review(ReviewAction::Approve) {
                dispatch(op, api.clone(), tx.clone());
            }
        }
        KeyCode::Char('x') => {
            if let Some(op) = state.begin_review(ReviewAction::Reject) {
                dispatch(op, api.clone(), tx.clone());
            }
        }
        KeyCode::Char('d') => {
            state.begin_delete();
        }
        KeyCode::Char('r') => {
            spawn_user_load(api.clone(), tx.clone());
            spawn_transaction_load(api.clone(), tx.clone());
        }
        _ => {}
    }
    false
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

/// Restore terminal to normal mode.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) {
    let _ = terminal.show_cursor();
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);
}

// ---------------------------------------------------------------------------
// UI rendering
// ---------------------------------------------------------------------------

/// Render the full TUI frame.
fn render_ui(frame: &mut Frame, state: &ConsoleState, operator: &str, now: Instant) {
    let area = frame.area();

    // Layout: header (3 rows), panels, notice line.
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(8),    // panels
            Constraint::Length(1), // notice
        ])
        .split(area);

    // Header.
    let header_text = format!(
        " APPROVALS CONSOLE - {operator} | tab panel  s status  t kind  \
         enter detail  a approve  x reject  d delete  r reload  q quit",
    );
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::White).bg(Color::Blue).bold())
        .alignment(Alignment::Center);
    frame.render_widget(header, main_layout[0]);

    // Panels: users | transactions.
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_layout[1]);

    render_users_panel(frame, panels[0], state);
    render_transactions_panel(frame, panels[1], state);
    render_notice(frame, main_layout[2], state, now);

    // Popups over everything else.
    if let Some(user) = state.inspected_user() {
        render_user_detail(frame, area, user);
    } else if let Some(txn) = state.inspected_transaction() {
        render_transaction_detail(frame, area, txn);
    }
    if let Some(id) = state.confirm_delete {
        render_confirm_delete(frame, area, id);
    }
}

/// Render the user collection panel.
fn render_users_panel(frame: &mut Frame, area: Rect, state: &ConsoleState) {
    let focused = state.panel == Panel::Users;
    let rows = state.filtered_users();
    let visible = (area.height as usize).saturating_sub(PANEL_CHROME_ROWS).max(1);
    let first = state.user_cursor.saturating_sub(visible - 1);

    let mut lines = counts_header(state.user_counts(), state.users_error.as_deref());
    if rows.is_empty() {
        lines.push(Line::styled(
            "  no records match the current filter",
            Style::default().fg(Color::DarkGray),
        ));
    }
    for (i, user) in rows.iter().enumerate().skip(first).take(visible) {
        let name = user.full_name.as_deref().unwrap_or("--");
        let text = format!(
            " {:>4}  {:<8}  {:<28}  {}",
            user.id, user.status, user.email, name,
        );
        lines.push(row_line(text, user.status, focused && i == state.user_cursor));
    }

    let title = match state.user_status_filter {
        Some(s) => format!(" Users [{s}] "),
        None => " Users ".to_string(),
    };
    frame.render_widget(panel_paragraph(lines, title, focused), area);
}

/// Render the transaction collection panel.
fn render_transactions_panel(frame: &mut Frame, area: Rect, state: &ConsoleState) {
    let focused = state.panel == Panel::Transactions;
    let rows = state.filtered_transactions();
    let visible = (area.height as usize).saturating_sub(PANEL_CHROME_ROWS).max(1);
    let first = state.tx_cursor.saturating_sub(visible - 1);

    let mut lines = counts_header(
        state.transaction_counts(),
        state.transactions_error.as_deref(),
    );
    if rows.is_empty() {
        lines.push(Line::styled(
            "  no records match the current filter",
            Style::default().fg(Color::DarkGray),
        ));
    }
    for (i, txn) in rows.iter().enumerate().skip(first).take(visible) {
        let text = format!(
            " {:>4}  {:<8}  {:<10}  {:>12.2}  user {}",
            txn.id, txn.status, txn.kind, txn.amount, txn.user_id,
        );
        lines.push(row_line(text, txn.status, focused && i == state.tx_cursor));
    }

    let mut title = String::from(" Transactions");
    if let Some(s) = state.tx_status_filter {
        title.push_str(&format!(" [{s}]"));
    }
    if let Some(k) = state.tx_kind_filter {
        title.push_str(&format!(" [{k}]"));
    }
    title.push(' ');
    frame.render_widget(panel_paragraph(lines, title, focused), area);
}

/// Counts line over the unfiltered collection, plus an error row when the
/// last load failed.
fn counts_header(counts: StatusCounts, error: Option<&str>) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::raw(" pending "),
            Span::styled(counts.pending.to_string(), Style::default().fg(Color::Yellow)),
            Span::raw("  approved "),
            Span::styled(counts.approved.to_string(), Style::default().fg(Color::Green)),
            Span::raw("  rejected "),
            Span::styled(counts.rejected.to_string(), Style::default().fg(Color::Red)),
        ]),
        Line::from(" ────────────────────────────────────────"),
    ];
    if let Some(e) = error {
        lines.push(Line::styled(
            format!(" load failed: {e} (showing last known data)"),
            Style::default().fg(Color::Red),
        ));
    }
    lines
}

fn row_line(text: String, status: RecordStatus, selected: bool) -> Line<'static> {
    let mut style = Style::default().fg(status_color(status));
    if selected {
        style = style.bg(Color::DarkGray).bold();
    }
    Line::styled(text, style)
}

fn status_color(status: RecordStatus) -> Color {
    match status {
        RecordStatus::Pending => Color::Yellow,
        RecordStatus::Approved => Color::Green,
        RecordStatus::Rejected => Color::Red,
    }
}

fn panel_paragraph(lines: Vec<Line<'static>>, title: String, focused: bool) -> Paragraph<'static> {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);
    Paragraph::new(lines).block(block)
}

/// Render the transient notice line.
fn render_notice(frame: &mut Frame, area: Rect, state: &ConsoleState, now: Instant) {
    let Some(notice) = state.notice.as_ref().filter(|n| n.is_visible(now)) else {
        return;
    };
    let color = if notice.is_error {
        Color::Red
    } else {
        Color::Green
    };
    let line = Paragraph::new(format!(" {}", notice.text)).style(Style::default().fg(color));
    frame.render_widget(line, area);
}

// ---------------------------------------------------------------------------
// Detail and confirmation popups
// ---------------------------------------------------------------------------

/// Render the full KYC profile of the inspected user.
fn render_user_detail(frame: &mut Frame, area: Rect, user: &User) {
    let popup = centered_rect(area, 70, 90);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        kv("email", &user.email),
        kv("status", &user.status.to_string()),
        kv("admin", if user.is_admin { "yes" } else { "no" }),
        Line::from(""),
        section(" Personal"),
        kv("full name", opt(&user.full_name)),
        kv("date of birth", opt(&user.date_of_birth)),
        kv("gender", opt(&user.gender)),
        kv("nationality", opt(&user.nationality)),
        kv("naturalness", opt(&user.naturalness)),
        kv("cpf", opt(&user.cpf)),
        Line::from(""),
        section(" Documents"),
        kv("rg/cnh front", opt(&user.rg_cnh_front)),
        kv("rg/cnh back", opt(&user.rg_cnh_back)),
        kv("selfie with doc", opt(&user.selfie_with_doc)),
        kv("proof of residence", opt(&user.proof_of_residence)),
        Line::from(""),
        section(" Financial"),
        kv("occupation", opt(&user.occupation)),
        kv("company", opt(&user.company_name)),
        kv("monthly income", &opt_amount(user.monthly_income)),
        kv("estimated wealth", &opt_amount(user.estimated_wealth)),
        kv("source of income", opt(&user.source_of_income)),
        kv(
            "licit resources",
            yes_no(user.licit_resources_declaration),
        ),
        Line::from(""),
        section(" Bank"),
        kv("bank", opt(&user.bank_name)),
        kv("agency", opt(&user.bank_agency)),
        kv("account", opt(&user.bank_account)),
        kv("account type", opt(&user.account_type)),
        kv("ownership", opt(&user.account_ownership)),
        Line::from(""),
        section(" Investor profile"),
        kv("objective", opt(&user.investment_objective)),
        kv("risk tolerance", opt(&user.risk_tolerance)),
        kv("knowledge", opt(&user.investment_knowledge)),
        kv("investment types", opt(&user.investment_types)),
        Line::from(""),
        section(" Consents"),
        kv("terms of use", yes_no(user.terms_of_use_accepted)),
        kv("privacy policy", yes_no(user.privacy_policy_accepted)),
        kv("lgpd", yes_no(user.lgpd_accepted)),
        kv("marketing", yes_no(user.marketing_consent)),
        Line::from(""),
    ];
    lines.push(footer_hint(user.status, true));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" User {} ", user.id));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

/// Render the inspected transaction.
fn render_transaction_detail(frame: &mut Frame, area: Rect, txn: &Transaction) {
    let popup = centered_rect(area, 50, 45);
    frame.render_widget(Clear, popup);

    let lines = vec![
        kv("user", &txn.user_id.to_string()),
        kv("kind", &txn.kind.to_string()),
        kv("amount", &format!("{:.2}", txn.amount)),
        kv("status", &txn.status.to_string()),
        kv("requested", &short_date(&txn.request_date)),
        kv("decided", &short_date(&txn.approval_date)),
        Line::from(""),
        footer_hint(txn.status, false),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Transaction {} ", txn.id));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Render the delete confirmation popup.
fn render_confirm_delete(frame: &mut Frame, area: Rect, id: i64) {
    let popup = centered_rect(area, 40, 12);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from(""),
        Line::from(format!(" Delete user {id} and their transactions?")),
        Line::from(" This cannot be undone."),
        Line::from(""),
        Line::styled(" y confirm   n cancel", Style::default().fg(Color::DarkGray)),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Confirm delete ");
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Key hint at the bottom of a detail view. Review actions only exist while
/// the record is pending.
fn footer_hint(status: RecordStatus, deletable: bool) -> Line<'static> {
    let mut hint = String::from(" esc close");
    if ConsoleState::actions_visible(status) {
        hint.push_str("   a approve   x reject");
    }
    if deletable {
        hint.push_str("   d delete");
    }
    Line::styled(hint, Style::default().fg(Color::DarkGray))
}

fn section(title: &'static str) -> Line<'static> {
    Line::styled(title, Style::default().fg(Color::Cyan).bold())
}

fn kv(label: &'static str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {label:<20}"),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(value.to_string()),
    ])
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("--")
}

/// Shorten a server ISO-8601 timestamp for display; falls back to the raw
/// string when it does not parse.
fn short_date(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(s) => chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|_| s.to_string()),
        None => "--".to_string(),
    }
}

fn opt_amount(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "--".to_string(),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// A centered rect taking the given percentage of width and height.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

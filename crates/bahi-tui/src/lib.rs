// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use bahi_app::{
    AppCommand, AppEvent, AppMode, AppState, BILL_NOT_FOUND, Bill, BillField, BillFormInput,
    BillId, CLOUD_SAVE_NOTICE, DispatchOutcome, EMPTY_BILLS_PLACEHOLDER, SmsDraft, Theme,
    format_local,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::UtcOffset;

const COLUMN_TITLES: [&str; 5] = ["Customer", "Item", "Amount", "Date", "Actions"];
const ROW_ACTIONS: &str = "SMS PDF Edit Delete";
const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);

/// Everything the view needs from the outside world.
pub trait AppRuntime {
    fn shop_name(&self) -> &str;
    fn local_offset(&self) -> UtcOffset;
    fn load_bills(&mut self) -> Result<Vec<Bill>>;
    fn find_bill(&mut self, id: BillId) -> Result<Option<Bill>>;
    fn submit_bill(&mut self, form: &BillFormInput) -> Result<BillId>;
    /// Pre-fills the form and drops the bill from storage.
    fn begin_edit(&mut self, id: BillId) -> Result<Option<BillFormInput>>;
    fn delete_bill(&mut self, id: BillId) -> Result<bool>;
    fn compose_sms(&mut self, id: BillId) -> Result<Option<SmsDraft>>;
    fn send_sms(&mut self, draft: &SmsDraft) -> DispatchOutcome;
    fn save_theme(&mut self, theme: Theme) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq)]
struct ViewData {
    shop_name: String,
    offset: UtcOffset,
    bills: Vec<Bill>,
    selected: usize,
    help_visible: bool,
    status_token: u64,
}

impl Default for ViewData {
    fn default() -> Self {
        Self {
            shop_name: String::new(),
            offset: UtcOffset::UTC,
            bills: Vec::new(),
            selected: 0,
            help_visible: false,
            status_token: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    base: Style,
    border: Style,
    header: Style,
    selected: Style,
    muted: Style,
    status: Style,
    accent: Style,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                base: Style::default().fg(Color::Black).bg(Color::White),
                border: Style::default().fg(Color::Gray).bg(Color::White),
                header: Style::default()
                    .fg(Color::Blue)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
                selected: Style::default().fg(Color::Black).bg(Color::LightCyan),
                muted: Style::default().fg(Color::DarkGray).bg(Color::White),
                status: Style::default().fg(Color::Magenta).bg(Color::White),
                accent: Style::default()
                    .fg(Color::Blue)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            },
            Theme::Dark => Self {
                base: Style::default().fg(Color::White).bg(Color::Black),
                border: Style::default().fg(Color::DarkGray).bg(Color::Black),
                header: Style::default()
                    .fg(Color::Cyan)
                    .bg(Color::Black)
                    .add_modifier(Modifier::BOLD),
                selected: Style::default().fg(Color::White).bg(Color::DarkGray),
                muted: Style::default().fg(Color::Gray).bg(Color::Black),
                status: Style::default().fg(Color::Yellow).bg(Color::Black),
                accent: Style::default()
                    .fg(Color::Cyan)
                    .bg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            },
        }
    }
}

pub fn run_app<R: AppRuntime>(state: &mut AppState, runtime: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData {
        shop_name: runtime.shop_name().to_owned(),
        offset: runtime.local_offset(),
        ..ViewData::default()
    };
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_view_data(runtime, &mut view_data) {
        emit_status(
            state,
            &mut view_data,
            &internal_tx,
            format!("load failed: {error:#}"),
        );
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn refresh_view_data<R: AppRuntime>(runtime: &mut R, view_data: &mut ViewData) -> Result<()> {
    view_data.bills = runtime.load_bills()?;
    view_data.selected = view_data
        .selected
        .min(view_data.bills.len().saturating_sub(1));
    Ok(())
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    dispatch(
        state,
        view_data,
        internal_tx,
        AppCommand::SetStatus(message.into()),
    );
}

/// Dispatches and arms the auto-clear timer whenever the status line changed.
fn dispatch(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let events = state.dispatch(command);
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::StatusUpdated(_)))
    {
        view_data.status_token = view_data.status_token.saturating_add(1);
        schedule_status_clear(internal_tx, view_data.status_token);
    }
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    match state.mode {
        AppMode::Nav => return handle_nav_key(state, runtime, view_data, internal_tx, key),
        AppMode::Form => handle_form_key(state, runtime, view_data, internal_tx, key),
        AppMode::ConfirmDelete(id) => {
            handle_confirm_key(state, runtime, view_data, internal_tx, id, key);
        }
        AppMode::SmsPreview => handle_sms_key(state, runtime, view_data, internal_tx, key),
    }
    false
}

fn handle_nav_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => move_selection(view_data, 1),
        KeyCode::Char('k') | KeyCode::Up => move_selection(view_data, -1),
        KeyCode::Char('g') | KeyCode::Home => view_data.selected = 0,
        KeyCode::Char('G') | KeyCode::End => {
            view_data.selected = view_data.bills.len().saturating_sub(1);
        }
        KeyCode::Char('a') => dispatch(state, view_data, internal_tx, AppCommand::OpenForm),
        KeyCode::Char('?') => view_data.help_visible = true,
        KeyCode::Char('t') => toggle_theme(state, runtime, view_data, internal_tx),
        KeyCode::Char('c') => emit_status(state, view_data, internal_tx, CLOUD_SAVE_NOTICE),
        KeyCode::Char(action @ ('e' | 'd' | 's' | 'p')) => {
            let Some(id) = selected_bill_id(view_data) else {
                emit_status(state, view_data, internal_tx, "no bill selected");
                return false;
            };
            match action {
                'e' => edit_bill(state, runtime, view_data, internal_tx, id),
                'd' => request_delete(state, runtime, view_data, internal_tx, id),
                's' => show_sms(state, runtime, view_data, internal_tx, id),
                _ => show_pdf(state, runtime, view_data, internal_tx, id),
            }
        }
        _ => {}
    }
    false
}

fn handle_form_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => {
            dispatch(state, view_data, internal_tx, AppCommand::CloseForm);
        }
        KeyCode::Enter => submit_form(state, runtime, view_data, internal_tx),
        KeyCode::Char('s') if ctrl => submit_form(state, runtime, view_data, internal_tx),
        KeyCode::Char('r') if ctrl => {
            dispatch(state, view_data, internal_tx, AppCommand::ResetForm);
            emit_status(state, view_data, internal_tx, "form reset");
        }
        KeyCode::Tab | KeyCode::Down => {
            dispatch(state, view_data, internal_tx, AppCommand::NextField);
        }
        KeyCode::BackTab | KeyCode::Up => {
            dispatch(state, view_data, internal_tx, AppCommand::PrevField);
        }
        KeyCode::Backspace => {
            state.form.field_mut(state.focus).pop();
        }
        KeyCode::Char(ch) if !ctrl => state.form.field_mut(state.focus).push(ch),
        _ => {}
    }
}

fn handle_confirm_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    id: BillId,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            dispatch(state, view_data, internal_tx, AppCommand::DeleteConfirmed);
            match runtime.delete_bill(id) {
                Ok(true) => {
                    reload(state, runtime, view_data, internal_tx);
                    emit_status(state, view_data, internal_tx, "bill deleted");
                }
                Ok(false) => emit_status(state, view_data, internal_tx, BILL_NOT_FOUND),
                Err(error) => emit_status(
                    state,
                    view_data,
                    internal_tx,
                    format!("delete failed: {error:#}"),
                ),
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            dispatch(state, view_data, internal_tx, AppCommand::CancelDelete);
        }
        _ => {}
    }
}

fn handle_sms_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('o') => {
            let Some(draft) = state.sms_draft.clone() else {
                dispatch(state, view_data, internal_tx, AppCommand::CloseSms);
                return;
            };
            let outcome = runtime.send_sms(&draft);
            dispatch(state, view_data, internal_tx, AppCommand::CloseSms);
            emit_status(state, view_data, internal_tx, outcome.notice());
        }
        KeyCode::Esc => dispatch(state, view_data, internal_tx, AppCommand::CloseSms),
        _ => {}
    }
}

fn submit_form<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    match runtime.submit_bill(&state.form) {
        Ok(_) => {
            dispatch(state, view_data, internal_tx, AppCommand::FormSubmitted);
            reload(state, runtime, view_data, internal_tx);
            view_data.selected = view_data.bills.len().saturating_sub(1);
        }
        Err(error) => emit_status(
            state,
            view_data,
            internal_tx,
            format!("save failed: {error:#}"),
        ),
    }
}

fn edit_bill<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    id: BillId,
) {
    match runtime.begin_edit(id) {
        Ok(Some(form)) => {
            dispatch(state, view_data, internal_tx, AppCommand::OpenFormWith(form));
            reload(state, runtime, view_data, internal_tx);
        }
        Ok(None) => emit_status(state, view_data, internal_tx, BILL_NOT_FOUND),
        Err(error) => emit_status(
            state,
            view_data,
            internal_tx,
            format!("edit failed: {error:#}"),
        ),
    }
}

fn request_delete<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    id: BillId,
) {
    match runtime.find_bill(id) {
        Ok(Some(_)) => dispatch(state, view_data, internal_tx, AppCommand::RequestDelete(id)),
        Ok(None) => emit_status(state, view_data, internal_tx, BILL_NOT_FOUND),
        Err(error) => emit_status(
            state,
            view_data,
            internal_tx,
            format!("delete failed: {error:#}"),
        ),
    }
}

fn show_sms<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    id: BillId,
) {
    match runtime.compose_sms(id) {
        Ok(Some(draft)) => dispatch(state, view_data, internal_tx, AppCommand::ShowSms(draft)),
        Ok(None) => emit_status(state, view_data, internal_tx, BILL_NOT_FOUND),
        Err(error) => emit_status(
            state,
            view_data,
            internal_tx,
            format!("sms failed: {error:#}"),
        ),
    }
}

fn show_pdf<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    id: BillId,
) {
    let message = match runtime.find_bill(id) {
        Ok(Some(bill)) => bill.pdf_notice(),
        Ok(None) => BILL_NOT_FOUND.to_owned(),
        Err(error) => format!("pdf failed: {error:#}"),
    };
    emit_status(state, view_data, internal_tx, message);
}

fn toggle_theme<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    dispatch(state, view_data, internal_tx, AppCommand::ToggleTheme);
    if let Err(error) = runtime.save_theme(state.theme) {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("theme save failed: {error:#}"),
        );
    }
}

fn reload<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    if let Err(error) = refresh_view_data(runtime, view_data) {
        emit_status(
            state,
            view_data,
            internal_tx,
            format!("load failed: {error:#}"),
        );
    }
}

fn move_selection(view_data: &mut ViewData, delta: isize) {
    if view_data.bills.is_empty() {
        view_data.selected = 0;
        return;
    }
    let last = view_data.bills.len() - 1;
    view_data.selected = view_data.selected.saturating_add_signed(delta).min(last);
}

fn selected_bill_id(view_data: &ViewData) -> Option<BillId> {
    view_data.bills.get(view_data.selected).map(|bill| bill.id)
}

/// Drops control characters so stored text cannot drive the terminal.
fn display_text(raw: &str) -> String {
    raw.chars().filter(|ch| !ch.is_control()).collect()
}

fn bill_row_cells(bill: &Bill, offset: UtcOffset) -> [String; 5] {
    [
        format!(
            "{}\n{} • {}",
            display_text(&bill.name),
            display_text(&bill.mobile),
            display_text(&bill.location)
        ),
        display_text(&bill.product),
        format!("{}\n{}", bill.amount_label(), bill.gst_label()),
        format_local(bill.datetime, offset),
        ROW_ACTIONS.to_owned(),
    ]
}

fn table_rows(bills: &[Bill], offset: UtcOffset) -> Vec<[String; 5]> {
    bills
        .iter()
        .map(|bill| bill_row_cells(bill, offset))
        .collect()
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let palette = Palette::for_theme(state.theme);
    frame.render_widget(Block::default().style(palette.base), frame.area());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(header_text(state, view_data))
        .style(palette.accent)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border)
                .title(display_text(&view_data.shop_name)),
        );
    frame.render_widget(header, layout[0]);

    render_table(frame, layout[1], view_data, &palette);

    let status = Paragraph::new(status_text(state, view_data))
        .style(palette.status)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border),
        );
    frame.render_widget(status, layout[2]);

    match state.mode {
        AppMode::Nav => {}
        AppMode::Form => {
            let area = centered_rect(70, 60, frame.area());
            render_overlay(frame, area, "bill", render_form_text(state), &palette);
        }
        AppMode::ConfirmDelete(id) => {
            let area = centered_rect(50, 30, frame.area());
            render_overlay(
                frame,
                area,
                "delete",
                render_confirm_text(view_data, id),
                &palette,
            );
        }
        AppMode::SmsPreview => {
            let area = centered_rect(70, 60, frame.area());
            let text = state
                .sms_draft
                .as_ref()
                .map(render_sms_text)
                .unwrap_or_default();
            render_overlay(frame, area, "sms", text, &palette);
        }
    }

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        render_overlay(frame, area, "help", help_overlay_text().to_owned(), &palette);
    }
}

fn render_overlay(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    title: &str,
    text: String,
    palette: &Palette,
) {
    frame.render_widget(Clear, area);
    let overlay = Paragraph::new(text)
        .style(palette.base)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title.to_owned())
                .borders(Borders::ALL)
                .border_style(palette.accent),
        );
    frame.render_widget(overlay, area);
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    view_data: &ViewData,
    palette: &Palette,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border)
        .title(format!("unpaid bills ({})", view_data.bills.len()));

    let widths = [
        Constraint::Percentage(28),
        Constraint::Percentage(18),
        Constraint::Percentage(14),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
    ];
    let header = Row::new(
        COLUMN_TITLES
            .iter()
            .map(|title| Cell::from(*title).style(palette.header)),
    );

    let rows: Vec<Row<'_>> = if view_data.bills.is_empty() {
        vec![Row::new([Cell::from(EMPTY_BILLS_PLACEHOLDER).style(palette.muted)])]
    } else {
        table_rows(&view_data.bills, view_data.offset)
            .into_iter()
            .enumerate()
            .map(|(index, cells)| {
                let style = if index == view_data.selected {
                    palette.selected
                } else {
                    palette.base
                };
                Row::new(cells.map(Cell::from)).height(2).style(style)
            })
            .collect()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .style(palette.base);
    frame.render_widget(table, area);
}

fn header_text(state: &AppState, view_data: &ViewData) -> String {
    let total: f64 = view_data.bills.iter().map(|bill| bill.amount).sum();
    format!(
        "{} unpaid | due {} | theme {}",
        view_data.bills.len(),
        bahi_app::format_amount(total),
        state.theme.as_str()
    )
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }
    let (mode, hints) = match state.mode {
        AppMode::Nav => (
            "NAV",
            "j/k move | a add | e edit | d del | s sms | p pdf | t theme | c cloud | ? help | q quit",
        ),
        AppMode::Form => (
            "FORM",
            "tab/shift+tab field | enter or ctrl+s save | ctrl+r reset | esc close",
        ),
        AppMode::ConfirmDelete(_) => ("CONFIRM", "y delete | n/esc keep"),
        AppMode::SmsPreview => ("SMS", "enter/o send | esc close"),
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {} | {hints}", display_text(status)),
        None => format!("{mode} | {hints}"),
    }
}

fn render_form_text(state: &AppState) -> String {
    let mut lines = Vec::with_capacity(BillField::ALL.len() + 2);
    for field in BillField::ALL {
        let focused = field == state.focus;
        let value = display_text(state.form.field(field));
        let marker = if focused { ">" } else { " " };
        let cursor = if focused { "_" } else { "" };
        let hint = if value.is_empty() && !field.hint().is_empty() {
            format!("  ({})", field.hint())
        } else {
            String::new()
        };
        lines.push(format!("{marker} {:<14} {value}{cursor}{hint}", field.label()));
    }
    lines.push(String::new());
    lines.push("enter save | ctrl+r reset | esc close".to_owned());
    lines.join("\n")
}

fn render_confirm_text(view_data: &ViewData, id: BillId) -> String {
    let summary = view_data
        .bills
        .iter()
        .find(|bill| bill.id == id)
        .map(|bill| format!("{} • {}", display_text(&bill.name), bill.amount_label()))
        .unwrap_or_default();
    format!("Delete this bill?\n\n{summary}\n\ny delete | n/esc keep")
}

fn render_sms_text(draft: &SmsDraft) -> String {
    format!(
        "{}\n\nenter/o send to owner {} | esc close",
        display_message(&draft.preview_text()),
        display_text(&draft.recipient)
    )
}

// Keeps line breaks while dropping every other control character.
fn display_message(raw: &str) -> String {
    raw.split('\n').map(display_text).collect::<Vec<_>>().join("\n")
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
nav: j/k move | g/G first/last | a add | e edit | d delete | q quit\n\
nav: s sms to owner | p pdf | t theme | c cloud save\n\
form: tab/shift+tab field | enter or ctrl+s save | ctrl+r reset | esc close\n\
form: editing removes the bill until it is saved again\n\
delete: y confirm | n/esc keep\n\
sms: enter/o open composer (clipboard fallback) | esc close"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{AppMode, BillField, BillFormInput, BillId, SmsDraft, Theme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub mode: AppMode,
    pub theme: Theme,
    pub form: BillFormInput,
    pub focus: BillField,
    pub sms_draft: Option<SmsDraft>,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Nav,
            theme: Theme::default(),
            form: BillFormInput::default(),
            focus: BillField::Name,
            sms_draft: None,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    OpenForm,
    OpenFormWith(BillFormInput),
    CloseForm,
    ResetForm,
    FormSubmitted,
    NextField,
    PrevField,
    RequestDelete(BillId),
    DeleteConfirmed,
    CancelDelete,
    ShowSms(SmsDraft),
    CloseSms,
    ToggleTheme,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ModeChanged(AppMode),
    FocusChanged(BillField),
    FormCleared,
    ThemeChanged(Theme),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::OpenForm => {
                self.focus = BillField::Name;
                self.set_mode(AppMode::Form)
            }
            AppCommand::OpenFormWith(form) => {
                self.form = form;
                self.focus = BillField::Name;
                vec![
                    self.enter_mode(AppMode::Form),
                    self.set_status("editing bill; submit to save it again"),
                ]
            }
            AppCommand::CloseForm => self.set_mode(AppMode::Nav),
            AppCommand::ResetForm => {
                self.form.clear();
                self.focus = BillField::Name;
                vec![AppEvent::FormCleared, AppEvent::FocusChanged(self.focus)]
            }
            AppCommand::FormSubmitted => {
                self.form.clear();
                self.focus = BillField::Name;
                vec![
                    AppEvent::FormCleared,
                    self.enter_mode(AppMode::Nav),
                    self.set_status("bill saved"),
                ]
            }
            AppCommand::NextField => self.rotate_focus(1),
            AppCommand::PrevField => self.rotate_focus(-1),
            AppCommand::RequestDelete(id) => self.set_mode(AppMode::ConfirmDelete(id)),
            AppCommand::DeleteConfirmed => self.set_mode(AppMode::Nav),
            AppCommand::CancelDelete => {
                vec![self.enter_mode(AppMode::Nav), self.set_status("delete cancelled")]
            }
            AppCommand::ShowSms(draft) => {
                self.sms_draft = Some(draft);
                self.set_mode(AppMode::SmsPreview)
            }
            AppCommand::CloseSms => {
                self.sms_draft = None;
                self.set_mode(AppMode::Nav)
            }
            AppCommand::ToggleTheme => {
                self.theme = self.theme.toggled();
                vec![
                    AppEvent::ThemeChanged(self.theme),
                    self.set_status(&format!("{} theme", self.theme.as_str())),
                ]
            }
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn set_mode(&mut self, mode: AppMode) -> Vec<AppEvent> {
        vec![self.enter_mode(mode)]
    }

    fn enter_mode(&mut self, mode: AppMode) -> AppEvent {
        self.mode = mode;
        AppEvent::ModeChanged(mode)
    }

    fn rotate_focus(&mut self, delta: isize) -> Vec<AppEvent> {
        let fields = BillField::ALL;
        let current = fields
            .iter()
            .position(|field| *field == self.focus)
            .unwrap_or(0) as isize;
        let len = fields.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.focus = fields[next];
        vec![AppEvent::FocusChanged(self.focus)]
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCommand, AppEvent, AppState};
    use crate::{AppMode, BillField, BillFormInput, BillId, SmsDraft, Theme};

    #[test]
    fn theme_toggles_back_and_forth() {
        let mut state = AppState::default();
        assert_eq!(state.theme, Theme::Light);

        let events = state.dispatch(AppCommand::ToggleTheme);
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(
            events,
            vec![
                AppEvent::ThemeChanged(Theme::Dark),
                AppEvent::StatusUpdated("dark theme".to_owned()),
            ],
        );

        state.dispatch(AppCommand::ToggleTheme);
        assert_eq!(state.theme, Theme::Light);
    }

    #[test]
    fn focus_rotation_wraps() {
        let mut state = AppState::default();

        let events = state.dispatch(AppCommand::PrevField);
        assert_eq!(state.focus, BillField::DateTime);
        assert_eq!(events, vec![AppEvent::FocusChanged(BillField::DateTime)]);

        state.dispatch(AppCommand::NextField);
        assert_eq!(state.focus, BillField::Name);
    }

    #[test]
    fn submitted_form_clears_and_returns_to_nav() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenFormWith(BillFormInput {
            name: "Ravi".to_owned(),
            ..BillFormInput::default()
        }));
        assert_eq!(state.mode, AppMode::Form);
        assert_eq!(state.form.name, "Ravi");

        let events = state.dispatch(AppCommand::FormSubmitted);
        assert!(state.form.is_blank());
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(events[0], AppEvent::FormCleared);
    }

    #[test]
    fn reset_keeps_form_open() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::OpenForm);
        state.form.amount = "150".to_owned();
        state.dispatch(AppCommand::NextField);

        state.dispatch(AppCommand::ResetForm);
        assert_eq!(state.mode, AppMode::Form);
        assert!(state.form.is_blank());
        assert_eq!(state.focus, BillField::Name);
    }

    #[test]
    fn delete_confirmation_round_trip() {
        let mut state = AppState::default();
        state.dispatch(AppCommand::RequestDelete(BillId::new(3)));
        assert_eq!(state.mode, AppMode::ConfirmDelete(BillId::new(3)));

        state.dispatch(AppCommand::CancelDelete);
        assert_eq!(state.mode, AppMode::Nav);
        assert_eq!(state.status_line.as_deref(), Some("delete cancelled"));

        state.dispatch(AppCommand::RequestDelete(BillId::new(3)));
        let events = state.dispatch(AppCommand::DeleteConfirmed);
        assert_eq!(events, vec![AppEvent::ModeChanged(AppMode::Nav)]);
    }

    #[test]
    fn sms_preview_holds_draft_until_closed() {
        let mut state = AppState::default();
        let draft = SmsDraft {
            preview_recipient: "9800000000".to_owned(),
            recipient: "+917000000000".to_owned(),
            message: "pay".to_owned(),
        };

        state.dispatch(AppCommand::ShowSms(draft.clone()));
        assert_eq!(state.mode, AppMode::SmsPreview);
        assert_eq!(state.sms_draft, Some(draft));

        state.dispatch(AppCommand::CloseSms);
        assert_eq!(state.mode, AppMode::Nav);
        assert!(state.sms_draft.is_none());
    }

    #[test]
    fn status_set_and_clear() {
        let mut state = AppState::with_theme(Theme::Dark);
        state.dispatch(AppCommand::SetStatus("Bill not found".to_owned()));
        assert_eq!(state.status_line.as_deref(), Some("Bill not found"));

        let events = state.dispatch(AppCommand::ClearStatus);
        assert!(state.status_line.is_none());
        assert_eq!(events, vec![AppEvent::StatusCleared]);
        assert_eq!(state.theme, Theme::Dark);
    }
}

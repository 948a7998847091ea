use obtain_core::{AppViewModel, CardAction, Msg, View};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the event loop should do with one terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Dispatch(Msg),
    SelectPrevious,
    SelectNext,
    Quit,
    /// Repaint without touching state (resize).
    Redraw,
    Ignore,
}

pub fn map_event(event: &Event, view: &AppViewModel, selected: usize) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key, view, selected),
        Event::FocusLost => Action::Dispatch(Msg::VisibilityChanged(false)),
        Event::FocusGained => Action::Dispatch(Msg::VisibilityChanged(true)),
        Event::Resize(..) => Action::Redraw,
        _ => Action::Ignore,
    }
}

pub fn map_key(key: &KeyEvent, view: &AppViewModel, selected: usize) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => return Action::Quit,
        KeyCode::Char('t') if ctrl => return Action::Dispatch(Msg::ThemeToggled),
        _ => {}
    }

    // A pending delete owns the keyboard until answered.
    if view.view == View::Conversions && view.conversions.confirm_delete.is_some() {
        return match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Action::Dispatch(Msg::DeleteConfirmed),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                Action::Dispatch(Msg::DeleteCancelled)
            }
            _ => Action::Ignore,
        };
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            let target = match view.view {
                View::Home => View::Conversions,
                View::Conversions => View::Home,
            };
            return Action::Dispatch(Msg::Navigate(target));
        }
        KeyCode::Esc => return Action::Quit,
        _ => {}
    }

    if ctrl {
        return Action::Ignore;
    }

    match view.view {
        View::Home => map_home_key(key, view),
        View::Conversions => map_conversions_key(key, view, selected),
    }
}

fn map_home_key(key: &KeyEvent, view: &AppViewModel) -> Action {
    let home = &view.home;
    match key.code {
        KeyCode::Char(c) => {
            let mut input = home.url_input.clone();
            input.push(c);
            Action::Dispatch(Msg::UrlInputChanged(input))
        }
        KeyCode::Backspace => {
            let mut input = home.url_input.clone();
            if input.pop().is_none() {
                return Action::Ignore;
            }
            Action::Dispatch(Msg::UrlInputChanged(input))
        }
        KeyCode::Enter => Action::Dispatch(Msg::SubmitClicked),
        KeyCode::Up | KeyCode::Down => Action::Dispatch(Msg::ActionSelected(home.action.other())),
        KeyCode::Left if home.format_group_visible => {
            Action::Dispatch(Msg::FormatSelected(home.format.prev()))
        }
        KeyCode::Right if home.format_group_visible => {
            Action::Dispatch(Msg::FormatSelected(home.format.next()))
        }
        _ => Action::Ignore,
    }
}

fn map_conversions_key(key: &KeyEvent, view: &AppViewModel, selected: usize) -> Action {
    let card = view.conversions.list.cards().get(selected);
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Action::SelectPrevious,
        KeyCode::Down | KeyCode::Char('j') => Action::SelectNext,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('d') => card
            .and_then(|card| {
                card.actions.iter().find_map(|action| match action {
                    CardAction::Delete { filename } => Some(Msg::DeleteClicked {
                        filename: filename.clone(),
                    }),
                    _ => None,
                })
            })
            .map_or(Action::Ignore, Action::Dispatch),
        KeyCode::Char('r') => card
            .and_then(|card| {
                card.actions.iter().find_map(|action| match action {
                    CardAction::Retry { job_id } => Some(Msg::RetryClicked {
                        job_id: job_id.clone(),
                    }),
                    _ => None,
                })
            })
            .map_or(Action::Ignore, Action::Dispatch),
        _ => Action::Ignore,
    }
}

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use obtain_core::{update, AppState, AppViewModel, Msg, View, THEME_STORAGE_KEY};
use obtain_engine::{ApiBase, EngineHandle, ReqwestJobApi};
use obtain_logging::{obtain_debug, obtain_info};
use ratatui::crossterm::event::{self, DisableFocusChange, EnableFocusChange};
use ratatui::crossterm::execute;
use ratatui::DefaultTerminal;

use super::effects::EffectRunner;
use super::persistence::PreferenceStore;
use super::ui;
use super::ui::keys::Action;
use crate::config::ClientConfig;

/// How long one loop iteration waits for terminal input before checking the engine.
const INPUT_POLL: Duration = Duration::from_millis(50);

pub fn run_app(config: &ClientConfig, start: View) -> Result<()> {
    let api = ReqwestJobApi::new(config.client_settings())
        .with_context(|| format!("invalid server url {}", config.server_url))?;
    let base = api.base().clone();
    let engine = EngineHandle::new(Arc::new(api)).context("failed to start engine thread")?;
    let preferences = PreferenceStore::new(config.state_dir());

    let mut app = App::new(
        AppState::with_poll_interval(config.poll_interval()),
        EffectRunner::new(engine, preferences),
        base,
    );
    let stored_theme = app.runner.preferences().get(THEME_STORAGE_KEY);
    app.dispatch(Msg::ThemeRestored(stored_theme));
    if start != View::Home {
        app.dispatch(Msg::Navigate(start));
    }
    obtain_info!("UI started against {}", config.server_url);

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        default_hook(info);
    }));

    let mut terminal = ratatui::init();
    // Focus reporting is best effort; terminals without it simply never hide.
    let _ = execute!(io::stdout(), EnableFocusChange);
    let result = app.run(&mut terminal);
    let _ = execute!(io::stdout(), DisableFocusChange);
    ratatui::restore();
    result
}

struct App {
    state: AppState,
    view: AppViewModel,
    runner: EffectRunner,
    base: ApiBase,
    selected: usize,
    needs_redraw: bool,
    should_quit: bool,
}

impl App {
    fn new(state: AppState, runner: EffectRunner, base: ApiBase) -> Self {
        let view = state.view();
        Self {
            state,
            view,
            runner,
            base,
            selected: 0,
            needs_redraw: true,
            should_quit: false,
        }
    }

    fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.should_quit {
            for msg in self.runner.drain() {
                self.dispatch(msg);
            }

            if self.needs_redraw {
                terminal
                    .draw(|frame| ui::render::draw(frame, &self.view, self.selected, &self.base))
                    .context("failed to draw terminal frame")?;
                self.needs_redraw = false;
            }

            if event::poll(INPUT_POLL).context("failed to poll terminal events")? {
                let event = event::read().context("failed to read terminal event")?;
                let action = ui::keys::map_event(&event, &self.view, self.selected);
                self.apply(action);
            }
        }

        // Leave no timer running behind us.
        self.dispatch(Msg::VisibilityChanged(false));
        Ok(())
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Dispatch(msg) => self.dispatch(msg),
            Action::SelectPrevious => {
                self.selected = self.selected.saturating_sub(1);
                self.needs_redraw = true;
            }
            Action::SelectNext => {
                let count = self.view.conversions.list.cards().len();
                if self.selected + 1 < count {
                    self.selected += 1;
                    self.needs_redraw = true;
                }
            }
            Action::Quit => self.should_quit = true,
            Action::Redraw => self.needs_redraw = true,
            Action::Ignore => {}
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        obtain_debug!("dispatch {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.enqueue(effects);

        if state.consume_dirty() {
            self.view = state.view();
            let count = self.view.conversions.list.cards().len();
            self.selected = self.selected.min(count.saturating_sub(1));
            self.needs_redraw = true;
        }
        self.state = state;
    }
}

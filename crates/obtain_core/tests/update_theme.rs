use obtain_core::{update, AppState, Effect, Msg, Theme, ThemeIcon};

#[test]
fn toggle_twice_returns_to_original_theme_and_stored_value() {
    let state = AppState::new();
    assert_eq!(state.view().theme, Theme::Light);

    let (state, first) = update(state, Msg::ThemeToggled);
    assert_eq!(state.view().theme, Theme::Dark);
    assert_eq!(state.view().theme_icon, ThemeIcon::Sun);
    assert_eq!(first, vec![Effect::PersistTheme(Theme::Dark)]);

    let (state, second) = update(state, Msg::ThemeToggled);
    assert_eq!(state.view().theme, Theme::Light);
    assert_eq!(state.view().theme_icon, ThemeIcon::Moon);
    assert_eq!(second, vec![Effect::PersistTheme(Theme::Light)]);
    assert_eq!(Theme::Light.as_str(), "light");
}

#[test]
fn stored_dark_replays_toggle_once() {
    let (mut state, effects) = update(AppState::new(), Msg::ThemeRestored(Some("dark".into())));

    assert_eq!(state.theme(), Theme::Dark);
    assert_eq!(effects, vec![Effect::PersistTheme(Theme::Dark)]);
    assert!(state.consume_dirty());

    // A second restore must not flip back.
    let (state, effects) = update(state, Msg::ThemeRestored(Some("dark".into())));
    assert_eq!(state.theme(), Theme::Dark);
    assert!(effects.is_empty());
}

#[test]
fn stored_light_missing_or_garbage_keeps_light() {
    for stored in [None, Some("light".to_string()), Some("DARK".to_string()), Some(String::new())] {
        let (state, effects) = update(AppState::new(), Msg::ThemeRestored(stored));
        assert_eq!(state.theme(), Theme::Light);
        assert!(effects.is_empty());
    }
}

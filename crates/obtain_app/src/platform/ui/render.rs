use chrono::{DateTime, Local, Utc};
use obtain_core::{
    AppViewModel, CardAction, ConversionsView, DownloadAction, HomeView, JobCardView,
    JobListView, OutputFormat, ThemeIcon, View,
};
use obtain_engine::ApiBase;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use super::layout;
use super::palette::Palette;

const LOADING_TEXT: &str = "Loading...";
const READY_TITLE: &str = "Your video is ready";

pub fn draw(frame: &mut Frame, view: &AppViewModel, selected: usize, base: &ApiBase) {
    let palette = Palette::for_theme(view.theme);
    let screen = layout::screen(frame.area());

    frame.render_widget(Block::default().style(palette.base()), frame.area());
    draw_header(frame, screen.header, view, &palette);
    match view.view {
        View::Home => draw_home(frame, screen.body, &view.home, &palette),
        View::Conversions => {
            draw_conversions(frame, screen.body, &view.conversions, selected, base, &palette)
        }
    }
    frame.render_widget(
        Paragraph::new(footer_hint(view)).style(palette.muted()),
        screen.footer,
    );
}

fn draw_header(frame: &mut Frame, area: Rect, view: &AppViewModel, palette: &Palette) {
    let selected = match view.view {
        View::Home => 0,
        View::Conversions => 1,
    };
    let icon = match view.theme_icon {
        ThemeIcon::Moon => "☾",
        ThemeIcon::Sun => "☀",
    };
    let tabs = Tabs::new(vec!["Home", "Conversions"])
        .select(selected)
        .style(palette.base())
        .highlight_style(palette.accent())
        .block(
            Block::bordered()
                .title(" obtain ")
                .title_bottom(Line::from(format!(" {icon} ")).alignment(Alignment::Right))
                .border_style(palette.muted()),
        );
    frame.render_widget(tabs, area);
}

fn draw_home(frame: &mut Frame, area: Rect, home: &HomeView, palette: &Palette) {
    let areas = layout::home(area);

    let input = Paragraph::new(home.url_input.as_str())
        .style(palette.base())
        .block(
            Block::bordered()
                .title(" YouTube URL ")
                .border_style(palette.accent()),
        );
    frame.render_widget(input, areas.input);
    // Cursor sits after the typed text, inside the border.
    let typed = to_u16(home.url_input.chars().count());
    let cursor_x = areas.input.x.saturating_add(1).saturating_add(typed);
    if cursor_x < areas.input.right().saturating_sub(1) {
        frame.set_cursor_position((cursor_x, areas.input.y + 1));
    }

    frame.render_widget(
        Paragraph::new(home_option_lines(home, palette)).style(palette.base()),
        areas.options,
    );

    let submit_style = if home.submit_enabled {
        palette.accent()
    } else {
        palette.muted()
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("[ {} ]", home.submit_label),
            submit_style,
        ))),
        areas.submit,
    );

    frame.render_widget(
        Paragraph::new(home_message_lines(home, palette))
            .style(palette.base())
            .wrap(Wrap { trim: false }),
        areas.messages,
    );
}

pub fn home_option_lines(home: &HomeView, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for action in [DownloadAction::Download, DownloadAction::Convert] {
        let marker = if action == home.action { "(•)" } else { "( )" };
        lines.push(Line::from(format!("{marker} {}", action.label())));
    }
    if home.format_group_visible {
        let mut spans = vec![Span::raw("Format: ")];
        for format in OutputFormat::ALL {
            let style = if format == home.format {
                palette.accent().add_modifier(Modifier::REVERSED)
            } else {
                palette.base()
            };
            spans.push(Span::styled(format!(" {} ", format.as_str()), style));
        }
        lines.push(Line::from(spans));
    }
    lines
}

pub fn home_message_lines(home: &HomeView, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(error) = &home.error_banner {
        lines.push(Line::from(Span::styled(error.clone(), palette.error())));
    }
    if let Some(url) = &home.direct_download_url {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(READY_TITLE, palette.accent())));
        lines.push(Line::from(format!("Download: {url}")));
    }
    lines
}

fn draw_conversions(
    frame: &mut Frame,
    area: Rect,
    conversions: &ConversionsView,
    selected: usize,
    base: &ApiBase,
    palette: &Palette,
) {
    let block = Block::bordered()
        .title(" Conversions ")
        .border_style(palette.muted());
    let inner_height = area.height.saturating_sub(2);
    let (lines, selected_span) = list_lines(&conversions.list, base, palette, Some(selected));
    let scroll = scroll_offset(selected_span, inner_height);

    frame.render_widget(
        Paragraph::new(lines)
            .style(palette.base())
            .block(block)
            .scroll((scroll, 0)),
        area,
    );

    if let Some(confirm) = &conversions.confirm_delete {
        let popup = centered(area, 50, 5);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(confirm.prompt),
                Line::from(Span::styled(confirm.filename.clone(), palette.accent())),
                Line::from("[y] yes   [n] no"),
            ])
            .alignment(Alignment::Center)
            .style(palette.base())
            .block(Block::bordered().border_style(palette.error())),
            popup,
        );
    }
}

/// Lines for the whole list plus the `(start, len)` of the highlighted card.
pub fn list_lines(
    list: &JobListView,
    base: &ApiBase,
    palette: &Palette,
    selected: Option<usize>,
) -> (Vec<Line<'static>>, Option<(u16, u16)>) {
    match list {
        JobListView::Loading => (
            vec![Line::from(Span::styled(LOADING_TEXT, palette.muted()))],
            None,
        ),
        JobListView::Empty { message } => (
            vec![Line::from(Span::styled(*message, palette.muted()))],
            None,
        ),
        JobListView::Cards(cards) => {
            let mut lines = Vec::new();
            let mut span = None;
            for (idx, card) in cards.iter().enumerate() {
                if idx > 0 {
                    lines.push(Line::default());
                }
                let highlighted = selected == Some(idx);
                let card_lines = card_lines(card, base, palette, highlighted);
                if highlighted {
                    span = Some((to_u16(lines.len()), to_u16(card_lines.len())));
                }
                lines.extend(card_lines);
            }
            (lines, span)
        }
    }
}

pub fn card_lines(
    card: &JobCardView,
    base: &ApiBase,
    palette: &Palette,
    highlighted: bool,
) -> Vec<Line<'static>> {
    let marker = if highlighted { "▶ " } else { "  " };
    let mut title_style = palette.base().add_modifier(Modifier::BOLD);
    if highlighted {
        title_style = title_style.fg(palette.accent);
    }

    let mut lines = vec![Line::from(vec![
        Span::styled(marker, palette.accent()),
        Span::styled(card.title.clone(), title_style),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", card.status_label),
            palette.status(&card.status_class),
        ),
    ])];

    let detail = |label: &str, value: String| {
        Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{label}: "), palette.muted()),
            Span::raw(value),
        ])
    };

    lines.push(detail("URL", card.url.clone()));
    if let Some(started) = card.started_at {
        lines.push(detail("Started", local_time(started)));
    }
    if let Some(finished) = card.finished_at {
        lines.push(detail("Completed", local_time(finished)));
    }
    if let Some(percent) = card.progress_percent {
        lines.push(detail("Progress", format!("{} {percent}%", progress_bar(percent))));
    }
    if let Some(size) = &card.size {
        lines.push(detail("Size", size.clone()));
    }
    if let Some(error) = &card.error_line {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(error.clone(), palette.error()),
        ]));
    }

    for action in &card.actions {
        let line = match action {
            CardAction::Download { filename } => {
                detail("Download", base.file(filename).to_string())
            }
            CardAction::Delete { .. } => action_hint("d", "Delete", palette),
            CardAction::Retry { .. } => action_hint("r", "Retry", palette),
        };
        lines.push(line);
    }
    lines
}

/// The list as uncoloured text, for `obtain list`.
pub fn list_text(list: &JobListView, base: &ApiBase) -> String {
    let palette = Palette::for_theme(obtain_core::Theme::Light);
    let (lines, _) = list_lines(list, base, &palette, None);
    lines
        .iter()
        .map(|line| line.to_string().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn action_hint(key: &str, label: &str, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("[{key}]"), palette.accent()),
        Span::raw(format!(" {label}")),
    ])
}

fn progress_bar(percent: u8) -> String {
    const WIDTH: usize = 20;
    let filled = usize::from(percent.min(100)) * WIDTH / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(WIDTH - filled))
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn footer_hint(view: &AppViewModel) -> &'static str {
    match view.view {
        View::Home => {
            " Enter submit · ↑↓ action · ←→ format · Tab conversions · Ctrl+T theme · Esc quit"
        }
        View::Conversions if view.conversions.confirm_delete.is_some() => {
            " y confirm delete · n cancel"
        }
        View::Conversions => " ↑↓ select · d delete · r retry · Tab home · Ctrl+T theme · q quit",
    }
}

fn scroll_offset(selected_span: Option<(u16, u16)>, height: u16) -> u16 {
    match selected_span {
        Some((start, len)) if start.saturating_add(len) > height => {
            start.saturating_add(len) - height
        }
        _ => 0,
    }
}

/// Terminal coordinates are `u16`; longer content pins at the edge.
fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use obtain_core::{
        update, AppState, JobSnapshot, JobStatus, Msg, SubmitOutcome, EMPTY_STATE_MESSAGE,
    };
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    fn base() -> ApiBase {
        ApiBase::parse("http://127.0.0.1:8080").unwrap()
    }

    fn conversions_with(jobs: Vec<JobSnapshot>) -> AppViewModel {
        let mut state = AppState::new();
        for msg in [Msg::Navigate(View::Conversions), Msg::JobsLoaded(jobs)] {
            state = update(state, msg).0;
        }
        state.view()
    }

    fn text_of(view: &AppViewModel) -> String {
        list_text(&view.conversions.list, &base())
    }

    #[test]
    fn empty_list_shows_placeholder_once() {
        let text = text_of(&conversions_with(vec![]));
        assert_eq!(text.matches(EMPTY_STATE_MESSAGE).count(), 1);
    }

    #[test]
    fn completed_card_links_file_and_offers_delete() {
        let job = JobSnapshot {
            filename: Some("x.mpg".into()),
            size: Some("4.0 MB".into()),
            ..JobSnapshot::new("x", "https://youtu.be/x", "mpg", JobStatus::Completed)
        };
        let text = text_of(&conversions_with(vec![job]));
        assert!(text.contains("MPG Conversion"));
        assert!(text.contains("http://127.0.0.1:8080/api/file/x.mpg"));
        assert!(text.contains("[d] Delete"));
        assert!(text.contains("Size: 4.0 MB"));
    }

    #[test]
    fn retry_control_follows_can_retry() {
        let retryable = JobSnapshot {
            error: Some("boom".into()),
            can_retry: true,
            ..JobSnapshot::new("a", "u", "avi", JobStatus::Failed)
        };
        let text = text_of(&conversions_with(vec![retryable]));
        assert!(text.contains("Error: boom"));
        assert!(text.contains("[r] Retry"));

        let final_failure = JobSnapshot::new("b", "u", "avi", JobStatus::Failed);
        let text = text_of(&conversions_with(vec![final_failure]));
        assert!(text.contains("Error: Unknown error"));
        assert!(!text.contains("Retry"));
    }

    #[test]
    fn progress_only_while_working() {
        let working = JobSnapshot {
            progress_percent: 40,
            ..JobSnapshot::new("a", "u", "mpg", JobStatus::Converting)
        };
        let text = text_of(&conversions_with(vec![working]));
        assert!(text.contains("Progress: ████████░░░░░░░░░░░░ 40%"));
    }

    #[test]
    fn full_frame_shows_ready_link() {
        let mut state = AppState::new();
        for msg in [
            Msg::UrlInputChanged("https://youtu.be/abc".into()),
            Msg::SubmitClicked,
            Msg::SubmitSucceeded(SubmitOutcome::Ready {
                download_url: "https://cdn.example.com/abc.mp4".into(),
            }),
        ] {
            state = update(state, msg).0;
        }
        let view = state.view();

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| draw(frame, &view, 0, &base()))
            .unwrap();
        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains(READY_TITLE));
        assert!(screen.contains("https://cdn.example.com/abc.mp4"));
        assert!(screen.contains("[ obtain ]"));
    }

    #[test]
    fn scroll_keeps_selected_card_visible() {
        assert_eq!(scroll_offset(Some((0, 5)), 10), 0);
        assert_eq!(scroll_offset(Some((12, 5)), 10), 7);
        assert_eq!(scroll_offset(None, 10), 0);
        assert_eq!(scroll_offset(Some((u16::MAX, 5)), 10), u16::MAX - 10);
    }

    #[test]
    fn huge_counts_saturate() {
        assert_eq!(to_u16(42), 42);
        assert_eq!(to_u16(usize::from(u16::MAX) + 7), u16::MAX);
    }

    #[test]
    fn very_long_url_still_draws() {
        let mut state = AppState::new();
        state = update(state, Msg::UrlInputChanged("x".repeat(70_000))).0;
        let view = state.view();

        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|frame| draw(frame, &view, 0, &base()))
            .unwrap();
    }
}

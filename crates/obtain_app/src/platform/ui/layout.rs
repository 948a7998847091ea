use ratatui::layout::{Constraint, Layout, Rect};

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 1;
pub const INPUT_HEIGHT: u16 = 3;
pub const OPTIONS_HEIGHT: u16 = 4;
pub const SUBMIT_HEIGHT: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pub header: Rect,
    pub body: Rect,
    pub footer: Rect,
}

/// Header with view tabs and theme icon, the active view, then a key hint line.
pub fn screen(area: Rect) -> Screen {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);
    Screen {
        header,
        body,
        footer,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeAreas {
    pub input: Rect,
    pub options: Rect,
    pub submit: Rect,
    pub messages: Rect,
}

pub fn home(body: Rect) -> HomeAreas {
    let [input, options, submit, messages] = Layout::vertical([
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(OPTIONS_HEIGHT),
        Constraint::Length(SUBMIT_HEIGHT),
        Constraint::Min(0),
    ])
    .areas(body);
    HomeAreas {
        input,
        options,
        submit,
        messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_reserves_header_and_footer() {
        let parts = screen(Rect::new(0, 0, 80, 24));
        assert_eq!(parts.header.height, HEADER_HEIGHT);
        assert_eq!(parts.footer.height, FOOTER_HEIGHT);
        assert_eq!(parts.body.height, 24 - HEADER_HEIGHT - FOOTER_HEIGHT);
        assert_eq!(parts.footer.y, 23);
    }
}

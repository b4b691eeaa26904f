#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    Sessions,
    Crons,
}

#[derive(Debug)]
pub struct UIState {
    pub should_quit: bool,
    /// Pauses painting only; polling and diffing continue, so unpausing
    /// picks up the latest state on the next frame.
    pub paused: bool,
    pub focus: FocusPanel,
    pub session_scroll: u16,
    pub cron_scroll: u16,
    pub terminal_size: (u16, u16),
}

impl UIState {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            paused: false,
            focus: FocusPanel::Sessions,
            session_scroll: 0,
            cron_scroll: 0,
            terminal_size: (0, 0),
        }
    }

    pub fn next_panel(&mut self) {
        self.focus = match self.focus {
            FocusPanel::Sessions => FocusPanel::Crons,
            FocusPanel::Crons => FocusPanel::Sessions,
        };
    }

    pub fn scroll(&mut self, delta: i32) {
        let target = match self.focus {
            FocusPanel::Sessions => &mut self.session_scroll,
            FocusPanel::Crons => &mut self.cron_scroll,
        };
        *target = target.saturating_add_signed(delta as i16);
    }
}

use anyhow::Result;
use std::time::Duration;

use crate::app::handler::{process_action, RuntimeContext};
use crate::app::AppState;
use crate::config::Config;
use crate::source;
use crate::tui;
use crate::tui::event::EventHandler;

pub async fn run_tui(config: Config) -> Result<()> {
    let mut terminal = tui::init()?;

    let mut state = AppState::new()?;
    let size = terminal.size()?;
    state.ui.terminal_size = (size.width, size.height);

    let mut events = EventHandler::new();
    let action_tx = events.action_sender();

    let ctx = RuntimeContext {
        data_path: config.data_path.clone(),
        action_tx: action_tx.clone(),
    };

    // Don't wait for the first interval to elapse.
    source::fetch_once(config.data_path.clone(), action_tx.clone());
    let poller = source::spawn_poller(
        config.data_path.clone(),
        Duration::from_millis(config.poll_interval_ms),
        action_tx,
    );

    let result = run_main_loop(&mut terminal, &mut state, &mut events, &ctx).await;

    poller.abort();
    tui::restore()?;

    result
}

async fn run_main_loop(
    terminal: &mut tui::Terminal,
    state: &mut AppState,
    events: &mut EventHandler,
    ctx: &RuntimeContext,
) -> Result<()> {
    loop {
        terminal.draw(|frame| tui::ui::draw(frame, state))?;

        let action = events.next().await?;
        process_action(state, action, ctx)?;

        if state.ui.should_quit {
            break;
        }
    }

    Ok(())
}

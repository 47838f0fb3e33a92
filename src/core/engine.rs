use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tracing::debug;

use crate::core::game::{Context, Game};

/// Sleep between loop turns when the game does not tick, so input keeps
/// getting polled without spinning.
const IDLE_POLL: Duration = Duration::from_millis(16);

pub struct Engine<G: Game> {
    game: G,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { game }
    }

    /// Runs until Esc or Ctrl-C. The caller owns terminal setup and restore.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<G> {
        let mut last_tick = Instant::now();

        let (command_tx, mut command_rx) = tokio::sync::mpsc::unbounded_channel::<G::Command>();
        let ctx = Context::new(command_tx);

        self.game.on_start(&ctx);

        loop {
            // INPUT first, so a command queued by a key shows its pending state in this frame
            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if is_quit(&key) {
                        debug!("quit requested");
                        return Ok(self.game);
                    }
                    self.game.handle_input(key, &ctx);
                }
            }

            terminal.draw(|f| self.game.render(f))?;

            let tick_rate = self.game.tick_rate();
            let tick_sleep = tick_rate.unwrap_or(IDLE_POLL);

            tokio::select! {
                Some(command) = command_rx.recv() => {
                    self.game.handle_command(command).await;
                }

                _ = tokio::time::sleep(tick_sleep) => {
                    if tick_rate.is_some() {
                        let dt = last_tick.elapsed().as_millis() as u32;
                        last_tick = Instant::now();
                        self.game.on_tick(dt, &ctx);
                    }
                }
            }
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

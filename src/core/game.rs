/// Core game interface for the terminal runner
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::KeyEvent;
use tokio::sync::mpsc::UnboundedSender;

/// Handle a game uses to queue work for the engine loop.
pub struct Context<C> {
    tx: UnboundedSender<C>,
}

impl<C> Context<C> {
    pub fn new(tx: UnboundedSender<C>) -> Self {
        Self { tx }
    }

    /// Queues a command; the engine awaits `Game::handle_command` for it on
    /// its next turn. Dropped silently once the engine has stopped.
    pub fn send_command(&self, command: C) {
        let _ = self.tx.send(command);
    }
}

/// Main game trait driven by [`crate::core::engine::Engine`].
///
/// Keyboard input and ticks are synchronous. Anything that has to wait
/// (network, disk) goes through a command so the engine can await it.
#[async_trait]
pub trait Game: Send {
    type Command: Send + 'static;

    /// Called once before the first frame.
    fn on_start(&mut self, _ctx: &Context<Self::Command>) {}

    /// `None` disables ticking.
    fn tick_rate(&self) -> Option<Duration>;

    fn on_tick(&mut self, dt: u32, ctx: &Context<Self::Command>);

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context<Self::Command>);

    async fn handle_command(&mut self, command: Self::Command);

    fn render(&self, frame: &mut ratatui::Frame);
}

/// Renderer trait for drawing a game state with ratatui
pub trait GameRenderer<S> {
    fn render(frame: &mut ratatui::Frame, state: &S);
}

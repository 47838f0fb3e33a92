pub mod engine;    // Event loop: input, ticks, commands
pub mod game;
pub mod renderer;  // Screen-drawing trait

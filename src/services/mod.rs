/// Collaborators the game engine calls but does not depend on for correctness.
pub mod audio;
pub mod storage;

pub use audio::{AudioNotifier, AudioService, SilentSink, SoundEffect, TerminalBell, ToneSink};
pub use storage::{FileStore, KeyValueStore, MemoryStore};

use std::io::Write;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::services::storage::KeyValueStore;

pub const AUDIO_ENABLED_KEY: &str = "audio-enabled";
pub const AUDIO_VOLUME_KEY: &str = "audio-volume";
pub const DEFAULT_VOLUME: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Correct,
    Wrong,
    Win,
    Lose,
    Click,
}

/// Fire-and-forget sound cues. Implementations must never panic and must
/// accept calls while muted.
pub trait AudioNotifier: Send + Sync {
    fn play(&self, effect: SoundEffect);
}

/// A single tone: frequency in Hz, duration in seconds, start offset in ms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency: f32,
    pub duration: f32,
    pub delay_ms: u64,
}

const fn note(frequency: f32, duration: f32, delay_ms: u64) -> Note {
    Note { frequency, duration, delay_ms }
}

impl SoundEffect {
    pub fn melody(self) -> &'static [Note] {
        const CORRECT: [Note; 2] = [note(523.25, 0.1, 0), note(659.25, 0.15, 100)];
        const WRONG: [Note; 2] = [note(392.0, 0.1, 0), note(311.13, 0.2, 80)];
        const WIN: [Note; 4] = [
            note(523.25, 0.15, 0),
            note(659.25, 0.15, 120),
            note(783.99, 0.15, 240),
            note(1046.5, 0.3, 360),
        ];
        const LOSE: [Note; 4] = [
            note(392.0, 0.2, 0),
            note(349.23, 0.2, 180),
            note(293.66, 0.2, 360),
            note(261.63, 0.4, 540),
        ];
        const CLICK: [Note; 1] = [note(800.0, 0.05, 0)];

        match self {
            SoundEffect::Correct => &CORRECT,
            SoundEffect::Wrong => &WRONG,
            SoundEffect::Win => &WIN,
            SoundEffect::Lose => &LOSE,
            SoundEffect::Click => &CLICK,
        }
    }
}

/// Where rendered cues end up.
pub trait ToneSink: Send + Sync {
    fn emit(&self, effect: SoundEffect, melody: &[Note], volume: f32);
}

/// Rings the terminal bell once per cue.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl ToneSink for TerminalBell {
    fn emit(&self, effect: SoundEffect, _melody: &[Note], volume: f32) {
        if volume <= 0.0 {
            return;
        }
        let mut out = std::io::stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            warn!(?effect, error = %e, "failed to ring terminal bell");
        }
    }
}

#[derive(Debug, Default)]
pub struct SilentSink;

impl ToneSink for SilentSink {
    fn emit(&self, _effect: SoundEffect, _melody: &[Note], _volume: f32) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct AudioSettings {
    enabled: bool,
    volume: f32,
}

/// Sound settings plus playback. Settings are loaded from the store once and
/// written back on every change.
pub struct AudioService {
    settings: RwLock<AudioSettings>,
    store: Arc<dyn KeyValueStore>,
    sink: Box<dyn ToneSink>,
}

impl AudioService {
    pub fn new(store: Arc<dyn KeyValueStore>, sink: Box<dyn ToneSink>) -> Self {
        let settings = load_settings(store.as_ref());
        debug!(enabled = settings.enabled, volume = settings.volume, "audio settings loaded");
        Self {
            settings: RwLock::new(settings),
            store,
            sink,
        }
    }

    fn current(&self) -> AudioSettings {
        match self.settings.read() {
            Ok(settings) => *settings,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn apply(&self, change: impl FnOnce(&mut AudioSettings)) -> AudioSettings {
        match self.settings.write() {
            Ok(mut settings) => {
                change(&mut *settings);
                *settings
            }
            Err(poisoned) => {
                let mut settings = poisoned.into_inner();
                change(&mut *settings);
                *settings
            }
        }
    }

    fn update(&self, change: impl FnOnce(&mut AudioSettings)) -> AudioSettings {
        let updated = self.apply(change);
        self.save(updated);
        updated
    }

    fn save(&self, settings: AudioSettings) {
        let result = self
            .store
            .set(AUDIO_ENABLED_KEY, if settings.enabled { "true" } else { "false" })
            .and_then(|_| self.store.set(AUDIO_VOLUME_KEY, &settings.volume.to_string()));
        if let Err(e) = result {
            warn!(error = %e, "failed to save audio settings");
        }
    }

    /// Flips the enabled flag and returns the new value.
    pub fn toggle(&self) -> bool {
        self.update(|s| s.enabled = !s.enabled).enabled
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.update(|s| s.enabled = enabled);
    }

    /// Disables sound for this process only; the stored preference is kept.
    pub fn mute_for_session(&self) {
        self.apply(|s| s.enabled = false);
    }

    pub fn is_enabled(&self) -> bool {
        self.current().enabled
    }

    /// Clamped to `0.0..=1.0`.
    pub fn set_volume(&self, volume: f32) {
        self.update(|s| s.volume = clamp_volume(volume));
    }

    pub fn volume(&self) -> f32 {
        self.current().volume
    }
}

impl AudioNotifier for AudioService {
    fn play(&self, effect: SoundEffect) {
        let settings = self.current();
        if !settings.enabled {
            return;
        }
        self.sink.emit(effect, effect.melody(), settings.volume);
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        DEFAULT_VOLUME
    } else {
        volume.clamp(0.0, 1.0)
    }
}

fn load_settings(store: &dyn KeyValueStore) -> AudioSettings {
    let mut settings = AudioSettings {
        enabled: true,
        volume: DEFAULT_VOLUME,
    };

    match store.get(AUDIO_ENABLED_KEY) {
        Ok(Some(value)) => settings.enabled = value == "true",
        Ok(None) => {}
        Err(e) => warn!(error = %e, "failed to load audio enabled flag"),
    }

    match store.get(AUDIO_VOLUME_KEY) {
        Ok(Some(value)) => match value.trim().parse::<f32>() {
            Ok(volume) => settings.volume = clamp_volume(volume),
            Err(_) => warn!(value = %value, "ignoring unreadable audio volume"),
        },
        Ok(None) => {}
        Err(e) => warn!(error = %e, "failed to load audio volume"),
    }

    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::MemoryStore;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        played: Arc<Mutex<Vec<(SoundEffect, usize, f32)>>>,
    }

    impl ToneSink for Recorder {
        fn emit(&self, effect: SoundEffect, melody: &[Note], volume: f32) {
            self.played.lock().unwrap().push((effect, melody.len(), volume));
        }
    }

    fn service(store: Arc<MemoryStore>) -> (AudioService, Arc<Mutex<Vec<(SoundEffect, usize, f32)>>>) {
        let recorder = Recorder::default();
        let played = recorder.played.clone();
        (AudioService::new(store, Box::new(recorder)), played)
    }

    #[test]
    fn defaults_to_enabled_at_half_volume() {
        let (audio, _) = service(Arc::new(MemoryStore::new()));
        assert!(audio.is_enabled());
        assert_eq!(audio.volume(), 0.5);
    }

    #[test]
    fn toggle_persists_flag() {
        let store = Arc::new(MemoryStore::new());
        let (audio, _) = service(store.clone());
        assert!(!audio.toggle());
        assert_eq!(store.get(AUDIO_ENABLED_KEY).unwrap().as_deref(), Some("false"));
        assert!(audio.toggle());
        assert_eq!(store.get(AUDIO_ENABLED_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn volume_is_clamped_and_saved() {
        let store = Arc::new(MemoryStore::new());
        let (audio, _) = service(store.clone());
        audio.set_volume(1.5);
        assert_eq!(audio.volume(), 1.0);
        audio.set_volume(-0.5);
        assert_eq!(audio.volume(), 0.0);
        audio.set_volume(0.8);
        assert_eq!(store.get(AUDIO_VOLUME_KEY).unwrap().as_deref(), Some("0.8"));
    }

    #[test]
    fn loads_settings_from_store() {
        let store = Arc::new(MemoryStore::with_entries([
            (AUDIO_ENABLED_KEY, "false"),
            (AUDIO_VOLUME_KEY, "0.3"),
        ]));
        let (audio, _) = service(store);
        assert!(!audio.is_enabled());
        assert_eq!(audio.volume(), 0.3);
    }

    #[test]
    fn garbage_volume_falls_back_to_default() {
        let store = Arc::new(MemoryStore::with_entries([(AUDIO_VOLUME_KEY, "loud")]));
        let (audio, _) = service(store);
        assert_eq!(audio.volume(), DEFAULT_VOLUME);
    }

    #[test]
    fn play_routes_melody_to_sink() {
        let (audio, played) = service(Arc::new(MemoryStore::new()));
        audio.play(SoundEffect::Win);
        audio.play(SoundEffect::Click);
        assert_eq!(
            *played.lock().unwrap(),
            vec![(SoundEffect::Win, 4, 0.5), (SoundEffect::Click, 1, 0.5)]
        );
    }

    #[test]
    fn session_mute_leaves_the_stored_flag_alone() {
        let store = Arc::new(MemoryStore::with_entries([(AUDIO_ENABLED_KEY, "true")]));
        let (audio, played) = service(store.clone());

        audio.mute_for_session();
        assert!(!audio.is_enabled());
        audio.play(SoundEffect::Correct);
        assert!(played.lock().unwrap().is_empty());
        assert_eq!(store.get(AUDIO_ENABLED_KEY).unwrap().as_deref(), Some("true"));

        assert!(audio.toggle());
        audio.play(SoundEffect::Click);
        assert_eq!(played.lock().unwrap().len(), 1);
    }

    #[test]
    fn muted_play_is_a_no_op() {
        let (audio, played) = service(Arc::new(MemoryStore::new()));
        audio.set_enabled(false);
        audio.play(SoundEffect::Correct);
        assert!(played.lock().unwrap().is_empty());
    }
}

use serde::Serialize;

use super::language::{Difficulty, Language};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DifficultyLabels {
    pub easy: &'static str,
    pub medium: &'static str,
    pub hard: &'static str,
}

impl DifficultyLabels {
    pub fn label(&self, difficulty: Difficulty) -> &'static str {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// Player-facing strings for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Messages {
    pub won: String,
    pub lost: String,
    pub restart: &'static str,
    pub title: &'static str,
    pub fails: &'static str,
    pub select_letter: &'static str,
    pub difficulty: DifficultyLabels,
    pub language_name: &'static str,
    pub loading: &'static str,
    pub local_dictionary: &'static str,
    pub sound_on: &'static str,
    pub sound_off: &'static str,
    pub help: &'static str,
}

impl Messages {
    /// `word` is interpolated into the outcome lines; pass an empty string
    /// while the game is still being played.
    pub fn new(language: Language, word: &str) -> Self {
        match language {
            Language::Es => Self {
                won: format!("¡Felicidades! Has ganado 🎉 La palabra era: {word}"),
                lost: format!("Has perdido 😢 La palabra era: {word}"),
                restart: "Jugar de nuevo",
                title: "Juego del Ahorcado",
                fails: "Errores",
                select_letter: "Selecciona una letra",
                difficulty: DifficultyLabels {
                    easy: "Fácil",
                    medium: "Medio",
                    hard: "Difícil",
                },
                language_name: "Español",
                loading: "Buscando una palabra...",
                local_dictionary: "Usando palabras del diccionario local",
                sound_on: "Sonido activado",
                sound_off: "Sonido desactivado",
                help: "[F2] Idioma  [F3] Dificultad  [F4] Sonido  [F5] Reiniciar  [Esc] Salir",
            },
            Language::En => Self {
                won: format!("Congratulations! You won 🎉 The word was: {word}"),
                lost: format!("You lost 😢 The word was: {word}"),
                restart: "Play again",
                title: "Hangman Game",
                fails: "Fails",
                select_letter: "Select a letter",
                difficulty: DifficultyLabels {
                    easy: "Easy",
                    medium: "Medium",
                    hard: "Hard",
                },
                language_name: "English",
                loading: "Fetching a word...",
                local_dictionary: "Using words from the local dictionary",
                sound_on: "Sound on",
                sound_off: "Sound off",
                help: "[F2] Language  [F3] Difficulty  [F4] Sound  [F5] Restart  [Esc] Quit",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_lines_carry_the_word() {
        let es = Messages::new(Language::Es, "AGUA");
        assert!(es.lost.ends_with("La palabra era: AGUA"));
        assert!(es.won.contains("AGUA"));

        let en = Messages::new(Language::En, "WATER");
        assert!(en.lost.ends_with("The word was: WATER"));
        assert_eq!(en.difficulty.label(Difficulty::Hard), "Hard");
    }

    #[test]
    fn serializes_with_frontend_keys() {
        let json = serde_json::to_value(Messages::new(Language::Es, "")).unwrap();
        assert_eq!(json["selectLetter"], "Selecciona una letra");
        assert_eq!(json["difficulty"]["easy"], "Fácil");
    }
}

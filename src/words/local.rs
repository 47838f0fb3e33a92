use crate::games::hangman::Language;
use crate::random::RandomSource;

/// Returned when a language has no words at all.
pub const FALLBACK_WORD: &str = "PALABRA";

const SPANISH: &[&str] = &[
    "AGUA", "CASA", "MESA", "PERRO", "GATO", "ARBOL", "LIBRO", "ESCUELA", "VENTANA", "MONTAÑA",
    "PEQUEÑO", "SUEÑO", "CASTAÑA", "NIÑO", "CAMINO", "PLAYA", "CIUDAD", "GUITARRA", "MARIPOSA",
    "ELEFANTE", "CABALLO", "TORTUGA", "NARANJA", "MANZANA", "QUESO", "CUCHARA", "RELOJ",
    "ESTRELLA", "LLUVIA", "INVIERNO", "VERANO", "PUERTA", "ZAPATO", "BICICLETA", "MUSICA",
    "JARDIN", "COCINA", "ESPEJO", "PIRATA", "TESORO",
];

const ENGLISH: &[&str] = &[
    "WATER", "HOUSE", "TABLE", "DOG", "CAT", "TREE", "BOOK", "SCHOOL", "WINDOW", "MOUNTAIN",
    "RIVER", "BEACH", "CITY", "GUITAR", "BUTTERFLY", "ELEPHANT", "HORSE", "TURTLE", "ORANGE",
    "APPLE", "CHEESE", "SPOON", "CLOCK", "STAR", "RAIN", "WINTER", "SUMMER", "DOOR", "SHOE",
    "BICYCLE", "MUSIC", "GARDEN", "KITCHEN", "MIRROR", "PIRATE", "TREASURE", "KEYBOARD",
    "JOURNEY", "PUZZLE", "QUIZ",
];

/// Per-language fallback lists. Words are stored upper-cased.
#[derive(Debug, Clone)]
pub struct LocalWords {
    spanish: Vec<String>,
    english: Vec<String>,
}

impl LocalWords {
    pub fn new(spanish: Vec<String>, english: Vec<String>) -> Self {
        Self {
            spanish: normalize(spanish),
            english: normalize(english),
        }
    }

    pub fn words(&self, language: Language) -> &[String] {
        match language {
            Language::Es => &self.spanish,
            Language::En => &self.english,
        }
    }

    /// Uniform draw from the list for `language`, or [`FALLBACK_WORD`] if it is empty.
    pub fn pick(&self, language: Language, rng: &mut dyn RandomSource) -> String {
        let words = self.words(language);
        if words.is_empty() {
            return FALLBACK_WORD.to_string();
        }
        words
            .get(rng.index(words.len()))
            .cloned()
            .unwrap_or_else(|| FALLBACK_WORD.to_string())
    }
}

impl Default for LocalWords {
    fn default() -> Self {
        Self::new(
            SPANISH.iter().map(|w| w.to_string()).collect(),
            ENGLISH.iter().map(|w| w.to_string()).collect(),
        )
    }
}

fn normalize(words: Vec<String>) -> Vec<String> {
    words
        .into_iter()
        .map(|w| w.trim().to_uppercase())
        .filter(|w| !w.is_empty())
        .collect()
}

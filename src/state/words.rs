//! Built-in word list for the word-scramble minigame.

/// A word to unscramble together with the clue shown on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordEntry {
    pub word: &'static str,
    pub hint: &'static str,
}

const fn entry(word: &'static str, hint: &'static str) -> WordEntry {
    WordEntry { word, hint }
}

pub const WEDDING_WORDS: &[WordEntry] = &[
    entry("WEDDING", "The big celebration"),
    entry("BRIDE", "She walks down the aisle"),
    entry("GROOM", "He waits at the altar"),
    entry("CEREMONY", "The official event"),
    entry("RECEPTION", "The party after"),
    entry("BOUQUET", "Flowers the bride carries"),
    entry("VOWS", "Promises made at the altar"),
    entry("RINGS", "Symbols of eternal love"),
    entry("DANCE", "First one as a couple"),
    entry("TOAST", "Raise your glass!"),
    entry("FOREVER", "How long love lasts"),
    entry("LOVE", "The reason for it all"),
    entry("MARRIED", "Officially together"),
    entry("CHAPEL", "A place to wed"),
    entry("HONEYMOON", "Trip after the wedding"),
];

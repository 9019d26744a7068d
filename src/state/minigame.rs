use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom};
use thiserror::Error;

use crate::{dao::leaderboard_store::MAX_NICKNAME_LEN, state::words::WordEntry};

/// Points for a correct answer without the hint.
pub const POINTS_PLAIN: u32 = 10;
/// Points for a correct answer after the hint was revealed.
pub const POINTS_HINTED: u32 = 5;

/// Main screens of the word-scramble game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinigamePhase {
    /// Waiting for the player to pick a nickname.
    NicknameEntry,
    /// A scrambled word is on screen.
    Playing,
    /// Every word has been played.
    Complete,
}

/// Actions a player can attempt; reported back when one is not allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinigameAction {
    /// Leave nickname entry.
    Start,
    /// Submit an answer for the current word.
    Guess,
    RevealHint,
    Skip,
    /// Move on after feedback.
    Advance,
    /// Back to nickname entry.
    Restart,
}

/// Error returned when an action does not apply to the current phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {action:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// Phase the game was in.
    pub from: MinigamePhase,
    /// Action that was refused.
    pub action: MinigameAction,
}

/// Reasons a nickname is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NicknameError {
    /// Blank after trimming.
    #[error("nickname is required")]
    Empty,
    /// Longer than [`MAX_NICKNAME_LEN`] characters.
    #[error("nickname must be at most {MAX_NICKNAME_LEN} characters")]
    TooLong,
}

/// Errors raised by [`Minigame`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinigameError {
    /// The nickname was refused.
    #[error(transparent)]
    Nickname(#[from] NicknameError),
    /// The action is not allowed in the current phase.
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
}

/// Result of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The word was solved; `awarded` points were added and an advance is pending.
    Correct { awarded: u32 },
    /// The guess did not match; nothing changes.
    Wrong,
    /// A correct answer is waiting for [`Minigame::advance`].
    Ignored,
}

/// Score ready to be recorded on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSubmission {
    pub nickname: String,
    pub score: u32,
}

#[derive(Debug, Clone)]
struct CurrentWord {
    index: usize,
    scrambled: String,
    hint_revealed: bool,
}

/// Trim and check a nickname entered by the player.
pub fn validate_nickname(raw: &str) -> Result<String, NicknameError> {
    let nickname = raw.trim();
    if nickname.is_empty() {
        return Err(NicknameError::Empty);
    }
    if nickname.chars().count() > MAX_NICKNAME_LEN {
        return Err(NicknameError::TooLong);
    }
    Ok(nickname.to_owned())
}

/// Shuffle the letters of `word`, rerolling until the result differs from it.
///
/// Words whose letters are all identical (or shorter than two) come back unchanged.
pub fn scramble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    let has_other_arrangement = letters.windows(2).any(|pair| pair[0] != pair[1]);
    if !has_other_arrangement {
        return word.to_owned();
    }

    loop {
        letters.shuffle(rng);
        let candidate: String = letters.iter().collect();
        if candidate != word {
            return candidate;
        }
    }
}

/// Word-scramble state machine.
///
/// Words are drawn without replacement; the game completes once every word of
/// the list has been drawn. A correct guess scores immediately and leaves the
/// word on screen until [`advance`](Self::advance) is called, so a front-end
/// can show feedback in between.
#[derive(Debug)]
pub struct Minigame<R> {
    words: &'static [WordEntry],
    rng: R,
    phase: MinigamePhase,
    nickname: Option<String>,
    score: u32,
    used: HashSet<usize>,
    current: Option<CurrentWord>,
    advance_pending: bool,
    score_saved: bool,
    leaderboard_open: bool,
}

impl<R: Rng> Minigame<R> {
    /// Game over `words`, waiting for a nickname.
    pub fn new(words: &'static [WordEntry], rng: R) -> Self {
        Self {
            words,
            rng,
            phase: MinigamePhase::NicknameEntry,
            nickname: None,
            score: 0,
            used: HashSet::new(),
            current: None,
            advance_pending: false,
            score_saved: false,
            leaderboard_open: false,
        }
    }

    pub fn phase(&self) -> MinigamePhase {
        self.phase
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// `(words drawn so far, total words)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.used.len(), self.words.len())
    }

    /// Letters currently on screen.
    pub fn scrambled(&self) -> Option<&str> {
        self.current.as_ref().map(|current| current.scrambled.as_str())
    }

    /// Hint of the current word once it has been revealed.
    pub fn hint(&self) -> Option<&'static str> {
        self.current
            .as_ref()
            .filter(|current| current.hint_revealed)
            .map(|current| self.words[current.index].hint)
    }

    pub fn is_advance_pending(&self) -> bool {
        self.advance_pending
    }

    pub fn is_score_saved(&self) -> bool {
        self.score_saved
    }

    pub fn is_leaderboard_open(&self) -> bool {
        self.leaderboard_open
    }

    /// Show or hide the leaderboard overlay. Independent of the phase.
    pub fn toggle_leaderboard(&mut self) -> bool {
        self.leaderboard_open = !self.leaderboard_open;
        self.leaderboard_open
    }

    /// Leave nickname entry and draw the first word.
    pub fn start(&mut self, nickname: &str) -> Result<MinigamePhase, MinigameError> {
        self.ensure_phase(MinigamePhase::NicknameEntry, MinigameAction::Start)?;
        self.nickname = Some(validate_nickname(nickname)?);
        self.phase = MinigamePhase::Playing;
        self.next_word();
        Ok(self.phase)
    }

    /// Compare a guess with the current word, ignoring case and surrounding spaces.
    pub fn guess(&mut self, guess: &str) -> Result<GuessOutcome, InvalidTransition> {
        self.ensure_phase(MinigamePhase::Playing, MinigameAction::Guess)?;
        if self.advance_pending {
            return Ok(GuessOutcome::Ignored);
        }
        let Some(current) = self.current.as_ref() else {
            return Ok(GuessOutcome::Ignored);
        };

        if guess.to_uppercase() != self.words[current.index].word.to_uppercase() {
            return Ok(GuessOutcome::Wrong);
        }

        let awarded = if current.hint_revealed {
            POINTS_HINTED
        } else {
            POINTS_PLAIN
        };
        self.score += awarded;
        self.advance_pending = true;
        Ok(GuessOutcome::Correct { awarded })
    }

    /// Reveal the hint of the current word, halving what a correct answer is worth.
    pub fn reveal_hint(&mut self) -> Result<&'static str, InvalidTransition> {
        self.ensure_phase(MinigamePhase::Playing, MinigameAction::RevealHint)?;
        let words = self.words;
        let current = self.current.as_mut().ok_or(InvalidTransition {
            from: self.phase,
            action: MinigameAction::RevealHint,
        })?;
        current.hint_revealed = true;
        Ok(words[current.index].hint)
    }

    /// Move on without scoring. Returns `false` when ignored.
    pub fn skip(&mut self) -> Result<bool, InvalidTransition> {
        self.ensure_phase(MinigamePhase::Playing, MinigameAction::Skip)?;
        if self.advance_pending {
            return Ok(false);
        }
        self.next_word();
        Ok(true)
    }

    /// Draw the next word after a correct answer.
    pub fn advance(&mut self) -> Result<MinigamePhase, InvalidTransition> {
        self.ensure_phase(MinigamePhase::Playing, MinigameAction::Advance)?;
        if !self.advance_pending {
            return Err(InvalidTransition {
                from: self.phase,
                action: MinigameAction::Advance,
            });
        }
        self.next_word();
        Ok(self.phase)
    }

    /// Hand out the final score once per completed game.
    pub fn take_submission(&mut self) -> Option<ScoreSubmission> {
        if self.phase != MinigamePhase::Complete || self.score_saved {
            return None;
        }
        let nickname = self.nickname.clone()?;
        self.score_saved = true;
        Some(ScoreSubmission {
            nickname,
            score: self.score,
        })
    }

    /// Start over with the same nickname.
    pub fn restart(&mut self) -> Result<MinigamePhase, InvalidTransition> {
        if self.nickname.is_none() {
            return Err(InvalidTransition {
                from: self.phase,
                action: MinigameAction::Restart,
            });
        }
        self.score = 0;
        self.used.clear();
        self.score_saved = false;
        self.phase = MinigamePhase::Playing;
        self.next_word();
        Ok(self.phase)
    }

    fn ensure_phase(
        &self,
        expected: MinigamePhase,
        action: MinigameAction,
    ) -> Result<(), InvalidTransition> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(InvalidTransition {
                from: self.phase,
                action,
            })
        }
    }

    fn next_word(&mut self) {
        self.advance_pending = false;
        let available: Vec<usize> = (0..self.words.len())
            .filter(|index| !self.used.contains(index))
            .collect();

        if available.is_empty() {
            self.current = None;
            self.phase = MinigamePhase::Complete;
            return;
        }

        let index = available[self.rng.random_range(0..available.len())];
        self.used.insert(index);
        let scrambled = scramble(self.words[index].word, &mut self.rng);
        self.current = Some(CurrentWord {
            index,
            scrambled,
            hint_revealed: false,
        });
    }
}

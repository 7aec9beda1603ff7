//! Refill sources.
//!
//! Cascades draw fresh tokens through the `RefillSource` seam. Boards use
//! their seeded [`GameRng`]; tests and replays can inject a fixed script.

use crate::core::{BoardError, GameRng};
use crate::tokens::Token;

/// Supplies tokens for cells left empty after gravity.
pub trait RefillSource {
    /// Next token to drop into the board.
    fn next_token(&mut self) -> Token;
}

/// Uniform random basic tokens.
impl RefillSource for GameRng {
    fn next_token(&mut self) -> Token {
        self.next_basic()
    }
}

/// A fixed, cycling sequence of tokens.
///
/// ## Example
///
/// ```
/// use rust_match3::cascade::{RefillSource, ScriptedRefill};
/// use rust_match3::tokens::{Species, Token};
///
/// let mut refill = ScriptedRefill::from_codes("T P").unwrap();
/// assert_eq!(refill.next_token(), Token::Basic(Species::Totodile));
/// assert_eq!(refill.next_token(), Token::Basic(Species::Pichu));
/// assert_eq!(refill.next_token(), Token::Basic(Species::Totodile));
/// assert_eq!(refill.drawn(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedRefill {
    tokens: Vec<Token>,
    drawn: usize,
}

impl ScriptedRefill {
    /// Cycle through `tokens`. Panics if the sequence is empty.
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        let tokens: Vec<Token> = tokens.into_iter().collect();
        assert!(!tokens.is_empty(), "Scripted refill needs at least one token");
        Self { tokens, drawn: 0 }
    }

    /// Parse whitespace-separated token codes (`B`, `C+`, `D`, ...).
    pub fn from_codes(codes: &str) -> Result<Self, BoardError> {
        let tokens = codes
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<Token>, _>>()?;
        if tokens.is_empty() {
            return Err(BoardError::UnknownToken(codes.to_string()));
        }
        Ok(Self::new(tokens))
    }

    /// How many tokens have been handed out.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.drawn
    }
}

impl RefillSource for ScriptedRefill {
    fn next_token(&mut self) -> Token {
        let token = self.tokens[self.drawn % self.tokens.len()];
        self.drawn += 1;
        token
    }
}

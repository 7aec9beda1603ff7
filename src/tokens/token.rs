//! The token occupying a grid cell.
//!
//! A `Token` is a small `Copy` value: a stage tag carrying a species, or the
//! wildcard. Stages are told apart by matching, never by inspecting types.
//!
//! ## Text codes
//!
//! Tokens print as the species letter with a stage suffix:
//!
//! | Token | Code |
//! |---|---|
//! | Basic Bulbasaur | `B` |
//! | First evolution | `B+` |
//! | Second evolution | `B*` |
//! | Wildcard | `D` |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{BoardError, GameRng};

use super::species::Species;

/// Evolution stage of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Basic,
    FirstEvolution,
    SecondEvolution,
    Wildcard,
}

/// A grid occupant.
///
/// ## Example
///
/// ```
/// use rust_match3::tokens::{Species, Token};
///
/// let pichu = Token::Basic(Species::Pichu);
/// let raichu = pichu.second_evolved();
///
/// assert!(pichu.same_species(&raichu));
/// assert!(!Token::Wildcard.same_species(&Token::Wildcard));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    Basic(Species),
    FirstEvolution(Species),
    SecondEvolution(Species),
    /// Ditto: matches nothing in runs, clears a species when swapped.
    Wildcard,
}

impl Token {
    #[must_use]
    pub const fn basic(species: Species) -> Token {
        Token::Basic(species)
    }

    #[must_use]
    pub const fn wildcard() -> Token {
        Token::Wildcard
    }

    /// The token of `species` at `stage`.
    ///
    /// Panics for `Stage::Wildcard`, which belongs to no species.
    #[must_use]
    pub fn evolved(species: Species, stage: Stage) -> Token {
        match stage {
            Stage::Basic => Token::Basic(species),
            Stage::FirstEvolution => Token::FirstEvolution(species),
            Stage::SecondEvolution => Token::SecondEvolution(species),
            Stage::Wildcard => panic!("the wildcard has no species"),
        }
    }

    /// A basic token drawn uniformly from the species table.
    pub fn random_basic(rng: &mut GameRng) -> Token {
        Token::Basic(rng.next_species())
    }

    /// Species identity, `None` for the wildcard.
    #[must_use]
    pub const fn species(self) -> Option<Species> {
        match self {
            Token::Basic(s) | Token::FirstEvolution(s) | Token::SecondEvolution(s) => Some(s),
            Token::Wildcard => None,
        }
    }

    #[must_use]
    pub const fn stage(self) -> Stage {
        match self {
            Token::Basic(_) => Stage::Basic,
            Token::FirstEvolution(_) => Stage::FirstEvolution,
            Token::SecondEvolution(_) => Stage::SecondEvolution,
            Token::Wildcard => Stage::Wildcard,
        }
    }

    #[must_use]
    pub const fn is_wildcard(self) -> bool {
        matches!(self, Token::Wildcard)
    }

    /// Whether two tokens run together.
    ///
    /// Stages of one chain match each other; the wildcard matches nothing,
    /// not even another wildcard.
    #[must_use]
    pub fn same_species(&self, other: &Token) -> bool {
        match (self.species(), other.species()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// The first evolution of a basic token.
    ///
    /// Panics for any other stage.
    #[must_use]
    pub fn first_evolved(self) -> Token {
        match self {
            Token::Basic(s) => Token::FirstEvolution(s),
            other => panic!("{} has no first evolution", other.name()),
        }
    }

    /// The final form of a basic or first-evolution token.
    ///
    /// Panics for a second evolution or the wildcard.
    #[must_use]
    pub fn second_evolved(self) -> Token {
        match self {
            Token::Basic(s) | Token::FirstEvolution(s) => Token::SecondEvolution(s),
            other => panic!("{} has no second evolution", other.name()),
        }
    }

    /// Identifier name of this token (e.g. "Ivysaur").
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Token::Basic(s) => s.chain()[0],
            Token::FirstEvolution(s) => s.chain()[1],
            Token::SecondEvolution(s) => s.chain()[2],
            Token::Wildcard => "Ditto",
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Basic(s) => write!(f, "{}", s.code()),
            Token::FirstEvolution(s) => write!(f, "{}+", s.code()),
            Token::SecondEvolution(s) => write!(f, "{}*", s.code()),
            Token::Wildcard => f.write_str("D"),
        }
    }
}

impl FromStr for Token {
    type Err = BoardError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let unknown = || BoardError::UnknownToken(code.to_string());

        let mut chars = code.chars();
        let letter = chars.next().ok_or_else(unknown)?;
        let suffix = chars.next();
        if chars.next().is_some() {
            return Err(unknown());
        }

        if letter == 'D' && suffix.is_none() {
            return Ok(Token::Wildcard);
        }

        let species = Species::from_code(letter).ok_or_else(unknown)?;
        match suffix {
            None => Ok(Token::Basic(species)),
            Some('+') => Ok(Token::FirstEvolution(species)),
            Some('*') => Ok(Token::SecondEvolution(species)),
            Some(_) => Err(unknown()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evolved_matches_variants() {
        assert_eq!(Token::evolved(Species::Pichu, Stage::Basic), Token::basic(Species::Pichu));
        assert_eq!(
            Token::evolved(Species::Pichu, Stage::SecondEvolution),
            Token::basic(Species::Pichu).second_evolved()
        );
        assert!(Token::wildcard().is_wildcard());
    }

    #[test]
    #[should_panic]
    fn test_evolved_wildcard_stage_panics() {
        let _ = Token::evolved(Species::Pichu, Stage::Wildcard);
    }

    #[test]
    fn test_random_basic_is_seeded() {
        let mut a = GameRng::new(3);
        let mut b = GameRng::new(3);
        for _ in 0..20 {
            let token = Token::random_basic(&mut a);
            assert_eq!(token.stage(), Stage::Basic);
            assert_eq!(token, Token::random_basic(&mut b));
        }
    }

    #[test]
    fn test_same_species_across_stages() {
        let basic = Token::Basic(Species::Squirtle);
        let first = Token::FirstEvolution(Species::Squirtle);
        let second = Token::SecondEvolution(Species::Squirtle);

        assert!(basic.same_species(&first));
        assert!(first.same_species(&second));
        assert!(!basic.same_species(&Token::Basic(Species::Pichu)));
    }

    #[test]
    fn test_wildcard_matches_nothing() {
        let ditto = Token::Wildcard;
        assert!(ditto.is_wildcard());
        assert!(!ditto.same_species(&ditto));
        assert!(!ditto.same_species(&Token::Basic(Species::Pichu)));
        assert!(!Token::Basic(Species::Pichu).same_species(&ditto));
        assert_eq!(ditto.species(), None);
        assert_eq!(ditto.stage(), Stage::Wildcard);
    }

    #[test]
    fn test_evolution_accessors() {
        let bulbasaur = Token::Basic(Species::Bulbasaur);
        assert_eq!(bulbasaur.first_evolved(), Token::FirstEvolution(Species::Bulbasaur));
        assert_eq!(bulbasaur.second_evolved(), Token::SecondEvolution(Species::Bulbasaur));
        assert_eq!(
            bulbasaur.first_evolved().second_evolved(),
            Token::SecondEvolution(Species::Bulbasaur)
        );
        assert_eq!(bulbasaur.first_evolved().name(), "Ivysaur");
        assert_eq!(bulbasaur.second_evolved().name(), "Venusaur");
    }

    #[test]
    #[should_panic(expected = "Ivysaur has no first evolution")]
    fn test_first_evolved_requires_basic() {
        let _ = Token::FirstEvolution(Species::Bulbasaur).first_evolved();
    }

    #[test]
    #[should_panic(expected = "Ditto has no second evolution")]
    fn test_wildcard_does_not_evolve() {
        let _ = Token::Wildcard.second_evolved();
    }

    #[test]
    fn test_text_codes() {
        assert_eq!("K".parse::<Token>(), Ok(Token::Basic(Species::Chikorita)));
        assert_eq!("Y+".parse::<Token>(), Ok(Token::FirstEvolution(Species::Cyndaquil)));
        assert_eq!("T*".parse::<Token>(), Ok(Token::SecondEvolution(Species::Totodile)));
        assert_eq!("D".parse::<Token>(), Ok(Token::Wildcard));

        assert_eq!(Token::FirstEvolution(Species::Pichu).to_string(), "P+");
        assert_eq!(Token::Wildcard.to_string(), "D");
    }

    #[test]
    fn test_bad_text_codes() {
        for code in ["", "Q", "D+", "B!", "B+*"] {
            assert_eq!(
                code.parse::<Token>(),
                Err(BoardError::UnknownToken(code.to_string())),
                "code {:?} should be rejected",
                code
            );
        }
    }
}

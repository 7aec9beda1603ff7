//! Species identities and their evolution chains.

use serde::{Deserialize, Serialize};

/// One of the seven basic species.
///
/// A species is the identity shared by every stage of one evolution chain;
/// run detection compares species, never stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Bulbasaur,
    Charmander,
    Chikorita,
    Cyndaquil,
    Pichu,
    Squirtle,
    Totodile,
}

impl Species {
    /// Factory table for random refills, in index order.
    pub const BASIC: [Species; 7] = [
        Species::Bulbasaur,
        Species::Charmander,
        Species::Chikorita,
        Species::Cyndaquil,
        Species::Pichu,
        Species::Squirtle,
        Species::Totodile,
    ];

    /// Position of this species in [`Species::BASIC`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Names of the chain: basic, first evolution, second evolution.
    #[must_use]
    pub const fn chain(self) -> [&'static str; 3] {
        match self {
            Species::Bulbasaur => ["Bulbasaur", "Ivysaur", "Venusaur"],
            Species::Charmander => ["Charmander", "Charmeleon", "Charizard"],
            Species::Chikorita => ["Chikorita", "Bayleef", "Meganium"],
            Species::Cyndaquil => ["Cyndaquil", "Quilava", "Typhlosion"],
            Species::Pichu => ["Pichu", "Pikachu", "Raichu"],
            Species::Squirtle => ["Squirtle", "Wartortle", "Blastoise"],
            Species::Totodile => ["Totodile", "Croconaw", "Feraligatr"],
        }
    }

    /// Single-letter code used by the grid text format.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Species::Bulbasaur => 'B',
            Species::Charmander => 'C',
            Species::Chikorita => 'K',
            Species::Cyndaquil => 'Y',
            Species::Pichu => 'P',
            Species::Squirtle => 'S',
            Species::Totodile => 'T',
        }
    }

    /// Inverse of [`Species::code`].
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        Self::BASIC.into_iter().find(|s| s.code() == code)
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chain()[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table_matches_index() {
        for (i, species) in Species::BASIC.iter().enumerate() {
            assert_eq!(species.index(), i);
        }
    }

    #[test]
    fn test_codes_are_unique_and_round_trip() {
        for species in Species::BASIC {
            assert_eq!(Species::from_code(species.code()), Some(species));
        }
        assert_eq!(Species::from_code('D'), None);
        assert_eq!(Species::from_code('x'), None);
    }

    #[test]
    fn test_chain_names() {
        assert_eq!(Species::Pichu.chain(), ["Pichu", "Pikachu", "Raichu"]);
        assert_eq!(format!("{}", Species::Totodile), "Totodile");
    }
}

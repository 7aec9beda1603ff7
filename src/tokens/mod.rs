//! Token model: species identity and evolution metadata.
//!
//! - `Species`: the seven basic identities and their fixed 3-tier chains
//! - `Token`: a stage tag over a species, plus the wildcard
//!
//! Fresh tokens are always basic and drawn uniformly from
//! [`Species::BASIC`].

pub mod species;
pub mod token;

pub use species::Species;
pub use token::{Stage, Token};

//! Domain entities representing core business objects.

pub mod principal;
pub mod token;

#[cfg(test)]
mod tests;

pub use principal::Principal;
pub use token::{Claims, TokenKind, TokenPair};

//! Shamir secret sharing over a prime field.
//!
//! [`Reconstructor`] recovers the dealer's polynomial from a set of shares by
//! solving the Vandermonde system with Gauss-Jordan elimination; [`Dealer`]
//! is the inverse direction.

pub mod error;
pub mod params;
pub mod polynomial;
pub mod reconstruct;
pub mod shamir;
pub mod share;

pub use error::{ParseError, Result, ShamirError};
pub use polynomial::Polynomial;
pub use reconstruct::{reconstruct, Reconstructor};
pub use shamir::Dealer;
pub use share::{Share, ShareFile};

//! Flight and alliance data files.
//!
//! Both formats are `;`-separated text. Names are interned as they are read,
//! so loading both files with the same [`Interner`](crate::domain::Interner)
//! gives flights and alliances matching company symbols.

mod alliances;
mod error;
mod flights;

pub use alliances::{load_alliances, read_alliances};
pub use error::LoadError;
pub use flights::{load_flights, read_flights};

//! Error types for `restock-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unparsable date: {0:?}")]
  DateParse(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

use thiserror::Error;

use crate::Side;

/// Errors returned by the lookups of a [`crate::Bimap`].
///
/// Inserting a pair whose key already exists on either side is not an error:
/// [`crate::Bimap::insert`] returns the left end cursor instead.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    #[error("no such {side} key")]
    NotFound { side: Side },
}

pub type Result<T> = std::result::Result<T, Error>;

#[test]
fn not_found_message() {
    let err = Error::NotFound { side: Side::Right };
    assert_eq!(err.to_string(), "no such right key");
}

//! Random data generators for testing.
use rand::distr::Alphanumeric;
use rand::Rng;

/// Returns a random alphanumeric string of a certain size.
///
/// It is useful for generating random names, IDs, etc for testing.
#[must_use]
pub fn string(size: usize) -> String {
    rand::rng().sample_iter(&Alphanumeric).take(size).map(char::from).collect()
}

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Raised at construction time when the requested capacity cannot hold a single sample
    #[error("capacity must be at least 1, got {0}")]
    InvalidArgument(usize),

    /// Raised by an enumeration whose owning calculator was modified after the enumeration was created.
    /// The calculator itself is still usable, only the enumeration is invalidated.
    #[error("collection has been modified since the enumeration was created (captured generation {captured}, live generation {live})")]
    ConcurrentMutation { captured: i64, live: i64 },

    #[error("iterating past the end of the collection, call has_more_elements before each next_element")]
    EndOfSequence,
}

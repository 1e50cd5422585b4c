use std::fmt;

/// Error raised when a trie operation detects a broken structural invariant.
///
/// Both variants indicate a defect rather than a recoverable condition. The
/// map an operation was called on is left untouched.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A popcount-prefix index does not fit the child sequence of a node.
    InvalidIndex {
        chunk: u8,
        index: usize,
        len: usize,
    },
    /// A node of a kind the operation has no case for at this position.
    UnexpectedNode { level: usize, kind: &'static str },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidIndex { chunk, index, len } => write!(
                f,
                "invalid index {} for chunk {} in a node of {} children",
                index, chunk, len
            ),
            Error::UnexpectedNode { level, kind } => {
                write!(f, "unexpected {} node at level {}", kind, level)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result type for map operations.
pub type Result<T> = std::result::Result<T, Error>;

use std::fmt;

/// The error type of the fallible [`RingList`](crate::RingList) operations.
///
/// Every operation checks its arguments before touching the ring, so a
/// returned error always leaves the list exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RingError {
    /// The index could not be interpreted as a signed position.
    InvalidIndex(String),
    /// The (normalized) index fell outside of the valid range.
    ///
    /// `inclusive` is `true` for insertions, where `size` itself is a valid
    /// position.
    IndexOutOfRange {
        index: isize,
        size: usize,
        inclusive: bool,
    },
    /// The operation needs at least one node.
    EmptyRing,
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingError::InvalidIndex(value) => {
                write!(f, "index must be an integer, got: '{}'", value)
            }
            RingError::IndexOutOfRange {
                index,
                size,
                inclusive,
            } => {
                let close = if *inclusive { ']' } else { '[' };
                write!(
                    f,
                    "index must be in range [0 .. size{}, got index: {}, size: {}",
                    close, index, size
                )
            }
            RingError::EmptyRing => f.write_str("operation on an empty ring"),
        }
    }
}

impl std::error::Error for RingError {}

impl RingError {
    /// Returns `true` for [`RingError::InvalidIndex`].
    pub fn is_invalid_index(&self) -> bool {
        matches!(self, RingError::InvalidIndex(_))
    }

    /// Returns `true` for [`RingError::IndexOutOfRange`].
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, RingError::IndexOutOfRange { .. })
    }

    /// Returns `true` for [`RingError::EmptyRing`].
    pub fn is_empty_ring(&self) -> bool {
        matches!(self, RingError::EmptyRing)
    }
}

#[cfg(test)]
mod tests {
    use crate::RingError;

    #[test]
    fn error_messages() {
        assert_eq!(
            RingError::InvalidIndex("a".to_string()).to_string(),
            "index must be an integer, got: 'a'"
        );
        let attach = RingError::IndexOutOfRange {
            index: 4,
            size: 3,
            inclusive: true,
        };
        assert_eq!(
            attach.to_string(),
            "index must be in range [0 .. size], got index: 4, size: 3"
        );
        let detach = RingError::IndexOutOfRange {
            index: 3,
            size: 3,
            inclusive: false,
        };
        assert_eq!(
            detach.to_string(),
            "index must be in range [0 .. size[, got index: 3, size: 3"
        );
        assert!(detach.is_out_of_range());
        assert!(!detach.is_empty_ring());
        assert!(RingError::EmptyRing.is_empty_ring());
        assert!(RingError::InvalidIndex("x".to_string()).is_invalid_index());
        assert!(!RingError::EmptyRing.is_invalid_index());
    }
}

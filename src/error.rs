use std::fmt;

/// Structural inconsistencies detected while walking a ring to copy it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corruption {
    /// The list reports elements but has no head.
    MissingHead,
    /// A link points at a slot that holds no node.
    BrokenLink { index: usize },
    /// The walk visited more nodes than the list reports.
    Overrun { expected: usize },
    /// The ring closed after a different number of nodes than reported.
    CountMismatch { expected: usize, found: usize },
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Corruption::MissingHead => write!(f, "invalid source list head"),
            Corruption::BrokenLink { index } => {
                write!(f, "invalid node links at slot {index}")
            }
            Corruption::Overrun { expected } => {
                write!(f, "ring does not close after {expected} nodes")
            }
            Corruption::CountMismatch { expected, found } => {
                write!(f, "element count mismatch: expected {expected}, found {found}")
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListError {
    /// The operation needs at least one element.
    Empty(&'static str),
    /// The end position was dereferenced or advanced.
    EndPosition(&'static str),
    /// The position is stale or otherwise not acceptable to the operation.
    InvalidPosition(&'static str),
    Corrupted(Corruption),
}

impl ListError {
    #[inline]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, ListError::Empty(_) | ListError::EndPosition(_))
    }

    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ListError::InvalidPosition(_))
    }

    #[inline]
    pub fn is_corruption(&self) -> bool {
        matches!(self, ListError::Corrupted(_))
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::Empty(op) => write!(f, "{op}: empty list"),
            ListError::EndPosition(op) => write!(f, "{op}: end position"),
            ListError::InvalidPosition(op) => write!(f, "{op}: invalid position"),
            ListError::Corrupted(corruption) => {
                write!(f, "circular list structure corrupted: {corruption}")
            }
        }
    }
}

impl std::error::Error for ListError {}

impl From<Corruption> for ListError {
    fn from(corruption: Corruption) -> Self {
        ListError::Corrupted(corruption)
    }
}

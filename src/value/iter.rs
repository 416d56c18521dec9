/// The position of the current element while a list block renders its body
/// once per element.
///
/// Templates reach it through the `#` and `##` properties. It renders as its
/// effective index and is accepted by the numeric filters, `first` and
/// `last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iter {
    idx: usize,
    size: usize,
    sign: Sign,
}

/// How an [`Iter`] reports its index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sign {
    /// Zero-based, written `#`.
    #[default]
    Index,
    /// One-based, written `##`.
    Count,
}

impl Sign {
    /// Returns the sign written by the given iterator property.
    pub fn from_marker(property: &str) -> Self {
        if property.trim() == "##" {
            Self::Count
        } else {
            Self::Index
        }
    }
}

impl Iter {
    /// Construct a new zero-based iterator at `idx` of `size` elements.
    pub fn new(idx: usize, size: usize) -> Self {
        debug_assert!(idx < size, "iterator index out of bounds");
        Self {
            idx,
            size,
            sign: Sign::Index,
        }
    }

    pub(crate) fn with_sign(self, sign: Sign) -> Self {
        Self { sign, ..self }
    }

    /// The zero-based position.
    pub fn idx(&self) -> usize {
        self.idx
    }

    /// The number of elements being iterated.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// The position as written in the template, offset by one for `##`.
    pub fn index(&self) -> usize {
        match self.sign {
            Sign::Index => self.idx,
            Sign::Count => self.idx + 1,
        }
    }

    pub fn is_first(&self) -> bool {
        self.idx == 0
    }

    pub fn is_last(&self) -> bool {
        self.idx + 1 == self.size
    }
}

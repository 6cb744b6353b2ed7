use std::fmt;

use uuid::Uuid;

use crate::codec::{Alphabet, LOWER, UPPER};
use crate::BoxError;

/// Produces a fresh value for a new identifier.
pub type Generator = fn() -> Result<Uuid, BoxError>;

/// Binds a suffix alphabet and a value generator to an identifier kind, so that parsing
/// and formatting are written once for all kinds.
///
/// Processors are immutable statics, shared by every identifier of their kind.
pub struct Processor {
    alphabet: &'static Alphabet,
    generate: Generator,
}

impl Processor {
    /// The alphabet used for the suffix of this kind.
    pub fn alphabet(&self) -> &'static Alphabet {
        self.alphabet
    }

    /// The generator for new values of this kind.
    pub fn generator(&self) -> Generator {
        self.generate
    }
}

impl fmt::Debug for Processor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Processor")
            .field("symbols", &String::from_utf8_lossy(self.alphabet.symbols()))
            .finish_non_exhaustive()
    }
}

static RANDOM: Processor = Processor {
    alphabet: &UPPER,
    generate: new_v4,
};

static SORTABLE: Processor = Processor {
    alphabet: &LOWER,
    generate: now_v7,
};

fn new_v4() -> Result<Uuid, BoxError> {
    Ok(Uuid::new_v4())
}

fn now_v7() -> Result<Uuid, BoxError> {
    Ok(Uuid::now_v7())
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::RandomKind {}
    impl Sealed for super::SortableKind {}
}

/// An identifier kind.  Implemented only by [`RandomKind`] and [`SortableKind`].
pub trait Kind: sealed::Sealed {
    fn processor() -> &'static Processor;
}

/// Kind of entirely random identifiers: UUIDv4 values with an upper case suffix.
#[derive(Debug)]
pub enum RandomKind {}

/// Kind of k-sortable identifiers: UUIDv7 values with a lower case suffix.
#[derive(Debug)]
pub enum SortableKind {}

impl Kind for RandomKind {
    fn processor() -> &'static Processor {
        &RANDOM
    }
}

impl Kind for SortableKind {
    fn processor() -> &'static Processor {
        &SORTABLE
    }
}

use std::cell::Cell;

use crate::{Error, Result};

/// Lets an [enumeration](super::CircularQueueEnumeration) ask its owner whether the generation it
/// captured at creation is still the live one.
///
/// Implemented by [Generation], which is what calculators hand out, and by any `Fn(i64) -> Result<()>`,
/// which is convenient to stub in tests.
pub trait VolatilityCheck {
    fn check_volatility(&self, generation: i64) -> Result<()>;
}

impl<F> VolatilityCheck for F
where
    F: Fn(i64) -> Result<()>,
{
    fn check_volatility(&self, generation: i64) -> Result<()> {
        self(generation)
    }
}

/// A mutation fingerprint: a counter bumped once per modification of its owner.
///
/// This is a best-effort check, not a correctness guarantee. It reliably catches "iterate, modify,
/// iterate again" from a single thread of control, and nothing more. The counter is a plain [Cell],
/// so a [Generation] (and everything that shares it) is neither `Send` nor `Sync`.
#[derive(Debug)]
pub struct Generation(Cell<i64>);

impl Generation {
    pub const INITIAL: i64 = i64::MIN;

    pub(crate) fn new() -> Self {
        Self(Cell::new(Self::INITIAL))
    }

    pub fn current(&self) -> i64 {
        self.0.get()
    }

    /// Moves to the next generation and returns it
    pub(crate) fn incr(&self) -> i64 {
        // wrapping around would take 2^64 modifications
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }
}

impl VolatilityCheck for Generation {
    fn check_volatility(&self, generation: i64) -> Result<()> {
        let live = self.current();
        if generation != live {
            Err(Error::ConcurrentMutation {
                captured: generation,
                live,
            })
        } else {
            Ok(())
        }
    }
}

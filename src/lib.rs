//! A moving average over the last `N` samples, computed in constant time and bounded memory.
//!
//! ```rust
//! use movavg::{CircularQueueMovingAverageCalculator, MovingAverageCalculator, NumericEnumeration};
//!
//! let mut calculator = CircularQueueMovingAverageCalculator::new(3)?;
//! calculator.extend([2.0, 4.0, 6.0, 8.0]);
//! assert_eq!(calculator.moving_average(), 6.0);
//!
//! let mut samples = calculator.iterator();
//! while samples.has_more_elements()? {
//!     println!("{}", samples.next_element()?);
//! }
//! # Ok::<(), movavg::Error>(())
//! ```

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod builder;
mod error;

pub mod calculator;
pub mod enumeration;

pub use self::builder::*;
pub use self::calculator::{
    CircularQueueMovingAverageCalculator, MovingAverageCalculator, MovingAverageSummary,
};
pub use self::enumeration::{
    CircularQueueEnumeration, DefaultEnumerationFactory, EnumerationFactory, NumericEnumeration,
    VolatilityCheck,
};
pub use self::error::{Error, Result};

use std::{cell::Cell, rc::Rc};

use super::{CircularQueueEnumeration, VolatilityCheck};

/// Describes types that build the [enumerations](CircularQueueEnumeration) handed out by a
/// [calculator](crate::CircularQueueMovingAverageCalculator).
///
/// The default implementation just calls [CircularQueueEnumeration::new]. By implementing this trait and
/// passing your implementation to [MovingAverageCalculatorBuilder::with_enumeration_factory](crate::MovingAverageCalculatorBuilder::with_enumeration_factory),
/// you can observe exactly what a calculator passes when it creates an enumeration.
pub trait EnumerationFactory {
    fn create(
        &self,
        values: Rc<[Cell<f64>]>,
        start: usize,
        count: usize,
        generation: i64,
        volatility_check: Rc<dyn VolatilityCheck>,
    ) -> CircularQueueEnumeration;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultEnumerationFactory;

impl EnumerationFactory for DefaultEnumerationFactory {
    fn create(
        &self,
        values: Rc<[Cell<f64>]>,
        start: usize,
        count: usize,
        generation: i64,
        volatility_check: Rc<dyn VolatilityCheck>,
    ) -> CircularQueueEnumeration {
        CircularQueueEnumeration::new(values, start, count, generation, volatility_check)
    }
}

use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker for values that are zero or greater.
///
/// Used for empirical shape and profile factors where zero is meaningful
/// (it switches a term off) but a negative value is not.
///
/// # Examples
///
/// ```
/// use leaf_wetness::support::constraint::NonNegative;
///
/// assert_eq!(NonNegative::new(1.3).unwrap().get(), 1.3);
/// assert!(NonNegative::new(0.0).is_ok());
/// assert!(NonNegative::new(-0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is not negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or `NaN`.
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Length, length::inch};

    #[test]
    fn floats() {
        assert!(Constrained::<f64, NonNegative>::new(4.23057517532205).is_ok());
        assert!(NonNegative::new(0.0).is_ok());
        assert_eq!(NonNegative::new(-1e-12), Err(ConstraintError::Negative));
        assert_eq!(NonNegative::new(f64::NAN), Err(ConstraintError::NotANumber));
    }

    #[test]
    fn precipitation_depths() {
        assert!(NonNegative::new(Length::new::<inch>(0.0)).is_ok());
        assert!(NonNegative::new(Length::new::<inch>(0.1)).is_ok());
        assert!(NonNegative::new(Length::new::<inch>(-0.1)).is_err());
    }
}

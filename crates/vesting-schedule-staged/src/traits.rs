//! Traits that we use.

use core::marker::PhantomData;

/// An error that can happen at [`FracScale`].
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum FracScaleError {
    /// An overflow occurred.
    #[error("overflow")]
    Overflow,
    /// A division by zero occurred.
    #[error("division by zero")]
    DivisionByZero,
}

/// Fractional scaler.
///
/// Effectively represent multiplication of the value to a fraction operation: x * (a/b).
pub trait FracScale {
    /// The value type to scale.
    type Value;
    /// The type used for the fraction nominator and denominator.
    type FracPart;

    /// Compute `value` * (`nom` / `denom`), rounding down.
    fn frac_scale(
        value: &Self::Value,
        nom: &Self::FracPart,
        denom: &Self::FracPart,
    ) -> Result<Self::Value, FracScaleError>;
}

/// The exact scaler that never computes the full `value * nom` product.
///
/// The value is split as `q * denom + r`, so that `value * nom / denom` is
/// `q * nom + r * nom / denom` where `r * nom < denom * nom`.
/// Overflows only if the result itself does not fit, or if `denom * nom` does not fit.
pub struct SplitFracScaler<Value, FracPart>(PhantomData<(Value, FracPart)>);

impl<Value, FracPart> FracScale for SplitFracScaler<Value, FracPart>
where
    Value: num_traits::CheckedMul
        + num_traits::CheckedDiv
        + num_traits::CheckedRem
        + num_traits::CheckedAdd
        + num_traits::Zero
        + Copy,
    FracPart: Into<Value> + Copy,
{
    type Value = Value;
    type FracPart = FracPart;

    fn frac_scale(
        value: &Self::Value,
        nom: &Self::FracPart,
        denom: &Self::FracPart,
    ) -> Result<Self::Value, FracScaleError> {
        let nom: Value = (*nom).into();
        let denom: Value = (*denom).into();

        let quotient = value
            .checked_div(&denom)
            .ok_or(FracScaleError::DivisionByZero)?;
        let remainder = value
            .checked_rem(&denom)
            .ok_or(FracScaleError::DivisionByZero)?;

        let whole = quotient.checked_mul(&nom).ok_or(FracScaleError::Overflow)?;
        if remainder.is_zero() {
            return Ok(whole);
        }

        let fraction = remainder
            .checked_mul(&nom)
            .ok_or(FracScaleError::Overflow)?
            .checked_div(&denom)
            .ok_or(FracScaleError::DivisionByZero)?;
        whole.checked_add(&fraction).ok_or(FracScaleError::Overflow)
    }
}

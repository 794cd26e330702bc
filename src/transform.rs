//! Element-wise scaling of `f32` sequences.
//!
//! Each output element is `input[i] * factor`. Non-finite inputs are not
//! rejected: they propagate under IEEE-754 arithmetic, so NaN stays NaN and
//! infinities keep their magnitude (with the factor's sign applied). A finite
//! input whose product overflows becomes an infinity.

use crate::error::{Error, Result};

/// Factor applied when no configuration is given.
pub const DEFAULT_FACTOR: f32 = 2.0;

/// A fixed element-wise mapping `x -> x * factor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    factor: f32,
}

impl Transform {
    /// Build a transform with the given factor. The factor must be finite.
    pub fn new(factor: f32) -> Result<Self> {
        if !factor.is_finite() {
            return Err(Error::InvalidConfig(format!(
                "transform factor must be finite, got {factor:?}"
            )));
        }
        Ok(Self { factor })
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Map a single element.
    #[inline]
    pub fn apply_one(&self, x: f32) -> f32 {
        x * self.factor
    }

    /// Map every element into a freshly allocated vector of the same length.
    pub fn apply(&self, input: &[f32]) -> Vec<f32> {
        let non_finite = input.iter().filter(|x| !x.is_finite()).count();
        if non_finite > 0 {
            log::debug!(
                "transform: {non_finite} of {} inputs are non-finite, propagating",
                input.len()
            );
        }
        input.iter().map(|&x| self.apply_one(x)).collect()
    }

    /// Map into a caller-provided buffer. Fails without writing anything if
    /// `output` is shorter than `input`; extra trailing elements are left
    /// untouched.
    pub fn apply_into(&self, input: &[f32], output: &mut [f32]) -> Result<()> {
        if output.len() < input.len() {
            return Err(Error::BufferTooSmall {
                input: input.len(),
                output: output.len(),
            });
        }
        for (out, &x) in output.iter_mut().zip(input) {
            *out = self.apply_one(x);
        }
        Ok(())
    }

    /// Map every element of `values` in place.
    pub fn apply_in_place(&self, values: &mut [f32]) {
        for x in values.iter_mut() {
            *x = self.apply_one(*x);
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            factor: DEFAULT_FACTOR,
        }
    }
}

/// Apply the default transform (doubling) to every element.
pub fn transform(input: &[f32]) -> Vec<f32> {
    Transform::default().apply(input)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn length_preserved(input in prop::collection::vec(any::<f32>(), 0..256)) {
            prop_assert_eq!(transform(&input).len(), input.len());
        }

        /// Changing one element never changes any other output element.
        #[test]
        fn elements_are_independent(
            input in prop::collection::vec(-1.0e6f32..1.0e6, 1..64),
            idx in any::<prop::sample::Index>(),
            replacement in -1.0e6f32..1.0e6,
        ) {
            let i = idx.index(input.len());
            let mut changed = input.clone();
            changed[i] = replacement;

            let a = transform(&input);
            let b = transform(&changed);
            for j in 0..input.len() {
                if j != i {
                    prop_assert_eq!(a[j], b[j]);
                }
            }
            prop_assert_eq!(b[i], replacement * DEFAULT_FACTOR);
        }
    }
}

// Square root, natural log, exponential and power on fixed-point values.
//
// ln/exp use the classic range reduction (x = 2^k * m, e^x = 2^k * e^r) with
// the fdlibm minimax polynomials. Coefficients are converted to the target
// format once per call, so both formats share one implementation.

use super::{Arith, FixedError, FixedPoint, Overflow, Result};
use std::f64::consts::{LN_2, LOG2_E};

const LG: [f64; 7] = [
    6.666666666666735130e-01,
    3.999999999940941908e-01,
    2.857142874366239149e-01,
    2.222219843214978396e-01,
    1.818357216161805012e-01,
    1.531383769920937332e-01,
    1.479819860511658591e-01,
];

const EXP_P: [f64; 5] = [
    1.66666666666666019037e-01,
    -2.77777777770155933842e-03,
    6.61375632143793436117e-05,
    -1.65339022054652515390e-06,
    4.13813679705723846039e-08,
];

// Exponents up to this size take the exact repeated-multiplication path.
const MAX_INTEGER_EXPONENT: i128 = 64;

fn constant<F: FixedPoint>(value: f64) -> F {
    // Every constant above is well inside the range of both formats.
    F::from_f64(value).unwrap_or(F::ZERO)
}

impl Arith {
    /// Square root, rounded down. Negative input yields zero.
    pub fn sqrt<F: FixedPoint>(self, a: F) -> Result<F> {
        if a.raw() <= 0 {
            return Ok(F::ZERO);
        }
        let scaled = (a.raw() as u128) << F::FRAC_BITS;
        self.narrow(scaled.isqrt() as i128, "sqrt")
    }

    /// Natural logarithm; [`FixedError::Domain`] for `a <= 0`.
    pub fn ln<F: FixedPoint>(self, a: F) -> Result<F> {
        if a.raw() <= 0 {
            return Err(FixedError::Domain { op: "ln" });
        }

        // Normalize into [1, 2) keeping track of the power of two.
        let one = F::ONE.raw();
        let mut m = a.raw();
        let mut log2: i32 = 0;
        while m >= 2 * one {
            m >>= 1;
            log2 += 1;
        }
        while m < one {
            m <<= 1;
            log2 -= 1;
        }
        let m = F::from_raw_wrapping(m);

        let two = self.from_int::<F>(2)?;
        let f = self.sub(m, F::ONE)?;
        let s = self.div(f, self.add(two, f)?)?;
        let z = self.mul(s, s)?;
        let w = self.mul(z, z)?;
        let c = |i: usize| constant::<F>(LG[i]);

        let t1 = self.mul(
            w,
            self.add(c(1), self.mul(w, self.add(c(3), self.mul(w, c(5))?)?)?)?,
        )?;
        let t2 = self.mul(
            z,
            self.add(
                c(0),
                self.mul(w, self.add(c(2), self.mul(w, self.add(c(4), self.mul(w, c(6))?)?)?)?)?,
            )?,
        )?;
        let r = self.add(t1, t2)?;

        // ln(a) = log2 * ln(2) + f - s * (f - R)
        let hfsq = self.mul(s, self.sub(f, r)?)?;
        let scale = self.mul(constant::<F>(LN_2), self.from_int(log2)?)?;
        self.add(scale, self.sub(f, hfsq)?)
    }

    /// Natural exponential.
    pub fn exp<F: FixedPoint>(self, a: F) -> Result<F> {
        if a.raw() == 0 {
            return Ok(F::ONE);
        }

        // k = round(a / ln 2)
        let scaled = self.mul(self.abs(a)?, constant::<F>(LOG2_E))?;
        let half = F::ONE.raw() >> 1;
        let mut k = (scaled.raw() + half) >> F::FRAC_BITS;
        if a.is_negative() {
            k = -k;
        }

        let ln2 = constant::<F>(LN_2);
        let k_fixed = self.narrow::<F>(k << F::FRAC_BITS, "exp")?;
        let r = self.sub(a, self.mul(k_fixed, ln2)?)?;

        let z = self.mul(r, r)?;
        let p = |i: usize| constant::<F>(EXP_P[i]);
        let poly = self.add(
            p(0),
            self.mul(
                z,
                self.add(
                    p(1),
                    self.mul(z, self.add(p(2), self.mul(z, self.add(p(3), self.mul(z, p(4))?)?)?)?)?,
                )?,
            )?,
        )?;
        let big_r = self.add(self.from_int(2)?, self.mul(z, poly)?)?;
        let two_r = self.add(r, r)?;
        let xp = self.add(F::ONE, self.div(two_r, self.sub(big_r, r)?)?)?;

        if k >= 0 {
            // Shifted this far, no bit survives a wrap to the storage width
            // and the value is out of range for the other policies.
            if k >= 64 {
                return match self.overflow() {
                    Overflow::Wrapping => Ok(F::ZERO),
                    _ => self.narrow(i128::MAX, "exp"),
                };
            }
            self.narrow(xp.raw() << k, "exp")
        } else if -k >= 127 {
            Ok(F::ZERO)
        } else {
            Ok(F::from_raw_wrapping(xp.raw() >> -k))
        }
    }

    /// `base` raised to `exponent`.
    ///
    /// A zero exponent yields one and a non-positive base yields zero; the
    /// latter is outside the function's real domain for fractional exponents
    /// and the value carries no meaning. Small integer exponents are computed
    /// by exact repeated multiplication, everything else as
    /// `exp(ln(base) * exponent)`.
    pub fn pow<F: FixedPoint>(self, base: F, exponent: F) -> Result<F> {
        if exponent.raw() == 0 {
            return Ok(F::ONE);
        }
        if base.raw() <= 0 {
            return Ok(F::ZERO);
        }

        let frac_mask = (1i128 << F::FRAC_BITS) - 1;
        let whole = exponent.raw() >> F::FRAC_BITS;
        if exponent.raw() & frac_mask == 0 && whole.abs() <= MAX_INTEGER_EXPONENT {
            let positive = self.powi(base, whole.unsigned_abs() as u32)?;
            return if whole < 0 {
                self.div(F::ONE, positive)
            } else {
                Ok(positive)
            };
        }

        self.exp(self.mul(self.ln(base)?, exponent)?)
    }

    fn powi<F: FixedPoint>(self, base: F, mut n: u32) -> Result<F> {
        let mut result = F::ONE;
        let mut square = base;
        while n > 0 {
            if n & 1 == 1 {
                result = self.mul(result, square)?;
            }
            n >>= 1;
            if n > 0 {
                square = self.mul(square, square)?;
            }
        }
        Ok(result)
    }
}

use super::{FixedError, FixedPoint, Overflow, Result};

/// Fixed-point arithmetic bound to an overflow policy.
///
/// Each operation rounds exactly once (toward negative infinity for
/// multiplication, toward zero for division) and narrows the result with the
/// configured [`Overflow`] policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Arith {
    overflow: Overflow,
}

impl Arith {
    pub const fn new(overflow: Overflow) -> Self {
        Self { overflow }
    }

    pub const fn overflow(self) -> Overflow {
        self.overflow
    }

    pub(crate) fn narrow<F: FixedPoint>(self, raw: i128, op: &'static str) -> Result<F> {
        self.overflow.narrow(raw, op)
    }

    pub fn from_int<F: FixedPoint>(self, value: i32) -> Result<F> {
        self.narrow((value as i128) << F::FRAC_BITS, "from_int")
    }

    /// Convert a float, reporting values that do not fit the format.
    pub fn from_f64<F: FixedPoint>(self, value: f64) -> Result<F> {
        F::from_f64(value).ok_or(FixedError::NotRepresentable {
            value,
            format: F::NAME,
        })
    }

    pub fn add<F: FixedPoint>(self, a: F, b: F) -> Result<F> {
        self.narrow(a.raw() + b.raw(), "add")
    }

    pub fn sub<F: FixedPoint>(self, a: F, b: F) -> Result<F> {
        self.narrow(a.raw() - b.raw(), "sub")
    }

    pub fn mul<F: FixedPoint>(self, a: F, b: F) -> Result<F> {
        self.narrow((a.raw() * b.raw()) >> F::FRAC_BITS, "mul")
    }

    pub fn div<F: FixedPoint>(self, a: F, b: F) -> Result<F> {
        if b.raw() == 0 {
            return Err(FixedError::DivisionByZero);
        }
        self.narrow((a.raw() << F::FRAC_BITS) / b.raw(), "div")
    }

    pub fn neg<F: FixedPoint>(self, a: F) -> Result<F> {
        self.narrow(-a.raw(), "neg")
    }

    pub fn abs<F: FixedPoint>(self, a: F) -> Result<F> {
        self.narrow(a.raw().abs(), "abs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixed::{Fixed32, Fixed64};

    const SATURATING: Arith = Arith::new(Overflow::Saturating);
    const WRAPPING: Arith = Arith::new(Overflow::Wrapping);
    const CHECKED: Arith = Arith::new(Overflow::Checked);

    fn q16(v: f64) -> Fixed32 {
        Fixed32::from_f64(v).unwrap()
    }

    #[test]
    fn basic_operations_are_exact_for_dyadic_values() {
        let k = SATURATING;
        assert_eq!(k.add(q16(1.5), q16(2.25)).unwrap(), q16(3.75));
        assert_eq!(k.sub(q16(1.5), q16(2.25)).unwrap(), q16(-0.75));
        assert_eq!(k.mul(q16(1.5), q16(-2.5)).unwrap(), q16(-3.75));
        assert_eq!(k.div(q16(7.5), q16(2.5)).unwrap(), q16(3.0));
        assert_eq!(k.neg(q16(0.5)).unwrap(), q16(-0.5));
        assert_eq!(k.abs(q16(-0.5)).unwrap(), q16(0.5));
    }

    #[test]
    fn division_truncates_toward_zero() {
        let k = SATURATING;
        let one = Fixed32::ONE;
        let three = Fixed32::from_int(3);
        // 1/3 = 0x5555.5..
        assert_eq!(k.div(one, three).unwrap().to_bits(), 0x5555);
        assert_eq!(k.div(k.neg(one).unwrap(), three).unwrap().to_bits(), -0x5555);
    }

    #[test]
    fn division_by_zero_is_reported_under_every_policy() {
        for k in [SATURATING, WRAPPING, CHECKED] {
            assert_eq!(
                k.div(Fixed64::ONE, Fixed64::ZERO),
                Err(FixedError::DivisionByZero)
            );
        }
    }

    #[test]
    fn overflow_follows_policy() {
        let big = Fixed32::from_int(30_000);

        let saturated = SATURATING.add(big, big).unwrap();
        assert_eq!(saturated.to_bits(), i32::MAX);
        let saturated = SATURATING.mul(big, SATURATING.neg(big).unwrap()).unwrap();
        assert_eq!(saturated.to_bits(), i32::MIN);

        let wrapped = WRAPPING.add(big, big).unwrap();
        assert_eq!(wrapped.to_bits(), (30_000i32 << 16).wrapping_mul(2));

        assert_eq!(
            CHECKED.add(big, big),
            Err(FixedError::Overflow { op: "add" })
        );
        assert_eq!(
            CHECKED.from_int::<Fixed32>(40_000),
            Err(FixedError::Overflow { op: "from_int" })
        );
    }

    #[test]
    fn negating_the_minimum_saturates() {
        let min = Fixed64::from_bits(i64::MIN);
        assert_eq!(SATURATING.neg(min).unwrap().to_bits(), i64::MAX);
        assert_eq!(WRAPPING.neg(min).unwrap().to_bits(), i64::MIN);
    }

    #[test]
    fn from_f64_names_the_format() {
        assert_eq!(
            SATURATING.from_f64::<Fixed32>(1e9),
            Err(FixedError::NotRepresentable {
                value: 1e9,
                format: "q16.16"
            })
        );
    }
}

/*!
    Rational number type for time bases and frame rates.
*/

use std::fmt;

/**
    A rational number represented as a numerator and denominator.

    Used for stream time bases (e.g. 1/90000) and frame rates
    (e.g. 24000/1001 for 23.976 fps). The output file keeps the input's
    frame rate exactly, so it is never rounded to a float on the way through.
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    /**
        Create a new rational number.

        # Panics

        Panics if `den` is zero.
    */
    #[inline]
    pub const fn new(num: i32, den: i32) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        Self { num, den }
    }

    /**
        Create a rational that is strictly positive, or `None`.

        Containers report unknown frame rates as `0/0` or `0/1`.
    */
    #[inline]
    pub const fn positive(num: i32, den: i32) -> Option<Self> {
        if num > 0 && den > 0 {
            Some(Self { num, den })
        } else {
            None
        }
    }

    /**
        Invert the rational (swap numerator and denominator).

        A frame rate of 30/1 inverts to a per-frame time base of 1/30.

        # Panics

        Panics if numerator is zero.
    */
    #[inline]
    pub const fn invert(self) -> Self {
        assert!(self.num != 0, "cannot invert zero");
        Self {
            num: self.den,
            den: self.num,
        }
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "denominator cannot be zero")]
    fn zero_denominator_panics() {
        Rational::new(1, 0);
    }

    #[test]
    fn positive_rejects_unknown_rates() {
        assert_eq!(Rational::positive(0, 0), None);
        assert_eq!(Rational::positive(0, 1), None);
        assert_eq!(Rational::positive(-30, 1), None);
        assert_eq!(Rational::positive(30000, 1001), Some(Rational::new(30000, 1001)));
    }

    #[test]
    fn frame_rate_to_time_base() {
        let tb = Rational::new(25, 1).invert();
        assert_eq!(tb, Rational::new(1, 25));
    }

    #[test]
    #[should_panic(expected = "cannot invert zero")]
    fn invert_zero_panics() {
        Rational::new(0, 1).invert();
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Rational::new(24000, 1001)), "24000/1001");
        assert_eq!(format!("{:?}", Rational::new(1, 90000)), "1/90000");
    }
}

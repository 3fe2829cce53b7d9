use std::fmt;

//
// ─── QUOTIENT ─────────────────────────────────────────────────────────────────
//

/// `a / b`, truncated (not rounded) to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quotient {
    Value(f64),
    DivideByZero,
}

impl Quotient {
    /// Computes `floor(a / b * 100) / 100`, or `DivideByZero` when `b == 0`.
    #[must_use]
    pub fn of(a: i64, b: i64) -> Self {
        if b == 0 {
            return Quotient::DivideByZero;
        }

        // Hidden numbers are tiny, so the i64 -> f64 conversion is exact.
        #[allow(clippy::cast_precision_loss)]
        let (a, b) = (a as f64, b as f64);
        let value = (a / b * 100.0).floor() / 100.0;

        // avoid rendering "-0"
        if value == 0.0 {
            Quotient::Value(0.0)
        } else {
            Quotient::Value(value)
        }
    }
}

impl fmt::Display for Quotient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quotient::Value(value) => write!(f, "{value}"),
            Quotient::DivideByZero => f.write_str("Cannot divide by zero"),
        }
    }
}

//
// ─── HINTS ────────────────────────────────────────────────────────────────────
//

/// Arithmetic facts about the hidden pair shown to the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Hints {
    pub sum: i64,
    pub difference: i64,
    pub product: i64,
    pub quotient: Quotient,
}

impl Hints {
    pub const HEADER: &'static str = "___Hint___";

    /// Header followed by sum, difference, product and quotient, in that order.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        vec![
            Self::HEADER.to_owned(),
            format!("Add(A + B) : {}", self.sum),
            format!("Sub(A - B) : {}", self.difference),
            format!("Mul (A * B) : {}", self.product),
            format!("Div(A / B) : {}", self.quotient),
        ]
    }
}

/// Derive the four hints for `(a, b)`.
#[must_use]
pub fn compute_hints(a: i64, b: i64) -> Hints {
    Hints {
        sum: a + b,
        difference: a - b,
        product: a * b,
        quotient: Quotient::of(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_for_three_and_nine() {
        let hints = compute_hints(3, 9);
        assert_eq!(hints.sum, 12);
        assert_eq!(hints.difference, -6);
        assert_eq!(hints.product, 27);
        assert_eq!(hints.quotient, Quotient::Value(0.33));
        assert_eq!(
            hints.lines(),
            vec![
                "___Hint___",
                "Add(A + B) : 12",
                "Sub(A - B) : -6",
                "Mul (A * B) : 27",
                "Div(A / B) : 0.33",
            ]
        );
    }

    #[test]
    fn quotient_truncates_instead_of_rounding() {
        // 2 / 3 = 0.666..., rounding would give 0.67
        assert_eq!(Quotient::of(2, 3), Quotient::Value(0.66));
        // 7 / 9 = 0.777...
        assert_eq!(Quotient::of(7, 9).to_string(), "0.77");
    }

    #[test]
    fn quotient_renders_shortest_form() {
        assert_eq!(Quotient::of(9, 3).to_string(), "3");
        assert_eq!(Quotient::of(5, 2).to_string(), "2.5");
        assert_eq!(Quotient::of(1, 1).to_string(), "1");
    }

    #[test]
    fn zero_divisor_renders_sentinel() {
        let hints = compute_hints(4, 0);
        assert_eq!(hints.quotient, Quotient::DivideByZero);
        assert_eq!(hints.lines()[4], "Div(A / B) : Cannot divide by zero");
        assert_eq!(hints.sum, 4);
        assert_eq!(hints.product, 0);
    }

    #[test]
    fn equal_numbers_divide_to_one() {
        let hints = compute_hints(6, 6);
        assert_eq!(hints.difference, 0);
        assert_eq!(hints.quotient, Quotient::Value(1.0));
    }

    #[test]
    fn zero_numerator_is_not_negative() {
        assert_eq!(Quotient::of(0, -5).to_string(), "0");
    }
}

use std::f64::consts::E;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::ast::{Expr, Literal};
use crate::functions::{add, div, mul, sub};
use crate::functions::{abs, epoch_ms, exp, literal, ln, log, power, sign, sqrt};

/// A scale transform pairs a numeric forward/inverse mapping, used for
/// host-side domain computation, with SQL expression builders for the same
/// mapping, so binning can operate in a non-linear domain.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScaleTransform {
    #[default]
    Linear,
    Log {
        base: Option<f64>,
    },
    Symlog {
        constant: f64,
    },
    Sqrt,
    Pow {
        exponent: f64,
    },
    /// Maps date/time values to milliseconds since the UNIX epoch.
    /// Covers both local-time and UTC scales.
    #[serde(alias = "utc")]
    Time,
}

impl ScaleTransform {
    /// Apply the forward transform to a number. Time values are taken as
    /// epoch milliseconds.
    pub fn apply(&self, x: f64) -> f64 {
        match *self {
            ScaleTransform::Linear | ScaleTransform::Time => x,
            ScaleTransform::Log { base } => match base {
                None => x.ln(),
                Some(b) if b == E => x.ln(),
                Some(b) if b == 10.0 => x.log10(),
                Some(b) => x.ln() / b.ln(),
            },
            ScaleTransform::Symlog { constant } => x.signum() * (constant + x.abs()).ln(),
            ScaleTransform::Sqrt => x.signum() * x.abs().sqrt(),
            ScaleTransform::Pow { exponent } => x.signum() * x.abs().powf(exponent),
        }
    }

    /// Apply the inverse transform to a number.
    pub fn invert(&self, x: f64) -> f64 {
        match *self {
            ScaleTransform::Linear | ScaleTransform::Time => x,
            ScaleTransform::Log { base } => match base {
                None => x.exp(),
                Some(b) if b == E => x.exp(),
                Some(b) => b.powf(x),
            },
            ScaleTransform::Symlog { constant } => x.signum() * (x.abs().exp() - constant),
            ScaleTransform::Sqrt => x.signum() * x * x,
            ScaleTransform::Pow { exponent } => x.signum() * x.abs().powf(1.0 / exponent),
        }
    }

    /// Build a SQL expression for the forward transform.
    pub fn sql_apply(&self, expr: impl Into<Expr>) -> Expr {
        let c = expr.into();
        match *self {
            ScaleTransform::Linear => c,
            ScaleTransform::Log { base } => match base {
                None => ln(c),
                Some(b) if b == E => ln(c),
                Some(b) if b == 10.0 => log(c),
                Some(b) => div(ln(c), ln(b)),
            },
            ScaleTransform::Symlog { constant } => {
                mul(sign(c.clone()), ln(add(constant, abs(c))))
            }
            ScaleTransform::Sqrt => mul(sign(c.clone()), sqrt(abs(c))),
            ScaleTransform::Pow { exponent } => {
                mul(sign(c.clone()), power(abs(c), exponent))
            }
            // date literals convert directly, other values at query time
            ScaleTransform::Time => match c {
                Expr::Literal(Literal::Date(d)) => {
                    literal(d.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
                }
                Expr::Literal(Literal::Timestamp(t)) => literal(t.timestamp_millis()),
                c => epoch_ms(c),
            },
        }
    }

    /// Build a SQL expression for the inverse transform.
    pub fn sql_invert(&self, expr: impl Into<Expr>) -> Expr {
        let c = expr.into();
        match *self {
            ScaleTransform::Linear | ScaleTransform::Time => c,
            ScaleTransform::Log { base } => match base {
                None => exp(c),
                Some(b) if b == E => exp(c),
                Some(b) => power(b, c),
            },
            ScaleTransform::Symlog { constant } => {
                mul(sign(c.clone()), sub(exp(abs(c)), constant))
            }
            ScaleTransform::Sqrt => mul(sign(c.clone()), power(c, 2)),
            ScaleTransform::Pow { exponent } => {
                mul(sign(c.clone()), power(abs(c), div(1, exponent)))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::functions::column;

    #[test]
    fn linear_is_identity() {
        let s = ScaleTransform::Linear;
        assert_eq!(s.apply(3.5), 3.5);
        assert_eq!(s.sql_apply(column("u")).to_string(), r#""u""#);
        assert_eq!(s.sql_invert(column("u")).to_string(), r#""u""#);
    }

    #[test]
    fn log_scales_track_their_base() {
        let natural = ScaleTransform::Log { base: None };
        assert_eq!(natural.sql_apply(column("u")).to_string(), r#"ln("u")"#);
        assert_eq!(natural.sql_invert(column("u")).to_string(), r#"exp("u")"#);

        let decimal = ScaleTransform::Log { base: Some(10.0) };
        assert!((decimal.apply(1000.0) - 3.0).abs() < 1e-9);
        assert_eq!(decimal.sql_apply(column("u")).to_string(), r#"log("u")"#);
        assert_eq!(
            decimal.sql_invert(column("u")).to_string(),
            r#"pow(10, "u")"#
        );

        let binary = ScaleTransform::Log { base: Some(2.0) };
        assert!((binary.apply(8.0) - 3.0).abs() < 1e-9);
        assert_eq!(
            binary.sql_apply(column("u")).to_string(),
            format!(r#"(ln("u") / {})"#, 2f64.ln())
        );
    }

    #[test]
    fn symlog_is_signed_and_offset() {
        let s = ScaleTransform::Symlog { constant: 1.0 };
        assert_eq!(s.apply(0.0), 0.0);
        assert!((s.invert(s.apply(5.0)) - 5.0).abs() < 1e-9);
        assert_eq!(
            s.sql_apply(column("u")).to_string(),
            r#"(sign("u") * ln((1 + abs("u"))))"#
        );
    }

    #[test]
    fn sqrt_and_pow_preserve_sign() {
        assert_eq!(ScaleTransform::Sqrt.apply(-4.0), -2.0);
        assert_eq!(ScaleTransform::Pow { exponent: 2.0 }.apply(-3.0), -9.0);
        assert_eq!(
            ScaleTransform::Sqrt.sql_apply(column("u")).to_string(),
            r#"(sign("u") * sqrt(abs("u")))"#
        );
        assert_eq!(
            ScaleTransform::Pow { exponent: 2.0 }
                .sql_apply(column("u"))
                .to_string(),
            r#"(sign("u") * pow(abs("u"), 2))"#
        );
        assert_eq!(
            ScaleTransform::Sqrt.sql_invert(column("u")).to_string(),
            r#"(sign("u") * pow("u", 2))"#
        );
    }

    #[test]
    fn time_converts_date_literals_eagerly() {
        use chrono::NaiveDate;
        let s = ScaleTransform::Time;
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(
            s.sql_apply(Expr::Literal(Literal::Date(date))).to_string(),
            "1577836800000"
        );
        assert_eq!(s.sql_apply(column("t")).to_string(), r#"epoch_ms("t")"#);
    }
}

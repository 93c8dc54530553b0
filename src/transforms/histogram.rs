use crate::ast::{Expr, IntervalExpr};
use crate::functions::{add, date_bin, div, float64, floor, interval, mul, sub};

use super::bin_step::{bin_spec, BinOptions};
use super::scales::ScaleTransform;
use super::time_interval::time_interval;

/// Build a SQL expression mapping values of `field` to histogram bin
/// starts over the extent `[lo, hi]`, optionally in the non-linear domain
/// of a scale transform.
pub fn bin_histogram(
    field: impl Into<Expr>,
    extent: (f64, f64),
    options: &BinOptions,
    transform: &ScaleTransform,
) -> Expr {
    let (lo, hi) = extent;
    let b = bin_spec(transform.apply(lo), transform.apply(hi), options);
    let col = transform.sql_apply(field);
    let alpha = (b.max - b.min) / b.steps as f64;

    let mut expr = if b.min == 0.0 { col } else { sub(col, b.min) };
    if alpha != 1.0 {
        expr = div(expr, float64(alpha));
    }
    expr = floor(if options.offset != 0.0 {
        add(options.offset, expr)
    } else {
        expr
    });
    if alpha != 1.0 {
        expr = mul(alpha, expr);
    }
    if b.min != 0.0 {
        expr = add(b.min, expr);
    }
    transform.sql_invert(expr)
}

/// Build a SQL expression truncating date/time values of `field` to
/// calendar-aware bins. The extent is given in epoch milliseconds; the
/// interval granularity is chosen to approximate the desired step count
/// (40 steps when unspecified).
pub fn bin_date(field: impl Into<Expr>, extent: (f64, f64), options: &BinOptions) -> Expr {
    let (lo, hi) = extent;
    let t = time_interval(lo, hi, options.steps.unwrap_or(40));
    let bin = date_bin(field, IntervalExpr::new(t.unit.to_string(), t.step));
    if options.offset != 0.0 {
        add(bin, interval(t.unit.to_string(), options.offset * t.step))
    } else {
        bin
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::functions::column;
    use insta::assert_snapshot;

    #[test]
    fn histogram_bins_scale_and_shift() {
        let expr = bin_histogram(
            column("foo"),
            (0.0, 100.0),
            &BinOptions {
                steps: Some(10),
                ..Default::default()
            },
            &ScaleTransform::Linear,
        );
        assert_snapshot!(
            expr.to_string(),
            @r#"(10 * floor(("foo" / (10)::DOUBLE)))"#
        );
    }

    #[test]
    fn zero_based_extents_elide_the_offset() {
        let expr = bin_histogram(
            column("foo"),
            (2.0, 9.0),
            &BinOptions::default(),
            &ScaleTransform::Linear,
        );
        assert_snapshot!(
            expr.to_string(),
            @r#"(2 + (0.5 * floor((("foo" - 2) / (0.5)::DOUBLE))))"#
        );
    }

    #[test]
    fn step_offsets_shift_before_truncation() {
        let expr = bin_histogram(
            column("foo"),
            (0.0, 100.0),
            &BinOptions {
                steps: Some(10),
                offset: 1.0,
                ..Default::default()
            },
            &ScaleTransform::Linear,
        );
        assert_snapshot!(
            expr.to_string(),
            @r#"(10 * floor((1 + ("foo" / (10)::DOUBLE))))"#
        );
    }

    #[test]
    fn log_domains_invert_after_binning() {
        let expr = bin_histogram(
            column("foo"),
            (1.0, 1000.0),
            &BinOptions {
                steps: Some(3),
                nice: false,
                ..Default::default()
            },
            &ScaleTransform::Log { base: Some(10.0) },
        );
        assert_snapshot!(
            expr.to_string(),
            @r#"pow(10, floor(log("foo")))"#
        );
    }

    #[test]
    fn date_bins_truncate_to_intervals() {
        let year = 365.0 * 24.0 * 60.0 * 60.0 * 1000.0;
        let expr = bin_date(column("date"), (0.0, year), &BinOptions::default());
        assert_snapshot!(
            expr.to_string(),
            @r#"time_bucket(INTERVAL 7 day, "date")"#
        );
    }
}

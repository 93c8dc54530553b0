use std::f64::consts::LN_10;

/// Options controlling a numeric binning scheme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinOptions {
    /// An exact binning step to use, overriding automatic selection.
    pub step: Option<f64>,
    /// The desired number of binning steps. This value is a hint, it does
    /// not guarantee an exact number of steps.
    pub steps: Option<usize>,
    /// A minimum binning step value. No generated step can be less than
    /// this value.
    pub minstep: f64,
    /// If true (the default), snap bin extents to "nice" numbers such as
    /// multiples of 5 or 10.
    pub nice: bool,
    /// The logarithm base for automatic step size determination.
    /// Defaults to base 10.
    pub base: Option<f64>,
    /// The number of bin steps by which to offset the result.
    pub offset: f64,
}

impl Default for BinOptions {
    fn default() -> Self {
        BinOptions {
            step: None,
            steps: None,
            minstep: 0.0,
            nice: true,
            base: None,
            offset: 0.0,
        }
    }
}

/// A binning scheme: an aligned extent and the resulting step count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinSchema {
    pub min: f64,
    pub max: f64,
    pub steps: usize,
}

/// Generate a numeric binning scheme suitable for a histogram over the
/// extent `[min, max]`.
pub fn bin_spec(mut min: f64, mut max: f64, options: &BinOptions) -> BinSchema {
    let mut steps = options.steps.unwrap_or(25) as f64;

    if options.nice {
        // use span to determine step size
        let span = max - min;
        let logb = options.base.map_or(LN_10, f64::ln);
        let step = options
            .step
            .unwrap_or_else(|| bin_step(span, steps, options.minstep, logb));

        // adjust min/max relative to step
        let v = step.ln();
        let precision = if v >= 0.0 { 0 } else { (-v / logb) as i32 + 1 };
        let eps = 10f64.powi(-precision - 1);
        let v = (min / step + eps).floor() * step;
        min = if min < v { v - step } else { v };
        max = (max / step).ceil() * step;
        steps = ((max - min) / step).round();
        log::debug!("binning extent [{min}, {max}] with step {step}");
    }

    BinSchema {
        min,
        max,
        steps: steps as usize,
    }
}

/// Determine a bin step interval for the given span and approximate
/// number of desired bins. The step is a multiple of 1, 2, or 5 times a
/// power of the log base `logb` (pass [`LN_10`] for decimal steps), and
/// never less than `minstep`.
pub fn bin_step(span: f64, steps: f64, minstep: f64, logb: f64) -> f64 {
    let level = (steps.ln() / logb).ceil();
    let mut step = minstep.max(10f64.powf((span.ln() / logb).round() - level));

    // increase step size if too many bins
    while (span / step).ceil() > steps {
        step *= 10.0;
    }

    // decrease step size if allowed
    for div in [5.0, 2.0] {
        let v = step / div;
        if v >= minstep && span / v <= steps {
            step = v;
        }
    }

    step
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn steps_are_nice_multiples() {
        assert_eq!(bin_step(100.0, 25.0, 0.0, LN_10), 5.0);
        assert_eq!(bin_step(1000.0, 25.0, 0.0, LN_10), 50.0);
        assert_eq!(bin_step(137.0, 10.0, 0.0, LN_10), 20.0);
    }

    #[test]
    fn minstep_bounds_the_interval() {
        assert_eq!(bin_step(100.0, 25.0, 10.0, LN_10), 10.0);
    }

    #[test]
    fn extents_snap_to_step_boundaries() {
        let b = bin_spec(0.3, 9.7, &BinOptions::default());
        assert_eq!(b.min, 0.0);
        assert_eq!(b.max, 10.0);
        assert_eq!(b.steps, 20);
    }

    #[test]
    fn raw_extents_pass_through_when_not_nice() {
        let b = bin_spec(
            0.3,
            9.7,
            &BinOptions {
                nice: false,
                steps: Some(10),
                ..Default::default()
            },
        );
        assert_eq!(b.min, 0.3);
        assert_eq!(b.max, 9.7);
        assert_eq!(b.steps, 10);
    }
}

use crate::ast::{Expr, WindowExpr, WindowFunc};

use super::win_fn;

pub fn row_number() -> WindowExpr {
    win_fn::<[Expr; 0], Expr>("row_number", [])
}

pub fn rank() -> WindowExpr {
    win_fn::<[Expr; 0], Expr>("rank", [])
}

pub fn dense_rank() -> WindowExpr {
    win_fn::<[Expr; 0], Expr>("dense_rank", [])
}

pub fn percent_rank() -> WindowExpr {
    win_fn::<[Expr; 0], Expr>("percent_rank", [])
}

pub fn cume_dist() -> WindowExpr {
    win_fn::<[Expr; 0], Expr>("cume_dist", [])
}

pub fn ntile(num_buckets: impl Into<Expr>) -> WindowExpr {
    win_fn("ntile", [num_buckets.into()])
}

pub fn lag(expr: impl Into<Expr>) -> WindowExpr {
    win_fn("lag", [expr.into()])
}

pub fn lag_by(expr: impl Into<Expr>, offset: impl Into<Expr>) -> WindowExpr {
    win_fn("lag", [expr.into(), offset.into()])
}

pub fn lead(expr: impl Into<Expr>) -> WindowExpr {
    win_fn("lead", [expr.into()])
}

pub fn lead_by(expr: impl Into<Expr>, offset: impl Into<Expr>) -> WindowExpr {
    win_fn("lead", [expr.into(), offset.into()])
}

pub fn first_value(expr: impl Into<Expr>) -> WindowExpr {
    win_fn("first_value", [expr.into()])
}

pub fn last_value(expr: impl Into<Expr>) -> WindowExpr {
    win_fn("last_value", [expr.into()])
}

pub fn nth_value(expr: impl Into<Expr>, nth: impl Into<Expr>) -> WindowExpr {
    win_fn("nth_value", [expr.into(), nth.into()])
}

impl WindowExpr {
    /// Derive a window whose function ignores null inputs. Only window
    /// functions support the modifier; aggregates pass through unchanged.
    pub fn ignore_nulls(&self) -> Self {
        let mut derived = self.clone();
        if let WindowFunc::Function(func) = &mut derived.func {
            func.ignore_nulls = true;
        }
        derived
    }
}

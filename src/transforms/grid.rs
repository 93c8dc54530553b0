use crate::ast::{Expr, Query, SelectItem, SelectQuery};
use crate::functions::{add, column, float64, floor, int32, mul, neq, sub, sum};

/// Build a SQL expression mapping values of `x` over the extent
/// `[x0, x1]` to fractional positions on a grid of `n` cells. A reversed
/// axis measures from the upper bound instead. A degenerate extent
/// (`x0 == x1`) produces the unscaled offset expression.
pub fn bin_1d(x: impl Into<Expr>, x0: f64, x1: f64, n: usize, reverse: bool, pad: usize) -> Expr {
    let scale = if x1 == x0 {
        0.0
    } else {
        (n as f64 - pad as f64) / (x1 - x0)
    };
    let offset = if reverse {
        sub(x1, float64(x))
    } else {
        sub(float64(x), x0)
    };
    if scale == 0.0 || scale == 1.0 {
        offset
    } else {
        mul(offset, float64(scale))
    }
}

/// Aggregate a query into grid cells: each row lands in the single cell
/// under its truncated `(x, y)` position. The aggregate `value` select
/// item provides the cell value, grouped on a flattened cell `index`.
pub fn bin_2d(
    q: SelectQuery,
    xp: impl Into<Expr>,
    yp: impl Into<Expr>,
    value: impl Into<SelectItem>,
    xn: usize,
    groupby: &[String],
) -> SelectQuery {
    let index = add(
        int32(floor(xp)),
        mul(int32(floor(yp)), Expr::from(xn as i64)),
    );
    q.select([SelectItem::new(index, "index"), value.into()])
        .groupby(
            std::iter::once(column("index")).chain(groupby.iter().map(|g| column(g))),
        )
}

/// Compute densities over a 1D grid using linear binning. Each row
/// distributes unit (or `weight`) mass between the two integer bins
/// bracketing its fractional position `p`, a better base for subsequent
/// kernel density smoothing than simple truncation.
pub fn bin_linear_1d(
    q: SelectQuery,
    p: impl Into<Expr>,
    weight: Option<Expr>,
    groupby: &[String],
) -> SelectQuery {
    let p = p.into();
    let w = |x: Expr| match &weight {
        Some(v) => mul(x, v.clone()),
        None => x,
    };
    let subq = |i: Expr, w: Expr| {
        q.clone().select([
            SelectItem::new(p.clone(), "p"),
            SelectItem::new(i, "i"),
            SelectItem::new(w, "w"),
        ])
    };

    let u = int32(floor(p.clone()));
    let v = add(u.clone(), 1);

    // lower bin takes (u + 1 - p), upper bin the complementary (p - u)
    let lower = subq(u.clone(), w(sub(v.clone(), p.clone())));
    let upper = subq(v.clone(), w(sub(p.clone(), u.clone())));

    grid_sum(Query::union_all([lower.into(), upper.into()]).into(), groupby)
}

/// Compute densities over a 2D grid using linear binning. The weight of
/// each row is split across the 4 cells surrounding its fractional
/// `(xp, yp)` position with bilinear weights, flattened to a cell
/// `index = x + y * xn`.
pub fn bin_linear_2d(
    q: SelectQuery,
    xp: impl Into<Expr>,
    yp: impl Into<Expr>,
    weight: Option<Expr>,
    xn: usize,
    groupby: &[String],
) -> SelectQuery {
    let xp = xp.into();
    let yp = yp.into();
    let w = |x: Expr| match &weight {
        Some(v) => mul(x, v.clone()),
        None => x,
    };
    let subq = |i: Expr, w: Expr| {
        q.clone().select([
            SelectItem::new(xp.clone(), "xp"),
            SelectItem::new(yp.clone(), "yp"),
            SelectItem::new(i, "i"),
            SelectItem::new(w, "w"),
        ])
    };
    let index = |x: Expr, y: Expr| add(x, mul(y, Expr::from(xn as i64)));

    let xu = int32(floor(xp.clone()));
    let yu = int32(floor(yp.clone()));
    let xv = add(xu.clone(), 1);
    let yv = add(yu.clone(), 1);
    let xpu = sub(xp.clone(), xu.clone());
    let xvp = sub(xv.clone(), xp.clone());
    let ypu = sub(yp.clone(), yu.clone());
    let yvp = sub(yv.clone(), yp.clone());

    // cell[xu + yu * xn] += (xv - xp) * (yv - yp)
    // cell[xu + yv * xn] += (xv - xp) * (yp - yu)
    // cell[xv + yu * xn] += (xp - xu) * (yv - yp)
    // cell[xv + yv * xn] += (xp - xu) * (yp - yu)
    let parts = [
        subq(index(xu.clone(), yu.clone()), w(mul(xvp.clone(), yvp.clone()))).into(),
        subq(index(xu.clone(), yv.clone()), w(mul(xvp, ypu.clone()))).into(),
        subq(index(xv.clone(), yu), w(mul(xpu.clone(), yvp))).into(),
        subq(index(xv, yv), w(mul(xpu, ypu))).into(),
    ];

    grid_sum(Query::union_all(parts).into(), groupby)
}

/// Sum fractional weights per cell index and drop empty cells.
fn grid_sum(union: Query, groupby: &[String]) -> SelectQuery {
    let mut items = vec![
        SelectItem::new(column("i"), "index"),
        SelectItem::new(sum(column("w")), "density"),
    ];
    items.extend(groupby.iter().map(|g| SelectItem::from(g.as_str())));

    Query::from_items([union])
        .select(items)
        .groupby(std::iter::once(column("index")).chain(groupby.iter().map(|g| column(g))))
        .having(neq(column("density"), 0))
}

#[cfg(test)]
mod test {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn grid_positions_scale_the_offset() {
        assert_snapshot!(
            bin_1d(column("u"), 0.0, 50.0, 101, false, 1).to_string(),
            @r#"((("u")::DOUBLE - 0) * (2)::DOUBLE)"#
        );
        assert_snapshot!(
            bin_1d(column("u"), 10.0, 20.0, 21, true, 1).to_string(),
            @r#"((20 - ("u")::DOUBLE) * (2)::DOUBLE)"#
        );
    }

    #[test]
    fn padding_can_exceed_the_cell_count() {
        assert_snapshot!(
            bin_1d(column("u"), 0.0, 10.0, 2, false, 4).to_string(),
            @r#"((("u")::DOUBLE - 0) * (-0.2)::DOUBLE)"#
        );
    }

    #[test]
    fn degenerate_extents_skip_the_scale_factor() {
        assert_snapshot!(
            bin_1d(column("u"), 5.0, 5.0, 10, false, 1).to_string(),
            @r#"(("u")::DOUBLE - 5)"#
        );
    }

    #[test]
    fn cells_flatten_to_a_single_index() {
        let q = bin_2d(
            Query::from_items(["data"]),
            column("x"),
            column("y"),
            ("density", Expr::from(sum(column("v")))),
            10,
            &[],
        );
        assert_snapshot!(
            q.to_string(),
            @r#"SELECT ((floor("x"))::INTEGER + ((floor("y"))::INTEGER * 10)) AS "index", sum("v") AS "density" FROM "data" GROUP BY "index""#
        );
    }

    #[test]
    fn linear_1d_splits_weight_across_bins() {
        let q = bin_linear_1d(Query::from_items(["data"]), column("u"), None, &[]);
        assert_snapshot!(
            q.to_string(),
            @r#"SELECT "i" AS "index", sum("w") AS "density" FROM (SELECT "u" AS "p", (floor("u"))::INTEGER AS "i", (((floor("u"))::INTEGER + 1) - "u") AS "w" FROM "data" UNION ALL SELECT "u" AS "p", ((floor("u"))::INTEGER + 1) AS "i", ("u" - (floor("u"))::INTEGER) AS "w" FROM "data") GROUP BY "index" HAVING ("density" <> 0)"#
        );
    }

    #[test]
    fn linear_2d_uses_bilinear_weights() {
        let q = bin_linear_2d(
            Query::from_items(["data"]),
            column("x"),
            column("y"),
            Some(column("z")),
            5,
            &[],
        );
        let sql = q.to_string();
        assert!(sql.contains(r#"(((floor("x"))::INTEGER + 1) - "x")"#));
        assert!(sql.contains(r#"("y" - (floor("y"))::INTEGER)"#));
        assert!(sql.contains(r#"* "z")"#));
        assert!(sql.ends_with(r#"GROUP BY "index" HAVING ("density" <> 0)"#));
    }
}

use crate::ast::{Expr, Query, SelectItem, SelectQuery};
use crate::functions::{
    abs, add, asc, column, count, cte, div, floor, fragment, greatest, gt, int32, is_null, lead,
    lt, lte, max, mul, or, over, round, sign, sub, sum, verbatim,
};

/// Compute line segment densities over a gridded 2D domain. The returned
/// query chains CTEs to pair consecutive points per series, rasterize each
/// segment in-database, normalize arc lengths, and sum all series into a
/// density map. Based on Moritz and Fisher, https://arxiv.org/abs/1808.06019,
/// restricted to SQL primitives: window functions plus a synthetic
/// index-generation join in place of iteration.
///
/// `x` and `y` give gridded, potentially fractional coordinates per row;
/// `z` columns split the data into individual line series; `groupby`
/// produces a separate density map per group. When `normalize` is set,
/// each pixel's weight is divided by the number of series covering it.
#[allow(clippy::too_many_arguments)]
pub fn line_density(
    q: SelectQuery,
    x: impl Into<Expr>,
    y: impl Into<Expr>,
    z: &[String],
    xn: usize,
    yn: usize,
    groupby: &[String],
    normalize: bool,
) -> SelectQuery {
    // bin input points to the grid
    let q = q.select([
        SelectItem::new(int32(floor(x)), "x"),
        SelectItem::new(int32(floor(y)), "y"),
    ]);

    let groups: Vec<String> = groupby.iter().chain(z.iter()).cloned().collect();
    let group_items = |items: &mut Vec<SelectItem>| {
        items.extend(groups.iter().map(|g| SelectItem::from(g.as_str())));
    };
    let xn_ = xn as i64;
    let yn_ = yn as i64;

    // consecutive end point pairs per series, kept only if the segment
    // intersects the grid region
    let pairs = {
        let mut items = Vec::new();
        group_items(&mut items);
        items.push(SelectItem::new(column("x"), "x0"));
        items.push(SelectItem::new(column("y"), "y0"));
        items.push(SelectItem::new(
            sub(lead(column("x")).over("sw"), column("x")),
            "dx",
        ));
        items.push(SelectItem::new(
            sub(lead(column("y")).over("sw"), column("y")),
            "dy",
        ));
        Query::from_items([q])
            .select(items)
            .window([(
                "sw",
                over()
                    .partitionby(groups.iter().map(|g| column(g)))
                    .orderby([asc(column("x"))]),
            )])
            .qualify(or([
                lt(column("x0"), xn_),
                lt(add(column("x0"), column("dx")), xn_),
            ]))
            .qualify(or([
                lt(column("y0"), yn_),
                lt(add(column("y0"), column("dy")), yn_),
            ]))
            .qualify(or([
                gt(column("x0"), 0),
                gt(add(column("x0"), column("dx")), 0),
            ]))
            .qualify(or([
                gt(column("y0"), 0),
                gt(add(column("y0"), column("dy")), 0),
            ]))
    };

    // enough indices to step across the longest segment
    let num = Query::select([SelectItem::new(
        greatest([
            Expr::from(max(abs(column("dx")))),
            Expr::from(max(abs(column("dy")))),
        ]),
        "x",
    )])
    .from(["pairs"]);
    let indices = Query::select([SelectItem::new(
        int32(fragment([
            verbatim("UNNEST(range("),
            Expr::Subquery(Box::new(num.into())),
            verbatim("))"),
        ])),
        "i",
    )]);

    // rasterize segments along their longer axis, rounding on the other;
    // single-point segments emit their own cell
    let raster = Query::union_all([
        {
            let mut items = Vec::new();
            group_items(&mut items);
            items.push(SelectItem::new(add(column("x0"), column("i")), "x"));
            items.push(SelectItem::new(
                add(
                    column("y0"),
                    int32(round(div(mul(column("i"), column("dy")), column("dx")))),
                ),
                "y",
            ));
            Query::select(items)
                .from(["pairs", "indices"])
                .where_(lte(abs(column("dy")), abs(column("dx"))))
                .where_(lt(column("i"), abs(column("dx"))))
                .into()
        },
        {
            let mut items = Vec::new();
            group_items(&mut items);
            items.push(SelectItem::new(
                add(
                    column("x0"),
                    int32(round(div(
                        mul(mul(sign(column("dy")), column("i")), column("dx")),
                        column("dy"),
                    ))),
                ),
                "x",
            ));
            items.push(SelectItem::new(
                add(column("y0"), mul(sign(column("dy")), column("i"))),
                "y",
            ));
            Query::select(items)
                .from(["pairs", "indices"])
                .where_(gt(abs(column("dy")), abs(column("dx"))))
                .where_(lt(column("i"), abs(column("dy"))))
                .into()
        },
        {
            let mut items = Vec::new();
            group_items(&mut items);
            items.push(SelectItem::new(column("x0"), "x"));
            items.push(SelectItem::new(column("y0"), "y"));
            Query::select(items)
                .from(["pairs"])
                .where_(is_null(column("dx")))
                .into()
        },
    ]);

    // clamp to the grid, normalize weights per series
    let points = {
        let mut items = Vec::new();
        group_items(&mut items);
        items.push(SelectItem::from("x"));
        items.push(SelectItem::from("y"));
        if normalize {
            items.push(SelectItem::new(
                div(
                    1,
                    count().partitionby(
                        std::iter::once(column("x")).chain(groups.iter().map(|g| column(g))),
                    ),
                ),
                "w",
            ));
        }
        Query::from_items(["raster"])
            .select(items)
            .where_(lte(0, column("x")))
            .where_(lt(column("x"), xn_))
            .where_(lte(0, column("y")))
            .where_(lt(column("y"), yn_))
    };

    // sum series weights per cell
    let mut items: Vec<SelectItem> = groupby.iter().map(|g| SelectItem::from(g.as_str())).collect();
    items.push(SelectItem::new(
        add(column("x"), mul(column("y"), int32(Expr::from(xn_)))),
        "index",
    ));
    items.push(SelectItem::new(
        if normalize {
            Expr::from(sum(column("w")))
        } else {
            Expr::from(count())
        },
        "density",
    ));

    SelectQuery::new()
        .with([
            cte("pairs", pairs),
            cte("indices", indices),
            cte("raster", Query::from(raster)),
            cte("points", points),
        ])
        .from(["points"])
        .select(items)
        .groupby(std::iter::once(column("index")).chain(groupby.iter().map(|g| column(g))))
}

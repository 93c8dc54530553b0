use serde::{Deserialize, Serialize};

use super::{Expr, WindowDef, WindowExpr, WindowFrame, WindowFunc};

/// An aggregate function call.
///
/// Derive methods return new nodes; an aggregate held by several queries is
/// never mutated through one of them. Promoting an aggregate to a window
/// (`window`, `partitionby`, `orderby`, `frame`) drops the FILTER clause,
/// which SQL does not allow on window calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateExpr {
    /// Lowercase function name.
    pub name: String,
    pub args: Vec<Expr>,
    pub distinct: bool,
    pub filter: Option<Box<Expr>>,
    /// Ordering of the aggregate arguments, distinct from any window order.
    pub order: Vec<Expr>,
}

impl AggregateExpr {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        AggregateExpr {
            name: name.into(),
            args,
            distinct: false,
            filter: None,
            order: vec![],
        }
    }

    /// Derive an aggregate over distinct values.
    pub fn distinct(&self) -> Self {
        AggregateExpr {
            distinct: true,
            ..self.clone()
        }
    }

    /// Derive an aggregate filtered by a predicate.
    pub fn where_(&self, filter: impl Into<Expr>) -> Self {
        AggregateExpr {
            filter: Some(Box::new(filter.into())),
            ..self.clone()
        }
    }

    /// Derive an aggregate whose arguments are ordered.
    pub fn arg_order<I, T>(&self, order: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        AggregateExpr {
            order: order.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    /// Promote to a window call over an empty definition.
    pub fn window(&self) -> WindowExpr {
        WindowExpr::new(WindowFunc::Aggregate(self.strip_filter()), WindowDef::new())
    }

    /// Promote to a window call partitioned by the given expressions.
    pub fn partitionby<I, T>(&self, partition: I) -> WindowExpr
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        self.window().partitionby(partition)
    }

    /// Promote to a window call ordered by the given expressions.
    pub fn orderby<I, T>(&self, order: I) -> WindowExpr
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        self.window().orderby(order)
    }

    /// Promote to a window call with the given frame.
    pub fn frame(&self, frame: WindowFrame) -> WindowExpr {
        self.window().frame(frame)
    }

    fn strip_filter(&self) -> Self {
        AggregateExpr {
            filter: None,
            ..self.clone()
        }
    }
}

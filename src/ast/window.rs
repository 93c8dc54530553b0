use serde::{Deserialize, Serialize};

use super::{AggregateExpr, Expr};

/// A window call: a function applied `OVER` a window definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowExpr {
    pub func: WindowFunc,
    pub def: WindowDef,
}

/// The callable side of a window expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WindowFunc {
    Aggregate(AggregateExpr),
    Function(WindowFunction),
}

/// A dedicated window function such as `row_number` or `lag`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFunction {
    pub name: String,
    pub args: Vec<Expr>,
    pub ignore_nulls: bool,
    /// Ordering of the function arguments, distinct from the window order.
    pub order: Vec<Expr>,
}

impl WindowFunction {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        WindowFunction {
            name: name.into(),
            args,
            ignore_nulls: false,
            order: vec![],
        }
    }

    pub fn ignore_nulls(mut self) -> Self {
        self.ignore_nulls = true;
        self
    }

    pub fn arg_order<I, T>(mut self, order: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        self.order = order.into_iter().map(Into::into).collect();
        self
    }
}

impl WindowExpr {
    pub fn new(func: WindowFunc, def: WindowDef) -> Self {
        WindowExpr { func, def }
    }

    /// Derive a window over a named base definition.
    pub fn over(&self, name: impl Into<String>) -> Self {
        WindowExpr::new(self.func.clone(), self.def.over(name))
    }

    /// Derive a window with the given partitioning.
    pub fn partitionby<I, T>(&self, partition: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        WindowExpr::new(self.func.clone(), self.def.partitionby(partition))
    }

    /// Derive a window with the given ordering.
    pub fn orderby<I, T>(&self, order: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        WindowExpr::new(self.func.clone(), self.def.orderby(order))
    }

    /// Derive a window with the given frame.
    pub fn frame(&self, frame: WindowFrame) -> Self {
        WindowExpr::new(self.func.clone(), self.def.frame(frame))
    }
}

/// A window definition: a base window name, partitioning, ordering, and a
/// frame. A definition that is only a name serializes bare (`OVER "w"`),
/// anything more is parenthesized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowDef {
    pub name: Option<String>,
    pub partition: Vec<Expr>,
    pub order: Vec<Expr>,
    pub frame: Option<WindowFrame>,
}

impl WindowDef {
    pub fn new() -> Self {
        WindowDef::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        WindowDef {
            name: Some(name.into()),
            ..WindowDef::new()
        }
    }

    pub fn over(&self, name: impl Into<String>) -> Self {
        WindowDef {
            name: Some(name.into()),
            ..self.clone()
        }
    }

    pub fn partitionby<I, T>(&self, partition: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        WindowDef {
            partition: partition.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    pub fn orderby<I, T>(&self, order: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Expr>,
    {
        WindowDef {
            order: order.into_iter().map(Into::into).collect(),
            ..self.clone()
        }
    }

    pub fn frame(&self, frame: WindowFrame) -> Self {
        WindowDef {
            frame: Some(frame),
            ..self.clone()
        }
    }
}

/// A window frame clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowFrame {
    pub kind: FrameKind,
    pub extent: FrameExtent,
    pub exclude: Option<FrameExclude>,
}

impl WindowFrame {
    pub fn new(kind: FrameKind, extent: FrameExtent) -> Self {
        WindowFrame {
            kind,
            extent,
            exclude: None,
        }
    }

    pub fn exclude(mut self, exclude: FrameExclude) -> Self {
        self.exclude = Some(exclude);
        self
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum FrameKind {
    #[strum(to_string = "ROWS")]
    Rows,
    #[strum(to_string = "RANGE")]
    Range,
    #[strum(to_string = "GROUPS")]
    Groups,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum FrameExclude {
    #[strum(to_string = "EXCLUDE NO OTHERS")]
    NoOthers,
    #[strum(to_string = "EXCLUDE CURRENT ROW")]
    CurrentRow,
    #[strum(to_string = "EXCLUDE GROUP")]
    Group,
    #[strum(to_string = "EXCLUDE TIES")]
    Ties,
}

/// Frame bounds, preceding then following.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameExtent {
    pub start: FrameValue,
    pub end: FrameValue,
}

impl FrameExtent {
    pub fn new(start: FrameValue, end: FrameValue) -> Self {
        FrameExtent { start, end }
    }
}

/// A single frame bound. Numbers follow the positional convention: the
/// first bound reads as PRECEDING and the second as FOLLOWING, zero is
/// CURRENT ROW, and magnitudes are taken absolute. Non-finite numbers are
/// unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FrameValue {
    Unbounded,
    Value(f64),
    /// An expression offset, such as an interval for RANGE frames.
    Expr(Box<Expr>),
}

impl FrameValue {
    pub fn expr(expr: impl Into<Expr>) -> Self {
        FrameValue::Expr(Box::new(expr.into()))
    }
}

impl From<Option<f64>> for FrameValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => FrameValue::Value(v),
            _ => FrameValue::Unbounded,
        }
    }
}

impl From<(Option<f64>, Option<f64>)> for FrameExtent {
    fn from((start, end): (Option<f64>, Option<f64>)) -> Self {
        FrameExtent::new(start.into(), end.into())
    }
}

use crate::ast::{Expr, FrameExtent, FrameKind, FrameValue, WindowFrame};

/// A ROWS frame over the given extent.
pub fn frame_rows(extent: impl Into<FrameExtent>) -> WindowFrame {
    WindowFrame::new(FrameKind::Rows, extent.into())
}

/// A RANGE frame over the given extent.
pub fn frame_range(extent: impl Into<FrameExtent>) -> WindowFrame {
    WindowFrame::new(FrameKind::Range, extent.into())
}

/// A GROUPS frame over the given extent.
pub fn frame_groups(extent: impl Into<FrameExtent>) -> WindowFrame {
    WindowFrame::new(FrameKind::Groups, extent.into())
}

/// An expression-valued bound, such as an interval for RANGE frames.
pub fn preceding(expr: impl Into<Expr>) -> FrameValue {
    FrameValue::expr(expr)
}

/// An expression-valued bound on the following side.
pub fn following(expr: impl Into<Expr>) -> FrameValue {
    FrameValue::expr(expr)
}

pub fn current_row() -> FrameValue {
    FrameValue::Value(0.0)
}

pub fn unbounded() -> FrameValue {
    FrameValue::Unbounded
}

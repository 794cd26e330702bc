//! Text rendering of float sequences for display.

/// Render `values` as `[v0, v1, ..., ]`.
///
/// Every element is followed by `", "`, including the last one, so three
/// values render as `[2.0, 4.0, 6.0, ]`. An empty slice renders as `[]`.
/// Elements use the `Debug` form of `f32`, which keeps a decimal point on
/// whole numbers (`2.0`) and spells out `NaN` and `inf`.
pub fn render(values: &[f32]) -> String {
    let mut out = String::with_capacity(2 + values.len() * 6);
    out.push('[');
    for v in values {
        out.push_str(&format!("{v:?}, "));
    }
    out.push(']');
    out
}

// Matrix helpers: diagnostic dumps and 2D translations

use std::fmt::Write;

use glam::{Mat3, Mat4, Vec2};

/// Renders `rows` as the labelled block shared by both matrix sizes.
fn format_rows<const N: usize>(name: &str, rows: [[f32; N]; N]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{name} [");
    for (i, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:>10.4}")).collect();
        let _ = writeln!(out, "  row {i}: [{}]", cells.join(", "));
    }
    out.push(']');
    out
}

/// Formats a 4x4 matrix in row order.
pub fn format_matrix4(matrix: &Mat4) -> String {
    let rows = [0, 1, 2, 3].map(|i| matrix.row(i).to_array());
    format_rows("Matrix4", rows)
}

/// Formats a 3x3 matrix in row order.
pub fn format_matrix3(matrix: &Mat3) -> String {
    let rows = [0, 1, 2].map(|i| matrix.row(i).to_array());
    format_rows("Matrix3", rows)
}

/// Dumps a 4x4 matrix to the debug log.
pub fn log_matrix4(matrix: &Mat4) {
    log::debug!("{}", format_matrix4(matrix));
}

/// Dumps a 3x3 matrix to the debug log.
pub fn log_matrix3(matrix: &Mat3) {
    log::debug!("{}", format_matrix3(matrix));
}

/// Identity with the translation column set to `(dx, dy)`.
///
/// Applied to the homogeneous point `(x, y, 1)` it yields `(x + dx, y + dy, 1)`.
pub fn make_translation3x3(dx: f32, dy: f32) -> Mat3 {
    Mat3::from_translation(Vec2::new(dx, dy))
}

/// Returns `m * make_translation3x3(dx, dy)`.
///
/// glam multiplies column vectors on the right, so the translation acts on a
/// point before `m` does. Chaining calls therefore appends transforms in
/// local space: `translate3x3(m * rotation, dx, dy)` moves along the rotated
/// axes.
pub fn translate3x3(m: Mat3, dx: f32, dy: f32) -> Mat3 {
    m * make_translation3x3(dx, dy)
}

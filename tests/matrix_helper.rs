use approx::assert_relative_eq;
use glam::{Mat3, Mat4, Vec2, Vec3};
use mandelbrot_shader::{
    format_matrix3, format_matrix4, log_matrix3, make_translation3x3, translate3x3,
};

const OFFSETS: [(f32, f32); 5] = [(0.0, 0.0), (1.0, -2.0), (-0.25, 0.75), (1e3, 1e-3), (-7.5, -7.5)];
const POINTS: [(f32, f32); 4] = [(0.0, 0.0), (3.0, 4.0), (-1.5, 2.25), (100.0, -100.0)];

fn sample_matrix() -> Mat3 {
    Mat3::from_scale_angle_translation(Vec2::new(2.0, 0.5), 0.3, Vec2::new(-1.0, 4.0))
}

fn assert_mat3_eq(a: Mat3, b: Mat3) {
    for (x, y) in a.to_cols_array().iter().zip(b.to_cols_array().iter()) {
        assert_relative_eq!(*x, *y, epsilon = 1e-4, max_relative = 1e-5);
    }
}

#[test]
fn translation_shifts_every_point() {
    for (dx, dy) in OFFSETS {
        let t = make_translation3x3(dx, dy);
        for (x, y) in POINTS {
            assert_eq!(t * Vec3::new(x, y, 1.0), Vec3::new(x + dx, y + dy, 1.0));
        }
    }
}

#[test]
fn translate_matches_explicit_product() {
    let m = sample_matrix();
    for (dx, dy) in OFFSETS {
        assert_eq!(translate3x3(m, dx, dy), m * make_translation3x3(dx, dy));
    }
}

#[test]
fn chained_translations_add_up() {
    let m = sample_matrix();
    for (a, b) in OFFSETS {
        for (c, d) in OFFSETS {
            assert_mat3_eq(
                translate3x3(translate3x3(m, a, b), c, d),
                translate3x3(m, a + c, b + d),
            );
        }
    }
}

#[test]
fn translated_matrix_moves_the_point_first() {
    let m = sample_matrix();
    let (dx, dy) = (0.5, -1.25);
    for (x, y) in POINTS {
        let p = translate3x3(m, dx, dy) * Vec3::new(x, y, 1.0);
        let q = m * Vec3::new(x + dx, y + dy, 1.0);
        assert_relative_eq!(p.x, q.x, epsilon = 1e-3);
        assert_relative_eq!(p.y, q.y, epsilon = 1e-3);
        assert_relative_eq!(p.z, 1.0);
    }
}

#[test]
fn dumps_have_one_line_per_row() {
    let three = format_matrix3(&sample_matrix());
    let four = format_matrix4(&Mat4::IDENTITY);

    let rows3: Vec<&str> = three.lines().filter(|l| l.trim_start().starts_with("row")).collect();
    let rows4: Vec<&str> = four.lines().filter(|l| l.trim_start().starts_with("row")).collect();
    assert_eq!(rows3.len(), 3);
    assert_eq!(rows4.len(), 4);
    assert!(rows3.iter().all(|l| l.matches(',').count() == 2));
    assert!(rows4.iter().all(|l| l.matches(',').count() == 3));
    assert!(four.contains("row 3: [    0.0000,     0.0000,     0.0000,     1.0000]"));

    log_matrix3(&sample_matrix());
}

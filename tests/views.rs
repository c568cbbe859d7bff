use std::f64::consts::PI;

use calculus_viz::config::{ConfigOverrides, ViewConfig};
use calculus_viz::functions::FunctionRegistry;
use calculus_viz::numeric::RiemannRule;
use calculus_viz::orchestrator::{Frame, Orchestrator};
use calculus_viz::scene::{Mat3, Primitive, RecordingRenderer};
use calculus_viz::views::{
    DerivativeMode, DerivativeView, Fraction, FractionView, IntegralView, LimitView,
    TransformKind, TransformView, Visualization,
};
use calculus_viz::VizError;

const FRAME: Frame = Frame { dt: 0.016, aspect: 1.0 };

fn close(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

#[test]
fn derivative_tangent_and_secant_slopes() {
    let registry = FunctionRegistry::builtin();
    let mut view = DerivativeView::new(&ViewConfig::derivative(), &registry).unwrap();
    assert!(close(view.slope().unwrap(), -PI, 1e-3));

    view.set_mode(DerivativeMode::Secant);
    view.set_dx(0.2).unwrap();
    let f = |x: f64| (x * PI * 2.0).sin() * 0.5;
    let expected = (f(0.6) - f(0.4)) / 0.2;
    assert!(close(view.slope().unwrap(), expected, 1e-6));

    view.set_dx(5.0).unwrap();
    assert_eq!(view.dx(), 0.5);
    assert!(view.set_dx(f64::NAN).is_err());

    assert_eq!("secant".parse::<DerivativeMode>(), Ok(DerivativeMode::Secant));
    assert!("curvature".parse::<DerivativeMode>().is_err());
}

#[test]
fn derivative_overlay_appears_with_the_tangent() {
    let registry = FunctionRegistry::builtin();
    let view = DerivativeView::new(&ViewConfig::derivative(), &registry).unwrap();
    let mut orchestrator = Orchestrator::new(view, &ViewConfig::derivative());
    let mut renderer = RecordingRenderer::new();

    orchestrator.render_frame(&mut renderer, FRAME);
    // axes and the curve
    assert_eq!(renderer.frame().len(), 2);

    orchestrator.update(|v| v.show_tangent());
    orchestrator.render_frame(&mut renderer, FRAME);
    let frame = renderer.frame();
    assert_eq!(frame.len(), 4);
    let tangent = &frame[2];
    assert_eq!(tangent.primitive, Primitive::LineStrip);
    assert_eq!(tangent.vertices.len(), 2);
    // slope -π through (0.5, 0): from (-1, π/2) to (1, -π/2) in clip space
    assert!(close(tangent.vertices[0][1] as f64, PI / 2.0, 1e-3));
    assert!(close(tangent.vertices[1][1] as f64, -PI / 2.0, 1e-3));
}

#[test]
fn derivative_animation_and_reset() {
    let registry = FunctionRegistry::builtin();
    let mut view = DerivativeView::new(&ViewConfig::derivative(), &registry).unwrap();
    view.toggle_animation();
    assert!(view.is_animating());
    view.advance(0.016);
    assert!(close(view.point(), ((0.016f64).sin() + 1.0) / 2.0, 1e-12));

    view.toggle_animation();
    let frozen = view.point();
    view.advance(0.016);
    assert_eq!(view.point(), frozen);

    view.reset();
    assert_eq!(view.point(), 0.5);
    assert_eq!(view.mode(), DerivativeMode::Tangent);
    assert!(!view.is_showing_tangent());
}

fn linear_integral() -> IntegralView {
    let mut config = ViewConfig::integral();
    config.function = Some("linear".into());
    IntegralView::new(&config, &FunctionRegistry::builtin()).unwrap()
}

#[test]
fn integral_area_follows_rule_and_count() {
    let mut view = linear_integral();
    view.set_rectangles(4);
    assert!(close(view.area().unwrap(), 0.375, 1e-12));
    view.set_rule(RiemannRule::Right);
    assert!(close(view.area().unwrap(), 0.625, 1e-12));

    view.set_rectangles(0);
    assert_eq!(view.rectangles(), 1);
    view.set_rectangles(500);
    assert_eq!(view.rectangles(), 50);
}

#[test]
fn integral_bounds_and_functions() {
    let mut view = linear_integral();
    view.set_bounds(-1.0, 0.5).unwrap();
    assert_eq!(view.bounds().lo(), 0.0);
    assert_eq!(view.bounds().hi(), 0.5);
    assert!(matches!(view.set_bounds(0.8, 0.2), Err(VizError::InvalidBounds { .. })));
    assert!(matches!(view.set_bounds(2.0, 3.0), Err(VizError::InvalidBounds { .. })));

    assert_eq!(
        view.set_function("cubic"),
        Err(VizError::UnknownFunction("cubic".into()))
    );
    view.set_function("quadratic").unwrap();
    assert_eq!(view.function().name(), "quadratic");

    view.reset();
    assert_eq!(view.function().name(), "linear");
    assert_eq!(view.rectangles(), 10);
}

#[test]
fn integral_animation_pulses_the_count() {
    let mut view = linear_integral();
    view.show_area();
    assert!(view.is_animating());
    assert!(view.is_showing_area());
    let mut seen = Vec::new();
    for _ in 0..200 {
        view.advance(0.016);
        assert!((4..=50).contains(&view.rectangles()));
        seen.push(view.rectangles());
    }
    assert!(seen.iter().any(|&n| n > 40));

    view.add_rectangles();
    assert!(!view.is_animating());
    let n = view.rectangles();
    view.advance(0.016);
    assert_eq!(view.rectangles(), n);
}

#[test]
fn integral_rectangles_are_drawn_only_with_the_area() {
    let view = linear_integral();
    let config = ViewConfig::integral();
    let mut orchestrator = Orchestrator::new(view, &config);
    let mut renderer = RecordingRenderer::new();
    orchestrator.render_frame(&mut renderer, FRAME);
    assert_eq!(renderer.frame().len(), 2);

    orchestrator.update(|v| {
        v.set_rectangles(4);
        v.add_rectangles();
    });
    orchestrator.render_frame(&mut renderer, FRAME);
    let rects: Vec<_> = renderer
        .frame()
        .iter()
        .filter(|g| g.primitive == Primitive::Triangles)
        .collect();
    assert_eq!(rects.len(), 4);
    assert!(rects.iter().all(|g| g.color.a < 1.0));
}

#[test]
fn limit_epsilon_stays_in_range_while_animating() {
    let mut view = LimitView::new(&ViewConfig::limit(), &FunctionRegistry::builtin()).unwrap();
    view.toggle_animation();
    for _ in 0..1000 {
        view.advance(0.016);
        assert!((0.01..=0.2).contains(&view.epsilon()));
        let [left, right] = view.approach_points();
        assert!(left.is_some() && right.is_some());
    }
    view.set_epsilon(3.0);
    assert_eq!(view.epsilon(), 0.2);
    view.set_epsilon(-1.0);
    assert_eq!(view.epsilon(), 0.01);
}

#[test]
fn limit_markers_skip_the_hole() {
    let mut view = LimitView::new(&ViewConfig::limit(), &FunctionRegistry::builtin()).unwrap();
    view.slider_input(49.0);
    view.set_epsilon(0.01);
    let [left, right] = view.approach_points();
    assert!(left.is_some());
    assert!(right.is_none());

    let mut orchestrator = Orchestrator::new(view, &ViewConfig::limit());
    let mut renderer = RecordingRenderer::new();
    orchestrator.render_frame(&mut renderer, FRAME);
    let markers: Vec<_> = renderer
        .frame()
        .iter()
        .filter(|g| g.primitive == Primitive::Points && g.point_size > 4.0)
        .collect();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].vertices.len(), 1);
    assert!(renderer
        .frame()
        .iter()
        .flat_map(|g| g.vertices.iter())
        .all(|v| v[0].is_finite() && v[1].is_finite()));
}

#[test]
fn limit_markers_stay_visible_at_the_slider_ends() {
    let mut view = LimitView::new(&ViewConfig::limit(), &FunctionRegistry::builtin()).unwrap();
    view.set_epsilon(0.2);
    for raw in [0.0, 10.0, 90.0, 100.0] {
        view.slider_input(raw);
        let [left, right] = view.approach_points();
        let (left, right) = (left.unwrap(), right.unwrap());
        assert!(left.0 < view.approaching() && view.approaching() < right.0);
        assert!((0.0..=1.0).contains(&left.0) && (0.0..=1.0).contains(&right.0));
    }
}

#[test]
fn limit_reset_restores_defaults() {
    let mut view = LimitView::new(&ViewConfig::limit(), &FunctionRegistry::builtin()).unwrap();
    view.slider_input(80.0);
    view.set_epsilon(0.05);
    view.toggle_animation();
    view.reset();
    assert_eq!(view.approaching(), 0.5);
    assert_eq!(view.epsilon(), 0.1);
    assert!(!view.is_animating());
}

#[test]
fn fractions_validate_and_divide() {
    assert_eq!(Fraction::new(1, 0), Err(VizError::InvalidFraction { num: 1, den: 0 }));
    assert!(Fraction::new(3, 2).is_err());
    assert!(Fraction::new(1, 25).is_err());

    let mut view = FractionView::new(&ViewConfig::fraction());
    assert!(close(view.quotient().unwrap(), 4.0 / 3.0, 1e-12));
    view.set_fractions(Fraction::new(3, 4).unwrap(), Fraction::new(0, 4).unwrap());
    assert_eq!(view.quotient(), None);
}

#[test]
fn fraction_progress_caps_and_rows_preserve_aspect() {
    let config = ViewConfig::fraction();
    let mut view = FractionView::new(&config);
    view.reset_animation();
    for _ in 0..100 {
        view.advance(0.016);
    }
    assert_eq!(view.progress(), 1.0);

    let mut orchestrator = Orchestrator::new(FractionView::new(&config), &config);
    let mut renderer = RecordingRenderer::new();
    orchestrator.render_frame(&mut renderer, Frame { dt: 0.0, aspect: 2.0 });
    let frame = renderer.frame();
    // divider, three dividend cells, two divisor cells
    assert_eq!(frame.len(), 6);
    let divider_x: Vec<f32> = frame[0].vertices.iter().map(|v| v[0]).collect();
    assert!(divider_x.iter().all(|x| (x.abs() - 0.4).abs() < 1e-6));
    assert!(frame[1..].iter().all(|g| g.primitive == Primitive::TriangleStrip));
}

#[test]
fn transform_kinds_shape_the_matrix() {
    let config = ViewConfig::transform();
    let mut view = TransformView::new(&config);
    assert_eq!(view.matrix(), Mat3::IDENTITY);

    view.select(TransformKind::Rotate);
    for _ in 0..50 {
        view.advance(0.016);
        assert!(close(view.determinant(), 1.0, 1e-9));
    }

    view.select(TransformKind::Scale);
    view.advance(0.016);
    let s = 0.5 + (0.032f64).sin() * 0.5;
    assert!(close(view.determinant(), s * s, 1e-9));

    view.select(TransformKind::Shear);
    assert_eq!(view.kind(), Some(TransformKind::Shear));
    view.toggle_animation();
    assert!(!view.is_animating());

    view.reset();
    assert_eq!(view.matrix(), Mat3::IDENTITY);
    assert_eq!(view.kind(), None);
    assert!("spin".parse::<TransformKind>().is_err());
}

#[test]
fn quarter_turn_maps_x_onto_y() {
    let m = Mat3::linear(PI / 2.0, [1.0, 1.0], [0.0, 0.0]);
    let [x, y] = m.apply([1.0, 0.0]);
    assert!(close(x, 0.0, 1e-12) && close(y, 1.0, 1e-12));
    let cm = m.to_column_major();
    assert!((cm[1] - 1.0).abs() < 1e-6);
}

#[test]
fn rotation_keeps_lengths_on_wide_canvases() {
    let config = ViewConfig::transform()
        .apply(ConfigOverrides {
            preserve_aspect: Some(true),
            ..Default::default()
        })
        .unwrap();
    let mut orchestrator = Orchestrator::new(TransformView::new(&config), &config);
    orchestrator.update(|v| v.select(TransformKind::Rotate));
    let mut renderer = RecordingRenderer::new();
    // 400x200 pixels
    let (half_w, half_h) = (200.0, 100.0);
    for _ in 0..100 {
        orchestrator.render_frame(&mut renderer, Frame { dt: 0.016, aspect: 2.0 });
        for basis in &renderer.frame()[1..] {
            let positions = basis.clip_positions();
            assert_eq!(positions.len(), 2);
            let tip = positions[1];
            let length = (tip[0] * half_w).hypot(tip[1] * half_h);
            assert!(close(length, 100.0, 1e-3), "length {length}");
        }
    }
}

#[test]
fn transform_geometry_carries_the_matrix() {
    let config = ViewConfig::transform();
    let mut orchestrator = Orchestrator::new(TransformView::new(&config), &config);
    orchestrator.update(|v| v.select(TransformKind::Scale));
    let mut renderer = RecordingRenderer::new();
    orchestrator.render_frame(&mut renderer, FRAME);
    let frame = renderer.frame();
    // grid, x basis, y basis
    assert_eq!(frame.len(), 3);
    assert_eq!(frame[0].vertices.len(), 100);
    let matrix = orchestrator.view().matrix();
    assert!(frame.iter().all(|g| g.transform == matrix));
    let tip = frame[1].clip_positions()[1];
    assert!(close(tip[0], matrix.0[0], 1e-6));
}

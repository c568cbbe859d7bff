use std::cell::Cell;
use std::rc::Rc;

use calculus_viz::bridge::{InteractionBridge, Slider, SliderScale};
use calculus_viz::config::ViewConfig;
use calculus_viz::coords::Interval;
use calculus_viz::functions::FunctionRegistry;
use calculus_viz::views::{DerivativeView, IntegralView, LimitView, Visualization};

/// A slider whose value the test can still read after handing it over.
#[derive(Clone, Default)]
struct SharedSlider(Rc<Cell<f64>>);

impl Slider for SharedSlider {
    fn set_value(&mut self, value: f64) {
        self.0.set(value);
    }
}

impl SharedSlider {
    fn value(&self) -> f64 {
        self.0.get()
    }

    /// What the browser does before firing `input`.
    fn user_sets(&self, raw: f64) -> f64 {
        self.0.set(raw);
        raw
    }
}

fn percent_bridge(lo: f64, hi: f64) -> (InteractionBridge, SharedSlider) {
    let slider = SharedSlider::default();
    let mut bridge = InteractionBridge::new(Interval::new(lo, hi).unwrap(), SliderScale::Percent);
    bridge.attach_slider(Box::new(slider.clone()), 0.5);
    (bridge, slider)
}

#[test]
fn pointer_moves_only_count_while_dragging() {
    let (mut bridge, slider) = percent_bridge(0.0, 1.0);
    assert_eq!(slider.value(), 50.0);
    assert_eq!(bridge.pointer_move(0.3), None);

    bridge.pointer_down();
    assert!(bridge.is_dragging());
    assert_eq!(bridge.pointer_move(0.3), Some(0.3));
    assert_eq!(slider.value(), 30.0);

    bridge.pointer_up();
    assert_eq!(bridge.pointer_move(0.9), None);
    assert_eq!(slider.value(), 30.0);
}

#[test]
fn pointer_positions_are_clamped_to_bounds() {
    let (mut bridge, slider) = percent_bridge(0.1, 0.9);
    bridge.pointer_down();
    for i in -50..=150 {
        let x = i as f64 / 100.0;
        let value = bridge.pointer_move(x).unwrap();
        assert!((0.1..=0.9).contains(&value), "x={x} -> {value}");
        assert_eq!(slider.value(), (value * 100.0).round());
    }
    assert_eq!(bridge.pointer_move(f64::NAN), None);
}

#[test]
fn slider_input_that_clamps_is_written_back() {
    let (mut bridge, slider) = percent_bridge(0.1, 0.9);
    let raw = slider.user_sets(5.0);
    assert_eq!(bridge.slider_input(raw), Some(0.1));
    assert_eq!(slider.value(), 10.0);

    let raw = slider.user_sets(42.0);
    assert_eq!(bridge.slider_input(raw), Some(0.42));
    assert_eq!(slider.value(), 42.0);
}

#[test]
fn disabled_drag_and_sync() {
    let slider = SharedSlider::default();
    let mut bridge = InteractionBridge::new(Interval::UNIT, SliderScale::Percent)
        .with_drag(false)
        .with_slider_sync(false);
    bridge.attach_slider(Box::new(slider.clone()), 0.7);
    assert_eq!(slider.value(), 0.0);

    bridge.pointer_down();
    assert!(!bridge.is_dragging());
    assert_eq!(bridge.pointer_move(0.2), None);
    assert_eq!(bridge.slider_input(20.0), Some(0.2));
}

#[test]
fn identity_scale_rounds_counts() {
    let slider = SharedSlider::default();
    let mut bridge = InteractionBridge::new(Interval::new(1.0, 50.0).unwrap(), SliderScale::Identity);
    bridge.attach_slider(Box::new(slider.clone()), 10.0);
    assert_eq!(slider.value(), 10.0);
    assert_eq!(bridge.slider_input(slider.user_sets(12.4)), Some(12.0));
    assert_eq!(slider.value(), 12.0);
    assert_eq!(bridge.slider_input(slider.user_sets(80.0)), Some(50.0));
    assert_eq!(slider.value(), 50.0);
}

#[test]
fn limit_view_and_slider_never_desync() {
    let mut view = LimitView::new(&ViewConfig::limit(), &FunctionRegistry::builtin()).unwrap();
    let slider = SharedSlider::default();
    view.attach_slider(Box::new(slider.clone()));
    assert_eq!(slider.value(), 50.0);

    for i in 0..200 {
        if i % 2 == 0 {
            let x = ((i * 37) % 130) as f64 / 100.0 - 0.15;
            view.pointer_down();
            view.pointer_move(x);
            view.pointer_up();
        } else {
            let raw = slider.user_sets(((i * 13) % 101) as f64);
            view.slider_input(raw);
            if (10.0..=90.0).contains(&raw) {
                assert_eq!(view.approaching(), raw / 100.0);
            }
        }
        let approaching = view.approaching();
        assert!((0.1..=0.9).contains(&approaching));
        assert_eq!(slider.value(), (approaching * 100.0).round(), "step {i}");
    }
}

#[test]
fn animation_keeps_the_slider_in_step() {
    let registry = FunctionRegistry::builtin();

    let mut derivative = DerivativeView::new(&ViewConfig::derivative(), &registry).unwrap();
    let point_slider = SharedSlider::default();
    derivative.attach_slider(Box::new(point_slider.clone()));
    derivative.toggle_animation();

    let mut integral = IntegralView::new(&ViewConfig::integral(), &registry).unwrap();
    let count_slider = SharedSlider::default();
    integral.attach_slider(Box::new(count_slider.clone()));
    integral.show_area();

    for _ in 0..300 {
        derivative.advance(0.016);
        integral.advance(0.016);
        assert_eq!(point_slider.value(), (derivative.point() * 100.0).round());
        assert_eq!(count_slider.value(), integral.rectangles() as f64);
    }
}

#[test]
fn derivative_drag_requires_opt_in() {
    let registry = FunctionRegistry::builtin();
    let mut view = DerivativeView::new(&ViewConfig::derivative(), &registry).unwrap();
    view.pointer_down();
    view.pointer_move(0.2);
    assert_eq!(view.point(), 0.5);
    assert!(!view.is_showing_tangent());

    let mut config = ViewConfig::derivative();
    config.enable_drag = true;
    let mut view = DerivativeView::new(&config, &registry).unwrap();
    view.pointer_down();
    assert!(view.is_interacting());
    view.pointer_move(0.2);
    assert_eq!(view.point(), 0.2);
    assert!(view.is_showing_tangent());
    view.pointer_up();
    assert!(!view.is_interacting());
}

#![cfg(target_arch = "wasm32")]

use calculus_viz::wasm::{FractionVis, LimitVis};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn container(id: &str) -> web_sys::Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document.create_element("div").unwrap();
    div.set_id(id);
    div.dyn_ref::<web_sys::HtmlElement>()
        .unwrap()
        .style()
        .set_property("width", "200px")
        .unwrap();
    document.body().unwrap().append_child(&div).unwrap();
    div
}

#[wasm_bindgen_test]
fn missing_container_gives_an_inert_view() {
    let mut vis = LimitVis::new("no-such-element", JsValue::UNDEFINED);
    assert!(!vis.mounted());
    assert_eq!(vis.epsilon(), None);
    vis.animate();
    vis.set_epsilon(0.05);
    assert!(!vis.animating());
    vis.destroy();
}

#[wasm_bindgen_test]
fn invalid_options_disable_the_view() {
    container("bad-options");
    let options = js_sys::JSON::parse(r#"{ "curveSegments": 0 }"#).unwrap();
    let vis = LimitVis::new("bad-options", options);
    assert!(!vis.mounted());
}

#[wasm_bindgen_test]
fn mounting_a_div_adds_a_canvas() {
    let div = container("fraction-under-test");
    let mut vis = FractionVis::new("fraction-under-test", JsValue::NULL);
    let canvas = div.first_element_child().expect("canvas appended");
    assert_eq!(canvas.tag_name().to_lowercase(), "canvas");

    if vis.mounted() {
        assert_eq!(vis.quotient(), Some(4.0 / 3.0));
        assert!(vis.set_fractions(1, 0, 1, 2).is_err());
        vis.set_fractions(3, 4, 1, 4).unwrap();
        assert_eq!(vis.quotient(), Some(3.0));
        vis.destroy();
        assert!(!vis.mounted());
        assert_eq!(vis.quotient(), None);
    }
}

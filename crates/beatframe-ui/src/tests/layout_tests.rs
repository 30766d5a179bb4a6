use super::*;
use std::cell::Cell;
use std::rc::Rc;

fn sized(runtime: &Runtime, width: f32, height: f32) -> UiElement {
    let element = UiElement::new(runtime);
    element.bounds().width.set(width);
    element.bounds().height.set(height);
    element
}

#[test]
fn width_cascades_from_parent() {
    let runtime = Runtime::new();
    let parent = sized(&runtime, 800.0, 600.0);
    let child = UiElement::new(&runtime);
    parent.add_child(&child).unwrap();
    child.bind_width_to_parent(0.0, 0.5);

    assert_eq!(child.bounds().width.get().unwrap(), 400.0);
    parent.bounds().width.set(1000.0);
    assert!(child.bounds().width.is_dirty());
    assert_eq!(child.bounds().width.get().unwrap(), 500.0);
}

#[test]
fn parent_binding_follows_reparenting() {
    let runtime = Runtime::new();
    let wide = sized(&runtime, 800.0, 100.0);
    let narrow = sized(&runtime, 200.0, 100.0);
    let child = UiElement::new(&runtime);
    child.bind_width_to_parent(-10.0, 1.0);

    assert_eq!(child.bounds().width.get().unwrap(), -10.0);
    wide.add_child(&child).unwrap();
    assert_eq!(child.bounds().width.get().unwrap(), 790.0);
    child.remove_from_parent();
    narrow.add_child(&child).unwrap();
    assert_eq!(child.bounds().width.get().unwrap(), 190.0);
}

#[test]
fn parent_insets_shrink_the_bound_size() {
    let runtime = Runtime::new();
    let parent = sized(&runtime, 100.0, 80.0);
    parent.padding().set(Insets::uniform(10.0));
    let child = UiElement::new(&runtime);
    parent.add_child(&child).unwrap();
    child.fill_parent();

    assert_eq!(child.bounds().rect().unwrap(), Rect::new(0.0, 0.0, 80.0, 60.0));
    parent.border().set(Insets::uniform(5.0));
    assert_eq!(child.bounds().rect().unwrap(), Rect::new(0.0, 0.0, 70.0, 50.0));
}

#[test]
fn layout_is_not_evaluated_until_read() {
    let runtime = Runtime::new();
    let parent = sized(&runtime, 100.0, 100.0);
    let child = UiElement::new(&runtime);
    parent.add_child(&child).unwrap();
    let evaluations = Rc::new(Cell::new(0));
    {
        let evaluations = evaluations.clone();
        let parent_width = parent.bounds().width.clone();
        child.bounds().width.bind(move |scope| {
            evaluations.set(evaluations.get() + 1);
            scope.read(&parent_width)
        });
    }

    parent.bounds().width.set(150.0);
    parent.bounds().width.set(200.0);
    assert_eq!(evaluations.get(), 0);
    assert_eq!(child.bounds().width.get().unwrap(), 200.0);
    assert_eq!(evaluations.get(), 1);
}

#[test]
fn anchors_place_within_parent_content() {
    let runtime = Runtime::new();
    let parent = sized(&runtime, 200.0, 100.0);
    let child = sized(&runtime, 50.0, 20.0);
    parent.add_child(&child).unwrap();

    child.anchor(Anchor::Center, 0.0, 0.0);
    assert_eq!(child.bounds().x.get().unwrap(), 75.0);
    assert_eq!(child.bounds().y.get().unwrap(), 40.0);

    child.anchor(Anchor::BottomRight, -5.0, -5.0);
    assert_eq!(child.bounds().x.get().unwrap(), 145.0);
    assert_eq!(child.bounds().y.get().unwrap(), 75.0);

    child.bounds().width.set(100.0);
    assert_eq!(child.bounds().x.get().unwrap(), 95.0);
}

#[test]
fn anchor_with_bound_size() {
    let runtime = Runtime::new();
    let parent = sized(&runtime, 400.0, 300.0);
    let child = UiElement::new(&runtime);
    parent.add_child(&child).unwrap();
    child.bind_width_to_parent(0.0, 0.5);
    child.bind_height_to_parent(0.0, 0.5);
    child.anchor(Anchor::Center, 0.0, 0.0);

    assert_eq!(child.bounds().rect().unwrap(), Rect::new(100.0, 75.0, 200.0, 150.0));
    parent.bounds().width.set(800.0);
    assert_eq!(child.bounds().rect().unwrap(), Rect::new(200.0, 75.0, 400.0, 150.0));
}

#[test]
fn siblings_chain_horizontally_and_vertically() {
    let runtime = Runtime::new();
    let first = sized(&runtime, 30.0, 12.0);
    first.bounds().x.set(10.0);
    first.bounds().y.set(4.0);
    let second = sized(&runtime, 20.0, 20.0);
    second.bind_x_to(&first, 5.0);
    second.bind_y_to(&first, 1.0);

    assert_eq!(second.bounds().x.get().unwrap(), 45.0);
    assert_eq!(second.bounds().y.get().unwrap(), 17.0);
    first.bounds().width.set(50.0);
    assert_eq!(second.bounds().x.get().unwrap(), 65.0);
}

#[test]
fn reading_parent_content_from_a_binding() {
    let runtime = Runtime::new();
    let parent = sized(&runtime, 60.0, 40.0);
    parent.margin().set(Insets::uniform(2.0));
    let child = UiElement::new(&runtime);
    let content = {
        let parent_cell = child.parent_cell().clone();
        runtime.derived(move |scope| read_parent_content(scope, &parent_cell))
    };

    assert_eq!(content.get().unwrap(), None);
    parent.add_child(&child).unwrap();
    assert_eq!(content.get().unwrap(), Some(Rect::new(2.0, 2.0, 56.0, 36.0)));
}

use super::*;
use std::cell::RefCell;
use std::rc::Rc;

fn element(runtime: &Runtime, x: f32, y: f32, width: f32, height: f32) -> UiElement {
    let element = UiElement::new(runtime);
    element.bounds().set_rect(Rect::new(x, y, width, height));
    element
}

#[test]
fn attaching_sets_both_parent_views() {
    let runtime = Runtime::new();
    let parent = UiElement::named(&runtime, "parent");
    let child = UiElement::named(&runtime, "child");

    parent.add_child(&child).unwrap();
    assert_eq!(child.parent(), Some(parent.clone()));
    let link = child.parent_cell().get().unwrap();
    assert_eq!(link.and_then(|link| link.upgrade()), Some(parent.clone()));
    assert_eq!(parent.children(), vec![child.clone()]);

    assert!(parent.remove_child(&child));
    assert!(child.parent().is_none());
    assert!(child.parent_cell().get().unwrap().is_none());
    assert_eq!(parent.child_count(), 0);
    assert!(!parent.remove_child(&child));
}

#[test]
fn attaching_a_parented_element_is_rejected() {
    let runtime = Runtime::new();
    let first = UiElement::new(&runtime);
    let second = UiElement::new(&runtime);
    let child = UiElement::new(&runtime);
    first.add_child(&child).unwrap();

    let err = second.add_child(&child).unwrap_err();
    assert_eq!(
        err,
        TreeError::InvalidParent {
            child: child.id(),
            current_parent: first.id(),
        }
    );
    assert_eq!(child.parent(), Some(first.clone()));
    assert_eq!(second.child_count(), 0);
}

#[test]
fn self_and_ancestor_attachment_is_rejected() {
    let runtime = Runtime::new();
    let root = UiElement::new(&runtime);
    let middle = UiElement::new(&runtime);
    let leaf = UiElement::new(&runtime);
    root.add_child(&middle).unwrap();
    middle.add_child(&leaf).unwrap();

    assert_eq!(
        root.add_child(&root).unwrap_err(),
        TreeError::SelfParent { element: root.id() }
    );
    assert_eq!(
        leaf.add_child(&root).unwrap_err(),
        TreeError::AncestorCycle { element: root.id() }
    );
}

#[test]
fn insert_child_clamps_index_and_orders_siblings() {
    let runtime = Runtime::new();
    let parent = UiElement::new(&runtime);
    let a = UiElement::new(&runtime);
    let b = UiElement::new(&runtime);
    let c = UiElement::new(&runtime);

    parent.add_child(&a).unwrap();
    parent.insert_child(0, &b).unwrap();
    parent.insert_child(99, &c).unwrap();

    assert_eq!(parent.children(), vec![b.clone(), a.clone(), c.clone()]);
    assert_eq!(parent.index_of(&c), Some(2));
    assert_eq!(parent.child_at(1), Some(a));
}

#[test]
fn remove_from_parent_and_remove_all_children() {
    let runtime = Runtime::new();
    let parent = UiElement::new(&runtime);
    let a = UiElement::new(&runtime);
    let b = UiElement::new(&runtime);
    parent.add_child(&a).unwrap();
    parent.add_child(&b).unwrap();

    assert!(a.remove_from_parent());
    assert!(!a.remove_from_parent());
    parent.remove_all_children();
    assert_eq!(parent.child_count(), 0);
    assert!(!b.has_parent());
}

#[test]
fn dropping_the_root_frees_the_subtree() {
    let runtime = Runtime::new();
    let weak_child = {
        let root = UiElement::new(&runtime);
        let child = UiElement::new(&runtime);
        root.add_child(&child).unwrap();
        child.bind_width_to_parent(0.0, 0.5);
        child.downgrade()
    };
    assert!(weak_child.upgrade().is_none());
}

#[test]
fn root_and_subtree_queries() {
    let runtime = Runtime::new();
    let root = UiElement::new(&runtime);
    let middle = UiElement::new(&runtime);
    let leaf = UiElement::new(&runtime);
    let stranger = UiElement::new(&runtime);
    root.add_child(&middle).unwrap();
    middle.add_child(&leaf).unwrap();

    assert_eq!(leaf.root(), root);
    assert!(leaf.is_in_subtree_of(&root));
    assert!(leaf.is_in_subtree_of(&leaf));
    assert!(!root.is_in_subtree_of(&leaf));
    assert!(!leaf.is_in_subtree_of(&stranger));
}

#[test]
fn zones_are_successively_inset() {
    let runtime = Runtime::new();
    let element = element(&runtime, 0.0, 0.0, 100.0, 50.0);
    element.margin().set(Insets::uniform(5.0));
    element.border().set(Insets::uniform(2.0));
    element.padding().set(Insets::uniform(3.0));

    assert_eq!(element.margin_zone().get().unwrap(), Rect::new(5.0, 5.0, 90.0, 40.0));
    assert_eq!(element.border_zone().get().unwrap(), Rect::new(7.0, 7.0, 86.0, 36.0));
    assert_eq!(element.padding_zone().get().unwrap(), Rect::new(10.0, 10.0, 80.0, 30.0));
    assert_eq!(element.content_zone().get().unwrap(), Rect::new(10.0, 10.0, 80.0, 30.0));

    element.bounds().width.set(200.0);
    assert_eq!(element.content_zone().get().unwrap().width, 180.0);
}

#[test]
fn oversized_insets_collapse_zones_to_zero_size() {
    let runtime = Runtime::new();
    let element = element(&runtime, 0.0, 0.0, 10.0, 10.0);
    element.padding().set(Insets::uniform(20.0));

    let content = element.content_zone().get().unwrap();
    assert_eq!(content.width, 0.0);
    assert_eq!(content.height, 0.0);
    assert!(element.bounds().rect().unwrap().contains_rect(&content));
}

#[test]
fn apparent_visibility_follows_ancestors_and_reparenting() {
    let runtime = Runtime::new();
    let hidden = UiElement::new(&runtime);
    let shown = UiElement::new(&runtime);
    let child = UiElement::new(&runtime);
    hidden.visible().set(false);
    hidden.add_child(&child).unwrap();

    assert!(child.visible().get().unwrap());
    assert!(!child.apparent_visibility().get().unwrap());

    hidden.remove_child(&child);
    shown.add_child(&child).unwrap();
    assert!(child.apparent_visibility().get().unwrap());

    shown.visible().set(false);
    assert!(!child.apparent_visibility().get().unwrap());
}

#[test]
fn apparent_opacity_multiplies_down_the_tree() {
    let runtime = Runtime::new();
    let parent = UiElement::new(&runtime);
    let child = UiElement::new(&runtime);
    parent.add_child(&child).unwrap();
    parent.opacity().set(0.5);
    child.opacity().set(0.5);

    assert_eq!(child.apparent_opacity().get().unwrap(), 0.25);
    child.opacity().set(2.0);
    assert_eq!(child.apparent_opacity().get().unwrap(), 0.5);
}

#[test]
fn absolute_geometry_accounts_for_parent_content_zones() {
    let runtime = Runtime::new();
    let parent = element(&runtime, 10.0, 20.0, 100.0, 100.0);
    parent.padding().set(Insets::uniform(5.0));
    let child = element(&runtime, 3.0, 4.0, 10.0, 10.0);
    parent.add_child(&child).unwrap();

    assert_eq!(child.parent_origin().unwrap(), Point::new(15.0, 25.0));
    assert_eq!(child.absolute_position().unwrap(), Point::new(18.0, 29.0));
    assert!(child.contains_absolute(28.0, 39.0).unwrap());
    assert!(!child.contains_absolute(29.0, 39.0).unwrap());
}

#[test]
fn fire_input_stops_at_first_consumer() {
    let runtime = Runtime::new();
    let element = UiElement::new(&runtime);
    let calls = Rc::new(RefCell::new(Vec::new()));

    let first = {
        let calls = calls.clone();
        element.add_input_listener(move |_, _| {
            calls.borrow_mut().push("first");
            Ok(false)
        })
    };
    {
        let calls = calls.clone();
        element.add_input_listener(move |_, _| {
            calls.borrow_mut().push("second");
            Ok(true)
        });
    }
    {
        let calls = calls.clone();
        element.add_input_listener(move |_, _| {
            calls.borrow_mut().push("third");
            Ok(true)
        });
    }

    let event = InputEvent::KeyTyped { character: 'a' };
    assert!(element.fire_input(&event).unwrap());
    assert_eq!(*calls.borrow(), vec!["first", "second"]);

    assert!(element.remove_input_listener(first));
    assert!(!element.remove_input_listener(first));
    assert_eq!(element.input_listener_count(), 2);
}

#[test]
fn listener_errors_propagate() {
    let runtime = Runtime::new();
    let element = UiElement::new(&runtime);
    element.add_input_listener(|_, _| Err(UiError::listener("rejected")));

    let err = element
        .fire_input(&InputEvent::KeyTyped { character: 'x' })
        .unwrap_err();
    assert!(matches!(err, UiError::Listener(_)));
    assert!(err.to_string().contains("rejected"));
}

#[test]
fn labels_include_name_and_id() {
    let runtime = Runtime::new();
    let named = UiElement::named(&runtime, "panel");
    let anonymous = UiElement::new(&runtime);

    assert_eq!(named.label(), format!("panel{}", named.id()));
    assert!(anonymous.label().starts_with("element#"));
    assert_ne!(named.id(), anonymous.id());
}

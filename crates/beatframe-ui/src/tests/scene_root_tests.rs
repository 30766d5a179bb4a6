use super::*;
use beatframe_render_common::RecordingSurface;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

fn scene() -> (Runtime, SceneRoot) {
    let runtime = Runtime::new();
    let config = SceneConfig::default().with_tooltip_delay(Duration::from_millis(1000));
    let scene = SceneRoot::with_config(&runtime, 800.0, 600.0, config);
    (runtime, scene)
}

fn element(runtime: &Runtime, name: &str, rect: Rect) -> UiElement {
    let element = UiElement::named(runtime, name);
    element.bounds().set_rect(rect);
    element
}

type EventLog = Rc<RefCell<Vec<String>>>;

fn record_events(element: &UiElement, log: &EventLog, consume_touch: bool) {
    let log = log.clone();
    element.add_input_listener(move |element, event| {
        let name = element.name().unwrap_or_default();
        let kind = match event {
            InputEvent::MouseEntered { .. } => "enter",
            InputEvent::MouseExited { .. } => "exit",
            InputEvent::TouchDown { .. } => "down",
            InputEvent::TouchUp { .. } => "up",
            InputEvent::TouchDragged { .. } => "drag",
            InputEvent::TouchCancelled { .. } => "cancel",
            InputEvent::KeyDown { .. } => "key",
            InputEvent::Scrolled { .. } => "scroll",
            _ => return Ok(false),
        };
        log.borrow_mut().push(format!("{kind} {name}"));
        Ok(consume_touch && matches!(event, InputEvent::TouchDown { .. }))
    });
}

#[test]
fn layers_are_stacked_in_fixed_order() {
    let (_runtime, scene) = scene();
    let kinds: Vec<LayerKind> = scene.layers().map(Layer::kind).collect();
    assert_eq!(kinds, LayerKind::ALL.to_vec());
    assert!(scene.layer(LayerKind::Dialog).is_exclusive());
    assert!(!scene.layer(LayerKind::ContextMenu).is_exclusive());
    assert!(!scene.layer(LayerKind::Main).is_exclusive());
    assert!(!scene.layer(LayerKind::Tooltip).tooltips_enabled());
}

#[test]
fn layer_roots_follow_scene_size() {
    let (_runtime, scene) = scene();
    let root = scene.main_root();
    assert_eq!(root.bounds().rect().unwrap(), Rect::new(0.0, 0.0, 800.0, 600.0));

    scene.resize(1024.0, 768.0).unwrap();
    for layer in scene.layers() {
        assert_eq!(layer.root().bounds().width.get().unwrap(), 1024.0);
        assert_eq!(layer.root().bounds().height.get().unwrap(), 768.0);
    }
}

#[test]
fn hover_changes_fire_enter_and_exit_in_order() {
    let (runtime, scene) = scene();
    let outer = element(&runtime, "outer", Rect::new(0.0, 0.0, 200.0, 200.0));
    let inner = element(&runtime, "inner", Rect::new(10.0, 10.0, 50.0, 50.0));
    outer.add_child(&inner).unwrap();
    scene.main_root().add_child(&outer).unwrap();
    let log = EventLog::default();
    record_events(&outer, &log, false);
    record_events(&inner, &log, false);

    scene.mouse_moved(20.0, 20.0).unwrap();
    assert_eq!(*log.borrow(), vec!["enter outer", "enter inner"]);
    log.borrow_mut().clear();

    scene.mouse_moved(100.0, 100.0).unwrap();
    assert_eq!(*log.borrow(), vec!["exit inner"]);
    log.borrow_mut().clear();

    scene.mouse_moved(500.0, 500.0).unwrap();
    assert_eq!(*log.borrow(), vec!["exit outer"]);
    assert_eq!(scene.layer(LayerKind::Main).hover_path().len(), 1);
}

#[test]
fn exclusive_dialog_blocks_main_layer_input() {
    let (runtime, scene) = scene();
    let button = Button::plain(&runtime);
    button.element().bounds().set_rect(Rect::new(10.0, 10.0, 100.0, 50.0));
    scene.main_root().add_child(button.element()).unwrap();
    let dialog = element(&runtime, "dialog", Rect::new(300.0, 300.0, 100.0, 100.0));

    scene.show_root_dialog(&dialog).unwrap();
    assert!(scene.layer(LayerKind::Dialog).is_blocking());
    assert!(scene.touch_down(20.0, 20.0, PointerButton::Primary).unwrap());
    assert!(!button.pressed().get().unwrap());
    scene.touch_up(20.0, 20.0, PointerButton::Primary).unwrap();

    assert_eq!(scene.hide_root_dialog(), Some(dialog.clone()));
    assert!(!dialog.has_parent());
    assert!(scene.touch_down(20.0, 20.0, PointerButton::Primary).unwrap());
    assert!(button.pressed().get().unwrap());
}

#[test]
fn button_click_runs_action_only_when_released_inside() {
    let (runtime, scene) = scene();
    let button = Button::plain(&runtime);
    button.element().bounds().set_rect(Rect::new(10.0, 10.0, 100.0, 50.0));
    scene.main_root().add_child(button.element()).unwrap();
    let clicks = Rc::new(Cell::new(0));
    {
        let clicks = clicks.clone();
        button.set_on_action(move || {
            clicks.set(clicks.get() + 1);
            Ok(())
        });
    }

    scene.touch_down(20.0, 20.0, PointerButton::Primary).unwrap();
    assert!(scene.is_dragging(PointerButton::Primary));
    scene.touch_up(30.0, 30.0, PointerButton::Primary).unwrap();
    assert_eq!(clicks.get(), 1);
    assert!(!scene.is_dragging(PointerButton::Primary));

    scene.touch_down(20.0, 20.0, PointerButton::Primary).unwrap();
    scene.touch_up(400.0, 400.0, PointerButton::Primary).unwrap();
    assert_eq!(clicks.get(), 1);
    assert!(!button.pressed().get().unwrap());
}

#[test]
fn drags_stay_with_the_pressed_element() {
    let (runtime, scene) = scene();
    let target = element(&runtime, "target", Rect::new(0.0, 0.0, 50.0, 50.0));
    scene.main_root().add_child(&target).unwrap();
    let log = EventLog::default();
    record_events(&target, &log, true);

    scene.touch_down(10.0, 10.0, PointerButton::Primary).unwrap();
    scene.touch_dragged(300.0, 300.0).unwrap();
    scene.touch_up(300.0, 300.0, PointerButton::Primary).unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["enter target", "down target", "exit target", "drag target", "up target"]
    );
}

#[test]
fn unconsumed_press_still_captures_the_drag() {
    let (runtime, scene) = scene();
    let watcher = element(&runtime, "watcher", Rect::new(0.0, 0.0, 50.0, 50.0));
    scene.main_root().add_child(&watcher).unwrap();
    let log = EventLog::default();
    record_events(&watcher, &log, false);

    assert!(!scene.touch_down(10.0, 10.0, PointerButton::Primary).unwrap());
    assert!(scene.is_dragging(PointerButton::Primary));
    scene.touch_dragged(300.0, 300.0).unwrap();
    scene.touch_up(300.0, 300.0, PointerButton::Primary).unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["enter watcher", "down watcher", "exit watcher", "drag watcher", "up watcher"]
    );
    assert!(!scene.is_dragging(PointerButton::Primary));
}

#[test]
fn press_on_empty_background_captures_nothing() {
    let (_runtime, scene) = scene();
    assert!(!scene.touch_down(10.0, 10.0, PointerButton::Primary).unwrap());
    assert!(!scene.is_dragging(PointerButton::Primary));
}

#[test]
fn secondary_press_cancels_primary_drag() {
    let (runtime, scene) = scene();
    let target = element(&runtime, "target", Rect::new(0.0, 0.0, 50.0, 50.0));
    scene.main_root().add_child(&target).unwrap();
    let log = EventLog::default();
    record_events(&target, &log, true);

    scene.touch_down(10.0, 10.0, PointerButton::Primary).unwrap();
    log.borrow_mut().clear();
    scene.touch_down(10.0, 10.0, PointerButton::Secondary).unwrap();

    assert_eq!(log.borrow()[0], "cancel target");
    assert!(!scene.is_dragging(PointerButton::Primary));
    assert!(!scene.cancel_drag(PointerButton::Primary).unwrap());
}

#[test]
fn explicit_cancel_notifies_captured_path() {
    let (runtime, scene) = scene();
    let target = element(&runtime, "target", Rect::new(0.0, 0.0, 50.0, 50.0));
    scene.main_root().add_child(&target).unwrap();
    let log = EventLog::default();
    record_events(&target, &log, true);

    scene.touch_down(10.0, 10.0, PointerButton::Middle).unwrap();
    assert!(scene.cancel_drag(PointerButton::Middle).unwrap());
    assert_eq!(log.borrow().last().map(String::as_str), Some("cancel target"));
}

#[test]
fn keys_and_scrolls_route_along_the_hover_path() {
    let (runtime, scene) = scene();
    let target = element(&runtime, "target", Rect::new(0.0, 0.0, 50.0, 50.0));
    scene.main_root().add_child(&target).unwrap();
    let log = EventLog::default();
    record_events(&target, &log, false);

    scene.mouse_moved(10.0, 10.0).unwrap();
    scene.key_down(KeyCode::Enter, Modifiers::NONE).unwrap();
    scene.scrolled(0.0, 1.0).unwrap();
    assert_eq!(*log.borrow(), vec!["enter target", "key target", "scroll target"]);

    let dialog = element(&runtime, "dialog", Rect::new(300.0, 300.0, 50.0, 50.0));
    scene.show_root_dialog(&dialog).unwrap();
    assert!(scene.key_down(KeyCode::Enter, Modifiers::NONE).unwrap());
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn tooltip_cancelled_before_delay_never_shows() {
    let (runtime, scene) = scene();
    let owner = element(&runtime, "owner", Rect::new(0.0, 0.0, 100.0, 100.0));
    let tooltip = element(&runtime, "tip", Rect::new(0.0, 0.0, 40.0, 20.0));
    owner.set_tooltip(Some(tooltip.clone()));
    scene.main_root().add_child(&owner).unwrap();

    scene.update(Duration::ZERO).unwrap();
    scene.mouse_moved(50.0, 50.0).unwrap();
    assert!(scene.has_pending_tooltip());
    scene.update(Duration::from_millis(500)).unwrap();
    assert!(scene.active_tooltip().is_none());

    scene.mouse_moved(500.0, 500.0).unwrap();
    assert!(!scene.has_pending_tooltip());
    scene.update(Duration::from_millis(2000)).unwrap();
    assert!(scene.active_tooltip().is_none());
    assert!(!tooltip.has_parent());
}

#[test]
fn tooltip_shows_after_delay_near_the_pointer() {
    let (runtime, scene) = scene();
    let owner = element(&runtime, "owner", Rect::new(0.0, 0.0, 100.0, 100.0));
    let tooltip = element(&runtime, "tip", Rect::new(0.0, 0.0, 40.0, 20.0));
    owner.set_tooltip(Some(tooltip.clone()));
    scene.main_root().add_child(&owner).unwrap();

    scene.update(Duration::ZERO).unwrap();
    scene.mouse_moved(50.0, 50.0).unwrap();
    scene.update(Duration::from_millis(999)).unwrap();
    assert!(scene.active_tooltip().is_none());
    scene.update(Duration::from_millis(1000)).unwrap();

    assert_eq!(scene.active_tooltip(), Some(tooltip.clone()));
    assert_eq!(tooltip.parent().as_ref(), Some(scene.layer(LayerKind::Tooltip).root()));
    assert_eq!(scene.current_element_with_tooltip().get().unwrap(), Some(owner.clone()));
    assert_eq!(tooltip.bounds().x.get().unwrap(), 50.0);
    assert_eq!(tooltip.bounds().y.get().unwrap(), 30.0);

    scene.mouse_moved(60.0, 10.0).unwrap();
    scene.update(Duration::from_millis(1016)).unwrap();
    assert_eq!(tooltip.bounds().x.get().unwrap(), 20.0);
    assert_eq!(tooltip.bounds().y.get().unwrap(), 0.0);

    scene.mouse_moved(700.0, 500.0).unwrap();
    assert!(scene.active_tooltip().is_none());
    assert!(scene.current_element_with_tooltip().get().unwrap().is_none());
}

#[test]
fn tooltip_flips_left_when_pointer_is_exactly_its_height_from_the_top() {
    let (runtime, scene) = scene();
    let owner = element(&runtime, "owner", Rect::new(0.0, 0.0, 100.0, 100.0));
    let tooltip = element(&runtime, "tip", Rect::new(0.0, 0.0, 40.0, 20.0));
    owner.set_tooltip(Some(tooltip.clone()));
    scene.main_root().add_child(&owner).unwrap();

    scene.mouse_moved(60.0, 20.0).unwrap();
    scene.update(Duration::from_secs(1)).unwrap();
    assert_eq!(tooltip.bounds().x.get().unwrap(), 20.0);
    assert_eq!(tooltip.bounds().y.get().unwrap(), 0.0);

    scene.mouse_moved(60.0, 21.0).unwrap();
    scene.update(Duration::from_millis(1016)).unwrap();
    assert_eq!(tooltip.bounds().x.get().unwrap(), 60.0);
    assert_eq!(tooltip.bounds().y.get().unwrap(), 1.0);
}

#[test]
fn replacing_a_visible_tooltip_swaps_the_shown_element() {
    let (runtime, scene) = scene();
    let owner = element(&runtime, "owner", Rect::new(0.0, 0.0, 100.0, 100.0));
    let first = element(&runtime, "first", Rect::new(0.0, 0.0, 40.0, 20.0));
    let second = element(&runtime, "second", Rect::new(0.0, 0.0, 30.0, 10.0));
    owner.set_tooltip(Some(first.clone()));
    scene.main_root().add_child(&owner).unwrap();
    scene.mouse_moved(50.0, 50.0).unwrap();
    scene.update(Duration::from_secs(1)).unwrap();
    assert_eq!(scene.active_tooltip(), Some(first.clone()));

    owner.set_tooltip(Some(second.clone()));
    assert!(!first.has_parent());
    assert_eq!(scene.active_tooltip(), Some(second.clone()));
    assert_eq!(second.parent().as_ref(), Some(scene.layer(LayerKind::Tooltip).root()));
    assert_eq!(second.bounds().x.get().unwrap(), 50.0);
    assert_eq!(second.bounds().y.get().unwrap(), 40.0);

    owner.set_tooltip(None);
    assert!(scene.active_tooltip().is_none());
    assert!(!second.has_parent());
    assert_eq!(scene.current_element_with_tooltip().get().unwrap(), Some(owner.clone()));

    scene.mouse_moved(500.0, 500.0).unwrap();
    assert!(scene.current_element_with_tooltip().get().unwrap().is_none());
    assert_eq!(owner.tooltip_element().listener_count(), 0);
}

#[test]
fn showing_a_dialog_cancels_the_tooltip() {
    let (runtime, scene) = scene();
    let owner = element(&runtime, "owner", Rect::new(0.0, 0.0, 100.0, 100.0));
    let tooltip = element(&runtime, "tip", Rect::new(0.0, 0.0, 40.0, 20.0));
    owner.set_tooltip(Some(tooltip.clone()));
    scene.main_root().add_child(&owner).unwrap();
    scene.mouse_moved(50.0, 50.0).unwrap();
    scene.update(Duration::from_secs(5)).unwrap();
    assert!(tooltip.has_parent());

    let dialog = element(&runtime, "dialog", Rect::new(200.0, 200.0, 100.0, 100.0));
    scene.show_root_dialog(&dialog).unwrap();
    assert!(scene.active_tooltip().is_none());
    assert!(!tooltip.has_parent());
    assert!(scene.layer(LayerKind::Dialog).hover_path().is_empty());
}

#[test]
fn blocking_layer_hides_lower_tooltips() {
    let (runtime, scene) = scene();
    let owner = element(&runtime, "owner", Rect::new(0.0, 0.0, 100.0, 100.0));
    owner.set_tooltip(Some(element(&runtime, "tip", Rect::new(0.0, 0.0, 40.0, 20.0))));
    scene.main_root().add_child(&owner).unwrap();
    let dialog = element(&runtime, "dialog", Rect::new(200.0, 200.0, 100.0, 100.0));
    scene.show_root_dialog(&dialog).unwrap();

    scene.mouse_moved(50.0, 50.0).unwrap();
    assert!(!scene.has_pending_tooltip());
    assert!(scene.layer(LayerKind::Main).hover_path().is_empty());
}

#[test]
fn context_menu_is_placed_at_the_pointer_and_clamped() {
    let (runtime, scene) = scene();
    let menu = element(&runtime, "menu", Rect::new(0.0, 0.0, 100.0, 50.0));

    scene.mouse_moved(100.0, 120.0).unwrap();
    scene.show_root_context_menu(&menu).unwrap();
    assert_eq!(menu.bounds().rect().unwrap(), Rect::new(100.0, 120.0, 100.0, 50.0));

    scene.mouse_moved(780.0, 590.0).unwrap();
    scene.show_root_context_menu(&menu).unwrap();
    assert_eq!(menu.bounds().rect().unwrap(), Rect::new(700.0, 550.0, 100.0, 50.0));
    assert_eq!(scene.layer(LayerKind::ContextMenu).root().child_count(), 1);
}

#[test]
fn touching_outside_the_context_menu_hides_it() {
    let (runtime, scene) = scene();
    let target = element(&runtime, "target", Rect::new(300.0, 300.0, 200.0, 200.0));
    scene.main_root().add_child(&target).unwrap();
    let log = EventLog::default();
    record_events(&target, &log, true);
    let menu = element(&runtime, "menu", Rect::new(0.0, 0.0, 60.0, 60.0));
    scene.mouse_moved(10.0, 10.0).unwrap();
    scene.show_root_context_menu(&menu).unwrap();

    assert!(scene.touch_down(400.0, 400.0, PointerButton::Primary).unwrap());
    assert!(scene.root_context_menu().is_none());
    assert!(!menu.has_parent());
    assert!(!log.borrow().iter().any(|entry| entry == "down target"));
}

#[test]
fn open_context_menu_leaves_hover_and_keys_to_the_main_layer() {
    let (runtime, scene) = scene();
    let target = element(&runtime, "target", Rect::new(500.0, 400.0, 100.0, 100.0));
    scene.main_root().add_child(&target).unwrap();
    let log = EventLog::default();
    record_events(&target, &log, false);
    let menu = element(&runtime, "menu", Rect::new(0.0, 0.0, 60.0, 60.0));
    scene.mouse_moved(10.0, 10.0).unwrap();
    scene.show_root_context_menu(&menu).unwrap();

    scene.mouse_moved(550.0, 450.0).unwrap();
    scene.key_down(KeyCode::Escape, Modifiers::NONE).unwrap();
    scene.scrolled(0.0, 1.0).unwrap();
    assert_eq!(*log.borrow(), vec!["enter target", "key target", "scroll target"]);
    assert_eq!(scene.root_context_menu(), Some(menu));
}

#[test]
fn unconsumed_touch_on_menu_content_hides_the_menu() {
    let (runtime, scene) = scene();
    let menu = element(&runtime, "menu", Rect::new(0.0, 0.0, 100.0, 100.0));
    let label = element(&runtime, "label", Rect::new(0.0, 0.0, 100.0, 20.0));
    let item = element(&runtime, "item", Rect::new(0.0, 40.0, 100.0, 20.0));
    menu.add_child(&label).unwrap();
    menu.add_child(&item).unwrap();
    let log = EventLog::default();
    record_events(&label, &log, false);
    record_events(&item, &log, true);
    scene.mouse_moved(0.0, 0.0).unwrap();
    scene.show_root_context_menu(&menu).unwrap();

    assert!(scene.touch_down(50.0, 50.0, PointerButton::Primary).unwrap());
    scene.touch_up(50.0, 50.0, PointerButton::Primary).unwrap();
    assert_eq!(scene.root_context_menu(), Some(menu.clone()));

    assert!(scene.touch_down(50.0, 10.0, PointerButton::Primary).unwrap());
    assert!(log.borrow().iter().any(|entry| entry == "down label"));
    assert!(scene.root_context_menu().is_none());
    assert!(!menu.has_parent());
}

#[test]
fn resizing_hides_the_context_menu() {
    let (runtime, scene) = scene();
    let menu = element(&runtime, "menu", Rect::new(0.0, 0.0, 60.0, 60.0));
    scene.show_root_context_menu(&menu).unwrap();
    assert_eq!(scene.root_context_menu(), Some(menu.clone()));

    scene.resize(640.0, 480.0).unwrap();
    assert!(scene.root_context_menu().is_none());
    assert!(!menu.has_parent());
}

#[test]
fn only_one_dialog_at_a_time() {
    let (runtime, scene) = scene();
    let first = element(&runtime, "first", Rect::new(0.0, 0.0, 10.0, 10.0));
    let second = element(&runtime, "second", Rect::new(0.0, 0.0, 10.0, 10.0));

    scene.show_root_dialog(&first).unwrap();
    scene.show_root_dialog(&second).unwrap();
    assert!(!first.has_parent());
    assert_eq!(scene.root_dialog(), Some(second));
    assert_eq!(scene.layer(LayerKind::Dialog).root().child_count(), 1);
}

#[test]
fn update_flips_the_frame_trigger() {
    let (_runtime, scene) = scene();
    let trigger = scene.frame_update_trigger();
    let before = trigger.get().unwrap();
    scene.update(Duration::from_millis(16)).unwrap();
    assert_eq!(trigger.get().unwrap(), !before);
    scene.update(Duration::from_millis(32)).unwrap();
    assert_eq!(trigger.get().unwrap(), before);
}

#[test]
fn pointer_positions_go_through_the_camera() {
    let (_runtime, scene) = scene();
    let mut camera = scene.camera();
    camera.zoom = 2.0;
    scene.set_camera(camera);

    scene.mouse_moved(100.0, 100.0).unwrap();
    let expected = scene.screen_to_ui(100.0, 100.0);
    assert_eq!(scene.mouse_position().get().unwrap(), expected);
    assert_eq!(expected, Point::new(-200.0, -100.0));

    scene.resize_to_camera().unwrap();
    assert_eq!(
        scene.main_root().bounds().rect().unwrap(),
        Rect::new(-400.0, -300.0, 1600.0, 1200.0)
    );
}

#[test]
fn outlines_skip_the_main_layer_under_a_dialog() {
    let runtime = Runtime::new();
    let config = SceneConfig::default().with_outline_mode(OutlineMode::All);
    let scene = SceneRoot::with_config(&runtime, 800.0, 600.0, config);
    let rect = RectElement::new(&runtime, Color::RED);
    rect.element().bounds().set_rect(Rect::new(0.0, 0.0, 100.0, 100.0));
    scene.main_root().add_child(rect.element()).unwrap();

    let mut surface = RecordingSurface::new();
    scene.render(&mut surface).unwrap();
    assert_eq!(surface.commands().len(), 1 + 5 * 4);

    let dialog = element(&runtime, "dialog", Rect::new(0.0, 0.0, 50.0, 50.0));
    scene.show_root_dialog(&dialog).unwrap();
    surface.clear();
    scene.render(&mut surface).unwrap();
    assert_eq!(surface.commands().len(), 1 + 4 * 4);
}

#[test]
fn weak_handle_does_not_keep_the_scene_alive() {
    let runtime = Runtime::new();
    let weak = SceneRoot::new(&runtime, 10.0, 10.0).downgrade();
    assert!(weak.upgrade().is_none());

    let scene = SceneRoot::new(&runtime, 10.0, 10.0);
    let weak = scene.downgrade();
    assert!(weak.upgrade().is_some());
}

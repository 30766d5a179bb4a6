use std::time::Duration;

use beatframe_app::{AppBuilder, SetupError};
use beatframe_render_common::TextureRegion;
use beatframe_render_pixels::PixelsRenderer;
use beatframe_ui::{
    Anchor, Button, ButtonStyle, Color, InputEvent, Insets, KeyCode, Observable, PointerButton,
    RadioButton, RectElement, Runtime, SceneConfig, SceneRoot, Size, ToggleGroup, UiElement,
    UiError,
};

const INITIAL_WIDTH: u32 = 800;
const INITIAL_HEIGHT: u32 = 600;
const INDICATOR_SIZE: u32 = 16;

const BAR_COLORS: [Color; 3] = [
    Color::rgb(0.86, 0.3, 0.3),
    Color::rgb(0.3, 0.7, 0.4),
    Color::rgb(0.3, 0.45, 0.9),
];

fn main() {
    env_logger::init();

    println!("=== Beatframe Desktop Example ===");
    println!("  - Click +/- to grow or shrink the bar");
    println!("  - Hover + to see its tooltip");
    println!("  - Pick a bar color with the radio buttons");
    println!("  - Right click the background for a context menu");
    println!("  - Open the dialog, Escape closes it");
    println!();
    println!("Press F12 to dump the scene tree");
    println!();

    AppBuilder::new()
        .title("Beatframe Demo")
        .size(INITIAL_WIDTH, INITIAL_HEIGHT)
        .scene(SceneConfig::default().with_tooltip_delay(Duration::from_millis(600)))
        .run(build_scene)
}

fn build_scene(scene: &SceneRoot, renderer: &mut PixelsRenderer) -> Result<(), SetupError> {
    let runtime = scene.runtime().clone();
    let root = scene.main_root();

    let background = RectElement::new(&runtime, Color::rgb(0.93, 0.93, 0.95));
    background.element().set_name("background");
    root.add_child(background.element())?;
    background.element().fill_parent();

    let count = runtime.observable(3_i32);
    let bar_color = runtime.observable(BAR_COLORS[0]);

    let minus = action_button(&runtime, "minus", Color::rgb(0.8, 0.35, 0.35));
    let plus = action_button(&runtime, "plus", Color::rgb(0.35, 0.7, 0.45));
    background.element().add_child(minus.element())?;
    background.element().add_child(plus.element())?;
    minus.element().bounds().x.set(40.0);
    minus.element().bounds().y.set(40.0);
    plus.element().bind_x_to(minus.element(), 12.0);
    plus.element().bounds().y.set(40.0);
    {
        let count = count.clone();
        minus.set_on_action(move || {
            count.update(|value| *value = (*value - 1).max(0))?;
            Ok(())
        });
    }
    {
        let count = count.clone();
        plus.set_on_action(move || {
            count.update(|value| *value = (*value + 1).min(30))?;
            Ok(())
        });
    }
    plus.element().set_tooltip(Some(tooltip(&runtime)));

    let bar = counter_bar(&runtime, &count, &bar_color);
    background.element().add_child(bar.element())?;
    bar.element().bounds().x.set(40.0);
    bar.element().bind_y_to(minus.element(), 24.0);

    color_picker(&runtime, renderer, background.element(), bar.element(), &bar_color)?;

    let dialog_button = action_button(&runtime, "open-dialog", Color::rgb(0.45, 0.45, 0.6));
    background.element().add_child(dialog_button.element())?;
    dialog_button.element().anchor(Anchor::BottomRight, -40.0, -40.0);
    {
        let weak = scene.downgrade();
        let runtime = runtime.clone();
        dialog_button.set_on_action(move || {
            let Some(scene) = weak.upgrade() else {
                return Ok(());
            };
            let dialog = dialog(&runtime, &scene)?;
            scene.show_root_dialog(&dialog)?;
            dialog.anchor(Anchor::Center, 0.0, 0.0);
            Ok(())
        });
    }

    let menu = context_menu(&runtime, scene, &count)?;
    {
        let weak = scene.downgrade();
        background.element().add_input_listener(move |_, event| match event {
            InputEvent::TouchDown {
                button: PointerButton::Secondary,
                ..
            } => {
                if let Some(scene) = weak.upgrade() {
                    scene.show_root_context_menu(&menu)?;
                }
                Ok(true)
            }
            _ => Ok(false),
        });
    }

    log::info!("demo scene built");
    Ok(())
}

fn action_button(runtime: &Runtime, name: &str, background: Color) -> Button {
    let style = ButtonStyle {
        background,
        hovered: background.multiply(Color::rgb(1.1, 1.1, 1.1)),
        pressed: background.multiply(Color::rgb(0.75, 0.75, 0.75)),
        ..ButtonStyle::default()
    };
    let button = Button::new(runtime, style);
    button.element().set_name(name);
    button.element().bounds().width.set(64.0);
    button.element().bounds().height.set(40.0);
    button
}

fn tooltip(runtime: &Runtime) -> UiElement {
    let tip = RectElement::new(runtime, Color::rgb(1.0, 0.97, 0.8));
    tip.element().set_name("plus-tooltip");
    tip.element().bounds().width.set(90.0);
    tip.element().bounds().height.set(24.0);
    tip.element().border().set(Insets::uniform(1.0));
    tip.element().clone()
}

/// A bar whose width follows the counter.
fn counter_bar(runtime: &Runtime, count: &Observable<i32>, color: &Observable<Color>) -> RectElement {
    let bar = RectElement::new(runtime, Color::BLACK);
    bar.element().set_name("bar");
    bar.element().bounds().height.set(32.0);
    {
        let count = count.clone();
        bar.element()
            .bounds()
            .width
            .bind(move |scope| Ok(scope.read(&count)? as f32 * 20.0));
    }
    {
        let color = color.clone();
        bar.color().bind(move |scope| scope.read(&color));
    }
    bar
}

fn color_picker(
    runtime: &Runtime,
    renderer: &mut PixelsRenderer,
    parent: &UiElement,
    above: &UiElement,
    bar_color: &Observable<Color>,
) -> Result<(), SetupError> {
    let indicator = Size::new(INDICATOR_SIZE as f32, INDICATOR_SIZE as f32);
    let unchecked = TextureRegion::whole(
        renderer.register_texture(INDICATOR_SIZE, INDICATOR_SIZE, ring_texture(false))?,
        indicator,
    );
    let checked = TextureRegion::whole(
        renderer.register_texture(INDICATOR_SIZE, INDICATOR_SIZE, ring_texture(true))?,
        indicator,
    );

    let group = ToggleGroup::new();
    let mut previous: Option<UiElement> = None;
    for (index, color) in BAR_COLORS.into_iter().enumerate() {
        let radio = RadioButton::new(runtime, unchecked, checked)?;
        radio.element().set_name(format!("color-{index}"));
        radio.element().bounds().width.set(28.0);
        radio.element().bounds().height.set(28.0);
        parent.add_child(radio.element())?;
        match &previous {
            Some(left) => {
                radio.element().bind_x_to(left, 8.0);
                let y = left.bounds().y.clone();
                radio.element().bounds().y.bind(move |scope| scope.read(&y));
            }
            None => {
                radio.element().bounds().x.set(40.0);
                radio.element().bind_y_to(above, 24.0);
            }
        }
        if index == 0 {
            radio.checked().set(true);
        }
        group.add(&radio);

        let bar_color = bar_color.clone();
        radio.checked().add_listener(move |checked| match checked.get() {
            Ok(true) => bar_color.set(color),
            Ok(false) => {}
            Err(err) => log::warn!("radio state unavailable: {err}"),
        });
        previous = Some(radio.element().clone());
    }
    Ok(())
}

/// RGBA8 disc outline, filled when `filled`.
fn ring_texture(filled: bool) -> Vec<u8> {
    let size = INDICATOR_SIZE as f32;
    let center = (size - 1.0) / 2.0;
    let outer = size / 2.0 - 0.5;
    let inner = outer - 2.0;
    let mut rgba = Vec::with_capacity((INDICATOR_SIZE * INDICATOR_SIZE * 4) as usize);
    for y in 0..INDICATOR_SIZE {
        for x in 0..INDICATOR_SIZE {
            let distance = ((x as f32 - center).powi(2) + (y as f32 - center).powi(2)).sqrt();
            let on_ring = distance <= outer && distance >= inner;
            let in_dot = filled && distance <= inner - 2.0;
            let alpha = if on_ring || in_dot { 255 } else { 0 };
            rgba.extend_from_slice(&[255, 255, 255, alpha]);
        }
    }
    rgba
}

fn dialog(runtime: &Runtime, scene: &SceneRoot) -> Result<UiElement, UiError> {
    let panel = RectElement::new(runtime, Color::rgb(0.98, 0.98, 1.0));
    let element = panel.element().clone();
    element.set_name("dialog");
    element.bounds().width.set(320.0);
    element.bounds().height.set(180.0);
    element.padding().set(Insets::uniform(16.0));

    let close = action_button(runtime, "close", Color::rgb(0.6, 0.6, 0.65));
    element.add_child(close.element())?;
    close.element().anchor(Anchor::BottomRight, 0.0, 0.0);
    {
        let weak = scene.downgrade();
        close.set_on_action(move || {
            if let Some(scene) = weak.upgrade() {
                scene.hide_root_dialog();
            }
            Ok(())
        });
    }

    let weak = scene.downgrade();
    element.add_input_listener(move |_, event| match event {
        InputEvent::KeyDown {
            key: KeyCode::Escape,
            ..
        } => {
            if let Some(scene) = weak.upgrade() {
                scene.hide_root_dialog();
            }
            Ok(true)
        }
        _ => Ok(false),
    });
    Ok(element)
}

fn context_menu(
    runtime: &Runtime,
    scene: &SceneRoot,
    count: &Observable<i32>,
) -> Result<UiElement, UiError> {
    let panel = RectElement::new(runtime, Color::rgb(0.2, 0.2, 0.25));
    let menu = panel.element().clone();
    menu.set_name("context-menu");
    menu.bounds().width.set(140.0);
    menu.bounds().height.set(56.0);
    menu.padding().set(Insets::uniform(8.0));

    let reset = action_button(runtime, "reset", Color::rgb(0.5, 0.5, 0.55));
    menu.add_child(reset.element())?;
    reset.element().bind_width_to_parent(0.0, 1.0);
    let (weak, count) = (scene.downgrade(), count.clone());
    reset.set_on_action(move || {
        count.set(0);
        if let Some(scene) = weak.upgrade() {
            scene.hide_root_context_menu();
        }
        Ok(())
    });
    Ok(menu)
}

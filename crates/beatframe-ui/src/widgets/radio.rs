use std::cell::RefCell;
use std::rc::{Rc, Weak};

use beatframe_core::{ListenerId, Observable, ReactiveError, Runtime};
use beatframe_render_common::TextureRegion;
use beatframe_ui_graphics::{Color, Insets};

use crate::element::UiElement;
use crate::widgets::button::Button;
use crate::widgets::image::{ImageNode, ImageRenderingMode};
use crate::TreeError;

/// A checkable control drawn as an indicator image at its left edge.
///
/// The indicator is square, as tall as the content zone, and shows
/// `unchecked` or `checked` depending on the state. Captions are left to the
/// host, which can add children to the right of the indicator.
#[derive(Clone)]
pub struct RadioButton {
    button: Button,
    indicator: ImageNode,
    checked: Observable<bool>,
    act_as_toggle: Observable<bool>,
    group: Rc<RefCell<Option<ToggleGroup>>>,
}

impl RadioButton {
    pub fn new(
        runtime: &Runtime,
        unchecked: TextureRegion,
        checked_texture: TextureRegion,
    ) -> Result<Self, TreeError> {
        let button = Button::plain(runtime);
        button.element().set_name("radio");
        let checked = runtime.observable(false);
        let act_as_toggle = runtime.observable(false);

        let indicator = ImageNode::new(runtime, None, ImageRenderingMode::MaintainAspectRatio);
        {
            let bounds = indicator.element().bounds();
            bounds.x.set(0.0);
            bounds.y.set(0.0);
            indicator.element().bind_height_to_parent(0.0, 1.0);
            let height = bounds.height.clone();
            bounds.width.bind(move |scope| scope.read(&height));

            let checked = checked.clone();
            indicator.texture().bind(move |scope| {
                Ok(Some(if scope.read(&checked)? {
                    checked_texture
                } else {
                    unchecked
                }))
            });
            indicator.tint().set(Color::BLACK);
            indicator.element().margin().set(Insets::uniform(2.0));
        }
        button.element().add_child(indicator.element())?;

        {
            let (checked, act_as_toggle) = (checked.clone(), act_as_toggle.clone());
            button.set_on_action(move || {
                if act_as_toggle.get()? {
                    checked.invert()?;
                } else {
                    checked.set(true);
                }
                Ok(())
            });
        }

        Ok(Self {
            button,
            indicator,
            checked,
            act_as_toggle,
            group: Rc::new(RefCell::new(None)),
        })
    }

    pub fn element(&self) -> &UiElement {
        self.button.element()
    }

    pub fn button(&self) -> &Button {
        &self.button
    }

    pub fn indicator(&self) -> &ImageNode {
        &self.indicator
    }

    pub fn checked(&self) -> &Observable<bool> {
        &self.checked
    }

    /// When set, clicking a checked button unchecks it; otherwise clicks
    /// only ever check.
    pub fn act_as_toggle(&self) -> &Observable<bool> {
        &self.act_as_toggle
    }

    pub fn toggle_group(&self) -> Option<ToggleGroup> {
        self.group.borrow().clone()
    }
}

struct Member {
    checked: Observable<bool>,
    listener: ListenerId,
}

/// Keeps at most one of its radio buttons checked.
///
/// Checking a member unchecks every other member. Buttons keep their group
/// alive; the group only holds the buttons' checked cells.
#[derive(Clone, Default)]
pub struct ToggleGroup {
    members: Rc<RefCell<Vec<Member>>>,
}

impl ToggleGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `radio`, moving it out of any previous group. If it is already
    /// checked, the other members are unchecked.
    pub fn add(&self, radio: &RadioButton) {
        if let Some(previous) = radio.toggle_group() {
            previous.remove(radio);
        }
        let members: Weak<RefCell<Vec<Member>>> = Rc::downgrade(&self.members);
        let listener = radio.checked.add_listener(move |cell| {
            if !matches!(cell.get(), Ok(true)) {
                return;
            }
            let Some(members) = members.upgrade() else {
                return;
            };
            let others: Vec<Observable<bool>> = members
                .borrow()
                .iter()
                .filter(|member| !member.checked.ptr_eq(cell))
                .map(|member| member.checked.clone())
                .collect();
            for other in others {
                other.set(false);
            }
        });
        self.members.borrow_mut().push(Member {
            checked: radio.checked.clone(),
            listener,
        });
        *radio.group.borrow_mut() = Some(self.clone());

        if matches!(radio.checked.get(), Ok(true)) {
            self.uncheck_all_except(&radio.checked);
        }
    }

    /// Returns whether `radio` was a member.
    pub fn remove(&self, radio: &RadioButton) -> bool {
        let removed = {
            let mut members = self.members.borrow_mut();
            let index = members
                .iter()
                .position(|member| member.checked.ptr_eq(&radio.checked));
            index.map(|index| members.remove(index))
        };
        match removed {
            Some(member) => {
                member.checked.remove_listener(member.listener);
                radio.group.borrow_mut().take();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.members.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.borrow().is_empty()
    }

    /// Index of the checked member in insertion order.
    pub fn checked_index(&self) -> Result<Option<usize>, ReactiveError> {
        let cells: Vec<Observable<bool>> = self
            .members
            .borrow()
            .iter()
            .map(|member| member.checked.clone())
            .collect();
        for (index, cell) in cells.iter().enumerate() {
            if cell.get()? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    fn uncheck_all_except(&self, keep: &Observable<bool>) {
        let others: Vec<Observable<bool>> = self
            .members
            .borrow()
            .iter()
            .filter(|member| !member.checked.ptr_eq(keep))
            .map(|member| member.checked.clone())
            .collect();
        for other in others {
            other.set(false);
        }
    }
}

//! The carousel component: one gallery entry plus its private state.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use phenix_model::Category;

use crate::input::{CarouselInput, Effect, NavKey};
use crate::keyboard::{KeyboardHub, KeyboardSubscription};
use crate::source::{alt_text, resolve_source};
use crate::state::{CarouselState, Navigation};
use crate::view::{CarouselView, Controls, GalleryView, Slide};

#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    images: Vec<String>,
    title: String,
    category: Category,
    state: CarouselState,
}

impl Carousel {
    pub fn new(
        images: Vec<String>,
        title: impl Into<String>,
        category: Category,
    ) -> Self {
        let state = CarouselState::new(images.len());
        Self {
            images,
            title: title.into(),
            category,
            state,
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Resolved address of the image currently on screen.
    pub fn current_source(&self) -> Option<String> {
        self.images
            .get(self.state.current_index())
            .map(|image| resolve_source(image, self.category))
    }

    pub fn sources(&self) -> Vec<String> {
        self.images
            .iter()
            .map(|image| resolve_source(image, self.category))
            .collect()
    }

    /// Applies one input event. Out-of-range dot clicks are dropped.
    pub fn apply(&mut self, input: CarouselInput) -> Effect {
        if self.is_empty() {
            return Effect::None;
        }

        match input {
            CarouselInput::GestureStart { x } => {
                self.state.gesture_start(x);
                Effect::None
            }
            CarouselInput::GestureMove { x } => {
                self.state.gesture_move(x);
                Effect::None
            }
            CarouselInput::GestureEnd => self
                .state
                .gesture_end()
                .map_or(Effect::None, Effect::Navigated),
            CarouselInput::GestureCancel => {
                self.state.gesture_cancel();
                Effect::None
            }
            CarouselInput::Key(NavKey::Left) | CarouselInput::PreviousClicked => {
                self.state.previous();
                Effect::Navigated(Navigation::Previous)
            }
            CarouselInput::Key(NavKey::Right) | CarouselInput::NextClicked => {
                self.state.next();
                Effect::Navigated(Navigation::Next)
            }
            CarouselInput::DotClicked(index) => match self.state.go_to(index) {
                Ok(()) => Effect::Navigated(Navigation::Jump(index)),
                Err(err) => {
                    tracing::debug!("ignoring dot click: {err}");
                    Effect::None
                }
            },
            CarouselInput::ImageFailed => {
                if self.state.has_load_error() {
                    Effect::None
                } else {
                    self.state.report_load_failure();
                    Effect::ImageHidden
                }
            }
        }
    }

    pub fn view(&self) -> CarouselView {
        let count = self.images.len();
        if count == 0 {
            return CarouselView::Empty;
        }

        let index = self.state.current_index();
        let slide = if self.state.has_load_error() {
            Slide::Unavailable
        } else {
            Slide::Image {
                src: resolve_source(&self.images[index], self.category),
                alt: alt_text(&self.title, index),
                eager: index == 0,
            }
        };

        CarouselView::Gallery(GalleryView {
            slide,
            controls: (count > 1).then(|| Controls::new(index, count)),
            index,
            count,
        })
    }

    /// Activates the component. The keyboard listener is only acquired
    /// when there is something to navigate.
    pub fn mount(self, hub: &KeyboardHub) -> MountedCarousel {
        self.mount_with(hub, |_, _| {})
    }

    /// Like [`Carousel::mount`], calling `on_key` after every keyboard
    /// input that changed the view.
    pub fn mount_with<F>(self, hub: &KeyboardHub, on_key: F) -> MountedCarousel
    where
        F: FnMut(&Carousel, Effect) + 'static,
    {
        let inner = Rc::new(RefCell::new(self));
        let on_key: KeyObserver = Rc::new(RefCell::new(on_key));
        let keyboard = subscribe(&inner, hub, &on_key);
        MountedCarousel {
            inner,
            keyboard,
            on_key,
        }
    }
}

type KeyObserver = Rc<RefCell<dyn FnMut(&Carousel, Effect)>>;

fn subscribe(
    inner: &Rc<RefCell<Carousel>>,
    hub: &KeyboardHub,
    on_key: &KeyObserver,
) -> Option<KeyboardSubscription> {
    if inner.borrow().is_empty() {
        return None;
    }

    let weak: Weak<RefCell<Carousel>> = Rc::downgrade(inner);
    let on_key = Rc::clone(on_key);
    Some(hub.subscribe(move |key| {
        if let Some(carousel) = weak.upgrade()
            && let Ok(mut carousel) = carousel.try_borrow_mut()
        {
            let effect = carousel.apply(CarouselInput::Key(key));
            if effect.needs_render()
                && let Ok(mut observer) = on_key.try_borrow_mut()
            {
                (*observer)(&carousel, effect);
            }
        }
    }))
}

/// A carousel attached to a keyboard hub. Dropping it detaches the
/// keyboard listener.
pub struct MountedCarousel {
    inner: Rc<RefCell<Carousel>>,
    keyboard: Option<KeyboardSubscription>,
    on_key: KeyObserver,
}

impl std::fmt::Debug for MountedCarousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountedCarousel")
            .field("carousel", &self.inner)
            .field("keyboard", &self.keyboard)
            .finish_non_exhaustive()
    }
}

impl MountedCarousel {
    pub fn handle(&self, input: CarouselInput) -> Effect {
        self.inner.borrow_mut().apply(input)
    }

    pub fn view(&self) -> CarouselView {
        self.inner.borrow().view()
    }

    pub fn current_index(&self) -> usize {
        self.inner.borrow().current_index()
    }

    pub fn is_listening(&self) -> bool {
        self.keyboard.is_some()
    }

    pub fn with<R>(&self, f: impl FnOnce(&Carousel) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Swaps in a different entry. The previous listener is released before
    /// the new one is acquired, and the state starts fresh.
    pub fn replace(&mut self, carousel: Carousel, hub: &KeyboardHub) {
        self.keyboard = None;
        *self.inner.borrow_mut() = carousel;
        self.keyboard = subscribe(&self.inner, hub, &self.on_key);
    }
}

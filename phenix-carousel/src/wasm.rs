//! Browser binding: hydrates server-rendered carousels.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, EventTarget, HtmlImageElement, KeyboardEvent, TouchEvent,
};

use crate::component::{Carousel, MountedCarousel};
use crate::html::{
    ACTION_GO, ACTION_NEXT, ACTION_PREVIOUS, DATA_ACTION, DATA_CATEGORY,
    DATA_IMAGES, DATA_INDEX, DATA_TITLE, ROOT_CLASS, carousel_from_attributes,
    hydrate_each, render_inner,
};
use crate::input::CarouselInput;
use crate::keyboard::KeyboardHub;

/// A DOM event listener detached on drop.
struct DomListener {
    target: EventTarget,
    kind: &'static str,
    capture: bool,
    closure: Closure<dyn FnMut(Event)>,
}

impl DomListener {
    fn attach<F>(
        target: &EventTarget,
        kind: &'static str,
        capture: bool,
        handler: F,
    ) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback_and_bool(
            kind,
            closure.as_ref().unchecked_ref(),
            capture,
        )?;
        Ok(Self {
            target: target.clone(),
            kind,
            capture,
            closure,
        })
    }
}

impl Drop for DomListener {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback_and_bool(
            self.kind,
            self.closure.as_ref().unchecked_ref(),
            self.capture,
        );
    }
}

/// Single `keydown` listener on `window` feeding the shared hub.
struct WindowKeys {
    hub: KeyboardHub,
    _keydown: DomListener,
}

thread_local! {
    static WINDOW_KEYS: RefCell<Option<WindowKeys>> = const { RefCell::new(None) };
    static HYDRATED: RefCell<Vec<CarouselHandle>> = const { RefCell::new(Vec::new()) };
}

fn window_hub() -> Result<KeyboardHub, JsValue> {
    WINDOW_KEYS.with(|slot| {
        let mut slot = slot.borrow_mut();
        if let Some(keys) = slot.as_ref() {
            return Ok(keys.hub.clone());
        }

        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let hub = KeyboardHub::new();
        let dispatch = hub.clone();
        let keydown = DomListener::attach(&window, "keydown", false, move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                dispatch.dispatch(&event.key());
            }
        })?;
        *slot = Some(WindowKeys {
            hub: hub.clone(),
            _keydown: keydown,
        });
        Ok(hub)
    })
}

/// Removes the window listener once no carousel is subscribed.
fn release_idle_window_keys() {
    let _ = WINDOW_KEYS.try_with(|slot| {
        let idle = slot
            .borrow()
            .as_ref()
            .is_some_and(|keys| keys.hub.listener_count() == 0);
        if idle {
            slot.borrow_mut().take();
        }
    });
}

fn touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some(f64::from(touch.client_x()))
}

fn click_input(event: &Event) -> Option<CarouselInput> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let control = target.closest(&format!("[{DATA_ACTION}]")).ok()??;
    match control.get_attribute(DATA_ACTION)?.as_str() {
        ACTION_PREVIOUS => Some(CarouselInput::PreviousClicked),
        ACTION_NEXT => Some(CarouselInput::NextClicked),
        ACTION_GO => control
            .get_attribute(DATA_INDEX)?
            .parse()
            .ok()
            .map(CarouselInput::DotClicked),
        _ => None,
    }
}

fn read_carousel(root: &Element) -> Result<Carousel, JsValue> {
    carousel_from_attributes(
        root.get_attribute(DATA_IMAGES).as_deref(),
        root.get_attribute(DATA_TITLE).as_deref(),
        root.get_attribute(DATA_CATEGORY).as_deref(),
    )
    .map_err(|err| JsValue::from_str(&err.to_string()))
}

/// A hydrated carousel. Dropping it or calling `destroy` detaches every
/// listener it installed, including its keyboard subscription.
#[wasm_bindgen]
pub struct CarouselHandle {
    listeners: Vec<DomListener>,
    mounted: Option<Rc<MountedCarousel>>,
}

impl std::fmt::Debug for CarouselHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselHandle")
            .field("listeners", &self.listeners.len())
            .field("mounted", &self.mounted)
            .finish()
    }
}

#[wasm_bindgen]
impl CarouselHandle {
    /// Takes over a root element produced by the server renderer.
    pub fn hydrate(root: Element) -> Result<CarouselHandle, JsValue> {
        let carousel = read_carousel(&root)?;
        if carousel.is_empty() {
            return Ok(CarouselHandle {
                listeners: Vec::new(),
                mounted: None,
            });
        }

        let hub = window_hub()?;
        let key_root = root.clone();
        let mounted = Rc::new(carousel.mount_with(&hub, move |carousel, _| {
            key_root.set_inner_html(&render_inner(&carousel.view()));
        }));
        root.set_inner_html(&render_inner(&mounted.view()));

        let weak = Rc::downgrade(&mounted);
        let target: &EventTarget = root.as_ref();
        let listeners = vec![
            attach(target, "touchstart", false, &weak, &root, |event| {
                touch_x(event).map(|x| CarouselInput::GestureStart { x })
            })?,
            attach(target, "touchmove", false, &weak, &root, |event| {
                touch_x(event).map(|x| CarouselInput::GestureMove { x })
            })?,
            attach(target, "touchend", false, &weak, &root, |_| {
                Some(CarouselInput::GestureEnd)
            })?,
            attach(target, "touchcancel", false, &weak, &root, |_| {
                Some(CarouselInput::GestureCancel)
            })?,
            attach(target, "click", false, &weak, &root, click_input)?,
            // `error` does not bubble; listen during capture instead.
            attach(target, "error", true, &weak, &root, |event| {
                event
                    .target()?
                    .dyn_ref::<HtmlImageElement>()
                    .map(|_| CarouselInput::ImageFailed)
            })?,
        ];

        Ok(CarouselHandle {
            listeners,
            mounted: Some(mounted),
        })
    }

    #[wasm_bindgen(getter, js_name = currentIndex)]
    pub fn current_index(&self) -> usize {
        self.mounted
            .as_ref()
            .map_or(0, |mounted| mounted.current_index())
    }

    #[wasm_bindgen(getter, js_name = isListening)]
    pub fn is_listening(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|mounted| mounted.is_listening())
    }

    pub fn destroy(&mut self) {
        self.listeners.clear();
        self.mounted = None;
        release_idle_window_keys();
    }
}

impl Drop for CarouselHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn attach<F>(
    target: &EventTarget,
    kind: &'static str,
    capture: bool,
    mounted: &Weak<MountedCarousel>,
    root: &Element,
    to_input: F,
) -> Result<DomListener, JsValue>
where
    F: Fn(&Event) -> Option<CarouselInput> + 'static,
{
    let mounted = Weak::clone(mounted);
    let root = root.clone();
    DomListener::attach(target, kind, capture, move |event| {
        let (Some(mounted), Some(input)) = (mounted.upgrade(), to_input(&event))
        else {
            return;
        };
        if mounted.handle(input).needs_render() {
            root.set_inner_html(&render_inner(&mounted.view()));
        }
    })
}

/// Hydrates every carousel root in the document. Returns how many were
/// hydrated; roots with unreadable attributes keep their server markup.
#[wasm_bindgen(js_name = hydrateAll)]
pub fn hydrate_all() -> Result<u32, JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let roots =
        document.query_selector_all(&format!(".{ROOT_CLASS}[{DATA_IMAGES}]"))?;

    let elements = (0..roots.length())
        .filter_map(|i| roots.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok());
    let handles = hydrate_each(elements, CarouselHandle::hydrate);
    let count = handles.len() as u32;
    HYDRATED.with(|slot| slot.borrow_mut().extend(handles));
    Ok(count)
}

/// Destroys every carousel created by `hydrateAll`.
#[wasm_bindgen(js_name = unmountAll)]
pub fn unmount_all() {
    let handles = HYDRATED.with(|slot| std::mem::take(&mut *slot.borrow_mut()));
    drop(handles);
    release_idle_window_keys();
}

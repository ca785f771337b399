#![forbid(unsafe_code)]

//! Gallery carousel for the Phenix website.
//!
//! The crate is split so the navigation logic stays host independent:
//! - [`state`] and [`gesture`] hold the per-instance state machine,
//! - [`component`] ties an entry's images to that state and produces a
//!   typed [`view::CarouselView`],
//! - [`html`] serialises the view for server-side rendering,
//! - [`keyboard`] scopes arrow-key listeners to a mounted instance.
//!
//! On `wasm32` a `wasm-bindgen` binding hydrates the server markup.

pub mod component;
pub mod gesture;
pub mod html;
pub mod input;
pub mod keyboard;
pub mod source;
pub mod state;
pub mod view;

#[cfg(target_arch = "wasm32")]
mod wasm;

pub use component::{Carousel, MountedCarousel};
pub use gesture::{SWIPE_THRESHOLD, SwipeDirection, SwipeTracker};
pub use html::{
    HydrateError, carousel_from_attributes, escape_html, hydrate_each,
    render_html, render_inner,
};
pub use input::{CarouselInput, Effect, NavKey};
pub use keyboard::{KeyboardHub, KeyboardSubscription};
pub use source::{ImageRef, alt_text, resolve_source};
pub use state::{CarouselState, Navigation, NavigationError};
pub use view::CarouselView;

#[cfg(target_arch = "wasm32")]
pub use wasm::{CarouselHandle, hydrate_all, unmount_all};

//! Rendering surface for the floating decorative layer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, Window};

use crate::content::BubbleImage;
use crate::dom::{append, element, set_style};
use crate::error::SiteError;
use crate::layout::{AmbientMotion, Placement};
use crate::scroll::{ScrollSignal, SubscriptionId};
use crate::visibility::{ScrollRange, opacity};

#[derive(Clone)]
struct Bubble {
    element: HtmlElement,
    scroll_range: ScrollRange,
    motion: AmbientMotion,
}

impl Bubble {
    fn apply_scroll(&self, scroll_y: f64) {
        set_style(
            &self.element,
            "opacity",
            &format!("{:.3}", opacity(scroll_y, self.scroll_range)),
        );
    }

    fn apply_drift(&self, t_secs: f64) {
        set_style(
            &self.element,
            "transform",
            &self.motion.sample(t_secs).css_transform(),
        );
    }
}

fn mount_bubble(
    document: &Document,
    container: &HtmlElement,
    placement: &Placement<BubbleImage>,
) -> Result<Bubble, SiteError> {
    let el = element(document, "div", "bubble")?;
    el.set_attribute("data-index", &placement.index.to_string())?;
    set_style(&el, "position", "absolute");
    set_style(&el, "top", &format!("{}%", placement.top_pct));
    set_style(
        &el,
        placement.side.css_property(),
        &format!("{}%", placement.side.percent()),
    );
    set_style(&el, "width", &format!("{}px", placement.size_px));
    set_style(&el, "height", &format!("{}px", placement.size_px));
    set_style(&el, "opacity", "0");
    set_style(&el, "transition", "opacity 0.5s ease-out");

    let disc = element(document, "div", "bubble__disc glass")?;
    match &placement.item.src {
        Some(src) => {
            let img = element(document, "img", "cover")?;
            img.set_attribute("src", src)?;
            img.set_attribute("alt", placement.item.alt_text())?;
            append(&disc, &img)?;
        }
        None => {
            let fill = element(document, "div", "bubble__placeholder")?;
            fill.set_attribute("aria-label", placement.item.alt_text())?;
            append(&disc, &fill)?;
        }
    }
    append(&el, &disc)?;
    append(container, &el)?;

    Ok(Bubble {
        element: el,
        scroll_range: placement.scroll_range,
        motion: placement.motion,
    })
}

/// Fixed, pointer-transparent layer of decorative bubbles. Opacity follows
/// the scroll signal; drift is driven by [`FloatingLayer::apply_drift`].
pub struct FloatingLayer {
    container: HtmlElement,
    bubbles: Vec<Bubble>,
    signal: Rc<ScrollSignal>,
    subscription: SubscriptionId,
}

impl FloatingLayer {
    pub fn mount(
        document: &Document,
        parent: &HtmlElement,
        placements: &[Placement<BubbleImage>],
        signal: Rc<ScrollSignal>,
    ) -> Result<Self, SiteError> {
        let container = element(document, "div", "floating-layer")?;
        container.set_attribute("aria-hidden", "true")?;
        set_style(&container, "position", "fixed");
        set_style(&container, "inset", "0");
        set_style(&container, "pointer-events", "none");
        set_style(&container, "overflow", "hidden");

        let bubbles = placements
            .iter()
            .map(|placement| mount_bubble(document, &container, placement))
            .collect::<Result<Vec<_>, _>>()?;
        append(parent, &container)?;

        for bubble in &bubbles {
            bubble.apply_scroll(signal.get());
        }

        let readers = bubbles.clone();
        let subscription = signal.subscribe(move |scroll_y| {
            for bubble in &readers {
                bubble.apply_scroll(scroll_y);
            }
        });

        Ok(Self {
            container,
            bubbles,
            signal,
            subscription,
        })
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    pub fn apply_drift(&self, t_secs: f64) {
        for bubble in &self.bubbles {
            bubble.apply_drift(t_secs);
        }
    }
}

impl Drop for FloatingLayer {
    fn drop(&mut self) {
        self.signal.unsubscribe(self.subscription);
        self.container.remove();
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` loop calling `tick` with seconds since start.
/// Stops on drop.
pub struct AnimationLoop {
    window: Window,
    frame_id: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl AnimationLoop {
    pub fn start(window: &Window, mut tick: impl FnMut(f64) + 'static) -> Result<Self, SiteError> {
        let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let origin: Rc<Cell<Option<f64>>> = Rc::new(Cell::new(None));

        let win = window.clone();
        let frame_id_cb = Rc::clone(&frame_id);
        let callback_cb = Rc::clone(&callback);
        let cb = Closure::wrap(Box::new(move |ts: f64| {
            let start = origin.get().unwrap_or(ts);
            origin.set(Some(start));
            tick((ts - start) / 1000.0);

            let next = callback_cb.borrow().as_ref().and_then(|cb| {
                win.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
            });
            frame_id_cb.set(next);
        }) as Box<dyn FnMut(f64)>);

        let first = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        frame_id.set(Some(first));
        *callback.borrow_mut() = Some(cb);

        Ok(Self {
            window: window.clone(),
            frame_id,
            callback,
        })
    }

    pub fn is_running(&self) -> bool {
        self.frame_id.get().is_some()
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // Breaks the closure's reference back to its own slot.
        self.callback.borrow_mut().take();
    }
}

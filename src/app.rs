use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlElement, Window};

use crate::chrome::{
    SectionBox, Theme, active_chapter, hero_parallax, hero_progress, is_revealed, nav_style,
    show_back_to_top,
};
use crate::cms;
use crate::config::SiteSettings;
use crate::contact::{self, Field, FieldErrors, SUBMIT_FAILED, SUCCESS_TOAST_MS};
use crate::content::{SiteContent, placeholder_bubbles};
use crate::dom::{
    EventBinding, append, by_id, element, log_event, set_hidden, set_status, set_style,
    smooth_scroll_into_view, smooth_scroll_to_top, toggle_class,
};
use crate::error::{SiteError, js_value_to_string};
use crate::floating::{AnimationLoop, FloatingLayer};
use crate::layout::{compose, select_elements};
use crate::scroll::{ScrollSignal, ScrollTracker, SubscriptionId};
use crate::sections::{
    ChapterView, ContactView, HeroView, NavView, mark_active_chapter, render_about,
    render_chapters, render_contact, render_hero, render_navigation, render_photography,
    render_radio, render_writing,
};

pub const ROOT_ID: &str = "app";

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
}

/// Scroll-driven page chrome, refreshed on every scroll sample.
struct Chrome {
    window: Window,
    document: Document,
    nav: NavView,
    chapters: ChapterView,
    hero: HeroView,
    sections: Vec<(String, Element)>,
    pending_reveal: RefCell<Vec<Element>>,
    theme: Cell<Theme>,
    active: RefCell<String>,
}

impl Chrome {
    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn update(&self, scroll_y: f64) {
        let nav = nav_style(scroll_y, self.theme.get());
        set_style(&self.nav.nav, "background-color", &nav.background);
        toggle_class(&self.nav.nav, "is-scrolled", nav.scrolled);
        set_hidden(&self.chapters.back_to_top, !show_back_to_top(scroll_y));

        let viewport_height = self.viewport_height();
        let boxes: Vec<(&str, SectionBox)> = self
            .sections
            .iter()
            .map(|(id, el)| {
                let rect = el.get_bounding_client_rect();
                (
                    id.as_str(),
                    SectionBox {
                        top: rect.top() + scroll_y,
                        height: rect.height(),
                    },
                )
            })
            .collect();
        let active = active_chapter(&boxes, scroll_y, viewport_height);
        let changed = self.active.borrow().as_str() != active;
        if changed {
            mark_active_chapter(&self.chapters, active);
            *self.active.borrow_mut() = active.to_string();
        }

        let hero_rect = self.hero.section.get_bounding_client_rect();
        let hero_box = SectionBox {
            top: hero_rect.top() + scroll_y,
            height: hero_rect.height(),
        };
        let parallax = hero_parallax(hero_progress(scroll_y, hero_box));
        set_style(&self.hero.content, "transform", &parallax.content_transform());
        set_style(&self.hero.content, "opacity", &format!("{:.3}", parallax.opacity));
        set_style(&self.hero.image_frame, "transform", &parallax.image_transform());
        for (i, aux) in self.hero.aux.iter().enumerate() {
            set_style(aux, "transform", &parallax.aux_transform(i));
        }

        self.pending_reveal.borrow_mut().retain(|el| {
            let rect = el.get_bounding_client_rect();
            if is_revealed(rect.top(), rect.height(), viewport_height) {
                toggle_class(el, "in-view", true);
                false
            } else {
                true
            }
        });
    }

    fn set_theme(&self, theme: Theme, scroll_y: f64) {
        self.theme.set(theme);
        if let Some(el) = self.document.document_element() {
            let _ = el.set_attribute("data-theme", theme.name());
        }
        let _ = self.nav.theme_button.set_attribute(
            "aria-pressed",
            if theme == Theme::Light { "true" } else { "false" },
        );
        self.nav
            .theme_button
            .set_text_content(Some(if theme == Theme::Dark { "☀" } else { "☾" }));
        self.update(scroll_y);
    }
}

/// A mounted page. Dropping it removes every listener, stops the animation
/// loop and empties the root element.
pub struct Page {
    animation: AnimationLoop,
    floating: Rc<FloatingLayer>,
    tracker: ScrollTracker,
    bindings: Vec<EventBinding>,
    subscriptions: Vec<SubscriptionId>,
    root: HtmlElement,
}

impl Page {
    pub fn signal(&self) -> &Rc<ScrollSignal> {
        self.tracker.signal()
    }

    pub fn bubble_count(&self) -> usize {
        self.floating.len()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_running()
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.tracker.detach();
        for id in self.subscriptions.drain(..) {
            self.tracker.signal().unsubscribe(id);
        }
        self.bindings.clear();
        self.root.set_inner_html("");
    }
}

/// Browser-seeded generator for bubble selection and sizing.
pub fn browser_rng() -> SmallRng {
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let now = js_sys::Date::now() as u64;
    SmallRng::seed_from_u64((noise << 32) ^ now)
}

fn scroll_on_click(
    document: &Document,
    target: &HtmlElement,
    selector: String,
) -> Result<EventBinding, SiteError> {
    let document = document.clone();
    EventBinding::listen(target, "click", move |_event: Event| {
        smooth_scroll_into_view(&document, &selector);
    })
}

fn wire_contact(
    window: &Window,
    document: &Document,
    view: Rc<ContactView>,
    endpoint: String,
) -> Result<Vec<EventBinding>, SiteError> {
    let errors = Rc::new(RefCell::new(FieldErrors::default()));
    let mut bindings = Vec::new();

    for field in Field::ALL {
        let Some(control) = view.control(field) else {
            continue;
        };
        let view_input = Rc::clone(&view);
        let errors_input = Rc::clone(&errors);
        bindings.push(EventBinding::listen(control, "input", move |_event: Event| {
            let mut errors = errors_input.borrow_mut();
            if errors.get(field).is_some() {
                errors.clear(field);
                view_input.show_errors(&errors);
            }
        })?);
    }

    let window = window.clone();
    let document = document.clone();
    let view_submit = Rc::clone(&view);
    bindings.push(EventBinding::listen(&view.form, "submit", move |event: Event| {
        event.prevent_default();

        let form = view_submit.read();
        let found = contact::validate(&form);
        view_submit.show_errors(&found);
        let invalid = !found.is_empty();
        *errors.borrow_mut() = found;
        if invalid {
            log_event(&document, "contact_invalid");
            return;
        }

        log_event(&document, "contact_submit");
        let window = window.clone();
        let document = document.clone();
        let view = Rc::clone(&view_submit);
        let errors = Rc::clone(&errors);
        let endpoint = endpoint.clone();
        spawn_local(async move {
            match contact::submit(&window, &endpoint, &form).await {
                Ok(id) => {
                    log_event(&document, &format!("contact_sent (id={})", id));
                    view.clear_inputs();
                    set_hidden(&view.toast, false);
                    let toast = view.toast.clone();
                    let hide = Closure::once_into_js(move || set_hidden(&toast, true));
                    if window
                        .set_timeout_with_callback_and_timeout_and_arguments_0(
                            hide.unchecked_ref(),
                            SUCCESS_TOAST_MS,
                        )
                        .is_err()
                    {
                        set_hidden(&view.toast, true);
                    }
                }
                Err(err) => {
                    web_sys::console::warn_1(&JsValue::from_str(&format!(
                        "contact_failed ({})",
                        err
                    )));
                    let mut errors = errors.borrow_mut();
                    errors.set(Field::Message, SUBMIT_FAILED);
                    view.show_errors(&errors);
                }
            }
        });
    })?);

    Ok(bindings)
}

/// Builds the whole page inside `root` and starts tracking scroll.
pub fn mount<R: Rng + ?Sized>(
    window: &Window,
    root: &HtmlElement,
    settings: &SiteSettings,
    content: &SiteContent,
    rng: &mut R,
) -> Result<Page, SiteError> {
    let document = crate::dom::document(window)?;
    root.set_inner_html("");

    let nav = render_navigation(&document, &content.site)?;
    append(root, &nav.nav)?;
    let chapters = render_chapters(&document, &content.site)?;
    append(root, &chapters.container)?;
    append(root, &chapters.back_to_top)?;

    let signal = Rc::new(ScrollSignal::new());
    let selected = select_elements(Some(&content.bubbles[..]), &placeholder_bubbles(), rng);
    let placements = compose(selected, rng);
    let floating = Rc::new(FloatingLayer::mount(
        &document,
        root,
        &placements,
        Rc::clone(&signal),
    )?);

    let main = element(&document, "main", "page")?;
    let hero = render_hero(&document, &content.hero)?;
    append(&main, &hero.section)?;

    let work = element(&document, "section", "work")?;
    work.set_id("work");
    append(&work, &render_writing(&document, &content.writing)?)?;
    append(&work, &render_photography(&document, &content.photography)?)?;
    append(&work, &render_radio(&document, &content.radio)?)?;
    append(&main, &work)?;

    append(&main, &render_about(&document, &content.about)?)?;
    let contact_view = Rc::new(render_contact(
        &document,
        &content.contact,
        &content.site.name,
    )?);
    append(&main, &contact_view.section)?;
    append(root, &main)?;

    let sections = content
        .site
        .chapters
        .iter()
        .filter_map(|chapter| {
            document
                .get_element_by_id(&chapter.id)
                .map(|el| (chapter.id.clone(), el))
        })
        .collect();

    let pending_reveal = {
        let found = root.query_selector_all(".reveal")?;
        (0..found.length())
            .filter_map(|i| found.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    };

    let mut bindings = Vec::new();
    bindings.push(scroll_on_click(&document, &nav.logo, "#intro".to_string())?);
    for (button, href) in &nav.links {
        bindings.push(scroll_on_click(&document, button, href.clone())?);
    }
    for (id, marker) in &chapters.markers {
        bindings.push(scroll_on_click(&document, marker, format!("#{}", id))?);
    }
    bindings.push(scroll_on_click(&document, &hero.cta, content.hero.cta_href.clone())?);
    bindings.extend(wire_contact(
        window,
        &document,
        Rc::clone(&contact_view),
        settings.contact_endpoint.clone(),
    )?);

    let chrome = Rc::new(Chrome {
        window: window.clone(),
        document: document.clone(),
        nav,
        chapters,
        hero,
        sections,
        pending_reveal: RefCell::new(pending_reveal),
        theme: Cell::new(Theme::default()),
        active: RefCell::new(String::new()),
    });

    {
        let win = window.clone();
        bindings.push(EventBinding::listen(
            &chrome.chapters.back_to_top,
            "click",
            move |_event: Event| smooth_scroll_to_top(&win),
        )?);
    }
    {
        let chrome_theme = Rc::clone(&chrome);
        let signal_theme = Rc::clone(&signal);
        bindings.push(EventBinding::listen(
            &chrome.nav.theme_button,
            "click",
            move |_event: Event| {
                let next = chrome_theme.theme.get().toggled();
                chrome_theme.set_theme(next, signal_theme.get());
            },
        )?);
    }

    let chrome_scroll = Rc::clone(&chrome);
    let subscriptions = vec![signal.subscribe(move |scroll_y| chrome_scroll.update(scroll_y))];

    let tracker = ScrollTracker::attach(window, Rc::clone(&signal))?;
    chrome.set_theme(Theme::default(), signal.get());

    let floating_tick = Rc::clone(&floating);
    let animation = AnimationLoop::start(window, move |t_secs| floating_tick.apply_drift(t_secs))?;

    set_status(&document, "ready");
    log_event(
        &document,
        &format!("mounted (bubbles={}, scroll_y={})", floating.len(), signal.get()),
    );

    Ok(Page {
        animation,
        floating,
        tracker,
        bindings,
        subscriptions,
        root: root.clone(),
    })
}

fn install(page: Page) {
    PAGE.with(|slot| {
        // Replacing tears the previous page down first.
        slot.borrow_mut().take();
        *slot.borrow_mut() = Some(page);
    });
}

/// Tears down the mounted page, if any.
#[wasm_bindgen]
pub fn unmount() {
    let page = PAGE.with(|slot| slot.borrow_mut().take());
    if page.is_some() {
        drop(page);
        if let Ok(window) = crate::dom::window() {
            if let Ok(document) = crate::dom::document(&window) {
                set_status(&document, "unmounted");
                log_event(&document, "unmounted");
            }
        }
    }
}

fn mount_and_install(
    window: &Window,
    settings: &SiteSettings,
    content: &SiteContent,
) -> Result<(), SiteError> {
    let document = crate::dom::document(window)?;
    let root: HtmlElement = by_id(&document, ROOT_ID)?;
    let page = mount(window, &root, settings, content, &mut browser_rng())?;
    install(page);
    Ok(())
}

pub(crate) fn start_impl() -> Result<(), SiteError> {
    let window = crate::dom::window()?;
    let document = crate::dom::document(&window)?;
    let search = window.location().search().unwrap_or_default();
    let settings = SiteSettings::from_document(&document, &search);

    set_status(&document, "loading");

    if !settings.use_cms() {
        let reason = if settings.cms_enabled {
            "not configured"
        } else {
            "disabled via cms=0"
        };
        log_event(&document, &format!("cms_skip ({}), using static content", reason));
        return mount_and_install(&window, &settings, &SiteContent::default());
    }

    spawn_local(async move {
        let remote = match cms::fetch_remote_content(&window, &settings.cms).await {
            Ok(remote) => {
                log_event(&document, "cms_fetch_ok");
                Some(remote)
            }
            Err(err) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "cms_fetch_failed ({}), using static content",
                    err
                )));
                None
            }
        };

        let content = cms::merge(remote, &settings.cms);
        if let Err(err) = mount_and_install(&window, &settings, &content) {
            report_fatal(&err.into());
        }
    });

    Ok(())
}

pub(crate) fn report_fatal(err: &JsValue) {
    let message = format!("fatal: {}", js_value_to_string(err));

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        set_status(&doc, "error");
        if let Some(fallback) = doc.get_element_by_id("fallback") {
            fallback.set_text_content(Some(&message));
            set_hidden(&fallback, false);
        }
    }

    web_sys::console::error_1(err);
}

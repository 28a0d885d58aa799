//! DOM construction for the page sections.
//!
//! Builders only create elements; behaviour is wired up in [`crate::app`].

use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
};

use crate::contact::{ContactForm, Field, FieldErrors};
use crate::content::{
    AboutContent, ContactContent, HeroContent, Photo, PhotographyContent, RadioContent,
    SiteConfig, WritingContent,
};
use crate::dom::{append, element, set_hidden, text_element, toggle_class};
use crate::error::SiteError;

const ARROW_ICON: &str = r#"<svg class="icon" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M17 8l4 4m0 0l-4 4m4-4H3"/></svg>"#;
const PLAY_ICON: &str = r#"<svg class="icon" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M14.752 11.168l-3.197-2.132A1 1 0 0010 9.87v4.263a1 1 0 001.555.832l3.197-2.132a1 1 0 000-1.664z"/><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M21 12a9 9 0 11-18 0 9 9 0 0118 0z"/></svg>"#;
const UP_ICON: &str = r#"<svg class="icon" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 10l7-7m0 0l7 7m-7-7v18"/></svg>"#;
const CHECK_ICON: &str = r#"<svg class="icon" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M5 13l4 4L19 7"/></svg>"#;
const EMAIL_ICON: &str = r#"<svg class="icon" fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M3 8l7.89 5.26a2 2 0 002.22 0L21 8M5 19h14a2 2 0 002-2V7a2 2 0 00-2-2H5a2 2 0 00-2 2v10a2 2 0 002 2z"/></svg>"#;
const INSTAGRAM_ICON: &str = r#"<svg class="icon" fill="none" stroke="currentColor" viewBox="0 0 24 24"><rect x="3" y="3" width="18" height="18" rx="5" stroke-width="2"/><circle cx="12" cy="12" r="4" stroke-width="2"/><circle cx="17.5" cy="6.5" r="1" fill="currentColor"/></svg>"#;
const LINKEDIN_ICON: &str = r#"<svg class="icon" fill="currentColor" viewBox="0 0 24 24"><path d="M20.447 20.452h-3.554v-5.569c0-1.328-.027-3.037-1.852-3.037-1.853 0-2.136 1.445-2.136 2.939v5.667H9.351V9h3.414v1.561h.046c.477-.9 1.637-1.85 3.37-1.85 3.601 0 4.267 2.37 4.267 5.455v6.286zM5.337 7.433a2.064 2.064 0 110-4.128 2.064 2.064 0 010 4.128zm1.782 13.019H3.555V9h3.564v11.452z"/></svg>"#;

/// Height modifier for sections whose length depends on their item count.
pub fn height_class(count: usize, tall_after: usize, screen_after: usize) -> &'static str {
    if count > tall_after {
        "section--tall"
    } else if count > screen_after {
        "section--screen"
    } else {
        "section--short"
    }
}

fn social_icon(platform: &str) -> &'static str {
    match platform {
        "instagram" => INSTAGRAM_ICON,
        "linkedin" => LINKEDIN_ICON,
        "email" => EMAIL_ICON,
        _ => "",
    }
}

fn section(document: &Document, id: &str, class: &str) -> Result<HtmlElement, SiteError> {
    let el = element(document, "section", class)?;
    el.set_id(id);
    el.set_attribute("data-chapter", id)?;
    Ok(el)
}

fn heading(document: &Document, text: &str) -> Result<HtmlElement, SiteError> {
    text_element(document, "h2", "section__title reveal", text)
}

fn external_link(
    document: &Document,
    class: &str,
    href: &str,
) -> Result<HtmlElement, SiteError> {
    let a = element(document, "a", class)?;
    a.set_attribute("href", href)?;
    a.set_attribute("target", "_blank")?;
    a.set_attribute("rel", "noopener noreferrer")?;
    Ok(a)
}

fn image(document: &Document, src: &str, alt: &str) -> Result<HtmlElement, SiteError> {
    let img = element(document, "img", "cover")?;
    img.set_attribute("src", src)?;
    img.set_attribute("alt", alt)?;
    img.set_attribute("loading", "lazy")?;
    Ok(img)
}

fn photo_tile(document: &Document, photo: &Photo, class: &str) -> Result<HtmlElement, SiteError> {
    let tile = element(document, "figure", class)?;
    match &photo.src {
        Some(src) => append(&tile, &image(document, src, &photo.alt)?)?,
        None => {
            let placeholder = text_element(document, "div", "placeholder", &photo.alt)?;
            append(&tile, &placeholder)?;
        }
    }
    if let Some(caption) = &photo.caption {
        append(&tile, &text_element(document, "figcaption", "", caption)?)?;
    }
    Ok(tile)
}

pub struct NavView {
    pub nav: HtmlElement,
    pub logo: HtmlElement,
    pub links: Vec<(HtmlElement, String)>,
    pub theme_button: HtmlElement,
}

pub fn render_navigation(document: &Document, site: &SiteConfig) -> Result<NavView, SiteError> {
    let nav = element(document, "nav", "nav")?;
    let inner = element(document, "div", "nav__inner")?;
    let logo = text_element(document, "button", "nav__logo", &site.name)?;
    append(&inner, &logo)?;

    let list = element(document, "div", "nav__links")?;
    let mut links = Vec::with_capacity(site.navigation.len());
    for item in &site.navigation {
        let button = text_element(document, "button", "nav__link", &item.label)?;
        append(&list, &button)?;
        links.push((button, item.href.clone()));
    }

    let theme_button = element(document, "button", "nav__theme")?;
    theme_button.set_attribute("aria-label", "Toggle theme")?;
    append(&list, &theme_button)?;
    append(&inner, &list)?;
    append(&nav, &inner)?;

    Ok(NavView {
        nav,
        logo,
        links,
        theme_button,
    })
}

pub struct ChapterView {
    pub container: HtmlElement,
    pub markers: Vec<(String, HtmlElement)>,
    pub back_to_top: HtmlElement,
}

pub fn render_chapters(document: &Document, site: &SiteConfig) -> Result<ChapterView, SiteError> {
    let container = element(document, "div", "chapters")?;
    let mut markers = Vec::with_capacity(site.chapters.len());
    for chapter in &site.chapters {
        let button = text_element(document, "button", "chapters__marker", &chapter.label)?;
        button.set_attribute("data-target", &chapter.id)?;
        append(&container, &button)?;
        markers.push((chapter.id.clone(), button));
    }

    let back_to_top = element(document, "button", "back-to-top")?;
    back_to_top.set_attribute("aria-label", "Back to top")?;
    back_to_top.set_inner_html(UP_ICON);
    set_hidden(&back_to_top, true);

    Ok(ChapterView {
        container,
        markers,
        back_to_top,
    })
}

pub fn mark_active_chapter(view: &ChapterView, active: &str) {
    for (id, marker) in &view.markers {
        toggle_class(marker, "is-active", id == active);
    }
}

pub struct HeroView {
    pub section: HtmlElement,
    pub content: HtmlElement,
    pub image_frame: HtmlElement,
    pub cta: HtmlElement,
    /// Auxiliary image bubbles, at most three.
    pub aux: Vec<HtmlElement>,
}

pub fn render_hero(document: &Document, hero: &HeroContent) -> Result<HeroView, SiteError> {
    let section = section(document, "intro", "hero")?;
    let content = element(document, "div", "hero__content")?;

    let copy = element(document, "div", "hero__copy")?;
    append(&copy, &text_element(document, "h1", "hero__headline", &hero.headline)?)?;
    append(&copy, &text_element(document, "p", "hero__subheadline", &hero.subheadline)?)?;

    let cta = element(document, "button", "button hero__cta")?;
    cta.set_attribute("data-target", &hero.cta_href)?;
    append(&cta, &text_element(document, "span", "", &hero.cta_text)?)?;
    cta.insert_adjacent_html("beforeend", ARROW_ICON)?;
    append(&copy, &cta)?;
    append(&content, &copy)?;

    let image_frame = element(document, "div", "hero__image glass")?;
    match &hero.image {
        Some(src) => append(&image_frame, &image(document, src, "Hero")?)?,
        None => {
            let hint = format!("[Hero Image: Replace with {}]", hero.image_hint);
            append(&image_frame, &text_element(document, "div", "placeholder", &hint)?)?;
        }
    }
    append(&content, &image_frame)?;
    append(&section, &content)?;

    let mut aux = Vec::with_capacity(3);
    for (i, src) in hero.auxiliary_images.iter().take(3).enumerate() {
        let bubble = element(document, "div", &format!("hero__aux hero__aux--{}", i + 1))?;
        append(&bubble, &image(document, src, &format!("Auxiliary {}", i + 1))?)?;
        append(&section, &bubble)?;
        aux.push(bubble);
    }

    Ok(HeroView {
        section,
        content,
        image_frame,
        cta,
        aux,
    })
}

pub fn render_writing(document: &Document, writing: &WritingContent) -> Result<HtmlElement, SiteError> {
    let class = format!("section {}", height_class(writing.pieces.len(), 4, 2));
    let section = section(document, "writing", &class)?;
    append(&section, &heading(document, "Writing")?)?;
    append(&section, &text_element(document, "p", "section__intro reveal", &writing.intro)?)?;

    let grid = element(document, "div", "writing__grid")?;
    for piece in &writing.pieces {
        let card = element(document, "article", "card glass reveal")?;
        append(&card, &text_element(document, "h3", "card__title", &piece.title)?)?;
        append(&card, &text_element(document, "p", "card__blurb", &piece.blurb)?)?;

        let tags = element(document, "div", "card__tags")?;
        for tag in &piece.tags {
            append(&tags, &text_element(document, "span", "tag", tag)?)?;
        }
        append(&card, &tags)?;

        let read = external_link(document, "card__link", &piece.link)?;
        append(&read, &text_element(document, "span", "", "Read")?)?;
        read.insert_adjacent_html("beforeend", ARROW_ICON)?;
        append(&card, &read)?;
        append(&grid, &card)?;
    }
    append(&section, &grid)?;
    Ok(section)
}

pub fn render_photography(
    document: &Document,
    photography: &PhotographyContent,
) -> Result<HtmlElement, SiteError> {
    let class = format!("section {}", height_class(photography.gallery.len(), 6, 4));
    let section = section(document, "photography", &class)?;
    append(&section, &heading(document, "Photography")?)?;
    append(
        &section,
        &text_element(document, "p", "section__intro reveal", &photography.intro)?,
    )?;

    let strip = element(document, "div", "gallery reveal")?;
    let split = photography.gallery.len().div_ceil(2);
    let (first, second) = photography.gallery.split_at(split);
    for row_photos in [first, second] {
        let row = element(document, "div", "gallery__row")?;
        for photo in row_photos {
            append(&row, &photo_tile(document, photo, "gallery__item")?)?;
        }
        append(&strip, &row)?;
    }
    append(&section, &strip)?;
    Ok(section)
}

pub fn render_radio(document: &Document, radio: &RadioContent) -> Result<HtmlElement, SiteError> {
    let class = format!("section {}", height_class(radio.moments.len(), 4, 0));
    let section = section(document, "radio", &class)?;
    append(&section, &heading(document, "Radio")?)?;
    append(&section, &text_element(document, "p", "section__intro reveal", &radio.intro)?)?;

    let cta = external_link(document, "button button--accent reveal", &radio.cta_link)?;
    append(&cta, &text_element(document, "span", "", &radio.cta_text)?)?;
    cta.insert_adjacent_html("beforeend", PLAY_ICON)?;
    append(&section, &cta)?;

    let grid = element(document, "div", "radio__grid")?;
    for (i, moment) in radio.moments.iter().enumerate() {
        let tile = photo_tile(document, moment, "radio__moment reveal")?;
        tile.set_attribute("data-tilt", if i % 2 == 0 { "right" } else { "left" })?;
        append(&grid, &tile)?;
    }
    append(&section, &grid)?;
    Ok(section)
}

pub fn render_about(document: &Document, about: &AboutContent) -> Result<HtmlElement, SiteError> {
    let section = section(document, "about", "section section--screen")?;
    append(&section, &heading(document, &about.title)?)?;
    let body = element(document, "div", "about__body")?;
    for paragraph in &about.paragraphs {
        append(&body, &text_element(document, "p", "reveal", paragraph)?)?;
    }
    append(&section, &body)?;
    Ok(section)
}

pub struct ContactView {
    pub section: HtmlElement,
    pub form: HtmlFormElement,
    pub name: HtmlInputElement,
    pub email: HtmlInputElement,
    pub message: HtmlTextAreaElement,
    errors: Vec<(Field, HtmlElement, HtmlElement)>,
    pub toast: HtmlElement,
}

impl ContactView {
    pub fn read(&self) -> ContactForm {
        ContactForm {
            name: self.name.value(),
            email: self.email.value(),
            message: self.message.value(),
        }
    }

    pub fn clear_inputs(&self) {
        self.name.set_value("");
        self.email.set_value("");
        self.message.set_value("");
    }

    pub fn show_errors(&self, errors: &FieldErrors) {
        for (field, control, slot) in &self.errors {
            let message = errors.get(*field);
            toggle_class(control, "has-error", message.is_some());
            slot.set_text_content(message);
            set_hidden(slot, message.is_none());
        }
    }

    pub fn control(&self, field: Field) -> Option<&HtmlElement> {
        self.errors
            .iter()
            .find(|(f, _, _)| *f == field)
            .map(|(_, control, _)| control)
    }
}

fn labelled_control(
    document: &Document,
    parent: &Element,
    field: Field,
    label: &str,
    tag: &str,
    placeholder: &str,
) -> Result<(HtmlElement, HtmlElement), SiteError> {
    let row = element(document, "div", "form__row")?;
    let label_el = text_element(document, "label", "form__label", label)?;
    label_el.set_attribute("for", field.key())?;
    append(&row, &label_el)?;

    let control = element(document, tag, "form__control")?;
    control.set_id(field.key());
    control.set_attribute("name", field.key())?;
    control.set_attribute("placeholder", placeholder)?;
    append(&row, &control)?;

    let slot = element(document, "p", "form__error")?;
    set_hidden(&slot, true);
    append(&row, &slot)?;

    append(parent, &row)?;
    Ok((control, slot))
}

fn cast<T: JsCast>(el: HtmlElement, what: &str) -> Result<T, SiteError> {
    el.dyn_into::<T>()
        .map_err(|_| SiteError::Js(format!("{} has an unexpected element type", what)))
}

pub fn render_contact(document: &Document, contact: &ContactContent, owner: &str) -> Result<ContactView, SiteError> {
    let section = section(document, "contact", "section section--screen")?;
    let header = element(document, "div", "contact__header reveal")?;
    append(&header, &heading(document, &contact.title)?)?;
    append(&header, &text_element(document, "p", "contact__subtitle", &contact.subtitle)?)?;
    append(&section, &header)?;

    let form_el = element(document, "form", "contact__form glass reveal")?;
    form_el.set_attribute("novalidate", "")?;
    let (name, name_error) =
        labelled_control(document, &form_el, Field::Name, "Name", "input", "Your name")?;
    name.set_attribute("type", "text")?;
    let (email, email_error) = labelled_control(
        document,
        &form_el,
        Field::Email,
        "Email",
        "input",
        "your.email@example.com",
    )?;
    email.set_attribute("type", "email")?;
    let (message, message_error) =
        labelled_control(document, &form_el, Field::Message, "Message", "textarea", "Your message...")?;
    message.set_attribute("rows", "6")?;

    let submit = text_element(document, "button", "button form__submit", "Send Message")?;
    submit.set_attribute("type", "submit")?;
    append(&form_el, &submit)?;
    append(&section, &form_el)?;

    let toast = element(document, "div", "toast glass")?;
    toast.set_attribute("role", "status")?;
    toast.set_inner_html(CHECK_ICON);
    append(&toast, &text_element(document, "span", "", "Message sent successfully!")?)?;
    set_hidden(&toast, true);
    append(&section, &toast)?;

    let socials = element(document, "div", "contact__socials reveal")?;
    for social in &contact.socials {
        let a = external_link(document, "social glass", &social.url)?;
        a.set_attribute("aria-label", &social.label)?;
        a.set_inner_html(social_icon(&social.platform));
        append(&socials, &a)?;
    }
    append(&section, &socials)?;

    let year = js_sys::Date::new_0().get_full_year();
    let footer = format!("© {} {}. All rights reserved.", year, owner);
    append(&section, &text_element(document, "p", "contact__footer", &footer)?)?;

    let errors = vec![
        (Field::Name, name.clone(), name_error),
        (Field::Email, email.clone(), email_error),
        (Field::Message, message.clone(), message_error),
    ];

    Ok(ContactView {
        section,
        form: cast(form_el, "contact form")?,
        name: cast(name, "name input")?,
        email: cast(email, "email input")?,
        message: cast(message, "message textarea")?,
        errors,
        toast,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_class_by_count() {
        assert_eq!(height_class(6, 4, 2), "section--tall");
        assert_eq!(height_class(3, 4, 2), "section--screen");
        assert_eq!(height_class(2, 4, 2), "section--short");
        assert_eq!(height_class(3, 4, 0), "section--screen");
    }

    #[test]
    fn unknown_platforms_have_no_icon() {
        assert!(social_icon("email").contains("<svg"));
        assert_eq!(social_icon("myspace"), "");
    }
}

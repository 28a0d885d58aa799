//! Headless CMS content source.
//!
//! One query pulls every singleton section document. Whatever comes back is
//! merged field by field over the static defaults in [`crate::content`].

use serde::{Deserialize, Deserializer};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response, Window};

use crate::content::{
    AboutContent, BubbleImage, ContactContent, HeroContent, Photo, PhotographyContent,
    RadioContent, SiteContent, Social, WritingContent, WritingPiece, resolve,
};
use crate::error::SiteError;

pub const DEFAULT_DATASET: &str = "production";
pub const DEFAULT_API_VERSION: &str = "2024-01-01";
const IMAGE_CDN: &str = "https://cdn.sanity.io/images";

pub const CONTENT_QUERY: &str = r#"{
  "hero": *[_type == "heroSection"][0],
  "writing": *[_type == "writingSection"][0],
  "photography": *[_type == "photographySection"][0],
  "radio": *[_type == "radioSection"][0],
  "about": *[_type == "aboutSection"][0],
  "contact": *[_type == "contactSection"][0],
  "floatingBubbles": *[_type == "floatingBubbles"][0]
}"#;

#[derive(Clone, Debug, PartialEq)]
pub struct CmsConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: DEFAULT_DATASET.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

impl CmsConfig {
    pub fn is_configured(&self) -> bool {
        !self.project_id.trim().is_empty()
    }

    pub fn query_url(&self, query: &str) -> String {
        format!(
            "https://{}.api.sanity.io/v{}/data/query/{}?query={}",
            self.project_id,
            self.api_version,
            self.dataset,
            urlencoding::encode(query)
        )
    }

    /// CDN URL for an image asset cropped to `width`×`height`.
    ///
    /// `None` when the CMS is not configured or the reference is malformed;
    /// callers render a placeholder instead.
    pub fn image_url(&self, image: &ImageField, width: u32, height: u32) -> Option<String> {
        if !self.is_configured() {
            return None;
        }
        let reference = image.asset.as_ref()?.reference.as_str();
        let asset = parse_asset_ref(reference)?;
        Some(format!(
            "{}/{}/{}/{}-{}.{}?w={}&h={}&fit=crop",
            IMAGE_CDN,
            self.project_id,
            self.dataset,
            asset.id,
            asset.dimensions,
            asset.format,
            width,
            height
        ))
    }
}

#[derive(Debug, PartialEq)]
struct AssetRef<'a> {
    id: &'a str,
    dimensions: &'a str,
    format: &'a str,
}

/// Splits `image-<id>-<w>x<h>-<format>`.
fn parse_asset_ref(reference: &str) -> Option<AssetRef<'_>> {
    let rest = reference.strip_prefix("image-")?;
    let mut parts = rest.rsplitn(3, '-');
    let format = parts.next()?;
    let dimensions = parts.next()?;
    let id = parts.next()?;

    let (w, h) = dimensions.split_once('x')?;
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if id.is_empty() || format.is_empty() || !numeric(w) || !numeric(h) {
        return None;
    }

    Some(AssetRef {
        id,
        dimensions,
        format,
    })
}

fn non_empty_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(d)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn non_empty_list<'de, D, T>(d: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<Vec<T>>::deserialize(d)?;
    Ok(value.filter(|items| !items.is_empty()))
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AssetReference {
    #[serde(rename = "_ref")]
    pub reference: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ImageField {
    #[serde(default)]
    pub asset: Option<AssetReference>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub alt: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub caption: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeroDocument {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub main_headline: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub subheadline: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub cta_text: Option<String>,
    #[serde(default)]
    pub hero_image: Option<ImageField>,
    #[serde(default, deserialize_with = "non_empty_list")]
    pub auxiliary_images: Option<Vec<ImageField>>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PieceDocument {
    pub title: String,
    #[serde(default)]
    pub blurb: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub link: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WritingDocument {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub intro_text: Option<String>,
    #[serde(default, deserialize_with = "non_empty_list")]
    pub pieces: Option<Vec<PieceDocument>>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhotographyDocument {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub intro_text: Option<String>,
    #[serde(default, deserialize_with = "non_empty_list")]
    pub gallery: Option<Vec<ImageField>>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RadioDocument {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub intro_text: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub cta_text: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub cta_link: Option<String>,
    #[serde(default, deserialize_with = "non_empty_list")]
    pub moments: Option<Vec<ImageField>>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct AboutDocument {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_empty_list")]
    pub paragraphs: Option<Vec<String>>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SocialDocument {
    #[serde(default)]
    pub platform: String,
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ContactDocument {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_empty_string")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "non_empty_list")]
    pub socials: Option<Vec<SocialDocument>>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct BubblesDocument {
    #[serde(default, deserialize_with = "non_empty_list")]
    pub bubbles: Option<Vec<ImageField>>,
}

/// Section documents as returned by [`CONTENT_QUERY`]; any of them may be missing.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteContent {
    #[serde(default)]
    pub hero: Option<HeroDocument>,
    #[serde(default)]
    pub writing: Option<WritingDocument>,
    #[serde(default)]
    pub photography: Option<PhotographyDocument>,
    #[serde(default)]
    pub radio: Option<RadioDocument>,
    #[serde(default)]
    pub about: Option<AboutDocument>,
    #[serde(default)]
    pub contact: Option<ContactDocument>,
    #[serde(default)]
    pub floating_bubbles: Option<BubblesDocument>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Option<RemoteContent>,
}

pub fn decode_query_response(body: &str) -> Result<RemoteContent, SiteError> {
    let parsed: QueryResponse = serde_json::from_str(body)?;
    Ok(parsed.result.unwrap_or_default())
}

fn photos(
    config: &CmsConfig,
    images: Vec<ImageField>,
    (width, height): (u32, u32),
    alt_prefix: &str,
) -> Vec<Photo> {
    images
        .into_iter()
        .enumerate()
        .map(|(i, image)| Photo {
            src: config.image_url(&image, width, height),
            alt: image
                .alt
                .clone()
                .unwrap_or_else(|| format!("{} {}", alt_prefix, i + 1)),
            caption: image.caption,
        })
        .collect()
}

/// Overlays whatever the CMS returned on the static defaults.
pub fn merge(remote: Option<RemoteContent>, config: &CmsConfig) -> SiteContent {
    let defaults = SiteContent::default();
    let Some(remote) = remote else {
        return defaults;
    };

    let hero_doc = remote.hero.unwrap_or_default();
    let hero = HeroContent {
        headline: resolve(hero_doc.main_headline, defaults.hero.headline),
        subheadline: resolve(hero_doc.subheadline, defaults.hero.subheadline),
        cta_text: resolve(hero_doc.cta_text, defaults.hero.cta_text),
        cta_href: defaults.hero.cta_href,
        image: hero_doc
            .hero_image
            .and_then(|image| config.image_url(&image, 800, 1200)),
        image_hint: defaults.hero.image_hint,
        auxiliary_images: hero_doc
            .auxiliary_images
            .unwrap_or_default()
            .iter()
            .filter_map(|image| config.image_url(image, 300, 300))
            .collect(),
    };

    let writing_doc = remote.writing.unwrap_or_default();
    let writing = WritingContent {
        intro: resolve(writing_doc.intro_text, defaults.writing.intro),
        pieces: resolve(
            writing_doc.pieces.map(|pieces| {
                pieces
                    .into_iter()
                    .map(|p| WritingPiece {
                        title: p.title,
                        blurb: p.blurb,
                        tags: p.tags,
                        link: p.link,
                    })
                    .collect()
            }),
            defaults.writing.pieces,
        ),
    };

    let photo_doc = remote.photography.unwrap_or_default();
    let photography = PhotographyContent {
        intro: resolve(photo_doc.intro_text, defaults.photography.intro),
        gallery: resolve(
            photo_doc
                .gallery
                .map(|images| photos(config, images, (800, 600), "Photo")),
            defaults.photography.gallery,
        ),
    };

    let radio_doc = remote.radio.unwrap_or_default();
    let radio = RadioContent {
        intro: resolve(radio_doc.intro_text, defaults.radio.intro),
        cta_text: resolve(radio_doc.cta_text, defaults.radio.cta_text),
        cta_link: resolve(radio_doc.cta_link, defaults.radio.cta_link),
        moments: resolve(
            radio_doc
                .moments
                .map(|images| photos(config, images, (800, 800), "Radio moment")),
            defaults.radio.moments,
        ),
    };

    let about_doc = remote.about.unwrap_or_default();
    let about = AboutContent {
        title: resolve(about_doc.title, defaults.about.title),
        paragraphs: resolve(about_doc.paragraphs, defaults.about.paragraphs),
    };

    let contact_doc = remote.contact.unwrap_or_default();
    let contact = ContactContent {
        title: resolve(contact_doc.title, defaults.contact.title),
        subtitle: resolve(contact_doc.subtitle, defaults.contact.subtitle),
        socials: resolve(
            contact_doc.socials.map(|socials| {
                socials
                    .into_iter()
                    .map(|s| Social {
                        platform: s.platform,
                        label: s.label,
                        url: s.url,
                    })
                    .collect()
            }),
            defaults.contact.socials,
        ),
    };

    let bubbles = remote
        .floating_bubbles
        .and_then(|doc| doc.bubbles)
        .unwrap_or_default()
        .into_iter()
        .map(|image| BubbleImage {
            src: config.image_url(&image, 400, 400),
            alt: image.alt,
        })
        .collect();

    SiteContent {
        site: defaults.site,
        hero,
        writing,
        photography,
        radio,
        about,
        contact,
        bubbles,
    }
}

/// Runs [`CONTENT_QUERY`] with caching disabled.
pub async fn fetch_remote_content(
    window: &Window,
    config: &CmsConfig,
) -> Result<RemoteContent, SiteError> {
    if !config.is_configured() {
        return Err(SiteError::NotConfigured);
    }

    let url = config.query_url(CONTENT_QUERY);
    let init = RequestInit::new();
    init.set_method("GET");
    init.set_cache(RequestCache::NoStore);
    let request = Request::new_with_str_and_init(&url, &init)?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;
    if !resp.ok() {
        return Err(SiteError::Http {
            url,
            status: resp.status(),
        });
    }

    let body = JsFuture::from(resp.text()?).await?;
    let body = body
        .as_string()
        .ok_or_else(|| SiteError::Js("query response body is not text".to_string()))?;
    decode_query_response(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> CmsConfig {
        CmsConfig {
            project_id: "abc123".to_string(),
            ..CmsConfig::default()
        }
    }

    fn image(reference: &str) -> ImageField {
        ImageField {
            asset: Some(AssetReference {
                reference: reference.to_string(),
            }),
            ..ImageField::default()
        }
    }

    #[test]
    fn configured_only_with_project_id() {
        assert!(!CmsConfig::default().is_configured());
        assert!(configured().is_configured());
    }

    #[test]
    fn query_url_targets_dataset_and_encodes() {
        let url = configured().query_url(r#"*[_type == "heroSection"][0]"#);
        assert!(url.starts_with(
            "https://abc123.api.sanity.io/v2024-01-01/data/query/production?query="
        ));
        assert!(!url.contains(' '));
        assert!(url.contains("heroSection"));
    }

    #[test]
    fn image_url_from_asset_ref() {
        let url = configured().image_url(&image("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg"), 400, 400);
        assert_eq!(
            url.as_deref(),
            Some(
                "https://cdn.sanity.io/images/abc123/production/\
                 Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg?w=400&h=400&fit=crop"
            )
        );
    }

    #[test]
    fn image_url_needs_config_and_valid_ref() {
        let good = image("image-abc-10x20-png");
        assert!(CmsConfig::default().image_url(&good, 1, 1).is_none());
        assert!(configured().image_url(&image("file-abc-10x20-png"), 1, 1).is_none());
        assert!(configured().image_url(&image("image-abc-tenxtwenty-png"), 1, 1).is_none());
        assert!(configured().image_url(&ImageField::default(), 1, 1).is_none());
    }

    #[test]
    fn decode_treats_blank_fields_as_absent() {
        let body = r#"{
            "result": {
                "hero": { "mainHeadline": "  ", "ctaText": "Read on" },
                "writing": { "introText": "Words.", "pieces": [] },
                "about": null,
                "floatingBubbles": { "bubbles": [
                    { "asset": { "_ref": "image-a1-400x400-jpg" }, "alt": "me" }
                ] }
            }
        }"#;
        let remote = decode_query_response(body).expect("decode");
        let hero = remote.hero.as_ref().expect("hero");
        assert_eq!(hero.main_headline, None);
        assert_eq!(hero.cta_text.as_deref(), Some("Read on"));
        assert_eq!(remote.writing.as_ref().and_then(|w| w.pieces.clone()), None);
        assert!(remote.about.is_none());
    }

    #[test]
    fn decode_missing_result_is_empty() {
        assert_eq!(
            decode_query_response(r#"{"result": null}"#).expect("decode"),
            RemoteContent::default()
        );
        assert!(decode_query_response("not json").is_err());
    }

    #[test]
    fn merge_overlays_remote_on_defaults() {
        let body = r#"{
            "result": {
                "hero": { "ctaText": "Read on" },
                "about": { "title": "Hi", "paragraphs": ["One."] },
                "radio": { "moments": [ { "asset": { "_ref": "image-r1-800x800-jpg" } } ] },
                "floatingBubbles": { "bubbles": [
                    { "asset": { "_ref": "image-a1-400x400-jpg" }, "alt": "me" },
                    { "alt": "no asset" }
                ] }
            }
        }"#;
        let remote = decode_query_response(body).expect("decode");
        let content = merge(Some(remote), &configured());
        let defaults = SiteContent::default();

        assert_eq!(content.hero.cta_text, "Read on");
        assert_eq!(content.hero.headline, defaults.hero.headline);
        assert_eq!(content.about.title, "Hi");
        assert_eq!(content.about.paragraphs, vec!["One.".to_string()]);
        assert_eq!(content.writing, defaults.writing);
        assert_eq!(content.radio.moments.len(), 1);
        assert_eq!(content.radio.moments[0].alt, "Radio moment 1");
        assert_eq!(content.bubbles.len(), 2);
        assert!(content.bubbles[0].src.is_some());
        assert!(content.bubbles[1].src.is_none());
    }

    #[test]
    fn merge_without_remote_is_static() {
        assert_eq!(merge(None, &configured()), SiteContent::default());
    }
}

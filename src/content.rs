//! Resolved page content and the static defaults used when the CMS is absent.

/// Remote value when present, otherwise the static fallback.
pub fn resolve<T>(remote: Option<T>, fallback: T) -> T {
    remote.unwrap_or(fallback)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub label: String,
    pub href: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Chapter {
    pub id: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub name: String,
    pub navigation: Vec<Link>,
    pub chapters: Vec<Chapter>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeroContent {
    pub headline: String,
    pub subheadline: String,
    pub cta_text: String,
    pub cta_href: String,
    /// Resolved image URL; `None` renders the placeholder panel.
    pub image: Option<String>,
    /// Shown inside the placeholder panel.
    pub image_hint: String,
    pub auxiliary_images: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WritingPiece {
    pub title: String,
    pub blurb: String,
    pub tags: Vec<String>,
    pub link: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WritingContent {
    pub intro: String,
    pub pieces: Vec<WritingPiece>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Photo {
    pub src: Option<String>,
    pub alt: String,
    pub caption: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhotographyContent {
    pub intro: String,
    pub gallery: Vec<Photo>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RadioContent {
    pub intro: String,
    pub cta_text: String,
    pub cta_link: String,
    pub moments: Vec<Photo>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AboutContent {
    pub title: String,
    pub paragraphs: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Social {
    pub platform: String,
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ContactContent {
    pub title: String,
    pub subtitle: String,
    pub socials: Vec<Social>,
}

/// Source image for a floating bubble. Without `src` the bubble is a gradient disc.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BubbleImage {
    pub src: Option<String>,
    pub alt: Option<String>,
}

impl BubbleImage {
    pub fn alt_text(&self) -> &str {
        self.alt.as_deref().unwrap_or("Floating bubble")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteContent {
    pub site: SiteConfig,
    pub hero: HeroContent,
    pub writing: WritingContent,
    pub photography: PhotographyContent,
    pub radio: RadioContent,
    pub about: AboutContent,
    pub contact: ContactContent,
    /// Candidate bubbles; empty means the placeholder set is used.
    pub bubbles: Vec<BubbleImage>,
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            hero: HeroContent::default(),
            writing: WritingContent::default(),
            photography: PhotographyContent::default(),
            radio: RadioContent::default(),
            about: AboutContent::default(),
            contact: ContactContent::default(),
            bubbles: Vec::new(),
        }
    }
}

pub fn placeholder_bubbles() -> Vec<BubbleImage> {
    (1..=6)
        .map(|n| BubbleImage {
            src: None,
            alt: Some(format!("Placeholder {}", n)),
        })
        .collect()
}

const INTRO_TEXT: &str = "Hello and welcome to my creative space! \n\
I am Marilyn. Aspiring journalist. Musician. Media professional. Endlessly curious.\n\
This space dives deeper into my many interests and the moments that capture my attention.";

/// First line of the intro copy.
pub fn default_headline() -> String {
    INTRO_TEXT.lines().next().unwrap_or_default().trim_end().to_string()
}

/// Everything after the first line of the intro copy.
pub fn default_subheadline() -> String {
    INTRO_TEXT.lines().skip(1).collect::<Vec<_>>().join("\n")
}

fn link(label: &str, href: &str) -> Link {
    Link {
        label: label.to_string(),
        href: href.to_string(),
    }
}

fn chapter(id: &str, label: &str) -> Chapter {
    Chapter {
        id: id.to_string(),
        label: label.to_string(),
    }
}

fn local_photos(prefix: &str, alt: &str, count: usize) -> Vec<Photo> {
    (1..=count)
        .map(|n| Photo {
            src: Some(format!("/images/{}-{}.jpg", prefix, n)),
            alt: format!("{} {}", alt, n),
            caption: None,
        })
        .collect()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Marilyn Rajesh".to_string(),
            navigation: vec![
                link("Work", "#work"),
                link("About", "#about"),
                link("Contact", "#contact"),
            ],
            chapters: vec![
                chapter("intro", "Intro"),
                chapter("writing", "Writing"),
                chapter("photography", "Photography"),
                chapter("radio", "Radio"),
                chapter("about", "About"),
                chapter("contact", "Contact"),
            ],
        }
    }
}

impl Default for HeroContent {
    fn default() -> Self {
        Self {
            headline: default_headline(),
            subheadline: default_subheadline(),
            cta_text: "Learn More".to_string(),
            cta_href: "#about".to_string(),
            image: None,
            image_hint: "/images/marilyn-hero.jpg".to_string(),
            auxiliary_images: Vec::new(),
        }
    }
}

impl Default for WritingContent {
    fn default() -> Self {
        let piece = |title: &str, blurb: &str, tags: [&str; 2]| WritingPiece {
            title: title.to_string(),
            blurb: blurb.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            link: "#".to_string(),
        };

        Self {
            intro: "Both my creative and academic writing focuses on concise and compelling \
                    storytelling through a narrative journalistic format. I am well-experienced \
                    in both fiction and non-fiction writing and am passionate about creating \
                    work that resonates with the audience. Here are a few of my pieces:"
                .to_string(),
            pieces: vec![
                piece(
                    "The Art of Storytelling",
                    "Exploring narrative techniques in modern journalism and creative writing.",
                    ["Journalism", "Creative Writing"],
                ),
                piece(
                    "Cultural Perspectives",
                    "A deep dive into cross-cultural narratives and their impact on contemporary media.",
                    ["Culture", "Media Studies"],
                ),
                piece(
                    "Voice and Identity",
                    "An examination of personal voice in journalistic writing and storytelling.",
                    ["Identity", "Journalism"],
                ),
                piece(
                    "Fiction Meets Reality",
                    "Blending fictional techniques with non-fiction storytelling for compelling narratives.",
                    ["Fiction", "Non-Fiction"],
                ),
                piece(
                    "The Power of Words",
                    "How language shapes perception and drives change in modern media.",
                    ["Language", "Media"],
                ),
                piece(
                    "Moments in Time",
                    "Capturing fleeting moments through descriptive and evocative prose.",
                    ["Creative Writing", "Narrative"],
                ),
            ],
        }
    }
}

impl Default for PhotographyContent {
    fn default() -> Self {
        Self {
            intro: "Capturing moments through photos has been a newfound passion of mine. I \
                    believe it is essential to observe the world around us and take time to \
                    appreciate the little details that we often overlook. Here you will find \
                    the moments that I appreciate the most, through vibrant storytelling in \
                    the form of pictures:"
                .to_string(),
            gallery: local_photos("photo", "Photography moment", 16),
        }
    }
}

impl Default for RadioContent {
    fn default() -> Self {
        Self {
            intro: "I have spent almost 3 years on student radio and I don't love anything more \
                    than curating themed and diverse playlists for an audience every week and \
                    sharing bits of my life with listeners. Engaging with my listeners and \
                    creating an environment that is rooted in my love for music is something I \
                    am able to do through the radio station. Here are a few snippets of my \
                    favorite moments ON AIR:"
                .to_string(),
            cta_text: "Listen / View Clips".to_string(),
            cta_link: "#".to_string(),
            moments: local_photos("radio", "Radio moment", 3),
        }
    }
}

impl Default for AboutContent {
    fn default() -> Self {
        Self {
            title: "ABOUT".to_string(),
            paragraphs: vec![
                "Marilyn Rajesh is an undergraduate student at Muhlenberg College pursuing a \
                 dual degree in Media and Communications & English and Creative Writing. She is \
                 an international student who loves traveling and meeting new people."
                    .to_string(),
                "Rajesh was born in Kerala, India and has always been fascinated by music and \
                 the craft of writing. She wrote her first book at 10 years old and is presently \
                 a content creator. She shifted to the US to pursue her undergraduate studies \
                 after high school."
                    .to_string(),
                "Rajesh is currently pursuing an Honors and is also a Station DJ at her college \
                 radio station. She is an artist who loves to share her music with the world \
                 through various social media platforms."
                    .to_string(),
            ],
        }
    }
}

impl Default for ContactContent {
    fn default() -> Self {
        let social = |platform: &str, label: &str, url: &str| Social {
            platform: platform.to_string(),
            label: label.to_string(),
            url: url.to_string(),
        };

        Self {
            title: "Let's Connect".to_string(),
            subtitle: "I'd love to hear from you. Drop me a message!".to_string(),
            socials: vec![
                social("instagram", "Instagram", "#"),
                social("linkedin", "LinkedIn", "#"),
                social("email", "Email", "mailto:contact@example.com"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_remote() {
        assert_eq!(resolve(Some("cms"), "static"), "cms");
        assert_eq!(resolve(None, "static"), "static");
        assert_eq!(resolve(Some(Vec::<u8>::new()), vec![1]), Vec::<u8>::new());
    }

    #[test]
    fn hero_copy_splits_first_line() {
        assert_eq!(default_headline(), "Hello and welcome to my creative space!");
        let sub = default_subheadline();
        assert!(sub.starts_with("I am Marilyn."));
        assert_eq!(sub.lines().count(), 2);
    }

    #[test]
    fn defaults_cover_every_chapter() {
        let content = SiteContent::default();
        let ids: Vec<&str> = content.site.chapters.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            ["intro", "writing", "photography", "radio", "about", "contact"]
        );
        assert_eq!(content.writing.pieces.len(), 6);
        assert_eq!(content.photography.gallery.len(), 16);
        assert_eq!(
            content.radio.moments[2].src.as_deref(),
            Some("/images/radio-3.jpg")
        );
        assert!(content.bubbles.is_empty());
    }

    #[test]
    fn placeholder_set_has_six() {
        let set = placeholder_bubbles();
        assert_eq!(set.len(), 6);
        assert!(set.iter().all(|b| b.src.is_none()));
        assert_eq!(set[0].alt_text(), "Placeholder 1");
    }
}

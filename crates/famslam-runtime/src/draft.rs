#![forbid(unsafe_code)]

//! Form model for a recipe that is being added.
//!
//! A draft starts from a scraped page: the page title pre-fills the title and
//! the page's images become the selectable candidates. The user then edits
//! the remaining fields and the draft is turned into a [`NewRecipe`].

use crate::store::NewRecipe;
use famslam_list::item::ItemFields;
use std::fmt;
use url::Url;

/// How many scraped images are considered as candidates.
pub const MAX_CANDIDATE_IMAGES: usize = 10;

/// Image extensions a candidate may have (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif"];

/// Errors from page URL validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// The URL field was empty.
    MissingUrl,
    /// The input is not a URL.
    InvalidUrl(String),
    /// The URL is not `http` or `https`.
    UnsupportedScheme(String),
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingUrl => f.write_str("no URL given"),
            DraftError::InvalidUrl(reason) => write!(f, "invalid URL: {reason}"),
            DraftError::UnsupportedScheme(scheme) => {
                write!(f, "unsupported URL scheme `{scheme}` (expected http or https)")
            }
        }
    }
}

impl std::error::Error for DraftError {}

/// Parse `input` as an absolute `http`/`https` URL.
pub fn validate_page_url(input: &str) -> Result<Url, DraftError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DraftError::MissingUrl);
    }
    let url = Url::parse(input).map_err(|e| DraftError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(DraftError::UnsupportedScheme(other.to_string())),
    }
}

/// What the scraper found on a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSnapshot {
    /// Contents of the page's `<title>`.
    pub title: String,
    /// `src` of every `<img>`, in document order. May be relative.
    pub image_urls: Vec<String>,
}

fn has_image_extension(url: &Url) -> bool {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|name| name.rsplit_once('.'))
        .is_some_and(|(_, ext)| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Editable state of the add-item form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    page_url: Url,
    title: String,
    candidates: Vec<String>,
    selected: Option<usize>,
    recipe_text: String,
    cook_time_mins: u32,
    tags: Vec<String>,
}

impl ItemDraft {
    /// Start a draft from a scraped page.
    ///
    /// Only the first [`MAX_CANDIDATE_IMAGES`] images are considered. Relative
    /// sources are resolved against `page_url`; blanks, unresolvable sources
    /// and non-image extensions are dropped. The first survivor is selected.
    pub fn from_page(page_url: &str, page: PageSnapshot) -> Result<Self, DraftError> {
        let page_url = validate_page_url(page_url)?;
        let candidates: Vec<String> = page
            .image_urls
            .iter()
            .take(MAX_CANDIDATE_IMAGES)
            .filter(|src| !src.trim().is_empty())
            .filter_map(|src| page_url.join(src.trim()).ok())
            .filter(has_image_extension)
            .map(String::from)
            .collect();
        tracing::debug!(
            page = %page_url,
            scraped = page.image_urls.len(),
            candidates = candidates.len(),
            "draft created from page"
        );
        Ok(Self {
            page_url,
            title: page.title.trim().to_string(),
            selected: (!candidates.is_empty()).then_some(0),
            candidates,
            recipe_text: String::new(),
            cook_time_mins: 0,
            tags: Vec::new(),
        })
    }

    /// Page the draft was created from.
    #[must_use]
    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// Current title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Candidate image URLs.
    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// The selected image, if any.
    #[must_use]
    pub fn selected_image(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.candidates.get(i))
            .map(String::as_str)
    }

    /// Current recipe text.
    #[must_use]
    pub fn recipe_text(&self) -> &str {
        &self.recipe_text
    }

    /// Current cook time in minutes.
    #[must_use]
    pub fn cook_time_mins(&self) -> u32 {
        self.cook_time_mins
    }

    /// Current tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Select the candidate at `index`. Out of range leaves the selection.
    pub fn select_image(&mut self, index: usize) -> bool {
        if index < self.candidates.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Replace the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replace the recipe text.
    pub fn set_recipe_text(&mut self, text: impl Into<String>) {
        self.recipe_text = text.into();
    }

    /// Set cook time from raw field text. Blank or non-numeric input is 0.
    pub fn set_cook_time_input(&mut self, input: &str) {
        self.cook_time_mins = input.trim().parse().unwrap_or(0);
    }

    /// Add a tag typed into the tag field.
    ///
    /// The text is trimmed and given a single `#` prefix. Blank and
    /// already-present tags are ignored.
    pub fn commit_tag(&mut self, input: &str) -> bool {
        let body = input.trim().trim_start_matches('#').trim();
        if body.is_empty() {
            return false;
        }
        let tag = format!("#{body}");
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Remove a tag.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    /// Replace all tags from comma-separated text, as typed.
    pub fn set_tags_csv(&mut self, input: &str) {
        self.tags = input
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect();
    }

    /// Finish the draft.
    #[must_use]
    pub fn into_new_recipe(self) -> NewRecipe {
        let image_url = self.selected_image().unwrap_or_default().to_string();
        NewRecipe::new(ItemFields {
            title: self.title,
            image_url,
            cook_time_mins: self.cook_time_mins,
            tags: self.tags,
            recipe_text: self.recipe_text,
            source_url: Some(self.page_url.into()),
        })
    }
}

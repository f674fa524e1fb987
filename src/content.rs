use clap::ValueEnum;
use rand::Rng;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PARAGRAPH_URL: &str = "https://baconipsum.com/api/?type=meat-and-filler&paras=1";
pub const DEFAULT_IMAGE_URL: &str = "https://picsum.photos/600/300";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Captions paired with fetched images. The image itself is decorative;
/// the practice target is drawn uniformly at random from this set.
const CAPTIONS: [&str; 10] = [
    "A beautiful landscape with mountains.",
    "A close-up of vibrant flowers.",
    "A city skyline at sunset.",
    "A serene beach with blue water.",
    "A forest filled with tall trees.",
    "A bustling street in an urban city.",
    "A calm lake reflecting the sky.",
    "A snowy mountain peak under clear sky.",
    "A field of wildflowers in bloom.",
    "A cozy cabin surrounded by nature.",
];

/// Which content source feeds the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum Mode {
    /// fetched filler-text paragraph, rendered char by char
    Text,
    /// random image plus a caption to type from memory
    Image,
}

impl Mode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" => Some(Mode::Text),
            "image" => Some(Mode::Image),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Mode::Text => Mode::Image,
            Mode::Image => Mode::Text,
        }
    }
}

/// The one thing providers can fail with. Caught at the provider boundary
/// and mapped to the session's Error phase, never propagated further.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("response contained no usable text")]
    EmptyBody,
}

/// A fetched practice target. `image_url` is set only in image mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub target: String,
    pub image_url: Option<String>,
}

impl Content {
    pub fn text(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            image_url: None,
        }
    }
}

pub trait ContentSource {
    fn fetch(&self) -> Result<Content, FetchError>;
}

/// Fetches one filler-text paragraph; the response is a JSON array of
/// strings and the first element becomes the target.
pub struct ParagraphProvider {
    url: String,
}

impl ParagraphProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ContentSource for ParagraphProvider {
    fn fetch(&self) -> Result<Content, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let paragraphs: Vec<String> = client
            .get(&self.url)
            .send()?
            .error_for_status()?
            .json()?;

        let target = paragraphs
            .into_iter()
            .next()
            .filter(|p| !p.trim().is_empty())
            .ok_or(FetchError::EmptyBody)?;

        Ok(Content {
            target,
            image_url: None,
        })
    }
}

/// Fetches a random image for display and picks a caption as the target.
/// The response body is unused; only the resolved URL matters.
pub struct ImageProvider {
    url: String,
}

impl ImageProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ContentSource for ImageProvider {
    fn fetch(&self) -> Result<Content, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let response = client.get(&self.url).send()?.error_for_status()?;
        let resolved_url = response.url().to_string();

        Ok(Content {
            target: random_caption().to_string(),
            image_url: Some(resolved_url),
        })
    }
}

pub fn random_caption() -> &'static str {
    CAPTIONS[rand::thread_rng().gen_range(0..CAPTIONS.len())]
}

/// Builds the provider for a mode with the configured endpoints.
pub fn source_for(
    mode: Mode,
    paragraph_url: &str,
    image_url: &str,
) -> Box<dyn ContentSource + Send> {
    match mode {
        Mode::Text => Box::new(ParagraphProvider::new(paragraph_url)),
        Mode::Image => Box::new(ImageProvider::new(image_url)),
    }
}

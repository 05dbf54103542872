//! DBLP search-result export model and local BibTeX synthesis.
//!
//! The export format has drifted over the lifetime of the DBLP search API,
//! so most fields accept more than one JSON shape.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::error::{AppError, Result};
use crate::models::{Bibliography, PublicationRef};

/// Parsed list of hits from one export file.
#[derive(Debug, Clone, Default)]
pub struct DblpList {
    pub hits: Vec<DblpEntry>,
}

/// Accepted top-level shapes of an export file.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExportShape {
    Hits { hit: Vec<DblpEntry> },
    Envelope { result: ResultBody },
    Bare(Vec<DblpEntry>),
}

#[derive(Deserialize)]
struct ResultBody {
    hits: HitsBody,
}

#[derive(Deserialize)]
struct HitsBody {
    #[serde(default)]
    hit: Vec<DblpEntry>,
}

impl DblpList {
    /// Load and parse an export file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse export JSON held in memory.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::parse(json, "<memory>")
    }

    fn parse(json: &str, origin: &str) -> Result<Self> {
        let shape: ExportShape = serde_json::from_str(json).map_err(|source| AppError::Input {
            path: origin.to_string(),
            source,
        })?;

        let hits = match shape {
            ExportShape::Hits { hit } => hit,
            ExportShape::Envelope { result } => result.hits.hit,
            ExportShape::Bare(hit) => hit,
        };
        Ok(Self { hits })
    }

    /// References to every landing page, in input order.
    pub fn publications(&self) -> Vec<PublicationRef> {
        self.hits.iter().map(DblpEntry::publication).collect()
    }

    /// Synthesize BibTeX for every entry without touching the network.
    pub fn to_bibliography(&self) -> Bibliography {
        let mut bibliography = Bibliography::new();
        for entry in &self.hits {
            bibliography.push(entry.to_bibtex());
        }
        bibliography
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// A single search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct DblpEntry {
    #[serde(rename = "@id", default, deserialize_with = "scalar_string")]
    pub id: String,

    #[serde(rename = "@score", default, deserialize_with = "scalar_string")]
    pub score: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub info: Info,
}

impl DblpEntry {
    /// URL of the publication's landing page.
    ///
    /// Newer exports put an opaque `URL#id` token in the hit and the real
    /// landing page under `info.url`.
    pub fn landing_url(&self) -> &str {
        if self.url.starts_with("http://") || self.url.starts_with("https://") {
            return &self.url;
        }
        self.info.url.as_deref().unwrap_or(&self.url)
    }

    pub fn publication(&self) -> PublicationRef {
        PublicationRef::new(self.landing_url())
    }

    /// BibTeX entry type derived from the export's type tag.
    pub fn entry_type(&self) -> String {
        match self.info.kind.as_str() {
            "Journal Articles" => "article".into(),
            "Conference and Workshop Papers" => "inproceedings".into(),
            "Parts in Books or Collections" => "incollection".into(),
            "Editorship" => "proceedings".into(),
            "Books and Theses" => "book".into(),
            "Informal and Other Publications" | "Informal Publications" => "misc".into(),
            other => other.to_string(),
        }
    }

    /// Format the entry as BibTeX from its own fields.
    pub fn to_bibtex(&self) -> String {
        let entry_type = self.entry_type();
        let (venue_field, venue_tag) = match entry_type.as_str() {
            "inproceedings" | "proceedings" => ("booktitle", "@conference"),
            "incollection" => ("book", "@conference"),
            "article" => ("journal", "@journal"),
            _ => ("booktitle", "@conference"),
        };

        let pages = self
            .info
            .venue
            .tag("@pages")
            .or(self.info.pages.as_deref())
            .unwrap_or("");

        format!(
            "@{}{{{},\nauthor={{{}}},\ntitle={{{}}},\n{}={{{}}},\npages={{{}}},\nyear={{{}}},\nurl={{{}}}\n}}",
            entry_type,
            self.id,
            self.info.authors.names().join(","),
            self.info.title.text(),
            venue_field,
            self.info.venue.name(venue_tag).unwrap_or_default(),
            pages,
            self.info.year,
            self.landing_url(),
        )
    }
}

/// Publication metadata of a hit.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub authors: Authors,

    #[serde(default)]
    pub title: Title,

    #[serde(default)]
    pub venue: Venue,

    #[serde(default, deserialize_with = "scalar_string")]
    pub year: String,

    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub pages: Option<String>,

    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

/// Author list; DBLP sends a bare value for single-author papers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Authors {
    #[serde(default)]
    author: AuthorField,
}

impl Authors {
    /// Author names in input order.
    pub fn names(&self) -> Vec<&str> {
        match &self.author {
            AuthorField::Single(name) => vec![name.as_str()],
            AuthorField::Multiple(names) => names.iter().map(AuthorName::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AuthorField {
    Single(AuthorName),
    Multiple(Vec<AuthorName>),
}

impl Default for AuthorField {
    fn default() -> Self {
        AuthorField::Multiple(Vec::new())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum AuthorName {
    Text(String),
    Struct { text: String },
}

impl AuthorName {
    fn as_str(&self) -> &str {
        match self {
            AuthorName::Text(s) => s,
            AuthorName::Struct { text } => text,
        }
    }
}

/// Publication title, either plain or with an electronic-edition link.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Title {
    Text(String),
    Linked {
        #[serde(rename = "@ee", default)]
        ee: Option<String>,
        #[serde(default)]
        text: String,
    },
}

impl Title {
    pub fn text(&self) -> &str {
        match self {
            Title::Text(s) => s,
            Title::Linked { text, .. } => text,
        }
    }
}

impl Default for Title {
    fn default() -> Self {
        Title::Text(String::new())
    }
}

/// Venue, either a mapping keyed by venue-type tags or a plain name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Venue {
    Tagged(BTreeMap<String, String>),
    Text(String),
    List(Vec<String>),
}

impl Venue {
    /// Raw value of a tag such as `@pages`; only tagged venues carry tags.
    pub fn tag(&self, tag: &str) -> Option<&str> {
        match self {
            Venue::Tagged(map) => map.get(tag).map(String::as_str),
            _ => None,
        }
    }

    /// Venue name for a name tag (`@conference`, `@journal`).
    ///
    /// Plain venues answer for any tag.
    pub fn name(&self, tag: &str) -> Option<String> {
        match self {
            Venue::Tagged(map) => map.get(tag).cloned(),
            Venue::Text(s) => Some(s.clone()),
            Venue::List(items) => Some(items.join(", ")),
        }
    }
}

impl Default for Venue {
    fn default() -> Self {
        Venue::Tagged(BTreeMap::new())
    }
}

/// Accept a JSON string or number as a string.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Number(n) => n.to_string(),
    })
}

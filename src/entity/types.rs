use serde::{Deserialize, Serialize};

/// Entity type assigned by the upstream tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    #[serde(alias = "PER")]
    Person,
    #[serde(alias = "ORG")]
    Organization,
    Gpe,
    #[serde(other)]
    Other,
}

impl EntityKind {
    /// Maps a raw tagger label onto a kind. Unknown labels become [`EntityKind::Other`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "PERSON" | "PER" => EntityKind::Person,
            "ORGANIZATION" | "ORG" => EntityKind::Organization,
            "GPE" => EntityKind::Gpe,
            _ => EntityKind::Other,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Person => "PERSON",
            EntityKind::Organization => "ORGANIZATION",
            EntityKind::Gpe => "GPE",
            EntityKind::Other => "OTHER",
        }
    }

    #[inline]
    pub fn is_person(&self) -> bool {
        matches!(self, EntityKind::Person)
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A merged named-entity mention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// Surface text exactly as merged from the tagged chunks.
    pub name: String,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn person(name: impl Into<String>) -> Self {
        Self::new(name, EntityKind::Person)
    }
}

/// One element of a tagged sentence.
///
/// Serialized untagged: a bare token is a JSON string, a labeled span is
/// `{"label": "PERSON", "tokens": ["Barack", "Obama"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Chunk {
    Span { label: String, tokens: Vec<String> },
    Token(String),
}

impl Chunk {
    pub fn token(text: impl Into<String>) -> Self {
        Chunk::Token(text.into())
    }

    pub fn span<I, S>(label: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Chunk::Span {
            label: label.into(),
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered chunks of a single sentence.
pub type TaggedSentence = Vec<Chunk>;

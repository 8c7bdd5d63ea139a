use tracing::debug;

use super::types::{Chunk, Entity, EntityKind, TaggedSentence};

/// Merges consecutive labeled chunks into whole entity mentions.
///
/// Adjacency is decided by chunk index alone: two labeled chunks merge only when the second
/// sits at exactly `last_index + 1`. Plain tokens never extend a pending entity, so a single
/// token between two spans splits them. Entities never cross a sentence boundary and are
/// returned in order of mention without deduplication.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanMerger;

struct Pending {
    text: String,
    kinds: Vec<EntityKind>,
    last_index: usize,
}

impl Pending {
    fn start(text: String, kind: EntityKind, index: usize) -> Self {
        Self {
            text,
            kinds: vec![kind],
            last_index: index,
        }
    }

    fn extend(&mut self, text: &str, kind: EntityKind, index: usize) {
        self.text.push(' ');
        self.text.push_str(text);
        self.kinds.push(kind);
        self.last_index = index;
    }

    fn finish(self) -> Entity {
        Entity::new(self.text, dominant_kind(&self.kinds))
    }
}

impl SpanMerger {
    pub fn new() -> Self {
        Self
    }

    /// Merges every sentence and concatenates the results in sentence order.
    pub fn merge(&self, sentences: &[TaggedSentence]) -> Vec<Entity> {
        let entities: Vec<Entity> = sentences
            .iter()
            .flat_map(|sentence| self.merge_sentence(sentence))
            .collect();

        debug!(
            sentences = sentences.len(),
            entities = entities.len(),
            "Merged tagged spans"
        );

        entities
    }

    pub fn merge_sentence(&self, chunks: &[Chunk]) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut pending: Option<Pending> = None;

        for (index, chunk) in chunks.iter().enumerate() {
            let Chunk::Span { label, tokens } = chunk else {
                continue;
            };

            let Some(text) = join_tokens(tokens) else {
                continue;
            };
            let kind = EntityKind::from_label(label);

            match pending.as_mut() {
                Some(current) if current.last_index + 1 == index => {
                    current.extend(&text, kind, index);
                }
                _ => {
                    if let Some(done) = pending.take() {
                        entities.push(done.finish());
                    }
                    pending = Some(Pending::start(text, kind, index));
                }
            }
        }

        if let Some(done) = pending {
            entities.push(done.finish());
        }

        entities
    }
}

fn join_tokens(tokens: &[String]) -> Option<String> {
    let words: Vec<&str> = tokens
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Most frequent kind; ties go to whichever appeared first.
fn dominant_kind(kinds: &[EntityKind]) -> EntityKind {
    let mut best = EntityKind::Other;
    let mut best_count = 0;

    for (i, kind) in kinds.iter().enumerate() {
        if kinds[..i].contains(kind) {
            continue;
        }
        let count = kinds.iter().filter(|k| *k == kind).count();
        if count > best_count {
            best = *kind;
            best_count = count;
        }
    }

    best
}

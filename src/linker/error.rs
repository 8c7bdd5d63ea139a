use thiserror::Error;

use crate::cache::CacheError;
use crate::entity::TaggerError;

#[derive(Error, Debug)]
pub enum LinkError {
    #[error("no tagger configured; pass pre-tagged sentences instead")]
    NoTagger,

    #[error("tagger error: {0}")]
    Tagger(#[from] TaggerError),

    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}

pub type LinkResult<T> = Result<T, LinkError>;

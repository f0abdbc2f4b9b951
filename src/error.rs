use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("invalid layer {0:?}, expected \"prob\" or \"fc\"")]
    InvalidLayer(String),

    #[error("failed to decode image")]
    Image(#[from] image::ImageError),

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output")]
    Output(#[source] std::io::Error),

    #[error("model error")]
    Model(#[from] tract_onnx::prelude::TractError),

    #[error("invalid WordNet identifier {0:?}")]
    InvalidWnid(String),

    #[error("no concept for class index {index}, concept list has {len} entries")]
    MissingConcept { index: usize, len: usize },

    #[error("no synset at offset {offset:08} for part of speech '{pos}'")]
    SynsetNotFound { pos: char, offset: u64 },

    #[error("malformed synset record at offset {offset:08} for part of speech '{pos}'")]
    MalformedSynset { pos: char, offset: u64 },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

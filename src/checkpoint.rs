use std::path::PathBuf;

/// File prefix of the shuffled ImageNet-bank ResNeXt-101 checkpoint.
pub const DEFAULT_PREFIX: &str = "resnext-101";

/// Epoch of the released checkpoint.
pub const DEFAULT_EPOCH: u32 = 38;

/// Location of an exported checkpoint, `<dir>/<prefix>-<epoch>.onnx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub dir: PathBuf,
    pub prefix: String,
    pub epoch: u32,
}

impl Checkpoint {
    /// The released checkpoint inside `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Checkpoint {
            dir: dir.into(),
            prefix: DEFAULT_PREFIX.to_owned(),
            epoch: DEFAULT_EPOCH,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_epoch(mut self, epoch: u32) -> Self {
        self.epoch = epoch;
        self
    }

    /// Path of the ONNX graph, epoch zero-padded to four digits.
    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}-{:04}.onnx", self.prefix, self.epoch))
    }
}

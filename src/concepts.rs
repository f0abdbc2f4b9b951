//! Class index to WordNet identifier mapping.

use std::{fmt, path::Path, str::FromStr};

use crate::{Error, Result};

/// Ordered WordNet identifiers, index-aligned with the probability output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConceptList {
    wnids: Vec<String>,
}

impl ConceptList {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let concepts = Self::parse(&text);

        tracing::debug!(path = %path.display(), len = concepts.len(), "loaded concept list");

        Ok(concepts)
    }

    /// One identifier per line. Surrounding whitespace is trimmed and
    /// trailing blank lines are dropped.
    pub fn parse(text: &str) -> Self {
        let mut wnids: Vec<String> = text.lines().map(|line| line.trim().to_owned()).collect();

        while wnids.last().is_some_and(|w| w.is_empty()) {
            wnids.pop();
        }

        ConceptList { wnids }
    }

    pub fn len(&self) -> usize {
        self.wnids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wnids.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.wnids.get(index).map(String::as_str)
    }

    /// Like [`get`](Self::get), but a missing entry is an error.
    pub fn concept(&self, index: usize) -> Result<&str> {
        self.get(index).ok_or(Error::MissingConcept {
            index,
            len: self.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.wnids.iter().map(String::as_str)
    }
}

/// A parsed WordNet identifier such as `n02123045`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Wnid {
    pub pos: char,
    pub offset: u64,
}

impl FromStr for Wnid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidWnid(s.to_owned());

        let mut chars = s.chars();
        let pos = chars.next().ok_or_else(invalid)?;

        if !matches!(pos, 'n' | 'v' | 'a' | 's' | 'r') {
            return Err(invalid());
        }

        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let offset = digits.parse().map_err(|_| invalid())?;

        Ok(Wnid { pos, offset })
    }
}

impl fmt::Display for Wnid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:08}", self.pos, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_lines() {
        let list = ConceptList::parse("n01440764\r\n  n01443537 \nn01484850\n\n");

        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1), Some("n01443537"));
        assert_eq!(list.get(2), Some("n01484850"));
        assert_eq!(list.get(3), None);
    }

    #[test]
    fn missing_concept_is_an_error() {
        let list = ConceptList::parse("n01440764\n");

        assert!(matches!(
            list.concept(4),
            Err(Error::MissingConcept { index: 4, len: 1 })
        ));
    }

    #[test]
    fn reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wnids.txt");
        std::fs::write(&path, "n02123045\nn02123159\n").unwrap();

        let list = ConceptList::from_path(&path).unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), ["n02123045", "n02123159"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            ConceptList::from_path(dir.path().join("wnids.txt")),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn wnid_parses_pos_and_offset() {
        let wnid: Wnid = "n02123045".parse().unwrap();

        assert_eq!(wnid, Wnid { pos: 'n', offset: 2123045 });
        assert_eq!(wnid.to_string(), "n02123045");
    }

    #[test]
    fn wnid_rejects_garbage() {
        for s in ["", "n", "x02123045", "n0212a045", "02123045", "n-2123045"] {
            assert!(matches!(s.parse::<Wnid>(), Err(Error::InvalidWnid(_))), "{s}");
        }
    }
}

//! Minimal reader for a WordNet 3.0 database directory.
//!
//! Only what is needed to turn a `(pos, offset)` pair into a named synset is
//! implemented: the `data.*` files are addressed by byte offset, and the
//! `index.*` files give the sense number used in the canonical name.

use std::{
    ffi::OsStr,
    fmt,
    fs::File,
    io::{BufRead, BufReader, Seek, SeekFrom},
    path::{Path, PathBuf},
};

use crate::{Error, Result, Wnid};

/// A WordNet database on disk, e.g. the NLTK `wordnet` corpus.
#[derive(Debug, Clone)]
pub struct WordNet {
    dir: PathBuf,
}

/// A single synset record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synset {
    pub offset: u64,
    /// Synset type from the record, `s` for adjective satellites.
    pub pos: char,
    pub lex_filenum: u8,
    pub lemmas: Vec<String>,
    pub gloss: String,
    /// Canonical name, `<lemma>.<pos>.<sense>`.
    pub name: String,
}

impl fmt::Display for Synset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Synset('{}')", self.name)
    }
}

fn file_suffix(pos: char) -> Option<&'static str> {
    Some(match pos {
        'n' => "noun",
        'v' => "verb",
        'a' | 's' => "adj",
        'r' => "adv",
        _ => return None,
    })
}

/// Strips adjective position markers, `long(a)` -> `long`.
fn strip_marker(word: &str) -> &str {
    match word.find('(') {
        Some(i) if word.ends_with(')') => &word[..i],
        _ => word,
    }
}

impl WordNet {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        if !dir.is_dir() {
            return Err(Error::io(
                &dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "WordNet directory not found"),
            ));
        }

        Ok(WordNet { dir })
    }

    /// Looks for the NLTK `wordnet` corpus in the directories NLTK itself
    /// searches: `$NLTK_DATA`, `~/nltk_data`, then the system locations.
    pub fn discover() -> Option<Self> {
        let nltk_data = std::env::var_os("NLTK_DATA");
        let home = std::env::var_os("HOME");

        nltk_search_dirs(nltk_data.as_deref(), home.as_deref())
            .into_iter()
            .map(|dir| dir.join("corpora").join("wordnet"))
            .find(|dir| dir.is_dir())
            .map(|dir| {
                tracing::debug!(dir = %dir.display(), "found WordNet corpus");
                WordNet { dir }
            })
    }

    fn path(&self, kind: &str, pos: char) -> Result<PathBuf> {
        let suffix = file_suffix(pos).ok_or_else(|| Error::InvalidWnid(pos.to_string()))?;
        Ok(self.dir.join(format!("{kind}.{suffix}")))
    }

    pub fn synset_for(&self, wnid: &Wnid) -> Result<Synset> {
        self.synset(wnid.pos, wnid.offset)
    }

    /// Look up the synset stored at `offset` in the data file for `pos`.
    pub fn synset(&self, pos: char, offset: u64) -> Result<Synset> {
        let path = self.path("data", pos)?;
        let file = File::open(&path).map_err(|e| Error::io(&path, e))?;
        let mut reader = BufReader::new(file);

        let len = reader
            .get_ref()
            .metadata()
            .map_err(|e| Error::io(&path, e))?
            .len();

        if offset >= len {
            return Err(Error::SynsetNotFound { pos, offset });
        }

        reader
            .seek(SeekFrom::Start(offset))
            .map_err(|e| Error::io(&path, e))?;

        let mut line = Vec::new();
        reader
            .read_until(b'\n', &mut line)
            .map_err(|e| Error::io(&path, e))?;

        let line = String::from_utf8_lossy(&line);
        let mut synset = parse_data_line(&line, pos, offset)?;

        let lemma = synset.lemmas[0].to_lowercase();
        let sense = self.sense_number(&lemma, pos, offset)?;
        synset.name = format!("{lemma}.{}.{sense:02}", synset.pos);

        tracing::trace!(%synset, "resolved synset");

        Ok(synset)
    }

    /// 1-based position of `offset` among the synsets listed for `lemma`.
    fn sense_number(&self, lemma: &str, pos: char, offset: u64) -> Result<usize> {
        let path = self.path("index", pos)?;
        let file = File::open(&path).map_err(|e| Error::io(&path, e))?;

        let malformed = || Error::MalformedSynset { pos, offset };

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| Error::io(&path, e))?;

            // license header lines start with whitespace
            if line.starts_with(' ') {
                continue;
            }

            let mut fields = line.split_ascii_whitespace();
            if fields.next() != Some(lemma) {
                continue;
            }

            let offsets = parse_index_offsets(fields).ok_or_else(malformed)?;

            return offsets
                .iter()
                .position(|&o| o == offset)
                .map(|i| i + 1)
                .ok_or_else(malformed);
        }

        Err(malformed())
    }
}

/// NLTK data roots in search order.
fn nltk_search_dirs(nltk_data: Option<&OsStr>, home: Option<&OsStr>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = nltk_data
        .map(|paths| std::env::split_paths(paths).collect())
        .unwrap_or_default();

    if let Some(home) = home {
        dirs.push(Path::new(home).join("nltk_data"));
    }

    dirs.extend(
        [
            "/usr/share/nltk_data",
            "/usr/local/share/nltk_data",
            "/usr/lib/nltk_data",
            "/usr/local/lib/nltk_data",
        ]
        .map(PathBuf::from),
    );

    dirs
}

/// Parses everything after the lemma on an index line and returns the
/// synset offsets in sense order.
fn parse_index_offsets<'a>(mut fields: impl Iterator<Item = &'a str>) -> Option<Vec<u64>> {
    let _pos = fields.next()?;
    let synset_cnt: usize = fields.next()?.parse().ok()?;
    let p_cnt: usize = fields.next()?.parse().ok()?;

    // pointer symbols, then sense_cnt and tagsense_cnt
    let mut fields = fields.skip(p_cnt + 2);

    (0..synset_cnt)
        .map(|_| fields.next()?.parse().ok())
        .collect()
}

/// Parses a `data.*` record. The returned synset has an empty name.
fn parse_data_line(line: &str, pos: char, offset: u64) -> Result<Synset> {
    let malformed = || Error::MalformedSynset { pos, offset };

    let (head, gloss) = match line.split_once('|') {
        Some((head, gloss)) => (head, gloss.trim()),
        None => (line, ""),
    };

    let mut fields = head.split_ascii_whitespace();

    let found: u64 = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(malformed)?;

    if found != offset {
        return Err(Error::SynsetNotFound { pos, offset });
    }

    let lex_filenum = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(malformed)?;

    let ss_type = fields
        .next()
        .and_then(|f| f.chars().next())
        .ok_or_else(malformed)?;

    let w_cnt = fields
        .next()
        .and_then(|f| usize::from_str_radix(f, 16).ok())
        .filter(|&n| n > 0)
        .ok_or_else(malformed)?;

    let mut lemmas = Vec::with_capacity(w_cnt);
    for _ in 0..w_cnt {
        let word = fields.next().ok_or_else(malformed)?;
        let _lex_id = fields.next().ok_or_else(malformed)?;

        lemmas.push(strip_marker(word).to_owned());
    }

    Ok(Synset {
        offset,
        pos: ss_type,
        lex_filenum,
        lemmas,
        gloss: gloss.to_owned(),
        name: String::new(),
    })
}

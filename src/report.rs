//! Labelled top-k listing of probability output.

use std::io::Write;

use crate::{ConceptList, Error, Features, Result, Wnid, WordNet};

/// Writes the `top` highest scores, one `<label> : <score>` line each.
///
/// Labels are WordNet synsets when a database is given, the raw
/// identifiers otherwise.
pub fn write_top_concepts<W: Write>(
    out: &mut W,
    features: &Features,
    concepts: &ConceptList,
    wordnet: Option<&WordNet>,
    top: usize,
) -> Result<()> {
    let predictions = features.top_k(top);

    writeln!(out, "Top {} concepts with scores:", predictions.len()).map_err(Error::Output)?;

    for prediction in predictions {
        let wnid = concepts.concept(prediction.index)?;

        let label = match wordnet {
            Some(wn) => wn.synset_for(&wnid.parse::<Wnid>()?)?.to_string(),
            None => wnid.to_owned(),
        };

        writeln!(out, "{label} : {:.4}", prediction.score).map_err(Error::Output)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::wordnet::fixture;

    fn render(
        features: &Features,
        concepts: &ConceptList,
        wordnet: Option<&WordNet>,
        top: usize,
    ) -> Result<String> {
        let mut out = Vec::new();
        write_top_concepts(&mut out, features, concepts, wordnet, top)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn cat_concepts(offsets: &fixture::Offsets) -> ConceptList {
        ConceptList::parse(&format!(
            "n{:08}\nn{:08}\nn{:08}\n",
            offsets.fabric, offsets.tabby_cat, offsets.persian_cat
        ))
    }

    #[test]
    fn labels_with_synsets() {
        let dir = tempfile::tempdir().unwrap();
        let offsets = fixture::write(dir.path());
        let wn = WordNet::open(dir.path()).unwrap();

        let features = Features::new(vec![0.1, 0.6, 0.3]);
        let text = render(&features, &cat_concepts(&offsets), Some(&wn), 2).unwrap();

        assert_eq!(
            text,
            "Top 2 concepts with scores:\n\
             Synset('tabby.n.02') : 0.6000\n\
             Synset('persian_cat.n.01') : 0.3000\n"
        );
    }

    #[test]
    fn header_counts_printed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let offsets = fixture::write(dir.path());

        let features = Features::new(vec![0.1, 0.6, 0.3]);
        let text = render(&features, &cat_concepts(&offsets), None, 5).unwrap();

        assert!(text.starts_with("Top 3 concepts with scores:\n"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn raw_identifiers_without_wordnet() {
        let concepts = ConceptList::parse("n01440764\nn01443537\n");
        let features = Features::new(vec![0.25, 0.75]);

        let text = render(&features, &concepts, None, 5).unwrap();

        assert_eq!(
            text,
            "Top 2 concepts with scores:\nn01443537 : 0.7500\nn01440764 : 0.2500\n"
        );
    }

    #[test]
    fn short_concept_list_is_an_error() {
        let concepts = ConceptList::parse("n01440764\n");
        let features = Features::new(vec![0.1, 0.2, 0.7]);

        assert!(matches!(
            render(&features, &concepts, None, 5),
            Err(Error::MissingConcept { index: 2, len: 1 })
        ));
    }

    #[test]
    fn malformed_identifier_is_an_error_with_wordnet() {
        let dir = tempfile::tempdir().unwrap();
        fixture::write(dir.path());
        let wn = WordNet::open(dir.path()).unwrap();

        let concepts = ConceptList::parse("cat\n");
        let features = Features::new(vec![1.0]);

        assert!(matches!(
            render(&features, &concepts, Some(&wn), 5),
            Err(Error::InvalidWnid(w)) if w == "cat"
        ));
    }
}

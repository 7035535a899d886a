//! Vector space model of the label candidates' vocabulary.
//!
//! Rows of the term-document matrix are stems, columns are documents. Only
//! stems that can contribute to a label are included: the stems of
//! single-word candidates and the content stems of phrase candidates. The
//! term-phrase matrix places every phrase candidate in the same row space so
//! phrases can be compared with the reduced basis.

pub mod weighting;

use ndarray::Array2;

use crate::matrix::normalize_columns_l2;
use crate::preprocessing::context::{AllFields, PreprocessingContext};

pub use self::weighting::TermWeighting;

/// Matrices built for one Lingo run.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorSpaceModel {
    /// Terms by documents, columns of unit length.
    pub term_document: Array2<f64>,
    /// Terms by phrase candidates, columns of unit length.
    pub term_phrase: Array2<f64>,
    /// Matrix row of each stem, if it is included.
    pub stem_to_row: Vec<Option<usize>>,
    /// Stem of each matrix row.
    pub row_stems: Vec<usize>,
}

impl VectorSpaceModel {
    pub fn row_count(&self) -> usize {
        self.row_stems.len()
    }
}

/// Builds the term-document and term-phrase matrices.
#[derive(Debug, Clone)]
pub struct TermDocumentMatrixBuilder {
    weighting: TermWeighting,
    title_words_boost: f64,
    max_word_df: f64,
    maximum_matrix_size: usize,
}

impl TermDocumentMatrixBuilder {
    pub fn new(
        weighting: TermWeighting,
        title_words_boost: f64,
        max_word_df: f64,
        maximum_matrix_size: usize,
    ) -> Self {
        TermDocumentMatrixBuilder {
            weighting,
            title_words_boost,
            max_word_df,
            maximum_matrix_size,
        }
    }

    pub fn build(&self, context: &PreprocessingContext<'_>) -> VectorSpaceModel {
        let document_count = context.document_count();
        let row_stems = self.select_stems(context);

        let mut stem_to_row = vec![None; context.stems.len()];
        for (row, &stem) in row_stems.iter().enumerate() {
            stem_to_row[stem] = Some(row);
        }

        let mut term_document = Array2::zeros((row_stems.len(), document_count));
        for (row, &stem_index) in row_stems.iter().enumerate() {
            let stem = &context.stems[stem_index];
            let df = stem.document_frequency();
            let boost = self.title_boost(context, stem_index);
            for &(document, tf) in &stem.tf_by_document {
                term_document[[row, document]] =
                    self.weighting.weight(f64::from(tf), df, document_count) * boost;
            }
        }
        normalize_columns_l2(&mut term_document);

        let phrase_labels = context.phrase_labels();
        let mut term_phrase = Array2::zeros((row_stems.len(), phrase_labels.len()));
        for (column, label) in phrase_labels.iter().enumerate() {
            for stem_index in context.feature_stem_indices(label.feature_index) {
                if let Some(row) = stem_to_row[stem_index] {
                    let stem = &context.stems[stem_index];
                    term_phrase[[row, column]] = self.weighting.weight(
                        f64::from(stem.tf),
                        stem.document_frequency(),
                        document_count,
                    );
                }
            }
        }
        normalize_columns_l2(&mut term_phrase);

        log::debug!(
            "Term-document matrix {}x{}, term-phrase matrix {}x{}",
            term_document.nrows(),
            term_document.ncols(),
            term_phrase.nrows(),
            term_phrase.ncols()
        );

        VectorSpaceModel {
            term_document,
            term_phrase,
            stem_to_row,
            row_stems,
        }
    }

    /// Stems to include, by decreasing weight, capped by the matrix size.
    fn select_stems(&self, context: &PreprocessingContext<'_>) -> Vec<usize> {
        let document_count = context.document_count();
        if document_count == 0 {
            return Vec::new();
        }

        let mut required = vec![false; context.stems.len()];
        for label in context.word_labels() {
            required[context.words[label.feature_index].stem_index] = true;
        }
        for label in context.phrase_labels() {
            for word in context.feature_word_indices(label.feature_index) {
                let word = &context.words[word];
                if !word.stop_word {
                    required[word.stem_index] = true;
                }
            }
        }

        let mut weighted: Vec<(usize, f64)> = required
            .iter()
            .enumerate()
            .filter(|&(_, &required)| required)
            .map(|(stem_index, _)| stem_index)
            .filter(|&stem_index| {
                let df = context.stems[stem_index].document_frequency();
                df as f64 / document_count as f64 <= self.max_word_df
            })
            .map(|stem_index| {
                let stem = &context.stems[stem_index];
                let weight = self.weighting.weight(
                    f64::from(stem.tf),
                    stem.document_frequency(),
                    document_count,
                ) * self.title_boost(context, stem_index);
                (stem_index, weight)
            })
            .collect();
        weighted.sort_by(|(a, weight_a), (b, weight_b)| {
            weight_b.total_cmp(weight_a).then(a.cmp(b))
        });

        let max_rows = (self.maximum_matrix_size / document_count).max(1);
        weighted.truncate(max_rows);
        weighted.into_iter().map(|(stem_index, _)| stem_index).collect()
    }

    fn title_boost(&self, context: &PreprocessingContext<'_>, stem_index: usize) -> f64 {
        if context.stems[stem_index]
            .field_indices
            .contains(&AllFields::TITLE)
        {
            self.title_words_boost
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::language::{LanguageCode, LanguageModels};
    use crate::config::PreprocessingConfig;
    use crate::document::Document;
    use crate::preprocessing::PreprocessingPipeline;

    fn documents() -> Vec<Document> {
        vec![
            Document::new("Data mining", "large databases"),
            Document::new("Data mining", "databases overview"),
            Document::new("Pasta recipes", "easy pasta"),
            Document::new("Pasta recipes", "italian"),
        ]
    }

    #[test]
    fn test_term_document_matrix() {
        let documents = documents();
        let refs: Vec<&Document> = documents.iter().collect();
        let models = LanguageModels::new();
        let context = PreprocessingPipeline::complete(PreprocessingConfig::default())
            .preprocess(&refs, None, models.model(LanguageCode::English))
            .unwrap();

        let model = TermDocumentMatrixBuilder::new(TermWeighting::Tf, 2.0, 1.0, 37_500).build(&context);
        let stems: Vec<&str> = model
            .row_stems
            .iter()
            .map(|&s| context.stems[s].image.as_str())
            .collect();
        // Title stems are boosted above "databas", which only occurs in
        // snippets; "pasta" has the highest frequency.
        assert_eq!(stems, vec!["pasta", "data", "mine", "recip", "databas"]);
        assert_eq!(model.term_document.dim(), (5, 4));
        assert_eq!(model.term_phrase.dim(), (5, 2));

        for column in model.term_document.columns() {
            let norm = column.dot(&column).sqrt();
            assert!((norm - 1.0).abs() < 1e-12);
        }
        for (stem, row) in model.stem_to_row.iter().enumerate() {
            if let Some(row) = row {
                assert_eq!(model.row_stems[*row], stem);
            }
        }
    }

    #[test]
    fn test_matrix_size_limit() {
        let documents = documents();
        let refs: Vec<&Document> = documents.iter().collect();
        let models = LanguageModels::new();
        let context = PreprocessingPipeline::complete(PreprocessingConfig::default())
            .preprocess(&refs, None, models.model(LanguageCode::English))
            .unwrap();

        let model = TermDocumentMatrixBuilder::new(TermWeighting::Tf, 2.0, 1.0, 8).build(&context);
        assert_eq!(model.row_count(), 2);

        let model = TermDocumentMatrixBuilder::new(TermWeighting::Tf, 2.0, 0.4, 37_500).build(&context);
        assert_eq!(model.row_count(), 0);
    }
}

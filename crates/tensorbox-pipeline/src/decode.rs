//! Label-decoding pass over a pattern file.

use tensorbox_core::dataset::Dataset;
use tensorbox_core::errors::DatasetError;

/// Rewrites every line of a pattern file through [`Dataset::decode_pattern`].
///
/// Line count is preserved (blank lines stay blank) and the last line has no
/// trailing newline, unless it is blank and would otherwise vanish. Fails on
/// the first line that cannot be decoded.
pub fn decode_experiment_text(dataset: &dyn Dataset, text: &str) -> Result<String, DatasetError> {
    let decoded = text
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                Ok(String::new())
            } else {
                dataset.decode_pattern(line)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    let mut out = decoded.join("\n");
    if decoded.last().is_some_and(String::is_empty) {
        out.push('\n');
    }
    Ok(out)
}

/// Index sets of a labelled ground pattern, e.g. `0,1 4` becomes `alice,bob x`.
pub fn decode_tuples(dataset: &dyn Dataset, tuples: &str) -> Result<String, DatasetError> {
    let decoded = dataset.decode_pattern(&format!("{tuples} 0"))?;
    Ok(decoded
        .rsplit_once(' ')
        .map(|(head, _)| head.to_string())
        .unwrap_or(decoded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tensorbox_core::dataset::{LabelCodec, TensorDataset};
    use tensorbox_core::tensor::DenseTensor;

    fn dataset() -> TensorDataset {
        let codec = LabelCodec::from_labels(vec![
            vec!["a".to_string(), "b".to_string()],
            vec!["x".to_string(), "y".to_string()],
        ]);
        TensorDataset::new("toy", DenseTensor::zeros(&[2, 2]))
            .with_codec(codec)
            .unwrap()
    }

    #[test]
    fn last_line_has_no_newline() {
        let decoded = decode_experiment_text(&dataset(), "0 0 0.5\n1 1 0.4\n").unwrap();
        assert_eq!(decoded, "a x 0.5\nb y 0.4");
    }

    #[test]
    fn trailing_blank_line_is_kept() {
        let text = "0 0 0.5\n1 1 0.4\n\n";
        let decoded = decode_experiment_text(&dataset(), text).unwrap();
        assert_eq!(decoded, "a x 0.5\nb y 0.4\n\n");
        assert_eq!(decoded.lines().count(), text.lines().count());
    }

    #[test]
    fn inner_blank_lines_stay_blank() {
        let text = "\n0 0 0.5\n\n1 1 0.4";
        let decoded = decode_experiment_text(&dataset(), text).unwrap();
        assert_eq!(decoded, "\na x 0.5\n\nb y 0.4");
        assert_eq!(decoded.lines().count(), 4);
    }

    #[test]
    fn unknown_index_fails() {
        assert!(matches!(
            decode_experiment_text(&dataset(), "0 0 0.5\n5 0 0.3\n"),
            Err(DatasetError::UnknownLabel { dimension: 0, .. })
        ));
    }

    #[test]
    fn tuples_drop_density() {
        assert_eq!(decode_tuples(&dataset(), "0,1 1").unwrap(), "a,b y");
    }
}

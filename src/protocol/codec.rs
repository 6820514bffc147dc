use crate::error::FormatError;

/// Parses comma-separated numbers into exactly `expected` values.
///
/// Whitespace around a field is ignored. Empty fields, non-numeric fields and
/// non-finite values (`NaN`, `inf`) are rejected, as is any other count.
pub fn decode(text: &str, expected: usize) -> Result<Vec<f64>, FormatError> {
    let values = text
        .split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, field)| {
            let value = field.parse::<f64>().map_err(|_| FormatError::InvalidNumber {
                index,
                field: field.to_owned(),
            })?;
            if !value.is_finite() {
                return Err(FormatError::NonFinite { index });
            }
            Ok(value)
        })
        .collect::<Result<Vec<f64>, FormatError>>()?;

    if values.len() != expected {
        return Err(FormatError::ArityMismatch { got: values.len(), expected });
    }
    Ok(values)
}

/// Joins values with commas using the default `f64` formatting.
pub fn encode(values: &[f64]) -> String {
    values
        .iter()
        .map(f64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Splits a decoded training sample into (input, target).
///
/// # Panics
/// Panics if `input_len > sample.len()`; `decode` guarantees the length.
pub fn split_sample(sample: &[f64], input_len: usize) -> (&[f64], &[f64]) {
    sample.split_at(input_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_exact_arity() {
        assert_eq!(decode("0.1,0.2,-3", 3), Ok(vec![0.1, 0.2, -3.0]));
    }

    #[test]
    fn tolerates_whitespace_around_fields() {
        assert_eq!(decode(" 1, 2 ,3 ", 3), Ok(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn rejects_wrong_count() {
        assert_eq!(
            decode("1,2,3", 7),
            Err(FormatError::ArityMismatch { got: 3, expected: 7 })
        );
    }

    #[test]
    fn rejects_non_numeric_field() {
        assert_eq!(
            decode("1,abc,3", 3),
            Err(FormatError::InvalidNumber { index: 1, field: "abc".to_owned() })
        );
    }

    #[test]
    fn rejects_trailing_comma() {
        assert_eq!(
            decode("1,2,", 2),
            Err(FormatError::InvalidNumber { index: 2, field: String::new() })
        );
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(matches!(decode("", 7), Err(FormatError::InvalidNumber { index: 0, .. })));
    }

    #[test]
    fn rejects_non_finite() {
        assert_eq!(decode("1,NaN", 2), Err(FormatError::NonFinite { index: 1 }));
        assert_eq!(decode("inf,1", 2), Err(FormatError::NonFinite { index: 0 }));
    }

    #[test]
    fn encodes_with_commas() {
        assert_eq!(encode(&[0.5, 1.2]), "0.5,1.2");
        assert_eq!(encode(&[-2.0]), "-2");
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn encoded_output_decodes_back() {
        let values = [0.123456789, -4.5e-9, 1e21];
        assert_eq!(decode(&encode(&values), 3), Ok(values.to_vec()));
    }

    #[test]
    fn splits_train_sample() {
        let sample = decode("0.1,0.2,0.3,0.4,0.5,0.6,0.7,0.3,0.7", 9).unwrap();
        let (input, target) = split_sample(&sample, 7);
        assert_eq!(input, &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7]);
        assert_eq!(target, &[0.3, 0.7]);
    }
}

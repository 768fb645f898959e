use crate::data::Dataset;

/// Partition of a dataset's headers into category and measure fields.
/// Field order follows header order in both lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category_fields: Vec<String>,
    pub measure_fields: Vec<String>,
}

/// Classify every header of a dataset as either a measure (all of its values
/// parse as numbers) or a category (anything else).
///
/// The numeric grammar is Rust's `f64` one, used unchanged everywhere in this
/// crate: optional sign, decimal digits with an optional fractional part and
/// exponent, plus `inf`/`infinity`/`nan` spellings. No thousands separators,
/// no surrounding whitespace.
pub fn classify(data: &Dataset) -> Classification {
    let mut category_fields = Vec::new();
    let mut measure_fields = Vec::new();

    for (idx, header) in data.headers().iter().enumerate() {
        let all_numeric = data.rows().iter().all(|row| is_numeric(&row[idx]));
        if all_numeric {
            measure_fields.push(header.clone());
        } else {
            category_fields.push(header.clone());
        }
    }

    Classification {
        category_fields,
        measure_fields,
    }
}

fn is_numeric(value: &str) -> bool {
    value.parse::<f64>().is_ok()
}

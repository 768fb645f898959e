// Query pipeline: validate, filter, group, aggregate, top-N, sort,
// color condition, reference-line clamp. Runs in exactly that order; the
// first failure aborts with no partial output.

use std::collections::{HashMap, HashSet};

use crate::data::Dataset;
use crate::error::VizError;
use crate::query::{
    Aggregation, BarChart, BarItem, BarQuery, Comparison, MeasureSpec, SortField, SortOrder,
};

/// Execute a bar-chart query against a dataset. Pure: the dataset is only
/// read, and equal inputs always produce equal results.
pub fn run(dataset: &Dataset, query: &BarQuery) -> Result<BarChart, VizError> {
    let category_idx = dataset.column_index(&query.category_field).ok_or_else(|| {
        VizError::InvalidField(format!("unknown category field '{}'", query.category_field))
    })?;
    let measure_idx = dataset.column_index(&query.measure.field).ok_or_else(|| {
        VizError::InvalidField(format!("unknown measure field '{}'", query.measure.field))
    })?;
    if let Some(top) = &query.top {
        if top.count <= 0 {
            return Err(VizError::InvalidField(format!(
                "top count must be positive, got {}",
                top.count
            )));
        }
    }

    // Filter: exact string membership, no normalization.
    let filter: Option<HashSet<&str>> = match &query.category_filter {
        Some(values) if !values.is_empty() => {
            Some(values.iter().map(String::as_str).collect())
        }
        _ => None,
    };
    let rows: Vec<&Vec<String>> = dataset
        .rows()
        .iter()
        .filter(|row| match &filter {
            Some(allowed) => allowed.contains(row[category_idx].as_str()),
            None => true,
        })
        .collect();

    // Group by raw category value, remembering first-appearance order so the
    // output is deterministic before any explicit sort.
    let mut category_order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<&Vec<String>>> = HashMap::new();
    for row in rows {
        let key = &row[category_idx];
        if !groups.contains_key(key) {
            category_order.push(key.clone());
        }
        groups.entry(key.clone()).or_default().push(row);
    }

    // Aggregate each group into one bar.
    let mut items = Vec::with_capacity(category_order.len());
    for category in category_order {
        let members = &groups[&category];
        let measure = aggregate(members, measure_idx, &query.measure)?;
        items.push(BarItem {
            category,
            measure,
            color: None,
        });
    }

    // Top-N: rank by measure and truncate. Later stages only see survivors.
    if let Some(top) = &query.top {
        sort_by_measure(&mut items, top.sort);
        items.truncate(top.count as usize);
    }

    // Explicit sort overrides whatever order top-N (or discovery) left.
    if let Some(sort) = &query.sort {
        match sort.field {
            SortField::Measure => sort_by_measure(&mut items, sort.sort),
            SortField::Category => match sort.sort {
                SortOrder::Asc => items.sort_by(|a, b| a.category.cmp(&b.category)),
                SortOrder::Desc => items.sort_by(|a, b| b.category.cmp(&a.category)),
            },
        }
    }

    // Color condition: rebuild each item with its tag. Untagged items stay
    // untagged; there is no default color.
    if let Some(cond) = &query.color_condition {
        items = items
            .into_iter()
            .map(|item| {
                let satisfied = match cond.comparison {
                    Comparison::Gt => item.measure > cond.value,
                    Comparison::Lt => item.measure < cond.value,
                    // Exact f64 equality on the computed aggregate, not an
                    // epsilon comparison. Rarely fires against AVG results.
                    Comparison::Eq => item.measure == cond.value,
                };
                BarItem {
                    color: satisfied.then_some(cond.color),
                    ..item
                }
            })
            .collect();
    }

    let reference_line = query
        .reference_line
        .map(|line| clamp_reference(line, &items));

    Ok(BarChart {
        data: items,
        reference_line,
    })
}

fn aggregate(
    rows: &[&Vec<String>],
    measure_idx: usize,
    spec: &MeasureSpec,
) -> Result<f64, VizError> {
    match spec.aggregation {
        // COUNT never parses the measure values.
        Aggregation::Count => Ok(rows.len() as f64),
        Aggregation::Sum => {
            let values = numeric_values(rows, measure_idx, &spec.field)?;
            Ok(values.iter().sum())
        }
        Aggregation::Avg => {
            let values = numeric_values(rows, measure_idx, &spec.field)?;
            Ok(values.iter().sum::<f64>() / values.len() as f64)
        }
    }
}

fn numeric_values(
    rows: &[&Vec<String>],
    measure_idx: usize,
    field: &str,
) -> Result<Vec<f64>, VizError> {
    rows.iter()
        .map(|row| {
            row[measure_idx].parse::<f64>().map_err(|_| {
                VizError::InvalidField(format!(
                    "value '{}' in measure field '{}' is not numeric",
                    row[measure_idx], field
                ))
            })
        })
        .collect()
}

// Stable, so equal measures keep their first-appearance order.
fn sort_by_measure(items: &mut [BarItem], order: SortOrder) {
    match order {
        SortOrder::Asc => items.sort_by(|a, b| a.measure.total_cmp(&b.measure)),
        SortOrder::Desc => items.sort_by(|a, b| b.measure.total_cmp(&a.measure)),
    }
}

/// Clamp a reference line into the range of the final measures. An empty
/// result set has no range, so the line passes through unchanged.
fn clamp_reference(line: f64, items: &[BarItem]) -> f64 {
    if items.is_empty() {
        return line;
    }
    let min = items.iter().map(|i| i.measure).fold(f64::INFINITY, f64::min);
    let max = items
        .iter()
        .map(|i| i.measure)
        .fold(f64::NEG_INFINITY, f64::max);
    if line > max {
        max
    } else if line < min {
        min
    } else {
        line
    }
}

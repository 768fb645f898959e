// Declarative query model and chart result, as used on the wire.
//
// Every enum token below is part of the external contract and must
// round-trip byte-for-byte, which is why each variant carries an explicit
// rename instead of a blanket casing rule.

use serde::{Deserialize, Serialize};

use crate::error::VizError;

/// How a group's measure values are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggregation {
    #[serde(rename = "SUM")]
    Sum,
    #[serde(rename = "AVG")]
    Avg,
    #[serde(rename = "COUNT")]
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

/// What the final sort stage orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "measure")]
    Measure,
    #[serde(rename = "category")]
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = "GT")]
    Gt,
    #[serde(rename = "LT")]
    Lt,
    #[serde(rename = "EQ")]
    Eq,
}

/// The closed set of highlight colors a condition may assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorToken {
    #[serde(rename = "RED")]
    Red,
    #[serde(rename = "BLUE")]
    Blue,
    #[serde(rename = "MAGENTA")]
    Magenta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureSpec {
    pub field: String,
    pub aggregation: Aggregation,
}

/// Keep only the top N groups by measure, discarding the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSpec {
    pub count: i64,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub sort: SortOrder,
}

/// Tag groups whose measure satisfies `comparison` against `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorCondition {
    pub comparison: Comparison,
    pub value: f64,
    pub color: ColorToken,
}

/// One bar-chart aggregation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarQuery {
    pub category_field: String,
    pub measure: MeasureSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_filter: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<TopSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_condition: Option<ColorCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_line: Option<f64>,
}

impl BarQuery {
    /// Decode a query from its wire JSON. An enumeration token outside its
    /// defined set is rejected as `InvalidEnum`; any other decode problem
    /// (missing or mistyped field) is a field error.
    pub fn from_json(input: &str) -> Result<Self, VizError> {
        serde_json::from_str(input).map_err(|e| {
            let msg = e.to_string();
            if msg.contains("unknown variant") {
                VizError::InvalidEnum(msg)
            } else {
                VizError::InvalidField(msg)
            }
        })
    }
}

/// One bar of the final chart. `color` is omitted from the wire entirely
/// when the item was not tagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarItem {
    pub category: String,
    pub measure: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorToken>,
}

/// The chart-ready result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarChart {
    pub data: Vec<BarItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_line: Option<f64>,
}

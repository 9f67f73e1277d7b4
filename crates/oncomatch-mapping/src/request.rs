//! Vendor filter request models.
//!
//! One `ApiRequest` per logical match request. Every extraction rule
//! writes into the same instance; the assembler seeds pagination and
//! sort defaults before the rules run. Serialized as the vendor's
//! camelCase JSON body.

use serde::{Deserialize, Serialize};

use crate::tables::categories::Category;

pub const SORT_FIELD_DISTANCE: &str = "distance";
pub const SORT_ORDER_ASC: &str = "asc";

pub const FIRST_PAGE_NUMBER: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 25;
pub const MAX_PAGE_SIZE: u32 = 50;

/// Projection: the trial fields the vendor should return per match.
pub const RESULT_FIELDS: [&str; 8] = [
    "trialId",
    "nctId",
    "fullTitle",
    "shortTitle",
    "status",
    "phase",
    "sites",
    "overallContacts",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortClause {
    pub field: String,
    pub order: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceClause {
    pub from: GeoPoint,
    pub distance: f64,
    pub distance_unit: String,
}

/// The vendor wants the search origin both inside the distance filter and
/// as a top-level field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginClause {
    pub from: GeoPoint,
}

/// One coded value in the vendor's filter vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_set_id: Option<String>,
    pub value_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ValueField {
    pub fn new(value_set_id: impl Into<String>, value_id: impl Into<String>) -> Self {
        Self {
            value_set_id: Some(value_set_id.into()),
            value_id: value_id.into(),
            status: None,
        }
    }

    /// A value carrying only a vendor id (no value set), used by the
    /// stage and procedure rules.
    pub fn bare(value_id: impl Into<String>) -> Self {
        Self {
            value_set_id: None,
            value_id: value_id.into(),
            status: None,
        }
    }
}

/// One clinical concept in the vendor's eligibility vocabulary. Exactly
/// one of `value`/`values` is populated: age uses the scalar form, all
/// coded categories use the list form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityField {
    pub field_id: String,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<ValueField>>,
}

impl EligibilityField {
    pub fn scalar(category: &Category, value: impl Into<String>) -> Self {
        Self {
            field_id: category.id.to_string(),
            mode: category.mode.to_string(),
            value: Some(value.into()),
            values: None,
        }
    }

    pub fn coded(category: &Category, values: Vec<ValueField>) -> Self {
        Self {
            field_id: category.id.to_string(),
            mode: category.mode.to_string(),
            value: None,
            values: Some(values),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterFields {
    /// Single value pair; when a condition carries several codings the
    /// last one iterated wins.
    pub condition: Option<ValueField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub eligibility: Vec<EligibilityField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<DistanceClause>,
    #[serde(default)]
    pub countries: Vec<String>,
}

impl FilterFields {
    /// Append an eligibility entry. Callers must have checked that the
    /// entry carries at least one value; an empty coded entry is a bug
    /// in the calling rule.
    pub fn push_eligibility(&mut self, field: EligibilityField) {
        debug_assert!(
            field.value.is_some() || field.values.as_ref().is_some_and(|v| !v.is_empty()),
            "eligibility entry without values"
        );
        self.eligibility.push(field);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub page: u32,
    pub page_size: u32,
    pub fields: Vec<String>,
    pub filter: FilterFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<OriginClause>,
    pub sort: Vec<SortClause>,
}

impl ApiRequest {
    /// Cache/logging key: the endpoint-independent serialized body.
    pub fn body_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_serializes_condition_null() {
        let filter = FilterFields::default();
        let json = serde_json::to_value(&filter).unwrap();
        assert!(json["condition"].is_null());
        assert_eq!(json["countries"], serde_json::json!([]));
        // Empty eligibility list is omitted from the body entirely.
        assert!(json.get("eligibility").is_none());
    }

    #[test]
    fn test_value_field_skips_absent_fields() {
        let value = ValueField::bare("176");
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!({ "valueId": "176" }));
    }
}

//! Free-form symptom lists.

use std::collections::HashSet;

use serde_json::Value;

use super::{FeatureSource, FeatureVector, SymptomCatalog};
use crate::manifest::ModelDescriptor;

/// Symptom payload: `{ "symptoms": [..] }` matched against a catalog.
///
/// Matching is exact. Symptoms outside the catalog and non-string entries
/// are ignored.
#[derive(Debug, Clone)]
pub struct SymptomList<'a> {
    symptoms: HashSet<&'a str>,
    catalog: &'a SymptomCatalog,
}

impl<'a> SymptomList<'a> {
    pub fn new<I>(symptoms: I, catalog: &'a SymptomCatalog) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            symptoms: symptoms.into_iter().collect(),
            catalog,
        }
    }

    /// Read the `symptoms` array of a request payload. A missing or
    /// non-array field is an empty list.
    pub fn from_payload(payload: &'a Value, catalog: &'a SymptomCatalog) -> Self {
        let symptoms = payload
            .get("symptoms")
            .and_then(Value::as_array)
            .map(|list| list.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        Self { symptoms, catalog }
    }

    /// Input symptoms with no catalog position.
    pub fn unknown(&self) -> Vec<&'a str> {
        let mut unknown: Vec<&str> = self
            .symptoms
            .iter()
            .copied()
            .filter(|s| !self.catalog.contains(s))
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

impl FeatureSource for SymptomList<'_> {
    fn to_vector(&self, descriptor: &ModelDescriptor) -> FeatureVector {
        FeatureVector::from(self.catalog.presence(&self.symptoms, descriptor.feature_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog() -> SymptomCatalog {
        SymptomCatalog::from_symptoms(["fever", "cough", "headache"])
    }

    #[test]
    fn unknown_symptoms_are_ignored() {
        let catalog = catalog();
        let payload = json!({ "symptoms": ["cough", "unknown_symptom"] });
        let list = SymptomList::from_payload(&payload, &catalog);
        let descriptor = ModelDescriptor::symptoms("decision_tree", "dt.onnx", 3);

        assert_eq!(list.to_vector(&descriptor).as_slice(), &[0.0, 1.0, 0.0]);
        assert_eq!(list.unknown(), vec!["unknown_symptom"]);
    }

    #[test]
    fn missing_symptoms_field_is_empty() {
        let catalog = catalog();
        let payload = json!({ "age": 3 });
        let descriptor = ModelDescriptor::symptoms("decision_tree", "dt.onnx", 3);
        let vector = SymptomList::from_payload(&payload, &catalog).to_vector(&descriptor);
        assert_eq!(vector.as_slice(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn non_string_entries_are_skipped() {
        let catalog = catalog();
        let payload = json!({ "symptoms": [1, null, "headache", { "x": 1 }] });
        let descriptor = ModelDescriptor::symptoms("decision_tree", "dt.onnx", 4);
        let vector = SymptomList::from_payload(&payload, &catalog).to_vector(&descriptor);
        assert_eq!(vector.as_slice(), &[0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let catalog = catalog();
        let list = SymptomList::new(["Fever"], &catalog);
        let descriptor = ModelDescriptor::symptoms("decision_tree", "dt.onnx", 3);
        assert_eq!(list.to_vector(&descriptor).as_slice(), &[0.0, 0.0, 0.0]);
    }
}

use std::collections::BTreeSet;

use super::types::{normalize_category, AllocationPayload};

/// Validate a point weight write.
/// Returns all validation errors at once (not just the first).
pub fn validate_weight(category: &str, weight: f64) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if normalize_category(category).is_empty() {
        errors.push("category: must not be empty".to_string());
    }

    if !weight.is_finite() {
        errors.push(format!("weight: must be a finite number, got {}", weight));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate an allocation payload before it is stored.
/// Returns all validation errors at once (not just the first).
pub fn validate_allocation(payload: &AllocationPayload) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if payload.counts.is_none() && payload.total.is_none() {
        errors.push("payload: either counts or total is required".to_string());
    }

    if let Some(total) = payload.total {
        if !total.is_finite() {
            errors.push(format!("total: must be a finite number, got {}", total));
        }
    }

    if let Some(ref counts) = payload.counts {
        let mut seen = BTreeSet::new();
        for label in counts.keys() {
            let category = normalize_category(label);
            if category.is_empty() {
                errors.push(format!("counts['{}']: category must not be empty", label));
            } else if !seen.insert(category.clone()) {
                errors.push(format!(
                    "counts['{}']: duplicates category '{}'",
                    label, category
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

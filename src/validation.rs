use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{dto::products::ProductChanges, models::ProductFields};

pub const DEFAULT_IMAGE: &str = "https://picsum.photos/200/300";

/// Field name to message, at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Records `message` unless `field` already has one; the first violated rule wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Overlays `changes` onto `base` (or onto the defaults when creating) and checks every
/// constraint of the resulting record.
///
/// Type errors carried by `changes` come first, so a field that failed on type keeps that
/// message while every other field is still checked.
pub fn merge_and_validate(
    changes: ProductChanges,
    base: Option<&ProductFields>,
) -> Result<ProductFields, ValidationErrors> {
    let mut errors = changes.type_errors;

    let name = changes
        .name
        .map(|name| name.trim().to_string())
        .or_else(|| base.map(|b| b.name.clone()));
    let name = required_text(&mut errors, "name", name);

    let description = changes
        .description
        .or_else(|| base.map(|b| b.description.clone()));
    let description = required_text(&mut errors, "description", description);

    let category = changes
        .category
        .or_else(|| base.map(|b| b.category.clone()));
    let category = required_text(&mut errors, "category", category);

    let price = match changes.price.or(base.map(|b| b.price)) {
        None => {
            errors.add("price", "price is required");
            None
        }
        Some(price) if !price.is_finite() => {
            errors.add("price", "price must be a finite number");
            None
        }
        Some(price) if price < 0.0 => {
            errors.add("price", "price must not be negative");
            None
        }
        Some(price) => Some(price),
    };

    let stock = changes.stock.or(base.map(|b| b.stock)).unwrap_or(0);
    if stock < 0 {
        errors.add("stock", "stock must not be negative");
    }

    let image = changes
        .image
        .or_else(|| base.map(|b| b.image.clone()))
        .unwrap_or_else(|| DEFAULT_IMAGE.to_string());
    if image.trim().is_empty() {
        errors.add("image", "image must not be empty");
    }

    match (name, description, category, price) {
        (Some(name), Some(description), Some(category), Some(price)) if errors.is_empty() => {
            Ok(ProductFields {
                name,
                description,
                price,
                category,
                stock,
                image,
            })
        }
        _ => Err(errors),
    }
}

fn required_text(errors: &mut ValidationErrors, field: &str, value: Option<String>) -> Option<String> {
    match value {
        None => {
            errors.add(field, format!("{field} is required"));
            None
        }
        Some(value) if value.trim().is_empty() => {
            errors.add(field, format!("{field} must not be empty"));
            None
        }
        Some(value) => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> ProductChanges {
        ProductChanges {
            name: Some("  Pen ".into()),
            description: Some("Blue ink".into()),
            price: Some(2000.0),
            category: Some("Stationery".into()),
            ..Default::default()
        }
    }

    #[test]
    fn create_applies_defaults_and_trims_name() {
        let fields = merge_and_validate(pen(), None).expect("valid");
        assert_eq!(fields.name, "Pen");
        assert_eq!(fields.stock, 0);
        assert_eq!(fields.image, DEFAULT_IMAGE);
    }

    #[test]
    fn create_reports_every_missing_required_field() {
        let errors = merge_and_validate(ProductChanges::default(), None).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("name"), Some("name is required"));
        assert!(errors.contains("description"));
        assert!(errors.contains("price"));
        assert!(errors.contains("category"));
        assert!(!errors.contains("stock"));
    }

    #[test]
    fn negative_price_names_price_only() {
        let changes = ProductChanges {
            price: Some(-1.0),
            ..pen()
        };
        let errors = merge_and_validate(changes, None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("price"), Some("price must not be negative"));
    }

    #[test]
    fn non_finite_price_is_rejected() {
        let changes = ProductChanges {
            price: Some(f64::INFINITY),
            ..pen()
        };
        let errors = merge_and_validate(changes, None).unwrap_err();
        assert_eq!(errors.get("price"), Some("price must be a finite number"));
    }

    #[test]
    fn blank_name_is_not_required_but_empty() {
        let changes = ProductChanges {
            name: Some("   ".into()),
            ..pen()
        };
        let errors = merge_and_validate(changes, None).unwrap_err();
        assert_eq!(errors.get("name"), Some("name must not be empty"));
    }

    #[test]
    fn merge_keeps_base_fields_that_are_not_supplied() {
        let base = merge_and_validate(pen(), None).unwrap();
        let changes = ProductChanges {
            stock: Some(12),
            ..Default::default()
        };
        let merged = merge_and_validate(changes, Some(&base)).unwrap();
        assert_eq!(merged.stock, 12);
        assert_eq!(merged.name, base.name);
        assert_eq!(merged.image, base.image);
    }

    #[test]
    fn merge_rejects_invalid_overlay() {
        let base = merge_and_validate(pen(), None).unwrap();
        let changes = ProductChanges {
            stock: Some(-3),
            category: Some(String::new()),
            ..Default::default()
        };
        let errors = merge_and_validate(changes, Some(&base)).unwrap_err();
        assert_eq!(errors.get("stock"), Some("stock must not be negative"));
        assert_eq!(errors.get("category"), Some("category must not be empty"));
    }

    #[test]
    fn type_errors_are_reported_alongside_missing_fields() {
        let mut type_errors = ValidationErrors::default();
        type_errors.add("price", "price must be a number");
        let changes = ProductChanges {
            type_errors,
            ..Default::default()
        };

        let errors = merge_and_validate(changes, None).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("price"), Some("price must be a number"));
        assert_eq!(errors.get("name"), Some("name is required"));
        assert_eq!(errors.get("description"), Some("description is required"));
        assert_eq!(errors.get("category"), Some("category is required"));
    }

    #[test]
    fn type_error_fails_update_even_with_a_valid_base() {
        let base = merge_and_validate(pen(), None).unwrap();
        let mut type_errors = ValidationErrors::default();
        type_errors.add("stock", "stock must be an integer");
        let changes = ProductChanges {
            name: Some("".into()),
            type_errors,
            ..Default::default()
        };

        let errors = merge_and_validate(changes, Some(&base)).unwrap_err();
        assert_eq!(errors.get("stock"), Some("stock must be an integer"));
        assert_eq!(errors.get("name"), Some("name must not be empty"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = ValidationErrors::default();
        errors.add("price", "price must be a number");
        errors.add("price", "price must not be negative");
        assert_eq!(errors.get("price"), Some("price must be a number"));
        assert_eq!(errors.to_string(), "price: price must be a number");
    }
}

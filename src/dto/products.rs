use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::validation::ValidationErrors;

/// Body of `POST /api/products` and `PUT /api/products/{id}`.
///
/// Values are kept as raw JSON so that a wrongly typed field is reported against that field
/// instead of failing the whole body. `null` counts as absent. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductPayload {
    #[schema(value_type = Option<String>, example = "Pen")]
    pub name: Option<Value>,
    #[schema(value_type = Option<String>, example = "Blue ink")]
    pub description: Option<Value>,
    #[schema(value_type = Option<f64>, example = 2000)]
    pub price: Option<Value>,
    #[schema(value_type = Option<String>, example = "Stationery")]
    pub category: Option<Value>,
    #[schema(value_type = Option<i64>, example = 0)]
    pub stock: Option<Value>,
    #[schema(value_type = Option<String>, example = "https://picsum.photos/200/300")]
    pub image: Option<Value>,
}

/// Typed partial change set. Each field is independently present or absent; what is present
/// is overlaid on the stored record (or the defaults) before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub image: Option<String>,
    /// Fields whose supplied value had the wrong type. They are left as `None` above and
    /// reported together with the rule checks once the change set is validated.
    pub type_errors: ValidationErrors,
}

impl ProductPayload {
    pub fn into_changes(self) -> ProductChanges {
        let mut type_errors = ValidationErrors::default();

        ProductChanges {
            name: text(&mut type_errors, "name", self.name),
            description: text(&mut type_errors, "description", self.description),
            price: number(&mut type_errors, "price", self.price),
            category: text(&mut type_errors, "category", self.category),
            stock: integer(&mut type_errors, "stock", self.stock),
            image: text(&mut type_errors, "image", self.image),
            type_errors,
        }
    }
}

fn text(errors: &mut ValidationErrors, field: &str, value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        _ => {
            errors.add(field, format!("{field} must be a string"));
            None
        }
    }
}

// Numeric strings are accepted since storefront forms post their inputs as text.
fn number(errors: &mut ValidationErrors, field: &str, value: Option<Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        errors.add(field, format!("{field} must be a number"));
    }
    parsed
}

fn integer(errors: &mut ValidationErrors, field: &str, value: Option<Value>) -> Option<i64> {
    let parsed = match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    if parsed.is_none() {
        errors.add(field, format!("{field} must be an integer"));
    }
    parsed
}

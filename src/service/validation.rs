//! Request validation from schema rules. Collects every violation instead of stopping at the first.

use crate::case::to_camel_case;
use crate::config::{ColumnDef, ColumnType, EntitySchema, Format};
use crate::error::AppError;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));
static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url regex"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Required,
    Type,
    MinLength,
    MaxLength,
    Format,
    Minimum,
    Maximum,
    Scale,
    Allowed,
}

/// One field-level failure, reported with the field's wire name.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Violation {
    pub field: String,
    pub rule: Rule,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, rule: Rule, message: impl Into<String>) -> Self {
        Violation {
            field: field.into(),
            rule,
            message: message.into(),
        }
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a decoded body against every writable column of `schema`.
    /// Keys are matched by wire (camelCase) name; unknown keys are ignored.
    pub fn validate(body: &Map<String, Value>, schema: &EntitySchema) -> Result<(), AppError> {
        let mut violations = Vec::new();
        for col in schema.columns {
            let field = to_camel_case(col.name);
            check_column(&field, body.get(&field), col, &mut violations);
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations))
        }
    }
}

fn check_column(field: &str, value: Option<&Value>, col: &ColumnDef, out: &mut Vec<Violation>) {
    let value = match value {
        None | Some(Value::Null) => {
            if col.is_required() {
                out.push(Violation::new(field, Rule::Required, format!("{} is required", field)));
            }
            return;
        }
        Some(v) => v,
    };

    match col.ty {
        ColumnType::Text => match value.as_str() {
            Some(s) => check_text(field, s, col, out),
            None => out.push(Violation::new(field, Rule::Type, format!("{} must be a string", field))),
        },
        ColumnType::Integer | ColumnType::BigInt => match integer_value(value, col.ty) {
            Some(n) => check_range(field, n as f64, col, out),
            None => out.push(Violation::new(field, Rule::Type, format!("{} must be an integer", field))),
        },
        ColumnType::Numeric => match decimal_value(value) {
            Some(d) => check_decimal(field, d, col, out),
            None => out.push(Violation::new(field, Rule::Type, format!("{} must be a decimal number", field))),
        },
    }
}

fn check_text(field: &str, s: &str, col: &ColumnDef, out: &mut Vec<Violation>) {
    let rule = &col.rule;
    // PostgreSQL text cannot hold NUL
    if s.contains('\0') {
        out.push(Violation::new(field, Rule::Type, format!("{} must not contain NUL characters", field)));
        return;
    }
    if s.trim().is_empty() {
        if col.is_required() {
            out.push(Violation::new(field, Rule::Required, format!("{} must not be blank", field)));
        }
        return;
    }
    let len = s.chars().count();
    if let Some(max) = rule.max_length {
        if len > max as usize {
            out.push(Violation::new(
                field,
                Rule::MaxLength,
                format!("{} must be at most {} characters", field, max),
            ));
        }
    }
    if let Some(min) = rule.min_length {
        if len < min as usize {
            out.push(Violation::new(
                field,
                Rule::MinLength,
                format!("{} must be at least {} characters", field, min),
            ));
        }
    }
    if let Some(format) = rule.format {
        let (re, what) = match format {
            Format::Email => (&*EMAIL, "email address"),
            Format::Url => (&*URL, "http(s) URL"),
        };
        if !re.is_match(s) {
            out.push(Violation::new(field, Rule::Format, format!("{} must be a valid {}", field, what)));
        }
    }
    if let Some(allowed) = rule.allowed {
        if !allowed.iter().any(|a| *a == s) {
            out.push(Violation::new(
                field,
                Rule::Allowed,
                format!("{} must be one of: {}", field, allowed.join(", ")),
            ));
        }
    }
}

fn check_decimal(field: &str, d: Decimal, col: &ColumnDef, out: &mut Vec<Violation>) {
    if let Some(max_scale) = col.rule.scale {
        if d.normalize().scale() > max_scale {
            out.push(Violation::new(
                field,
                Rule::Scale,
                format!("{} must have at most {} decimal places", field, max_scale),
            ));
        }
    }
    if let Some(n) = d.to_f64() {
        check_range(field, n, col, out);
    }
}

fn check_range(field: &str, n: f64, col: &ColumnDef, out: &mut Vec<Violation>) {
    if let Some(min) = col.rule.minimum {
        if n < min {
            out.push(Violation::new(field, Rule::Minimum, format!("{} must be at least {}", field, min)));
        }
    }
    if let Some(max) = col.rule.maximum {
        if n > max {
            out.push(Violation::new(field, Rule::Maximum, format!("{} must be at most {}", field, max)));
        }
    }
}

fn integer_value(v: &Value, ty: ColumnType) -> Option<i64> {
    let n = v.as_i64()?;
    match ty {
        ColumnType::Integer => i32::try_from(n).ok().map(i64::from),
        _ => Some(n),
    }
}

/// Accepts JSON numbers and decimal strings ("19.99"), exactly as the body decoder will.
fn decimal_value(v: &Value) -> Option<Decimal> {
    match v {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, Customer, Delivery, Entity, Manufacturer, Product, Purchase};
    use serde_json::json;

    fn violations(body: Value, schema: &EntitySchema) -> Vec<Violation> {
        let Value::Object(map) = body else { panic!("object body") };
        match RequestValidator::validate(&map, schema) {
            Ok(()) => Vec::new(),
            Err(AppError::Validation(v)) => v,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    fn fields_and_rules(v: &[Violation]) -> Vec<(&str, Rule)> {
        v.iter().map(|v| (v.field.as_str(), v.rule)).collect()
    }

    #[test]
    fn category_with_empty_name_is_rejected() {
        let v = violations(json!({ "name": "" }), Category::schema());
        assert_eq!(fields_and_rules(&v), vec![("name", Rule::Required)]);

        let v = violations(json!({}), Category::schema());
        assert_eq!(fields_and_rules(&v), vec![("name", Rule::Required)]);

        assert!(violations(json!({ "name": "Liquids" }), Category::schema()).is_empty());
    }

    #[test]
    fn customer_with_malformed_email_is_rejected() {
        let v = violations(json!({ "name": "Ann", "email": "ann.example.com" }), Customer::schema());
        assert_eq!(fields_and_rules(&v), vec![("email", Rule::Format)]);

        let ok = json!({ "name": "Ann", "email": "ann@example.com", "phone": null });
        assert!(violations(ok, Customer::schema()).is_empty());
    }

    #[test]
    fn product_with_negative_price_is_rejected() {
        let body = json!({ "manufacturerId": 1, "name": "Pod", "price": -0.01 });
        let v = violations(body, Product::schema());
        assert_eq!(fields_and_rules(&v), vec![("price", Rule::Minimum)]);

        let body = json!({ "manufacturerId": 1, "name": "Pod", "price": "12.50" });
        assert!(violations(body, Product::schema()).is_empty());

        let body = json!({ "manufacturerId": 1, "name": "Pod", "price": "cheap" });
        assert_eq!(fields_and_rules(&violations(body, Product::schema())), vec![("price", Rule::Type)]);
    }

    #[test]
    fn product_price_beyond_two_decimals_is_rejected() {
        for price in [json!("1.999"), json!(1.999), json!("0.001")] {
            let body = json!({ "manufacturerId": 1, "name": "Pod", "price": price });
            let v = violations(body, Product::schema());
            assert_eq!(fields_and_rules(&v), vec![("price", Rule::Scale)], "{price}");
        }
        // trailing zeros do not count against the scale
        let body = json!({ "manufacturerId": 1, "name": "Pod", "price": "1.500" });
        assert!(violations(body, Product::schema()).is_empty());
    }

    #[test]
    fn padded_decimal_strings_are_type_errors() {
        let body = json!({ "manufacturerId": 1, "name": "Pod", "price": " 12.50 " });
        assert_eq!(fields_and_rules(&violations(body, Product::schema())), vec![("price", Rule::Type)]);
    }

    #[test]
    fn nul_characters_in_text_are_rejected() {
        let v = violations(json!({ "name": "Liq\0uids" }), Category::schema());
        assert_eq!(fields_and_rules(&v), vec![("name", Rule::Type)]);
    }

    #[test]
    fn purchase_quantity_must_be_positive() {
        for qty in [0, -3] {
            let body = json!({ "customerId": 1, "storeId": 1, "productId": 1, "quantity": qty });
            let v = violations(body, Purchase::schema());
            assert_eq!(fields_and_rules(&v), vec![("quantity", Rule::Minimum)]);
        }
        let body = json!({ "customerId": 1, "storeId": 1, "productId": 1, "quantity": 2.5 });
        assert_eq!(fields_and_rules(&violations(body, Purchase::schema())), vec![("quantity", Rule::Type)]);
    }

    #[test]
    fn all_violations_are_reported_together() {
        let body = json!({ "customerId": 0, "address": 12, "status": "lost" });
        let v = violations(body, Delivery::schema());
        assert_eq!(
            fields_and_rules(&v),
            vec![
                ("customerId", Rule::Minimum),
                ("storeId", Rule::Required),
                ("address", Rule::Type),
                ("status", Rule::Allowed),
            ]
        );
    }

    #[test]
    fn optional_fields_are_checked_only_when_present() {
        assert!(violations(json!({ "name": "Acme" }), Manufacturer::schema()).is_empty());
        let body = json!({ "name": "Acme", "website": "acme dot com", "country": "x".repeat(101) });
        let v = violations(body, Manufacturer::schema());
        assert_eq!(
            fields_and_rules(&v),
            vec![("country", Rule::MaxLength), ("website", Rule::Format)]
        );
    }
}

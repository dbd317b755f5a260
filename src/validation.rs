use serde_json::Value;

use crate::timer::parse_end_date;

/// Validate a prizes payload before it reaches storage.
/// Returns all validation errors at once (not just the first).
pub fn validate_prizes(payload: &Value) -> Result<(), Vec<String>> {
    let Some(prizes) = payload.as_array() else {
        return Err(vec!["prizes: must be an array".to_string()]);
    };

    let mut errors = Vec::new();

    for (i, prize) in prizes.iter().enumerate() {
        let Some(prize) = prize.as_object() else {
            errors.push(format!("prizes[{}]: must be an object", i));
            continue;
        };

        if !prize.get("position").is_some_and(Value::is_number) {
            errors.push(format!("prizes[{}].position: must be a number", i));
        }

        if !prize.get("description").is_some_and(Value::is_string) {
            errors.push(format!("prizes[{}].description: must be a string", i));
        }

        if !prize.get("value").is_some_and(Value::is_string) {
            errors.push(format!("prizes[{}].value: must be a string", i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a timer payload before it reaches storage.
/// Returns all validation errors at once (not just the first).
pub fn validate_timer(payload: &Value) -> Result<(), Vec<String>> {
    let Some(timer) = payload.as_object() else {
        return Err(vec!["timer: must be an object".to_string()]);
    };

    let mut errors = Vec::new();

    for field in ["title", "description", "endDate"] {
        let present = timer
            .get(field)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.is_empty());
        if !present {
            errors.push(format!("{}: must be a non-empty string", field));
        }
    }

    if let Some(end_date) = timer.get("endDate").and_then(Value::as_str) {
        if !end_date.is_empty() && parse_end_date(end_date).is_none() {
            errors.push(format!("endDate: invalid date '{}'", end_date));
        }
    }

    if !timer.get("isActive").is_some_and(Value::is_boolean) {
        errors.push("isActive: must be a boolean".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

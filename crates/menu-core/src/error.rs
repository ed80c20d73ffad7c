//! Domain errors

use thiserror::Error;
use validator::ValidationErrors;

/// Failures reported by storage adapters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("{kind} document not found: {id}")]
    NotFound { kind: String, id: String },

    #[error("Store transport error: {0}")]
    Transport(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation error on [{}]: {message}", fields.join(", "))]
    Validation { fields: Vec<String>, message: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn validation(field: &str, message: &str) -> Self {
        DomainError::Validation {
            fields: vec![field.to_string()],
            message: message.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound { .. })
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, id } => DomainError::NotFound { kind, id },
            StoreError::Transport(msg) => DomainError::Transport(msg),
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        let mut entries: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let field = camel_case(&field);
                let message = errs
                    .iter()
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| format!("{} is invalid", field));
                (field, message)
            })
            .collect();
        entries.sort();

        let (fields, messages): (Vec<String>, Vec<String>) = entries.into_iter().unzip();
        DomainError::Validation {
            fields,
            message: messages.join("; "),
        }
    }
}

/// Wire names are camelCase while struct fields are snake_case.
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("category_id"), "categoryId");
        assert_eq!(camel_case("price"), "price");
    }

    #[test]
    fn test_store_error_conversion() {
        let err: DomainError = StoreError::NotFound {
            kind: "menu".to_string(),
            id: "42".to_string(),
        }
        .into();
        assert!(err.is_not_found());

        let err: DomainError = StoreError::Transport("quota exceeded".to_string()).into();
        assert_eq!(err, DomainError::Transport("quota exceeded".to_string()));
    }
}

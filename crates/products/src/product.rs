use validator::{Validate, ValidationErrors};

use catalog_core::{DomainError, DomainResult, Entity, ProductId};

/// Upper bound on a product name, in characters.
pub const NAME_MAX_LEN: usize = 100;

/// Upper bound on a product description, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// Catalog record: a product with a name, a unit price and an optional description.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: f64,
    description: Option<String>,
}

impl Product {
    /// Build a new product from an already-validated draft.
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            price: draft.price,
            description: draft.description,
        }
    }

    /// Rebuild a product from stored columns (no validation).
    pub fn restore(id: ProductId, name: String, price: f64, description: Option<String>) -> Self {
        Self {
            id,
            name,
            price,
            description,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Replace every mutable field with the draft's values (full-record update).
    pub fn replace_with(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.price = draft.price;
        self.description = draft.description;
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Client-supplied product fields, before an identifier is assigned.
///
/// Used for both create and full-record update.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ProductDraft {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(range(exclusive_min = 0.0, message = "price must be greater than 0"))]
    pub price: f64,

    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    pub description: Option<String>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            price,
            description,
        }
    }

    /// Normalize and validate the draft.
    ///
    /// The name is trimmed and a blank description becomes `None` before the
    /// rules run, so `"   "` is rejected as an empty name.
    pub fn validated(self) -> DomainResult<Self> {
        let draft = self.normalized();

        let mut problems = match draft.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => describe(&errors),
        };

        if !draft.price.is_finite() {
            problems.push("price: price must be a finite number".to_string());
        }

        if problems.is_empty() {
            Ok(draft)
        } else {
            Err(DomainError::validation(problems.join("; ")))
        }
    }

    fn normalized(self) -> Self {
        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Self {
            name: self.name.trim().to_string(),
            price: self.price,
            description,
        }
    }
}

/// Flatten validator output into `field: message` entries, sorted by field.
fn describe(errors: &ValidationErrors) -> Vec<String> {
    let mut out: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter()
                .map(|e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{field}: {message}")
                })
                .collect::<Vec<_>>()
        })
        .collect();
    out.sort();
    out
}

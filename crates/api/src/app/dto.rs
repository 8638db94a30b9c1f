use serde::{Deserialize, Serialize};

use catalog_core::ProductId;
use catalog_products::{Product, ProductDraft};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductDto {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// Full-record replacement body for `PUT /api/product/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductDto {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

// -------------------------
// Mapping
// -------------------------

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id_typed(),
            name: p.name().to_string(),
            price: p.price(),
            description: p.description().map(str::to_string),
        }
    }
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self::from(&p)
    }
}

impl From<CreateProductDto> for ProductDraft {
    fn from(dto: CreateProductDto) -> Self {
        ProductDraft::new(dto.name, dto.price, dto.description)
    }
}

impl From<UpdateProductDto> for ProductDraft {
    fn from(dto: UpdateProductDto) -> Self {
        ProductDraft::new(dto.name, dto.price, dto.description)
    }
}

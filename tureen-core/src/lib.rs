//! Core library for tureen: ingredient catalog semantics, dish attribute
//! derivation, the dish authoring flow, and the typed API client.
//!
//! Everything here is server-independent. The server crate depends on the
//! derivation and vocabulary modules to keep dish attributes consistent;
//! the CLI drives the authoring flow and the client.

pub mod authoring;
pub mod client;
pub mod derivation;
pub mod error;
pub mod filters;
pub mod suggestions;
pub mod types;
pub mod vocab;

pub use authoring::{
    AuthoringSession, ClientPersist, DishDraft, DishPersist, DishWriter, IngredientSelection,
    SaveOutcome, StagedPersist,
};
pub use client::ApiClient;
pub use derivation::{derive_attributes, DerivedAttributes, IngredientAttributes};
pub use error::{ApiError, AuthoringError};
pub use filters::{NearbySearchRequest, NearbySearchResponse, SearchFilters};
pub use suggestions::suggest_categories;
pub use types::{AliasHit, DishIngredientLink, IngredientRef};
pub use vocab::IngredientFamily;

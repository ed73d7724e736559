//! Dish authoring: the form model behind the admin dish editor and the
//! onboarding wizard.
//!
//! One session type serves both, parameterized by a persist capability:
//! `ClientPersist` writes immediately through the API, `StagedPersist`
//! accumulates in memory until the owning restaurant exists.

mod direct;
mod draft;
mod fake;
mod selection;
mod session;
mod staged;

pub use direct::{ClientPersist, DishWriter};
pub use draft::DishDraft;
pub use fake::{FakeWriter, WriterCall};
pub use selection::{IngredientSelection, SelectedIngredient};
pub use session::{AuthoringSession, DishPersist, SaveOutcome};
pub use staged::{StagedDish, StagedOutcome, StagedPersist};

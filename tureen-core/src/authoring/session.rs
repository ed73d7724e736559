//! The dish authoring session: one form, two persistence modes.
//!
//! The session owns the draft and the ingredient selection and is
//! parameterized by a persist capability. Direct mode supplies the real
//! write path (`ClientPersist`); wizard mode supplies an in-memory
//! accumulator (`StagedPersist`) because no dish id exists yet during
//! onboarding.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AuthoringError;
use crate::types::{AliasHit, DishIngredientLink};

use super::draft::DishDraft;
use super::selection::IngredientSelection;

/// Outcome of a dish submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// Scalar record and ingredient links both written.
    Saved { dish_id: Uuid },
    /// Scalar record written, but the link write failed. The dish is not
    /// rolled back; its links may be stale until the form is re-submitted.
    SavedWithWarning { dish_id: Uuid, warning: String },
    /// Held in memory for a later bulk submission; nothing was written.
    Staged,
}

/// Persistence capability supplied by the caller of an authoring session.
#[async_trait]
pub trait DishPersist: Send {
    /// Persist one submission: the draft plus its final ingredient
    /// selection, and the dish id when one already exists.
    async fn persist(
        &mut self,
        draft: &DishDraft,
        selection: &IngredientSelection,
        existing: Option<Uuid>,
    ) -> Result<SaveOutcome, AuthoringError>;
}

#[async_trait]
impl<P: DishPersist + ?Sized> DishPersist for &mut P {
    async fn persist(
        &mut self,
        draft: &DishDraft,
        selection: &IngredientSelection,
        existing: Option<Uuid>,
    ) -> Result<SaveOutcome, AuthoringError> {
        (**self).persist(draft, selection, existing).await
    }
}

/// One dish form in progress.
pub struct AuthoringSession<P: DishPersist> {
    persist: P,
    draft: DishDraft,
    selection: IngredientSelection,
    dish_id: Option<Uuid>,
}

impl<P: DishPersist> AuthoringSession<P> {
    /// Open the form for a new dish.
    pub fn new(persist: P, draft: DishDraft) -> Self {
        Self {
            persist,
            draft,
            selection: IngredientSelection::new(),
            dish_id: None,
        }
    }

    /// Open the form for an existing dish, seeding the ingredient selection
    /// from its current link rows.
    pub fn for_existing(
        persist: P,
        dish_id: Uuid,
        draft: DishDraft,
        links: &[DishIngredientLink],
    ) -> Self {
        Self {
            persist,
            draft,
            selection: IngredientSelection::from_links(links),
            dish_id: Some(dish_id),
        }
    }

    pub fn draft(&self) -> &DishDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut DishDraft {
        &mut self.draft
    }

    pub fn selection(&self) -> &IngredientSelection {
        &self.selection
    }

    /// Add a search hit to the selection.
    pub fn pick(&mut self, hit: &AliasHit, quantity: Option<String>) {
        self.selection.pick(hit, quantity);
    }

    /// Remove an ingredient from the selection by canonical id.
    pub fn unpick(&mut self, canonical_ingredient_id: Uuid) -> bool {
        self.selection.unpick(canonical_ingredient_id)
    }

    pub fn set_quantity(&mut self, canonical_ingredient_id: Uuid, quantity: Option<String>) -> bool {
        self.selection.set_quantity(canonical_ingredient_id, quantity)
    }

    /// The dish id, once one exists (pre-existing or assigned by a save).
    pub fn dish_id(&self) -> Option<Uuid> {
        self.dish_id
    }

    /// Submit the form. Validation runs first, before anything is written
    /// or staged; the persist capability then sees the draft together with
    /// the final selection, and the outcome is only reported once both
    /// steps it performs are done.
    pub async fn submit(&mut self) -> Result<SaveOutcome, AuthoringError> {
        self.draft.validate()?;

        let outcome = self
            .persist
            .persist(&self.draft, &self.selection, self.dish_id)
            .await?;

        match &outcome {
            SaveOutcome::Saved { dish_id } | SaveOutcome::SavedWithWarning { dish_id, .. } => {
                self.dish_id = Some(*dish_id);
            }
            SaveOutcome::Staged => {}
        }
        Ok(outcome)
    }

    /// Hand back the persist capability, e.g. to drain a staging buffer.
    pub fn into_persist(self) -> P {
        self.persist
    }
}

//! Wizard-mode persistence: stage dishes in memory, write them later.
//!
//! During multi-step restaurant onboarding, dishes are authored before the
//! restaurant (and so any dish id) exists. The staging buffer holds each
//! draft together with its ingredient selection; nothing touches the
//! network until the bulk submission, which runs the same ordered write
//! path as a direct save for every staged dish.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AuthoringError;

use super::direct::{write_dish_with_links, DishWriter};
use super::draft::DishDraft;
use super::selection::IngredientSelection;
use super::session::{DishPersist, SaveOutcome};

/// One dish held in the staging buffer.
#[derive(Debug, Clone)]
pub struct StagedDish {
    pub draft: DishDraft,
    pub selection: IngredientSelection,
}

/// Per-dish result of the bulk submission.
#[derive(Debug)]
pub struct StagedOutcome {
    pub dish_name: String,
    pub outcome: Result<SaveOutcome, AuthoringError>,
}

/// In-memory persist capability for wizard mode. One buffer per menu
/// section: the bulk submission assigns a single restaurant and menu
/// section id to everything it drains.
#[derive(Debug, Default)]
pub struct StagedPersist {
    staged: Vec<StagedDish>,
}

impl StagedPersist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staged(&self) -> &[StagedDish] {
        &self.staged
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Drain the buffer through the real write path, now that the
    /// restaurant and menu section exist.
    ///
    /// Each staged dish is created and linked independently; one dish
    /// failing does not stop the rest. Outcomes come back in staging order.
    pub async fn submit_staged<W: DishWriter>(
        self,
        writer: &W,
        restaurant_id: Uuid,
        menu_category_id: Uuid,
    ) -> Vec<StagedOutcome> {
        let mut outcomes = Vec::with_capacity(self.staged.len());
        for StagedDish {
            mut draft,
            selection,
        } in self.staged
        {
            draft.restaurant_id = Some(restaurant_id);
            draft.menu_category_id = Some(menu_category_id);
            let dish_name = draft.name.clone();
            let outcome = write_dish_with_links(writer, &draft, &selection, None).await;
            outcomes.push(StagedOutcome { dish_name, outcome });
        }
        outcomes
    }
}

#[async_trait]
impl DishPersist for StagedPersist {
    async fn persist(
        &mut self,
        draft: &DishDraft,
        selection: &IngredientSelection,
        _existing: Option<Uuid>,
    ) -> Result<SaveOutcome, AuthoringError> {
        self.staged.push(StagedDish {
            draft: draft.clone(),
            selection: selection.clone(),
        });
        Ok(SaveOutcome::Staged)
    }
}

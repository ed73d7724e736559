//! End-to-end tests of the dish authoring flow against a fake writer.

use uuid::Uuid;

use tureen_core::authoring::{
    AuthoringSession, ClientPersist, DishDraft, FakeWriter, SaveOutcome, StagedPersist, WriterCall,
};
use tureen_core::error::AuthoringError;
use tureen_core::types::{AliasHit, DishIngredientLink};

fn alias_hit(display_name: &str, canonical_id: Uuid, canonical_name: &str) -> AliasHit {
    AliasHit {
        alias_id: Uuid::new_v4(),
        display_name: display_name.to_string(),
        canonical_ingredient_id: canonical_id,
        canonical_name: canonical_name.to_string(),
        ingredient_family: "produce".to_string(),
        is_vegetarian: true,
        is_vegan: true,
    }
}

fn direct_draft(name: &str, price_cents: i32) -> DishDraft {
    let mut draft = DishDraft::new(name, price_cents);
    draft.restaurant_id = Some(Uuid::new_v4());
    draft.menu_category_id = Some(Uuid::new_v4());
    draft
}

#[tokio::test]
async fn direct_save_orders_scalar_write_before_link_write() {
    let fake = FakeWriter::new();
    let mut session = AuthoringSession::new(
        ClientPersist::new(&fake),
        direct_draft("Caesar Salad", 1250),
    );

    let egg = Uuid::new_v4();
    session.pick(&alias_hit("Eggs", egg, "egg"), Some("2".to_string()));
    session.pick(&alias_hit("Romaine Lettuce", Uuid::new_v4(), "romaine"), None);

    let outcome = session.submit().await.unwrap();
    let dish_id = match outcome {
        SaveOutcome::Saved { dish_id } => dish_id,
        other => panic!("expected Saved, got {:?}", other),
    };

    assert_eq!(
        fake.calls(),
        vec![
            WriterCall::CreateDish {
                name: "Caesar Salad".to_string()
            },
            WriterCall::SetIngredients { dish_id, count: 2 },
        ]
    );
    let links = fake.links_for(dish_id).unwrap();
    assert_eq!(links[0].canonical_ingredient_id, egg);
    assert_eq!(links[0].quantity, Some("2".to_string()));
}

#[tokio::test]
async fn link_write_failure_surfaces_warning_not_rollback() {
    let fake = FakeWriter::failing_link_writes();
    let mut session = AuthoringSession::new(
        ClientPersist::new(&fake),
        direct_draft("Margherita", 1100),
    );
    session.pick(&alias_hit("Mozzarella", Uuid::new_v4(), "mozzarella"), None);

    let outcome = session.submit().await.unwrap();
    match outcome {
        SaveOutcome::SavedWithWarning { dish_id, warning } => {
            // The dish record persisted even though the links did not.
            assert!(fake.dish(dish_id).is_some());
            assert!(fake.links_for(dish_id).is_none());
            assert!(warning.contains("ingredient links"));
            assert_eq!(session.dish_id(), Some(dish_id));
        }
        other => panic!("expected SavedWithWarning, got {:?}", other),
    }
}

#[tokio::test]
async fn scalar_write_failure_is_an_error() {
    let fake = FakeWriter::failing_dish_writes();
    let mut session =
        AuthoringSession::new(ClientPersist::new(&fake), direct_draft("Pad Thai", 1350));

    let result = session.submit().await;
    assert!(matches!(result, Err(AuthoringError::DishWrite(_))));
    // The link write never ran.
    assert_eq!(fake.calls().len(), 1);
    assert_eq!(fake.dish_count(), 0);
}

#[tokio::test]
async fn validation_failure_issues_no_calls() {
    let fake = FakeWriter::new();
    let mut session = AuthoringSession::new(ClientPersist::new(&fake), direct_draft("", 1250));

    let result = session.submit().await;
    assert!(matches!(result, Err(AuthoringError::Validation(_))));
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn empty_selection_still_runs_the_link_replacement() {
    let fake = FakeWriter::new();
    let mut session =
        AuthoringSession::new(ClientPersist::new(&fake), direct_draft("Plain Rice", 400));

    let outcome = session.submit().await.unwrap();
    let SaveOutcome::Saved { dish_id } = outcome else {
        panic!("expected Saved");
    };

    // Clearing down to an empty selection must still reach the writer so the
    // derived attributes converge.
    assert_eq!(
        fake.calls()[1],
        WriterCall::SetIngredients { dish_id, count: 0 }
    );
    assert_eq!(fake.links_for(dish_id), Some(vec![]));
}

#[tokio::test]
async fn editing_an_existing_dish_updates_in_place() {
    let fake = FakeWriter::new();

    // Seed an existing dish through the direct path.
    let mut create = AuthoringSession::new(
        ClientPersist::new(&fake),
        direct_draft("Caesar Salad", 1250),
    );
    let egg = Uuid::new_v4();
    create.pick(&alias_hit("Eggs", egg, "egg"), None);
    let SaveOutcome::Saved { dish_id } = create.submit().await.unwrap() else {
        panic!("expected Saved");
    };
    let persist = create.into_persist();

    // Re-open it, seeding the selection from its link rows.
    let links = vec![DishIngredientLink {
        canonical_ingredient_id: egg,
        canonical_name: "egg".to_string(),
        ingredient_family: "egg".to_string(),
        is_vegetarian: true,
        is_vegan: false,
        quantity: None,
        aliases: vec!["Hen Eggs".to_string(), "Eggs".to_string()],
    }];
    let mut edit = AuthoringSession::for_existing(
        persist,
        dish_id,
        direct_draft("Caesar Salad", 1450),
        &links,
    );
    assert_eq!(edit.selection().items()[0].display_name, "Eggs");

    let outcome = edit.submit().await.unwrap();
    assert_eq!(outcome, SaveOutcome::Saved { dish_id });

    let calls = fake.calls();
    assert_eq!(calls[2], WriterCall::UpdateDish { dish_id });
    assert_eq!(calls[3], WriterCall::SetIngredients { dish_id, count: 1 });
    assert_eq!(fake.dish(dish_id).unwrap().price_cents, 1450);
    // Unchanged selection resubmits the same canonical set.
    assert_eq!(
        fake.links_for(dish_id).unwrap()[0].canonical_ingredient_id,
        egg
    );
}

#[tokio::test]
async fn wizard_mode_issues_no_calls_until_bulk_submission() {
    let fake = FakeWriter::new();
    let mut staging = StagedPersist::new();

    for (name, price) in [("Bruschetta", 650), ("Carbonara", 1400)] {
        let mut session = AuthoringSession::new(&mut staging, DishDraft::new(name, price));
        session.pick(&alias_hit("Tomato", Uuid::new_v4(), "tomato"), None);
        assert_eq!(session.submit().await.unwrap(), SaveOutcome::Staged);
    }

    assert_eq!(staging.len(), 2);
    assert!(fake.calls().is_empty());

    let outcomes = staging
        .submit_staged(&fake, Uuid::new_v4(), Uuid::new_v4())
        .await;
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].dish_name, "Bruschetta");
    for staged in &outcomes {
        assert!(matches!(
            staged.outcome,
            Ok(SaveOutcome::Saved { .. })
        ));
    }
    // Two dishes, each created then linked.
    assert_eq!(fake.calls().len(), 4);
    assert_eq!(fake.dish_count(), 2);
}

#[tokio::test]
async fn bulk_submission_surfaces_per_dish_warnings() {
    let fake = FakeWriter::failing_link_writes();
    let mut staging = StagedPersist::new();

    let mut session = AuthoringSession::new(&mut staging, DishDraft::new("Ramen", 1500));
    session.pick(&alias_hit("Pork Belly", Uuid::new_v4(), "pork"), None);
    session.submit().await.unwrap();

    let outcomes = staging
        .submit_staged(&fake, Uuid::new_v4(), Uuid::new_v4())
        .await;
    assert!(matches!(
        outcomes[0].outcome,
        Ok(SaveOutcome::SavedWithWarning { .. })
    ));
}

#[tokio::test]
async fn one_failing_staged_dish_does_not_stop_the_rest() {
    let fake = FakeWriter::failing_dish_named("Mystery Special");
    let mut staging = StagedPersist::new();

    for draft in [
        DishDraft::new("Gyoza", 700),
        DishDraft::new("Mystery Special", 900),
        DishDraft::new("Katsu Curry", 1600),
    ] {
        let mut session = AuthoringSession::new(&mut staging, draft);
        session.submit().await.unwrap();
    }

    assert_eq!(staging.len(), 3);
    let outcomes = staging
        .submit_staged(&fake, Uuid::new_v4(), Uuid::new_v4())
        .await;
    assert_eq!(outcomes.len(), 3);
    assert!(matches!(outcomes[0].outcome, Ok(SaveOutcome::Saved { .. })));
    assert!(matches!(
        outcomes[1].outcome,
        Err(AuthoringError::DishWrite(_))
    ));
    assert!(matches!(outcomes[2].outcome, Ok(SaveOutcome::Saved { .. })));
    assert_eq!(fake.dish_count(), 2);
}

//! Recomputation of the derived dish columns.
//!
//! `dishes.allergens` and `dishes.dietary_tags` always equal the derivation
//! over the dish's current ingredient links. Every write path that can change
//! that input (link replacement, canonical-ingredient attribute edits) calls
//! into here from inside its own transaction, so readers never observe a dish
//! whose stored attributes disagree with its links.

use std::collections::HashMap;

use diesel::prelude::*;
use tureen_core::derivation::{derive_attributes, IngredientAttributes};
use uuid::Uuid;

use crate::schema::{canonical_ingredients, dish_ingredients, dishes, ingredient_allergens};

/// Load the derivation inputs for every ingredient linked to `dish_id`.
fn load_linked_attributes(
    conn: &mut PgConnection,
    dish_id: Uuid,
) -> Result<Vec<IngredientAttributes>, diesel::result::Error> {
    let flags: Vec<(Uuid, bool, bool)> = dish_ingredients::table
        .inner_join(canonical_ingredients::table)
        .filter(dish_ingredients::dish_id.eq(dish_id))
        .select((
            canonical_ingredients::id,
            canonical_ingredients::is_vegetarian,
            canonical_ingredients::is_vegan,
        ))
        .load(conn)?;

    let ingredient_ids: Vec<Uuid> = flags.iter().map(|(id, _, _)| *id).collect();

    let codes: Vec<(Uuid, String)> = ingredient_allergens::table
        .filter(ingredient_allergens::canonical_ingredient_id.eq_any(&ingredient_ids))
        .select((
            ingredient_allergens::canonical_ingredient_id,
            ingredient_allergens::allergen_code,
        ))
        .load(conn)?;

    let mut codes_by_ingredient: HashMap<Uuid, Vec<String>> = HashMap::new();
    for (ingredient_id, code) in codes {
        codes_by_ingredient
            .entry(ingredient_id)
            .or_default()
            .push(code);
    }

    Ok(flags
        .into_iter()
        .map(|(id, is_vegetarian, is_vegan)| IngredientAttributes {
            is_vegetarian,
            is_vegan,
            allergens: codes_by_ingredient.remove(&id).unwrap_or_default(),
        })
        .collect())
}

/// Recompute and store the derived columns for one dish.
///
/// Must run inside the transaction of the write that changed the dish's link
/// set, so the update lands atomically with that write.
pub fn refresh_dish_attributes(
    conn: &mut PgConnection,
    dish_id: Uuid,
) -> Result<(), diesel::result::Error> {
    let linked = load_linked_attributes(conn, dish_id)?;
    let derived = derive_attributes(&linked);

    let allergens: Vec<Option<String>> = derived.allergens.into_iter().map(Some).collect();
    let dietary_tags: Vec<Option<String>> = derived.dietary_tags.into_iter().map(Some).collect();

    diesel::update(dishes::table.find(dish_id))
        .set((
            dishes::allergens.eq(allergens),
            dishes::dietary_tags.eq(dietary_tags),
        ))
        .execute(conn)?;

    Ok(())
}

/// Recompute the derived columns of every live dish linking the given
/// ingredient. Returns how many dishes were refreshed.
///
/// Used when a canonical ingredient's own attributes change, which silently
/// changes the derivation input of every dish linking it.
pub fn refresh_dishes_linking_ingredient(
    conn: &mut PgConnection,
    canonical_ingredient_id: Uuid,
) -> Result<usize, diesel::result::Error> {
    let dish_ids: Vec<Uuid> = dish_ingredients::table
        .inner_join(dishes::table)
        .filter(dish_ingredients::canonical_ingredient_id.eq(canonical_ingredient_id))
        .filter(dishes::deleted_at.is_null())
        .select(dish_ingredients::dish_id)
        .load(conn)?;

    for dish_id in &dish_ids {
        refresh_dish_attributes(conn, *dish_id)?;
    }

    Ok(dish_ids.len())
}

use anyhow::{bail, Result};
use tureen_core::{AliasHit, ApiClient};

/// Pick the best hit for an operator-supplied query: an exact display-name
/// or canonical-name match wins (case-insensitive), otherwise the first hit
/// in the server's alphabetical order.
fn best_hit<'a>(query: &str, hits: &'a [AliasHit]) -> Option<&'a AliasHit> {
    let lowered = query.trim().to_lowercase();
    hits.iter()
        .find(|hit| {
            hit.display_name.to_lowercase() == lowered
                || hit.canonical_name.to_lowercase() == lowered
        })
        .or_else(|| hits.first())
}

/// Resolve an ingredient query against the alias search endpoint.
pub async fn resolve_ingredient(client: &ApiClient, query: &str) -> Result<AliasHit> {
    let hits = client.search_ingredients(query, None).await?;
    match best_hit(query, &hits) {
        Some(hit) => Ok(hit.clone()),
        None => bail!("No ingredient alias matches '{}'", query),
    }
}

#[cfg(test)]
mod tests {
    use super::best_hit;
    use tureen_core::AliasHit;
    use uuid::Uuid;

    fn hit(display_name: &str, canonical_name: &str) -> AliasHit {
        AliasHit {
            alias_id: Uuid::new_v4(),
            display_name: display_name.to_string(),
            canonical_ingredient_id: Uuid::new_v4(),
            canonical_name: canonical_name.to_string(),
            ingredient_family: "produce".to_string(),
            is_vegetarian: true,
            is_vegan: true,
        }
    }

    #[test]
    fn test_exact_display_match_beats_order() {
        let hits = vec![hit("Egg Noodles", "egg_noodle"), hit("Eggs", "egg")];
        // Prefix search for "eggs" would list "Egg Noodles" first.
        assert_eq!(best_hit("eggs", &hits).unwrap().canonical_name, "egg");
    }

    #[test]
    fn test_falls_back_to_first_hit() {
        let hits = vec![hit("Romaine Lettuce", "romaine_lettuce")];
        assert_eq!(
            best_hit("romaine", &hits).unwrap().canonical_name,
            "romaine_lettuce"
        );
    }

    #[test]
    fn test_no_hits() {
        assert!(best_hit("durian", &[]).is_none());
    }
}

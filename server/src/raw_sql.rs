//! Raw SQL fragments that can't be expressed in Diesel's type-safe DSL.
//!
//! # Safety
//!
//! All SQL in this module has been reviewed for SQL injection safety:
//! - User input is ALWAYS passed via `.bind()` parameters
//! - No string concatenation or interpolation with user data
//!
//! When adding new SQL here:
//! 1. Document why Diesel DSL can't be used
//! 2. Ensure all user input uses `.bind()`

use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::sql_types::BigInt;

/// Window function for counting total rows across the full result set.
///
/// Returns `COUNT(*) OVER()` which gives the total count before LIMIT/OFFSET.
/// Diesel doesn't support window functions natively.
///
/// # Safety
/// Static SQL string with no user input.
pub fn count_over() -> SqlLiteral<BigInt> {
    sql::<BigInt>("COUNT(*) OVER()")
}

/// Nearby-restaurant search: great-circle distance, optional filters, and a
/// window total, ordered nearest first.
///
/// Distance uses the haversine formula on a 6371 km sphere; `LEAST(1.0, ...)`
/// guards `acos` against floating-point drift just above 1. Optional filters
/// are passed as NULL to skip them. The dish-level filters (price band,
/// dietary tags, excluded allergens) are satisfied when at least one live,
/// available dish of the restaurant matches all of them; when none of those
/// binds are set the EXISTS probe is skipped entirely so restaurants without
/// dishes still appear.
///
/// Binds, in order:
/// `$1` latitude, `$2` longitude, `$3` radius km, `$4` limit,
/// `$5` cuisines (text[] or NULL), `$6` service types (text[] or NULL),
/// `$7` price min cents (or NULL), `$8` price max cents (or NULL),
/// `$9` dietary tags (text[] or NULL), `$10` excluded allergens (text[] or NULL).
///
/// # Safety
/// Every value above arrives via `.bind()`; the SQL itself is a static string.
///
/// # Why raw SQL?
/// Window functions, trigonometric expressions over bound parameters, and
/// array operators (`&&`, `@>`) on correlated subqueries are all outside
/// Diesel's DSL.
pub const NEARBY_RESTAURANTS_QUERY: &str = "\
    SELECT id, name, description, cuisine, address, latitude, longitude, \
           service_types, currency, distance_km, COUNT(*) OVER() AS total_count \
    FROM ( \
        SELECT r.id, r.name, r.description, r.cuisine, r.address, \
               r.latitude, r.longitude, r.service_types, r.currency, \
               6371.0 * acos(LEAST(1.0, \
                   cos(radians($1)) * cos(radians(r.latitude)) \
                   * cos(radians(r.longitude) - radians($2)) \
                   + sin(radians($1)) * sin(radians(r.latitude)))) AS distance_km \
        FROM restaurants r \
        WHERE r.deleted_at IS NULL \
          AND r.is_active \
          AND ($5 IS NULL OR r.cuisine = ANY($5)) \
          AND ($6 IS NULL OR r.service_types && $6) \
          AND (($7 IS NULL AND $8 IS NULL AND $9 IS NULL AND $10 IS NULL) \
               OR EXISTS ( \
                   SELECT 1 FROM dishes d \
                   WHERE d.restaurant_id = r.id \
                     AND d.deleted_at IS NULL \
                     AND d.is_available \
                     AND ($7 IS NULL OR d.price_cents >= $7) \
                     AND ($8 IS NULL OR d.price_cents <= $8) \
                     AND ($9 IS NULL OR d.dietary_tags @> $9) \
                     AND ($10 IS NULL OR NOT (d.allergens && $10)))) \
    ) within_reach \
    WHERE distance_km <= $3 \
    ORDER BY distance_km ASC \
    LIMIT $4";

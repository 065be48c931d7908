//! Integration tests for the villa repository.
//!
//! Exercises create / read / list-with-filters / update / delete against a
//! real database, plus the table's CHECK constraints.

use rust_decimal::Decimal;
use sqlx::PgPool;
use villa_db::models::villa::{VillaFilter, VillaInput};
use villa_db::repositories::VillaRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_villa(title: &str, city: &str, maximum_capacity: i32, price: i64) -> VillaInput {
    VillaInput {
        title: title.to_string(),
        city: city.to_string(),
        address: format!("1 {title} Road"),
        base_capacity: 2,
        maximum_capacity,
        area: 150.0,
        bed_count: 3,
        has_pool: true,
        has_cooling_system: false,
        base_price_per_night: Decimal::from(price),
        extra_person_price: Decimal::from(15),
        rating: 4.5,
    }
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_villa(pool: PgPool) {
    let input = new_villa("Sea Breeze", "Ramsar", 6, 120);
    let villa = VillaRepo::create(&pool, &input, "http://media/sea.jpg")
        .await
        .unwrap();

    assert_eq!(villa.title, "Sea Breeze");
    assert_eq!(villa.image_url, "http://media/sea.jpg");
    assert_eq!(villa.base_price_per_night, Decimal::from(120));

    let found = VillaRepo::find_by_id(&pool, villa.id).await.unwrap().unwrap();
    assert_eq!(found.id, villa.id);
    assert_eq!(found.maximum_capacity, 6);
    assert_eq!(found.rates().extra_person_price, Decimal::from(15));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_missing_villa_returns_none(pool: PgPool) {
    let found = VillaRepo::find_by_id(&pool, 999_999).await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_fields_and_keeps_image(pool: PgPool) {
    let villa = VillaRepo::create(&pool, &new_villa("Old", "Rasht", 4, 80), "http://media/a.jpg")
        .await
        .unwrap();

    let mut input = new_villa("New", "Kish", 8, 200);
    input.has_pool = false;
    let updated = VillaRepo::update(&pool, villa.id, &input, None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "New");
    assert_eq!(updated.city, "Kish");
    assert_eq!(updated.maximum_capacity, 8);
    assert!(!updated.has_pool);
    assert_eq!(updated.image_url, "http://media/a.jpg");
    assert!(updated.updated_at >= villa.updated_at);

    let updated = VillaRepo::update(&pool, villa.id, &input, Some("http://media/b.jpg"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.image_url, "http://media/b.jpg");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_villa_returns_none(pool: PgPool) {
    let result = VillaRepo::update(&pool, 424_242, &new_villa("X", "Y", 4, 10), None)
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_villa(pool: PgPool) {
    let villa = VillaRepo::create(&pool, &new_villa("Gone", "Rasht", 4, 80), "http://media/g.jpg")
        .await
        .unwrap();

    assert!(VillaRepo::delete(&pool, villa.id).await.unwrap());
    assert!(!VillaRepo::delete(&pool, villa.id).await.unwrap());
    assert!(VillaRepo::find_by_id(&pool, villa.id).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_are_conjunctive(pool: PgPool) {
    for (title, city, cap, price) in [
        ("A", "Ramsar", 4, 100),
        ("B", "Ramsar", 10, 100),
        ("C", "Ramsar", 10, 300),
        ("D", "Kish", 10, 100),
    ] {
        VillaRepo::create(&pool, &new_villa(title, city, cap, price), "http://media/x.jpg")
            .await
            .unwrap();
    }

    let all = VillaRepo::list(&pool, &VillaFilter::default()).await.unwrap();
    assert_eq!(all.len(), 4);

    let by_city = VillaRepo::list(
        &pool,
        &VillaFilter {
            city: Some("Ramsar".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_city.len(), 3);

    let combined = VillaRepo::list(
        &pool,
        &VillaFilter {
            city: Some("Ramsar".into()),
            min_capacity: Some(8),
            max_price: Some(Decimal::from(150)),
        },
    )
    .await
    .unwrap();
    let titles: Vec<_> = combined.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["B"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filter_bounds_are_inclusive(pool: PgPool) {
    VillaRepo::create(&pool, &new_villa("Edge", "Kish", 6, 100), "http://media/e.jpg")
        .await
        .unwrap();

    let hits = VillaRepo::list(
        &pool,
        &VillaFilter {
            city: None,
            min_capacity: Some(6),
            max_price: Some(Decimal::from(100)),
        },
    )
    .await
    .unwrap();
    assert_eq!(hits.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_blank_city_matches_every_city(pool: PgPool) {
    for (title, city) in [("A", "Ramsar"), ("B", "Kish")] {
        VillaRepo::create(&pool, &new_villa(title, city, 6, 100), "http://media/x.jpg")
            .await
            .unwrap();
    }

    for blank in ["", "   "] {
        let hits = VillaRepo::list(
            &pool,
            &VillaFilter {
                city: Some(blank.into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(hits.len(), 2, "city={blank:?}");
    }
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_capacity_check_constraint(pool: PgPool) {
    let mut input = new_villa("Bad", "Kish", 4, 100);
    input.base_capacity = 5;

    let err = VillaRepo::create(&pool, &input, "http://media/bad.jpg")
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.constraint(), Some("ck_villas_capacity"));
}

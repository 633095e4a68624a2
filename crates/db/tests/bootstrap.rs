use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify seeded reference data.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    opdeck_db::health_check(&pool).await.unwrap();

    // Roles are seeded.
    let roles: Vec<(String,)> = sqlx::query_as("SELECT name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    let names: Vec<&str> = roles.iter().map(|r| r.0.as_str()).collect();
    assert_eq!(names, vec!["admin", "user", "guest"]);

    // Every catalog table carries seed data.
    let tables = [
        "characters",
        "special_cards",
        "mission_cards",
        "event_cards",
        "location_cards",
        "power_cards",
        "aspect_cards",
        "universe_cards",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 > 0, "{table} should have seed data, got 0 rows");
    }
}

/// The three reserve-bonus characters from the printed card data are seeded.
#[sqlx::test(migrations = "./migrations")]
async fn test_reserve_bonus_characters_seeded(pool: PgPool) {
    let rows: Vec<(String, i32, i32)> = sqlx::query_as(
        "SELECT name, threat_level, reserve_threat_bonus FROM characters
         WHERE reserve_threat_bonus > 0 ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(
        rows,
        vec![
            ("Carson of Venus".to_string(), 18, 1),
            ("Morgan le Fay".to_string(), 19, 1),
            ("Victory Harben".to_string(), 18, 2),
        ]
    );
}

//! Integration tests for camp persistence and listing.

use chrono::NaiveDate;
use screencamp_core::camp::CampFilter;
use screencamp_db::models::camp::CreateCamp;
use screencamp_db::repositories::CampRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_camp(name: &str, date: &str, district: &str) -> CreateCamp {
    CreateCamp {
        name: name.to_string(),
        date: Some(date.to_string()),
        venue: format!("{district} Community Hall"),
        state: "Karnataka".to_string(),
        district: district.to_string(),
        start_time: "09:00".to_string(),
        end_time: "15:00".to_string(),
        camp_type: "Breast".to_string(),
        contact: None,
        status: "upcoming".to_string(),
        cancer_types: vec!["Breast".to_string(), "Cervical".to_string()],
        slots: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_returns_generated_id_and_fields(pool: PgPool) {
    let input = new_camp("Pink October Drive", "2025-10-04", "Mysore");
    let camp = CampRepo::create(&pool, &input).await.unwrap();

    assert!(camp.id > 0);
    assert_eq!(camp.name, "Pink October Drive");
    assert_eq!(camp.date, NaiveDate::from_ymd_opt(2025, 10, 4).unwrap());
    assert_eq!(camp.cancer_types, vec!["Breast", "Cervical"]);
    assert_eq!(camp.status, "upcoming");
    assert!(camp.contact.is_none());

    let found = CampRepo::find_by_id(&pool, camp.id).await.unwrap();
    assert_eq!(found.map(|c| c.name), Some("Pink October Drive".to_string()));
}

#[sqlx::test(migrations = "./migrations")]
async fn list_is_sorted_by_date(pool: PgPool) {
    for (name, date) in [("C", "2025-06-01"), ("A", "2025-01-15"), ("B", "2025-03-20")] {
        CampRepo::create(&pool, &new_camp(name, date, "Hassan")).await.unwrap();
    }

    let camps = CampRepo::list(&pool, &CampFilter::default()).await.unwrap();
    let names: Vec<_> = camps.iter().map(|c| c.camp.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
    assert!(camps.windows(2).all(|w| w[0].camp.date <= w[1].camp.date));
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_by_search_and_district(pool: PgPool) {
    CampRepo::create(&pool, &new_camp("Oral Screening", "2025-02-01", "Udupi")).await.unwrap();
    CampRepo::create(&pool, &new_camp("Lung Check", "2025-02-02", "Mysore")).await.unwrap();
    CampRepo::create(&pool, &new_camp("100% Free Camp", "2025-02-03", "Udupi")).await.unwrap();

    let search = CampRepo::list(&pool, &CampFilter::new(Some("ORAL"), None, None))
        .await
        .unwrap();
    assert_eq!(search.len(), 1);
    assert_eq!(search[0].camp.name, "Oral Screening");

    // Matching on the venue, which embeds the district.
    let by_venue = CampRepo::list(&pool, &CampFilter::new(Some("mysore community"), None, None))
        .await
        .unwrap();
    assert_eq!(by_venue.len(), 1);

    let udupi = CampRepo::list(&pool, &CampFilter::new(None, Some("all"), Some("Udupi")))
        .await
        .unwrap();
    assert_eq!(udupi.len(), 2);

    // `%` in the search term is literal.
    let percent = CampRepo::list(&pool, &CampFilter::new(Some("0%"), None, None))
        .await
        .unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].camp.name, "100% Free Camp");
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_missing_camp_returns_false(pool: PgPool) {
    let camp = CampRepo::create(&pool, &new_camp("Keep", "2025-05-05", "Tumkur")).await.unwrap();

    assert!(!CampRepo::delete(&pool, camp.id + 1000).await.unwrap());
    let remaining = CampRepo::list(&pool, &CampFilter::default()).await.unwrap();
    assert_eq!(remaining.len(), 1);

    assert!(CampRepo::delete(&pool, camp.id).await.unwrap());
    assert!(!CampRepo::delete(&pool, camp.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn find_by_ids_skips_unknown(pool: PgPool) {
    let a = CampRepo::create(&pool, &new_camp("A", "2025-01-01", "Bellary")).await.unwrap();
    let found = CampRepo::find_by_ids(&pool, &[a.id, a.id + 99]).await.unwrap();
    assert_eq!(found.len(), 1);
    assert!(CampRepo::find_by_ids(&pool, &[]).await.unwrap().is_empty());
}

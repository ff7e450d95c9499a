mod common;

use chrono::{Duration, Utc};
use uuid::Uuid;

use bettings::db::tournament_repo::{self, TournamentFilter};

#[tokio::test]
async fn test_name_filter_matches_wildcard_characters_literally() {
    let pool = common::setup_test_db().await;
    let today = Utc::now().date_naive();
    let tag = Uuid::new_v4().simple().to_string();

    let exact = format!("Cup {tag} 50%_A");
    let lookalike = format!("Cup {tag} 500xA");
    for name in [&exact, &lookalike] {
        tournament_repo::create_tournament(&pool, name, today, today + Duration::days(10))
            .await
            .unwrap();
    }

    let filter = TournamentFilter {
        name: Some(format!("{tag} 50%_A")),
        ..Default::default()
    };
    let found = tournament_repo::list_tournaments(&pool, &filter, 10, 0).await.unwrap();

    let names: Vec<&str> = found.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec![exact.as_str()]);
}

#[tokio::test]
async fn test_name_filter_is_a_substring_match() {
    let pool = common::setup_test_db().await;
    let today = Utc::now().date_naive();
    let tag = Uuid::new_v4().simple().to_string();

    let name = format!("Premier {tag} League");
    tournament_repo::create_tournament(&pool, &name, today, today + Duration::days(10))
        .await
        .unwrap();

    let filter = TournamentFilter {
        name: Some(tag),
        ..Default::default()
    };
    let found = tournament_repo::list_tournaments(&pool, &filter, 10, 0).await.unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, name);
}

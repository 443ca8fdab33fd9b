use career_timeline::{build_career, BigClubs, DifficultyLevel, RawStint, SelfContainment};
use serde_json::json;

fn ronaldo_like() -> Vec<RawStint> {
    vec![
        RawStint::new("Real Madrid")
            .with_dates(Some("2009-07-01T00:00:00Z"), Some("2018-07-10T00:00:00Z"))
            .with_stats(Some(292), Some(311)),
        RawStint::new("Sporting CP")
            .with_dates(Some("2002-08-01T00:00:00Z"), Some("2003-08-12T00:00:00Z"))
            .with_stats(Some(25), Some(3)),
        RawStint::new("Manchester United")
            .with_dates(Some("2003-08-12T00:00:00Z"), Some("2009-07-01T00:00:00Z"))
            .with_stats(Some(196), Some(84)),
        RawStint::new("Juventus")
            .with_dates(Some("2018-07-10T00:00:00Z"), Some("2021-08-27T00:00:00Z")),
        RawStint::new("Al Nassr").with_dates(Some("2023-01-01T00:00:00Z"), None),
    ]
}

#[test]
fn test_record_serializes_to_client_shape() {
    let record = build_career(
        "Q11571",
        "Cristiano Ronaldo",
        &ronaldo_like(),
        SelfContainment::Include,
        &BigClubs::default(),
    );

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["id"], "Q11571");
    assert_eq!(value["name"], "Cristiano Ronaldo");
    assert_eq!(
        value["career"][0],
        json!({
            "team": "Sporting CP",
            "years": "2002–2003",
            "apps": 25,
            "goals": 3,
            "loan": false
        })
    );
    assert_eq!(value["career"][4]["years"], "2023–");
    assert_eq!(value["career"][3]["apps"], serde_json::Value::Null);

    // 5 clubs, last not big, first not big, big clubs present
    assert_eq!(value["difficulty"], json!({ "score": 65, "level": "Medium" }));
    assert_eq!(record.difficulty.level, DifficultyLevel::Medium);
}

#[test]
fn test_career_is_chronological() {
    let record = build_career(
        "Q1",
        "Someone",
        &ronaldo_like(),
        SelfContainment::Include,
        &BigClubs::default(),
    );
    let teams: Vec<_> = record.career.iter().map(|s| s.club_name.as_str()).collect();
    assert_eq!(
        teams,
        vec!["Sporting CP", "Manchester United", "Real Madrid", "Juventus", "Al Nassr"]
    );
    assert!(record.career.iter().all(|s| !s.loan));
}

#[test]
fn test_loan_spell_lowers_score() {
    let raw = vec![
        RawStint::new("Chelsea").with_dates(Some("2010-01-01"), Some("2016-06-30")),
        RawStint::new("Vitesse").with_dates(Some("2012-08-01"), Some("2013-06-30")),
    ];

    let record = build_career("Q2", "Loanee", &raw, SelfContainment::Include, &BigClubs::default());
    assert!(record.career[1].loan);
    // 50 - 10 + 20 + 15 - 5
    assert_eq!(record.difficulty.score, 70);
    assert_eq!(record.difficulty.level, DifficultyLevel::Easy);
}

#[test]
fn test_empty_career_still_scored() {
    let record = build_career("Q3", "Nobody", &[], SelfContainment::Include, &BigClubs::default());
    assert!(record.career.is_empty());
    assert_eq!(record.difficulty.score, 55);
}

#[test]
fn test_record_reads_back() {
    let record = build_career(
        "Q4",
        "Round Trip",
        &ronaldo_like(),
        SelfContainment::Include,
        &BigClubs::default(),
    );
    let text = serde_json::to_string(&record).unwrap();
    let parsed: career_timeline::CareerRecord = serde_json::from_str(&text).unwrap();

    // typed years are not serialized
    assert_eq!(parsed.career.len(), record.career.len());
    assert_eq!(parsed.career[0].years, record.career[0].years);
    assert_eq!(parsed.difficulty, record.difficulty);
}

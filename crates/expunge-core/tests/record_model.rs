//! # Record Model Scenarios
//!
//! End-to-end checks of the properties eligibility rules depend on:
//! statute rendering and matching, crime-level rendering, closed-set
//! validation, charge counting, and ingestion of whole records from
//! JSON and YAML.

use chrono::NaiveDate;
use expunge_core::{
    Case, CaseState, Charge, Client, CrimeLevel, Disposition, DispositionType, MatchPolicy,
    ModelError, Money, Statute,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn charge(name: &str, citation: &str, kind: DispositionType) -> Result<Charge, ModelError> {
    Ok(Charge::builder()
        .name(name)
        .statute(citation.parse()?)
        .level(CrimeLevel::new("Misdemeanor")?.with_class('A')?)
        .date(ymd(2010, 5, 1))
        .disposition(Disposition::new(kind, ymd(2010, 11, 15)))
        .build()?)
}

fn sample_client() -> Result<Client, ModelError> {
    let cases = vec![
        Case::new(
            vec![
                charge("Harassment", "166.065", DispositionType::Convicted)?,
                charge("Criminal Mischief", "164.345", DispositionType::Dismissed)?,
            ],
            CaseState::Open,
        ),
        Case::new(
            vec![charge("Offensive Littering", "164.805", DispositionType::Acquitted)?],
            CaseState::Closed,
        )
        .with_balance_due("75.25".parse()?),
    ];
    Ok(Client::new("Sam Client", ymd(1985, 9, 9), cases)?)
}

// ---------------------------------------------------------------------------
// Statutes
// ---------------------------------------------------------------------------

#[test]
fn statute_renderings() {
    let full = Statute::new(653)
        .with_subchapter(412)
        .with_section(5)
        .and_then(|s| s.with_subsection('c'))
        .unwrap();
    assert_eq!(Statute::new(653).with_subchapter(412).to_string(), "653.412");
    assert_eq!(full.to_string(), "653.412(5)(c)");
    assert_eq!(Statute::new(653).to_string(), "653");
}

#[test]
fn statute_partial_match() {
    let broad = Statute::new(653).with_subchapter(412);
    let c: Statute = "653.412(5)(c)".parse().unwrap();
    let d: Statute = "653.412(5)(d)".parse().unwrap();
    assert!(broad == c);
    assert!(c != d);
}

#[test]
fn statute_canonical_string_reparses() {
    for citation in ["653", "653.412", "653.412(5)", "653.412(5)(c)", "811.005(12b)"] {
        let statute: Statute = citation.parse().unwrap();
        assert_eq!(statute.to_string(), citation);
    }
}

#[test]
fn rule_table_lookup_by_policy() {
    let table: Vec<Statute> = ["475.864", "166.065", "653.412"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let client = sample_client().unwrap();

    let partial = MatchPolicy::partial();
    let hits = client
        .charges()
        .filter(|c| partial.find(c.statute(), &table).is_some())
        .count();
    assert_eq!(hits, 1);
}

// ---------------------------------------------------------------------------
// Crime levels and closed sets
// ---------------------------------------------------------------------------

#[test]
fn crime_level_renderings() {
    let felony = CrimeLevel::new("Felony").and_then(|l| l.with_class('A')).unwrap();
    assert_eq!(felony.to_string(), "Felony Class A");
    assert_eq!(CrimeLevel::new("Misdemeanor").unwrap().to_string(), "Misdemeanor");
}

#[test]
fn unknown_disposition_kind_fails() {
    let err = Disposition::parse("EXPUNGED", ymd(2020, 1, 1)).unwrap_err();
    let err: ModelError = err.into();
    assert!(matches!(err, ModelError::Disposition(_)));
}

#[test]
fn unknown_case_state_fails() {
    let err = "DORMANT".parse::<CaseState>().unwrap_err();
    let err: ModelError = err.into();
    assert!(matches!(err, ModelError::CaseState(_)));
}

// ---------------------------------------------------------------------------
// Counting and traversal
// ---------------------------------------------------------------------------

#[test]
fn client_without_cases_has_zero_charges() {
    let client = Client::new("Sam Client", ymd(1985, 9, 9), Vec::new()).unwrap();
    assert_eq!(client.num_charges(), 0);
}

#[test]
fn client_counts_charges_across_cases() {
    let client = sample_client().unwrap();
    assert_eq!(client.num_charges(), 3);
    assert_eq!(client.cases()[0].num_charges(), 2);
    assert_eq!(client.cases()[1].num_charges(), 1);
    assert_eq!(client.total_balance_due(), Money::from_cents(7_525));
}

#[test]
fn convictions_found_by_traversal() {
    let client = sample_client().unwrap();
    let convictions: Vec<_> = client
        .charges()
        .filter(|c| c.disposition().kind().is_conviction())
        .map(|c| c.statute().to_string())
        .collect();
    assert_eq!(convictions, ["166.065"]);
}

#[test]
fn model_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
    assert_send_sync::<Statute>();

    let client = std::sync::Arc::new(sample_client().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = std::sync::Arc::clone(&client);
            std::thread::spawn(move || client.num_charges())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 3);
    }
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

const RECORD_JSON: &str = r#"{
    "name": "Sam Client",
    "dob": "09/09/1985",
    "cases": [
        {
            "case_number": "10CR0001",
            "state": "CLOSED",
            "balance_due": 0.0,
            "charges": [
                {
                    "name": "Possession of Methamphetamine",
                    "statute": {"chapter": 475, "subchapter": 894, "section": 2, "subsection": "a"},
                    "level": {"type": "Felony", "class": "C"},
                    "date": "2010-05-01",
                    "disposition": {"type": "PROBATION_REVOKED", "date": "2011-02-03"}
                }
            ]
        }
    ]
}"#;

#[test]
fn ingest_json_record() {
    let client: Client = serde_json::from_str(RECORD_JSON).unwrap();
    assert_eq!(client.num_charges(), 1);
    let charge = &client.cases()[0].charges()[0];
    assert_eq!(charge.statute().to_string(), "475.894(2)(a)");
    assert_eq!(charge.level().to_string(), "Felony Class C");
    assert_eq!(charge.disposition().kind(), DispositionType::ProbationRevoked);
    assert!(!client.cases()[0].has_balance_due());
}

#[test]
fn ingest_yaml_record_matches_json() {
    let yaml = r#"
name: Sam Client
dob: "1985-09-09"
cases:
  - case_number: 10CR0001
    state: CLOSED
    charges:
      - name: Possession of Methamphetamine
        statute: "475.894(2)(a)"
        level:
          type: Felony
          class: C
        date: "05/01/2010"
        disposition:
          type: PROBATION_REVOKED
          date: "2011-02-03"
"#;
    let from_yaml: Client = serde_yaml::from_str(yaml).unwrap();
    let from_json: Client = serde_json::from_str(RECORD_JSON).unwrap();
    assert_eq!(from_yaml, from_json);
    assert_eq!(from_yaml.digest().unwrap(), from_json.digest().unwrap());
}

#[test]
fn ingest_rejects_negative_chapter() {
    let bad = RECORD_JSON.replace(r#""chapter": 475"#, r#""chapter": -475"#);
    let err = serde_json::from_str::<Client>(&bad).unwrap_err().to_string();
    assert!(err.contains("non-negative"), "{err}");
}

#[test]
fn ingest_rejects_negative_balance() {
    let bad = RECORD_JSON.replace(r#""balance_due": 0.0"#, r#""balance_due": -10.0"#);
    assert!(serde_json::from_str::<Client>(&bad).is_err());
}

#[test]
fn ingest_rejects_unknown_disposition() {
    let bad = RECORD_JSON.replace("PROBATION_REVOKED", "SET_ASIDE");
    let err = serde_json::from_str::<Client>(&bad).unwrap_err().to_string();
    assert!(err.contains("unknown disposition kind"), "{err}");
}

#[test]
fn ingest_rejects_misspelled_statute_component() {
    let bad = RECORD_JSON.replace(r#""section": 2"#, r#""sectoin": 2"#);
    let err = serde_json::from_str::<Client>(&bad).unwrap_err().to_string();
    assert!(err.contains("unknown field `sectoin`"), "{err}");
}

#[test]
fn misspelled_component_never_widens_a_citation() {
    let result = serde_json::from_str::<Statute>(r#"{"chapter":653,"subchapter":412,"sectoin":5}"#);
    assert!(result.is_err());
}

#[test]
fn ingest_rejects_misspelled_keys_at_every_level() {
    for (good, bad) in [
        (r#""balance_due""#, r#""balance""#),
        (r#""level""#, r#""lvl""#),
        (r#""class""#, r#""klass""#),
        (r#""cases""#, r#""kases""#),
    ] {
        let record = RECORD_JSON.replacen(good, bad, 1);
        assert!(serde_json::from_str::<Client>(&record).is_err(), "accepted {bad}");
    }
    let disposition = RECORD_JSON.replace(r#""date": "2011-02-03""#, r#""dated": "2011-02-03""#);
    assert!(serde_json::from_str::<Client>(&disposition).is_err());
}

#[test]
fn ingest_rejects_non_integer_chapter() {
    for chapter in ["475.5", r#""475""#] {
        let bad = RECORD_JSON.replace(r#""chapter": 475"#, &format!(r#""chapter": {chapter}"#));
        let err = serde_json::from_str::<Client>(&bad).unwrap_err().to_string();
        assert!(err.contains("statute chapter must be a non-negative integer"), "{err}");
    }
}

#[test]
fn record_roundtrips_through_json() {
    let client = sample_client().unwrap();
    let json = serde_json::to_string(&client).unwrap();
    let back: Client = serde_json::from_str(&json).unwrap();
    assert_eq!(back, client);
    assert_eq!(back.digest().unwrap(), client.digest().unwrap());
}

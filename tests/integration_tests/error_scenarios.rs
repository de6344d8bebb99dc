//! Error scenario integration tests
//!
//! Tests various failure modes and error handling:
//! 1. Instances whose source document is missing
//! 2. Invalid queries (no patterns, unknown columns, bad ranges)
//! 3. Census and counts that do not line up
//! 4. Unreadable snapshot and flat files

use metvi::analytics::{
    count_by_date, daily_counts, entity_totals_by_network, flatten_project, normalize,
    shows_per_date, AnalysisError, Column, DateRange, EntityField, SubjectObjectQuery,
};
use metvi::error::{Error, ErrorCategory, MetviErrorTrait};
use metvi::models::{Facet, Project};
use metvi::storage::{load_corpus, load_project, read_flat_file};
use tempfile::TempDir;

use crate::common::{create_instance, date, october, scenario_corpus, scenario_project};

// ============================================================================
// Missing source documents
// ============================================================================

#[test]
fn test_missing_document_is_reported_not_fatal() {
    let mut project = scenario_project();
    project.facets.push(Facet {
        word: "strangle".to_string(),
        instances: vec![create_instance("b1"), create_instance("nowhere")],
    });

    let flattened = flatten_project(&scenario_corpus(), &project, true);
    assert_eq!(flattened.rows.len(), 4);
    assert!(!flattened.is_complete());

    let errors = flattened.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0],
        AnalysisError::MissingSourceDocument {
            facet_word: "strangle".to_string(),
            instance_index: 1,
            source_id: "nowhere".to_string(),
        }
    );

    let err: Error = errors[0].clone().into();
    assert!(err.is_recoverable());
    assert_eq!(err.category(), ErrorCategory::Data);
}

#[test]
fn test_strict_flatten_fails_on_missing_document() {
    let project = Project {
        name: "p".to_string(),
        facets: vec![Facet {
            word: "hit".to_string(),
            instances: vec![create_instance("nowhere")],
        }],
    };

    let result = flatten_project(&scenario_corpus(), &project, true).into_complete_rows();
    assert!(matches!(
        result,
        Err(AnalysisError::MissingSourceDocument { .. })
    ));
}

// ============================================================================
// Invalid queries
// ============================================================================

#[test]
fn test_query_without_patterns() {
    let rows = flatten_project(&scenario_corpus(), &scenario_project(), true).rows;

    let result = SubjectObjectQuery::new().filter(&rows);
    assert!(matches!(result, Err(AnalysisError::InvalidQuery(_))));

    // Blank patterns count as absent
    let blank = SubjectObjectQuery::new().subject("   ").object("");
    let err: Error = blank.filter(&rows).unwrap_err().into();
    assert_eq!(err.category(), ErrorCategory::Query);
    assert!(!err.is_recoverable());
}

#[test]
fn test_unknown_grouping_column() {
    let err = Column::parse_list("network,studio").unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidQuery(_)));
    assert!(err.to_string().contains("studio"));

    let err = Column::parse_list("network,network").unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidQuery(_)));
}

#[test]
fn test_entity_field_parse() {
    assert_eq!("objects".parse::<EntityField>().unwrap(), EntityField::Objects);
    assert!("verbs".parse::<EntityField>().is_err());
}

#[test]
fn test_entity_totals_need_entity_grouping() {
    let rows = flatten_project(&scenario_corpus(), &scenario_project(), true).rows;
    let counts = count_by_date(&rows, &[Column::Network]).unwrap();

    let result = entity_totals_by_network(&counts, &october(1, 2));
    assert!(matches!(result, Err(AnalysisError::InvalidQuery(_))));
}

#[test]
fn test_invalid_date_ranges() {
    assert!(matches!(
        DateRange::new(date(2016, 10, 2), date(2016, 10, 1)),
        Err(AnalysisError::InvalidDateRange(_))
    ));

    let gapped = DateRange::from_dates(vec![date(2016, 10, 1), date(2016, 10, 3)]);
    let err: Error = gapped.unwrap_err().into();
    assert_eq!(err.category(), ErrorCategory::Query);

    assert!(DateRange::from_dates(Vec::new()).is_err());
    assert!(DateRange::from_dates(vec![date(2016, 10, 2), date(2016, 10, 1)]).is_err());
}

// ============================================================================
// Misaligned tables
// ============================================================================

#[test]
fn test_census_over_other_dates() {
    let corpus = scenario_corpus();
    let rows = flatten_project(&corpus, &scenario_project(), true).rows;

    let counts = daily_counts(&rows, &october(1, 2), &[]).unwrap();
    let census = shows_per_date(&corpus.documents, &october(1, 3), false);

    let err = normalize(&counts, &census).unwrap_err();
    assert!(matches!(err, AnalysisError::MisalignedRange(_)));
    assert_eq!(Error::from(err).category(), ErrorCategory::Alignment);
}

#[test]
fn test_network_grouping_needs_network_census() {
    let corpus = scenario_corpus();
    let rows = flatten_project(&corpus, &scenario_project(), true).rows;
    let range = october(1, 2);

    let by_network = daily_counts(&rows, &range, &[Column::Network]).unwrap();
    let flat_census = shows_per_date(&corpus.documents, &range, false);
    assert!(matches!(
        normalize(&by_network, &flat_census),
        Err(AnalysisError::MisalignedRange(_))
    ));

    let total = daily_counts(&rows, &range, &[]).unwrap();
    let network_census = shows_per_date(&corpus.documents, &range, true);
    assert!(matches!(
        normalize(&total, &network_census),
        Err(AnalysisError::MisalignedRange(_))
    ));
}

// ============================================================================
// Unreadable files
// ============================================================================

#[test]
fn test_missing_snapshot_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_corpus(&temp_dir.path().join("absent.json")).unwrap_err();

    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.category(), ErrorCategory::Storage);
}

#[test]
fn test_malformed_project_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("project.json");
    std::fs::write(&path, r#"{"name": "p", "facets": [{"word": 7}]}"#).unwrap();

    let err = load_project(&path).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert!(!err.is_recoverable());
}

#[test]
fn test_flat_file_with_bad_date() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rows.csv");
    let header = metvi::analytics::column_names().join(",");
    let record = "not-a-date,,,0.0,CNNW,B,CNNW_20161001_100000_B,attack,true,true,,x,y,\
                  politics is war,active,hit,past,false,";
    std::fs::write(&path, format!("{header}\n{record}\n")).unwrap();

    let err = read_flat_file(&path).unwrap_err();
    assert!(matches!(err, Error::Csv(_)));
}

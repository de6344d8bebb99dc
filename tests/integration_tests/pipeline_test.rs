//! Pipeline integration tests
//!
//! Tests the complete snapshot → flatten → count → normalize pipeline:
//! 1. Census, pivot and frequency for a small two-day corpus
//! 2. Loading feeds from JSON snapshots
//! 3. Exporting flat rows and re-running analyses from the export
//! 4. Entity queries and canonical entity totals

use metvi::analytics::{
    Analyzer, CanonicalRules, CanonicalTarget, Column, EntityField, Frequency,
    SubjectObjectQuery,
};
use metvi::models::Network;
use metvi::storage::{load_corpus, load_project, read_flat_file, FlatFileWriter};
use tempfile::TempDir;

use super::fixtures::write_snapshots;
use crate::common::{date, october, scenario_corpus, scenario_project};

fn key(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

fn scenario_analyzer() -> Analyzer {
    Analyzer::new(scenario_corpus(), &scenario_project())
}

// ============================================================================
// Census → pivot → frequency
// ============================================================================

#[test]
fn test_scenario_census_by_network() {
    let analyzer = scenario_analyzer();
    let census = analyzer.census(&october(1, 2), true);

    let day1 = date(2016, 10, 1);
    let day2 = date(2016, 10, 2);
    assert_eq!(census.network_shows(day1, Network::Msnbc), Some(1));
    assert_eq!(census.network_shows(day1, Network::Cnn), Some(1));
    assert_eq!(census.network_shows(day1, Network::FoxNews), Some(0));

    // Program A aired twice on 10-02 but counts once
    assert_eq!(census.network_shows(day2, Network::Msnbc), Some(1));
    assert_eq!(census.network_shows(day2, Network::Cnn), Some(0));
    assert_eq!(census.network_shows(day2, Network::FoxNews), Some(0));
}

#[test]
fn test_scenario_pivot_by_network() {
    let analyzer = scenario_analyzer();
    let table = analyzer
        .daily_counts(&october(1, 2), &[Column::Network])
        .unwrap();

    assert_eq!(table.columns(), &[key(&["CNNW"]), key(&["MSNBCW"])]);
    assert_eq!(table.get(date(2016, 10, 1), &key(&["MSNBCW"])), Some(2));
    assert_eq!(table.get(date(2016, 10, 1), &key(&["CNNW"])), Some(1));
    assert_eq!(table.get(date(2016, 10, 2), &key(&["MSNBCW"])), Some(0));
    assert_eq!(table.get(date(2016, 10, 2), &key(&["CNNW"])), Some(0));
    assert_eq!(table.total(), 3);
}

#[test]
fn test_scenario_frequency_by_network() {
    let analyzer = scenario_analyzer();
    let frame = analyzer
        .daily_frequency(&october(1, 2), &[Column::Network])
        .unwrap();

    let day1 = date(2016, 10, 1);
    let day2 = date(2016, 10, 2);
    assert_eq!(frame.get(day1, &key(&["MSNBCW"])), Some(Frequency::Defined(2.0)));
    assert_eq!(frame.get(day1, &key(&["CNNW"])), Some(Frequency::Defined(1.0)));
    assert_eq!(frame.get(day2, &key(&["MSNBCW"])), Some(Frequency::Defined(0.0)));
    assert_eq!(frame.get(day2, &key(&["CNNW"])), Some(Frequency::Undefined));
}

#[test]
fn test_scenario_total_frequency() {
    let analyzer = scenario_analyzer();
    let frame = analyzer.daily_frequency(&october(1, 2), &[]).unwrap();

    assert_eq!(frame.columns(), &["freq".to_string()]);
    assert_eq!(frame.freq(date(2016, 10, 1)), Some(Frequency::Defined(1.5)));
    assert_eq!(frame.freq(date(2016, 10, 2)), Some(Frequency::Defined(0.0)));

    let summary = frame.summary();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].defined, 2);
    assert!((summary[0].mean.unwrap() - 0.75).abs() < 1e-9);
}

#[test]
fn test_range_wider_than_data_is_zero_filled() {
    let analyzer = scenario_analyzer();
    let table = analyzer
        .daily_counts(&october(1, 31), &[Column::Network, Column::FacetWord])
        .unwrap();

    assert_eq!(table.range().len(), 31);
    assert_eq!(table.rows().count(), 31);
    assert_eq!(table.get(date(2016, 10, 20), &key(&["MSNBCW", "attack"])), Some(0));
}

#[test]
fn test_rows_outside_range_are_dropped() {
    let analyzer = scenario_analyzer();
    let table = analyzer.daily_counts(&october(2, 3), &[]).unwrap();

    assert_eq!(table.total(), 0);
    assert_eq!(table.out_of_range(), 3);
}

// ============================================================================
// Snapshots and flat files
// ============================================================================

#[test]
fn test_snapshot_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let (corpus_path, project_path) = write_snapshots(temp_dir.path());

    let corpus = load_corpus(&corpus_path).unwrap();
    let project = load_project(&project_path).unwrap();
    assert_eq!(corpus.documents.len(), 4);
    assert_eq!(project.instance_count(), 5);

    let analyzer = Analyzer::new(corpus, &project);
    assert_eq!(analyzer.rows().len(), 3);
    assert_eq!(analyzer.skipped().len(), 1);
    assert_eq!(analyzer.skipped()[0].source_id, "gone");

    let range = october(3, 4);

    let census = analyzer.census(&range, false);
    assert_eq!(census.shows(date(2016, 10, 3)), Some(2));
    assert_eq!(census.shows(date(2016, 10, 4)), Some(2));

    let frame = analyzer.daily_frequency(&range, &[]).unwrap();
    assert_eq!(frame.freq(date(2016, 10, 3)), Some(Frequency::Defined(0.5)));
    assert_eq!(frame.freq(date(2016, 10, 4)), Some(Frequency::Defined(1.0)));

    // BBC has no census column, so its frequency is never defined
    let by_network = analyzer.daily_frequency(&range, &[Column::Network]).unwrap();
    let bbc = by_network.column(&key(&["BBCNEWS"])).unwrap();
    assert!(bbc.iter().all(Frequency::is_undefined));
    assert_eq!(
        by_network.get(date(2016, 10, 4), &key(&["FOXNEWSW"])),
        Some(Frequency::Defined(1.0))
    );
    assert_eq!(
        by_network.get(date(2016, 10, 4), &key(&["MSNBCW"])),
        Some(Frequency::Undefined)
    );
}

#[test]
fn test_flat_file_analyses_match_live_feeds() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("export/rows.csv");
    let corpus = scenario_corpus();
    let project = scenario_project();

    let summary = FlatFileWriter::new(&path)
        .export_project(&corpus, &project, true)
        .unwrap();
    assert_eq!(summary.rows_written, 3);
    assert!(summary.skipped.is_empty());

    let live = Analyzer::new(corpus.clone(), &project);
    let from_file = Analyzer::from_rows(corpus.documents, read_flat_file(&path).unwrap());

    let range = october(1, 2);
    let group_by = [Column::Network, Column::Subjects];
    assert_eq!(
        live.daily_counts(&range, &group_by).unwrap(),
        from_file.daily_counts(&range, &group_by).unwrap()
    );
    assert_eq!(
        live.daily_frequency(&range, &[Column::Network]).unwrap(),
        from_file.daily_frequency(&range, &[Column::Network]).unwrap()
    );
}

#[test]
fn test_full_export_analyses_skip_excluded_rows() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("all.csv");
    let corpus = scenario_corpus();
    let mut project = scenario_project();
    project.facets[0].instances[0].include = false;

    let summary = FlatFileWriter::new(&path)
        .export_project(&corpus, &project, false)
        .unwrap();
    assert_eq!(summary.rows_written, 3);

    let rows = read_flat_file(&path).unwrap();
    assert_eq!(rows.iter().filter(|r| !r.include).count(), 1);

    let live = Analyzer::new(corpus.clone(), &project);
    let from_file = Analyzer::from_rows(corpus.documents, rows);
    assert_eq!(from_file.rows().len(), 2);

    let range = october(1, 2);
    let live_counts = live.daily_counts(&range, &[Column::Network]).unwrap();
    let file_counts = from_file.daily_counts(&range, &[Column::Network]).unwrap();
    assert_eq!(live_counts.total(), 2);
    assert_eq!(live_counts, file_counts);
    let rules = CanonicalRules::default();
    assert_eq!(
        live.entity_totals(&rules, EntityField::Subjects, &range)
            .unwrap(),
        from_file
            .entity_totals(&rules, EntityField::Subjects, &range)
            .unwrap()
    );
}

// ============================================================================
// Entity queries and canonicalization
// ============================================================================

#[test]
fn test_subject_and_object_must_both_match() {
    let analyzer = scenario_analyzer();
    let range = october(1, 2);

    let both = SubjectObjectQuery::new().subject("trump").object("clinton");
    let table = analyzer.subject_object_counts(&both, &range).unwrap();
    assert_eq!(
        table.columns(),
        &[key(&["MSNBCW"]), key(&["CNNW"]), key(&["FOXNEWSW"])]
    );
    assert_eq!(table.get(date(2016, 10, 1), &key(&["MSNBCW"])), Some(1));
    assert_eq!(table.get(date(2016, 10, 1), &key(&["CNNW"])), Some(1));
    assert_eq!(table.get(date(2016, 10, 1), &key(&["FOXNEWSW"])), Some(0));

    let exact = SubjectObjectQuery::new()
        .subject("donald trump")
        .subject_substring(false)
        .object("clinton");
    let table = analyzer.subject_object_counts(&exact, &range).unwrap();
    assert_eq!(table.total(), 1);
    assert_eq!(table.get(date(2016, 10, 1), &key(&["CNNW"])), Some(0));
}

#[test]
fn test_subject_object_frequency() {
    let analyzer = scenario_analyzer();
    let query = SubjectObjectQuery::new().object("clinton");
    let frame = analyzer.subject_object_frequency(&query, &october(1, 2)).unwrap();

    let day1 = date(2016, 10, 1);
    assert_eq!(frame.get(day1, &key(&["MSNBCW"])), Some(Frequency::Defined(1.0)));
    assert_eq!(frame.get(day1, &key(&["CNNW"])), Some(Frequency::Defined(1.0)));
    assert_eq!(frame.get(day1, &key(&["FOXNEWSW"])), Some(Frequency::Undefined));
}

#[test]
fn test_canonical_totals_skip_excluded_fields() {
    let analyzer = scenario_analyzer();
    let rules = CanonicalRules::default();
    let range = october(1, 2);

    // "trump campaign" names no target verbatim
    let subjects = analyzer
        .entity_totals(&rules, EntityField::Subjects, &range)
        .unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects["MSNBCW"]["donald trump"], 1);
    assert_eq!(subjects["MSNBCW"]["hillary clinton"], 1);

    let objects = analyzer
        .entity_totals(&rules, EntityField::Objects, &range)
        .unwrap();
    assert_eq!(objects["CNNW"]["hillary clinton"], 1);
    assert_eq!(objects["MSNBCW"].len(), 2);
}

#[test]
fn test_canonical_exclusions_from_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let (corpus_path, project_path) = write_snapshots(temp_dir.path());
    let analyzer = Analyzer::new(
        load_corpus(&corpus_path).unwrap(),
        &load_project(&project_path).unwrap(),
    );
    let range = october(3, 4);

    // "hillary clinton/tim kaine" is dropped by the "/" exclusion
    let subjects = analyzer
        .entity_totals(&CanonicalRules::default(), EntityField::Subjects, &range)
        .unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects["MSNBCW"]["donald trump"], 1);

    // Without exclusions the joint field counts for its first target
    let permissive = CanonicalRules {
        targets: CanonicalRules::default().targets,
        exclusions: Vec::new(),
    };
    let subjects = analyzer
        .entity_totals(&permissive, EntityField::Subjects, &range)
        .unwrap();
    assert_eq!(subjects["FOXNEWSW"]["hillary clinton"], 1);
}

#[test]
fn test_custom_canonical_target() {
    let analyzer = scenario_analyzer();
    let rules = CanonicalRules {
        targets: vec![CanonicalTarget::new("trump", "Trump")],
        exclusions: Vec::new(),
    };

    let totals = analyzer
        .entity_totals(&rules, EntityField::Subjects, &october(1, 2))
        .unwrap();
    assert_eq!(totals["MSNBCW"]["trump"], 1);
    assert_eq!(totals["CNNW"]["trump"], 1);
}

#[test]
fn test_facet_counts_from_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let (corpus_path, project_path) = write_snapshots(temp_dir.path());
    let analyzer = Analyzer::new(
        load_corpus(&corpus_path).unwrap(),
        &load_project(&project_path).unwrap(),
    );
    let words: Vec<String> = ["attack", "slap", "strangle"]
        .iter()
        .map(|w| w.to_string())
        .collect();

    let totals = analyzer.facet_counts(&words, false);
    assert_eq!(totals.count("attack"), Some(2));
    assert_eq!(totals.count("slap"), Some(1));
    assert_eq!(totals.count("strangle"), Some(0));

    let by_network = analyzer.facet_counts(&words, true);
    assert_eq!(by_network.network_count("attack", Network::Msnbc), Some(1));
    assert_eq!(by_network.network_count("attack", Network::FoxNews), Some(0));
    assert_eq!(by_network.network_count("slap", Network::FoxNews), Some(1));
}

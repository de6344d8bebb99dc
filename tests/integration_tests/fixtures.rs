//! Test fixtures for integration tests
//!
//! Provides sample feed snapshots as they come out of the annotation store

use std::path::{Path, PathBuf};

/// Corpus snapshot with one unrecognized network (BBC) and a missing
/// optional time window
pub const CORPUS_JSON: &str = r#"{
    "name": "Sample week",
    "documents": [
        {"id": "m1", "iatv_id": "MSNBCW_20161003_060000_Morning_Joe", "network": "MSNBCW",
         "program_name": "Morning Joe", "start_localtime": "2016-10-03T06:00:00",
         "runtime_seconds": 10800.0},
        {"id": "f1", "iatv_id": "FOXNEWSW_20161003_210000_Hannity", "network": "FOXNEWSW",
         "program_name": "Hannity", "start_localtime": "2016-10-03T21:00:00"},
        {"id": "f2", "iatv_id": "FOXNEWSW_20161004_210000_Hannity", "network": "FOXNEWSW",
         "program_name": "Hannity", "start_localtime": "2016-10-04T21:00:00"},
        {"id": "x1", "iatv_id": "BBCNEWS_20161004_180000_World_News", "network": "BBCNEWS",
         "program_name": "World News", "start_localtime": "2016-10-04T18:00:00"}
    ]
}"#;

/// Project snapshot; one instance points at a document that is not in the
/// corpus and one is not marked for inclusion
pub const PROJECT_JSON: &str = r#"{
    "name": "Sample week coding",
    "facets": [
        {"word": "attack", "instances": [
            {"text": "attacked her record", "source_id": "m1", "include": true,
             "figurative": true, "subjects": "Donald Trump", "objects": "Hillary Clinton",
             "conceptual_metaphor": "Politics is war", "repeat_index": 0},
            {"text": "attack ads", "source_id": "f1", "include": false},
            {"text": "under attack", "source_id": "x1", "include": true,
             "subjects": "the press", "objects": "donald trump"}
        ]},
        {"word": "slap", "instances": [
            {"text": "slapped down", "source_id": "f2", "include": true,
             "subjects": "hillary clinton/tim kaine", "objects": "donald trump",
             "conceptual_metaphor": "debate is a fight"},
            {"text": "slap in the face", "source_id": "gone", "include": true}
        ]}
    ]
}"#;

/// Write both snapshots into `dir`, returning `(corpus, project)` paths
pub fn write_snapshots(dir: &Path) -> (PathBuf, PathBuf) {
    let corpus = dir.join("corpus.json");
    let project = dir.join("project.json");
    std::fs::write(&corpus, CORPUS_JSON).unwrap();
    std::fs::write(&project, PROJECT_JSON).unwrap();
    (corpus, project)
}

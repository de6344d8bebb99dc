//! Common test utilities

#![allow(dead_code)]

use chrono::NaiveDate;
use metvi::analytics::DateRange;
use metvi::models::{Corpus, Document, Facet, Instance, Project};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Inclusive range over October 2016 days
pub fn october(first: u32, last: u32) -> DateRange {
    DateRange::new(date(2016, 10, first), date(2016, 10, last)).unwrap()
}

/// Create a document from an archive identifier
pub fn create_document(id: &str, iatv_id: &str) -> Document {
    Document::from_iatv_id(id, iatv_id).unwrap()
}

/// Create an included instance with default coding
pub fn create_instance(source_id: &str) -> Instance {
    Instance {
        text: "attacked".to_string(),
        source_id: source_id.to_string(),
        figurative: true,
        include: true,
        conceptual_metaphor: "politics is war".to_string(),
        ..Default::default()
    }
}

/// Create an included instance with subject and object
pub fn create_entity_instance(source_id: &str, subjects: &str, objects: &str) -> Instance {
    Instance {
        subjects: subjects.to_string(),
        objects: objects.to_string(),
        ..create_instance(source_id)
    }
}

/// Two shows on 2016-10-01 (A on MSNBC, B on CNN) and program A aired twice
/// on MSNBC on 2016-10-02.
pub fn scenario_corpus() -> Corpus {
    Corpus {
        name: "October 2016".to_string(),
        documents: vec![
            create_document("a1", "MSNBCW_20161001_090000_A"),
            create_document("b1", "CNNW_20161001_100000_B"),
            create_document("a2", "MSNBCW_20161002_090000_A"),
            create_document("a2r", "MSNBCW_20161002_230000_A"),
        ],
    }
}

/// Three included "attack" instances on 2016-10-01: two on MSNBC, one on CNN
pub fn scenario_project() -> Project {
    Project {
        name: "Violent metaphors".to_string(),
        facets: vec![Facet {
            word: "attack".to_string(),
            instances: vec![
                create_entity_instance("a1", "Donald Trump", "Hillary Clinton"),
                create_entity_instance("a1", "Hillary Clinton", "Donald Trump"),
                create_entity_instance("b1", "trump campaign", "hillary clinton"),
            ],
        }],
    }
}

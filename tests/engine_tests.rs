//! Matching engine behavior through the public API
//!
//! Exercises the full path from a cross-reference table on disk through
//! ingestion, classification, tiered matching and suggestions.

use std::io::Write;
use std::sync::Arc;

use chip_xref::catalog::store::CatalogOrigin;
use chip_xref::parsing::tabular::TabularFileSource;
use chip_xref::{normalize, MatchEngine, MatchingConfig, ReplaceType};
use tempfile::NamedTempFile;

const TABLE: &str = "\
original_model,original_brand,function,replacement_brand,replacement_model,notes,advantages
型号,品牌,功能,品牌,型号,备注,优势
NE555P,TI,Timer,3peak,TP555,P2P,
NE555P,TI,Timer,Silergy,SA555,非P2P，封装不同,
XX5550YY,Acme,Misc,Other,YY1,,pin to pin
LM358DR,TI,Op amp,3peak,TP358,,
OPA333,TI,Op amp,3peak,,,
";

fn write_table(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write table");
    file
}

fn table_engine(file: &NamedTempFile) -> MatchEngine {
    MatchEngine::with_source(
        MatchingConfig::default(),
        TabularFileSource::new(file.path()),
    )
}

fn seed_engine() -> MatchEngine {
    MatchEngine::new(MatchingConfig::default())
}

#[test]
fn test_table_ingestion_skips_invalid_rows() {
    let file = write_table(TABLE, ".csv");
    let engine = table_engine(&file);

    let catalog = engine.catalog();
    assert!(matches!(catalog.origin(), CatalogOrigin::Tabular(_)));

    let stats = catalog.stats();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.pin_to_pin, 2);
    assert_eq!(stats.functional, 2);
}

#[test]
fn test_tsv_table() {
    let file = write_table(&TABLE.replace(',', "\t"), ".tsv");
    let engine = table_engine(&file);
    assert_eq!(engine.catalog().len(), 4);
}

#[test]
fn test_classification_from_notes() {
    let file = write_table(TABLE, ".csv");
    let engine = table_engine(&file);

    let results = engine.search(&["NE555P"]);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].replacement_model, "TP555");
    assert_eq!(results[0].replace_type, ReplaceType::PinToPin);
    assert_eq!(results[1].replacement_model, "SA555");
    assert_eq!(results[1].replace_type, ReplaceType::FunctionalEquivalent);
}

#[test]
fn test_contiguous_number_guard() {
    let file = write_table(TABLE, ".csv");
    let engine = table_engine(&file);

    let results = engine.search(&["555"]);
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.original_model == "NE555P"));
}

#[test]
fn test_missing_table_falls_back_to_seed() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let engine = MatchEngine::with_source(
        MatchingConfig::default(),
        TabularFileSource::new(dir.path().join("missing.csv")),
    );

    assert_eq!(engine.catalog().origin(), &CatalogOrigin::Embedded);
    assert_eq!(engine.catalog().len(), 15);
}

#[test]
fn test_backup_table_used_when_primary_unreadable() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    // A directory exists but cannot be read as a file
    let primary = dir.path().join("table.csv");
    std::fs::create_dir(&primary).expect("Failed to create dir");
    let backup = write_table(TABLE, ".csv");

    let engine = MatchEngine::with_source(
        MatchingConfig::default(),
        TabularFileSource::new(&primary).with_backup(backup.path()),
    );

    assert_eq!(engine.catalog().len(), 4);
}

#[test]
fn test_normalization_properties() {
    for input in ["tlv733-33 pdbvr", "STM32_F103/C8T6", "lm4050qaem3x5.0/nopb", ""] {
        let once = normalize(input);
        assert_eq!(normalize(&once), once);
        assert_eq!(normalize(&input.to_lowercase()), normalize(&input.to_uppercase()));
    }
}

#[test]
fn test_query_spelling_does_not_matter() {
    let engine = seed_engine();
    let canonical = engine.search(&["STM32F103C8T6"]);
    assert_eq!(canonical.len(), 1);
    assert_eq!(canonical[0].replacement_model, "GD32F103C8T6");

    assert_eq!(engine.search(&["stm32-f103 c8t6"]), canonical);
}

#[test]
fn test_length_gated_partial_number() {
    let engine = seed_engine();
    assert!(engine.search(&["405"]).is_empty());
    assert!(engine
        .search(&["4050"])
        .iter()
        .all(|r| r.original_model.starts_with("LM4050")));
    assert!(!engine.search(&["4050"]).is_empty());
}

#[test]
fn test_batch_is_deduplicated_in_query_order() {
    let engine = seed_engine();

    let single = engine.search(&["TLV73333PDBVR"]);
    let repeated = engine.search(&["TLV73333PDBVR", "tlv73333pdbvr", "TLV73333PDBVR"]);
    assert_eq!(single, repeated);

    let batch = engine.search(&["LM2903", "STM32F103C8T6", "LM2903"]);
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0].original_model, "LM2903AVQDRG4Q1");
    assert_eq!(batch[1].original_model, "STM32F103C8T6");
}

#[test]
fn test_empty_batch() {
    let engine = seed_engine();
    let empty: [&str; 0] = [];
    assert!(engine.search(&empty).is_empty());
    assert!(engine.search(&[""]).is_empty());
}

#[test]
fn test_suggestions_for_near_miss() {
    let engine = seed_engine();
    assert!(engine.search(&["TLV7333PDBVR"]).is_empty());

    let suggestions = engine.suggest("TLV7333PDBVR");
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0].record.original_model, "TLV73333PDBVR");
    assert!(suggestions[0].similarity > 0.6);
    assert!(suggestions
        .windows(2)
        .all(|w| w[0].similarity >= w[1].similarity));
}

#[test]
fn test_stricter_thresholds() {
    let config = MatchingConfig {
        similarity_threshold: 0.95,
        ..MatchingConfig::default()
    };
    let engine = MatchEngine::new(config);
    assert!(engine.suggest("TLV7333PDBVR").is_empty());
}

#[test]
fn test_shared_engine_across_threads() {
    let file = write_table(TABLE, ".csv");
    let engine = Arc::new(table_engine(&file));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || engine.search(&["NE555P", "LM358"]).len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread panicked"), 3);
    }
    assert!(engine.is_initialized());
}

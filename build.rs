use std::path::Path;

fn main() {
    let catalog_path = Path::new("catalogs/seed_catalog.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // The seed catalog is embedded, so a broken file must fail the build
    assert!(
        catalog_path.exists(),
        "\n\nSEED CATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the seed catalog before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nSEED CATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nSEED CATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nSEED CATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let records = catalog.get("records").unwrap_or_else(|| {
        panic!(
            "\n\nSEED CATALOG BUILD ERROR: Missing 'records' field\n\
             The catalog must have a top-level 'records' array.\n"
        );
    });

    let records = records.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nSEED CATALOG BUILD ERROR: 'records' must be an array\n\
             Got: {records}\n"
        );
    });

    assert!(
        !records.is_empty(),
        "\n\nSEED CATALOG BUILD ERROR: 'records' is empty\n\
         The seed catalog is the ingestion fallback and must not be empty.\n"
    );

    for (i, record) in records.iter().enumerate() {
        validate_record(record, i);
    }

    println!(
        "cargo:warning=Validated seed catalog: {} records",
        records.len()
    );
}

fn validate_record(record: &serde_json::Value, index: usize) {
    for field in ["original_model", "replacement_model"] {
        let value = record
            .get(field)
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        assert!(
            !value.trim().is_empty(),
            "\n\nSEED CATALOG BUILD ERROR: Record at index {index} has an empty '{field}'\n"
        );
    }

    let replace_type = record
        .get("replace_type")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("<missing>");
    assert!(
        matches!(replace_type, "pin_to_pin" | "functional_equivalent"),
        "\n\nSEED CATALOG BUILD ERROR: Record at index {index} has invalid 'replace_type': {replace_type}\n\
         Expected 'pin_to_pin' or 'functional_equivalent'.\n"
    );
}

fn set_build_dependencies() {
    println!("cargo:rerun-if-changed=catalogs/seed_catalog.json");
    println!("cargo:rerun-if-changed=build.rs");
}

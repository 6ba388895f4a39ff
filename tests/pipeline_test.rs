//! End-to-end tests for the coordinate assignment pipeline.

use species_coords::pipeline::{run, RunConfig, DEFAULT_SEED};
use species_coords::table::read_table;
use std::path::Path;
use tempfile::tempdir;

const MASTER: &str = "\
Nombre de ave,Latitud,Longitud
Heron,10.0,20.0
Great Egret (Ardea alba),1.5,-70.25
great egret,2.5,-71.25
GREAT EGRET,N/A,-72.0
Blue Jay,40,-80
Blue  Jay,41,-81
Blue Jay,42,-82
";

const TABLE: &str = "\
Fecha,Nombre,Conteo
2025-01-01,Heron,1
2025-01-02,HERON (Ardea herodias),2
2025-01-03,Dodo,1
2025-01-04,Great Egret,3
2025-01-05,Blue Jay,1
2025-01-06,blue   jay,4
2025-01-07,Moa,1
2025-01-08,,1
2025-01-09,dodo,2
";

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

fn config(dir: &Path, seed: u64) -> RunConfig {
    RunConfig {
        table: write(dir, "Tabla.csv", TABLE),
        master: write(dir, "Cordenadas.csv", MASTER),
        output: dir.join("out").join("Tabla_con_coordenadas.csv"),
        seed,
        stats: None,
    }
}

#[test]
fn test_enriched_output_and_summary() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::create_dir(dir.path().join("out")).unwrap();
    let cfg = config(dir.path(), DEFAULT_SEED);

    let summary = run(&cfg).expect("pipeline failed");
    assert_eq!(summary.total_rows, 9);
    // heron x2, great egret x1, blue jay x2
    assert_eq!(summary.assigned_rows, 5);
    assert_eq!(summary.unmatched_species, 2);
    assert_eq!(summary.master_species, 3);
    assert_eq!(summary.master_candidates, 6);

    let out = read_table(&cfg.output).unwrap();
    assert_eq!(out.headers, vec!["Fecha", "Nombre", "Conteo", "lat", "lon", "lat_lon"]);
    assert_eq!(out.len(), 9);

    // Original columns pass through unchanged, in order
    let original = read_table(&cfg.table).unwrap();
    for (o, e) in original.rows.iter().zip(&out.rows) {
        assert_eq!(&e[..3], &o[..]);
    }

    // Single-candidate species
    for row in &out.rows[0..2] {
        assert_eq!(row[3], "10.000000");
        assert_eq!(row[4], "20.000000");
        assert_eq!(row[5], "10.000000,20.000000");
    }

    // Unmatched and blank rows stay empty
    for idx in [2, 6, 7, 8] {
        assert_eq!(out.rows[idx][3..], ["", "", ""]);
    }

    // Sampled values always come from the species' own candidates
    let egret = ["1.500000,-70.250000", "2.500000,-71.250000"];
    assert!(egret.contains(&out.rows[3][5].as_str()));
    let jay = ["40.000000,-80.000000", "41.000000,-81.000000", "42.000000,-82.000000"];
    assert!(jay.contains(&out.rows[4][5].as_str()));
    assert!(jay.contains(&out.rows[5][5].as_str()));
}

#[test]
fn test_no_match_report() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("out")).unwrap();
    let cfg = config(dir.path(), 1);

    let summary = run(&cfg).unwrap();
    let report_path = dir.path().join("out").join("no_match.csv");
    assert_eq!(summary.no_match_report, Some(report_path.display().to_string()));

    let text = std::fs::read_to_string(&report_path).unwrap();
    assert_eq!(text, "species_norm\ndodo\nmoa\n");
}

#[test]
fn test_no_report_when_everything_matches() {
    let dir = tempdir().unwrap();
    let cfg = RunConfig {
        table: write(dir.path(), "t.csv", "species\nHeron\nheron\n"),
        master: write(dir.path(), "m.csv", MASTER),
        output: dir.path().join("enriched.csv"),
        seed: 3,
        stats: None,
    };

    let summary = run(&cfg).unwrap();
    assert_eq!(summary.assigned_rows, 2);
    assert_eq!(summary.unmatched_species, 0);
    assert!(summary.no_match_report.is_none());
    assert!(!dir.path().join("no_match.csv").exists());
}

#[test]
fn test_same_seed_is_byte_identical() {
    let dir_a = tempdir().unwrap();
    let dir_b = tempdir().unwrap();
    for dir in [&dir_a, &dir_b] {
        std::fs::create_dir(dir.path().join("out")).unwrap();
    }
    let a = config(dir_a.path(), 99);
    let b = config(dir_b.path(), 99);
    run(&a).unwrap();
    run(&b).unwrap();

    let bytes_a = std::fs::read(&a.output).unwrap();
    let bytes_b = std::fs::read(&b.output).unwrap();
    assert_eq!(bytes_a, bytes_b);
}

#[test]
fn test_missing_column_writes_nothing() {
    let dir = tempdir().unwrap();
    let cfg = RunConfig {
        table: write(dir.path(), "t.csv", "species\nHeron\n"),
        master: write(dir.path(), "m.csv", "nombre,latitud\nHeron,1\n"),
        output: dir.path().join("enriched.csv"),
        seed: DEFAULT_SEED,
        stats: Some(dir.path().join("stats.json")),
    };

    let err = run(&cfg).unwrap_err();
    let msg = format!("{:#}", err);
    assert!(msg.contains("master longitude column not found"), "{msg}");
    assert!(msg.contains("lopnong"), "{msg}");
    assert!(!cfg.output.exists());
    assert!(!dir.path().join("no_match.csv").exists());
    assert!(!dir.path().join("stats.json").exists());
}

#[test]
fn test_missing_species_column() {
    let dir = tempdir().unwrap();
    let cfg = RunConfig {
        table: write(dir.path(), "t.csv", "bird,count\nHeron,1\n"),
        master: write(dir.path(), "m.csv", MASTER),
        output: dir.path().join("enriched.csv"),
        seed: DEFAULT_SEED,
        stats: None,
    };

    let msg = format!("{:#}", run(&cfg).unwrap_err());
    assert!(msg.contains("species column not found"), "{msg}");
    assert!(!cfg.output.exists());
}

#[test]
fn test_output_cannot_overwrite_input() {
    let dir = tempdir().unwrap();
    let table = write(dir.path(), "t.csv", TABLE);
    let cfg = RunConfig {
        table: table.clone(),
        master: write(dir.path(), "m.csv", MASTER),
        output: table.clone(),
        seed: DEFAULT_SEED,
        stats: None,
    };

    assert!(run(&cfg).is_err());
    assert_eq!(std::fs::read_to_string(&table).unwrap(), TABLE);
}

#[test]
fn test_existing_derived_columns_are_overwritten() {
    let dir = tempdir().unwrap();
    let cfg = RunConfig {
        table: write(dir.path(), "t.csv", "species,lat,note\nHeron,stale,keep\n"),
        master: write(dir.path(), "m.csv", MASTER),
        output: dir.path().join("enriched.csv"),
        seed: DEFAULT_SEED,
        stats: Some(dir.path().join("stats.json")),
    };
    run(&cfg).unwrap();

    let out = read_table(&cfg.output).unwrap();
    assert_eq!(out.headers, vec!["species", "lat", "note", "lon", "lat_lon"]);
    assert_eq!(out.rows[0], vec!["Heron", "10.000000", "keep", "20.000000", "10.000000,20.000000"]);

    let stats: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("stats.json")).unwrap()).unwrap();
    assert_eq!(stats["assigned_rows"], 1);
    assert_eq!(stats["seed"], DEFAULT_SEED);
}

#[test]
fn test_extra_fields_fail_before_any_write() {
    let dir = tempdir().unwrap();
    let cfg = RunConfig {
        table: write(dir.path(), "t.csv", "species,count\nHeron,1\nHeron,2,EXTRA\n"),
        master: write(dir.path(), "m.csv", MASTER),
        output: dir.path().join("enriched.csv"),
        seed: DEFAULT_SEED,
        stats: None,
    };

    let msg = format!("{:#}", run(&cfg).unwrap_err());
    assert!(msg.contains("CSV row 2 has 3 fields, header has 2"), "{msg}");
    assert!(!cfg.output.exists());
}

#[test]
fn test_enriched_table_written_before_report() {
    let dir = tempdir().unwrap();
    let cfg = RunConfig {
        table: write(dir.path(), "t.csv", "species\nHeron\nDodo\n"),
        master: write(dir.path(), "m.csv", MASTER),
        output: dir.path().join("enriched.csv"),
        seed: DEFAULT_SEED,
        stats: None,
    };
    // A directory in the report's place makes the report write fail
    std::fs::create_dir(dir.path().join("no_match.csv")).unwrap();

    assert!(run(&cfg).is_err());
    let out = read_table(&cfg.output).unwrap();
    assert_eq!(out.rows[0], vec!["Heron", "10.000000", "20.000000", "10.000000,20.000000"]);
}

#[test]
fn test_missing_value_tokens_are_not_species() {
    let dir = tempdir().unwrap();
    let cfg = RunConfig {
        table: write(dir.path(), "t.csv", "species\nNA\nN/A\nnull\nDodo\nHeron\n"),
        master: write(dir.path(), "m.csv", MASTER),
        output: dir.path().join("enriched.csv"),
        seed: DEFAULT_SEED,
        stats: None,
    };

    let summary = run(&cfg).unwrap();
    assert_eq!(summary.assigned_rows, 1);
    assert_eq!(summary.unmatched_species, 1);
    let report = std::fs::read_to_string(dir.path().join("no_match.csv")).unwrap();
    assert_eq!(report, "species_norm\ndodo\n");
}

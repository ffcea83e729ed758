//! Test fixture loader for the Pavlov golden datasets.
//!
//! Provides typed deserialization of the fixture JSON files and helper functions
//! for loading them in tests across crates.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// A variable as written in a fixture: a name and its ordered domain.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureVariable {
    pub name: String,
    pub domain: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureSeparatingSet {
    pub pair: [String; 2],
    pub set: Vec<String>,
}

/// Structure the PC learner is expected to recover from the rows.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpectedStructure {
    pub edges: Vec<[String; 2]>,
    pub removed_unconditioned: Vec<[String; 2]>,
    pub separating_sets: Vec<FixtureSeparatingSet>,
    pub colliders: usize,
}

/// Observation rows over named variables, plus the structure they encode.
#[derive(Debug, Clone, Deserialize)]
pub struct JointFixture {
    pub description: String,
    pub variables: Vec<FixtureVariable>,
    pub rows: Vec<BTreeMap<String, String>>,
    pub expected: ExpectedStructure,
}

/// Load one of the `golden/` joint fixtures by file stem.
pub fn load_joint(name: &str) -> JointFixture {
    load_fixture(&format!("golden/{name}.json"))
}

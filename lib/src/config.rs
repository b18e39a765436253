//! Configuration shared by the library entry points and the command line tool.

use crate::consts::SCIETY_NS;
use crate::namespace::Prefixes;
use crate::split::StructuralPredicates;
use anyhow::Result;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct Config {
    // prefix table written at the top of serialized output
    pub prefixes: Prefixes,
    // predicates along which shared blank nodes are split before comparison
    pub structural_predicates: StructuralPredicates,
    // drop sh:resultMessage from actual reports when the expected report has none
    pub strip_result_messages: bool,
    // namespace for minted article and work IRIs
    pub base_iri: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prefixes: Prefixes::scholarly(),
            structural_predicates: StructuralPredicates::shacl(),
            strip_result_messages: true,
            base_iri: SCIETY_NS.to_string(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn save_to_file(&self, file: &Path) -> Result<()> {
        let config_str = serde_json::to_string_pretty(&self)?;
        let mut file = std::fs::File::create(file)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    pub fn from_file(file: &Path) -> Result<Self> {
        let file = std::fs::File::open(file)?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)?;
        Ok(config)
    }

    pub fn print(&self) {
        println!("Configuration:");
        println!("  Base IRI: {}", self.base_iri);
        println!("  Strip Result Messages: {}", self.strip_result_messages);
        println!("  Prefixes:");
        for (prefix, base) in self.prefixes.iter() {
            println!("    - {}: {}", prefix, base);
        }
        println!("  Structural Predicates:");
        for predicate in self.structural_predicates.iter() {
            println!("    - {}", predicate);
        }
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Config {{ base_iri: {}, prefixes: {}, structural_predicates: {}, strip_result_messages: {} }}",
            self.base_iri,
            self.prefixes.len(),
            self.structural_predicates.len(),
            self.strip_result_messages
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_in_defaults() {
        let config = Config::builder()
            .base_iri("https://sciety.org/")
            .build()
            .unwrap();
        assert_eq!(config.base_iri, "https://sciety.org/");
        assert!(config.strip_result_messages);
        assert_eq!(config.prefixes, Prefixes::scholarly());
        assert_eq!(config.structural_predicates.len(), 8);
    }

    #[test]
    fn partial_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"strip_result_messages": false}"#).unwrap();
        let config = Config::from_file(&path).unwrap();
        assert!(!config.strip_result_messages);
        assert_eq!(config.base_iri, SCIETY_NS);
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config::builder()
            .prefixes(Prefixes::new().with("ex", "http://example.org/"))
            .structural_predicates(StructuralPredicates::new(["http://example.org/link"]))
            .build()
            .unwrap();
        config.save_to_file(&path).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), config);
    }
}

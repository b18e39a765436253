use anyhow::{anyhow, Context, Result};

use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::Path;

use oxigraph::io::{RdfFormat, RdfParser};
use walkdir::WalkDir;

use log::{debug, info};

use crate::convert::from_oxigraph_quad;
use crate::dataset::Dataset;
use crate::namespace::Prefixes;
use crate::serializer::TurtleSerializer;

/// Picks a parser from the file extension. Unknown or missing extensions read as Turtle.
pub fn format_for_path(path: &Path) -> RdfFormat {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("ttl") | Some("n3") => RdfFormat::Turtle,
        Some("trig") => RdfFormat::TriG,
        Some("nt") => RdfFormat::NTriples,
        Some("nq") => RdfFormat::NQuads,
        Some("xml") | Some("rdf") | Some("owl") => RdfFormat::RdfXml,
        _ => RdfFormat::Turtle,
    }
}

fn is_rdf_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("ttl" | "n3" | "trig" | "nt" | "nq" | "xml" | "rdf" | "owl")
    )
}

/// Parses RDF from a reader into a dataset.
pub fn read_from<R: Read>(reader: R, format: RdfFormat) -> Result<Dataset> {
    let parser = RdfParser::from_format(format).for_reader(reader);
    let mut dataset = Dataset::new();
    for quad in parser {
        let quad = quad?;
        dataset.insert(from_oxigraph_quad(&quad)?);
    }
    Ok(dataset)
}

pub fn read_str(content: &str, format: RdfFormat) -> Result<Dataset> {
    read_from(content.as_bytes(), format)
}

pub fn read_file(file: &Path) -> Result<Dataset> {
    debug!("Reading file: {}", file.display());
    let format = format_for_path(file);
    let reader = BufReader::new(
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?,
    );
    read_from(reader, format).with_context(|| format!("Failed to parse {}", file.display()))
}

/// Reads a single file, or every RDF file below a directory merged into one dataset.
pub fn read_path(path: &Path) -> Result<Dataset> {
    if !path.is_dir() {
        return read_file(path);
    }
    let mut datasets = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_rdf_file(entry.path()) {
            datasets.push(read_file(entry.path())?);
        }
    }
    if datasets.is_empty() {
        return Err(anyhow!("No RDF files found in {}", path.display()));
    }
    info!("Read {} files from {}", datasets.len(), path.display());
    Ok(Dataset::concat_all(datasets))
}

pub fn write_dataset_to_file(dataset: &Dataset, file: &Path, prefixes: &Prefixes) -> Result<()> {
    info!(
        "Writing dataset to file: {} with length {}",
        file.display(),
        dataset.len()
    );
    let out = File::create(file).with_context(|| format!("Failed to create {}", file.display()))?;
    let mut serializer = TurtleSerializer::new(BufWriter::new(out), prefixes);
    serializer.serialize_dataset(dataset)?;
    serializer.finish()?;
    Ok(())
}

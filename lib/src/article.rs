//! Builds the FRBR/FaBiO description of a preprint from its bibliographic fields.
//!
//! One article yields a work (`fabio:ResearchPaper`), a versioned expression
//! (`fabio:Article`) realizing it, and the expression's manifestations: a web page and,
//! when known, a PDF.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Config;
use crate::consts::{
    ARTICLE, CREATOR, DATE_PUBLISHED, DIGITAL_MANIFESTATION, FORMAT, HAS_MANIFESTATION, HAS_URL,
    IDENTIFIER, LABEL, PUBLISHER, REALIZATION_OF, RESEARCH_PAPER, TITLE, TYPE, WEB_PAGE,
};
use crate::dataset::Dataset;
use crate::errors::{Error, Result};
use crate::namespace::iri;
use crate::term::{BlankNodeAllocator, Literal, NamedNode, Object, Quad};

lazy_static! {
    static ref DOI: Regex = Regex::new(r"^10\.\d+/\S+$").unwrap();
}

/// Marker used by upstream exports for "no DOI".
const NO_DOI: &str = "NA";

fn default_version() -> u32 {
    1
}

/// Bibliographic fields as they arrive from an export, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleFields {
    pub doi: String,
    pub title: String,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub date: String,
    pub publisher: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub url: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_version")]
    pub version: u32,
}

/// Validated article fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub doi: String,
    pub title: String,
    pub date: NaiveDate,
    pub publisher: String,
    pub authors: Vec<String>,
    pub url: Url,
    pub pdf_url: Option<Url>,
    pub language: Option<String>,
    pub version: u32,
}

fn invalid(field: &'static str, value: &str) -> Error {
    Error::InvalidField {
        field,
        value: value.to_string(),
    }
}

/// Parses a DOI. `NA` and anything not shaped like `10.<registrant>/<suffix>` are rejected.
pub fn parse_doi(value: &str) -> Result<String> {
    let value = value.trim();
    if value == NO_DOI || !DOI.is_match(value) {
        return Err(invalid("doi", value));
    }
    Ok(value.to_string())
}

/// Parses `YYYY-MM-DD`, or an RFC 3339 timestamp whose UTC date is taken.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| invalid("date", value))
}

fn parse_url(field: &'static str, value: &str) -> Result<Url> {
    Url::parse(value.trim()).map_err(|_| invalid(field, value))
}

impl ArticleFields {
    pub fn validate(&self) -> Result<Article> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(invalid("title", &self.title));
        }
        if self.version == 0 {
            return Err(invalid("version", "0"));
        }
        Ok(Article {
            doi: parse_doi(&self.doi)?,
            title: title.to_string(),
            date: parse_date(&self.date)?,
            publisher: self.publisher.trim().to_string(),
            authors: self
                .authors
                .iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
            url: parse_url("url", &self.url)?,
            pdf_url: self
                .pdf_url
                .as_deref()
                .map(|u| parse_url("pdf_url", u))
                .transpose()?,
            language: self
                .language
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
            version: self.version,
        })
    }
}

impl Article {
    /// The work IRI: the base namespace plus the hex digest of the DOI, so every version of
    /// an article shares one work.
    pub fn work_iri(&self, base: &str) -> NamedNode {
        iri(base, blake3::hash(self.doi.as_bytes()).to_hex().as_str())
    }

    pub fn expression_iri(&self, base: &str) -> NamedNode {
        iri(base, &format!("{}v{}", self.doi, self.version))
    }

    pub fn to_dataset(&self, config: &Config, alloc: &mut BlankNodeAllocator) -> Dataset {
        let work = self.work_iri(&config.base_iri);
        let expression = self.expression_iri(&config.base_iri);
        let web_page = alloc.fresh();

        let title = match &self.language {
            Some(language) => Literal::language_tagged(self.title.as_str(), language.as_str()),
            None => Literal::string(self.title.as_str()),
        };
        let authors = Object::List(
            self.authors
                .iter()
                .map(|a| Literal::string(a.as_str()).into())
                .collect(),
        );

        let mut dataset = Dataset::from_quads([
            Quad::triple(work.clone(), TYPE, RESEARCH_PAPER),
            Quad::triple(work.clone(), IDENTIFIER, Literal::string(self.doi.as_str())),
            Quad::triple(expression.clone(), TYPE, ARTICLE),
            Quad::triple(
                expression.clone(),
                LABEL,
                Literal::string(format!("{} version {}", self.publisher, self.version)),
            ),
            Quad::triple(expression.clone(), REALIZATION_OF, work),
            Quad::triple(expression.clone(), TITLE, title),
            Quad::triple(expression.clone(), DATE_PUBLISHED, Literal::date(self.date)),
            Quad::triple(
                expression.clone(),
                PUBLISHER,
                Literal::string(self.publisher.as_str()),
            ),
            Quad::triple(expression.clone(), CREATOR, authors),
            Quad::triple(expression.clone(), HAS_MANIFESTATION, web_page.clone()),
            Quad::triple(web_page.clone(), TYPE, WEB_PAGE),
            Quad::triple(web_page, HAS_URL, Literal::any_uri(&self.url)),
        ]);

        if let Some(pdf_url) = &self.pdf_url {
            let pdf = alloc.fresh();
            dataset.extend([
                Quad::triple(expression, HAS_MANIFESTATION, pdf.clone()),
                Quad::triple(pdf.clone(), TYPE, DIGITAL_MANIFESTATION),
                Quad::triple(pdf.clone(), FORMAT, Literal::string("application/pdf")),
                Quad::triple(pdf, HAS_URL, Literal::any_uri(pdf_url)),
            ]);
        }
        dataset
    }
}

/// Validates one record and builds its statements.
pub fn to_dataset(
    fields: &ArticleFields,
    config: &Config,
    alloc: &mut BlankNodeAllocator,
) -> Result<Dataset> {
    let article = fields.validate()?;
    debug!("building article {} v{}", article.doi, article.version);
    Ok(article.to_dataset(config, alloc))
}

/// Builds every record into one dataset, sharing a blank node allocator so manifestation
/// nodes never collide.
pub fn articles_to_dataset(records: &[ArticleFields], config: &Config) -> Result<Dataset> {
    let mut alloc = BlankNodeAllocator::with_prefix("m");
    let datasets = records
        .iter()
        .map(|fields| to_dataset(fields, config, &mut alloc))
        .collect::<Result<Vec<_>>>()?;
    Ok(Dataset::concat_all(datasets))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<ArticleFields>),
    One(ArticleFields),
}

/// Reads a JSON file holding one record or an array of records.
pub fn from_json_file(path: &Path) -> anyhow::Result<Vec<ArticleFields>> {
    let file = std::fs::File::open(path)?;
    let records = match serde_json::from_reader(std::io::BufReader::new(file))? {
        OneOrMany::Many(records) => records,
        OneOrMany::One(record) => vec![record],
    };
    Ok(records)
}

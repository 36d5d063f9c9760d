// ABOUTME: Section assembly for multi-file presentations
// ABOUTME: Turns `sections` config entries into ordered, optionally numbered Markdown blocks

use crate::config::describe;
use crate::errors::{PremarkError, Result};
use crate::resources::read_local_content;
use log::{debug, info};
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Separator placed between slides (and between sections).
pub const SLIDE_BREAK: &str = "\n---\n";

const SECTION_KEYS: &[&str] = &["file", "title", "numbered"];

/// One Markdown fragment of a multi-part presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    filename: PathBuf,
    title: Option<String>,
    numbered: Option<bool>,
    number: Option<u32>,
}

impl Section {
    pub fn new<P: Into<PathBuf>>(filename: P, title: Option<String>) -> Self {
        Self {
            filename: infer_markdown_suffix(filename.into()),
            title: title.filter(|title| !title.is_empty()),
            numbered: None,
            number: None,
        }
    }

    /// Override the numbering default. Only titled sections can be numbered.
    pub fn with_numbering(mut self, numbered: bool) -> Result<Self> {
        if numbered && self.title.is_none() {
            return Err(PremarkError::ValidationError(format!(
                "section {:?} cannot be numbered without a title",
                self.filename
            )));
        }
        self.numbered = Some(numbered);
        Ok(self)
    }

    /// Build a section from a `sections` entry: either a bare filename or a
    /// mapping with `file`, `title` and `numbered`.
    pub fn from_entry(entry: &Value, parent_dir: Option<&Path>) -> Result<Self> {
        let join = |file: &str| match parent_dir {
            Some(dir) => dir.join(file),
            None => PathBuf::from(file),
        };

        match entry {
            Value::String(file) => Ok(Self::new(join(file.as_str()), None)),
            Value::Mapping(mapping) => {
                for key in mapping.keys() {
                    match key.as_str() {
                        Some(key) if SECTION_KEYS.contains(&key) => {}
                        _ => {
                            return Err(PremarkError::UnexpectedKeyError {
                                key: key_name(key),
                                context: "section entry".to_string(),
                            })
                        }
                    }
                }

                let file = match mapping.get("file") {
                    Some(Value::String(file)) => file,
                    Some(other) => {
                        return Err(PremarkError::ConfigParseError(format!(
                            "section 'file' must be a string, found {}",
                            describe(other)
                        )))
                    }
                    None => {
                        return Err(PremarkError::MissingFieldError {
                            field: "file".to_string(),
                            context: "section entry".to_string(),
                        })
                    }
                };

                let title = match mapping.get("title") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(title)) => Some(title.clone()),
                    Some(other) => {
                        return Err(PremarkError::ConfigParseError(format!(
                            "section 'title' must be a string, found {}",
                            describe(other)
                        )))
                    }
                };

                let section = Self::new(join(file.as_str()), title);
                match mapping.get("numbered") {
                    None | Some(Value::Null) => Ok(section),
                    Some(Value::Bool(numbered)) => section.with_numbering(*numbered),
                    Some(other) => Err(PremarkError::ConfigParseError(format!(
                        "section 'numbered' must be a boolean, found {}",
                        describe(other)
                    ))),
                }
            }
            other => Err(PremarkError::ConfigParseError(format!(
                "section entries must be filenames or mappings, found {}",
                describe(other)
            ))),
        }
    }

    /// Build sections in input order, numbering those that should be numbered
    /// sequentially from `starting_number`.
    pub fn from_entries(
        entries: &[Value],
        parent_dir: Option<&Path>,
        starting_number: u32,
    ) -> Result<Vec<Self>> {
        // None once the counter has run past u32::MAX.
        let mut next_number = Some(starting_number);
        let mut sections = Vec::with_capacity(entries.len());
        for entry in entries {
            let mut section = Self::from_entry(entry, parent_dir)?;
            if section.should_number() {
                let number = next_number.ok_or_else(|| {
                    PremarkError::ValidationError(format!(
                        "section {:?} needs a number past {}",
                        section.filename,
                        u32::MAX
                    ))
                })?;
                section.number = Some(number);
                next_number = number.checked_add(1);
            }
            sections.push(section);
        }
        debug!("Resolved {} sections", sections.len());
        Ok(sections)
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Number assigned by [`Section::from_entries`], if any.
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    /// Defaults to true exactly when the section has a title.
    pub fn should_number(&self) -> bool {
        self.numbered.unwrap_or(self.title.is_some())
    }

    /// Render the section body, prefixed with a title slide when titled.
    pub fn markdown(&self, number: Option<u32>) -> Result<String> {
        let body = read_local_content(&self.filename)?;
        let Some(title) = &self.title else {
            if number.is_some() {
                return Err(PremarkError::ValidationError(format!(
                    "section {:?} cannot be numbered without a title",
                    self.filename
                )));
            }
            return Ok(body);
        };

        let mut markdown = String::from("class: center, middle\n");
        if let Some(number) = number {
            markdown.push_str(&format!("## #{}\n", number));
        }
        markdown.push_str(&format!("# {}", title));
        markdown.push_str(SLIDE_BREAK);
        markdown.push_str(&body);
        Ok(markdown)
    }

    /// Render with the number assigned at construction.
    pub fn render(&self) -> Result<String> {
        self.markdown(self.number)
    }
}

/// Join rendered sections with slide breaks, in the given order.
pub fn join_sections(sections: &[Section]) -> Result<String> {
    let rendered = sections
        .iter()
        .map(Section::render)
        .collect::<Result<Vec<_>>>()?;
    Ok(rendered.join(SLIDE_BREAK))
}

/// Files given without an extension that don't exist are assumed to be `.md`.
fn infer_markdown_suffix(filename: PathBuf) -> PathBuf {
    if filename.extension().is_none() && !filename.exists() {
        let inferred = filename.with_extension("md");
        info!("Inferring .md suffix: changing {:?} to {:?}", filename, inferred);
        inferred
    } else {
        filename
    }
}

fn key_name(key: &Value) -> String {
    match key {
        Value::String(key) => key.clone(),
        other => serde_yaml::to_string(other)
            .map(|rendered| rendered.trim().to_string())
            .unwrap_or_else(|_| describe(other).to_string()),
    }
}

// ABOUTME: Presentation aggregation for the premark application
// ABOUTME: Resolves layered config, loads single-file or multi-section Markdown, and merges presentations

use crate::config::{
    ConfigChain, Defaults, PartialConfig, KEY_HTML_TEMPLATE, KEY_REMARK_ARGS, KEY_SECTIONS,
    KEY_SOURCE, KEY_STYLESHEET, KEY_TITLE,
};
use crate::errors::{PremarkError, Result};
use crate::html;
use crate::resources::FileSource;
use crate::section::{join_sections, Section, SLIDE_BREAK};
use log::{debug, info};
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Constructor arguments for a [`Presentation`]. These form the highest
/// priority config layer; `None` fields defer to the config file and defaults.
#[derive(Debug, Default)]
pub struct PresentationOptions {
    /// Literal Markdown. Mutually exclusive with `source`.
    pub markdown: Option<String>,
    /// A Markdown file, stream, or (with `sections` configured) a directory.
    pub source: Option<FileSource>,
    pub remark_args: Option<Value>,
    /// Template as a path, inline text or stream. Paths join the config
    /// chain; inline text and streams are used as-is.
    pub html_template: Option<FileSource>,
    pub stylesheet: Option<FileSource>,
    pub title: Option<String>,
    pub config_file: Option<FileSource>,
}

impl PresentationOptions {
    pub fn from_markdown<S: Into<String>>(markdown: S) -> Self {
        Self {
            markdown: Some(markdown.into()),
            ..Self::default()
        }
    }

    pub fn from_source<S: Into<FileSource>>(source: S) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }
}

/// A Remark.js presentation: resolved Markdown plus the resolved template,
/// stylesheet, title and renderer arguments.
///
/// Two presentations are equal when their Markdown, template text, stylesheet
/// text, renderer arguments and title all match.
#[derive(Debug, Clone)]
pub struct Presentation {
    markdown: String,
    config: ConfigChain,
    html_template: String,
    stylesheet: String,
    title: String,
    remark_args: Value,
}

impl Presentation {
    pub fn new(options: PresentationOptions) -> Result<Self> {
        Self::with_defaults(options, &Defaults::default())
    }

    pub fn from_markdown<S: Into<String>>(markdown: S) -> Result<Self> {
        Self::new(PresentationOptions::from_markdown(markdown))
    }

    pub fn from_source<S: Into<FileSource>>(source: S) -> Result<Self> {
        Self::new(PresentationOptions::from_source(source))
    }

    /// Build a presentation, consulting constructor arguments first, then the
    /// config file, then `defaults`.
    pub fn with_defaults(options: PresentationOptions, defaults: &Defaults) -> Result<Self> {
        if options.markdown.is_some() && options.source.is_some() {
            return Err(conflicting_sources());
        }

        let (template_path, template_text) = split_source(options.html_template)?;
        let (stylesheet_path, stylesheet_text) = split_source(options.stylesheet)?;

        let mut entries: Vec<(&str, Value)> = Vec::new();
        if let Some(remark_args) = options.remark_args {
            entries.push((KEY_REMARK_ARGS, remark_args));
        }
        if let Some(path) = template_path {
            entries.push((KEY_HTML_TEMPLATE, path_value(&path)));
        }
        if let Some(path) = stylesheet_path {
            entries.push((KEY_STYLESHEET, path_value(&path)));
        }
        if let Some(title) = options.title {
            entries.push((KEY_TITLE, Value::String(title)));
        }
        let arg_layer = PartialConfig::new(entries, &defaults.package);
        let file_layer = match options.config_file {
            Some(file) => PartialConfig::load_user_config(file, &defaults.package)?,
            None => PartialConfig::empty(),
        };
        let config = ConfigChain::new(vec![arg_layer, file_layer, defaults.to_partial_config()]);
        debug!("Resolved configuration keys: {:?}", config.keys());

        let markdown = match (options.markdown, options.source) {
            (Some(markdown), None) => {
                if config.contains_key(KEY_SECTIONS) {
                    return Err(PremarkError::TypeMismatchError(
                        "'sections' is configured but no source directory was given".to_string(),
                    ));
                }
                markdown
            }
            (None, Some(source)) => load_markdown(source, &config)?,
            (None, None) => match config.get_path(KEY_SOURCE)? {
                Some(path) => load_markdown(FileSource::FilePath(path), &config)?,
                None => {
                    return Err(PremarkError::ConflictingArgumentsError(
                        "one of literal markdown or a source must be given".to_string(),
                    ))
                }
            },
            (Some(_), Some(_)) => return Err(conflicting_sources()),
        };

        let html_template = match template_text {
            Some(text) => text,
            None => defaults
                .package
                .read(Path::new(config.require_str(KEY_HTML_TEMPLATE)?))?,
        };
        let stylesheet = match stylesheet_text {
            Some(text) => text,
            None => defaults
                .package
                .read(Path::new(config.require_str(KEY_STYLESHEET)?))?,
        };
        let title = config.require_str(KEY_TITLE)?.to_string();
        let remark_args = config.lookup(KEY_REMARK_ARGS)?.clone();

        Ok(Self {
            markdown,
            config,
            html_template,
            stylesheet,
            title,
            remark_args,
        })
    }

    pub fn markdown(&self) -> &str {
        &self.markdown
    }

    pub fn config(&self) -> &ConfigChain {
        &self.config
    }

    pub fn html_template(&self) -> &str {
        &self.html_template
    }

    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn remark_args(&self) -> &Value {
        &self.remark_args
    }

    pub fn to_html(&self) -> Result<String> {
        html::generate_html(self)
    }

    /// Concatenate two presentations into a new one. Both must share template,
    /// stylesheet and renderer arguments; everything else comes from `self`.
    pub fn concatenate(&self, other: &Presentation) -> Result<Presentation> {
        let mut mismatched = Vec::new();
        if self.html_template != other.html_template {
            mismatched.push("html template");
        }
        if self.stylesheet != other.stylesheet {
            mismatched.push("stylesheet");
        }
        if self.remark_args != other.remark_args {
            mismatched.push("remark args");
        }
        if !mismatched.is_empty() {
            return Err(PremarkError::ConcatenationError(format!(
                "{} differ",
                mismatched.join(", ")
            )));
        }

        let mut merged = self.clone();
        merged.markdown = format!("{}{}{}", self.markdown, SLIDE_BREAK, other.markdown);
        Ok(merged)
    }

    /// Left-fold [`Presentation::concatenate`] over a sequence.
    pub fn from_presentations<I>(presentations: I) -> Result<Presentation>
    where
        I: IntoIterator<Item = Presentation>,
    {
        let mut presentations = presentations.into_iter();
        let first = presentations.next().ok_or_else(|| {
            PremarkError::ValidationError("cannot merge an empty list of presentations".to_string())
        })?;
        presentations.try_fold(first, |merged, next| merged.concatenate(&next))
    }
}

impl PartialEq for Presentation {
    fn eq(&self, other: &Self) -> bool {
        self.markdown == other.markdown
            && self.html_template == other.html_template
            && self.stylesheet == other.stylesheet
            && self.remark_args == other.remark_args
            && self.title == other.title
    }
}

/// Separate a path (which joins the config chain) from inline content.
fn split_source(source: Option<FileSource>) -> Result<(Option<PathBuf>, Option<String>)> {
    match source {
        None => Ok((None, None)),
        Some(FileSource::FilePath(path)) => Ok((Some(path), None)),
        Some(other) => Ok((None, Some(other.read_contents()?))),
    }
}

fn path_value(path: &Path) -> Value {
    Value::String(path.to_string_lossy().into_owned())
}

fn conflicting_sources() -> PremarkError {
    PremarkError::ConflictingArgumentsError(
        "only one of literal markdown and a source may be given".to_string(),
    )
}

/// Load Markdown from a single file, a stream, or a directory of sections.
fn load_markdown(source: FileSource, config: &ConfigChain) -> Result<String> {
    let Some(sections) = config.get(KEY_SECTIONS) else {
        if let Some(path) = source.as_path() {
            if path.is_dir() {
                return Err(PremarkError::ConflictingArgumentsError(format!(
                    "source {:?} is a directory but no 'sections' are configured",
                    path
                )));
            }
        }
        return source.read_contents();
    };

    let directory = match source.as_path() {
        Some(path) if path.is_dir() => path.to_path_buf(),
        Some(path) => {
            return Err(PremarkError::TypeMismatchError(format!(
                "'sections' is configured so source {:?} must be a directory",
                path
            )))
        }
        None => {
            return Err(PremarkError::TypeMismatchError(
                "'sections' is configured so source must be a directory path".to_string(),
            ))
        }
    };

    let Value::Sequence(entries) = sections else {
        return Err(PremarkError::ConfigParseError(
            "'sections' must be a list of filenames or {file, title, numbered} entries"
                .to_string(),
        ));
    };

    info!(
        "Assembling {} sections from directory {:?}",
        entries.len(),
        directory
    );
    let sections = Section::from_entries(entries, Some(&directory), 1)?;
    join_sections(&sections)
}

// ABOUTME: Configuration module for the premark application
// ABOUTME: Layered YAML configuration (constructor args > config file > package defaults)

use crate::errors::{PremarkError, Result};
use crate::resources::{FileSource, PackageData};
use indexmap::IndexMap;
use log::{debug, info};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

pub const KEY_SOURCE: &str = "source";
pub const KEY_SECTIONS: &str = "sections";
pub const KEY_STYLESHEET: &str = "stylesheet";
pub const KEY_HTML_TEMPLATE: &str = "html_template";
pub const KEY_OUTPUT_FILE: &str = "output_file";
pub const KEY_REMARK_ARGS: &str = "remark_args";
pub const KEY_TITLE: &str = "title";

/// Keys accepted in a user config file, after alias normalisation.
pub const RECOGNIZED_KEYS: &[&str] = &[
    KEY_SOURCE,
    KEY_SECTIONS,
    KEY_STYLESHEET,
    KEY_HTML_TEMPLATE,
    KEY_OUTPUT_FILE,
    KEY_REMARK_ARGS,
    KEY_TITLE,
];

/// Alternative spellings accepted in config files.
const KEY_ALIASES: &[(&str, &str)] = &[
    ("css_file", KEY_STYLESHEET),
    ("html_template_file", KEY_HTML_TEMPLATE),
];

const PATH_KEYS: &[&str] = &[KEY_SOURCE, KEY_STYLESHEET, KEY_HTML_TEMPLATE, KEY_OUTPUT_FILE];

/// One layer of configuration: an ordered mapping of string keys to YAML values.
///
/// String values using the `{{premark}}` placeholder are rewritten to package
/// paths when the layer is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialConfig {
    entries: IndexMap<String, Value>,
}

impl PartialConfig {
    pub fn new<I, K>(entries: I, package: &PackageData) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let entries: IndexMap<String, Value> = entries
            .into_iter()
            .map(|(key, value)| (key.into(), substitute_placeholders(value, package)))
            .collect();
        debug!(
            "Created new PartialConfig with keys {:?}",
            entries.keys().collect::<Vec<_>>()
        );
        Self { entries }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse YAML text into a layer. The document must be a mapping with
    /// string keys; an empty document gives an empty layer.
    pub fn from_yaml(yaml: &str, package: &PackageData) -> Result<Self> {
        let parsed: Value = serde_yaml::from_str(yaml)?;
        let mapping = match parsed {
            Value::Mapping(mapping) => mapping,
            Value::Null => Mapping::new(),
            other => {
                return Err(PremarkError::ConfigParseError(format!(
                    "config must be a mapping, found {}",
                    describe(&other)
                )))
            }
        };

        let mut entries = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            match key {
                Value::String(key) => entries.push((key, value)),
                other => {
                    return Err(PremarkError::ConfigParseError(format!(
                        "config keys must be strings, found {}",
                        describe(&other)
                    )))
                }
            }
        }
        Ok(Self::new(entries, package))
    }

    pub fn from_file(file: FileSource, package: &PackageData) -> Result<Self> {
        let contents = file.read_contents()?;
        Self::from_yaml(&contents, package)
    }

    /// Load a user-supplied config file: aliases are normalised, unknown keys
    /// rejected and relative paths resolved against the file's directory.
    pub fn load_user_config(file: FileSource, package: &PackageData) -> Result<Self> {
        let base_dir = file
            .as_path()
            .and_then(Path::parent)
            .map(Path::to_path_buf);
        info!("Loading config file: {:?}", file);

        let mut config = Self::from_file(file, package)?;
        config.normalize_aliases()?;
        config.validate_keys()?;
        if let Some(base_dir) = base_dir {
            config.resolve_relative_paths(&base_dir);
        }
        Ok(config)
    }

    fn normalize_aliases(&mut self) -> Result<()> {
        for (alias, canonical) in KEY_ALIASES {
            if let Some(value) = self.entries.shift_remove(*alias) {
                if self.entries.contains_key(*canonical) {
                    return Err(PremarkError::ConfigParseError(format!(
                        "both '{}' and its alias '{}' are set",
                        canonical, alias
                    )));
                }
                self.entries.insert((*canonical).to_string(), value);
            }
        }
        Ok(())
    }

    pub fn validate_keys(&self) -> Result<()> {
        match self
            .entries
            .keys()
            .find(|key| !RECOGNIZED_KEYS.contains(&key.as_str()))
        {
            Some(key) => Err(PremarkError::UnexpectedKeyError {
                key: key.clone(),
                context: "config file".to_string(),
            }),
            None => Ok(()),
        }
    }

    fn resolve_relative_paths(&mut self, base_dir: &Path) {
        for key in PATH_KEYS {
            if let Some(Value::String(path)) = self.entries.get_mut(*key) {
                if Path::new(path.as_str()).is_relative() {
                    let resolved = base_dir.join(path.as_str());
                    *path = resolved.to_string_lossy().into_owned();
                }
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn substitute_placeholders(value: Value, package: &PackageData) -> Value {
    match value {
        Value::String(text) => match package.interpolate(&text) {
            Some(path) => Value::String(path.to_string_lossy().into_owned()),
            None => Value::String(text),
        },
        Value::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(|item| substitute_placeholders(item, package))
                .collect(),
        ),
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, item)| (key, substitute_placeholders(item, package)))
                .collect(),
        ),
        other => other,
    }
}

pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Priority-ordered list of layers. Lookup returns the value from the first
/// layer defining a key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigChain {
    layers: Vec<PartialConfig>,
}

impl ConfigChain {
    /// Layers are given highest priority first.
    pub fn new(layers: Vec<PartialConfig>) -> Self {
        Self { layers }
    }

    pub fn layers(&self) -> &[PartialConfig] {
        &self.layers
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }

    pub fn lookup(&self, key: &str) -> Result<&Value> {
        self.get(key)
            .ok_or_else(|| PremarkError::KeyNotFoundError(key.to_string()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.layers.iter().any(|layer| layer.contains_key(key))
    }

    /// Union of keys across all layers, in first-seen order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for key in self.layers.iter().flat_map(|layer| layer.keys()) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        keys
    }

    pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(other) => Err(PremarkError::TypeMismatchError(format!(
                "expected '{}' to be a string, found {}",
                key,
                describe(other)
            ))),
        }
    }

    pub fn get_path(&self, key: &str) -> Result<Option<PathBuf>> {
        Ok(self.get_str(key)?.map(PathBuf::from))
    }

    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.get_str(key)?
            .ok_or_else(|| PremarkError::KeyNotFoundError(key.to_string()))
    }
}

/// Package-shipped defaults: the lowest-priority config layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub package: PackageData,
    pub stylesheet: String,
    pub html_template: String,
    pub title: String,
    pub remark_args: Value,
}

impl Default for Defaults {
    fn default() -> Self {
        Self::bundled(PackageData::default())
    }
}

impl Defaults {
    /// Defaults pointing at the template and stylesheet bundled in `package`.
    pub fn bundled(package: PackageData) -> Self {
        let mut remark_args = Mapping::new();
        remark_args.insert("ratio".into(), "16:9".into());
        remark_args.insert("slideNumberFormat".into(), "(%current%/%total%)".into());
        remark_args.insert("countIncrementalSlides".into(), false.into());
        remark_args.insert("highlightLines".into(), true.into());

        Self {
            package,
            stylesheet: "{{premark}}/default.css".to_string(),
            html_template: "{{premark}}/default.html".to_string(),
            title: "Presentation".to_string(),
            remark_args: Value::Mapping(remark_args),
        }
    }

    pub fn to_partial_config(&self) -> PartialConfig {
        PartialConfig::new(
            [
                (KEY_STYLESHEET, Value::String(self.stylesheet.clone())),
                (KEY_HTML_TEMPLATE, Value::String(self.html_template.clone())),
                (KEY_TITLE, Value::String(self.title.clone())),
                (KEY_REMARK_ARGS, self.remark_args.clone()),
            ],
            &self.package,
        )
    }
}

//! Storage path construction
//!
//! Layout: `<root>/<data|figs>/[subfolder/]<module>/<classes>/<func>/<id>_.<ext>`
//!
//! - module segments are the dotted module path without its top-level package
//! - class segments are the lowercased class chain of a method
//! - `<id>` is [`dict_to_id`] of the selected arguments; the trailing `_`
//!   keeps the name parseable when no argument is selected

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::codec::{dict_to_id, CodecOptions, PAIR_SEPARATOR};
use crate::config::{DEFAULT_DATA_DIR, DEFAULT_FIG_DIR};
use crate::error::{Result, TidypathError};
use crate::value::ArgumentMap;

/// File stems longer than this are replaced by a digest
pub const MAX_STEM_BYTES: usize = 200;

/// Prefix of digest file stems
pub const HASHED_STEM_PREFIX: &str = "h-";

/// Whether a file stem is the digest of an over-long id (`h-<sha256>_`)
pub fn is_hashed_stem(stem: &str) -> bool {
    stem.strip_prefix(HASHED_STEM_PREFIX)
        .and_then(|rest| rest.strip_suffix(PAIR_SEPARATOR))
        .is_some_and(|hash| hash.len() == 64 && hash.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Which classes of a method's chain become path segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncludeClasses {
    /// No class segments
    None,
    /// Only classes visible in the function's defining module
    #[default]
    File,
    /// The whole chain
    All,
}

impl FromStr for IncludeClasses {
    type Err = TidypathError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "" | "none" => Ok(IncludeClasses::None),
            "file" => Ok(IncludeClasses::File),
            "all" => Ok(IncludeClasses::All),
            other => Err(TidypathError::unsupported(
                "include_classes",
                other,
                "none, file, all",
            )),
        }
    }
}

impl fmt::Display for IncludeClasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncludeClasses::None => write!(f, "none"),
            IncludeClasses::File => write!(f, "file"),
            IncludeClasses::All => write!(f, "all"),
        }
    }
}

/// One class in a method's ancestry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRef {
    pub name: String,
    /// Whether the class is defined in, or imported into, the function's module
    pub in_module: bool,
}

impl ClassRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            in_module: true,
        }
    }

    /// A class that is not visible in the function's module
    pub fn external(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            in_module: false,
        }
    }
}

/// Where a function is defined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionIdentity {
    /// Dotted module path, split into components
    pub module: Vec<String>,
    /// Class ancestry for methods, root base first and defining class last
    pub class_chain: Vec<ClassRef>,
    pub name: String,
}

impl FunctionIdentity {
    /// Identity of a free function in a dotted module (`pkg.sub.module`)
    pub fn new(module: &str, name: impl Into<String>) -> Self {
        Self {
            module: module
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            class_chain: Vec::new(),
            name: name.into(),
        }
    }

    /// Append the next (more derived) class of the chain
    pub fn with_class(mut self, class: ClassRef) -> Self {
        self.class_chain.push(class);
        self
    }

    pub fn is_method(&self) -> bool {
        !self.class_chain.is_empty()
    }

    /// Module components below the top-level package
    pub fn module_segments(&self) -> &[String] {
        self.module.get(1..).unwrap_or(&[])
    }

    /// Lowercased class names that become path segments
    pub fn class_segments(&self, include: IncludeClasses, skip_bases: usize) -> Vec<String> {
        let chain = self.class_chain.iter().skip(skip_bases);
        match include {
            IncludeClasses::None => Vec::new(),
            IncludeClasses::File => chain
                .filter(|c| c.in_module)
                .map(|c| c.name.to_lowercase())
                .collect(),
            IncludeClasses::All => chain.map(|c| c.name.to_lowercase()).collect(),
        }
    }

    /// Directory of this function relative to a kind directory
    pub fn relative_dir(
        &self,
        include: IncludeClasses,
        skip_bases: usize,
        funcname_in_filename: bool,
    ) -> PathBuf {
        let mut dir = PathBuf::new();
        for segment in self.module_segments() {
            dir.push(segment);
        }
        for segment in self.class_segments(include, skip_bases) {
            dir.push(segment);
        }
        if funcname_in_filename {
            dir.push(&self.name);
        }
        dir
    }
}

/// Per-call knobs for path construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOptions {
    pub include_classes: IncludeClasses,
    pub funcname_in_filename: bool,
    /// Extra directory between the kind directory and the module segments
    pub subfolder: Option<String>,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            include_classes: IncludeClasses::File,
            funcname_in_filename: true,
            subfolder: None,
        }
    }
}

/// A path to a cached data file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPath(PathBuf);

/// A path to a saved figure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigPath(PathBuf);

macro_rules! impl_typed_path {
    ($type:ident) => {
        impl $type {
            fn new(path: PathBuf) -> Self {
                Self(path)
            }

            /// Get the underlying Path reference
            pub fn as_path(&self) -> &Path {
                &self.0
            }

            /// Check if the file exists
            pub fn exists(&self) -> bool {
                self.0.exists()
            }

            /// Get the file name
            pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
                self.0.file_name()
            }

            /// Get the extension without the dot
            pub fn extension(&self) -> Option<&str> {
                self.0.extension().and_then(|e| e.to_str())
            }
        }

        impl From<$type> for PathBuf {
            fn from(typed: $type) -> PathBuf {
                typed.0
            }
        }

        impl AsRef<Path> for $type {
            fn as_ref(&self) -> &Path {
                &self.0
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.display().fmt(f)
            }
        }
    };
}

impl_typed_path!(DataPath);
impl_typed_path!(FigPath);

/// Builds storage paths under a project root
#[derive(Debug, Clone, PartialEq)]
pub struct PathBuilder {
    root: PathBuf,
    data_dir: String,
    fig_dir: String,
    codec: CodecOptions,
    skip_bases: usize,
}

impl PathBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            data_dir: DEFAULT_DATA_DIR.to_string(),
            fig_dir: DEFAULT_FIG_DIR.to_string(),
            codec: CodecOptions::default(),
            skip_bases: 1,
        }
    }

    pub fn with_dirs(mut self, data_dir: &str, fig_dir: &str) -> Self {
        self.data_dir = data_dir.to_string();
        self.fig_dir = fig_dir.to_string();
        self
    }

    pub fn with_codec(mut self, codec: CodecOptions) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_skip_bases(mut self, skip_bases: usize) -> Self {
        self.skip_bases = skip_bases;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn codec(&self) -> &CodecOptions {
        &self.codec
    }

    /// File name for an argument map: `<id>_.<ext>`
    pub fn file_name(&self, keys: &ArgumentMap, ext: &str) -> String {
        let mut stem = dict_to_id(keys, &self.codec);
        stem.push_str(PAIR_SEPARATOR);
        if stem.len() > MAX_STEM_BYTES {
            let digest = Sha256::digest(stem.as_bytes());
            stem = format!("{}{}{}", HASHED_STEM_PREFIX, hex::encode(digest), PAIR_SEPARATOR);
        }
        format!("{}.{}", stem, ext)
    }

    /// Directory for a function under one kind directory, without creating it
    pub fn function_dir(
        &self,
        kind_dir: &str,
        identity: &FunctionIdentity,
        opts: &PathOptions,
    ) -> PathBuf {
        let mut dir = self.root.join(kind_dir);
        if let Some(subfolder) = opts.subfolder.as_deref().filter(|s| !s.is_empty()) {
            dir.push(subfolder);
        }
        dir.join(identity.relative_dir(
            opts.include_classes,
            self.skip_bases,
            opts.funcname_in_filename,
        ))
    }

    /// Build the full path and create its parent directories.
    pub fn saving_path(
        &self,
        kind_dir: &str,
        identity: &FunctionIdentity,
        keys: &ArgumentMap,
        ext: &str,
        opts: &PathOptions,
    ) -> Result<PathBuf> {
        let dir = self.function_dir(kind_dir, identity, opts);
        fs::create_dir_all(&dir)
            .map_err(|e| TidypathError::io_operation("create directory", dir.display(), e))?;
        let path = dir.join(self.file_name(keys, ext));
        tracing::debug!(path = %path.display(), function = %identity.name, "built saving path");
        Ok(path)
    }

    /// Path for cached data of a call
    pub fn data_path(
        &self,
        identity: &FunctionIdentity,
        keys: &ArgumentMap,
        ext: &str,
        opts: &PathOptions,
    ) -> Result<DataPath> {
        self.saving_path(&self.data_dir, identity, keys, ext, opts)
            .map(DataPath::new)
    }

    /// Path for a figure of a call
    pub fn fig_path(
        &self,
        identity: &FunctionIdentity,
        keys: &ArgumentMap,
        ext: &str,
        opts: &PathOptions,
    ) -> Result<FigPath> {
        self.saving_path(&self.fig_dir, identity, keys, ext, opts)
            .map(FigPath::new)
    }
}

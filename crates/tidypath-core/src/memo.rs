//! Memoized data: compute once, load from disk afterwards
//!
//! [`SaveData`] wraps one function. Each call classifies its arguments,
//! selects the key arguments, derives the data path and either loads the
//! existing file or runs the computation and stores its result.
//!
//! Nothing guards the check-then-write sequence: two processes computing
//! the same call both write, and the last write wins.

use std::path::Path;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::classify::{CallArgs, Signature};
use crate::config::TidypathConfig;
use crate::error::{Result, TidypathError};
use crate::logging::CacheMetrics;
use crate::paths::{DataPath, FunctionIdentity, IncludeClasses, PathBuilder, PathOptions};
use crate::select::SelectionSpec;
use crate::storage::DataFormat;
use crate::{log_cache_metrics, trace_time};

/// Defaults of a memoized function
#[derive(Debug, Clone, PartialEq)]
pub struct SaveDataOptions {
    /// Storage extension, selects the backend
    pub ext: String,
    pub keys: SelectionSpec,
    pub include_classes: IncludeClasses,
    pub funcname_in_filename: bool,
    pub overwrite: bool,
    pub save: bool,
    pub add_pos_only_to_all: bool,
    pub subfolder: Option<String>,
}

impl Default for SaveDataOptions {
    fn default() -> Self {
        Self {
            ext: "json".to_string(),
            keys: SelectionSpec::default(),
            include_classes: IncludeClasses::File,
            funcname_in_filename: true,
            overwrite: false,
            save: true,
            add_pos_only_to_all: false,
            subfolder: None,
        }
    }
}

/// Options injected at call time; `None` keeps the function's default
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallOptions {
    pub save: Option<bool>,
    pub overwrite: Option<bool>,
    pub keys: Option<SelectionSpec>,
    pub funcname_in_filename: Option<bool>,
    /// Figures only
    pub return_fig: Option<bool>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(mut self, save: bool) -> Self {
        self.save = Some(save);
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    pub fn keys(mut self, keys: impl Into<SelectionSpec>) -> Self {
        self.keys = Some(keys.into());
        self
    }

    pub fn funcname_in_filename(mut self, include: bool) -> Self {
        self.funcname_in_filename = Some(include);
        self
    }

    pub fn return_fig(mut self, return_fig: bool) -> Self {
        self.return_fig = Some(return_fig);
        self
    }
}

/// A function whose results are cached on disk
#[derive(Debug)]
pub struct SaveData {
    identity: FunctionIdentity,
    signature: Signature,
    builder: PathBuilder,
    options: SaveDataOptions,
    metrics: CacheMetrics,
}

impl SaveData {
    pub fn new(identity: FunctionIdentity, signature: Signature, builder: PathBuilder) -> Self {
        Self {
            identity,
            signature,
            builder,
            options: SaveDataOptions::default(),
            metrics: CacheMetrics::new(),
        }
    }

    /// Use the layout and defaults of a project configuration
    pub fn from_config(
        identity: FunctionIdentity,
        signature: Signature,
        root: &Path,
        config: &TidypathConfig,
    ) -> Self {
        Self::new(identity, signature, config.path_builder(root)).with_options(config.data_options())
    }

    pub fn with_options(mut self, options: SaveDataOptions) -> Self {
        self.options = options;
        self
    }

    pub fn identity(&self) -> &FunctionIdentity {
        &self.identity
    }

    pub fn options(&self) -> &SaveDataOptions {
        &self.options
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Start counting hits and misses afresh, e.g. between batches
    pub fn reset_metrics(&self) {
        self.metrics.reset();
    }

    /// Data path of a call, creating its directory
    pub fn path_for(&self, call: &CallArgs, opts: &CallOptions) -> Result<DataPath> {
        let classified = self
            .signature
            .classify(call, self.options.add_pos_only_to_all)?;
        let keys = opts.keys.as_ref().unwrap_or(&self.options.keys);
        let selected = keys.resolve(&classified)?;
        let path_opts = PathOptions {
            include_classes: self.options.include_classes,
            funcname_in_filename: opts
                .funcname_in_filename
                .unwrap_or(self.options.funcname_in_filename),
            subfolder: self.options.subfolder.clone(),
        };
        self.builder
            .data_path(&self.identity, &selected, &self.options.ext, &path_opts)
    }

    /// Run `compute` unless a stored result exists for this call.
    pub fn call<T, F>(&self, call: &CallArgs, opts: &CallOptions, compute: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> T,
    {
        self.try_call(call, opts, || Ok::<T, TidypathError>(compute()))
    }

    /// Like [`SaveData::call`] for fallible computations; errors are not stored.
    #[tracing::instrument(skip_all, fields(function = %self.identity.name))]
    pub fn try_call<T, E, F>(
        &self,
        call: &CallArgs,
        opts: &CallOptions,
        compute: F,
    ) -> std::result::Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<TidypathError>,
        F: FnOnce() -> std::result::Result<T, E>,
    {
        let format = DataFormat::from_ext(&self.options.ext)?;
        let path = self.path_for(call, opts)?;
        let overwrite = opts.overwrite.unwrap_or(self.options.overwrite);
        let save = opts.save.unwrap_or(self.options.save);

        if path.exists() && !overwrite {
            self.metrics.record_cache_hit();
            tracing::debug!(path = %path, "cache hit");
            let value = format.load(path.as_path())?;
            log_cache_metrics!(self.metrics, self.identity.name.as_str());
            return Ok(value);
        }

        self.metrics.record_cache_miss();
        tracing::debug!(path = %path, overwrite, "cache miss");

        let start = Instant::now();
        let result = compute()?;
        trace_time!(start, "compute", function = self.identity.name.as_str());

        if save {
            format.save(&result, path.as_path())?;
            self.metrics.record_write();
        }
        log_cache_metrics!(self.metrics, self.identity.name.as_str());
        Ok(result)
    }
}

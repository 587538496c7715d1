//! Figure functions: always drawn, saved under the figure directory
//!
//! Unlike [`crate::memo::SaveData`] the drawing function runs on every
//! call; the stored file only decides whether it gets written again.

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::classify::{CallArgs, Signature};
use crate::config::TidypathConfig;
use crate::error::{Result, TidypathError};
use crate::logging::CacheMetrics;
use crate::memo::CallOptions;
use crate::paths::{FigPath, FunctionIdentity, IncludeClasses, PathBuilder, PathOptions};
use crate::select::SelectionSpec;
use crate::{bail_unsupported, trace_time};

/// Extension that routes interactive figures to [`Figure::write_html`]
pub const HTML_EXT: &str = "html";

/// What kind of figure a value is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureBackend {
    /// Not a figure at all
    NoFigure,
    /// Rendered once to an image file
    Static,
    /// Can also be exported as a standalone html document
    Interactive,
}

impl std::fmt::Display for FigureBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FigureBackend::NoFigure => write!(f, "no figure"),
            FigureBackend::Static => write!(f, "static"),
            FigureBackend::Interactive => write!(f, "interactive"),
        }
    }
}

/// A value that can be written to disk as a figure
pub trait Figure {
    fn backend(&self) -> FigureBackend;

    /// Write the figure as an image in `format` (an extension without the dot)
    fn write_image(&self, _path: &Path, format: &str) -> Result<()> {
        bail_unsupported!("figure image format", format, "none")
    }

    /// Write the figure as a standalone html document
    fn write_html(&self, _path: &Path) -> Result<()> {
        bail_unsupported!("figure format", HTML_EXT, "image formats only")
    }
}

/// Functions that draw nothing
impl Figure for () {
    fn backend(&self) -> FigureBackend {
        FigureBackend::NoFigure
    }
}

/// A static figure held as svg markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgFigure {
    pub svg: String,
}

impl SvgFigure {
    pub fn new(svg: impl Into<String>) -> Self {
        Self { svg: svg.into() }
    }
}

impl Figure for SvgFigure {
    fn backend(&self) -> FigureBackend {
        FigureBackend::Static
    }

    fn write_image(&self, path: &Path, format: &str) -> Result<()> {
        if !format.eq_ignore_ascii_case("svg") {
            bail_unsupported!("svg figure format", format, "svg");
        }
        fs::write(path, &self.svg)
            .map_err(|e| TidypathError::io_operation("write figure", path.display(), e))
    }
}

/// An interactive figure held as an html document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlFigure {
    pub html: String,
}

impl HtmlFigure {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

impl Figure for HtmlFigure {
    fn backend(&self) -> FigureBackend {
        FigureBackend::Interactive
    }

    fn write_image(&self, _path: &Path, format: &str) -> Result<()> {
        bail_unsupported!("html figure image format", format, HTML_EXT)
    }

    fn write_html(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.html)
            .map_err(|e| TidypathError::io_operation("write figure", path.display(), e))
    }
}

/// Write a figure according to its backend
pub fn write_figure<F: Figure + ?Sized>(fig: &F, path: &Path, ext: &str) -> Result<()> {
    match fig.backend() {
        FigureBackend::Static => fig.write_image(path, ext),
        FigureBackend::Interactive if ext.eq_ignore_ascii_case(HTML_EXT) => fig.write_html(path),
        FigureBackend::Interactive => fig.write_image(path, ext),
        FigureBackend::NoFigure => Err(TidypathError::unsupported(
            "figure kind",
            FigureBackend::NoFigure,
            "static, interactive",
        )),
    }
}

/// Defaults of a figure function
#[derive(Debug, Clone, PartialEq)]
pub struct FigureOptions {
    pub ext: String,
    pub keys: SelectionSpec,
    pub include_classes: IncludeClasses,
    pub funcname_in_filename: bool,
    pub overwrite: bool,
    pub save: bool,
    pub return_fig: bool,
    pub add_pos_only_to_all: bool,
    pub subfolder: Option<String>,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            ext: "svg".to_string(),
            keys: SelectionSpec::from("kwargs"),
            include_classes: IncludeClasses::File,
            funcname_in_filename: true,
            overwrite: true,
            save: true,
            return_fig: false,
            add_pos_only_to_all: false,
            subfolder: None,
        }
    }
}

/// A function whose figures are saved on every call
#[derive(Debug)]
pub struct SaveFig {
    identity: FunctionIdentity,
    signature: Signature,
    builder: PathBuilder,
    options: FigureOptions,
    metrics: CacheMetrics,
}

impl SaveFig {
    pub fn new(identity: FunctionIdentity, signature: Signature, builder: PathBuilder) -> Self {
        Self {
            identity,
            signature,
            builder,
            options: FigureOptions::default(),
            metrics: CacheMetrics::new(),
        }
    }

    pub fn from_config(
        identity: FunctionIdentity,
        signature: Signature,
        root: &Path,
        config: &TidypathConfig,
    ) -> Self {
        Self::new(identity, signature, config.path_builder(root))
            .with_options(config.figure_options())
    }

    pub fn with_options(mut self, options: FigureOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FigureOptions {
        &self.options
    }

    /// Counts existing files as hits and written figures as writes
    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }

    /// Figure path of a call, creating its directory
    pub fn path_for(&self, call: &CallArgs, opts: &CallOptions) -> Result<FigPath> {
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
            .fig_path(&self.identity, &selected, &self.options.ext, &path_opts)
    }

    /// Draw, save when needed, and hand the figure back if `return_fig`.
    pub fn call<Fig, F>(&self, call: &CallArgs, opts: &CallOptions, draw: F) -> Result<Option<Fig>>
    where
        Fig: Figure,
        F: FnOnce() -> Fig,
    {
        self.try_call(call, opts, || Ok::<Fig, TidypathError>(draw()))
    }

    #[tracing::instrument(skip_all, fields(function = %self.identity.name))]
    pub fn try_call<Fig, E, F>(
        &self,
        call: &CallArgs,
        opts: &CallOptions,
        draw: F,
    ) -> std::result::Result<Option<Fig>, E>
    where
        Fig: Figure,
        E: From<TidypathError>,
        F: FnOnce() -> std::result::Result<Fig, E>,
    {
        let start = Instant::now();
        let fig = draw()?;
        trace_time!(start, "draw", function = self.identity.name.as_str());

        let path = self.path_for(call, opts)?;
        let overwrite = opts.overwrite.unwrap_or(self.options.overwrite);
        let save = opts.save.unwrap_or(self.options.save);

        if path.exists() && !overwrite {
            self.metrics.record_cache_hit();
            tracing::debug!(path = %path, "figure exists, not rewritten");
        } else {
            self.metrics.record_cache_miss();
            if save {
                write_figure(&fig, path.as_path(), &self.options.ext)?;
                self.metrics.record_write();
                tracing::debug!(path = %path, backend = %fig.backend(), "saved figure");
            }
        }

        let return_fig = opts.return_fig.unwrap_or(self.options.return_fig);
        Ok(return_fig.then_some(fig))
    }
}

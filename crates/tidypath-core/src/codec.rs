//! Argument codec: values <-> filename tokens
//!
//! Filename mini-language:
//! - a key/value pair is `name-token`, pairs are joined with `_`
//! - underscores in names become `-` so they never clash with the pair separator
//! - the decimal point of a float is written as `--`
//!
//! There is no escaping. Names or string values that contain `-` or `_`
//! may not decode back to what was encoded; the rendering itself stays
//! deterministic, which is all a cache key needs.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TidypathError};
use crate::value::{float_repr, ArgumentMap, Value};

/// Replacement for `.` inside float tokens
pub const FLOAT_DOT: &str = "--";

/// Separator between `name-token` pairs
pub const PAIR_SEPARATOR: &str = "_";

/// Codec tuning knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    /// Decimal digits kept for non-integral floats
    pub ndigits: u32,
    /// Containers with at least this many elements collapse to `"{n}-values"`
    pub iterable_maxsize: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            ndigits: 2,
            iterable_maxsize: 3,
        }
    }
}

/// How [`id_updater`] changes the decoded argument map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Insert or overwrite the given keys
    #[default]
    Add,
    /// Remove the given keys (values are ignored)
    Delete,
}

impl FromStr for UpdateMode {
    type Err = TidypathError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "add" => Ok(UpdateMode::Add),
            "delete" => Ok(UpdateMode::Delete),
            other => Err(TidypathError::unsupported("update mode", other, "add, delete")),
        }
    }
}

/// Round `x` to `ndigits` decimals using exact decimal rounding.
fn round_float(x: f64, ndigits: u32) -> f64 {
    format!("{:.*}", ndigits as usize, x)
        .parse()
        .unwrap_or(x)
}

fn encode_float(x: f64, opts: &CodecOptions) -> String {
    if !x.is_finite() {
        return float_repr(x);
    }
    if x == x.trunc() {
        if x == 0.0 {
            return "0".to_string();
        }
        return format!("{:.0}", x);
    }
    float_repr(round_float(x, opts.ndigits)).replace('.', FLOAT_DOT)
}

fn collapsed(len: usize) -> String {
    format!("{}-values", len)
}

/// Render one value as a filename token.
pub fn encode(value: &Value, opts: &CodecOptions) -> String {
    match value {
        Value::Float(x) => encode_float(*x, opts),
        Value::Int(i) => i.to_string(),
        Value::Callable(name) => name.clone(),
        Value::Map(map) => {
            if map.len() >= opts.iterable_maxsize {
                collapsed(map.len())
            } else {
                render_pairs(map, opts, "-")
            }
        }
        Value::List(items) | Value::Tuple(items) => {
            if items.len() >= opts.iterable_maxsize {
                collapsed(items.len())
            } else {
                items
                    .iter()
                    .map(|item| encode(item, opts))
                    .collect::<Vec<_>>()
                    .join("-")
            }
        }
        other => other.to_string(),
    }
}

/// Best-effort inverse of [`encode`] for scalars.
pub fn decode(token: &str) -> Value {
    match token.to_lowercase().as_str() {
        "none" => return Value::Null,
        "false" => return Value::Bool(false),
        "true" => return Value::Bool(true),
        _ => {}
    }
    if token.contains(FLOAT_DOT) {
        if let Ok(x) = token.replace(FLOAT_DOT, ".").parse::<f64>() {
            return Value::Float(x);
        }
    }
    match token.parse::<i64>() {
        Ok(i) => Value::Int(i),
        Err(_) => Value::Str(token.to_string()),
    }
}

fn format_key(key: &str) -> String {
    key.replace('_', "-")
}

fn render_pairs(map: &ArgumentMap, opts: &CodecOptions, join: &str) -> String {
    map.iter()
        .map(|(k, v)| format!("{}-{}", format_key(k), encode(v, opts)))
        .collect::<Vec<_>>()
        .join(join)
}

/// Render an argument map as `k1-v1_k2-v2...`, sorted by name.
pub fn dict_to_id(map: &ArgumentMap, opts: &CodecOptions) -> String {
    render_pairs(map, opts, PAIR_SEPARATOR)
}

/// Split a file name into stem and extension (including the dot).
///
/// Leading dots belong to the stem, so `.hidden` has no extension.
pub fn split_ext(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if !name[..idx].chars().all(|c| c == '.') => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Decode one `name-token` pair.
///
/// The token is the last dash-separated piece. A float placeholder
/// (`int--frac`) and a leading minus sign are folded back into it.
fn parse_pair(part: &str) -> Option<(String, Value)> {
    let pieces: Vec<&str> = part.split('-').collect();
    if pieces.len() < 2 {
        return None;
    }

    let mut start = pieces.len() - 1;
    let mut token = pieces[start].to_string();

    if start >= 3 && pieces[start - 1].is_empty() && is_digits(pieces[start - 2]) {
        token = format!("{}{}{}", pieces[start - 2], FLOAT_DOT, token);
        start -= 2;
    }
    if start >= 2 && pieces[start - 1].is_empty() {
        token = format!("-{}", token);
        start -= 1;
    }

    let key = pieces[..start].join("-");
    if key.is_empty() {
        return None;
    }
    Some((key, decode(&token)))
}

/// Inverse of [`dict_to_id`]: accepts a bare id, a file name or a path.
pub fn id_to_dict(identifier: &str) -> ArgumentMap {
    let name = identifier.rsplit('/').next().unwrap_or(identifier);
    let (stem, _) = split_ext(name);
    stem_to_dict(stem)
}

/// Decode a stem whose extension is already gone; dots are part of values.
pub fn stem_to_dict(stem: &str) -> ArgumentMap {
    stem.split(PAIR_SEPARATOR).filter_map(parse_pair).collect()
}

/// Rewrite a file name so its embedded argument map reflects `update`.
///
/// Free labels (parts without a `-`), the extension and a trailing `_`
/// separator survive the rewrite. With an empty `update` the name is only
/// normalised to the canonical sorted order.
pub fn id_updater(
    filename: &Path,
    update: &ArgumentMap,
    mode: UpdateMode,
    opts: &CodecOptions,
) -> PathBuf {
    let file = filename
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (stem, ext) = split_ext(&file);

    let mut map = stem_to_dict(stem);
    match mode {
        UpdateMode::Add => {
            map.extend(update.iter().map(|(k, v)| (format_key(k), v.clone())));
        }
        UpdateMode::Delete => {
            map.retain(|k, _| !update.contains_key(k) && !update.contains_key(&k.replace('-', "_")));
        }
    }

    let labels: Vec<&str> = stem
        .split(PAIR_SEPARATOR)
        .filter(|p| !p.is_empty() && !p.contains('-'))
        .collect();

    let mut parts = Vec::new();
    if !labels.is_empty() {
        parts.push(labels.join(PAIR_SEPARATOR));
    }
    let rendered = dict_to_id(&map, opts);
    if !rendered.is_empty() {
        parts.push(rendered);
    }

    let mut new_stem = parts.join(PAIR_SEPARATOR);
    if stem.ends_with(PAIR_SEPARATOR) {
        new_stem.push_str(PAIR_SEPARATOR);
    }

    let new_name = format!("{}{}", new_stem, ext);
    match filename.parent() {
        Some(parent) => parent.join(new_name),
        None => PathBuf::from(new_name),
    }
}

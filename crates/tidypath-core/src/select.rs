//! Selection of the arguments that form a cache key
//!
//! A selection expression combines group names and single argument names
//! with `+` (include) and `-` (exclude), read left to right:
//! `"x+z+kwargs"`, `"all-y"`, `"kwargs_full-seed+pos_only"`.
//! Names that are not groups are looked up in the `all` group.

use crate::classify::{ArgGroup, ClassifiedArgs};
use crate::error::{Result, TidypathError};
use crate::value::ArgumentMap;

/// Which arguments end up in the file name
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionSpec {
    /// `+`/`-` expression over groups and argument names
    Expr(String),
    /// Expressions combined with `+`; `["x", "kwargs"]` is `"x+kwargs"`
    List(Vec<String>),
    /// A literal map, used as-is without looking at the call
    Literal(ArgumentMap),
}

impl Default for SelectionSpec {
    fn default() -> Self {
        SelectionSpec::Expr(ArgGroup::All.as_str().to_string())
    }
}

impl From<&str> for SelectionSpec {
    fn from(expr: &str) -> Self {
        SelectionSpec::Expr(expr.to_string())
    }
}

impl From<String> for SelectionSpec {
    fn from(expr: String) -> Self {
        SelectionSpec::Expr(expr)
    }
}

impl From<Vec<&str>> for SelectionSpec {
    fn from(items: Vec<&str>) -> Self {
        SelectionSpec::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for SelectionSpec {
    fn from(items: Vec<String>) -> Self {
        SelectionSpec::List(items)
    }
}

impl From<ArgumentMap> for SelectionSpec {
    fn from(map: ArgumentMap) -> Self {
        SelectionSpec::Literal(map)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Include,
    Exclude,
}

fn terms(expr: &str) -> Vec<(Op, &str)> {
    let mut out = Vec::new();
    let mut op = Op::Include;
    let mut start = 0;
    for (idx, c) in expr.char_indices() {
        let next = match c {
            '+' => Op::Include,
            '-' => Op::Exclude,
            _ => continue,
        };
        out.push((op, expr[start..idx].trim()));
        op = next;
        start = idx + c.len_utf8();
    }
    out.push((op, expr[start..].trim()));
    out.retain(|(_, name)| !name.is_empty());
    out
}

fn unknown_key(name: &str, classified: &ClassifiedArgs) -> TidypathError {
    let available = ArgGroup::ALL
        .iter()
        .map(|g| g.as_str().to_string())
        .chain(classified.all.keys().cloned());
    TidypathError::unknown_key(name, available)
}

fn evaluate(expr: &str, classified: &ClassifiedArgs) -> Result<ArgumentMap> {
    let mut merged = ArgumentMap::new();
    for (op, name) in terms(expr) {
        match (name.parse::<ArgGroup>().ok(), op) {
            (Some(group), Op::Include) => {
                merged.extend(classified.group(group).clone());
            }
            (Some(group), Op::Exclude) => {
                for key in classified.group(group).keys() {
                    merged.remove(key);
                }
            }
            (None, Op::Include) => {
                let value = classified
                    .all
                    .get(name)
                    .ok_or_else(|| unknown_key(name, classified))?;
                merged.insert(name.to_string(), value.clone());
            }
            (None, Op::Exclude) => {
                if !classified.all.contains_key(name) {
                    return Err(unknown_key(name, classified));
                }
                merged.remove(name);
            }
        }
    }
    Ok(merged)
}

impl SelectionSpec {
    /// Resolve the selection against a classified call.
    pub fn resolve(&self, classified: &ClassifiedArgs) -> Result<ArgumentMap> {
        let merged = match self {
            SelectionSpec::Literal(map) => map.clone(),
            SelectionSpec::Expr(expr) => evaluate(expr, classified)?,
            SelectionSpec::List(items) => evaluate(&items.join("+"), classified)?,
        };
        tracing::trace!(selection = ?self, keys = merged.len(), "resolved selection");
        Ok(merged)
    }
}

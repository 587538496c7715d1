//! Call-argument classification
//!
//! A [`Signature`] describes the declared parameters of a function and a
//! [`CallArgs`] one concrete call. Binding the two yields the argument
//! groups a selection expression can refer to:
//!
//! - `args`: parameters bound from positional values, plus the
//!   var-positional collector (as a tuple) when it received anything
//! - `kwargs`: keywords supplied at call time, including ones that landed
//!   in the var-keyword collector
//! - `kwargs_defaults`: parameters with defaults that were not supplied
//! - `kwargs_full`: `kwargs_defaults` overlaid with `kwargs`
//! - `pos_only`: `{"pos_only": n}` with `n` unnamed positional values,
//!   counting the receiver of a method
//! - `all`: `kwargs_full` + `args` (+ `pos_only` if configured)

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::bail_call;
use crate::error::{Result, TidypathError};
use crate::value::{ArgumentMap, Value};

/// Key under which the `pos_only` group stores its count
pub const POS_ONLY_KEY: &str = "pos_only";

/// How a declared parameter accepts its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    PositionalOnly,
    PositionalOrKeyword,
    VarPositional,
    KeywordOnly,
    VarKeyword,
}

impl ParamKind {
    fn accepts_positional(self) -> bool {
        matches!(
            self,
            ParamKind::PositionalOnly | ParamKind::PositionalOrKeyword
        )
    }

    fn accepts_keyword(self) -> bool {
        matches!(self, ParamKind::PositionalOrKeyword | ParamKind::KeywordOnly)
    }

    fn is_collector(self) -> bool {
        matches!(self, ParamKind::VarPositional | ParamKind::VarKeyword)
    }
}

/// A declared parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub default: Option<Value>,
}

impl Param {
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    pub fn positional_only(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::PositionalOnly)
    }

    /// A regular parameter, accepted positionally or by keyword
    pub fn positional(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::PositionalOrKeyword)
    }

    pub fn var_positional(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::VarPositional)
    }

    pub fn keyword_only(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::KeywordOnly)
    }

    pub fn var_keyword(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::VarKeyword)
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Declared parameters of a function
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    /// Function name, used in error messages
    pub name: String,
    pub params: Vec<Param>,
    /// Bound methods receive an implicit receiver counted under `pos_only`
    pub is_method: bool,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            is_method: false,
        }
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self {
            is_method: true,
            ..Self::new(name)
        }
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    fn collector(&self, kind: ParamKind) -> Option<&Param> {
        self.params.iter().find(|p| p.kind == kind)
    }

    /// Bind a call and split its arguments into groups.
    pub fn classify(&self, call: &CallArgs, add_pos_only_to_all: bool) -> Result<ClassifiedArgs> {
        let mut bound: HashSet<&str> = HashSet::new();
        let mut args = ArgumentMap::new();
        let mut kwargs = ArgumentMap::new();
        let mut kwargs_defaults = ArgumentMap::new();

        let named_positional: Vec<&Param> = self
            .params
            .iter()
            .filter(|p| p.kind.accepts_positional())
            .collect();

        let mut positional = call.positional.iter();
        for param in &named_positional {
            match positional.next() {
                Some(value) => {
                    args.insert(param.name.clone(), value.clone());
                    bound.insert(param.name.as_str());
                }
                None => break,
            }
        }

        let extra: Vec<Value> = positional.cloned().collect();
        if !extra.is_empty() {
            match self.collector(ParamKind::VarPositional) {
                Some(var) => {
                    args.insert(var.name.clone(), Value::Tuple(extra.clone()));
                }
                None => bail_call!(
                    &self.name,
                    "takes {} positional arguments but {} were given",
                    named_positional.len(),
                    call.positional.len()
                ),
            }
        }

        let var_keyword = self.collector(ParamKind::VarKeyword);
        for (name, value) in &call.keywords {
            if kwargs.contains_key(name) {
                bail_call!(&self.name, "keyword argument '{}' given more than once", name);
            }
            let declared = self
                .params
                .iter()
                .find(|p| p.name == *name && !p.kind.is_collector());
            match declared {
                Some(param) if param.kind.accepts_keyword() => {
                    if bound.contains(param.name.as_str()) {
                        bail_call!(&self.name, "got multiple values for argument '{}'", name);
                    }
                    bound.insert(param.name.as_str());
                }
                _ if var_keyword.is_some() => {}
                Some(_) => bail_call!(
                    &self.name,
                    "positional-only argument '{}' passed as keyword",
                    name
                ),
                None => bail_call!(&self.name, "got an unexpected keyword argument '{}'", name),
            }
            kwargs.insert(name.clone(), value.clone());
        }

        for param in self.params.iter().filter(|p| !p.kind.is_collector()) {
            if bound.contains(param.name.as_str()) {
                continue;
            }
            match &param.default {
                Some(default) => {
                    kwargs_defaults.insert(param.name.clone(), default.clone());
                }
                None => bail_call!(&self.name, "missing required argument '{}'", param.name),
            }
        }

        let unnamed = extra.len() + usize::from(self.is_method);
        tracing::trace!(
            function = %self.name,
            args = args.len(),
            kwargs = kwargs.len(),
            defaults = kwargs_defaults.len(),
            unnamed,
            "classified call"
        );

        Ok(ClassifiedArgs::assemble(
            args,
            kwargs,
            kwargs_defaults,
            unnamed,
            add_pos_only_to_all,
        ))
    }
}

/// Actual arguments of one call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub keywords: Vec<(String, Value)>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keywords.push((name.into(), value.into()));
        self
    }
}

/// Named argument groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgGroup {
    Args,
    Kwargs,
    KwargsDefaults,
    KwargsFull,
    PosOnly,
    All,
}

impl ArgGroup {
    pub const ALL: [ArgGroup; 6] = [
        ArgGroup::Args,
        ArgGroup::Kwargs,
        ArgGroup::KwargsDefaults,
        ArgGroup::KwargsFull,
        ArgGroup::PosOnly,
        ArgGroup::All,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArgGroup::Args => "args",
            ArgGroup::Kwargs => "kwargs",
            ArgGroup::KwargsDefaults => "kwargs_defaults",
            ArgGroup::KwargsFull => "kwargs_full",
            ArgGroup::PosOnly => "pos_only",
            ArgGroup::All => "all",
        }
    }
}

impl FromStr for ArgGroup {
    type Err = TidypathError;

    fn from_str(s: &str) -> Result<Self> {
        ArgGroup::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| TidypathError::UnknownGroup(s.to_string()))
    }
}

impl fmt::Display for ArgGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of [`Signature::classify`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassifiedArgs {
    pub args: ArgumentMap,
    pub kwargs: ArgumentMap,
    pub kwargs_defaults: ArgumentMap,
    pub kwargs_full: ArgumentMap,
    pub pos_only: ArgumentMap,
    pub all: ArgumentMap,
}

impl ClassifiedArgs {
    fn assemble(
        args: ArgumentMap,
        kwargs: ArgumentMap,
        kwargs_defaults: ArgumentMap,
        unnamed: usize,
        add_pos_only_to_all: bool,
    ) -> Self {
        let mut pos_only = ArgumentMap::new();
        pos_only.insert(POS_ONLY_KEY.to_string(), Value::from(unnamed));

        let mut kwargs_full = kwargs_defaults.clone();
        kwargs_full.extend(kwargs.clone());

        let mut all = kwargs_full.clone();
        all.extend(args.clone());
        if add_pos_only_to_all {
            all.extend(pos_only.clone());
        }

        Self {
            args,
            kwargs,
            kwargs_defaults,
            kwargs_full,
            pos_only,
            all,
        }
    }

    pub fn group(&self, group: ArgGroup) -> &ArgumentMap {
        match group {
            ArgGroup::Args => &self.args,
            ArgGroup::Kwargs => &self.kwargs,
            ArgGroup::KwargsDefaults => &self.kwargs_defaults,
            ArgGroup::KwargsFull => &self.kwargs_full,
            ArgGroup::PosOnly => &self.pos_only,
            ArgGroup::All => &self.all,
        }
    }

    /// Look up a group by name, failing for unknown names.
    pub fn group_by_name(&self, name: &str) -> Result<&ArgumentMap> {
        Ok(self.group(name.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `f(a, b, *, x, y=4)`
    fn keyword_only_sig() -> Signature {
        Signature::new("f")
            .param(Param::positional("a"))
            .param(Param::positional("b"))
            .param(Param::keyword_only("x"))
            .param(Param::keyword_only("y").with_default(4))
    }

    /// `slow_computation(x, y, *args, z=1, **kwargs)`
    fn collector_sig() -> Signature {
        Signature::new("slow_computation")
            .param(Param::positional("x"))
            .param(Param::positional("y"))
            .param(Param::var_positional("args"))
            .param(Param::keyword_only("z").with_default(1))
            .param(Param::var_keyword("kwargs"))
    }

    #[test]
    fn test_classify_keyword_only() {
        let call = CallArgs::new().arg(1).arg(2).kwarg("x", 3);
        let groups = keyword_only_sig().classify(&call, false).unwrap();

        assert_eq!(groups.args.get("a"), Some(&Value::Int(1)));
        assert_eq!(groups.args.get("b"), Some(&Value::Int(2)));
        assert_eq!(groups.kwargs.len(), 1);
        assert_eq!(groups.kwargs.get("x"), Some(&Value::Int(3)));
        assert_eq!(groups.kwargs_defaults.get("y"), Some(&Value::Int(4)));
        assert_eq!(groups.kwargs_full.len(), 2);
        assert_eq!(groups.pos_only.get(POS_ONLY_KEY), Some(&Value::Int(0)));
        assert_eq!(groups.all.len(), 4);
        assert!(!groups.all.contains_key(POS_ONLY_KEY));
    }

    #[test]
    fn test_classify_collectors() {
        let call = CallArgs::new()
            .arg(1)
            .arg(2)
            .arg(3)
            .arg(4)
            .kwarg("z", 5)
            .kwarg("extra", "on");
        let groups = collector_sig().classify(&call, true).unwrap();

        assert_eq!(
            groups.args.get("args"),
            Some(&Value::Tuple(vec![Value::Int(3), Value::Int(4)]))
        );
        assert_eq!(groups.kwargs.get("extra"), Some(&Value::from("on")));
        assert_eq!(groups.kwargs.get("z"), Some(&Value::Int(5)));
        assert!(groups.kwargs_defaults.is_empty());
        assert_eq!(groups.pos_only.get(POS_ONLY_KEY), Some(&Value::Int(2)));
        assert_eq!(groups.all.get(POS_ONLY_KEY), Some(&Value::Int(2)));
    }

    #[test]
    fn test_empty_var_positional_is_omitted() {
        let call = CallArgs::new().arg(1).arg(2);
        let groups = collector_sig().classify(&call, false).unwrap();
        assert!(!groups.args.contains_key("args"));
        assert_eq!(groups.kwargs_defaults.get("z"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_method_receiver_counts_as_pos_only() {
        let sig = Signature::method("fit").param(Param::positional("n"));
        let groups = sig.classify(&CallArgs::new().arg(3), false).unwrap();
        assert_eq!(groups.pos_only.get(POS_ONLY_KEY), Some(&Value::Int(1)));
    }

    #[test]
    fn test_keyword_for_positional_parameter() {
        let sig = Signature::new("g")
            .param(Param::positional("a"))
            .param(Param::positional("b").with_default(2));
        let groups = sig.classify(&CallArgs::new().kwarg("a", 1), false).unwrap();
        assert!(groups.args.is_empty());
        assert_eq!(groups.kwargs.get("a"), Some(&Value::Int(1)));
        assert_eq!(groups.kwargs_defaults.get("b"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_kwargs_full_prefers_supplied_values() {
        let sig = Signature::new("g").param(Param::keyword_only("k").with_default(1));
        let groups = sig.classify(&CallArgs::new().kwarg("k", 9), false).unwrap();
        assert!(groups.kwargs_defaults.is_empty());
        assert_eq!(groups.kwargs_full.get("k"), Some(&Value::Int(9)));
    }

    #[test]
    fn test_too_many_positionals() {
        let call = CallArgs::new().arg(1).arg(2).arg(3);
        let err = keyword_only_sig().classify(&call, false).unwrap_err();
        assert!(matches!(err, TidypathError::InvalidCall { .. }));
        assert!(err.to_string().contains("takes 2 positional arguments but 3 were given"));
    }

    #[test]
    fn test_unexpected_keyword() {
        let call = CallArgs::new().arg(1).arg(2).kwarg("x", 0).kwarg("w", 1);
        let err = keyword_only_sig().classify(&call, false).unwrap_err();
        assert!(err.to_string().contains("unexpected keyword argument 'w'"));
    }

    #[test]
    fn test_multiple_values() {
        let call = CallArgs::new().arg(1).arg(2).kwarg("a", 1).kwarg("x", 0);
        let err = keyword_only_sig().classify(&call, false).unwrap_err();
        assert!(err.to_string().contains("multiple values for argument 'a'"));
    }

    #[test]
    fn test_missing_required() {
        let call = CallArgs::new().arg(1).arg(2);
        let err = keyword_only_sig().classify(&call, false).unwrap_err();
        assert!(err.to_string().contains("missing required argument 'x'"));
    }

    #[test]
    fn test_positional_only_as_keyword() {
        let sig = Signature::new("h").param(Param::positional_only("p"));
        let err = sig.classify(&CallArgs::new().kwarg("p", 1), false).unwrap_err();
        assert!(err.to_string().contains("positional-only"));
    }

    #[test]
    fn test_group_by_name() {
        let groups = ClassifiedArgs::default();
        assert!(groups.group_by_name("kwargs_full").is_ok());
        assert!(matches!(
            groups.group_by_name("bogus"),
            Err(TidypathError::UnknownGroup(_))
        ));
    }
}

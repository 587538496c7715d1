use tidypath_core::codec::decode;
use tidypath_core::paths::{ClassRef, IncludeClasses};
use tidypath_core::value::{ArgumentMap, Value};

/// Parse `KEY=VALUE`. Decimal literals (`x=0.5`) become floats; anything
/// else is decoded as a file-name token (`x=0--5` is 0.5 as well).
pub fn parse_key_value(s: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", s));
    }
    Ok((key.to_string(), parse_value(value.trim())))
}

fn parse_value(s: &str) -> Value {
    if s.contains('.') {
        if let Ok(x) = s.parse::<f64>() {
            return Value::Float(x);
        }
    }
    decode(s)
}

/// Parse a class of the chain: a plain name is defined in the function's
/// module, a dotted name (`other.Mixin`) comes from elsewhere
pub fn parse_class_ref(s: &str) -> std::result::Result<ClassRef, String> {
    match s.rsplit_once('.') {
        Some((_, name)) if !name.is_empty() => Ok(ClassRef::external(name)),
        Some(_) => Err(format!("invalid class name '{}'", s)),
        None if s.is_empty() => Err("empty class name".to_string()),
        None => Ok(ClassRef::new(s)),
    }
}

/// Parse include-classes mode
pub fn parse_include_classes(s: &str) -> std::result::Result<IncludeClasses, String> {
    s.parse::<IncludeClasses>().map_err(|e| e.to_string())
}

/// Collect parsed pairs into an argument map; later pairs win
pub fn to_argument_map(pairs: &[(String, Value)]) -> ArgumentMap {
    pairs.iter().cloned().collect()
}

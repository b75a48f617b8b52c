//! Parsers for `TAG=PATH` and `NAME=TEMPLATE` arguments.

use std::path::PathBuf;
use std::str::FromStr;

/// A `--scope TAG=PATH` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeArg {
    /// Scope tag.
    pub tag: String,
    /// File holding the scope's variables.
    pub path: PathBuf,
}

impl FromStr for ScopeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (tag, path) = split_pair(s, "TAG=PATH")?;
        Ok(Self {
            tag: tag.to_string(),
            path: PathBuf::from(path),
        })
    }
}

/// A `--var NAME=TEMPLATE` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableArg {
    /// Variable name.
    pub name: String,
    /// Variable template, may be empty.
    pub template: String,
}

impl FromStr for VariableArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, template) = s
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=TEMPLATE, got '{s}'"))?;
        if name.is_empty() {
            return Err(format!("missing variable name in '{s}'"));
        }
        Ok(Self {
            name: name.to_string(),
            template: template.to_string(),
        })
    }
}

fn split_pair<'a>(s: &'a str, shape: &str) -> Result<(&'a str, &'a str), String> {
    match s.split_once('=') {
        Some((left, right)) if !left.is_empty() && !right.is_empty() => Ok((left, right)),
        _ => Err(format!("expected {shape}, got '{s}'")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_arg() {
        let arg: ScopeArg = "organization=scopes/org.yaml".parse().expect("valid");
        assert_eq!(arg.tag, "organization");
        assert_eq!(arg.path, PathBuf::from("scopes/org.yaml"));

        assert!("organization".parse::<ScopeArg>().is_err());
        assert!("=org.json".parse::<ScopeArg>().is_err());
        assert!("org=".parse::<ScopeArg>().is_err());
    }

    #[test]
    fn test_variable_arg_splits_on_first_equals() {
        let arg: VariableArg = "suffix=a=b".parse().expect("valid");
        assert_eq!(arg.name, "suffix");
        assert_eq!(arg.template, "a=b");

        let arg: VariableArg = "empty=".parse().expect("valid");
        assert_eq!(arg.template, "");

        assert!("=x".parse::<VariableArg>().is_err());
        assert!("novalue".parse::<VariableArg>().is_err());
    }
}

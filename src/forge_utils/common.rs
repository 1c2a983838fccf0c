use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSpec {
    pub path: Option<PathBuf>,
    pub name: String,
}

impl ContractSpec {
    pub fn path_name(path: PathBuf, name: impl ToString) -> Self {
        Self {
            path: Some(path),
            name: name.to_string(),
        }
    }

    pub fn name(name: impl ToString) -> Self {
        Self {
            path: None,
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ContractSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = self.path.as_deref() {
            write!(f, "{}:{}", path.display(), self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Forge prints progress lines around the JSON payload on some versions
pub(super) fn strip_non_json(s: &str) -> &str {
    let start = s.find('{').unwrap_or(0);

    match s.rfind('}') {
        Some(last_closing_brace) if last_closing_brace >= start => {
            &s[start..=last_closing_brace]
        }
        Some(_) => s,
        None => &s[start..],
    }
}

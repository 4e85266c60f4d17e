use std::{fmt, path::PathBuf};

use crate::config;

/// Shared header/footer markup, loaded once per build and handed to every
/// page target by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    html: String,
}

impl Fragment {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    Header,
    Footer,
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "header"),
            Self::Footer => write!(f, "footer"),
        }
    }
}

/// Everything needed to emit one output page: where its template lives, what
/// the output file is called, the shared fragments, and which script bundles
/// get linked into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTarget<'a> {
    pub title: &'a str,
    /// `pages/<name>.html`, relative to the source dir.
    pub template_path: PathBuf,
    /// `<name>.html`, relative to the destination dir.
    pub output_filename: PathBuf,
    pub header: &'a Fragment,
    pub footer: &'a Fragment,
    /// Shared bundles first, then the page-specific bundle.
    pub bundle_refs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("invalid page name `{name}`: {problem}")]
    InvalidName { name: String, problem: NameProblem },
    #[error("{0} fragment was not supplied")]
    MissingFragment(FragmentKind),
    #[error("page list is empty")]
    NoPages,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameProblem {
    Empty,
    Duplicate,
    UnsafeCharacter(char),
}

impl fmt::Display for NameProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "name is empty"),
            Self::Duplicate => write!(f, "name appears more than once"),
            Self::UnsafeCharacter(c) => {
                write!(f, "`{c}` is not allowed in a path segment")
            }
        }
    }
}

/// Derives one [`PageTarget`] per page name.
///
/// Pure and order-preserving: the same names and fragments always produce the
/// same target list, and no partial list is ever returned on error.
pub fn generate<'a>(
    page_names: &[String],
    header: Option<&'a Fragment>,
    footer: Option<&'a Fragment>,
    title: &'a str,
) -> Result<Vec<PageTarget<'a>>, TargetError> {
    if page_names.is_empty() {
        return Err(TargetError::NoPages);
    }

    let header = header.ok_or(TargetError::MissingFragment(FragmentKind::Header))?;
    let footer = footer.ok_or(TargetError::MissingFragment(FragmentKind::Footer))?;

    for (i, name) in page_names.iter().enumerate() {
        validate_name(name)?;
        if page_names[..i].contains(name) {
            return Err(TargetError::InvalidName {
                name: name.clone(),
                problem: NameProblem::Duplicate,
            });
        }
    }

    let targets = page_names
        .iter()
        .map(|name| PageTarget {
            title,
            template_path: PathBuf::from(config::PAGES_DIR).join(format!("{name}.html")),
            output_filename: PathBuf::from(format!("{name}.html")),
            header,
            footer,
            bundle_refs: config::SHARED_BUNDLES
                .iter()
                .map(|b| (*b).to_string())
                .chain(std::iter::once(name.clone()))
                .collect(),
        })
        .collect();

    Ok(targets)
}

fn validate_name(name: &str) -> Result<(), TargetError> {
    if name.is_empty() {
        return Err(TargetError::InvalidName {
            name: name.to_string(),
            problem: NameProblem::Empty,
        });
    }

    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(TargetError::InvalidName {
            name: name.to_string(),
            problem: NameProblem::UnsafeCharacter(c),
        });
    }

    Ok(())
}

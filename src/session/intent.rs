use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::category::{Category, UnknownCategory};
use crate::color::HexColor;

/// A change requested by one of the UI surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectVariant { category: Category, name: String },
    SetActiveCategory(Category),
    SetFilterQuery(String),
    SetColor { category: Category, hex: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StepError {
    #[error("step '{0}' has no kind; expected category:, select:, colour: or search:")]
    MissingKind(String),

    #[error("unknown step kind '{0}'")]
    UnknownKind(String),

    #[error("step '{0}' must look like <category>=<value>")]
    MissingValue(String),

    #[error(transparent)]
    Category(#[from] UnknownCategory),
}

impl FromStr for Intent {
    type Err = StepError;

    /// Parse a scripted step: `category:<cat>`, `select:<cat>=<name>`,
    /// `colour:<cat>=<hex>` or `search:<text>`.
    ///
    /// Colours go through the lenient text-field parse; if that still fails
    /// the raw text is kept so the dispatch rejects it like any bad input.
    fn from_str(step: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = step
            .split_once(':')
            .ok_or_else(|| StepError::MissingKind(step.to_string()))?;

        match kind.trim().to_ascii_lowercase().as_str() {
            "category" | "cat" => Ok(Intent::SetActiveCategory(rest.parse()?)),
            "search" | "query" => Ok(Intent::SetFilterQuery(rest.to_string())),
            "select" => {
                let (category, name) = assignment(step, rest)?;
                Ok(Intent::SelectVariant {
                    category,
                    name: name.trim().to_string(),
                })
            }
            "colour" | "color" => {
                let (category, value) = assignment(step, rest)?;
                let hex = HexColor::parse_lenient(value)
                    .map(|color| color.as_str().to_string())
                    .unwrap_or_else(|_| value.to_string());
                Ok(Intent::SetColor { category, hex })
            }
            other => Err(StepError::UnknownKind(other.to_string())),
        }
    }
}

fn assignment<'a>(step: &str, rest: &'a str) -> Result<(Category, &'a str), StepError> {
    let (category, value) = rest
        .split_once('=')
        .ok_or_else(|| StepError::MissingValue(step.to_string()))?;
    Ok((category.parse()?, value))
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::SelectVariant { category, name } => {
                write!(f, "select:{}={name}", category.key())
            }
            Intent::SetActiveCategory(category) => write!(f, "category:{}", category.key()),
            Intent::SetFilterQuery(text) => write!(f, "search:{text}"),
            Intent::SetColor { category, hex } => write!(f, "colour:{}={hex}", category.key()),
        }
    }
}

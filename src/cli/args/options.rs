use clap::ValueEnum;

use configurator::Category;

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Plain,
    Json,
}

/// Categories accepted by `--category`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum CategoryArg {
    Floor,
    Worktop,
    Cupboards,
    Backsplash,
    Stools,
    #[value(name = "wall-colour", alias = "wall")]
    WallColour,
}

impl CategoryArg {
    /// Return the key consumed by configuration loading.
    pub(crate) fn as_str(self) -> &'static str {
        Category::from(self).key()
    }
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Floor => Category::Floor,
            CategoryArg::Worktop => Category::Worktop,
            CategoryArg::Cupboards => Category::Cupboards,
            CategoryArg::Backsplash => Category::Backsplash,
            CategoryArg::Stools => Category::Stools,
            CategoryArg::WallColour => Category::WallColour,
        }
    }
}

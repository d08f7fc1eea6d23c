use serde::{Deserialize, Serialize};

/// Currency of every money value of a garage.
///
/// Garage is mono-currency (`EUR`). The currency is still carried by
/// snapshots so a file states what its minor units mean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
}

impl Currency {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Eur => "€",
        }
    }

    /// Decimal digits between major and minor units.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Eur => 2,
        }
    }

    /// Formats a derived major-unit value (e.g. a monthly average) the way
    /// `Money` displays: fixed decimals, symbol last.
    #[must_use]
    pub fn format_major(self, value: f64) -> String {
        format!(
            "{value:.prec$}{symbol}",
            prec = usize::from(self.minor_units()),
            symbol = self.symbol()
        )
    }

    /// Symbol first, as used in the expense alert text.
    #[must_use]
    pub fn format_prefixed(self, value: f64) -> String {
        format!(
            "{symbol}{value:.prec$}",
            prec = usize::from(self.minor_units()),
            symbol = self.symbol()
        )
    }
}

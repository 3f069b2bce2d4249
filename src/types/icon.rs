use serde::{Deserialize, Serialize};

/// Pictograms a widget config may name. Configs refer to them by identifier
/// (`"ShieldCheckIcon"`); the drawing side maps the enum to real artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    ShieldCheck,
    CheckCircle,
    ExclamationTriangle,
    Clock,
    CurrencyDollar,
    ChartBar,
}

impl Icon {
    pub const ALL: [Icon; 6] = [
        Icon::ShieldCheck,
        Icon::CheckCircle,
        Icon::ExclamationTriangle,
        Icon::Clock,
        Icon::CurrencyDollar,
        Icon::ChartBar,
    ];

    /// Identifier used in dashboard configs.
    pub fn name(self) -> &'static str {
        match self {
            Icon::ShieldCheck => "ShieldCheckIcon",
            Icon::CheckCircle => "CheckCircleIcon",
            Icon::ExclamationTriangle => "ExclamationTriangleIcon",
            Icon::Clock => "ClockIcon",
            Icon::CurrencyDollar => "CurrencyDollarIcon",
            Icon::ChartBar => "ChartBarIcon",
        }
    }

    /// Unknown names yield `None`; the widget then renders without a pictogram.
    pub fn from_name(name: &str) -> Option<Icon> {
        Icon::ALL.iter().copied().find(|icon| icon.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_icon_name_parses_back() {
        for icon in Icon::ALL {
            assert_eq!(Icon::from_name(icon.name()), Some(icon));
        }
    }

    #[test]
    fn unknown_icon_name_is_none() {
        assert_eq!(Icon::from_name("RocketIcon"), None);
        assert_eq!(Icon::from_name("shieldcheckicon"), None);
    }
}

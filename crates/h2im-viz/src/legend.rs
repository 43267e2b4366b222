//! Legend text for sensitivity configurations.
//!
//! Every plot labels configurations the same way: a header naming the swept
//! parameters by symbol, then one `β = 0.5, γ = 2` entry per configuration.

use h2im_core::{H2imError, H2imResult, LabelPolicy, SensitivitySettings};

const PARAMETER_SYMBOLS: &[(&str, &str)] = &[
    ("const.alpha", "α"),
    ("const.beta", "β"),
    ("const.gamma", "γ"),
    ("const.delta", "δ"),
    ("const.epsilon", "ε"),
    ("const.lambda", "λ"),
    ("const.sigma", "σ"),
    ("const.discount_rate", "r"),
    ("const.learning_rate", "LR"),
    ("const.hurdle_rate", "h"),
    ("const.co2_price", "p_CO2"),
    ("const.subsidy", "s"),
];

pub fn parameter_symbol(name: &str) -> Option<&'static str> {
    PARAMETER_SYMBOLS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, symbol)| *symbol)
}

pub struct Labeler<'a> {
    settings: &'a SensitivitySettings,
    policy: LabelPolicy,
}

impl<'a> Labeler<'a> {
    pub fn new(settings: &'a SensitivitySettings, policy: LabelPolicy) -> Self {
        Self { settings, policy }
    }

    pub fn symbol(&self, parameter: &str) -> H2imResult<String> {
        match (parameter_symbol(parameter), self.policy) {
            (Some(symbol), _) => Ok(symbol.to_string()),
            (None, LabelPolicy::Lenient) => Ok(parameter.to_string()),
            (None, LabelPolicy::Strict) => {
                Err(H2imError::UnknownParameter(parameter.to_string()))
            }
        }
    }

    pub fn symbols(&self) -> H2imResult<Vec<String>> {
        self.settings
            .parameters()
            .iter()
            .map(|p| self.symbol(p))
            .collect()
    }

    pub fn header(&self) -> H2imResult<String> {
        Ok(format!("Sensitivity: {}", self.symbols()?.join(", ")))
    }

    /// Configurations found on disk but absent from the settings are labeled
    /// by directory name.
    pub fn configuration_label(&self, id: u32) -> H2imResult<String> {
        let Some(configuration) = self.settings.configuration(id) else {
            return Ok(format!("Sensitivity_{id}"));
        };
        let symbols = self.symbols()?;
        let parts: Vec<String> = symbols
            .iter()
            .zip(&configuration.values)
            .map(|(symbol, value)| format!("{symbol} = {value}"))
            .collect();
        Ok(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use h2im_core::Configuration;

    fn settings(parameters: &[&str]) -> SensitivitySettings {
        SensitivitySettings::new(
            "grid",
            parameters.iter().map(|p| p.to_string()).collect(),
            2,
            vec![
                Configuration {
                    id: 1,
                    values: vec![0.5, 2.0],
                },
                Configuration {
                    id: 2,
                    values: vec![0.8, 3.0],
                },
            ],
        )
    }

    #[test]
    fn known_parameters_use_symbols() {
        let settings = settings(&["const.beta", "const.gamma"]);
        let labeler = Labeler::new(&settings, LabelPolicy::Lenient);
        assert_eq!(labeler.header().unwrap(), "Sensitivity: β, γ");
        assert_eq!(labeler.configuration_label(1).unwrap(), "β = 0.5, γ = 2");
        assert_eq!(labeler.configuration_label(2).unwrap(), "β = 0.8, γ = 3");
    }

    #[test]
    fn lenient_policy_falls_back_to_raw_name() {
        let settings = settings(&["const.beta", "market.cap"]);
        let labeler = Labeler::new(&settings, LabelPolicy::Lenient);
        assert_eq!(labeler.configuration_label(1).unwrap(), "β = 0.5, market.cap = 2");
    }

    #[test]
    fn strict_policy_rejects_unknown_parameter() {
        let settings = settings(&["market.cap"]);
        let labeler = Labeler::new(&settings, LabelPolicy::Strict);
        let err = labeler.header().unwrap_err();
        assert!(matches!(err, H2imError::UnknownParameter(name) if name == "market.cap"));
    }

    #[test]
    fn unlisted_configuration_uses_directory_name() {
        let settings = settings(&["const.beta"]);
        let labeler = Labeler::new(&settings, LabelPolicy::Strict);
        assert_eq!(labeler.configuration_label(9).unwrap(), "Sensitivity_9");
    }
}

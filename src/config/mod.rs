use std::path::PathBuf;

use clap::Parser;

use crate::interpreter::DEFAULT_MAX_DEPTH;

/// Rule evaluation configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "offerule")]
#[command(about = "Evaluate a typed offer rule against a context")]
pub struct Config {
    /// Path to the rule file (JSON, or YAML by extension)
    #[arg(long, env = "OFFERULE_RULE_PATH")]
    pub rule: PathBuf,

    /// Path to the context file (JSON, or YAML by extension)
    #[arg(long, env = "OFFERULE_CONTEXT_PATH")]
    pub context: PathBuf,

    /// Basket file reduced into the context before evaluation (optional)
    #[arg(long, env = "OFFERULE_BASKET_PATH")]
    pub basket: Option<PathBuf>,

    /// Partner the basket offer is mounted under
    #[arg(long, default_value = "LOWE", env = "OFFERULE_PARTNER")]
    pub partner: String,

    /// Maximum operator nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, env = "OFFERULE_MAX_DEPTH")]
    pub max_depth: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "OFFERULE_LOG_JSON")]
    pub log_json: bool,

    /// Print evaluation metrics in Prometheus format after the result
    #[arg(long, env = "OFFERULE_METRICS")]
    pub metrics: bool,
}

impl Config {
    /// Partner for the basket offer; the basket's own partner wins.
    pub fn partner_for<'a>(&'a self, basket_partner: Option<&'a str>) -> &'a str {
        basket_partner.unwrap_or(&self.partner)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rule: PathBuf::from("rule.json"),
            context: PathBuf::from("context.json"),
            basket: None,
            partner: "LOWE".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            log_level: "warn".to_string(),
            log_json: false,
            metrics: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.partner, "LOWE");
        assert_eq!(config.max_depth, 64);
        assert!(config.basket.is_none());
        assert!(!config.metrics);
    }

    #[test]
    fn test_parse_args() {
        let config = Config::try_parse_from([
            "offerule",
            "--rule",
            "rules/offer.yaml",
            "--context",
            "ctx.json",
            "--basket",
            "basket.json",
            "--max-depth",
            "8",
            "--metrics",
        ])
        .unwrap();

        assert_eq!(config.rule, PathBuf::from("rules/offer.yaml"));
        assert_eq!(config.basket, Some(PathBuf::from("basket.json")));
        assert_eq!(config.max_depth, 8);
        assert!(config.metrics);
        assert!(!config.log_json);
    }

    #[test]
    fn test_rule_is_required() {
        let result = Config::try_parse_from(["offerule", "--context", "ctx.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_partner_for() {
        let config = Config::default();

        assert_eq!(config.partner_for(None), "LOWE");
        assert_eq!(config.partner_for(Some("HD")), "HD");
    }
}

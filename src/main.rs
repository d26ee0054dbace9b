use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use offerule::basket::Basket;
use offerule::config::Config;
use offerule::loader::{load_as, load_context, load_rule};
use offerule::observability::{init_tracing, EvalMetrics};
use offerule::Engine;

fn main() -> anyhow::Result<ExitCode> {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    init_tracing(&config.log_level, config.log_json);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        rule = %config.rule.display(),
        context = %config.context.display(),
        "Starting offerule"
    );

    let rule = load_rule(&config.rule)?;
    let mut context = load_context(&config.context)?;

    if let Some(ref basket_path) = config.basket {
        let basket: Basket = load_as(basket_path)?;
        let partner = config.partner_for(basket.partner.as_deref());
        let offer = basket.offer();

        info!(
            path = %basket_path.display(),
            partner,
            items = basket.items.len(),
            quantity = offer.total_quantity(),
            spend = %offer.spend,
            "Basket reduced into context"
        );

        offer.merge_into(&mut context, partner);
    }

    let metrics = Arc::new(EvalMetrics::new());
    let engine = Engine::standard()?
        .with_max_depth(config.max_depth)
        .with_audit(metrics.clone());

    let outcome = engine.evaluate(&rule, &context);

    let code = match outcome {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, kind = %e.kind(), "Rule evaluation failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    };

    if config.metrics {
        print!("{}", metrics.to_prometheus());
    }

    Ok(code)
}

//! Source listing command implementation.

use warroom::EngineConfig;
use warroom::signals::SourceSpec;

fn describe_rules(spec: &SourceSpec) -> String {
    if let Some(scale) = &spec.scale {
        return format!(
            "scale '{}' around {} (±{})",
            scale.field, scale.neutral, scale.span
        );
    }
    spec.rules
        .iter()
        .map(|rule| format!("{} {:+.2}", rule.pattern, rule.direction))
        .collect::<Vec<_>>()
        .join(", ")
}

/// List the configured sources in accumulation order.
pub(crate) fn list_sources(config: &EngineConfig, rules: bool) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Configured Sources                        ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for spec in &config.sources {
        if rules {
            println!(
                "  {:18} weight {:>4.1}  [{}]",
                spec.id.as_str(),
                spec.weight,
                spec.category.description()
            );
            if !spec.description.is_empty() {
                println!("      {}", spec.description);
            }
            println!("      rules:    {}", describe_rules(spec));
            if !spec.required_fields.is_empty() {
                println!("      requires: {}", spec.required_fields.join(", "));
            }
        } else {
            println!("  {:18} weight {:>4.1}", spec.id.as_str(), spec.weight);
        }
    }

    println!("\nMaximum score: ±{:.1}", config.max_score());
    println!(
        "Indeterminate below {} present source(s)\n",
        config.min_sources_present
    );

    if !rules {
        println!("Use --rules for label rules and required fields.\n");
    }
}

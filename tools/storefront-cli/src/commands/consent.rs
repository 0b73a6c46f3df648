//! Cookie consent recording.

use anyhow::Result;
use dialoguer::Select;
use storefront_core::ConsentDecision;
use storefront_page::CookieConsent;

use super::ConsentArgs;
use crate::context::Context;

/// Run the consent command.
pub async fn run(args: ConsentArgs, ctx: &Context) -> Result<()> {
    let key = ctx.config.consent.storage_key.as_str();
    let mut storage = ctx.open_store(args.store.as_deref())?;
    let mut consent = CookieConsent::load(&storage, key);

    if !consent.needs_prompt() {
        match consent.decision() {
            Some(existing) => report(existing, false, ctx),
            None => report_unrecognised(key, ctx),
        }
        return Ok(());
    }

    let decision = match flag_decision(&args) {
        Some(decision) => decision,
        None => {
            let choices = ["Accept all cookies", "Decline"];
            let selection = Select::new()
                .with_prompt("We use cookies to improve your experience")
                .items(&choices)
                .default(0)
                .interact()?;
            if selection == 0 {
                ConsentDecision::Accepted
            } else {
                ConsentDecision::Declined
            }
        }
    };

    consent.decide(decision);
    if !consent.persist(&mut storage, key) {
        anyhow::bail!("Failed to store the decision in {}", storage.path().display());
    }
    report(decision, true, ctx);
    Ok(())
}

fn flag_decision(args: &ConsentArgs) -> Option<ConsentDecision> {
    match (args.accept, args.decline) {
        (true, _) => Some(ConsentDecision::Accepted),
        (_, true) => Some(ConsentDecision::Declined),
        _ => None,
    }
}

fn report_unrecognised(key: &str, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "decision": serde_json::Value::Null,
            "recorded": false,
        }));
    } else {
        ctx.output.warn(&format!(
            "'{}' holds an unrecognised answer; keeping it (clear the store to ask again)",
            key
        ));
    }
}

fn report(decision: ConsentDecision, recorded: bool, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "decision": decision,
            "recorded": recorded,
        }));
    } else if recorded {
        ctx.output.success(&format!("Cookie consent {}", decision));
    } else {
        ctx.output
            .info(&format!("Cookie consent already {}; keeping it", decision));
    }
}

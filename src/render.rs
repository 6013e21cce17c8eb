//! Outcome rendering for the command line.

use serde_json::{json, Value};

use crate::race::Outcome;

/// Human-readable rendering.
pub fn render_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Won { source_id, record, elapsed } => format!(
            "receive from {} ({}, {}ms), values: {}",
            record.url,
            source_id,
            elapsed.as_millis(),
            record.address
        ),
        Outcome::TimedOut { .. } => "timeout".to_string(),
        Outcome::AllFailed { failures } => {
            let mut out = String::from("all sources failed");
            for failure in failures {
                out.push_str(&format!("\n  {}: {}", failure.source_id, failure.error));
            }
            out
        }
    }
}

/// Machine-readable rendering.
pub fn render_json(outcome: &Outcome) -> Value {
    match outcome {
        Outcome::Won { source_id, record, elapsed } => json!({
            "outcome": outcome.kind(),
            "source": source_id,
            "url": record.url,
            "elapsed_ms": elapsed.as_millis() as u64,
            "address": record.address,
        }),
        Outcome::TimedOut { elapsed } => json!({
            "outcome": outcome.kind(),
            "elapsed_ms": elapsed.as_millis() as u64,
        }),
        Outcome::AllFailed { failures } => json!({
            "outcome": outcome.kind(),
            "failures": failures
                .iter()
                .map(|f| json!({
                    "source": f.source_id,
                    "kind": f.error.kind(),
                    "error": f.error.to_string(),
                }))
                .collect::<Vec<_>>(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::SourceFailure;
    use crate::source::{Address, FetchError, Record, ViaCepAddress};
    use std::time::Duration;

    fn won() -> Outcome {
        Outcome::Won {
            source_id: "viacep".into(),
            record: Record {
                url: "https://viacep.com.br/ws/22735140/json/".into(),
                address: Address::ViaCep(ViaCepAddress {
                    cep: "22735-140".into(),
                    logradouro: "Rua Mário Covas Júnior".into(),
                    bairro: "Taquara".into(),
                    localidade: "Rio de Janeiro".into(),
                    uf: "RJ".into(),
                    ..Default::default()
                }),
            },
            elapsed: Duration::from_millis(42),
        }
    }

    #[test]
    fn test_text_won() {
        assert_eq!(
            render_text(&won()),
            "receive from https://viacep.com.br/ws/22735140/json/ (viacep, 42ms), values: \
             Rua Mário Covas Júnior, Taquara - Rio de Janeiro/RJ (22735-140)"
        );
    }

    #[test]
    fn test_text_timeout_and_failures() {
        let timed_out = Outcome::TimedOut { elapsed: Duration::from_secs(1) };
        assert_eq!(render_text(&timed_out), "timeout");

        let failed = Outcome::AllFailed {
            failures: vec![
                SourceFailure { source_id: "viacep".into(), error: FetchError::BadStatus(500) },
                SourceFailure { source_id: "opencep".into(), error: FetchError::NotFound },
            ],
        };
        assert_eq!(
            render_text(&failed),
            "all sources failed\n  viacep: unexpected HTTP status 500\n  opencep: postal code not found"
        );
    }

    #[test]
    fn test_json_won() {
        let value = render_json(&won());
        assert_eq!(value["outcome"], "won");
        assert_eq!(value["source"], "viacep");
        assert_eq!(value["elapsed_ms"], 42);
        assert_eq!(value["address"]["provider"], "viacep");
        assert_eq!(value["address"]["uf"], "RJ");
    }

    #[test]
    fn test_json_all_failed() {
        let failed = Outcome::AllFailed {
            failures: vec![SourceFailure {
                source_id: "opencep".into(),
                error: FetchError::Timeout(Duration::from_millis(900)),
            }],
        };
        let value = render_json(&failed);
        assert_eq!(value["outcome"], "all_failed");
        assert_eq!(value["failures"][0]["kind"], "timeout");
    }
}

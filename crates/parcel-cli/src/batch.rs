//! The `batch` command: many lookups from one file, run concurrently.
//!
//! Identifiers are validated before any request goes out, so a typo fails
//! the whole run instead of silently dropping lines.

use futures::stream::{self, StreamExt};
use parcel_core::{CoreError, Platform};
use parcel_tracker::{track_with, TrackerSettings};

use crate::output::{self, BatchLine};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Job {
    pub platform: Platform,
    pub order_id: String,
}

/// Parses `<platform> <order_id>` lines. Blank lines and `#` comments are
/// skipped.
///
/// # Errors
///
/// Returns an error naming the line for an unknown platform or a line
/// without an order id.
pub(crate) fn parse_jobs(contents: &str) -> anyhow::Result<Vec<Job>> {
    let mut jobs = Vec::new();
    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let lineno = idx + 1;
        let mut parts = line.split_whitespace();
        let (Some(identifier), Some(order_id), None) = (parts.next(), parts.next(), parts.next())
        else {
            anyhow::bail!("line {lineno}: expected `<platform> <order_id>`, got {line:?}");
        };
        let platform: Platform = identifier
            .parse()
            .map_err(|e: CoreError| anyhow::anyhow!("line {lineno}: {e}"))?;
        jobs.push(Job {
            platform,
            order_id: order_id.to_owned(),
        });
    }
    Ok(jobs)
}

/// Tracks every job with at most `concurrency` lookups in flight and prints
/// one JSON line per job as results arrive.
pub(crate) async fn run(jobs: Vec<Job>, settings: &TrackerSettings, concurrency: usize) {
    let total = jobs.len();
    let found = stream::iter(jobs)
        .map(|job| async move {
            let info = track_with(job.platform.as_str(), &job.order_id, settings)
                .await
                .ok()
                .flatten();
            let line = BatchLine {
                platform: job.platform.as_str(),
                order_id: &job.order_id,
                result: output::to_json(info.as_ref(), false),
            };
            println!("{}", serde_json::to_string(&line).unwrap_or_default());
            info.is_some()
        })
        .buffer_unordered(concurrency.max(1))
        .filter(|hit| std::future::ready(*hit))
        .count()
        .await;

    tracing::info!(total, found, "batch complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lines_and_skips_comments() {
        let jobs = parse_jobs(
            "# morning pickups\n\
             seven_eleven F1234567890\n\
             \n\
             shopee   TW2412345678A\n",
        )
        .unwrap();
        assert_eq!(
            jobs,
            vec![
                Job {
                    platform: Platform::SevenEleven,
                    order_id: "F1234567890".to_owned()
                },
                Job {
                    platform: Platform::Shopee,
                    order_id: "TW2412345678A".to_owned()
                },
            ]
        );
    }

    #[test]
    fn unknown_platform_names_the_line() {
        let err = parse_jobs("shopee TW1\n7-11 F1234567890\n").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 2"), "{msg}");
        assert!(msg.contains("7-11"), "{msg}");
    }

    #[test]
    fn missing_order_id_is_rejected() {
        assert!(parse_jobs("ok_mart\n").is_err());
    }

    #[test]
    fn extra_columns_are_rejected() {
        assert!(parse_jobs("lsa PKG-1 extra\n").is_err());
    }

    #[tokio::test]
    async fn empty_batch_completes() {
        run(Vec::new(), &TrackerSettings::default(), 4).await;
    }
}

use super::types::ForecastSample;
use std::collections::HashSet;

/// Reduce a chronologically ordered forecast list to at most `max_days`
/// samples, keeping the first sample seen for each UTC calendar day.
///
/// Samples are kept verbatim and in input order. Inputs covering fewer than
/// `max_days` days yield fewer samples; nothing is padded. Samples whose
/// timestamp has no calendar day are skipped.
pub fn daily_digest<I>(samples: I, max_days: usize) -> Vec<ForecastSample>
where
    I: IntoIterator<Item = ForecastSample>,
{
    let mut digest = Vec::with_capacity(max_days);
    let mut seen_days = HashSet::with_capacity(max_days);

    for sample in samples {
        if digest.len() >= max_days {
            break;
        }
        let Some(day) = sample.calendar_day() else {
            tracing::debug!("Skipping forecast sample with unrepresentable dt {}", sample.dt);
            continue;
        };
        if seen_days.insert(day) {
            digest.push(sample);
        }
    }

    digest
}

//! Severity ordering of verifications.

use vane_core::{Verification, VerificationStatus};

/// Sort key of a verification status; lower sorts first.
///
/// Canceled and unrecognized results carry no signal for the operator and
/// sink to the bottom.
pub fn severity(status: VerificationStatus) -> u8 {
    match status {
        VerificationStatus::Failed => 1,
        VerificationStatus::Error => 2,
        VerificationStatus::Running => 3,
        VerificationStatus::Successful => 4,
        VerificationStatus::Canceled => 5,
        VerificationStatus::Unknown => 6,
    }
}

/// Order verifications by severity. Ties keep their fetched order so rows
/// do not jitter between polls.
pub fn rank_verifications<'a>(
    verifications: impl IntoIterator<Item = &'a Verification>,
) -> Vec<&'a Verification> {
    let mut ranked: Vec<&Verification> = verifications.into_iter().collect();
    ranked.sort_by_key(|v| severity(v.status));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verification(metric: &str, status: VerificationStatus) -> Verification {
        Verification {
            metric_name: metric.to_string(),
            status,
            ..Default::default()
        }
    }

    fn metrics(ranked: &[&Verification]) -> Vec<String> {
        ranked.iter().map(|v| v.metric_name.clone()).collect()
    }

    #[test]
    fn failures_come_first() {
        use VerificationStatus::*;
        let fetched = vec![
            verification("latency", Running),
            verification("errors", Failed),
            verification("saturation", Successful),
        ];
        let ranked = rank_verifications(&fetched);
        let order: Vec<_> = ranked.iter().map(|v| v.status).collect();
        assert_eq!(order, [Failed, Running, Successful]);
    }

    #[test]
    fn ties_keep_fetched_order() {
        use VerificationStatus::*;
        let fetched = vec![
            verification("a", Successful),
            verification("b", Running),
            verification("c", Successful),
            verification("d", Running),
            verification("e", Error),
        ];
        let ranked = rank_verifications(&fetched);
        assert_eq!(metrics(&ranked), ["e", "b", "d", "a", "c"]);
    }

    #[test]
    fn ranking_is_idempotent() {
        use VerificationStatus::*;
        let fetched = vec![
            verification("a", Canceled),
            verification("b", Failed),
            verification("c", Unknown),
            verification("d", Failed),
        ];
        let once: Vec<Verification> = rank_verifications(&fetched).into_iter().cloned().collect();
        let twice = rank_verifications(&once);
        assert_eq!(metrics(&twice), ["b", "d", "a", "c"]);
    }
}

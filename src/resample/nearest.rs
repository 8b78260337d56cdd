use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Nearest-time index resolution
// ---------------------------------------------------------------------------

/// Index of the sampled time closest to `query`.
///
/// Ties are broken toward the smallest index.  No interpolation happens
/// here: the returned index denotes an existing sample, and callers use it
/// to pick exact concentration / fraction values at that simulated time.
///
/// An empty series has no nearest element and is a fatal
/// [`AnalysisError::EmptyTimeSeries`].
pub fn nearest_index(times: &[f64], query: f64) -> Result<usize, AnalysisError> {
    let first = match times.first() {
        Some(&t) => t,
        None => return Err(AnalysisError::EmptyTimeSeries { query }),
    };

    let mut best = 0;
    let mut best_dist = (first - query).abs();
    for (i, &t) in times.iter().enumerate().skip(1) {
        let dist = (t - query).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_closest_sample() {
        assert_eq!(nearest_index(&[0.0, 100.0, 200.0, 400.0], 250.0).unwrap(), 2);
        assert_eq!(nearest_index(&[0.0, 100.0, 200.0], 150.0).unwrap(), 1);
    }

    #[test]
    fn exact_match_resolves_to_its_own_index() {
        assert_eq!(nearest_index(&[0.0, 100.0, 200.0], 100.0).unwrap(), 1);
    }

    #[test]
    fn equidistant_query_breaks_tie_toward_smaller_index() {
        // 50 is equidistant from 0 and 100
        assert_eq!(nearest_index(&[0.0, 100.0, 200.0], 50.0).unwrap(), 0);
    }

    #[test]
    fn empty_series_is_fatal() {
        let err = nearest_index(&[], 10.0).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyTimeSeries { query } if query == 10.0));
    }
}

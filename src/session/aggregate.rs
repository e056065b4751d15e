/// Rounded arithmetic mean of the recorded samples; `None` when the
/// session collected nothing.
pub fn mean_age(samples: &[u32]) -> Option<u32> {
    if samples.is_empty() {
        return None;
    }
    let sum: u64 = samples.iter().map(|&sample| sample as u64).sum();
    Some((sum as f64 / samples.len() as f64).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_readings_average_to_rounded_mean() {
        assert_eq!(mean_age(&[30, 32, 31]), Some(31));
    }

    #[test]
    fn mean_rounds_to_nearest_year() {
        // 40 + 41 = 81, mean 40.5 rounds up
        assert_eq!(mean_age(&[40, 41]), Some(41));
        // 40 + 41 + 41 = 122, mean 40.67 rounds up
        assert_eq!(mean_age(&[40, 41, 41]), Some(41));
        // 40 + 40 + 41 = 121, mean 40.33 rounds down
        assert_eq!(mean_age(&[40, 40, 41]), Some(40));
    }

    #[test]
    fn no_samples_no_result() {
        assert_eq!(mean_age(&[]), None);
    }

    #[test]
    fn single_sample_is_its_own_mean() {
        assert_eq!(mean_age(&[27]), Some(27));
    }
}

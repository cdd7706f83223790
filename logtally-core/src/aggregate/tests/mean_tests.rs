use crate::aggregate::MeanAggregator;
use pretty_assertions::assert_eq;

#[test]
fn mean_of_three_samples() {
    // Arrange
    let mut agg = MeanAggregator::new();
    for sample in [1, 2, 3] {
        agg.push(sample);
    }

    // Act / Assert
    assert_eq!(agg.mean(), 2.0);
    assert_eq!(agg.display(), "2.0");
}

#[test]
fn mean_of_single_sample() {
    let mut agg = MeanAggregator::new();
    agg.push(5);

    assert_eq!(agg.display(), "5.0");
}

#[test]
fn mean_rounds_to_two_decimals() {
    let mut agg = MeanAggregator::new();
    for sample in [1, 1, 0] {
        agg.push(sample);
    }

    // 2/3 rounds to 0.67.
    assert_eq!(agg.display(), "0.67");
}

#[test]
fn mean_keeps_one_decimal_after_trimming() {
    let mut agg = MeanAggregator::new();
    for sample in [1, 2] {
        agg.push(sample);
    }

    assert_eq!(agg.display(), "1.5");
}

#[test]
fn cached_mean_is_invalidated_by_append() {
    // Arrange
    let mut agg = MeanAggregator::new();
    agg.push(2);
    assert_eq!(agg.mean(), 2.0);

    // Act: append after the cache was populated.
    agg.push(4);

    // Assert: never stale.
    assert_eq!(agg.mean(), 3.0);
}

#[test]
fn empty_aggregator_displays_zero() {
    let agg = MeanAggregator::new();

    assert_eq!(agg.display(), "0.0");
}

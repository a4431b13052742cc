use approx::assert_abs_diff_eq;
use tagplayer::config::PlayerProfile;
use tagplayer::timeline::{merge_segments, real_to_virtual, virtual_duration, virtual_to_real, Timeline};
use tagplayer::Tag;

/// Deterministic pseudo-random tag sets so the invariants are checked over
/// more than hand-picked inputs.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self, max: f64) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as f64 / (1u64 << 31) as f64) * max
    }

    fn tags(&mut self, count: usize) -> Vec<Tag> {
        (0..count)
            .map(|i| {
                let start = self.next_f64(500.0).floor();
                let width = 1.0 + self.next_f64(60.0).floor();
                Tag::new(format!("t{}", i), format!("Tag {}", i), "", start, start + width)
            })
            .collect()
    }
}

#[test]
fn merged_segments_are_disjoint_ordered_and_contiguous_in_virtual_time() {
    let mut rng = Lcg(7);
    for count in 1..40 {
        let tags = rng.tags(count);
        let segments = merge_segments(&tags);

        assert!(!segments.is_empty());
        assert_eq!(segments[0].virtual_start, 0.0);
        for pair in segments.windows(2) {
            assert!(pair[0].real_end < pair[1].real_start, "segments must not touch");
            assert!(pair[1].virtual_start > pair[0].virtual_start);
            assert_abs_diff_eq!(pair[1].virtual_start, pair[0].virtual_end(), epsilon = 1e-9);
        }

        let total: f64 = tags.iter().map(Tag::duration).sum();
        let covered = virtual_duration(&segments);
        assert!(covered <= total + 1e-9);
        for tag in &tags {
            assert!(
                segments
                    .iter()
                    .any(|s| s.real_start <= tag.start && tag.end <= s.real_end),
                "tag {} not covered by a single segment",
                tag.id
            );
        }
    }
}

#[test]
fn virtual_duration_equals_tag_sum_without_overlap() {
    let tags = vec![
        Tag::new("a", "A", "", 0.0, 10.0),
        Tag::new("b", "B", "", 20.0, 25.0),
        Tag::new("c", "C", "", 40.0, 41.5),
    ];
    let segments = merge_segments(&tags);
    assert_abs_diff_eq!(virtual_duration(&segments), 16.5, epsilon = 1e-9);
}

#[test]
fn mapping_round_trips_inside_segments() {
    let mut rng = Lcg(99);
    let tags = rng.tags(25);
    let segments = merge_segments(&tags);
    for segment in &segments {
        for step in 1..10 {
            let real = segment.real_start + segment.duration() * step as f64 / 10.0;
            let back = virtual_to_real(real_to_virtual(real, &segments), &segments);
            assert_abs_diff_eq!(back, real, epsilon = 1e-9);
        }
    }
}

#[test]
fn gaps_collapse_to_preceding_virtual_end() {
    let mut rng = Lcg(3);
    let tags = rng.tags(12);
    let segments = merge_segments(&tags);

    assert_eq!(real_to_virtual(segments[0].real_start - 0.5, &segments), 0.0);
    for pair in segments.windows(2) {
        let gap_mid = (pair[0].real_end + pair[1].real_start) / 2.0;
        assert_abs_diff_eq!(
            real_to_virtual(gap_mid, &segments),
            pair[0].virtual_end(),
            epsilon = 1e-9
        );
    }
}

#[test]
fn snap_points_are_sorted_unique_and_bounded() {
    let mut rng = Lcg(11);
    for count in 0..20 {
        let tags = rng.tags(count);
        let timeline = Timeline::build(&tags);
        let points = timeline.snap_points().as_slice();

        assert_eq!(points.first(), Some(&0.0));
        assert_eq!(points.last(), Some(&timeline.virtual_duration()));
        assert!(points.windows(2).all(|pair| pair[0] < pair[1]));
    }
}

#[test]
fn demo_profile_timeline() {
    let profile = PlayerProfile::demo();
    let timeline = Timeline::build(&profile.tags);

    let bounds: Vec<(f64, f64, f64)> = timeline
        .segments()
        .iter()
        .map(|s| (s.real_start, s.real_end, s.virtual_start))
        .collect();
    assert_eq!(
        bounds,
        vec![
            (10.0, 35.0, 0.0),
            (60.0, 280.0, 25.0),
            (290.0, 350.0, 245.0),
            (370.0, 596.0, 305.0),
        ]
    );
    assert_abs_diff_eq!(timeline.virtual_duration(), 531.0, epsilon = 1e-9);
    assert_eq!(
        timeline.snap_points().as_slice(),
        &[
            0.0, 25.0, 45.0, 85.0, 105.0, 165.0, 175.0, 245.0, 305.0, 315.0, 435.0, 455.0, 485.0,
            531.0
        ]
    );
}

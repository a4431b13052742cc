use tagplayer::config::PlayerProfile;
use tagplayer::tracks::{allocate_tracks, overlaps};
use tagplayer::Tag;

fn tag(id: &str, start: f64, end: f64) -> Tag {
    Tag::new(id, id, "#6366f1", start, end)
}

fn ids(tags: &[Tag]) -> Vec<&str> {
    tags.iter().map(|tag| tag.id.as_str()).collect()
}

#[test]
fn demo_profile_layout() {
    let profile = PlayerProfile::demo();
    let tracks = allocate_tracks(&profile.tags);

    assert_eq!(tracks.len(), 3);
    assert_eq!(
        ids(&tracks[0].tags),
        vec!["intro", "main-topic", "live-demo", "leadership", "bonus", "conclusion"]
    );
    assert_eq!(ids(&tracks[1].tags), vec!["communication", "teamwork"]);
    assert_eq!(ids(&tracks[2].tags), vec!["explanation-1"]);
    let indices: Vec<usize> = tracks.iter().map(|track| track.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn no_overlap_within_a_track_and_every_tag_placed_once() {
    let tags: Vec<Tag> = (0..30)
        .map(|i| {
            let start = ((i * 37) % 200) as f64;
            let end = start + 5.0 + ((i * 13) % 40) as f64;
            tag(&format!("t{}", i), start, end)
        })
        .collect();
    let tracks = allocate_tracks(&tags);

    for track in &tracks {
        for (i, a) in track.tags.iter().enumerate() {
            for b in &track.tags[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {} on track {}", a.id, b.id, track.index);
            }
        }
    }

    let mut placed: Vec<&str> = tracks.iter().flat_map(|track| ids(&track.tags)).collect();
    placed.sort_unstable();
    let mut expected: Vec<&str> = ids(&tags);
    expected.sort_unstable();
    assert_eq!(placed, expected);
}

#[test]
fn allocation_is_deterministic() {
    let tags = vec![
        tag("c", 5.0, 15.0),
        tag("a", 0.0, 10.0),
        tag("b", 0.0, 10.0),
        tag("d", 10.0, 20.0),
    ];
    let first = allocate_tracks(&tags);
    let second = allocate_tracks(&tags);
    assert_eq!(first, second);
    assert_eq!(ids(&first[0].tags), vec!["a", "d"]);
    assert_eq!(ids(&first[1].tags), vec!["b"]);
    assert_eq!(ids(&first[2].tags), vec!["c"]);
}

#[test]
fn start_ordered_greedy_uses_max_overlap_depth() {
    // Depth 3 at t=12: a, c and e are all live.
    let tags = vec![
        tag("e", 11.0, 13.0),
        tag("a", 0.0, 20.0),
        tag("b", 0.0, 5.0),
        tag("c", 6.0, 14.0),
        tag("d", 15.0, 30.0),
    ];
    assert_eq!(allocate_tracks(&tags).len(), 3);
}

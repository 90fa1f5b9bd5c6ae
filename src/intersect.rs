//! Approximate playlist intersection.
//!
//! Fuzzy equality is neither hashable nor transitive, so there is no index to
//! build: every pair is compared. Results are a multiset. A song from the
//! first playlist appears once per song of the second playlist it matches.

use crate::models::{Playlist, Song};

/// Tag given to intersection results.
pub const INTERSECTION_TAG: &str = "intersect";

/// Every `a` in `first` paired with every `b` in `second` for which `same(a, b)`,
/// yielding `a`. Order follows `first`; repeats of one `a` follow `second`.
pub fn intersect_by<F>(first: &Playlist, second: &Playlist, mut same: F) -> Vec<Song>
where
    F: FnMut(&Song, &Song) -> bool,
{
    let mut shared = Vec::new();
    for a in first {
        for b in second {
            if same(a, b) {
                shared.push(a.clone());
            }
        }
    }
    shared
}

/// Fuzzy-title intersection of two playlists, tagged [`INTERSECTION_TAG`].
pub fn intersect(first: &Playlist, second: &Playlist) -> Playlist {
    let shared = intersect_by(first, second, Song::matches);
    log::debug!(
        "{} x {} songs compared, {} matches",
        first.len(),
        second.len(),
        shared.len()
    );
    Playlist::tagged(shared, INTERSECTION_TAG)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(title: &str, artist: &str) -> Song {
        Song::create(title, artist, "Album", 180u32).unwrap()
    }

    fn titles(p: &Playlist) -> Vec<(&str, &str)> {
        p.iter()
            .map(|s| (s.title.as_str(), s.artist.as_str()))
            .collect()
    }

    #[test]
    fn test_single_match_keeps_first_instance() {
        let first = Playlist::tagged(
            vec![song("Hotel California", "Eagles"), song("Africa", "Toto")],
            "ryan",
        );
        let second = Playlist::tagged(
            vec![song("hotel california", "Gipsy Kings"), song("Creep", "Radiohead")],
            "rachel",
        );

        let shared = intersect(&first, &second);
        assert_eq!(titles(&shared), vec![("Hotel California", "Eagles")]);
        assert_eq!(shared.tag(), Some(INTERSECTION_TAG));
    }

    #[test]
    fn test_multiplicity() {
        let first = Playlist::new(vec![song("Yesterday", "Beatles")], None);
        let second = Playlist::new(
            vec![song("Yesterday", "Beatles"), song("yesterday", "Cover Band")],
            None,
        );

        let shared = intersect(&first, &second);
        assert_eq!(shared.len(), 2);
        assert!(shared.iter().all(|s| s.artist == "Beatles"));
    }

    #[test]
    fn test_order_follows_first_then_second() {
        let first = Playlist::new(
            vec![song("Black Dog", "1"), song("Creep", "2"), song("Black Dot", "3")],
            None,
        );
        let second = Playlist::new(
            vec![song("Black Dot", "x"), song("Black Dog", "y"), song("Creep", "z")],
            None,
        );

        let shared = intersect(&first, &second);
        let artists: Vec<&str> = shared.iter().map(|s| s.artist.as_str()).collect();
        // "Black Dog" and "Black Dot" match each other (ratio 0.889)
        assert_eq!(artists, vec!["1", "1", "2", "3", "3"]);
    }

    #[test]
    fn test_empty_inputs() {
        let empty = Playlist::default();
        let full = Playlist::new(vec![song("Africa", "Toto")], None);
        assert!(intersect(&empty, &full).is_empty());
        assert!(intersect(&full, &empty).is_empty());
    }

    #[test]
    fn test_intersect_by_custom_predicate() {
        let first = Playlist::new(vec![song("A", "Toto"), song("B", "Eagles")], None);
        let second = Playlist::new(vec![song("Z", "Toto")], None);

        let shared = intersect_by(&first, &second, |a, b| a.artist == b.artist);
        assert_eq!(shared, vec![song("A", "Toto")]);
    }

    #[test]
    fn test_intersection_not_commutative_in_instances() {
        let first = Playlist::new(vec![song("Roxanne", "Police")], None);
        let second = Playlist::new(vec![song("ROXANNE", "Sting")], None);
        assert_eq!(intersect(&first, &second).songs()[0].artist, "Police");
        assert_eq!(intersect(&second, &first).songs()[0].artist, "Sting");
    }
}

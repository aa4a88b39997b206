// Encounters are the head-to-head aggregates of the two matches between one
// pair of players. They are derived from matches on every query, never stored.
use std::collections::HashMap;

use crate::{match_event::Match, types::PlayerId};

// Order-independent identity of a player pair: the lower ID always comes first.
#[derive(Debug, Clone, Copy)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    pub one: PlayerId,
    pub two: PlayerId,
}

impl PairKey {
    pub fn build(a: PlayerId, b: PlayerId) -> Self {
        match a <= b {
            true => Self { one: a, two: b },
            false => Self { one: b, two: a },
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Encounter {
    pub matches: Vec<Match>,

    // Wins in pair-key order: one_wins belongs to the lower player ID.
    pub one_wins: u8,
    pub two_wins: u8,

    // True once every match of the pair has been played.
    pub done: bool,
}

impl Encounter {
    // Points awarded for the encounter, in pair-key order.
    // Nothing is awarded while matches are still pending.
    pub fn points(&self) -> (u8, u8) {
        if !self.done {
            (0, 0)
        }
        else if self.one_wins > self.two_wins {
            (3, 0)
        }
        else if self.two_wins > self.one_wins {
            (0, 3)
        }
        else {
            (1, 1)
        }
    }
}

// Fold the matches into encounters, one per player pair.
// Pure and idempotent: the input order never affects the result.
pub fn encounters(matches: &[Match]) -> HashMap<PairKey, Encounter> {
    let mut map: HashMap<PairKey, Encounter> = HashMap::new();

    for game in matches.iter() {
        let key = PairKey::build(game.player_one_id, game.player_two_id);
        let encounter = map.entry(key).or_default();

        match game.winner_id() {
            Some(id) if id == key.one => encounter.one_wins += 1,
            Some(_) => encounter.two_wins += 1,
            None => (),
        }

        encounter.matches.push(game.clone());
    }

    for encounter in map.values_mut() {
        // A fixed match order keeps the mapping identical for any input permutation.
        encounter.matches.sort_by(|a, b| a.id.cmp(&b.id));
        encounter.done = encounter.matches.iter().all(|game| game.is_played());
    }

    return map;
}

// Check if every encounter of the given matches is done.
// Groups with no matches count as complete.
pub fn all_done(matches: &[Match]) -> bool {
    encounters(matches).values().all(|encounter| encounter.done)
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn played(id: u16, one: PlayerId, two: PlayerId, score_one: u8, score_two: u8) -> Match {
        let mut game = Match::build(1, 1, one, two);
        game.id = id;
        game.player_one_score = score_one;
        game.player_two_score = score_two;
        game.played_on = Some(date!(2024-05-01));
        return game;
    }

    fn pending(id: u16, one: PlayerId, two: PlayerId) -> Match {
        let mut game = Match::build(1, 1, one, two);
        game.id = id;
        return game;
    }

    #[test]
    fn pair_keys_ignore_slot_order() {
        assert_eq!(PairKey::build(3, 8), PairKey::build(8, 3));
        assert_eq!(PairKey::build(3, 8).one, 3);
    }

    #[test]
    fn wins_go_to_the_actual_player_in_both_fixture_directions() {
        // Player 2 wins both matches, once from each slot.
        let matches = vec![
            played(1, 2, 5, 3, 1),
            played(2, 5, 2, 0, 2),
        ];

        let map = encounters(&matches);
        let encounter = &map[&PairKey::build(2, 5)];

        assert_eq!(encounter.one_wins, 2);
        assert_eq!(encounter.two_wins, 0);
        assert!(encounter.done);
    }

    #[test]
    fn encounter_is_not_done_until_every_match_is_played() {
        let matches = vec![
            played(1, 1, 2, 2, 0),
            pending(2, 2, 1),
        ];

        let map = encounters(&matches);
        let encounter = &map[&PairKey::build(1, 2)];

        assert_eq!(encounter.one_wins, 1);
        assert!(!encounter.done);
        assert!(!all_done(&matches));
    }

    #[test]
    fn input_order_never_changes_the_result() {
        let mut matches = vec![
            played(1, 1, 2, 2, 0),
            played(2, 2, 1, 1, 3),
            pending(3, 1, 3),
            pending(4, 3, 1),
            played(5, 2, 3, 0, 4),
            played(6, 3, 2, 2, 1),
        ];

        let forward = encounters(&matches);
        matches.reverse();
        let backward = encounters(&matches);

        assert_eq!(forward.len(), backward.len());
        for (key, encounter) in forward.iter() {
            let other = &backward[key];
            assert_eq!(encounter.matches, other.matches);
            assert_eq!(encounter.one_wins, other.one_wins);
            assert_eq!(encounter.two_wins, other.two_wins);
            assert_eq!(encounter.done, other.done);
        }
    }

    #[test]
    fn split_encounters_award_a_point_each() {
        let matches = vec![
            played(1, 1, 2, 2, 0),
            played(2, 2, 1, 1, 0),
        ];

        let encounter = &encounters(&matches)[&PairKey::build(1, 2)];
        assert_eq!(encounter.one_wins, 1);
        assert_eq!(encounter.two_wins, 1);
        assert_eq!(encounter.points(), (1, 1));
    }

    #[test]
    fn pending_encounters_award_nothing() {
        let matches = vec![
            played(1, 1, 2, 2, 0),
            pending(2, 2, 1),
        ];

        let encounter = &encounters(&matches)[&PairKey::build(1, 2)];
        assert_eq!(encounter.points(), (0, 0));
    }

    #[test]
    fn no_matches_mean_no_encounters() {
        assert!(encounters(&[]).is_empty());
        assert!(all_done(&[]));
    }
}

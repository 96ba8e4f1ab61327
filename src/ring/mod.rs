//! Target-ring construction and relinking.
//!
//! ## The ring
//!
//! While the game is active, the alive players form one directed cycle of
//! "who is hunting whom": following `target_identity` from any alive
//! player visits every alive player once and comes back, and nobody
//! targets themselves.
//!
//! ## Construction
//!
//! [`build`] shuffles the alive players uniformly and has each one target
//! the next in shuffled order, wrapping the last to the first. For n ≥ 2
//! distinct players "next in a shuffled list" can never be yourself, so
//! the rotation is a single-cycle derangement with no rejection sampling.
//! n < 2 is rejected: a one-player ring would be a self-loop.
//!
//! Rebuilding while a game is active is allowed and is a destructive
//! reshuffle: every alive player gets a fresh target, in-progress hunts
//! are discarded. Dead players keep their frozen targets.
//!
//! ## Relinking
//!
//! [`relink_on_elimination`] closes the gap a death leaves: the victim's
//! hunter inherits the victim's frozen target, shrinking the cycle by one.
//! An elimination with no alive hunter (admin-initiated removal, victim
//! already dead) is a normal outcome, not an error.

use thiserror::Error;

use crate::core::identity::PlayerIdentity;
use crate::core::rng::GameRng;
use crate::error::Error;
use crate::store::Roster;

/// Outcome of a relink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Relink {
    /// The victim's hunter inherited the victim's target.
    Relinked { killer: PlayerIdentity },
    /// No alive player was hunting the victim; nothing changed.
    NoKiller,
}

/// Build (or destructively rebuild) the target ring over alive players.
pub fn build(roster: &mut Roster, rng: &mut GameRng) -> Result<(), Error> {
    let mut order: Vec<PlayerIdentity> =
        roster.alive().map(|p| p.identity.clone()).collect();

    if order.len() < 2 {
        return Err(Error::RosterTooSmall { alive: order.len() });
    }

    rng.shuffle(&mut order);

    for (i, identity) in order.iter().enumerate() {
        let target = order[(i + 1) % order.len()].clone();
        roster
            .get_mut(identity)
            .expect("alive identity came from this roster")
            .target_identity = Some(target);
    }

    Ok(())
}

/// Rewire the ring around an eliminated player.
///
/// The victim's record must already exist; its (frozen) target is donated
/// to whichever alive player was hunting it. Tolerates an unknown victim
/// by reporting [`Relink::NoKiller`]; eligibility is the caller's check.
pub fn relink_on_elimination(roster: &mut Roster, victim: &PlayerIdentity) -> Relink {
    let Some(donated) = roster.get(victim).and_then(|p| p.target_identity.clone()) else {
        return Relink::NoKiller;
    };

    let Some(killer) = roster.hunter_of(victim).map(|p| p.identity.clone()) else {
        return Relink::NoKiller;
    };

    roster
        .get_mut(&killer)
        .expect("hunter came from this roster")
        .target_identity = Some(donated);

    Relink::Relinked { killer }
}

/// A way the alive subgraph can fail to be a single clean cycle.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RingViolation {
    #[error("{identity} is alive with no target")]
    MissingTarget { identity: PlayerIdentity },

    #[error("{identity} targets itself")]
    SelfTarget { identity: PlayerIdentity },

    #[error("{identity} targets {target}, which is not an alive player")]
    TargetNotAlive {
        identity: PlayerIdentity,
        target: PlayerIdentity,
    },

    #[error("cycle from {start} covers {visited} of {alive} alive players")]
    Fragmented {
        start: PlayerIdentity,
        visited: usize,
        alive: usize,
    },
}

/// Verify the single-cycle invariant over alive players.
///
/// Skips rosters with fewer than two alive players: during registration
/// there is nothing to audit, and the post-victory single survivor holds a
/// self-referential donated target by design.
pub fn audit(roster: &Roster) -> Result<(), RingViolation> {
    let alive = roster.alive_count();
    if alive < 2 {
        return Ok(());
    }

    let start = roster
        .alive()
        .next()
        .expect("alive count checked above")
        .identity
        .clone();

    let mut current = start.clone();
    for step in 0..alive {
        let player = roster.get(&current).expect("walk stays inside the roster");

        let Some(target) = player.target_identity.clone() else {
            return Err(RingViolation::MissingTarget { identity: current });
        };
        if target == current {
            return Err(RingViolation::SelfTarget { identity: current });
        }
        match roster.get(&target) {
            Some(next) if next.is_alive() => {}
            _ => {
                return Err(RingViolation::TargetNotAlive {
                    identity: current,
                    target,
                });
            }
        }

        current = target;
        if current == start {
            let visited = step + 1;
            if visited == alive {
                return Ok(());
            }
            return Err(RingViolation::Fragmented {
                start,
                visited,
                alive,
            });
        }
    }

    // Walked `alive` steps without closing: some alive player was never
    // reached, or a sub-cycle excludes `start`.
    Err(RingViolation::Fragmented {
        start,
        visited: alive,
        alive,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::PlayerIdentity;

    fn id(raw: &str) -> PlayerIdentity {
        PlayerIdentity::new(raw)
    }

    fn roster_of(names: &[&str]) -> Roster {
        let mut roster = Roster::new();
        for name in names {
            roster.register(id(name), name.to_uppercase()).unwrap();
        }
        roster
    }

    #[test]
    fn test_build_rejects_small_rosters() {
        let mut rng = GameRng::new(42);

        let mut empty = Roster::new();
        let err = build(&mut empty, &mut rng).unwrap_err();
        assert!(matches!(err, Error::RosterTooSmall { alive: 0 }));

        let mut solo = roster_of(&["a"]);
        let err = build(&mut solo, &mut rng).unwrap_err();
        assert!(matches!(err, Error::RosterTooSmall { alive: 1 }));
        assert!(solo.get(&id("a")).unwrap().target_identity.is_none());
    }

    #[test]
    fn test_build_two_players_is_a_swap() {
        let mut roster = roster_of(&["a", "b"]);
        build(&mut roster, &mut GameRng::new(42)).unwrap();

        assert_eq!(
            roster.get(&id("a")).unwrap().target_identity,
            Some(id("b"))
        );
        assert_eq!(
            roster.get(&id("b")).unwrap().target_identity,
            Some(id("a"))
        );
    }

    #[test]
    fn test_build_produces_single_cycle() {
        for seed in 0..20 {
            let mut roster = roster_of(&["a", "b", "c", "d", "e", "f", "g"]);
            build(&mut roster, &mut GameRng::new(seed)).unwrap();
            audit(&roster).unwrap();
        }
    }

    #[test]
    fn test_build_skips_dead_players() {
        let mut roster = roster_of(&["a", "b", "c", "d"]);
        roster.get_mut(&id("c")).unwrap().mark_dead();

        build(&mut roster, &mut GameRng::new(42)).unwrap();

        assert!(roster.get(&id("c")).unwrap().target_identity.is_none());
        assert!(roster
            .alive()
            .all(|p| p.target_identity.as_ref() != Some(&id("c"))));
        audit(&roster).unwrap();
    }

    #[test]
    fn test_rebuild_discards_previous_ring() {
        let mut roster = roster_of(&["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]);
        build(&mut roster, &mut GameRng::new(1)).unwrap();
        let first: Vec<_> = roster
            .iter()
            .map(|p| p.target_identity.clone())
            .collect();

        build(&mut roster, &mut GameRng::new(2)).unwrap();
        let second: Vec<_> = roster
            .iter()
            .map(|p| p.target_identity.clone())
            .collect();

        audit(&roster).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_relink_donates_victims_target() {
        let mut roster = roster_of(&["a", "b", "c"]);
        // Fix the ring by hand: a -> b -> c -> a.
        roster.get_mut(&id("a")).unwrap().target_identity = Some(id("b"));
        roster.get_mut(&id("b")).unwrap().target_identity = Some(id("c"));
        roster.get_mut(&id("c")).unwrap().target_identity = Some(id("a"));

        roster.get_mut(&id("b")).unwrap().mark_dead();
        let outcome = relink_on_elimination(&mut roster, &id("b"));

        assert_eq!(outcome, Relink::Relinked { killer: id("a") });
        assert_eq!(
            roster.get(&id("a")).unwrap().target_identity,
            Some(id("c"))
        );
        // The victim's own record is frozen, not cleared.
        assert_eq!(
            roster.get(&id("b")).unwrap().target_identity,
            Some(id("c"))
        );
        audit(&roster).unwrap();
    }

    #[test]
    fn test_relink_without_hunter_changes_nothing() {
        let mut roster = roster_of(&["a", "b", "c"]);
        roster.get_mut(&id("a")).unwrap().target_identity = Some(id("b"));
        roster.get_mut(&id("b")).unwrap().target_identity = Some(id("c"));
        roster.get_mut(&id("c")).unwrap().target_identity = Some(id("a"));

        // c's hunter b is already dead, so eliminating c finds no killer.
        roster.get_mut(&id("b")).unwrap().mark_dead();
        roster.get_mut(&id("c")).unwrap().mark_dead();
        let before: Vec<_> = roster.iter().map(|p| p.target_identity.clone()).collect();

        let outcome = relink_on_elimination(&mut roster, &id("c"));

        assert_eq!(outcome, Relink::NoKiller);
        let after: Vec<_> = roster.iter().map(|p| p.target_identity.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_relink_unknown_victim_is_no_killer() {
        let mut roster = roster_of(&["a", "b"]);
        build(&mut roster, &mut GameRng::new(42)).unwrap();

        assert_eq!(
            relink_on_elimination(&mut roster, &id("ghost")),
            Relink::NoKiller
        );
        audit(&roster).unwrap();
    }

    #[test]
    fn test_final_two_collapse_to_self_referential_survivor() {
        let mut roster = roster_of(&["a", "b"]);
        roster.get_mut(&id("a")).unwrap().target_identity = Some(id("b"));
        roster.get_mut(&id("b")).unwrap().target_identity = Some(id("a"));

        roster.get_mut(&id("b")).unwrap().mark_dead();
        let outcome = relink_on_elimination(&mut roster, &id("b"));

        assert_eq!(outcome, Relink::Relinked { killer: id("a") });
        // The survivor inherits themselves; audit treats one-alive as final.
        assert_eq!(
            roster.get(&id("a")).unwrap().target_identity,
            Some(id("a"))
        );
        audit(&roster).unwrap();
        assert_eq!(roster.sole_survivor().unwrap().identity, id("a"));
    }

    #[test]
    fn test_audit_catches_fragmented_ring() {
        let mut roster = roster_of(&["a", "b", "c", "d"]);
        // Two 2-cycles instead of one 4-cycle.
        roster.get_mut(&id("a")).unwrap().target_identity = Some(id("b"));
        roster.get_mut(&id("b")).unwrap().target_identity = Some(id("a"));
        roster.get_mut(&id("c")).unwrap().target_identity = Some(id("d"));
        roster.get_mut(&id("d")).unwrap().target_identity = Some(id("c"));

        let err = audit(&roster).unwrap_err();
        assert!(matches!(err, RingViolation::Fragmented { visited: 2, alive: 4, .. }));
    }

    #[test]
    fn test_audit_catches_self_target_and_dead_target() {
        let mut roster = roster_of(&["a", "b"]);
        roster.get_mut(&id("a")).unwrap().target_identity = Some(id("a"));
        roster.get_mut(&id("b")).unwrap().target_identity = Some(id("a"));
        assert!(matches!(
            audit(&roster).unwrap_err(),
            RingViolation::SelfTarget { .. }
        ));

        let mut roster = roster_of(&["a", "b", "c"]);
        roster.get_mut(&id("a")).unwrap().target_identity = Some(id("b"));
        roster.get_mut(&id("b")).unwrap().target_identity = Some(id("c"));
        roster.get_mut(&id("c")).unwrap().target_identity = Some(id("a"));
        roster.get_mut(&id("c")).unwrap().mark_dead();
        // b now points at a dead player.
        assert!(matches!(
            audit(&roster).unwrap_err(),
            RingViolation::TargetNotAlive { .. }
        ));
    }
}

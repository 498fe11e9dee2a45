#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use glam::DVec2;

    use broadside_core::constants::*;
    use broadside_core::enums::{AiState, Difficulty, VesselClass};
    use broadside_core::types::EntityHandle;

    use crate::fsm::*;
    use crate::profiles::get_profile;
    use crate::steering::*;
    use crate::targeting::*;

    // --- Steering ---

    #[test]
    fn test_turn_direction_picks_short_way() {
        assert_eq!(turn_direction(0.0, 90.0), 1.0);
        assert_eq!(turn_direction(0.0, 270.0), -1.0);
        assert_eq!(turn_direction(350.0, 10.0), 1.0);
        assert_eq!(turn_direction(10.0, 350.0), -1.0);
    }

    #[test]
    fn test_turn_toward_wraps_past_zero() {
        let r = turn_toward(359.0, 90.0, 150.0, DT);
        assert_abs_diff_eq!(r, 1.5, epsilon = 1e-9);

        let r = turn_toward(10.0, 350.0, 150.0, 0.1);
        assert_abs_diff_eq!(r, 355.0, epsilon = 1e-9);
    }

    #[test]
    fn test_turn_toward_holds_in_deadband() {
        assert_eq!(turn_toward(10.0, 10.3, 150.0, DT), 10.0);
    }

    #[test]
    fn test_forward_displacement_follows_heading() {
        let d = forward_displacement(90.0, 100.0, 0.5, 1.0);
        assert_abs_diff_eq!(d.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d.y, 50.0, epsilon = 1e-9);

        let back = forward_displacement(0.0, 100.0, 0.5, -1.0);
        assert_abs_diff_eq!(back.x, -50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_angle_to_destination() {
        assert_eq!(angle_to_destination(DVec2::ZERO, None), None);
        let a = angle_to_destination(DVec2::ZERO, Some(DVec2::new(0.0, -10.0))).unwrap();
        assert_abs_diff_eq!(a, 270.0, epsilon = 1e-9);
    }

    // --- State selection ---

    #[test]
    fn test_state_transitions_by_distance() {
        assert_eq!(select_state(Some(300.0), ATTACK_RANGE, APPROACH_RANGE), AiState::Attack);
        assert_eq!(select_state(Some(500.0), ATTACK_RANGE, APPROACH_RANGE), AiState::Approach);
        assert_eq!(select_state(Some(700.0), ATTACK_RANGE, APPROACH_RANGE), AiState::Idle);
        assert_eq!(select_state(None, ATTACK_RANGE, APPROACH_RANGE), AiState::Idle);
    }

    #[test]
    fn test_state_thresholds_are_strict() {
        assert_eq!(
            select_state(Some(ATTACK_RANGE), ATTACK_RANGE, APPROACH_RANGE),
            AiState::Approach
        );
        assert_eq!(
            select_state(Some(APPROACH_RANGE), ATTACK_RANGE, APPROACH_RANGE),
            AiState::Idle
        );
    }

    fn context(rotation: f64, target: Option<DVec2>, shot_ready: bool) -> CombatContext {
        CombatContext {
            position: DVec2::ZERO,
            rotation,
            target,
            attack_range: ATTACK_RANGE,
            approach_range: APPROACH_RANGE,
            shot_ready,
        }
    }

    #[test]
    fn test_no_target_is_idle() {
        assert_eq!(evaluate(&context(0.0, None, true)), CombatDecision::Idle);
    }

    #[test]
    fn test_approach_heads_for_target() {
        let target = DVec2::new(500.0, 0.0);
        let decision = evaluate(&context(0.0, Some(target), true));
        assert_eq!(decision, CombatDecision::Approach { target });
        assert_eq!(decision.state(), AiState::Approach);
    }

    #[test]
    fn test_attack_turns_broadside() {
        // Target due east; heading 0 is closer to the 90° beam.
        let decision = evaluate(&context(0.0, Some(DVec2::new(300.0, 0.0)), true));
        match decision {
            CombatDecision::Attack {
                desired_heading,
                fire,
            } => {
                assert_abs_diff_eq!(desired_heading, 90.0, epsilon = 1e-9);
                assert!(!fire, "bow-on is outside the firing window");
            }
            other => panic!("expected Attack, got {other:?}"),
        }
    }

    #[test]
    fn test_firing_window_single_beam() {
        let target = DVec2::new(300.0, 0.0);
        assert!(in_firing_window(DVec2::ZERO, 270.0, target));
        assert!(in_firing_window(DVec2::ZERO, 275.0, target));
        assert!(!in_firing_window(DVec2::ZERO, 295.0, target));
        // The opposite beam folds to 270° and never opens the window.
        assert!(!in_firing_window(DVec2::ZERO, 90.0, target));
    }

    #[test]
    fn test_attack_fires_only_when_reloaded() {
        let target = Some(DVec2::new(300.0, 0.0));
        let ready = evaluate(&context(270.0, target, true));
        let reloading = evaluate(&context(270.0, target, false));
        assert!(matches!(ready, CombatDecision::Attack { fire: true, .. }));
        assert!(matches!(reloading, CombatDecision::Attack { fire: false, .. }));
    }

    // --- Targeting ---

    fn candidate(id: u64, x: f64) -> Candidate {
        Candidate {
            handle: EntityHandle(id),
            position: DVec2::new(x, 0.0),
        }
    }

    #[test]
    fn test_nearest_first_wins_ties() {
        let found = nearest(
            DVec2::ZERO,
            [candidate(1, 200.0), candidate(2, 100.0), candidate(3, -100.0), candidate(4, 1200.0)],
        );
        assert_eq!(found.map(|c| c.handle), Some(EntityHandle(2)));
    }

    #[test]
    fn test_nearest_respects_sentinel() {
        assert!(nearest(DVec2::ZERO, [candidate(1, TARGET_SEARCH_SENTINEL)]).is_none());
        assert!(nearest(DVec2::ZERO, [candidate(1, TARGET_SEARCH_SENTINEL - 1.0)]).is_some());
        assert!(nearest(DVec2::ZERO, []).is_none());
    }

    #[test]
    fn test_priority_target_preferred_in_range() {
        let player = candidate(9, 600.0);
        let others = [candidate(1, 100.0)];
        let t = priority_or_nearest(DVec2::ZERO, Some(player), APPROACH_RANGE, others);
        assert_eq!(t.map(|c| c.handle), Some(EntityHandle(9)));

        let far_player = candidate(9, 700.0);
        let t = priority_or_nearest(DVec2::ZERO, Some(far_player), APPROACH_RANGE, others);
        assert_eq!(t.map(|c| c.handle), Some(EntityHandle(1)));
    }

    // --- Profiles ---

    #[test]
    fn test_hostile_profiles_scale_with_difficulty() {
        let enemy = get_profile(VesselClass::Enemy);
        assert_eq!(enemy.scaled_health(Difficulty::Hard), ENEMY_MAX_HEALTH * 1.5);
        assert_eq!(enemy.damage_multiplier(Difficulty::Easy), 0.75);

        let friendly = get_profile(VesselClass::Friendly);
        assert_eq!(friendly.scaled_health(Difficulty::Hard), FRIENDLY_MAX_HEALTH);
        assert!(friendly.fights);
        assert!(!get_profile(VesselClass::Neutral).fights);
    }
}

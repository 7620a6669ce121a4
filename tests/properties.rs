use proptest::prelude::*;
use rosu_strain::{Rating, Skill, SkillConfig, TimedObjects};

use self::common::*;

mod common;

/// Sorted millisecond timestamps starting at 0.
fn timestamps() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0_u32..20_000, 0..120).prop_map(|mut times| {
        times.push(0);
        times.sort_unstable();

        times.into_iter().map(f64::from).collect()
    })
}

proptest! {
    #[test]
    fn section_count_covers_duration(
        times in timestamps(),
        section_len in 50_u32..1000,
    ) {
        let section_len = f64::from(section_len);
        let objects = TimedObjects::new(times.iter().map(|&t| (t, ()))).unwrap();
        let rating = Rating::new(SkillConfig::aim(true).section_len(section_len));

        let strains = rating.strains(&objects, &constant(1.0)).unwrap();
        let expected = (objects.duration() / section_len).ceil().max(1.0) as usize;

        prop_assert_eq!(strains.len(), expected);
    }

    #[test]
    fn skipped_sections_are_dropped_from_the_front(
        times in timestamps(),
        skip in 0_usize..10,
    ) {
        let objects = TimedObjects::new(times.iter().map(|&t| (t, ()))).unwrap();

        let all = Rating::new(SkillConfig::aim(true))
            .strains(&objects, &constant(1.0))
            .unwrap();
        let skipped = Rating::new(SkillConfig::aim(true).skip_initial_sections(skip))
            .strains(&objects, &constant(1.0))
            .unwrap();

        let start = skip.min(all.len());
        prop_assert_eq!(&all.peaks[start..], &skipped.peaks[..]);
    }

    #[test]
    fn outputs_stay_in_bounds(
        items in prop::collection::vec((0.0..500.0_f64, 0.0..10.0_f64), 0..150),
    ) {
        let mut time = 0.0;
        let items = items.into_iter().map(|(gap, difficulty)| {
            time += gap;

            (time, difficulty)
        });

        let objects = TimedObjects::new(items).unwrap();
        let attrs = Rating::new(SkillConfig::aim(true)).calculate(&objects, &payload).unwrap();

        prop_assert!(attrs.rating >= 0.0);
        prop_assert!((0.0..=1.0).contains(&attrs.consistency));
        prop_assert!(attrs.difficult_strain_count >= 0.0);
    }

    #[test]
    fn strain_converges_to_geometric_limit(n in 1_usize..60, difficulty in 0.01..5.0_f64) {
        let objects = TimedObjects::new((0..n).map(|i| (i as f64 * 1000.0, ()))).unwrap();
        let mut skill = Skill::new(SkillConfig::aim(true)).unwrap();

        for curr in objects.iter() {
            skill.process(curr, &objects, &constant(difficulty)).unwrap();
        }

        let limit = difficulty * AIM_SKILL_MULTIPLIER / (1.0 - AIM_STRAIN_DECAY_BASE);
        let strains = skill.object_strains();

        // Increments eventually fall below float precision
        for pair in strains.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }

        let last = strains[n - 1];
        let expected = limit * (1.0 - AIM_STRAIN_DECAY_BASE.powi(n as i32));

        prop_assert!(last <= limit * (1.0 + 1e-12));
        prop_assert!((last - expected).abs() <= 1e-9 * limit);
    }

    #[test]
    fn zero_gap_strain_does_not_decay(n in 1_usize..50) {
        let objects = TimedObjects::new((0..n).map(|_| (0.0, ()))).unwrap();
        let mut skill = Skill::new(SkillConfig::aim(true)).unwrap();

        for curr in objects.iter() {
            skill.process(curr, &objects, &constant(1.0)).unwrap();
        }

        let last = skill.object_strains()[n - 1];

        prop_assert!((last - n as f64 * AIM_SKILL_MULTIPLIER).abs() <= 1e-9 * last);
    }
}

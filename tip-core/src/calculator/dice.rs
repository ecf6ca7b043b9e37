//! Die roll tip suggestion
//!
//! A six-sided roll pre-selects a tip rate: 1→5%, 2→10%, 3→15%, 4→20%,
//! 5→25%, 6→30%.

use rand::Rng;
use shared::TipRate;

/// Roll → recommended rate, indexed by `face - 1`
pub const ROLL_TO_RATE: [TipRate; 6] = [
    TipRate::FivePercent,
    TipRate::TenPercent,
    TipRate::FifteenPercent,
    TipRate::TwentyPercent,
    TipRate::TwentyFivePercent,
    TipRate::ThirtyPercent,
];

/// A fair die with `sides` faces numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Die {
    sides: u8,
}

impl Die {
    pub const STANDARD: Die = Die { sides: 6 };

    /// `None` for a zero-sided die
    pub fn new(sides: u8) -> Option<Self> {
        (sides > 0).then_some(Self { sides })
    }

    pub fn sides(&self) -> u8 {
        self.sides
    }

    /// Uniform draw from `1..=sides`
    pub fn roll(&self) -> u8 {
        self.roll_with(&mut rand::thread_rng())
    }

    pub fn roll_with<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        rng.gen_range(1..=self.sides)
    }
}

/// Result of rolling the standard die
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DieRoll(u8);

impl DieRoll {
    pub fn roll() -> Self {
        Self(Die::STANDARD.roll())
    }

    pub fn roll_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(Die::STANDARD.roll_with(rng))
    }

    /// `None` outside `1..=6`
    pub fn from_face(face: u8) -> Option<Self> {
        (1..=6).contains(&face).then_some(Self(face))
    }

    pub fn face(&self) -> u8 {
        self.0
    }

    pub fn recommended_rate(&self) -> TipRate {
        ROLL_TO_RATE[usize::from(self.0 - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_mapping_is_fixed() {
        let expected = [
            (1, TipRate::FivePercent),
            (2, TipRate::TenPercent),
            (3, TipRate::FifteenPercent),
            (4, TipRate::TwentyPercent),
            (5, TipRate::TwentyFivePercent),
            (6, TipRate::ThirtyPercent),
        ];
        for (face, rate) in expected {
            assert_eq!(DieRoll::from_face(face).unwrap().recommended_rate(), rate);
        }
    }

    #[test]
    fn test_from_face_bounds() {
        assert!(DieRoll::from_face(0).is_none());
        assert!(DieRoll::from_face(7).is_none());
        assert_eq!(DieRoll::from_face(6).map(|r| r.face()), Some(6));
    }

    #[test]
    fn test_zero_sided_die() {
        assert!(Die::new(0).is_none());
        assert_eq!(Die::new(20).map(|d| d.sides()), Some(20));
    }

    #[test]
    fn test_rolls_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let face = DieRoll::roll_with(&mut rng).face();
            assert!((1..=6).contains(&face));
        }
        for _ in 0..100 {
            assert!((1..=6).contains(&DieRoll::roll().face()));
        }
    }

    #[test]
    fn test_roll_is_roughly_uniform() {
        const TRIALS: usize = 60_000;
        let mut rng = StdRng::seed_from_u64(0x71b);
        let mut counts = [0usize; 6];
        for _ in 0..TRIALS {
            counts[usize::from(Die::STANDARD.roll_with(&mut rng) - 1)] += 1;
        }

        // Expected 10_000 per face; allow ±5%
        for (face, count) in counts.iter().enumerate() {
            assert!(
                (9_500..=10_500).contains(count),
                "face {} came up {} times",
                face + 1,
                count
            );
        }
    }

    #[test]
    fn test_custom_die_covers_all_faces() {
        let die = Die::new(3).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = [false; 3];
        for _ in 0..300 {
            seen[usize::from(die.roll_with(&mut rng) - 1)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}

use crate::models::SeverityLevel;

pub const CRISIS_SYSTOLIC: u16 = 180;
pub const CRISIS_DIASTOLIC: u16 = 120;
pub const STAGE2_SYSTOLIC: u16 = 140;
pub const STAGE2_DIASTOLIC: u16 = 90;
pub const LOW_SYSTOLIC: u16 = 90;
pub const LOW_DIASTOLIC: u16 = 60;

/// Maps a systolic/diastolic pair onto a severity band.
///
/// The bands overlap, so the order of the checks is significant: the first
/// match wins, from crisis down to low, and anything left over is normal.
pub fn classify(systolic: u16, diastolic: u16) -> SeverityLevel {
    if systolic >= CRISIS_SYSTOLIC || diastolic >= CRISIS_DIASTOLIC {
        SeverityLevel::Crisis
    } else if systolic >= STAGE2_SYSTOLIC || diastolic >= STAGE2_DIASTOLIC {
        SeverityLevel::Stage2
    } else if (130..=139).contains(&systolic) || (80..=89).contains(&diastolic) {
        SeverityLevel::Stage1
    } else if (120..=129).contains(&systolic) && diastolic < 80 {
        SeverityLevel::Elevated
    } else if systolic < LOW_SYSTOLIC || diastolic < LOW_DIASTOLIC {
        SeverityLevel::Low
    } else {
        SeverityLevel::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_readings() {
        assert_eq!(classify(120, 75), SeverityLevel::Elevated);
        assert_eq!(classify(135, 85), SeverityLevel::Stage1);
        assert_eq!(classify(150, 95), SeverityLevel::Stage2);
        assert_eq!(classify(190, 70), SeverityLevel::Crisis);
        assert_eq!(classify(85, 55), SeverityLevel::Low);
        assert_eq!(classify(115, 75), SeverityLevel::Normal);
    }

    #[test]
    fn crisis_wins_over_every_other_band() {
        // Diastolic crisis with a systolic that alone would be low.
        assert_eq!(classify(85, 120), SeverityLevel::Crisis);
        assert_eq!(classify(180, 50), SeverityLevel::Crisis);
        for s in [60u16, 100, 125, 135, 150, 180, 220] {
            assert_eq!(classify(s, 125), SeverityLevel::Crisis, "sbp {s}");
        }
        for d in [40u16, 70, 85, 95, 119] {
            assert_eq!(classify(185, d), SeverityLevel::Crisis, "dbp {d}");
        }
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(classify(179, 119), SeverityLevel::Stage2);
        assert_eq!(classify(140, 70), SeverityLevel::Stage2);
        assert_eq!(classify(110, 90), SeverityLevel::Stage2);
        assert_eq!(classify(139, 70), SeverityLevel::Stage1);
        assert_eq!(classify(130, 70), SeverityLevel::Stage1);
        assert_eq!(classify(110, 80), SeverityLevel::Stage1);
        assert_eq!(classify(129, 79), SeverityLevel::Elevated);
        assert_eq!(classify(119, 79), SeverityLevel::Normal);
        assert_eq!(classify(90, 60), SeverityLevel::Normal);
    }

    #[test]
    fn stage1_diastolic_beats_low_systolic() {
        // 85 systolic would be low, but the diastolic lands in stage 1 first.
        assert_eq!(classify(85, 82), SeverityLevel::Stage1);
    }

    #[test]
    fn low_on_either_value() {
        assert_eq!(classify(89, 70), SeverityLevel::Low);
        assert_eq!(classify(110, 59), SeverityLevel::Low);
        // Elevated systolic with a low diastolic is still elevated.
        assert_eq!(classify(125, 55), SeverityLevel::Elevated);
    }
}

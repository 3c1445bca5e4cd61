/// Systolic minus diastolic. Signed: implausible input can go negative.
pub fn pulse_pressure(systolic: u16, diastolic: u16) -> i32 {
    i32::from(systolic) - i32::from(diastolic)
}

/// `(systolic + 2 * diastolic) / 3`, rounded half up.
///
/// Integer arithmetic: adding 1 before dividing by 3 rounds .667 up and .333
/// down. A remainder of exactly .5 cannot occur with a divisor of 3.
pub fn mean_arterial_pressure(systolic: u16, diastolic: u16) -> u16 {
    let numerator = u32::from(systolic) + 2 * u32::from(diastolic);
    // Max is (65535 * 3 + 1) / 3 = 65535, so the cast cannot truncate.
    ((numerator + 1) / 3) as u16
}

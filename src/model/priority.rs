use egui::Color32;

/// One of the six priority bands. Matches values in `(lower, upper]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorityBand {
    pub lower: f64,
    pub upper: f64,
    pub color: Color32,
    pub label: &'static str,
}

impl PriorityBand {
    pub fn contains(&self, value: f64) -> bool {
        self.lower < value && value <= self.upper
    }
}

/// Fill used for values that fall outside every band.
pub const UNCLASSIFIED_FILL: Color32 = Color32::from_rgb(250, 250, 250);

/// Bands in evaluation order; the first match wins.
pub const PRIORITY_BANDS: [PriorityBand; 6] = [
    PriorityBand {
        lower: 0.5,
        upper: 1.0,
        color: Color32::from_rgb(255, 160, 122),
        label: "Priority 1",
    },
    PriorityBand {
        lower: 0.4,
        upper: 0.5,
        color: Color32::from_rgb(233, 150, 122),
        label: "Priority 2",
    },
    PriorityBand {
        lower: 0.3,
        upper: 0.4,
        color: Color32::from_rgb(250, 128, 114),
        label: "Priority 3",
    },
    PriorityBand {
        lower: 0.2,
        upper: 0.3,
        color: Color32::from_rgb(240, 128, 128),
        label: "Priority 4",
    },
    PriorityBand {
        lower: 0.1,
        upper: 0.2,
        color: Color32::from_rgb(205, 92, 92),
        label: "Priority 5",
    },
    PriorityBand {
        lower: 0.0,
        upper: 0.1,
        color: Color32::from_rgb(100, 110, 92),
        label: "Priority 6",
    },
];

/// Find the band for a priority value. `None` means "draw it neutral, no label".
pub fn classify(value: f64) -> Option<&'static PriorityBand> {
    PRIORITY_BANDS.iter().find(|band| band.contains(value))
}

/// Fill color for a value, falling back to the neutral fill.
pub fn fill_color(value: f64) -> Color32 {
    classify(value).map_or(UNCLASSIFIED_FILL, |band| band.color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_bound_is_inclusive() {
        assert_eq!(classify(0.35).unwrap().label, "Priority 3");
        assert_eq!(classify(0.4).unwrap().label, "Priority 3");
        assert_eq!(classify(0.41).unwrap().label, "Priority 2");
        assert_eq!(classify(1.0).unwrap().label, "Priority 1");
        assert_eq!(classify(0.04286).unwrap().label, "Priority 6");
    }

    #[test]
    fn zero_and_out_of_range_are_unclassified() {
        assert!(classify(0.0).is_none());
        assert!(classify(-0.2).is_none());
        assert!(classify(1.5).is_none());
        assert!(classify(f64::NAN).is_none());
        assert_eq!(fill_color(0.0), UNCLASSIFIED_FILL);
    }

    #[test]
    fn bands_partition_unit_interval() {
        for pair in PRIORITY_BANDS.windows(2) {
            assert_eq!(pair[0].lower, pair[1].upper);
        }
        assert_eq!(PRIORITY_BANDS[0].upper, 1.0);
        assert_eq!(PRIORITY_BANDS[5].lower, 0.0);
    }
}

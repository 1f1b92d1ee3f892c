use super::core::KeySymbol;

/// Top of the legal analog domain (10-bit converter on the shield).
pub const KEY_RAW_MAX: u16 = 1023;

/// Stock ladder readings for Right, Up, Down, Left, Select (ordinal
/// order). Individual boards drift; override through the app config.
pub const STOCK_CALIBRATION: [u16; 5] = [0, 144, 329, 505, 742];

/// Half-width of each acceptance window around a calibrated value.
/// Stock adjacent readings sit at least 144 counts apart, so 55 leaves
/// a dead gap between every pair of windows.
pub const STOCK_TOLERANCE: u16 = 55;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalibrationError {
    /// Two tolerance windows intersect; the decoder would be ambiguous
    /// for raw values inside the intersection.
    OverlappingWindows { first: KeySymbol, second: KeySymbol },
}

/// Classification by table: accept the first key whose calibrated value
/// is within `tolerance` of the sample.
///
/// Candidates are checked in a fixed order: Up, Down, Left, Right,
/// Select. With windows validated disjoint at construction at most one
/// key can ever match, but the order is kept stable so behavior stays
/// reproducible if the validation contract is ever relaxed.
#[derive(Clone, Copy, Debug)]
pub struct CalibrationTable {
    values: [u16; 5],
    tolerance: u16,
}

const TABLE_MATCH_ORDER: [KeySymbol; 5] = [
    KeySymbol::Up,
    KeySymbol::Down,
    KeySymbol::Left,
    KeySymbol::Right,
    KeySymbol::Select,
];

impl CalibrationTable {
    /// `values` is indexed by key ordinal (Right first). Rejects any
    /// pair of overlapping tolerance windows up front; ambiguity is a
    /// configuration error, not something to discover per sample.
    pub fn new(values: [u16; 5], tolerance: u16) -> Result<Self, CalibrationError> {
        for first in 0..values.len() {
            for second in (first + 1)..values.len() {
                let gap = values[first].abs_diff(values[second]) as u32;
                if gap <= 2 * tolerance as u32 {
                    return Err(CalibrationError::OverlappingWindows {
                        first: KeySymbol::PRESSABLE[first],
                        second: KeySymbol::PRESSABLE[second],
                    });
                }
            }
        }
        Ok(Self { values, tolerance })
    }

    pub fn stock() -> Self {
        // The stock constants satisfy the window contract; covered by
        // `stock_calibration_is_accepted`.
        Self {
            values: STOCK_CALIBRATION,
            tolerance: STOCK_TOLERANCE,
        }
    }

    fn matches(&self, key: KeySymbol, raw: u16) -> bool {
        self.values[key as usize].abs_diff(raw) <= self.tolerance
    }

    pub fn decode(&self, raw: u16) -> KeySymbol {
        for key in TABLE_MATCH_ORDER {
            if self.matches(key, raw) {
                return key;
            }
        }
        KeySymbol::None
    }
}

/// Closed-form classifier: one affine transform buckets the sample
/// directly onto the key ordinals, no branch cascade.
///
/// Contract: the transform must be monotonic over 0..=`KEY_RAW_MAX` and
/// its bucket edges must fall between the physical ladder readings,
/// otherwise samples misclassify silently. The default coefficients are
/// a linear regression over the stock ladder; re-derive them if the
/// reference resistor values ever change.
#[derive(Clone, Copy, Debug)]
pub struct LinearFitClassifier {
    offset: u32,
    scale: u32,
    shift: u32,
}

impl Default for LinearFitClassifier {
    fn default() -> Self {
        // bucket = (raw + 105) * 43 >> 13, i.e. roughly (raw + 105)/190.
        Self {
            offset: 105,
            scale: 43,
            shift: 13,
        }
    }
}

impl LinearFitClassifier {
    pub fn decode(&self, raw: u16) -> KeySymbol {
        let bucket = ((raw as u32 + self.offset) * self.scale) >> self.shift;
        KeySymbol::from_bucket(bucket.min(u8::MAX as u32) as u8)
    }
}

/// The two classification strategies, named and swappable. The table is
/// the default (runtime-adjustable calibration); the linear fit trades
/// adjustability for a branchless decode.
#[derive(Clone, Copy, Debug)]
pub enum KeyDecoder {
    Table(CalibrationTable),
    LinearFit(LinearFitClassifier),
}

impl Default for KeyDecoder {
    fn default() -> Self {
        KeyDecoder::Table(CalibrationTable::stock())
    }
}

impl KeyDecoder {
    /// Pure function of the sample: every raw value maps to exactly one
    /// symbol, and anything outside all windows degrades to `None`.
    pub fn decode(&self, raw: u16) -> KeySymbol {
        match self {
            KeyDecoder::Table(table) => table.decode(raw),
            KeyDecoder::LinearFit(fit) => fit.decode(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_calibration_is_accepted() {
        assert!(CalibrationTable::new(STOCK_CALIBRATION, STOCK_TOLERANCE).is_ok());
    }

    #[test]
    fn table_decodes_calibrated_values() {
        let table = CalibrationTable::stock();
        for (index, value) in STOCK_CALIBRATION.iter().enumerate() {
            assert_eq!(table.decode(*value), KeySymbol::PRESSABLE[index]);
        }
        assert_eq!(table.decode(KEY_RAW_MAX), KeySymbol::None);
    }

    #[test]
    fn table_window_edges_are_inclusive() {
        let table = CalibrationTable::stock();
        assert_eq!(table.decode(144 - STOCK_TOLERANCE), KeySymbol::Up);
        assert_eq!(table.decode(144 + STOCK_TOLERANCE), KeySymbol::Up);
        assert_eq!(table.decode(144 + STOCK_TOLERANCE + 1), KeySymbol::None);
        assert_eq!(table.decode(144 - STOCK_TOLERANCE - 1), KeySymbol::None);
    }

    #[test]
    fn gap_values_decode_to_none() {
        let table = CalibrationTable::stock();
        for raw in [70u16, 250, 420, 650, 850, 1_000] {
            assert_eq!(table.decode(raw), KeySymbol::None, "raw={raw}");
        }
    }

    #[test]
    fn overlapping_windows_are_rejected_with_the_pair() {
        // Right (0) and Up (144) sit closest; their windows collide
        // once the tolerance reaches half that gap.
        let result = CalibrationTable::new(STOCK_CALIBRATION, 75);
        assert_eq!(
            result.err(),
            Some(CalibrationError::OverlappingWindows {
                first: KeySymbol::Right,
                second: KeySymbol::Up,
            })
        );
    }

    #[test]
    fn linear_fit_decodes_stock_ladder_values() {
        let fit = LinearFitClassifier::default();
        for (index, value) in STOCK_CALIBRATION.iter().enumerate() {
            assert_eq!(fit.decode(*value), KeySymbol::PRESSABLE[index]);
        }
        assert_eq!(fit.decode(KEY_RAW_MAX), KeySymbol::None);
    }

    #[test]
    fn linear_fit_is_monotonic_over_the_legal_range() {
        let fit = LinearFitClassifier::default();
        let mut previous = fit.decode(0) as u8;
        for raw in 1..=KEY_RAW_MAX {
            let bucket = fit.decode(raw) as u8;
            assert!(bucket >= previous, "bucket regressed at raw={raw}");
            previous = bucket;
        }
    }

    #[test]
    fn far_out_of_range_samples_map_to_none() {
        let fit = LinearFitClassifier::default();
        assert_eq!(fit.decode(u16::MAX), KeySymbol::None);

        let table = CalibrationTable::stock();
        assert_eq!(table.decode(u16::MAX), KeySymbol::None);
    }

    #[test]
    fn decode_is_deterministic_across_the_domain() {
        let decoders = [
            KeyDecoder::default(),
            KeyDecoder::LinearFit(LinearFitClassifier::default()),
        ];
        for decoder in decoders {
            for raw in 0..=KEY_RAW_MAX {
                assert_eq!(decoder.decode(raw), decoder.decode(raw));
            }
        }
    }
}

//! Tabulated lamination data.
//!
//! Rows are indexed by `SteelGrade::table_index` and share the flux-density
//! grid `B_GRID`. Field strength is in A/cm, specific loss in W/kg at 50 Hz.

pub const GRID_LEN: usize = 37;

/// Shared flux-density sample points (T), ascending.
pub const B_GRID: [f64; GRID_LEN] = [
    0.40, 0.45, 0.50, 0.55, 0.60, 0.65, 0.70, 0.75, 0.80, 0.85, //
    0.90, 0.95, 1.00, 1.05, 1.10, 1.15, 1.20, 1.25, 1.30, 1.35, //
    1.40, 1.45, 1.50, 1.55, 1.60, 1.65, 1.70, 1.75, 1.80, 1.85, //
    1.90, 1.95, 2.00, 2.05, 2.10, 2.15, 2.20,
];

pub(crate) const FIELD_STRENGTH: [[f64; GRID_LEN]; 5] = [
    // DR510-50
    [
        75.0, 88.0, 102.0, 118.0, 135.0, 155.0, 178.0, 205.0, 236.0, 272.0, //
        314.0, 363.0, 420.0, 486.0, 563.0, 653.0, 758.0, 880.0, 1023.0, 1190.0, //
        1385.0, 1614.0, 1882.0, 2196.0, 2564.0, 2995.0, 3500.0, 4092.0, 4785.0, 5595.0, //
        6540.0, 7642.0, 8925.0, 10420.0, 12160.0, 14180.0, 16530.0,
    ],
    // DR420-50
    [
        70.0, 82.0, 95.0, 110.0, 127.0, 146.0, 168.0, 193.0, 222.0, 255.0, //
        293.0, 337.0, 388.0, 447.0, 516.0, 596.0, 689.0, 798.0, 925.0, 1073.0, //
        1246.0, 1447.0, 1682.0, 1955.0, 2272.0, 2639.0, 3065.0, 3559.0, 4132.0, 4796.0, //
        5565.0, 6453.0, 7477.0, 8658.0, 10020.0, 11590.0, 13400.0,
    ],
    // DR490-50
    [
        78.0, 92.0, 107.0, 124.0, 143.0, 164.0, 188.0, 216.0, 247.0, 283.0, //
        324.0, 371.0, 425.0, 488.0, 561.0, 646.0, 745.0, 860.0, 994.0, 1150.0, //
        1331.0, 1540.0, 1782.0, 2062.0, 2386.0, 2760.0, 3193.0, 3693.0, 4272.0, 4942.0, //
        5718.0, 6616.0, 7655.0, 8856.0, 10245.0, 11850.0, 13700.0,
    ],
    // DR550-50
    [
        85.0, 100.0, 117.0, 136.0, 157.0, 181.0, 208.0, 239.0, 274.0, 314.0, //
        360.0, 413.0, 474.0, 544.0, 625.0, 719.0, 828.0, 954.0, 1100.0, 1268.0, //
        1462.0, 1686.0, 1945.0, 2244.0, 2590.0, 2989.0, 3450.0, 3982.0, 4596.0, 5305.0, //
        6123.0, 7068.0, 8160.0, 9424.0, 10885.0, 12575.0, 14530.0,
    ],
    // DW315-50
    [
        80.0, 95.0, 110.0, 125.0, 140.0, 160.0, 180.0, 200.0, 225.0, 250.0, //
        280.0, 315.0, 355.0, 400.0, 450.0, 510.0, 580.0, 660.0, 750.0, 850.0, //
        970.0, 1100.0, 1250.0, 1420.0, 1620.0, 1840.0, 2100.0, 2400.0, 2750.0, 3150.0, //
        3600.0, 4100.0, 4700.0, 5400.0, 6200.0, 7100.0, 8100.0,
    ],
];

pub(crate) const SPECIFIC_LOSS: [[f64; GRID_LEN]; 5] = [
    // DR510-50
    [
        0.4, 0.6, 0.8, 1.0, 1.3, 1.6, 2.0, 2.5, 3.1, 3.8, //
        4.6, 5.5, 6.6, 7.9, 9.4, 11.2, 13.3, 15.7, 18.5, 21.7, //
        25.4, 29.6, 34.4, 39.9, 46.2, 53.3, 61.4, 70.5, 80.8, 92.4, //
        105.5, 120.2, 136.8, 155.5, 176.5, 200.2, 226.8,
    ],
    // DR420-50
    [
        0.3, 0.5, 0.7, 0.9, 1.2, 1.5, 1.9, 2.4, 2.9, 3.6, //
        4.3, 5.2, 6.2, 7.4, 8.8, 10.4, 12.3, 14.5, 17.0, 19.9, //
        23.2, 27.0, 31.3, 36.2, 41.8, 48.2, 55.4, 63.6, 72.8, 83.2, //
        94.9, 108.1, 122.9, 139.5, 158.2, 179.2, 202.8,
    ],
    // DR490-50
    [
        0.45, 0.65, 0.85, 1.1, 1.4, 1.7, 2.1, 2.6, 3.2, 3.9, //
        4.7, 5.6, 6.7, 8.0, 9.5, 11.3, 13.4, 15.8, 18.6, 21.8, //
        25.5, 29.7, 34.5, 40.0, 46.3, 53.4, 61.5, 70.7, 81.1, 92.8, //
        106.0, 120.8, 137.4, 156.0, 176.8, 200.1, 226.2,
    ],
    // DR550-50
    [
        0.5, 0.7, 0.9, 1.2, 1.5, 1.9, 2.3, 2.8, 3.4, 4.1, //
        4.9, 5.8, 6.9, 8.2, 9.7, 11.5, 13.6, 16.0, 18.8, 22.0, //
        25.7, 29.9, 34.7, 40.2, 46.5, 53.7, 61.9, 71.2, 81.7, 93.6, //
        107.0, 122.1, 139.0, 158.0, 179.3, 203.2, 230.0,
    ],
    // DW315-50
    [
        0.5, 0.7, 0.9, 1.2, 1.5, 1.9, 2.4, 3.0, 3.7, 4.5, //
        5.4, 6.5, 7.8, 9.3, 11.0, 12.9, 15.1, 17.6, 20.4, 23.6, //
        27.2, 31.2, 35.7, 40.7, 46.2, 52.3, 59.0, 66.3, 74.3, 83.0, //
        92.5, 102.8, 114.0, 126.1, 139.2, 153.3, 168.5,
    ],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_ascending_with_fixed_step() {
        for w in B_GRID.windows(2) {
            assert!(w[1] > w[0]);
            assert!((w[1] - w[0] - 0.05).abs() < 1e-9);
        }
        assert_eq!(B_GRID[0], 0.40);
        assert_eq!(B_GRID[GRID_LEN - 1], 2.20);
    }

    #[test]
    fn tables_are_non_decreasing() {
        for row in FIELD_STRENGTH.iter().chain(SPECIFIC_LOSS.iter()) {
            for w in row.windows(2) {
                assert!(w[1] >= w[0]);
            }
        }
    }
}

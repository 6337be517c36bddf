pub mod direction {
    const COMPASS: [&str; 16] = [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW",
    ];

    /// 16-point compass label for a bearing in degrees. Any finite angle is
    /// accepted and wrapped into `[0, 360)`.
    pub fn degree_to_compass(deg: f64) -> &'static str {
        if !deg.is_finite() {
            return "--";
        }
        let deg = deg.rem_euclid(360.0);
        let idx = (deg / 22.5 + 0.5) as usize % 16;
        COMPASS[idx]
    }

    #[test]
    fn test_degree_to_compass() {
        assert_eq!(degree_to_compass(0.0), "N");
        assert_eq!(degree_to_compass(11.0), "N");
        assert_eq!(degree_to_compass(12.0), "NNE");
        assert_eq!(degree_to_compass(90.0), "E");
        assert_eq!(degree_to_compass(180.0), "S");
        assert_eq!(degree_to_compass(271.0), "W");
        assert_eq!(degree_to_compass(355.0), "N");
        assert_eq!(degree_to_compass(-90.0), "W");
        assert_eq!(degree_to_compass(f64::NAN), "--");
    }
}

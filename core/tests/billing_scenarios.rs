/// Worked billing examples from the contract, checked end to end through the
/// public API.

#[cfg(test)]
mod billing_scenarios {
    use trenchwork_compute::{
        build_monthly_report, calculate_depth_penalty_breakdown, calculate_distance_adjustment,
        calculate_net_cost, daily_records_from_json, depth_events_from_json, format_currency,
        format_distance, DistanceBand, MonthlyPerformanceRecord,
    };

    #[test]
    fn test_critical_month_penalty() {
        let adjustment = calculate_distance_adjustment(4.0).unwrap();
        assert_eq!(adjustment.band, DistanceBand::Critical);

        let penalty = adjustment.penalty.unwrap();
        assert_eq!(penalty.shortfall_km, 3.5);
        assert_eq!(penalty.segments, 14);
        assert_eq!(penalty.total_penalty, 588_000.0);
        assert!(adjustment.incentive.is_none());
    }

    #[test]
    fn test_warning_month_penalty() {
        let penalty = calculate_distance_adjustment(6.0).unwrap().penalty.unwrap();
        assert_eq!(penalty.segments, 6);
        assert_eq!(penalty.rate_per_segment, 40_000.0);
        assert_eq!(penalty.total_penalty, 240_000.0);
    }

    #[test]
    fn test_good_month_incentive() {
        let incentive = calculate_distance_adjustment(9.0).unwrap().incentive.unwrap();
        assert_eq!(incentive.segments, 6);
        assert_eq!(incentive.total_incentive, 252_000.0);
    }

    #[test]
    fn test_excellent_month_incentive() {
        let adjustment = calculate_distance_adjustment(12.0).unwrap();
        assert_eq!(adjustment.band, DistanceBand::Excellent);

        let incentive = adjustment.incentive.unwrap();
        assert_eq!(incentive.tiers[0].amount, 420_000.0);
        assert_eq!(incentive.tiers[1].amount, 360_000.0);
        assert_eq!(incentive.total_incentive, 780_000.0);
    }

    #[test]
    fn test_depth_penalties_and_net_cost() {
        let events = depth_events_from_json(
            r#"[
                { "id": 1, "depth": 165, "latlong": "23.25,77.41", "created_at": "2024-06-01" },
                { "id": 2, "depth": "160", "latlong": "23.26,77.42", "created_at": "2024-06-02" },
                { "id": 3, "depth": 145, "latlong": "23.27,77.43", "created_at": "2024-06-03" },
                { "id": 4, "depth": "110 cm", "latlong": "23.28,77.44", "created_at": "2024-06-04" }
            ]"#,
        )
        .unwrap();

        let summary = calculate_depth_penalty_breakdown(events).unwrap();
        assert_eq!(summary.penalty500_events, 1);
        assert_eq!(summary.penalty1100_events, 1);
        assert_eq!(summary.critical_events, 1);
        assert_eq!(summary.total_depth_penalty, 1_600.0);

        let net = calculate_net_cost(100_000.0, Some(240_000.0), None, summary.total_depth_penalty)
            .unwrap();
        assert_eq!(net, 341_600.0);
        assert_eq!(format_currency(net), "₹3,41,600");
    }

    #[test]
    fn test_full_report_from_payloads() {
        let daily = daily_records_from_json(
            r#"{ "data": [
                { "date": "2024-06-01", "totalDistance": 0.25 },
                { "date": "2024-06-02", "totalDistance": "0.40" },
                { "date": "2024-06-03", "totalDistance": 0.10 }
            ] }"#,
        )
        .unwrap();
        let record = MonthlyPerformanceRecord {
            monthly_total_distance: 0.75,
            machine_rent: 90_000.0,
            daily_distances: daily,
        };
        let report = build_monthly_report(record, vec![]).unwrap();

        assert_eq!(report.adjustment.band, DistanceBand::Critical);
        assert_eq!(report.daily.days_met, 2);
        assert_eq!(report.daily.days_missed, 1);
        assert_eq!(report.formatted.monthly_distance, format_distance(0.75));
        // 6.75 km short is 27 segments at the critical rate
        assert_eq!(report.cost.distance_penalty, 27.0 * 42_000.0);
        assert_eq!(report.cost.net_cost, 90_000.0 + 27.0 * 42_000.0);
    }
}

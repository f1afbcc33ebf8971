//! # Visibility Flow
//!
//! Department scoping applied end to end through the gateway's query
//! surface: scoped users must never receive out-of-scope rolls.

#[cfg(test)]
mod tests {
    use crate::fixtures::Harness;
    use shared_types::{AuthPrincipal, Role};
    use wt_07_api_gateway::{ApiError, SearchQuery};

    fn seeded() -> Harness {
        let harness = Harness::new();
        harness.seed_roll("FM", "MAT-FM", "B-1");
        harness.seed_roll("FM", "MAT-FM", "B-2");
        harness.seed_roll("LM", "MAT-LM", "B-1");
        harness.seed_location("FMA01");
        harness.seed_location("LMA01");
        harness
    }

    #[tokio::test]
    async fn test_operator_sees_zero_rolls_outside_home_department() {
        let harness = seeded();
        let op = harness.principal("op", Role::Operator, "FM", "");

        let results = harness
            .gateway
            .search_rolls(&op, &SearchQuery::default())
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.material_number == "MAT-FM"));
    }

    #[tokio::test]
    async fn test_stock_keeper_extra_access_widens_the_scope() {
        let harness = seeded();
        let sk = harness.principal("sk", Role::StockKeeper, "FM", "LM");

        let results = harness
            .gateway
            .search_rolls(&sk, &SearchQuery::default())
            .unwrap();
        assert_eq!(results.len(), 3);

        // And the extra department may be addressed directly.
        let rolls = harness.gateway.rolls_at_location(&sk, "LMA01").unwrap();
        assert!(rolls.is_empty());
    }

    #[tokio::test]
    async fn test_view_only_role_is_refused_not_filtered_to_empty() {
        let harness = seeded();
        let viewer = harness.principal("viewer", Role::ViewOnly, "FM", "");

        let err = harness
            .gateway
            .search_rolls(&viewer, &SearchQuery::default())
            .unwrap_err();
        assert!(matches!(err, ApiError::PermissionDenied { .. }));
    }

    #[tokio::test]
    async fn test_admin_override_narrows_unrestricted_scope() {
        let harness = seeded();
        let admin = AuthPrincipal::new("admin", Some(Role::FactoryAdmin));

        let all = harness
            .gateway
            .search_rolls(&admin, &SearchQuery::default())
            .unwrap();
        assert_eq!(all.len(), 3);

        let only_lm = harness
            .gateway
            .search_rolls(
                &admin,
                &SearchQuery {
                    department: Some("lm".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(only_lm.len(), 1);
        assert_eq!(only_lm[0].material_number, "MAT-LM");
    }

    #[tokio::test]
    async fn test_out_of_scope_location_is_denied_not_hidden() {
        let harness = seeded();
        let op = harness.principal("op", Role::Operator, "FM", "");

        let err = harness.gateway.rolls_at_location(&op, "LMA01").unwrap_err();
        assert!(matches!(err, ApiError::PermissionDenied { .. }));
    }
}

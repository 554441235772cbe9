//! The built-in policy table, spelled out key by key.
//!
//! Each fixed role is compared against a literal key set so that a change
//! to the table (or to how its entries expand) shows up as a test failure.

use pushwave_rbac::{PermissionRegistry, RoleCatalog};
use std::collections::BTreeSet;

fn assert_role_holds_exactly(role: &str, expected: &[&str]) {
    let registry = PermissionRegistry::with_defaults();
    let catalog = RoleCatalog::builtin(&registry);

    let actual: BTreeSet<&str> = catalog
        .get(role)
        .unwrap()
        .permissions()
        .into_iter()
        .collect();
    let expected: BTreeSet<&str> = expected.iter().copied().collect();
    assert_eq!(actual, expected, "{role}");
}

#[test]
fn marketing_manager_table() {
    assert_role_holds_exactly(
        "marketing_manager",
        &[
            "read_user",
            "list_user",
            "read_role",
            "list_role",
            "create_segment",
            "read_segment",
            "update_segment",
            "delete_segment",
            "list_segment",
            "export_segment",
            "create_template",
            "read_template",
            "update_template",
            "delete_template",
            "list_template",
            "publish_template",
            "create_campaign",
            "read_campaign",
            "update_campaign",
            "delete_campaign",
            "list_campaign",
            "publish_campaign",
            "approve_campaign",
            "execute_campaign",
            "create_notification",
            "read_notification",
            "delete_notification",
            "list_notification",
            "execute_notification",
            "create_trigger",
            "read_trigger",
            "update_trigger",
            "delete_trigger",
            "list_trigger",
            "execute_trigger",
            "read_webhook",
            "list_webhook",
            "read_analytics",
            "list_analytics",
            "export_analytics",
            "create_ab_test",
            "read_ab_test",
            "update_ab_test",
            "delete_ab_test",
            "list_ab_test",
            "approve_ab_test",
            "execute_ab_test",
            "read_cep_decision",
            "list_cep_decision",
        ],
    );
}

#[test]
fn campaign_manager_table() {
    assert_role_holds_exactly(
        "campaign_manager",
        &[
            "create_campaign",
            "read_campaign",
            "update_campaign",
            "list_campaign",
            "publish_campaign",
            "execute_campaign",
            "read_segment",
            "list_segment",
            "read_template",
            "list_template",
            "create_notification",
            "read_notification",
            "list_notification",
            "execute_notification",
            "create_trigger",
            "read_trigger",
            "update_trigger",
            "list_trigger",
            "create_ab_test",
            "read_ab_test",
            "update_ab_test",
            "list_ab_test",
            "execute_ab_test",
            "read_analytics",
        ],
    );
}

#[test]
fn content_editor_table() {
    assert_role_holds_exactly(
        "content_editor",
        &[
            "create_template",
            "read_template",
            "update_template",
            "delete_template",
            "list_template",
            "read_campaign",
            "list_campaign",
            "read_notification",
            "list_notification",
        ],
    );
}

#[test]
fn analytics_specialist_table() {
    assert_role_holds_exactly(
        "analytics_specialist",
        &[
            "read_analytics",
            "list_analytics",
            "export_analytics",
            "read_campaign",
            "list_campaign",
            "read_segment",
            "list_segment",
            "export_segment",
            "read_ab_test",
            "list_ab_test",
            "read_notification",
            "list_notification",
            "read_cep_decision",
            "list_cep_decision",
        ],
    );
}

#[test]
fn segment_manager_table() {
    assert_role_holds_exactly(
        "segment_manager",
        &[
            "create_segment",
            "read_segment",
            "update_segment",
            "delete_segment",
            "list_segment",
            "export_segment",
            "read_cdp_integration",
            "list_cdp_integration",
            "read_analytics",
        ],
    );
}

#[test]
fn integration_specialist_table() {
    assert_role_holds_exactly(
        "integration_specialist",
        &[
            "create_webhook",
            "read_webhook",
            "update_webhook",
            "delete_webhook",
            "list_webhook",
            "execute_webhook",
            "create_cdp_integration",
            "read_cdp_integration",
            "update_cdp_integration",
            "delete_cdp_integration",
            "list_cdp_integration",
            "execute_cdp_integration",
            "create_cep_decision",
            "read_cep_decision",
            "update_cep_decision",
            "delete_cep_decision",
            "list_cep_decision",
            "execute_cep_decision",
            "read_trigger",
            "list_trigger",
            "read_segment",
            "list_segment",
        ],
    );
}

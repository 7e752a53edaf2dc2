//! # Backup
//!
//! JSON export/import of a whole account snapshot.
//!
//! The export is the snapshot's exact serde form (camelCase fields, ISO
//! dates, minor-unit integers), so `import(export(s)) == s` holds
//! deep-equal, including empty collections. The same document shape is
//! what the SQLite store persists per account row.

use serde_json;

use crate::error::{CoreError, ValidationError};
use crate::types::AccountSnapshot;

/// Serializes a snapshot to a pretty-printed JSON document.
pub fn export(snapshot: &AccountSnapshot) -> Result<String, CoreError> {
    serde_json::to_string_pretty(snapshot).map_err(|e| {
        ValidationError::InvalidFormat {
            field: "snapshot".to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Deserializes a previously exported document.
///
/// Unknown fields are ignored; missing collections default to empty, so
/// older exports stay importable.
pub fn import(document: &str) -> Result<AccountSnapshot, CoreError> {
    serde_json::from_str(document).map_err(|e| {
        ValidationError::InvalidFormat {
            field: "backup document".to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{AccountProfile, Partner, ProductVariant};
    use chrono::Utc;

    #[test]
    fn test_round_trip_deep_equal() {
        let mut snapshot = AccountSnapshot::new(
            "acc-1",
            AccountProfile {
                name: "Bazaar Shop".to_string(),
                email: "owner@example.com".to_string(),
                mobile: "01700000000".to_string(),
                secret_code: "1234".to_string(),
                currency: "৳".to_string(),
            },
        );
        snapshot.products.push(ProductVariant {
            id: "var-1".to_string(),
            name: "Polo Shirt".to_string(),
            code: "PS-01".to_string(),
            category: "Shirts".to_string(),
            color: "Red".to_string(),
            size: "L".to_string(),
            stock_quantity: 4,
            buy_price: Money::from_minor(6000),
            sell_price: Money::from_minor(11000),
            added_at: Utc::now(),
        });
        snapshot.partners.push(Partner {
            id: "p1".to_string(),
            name: "Wholesale Karim".to_string(),
            mobile: "01800000000".to_string(),
            description: "Fabric supplier".to_string(),
        });

        let document = export(&snapshot).unwrap();
        let restored = import(&document).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_round_trip_empty_collections() {
        let snapshot = AccountSnapshot::new("acc-2", AccountProfile::default());
        let restored = import(&export(&snapshot).unwrap()).unwrap();
        assert_eq!(restored, snapshot);
        assert!(restored.products.is_empty());
    }

    #[test]
    fn test_import_missing_collections_defaults_empty() {
        let document = r#"{"id":"acc-3","profile":{"name":"","email":"","mobile":"","secretCode":"","currency":""}}"#;
        let snapshot = import(document).unwrap();
        assert_eq!(snapshot.id, "acc-3");
        assert!(snapshot.transactions.is_empty());
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(import("not json at all").is_err());
        assert!(import(r#"{"id": 42}"#).is_err());
    }
}

//! Order classification
//!
//! Maps a raw purchase into a destination-tagged ticket: which line
//! items go to the kitchen, which to the register/bar, under which
//! originating register name. Pure mapping, no side effects.

use crate::zettle::Purchase;

/// Product category routed to the kitchen printer
pub const KITCHEN_CATEGORY: &str = "Mat - Köket";

/// Product category routed to the register/bar printer
pub const BAR_CATEGORY: &str = "Mat - Baren";

/// A normalized line item, the unit the dispatcher prints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub amount: i64,
    pub item: String,
    pub extra: Option<String>,
}

/// A single order's items, classified by destination, pending printing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Assigned by the sequence allocator; `None` until numbered
    pub sequence_id: Option<String>,
    /// Register the order was taken at (selects the customer printer)
    pub origin_register: String,
    pub kitchen_items: Vec<LineItem>,
    pub register_items: Vec<LineItem>,
}

impl Ticket {
    /// A ticket with no printable items is dropped before numbering
    pub fn is_empty(&self) -> bool {
        self.kitchen_items.is_empty() && self.register_items.is_empty()
    }

    /// Kitchen and register items combined, for the customer copy
    pub fn merged_items(&self) -> Vec<LineItem> {
        let mut items = self.kitchen_items.clone();
        items.extend(self.register_items.iter().cloned());
        items
    }
}

/// Classify a raw purchase into a ticket
///
/// Products outside the kitchen and bar categories contribute to
/// neither list. A ticket with both lists empty is a legitimate output;
/// callers filter it out before numbering.
pub fn classify(order: &Purchase) -> Ticket {
    let mut ticket = Ticket {
        sequence_id: None,
        origin_register: order.user_display_name.clone(),
        kitchen_items: Vec::new(),
        register_items: Vec::new(),
    };

    for product in &order.products {
        let item = LineItem {
            amount: product.quantity,
            item: product.variant_name.clone(),
            extra: product.comment.clone(),
        };

        match product.name.as_str() {
            KITCHEN_CATEGORY => ticket.kitchen_items.push(item),
            BAR_CATEGORY => ticket.register_items.push(item),
            _ => {}
        }
    }

    ticket
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zettle::PurchaseProduct;

    fn scenario_order() -> Purchase {
        Purchase {
            id: "p-1".into(),
            user_display_name: "Kassa 1".into(),
            products: vec![
                PurchaseProduct {
                    name: KITCHEN_CATEGORY.into(),
                    quantity: 2,
                    variant_name: "Burger".into(),
                    comment: Some("no onions".into()),
                },
                PurchaseProduct {
                    name: BAR_CATEGORY.into(),
                    quantity: 1,
                    variant_name: "Cola".into(),
                    comment: None,
                },
            ],
        }
    }

    #[test]
    fn test_classify_scenario() {
        let ticket = classify(&scenario_order());

        assert_eq!(ticket.origin_register, "Kassa 1");
        assert_eq!(
            ticket.kitchen_items,
            vec![LineItem {
                amount: 2,
                item: "Burger".into(),
                extra: Some("no onions".into()),
            }]
        );
        assert_eq!(
            ticket.register_items,
            vec![LineItem {
                amount: 1,
                item: "Cola".into(),
                extra: None,
            }]
        );
        assert_eq!(ticket.sequence_id, None);
    }

    #[test]
    fn test_classify_is_pure() {
        let order = scenario_order();
        assert_eq!(classify(&order), classify(&order));
    }

    #[test]
    fn test_unrecognized_category_is_ignored() {
        let order = Purchase {
            id: "p-2".into(),
            user_display_name: "Kassa 2".into(),
            products: vec![PurchaseProduct {
                name: "Merch".into(),
                quantity: 1,
                variant_name: "T-shirt".into(),
                comment: None,
            }],
        };

        let ticket = classify(&order);
        assert!(ticket.is_empty());
    }

    #[test]
    fn test_merged_items_order() {
        let ticket = classify(&scenario_order());
        let merged = ticket.merged_items();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].item, "Burger");
        assert_eq!(merged[1].item, "Cola");
    }
}

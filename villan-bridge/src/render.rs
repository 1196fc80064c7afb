//! Ticket layouts
//!
//! Renders a classified, numbered ticket into ESC/POS bytes for each of
//! the three receipt copies. Every copy opens with a separator-framed
//! header, names the venue or shouts at the staff as appropriate, and
//! finishes with a paper cut.

use chrono::Local;
use villan_printer::{EscPosBuilder, order_number_banner, truncate_latin9};

use crate::classify::{LineItem, Ticket};

/// 80mm paper at Font A
pub const PAPER_WIDTH: usize = 48;

const VENUE_NAME: &str = "Studentpuben Villan";

/// Renders tickets for thermal printers
#[derive(Debug, Clone)]
pub struct TicketRenderer {
    width: usize,
}

impl TicketRenderer {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// Customer copy: merged item list plus the order number banner
    pub fn customer_copy(&self, ticket: &Ticket) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);

        b.bold();
        b.left();
        b.sep_double();
        b.center();
        b.line(VENUE_NAME);
        b.line("Food order");
        b.left();
        b.sep_double();
        b.line("Thanks for your order!");
        b.newline();
        b.line("You ordered:");

        for item in ticket.merged_items() {
            self.render_item(&mut b, &item);
        }

        b.newline();
        b.line(&format!(
            "Sent to kitchen: {}",
            Local::now().format("%H:%M")
        ));

        b.raster(&order_number_banner(self.sequence(ticket)));
        b.cut();

        b.build()
    }

    /// Kitchen copy: emphasis layout on the fixed kitchen printer
    pub fn kitchen_copy(&self, ticket: &Ticket) -> Vec<u8> {
        self.internal_copy(&ticket.kitchen_items, ticket)
    }

    /// Register copy: same layout as the kitchen copy, bar items only
    pub fn register_copy(&self, ticket: &Ticket) -> Vec<u8> {
        self.internal_copy(&ticket.register_items, ticket)
    }

    fn internal_copy(&self, items: &[LineItem], ticket: &Ticket) -> Vec<u8> {
        let mut b = EscPosBuilder::new(self.width);

        b.bold();
        b.left();
        b.sep_double();
        b.center();
        b.double_size();
        b.line("Food order");
        b.reset_size();
        b.left();
        b.sep_double();
        b.line("CUSTOMER BOUGHT THE FOLLOWING:");
        b.newline();

        for item in items {
            self.render_item(&mut b, item);
        }

        b.newline();
        b.line(&format!("ORDER LOCATION: {}", ticket.origin_register));
        b.line(&format!("GOT ORDER AT: {}", Local::now().format("%H:%M")));

        b.center();
        b.double_size();
        b.line("ORDER NUMBER");
        b.line(self.sequence(ticket));
        b.reset_size();
        b.cut();

        b.build()
    }

    /// `{amount}x {item}` with an indented `*{extra}` line for comments
    fn render_item(&self, b: &mut EscPosBuilder, item: &LineItem) {
        let line = format!("{}x {}", item.amount, item.item);
        b.line(&truncate_latin9(&line, self.width));

        if let Some(ref extra) = item.extra
            && !extra.is_empty()
        {
            let extra_line = format!("    *{}", extra);
            b.line(&truncate_latin9(&extra_line, self.width));
        }
    }

    /// Only numbered tickets reach the dispatcher; the placeholder keeps
    /// an unnumbered render visibly wrong instead of silently zero
    fn sequence<'a>(&self, ticket: &'a Ticket) -> &'a str {
        ticket.sequence_id.as_deref().unwrap_or("---")
    }
}

impl Default for TicketRenderer {
    fn default() -> Self {
        Self::new(PAPER_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn numbered_ticket() -> Ticket {
        Ticket {
            sequence_id: Some("007".into()),
            origin_register: "Kassa 1".into(),
            kitchen_items: vec![LineItem {
                amount: 2,
                item: "Burger".into(),
                extra: Some("no onions".into()),
            }],
            register_items: vec![LineItem {
                amount: 1,
                item: "Cola".into(),
                extra: None,
            }],
        }
    }

    #[test]
    fn test_customer_copy_content() {
        let data = TicketRenderer::default().customer_copy(&numbered_ticket());

        assert!(contains(&data, VENUE_NAME.as_bytes()));
        assert!(contains(&data, b"Thanks for your order!"));
        assert!(contains(&data, b"2x Burger"));
        assert!(contains(&data, b"    *no onions"));
        assert!(contains(&data, b"1x Cola"));
        // Raster banner and cut at the end
        assert!(contains(&data, &[0x1D, 0x76, 0x30, 0x00]));
        assert!(contains(&data, &[0x1D, 0x56, 0x00]));
    }

    #[test]
    fn test_kitchen_copy_content() {
        let data = TicketRenderer::default().kitchen_copy(&numbered_ticket());

        assert!(contains(&data, b"CUSTOMER BOUGHT THE FOLLOWING:"));
        assert!(contains(&data, b"ORDER LOCATION: Kassa 1"));
        assert!(contains(&data, b"ORDER NUMBER"));
        assert!(contains(&data, b"007"));
        assert!(contains(&data, b"2x Burger"));
        // Kitchen items only
        assert!(!contains(&data, b"1x Cola"));
    }

    #[test]
    fn test_register_copy_content() {
        let data = TicketRenderer::default().register_copy(&numbered_ticket());

        assert!(contains(&data, b"1x Cola"));
        assert!(!contains(&data, b"2x Burger"));
    }

    #[test]
    fn test_long_item_is_clamped() {
        let mut ticket = numbered_ticket();
        ticket.kitchen_items[0].item = "X".repeat(100);

        let data = TicketRenderer::new(48).kitchen_copy(&ticket);
        assert!(!contains(&data, "X".repeat(60).as_bytes()));
    }

    #[test]
    fn test_customer_copy_raster_window_is_intact() {
        let data = TicketRenderer::default().customer_copy(&numbered_ticket());

        let pos = data
            .windows(4)
            .position(|w| w == [0x1D, 0x76, 0x30, 0x00])
            .expect("raster command present");

        // The declared xL xH yL yH window must fit in the buffer with
        // the cut command after it, or the printer eats the cut as
        // image data
        let x_bytes = data[pos + 4] as usize | ((data[pos + 5] as usize) << 8);
        let h = data[pos + 6] as usize | ((data[pos + 7] as usize) << 8);
        let payload_end = pos + 8 + x_bytes * h;
        assert!(data.len() > payload_end);
        assert!(
            data[payload_end..]
                .windows(3)
                .any(|w| w == [0x1D, 0x56, 0x00])
        );
    }

    #[test]
    fn test_separator_rule_width() {
        let data = TicketRenderer::new(48).customer_copy(&numbered_ticket());
        assert!(contains(&data, "=".repeat(48).as_bytes()));
    }
}

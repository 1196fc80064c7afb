//! Ingestion cycle
//!
//! One full pass: fetch recent purchases, classify each into a ticket,
//! drop empties and in-batch duplicates, assign order numbers in
//! fetch order, and dispatch to the printers. Printer failures are
//! isolated per destination; only API failures abort the cycle.

use std::collections::HashSet;
use tracing::{info, instrument, warn};
use villan_printer::Printer;

use crate::classify::classify;
use crate::dispatch::{DispatchError, PrintDispatcher};
use crate::sequence::SequenceAllocator;
use crate::zettle::{ApiResult, ZettleClient};

/// Outcome counters for one cycle
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleSummary {
    /// Purchases returned by the API
    pub fetched: usize,
    /// Purchases skipped as in-batch duplicates (same id seen twice)
    pub duplicates: usize,
    /// Tickets dropped because no line item routes to any printer
    pub skipped_empty: usize,
    /// Tickets numbered and dispatched
    pub printed: usize,
    /// Tickets skipped because their register has no printer mapped
    pub unknown_register: usize,
    /// Print attempts that failed across all dispatched tickets
    pub failed_destinations: usize,
}

/// Run one fetch→classify→number→dispatch cycle
///
/// Tickets are numbered and dispatched in fetch order (the listing is
/// requested newest first). A ticket whose register is unmapped is
/// logged and skipped; the rest of the batch proceeds.
#[instrument(skip(client, dispatcher, sequence))]
pub async fn run_cycle<P: Printer>(
    client: &ZettleClient,
    dispatcher: &PrintDispatcher<P>,
    sequence: &SequenceAllocator,
    limit: u32,
) -> ApiResult<CycleSummary> {
    let purchases = client.latest_purchases(limit, true).await?;

    let mut summary = CycleSummary {
        fetched: purchases.len(),
        ..Default::default()
    };
    let mut seen = HashSet::new();

    for purchase in &purchases {
        if !seen.insert(purchase.id.as_str()) {
            summary.duplicates += 1;
            continue;
        }

        let mut ticket = classify(purchase);
        if ticket.is_empty() {
            summary.skipped_empty += 1;
            continue;
        }

        ticket.sequence_id = Some(sequence.allocate());

        match dispatcher.dispatch(&ticket).await {
            Ok(report) => {
                summary.printed += 1;
                summary.failed_destinations += report.failures();
            }
            Err(DispatchError::UnknownRegister(name)) => {
                warn!(register = %name, purchase = %purchase.id, "No printer mapped for register, skipping ticket");
                summary.unknown_register += 1;
            }
        }
    }

    info!(
        fetched = summary.fetched,
        printed = summary.printed,
        duplicates = summary.duplicates,
        skipped_empty = summary.skipped_empty,
        unknown_register = summary.unknown_register,
        failed_destinations = summary.failed_destinations,
        "Cycle complete"
    );

    Ok(summary)
}

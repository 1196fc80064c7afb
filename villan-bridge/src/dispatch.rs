//! Print dispatch
//!
//! Routes a classified, numbered ticket to its destination printers and
//! aggregates per-destination success/failure. Each attempt is
//! independent: one destination failing never blocks the others, and
//! never aborts processing of subsequent tickets.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::{error, info, instrument};
use villan_printer::Printer;

use crate::classify::Ticket;
use crate::render::TicketRenderer;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The originating register has no printer mapped in configuration
    #[error("Unknown register: {0}")]
    UnknownRegister(String),
}

/// The three physical print targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Customer,
    Kitchen,
    Register,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Customer => write!(f, "customer"),
            Destination::Kitchen => write!(f, "kitchen"),
            Destination::Register => write!(f, "register"),
        }
    }
}

/// Per-destination outcome of one ticket dispatch
///
/// `None` means the destination was not attempted (no items for it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub customer: bool,
    pub kitchen: Option<bool>,
    pub register: Option<bool>,
}

impl DispatchReport {
    /// Count of attempted destinations that failed
    pub fn failures(&self) -> usize {
        let mut n = usize::from(!self.customer);
        if self.kitchen == Some(false) {
            n += 1;
        }
        if self.register == Some(false) {
            n += 1;
        }
        n
    }
}

/// Routes tickets to the configured printers
///
/// The customer and register copies go to the printer bound to the
/// originating register; the kitchen copy goes to the fixed kitchen
/// printer.
pub struct PrintDispatcher<P: Printer> {
    registers: HashMap<String, P>,
    kitchen: P,
    renderer: TicketRenderer,
}

impl<P: Printer> PrintDispatcher<P> {
    pub fn new(registers: HashMap<String, P>, kitchen: P, renderer: TicketRenderer) -> Self {
        Self {
            registers,
            kitchen,
            renderer,
        }
    }

    /// Dispatch one ticket to its destination printers
    ///
    /// 1. Customer copy: always, merged items, to the register's printer.
    /// 2. Kitchen copy: only when the ticket has kitchen items.
    /// 3. Register copy: only when the ticket has register items.
    #[instrument(skip(self, ticket), fields(sequence = ?ticket.sequence_id, register = %ticket.origin_register))]
    pub async fn dispatch(&self, ticket: &Ticket) -> Result<DispatchReport, DispatchError> {
        let register_printer = self
            .registers
            .get(&ticket.origin_register)
            .ok_or_else(|| DispatchError::UnknownRegister(ticket.origin_register.clone()))?;

        let mut report = DispatchReport::default();

        let data = self.renderer.customer_copy(ticket);
        report.customer = self
            .attempt(Destination::Customer, register_printer, &data)
            .await;

        if !ticket.kitchen_items.is_empty() {
            let data = self.renderer.kitchen_copy(ticket);
            report.kitchen = Some(self.attempt(Destination::Kitchen, &self.kitchen, &data).await);
        }

        if !ticket.register_items.is_empty() {
            let data = self.renderer.register_copy(ticket);
            report.register = Some(
                self.attempt(Destination::Register, register_printer, &data)
                    .await,
            );
        }

        Ok(report)
    }

    /// One isolated print attempt; failures are logged and reported, never raised
    async fn attempt(&self, destination: Destination, printer: &P, data: &[u8]) -> bool {
        match printer.print(data).await {
            Ok(()) => {
                info!(destination = %destination, bytes = data.len(), "Print job sent");
                true
            }
            Err(e) => {
                error!(destination = %destination, error = %e, "Print job failed");
                false
            }
        }
    }
}
